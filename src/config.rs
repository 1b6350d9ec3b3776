//! Declarative description of a run.
//!
//! A [`PlanConfig`] is what one would write down in a file (eg in YAML):
//!
//! ```yaml
//! sequence: ZYX
//! unit: degrees
//! initial: [10, 0, 0]
//! commanded_attitudes:
//!   1: [30, 0, 0]
//!   2: [100, 0, 0]
//! ```
//!
//! Turning it into a [`PlanRequest`] validates everything that deserialization alone cannot.

use crate::angles::AngleTriple;
use crate::composer::{ManeuverPlan, SequenceComposer, StepInputs};
use crate::error::{Error, Result};
use crate::resolver::CommandMode;
use crate::sequence::{AngleSequence, AngleUnit, EulerConvention};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One run, as written down by a person.
///
/// Exactly one of `commanded_attitudes` and `commanded_maneuvers` may be given. If neither is,
/// the run has no steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    /// Axis sequence, eg `ZYX` (intrinsic) or `zyx` (extrinsic).
    #[serde(default = "default_sequence")]
    pub sequence: String,
    #[serde(default)]
    pub unit: AngleUnit,
    #[serde(default)]
    pub initial: AngleTriple,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commanded_attitudes: Option<BTreeMap<usize, AngleTriple>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commanded_maneuvers: Option<BTreeMap<usize, AngleTriple>>,
}

fn default_sequence() -> String {
    AngleSequence::default().to_string()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            sequence: default_sequence(),
            unit: AngleUnit::default(),
            initial: AngleTriple::default(),
            commanded_attitudes: None,
            commanded_maneuvers: None,
        }
    }
}

impl PlanConfig {
    /// Validates the configuration.
    pub fn into_request(self) -> Result<PlanRequest> {
        let convention = EulerConvention::parse(&self.sequence, self.unit)?;
        let (mode, inputs) = match (self.commanded_attitudes, self.commanded_maneuvers) {
            (Some(_), Some(_)) => return Err(Error::MixedCommandModes),
            (Some(attitudes), None) => (CommandMode::CommandedAttitude, attitudes),
            (None, Some(maneuvers)) => (CommandMode::CommandedManeuver, maneuvers),
            (None, None) => (CommandMode::CommandedAttitude, BTreeMap::new()),
        };
        Ok(PlanRequest {
            composer: SequenceComposer::new(convention, mode),
            initial: self.initial,
            inputs: StepInputs::from_map(inputs)?,
        })
    }
}

/// A validated run, ready to be composed.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanRequest {
    composer: SequenceComposer,
    initial: AngleTriple,
    inputs: StepInputs,
}

impl PlanRequest {
    #[must_use]
    pub fn convention(&self) -> EulerConvention {
        self.composer.convention()
    }

    #[must_use]
    pub fn mode(&self) -> CommandMode {
        self.composer.mode()
    }

    #[must_use]
    pub fn initial(&self) -> AngleTriple {
        self.initial
    }

    #[must_use]
    pub fn inputs(&self) -> &StepInputs {
        &self.inputs
    }

    #[must_use]
    pub fn plan(&self) -> ManeuverPlan {
        self.composer.compose(self.initial, &self.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::PlanConfig;
    use crate::angles::AngleTriple;
    use crate::error::Error;
    use crate::resolver::CommandMode;
    use crate::sequence::{AngleUnit, EulerConvention};

    fn t(a: f64, b: f64, c: f64) -> AngleTriple {
        AngleTriple::new([a, b, c]).unwrap()
    }

    fn parse(yaml: &str) -> PlanConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn full_attitude_plan() {
        let request = parse(
            r#"
            sequence: ZYX
            unit: degrees
            initial: [10, 0, 0]
            commanded_attitudes:
              1: [30, 0, 0]
              2: [100, 0, 0]
            "#,
        )
        .into_request()
        .unwrap();
        assert_eq!(request.mode(), CommandMode::CommandedAttitude);
        assert_eq!(request.convention(), EulerConvention::default());
        assert_eq!(request.initial(), t(10., 0., 0.));
        assert_eq!(request.inputs().len(), 2);

        let plan = request.plan();
        assert!(plan.maneuver_angles()[&2].same_angles(
            &t(70., 0., 0.),
            AngleUnit::Degrees,
            1e-9
        ));
    }

    #[test]
    fn maneuver_plan_in_radians() {
        let request = parse(
            r#"
            sequence: zxz
            unit: rad
            commanded_maneuvers:
              1: [0.5, 0.25, 0]
            "#,
        )
        .into_request()
        .unwrap();
        assert_eq!(request.mode(), CommandMode::CommandedManeuver);
        assert_eq!(request.convention().unit, AngleUnit::Radians);
        assert_eq!(request.convention().sequence.to_string(), "zxz");
        assert_eq!(request.initial(), AngleTriple::ZERO);
        assert_eq!(request.plan().steps(), 1);
    }

    #[test]
    fn defaults() {
        let request = parse("{}").into_request().unwrap();
        assert_eq!(request.mode(), CommandMode::CommandedAttitude);
        assert_eq!(request.convention(), EulerConvention::default());
        assert!(request.inputs().is_empty());
        assert_eq!(request.plan().attitudes().len(), 1);
        assert_eq!(PlanConfig::default(), parse("{}"));
    }

    #[test]
    fn both_tables_are_rejected() {
        let config = parse(
            r#"
            commanded_attitudes: {1: [30, 0, 0]}
            commanded_maneuvers: {1: [20, 0, 0]}
            "#,
        );
        assert_eq!(config.into_request(), Err(Error::MixedCommandModes));
    }

    #[test]
    fn gaps_are_rejected() {
        let config = parse("commanded_attitudes: {1: [30, 0, 0], 3: [20, 0, 0]}");
        assert_eq!(
            config.into_request(),
            Err(Error::NonContiguousSteps {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn bad_sequences_are_rejected() {
        let config = parse("sequence: ZZY");
        assert!(matches!(
            config.into_request(),
            Err(Error::InvalidSequence { .. })
        ));
    }

    #[test]
    fn malformed_documents_do_not_deserialize() {
        let unknown = serde_yaml::from_str::<PlanConfig>("sequnce: ZYX").unwrap_err();
        assert!(unknown.to_string().contains("unknown field"), "{unknown}");

        let short = serde_yaml::from_str::<PlanConfig>("initial: [1, 2]").unwrap_err();
        assert!(
            short.to_string().contains("expected 3 components, found 2"),
            "{short}"
        );

        let words = serde_yaml::from_str::<PlanConfig>("initial: [invalid, 0, 0]");
        assert!(words.is_err());

        let unit = serde_yaml::from_str::<PlanConfig>("unit: gradians");
        assert!(unit.is_err());
    }

    #[test]
    fn configs_serialize_back() {
        let config = parse("initial: [1, 2, 3]\ncommanded_maneuvers: {1: [4, 5, 6]}");
        let again: PlanConfig = serde_yaml::from_str(&serde_yaml::to_string(&config).unwrap())
            .unwrap();
        assert_eq!(again, config);
    }
}
