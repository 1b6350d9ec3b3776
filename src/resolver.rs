use crate::angles::AngleTriple;
use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::sequence::EulerConvention;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the angle input of a step is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandMode {
    /// The input is the absolute attitude to reach; the maneuver is derived.
    #[default]
    CommandedAttitude,
    /// The input is the relative maneuver to perform; the attitude is derived.
    CommandedManeuver,
}

impl Display for CommandMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommandedAttitude => "commanded_attitude",
            Self::CommandedManeuver => "commanded_maneuver",
        })
    }
}

impl FromStr for CommandMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "commanded_attitude" => Ok(Self::CommandedAttitude),
            "commanded_maneuver" => Ok(Self::CommandedManeuver),
            _ => Err(Error::InvalidMode { mode: s.to_owned() }),
        }
    }
}

/// The outcome of one step: the maneuver performed and the attitude it leads to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub maneuver: Orientation,
    pub attitude: Orientation,
}

/// Resolves a single step of a run, given the attitude the step starts from.
///
/// Whatever the [`CommandMode`], the result satisfies `attitude == maneuver * previous`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepResolver {
    convention: EulerConvention,
    mode: CommandMode,
}

impl StepResolver {
    #[must_use]
    pub fn new(convention: EulerConvention, mode: CommandMode) -> Self {
        Self { convention, mode }
    }

    #[must_use]
    pub fn convention(&self) -> EulerConvention {
        self.convention
    }

    #[must_use]
    pub fn mode(&self) -> CommandMode {
        self.mode
    }

    /// Turns `angles` into a [`Step`] away from `previous`.
    #[must_use]
    pub fn resolve(&self, previous: &Orientation, angles: AngleTriple) -> Step {
        let commanded = Orientation::from_angles(angles, &self.convention);
        let step = match self.mode {
            CommandMode::CommandedAttitude => Step {
                maneuver: commanded.compose(&previous.inverse()),
                attitude: commanded,
            },
            CommandMode::CommandedManeuver => Step {
                maneuver: commanded,
                attitude: commanded.compose(previous),
            },
        };
        tracing::trace!(mode = %self.mode, %angles, "resolved step");
        step
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandMode, StepResolver};
    use crate::angles::AngleTriple;
    use crate::error::Error;
    use crate::orientation::Orientation;
    use crate::sequence::{AngleUnit, EulerConvention};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn t(a: f64, b: f64, c: f64) -> AngleTriple {
        AngleTriple::new([a, b, c]).unwrap()
    }

    #[rstest]
    #[case("commanded_attitude", CommandMode::CommandedAttitude)]
    #[case("commanded_maneuver", CommandMode::CommandedManeuver)]
    fn mode_parsing(#[case] text: &str, #[case] mode: CommandMode) {
        assert_eq!(text.parse(), Ok(mode));
        assert_eq!(mode.to_string(), text);
    }

    #[rstest]
    #[case("commanded_rate")]
    #[case("Commanded_Attitude")]
    #[case("")]
    fn unknown_modes_are_rejected(#[case] text: &str) {
        assert_eq!(
            text.parse::<CommandMode>(),
            Err(Error::InvalidMode { mode: text.into() })
        );
    }

    #[test]
    fn commanded_attitude_derives_the_maneuver() {
        let ypr = EulerConvention::default();
        let previous = Orientation::from_angles(t(10., 0., 0.), &ypr);
        let step = StepResolver::new(ypr, CommandMode::CommandedAttitude)
            .resolve(&previous, t(30., 0., 0.));

        let maneuver = step.maneuver.to_angles(&ypr);
        assert!(maneuver.same_angles(&t(20., 0., 0.), AngleUnit::Degrees, 1e-9));
        assert_relative_eq!(
            step.attitude,
            Orientation::from_angles(t(30., 0., 0.), &ypr),
            epsilon = 1e-12
        );
    }

    #[test]
    fn commanded_maneuver_derives_the_attitude() {
        let ypr = EulerConvention::default();
        let step = StepResolver::new(ypr, CommandMode::CommandedManeuver)
            .resolve(&Orientation::identity(), t(45., 0., 0.));

        assert!(step
            .maneuver
            .to_angles(&ypr)
            .same_angles(&t(45., 0., 0.), AngleUnit::Degrees, 1e-9));
        assert!(step
            .attitude
            .to_angles(&ypr)
            .same_angles(&t(45., 0., 0.), AngleUnit::Degrees, 1e-9));
    }

    #[rstest]
    fn steps_chain_consistently(
        #[values(CommandMode::CommandedAttitude, CommandMode::CommandedManeuver)] mode: CommandMode,
    ) {
        let convention = EulerConvention::parse("ZXZ", AngleUnit::Degrees).unwrap();
        let previous = Orientation::from_angles(t(-30., 20., 75.), &convention);
        let step = StepResolver::new(convention, mode).resolve(&previous, t(12., 34., 56.));
        assert_relative_eq!(
            step.attitude,
            step.maneuver.compose(&previous),
            epsilon = 1e-12
        );
    }
}
