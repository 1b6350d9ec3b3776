//! Chains of steps.
//!
//! A [`SequenceComposer`] walks an initial attitude through a list of commanded steps, producing a
//! [`ManeuverPlan`] that holds every maneuver performed and every attitude passed through. The
//! inverse question, which maneuvers take a body through a given list of attitudes, is answered by
//! [`ManeuverPlan::recover`].

use crate::angles::AngleTriple;
use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::report::Trace;
use crate::resolver::{CommandMode, StepResolver};
use crate::sequence::EulerConvention;
use std::collections::BTreeMap;

/// The angle inputs of a run, numbered 1 through N.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepInputs {
    inputs: Vec<AngleTriple>,
}

impl StepInputs {
    #[must_use]
    pub fn new(inputs: Vec<AngleTriple>) -> Self {
        Self { inputs }
    }

    /// Builds the inputs from a map keyed by step number, which must run 1, 2, ..., N.
    pub fn from_map(inputs: BTreeMap<usize, AngleTriple>) -> Result<Self> {
        check_contiguous(inputs.keys().copied(), 1)?;
        Ok(Self::new(inputs.into_values().collect()))
    }

    /// Iterates over `(step, angles)`, starting at step 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AngleTriple)> + '_ {
        self.inputs.iter().copied().enumerate().map(|(i, a)| (i + 1, a))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl From<Vec<AngleTriple>> for StepInputs {
    fn from(inputs: Vec<AngleTriple>) -> Self {
        Self::new(inputs)
    }
}

impl FromIterator<AngleTriple> for StepInputs {
    fn from_iter<T: IntoIterator<Item = AngleTriple>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

pub(crate) fn check_contiguous(keys: impl Iterator<Item = usize>, first: usize) -> Result<()> {
    for (expected, found) in (first..).zip(keys) {
        if expected != found {
            return Err(Error::NonContiguousSteps { expected, found });
        }
    }
    Ok(())
}

/// Drives a [`StepResolver`] across every step of a run.
///
/// The attitude reached by each step is carried into the next one as an [`Orientation`]; Euler
/// angles only show up in the inputs and in what [`ManeuverPlan`] hands back.
///
/// ```
/// use slew::{AngleTriple, CommandMode, EulerConvention, SequenceComposer, StepInputs};
///
/// let composer = SequenceComposer::new(EulerConvention::default(), CommandMode::CommandedAttitude);
/// let inputs: StepInputs = [[30., 0., 0.], [100., 0., 0.]]
///     .into_iter()
///     .map(|angles| AngleTriple::new(angles).unwrap())
///     .collect();
/// let plan = composer.compose(AngleTriple::new([10., 0., 0.]).unwrap(), &inputs);
///
/// assert_eq!(plan.attitude_angles().len(), 3);
/// assert_eq!(plan.maneuver_angles().len(), 2);
/// assert_eq!(plan.maneuver_angles()[&2].to_string(), "[70.00, 0.00, 0.00]");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequenceComposer {
    resolver: StepResolver,
}

impl SequenceComposer {
    #[must_use]
    pub fn new(convention: EulerConvention, mode: CommandMode) -> Self {
        Self {
            resolver: StepResolver::new(convention, mode),
        }
    }

    #[must_use]
    pub fn convention(&self) -> EulerConvention {
        self.resolver.convention()
    }

    #[must_use]
    pub fn mode(&self) -> CommandMode {
        self.resolver.mode()
    }

    /// Runs every step in `inputs`, starting from the attitude described by `initial`.
    #[must_use]
    pub fn compose(&self, initial: AngleTriple, inputs: &StepInputs) -> ManeuverPlan {
        let start = Orientation::from_angles(initial, &self.convention());
        self.compose_from(initial, start, inputs)
    }

    /// Like [`SequenceComposer::compose`], but starts from an orientation the caller already has.
    ///
    /// `initial` is what gets reported as attitude 0, and should describe `start`.
    #[must_use]
    pub fn compose_from(
        &self,
        initial: AngleTriple,
        start: Orientation,
        inputs: &StepInputs,
    ) -> ManeuverPlan {
        let mut attitudes = Vec::with_capacity(inputs.len() + 1);
        let mut maneuvers = Vec::with_capacity(inputs.len());
        attitudes.push(start);

        let mut current = start;
        for (index, angles) in inputs.iter() {
            let step = self.resolver.resolve(&current, angles);
            tracing::debug!(index, %angles, "composed step");
            maneuvers.push(step.maneuver);
            attitudes.push(step.attitude);
            current = step.attitude;
        }

        tracing::debug!(
            mode = %self.mode(),
            convention = %self.convention(),
            steps = maneuvers.len(),
            "composed maneuver plan"
        );
        ManeuverPlan {
            convention: self.convention(),
            initial,
            attitudes,
            maneuvers,
        }
    }
}

/// The result of a run: attitudes 0 through N and the maneuvers 1 through N between them.
///
/// Maneuver `i` takes attitude `i - 1` to attitude `i`. There is always exactly one more attitude
/// than there are maneuvers.
#[derive(Clone, Debug, PartialEq)]
pub struct ManeuverPlan {
    convention: EulerConvention,
    initial: AngleTriple,
    attitudes: Vec<Orientation>,
    maneuvers: Vec<Orientation>,
}

impl ManeuverPlan {
    /// Derives the maneuvers that take a body through `attitudes`, in order.
    ///
    /// Maneuver `i` is `attitude[i] · attitude[i - 1]⁻¹`. A single attitude gives a plan without
    /// maneuvers; no attitudes at all is an error.
    pub fn recover(attitudes: &[AngleTriple], convention: EulerConvention) -> Result<Self> {
        let Some(&initial) = attitudes.first() else {
            return Err(Error::InconsistentSequence { difference: 0 });
        };
        let attitudes: Vec<_> = attitudes
            .iter()
            .map(|&angles| Orientation::from_angles(angles, &convention))
            .collect();
        let maneuvers = attitudes
            .windows(2)
            .map(|pair| pair[1].compose(&pair[0].inverse()))
            .collect();
        tracing::debug!(
            %convention,
            attitudes = attitudes.len(),
            "recovered maneuvers from attitudes"
        );
        Ok(Self {
            convention,
            initial,
            attitudes,
            maneuvers,
        })
    }

    /// Like [`ManeuverPlan::recover`], with attitudes keyed 0 through N.
    pub fn recover_map(
        attitudes: &BTreeMap<usize, AngleTriple>,
        convention: EulerConvention,
    ) -> Result<Self> {
        check_contiguous(attitudes.keys().copied(), 0)?;
        let attitudes: Vec<_> = attitudes.values().copied().collect();
        Self::recover(&attitudes, convention)
    }

    #[must_use]
    pub fn convention(&self) -> EulerConvention {
        self.convention
    }

    /// Number of steps, ie of maneuvers.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.maneuvers.len()
    }

    /// Attitudes 0 through N.
    #[must_use]
    pub fn attitudes(&self) -> &[Orientation] {
        &self.attitudes
    }

    /// Maneuvers 1 through N (at positions 0 through N - 1).
    #[must_use]
    pub fn maneuvers(&self) -> &[Orientation] {
        &self.maneuvers
    }

    /// The attitude reached after the last step, or the initial attitude if there are no steps.
    #[must_use]
    pub fn final_attitude(&self) -> Orientation {
        self.attitudes
            .last()
            .copied()
            .unwrap_or_else(|| Orientation::from_angles(self.initial, &self.convention))
    }

    /// Attitudes keyed 0 through N, as Euler angles under the plan's convention.
    ///
    /// Attitude 0 is the initial angles exactly as they were given; the others are derived from
    /// the composed orientations, see [`Orientation::to_angles`].
    #[must_use]
    pub fn attitude_angles(&self) -> BTreeMap<usize, AngleTriple> {
        std::iter::once((0, self.initial))
            .chain(
                self.attitudes
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(i, attitude)| (i, attitude.to_angles(&self.convention))),
            )
            .collect()
    }

    /// Maneuvers keyed 1 through N, as Euler angles under the plan's convention.
    #[must_use]
    pub fn maneuver_angles(&self) -> BTreeMap<usize, AngleTriple> {
        self.maneuvers
            .iter()
            .enumerate()
            .map(|(i, maneuver)| (i + 1, maneuver.to_angles(&self.convention)))
            .collect()
    }

    /// The (start, maneuver, end) listing of every step.
    pub fn trace(&self) -> Result<Trace> {
        Trace::from_angles(&self.attitude_angles(), &self.maneuver_angles())
    }
}
