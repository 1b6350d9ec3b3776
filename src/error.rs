//! Error definitions.
use std::fmt;
use thiserror::Error;

/// Alias for results whose error is [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can go wrong while describing or composing a chain of rotations.
///
/// Errors are raised where the bad input is first seen (parsing an axis sequence, constructing an
/// angle triple, validating a plan) and never part-way through a composition, since every input to
/// the composer is already validated by its type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The axis-sequence string is malformed or describes an unsupported sequence.
    #[error("invalid axis sequence {sequence:?}: {reason}")]
    InvalidSequence {
        sequence: String,
        reason: &'static str,
    },

    /// An angle component could not be used.
    #[error("invalid angle: {0}")]
    InvalidAngle(AngleProblem),

    /// The unit is neither degrees nor radians.
    #[error("invalid angle unit {unit:?}, expected \"degrees\" or \"radians\"")]
    InvalidUnit { unit: String },

    /// The command mode is not one of the known interpretations of an angle input.
    #[error("invalid command mode {mode:?}, expected \"commanded_attitude\" or \"commanded_maneuver\"")]
    InvalidMode { mode: String },

    /// The attitude and maneuver sequences do not line up (there must be exactly one more attitude
    /// than maneuvers). `difference` is `len(attitudes) - len(maneuvers)`.
    #[error("{}", inconsistent_message(.difference))]
    InconsistentSequence { difference: isize },

    /// Keyed inputs must be numbered contiguously.
    #[error("step indices must be contiguous: expected step {expected}, found step {found}")]
    NonContiguousSteps { expected: usize, found: usize },

    /// A single run received both commanded attitudes and commanded maneuvers.
    #[error("a run takes either commanded attitudes or commanded maneuvers, not both")]
    MixedCommandModes,

    /// A matrix or quaternion does not describe a proper rotation.
    #[error("not a rotation: {reason}")]
    NotARotation { reason: &'static str },
}

fn inconsistent_message(difference: &isize) -> String {
    if *difference > 1 {
        format!("{difference} attitudes without corresponding maneuvers")
    } else {
        format!("{difference} maneuvers without corresponding attitudes")
    }
}

/// What exactly was wrong with an angle input.
#[derive(Debug, Clone, PartialEq)]
pub enum AngleProblem {
    /// The component at `component` (0-based) is not a number.
    NonNumeric { component: usize, text: String },
    /// The component at `component` (0-based) is NaN or infinite.
    NonFinite { component: usize, value: f64 },
    /// An angle triple needs exactly three components.
    WrongArity { found: usize },
}

impl fmt::Display for AngleProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNumeric { component, text } => {
                write!(f, "component {component} ({text:?}) is not numeric")
            }
            Self::NonFinite { component, value } => {
                write!(f, "component {component} ({value}) is not finite")
            }
            Self::WrongArity { found } => {
                write!(f, "expected 3 components, found {found}")
            }
        }
    }
}

impl From<AngleProblem> for Error {
    fn from(problem: AngleProblem) -> Self {
        Self::InvalidAngle(problem)
    }
}
