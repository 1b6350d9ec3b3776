//! This library predicts how a body's orientation evolves across a chain of commanded rotations,
//! and answers the inverse question of which rotations take it through a chain of known
//! orientations.
//!
//! Every run starts from an initial attitude and works through steps 1 to N. What each step's
//! angles mean is given by its [`CommandMode`]:
//!
//! - with [`CommandMode::CommandedAttitude`], each step names the absolute attitude to reach, and
//!   the library works out the maneuver (ie, relative rotation) needed to get there;
//! - with [`CommandMode::CommandedManeuver`], each step names the maneuver to perform, and the
//!   library works out the attitude it leads to.
//!
//! Either way, the outcome is a [`ManeuverPlan`] with attitudes 0 through N and maneuvers 1
//! through N, where maneuver `i` takes attitude `i - 1` onto attitude `i`.
//!
//! Three numbers only describe a rotation once one has agreed on which axes they rotate about, in
//! which order, whether those axes move along with the body, and whether the numbers are degrees
//! or radians. An [`EulerConvention`] captures all of that, is validated once, and is then used
//! for every conversion in a run. Between steps, orientations are carried as
//! [`Orientation`]s (unit quaternions), so no precision is lost to repeated Euler-angle round
//! trips, even around gimbal lock.
//!
//! # Examples
//!
//! A spacecraft sits at 10° yaw and is commanded to 30°, then to 100°, then back to 60°:
//!
//! ```
//! use slew::{AngleTriple, CommandMode, EulerConvention, SequenceComposer, StepInputs};
//!
//! // intrinsic yaw-pitch-roll in degrees
//! let convention: EulerConvention = EulerConvention::default();
//!
//! let targets: StepInputs = ["30, 0, 0", "100, 0, 0", "60, 0, 0"]
//!     .into_iter()
//!     .map(|text| text.parse::<AngleTriple>())
//!     .collect::<Result<_, _>>()?;
//!
//! let plan = SequenceComposer::new(convention, CommandMode::CommandedAttitude)
//!     .compose("10, 0, 0".parse()?, &targets);
//!
//! let maneuvers = plan.maneuver_angles();
//! assert_eq!(maneuvers[&1].to_string(), "[20.00, 0.00, 0.00]");
//! assert_eq!(maneuvers[&2].to_string(), "[70.00, 0.00, 0.00]");
//! assert_eq!(maneuvers[&3].to_string(), "[-40.00, 0.00, 0.00]");
//!
//! // the listing a human would want to read
//! println!("{}", plan.trace()?);
//! # Ok::<(), slew::Error>(())
//! ```
//!
//! Going the other way, the maneuvers can be recovered from the attitudes alone:
//!
//! ```
//! use slew::{AngleTriple, EulerConvention, ManeuverPlan};
//!
//! let attitudes = [
//!     AngleTriple::new([0., 0., 0.])?,
//!     AngleTriple::new([45., 0., 0.])?,
//! ];
//! let plan = ManeuverPlan::recover(&attitudes, EulerConvention::default())?;
//! assert_eq!(plan.maneuver_angles()[&1].to_string(), "[45.00, 0.00, 0.00]");
//! # Ok::<(), slew::Error>(())
//! ```
//!
//! With the `serde` feature (on by default), a run can also be described declaratively using
//! [`PlanConfig`].

mod angles;
mod composer;
mod error;
mod orientation;
mod report;
mod resolver;
mod util;

pub mod sequence;

#[cfg(feature = "serde")]
pub mod config;

pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;
pub(crate) type Quaternion = nalgebra::Quaternion<f64>;
pub(crate) type UnitQuaternion = nalgebra::Unit<Quaternion>;

pub use angles::AngleTriple;
pub use composer::{ManeuverPlan, SequenceComposer, StepInputs};
pub use error::{AngleProblem, Error, Result};
pub use orientation::Orientation;
pub use report::{Trace, TraceEntry};
pub use resolver::{CommandMode, Step, StepResolver};
pub use sequence::{AngleSequence, AngleUnit, Axis, EulerConvention, RotationKind};

#[cfg(feature = "serde")]
pub use config::{PlanConfig, PlanRequest};
