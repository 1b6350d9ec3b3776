//! Conventions for reading and writing orientations as three angles.
//!
//! An Euler angle triple means nothing on its own: the same three numbers describe different
//! rotations depending on which axes they rotate about, in what order, whether each rotation is
//! about the already-rotated ("intrinsic") or the fixed ("extrinsic") axes, and whether they are
//! in degrees or radians. [`EulerConvention`] pins all of that down once per run so that every
//! conversion in the run agrees.
//!
//! The textual form of an [`AngleSequence`] follows the widespread convention of upper-case
//! letters for intrinsic sequences and lower-case letters for extrinsic ones:
//!
//! ```
//! use slew::{AngleSequence, Axis, RotationKind};
//!
//! let ypr: AngleSequence = "ZYX".parse().expect("yaw-pitch-roll is a valid sequence");
//! assert_eq!(ypr.axes(), [Axis::Z, Axis::Y, Axis::X]);
//! assert_eq!(ypr.kind(), RotationKind::Intrinsic);
//!
//! let fixed: AngleSequence = "xyz".parse().unwrap();
//! assert_eq!(fixed.kind(), RotationKind::Extrinsic);
//!
//! assert!("ZZX".parse::<AngleSequence>().is_err());
//! ```

use crate::error::{Error, Result};
use crate::Vector3;
use nalgebra::Unit;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three principal axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Position of this axis in `[x, y, z]`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    pub(crate) fn unit_vector(self) -> Unit<Vector3> {
        match self {
            Self::X => Vector3::x_axis(),
            Self::Y => Vector3::y_axis(),
            Self::Z => Vector3::z_axis(),
        }
    }

    fn from_letter(letter: char) -> Option<(Self, bool)> {
        let axis = match letter.to_ascii_uppercase() {
            'X' => Self::X,
            'Y' => Self::Y,
            'Z' => Self::Z,
            _ => return None,
        };
        Some((axis, letter.is_ascii_uppercase()))
    }

    fn letter(self, kind: RotationKind) -> char {
        let upper = match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        };
        match kind {
            RotationKind::Intrinsic => upper,
            RotationKind::Extrinsic => upper.to_ascii_lowercase(),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter(RotationKind::Intrinsic))
    }
}

/// Whether the rotations of a sequence happen about the body's (moving) axes or the reference
/// frame's (fixed) axes.
///
/// An intrinsic sequence `A-B-C` with angles `(a, b, c)` is the same rotation as the extrinsic
/// sequence `C-B-A` with angles `(c, b, a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// Each rotation is about the axes produced by the rotations before it.
    Intrinsic,
    /// Each rotation is about the axes of the fixed reference frame.
    Extrinsic,
}

/// An ordered triple of rotation axes together with their [`RotationKind`].
///
/// No two consecutive axes may be the same, which leaves 12 orders per kind: six [Tait-Bryan]
/// orders (all three axes distinct, eg `ZYX`) and six [proper Euler] orders (first and last axis
/// equal, eg `ZXZ`).
///
/// [Tait-Bryan]: https://en.wikipedia.org/wiki/Euler_angles#Tait%E2%80%93Bryan_angles
/// [proper Euler]: https://en.wikipedia.org/wiki/Euler_angles#Classic_Euler_angles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct AngleSequence {
    axes: [Axis; 3],
    kind: RotationKind,
}

impl AngleSequence {
    /// Intrinsic Z-Y-X, ie yaw, then pitch, then roll.
    pub const YAW_PITCH_ROLL: Self = Self {
        axes: [Axis::Z, Axis::Y, Axis::X],
        kind: RotationKind::Intrinsic,
    };

    /// Constructs a sequence, checking that no two consecutive axes are equal.
    pub fn new(axes: [Axis; 3], kind: RotationKind) -> Result<Self> {
        let sequence = Self { axes, kind };
        if axes[0] == axes[1] || axes[1] == axes[2] {
            return Err(Error::InvalidSequence {
                sequence: sequence.to_string(),
                reason: "consecutive axes must differ",
            });
        }
        Ok(sequence)
    }

    #[must_use]
    pub fn axes(&self) -> [Axis; 3] {
        self.axes
    }

    #[must_use]
    pub fn kind(&self) -> RotationKind {
        self.kind
    }

    /// Returns `true` for sequences whose first and last axes coincide (eg `ZXZ`).
    #[must_use]
    pub fn is_proper_euler(&self) -> bool {
        self.axes[0] == self.axes[2]
    }
}

impl Default for AngleSequence {
    fn default() -> Self {
        Self::YAW_PITCH_ROLL
    }
}

impl Display for AngleSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for axis in self.axes {
            write!(f, "{}", axis.letter(self.kind))?;
        }
        Ok(())
    }
}

impl FromStr for AngleSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidSequence {
            sequence: s.to_owned(),
            reason,
        };

        let letters: Vec<char> = s.chars().collect();
        if letters.len() != 3 {
            return Err(invalid("expected exactly three axes"));
        }

        let mut axes = [Axis::X; 3];
        let mut upper = [false; 3];
        for (i, letter) in letters.into_iter().enumerate() {
            let (axis, is_upper) =
                Axis::from_letter(letter).ok_or_else(|| invalid("axes must be one of X, Y, Z"))?;
            axes[i] = axis;
            upper[i] = is_upper;
        }

        let kind = match upper {
            [true, true, true] => RotationKind::Intrinsic,
            [false, false, false] => RotationKind::Extrinsic,
            _ => {
                return Err(invalid(
                    "cannot mix intrinsic (upper-case) and extrinsic (lower-case) axes",
                ))
            }
        };

        Self::new(axes, kind).map_err(|_| invalid("consecutive axes must differ"))
    }
}

impl TryFrom<String> for AngleSequence {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AngleSequence> for String {
    fn from(value: AngleSequence) -> Self {
        value.to_string()
    }
}

/// The unit that the components of an [`AngleTriple`](crate::AngleTriple) are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AngleUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "deg"))]
    Degrees,
    #[cfg_attr(feature = "serde", serde(alias = "rad"))]
    Radians,
}

impl AngleUnit {
    /// Interprets `value` as an angle in this unit.
    #[must_use]
    pub fn angle(self, value: f64) -> Angle {
        match self {
            Self::Degrees => Angle::new::<degree>(value),
            Self::Radians => Angle::new::<radian>(value),
        }
    }

    /// Expresses `angle` in this unit.
    #[must_use]
    pub fn value_of(self, angle: Angle) -> f64 {
        match self {
            Self::Degrees => angle.get::<degree>(),
            Self::Radians => angle.get::<radian>(),
        }
    }

    /// Converts `value` from this unit into `target`.
    #[must_use]
    pub fn convert(self, value: f64, target: AngleUnit) -> f64 {
        if self == target {
            return value;
        }
        target.value_of(self.angle(value))
    }

    /// Size of a full turn in this unit.
    #[must_use]
    pub fn full_turn(self) -> f64 {
        self.value_of(Angle::FULL_TURN)
    }
}

impl Display for AngleUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Degrees => "degrees",
            Self::Radians => "radians",
        })
    }
}

impl FromStr for AngleUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "degrees" | "deg" => Ok(Self::Degrees),
            "radians" | "rad" => Ok(Self::Radians),
            _ => Err(Error::InvalidUnit { unit: s.to_owned() }),
        }
    }
}

/// Everything needed to turn three numbers into a rotation and back: which axes, in which order,
/// and in which unit.
///
/// The default is intrinsic yaw-pitch-roll (`ZYX`) in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerConvention {
    pub sequence: AngleSequence,
    pub unit: AngleUnit,
}

impl EulerConvention {
    #[must_use]
    pub fn new(sequence: AngleSequence, unit: AngleUnit) -> Self {
        Self { sequence, unit }
    }

    /// Parses the axis sequence text and pairs it with `unit`.
    pub fn parse(sequence: &str, unit: AngleUnit) -> Result<Self> {
        Ok(Self::new(sequence.parse()?, unit))
    }

    /// The same sequence in a different unit.
    #[must_use]
    pub fn with_unit(self, unit: AngleUnit) -> Self {
        Self { unit, ..self }
    }
}

impl Display for EulerConvention {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.sequence, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::{AngleSequence, AngleUnit, Axis, EulerConvention, RotationKind};
    use crate::error::Error;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("ZYX", [Axis::Z, Axis::Y, Axis::X], RotationKind::Intrinsic)]
    #[case("XYZ", [Axis::X, Axis::Y, Axis::Z], RotationKind::Intrinsic)]
    #[case("ZXZ", [Axis::Z, Axis::X, Axis::Z], RotationKind::Intrinsic)]
    #[case("zyx", [Axis::Z, Axis::Y, Axis::X], RotationKind::Extrinsic)]
    #[case("yxy", [Axis::Y, Axis::X, Axis::Y], RotationKind::Extrinsic)]
    fn parses_valid_sequences(
        #[case] text: &str,
        #[case] axes: [Axis; 3],
        #[case] kind: RotationKind,
    ) {
        let sequence: AngleSequence = text.parse().unwrap();
        assert_eq!(sequence.axes(), axes);
        assert_eq!(sequence.kind(), kind);
        assert_eq!(sequence.to_string(), text);
    }

    #[rstest]
    #[case("", "expected exactly three axes")]
    #[case("ZY", "expected exactly three axes")]
    #[case("ZYXZ", "expected exactly three axes")]
    #[case("ZYW", "axes must be one of X, Y, Z")]
    #[case("Z Y", "axes must be one of X, Y, Z")]
    #[case("ZyX", "cannot mix intrinsic (upper-case) and extrinsic (lower-case) axes")]
    #[case("ZZX", "consecutive axes must differ")]
    #[case("xyy", "consecutive axes must differ")]
    fn rejects_malformed_sequences(#[case] text: &str, #[case] reason: &'static str) {
        assert_eq!(
            text.parse::<AngleSequence>(),
            Err(Error::InvalidSequence {
                sequence: text.to_owned(),
                reason,
            })
        );
    }

    #[test]
    fn there_are_twelve_orders_per_kind() {
        let axes = [Axis::X, Axis::Y, Axis::Z];
        let mut valid = 0;
        for a in axes {
            for b in axes {
                for c in axes {
                    if AngleSequence::new([a, b, c], RotationKind::Intrinsic).is_ok() {
                        valid += 1;
                    }
                }
            }
        }
        assert_eq!(valid, 12);
    }

    #[test]
    fn proper_euler_detection() {
        assert!("ZXZ".parse::<AngleSequence>().unwrap().is_proper_euler());
        assert!(!AngleSequence::YAW_PITCH_ROLL.is_proper_euler());
    }

    #[rstest]
    #[case(AngleUnit::Degrees, 180., AngleUnit::Radians, std::f64::consts::PI)]
    #[case(AngleUnit::Radians, std::f64::consts::FRAC_PI_2, AngleUnit::Degrees, 90.)]
    #[case(AngleUnit::Degrees, -45., AngleUnit::Degrees, -45.)]
    fn unit_conversion(
        #[case] from: AngleUnit,
        #[case] value: f64,
        #[case] to: AngleUnit,
        #[case] expected: f64,
    ) {
        assert_relative_eq!(from.convert(value, to), expected, epsilon = 1e-12);
    }

    #[test]
    fn unit_parsing() {
        assert_eq!("degrees".parse(), Ok(AngleUnit::Degrees));
        assert_eq!("rad".parse(), Ok(AngleUnit::Radians));
        assert_eq!(
            "gradians".parse::<AngleUnit>(),
            Err(Error::InvalidUnit {
                unit: "gradians".into()
            })
        );
    }

    #[test]
    fn default_convention_is_yaw_pitch_roll_in_degrees() {
        let convention = EulerConvention::default();
        assert_eq!(convention, EulerConvention::parse("ZYX", AngleUnit::Degrees).unwrap());
        assert_eq!(convention.to_string(), "ZYX in degrees");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn sequence_serde() {
        let sequence: AngleSequence = serde_yaml::from_str("zxz").unwrap();
        assert_eq!(sequence.to_string(), "zxz");
        assert_eq!(serde_yaml::to_string(&sequence).unwrap().trim(), "zxz");
        assert!(serde_yaml::from_str::<AngleSequence>("ABC").is_err());

        let unit: AngleUnit = serde_yaml::from_str("radians").unwrap();
        assert_eq!(unit, AngleUnit::Radians);
    }
}
