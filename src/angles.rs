use crate::error::{AngleProblem, Error, Result};
use crate::sequence::AngleUnit;
use crate::util::SignedAngle;
use std::fmt::{self, Display, Formatter};
use std::ops::Index;
use std::str::FromStr;
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three finite angles, read in the order of an [`AngleSequence`](crate::AngleSequence).
///
/// A triple does not know its unit or axis order; those come from the
/// [`EulerConvention`](crate::EulerConvention) of the run it is used in. What it does guarantee is
/// that there are exactly three components and that all of them are finite numbers.
///
/// ```
/// use slew::AngleTriple;
///
/// let ypr: AngleTriple = "10, 0, 0".parse().unwrap();
/// assert_eq!(ypr, AngleTriple::new([10., 0., 0.]).unwrap());
///
/// assert!("invalid, 0, 0".parse::<AngleTriple>().is_err());
/// assert!(AngleTriple::new([f64::NAN, 0., 0.]).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "[f64; 3]"))]
pub struct AngleTriple {
    components: [f64; 3],
}

impl AngleTriple {
    pub const ZERO: Self = Self {
        components: [0.; 3],
    };

    /// Constructs a triple, rejecting NaN and infinite components.
    pub fn new(components: [f64; 3]) -> Result<Self> {
        for (component, value) in components.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(AngleProblem::NonFinite { component, value }.into());
            }
        }
        Ok(Self { components })
    }

    /// Constructs a triple from `uom` angles, expressed in `unit`.
    pub fn from_angles(angles: [Angle; 3], unit: AngleUnit) -> Result<Self> {
        Self::new(angles.map(|angle| unit.value_of(angle)))
    }

    /// Constructs a triple from components that are finite by construction.
    pub(crate) fn from_finite(components: [f64; 3]) -> Self {
        debug_assert!(components.iter().all(|c| c.is_finite()));
        Self { components }
    }

    #[must_use]
    pub fn components(&self) -> [f64; 3] {
        self.components
    }

    /// The components as `uom` angles, given that they are in `unit`.
    #[must_use]
    pub fn to_angles(&self, unit: AngleUnit) -> [Angle; 3] {
        self.components.map(|value| unit.angle(value))
    }

    /// Re-expresses the components from unit `from` in unit `to`.
    #[must_use]
    pub fn convert(&self, from: AngleUnit, to: AngleUnit) -> Self {
        Self::from_finite(self.components.map(|value| from.convert(value, to)))
    }

    /// Folds every component into the signed range (-180°, 180°].
    #[must_use]
    pub fn normalized(&self, unit: AngleUnit) -> Self {
        Self::from_finite(
            self.components
                .map(|value| SignedAngle::from_value(value, unit).value_in(unit)),
        )
    }

    /// Returns `true` if every component is within `epsilon` (in radians) of the corresponding
    /// component of `other`, treating angles a full turn apart as equal.
    ///
    /// Note that this compares the numbers, not the rotations they describe: two different
    /// triples may well describe the same rotation (eg at gimbal lock).
    #[must_use]
    pub fn same_angles(&self, other: &Self, unit: AngleUnit, epsilon: f64) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(&a, &b)| {
                SignedAngle::from_value(a, unit).separation(SignedAngle::from_value(b, unit))
                    <= epsilon
            })
    }
}

impl Index<usize> for AngleTriple {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}

impl TryFrom<[f64; 3]> for AngleTriple {
    type Error = Error;

    fn try_from(value: [f64; 3]) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&[f64]> for AngleTriple {
    type Error = Error;

    fn try_from(value: &[f64]) -> Result<Self> {
        let components: [f64; 3] = value
            .try_into()
            .map_err(|_| AngleProblem::WrongArity { found: value.len() })?;
        Self::new(components)
    }
}

impl TryFrom<Vec<f64>> for AngleTriple {
    type Error = Error;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Self::try_from(value.as_slice())
    }
}

impl From<AngleTriple> for [f64; 3] {
    fn from(value: AngleTriple) -> Self {
        value.components
    }
}

/// Parses `a, b, c`, optionally wrapped in square brackets. Whitespace-separated components are
/// accepted as well.
impl FromStr for AngleTriple {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s.trim();
        let inner = inner
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(inner);

        let parts: Vec<&str> = if inner.contains(',') {
            inner.split(',').map(str::trim).collect()
        } else {
            inner.split_whitespace().collect()
        };
        if parts.len() != 3 {
            return Err(AngleProblem::WrongArity { found: parts.len() }.into());
        }

        let mut components = [0.; 3];
        for (component, text) in parts.into_iter().enumerate() {
            components[component] = text.parse().map_err(|_| AngleProblem::NonNumeric {
                component,
                text: text.to_owned(),
            })?;
        }
        Self::new(components)
    }
}

/// Prints `[a, b, c]` rounded to two decimals unless another precision is requested.
impl Display for AngleTriple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        let scale = 10_f64.powi(precision.min(15) as i32);
        write!(f, "[")?;
        for (i, value) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let rounded = (value * scale).round() / scale;
            // avoid printing "-0.00" for values that round to zero
            let rounded = if rounded == 0. { 0. } else { rounded };
            write!(f, "{rounded:.precision$}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for AngleTriple {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // quickcheck will give us awkward f64 values -- we ignore those
        let mut component = || loop {
            match f64::arbitrary(g) {
                0. => break 0.,
                f if f.is_normal() => break f.rem_euclid(360.) - 180.,
                _ => {}
            }
        };
        Self::from_finite([component(), component(), component()])
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let [a, b, c] = self.components;
        Box::new(
            (a, b, c)
                .shrink()
                .filter(|&(a, b, c): &(f64, f64, f64)| {
                    a.is_finite() && b.is_finite() && c.is_finite()
                })
                .map(|(a, b, c)| Self::from_finite([a, b, c])),
        )
    }
}
