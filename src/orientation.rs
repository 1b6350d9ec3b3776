//! Orientations and the rotations between them.
//!
//! An [`Orientation`] is the rotation that takes the axes of a fixed reference frame onto the axes
//! of a body. The same type also describes a maneuver, ie the rotation that takes one orientation
//! onto the next: applying maneuver `m` to orientation `o` gives `m * o`.
//!
//! Orientations are stored as unit quaternions and only turned into Euler angles at the edges,
//! using whatever [`EulerConvention`] the caller asks for.

use crate::angles::AngleTriple;
use crate::error::{Error, Result};
use crate::sequence::{AngleSequence, AngleUnit, Axis, EulerConvention, RotationKind};
use crate::util::SignedAngle;
use crate::{Matrix3, Quaternion, UnitQuaternion};
use core::ops::Mul;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::{self, Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How close (in radians) the middle Euler angle must be to a singular value for the
/// decomposition to be treated as gimbal-locked.
const GIMBAL_LOCK_TOLERANCE: f64 = 1e-7;

/// The orientation of a body relative to a fixed reference frame, or equivalently a rotation.
///
/// The columns of [`Orientation::to_rotation_matrix`] are the body's X, Y, and Z axes expressed in
/// the reference frame.
///
/// Orientations compose by left-multiplication: `a.compose(&b)` (or `a * b`) first applies `b` and
/// then `a`, both about the axes of the fixed reference frame. Composition is not commutative.
///
/// ```
/// use approx::assert_relative_eq;
/// use slew::{AngleTriple, EulerConvention, Orientation};
///
/// let ypr = EulerConvention::default();
/// let start = Orientation::from_angles(AngleTriple::new([10., 0., 0.]).unwrap(), &ypr);
/// let maneuver = Orientation::from_angles(AngleTriple::new([20., 0., 0.]).unwrap(), &ypr);
/// let end = maneuver * start;
///
/// let [yaw, pitch, roll] = end.to_angles(&ypr).components();
/// assert_relative_eq!(yaw, 30., epsilon = 1e-9);
/// assert_relative_eq!(pitch, 0., epsilon = 1e-9);
/// assert_relative_eq!(roll, 0., epsilon = 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Orientation {
    pub(crate) inner: UnitQuaternion,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion: {}", self.inner)
    }
}

impl Orientation {
    /// The orientation aligned with the reference frame, ie no rotation at all.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            inner: UnitQuaternion::identity(),
        }
    }

    /// Constructs an orientation from three Euler angles read under `convention`.
    ///
    /// For an intrinsic sequence `(e1, e2, e3)` with angles `(a, b, c)` this is
    /// `R_e1(a) · R_e2(b) · R_e3(c)`: rotate by `a` about `e1`, then by `b` about the _rotated_
    /// `e2`, then by `c` about the twice-rotated `e3`. For an extrinsic sequence every rotation is
    /// about the fixed axes, giving `R_e3(c) · R_e2(b) · R_e1(a)`.
    ///
    /// Positive angles turn counter-clockwise when looking down the (positive) axis, following the
    /// [right-hand rule][rhrot].
    ///
    /// [rhrot]: https://en.wikipedia.org/wiki/Right-hand_rule#Rotations
    #[doc(alias = "from_euler_angles")]
    #[must_use]
    pub fn from_angles(angles: AngleTriple, convention: &EulerConvention) -> Self {
        let [e1, e2, e3] = convention.sequence.axes();
        let [a, b, c] = angles
            .to_angles(convention.unit)
            .map(|angle| angle.get::<radian>());
        let inner = match convention.sequence.kind() {
            RotationKind::Intrinsic => about(e1, a) * about(e2, b) * about(e3, c),
            RotationKind::Extrinsic => about(e3, c) * about(e2, b) * about(e1, a),
        };
        Self { inner }
    }

    /// Like [`Orientation::from_angles`], but validates the raw angle components and parses the
    /// axis sequence text (eg `"ZYX"`) first.
    pub fn from_raw_angles(angles: [f64; 3], sequence: &str, unit: AngleUnit) -> Result<Self> {
        let convention = EulerConvention::parse(sequence, unit)?;
        Ok(Self::from_angles(AngleTriple::new(angles)?, &convention))
    }

    /// Returns the Euler angles that describe this orientation under `convention`.
    ///
    /// The angles are derived directly from the quaternion, and so are the canonical
    /// representation of the rotation rather than whatever angles it was constructed from. All
    /// three lie in (-180°, 180°]. The middle angle lies in [-90°, 90°] for Tait-Bryan sequences
    /// and in [0°, 180°] for proper Euler sequences.
    ///
    /// When the middle angle sits at one of its singular values (gimbal lock), the first and last
    /// rotations are about the same axis and only their combination is determined. The last angle
    /// is then reported as zero and the first angle carries the whole turn. A warning is logged
    /// when this happens; see also [`Orientation::is_gimbal_locked`].
    #[doc(alias = "euler_angles")]
    #[must_use]
    pub fn to_angles(&self, convention: &EulerConvention) -> AngleTriple {
        let (radians, locked) = self.decompose(convention.sequence);
        if locked {
            tracing::warn!(
                sequence = %convention.sequence,
                "gimbal lock: last angle set to zero, first angle carries the combined rotation"
            );
        }
        AngleTriple::from_finite(
            radians.map(|value| AngleUnit::Radians.convert(value, convention.unit)),
        )
    }

    /// Returns `true` if decomposing this orientation into `sequence` hits gimbal lock.
    #[must_use]
    pub fn is_gimbal_locked(&self, sequence: AngleSequence) -> bool {
        self.decompose(sequence).1
    }

    /// Quaternion-to-Euler decomposition for any of the 24 sequences.
    ///
    /// See Bernardes & Viollet, "Quaternion to Euler angles conversion: A direct, general and
    /// computationally efficient method", PLoS ONE 17(11), 2022. The extrinsic form is computed
    /// directly; an intrinsic sequence is the extrinsic one with reversed axes and angles.
    fn decompose(&self, sequence: AngleSequence) -> ([f64; 3], bool) {
        let intrinsic = sequence.kind() == RotationKind::Intrinsic;
        let mut axes = sequence.axes().map(Axis::index);
        if intrinsic {
            axes.reverse();
        }
        let [i, j, mut k] = axes;
        let proper = i == k;
        if proper {
            k = 3 - i - j;
        }
        let sign = {
            let (i, j, k) = (i as isize, j as isize, k as isize);
            ((i - j) * (j - k) * (k - i) / 2) as f64
        };

        let q = self.inner.quaternion();
        let w = q.w;
        let v = [q.i, q.j, q.k];
        let (a, b, c, d) = if proper {
            (w, v[i], v[j], v[k] * sign)
        } else {
            (w - v[j], v[i] + v[k] * sign, v[j] + w, v[k] * sign - v[i])
        };

        let mut middle = 2. * c.hypot(d).atan2(a.hypot(b));
        let at_zero = middle.abs() <= GIMBAL_LOCK_TOLERANCE;
        let at_pi = (middle - PI).abs() <= GIMBAL_LOCK_TOLERANCE;
        let locked = at_zero || at_pi;

        let half_sum = b.atan2(a);
        let half_diff = d.atan2(c);
        let (mut first, mut last) = if !locked {
            (half_sum - half_diff, half_sum + half_diff)
        } else if intrinsic {
            // this one becomes the caller's last angle once the order is reversed below
            (0., if at_zero { 2. * half_sum } else { 2. * half_diff })
        } else {
            (if at_zero { 2. * half_sum } else { -2. * half_diff }, 0.)
        };

        if !proper {
            last *= sign;
            middle -= FRAC_PI_2;
        }
        if intrinsic {
            std::mem::swap(&mut first, &mut last);
        }

        let angles = [first, middle, last]
            .map(|radians| SignedAngle::from_value(radians, AngleUnit::Radians).radians());
        (angles, locked)
    }

    /// Returns the rotation `self · other`: `other` is applied first, then `self`.
    ///
    /// With `other` an orientation and `self` a maneuver, this is the orientation reached by
    /// performing the maneuver. Equivalent to `self * other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            inner: self.inner * other.inner,
        }
    }

    /// Returns the equal-but-opposite rotation to this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            inner: self.inner.inverse(),
        }
    }

    /// Returns the 3×3 rotation matrix of this orientation.
    ///
    /// Its columns are the body's X, Y, and Z axes expressed in the reference frame, which is what
    /// one would draw to visualize the orientation.
    #[must_use]
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        self.inner.to_rotation_matrix().into_inner()
    }

    /// Constructs an orientation from a rotation matrix whose columns are the body axes.
    ///
    /// The matrix must be orthonormal (within `1e-6`) and must not include a reflection.
    pub fn from_rotation_matrix(matrix: &Matrix3) -> Result<Self> {
        if matrix.iter().any(|value| !value.is_finite()) {
            return Err(Error::NotARotation {
                reason: "matrix entries must be finite",
            });
        }
        if (matrix.transpose() * matrix - Matrix3::identity()).norm() > 1e-6 {
            return Err(Error::NotARotation {
                reason: "matrix is not orthonormal",
            });
        }
        if matrix.determinant() < 0. {
            return Err(Error::NotARotation {
                reason: "matrix includes a reflection",
            });
        }
        let rotation = nalgebra::Rotation3::from_matrix_unchecked(*matrix);
        Ok(Self {
            inner: UnitQuaternion::from_rotation_matrix(&rotation),
        })
    }

    /// Constructs an orientation from the components of a [versor] / unit quaternion.
    ///
    /// The components are given as `w` (the scalar/real part) and `[i, j, k]` (the
    /// vector/imaginary part). The quaternion is normalized, so it need not be of exactly unit
    /// length, but it must be finite and non-zero.
    ///
    /// [versor]: https://en.wikipedia.org/wiki/Versor
    #[doc(alias = "from_versor")]
    pub fn from_quaternion(w: f64, i: f64, j: f64, k: f64) -> Result<Self> {
        let q = Quaternion::new(w, i, j, k);
        if q.coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::NotARotation {
                reason: "quaternion components must be finite",
            });
        }
        let inner = UnitQuaternion::try_new(q, f64::EPSILON).ok_or(Error::NotARotation {
            reason: "quaternion must be non-zero",
        })?;
        Ok(Self { inner })
    }

    /// Returns the components of the unit quaternion as `(w, i, j, k)`.
    ///
    /// Note that `q` and `-q` describe the same rotation; no sign convention is enforced.
    #[doc(alias = "to_versor")]
    #[must_use]
    pub fn to_quaternion(&self) -> (f64, f64, f64, f64) {
        let q = self.inner.quaternion();
        (q.w, q.i, q.j, q.k)
    }

    /// The magnitude of the single rotation that takes `self` onto `other`, in [0°, 180°].
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> Angle {
        Angle::new::<radian>(self.inner.angle_to(&other.inner))
    }

    /// The magnitude of this rotation about its own axis, in [0°, 180°].
    #[must_use]
    pub fn rotation_angle(&self) -> Angle {
        Angle::new::<radian>(self.inner.angle())
    }
}

fn about(axis: Axis, radians: f64) -> UnitQuaternion {
    UnitQuaternion::from_axis_angle(&axis.unit_vector(), radians)
}

impl Mul for Orientation {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

// q and -q are the same rotation, so both count as equal.
#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Orientation {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        UnitQuaternion::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.coords.abs_diff_eq(&other.inner.coords, epsilon)
            || self.inner.coords.abs_diff_eq(&-other.inner.coords, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Orientation {
    fn default_max_relative() -> Self::Epsilon {
        UnitQuaternion::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner
            .coords
            .relative_eq(&other.inner.coords, epsilon, max_relative)
            || self
                .inner
                .coords
                .relative_eq(&-other.inner.coords, epsilon, max_relative)
    }
}
