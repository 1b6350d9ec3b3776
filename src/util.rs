use crate::sequence::AngleUnit;
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// An angle folded into the signed range (-180°, 180°].
///
/// Decomposed Euler angles, and comparisons between angles that may have gone once around the
/// circle, are done in this range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SignedAngle {
    radians: f64,
}

impl SignedAngle {
    pub(crate) fn new(angle: impl Into<Angle>) -> Self {
        Self {
            radians: Self::fold(angle.into().get::<radian>()),
        }
    }

    pub(crate) fn from_value(value: f64, unit: AngleUnit) -> Self {
        Self::new(unit.angle(value))
    }

    pub(crate) fn radians(self) -> f64 {
        self.radians
    }

    pub(crate) fn value_in(self, unit: AngleUnit) -> f64 {
        unit.value_of(Angle::new::<radian>(self.radians))
    }

    /// Magnitude of the shortest turn between the two angles, in radians.
    pub(crate) fn separation(self, other: Self) -> f64 {
        Self::fold(self.radians - other.radians).abs()
    }

    fn fold(radians: f64) -> f64 {
        let half_turn = Angle::HALF_TURN.get::<radian>();
        let full_turn = Angle::FULL_TURN.get::<radian>();
        if radians > -half_turn && radians <= half_turn {
            return radians;
        }
        let turned = radians.rem_euclid(full_turn);
        if turned > half_turn {
            turned - full_turn
        } else {
            turned
        }
    }
}
