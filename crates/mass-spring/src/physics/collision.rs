//! Collision response against the ground plane.

use crate::utils::{vector, Real, Vector};

/// A horizontal ground plane that particles bounce off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground<T: Real> {
    /// Height of the plane along the y-axis.
    pub y: T,
    /// Fraction of velocity kept after a bounce, in `[0, 1]`.
    pub bounce_energy_loss_ratio: T,
}

impl<T: Real> Ground<T> {
    /// The outward normal of the ground plane.
    #[must_use]
    pub fn normal() -> Vector<T> {
        [T::zero(), T::one(), T::zero()]
    }

    /// Handles a collision of a particle with the ground.
    ///
    /// If the particle is at or below the plane, it is snapped onto the plane, its velocity is scaled by the
    /// bounce-energy-loss ratio and then reflected about the plane normal.
    ///
    /// Returns `true` if a collision was handled.
    pub fn collide(&self, position: &mut Vector<T>, velocity: &mut Vector<T>) -> bool {
        if position[1] > self.y {
            return false;
        }
        position[1] = self.y;
        let damped = vector::scale(velocity, self.bounce_energy_loss_ratio);
        *velocity = vector::reflect(&damped, &Self::normal());
        true
    }
}
