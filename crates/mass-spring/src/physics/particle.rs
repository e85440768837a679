//! Particles in the mass-spring system.

use crate::utils::{vector, Real, Vector};

/// A point mass in the mass-spring system.
///
/// A `Particle` is identified by its index in the `ParticleSystem` and is defined by its:
///
/// - `position`: The position of the `Particle`.
/// - `velocity`: The velocity of the `Particle`.
/// - `mass`: The mass of the `Particle`, always positive.
///
/// The `Particle` also stores the force being applied to it. The force is reset and re-accumulated on every step.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle<T: Real> {
    /// The position of the `Particle`.
    position: Vector<T>,
    /// The velocity of the `Particle`.
    velocity: Vector<T>,
    /// The force accumulated on the `Particle` during the current step.
    force: Vector<T>,
    /// The mass of the `Particle`.
    m: T,
}

impl<T: Real> Default for Particle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> Particle<T> {
    /// Creates a `Particle` at the origin, at rest, with unit mass.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: vector::zero(),
            velocity: vector::zero(),
            force: vector::zero(),
            m: T::one(),
        }
    }

    /// Returns the position of the `Particle`.
    #[must_use]
    pub const fn position(&self) -> &Vector<T> {
        &self.position
    }

    /// Sets the position of the `Particle`.
    ///
    /// It is the caller's responsibility to ensure that the `position` has no `NaN` or infinite values.
    pub fn set_position(&mut self, position: Vector<T>) {
        self.position = position;
    }

    /// Returns the velocity of the `Particle`.
    #[must_use]
    pub const fn velocity(&self) -> &Vector<T> {
        &self.velocity
    }

    /// Sets the velocity of the `Particle`.
    pub fn set_velocity(&mut self, velocity: Vector<T>) {
        self.velocity = velocity;
    }

    /// Returns the force accumulated during the last step.
    #[must_use]
    pub const fn force(&self) -> &Vector<T> {
        &self.force
    }

    /// Returns the mass of the `Particle`.
    #[must_use]
    pub const fn mass(&self) -> T {
        self.m
    }

    /// Sets the mass of the `Particle`. The caller must have checked that it is positive.
    pub(crate) fn set_mass(&mut self, m: T) {
        self.m = m;
    }

    /// Resets the accumulated force to the zero vector.
    pub(crate) fn reset_force(&mut self) {
        self.force = vector::zero();
    }

    /// Adds the given force to the force being applied to the `Particle`.
    pub(crate) fn add_force(&mut self, force: &Vector<T>) {
        vector::add_assign(&mut self.force, force);
    }

    /// Returns the distance vector from this `Particle` to another `Particle`.
    #[must_use]
    pub fn distance_vector_to(&self, other: &Self) -> Vector<T> {
        vector::sub(&other.position, &self.position)
    }

    /// Returns the distance from this `Particle` to another `Particle`.
    #[must_use]
    pub fn current_distance_to(&self, other: &Self) -> T {
        vector::norm(&self.distance_vector_to(other))
    }

    /// Returns the speed of the `Particle`.
    #[must_use]
    pub fn speed(&self) -> T {
        vector::norm(&self.velocity)
    }

    /// Get the kinetic energy of the `Particle`.
    #[must_use]
    pub fn kinetic_energy(&self) -> T {
        self.m.half() * vector::norm_squared(&self.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::Particle;

    #[test]
    fn new_is_at_rest() {
        let p = Particle::<f32>::new();
        assert_eq!(p.position(), &[0.0; 3]);
        assert_eq!(p.velocity(), &[0.0; 3]);
        assert_eq!(p.force(), &[0.0; 3]);
        assert_eq!(p.mass(), 1.0);
        assert_eq!(p.kinetic_energy(), 0.0);
    }

    #[test]
    fn distances_and_energy() {
        let mut a = Particle::<f64>::new();
        let mut b = Particle::new();
        a.set_position([1.0, 1.0, 1.0]);
        b.set_position([4.0, 5.0, 1.0]);
        assert_eq!(a.distance_vector_to(&b), [3.0, 4.0, 0.0]);
        assert_eq!(a.current_distance_to(&b), 5.0);

        a.set_mass(2.0);
        a.set_velocity([0.0, -3.0, 0.0]);
        assert_eq!(a.speed(), 3.0);
        assert_eq!(a.kinetic_energy(), 9.0);

        a.add_force(&[1.0, 2.0, 3.0]);
        a.add_force(&[1.0, 2.0, 3.0]);
        assert_eq!(a.force(), &[2.0, 4.0, 6.0]);
        a.reset_force();
        assert_eq!(a.force(), &[0.0; 3]);
    }
}
