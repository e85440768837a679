//! The spring for the mass-spring system.

use crate::utils::{vector, Real, Vector};

use super::Particle;

/// A spring in the mass-spring system.
///
/// The spring is defined by its:
///
/// - indices `p0` and `p1` of the two `Particle`s it connects,
/// - spring constant `k`, i.e. the stiffness of the `Spring`,
/// - rest length `d_r`, i.e. the length at which the `Spring` exerts no force.
///
/// The `Spring` also caches the positions of its two endpoints as of the end of the last step. These are only for
/// presentation; forces are always computed from the current positions of the `Particle`s.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring<T: Real> {
    /// Index of the first `Particle`.
    p0: usize,
    /// Index of the second `Particle`.
    p1: usize,
    /// Cached position of the first `Particle`.
    p0_position: Vector<T>,
    /// Cached position of the second `Particle`.
    p1_position: Vector<T>,
    /// The rest length of the `Spring`.
    d_r: T,
    /// The spring constant of the `Spring`.
    k: T,
}

impl<T: Real> Default for Spring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> Spring<T> {
    /// Creates an unconnected `Spring` with rest length 25 and stiffness 20.
    #[must_use]
    pub fn new() -> Self {
        Self {
            p0: 0,
            p1: 0,
            p0_position: vector::zero(),
            p1_position: vector::zero(),
            d_r: T::from_f64_lossy(25.0),
            k: T::from_f64_lossy(20.0),
        }
    }

    /// Get the indices of the `Particle`s connected by the `Spring`.
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.p0, self.p1)
    }

    /// Set the indices of the `Particle`s connected by the `Spring`. The caller must have validated them.
    pub(crate) fn set_endpoints(&mut self, p0: usize, p1: usize) {
        self.p0 = p0;
        self.p1 = p1;
    }

    /// Get the cached endpoint positions of the `Spring`.
    #[must_use]
    pub const fn positions(&self) -> [Vector<T>; 2] {
        [self.p0_position, self.p1_position]
    }

    /// Refresh the cached endpoint positions from the `Particle`s.
    pub(crate) fn update_positions(&mut self, particles: &[Particle<T>]) {
        self.p0_position = *particles[self.p0].position();
        self.p1_position = *particles[self.p1].position();
    }

    /// Get the rest length of the `Spring`.
    #[must_use]
    pub const fn rest_length(&self) -> T {
        self.d_r
    }

    /// Set the rest length of the `Spring`.
    pub(crate) fn set_rest_length(&mut self, d_r: T) {
        self.d_r = d_r;
    }

    /// Get the spring constant of the `Spring`.
    #[must_use]
    pub const fn k(&self) -> T {
        self.k
    }

    /// Set the spring constant of the `Spring`.
    pub(crate) fn set_spring_constant(&mut self, k: T) {
        self.k = k;
    }

    /// Get the current length of the `Spring` from the `Particle`s.
    #[must_use]
    pub fn current_length(&self, particles: &[Particle<T>]) -> T {
        particles[self.p0].current_distance_to(&particles[self.p1])
    }

    /// Computes the force the `Spring` exerts on its first `Particle`. The second receives the negation.
    ///
    /// The magnitude is `k * (dc - d_r)`, directed from `p0` towards `p1`, so a stretched spring pulls its endpoints
    /// together and a compressed one pushes them apart. When the endpoints coincide the direction is undefined and
    /// the force is zero.
    #[must_use]
    pub fn force_on_p0(&self, particles: &[Particle<T>]) -> Vector<T> {
        let displacement = particles[self.p0].distance_vector_to(&particles[self.p1]);
        let dc = vector::norm(&displacement);
        if dc <= T::min_positive_value() {
            return vector::zero();
        }
        let unit = displacement.map(|x| x / dc);
        vector::scale(&unit, self.k * (dc - self.d_r))
    }

    /// Get the potential energy of the `Spring`.
    #[must_use]
    pub fn potential_energy(&self, particles: &[Particle<T>]) -> T {
        let dx = self.current_length(particles) - self.d_r;
        self.k.half() * dx * dx
    }
}
