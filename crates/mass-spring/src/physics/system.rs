//! The mass-spring system.

use rayon::prelude::*;

use crate::{
    config::{validate_mass, validate_non_negative, validate_ratio, LinearDamping, SystemConfig},
    utils::{vector, CompensatedSum, Real, Vector},
    MssError,
};

use super::{Ground, Particle, Spring};

/// Where the particles and springs of a `ParticleSystem` came from.
///
/// Hard-coded meshes take their rest length from the configuration, while loaded meshes keep the rest lengths derived
/// from their initial geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshMode {
    /// One of the small built-in meshes.
    HardCoded,
    /// A tetrahedral mesh handed over by a mesh loader.
    #[default]
    Loaded,
}

/// The `ParticleSystem` of `Particle`s and `Spring`s.
///
/// Both collections are sized once, at construction, and never grow or shrink. A new mesh needs a new system.
#[derive(Debug, Clone)]
pub struct ParticleSystem<T: Real> {
    /// The particles, indexed `0..particle_count`.
    particles: Vec<Particle<T>>,
    /// The springs, indexed `0..spring_count`.
    springs: Vec<Spring<T>>,
    /// Positions published to the renderer after each step.
    vertices: Vec<Vector<T>>,
    /// Constant acceleration added to every particle's force.
    gravity: Vector<T>,
    /// Fraction of velocity kept after a bounce.
    bounce_energy_loss_ratio: T,
    /// Height of the ground plane.
    ground_y: T,
    /// Velocity damping.
    damping: LinearDamping<T>,
    /// Whether the mesh is hard-coded or loaded.
    mesh_mode: MeshMode,
    /// The sum of the rest lengths derived from the geometry.
    rest_length_sum: CompensatedSum,
}

impl<T: Real> ParticleSystem<T> {
    /// Creates a `ParticleSystem` with `particle_count` particles and `spring_count` springs.
    ///
    /// Every particle starts at the origin, at rest, with unit mass. Every spring starts unconnected with rest length
    /// 25 and stiffness 20. A system without particles cannot hold springs, so it is created empty and stays inert.
    #[must_use]
    pub fn new(particle_count: usize, spring_count: usize) -> Self {
        let spring_count = if particle_count == 0 {
            if spring_count > 0 {
                ftlog::warn!("Ignoring {spring_count} springs requested for a system with no particles.");
            }
            0
        } else {
            spring_count
        };

        let config = SystemConfig::<T>::default();
        Self {
            particles: vec![Particle::new(); particle_count],
            springs: vec![Spring::new(); spring_count],
            vertices: vec![vector::zero(); particle_count],
            gravity: config.gravity,
            bounce_energy_loss_ratio: config.bounce_energy_loss_ratio,
            ground_y: config.ground_y,
            damping: config.damping,
            mesh_mode: MeshMode::default(),
            rest_length_sum: CompensatedSum::new(),
        }
    }

    /// Get the number of `Particle`s.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Get the number of `Spring`s.
    #[must_use]
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Get the `Particle`s.
    #[must_use]
    pub fn particles(&self) -> &[Particle<T>] {
        &self.particles
    }

    /// Get the `Spring`s.
    #[must_use]
    pub fn springs(&self) -> &[Spring<T>] {
        &self.springs
    }

    /// Set the position of every `Particle`.
    ///
    /// The presentation buffer is refreshed as well, and so are the cached spring endpoints.
    ///
    /// # Errors
    ///
    /// * If `positions` does not have exactly one entry per particle.
    /// * If any position is not finite.
    pub fn set_particle_positions(&mut self, positions: &[Vector<T>]) -> Result<(), MssError> {
        self.check_particle_len("positions", positions.len())?;
        if let Some(i) = positions.iter().position(|p| !vector::is_finite(p)) {
            return Err(MssError::invalid(format!("position of particle {i} is not finite")));
        }

        for ((m, v), &p) in self.particles.iter_mut().zip(self.vertices.iter_mut()).zip(positions) {
            m.set_position(p);
            *v = p;
        }
        self.update_spring_positions();
        Ok(())
    }

    /// Set the velocity of every `Particle`.
    ///
    /// # Errors
    ///
    /// * If `velocities` does not have exactly one entry per particle.
    /// * If any velocity is not finite.
    pub fn set_particle_velocities(&mut self, velocities: &[Vector<T>]) -> Result<(), MssError> {
        self.check_particle_len("velocities", velocities.len())?;
        if let Some(i) = velocities.iter().position(|v| !vector::is_finite(v)) {
            return Err(MssError::invalid(format!("velocity of particle {i} is not finite")));
        }

        for (m, &v) in self.particles.iter_mut().zip(velocities) {
            m.set_velocity(v);
        }
        Ok(())
    }

    /// Set the mass of every `Particle`.
    ///
    /// # Errors
    ///
    /// * If `mass` is not a positive finite number.
    pub fn set_particle_mass(&mut self, mass: T) -> Result<(), MssError> {
        validate_mass(mass)?;
        self.particles.iter_mut().for_each(|m| m.set_mass(mass));
        Ok(())
    }

    /// Connect every `Spring` to a pair of `Particle`s, then refresh the cached endpoint positions.
    ///
    /// # Errors
    ///
    /// * If `pairs` does not have exactly one entry per spring.
    /// * If any index is out of range, or a spring would connect a particle to itself.
    pub fn set_spring_connections(&mut self, pairs: &[(usize, usize)]) -> Result<(), MssError> {
        if pairs.len() != self.springs.len() {
            return Err(MssError::invalid(format!(
                "expected {} spring connections, got {}",
                self.springs.len(),
                pairs.len()
            )));
        }
        let n = self.particles.len();
        for (i, &(p0, p1)) in pairs.iter().enumerate() {
            if p0 >= n || p1 >= n {
                return Err(MssError::invalid(format!(
                    "spring {i} connects ({p0}, {p1}) but there are only {n} particles"
                )));
            }
            if p0 == p1 {
                return Err(MssError::invalid(format!("spring {i} connects particle {p0} to itself")));
            }
        }

        for (s, &(p0, p1)) in self.springs.iter_mut().zip(pairs) {
            s.set_endpoints(p0, p1);
        }
        self.update_spring_positions();
        Ok(())
    }

    /// Set the rest length of every `Spring` to the current distance between its endpoints.
    ///
    /// This also records the sum of the new rest lengths, see `rest_length_sum`.
    pub fn set_spring_rest_lengths_from_current(&mut self) {
        let mut sum = CompensatedSum::new();
        for s in &mut self.springs {
            let d_r = s.current_length(&self.particles);
            s.set_rest_length(d_r);
            sum.add(d_r.as_f64());
        }
        self.rest_length_sum = sum;
        self.update_spring_positions();

        if let Some(avg) = self.average_rest_length() {
            ftlog::debug!("Derived {} rest lengths from geometry, average {avg}", self.springs.len());
        }
    }

    /// Set the rest length of every `Spring`.
    ///
    /// # Errors
    ///
    /// * If `length` is negative or not finite.
    pub fn set_spring_rest_length(&mut self, length: T) -> Result<(), MssError> {
        validate_non_negative("rest length", length)?;
        self.springs.iter_mut().for_each(|s| s.set_rest_length(length));
        Ok(())
    }

    /// Set the stiffness of every `Spring`.
    ///
    /// # Errors
    ///
    /// * If `k` is negative or not finite.
    pub fn set_spring_stiffness(&mut self, k: T) -> Result<(), MssError> {
        validate_non_negative("stiffness", k)?;
        self.springs.iter_mut().for_each(|s| s.set_spring_constant(k));
        Ok(())
    }

    /// Add the same absolute `delta` to the rest length of every `Spring`.
    ///
    /// Rest lengths never go below zero; any spring that would is clamped to zero.
    ///
    /// # Errors
    ///
    /// * If `delta` is not finite.
    pub fn add_spring_rest_length(&mut self, delta: T) -> Result<(), MssError> {
        if !delta.is_finite() {
            return Err(MssError::invalid(format!("rest length delta must be finite, got {delta}")));
        }

        let mut clamped = 0;
        for s in &mut self.springs {
            let d_r = s.rest_length() + delta;
            if d_r < T::zero() {
                clamped += 1;
                s.set_rest_length(T::zero());
            } else {
                s.set_rest_length(d_r);
            }
        }
        if clamped > 0 {
            ftlog::warn!("Clamped {clamped} rest lengths to zero after adding {delta}");
        }
        Ok(())
    }

    /// Change the rest length of every `Spring` in proportion to itself.
    ///
    /// A non-negative `ratio` multiplies every rest length by `1 + ratio`, a negative one divides it by `1 - ratio`.
    /// A negative ratio therefore shrinks less than `1 + ratio` would: `-0.5` takes 10 to `10 / 1.5`, not to 5.
    ///
    /// # Errors
    ///
    /// * If `ratio` is not finite.
    pub fn add_spring_rest_length_homogeneous(&mut self, ratio: T) -> Result<(), MssError> {
        if !ratio.is_finite() {
            return Err(MssError::invalid(format!("rest length ratio must be finite, got {ratio}")));
        }

        let factor = T::one() + ratio.abs();
        for s in &mut self.springs {
            let d_r = if ratio >= T::zero() {
                s.rest_length() * factor
            } else {
                s.rest_length() / factor
            };
            s.set_rest_length(d_r);
        }
        Ok(())
    }

    /// Set the gravity.
    ///
    /// # Errors
    ///
    /// * If any component is not finite.
    pub fn set_gravity(&mut self, gravity: Vector<T>) -> Result<(), MssError> {
        if !vector::is_finite(&gravity) {
            return Err(MssError::invalid("gravity must be finite"));
        }
        self.gravity = gravity;
        Ok(())
    }

    /// Set the fraction of velocity kept after a ground collision.
    ///
    /// # Errors
    ///
    /// * If `ratio` is not in `[0, 1]`.
    pub fn set_bounce_energy_loss_ratio(&mut self, ratio: T) -> Result<(), MssError> {
        validate_ratio(ratio)?;
        self.bounce_energy_loss_ratio = ratio;
        Ok(())
    }

    /// Set the linear damping attributes.
    ///
    /// # Errors
    ///
    /// * If any attribute is not finite.
    pub fn set_linear_damping_attributes(&mut self, a: T, b: T, v_thresh: T, kd_max: T) -> Result<(), MssError> {
        let damping = LinearDamping { a, b, v_thresh, kd_max };
        damping.validate()?;
        self.damping = damping;
        Ok(())
    }

    /// Set the height of the ground plane.
    ///
    /// # Errors
    ///
    /// * If `ground_y` is not finite.
    pub fn set_ground_y(&mut self, ground_y: T) -> Result<(), MssError> {
        if !ground_y.is_finite() {
            return Err(MssError::invalid("ground height must be finite"));
        }
        self.ground_y = ground_y;
        Ok(())
    }

    /// Set whether the system holds a hard-coded or a loaded mesh.
    pub fn set_mesh_mode(&mut self, mode: MeshMode) {
        self.mesh_mode = mode;
    }

    /// Get whether the system holds a hard-coded or a loaded mesh.
    #[must_use]
    pub const fn mesh_mode(&self) -> MeshMode {
        self.mesh_mode
    }

    /// Apply a whole `SystemConfig` at once.
    ///
    /// Mass, stiffness, gravity, bounce ratio, damping and ground height are always broadcast. The rest length is
    /// broadcast only to hard-coded meshes; loaded meshes keep the rest lengths derived from their geometry. Nothing
    /// is changed if the configuration is invalid.
    ///
    /// # Errors
    ///
    /// * See `SystemConfig::validate`.
    pub fn apply_general_attributes(&mut self, config: &SystemConfig<T>) -> Result<(), MssError> {
        config.validate()?;

        self.set_particle_mass(config.particle_mass)?;
        if self.mesh_mode == MeshMode::HardCoded {
            self.set_spring_rest_length(config.spring_rest_length)?;
        }
        self.set_spring_stiffness(config.spring_stiffness)?;
        self.gravity = config.gravity;
        self.bounce_energy_loss_ratio = config.bounce_energy_loss_ratio;
        self.damping = config.damping;
        self.ground_y = config.ground_y;
        Ok(())
    }

    /// Get the gravity.
    #[must_use]
    pub const fn gravity(&self) -> Vector<T> {
        self.gravity
    }

    /// Get the mass currently applied to the particles, read from the first one.
    #[must_use]
    pub fn mass(&self) -> Option<T> {
        self.particles.first().map(Particle::mass)
    }

    /// Get the rest length currently applied to the springs, read from the first one.
    #[must_use]
    pub fn rest_length(&self) -> Option<T> {
        self.springs.first().map(Spring::rest_length)
    }

    /// Get the stiffness currently applied to the springs, read from the first one.
    #[must_use]
    pub fn stiffness(&self) -> Option<T> {
        self.springs.first().map(Spring::k)
    }

    /// Get the fraction of velocity kept after a ground collision.
    #[must_use]
    pub const fn bounce_energy_loss_ratio(&self) -> T {
        self.bounce_energy_loss_ratio
    }

    /// Get the linear damping attributes.
    #[must_use]
    pub const fn damping(&self) -> LinearDamping<T> {
        self.damping
    }

    /// Get the height of the ground plane.
    #[must_use]
    pub const fn ground_y(&self) -> T {
        self.ground_y
    }

    /// Get the sum of the rest lengths recorded by the last `set_spring_rest_lengths_from_current`.
    #[must_use]
    pub const fn rest_length_sum(&self) -> f64 {
        self.rest_length_sum.total()
    }

    /// Get the average of the rest lengths recorded by the last `set_spring_rest_lengths_from_current`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_rest_length(&self) -> Option<f64> {
        if self.springs.is_empty() {
            None
        } else {
            Some(self.rest_length_sum.total() / self.springs.len() as f64)
        }
    }

    /// Get a copy of the position of every `Particle`.
    #[must_use]
    pub fn particle_positions(&self) -> Vec<Vector<T>> {
        self.particles.iter().map(|m| *m.position()).collect()
    }

    /// Get a copy of the cached endpoint positions of every `Spring`.
    #[must_use]
    pub fn spring_positions(&self) -> Vec<[Vector<T>; 2]> {
        self.springs.iter().map(Spring::positions).collect()
    }

    /// Get the presentation buffer, holding the positions written by the last step.
    #[must_use]
    pub fn vertices(&self) -> &[Vector<T>] {
        &self.vertices
    }

    /// Damp a velocity with the current linear damping attributes.
    pub fn apply_damping(&self, velocity: &mut Vector<T>) {
        self.damping.apply(velocity);
    }

    /// Handle a collision with a ground plane at `ground_y`, using the current bounce ratio.
    ///
    /// Returns `true` if the position was at or below the plane.
    pub fn handle_collision(&self, ground_y: T, position: &mut Vector<T>, velocity: &mut Vector<T>) -> bool {
        let ground = Ground {
            y: ground_y,
            bounce_energy_loss_ratio: self.bounce_energy_loss_ratio,
        };
        ground.collide(position, velocity)
    }

    /// Update the `ParticleSystem` by one time-step.
    ///
    /// The forces exerted by all `Spring`s are accumulated before any `Particle` moves. Each `Particle` then gets
    /// gravity added to its force, and is integrated with semi-implicit Euler: velocity first, then damping and
    /// ground collision, then position from the new velocity. Finally the presentation buffer and the cached spring
    /// endpoints are refreshed.
    ///
    /// # Arguments
    ///
    /// - `dt`: The time-step, in seconds.
    pub fn advance(&mut self, dt: T) {
        self.particles.iter_mut().for_each(Particle::reset_force);

        // Forces are evaluated in parallel but summed in spring order.
        let forces = self
            .springs
            .par_iter()
            .map(|s| (s.endpoints(), s.force_on_p0(&self.particles)))
            .collect::<Vec<_>>();
        for ((p0, p1), force) in forces {
            self.particles[p0].add_force(&force);
            self.particles[p1].add_force(&vector::scale(&force, -T::one()));
        }

        let gravity = self.gravity;
        let damping = self.damping;
        let ground = Ground {
            y: self.ground_y,
            bounce_energy_loss_ratio: self.bounce_energy_loss_ratio,
        };
        self.particles
            .par_iter_mut()
            .zip(self.vertices.par_iter_mut())
            .for_each(|(m, vertex)| {
                m.add_force(&gravity);
                let mass = m.mass();
                let acceleration = m.force().map(|f| f / mass);

                let mut velocity = vector::add(m.velocity(), &vector::scale(&acceleration, dt));
                damping.apply(&mut velocity);
                let mut position = *m.position();
                ground.collide(&mut position, &mut velocity);
                vector::add_assign(&mut position, &vector::scale(&velocity, dt));

                m.set_velocity(velocity);
                m.set_position(position);
                *vertex = position;
            });

        self.update_spring_positions();
    }

    /// Refresh the cached endpoint positions of every `Spring`.
    fn update_spring_positions(&mut self) {
        let particles = &self.particles;
        self.springs.iter_mut().for_each(|s| s.update_positions(particles));
    }

    /// Checks that a per-particle slice has one entry per particle.
    fn check_particle_len(&self, what: &str, len: usize) -> Result<(), MssError> {
        if len == self.particles.len() {
            Ok(())
        } else {
            Err(MssError::invalid(format!(
                "expected {} particle {what}, got {len}",
                self.particles.len()
            )))
        }
    }

    /// Get the total potential energy stored in the `Spring`s.
    #[must_use]
    pub fn potential_energy(&self) -> T {
        self.springs.par_iter().map(|s| s.potential_energy(&self.particles)).sum()
    }

    /// Get the total kinetic energy of the `Particle`s.
    #[must_use]
    pub fn kinetic_energy(&self) -> T {
        self.particles.par_iter().map(Particle::kinetic_energy).sum()
    }

    /// Get the total energy of the `ParticleSystem`.
    #[must_use]
    pub fn total_energy(&self) -> T {
        self.potential_energy() + self.kinetic_energy()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::{MeshMode, ParticleSystem};
    use crate::{config::SystemConfig, MssError};

    fn still() -> SystemConfig<f64> {
        let mut config = SystemConfig::default();
        config.gravity = [0.0; 3];
        config.damping = crate::config::LinearDamping::none();
        config
    }

    fn pair(distance: f64) -> Result<ParticleSystem<f64>, MssError> {
        let mut system = ParticleSystem::new(2, 1);
        system.set_particle_positions(&[[0.0, 5.0, 0.0], [distance, 5.0, 0.0]])?;
        system.set_spring_connections(&[(0, 1)])?;
        Ok(system)
    }

    #[test]
    fn no_particles_means_no_springs() {
        let system = ParticleSystem::<f32>::new(0, 4);
        assert_eq!(system.particle_count(), 0);
        assert_eq!(system.spring_count(), 0);
        assert!(system.mass().is_none());
        assert!(system.average_rest_length().is_none());
    }

    #[test]
    fn bad_inputs_are_rejected() -> Result<(), MssError> {
        let mut system = pair(1.0)?;
        assert!(system.set_particle_positions(&[[0.0; 3]]).is_err());
        assert!(system.set_particle_positions(&[[0.0; 3], [f64::NAN, 0.0, 0.0]]).is_err());
        assert!(system.set_spring_connections(&[(0, 2)]).is_err());
        assert!(system.set_spring_connections(&[(1, 1)]).is_err());
        assert!(system.set_spring_connections(&[]).is_err());
        assert!(system.set_particle_mass(0.0).is_err());
        assert!(system.set_particle_mass(-1.0).is_err());
        assert!(system.set_bounce_energy_loss_ratio(1.1).is_err());
        assert!(system.set_spring_stiffness(-1.0).is_err());
        assert!(system.set_gravity([0.0, f64::INFINITY, 0.0]).is_err());

        // Nothing changed.
        assert_eq!(system.mass(), Some(1.0));
        assert_eq!(system.springs()[0].endpoints(), (0, 1));
        assert_eq!(system.particle_positions()[1], [1.0, 5.0, 0.0]);
        Ok(())
    }

    #[test]
    fn rest_lengths_from_geometry() -> Result<(), MssError> {
        let mut system = ParticleSystem::<f64>::new(3, 2);
        system.set_particle_positions(&[[0.0, 0.0, 0.0], [3.0, 4.0, 0.0], [3.0, 4.0, 2.0]])?;
        system.set_spring_connections(&[(0, 1), (1, 2)])?;
        system.set_spring_rest_lengths_from_current();

        let lengths = system.springs().iter().map(|s| s.rest_length()).collect::<Vec<_>>();
        assert_eq!(lengths, vec![5.0, 2.0]);
        assert!(approx_eq!(f64, system.rest_length_sum(), 7.0));
        assert_eq!(system.average_rest_length(), Some(3.5));
        assert!(approx_eq!(f64, system.potential_energy(), 0.0));
        Ok(())
    }

    #[test]
    fn absolute_rest_length_changes_clamp_at_zero() -> Result<(), MssError> {
        let mut system = pair(1.0)?;
        system.set_spring_rest_length(2.0)?;
        system.add_spring_rest_length(0.5)?;
        assert_eq!(system.rest_length(), Some(2.5));
        system.add_spring_rest_length(-0.5)?;
        assert_eq!(system.rest_length(), Some(2.0));
        system.add_spring_rest_length(-3.0)?;
        assert_eq!(system.rest_length(), Some(0.0));
        assert!(system.add_spring_rest_length(f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn proportional_rest_length_changes() -> Result<(), MssError> {
        let mut system = pair(1.0)?;
        system.set_spring_rest_length(10.0)?;

        system.add_spring_rest_length_homogeneous(0.5)?;
        assert_eq!(system.rest_length(), Some(15.0));
        system.add_spring_rest_length_homogeneous(-0.5)?;
        assert_eq!(system.rest_length(), Some(10.0));

        // Shrinking divides, so it does not mirror growing.
        system.add_spring_rest_length_homogeneous(-0.5)?;
        let shrunk = system.rest_length().unwrap_or_default();
        assert!(approx_eq!(f64, shrunk, 10.0 / 1.5));
        assert!(shrunk > 10.0 * 0.5);
        Ok(())
    }

    #[test]
    fn general_attributes_respect_mesh_mode() -> Result<(), MssError> {
        let mut config = still();
        config.particle_mass = 3.0;
        config.spring_stiffness = 7.0;
        config.spring_rest_length = 42.0;

        let mut loaded = pair(1.0)?;
        loaded.set_spring_rest_lengths_from_current();
        loaded.apply_general_attributes(&config)?;
        assert_eq!(loaded.mass(), Some(3.0));
        assert_eq!(loaded.stiffness(), Some(7.0));
        assert_eq!(loaded.rest_length(), Some(1.0));

        let mut hard_coded = pair(1.0)?;
        hard_coded.set_mesh_mode(MeshMode::HardCoded);
        hard_coded.apply_general_attributes(&config)?;
        assert_eq!(hard_coded.rest_length(), Some(42.0));
        assert_eq!(hard_coded.gravity(), [0.0; 3]);

        config.particle_mass = 0.0;
        assert!(hard_coded.apply_general_attributes(&config).is_err());
        assert_eq!(hard_coded.mass(), Some(3.0));
        Ok(())
    }

    #[test]
    fn stretched_spring_pulls_symmetrically() -> Result<(), MssError> {
        let mut system = pair(4.0)?;
        system.apply_general_attributes(&still())?;
        system.set_spring_rest_length(2.0)?;
        system.set_spring_stiffness(1.0)?;
        system.advance(0.1);

        let [f0, f1] = [system.particles()[0].force(), system.particles()[1].force()];
        assert_eq!(f0, &[2.0, 0.0, 0.0]);
        assert_eq!(f1, &[-2.0, 0.0, 0.0]);

        let [v0, v1] = [system.particles()[0].velocity(), system.particles()[1].velocity()];
        assert!(approx_eq!(f64, v0[0], 0.2));
        assert!(approx_eq!(f64, v1[0], -0.2));
        assert_eq!(system.vertices(), system.particle_positions().as_slice());
        assert_eq!(system.spring_positions()[0], [system.vertices()[0], system.vertices()[1]]);
        Ok(())
    }

    #[test]
    fn collision_wrapper_uses_bounce_ratio() -> Result<(), MssError> {
        let mut system = ParticleSystem::<f64>::new(1, 0);
        system.set_bounce_energy_loss_ratio(0.5)?;
        let (mut p, mut v) = ([0.0, -1.0, 0.0], [0.0, -4.0, 0.0]);
        assert!(system.handle_collision(0.0, &mut p, &mut v));
        assert_eq!(p, [0.0, 0.0, 0.0]);
        assert_eq!(v, [0.0, 2.0, 0.0]);

        let mut still = [0.0; 3];
        system.apply_damping(&mut still);
        assert_eq!(still, [0.0; 3]);
        Ok(())
    }
}
