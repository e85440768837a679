//! Single-step scenarios with hand-computed outcomes.

use float_cmp::approx_eq;
use mass_spring::{LinearDamping, MeshMode, ParticleSystem, SystemConfig};

mod common;

#[test]
fn free_fall() -> Result<(), String> {
    let config = SystemConfig {
        damping: LinearDamping::none(),
        ..SystemConfig::default()
    };
    let mut system = common::loose_particles(1, &config)?;
    system.set_particle_positions(&[[1.0, 10.0, -2.0]]).map_err(|e| e.to_string())?;

    system.advance(0.1);

    let particle = &system.particles()[0];
    assert!(approx_eq!(f64, particle.velocity()[1], -0.98));
    assert!(approx_eq!(f64, particle.position()[1], 10.0 - 0.098));
    assert_eq!(particle.velocity()[0], 0.0);
    assert_eq!(particle.position()[0], 1.0);
    assert_eq!(particle.position()[2], -2.0);
    assert_eq!(system.vertices()[0], *particle.position());
    Ok(())
}

#[test]
fn spring_at_rest_length_stays_still() -> Result<(), String> {
    let config = SystemConfig {
        gravity: [0.0; 3],
        spring_rest_length: 25.0,
        ..SystemConfig::default()
    };
    let mut system = ParticleSystem::new(2, 1);
    system.set_mesh_mode(MeshMode::HardCoded);
    system.apply_general_attributes(&config).map_err(|e| e.to_string())?;
    let start = [[0.0, 10.0, 0.0], [15.0, 30.0, 0.0]];
    system.set_particle_positions(&start).map_err(|e| e.to_string())?;
    system.set_spring_connections(&[(0, 1)]).map_err(|e| e.to_string())?;

    // Damping at rest is not zero, but removing a fraction of nothing leaves nothing.
    assert!(system.damping().coefficient(0.0) > 0.0);
    system.advance(0.016);

    assert_eq!(system.particle_positions(), start.to_vec());
    for particle in system.particles() {
        assert_eq!(particle.velocity(), &[0.0; 3]);
    }
    Ok(())
}

#[test]
fn ground_collision() -> Result<(), String> {
    let mut system = ParticleSystem::<f64>::new(1, 0);
    system.set_bounce_energy_loss_ratio(0.9).map_err(|e| e.to_string())?;

    let (mut position, mut velocity) = ([3.0, -1.0, 4.0], [0.0, -5.0, 0.0]);
    assert!(system.handle_collision(0.0, &mut position, &mut velocity));
    assert_eq!(position, [3.0, 0.0, 4.0]);
    assert_eq!(velocity, [0.0, 4.5, 0.0]);
    Ok(())
}

#[test]
fn ground_collision_during_a_step() -> Result<(), String> {
    let config = SystemConfig {
        gravity: [0.0; 3],
        damping: LinearDamping::none(),
        bounce_energy_loss_ratio: 0.9,
        ..SystemConfig::default()
    };
    let mut system = common::loose_particles(1, &config)?;
    system.set_particle_positions(&[[0.0, -1.0, 0.0]]).map_err(|e| e.to_string())?;
    system.set_particle_velocities(&[[0.0, -5.0, 0.0]]).map_err(|e| e.to_string())?;

    system.advance(0.1);

    let particle = &system.particles()[0];
    assert_eq!(particle.velocity(), &[0.0, 4.5, 0.0]);
    assert!(approx_eq!(f64, particle.position()[1], 0.45));
    Ok(())
}

#[test]
fn raised_ground_snaps_to_its_height() -> Result<(), String> {
    let config = SystemConfig {
        gravity: [0.0; 3],
        damping: LinearDamping::none(),
        ground_y: 5.0,
        bounce_energy_loss_ratio: 1.0,
        ..SystemConfig::default()
    };
    let mut system = common::loose_particles(1, &config)?;
    system.set_particle_positions(&[[0.0, 4.0, 0.0]]).map_err(|e| e.to_string())?;
    system.set_particle_velocities(&[[2.0, -1.0, 0.0]]).map_err(|e| e.to_string())?;

    system.advance(0.5);

    let particle = &system.particles()[0];
    assert_eq!(particle.velocity(), &[2.0, 1.0, 0.0]);
    assert_eq!(particle.position(), &[1.0, 5.5, 0.0]);
    Ok(())
}

#[test]
fn fast_particles_are_damped_harder() -> Result<(), String> {
    let config = SystemConfig {
        gravity: [0.0; 3],
        ..SystemConfig::default()
    };
    let mut system = common::loose_particles(2, &config)?;
    system.set_particle_positions(&[[0.0, 50.0, 0.0], [10.0, 50.0, 0.0]]).map_err(|e| e.to_string())?;
    system.set_particle_velocities(&[[10.0, 0.0, 0.0], [30.0, 0.0, 0.0]]).map_err(|e| e.to_string())?;

    system.advance(0.016);

    let [slow, fast] = [system.particles()[0].speed(), system.particles()[1].speed()];
    assert!(approx_eq!(f64, slow, 10.0 * (1.0 - 0.0001)));
    assert!(approx_eq!(f64, fast, 30.0 * (1.0 - 0.65)));
    Ok(())
}
