//! Meshes that can be turned into a `ParticleSystem`.
//!
//! A mesh is either one of the small hard-coded `Preset`s or a `MeshData` handed over by a mesh loader. The two differ
//! in how rest lengths are chosen: presets broadcast one configured rest length, loaded meshes derive every rest length
//! from their starting geometry.

use serde::{Deserialize, Serialize};

use crate::{
    config::SystemConfig,
    physics::{MeshMode, ParticleSystem},
    utils::{Real, Vector},
    MssError,
};

/// The geometry and connectivity of a mesh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData<T: Real> {
    /// Starting position of every particle.
    pub positions: Vec<Vector<T>>,
    /// Indices of the two particles joined by every spring.
    pub springs: Vec<(usize, usize)>,
    /// Triangles for the renderer. Ignored by the simulation.
    #[serde(default)]
    pub faces: Vec<[usize; 3]>,
}

impl<T: Real> MeshData<T> {
    /// Creates a `MeshData` from positions and springs, without faces.
    #[must_use]
    pub const fn new(positions: Vec<Vector<T>>, springs: Vec<(usize, usize)>) -> Self {
        Self {
            positions,
            springs,
            faces: Vec::new(),
        }
    }

    /// Builds a `ParticleSystem` with the particles at their starting positions and the springs connected.
    ///
    /// The system keeps its default attributes and `MeshMode`.
    ///
    /// # Errors
    ///
    /// * If any position is not finite, or any spring index is out of range or self-referencing.
    pub fn build(&self) -> Result<ParticleSystem<T>, MssError> {
        if self.positions.is_empty() && !self.springs.is_empty() {
            return Err(MssError::invalid("a mesh with springs needs particles"));
        }
        let mut system = ParticleSystem::new(self.positions.len(), self.springs.len());
        system.set_particle_positions(&self.positions)?;
        system.set_spring_connections(&self.springs)?;
        Ok(system)
    }
}

/// Attributes given to every loaded mesh.
#[must_use]
pub fn loaded_mesh_attributes<T: Real>() -> SystemConfig<T> {
    SystemConfig {
        gravity: [T::zero(); 3],
        bounce_energy_loss_ratio: T::from_f64_lossy(0.9),
        particle_mass: T::from_f64_lossy(2.5),
        spring_stiffness: T::from_f64_lossy(180.0),
        ..SystemConfig::default()
    }
}

impl<T: Real> ParticleSystem<T> {
    /// Builds a `ParticleSystem` from a loaded mesh.
    ///
    /// Every spring rests at its starting length, particles weigh 2.5, springs have stiffness 180, there is no gravity
    /// and bounces keep 90% of the velocity.
    ///
    /// # Errors
    ///
    /// * See `MeshData::build`.
    pub fn from_loaded_mesh(mesh: &MeshData<T>) -> Result<Self, MssError> {
        let mut system = mesh.build()?;
        system.set_spring_rest_lengths_from_current();
        system.set_mesh_mode(MeshMode::Loaded);
        system.apply_general_attributes(&loaded_mesh_attributes())?;

        if let Some(avg) = system.average_rest_length() {
            ftlog::info!(
                "Loaded a mesh with {} particles, {} springs and {} faces. Average rest length {avg}",
                system.particle_count(),
                system.spring_count(),
                mesh.faces.len()
            );
        }
        Ok(system)
    }

    /// Builds a `ParticleSystem` from one of the hard-coded meshes, with that mesh's attributes.
    ///
    /// # Errors
    ///
    /// * This cannot fail for the built-in presets, but propagates any error from building the mesh.
    pub fn from_preset(preset: Preset) -> Result<Self, MssError> {
        let mut system = preset.mesh().build()?;
        system.set_mesh_mode(MeshMode::HardCoded);
        system.apply_general_attributes(&preset.attributes())?;
        ftlog::debug!("Built the {preset:?} preset");
        Ok(system)
    }
}

/// The hard-coded meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Two particles joined by one spring.
    Line,
    /// Four particles joined by six springs.
    Tetrahedron,
    /// Eight particles joined along the twelve edges of a cube.
    Cube,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 3] = [Self::Line, Self::Tetrahedron, Self::Cube];

    /// The starting geometry of the preset.
    #[must_use]
    pub fn mesh<T: Real>(self) -> MeshData<T> {
        let (positions, springs) = match self {
            Self::Line => (LINE_POSITIONS, LINE_SPRINGS),
            Self::Tetrahedron => (TETRAHEDRON_POSITIONS, TETRAHEDRON_SPRINGS),
            Self::Cube => (CUBE_POSITIONS, CUBE_SPRINGS),
        };
        let positions = positions.iter().map(|p| p.map(T::from_f64_lossy)).collect();
        MeshData::new(positions, springs.to_vec())
    }

    /// The attributes of the preset.
    #[must_use]
    pub fn attributes<T: Real>(self) -> SystemConfig<T> {
        let (rest_length, stiffness) = match self {
            Self::Line => (28.0, 4.0),
            Self::Tetrahedron => (39.5, 4.0),
            Self::Cube => (19.5, 20.0),
        };
        SystemConfig {
            gravity: [T::zero(), T::from_f64_lossy(-6.0), T::zero()],
            bounce_energy_loss_ratio: T::from_f64_lossy(0.9),
            particle_mass: T::from_f64_lossy(2.0),
            spring_stiffness: T::from_f64_lossy(stiffness),
            spring_rest_length: T::from_f64_lossy(rest_length),
            ..SystemConfig::default()
        }
    }
}

const LINE_POSITIONS: &[[f64; 3]] = &[[-15.0, 15.0, 0.0], [15.0, 10.0, 0.0]];
const LINE_SPRINGS: &[(usize, usize)] = &[(0, 1)];

const TETRAHEDRON_POSITIONS: &[[f64; 3]] = &[
    [-20.0, 10.0, 0.0],
    [20.0, 10.0, 0.0],
    [0.0, 10.0, -34.64],
    [0.0, 42.66, -11.55],
];
const TETRAHEDRON_SPRINGS: &[(usize, usize)] = &[(0, 1), (1, 2), (0, 2), (0, 3), (1, 3), (2, 3)];

const CUBE_POSITIONS: &[[f64; 3]] = &[
    [-10.0, 10.0, 10.0],
    [10.0, 10.0, 10.0],
    [10.0, 10.0, -10.0],
    [-10.0, 10.0, -10.0],
    [-10.0, 30.0, 10.0],
    [10.0, 30.0, 10.0],
    [10.0, 30.0, -10.0],
    [-10.0, 30.0, -10.0],
];
const CUBE_SPRINGS: &[(usize, usize)] = &[
    (0, 1),
    (1, 2),
    (2, 3),
    (0, 3),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 5),
    (5, 6),
    (7, 6),
    (4, 7),
];

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use super::{MeshData, Preset};
    use crate::physics::{MeshMode, ParticleSystem};

    #[test_case(Preset::Line, 2, 1, 28.0, 4.0; "line")]
    #[test_case(Preset::Tetrahedron, 4, 6, 39.5, 4.0; "tetrahedron")]
    #[test_case(Preset::Cube, 8, 12, 19.5, 20.0; "cube")]
    fn presets(preset: Preset, particles: usize, springs: usize, rest: f64, k: f64) -> Result<(), String> {
        let system = ParticleSystem::<f64>::from_preset(preset).map_err(|e| e.to_string())?;
        assert_eq!(system.particle_count(), particles);
        assert_eq!(system.spring_count(), springs);
        assert_eq!(system.mesh_mode(), MeshMode::HardCoded);
        assert_eq!(system.rest_length(), Some(rest));
        assert_eq!(system.stiffness(), Some(k));
        assert_eq!(system.mass(), Some(2.0));
        assert_eq!(system.gravity(), [0.0, -6.0, 0.0]);
        assert_eq!(system.bounce_energy_loss_ratio(), 0.9);
        assert!(system.springs().iter().all(|s| s.rest_length() == rest));
        Ok(())
    }

    #[test]
    fn loaded_mesh_rests_at_its_geometry() -> Result<(), String> {
        let mut mesh = Preset::Tetrahedron.mesh::<f64>();
        mesh.faces = vec![[0, 1, 2], [0, 1, 3]];
        let system = ParticleSystem::from_loaded_mesh(&mesh).map_err(|e| e.to_string())?;

        assert_eq!(system.mesh_mode(), MeshMode::Loaded);
        assert_eq!(system.mass(), Some(2.5));
        assert_eq!(system.stiffness(), Some(180.0));
        assert_eq!(system.gravity(), [0.0; 3]);
        assert!(approx_eq!(f64, system.potential_energy(), 0.0));

        // The base of the tetrahedron is an equilateral triangle with sides of 40.
        assert!(approx_eq!(f64, system.springs()[0].rest_length(), 40.0));
        let avg = system.average_rest_length().ok_or("no springs")?;
        let expected = system.springs().iter().map(|s| s.rest_length()).sum::<f64>() / 6.0;
        assert!(approx_eq!(f64, avg, expected, epsilon = 1e-9));
        Ok(())
    }

    #[test]
    fn bad_meshes_are_rejected() {
        let mesh = MeshData::<f32>::new(vec![[0.0; 3], [1.0, 0.0, 0.0]], vec![(0, 5)]);
        assert!(mesh.build().is_err());

        let mesh = MeshData::<f32>::new(Vec::new(), vec![(0, 1)]);
        assert!(ParticleSystem::from_loaded_mesh(&mesh).is_err());
    }

    #[test]
    fn mesh_from_json() -> Result<(), String> {
        let json = r#"{ "positions": [[0, 0, 0], [0, 3, 4]], "springs": [[0, 1]] }"#;
        let mesh: MeshData<f64> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        assert!(mesh.faces.is_empty());
        let system = ParticleSystem::from_loaded_mesh(&mesh).map_err(|e| e.to_string())?;
        assert_eq!(system.rest_length(), Some(5.0));
        assert_eq!(system.average_rest_length(), Some(5.0));
        Ok(())
    }
}
