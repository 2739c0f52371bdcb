use crate::animation::AnimationKind;
use crate::error::AtomError;
use bevy::prelude::*;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub base_radius: f32,
    pub radius_spacing: f32,
    /// Nucleus cube side per proton.
    pub nucleus_spread: f32,
    pub eccentricity_min: f32,
    pub eccentricity_range: f32,
    pub orbit_segments: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_radius: 4.0,
            radius_spacing: 3.0,
            nucleus_spread: 0.2,
            eccentricity_min: 0.8,
            eccentricity_range: 0.1,
            orbit_segments: 128,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub transition_secs: f32,
    /// Delay between a request and the build of the incoming atom.
    pub build_delay_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transition_secs: 0.5,
            build_delay_secs: 0.25,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub orbit_line_opacity: f32,
    pub nucleus_spin: f32,
    /// Camera auto-rotate in radians per second.
    pub auto_rotate_speed: f32,
    pub bloom_intensity: f32,
    pub background: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            orbit_line_opacity: 0.25,
            nucleus_spin: crate::orbit::NUCLEUS_SPIN_PER_FRAME,
            auto_rotate_speed: 0.2 * std::f32::consts::TAU / 60.0,
            bloom_intensity: 0.35,
            background: [0x05, 0x05, 0x0a],
        }
    }
}

impl RenderConfig {
    /// Orbit lines are held faint while an atom grows in; a shrinking atom
    /// fades every material uniformly.
    pub fn orbit_line_factor(&self, kind: AnimationKind) -> f32 {
        match kind {
            AnimationKind::Incoming => self.orbit_line_opacity,
            AnimationKind::Outgoing => 1.0,
        }
    }
}

#[derive(Resource, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub layout: LayoutConfig,
    pub timing: TimingConfig,
    pub render: RenderConfig,
}

impl ViewerConfig {
    pub fn from_json_str(path: &str, json: &str) -> Result<Self, AtomError> {
        serde_json::from_str(json).map_err(|source| AtomError::ConfigParse {
            path: path.to_string(),
            source,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &str) -> Result<Self, AtomError> {
        let json = std::fs::read_to_string(path).map_err(|source| AtomError::ConfigRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(path, &json)
    }

    /// Loads `path` if given; any failure is logged and defaults are used.
    pub fn load_or_default(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        #[cfg(not(target_arch = "wasm32"))]
        let loaded = Self::from_file(path);
        #[cfg(target_arch = "wasm32")]
        let loaded: Result<Self, AtomError> = {
            warn!("Config files are not supported on the web; ignoring {}", path);
            Ok(Self::default())
        };
        match loaded {
            Ok(config) => {
                info!("Loaded viewer config from {}", path);
                config
            }
            Err(e) => {
                error!("{}; falling back to default config", e);
                Self::default()
            }
        }
    }
}
