use std::path::Path;

use serde::Deserialize;

/// Tunable parameters of the landing animation. Fixed once the window is
/// up; not exposed to end users. An operator can override the defaults by
/// dropping a `garden.json` next to the binary.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Edge length of one automaton cell, logical pixels.
    pub cell_size: u32,
    /// Fraction of cells seeded alive after a resize.
    pub density: f64,
    /// Simulated ticks per second; decoupled from display refresh.
    pub target_fps: u32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            density: 0.18,
            target_fps: 8,
        }
    }
}

impl GardenConfig {
    /// Loads the config file if present, otherwise returns defaults. A
    /// malformed file is reported and ignored rather than aborting startup.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("no config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_parameters() {
        let c = GardenConfig::default();
        assert_eq!(c.cell_size, 32);
        assert_eq!(c.density, 0.18);
        assert_eq!(c.target_fps, 8);
    }

    #[test]
    fn partial_json_falls_back_per_field() {
        let c: GardenConfig = serde_json::from_str(r#"{"cell_size": 48}"#).unwrap();
        assert_eq!(c.cell_size, 48);
        assert_eq!(c.density, 0.18);
        assert_eq!(c.target_fps, 8);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let c = GardenConfig::load(Path::new("/nonexistent/garden.json"));
        assert_eq!(c.cell_size, 32);
    }
}
