use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "assets/configs/demo.ron";
pub const USER_CONFIG_PATH: &str = "assets/user_configs/demo.ron";

/// Shapes used by the `ndbuf-demo` walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// extents of the 4-D array that is written and read back
    pub array4: [usize; 4],
    /// extents the 3-D array is created with
    pub array3: [usize; 3],
    /// extents the 3-D array is resized to before it is filled
    pub grow_to: [usize; 3],
    /// outer index used to slice the 3-D array
    pub slice_at: usize,
    /// extents used to rebuild a 2-D array from the slice's data
    pub reshape_2d: [usize; 2],
    /// extents whose element count does not match the slice's data
    pub bad_reshape_2d: [usize; 2],
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            array4: [5, 4, 3, 2],
            array3: [4, 3, 2],
            grow_to: [4, 4, 4],
            slice_at: 2,
            reshape_2d: [8, 2],
            bad_reshape_2d: [5, 3],
        }
    }
}

impl DemoConfig {
    /// Loads the user config if it exists, otherwise the default config.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH), Path::new(USER_CONFIG_PATH))
    }

    pub fn load_from(default_path: &Path, user_path: &Path) -> Result<Self> {
        let path = if user_path.exists() { user_path } else { default_path };
        log::info!("loading demo config from {}", path.display());
        let serialized = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        ron::from_str(&serialized).with_context(|| format!("unable to parse config {}", path.display()))
    }

    /// Writes this config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).with_context(|| format!("unable to create {}", dir.display()))?;
            }
        }
        let serialized = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, serialized).with_context(|| format!("unable to write config {}", path.display()))
    }
}
