//! Game options (diggerrc format)
//!
//! ```text
//! # ~/.diggerrc
//! OPTIONS=grid_size:6,seed:42
//! OPTIONS=!autosave,autosave_interval:60
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{DEFAULT_AUTOSAVE_INTERVAL_SECS, DEFAULT_GRID_SIZE};

/// User-configurable settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiggerOptions {
    /// Edge length of generated layers
    pub grid_size: usize,
    /// Fixed RNG seed; entropy when unset
    pub seed: Option<u64>,
    pub autosave: bool,
    /// Seconds between automatic saves
    pub autosave_interval: u64,
    /// Overrides the platform save directory
    pub save_dir: Option<PathBuf>,
}

impl Default for DiggerOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            autosave: true,
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            save_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

impl DiggerOptions {
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;
        Self::parse_config(&contents)
    }

    /// Parse `OPTIONS=` lines; other lines and `#` comments are ignored
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                    options.parse_option(opt)?;
                }
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = match opt.strip_prefix('!').or_else(|| opt.strip_prefix("no")) {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "autosave" => self.autosave = value,
            "grid_size" | "seed" | "autosave_interval" | "save_dir" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "grid_size" => {
                let size: usize = value.parse().map_err(|_| invalid())?;
                if size == 0 {
                    return Err(invalid());
                }
                self.grid_size = size;
            }
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            "autosave" => {
                self.autosave = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                }
            }
            "autosave_interval" => {
                let secs: u64 = value.parse().map_err(|_| invalid())?;
                if secs == 0 {
                    return Err(invalid());
                }
                self.autosave_interval = secs;
            }
            "save_dir" => self.save_dir = Some(PathBuf::from(value)),
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string()).map_err(|e| OptionsError::Io(e.to_string()))
    }

    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# Digger configuration".to_string()];

        let mut opts = vec![format!("grid_size:{}", self.grid_size)];
        if let Some(seed) = self.seed {
            opts.push(format!("seed:{}", seed));
        }
        lines.push(format!("OPTIONS={}", opts.join(",")));

        lines.push(format!(
            "OPTIONS={}autosave,autosave_interval:{}",
            if self.autosave { "" } else { "!" },
            self.autosave_interval
        ));

        if let Some(dir) = &self.save_dir {
            lines.push(format!("OPTIONS=save_dir:{}", dir.display()));
        }

        lines.join("\n")
    }
}
