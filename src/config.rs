//! Engine tunables, with defaults and environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use crate::bounds::Bounds;
use crate::consts::{
    DEFAULT_GRID_UNIT, DEFAULT_PARENT_PULSE_OFFSET, DEFAULT_SCAN_OFFSET, DEFAULT_SCAN_STEP, DEFAULT_STACK_GAP,
    DEFAULT_STACK_X, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH, DEFAULT_TOLERANCE_PER_MILLE,
};
use crate::error::ConfigError;

/// Scanner tunables. The step and both offsets are pixel distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub step: i32,
    pub offset: i32,
    pub parent_offset: i32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { step: DEFAULT_SCAN_STEP, offset: DEFAULT_SCAN_OFFSET, parent_offset: DEFAULT_PARENT_PULSE_OFFSET }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    pub grid_unit: i32,
    pub bounds: Bounds,
    pub tile_width: i32,
    pub tile_height: i32,
    pub stack_x: i32,
    pub stack_gap: i32,
    pub tolerance_per_mille: i32,
    pub scan: ScanConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_unit: DEFAULT_GRID_UNIT,
            bounds: Bounds::default(),
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            stack_x: DEFAULT_STACK_X,
            stack_gap: DEFAULT_STACK_GAP,
            tolerance_per_mille: DEFAULT_TOLERANCE_PER_MILLE,
            scan: ScanConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `TILEBOARD_GRID_UNIT`
    /// - `TILEBOARD_CANVAS_WIDTH`, `TILEBOARD_CANVAS_HEIGHT`
    /// - `TILEBOARD_HEADER_BAND_HEIGHT`, `TILEBOARD_FOOTER_BAND_TOP`
    /// - `TILEBOARD_TILE_WIDTH`, `TILEBOARD_TILE_HEIGHT`
    /// - `TILEBOARD_STACK_X`, `TILEBOARD_STACK_GAP`
    /// - `TILEBOARD_TOLERANCE_PER_MILLE`
    /// - `TILEBOARD_SCAN_STEP`, `TILEBOARD_SCAN_OFFSET`, `TILEBOARD_PARENT_PULSE_OFFSET`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but does not
    /// parse, or when the resulting config fails [`CanvasConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`CanvasConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let config = Self {
            grid_unit: env_parse(&lookup, "TILEBOARD_GRID_UNIT", d.grid_unit)?,
            bounds: Bounds {
                width: env_parse(&lookup, "TILEBOARD_CANVAS_WIDTH", d.bounds.width)?,
                height: env_parse(&lookup, "TILEBOARD_CANVAS_HEIGHT", d.bounds.height)?,
                header_band_height: env_parse(&lookup, "TILEBOARD_HEADER_BAND_HEIGHT", d.bounds.header_band_height)?,
                footer_band_top: env_parse(&lookup, "TILEBOARD_FOOTER_BAND_TOP", d.bounds.footer_band_top)?,
            },
            tile_width: env_parse(&lookup, "TILEBOARD_TILE_WIDTH", d.tile_width)?,
            tile_height: env_parse(&lookup, "TILEBOARD_TILE_HEIGHT", d.tile_height)?,
            stack_x: env_parse(&lookup, "TILEBOARD_STACK_X", d.stack_x)?,
            stack_gap: env_parse(&lookup, "TILEBOARD_STACK_GAP", d.stack_gap)?,
            tolerance_per_mille: env_parse(&lookup, "TILEBOARD_TOLERANCE_PER_MILLE", d.tolerance_per_mille)?,
            scan: ScanConfig {
                step: env_parse(&lookup, "TILEBOARD_SCAN_STEP", d.scan.step)?,
                offset: env_parse(&lookup, "TILEBOARD_SCAN_OFFSET", d.scan.offset)?,
                parent_offset: env_parse(&lookup, "TILEBOARD_PARENT_PULSE_OFFSET", d.scan.parent_offset)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("TILEBOARD_GRID_UNIT", self.grid_unit),
            ("TILEBOARD_TILE_WIDTH", self.tile_width),
            ("TILEBOARD_TILE_HEIGHT", self.tile_height),
            ("TILEBOARD_SCAN_STEP", self.scan.step),
        ];
        for (var, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid { var, value: value.to_string() });
            }
        }
        if self.tolerance_per_mille < 0 {
            return Err(ConfigError::Invalid {
                var: "TILEBOARD_TOLERANCE_PER_MILLE",
                value: self.tolerance_per_mille.to_string(),
            });
        }
        if self.bounds.footer_band_top < self.bounds.header_band_height {
            return Err(ConfigError::Invalid {
                var: "TILEBOARD_FOOTER_BAND_TOP",
                value: self.bounds.footer_band_top.to_string(),
            });
        }
        Ok(())
    }
}

fn env_parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { var: key, value: raw.clone() })
}
