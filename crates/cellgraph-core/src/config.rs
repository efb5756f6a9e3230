//! Sheet configuration.
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! rows = 20
//! cols = 8
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SheetError};

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
/// Largest grid a sheet will allocate, in cells.
pub const MAX_CELLS: usize = 1_000_000;

/// Shape of a sheet.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl SheetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SheetConfig =
            toml::from_str(content).map_err(|e| SheetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SheetError::EmptyGrid);
        }
        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(SheetError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_CELLS,
            }),
        }
    }
}
