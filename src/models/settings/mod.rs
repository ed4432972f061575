// Settings module
// Grid constants shared by geometry, drag placement and paging

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a settings file is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("min_slot must be at least 1, got {0}")]
    ZeroMinSlot(u32),

    #[error("min_slot ({min}) must not exceed max_slot ({max})")]
    SlotBounds { min: u32, max: u32 },

    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

/// Layout and paging constants for the timetable grid.
///
/// Pixel values are integers; `header_width` is the time-label column on the
/// left and `header_height` the day-label row on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub col_width: i32,
    pub row_height: i32,
    pub header_width: i32,
    pub header_height: i32,
    pub min_slot: u32,
    pub max_slot: u32,
    pub page_size: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            col_width: 80,
            row_height: 30,
            header_width: 120,
            header_height: 40,
            min_slot: 1,
            max_slot: 24,
            page_size: 100,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let dimensions = [
            ("col_width", self.col_width),
            ("row_height", self.row_height),
        ];
        for (field, value) in dimensions {
            if value <= 0 {
                return Err(SettingsError::NonPositive { field });
            }
        }

        if self.header_width < 0 {
            return Err(SettingsError::NonPositive { field: "header_width" });
        }
        if self.header_height < 0 {
            return Err(SettingsError::NonPositive { field: "header_height" });
        }
        if self.page_size == 0 {
            return Err(SettingsError::NonPositive { field: "page_size" });
        }
        if self.min_slot == 0 {
            return Err(SettingsError::ZeroMinSlot(self.min_slot));
        }
        if self.min_slot > self.max_slot {
            return Err(SettingsError::SlotBounds {
                min: self.min_slot,
                max: self.max_slot,
            });
        }

        Ok(())
    }

    /// Whether `slot` is a placeable time slot
    pub fn is_valid_slot(&self, slot: i64) -> bool {
        slot >= i64::from(self.min_slot) && slot <= i64::from(self.max_slot)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: GridSettings =
            toml::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> String {
        // A flat struct of integers always serializes.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
