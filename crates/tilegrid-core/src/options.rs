// Container configuration: the options object a dashboard passes when it
// builds its grid. Serialised as camelCase JSON, every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Direction;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid grid options: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lane count must be at least 1")]
    ZeroLanes,
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidRatio { name: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Number of lanes across the fixed axis.
    pub lanes: u32,
    pub direction: Direction,
    /// Cell width divided by cell height.
    pub width_height_ratio: f32,
    /// Render only: no gesture bindings, mutations are ignored.
    pub read_only: bool,
    /// When set, tiles get `font-size = cell height * ratio`.
    pub height_to_font_size_ratio: Option<f32>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            lanes: 5,
            direction: Direction::Vertical,
            width_height_ratio: 1.0,
            read_only: false,
            height_to_font_size_ratio: None,
        }
    }
}

impl GridOptions {
    pub fn with_lanes(lanes: u32) -> Self {
        Self {
            lanes,
            ..Default::default()
        }
    }

    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: GridOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.lanes < 1 {
            return Err(OptionsError::ZeroLanes);
        }
        check_ratio("widthHeightRatio", self.width_height_ratio)?;
        if let Some(ratio) = self.height_to_font_size_ratio {
            check_ratio("heightToFontSizeRatio", ratio)?;
        }
        Ok(())
    }

    /// The same options with every invalid field replaced: lanes become 1,
    /// a bad `widthHeightRatio` becomes 1.0 and a bad font ratio is dropped.
    pub fn sanitized(self) -> Self {
        let width_height_ratio = match check_ratio("widthHeightRatio", self.width_height_ratio) {
            Ok(()) => self.width_height_ratio,
            Err(_) => 1.0,
        };
        Self {
            lanes: self.lanes.max(1),
            width_height_ratio,
            height_to_font_size_ratio: self
                .height_to_font_size_ratio
                .filter(|ratio| check_ratio("heightToFontSizeRatio", *ratio).is_ok()),
            ..self
        }
    }
}

fn check_ratio(name: &'static str, value: f32) -> Result<(), OptionsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidRatio { name, value })
    }
}
