use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SELECTION_LENGTH: f64 = 5.0;
pub const DEFAULT_MAX_SELECTION_LENGTH: f64 = 500.0;
pub const DEFAULT_DETAILS_POPUP_WIDTH: f64 = 300.0;
/// Share of the domain covered by the initial selection.
pub const INITIAL_SELECTION_SHARE: f64 = 0.27;

/// Behaviour options of a chart controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub min_selection_length: f64,
    pub max_selection_length: f64,
    /// Length of the first selection. Defaults to a share of the domain.
    pub initial_selection_length: Option<f64>,
    /// The value axis bottom never rises above this value.
    pub max_bottom_value: Option<f64>,
    /// The value axis top never drops below this value.
    pub min_top_value: Option<f64>,
    /// Logical pixels.
    pub details_popup_width: f64,
    /// Maximum fraction digits of the popup values, `None` for no limit.
    pub details_popup_value_precision: Option<u32>,
    /// Added to an index to get the number displayed for it.
    pub index_name_offset: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            min_selection_length: DEFAULT_MIN_SELECTION_LENGTH,
            max_selection_length: DEFAULT_MAX_SELECTION_LENGTH,
            initial_selection_length: None,
            max_bottom_value: None,
            min_top_value: None,
            details_popup_width: DEFAULT_DETAILS_POPUP_WIDTH,
            details_popup_value_precision: None,
            index_name_offset: 0.0,
        }
    }
}

/// A partial update for [`ChartOptions`]. `None` keeps the current value; nullable options take an inner
/// `Option` so they can be cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartOptionsPatch {
    pub initial_selection_length: Option<Option<f64>>,
    pub max_bottom_value: Option<Option<f64>>,
    pub min_top_value: Option<Option<f64>>,
    pub details_popup_width: Option<f64>,
    pub details_popup_value_precision: Option<Option<u32>>,
}

impl ChartOptions {
    pub fn apply(&mut self, patch: ChartOptionsPatch) {
        if let Some(value) = patch.initial_selection_length {
            self.initial_selection_length = value;
        }
        if let Some(value) = patch.max_bottom_value {
            self.max_bottom_value = value;
        }
        if let Some(value) = patch.min_top_value {
            self.min_top_value = value;
        }
        if let Some(value) = patch.details_popup_width {
            self.details_popup_width = value;
        }
        if let Some(value) = patch.details_popup_value_precision {
            self.details_popup_value_precision = value;
        }
    }
}

/// Serialized chart configuration, every field optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub min_selection_length: Option<f64>,
    pub max_selection_length: Option<f64>,
    pub initial_selection_length: Option<f64>,
    pub max_bottom_value: Option<f64>,
    pub min_top_value: Option<f64>,
    pub details_popup_width: Option<f64>,
    pub details_popup_value_precision: Option<u32>,
    pub index_name_offset: Option<f64>,
}

impl ChartConfig {
    pub fn from_json(json: &str) -> eyre::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<ChartConfig> for ChartOptions {
    fn from(config: ChartConfig) -> Self {
        let defaults = ChartOptions::default();
        Self {
            min_selection_length: config
                .min_selection_length
                .unwrap_or(defaults.min_selection_length),
            max_selection_length: config
                .max_selection_length
                .unwrap_or(defaults.max_selection_length),
            initial_selection_length: config.initial_selection_length,
            max_bottom_value: config.max_bottom_value,
            min_top_value: config.min_top_value,
            details_popup_width: config
                .details_popup_width
                .unwrap_or(defaults.details_popup_width),
            details_popup_value_precision: config.details_popup_value_precision,
            index_name_offset: config.index_name_offset.unwrap_or(defaults.index_name_offset),
        }
    }
}
