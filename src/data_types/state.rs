/// The `[start_index, end_index]` window of the domain shown on the main chart. Fractional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionRange {
    pub start_index: f64,
    pub end_index: f64,
}

impl SelectionRange {
    pub fn new(start_index: f64, end_index: f64) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn length(&self) -> f64 {
        self.end_index - self.start_index
    }

    pub fn middle(&self) -> f64 {
        (self.start_index + self.end_index) / 2.0
    }
}

/// Where the details popup points to.
///
/// `align` is 0 when the popup sits left of the pointer line and 1 when it sits right of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailsPosition {
    pub index: f64,
    pub align: f64,
}

/// A value range stored as its middle and size, the shape the transitions animate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueRange {
    pub middle: f64,
    pub size: f64,
}

impl ValueRange {
    pub fn from_bounds(min: f64, max: f64) -> Self {
        Self {
            middle: (min + max) / 2.0,
            size: max - min,
        }
    }

    pub fn min(&self) -> f64 {
        self.middle - self.size / 2.0
    }

    pub fn max(&self) -> f64 {
        self.middle + self.size / 2.0
    }
}

/// One frame of interpolated chart state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatedState {
    pub line_opacities: Vec<f64>,
    /// Popup row opacities, one per line.
    pub details_line_opacities: Vec<f64>,
    pub map_value: ValueRange,
    pub main_value: ValueRange,
    pub main_value_notch_scale: f64,
    pub index_notch_scale: f64,
    pub details_position: DetailsPosition,
    pub details_opacity: f64,
}

impl Default for DetailsPosition {
    fn default() -> Self {
        Self {
            index: 0.0,
            align: 0.0,
        }
    }
}

/// Targets computed from the controller state. `None` leaves that animation where it is heading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatedTarget {
    pub line_opacities: Vec<f64>,
    pub details_line_opacities: Vec<f64>,
    pub map_value_middle: Option<f64>,
    pub map_value_size: Option<f64>,
    pub main_value_middle: Option<f64>,
    pub main_value_size: Option<f64>,
    pub main_value_notch_scale: Option<f64>,
    pub index_notch_scale: Option<f64>,
    /// `None` hides the popup at its current position.
    pub details_position: Option<DetailsPosition>,
    pub details_opacity: f64,
}
