//! gpui_line_chart crate for animated, zoomable line charts in GPUI

pub mod animation_group;
pub mod canvas;
pub mod chart_gestures;
pub mod chart_view;
pub mod controller;
pub mod data_types;
pub mod drawers;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod memoize;
pub mod scales;
pub mod theme;
pub mod transition;
pub mod utils;

pub use chart_view::{ChartInputHandler, ChartView};
pub use controller::{ChartController, ChartHost};
pub use data_types::{ChartConfig, ChartOptions, ChartOptionsPatch, Line, LineSet};
pub use layout::ChartLayout;
pub use theme::{ChartTheme, Color};
