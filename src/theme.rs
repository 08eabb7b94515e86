use eyre::{bail, eyre};
use gpui::{Hsla, Rgba};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color, `0xRRGGBB`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub fn r(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub fn to_rgba(&self, opacity: f32) -> Rgba {
        Rgba {
            r: self.r() as f32 / 255.0,
            g: self.g() as f32 / 255.0,
            b: self.b() as f32 / 255.0,
            a: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn to_hsla(&self, opacity: f32) -> Hsla {
        Hsla::from(self.to_rgba(opacity))
    }

    /// CSS notation, `rgba(18,52,86,0.5)`.
    pub fn to_css(&self, opacity: f64) -> String {
        format!("rgba({},{},{},{})", self.r(), self.g(), self.b(), opacity)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xffffff)
    }
}

impl FromStr for Color {
    type Err = eyre::Report;

    /// Accepts `#rrggbb`, `#rgb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`. The alpha is dropped.
    fn from_str(s: &str) -> eyre::Result<Self> {
        parse_color(s).map(|(color, _)| color)
    }
}

/// Parses a CSS-like color string into the color and its opacity.
pub fn parse_color(s: &str) -> eyre::Result<(Color, f64)> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let value = u32::from_str_radix(hex, 16).map_err(|e| eyre!("invalid hex color {s:?}: {e}"))?;
        return match hex.len() {
            6 => Ok((Color(value), 1.0)),
            3 => {
                let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
                Ok((Color((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11), 1.0))
            }
            _ => bail!("invalid hex color {s:?}"),
        };
    }

    let lower = s.to_ascii_lowercase();
    let body = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| eyre!("unsupported color {s:?}"))?;

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        bail!("unsupported color {s:?}");
    }
    let mut channels = [0u32; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        let value: u32 = part.parse().map_err(|e| eyre!("invalid color channel {part:?}: {e}"))?;
        if value > 255 {
            bail!("color channel {value} out of range");
        }
        *channel = value;
    }
    let opacity = match parts.get(3) {
        Some(alpha) => alpha.parse::<f64>().map_err(|e| eyre!("invalid alpha {alpha:?}: {e}"))?,
        None => 1.0,
    };
    Ok((Color(channels[0] << 16 | channels[1] << 8 | channels[2]), opacity))
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value & 0xffffff)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(Color::from(value)),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Line colors handed out to series in order.
pub const PALETTE: [Color; 12] = [
    Color(0x699ace),
    Color(0xdf8244),
    Color(0xa5a5a5),
    Color(0xf6c143),
    Color(0x4d74bf),
    Color(0x7ea954),
    Color(0x335e8d),
    Color(0x944c20),
    Color(0x636365),
    Color(0x947424),
    Color(0x2a4287),
    Color(0x4b6633),
];

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Plot area layout, in logical pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    pub side_padding: f64,
    pub main_top_margin: f64,
    pub main_fade_height: f64,
    pub main_lines_top_margin: f64,
    pub main_lines_bottom_margin: f64,
    pub main_line_width: f64,
    pub line_pointer_radius: f64,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            side_padding: 12.0,
            main_top_margin: 0.0,
            main_fade_height: 16.0,
            main_lines_top_margin: 18.0,
            main_lines_bottom_margin: 35.0,
            main_line_width: 2.0,
            line_pointer_radius: 4.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub height: f64,
    pub bottom: f64,
    pub corner_radius: f64,
    pub line_width: f64,
    pub lines_horizontal_margin: f64,
    pub lines_vertical_margin: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            height: 40.0,
            bottom: 1.0,
            corner_radius: 5.0,
            line_width: 1.0,
            lines_horizontal_margin: 1.0,
            lines_vertical_margin: 4.0 / 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorStyle {
    pub outside_color: Color,
    pub outside_opacity: f64,
    pub border_color: Color,
    pub border_corner_radius: f64,
    pub vertical_padding: f64,
    pub grip_width: f64,
    pub notch_color: Color,
    pub notch_width: f64,
    pub notch_height: f64,
    pub notch_corner_radius: f64,
}

impl Default for SelectorStyle {
    fn default() -> Self {
        Self {
            outside_color: Color(0xe2eef9),
            outside_opacity: 0.6,
            border_color: Color(0xc0d1e1),
            border_corner_radius: 6.0,
            vertical_padding: -1.0,
            grip_width: 10.0,
            notch_color: Color::WHITE,
            notch_width: 2.0,
            notch_height: 10.0,
            notch_corner_radius: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleStyle {
    pub line_color: Color,
    pub line_opacity: f64,
    pub line_width: f64,
    pub label_color: Color,
    pub label_font_size: f64,
    pub index_label_margin: f64,
    pub value_label_margin: f64,
    pub min_space_for_notch: f64,
    pub max_value_notch_count: f64,
}

impl Default for ScaleStyle {
    fn default() -> Self {
        Self {
            line_color: Color(0x182d3b),
            line_opacity: 0.1,
            line_width: 1.0,
            label_color: Color(0x8e8e93),
            label_font_size: 11.0,
            index_label_margin: 8.0,
            value_label_margin: 4.0,
            min_space_for_notch: 70.0,
            max_value_notch_count: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupStyle {
    pub x_margin: f64,
    pub min_distance_to_edge: f64,
    pub y: f64,
    pub side_padding: f64,
    pub corner_radius: f64,
    pub header_prefix: String,
    pub header_font_size: f64,
    pub header_font_weight: FontWeight,
    pub header_baseline_y: f64,
    pub first_row_baseline_y: f64,
    pub row_height: f64,
    pub bottom_padding: f64,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub value_font_weight: FontWeight,
    pub background_color: Color,
    pub shadow_color: Color,
    pub shadow_opacity: f64,
    pub shadow_x_offset: f64,
    pub shadow_y_offset: f64,
    pub shadow_blur: f64,
    pub missing_value_text: String,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            x_margin: 22.0,
            min_distance_to_edge: 5.0,
            y: 53.0,
            side_padding: 12.0,
            corner_radius: 10.0,
            header_prefix: "Sample #".to_string(),
            header_font_size: 13.0,
            header_font_weight: FontWeight::Bold,
            header_baseline_y: 20.0,
            first_row_baseline_y: 41.0,
            row_height: 21.0,
            bottom_padding: 13.0,
            font_size: 13.0,
            font_weight: FontWeight::Regular,
            value_font_weight: FontWeight::Regular,
            background_color: Color::WHITE,
            shadow_color: Color::BLACK,
            shadow_opacity: 0.2,
            shadow_x_offset: 0.0,
            shadow_y_offset: 1.0,
            shadow_blur: 3.0,
            missing_value_text: "-".to_string(),
        }
    }
}

/// Everything the drawers need to know about the look of a chart.
///
/// Built once by the host and handed to the chart as an immutable value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub font_family: String,
    pub text_color: Color,
    pub background_color: Color,
    pub layout: LayoutStyle,
    pub map: MapStyle,
    pub selector: SelectorStyle,
    pub scale: ScaleStyle,
    pub popup: PopupStyle,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font_family: ".SystemUIFont".to_string(),
            text_color: Color(0x222222),
            background_color: Color::WHITE,
            layout: LayoutStyle::default(),
            map: MapStyle::default(),
            selector: SelectorStyle::default(),
            scale: ScaleStyle::default(),
            popup: PopupStyle::default(),
        }
    }
}

impl ChartTheme {
    /// Rejects themes the drawers cannot render with.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.font_family.trim().is_empty() {
            bail!("theme font family is empty");
        }

        let positive = [
            ("map.height", self.map.height),
            ("scale.label_font_size", self.scale.label_font_size),
            ("scale.min_space_for_notch", self.scale.min_space_for_notch),
            ("scale.max_value_notch_count", self.scale.max_value_notch_count),
            ("popup.font_size", self.popup.font_size),
            ("popup.header_font_size", self.popup.header_font_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                bail!("theme metric {name} must be positive, got {value}");
            }
        }

        let finite = [
            ("layout.side_padding", self.layout.side_padding),
            ("layout.main_top_margin", self.layout.main_top_margin),
            ("layout.main_lines_top_margin", self.layout.main_lines_top_margin),
            ("layout.main_lines_bottom_margin", self.layout.main_lines_bottom_margin),
            ("selector.vertical_padding", self.selector.vertical_padding),
            ("popup.shadow_blur", self.popup.shadow_blur),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                bail!("theme metric {name} must be finite, got {value}");
            }
        }
        Ok(())
    }
}
