//! Canvas settings and editor configuration.

use kurbo::{Point, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minor grid line spacing, in points.
pub const GRID_MINOR_SPACING: u32 = 10;
/// Major grid line spacing, in points.
pub const GRID_MAJOR_SPACING: u32 = 50;

/// Named page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasPreset {
    #[default]
    A4,
    A3,
    Letter,
    Custom,
}

impl CanvasPreset {
    /// Portrait size in points, or `None` for custom.
    pub fn size(self) -> Option<(u32, u32)> {
        match self {
            CanvasPreset::A4 => Some((595, 842)),
            CanvasPreset::A3 => Some((842, 1191)),
            CanvasPreset::Letter => Some((612, 792)),
            CanvasPreset::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("expected 3 or 6 hex digits: {0}")]
    InvalidLength(String),
    #[error("invalid hex digit in {0}")]
    InvalidDigit(String),
}

/// Opaque RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let digit = |range: &str| {
            u8::from_str_radix(range, 16).map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        match hex.len() {
            // #rgb expands each digit: #fa0 == #ffaa00
            3 => Ok(Rgb::new(
                digit(&hex[0..1])? * 17,
                digit(&hex[1..2])? * 17,
                digit(&hex[2..3])? * 17,
            )),
            6 => Ok(Rgb::new(
                digit(&hex[0..2])?,
                digit(&hex[2..4])?,
                digit(&hex[4..6])?,
            )),
            _ => Err(ColorParseError::InvalidLength(s.to_string())),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Rgb::new(rgba.r, rgba.g, rgba.b)
    }
}

/// Page setup of the composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Width in points.
    pub width: u32,
    /// Height in points.
    pub height: u32,
    pub preset: CanvasPreset,
    pub background: Rgb,
    /// Cosmetic only.
    pub show_grid: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 595,
            height: 842,
            preset: CanvasPreset::A4,
            background: Rgb::WHITE,
            show_grid: false,
        }
    }
}

impl CanvasSettings {
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Switch to a preset. Choosing custom keeps the current size.
    pub fn apply_preset(&mut self, preset: CanvasPreset) {
        if let Some((width, height)) = preset.size() {
            self.width = width;
            self.height = height;
        }
        self.preset = preset;
    }

    /// Set an explicit size; the preset becomes custom.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.preset = CanvasPreset::Custom;
    }

    /// Swap width and height; the preset becomes custom.
    pub fn swap_orientation(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.preset = CanvasPreset::Custom;
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Grid line positions for the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Minor vertical lines (x), excluding major positions.
    pub minor_x: Vec<f64>,
    pub minor_y: Vec<f64>,
    pub major_x: Vec<f64>,
    pub major_y: Vec<f64>,
}

impl GridLines {
    /// Interior grid lines of a canvas; the edges carry no line.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let lines = |extent: u32, spacing: u32, skip_major: bool| -> Vec<f64> {
            (1..)
                .map(|i| i * spacing)
                .take_while(|&pos| pos < extent)
                .filter(|&pos| !skip_major || pos % GRID_MAJOR_SPACING != 0)
                .map(f64::from)
                .collect()
        };
        Self {
            minor_x: lines(width, GRID_MINOR_SPACING, true),
            minor_y: lines(height, GRID_MINOR_SPACING, true),
            major_x: lines(width, GRID_MAJOR_SPACING, false),
            major_y: lines(height, GRID_MAJOR_SPACING, false),
        }
    }
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasSettings,
    /// Space available to show the canvas, CSS pixels.
    pub container: Size,
    /// Screen position of the canvas top-left corner.
    pub canvas_origin: Point,
    pub device_pixel_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSettings::default(),
            container: Size::new(1200.0, 900.0),
            canvas_origin: Point::ZERO,
            device_pixel_ratio: 1.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
