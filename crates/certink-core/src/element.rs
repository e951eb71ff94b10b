//! Page elements: positioned text and image content.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical page width in document pixels (A4 at 72dpi).
pub const PAGE_WIDTH: f64 = 595.0;
/// Canonical page height in document pixels (A4 at 72dpi).
pub const PAGE_HEIGHT: f64 = 842.0;

/// Size of the canonical page.
pub fn page_size() -> Size {
    Size::new(PAGE_WIDTH, PAGE_HEIGHT)
}

/// Identifier of an element, unique within a document.
pub type ElementId = String;

/// Kind of content an element holds. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
}

/// Element placement in document space. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Create a geometry, clamping every component to be non-negative.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Check whether a document-space point lies inside the element.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Move the origin, never allowing a negative coordinate.
    pub fn move_to(&mut self, origin: Point) {
        self.x = origin.x.max(0.0);
        self.y = origin.y.max(0.0);
    }

    /// Resize, never allowing a negative extent.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}

/// Font weight values understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Lighter,
}

impl FontWeight {
    /// Style-map value for this weight.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Lighter => "lighter",
        }
    }

    /// Parse a style-map value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "normal" => Some(FontWeight::Normal),
            "bold" => Some(FontWeight::Bold),
            "lighter" => Some(FontWeight::Lighter),
            _ => None,
        }
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            FontWeight::Normal => "Normal",
            FontWeight::Bold => "Bold",
            FontWeight::Lighter => "Lighter",
        }
    }

    /// Get all available font weights.
    pub fn all() -> &'static [FontWeight] {
        &[FontWeight::Normal, FontWeight::Bold, FontWeight::Lighter]
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Style-map value for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }

    /// Parse a style-map value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            TextAlign::Left => "Left",
            TextAlign::Center => "Center",
            TextAlign::Right => "Right",
            TextAlign::Justify => "Justify",
        }
    }

    /// Get all available alignments.
    pub fn all() -> &'static [TextAlign] {
        &[
            TextAlign::Left,
            TextAlign::Center,
            TextAlign::Right,
            TextAlign::Justify,
        ]
    }
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

impl ObjectFit {
    /// Style-map value for this fit.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectFit::Contain => "contain",
            ObjectFit::Cover => "cover",
            ObjectFit::Fill => "fill",
        }
    }

    /// Parse a style-map value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "contain" => Some(ObjectFit::Contain),
            "cover" => Some(ObjectFit::Cover),
            "fill" => Some(ObjectFit::Fill),
            _ => None,
        }
    }
}

/// Open style attribute map.
///
/// A handful of keys are interpreted (see the associated constants); any
/// other key is kept and serialized as-is so newer attributes survive a
/// load/save cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    pub const FONT_SIZE: &'static str = "fontSize";
    pub const FONT_WEIGHT: &'static str = "fontWeight";
    pub const TEXT_ALIGN: &'static str = "textAlign";
    pub const LINE_HEIGHT: &'static str = "lineHeight";
    pub const OBJECT_FIT: &'static str = "objectFit";

    /// Default font size in pixels for text elements.
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;
    /// Default line height multiplier for text elements.
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set one attribute, keeping all others.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Iterate attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw font size value, defaulting to `12px`.
    pub fn font_size(&self) -> &str {
        self.get(Self::FONT_SIZE).unwrap_or("12px")
    }

    /// Font size in pixels. Accepts values like `14`, `14px` or `14.5px`.
    pub fn font_size_px(&self) -> f64 {
        self.get(Self::FONT_SIZE)
            .and_then(leading_number)
            .filter(|size| *size > 0.0)
            .unwrap_or(Self::DEFAULT_FONT_SIZE)
    }

    pub fn font_weight(&self) -> FontWeight {
        self.get(Self::FONT_WEIGHT)
            .and_then(FontWeight::parse)
            .unwrap_or_default()
    }

    pub fn text_align(&self) -> TextAlign {
        self.get(Self::TEXT_ALIGN)
            .and_then(TextAlign::parse)
            .unwrap_or_default()
    }

    /// Line height multiplier relative to the font size.
    pub fn line_height(&self) -> f64 {
        self.get(Self::LINE_HEIGHT)
            .and_then(leading_number)
            .filter(|lh| *lh > 0.0)
            .unwrap_or(Self::DEFAULT_LINE_HEIGHT)
    }

    pub fn object_fit(&self) -> ObjectFit {
        self.get(Self::OBJECT_FIT)
            .and_then(ObjectFit::parse)
            .unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parse the numeric prefix of a CSS-like value (`"14.5px"` -> `14.5`).
fn leading_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// A single positioned, styled unit of content on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    /// Literal text (may contain `\n`) or an image path/URL.
    pub content: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub style: Style,
}

impl Element {
    /// Create a text element.
    pub fn text(id: impl Into<ElementId>, content: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Text,
            content: content.into(),
            geometry,
            style: Style::new(),
        }
    }

    /// Create an image element referencing `source`.
    pub fn image(id: impl Into<ElementId>, source: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Image,
            content: source.into(),
            geometry,
            style: Style::new(),
        }
    }

    /// Set a style attribute (builder style).
    pub fn with_style(mut self, key: &str, value: &str) -> Self {
        self.style.set(key, value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    pub fn is_image(&self) -> bool {
        self.kind == ElementKind::Image
    }
}
