//! Input-side model of a Figma design tree.
//!
//! The Figma file API returns a loosely structured document; every field a
//! node may or may not carry is an explicit `Option` or `#[serde(default)]`
//! here, so defaults are applied once at the deserialization boundary rather
//! than scattered through the traversal code.

/// One node of the design document tree.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub fills: Vec<Fill>,
    #[serde(default)]
    pub style: Option<TextStyle>,
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Node kinds the converter understands. Everything else deserializes to
/// `Other` and is ignored by classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Frame,
    Rectangle,
    Vector,
    Text,
    #[serde(other)]
    #[default]
    Other,
}

/// Axis-aligned bounding box in source pixel space (origin top-left, Y down).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Fill {
    #[serde(rename = "type", default)]
    pub kind: FillKind,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillKind {
    Solid,
    Image,
    #[serde(other)]
    #[default]
    Other,
}

/// RGBA color with 0..1 float channels, as the design API encodes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Color {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub a: f64,
}

impl Color {
    /// Lossy conversion to a `#rrggbb` hex string (alpha dropped).
    pub fn to_hex(self) -> String {
        let ch = |v: f64| (v * 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", ch(self.r), ch(self.g), ch(self.b))
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl Node {
    /// Bounding box with missing fields defaulted to zero.
    pub fn bbox(&self) -> BoundingBox {
        self.absolute_bounding_box.unwrap_or_default()
    }

    /// Color of the first solid fill, if any.
    pub fn first_solid_color(&self) -> Option<Color> {
        self.fills
            .first()
            .filter(|f| f.kind == FillKind::Solid)
            .and_then(|f| f.color)
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills.iter().any(|f| f.kind == FillKind::Image)
    }
}
