//! Per-node classification into renderable layers.

use crate::{
    design::{Node, NodeKind},
    geometry::{Canvas, Offset},
    merge::placeholder_token,
    template::ClipAsset,
};

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_TEXT_WIDTH: u32 = 200;
pub const DEFAULT_TEXT_HEIGHT: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Text,
    Image,
    Frame,
}

/// How an image asset is scaled to its layer bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Place at natural scale, no fitting.
    #[default]
    None,
    /// Fill the bounds, center-cropping overflow.
    Crop,
    /// Show the full image, letterboxing if needed.
    Contain,
}

/// One classified, renderable unit destined for a single output track.
#[derive(Clone, Debug)]
pub struct Layer {
    pub kind: LayerKind,
    pub asset: ClipAsset,
    pub offset: Option<Offset>,
    pub fit: Fit,
    pub scale: f64,
    /// Node whose rendered pixels should be fetched for this layer. For
    /// composite frames this is a child shape, not the node that supplied
    /// the geometry.
    pub source_node_id: Option<String>,
    /// Display name used by the stacking policy.
    pub source_node_name: Option<String>,
}

/// Classify a single node into a layer, if it produces one.
///
/// Frames with children are not handled here; the walker owns the
/// composite-frame rule and recursion.
pub fn classify(node: &Node, canvas: &Canvas) -> Option<Layer> {
    match node.kind {
        NodeKind::Text => Some(text_layer(node, canvas)),
        NodeKind::Rectangle if !node.fills.is_empty() => Some(image_layer(node, canvas)),
        NodeKind::Rectangle => None,
        NodeKind::Vector => Some(frame_layer(node, canvas)),
        NodeKind::Frame if node.children.is_empty() => Some(frame_layer(node, canvas)),
        NodeKind::Frame | NodeKind::Other => None,
    }
}

fn text_layer(node: &Node, canvas: &Canvas) -> Layer {
    let bbox = node.bbox();
    let text = node.characters.as_deref().unwrap_or("Text");

    let (family, size) = node
        .style
        .as_ref()
        .map(|s| {
            (
                s.font_family.clone(),
                s.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            )
        })
        .unwrap_or((None, DEFAULT_FONT_SIZE));
    let family = family.unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());

    let color = node
        .first_solid_color()
        .map(|c| c.to_hex())
        .unwrap_or_else(|| "#000000".to_string());

    let width = if bbox.width > 0.0 {
        bbox.width as u32
    } else {
        DEFAULT_TEXT_WIDTH
    };
    let height = if bbox.height > 0.0 {
        bbox.height as u32
    } else {
        DEFAULT_TEXT_HEIGHT
    };

    Layer {
        kind: LayerKind::Text,
        asset: ClipAsset::Html {
            width,
            height,
            html: format!("<p data-html-type=\"text\">{text}</p>"),
            css: format!(
                "p {{ color: {color}; font-size: {}px; font-family: '{family}'; text-align: left; }}",
                size as i64
            ),
        },
        offset: Some(canvas.offset_of(&bbox)),
        fit: Fit::None,
        scale: 1.0,
        source_node_id: None,
        source_node_name: None,
    }
}

fn image_layer(node: &Node, canvas: &Canvas) -> Layer {
    Layer {
        kind: LayerKind::Image,
        asset: ClipAsset::Image {
            src: "{{ IMAGE_PLACEHOLDER }}".to_string(),
        },
        offset: Some(canvas.offset_of(&node.bbox())),
        fit: Fit::Crop,
        scale: 1.0,
        source_node_id: Some(node.id.clone()),
        source_node_name: Some(node.name.clone()),
    }
}

/// Background/decorative shape rendered from the node's own pixels, scaled
/// by the mean of its axis ratios against the canvas.
fn frame_layer(node: &Node, canvas: &Canvas) -> Layer {
    let bbox = node.bbox();
    Layer {
        kind: LayerKind::Frame,
        asset: ClipAsset::Image {
            src: placeholder_token(&node.name),
        },
        offset: Some(canvas.offset_of(&bbox)),
        fit: Fit::Crop,
        scale: canvas.mean_scale(&bbox),
        source_node_id: Some(node.id.clone()),
        source_node_name: Some(node.name.clone()),
    }
}
