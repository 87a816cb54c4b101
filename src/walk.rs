//! Depth-first traversal of a design tree into a flat layer list.

use crate::{
    design::{Node, NodeKind},
    geometry::Canvas,
    layer::{self, Fit, Layer, LayerKind},
    merge::placeholder_token,
    template::ClipAsset,
};

/// A composite frame wider than 1.5x its height and smaller than this on its
/// longest side is treated as a logo slot and rendered with `contain`.
const SMALL_LANDSCAPE_MAX_PX: f64 = 400.0;

/// Walk a page's main frame, skipping the frame itself so it does not become
/// its own layer.
pub fn walk_children(node: &Node, canvas: &Canvas) -> Vec<Layer> {
    node.children
        .iter()
        .flat_map(|child| walk(child, canvas))
        .collect()
}

/// Walk one node, returning the layers its subtree produces in traversal
/// order.
///
/// A frame with at least one Rectangle or Vector child collapses into a
/// single composite layer: the frame supplies geometry, name and placeholder,
/// the first matching child supplies the pixel-fetch target. The walk does
/// not descend past such a frame.
pub fn walk(node: &Node, canvas: &Canvas) -> Vec<Layer> {
    if node.kind == NodeKind::Frame && !node.children.is_empty() {
        if let Some(composite) = composite_frame_layer(node, canvas) {
            return vec![composite];
        }
        return walk_children(node, canvas);
    }

    if let Some(layer) = layer::classify(node, canvas) {
        return vec![layer];
    }

    node.children
        .iter()
        .flat_map(|child| walk(child, canvas))
        .collect()
}

fn composite_frame_layer(frame: &Node, canvas: &Canvas) -> Option<Layer> {
    let image_child = frame
        .children
        .iter()
        .find(|c| matches!(c.kind, NodeKind::Rectangle | NodeKind::Vector))?;

    let bbox = frame.bbox();
    let is_landscape = bbox.width > bbox.height * 1.5;
    let is_small = bbox.width.max(bbox.height) < SMALL_LANDSCAPE_MAX_PX;

    Some(Layer {
        kind: LayerKind::Image,
        asset: ClipAsset::Image {
            src: placeholder_token(&frame.name),
        },
        offset: Some(canvas.offset_of(&bbox)),
        fit: if is_landscape && is_small {
            Fit::Contain
        } else {
            Fit::Crop
        },
        scale: canvas.mean_scale(&bbox),
        source_node_id: Some(image_child.id.clone()),
        source_node_name: Some(frame.name.clone()),
    })
}

/// Collect the ids of nodes whose rendered pixels may be fetched from the
/// design API, in traversal order. `skip_self` leaves out the root (used for
/// a page's main frame).
pub fn collect_render_node_ids(node: &Node, skip_self: bool) -> Vec<String> {
    let mut ids = Vec::new();
    if !skip_self
        && matches!(
            node.kind,
            NodeKind::Frame | NodeKind::Rectangle | NodeKind::Vector
        )
    {
        ids.push(node.id.clone());
    }
    for child in &node.children {
        ids.extend(collect_render_node_ids(child, false));
    }
    ids
}
