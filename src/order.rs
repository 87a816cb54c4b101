//! Deterministic stacking order for classified layers.
//!
//! The default policy encodes a 4-frame template convention by substring
//! matching on layer names. It lives behind a trait so template families with
//! different conventions can supply their own ranking.

use crate::layer::Layer;

/// Rank assigned to layers no policy rule matches; such layers sort last in
/// their original traversal order.
pub const UNRANKED: u32 = 10;

/// Maps a layer to a stacking rank. Lower ranks are emitted first in the
/// output track list.
pub trait StackingPolicy {
    fn rank(&self, layer: &Layer) -> u32;
}

/// Name-based policy for the 4-frame template family: logo front-most, then
/// background, then the numbered middle slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct FourFramePolicy;

impl StackingPolicy for FourFramePolicy {
    fn rank(&self, layer: &Layer) -> u32 {
        let name = layer
            .source_node_name
            .as_deref()
            .unwrap_or("")
            .to_lowercase();

        if name.contains("frame 4") || name.contains("logo") {
            0
        } else if name.contains("frame 1") || name.contains("background") {
            1
        } else if name.contains("frame 2") {
            2
        } else if name.contains("frame 3") {
            3
        } else {
            UNRANKED
        }
    }
}

/// Stable sort: equal ranks keep their traversal order.
pub fn sort_layers(layers: &mut [Layer], policy: &dyn StackingPolicy) {
    layers.sort_by_key(|layer| policy.rank(layer));
}
