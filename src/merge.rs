//! Placeholder tokens and merge-variable resolution.
//!
//! Image layers carry `{{ NAME }}` placeholder references until an external
//! substitution (or a resolved-URL overlay) fills them in. Each unresolved
//! placeholder yields one merge-variable entry; duplicate names are emitted
//! as-is, one entry per layer.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::{layer::Layer, template::ClipAsset};

/// One substitution slot in the output document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeField {
    pub find: String,
    pub replace: String,
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder regex"))
}

/// Derive a placeholder token from a node display name: uppercased, spaces
/// replaced with underscores, wrapped in template braces.
pub fn placeholder_token(name: &str) -> String {
    let slug = if name.is_empty() { "BACKGROUND" } else { name };
    format!("{{{{ {} }}}}", slug.to_uppercase().replace(' ', "_"))
}

/// Extract the variable name from a `{{ NAME }}` reference, if present.
pub fn extract_placeholder(src: &str) -> Option<String> {
    placeholder_re()
        .captures(src)
        .map(|c| c[1].to_string())
}

/// Overlay resolved image URLs onto the layers and collect merge variables
/// for every placeholder left unresolved.
///
/// A layer whose fetch-target id maps to a URL gets its asset reference
/// rewritten in place and contributes no merge entry. Missing ids leave the
/// placeholder intact; this never fails.
pub fn resolve_layers(layers: &mut [Layer], resolved: &HashMap<String, String>) -> Vec<MergeField> {
    let mut merge = Vec::new();

    for layer in layers.iter_mut() {
        if let ClipAsset::Image { src } = &mut layer.asset {
            if let Some(url) = layer
                .source_node_id
                .as_ref()
                .and_then(|id| resolved.get(id))
            {
                tracing::debug!(node_id = ?layer.source_node_id, "using resolved image url");
                *src = url.clone();
                continue;
            }

            if let Some(name) = extract_placeholder(src) {
                merge.push(MergeField {
                    find: name,
                    replace: String::new(),
                });
            }
        }
    }

    merge
}
