//! Output-side model: the Shotstack-shaped template document.
//!
//! A template is a timeline of single-clip tracks plus an output block. Track
//! order is render order; the assembler emits lower stacking ranks first.

use crate::{
    geometry::Offset,
    layer::{Fit, Layer},
    merge::MergeField,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Template {
    pub timeline: Timeline,
    pub output: Output,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge: Vec<MergeField>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub background: String,
    pub tracks: Vec<Track>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub clips: Vec<Clip>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    pub asset: ClipAsset,
    pub start: f64,
    pub length: f64,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
    pub fit: Fit,
    pub scale: f64,
}

/// Fixed anchor for all clips; offsets are relative to the canvas center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Center,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClipAsset {
    Html {
        width: u32,
        height: u32,
        html: String,
        css: String,
    },
    Image {
        src: String,
    },
}

impl ClipAsset {
    /// Image source reference, when this asset is an image.
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Image { src } => Some(src),
            Self::Html { .. } => None,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Output {
    pub format: String,
    pub size: OutputSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

/// Output-mode-dependent knobs for the assembler.
#[derive(Clone, Copy, Debug)]
pub struct AssembleOpts {
    pub output_width: u32,
    pub output_height: u32,
    /// Clip length in seconds; forced to 1.0 in image-only mode.
    pub duration: f64,
    /// Still-image output: no fps field, minimal clip length.
    pub image_only: bool,
}

/// Wrap ordered, resolved layers into the final template document.
pub fn assemble(layers: Vec<Layer>, merge: Vec<MergeField>, opts: &AssembleOpts) -> Template {
    let length = if opts.image_only { 1.0 } else { opts.duration };

    let tracks = layers
        .into_iter()
        .map(|layer| Track {
            clips: vec![Clip {
                asset: layer.asset,
                start: 0.0,
                length,
                position: Position::Center,
                offset: layer.offset,
                fit: layer.fit,
                scale: layer.scale,
            }],
        })
        .collect();

    Template {
        timeline: Timeline {
            background: "#ffffff".to_string(),
            tracks,
        },
        output: Output {
            format: "png".to_string(),
            size: OutputSize {
                width: opts.output_width,
                height: opts.output_height,
            },
            fps: if opts.image_only { None } else { Some(25) },
        },
        merge,
    }
}
