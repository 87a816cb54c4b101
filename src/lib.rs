//! figstack converts Figma page designs into Shotstack-style render
//! templates.
//!
//! The core transform is pure and synchronous: classify the nodes of a page
//! tree into layers, map their pixel geometry to normalized center-origin
//! offsets, impose a deterministic stacking order, and emit a template
//! document with `{{ NAME }}` merge placeholders for the image slots. The
//! Figma API client is a thin collaborator behind the [`convert::DesignProvider`]
//! and [`convert::ImageResolver`] traits; rendering the final media is an
//! external service's job.

#![forbid(unsafe_code)]

pub mod convert;
pub mod design;
pub mod error;
pub mod figma;
pub mod geometry;
pub mod layer;
pub mod merge;
pub mod order;
pub mod template;
pub mod walk;

pub use convert::{ConvertOpts, Converter, DesignProvider, ImageResolver, PageInfo, PageTemplate};
pub use design::{BoundingBox, Node, NodeKind};
pub use error::{FigstackError, FigstackResult};
pub use figma::FigmaClient;
pub use geometry::{Canvas, Offset};
pub use layer::{Fit, Layer, LayerKind};
pub use merge::MergeField;
pub use order::{FourFramePolicy, StackingPolicy};
pub use template::{Template, Timeline, Track};
