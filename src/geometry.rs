use crate::{
    design::BoundingBox,
    error::{FigstackError, FigstackResult},
};

/// Reference pixel dimensions for one conversion run.
///
/// Every offset and scale computed for a page is normalized against exactly
/// one canvas, taken from the page's main frame when present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> FigstackResult<Self> {
        if width <= 0.0 || height <= 0.0 {
            return Err(FigstackError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Map a source-space bounding box to a normalized destination offset.
    ///
    /// Source space has its origin top-left with Y increasing downward; the
    /// destination is center-origin with Y increasing upward, so the vertical
    /// axis is negated. Both axes are then halved (the destination's [-1, 1]
    /// spans half the normalized source extent), clamped and rounded to three
    /// decimals.
    pub fn offset_of(&self, bbox: &BoundingBox) -> Offset {
        let cx = bbox.x + bbox.width / 2.0;
        let cy = bbox.y + bbox.height / 2.0;

        let x = (cx - self.width / 2.0) / (self.width / 2.0);
        let y = -((cy - self.height / 2.0) / (self.height / 2.0));

        Offset {
            x: round3((x / 2.0).clamp(-1.0, 1.0)),
            y: round3((y / 2.0).clamp(-1.0, 1.0)),
        }
    }

    /// Single isotropic scale factor for a box relative to the canvas: the
    /// arithmetic mean of the two axis ratios. A deliberate approximation of
    /// non-uniform scaling; boxes with zero extent fall back to the canvas
    /// dimension (scale contribution 1.0 on that axis).
    pub fn mean_scale(&self, bbox: &BoundingBox) -> f64 {
        let w = if bbox.width > 0.0 { bbox.width } else { self.width };
        let h = if bbox.height > 0.0 { bbox.height } else { self.height };
        round3((w / self.width + h / self.height) / 2.0)
    }
}

/// Normalized center-origin offset, both axes in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
