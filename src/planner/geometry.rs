//! Aspect-preserving scale and pad computation

use tracing::debug;

use crate::domain::model::{FrameBox, TargetGeometry};
use crate::error::{WebvidError, WebvidResult};

/// Fits a source frame inside the target box and pads the remainder
#[derive(Debug, Clone, Copy)]
pub struct GeometryPlanner {
    frame: FrameBox,
}

impl GeometryPlanner {
    /// Create a planner for the given bounding box
    pub fn new(frame: FrameBox) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> FrameBox {
        self.frame
    }

    /// Plan the output geometry for a `width` x `height` source.
    ///
    /// The scale factor is `min(W / w, H / h)`, so the content always fits
    /// the box entirely. Each scaled dimension is rounded, then rounded down to
    /// an even number. Padding splits the remainder with the odd pixel going
    /// to the right or bottom.
    pub fn plan(&self, width: u32, height: u32) -> WebvidResult<TargetGeometry> {
        let FrameBox {
            width: box_width,
            height: box_height,
        } = self.frame;

        if width == 0 || height == 0 || box_width < 2 || box_height < 2 {
            return Err(WebvidError::InvalidGeometry {
                width,
                height,
                box_width,
                box_height,
            });
        }

        let scale = f64::min(
            box_width as f64 / width as f64,
            box_height as f64 / height as f64,
        );
        let out_width = fit_dimension(width as f64 * scale, box_width);
        let out_height = fit_dimension(height as f64 * scale, box_height);

        let pad_left = (box_width - out_width) / 2;
        let pad_top = (box_height - out_height) / 2;
        let geometry = TargetGeometry {
            out_width,
            out_height,
            pad_left,
            pad_top,
            pad_right: box_width - out_width - pad_left,
            pad_bottom: box_height - out_height - pad_top,
        };

        debug!(
            "Planned geometry for {}x{} in {}: {:?}",
            width, height, self.frame, geometry
        );
        Ok(geometry)
    }
}

/// Round, bound by the box, force even, never below 2
fn fit_dimension(scaled: f64, bound: u32) -> u32 {
    let rounded = (scaled.round() as u32).min(bound);
    (rounded & !1).max(2)
}
