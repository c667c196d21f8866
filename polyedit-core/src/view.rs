use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

/// Scale change per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Smallest scale zooming out can reach.
pub const MIN_SCALE: f64 = 0.1;

/// View state persisted alongside the polygon: the container scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct View {
    pub scale: R2<f64>,
}

impl Default for View {
    fn default() -> Self {
        View { scale: R2::new(1., 1.) }
    }
}

impl View {
    /// Apply one wheel event. Scrolling down (`delta_y > 0`) zooms out.
    pub fn zoom(&mut self, delta_y: f64) {
        let step = if delta_y > 0. { -ZOOM_STEP } else { ZOOM_STEP };
        self.scale = R2::new(
            (self.scale.x + step).max(MIN_SCALE),
            (self.scale.y + step).max(MIN_SCALE),
        );
    }
}
