//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom scale.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom scale.
pub const MAX_ZOOM: f64 = 5.0;
/// Fraction of scale change per unit of wheel delta.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Serializable view state exchanged with the host: offset `(x, y)` and scale `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for View {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, k: 1.0 }
    }
}

/// Camera manages the view transform for the editor.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom scale
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Keep world_point under screen_point
        self.offset = screen_point.to_vec2() - world_point.to_vec2() * new_zoom;
    }

    /// Zoom in response to a wheel delta (positive scrolls zoom out).
    pub fn wheel(&mut self, screen_point: Point, delta: f64) {
        self.zoom_at(screen_point, 1.0 - delta * WHEEL_ZOOM_SENSITIVITY);
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit the camera to show the given bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        // A single atom or a straight chain has no area; only scale along the
        // dimensions that have extent.
        let scale_x = if bounds.width() > f64::EPSILON {
            padded_viewport.width / bounds.width()
        } else {
            f64::INFINITY
        };
        let scale_y = if bounds.height() > f64::EPSILON {
            padded_viewport.height / bounds.height()
        } else {
            f64::INFINITY
        };
        let scale = scale_x.min(scale_y);
        self.zoom = if scale.is_finite() { scale } else { 1.0 }.clamp(self.min_zoom, self.max_zoom);

        // Center the bounds in the viewport
        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);

        self.offset = Vec2::new(
            viewport_center.x - bounds_center.x * self.zoom,
            viewport_center.y - bounds_center.y * self.zoom,
        );
    }

    /// Current view state.
    pub fn view(&self) -> View {
        View {
            x: self.offset.x,
            y: self.offset.y,
            k: self.zoom,
        }
    }

    /// Adopt a view state, clamping its scale into the allowed range.
    pub fn set_view(&mut self, view: View) {
        self.offset = Vec2::new(view.x, view.y);
        self.zoom = if view.k.is_finite() {
            view.k.clamp(self.min_zoom, self.max_zoom)
        } else {
            1.0
        };
    }
}
