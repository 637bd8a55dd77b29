//! Grid line placement for the pannable, zoomable background grid.
//!
//! The grid is infinite in world space; only the lines that intersect the
//! window are produced. Placement starts one step before the left/top edge
//! using a floored modulo of the camera offset, so the first line is always at
//! or before the edge whatever the sign of the pan.
//!
//! `grid_lines` is recomputed on every draw and keeps no cursor state: the
//! returned iterators are `Clone`, so a caller can walk them more than once.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::{Camera, Point};

/// Errors from grid placement.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GridError {
    /// `tile_size * zoom` is not a positive finite number, so lines would never advance.
    #[error("grid step must be positive (tile_size={tile_size}, zoom={zoom})")]
    NonPositiveStep { tile_size: f64, zoom: f64 },
}

/// Lazily generated screen offsets of parallel grid lines along one axis.
#[derive(Debug, Clone)]
pub struct LineOffsets {
    start: f64,
    step: f64,
    end: f64,
    index: f64,
}

impl LineOffsets {
    fn new(pan: f64, step: f64, end: f64) -> Self {
        Self { start: pan.rem_euclid(step) - step, step, end, index: 0.0 }
    }

}

impl Iterator for LineOffsets {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let offset = self.start + self.index * self.step;
        if offset < self.end {
            self.index += 1.0;
            Some(offset)
        } else {
            None
        }
    }
}

/// A screen-space line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

/// Vertical and horizontal line placement for one frame.
#[derive(Debug, Clone)]
pub struct GridLines {
    /// On-screen spacing between adjacent lines (`tile_size * zoom`).
    pub step: f64,
    /// Screen x of each vertical line.
    pub vertical: LineOffsets,
    /// Screen y of each horizontal line.
    pub horizontal: LineOffsets,
    width: f64,
    height: f64,
}

impl GridLines {
    /// Full-window segments: every vertical line, then every horizontal line.
    ///
    /// Offsets are truncated to whole pixels the way the lines are rasterized.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.vertical_segments().chain(self.horizontal_segments())
    }

    /// Top-to-bottom segments, one per vertical line.
    pub fn vertical_segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let height = self.height;
        self.vertical.clone().map(move |x| {
            let x = x.trunc();
            LineSegment { from: Point::new(x, 0.0), to: Point::new(x, height) }
        })
    }

    /// Left-to-right segments, one per horizontal line.
    pub fn horizontal_segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let width = self.width;
        self.horizontal.clone().map(move |y| {
            let y = y.trunc();
            LineSegment { from: Point::new(0.0, y), to: Point::new(width, y) }
        })
    }
}

/// Place the grid lines visible in a `window_width` x `window_height` window.
///
/// # Errors
///
/// Returns [`GridError::NonPositiveStep`] when `tile_size * camera.zoom` is
/// zero, negative, or not finite.
pub fn grid_lines(camera: &Camera, window_width: f64, window_height: f64, tile_size: f64) -> Result<GridLines, GridError> {
    let step = tile_size * camera.zoom;
    if !step.is_finite() || step <= 0.0 {
        return Err(GridError::NonPositiveStep { tile_size, zoom: camera.zoom });
    }

    Ok(GridLines {
        step,
        vertical: LineOffsets::new(camera.x, step, window_width),
        horizontal: LineOffsets::new(camera.y, step, window_height),
        width: window_width,
        height: window_height,
    })
}

impl Camera {
    /// Grid placement for this camera; see [`grid_lines`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NonPositiveStep`] for a degenerate tile size.
    pub fn grid_lines(&self, window_width: f64, window_height: f64, tile_size: f64) -> Result<GridLines, GridError> {
        grid_lines(self, window_width, window_height, tile_size)
    }
}
