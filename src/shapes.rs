//! Rounded rectangle geometry and the hard-edged fills used by the icon renderer.
//!
//! Bounds are inclusive pixel coordinates, so `(0, 0)..=(9, 9)` covers a
//! 10x10 block. Coverage is decided at pixel centres without anti-aliasing.

use anyhow::Result;
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};

/// An axis-aligned rectangle with circular corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundedRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub radius: i32,
}

impl RoundedRect {
    /// Creates a rounded rectangle from inclusive corner coordinates.
    ///
    /// Fails for inverted bounds or a negative radius. A radius larger than
    /// half the shorter side is clamped so the corners meet instead of overlapping.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32, radius: i32) -> Result<Self> {
        if x1 < x0 || y1 < y0 {
            anyhow::bail!("Invalid rectangle ({x0}, {y0})..=({x1}, {y1})");
        }
        if radius < 0 {
            anyhow::bail!("Corner radius must not be negative, got {radius}");
        }

        let max_radius = (x1 - x0 + 1).min(y1 - y0 + 1) / 2;
        Ok(Self {
            x0,
            y0,
            x1,
            y1,
            radius: radius.min(max_radius),
        })
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    /// Whether the centre of pixel `(x, y)` lies inside the shape
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let left = self.x0 as f64;
        let top = self.y0 as f64;
        let right = (self.x1 + 1) as f64;
        let bottom = (self.y1 + 1) as f64;

        let cx = x as f64 + 0.5;
        let cy = y as f64 + 0.5;
        if cx < left || cx > right || cy < top || cy > bottom {
            return false;
        }

        // Distance to the nearest point of the shrunken core rectangle
        let r = self.radius as f64;
        let nx = cx.clamp(left + r, right - r);
        let ny = cy.clamp(top + r, bottom - r);
        let dx = cx - nx;
        let dy = cy - ny;
        dx * dx + dy * dy <= r * r
    }

    /// The shape inset by `width` pixels on every side, or `None` once nothing is left
    pub fn inset(&self, width: i32) -> Option<Self> {
        RoundedRect::new(
            self.x0 + width,
            self.y0 + width,
            self.x1 - width,
            self.y1 - width,
            (self.radius - width).max(0),
        )
        .ok()
    }

    /// Pixel bounds clipped to a `width` x `height` canvas, as half-open ranges
    fn clipped_bounds(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x_start = self.x0.max(0);
        let y_start = self.y0.max(0);
        let x_end = (self.x1 + 1).min(width as i32);
        let y_end = (self.y1 + 1).min(height as i32);

        if x_start >= x_end || y_start >= y_end {
            return None;
        }
        Some((x_start as u32, y_start as u32, x_end as u32, y_end as u32))
    }
}

/// Fill the shape on `canvas`, blending `color` source-over
pub fn fill_rounded_rect(canvas: &mut RgbaImage, rect: &RoundedRect, color: Rgba<u8>) {
    let Some((x_start, y_start, x_end, y_end)) = rect.clipped_bounds(canvas.width(), canvas.height())
    else {
        return;
    };

    for y in y_start..y_end {
        for x in x_start..x_end {
            if rect.contains(x as i32, y as i32) {
                canvas.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

/// Draw a `width` pixel outline along the inside edge of the shape
pub fn stroke_rounded_rect(canvas: &mut RgbaImage, rect: &RoundedRect, width: i32, color: Rgba<u8>) {
    let Some((x_start, y_start, x_end, y_end)) = rect.clipped_bounds(canvas.width(), canvas.height())
    else {
        return;
    };
    let hole = rect.inset(width);

    for y in y_start..y_end {
        for x in x_start..x_end {
            let (px, py) = (x as i32, y as i32);
            let in_hole = hole.map_or(false, |hole| hole.contains(px, py));
            if rect.contains(px, py) && !in_hole {
                canvas.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

/// A single-channel mask of a `size` x `size` rounded square: 255 inside, 0 outside
pub fn rounded_mask(size: u32, radius: u32) -> Result<GrayImage> {
    let last = size as i32 - 1;
    let shape = RoundedRect::new(0, 0, last, last, radius as i32)?;

    Ok(GrayImage::from_fn(size, size, |x, y| {
        if shape.contains(x as i32, y as i32) {
            Luma([255])
        } else {
            Luma([0])
        }
    }))
}
