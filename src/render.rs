//! Procedural rendering of the clipboard app icon.
//!
//! The icon is a rounded square filled with a diagonal gradient, carrying a
//! white clipboard card with a clip on top and three coloured content bars.
//! Every measurement is a fixed fraction of the canvas size so the glyph keeps
//! its proportions from 16px up to 1024px.

use crate::shapes::{fill_rounded_rect, rounded_mask, stroke_rounded_rect, RoundedRect};
use anyhow::{Context, Result};
use image::{imageops, Rgba, RgbaImage};

/// Smallest canvas that gets the inner glow outline
pub const INNER_GLOW_MIN_SIZE: u32 = 24;

const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 60]);
const BODY_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CLIP_COLOR: Rgba<u8> = Rgba([240, 244, 248, 255]);
const CLIP_HIGHLIGHT_COLOR: Rgba<u8> = Rgba([218, 226, 234, 255]);
const GLOW_COLOR: Rgba<u8> = Rgba([255, 255, 255, 100]);
const GLOW_WIDTH: i32 = 2;

/// Accent bar colours, top to bottom: blue, green, orange
pub const ACCENT_COLORS: [Rgba<u8>; 3] = [
    Rgba([54, 197, 234, 200]),
    Rgba([54, 211, 153, 190]),
    Rgba([245, 158, 11, 190]),
];

/// Vertical position of each accent bar as a fraction of the body height
const ACCENT_OFFSETS: [f64; 3] = [0.28, 0.52, 0.76];

/// Colours of the background card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle {
    pub start: Rgba<u8>,
    pub end: Rgba<u8>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            start: Rgba([28, 99, 234, 255]),
            end: Rgba([20, 184, 166, 255]),
        }
    }
}

/// `size * ratio` truncated toward zero
fn scaled(size: i32, ratio: f64) -> i32 {
    (size as f64 * ratio) as i32
}

/// Linear interpolation between two colours, truncating each channel
pub fn lerp_color(start: Rgba<u8>, end: Rgba<u8>, t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for (channel, value) in out.iter_mut().enumerate() {
        *value = (start[channel] as f64 * (1.0 - t) + end[channel] as f64 * t) as u8;
    }
    Rgba(out)
}

/// Render a `size` x `size` diagonal gradient clipped to a rounded square.
///
/// The gradient runs from `start` in the top-left corner to `end` in the
/// bottom-right corner. The rounded-square mask replaces the alpha channel.
pub fn draw_linear_gradient_rounded(
    size: u32,
    radius: u32,
    start: Rgba<u8>,
    end: Rgba<u8>,
) -> Result<RgbaImage> {
    if size == 0 {
        anyhow::bail!("Icon size must be positive");
    }

    let span = 2 * (size as u64 - 1);
    let mut background = RgbaImage::from_fn(size, size, |x, y| {
        let t = if span == 0 {
            0.0
        } else {
            (x as u64 + y as u64) as f64 / span as f64
        };
        lerp_color(start, end, t)
    });

    let mask = rounded_mask(size, radius).context("Failed to build background mask")?;
    for (pixel, coverage) in background.pixels_mut().zip(mask.pixels()) {
        pixel[3] = coverage[0];
    }

    Ok(background)
}

/// Geometry of every clipboard element for one canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardLayout {
    pub size: u32,
    pub body: RoundedRect,
    pub clip: RoundedRect,
    pub clip_highlight: RoundedRect,
    /// `None` below the inner glow threshold
    pub inner_glow: Option<RoundedRect>,
    pub accent_bars: [RoundedRect; 3],
    pub shadow_sigma: f32,
}

impl ClipboardLayout {
    pub fn for_size(size: u32) -> Result<Self> {
        if size == 0 {
            anyhow::bail!("Icon size must be positive");
        }
        let s = size as i32;

        let body_w = scaled(s, 0.56).max(4);
        let body_h = scaled(s, 0.62).max(4);
        let body_x = (s - body_w).div_euclid(2);
        let body_y = scaled(s, 0.21);
        let body_r = scaled(s, 0.04).max(2);
        let body = RoundedRect::new(body_x, body_y, body_x + body_w, body_y + body_h, body_r)
            .context("Invalid clipboard body")?;

        let clip_w = scaled(s, 0.28);
        let clip_h = scaled(s, 0.065);
        let clip_x = (s - clip_w).div_euclid(2);
        let clip_y = body_y - scaled(s, 0.035);
        let clip_r = scaled(clip_h, 0.45).max(2);
        let clip = RoundedRect::new(clip_x, clip_y, clip_x + clip_w, clip_y + clip_h, clip_r)
            .context("Invalid clipboard clip")?;

        let inner_w = scaled(clip_w, 0.68);
        let inner_h = scaled(clip_h, 0.44).max(2);
        let inner_x = clip_x + (clip_w - inner_w).div_euclid(2);
        let inner_y = clip_y + (clip_h - inner_h).div_euclid(2);
        let clip_highlight = RoundedRect::new(
            inner_x,
            inner_y,
            inner_x + inner_w,
            inner_y + inner_h,
            (inner_h / 2).max(1),
        )
        .context("Invalid clip highlight")?;

        let inner_glow = if body_w > 6 && body_h > 6 && size >= INNER_GLOW_MIN_SIZE {
            Some(
                RoundedRect::new(
                    body_x + GLOW_WIDTH,
                    body_y + GLOW_WIDTH,
                    body_x + body_w - GLOW_WIDTH,
                    body_y + body_h - GLOW_WIDTH,
                    (body_r - GLOW_WIDTH).max(0),
                )
                .context("Invalid inner glow")?,
            )
        } else {
            None
        };

        let line_w = scaled(s, 0.008).max(2);
        let margin_x = scaled(body_w, 0.10);
        let line_x1 = body_x + margin_x;
        let line_x2 = line_x1 + body_w - margin_x * 2;
        let mut accent_bars = [body; 3];
        for (bar, offset) in accent_bars.iter_mut().zip(ACCENT_OFFSETS) {
            let center = body_y + scaled(body_h, offset);
            *bar = RoundedRect::new(
                line_x1,
                center - line_w / 2,
                line_x2,
                center + line_w / 2,
                line_w / 2,
            )
            .context("Invalid accent bar")?;
        }

        Ok(Self {
            size,
            body,
            clip,
            clip_highlight,
            inner_glow,
            accent_bars,
            shadow_sigma: (size / 80).max(1) as f32,
        })
    }
}

/// Composite the clipboard glyph onto `canvas` in back-to-front order
pub fn draw_clipboard(canvas: &mut RgbaImage, layout: &ClipboardLayout) {
    let mut shadow = RgbaImage::new(canvas.width(), canvas.height());
    fill_rounded_rect(&mut shadow, &layout.body, SHADOW_COLOR);
    let shadow = imageops::blur(&shadow, layout.shadow_sigma);
    imageops::overlay(canvas, &shadow, 0, 0);

    fill_rounded_rect(canvas, &layout.body, BODY_COLOR);
    fill_rounded_rect(canvas, &layout.clip, CLIP_COLOR);
    fill_rounded_rect(canvas, &layout.clip_highlight, CLIP_HIGHLIGHT_COLOR);

    if let Some(glow) = &layout.inner_glow {
        stroke_rounded_rect(canvas, glow, GLOW_WIDTH, GLOW_COLOR);
    }

    for (bar, color) in layout.accent_bars.iter().zip(ACCENT_COLORS) {
        fill_rounded_rect(canvas, bar, color);
    }
}

/// Render the complete icon at `size` x `size`
pub fn render_icon(size: u32, style: &IconStyle) -> Result<RgbaImage> {
    let radius = (size as f64 * 0.18) as u32;
    let mut canvas = draw_linear_gradient_rounded(size, radius, style.start, style.end)?;

    let layout = ClipboardLayout::for_size(size)?;
    draw_clipboard(&mut canvas, &layout);

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let style = IconStyle::default();
        assert_eq!(lerp_color(style.start, style.end, 0.0), style.start);
        assert_eq!(lerp_color(style.start, style.end, 1.0), style.end);

        let mid = lerp_color(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 255]), 0.5);
        assert_eq!(mid, Rgba([100, 50, 25, 127]));
    }

    #[test]
    fn test_gradient_runs_corner_to_corner() {
        let style = IconStyle::default();
        // Zero radius keeps the corners so their colours can be inspected
        let img = draw_linear_gradient_rounded(64, 0, style.start, style.end).unwrap();

        assert_eq!(img.get_pixel(0, 0), &style.start);
        assert_eq!(img.get_pixel(63, 63), &style.end);
        // Same anti-diagonal, same colour
        assert_eq!(img.get_pixel(10, 20), img.get_pixel(20, 10));
    }

    #[test]
    fn test_gradient_applies_mask() {
        let style = IconStyle::default();
        let img = draw_linear_gradient_rounded(100, 18, style.start, style.end).unwrap();

        assert_eq!(img.get_pixel(50, 50)[3], 255);
        for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99)] {
            assert_eq!(img.get_pixel(x, y)[3], 0);
        }
    }

    #[test]
    fn test_zero_size_fails_fast() {
        let style = IconStyle::default();
        assert!(draw_linear_gradient_rounded(0, 0, style.start, style.end).is_err());
        assert!(render_icon(0, &style).is_err());
        assert!(ClipboardLayout::for_size(0).is_err());
    }

    #[test]
    fn test_single_pixel_gradient() {
        let style = IconStyle::default();
        let img = draw_linear_gradient_rounded(1, 0, style.start, style.end).unwrap();
        assert_eq!(img.get_pixel(0, 0), &style.start);
    }

    #[test]
    fn test_layout_at_1024() {
        let layout = ClipboardLayout::for_size(1024).unwrap();

        assert_eq!(layout.body.x0, 225);
        assert_eq!(layout.body.y0, 215);
        assert_eq!(layout.body.width(), 574);
        assert_eq!(layout.body.height(), 635);
        assert_eq!(layout.body.radius, 40);
        assert_eq!(layout.shadow_sigma, 12.0);

        let glow = layout.inner_glow.expect("1024px icon has an inner glow");
        assert_eq!(glow.radius, 38);

        // Clip straddles the top edge of the body
        assert!(layout.clip.y0 < layout.body.y0);
        assert!(layout.clip.y1 > layout.body.y0);

        // Bars are ordered top to bottom and stay inside the body
        let centers: Vec<i32> = layout
            .accent_bars
            .iter()
            .map(|bar| (bar.y0 + bar.y1) / 2)
            .collect();
        assert!(centers.windows(2).all(|w| w[0] < w[1]));
        for bar in &layout.accent_bars {
            assert!(bar.x0 > layout.body.x0 && bar.x1 < layout.body.x1);
        }
    }

    #[test]
    fn test_small_sizes_skip_inner_glow() {
        for size in 1..INNER_GLOW_MIN_SIZE {
            let layout = ClipboardLayout::for_size(size).unwrap();
            assert!(layout.inner_glow.is_none(), "size {size} should not glow");
            assert!(layout.body.radius >= 0);
            assert!(layout.clip.radius >= 0);
            assert!(layout.accent_bars.iter().all(|bar| bar.radius >= 0));
        }

        for size in [INNER_GLOW_MIN_SIZE, 32, 64, 512] {
            let layout = ClipboardLayout::for_size(size).unwrap();
            assert!(layout.inner_glow.is_some(), "size {size} should glow");
        }
    }

    #[test]
    fn test_render_every_small_size() {
        let style = IconStyle::default();
        for size in 1..=40 {
            let icon = render_icon(size, &style).unwrap();
            assert_eq!(icon.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_icon_features() {
        let icon = render_icon(256, &IconStyle::default()).unwrap();
        let layout = ClipboardLayout::for_size(256).unwrap();

        // Transparent corners, opaque card
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
        assert_eq!(icon.get_pixel(255, 255)[3], 0);
        assert_eq!(icon.get_pixel(4, 128)[3], 255);

        // White body between the bars
        let x = layout.body.x0 + layout.body.width() / 2;
        let y = layout.body.y0 + layout.body.height() / 8 + 4;
        assert_eq!(icon.get_pixel(x as u32, y as u32), &Rgba([255, 255, 255, 255]));

        // First accent bar is tinted blue over white
        let bar = layout.accent_bars[0];
        let p = icon.get_pixel(x as u32, ((bar.y0 + bar.y1) / 2) as u32);
        assert!(p[2] > p[0], "expected a blue tint, got {p:?}");
    }
}
