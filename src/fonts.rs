//! Font loading with ordered fallback, and text measuring/drawing on RGB canvases.

use crate::bitmap_font;
use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

pub const ARIAL: &str = "/System/Library/Fonts/Arial.ttf";
pub const HELVETICA: &str = "/System/Library/Fonts/Helvetica.ttc";

/// A font usable by the fixture renderers
pub enum FixtureFont {
    /// A TrueType/OpenType font loaded from disk
    Outline { font: Font<'static>, path: PathBuf },
    /// The built-in bitmap font, always available
    Builtin,
}

impl FixtureFont {
    /// Try each candidate in order and settle on the built-in font if none loads
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            match Self::load_outline(path) {
                Some(font) => return font,
                None => println!("  · Font unavailable: {}", path.display()),
            }
        }

        println!("  · Falling back to the built-in bitmap font");
        FixtureFont::Builtin
    }

    /// User-supplied paths first, then `system_fonts` in order
    pub fn load_with_defaults(preferred: &[PathBuf], system_fonts: &[&str]) -> Self {
        let mut candidates = preferred.to_vec();
        candidates.extend(system_fonts.iter().map(PathBuf::from));
        Self::load(candidates.as_slice())
    }

    /// Parse an in-memory TrueType font
    pub fn from_bytes(data: Vec<u8>, path: impl Into<PathBuf>) -> Option<Self> {
        let font = Font::try_from_vec_and_index(data, 0)?;
        Some(FixtureFont::Outline {
            font,
            path: path.into(),
        })
    }

    fn load_outline(path: &Path) -> Option<Self> {
        let data = std::fs::read(path).ok()?;
        // Index 0 picks the first face of a .ttc collection
        Self::from_bytes(data, path)
    }

    pub fn describe(&self) -> String {
        match self {
            FixtureFont::Outline { path, .. } => path.display().to_string(),
            FixtureFont::Builtin => "built-in bitmap font".to_string(),
        }
    }

    /// Integer magnification of the bitmap font for a requested pixel size
    fn bitmap_scale(px: f32) -> u32 {
        ((px / bitmap_font::LINE_ADVANCE as f32).round() as u32).max(1)
    }

    /// Width and height of the inked area of a single line drawn at the origin
    pub fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        match self {
            FixtureFont::Outline { font, .. } => {
                let scale = Scale::uniform(px);
                let ascent = font.v_metrics(scale).ascent;
                let (mut w, mut h) = (0, 0);
                for glyph in font.layout(text, scale, point(0.0, ascent)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        w = w.max(bb.max.x);
                        h = h.max(bb.max.y);
                    }
                }
                (w.max(0) as u32, h.max(0) as u32)
            }
            FixtureFont::Builtin => {
                let k = Self::bitmap_scale(px);
                let count = text.chars().count() as u32;
                if count == 0 {
                    return (0, 0);
                }
                let width = (count * bitmap_font::ADVANCE - 1) * k;
                (width, bitmap_font::GLYPH_HEIGHT * k)
            }
        }
    }

    /// Distance between the tops of consecutive lines, before extra spacing
    pub fn line_height(&self, px: f32) -> u32 {
        match self {
            FixtureFont::Outline { font, .. } => {
                let v = font.v_metrics(Scale::uniform(px));
                (v.ascent - v.descent).ceil().max(0.0) as u32
            }
            FixtureFont::Builtin => bitmap_font::GLYPH_HEIGHT * Self::bitmap_scale(px),
        }
    }

    /// Draw one line of text with its top-left corner at `(x, y)`
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, px: f32, text: &str) {
        match self {
            FixtureFont::Outline { font, .. } => {
                let scale = Scale::uniform(px);
                let ascent = font.v_metrics(scale).ascent;
                for glyph in font.layout(text, scale, point(0.0, ascent)) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        let cx = x + bb.min.x + gx as i32;
                        let cy = y + bb.min.y + gy as i32;
                        blend_coverage(canvas, cx, cy, color, coverage);
                    });
                }
            }
            FixtureFont::Builtin => {
                let k = Self::bitmap_scale(px) as i32;
                for (index, c) in text.chars().enumerate() {
                    let origin_x = x + index as i32 * bitmap_font::ADVANCE as i32 * k;
                    for gy in 0..bitmap_font::GLYPH_HEIGHT {
                        for gx in 0..bitmap_font::GLYPH_WIDTH {
                            if !bitmap_font::pixel(c, gx, gy) {
                                continue;
                            }
                            for dy in 0..k {
                                for dx in 0..k {
                                    let cx = origin_x + gx as i32 * k + dx;
                                    let cy = y + gy as i32 * k + dy;
                                    blend_coverage(canvas, cx, cy, color, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Mix `color` into the pixel at `(x, y)` by `coverage`, ignoring out-of-bounds pixels
fn blend_coverage(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let mixed = pixel[channel] as f32 * (1.0 - coverage) + color[channel] as f32 * coverage;
        pixel[channel] = mixed.round() as u8;
    }
}
