//! Synthetic OCR fixtures: black text on a white canvas.

use crate::{
    encode::save_rgb_png,
    fonts::{FixtureFont, ARIAL, HELVETICA},
};
use anyhow::Result;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Where the text of a fixture goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// One line centred on the canvas
    Centered(&'static str),
    /// Lines drawn top-down from `origin`, `step` pixels apart
    Lines {
        origin: (i32, i32),
        step: i32,
        lines: &'static [&'static str],
    },
    /// Newline-separated lines measured as one block and centred, each line
    /// centred within the block
    CenteredBlock { text: &'static str, spacing: u32 },
}

/// A fixed OCR test image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFixture {
    pub width: u32,
    pub height: u32,
    pub font_px: f32,
    pub placement: Placement,
    /// File name used when no output path is given
    pub file_name: &'static str,
    /// Fonts tried after any user-supplied ones, before the built-in font
    pub system_fonts: &'static [&'static str],
}

/// `"123"` centred on a 200x100 canvas
pub const OCR_DIGITS: TextFixture = TextFixture {
    width: 200,
    height: 100,
    font_px: 36.0,
    placement: Placement::Centered("123"),
    file_name: "test_ocr_image.png",
    system_fonts: &[ARIAL, HELVETICA],
};

/// Five left-aligned lines at a fixed 30px pitch
pub const TEXT_LINES: TextFixture = TextFixture {
    width: 400,
    height: 200,
    font_px: 20.0,
    placement: Placement::Lines {
        origin: (20, 20),
        step: 30,
        lines: &[
            "Hello World",
            "This is a test image",
            "OCR Recognition Test",
            "Search functionality",
            "ClipFlow Pro",
        ],
    },
    file_name: "test_text_image.png",
    system_fonts: &[ARIAL],
};

/// Mixed Latin, CJK and digit lines centred as a block
pub const OCR_MULTILINE: TextFixture = TextFixture {
    width: 400,
    height: 200,
    font_px: 36.0,
    placement: Placement::CenteredBlock {
        text: "Hello OCR Test\n测试文字识别\n123456",
        spacing: 4,
    },
    file_name: "ocr_test_image.png",
    system_fonts: &[ARIAL, HELVETICA],
};

/// Offset that centres `inner` within `outer`, negative when it does not fit
fn centered(outer: u32, inner: u32) -> i32 {
    (outer as i32 - inner as i32).div_euclid(2)
}

impl TextFixture {
    pub fn render(&self, font: &FixtureFont) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        let px = self.font_px;

        match self.placement {
            Placement::Centered(text) => {
                let (w, h) = font.measure(text, px);
                let x = centered(self.width, w);
                let y = centered(self.height, h);
                font.draw(&mut canvas, INK, x, y, px, text);
            }
            Placement::Lines { origin, step, lines } => {
                let (x, mut y) = origin;
                for line in lines {
                    font.draw(&mut canvas, INK, x, y, px, line);
                    y += step;
                }
            }
            Placement::CenteredBlock { text, spacing } => {
                let lines: Vec<&str> = text.lines().collect();
                let widths: Vec<u32> = lines.iter().map(|line| font.measure(line, px).0).collect();
                let block_w = widths.iter().copied().max().unwrap_or(0);
                let pitch = font.line_height(px) + spacing;
                let block_h = (pitch * lines.len() as u32).saturating_sub(spacing);

                let x = centered(self.width, block_w);
                let mut y = centered(self.height, block_h);
                for (line, w) in lines.iter().zip(widths) {
                    font.draw(&mut canvas, INK, x + centered(block_w, w), y, px, line);
                    y += pitch as i32;
                }
            }
        }

        canvas
    }

    /// Load the font for this fixture, trying `preferred` paths first
    pub fn load_font(&self, preferred: &[PathBuf]) -> FixtureFont {
        FixtureFont::load_with_defaults(preferred, self.system_fonts)
    }

    /// Render with `font` and save the PNG to `path`
    pub fn write(&self, font: &FixtureFont, path: &Path) -> Result<()> {
        let image = self.render(font);
        save_rgb_png(&image, path)?;
        println!("  ✓ Generated {}", path.display());
        Ok(())
    }
}
