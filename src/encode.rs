use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

// Encode image data as PNG with compression
pub fn write_png<W: Write>(
    image_data: &[u8],
    w: W,
    width: u32,
    height: u32,
    color: ColorType,
) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, color)?;
    Ok(())
}

fn save_raw(image_data: &[u8], path: &Path, width: u32, height: u32, color: ColorType) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Can't create directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(image_data, &mut out, width, height, color)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out.flush()?;
    Ok(())
}

/// Save an RGBA image as PNG, creating parent directories as needed
pub fn save_rgba_png(image: &RgbaImage, path: &Path) -> Result<()> {
    save_raw(image.as_raw(), path, image.width(), image.height(), ColorType::Rgba8)
}

/// Save an RGB image as PNG, creating parent directories as needed
pub fn save_rgb_png(image: &RgbImage, path: &Path) -> Result<()> {
    save_raw(image.as_raw(), path, image.width(), image.height(), ColorType::Rgb8)
}

/// Encode an RGBA image into an in-memory PNG
pub fn encode_rgba_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(image.as_raw(), &mut buf, image.width(), image.height(), ColorType::Rgba8)?;
    Ok(buf)
}
