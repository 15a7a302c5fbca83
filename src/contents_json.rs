//! Contents.json data model for a macOS `AppIcon.appiconset`
//!
//! Mirrors the subset of Apple's asset catalog schema that an app icon set
//! needs: one record per rendition plus the version/author footer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root structure of a Contents.json file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContentsFile {
    /// One entry per size/scale slot
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// A single icon rendition within the set
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// The size of the slot in points (e.g., "16x16", "512x512")
    pub size: String,

    /// The device type, always "mac" for this set
    pub idiom: String,

    /// The PNG file serving this slot
    pub filename: String,

    /// The scale factor ("1x" or "2x")
    pub scale: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The tool that authored the asset catalog
    pub author: String,
}

impl ContentsFile {
    /// Creates an empty Contents.json structure with the specified author
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    /// Filenames referenced by the manifest that are missing from `dir`,
    /// each reported once
    pub fn missing_files(&self, dir: &Path) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for image in &self.images {
            if !dir.join(&image.filename).is_file() && !missing.contains(&image.filename) {
                missing.push(image.filename.clone());
            }
        }
        missing
    }

    /// Writes the manifest as pretty-printed JSON to `dir/Contents.json`
    pub fn write(&self, dir: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")?;
        let contents_path = dir.join("Contents.json");
        std::fs::write(&contents_path, json)
            .with_context(|| format!("Failed to write {}", contents_path.display()))
    }

    /// Reads a manifest back from `dir/Contents.json`
    pub fn read(dir: &Path) -> Result<Self> {
        let contents_path = dir.join("Contents.json");
        let json = std::fs::read_to_string(&contents_path)
            .with_context(|| format!("Failed to read {}", contents_path.display()))?;
        serde_json::from_str(&json).context("Contents.json is not a valid icon set manifest")
    }
}

impl ImageEntry {
    /// Creates a mac idiom entry
    ///
    /// # Arguments
    /// * `size` - The slot size in points (e.g., "32x32")
    /// * `filename` - The PNG serving the slot
    /// * `scale` - The scale factor (e.g., "2x")
    pub fn mac(size: String, filename: String, scale: String) -> Self {
        Self {
            size,
            idiom: "mac".to_string(),
            filename,
            scale,
        }
    }
}
