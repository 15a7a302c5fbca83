use crate::contents_json::{ContentsFile, ImageEntry};
use crate::encode::{encode_rgba_png, save_rgba_png};
use crate::render::{render_icon, IconStyle};
use anyhow::{Context, Result};
use icns::{IconFamily, IconType, OSType};
use image::{Rgba, RgbaImage};
use std::{
    collections::BTreeMap,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Web/preview renditions, written to both asset roots
pub const WEB_SIZES: [u32; 3] = [192, 512, 1024];

/// Pixel sizes rendered into the macOS app icon set
pub const MAC_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// One size/scale slot of the macOS icon set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacIconSlot {
    /// Slot size in points
    pub points: u32,
    pub scale: u32,
    /// ICNS element type holding this slot
    pub ostype: &'static str,
}

impl MacIconSlot {
    pub fn pixels(&self) -> u32 {
        self.points * self.scale
    }
}

const fn slot(points: u32, scale: u32, ostype: &'static str) -> MacIconSlot {
    MacIconSlot {
        points,
        scale,
        ostype,
    }
}

pub const MAC_ICON_SLOTS: [MacIconSlot; 10] = [
    slot(16, 1, "is32"),
    slot(16, 2, "ic11"),
    slot(32, 1, "il32"),
    slot(32, 2, "ic12"),
    slot(128, 1, "ic07"),
    slot(128, 2, "ic13"),
    slot(256, 1, "ic08"),
    slot(256, 2, "ic14"),
    slot(512, 1, "ic09"),
    slot(512, 2, "ic10"),
];

#[derive(Debug)]
pub struct Args {
    /// Project root the asset directories live under
    pub root: PathBuf,
    pub style: IconStyle,
    /// Also pack the macOS renditions into an .icns file
    pub icns: bool,
}

/// Output locations below the project root
#[derive(Debug, Clone)]
pub struct IconPaths {
    pub assets_dir: PathBuf,
    pub web_icons_dir: PathBuf,
    pub appiconset_dir: PathBuf,
}

impl IconPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            assets_dir: root.join("assets").join("icons"),
            web_icons_dir: root.join("web").join("icons"),
            appiconset_dir: root
                .join("macos")
                .join("Runner")
                .join("Assets.xcassets")
                .join("AppIcon.appiconset"),
        }
    }
}

/// Counts of attempted and successful renditions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub total: usize,
}

impl BatchReport {
    fn record(&mut self, ok: bool) {
        self.total += 1;
        if ok {
            self.succeeded += 1;
        }
    }

    pub fn merge(self, other: BatchReport) -> BatchReport {
        BatchReport {
            succeeded: self.succeeded + other.succeeded,
            total: self.total + other.total,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

pub fn web_icon_name(size: u32) -> String {
    format!("clipboard_brand_fresh_{size}.png")
}

pub fn mac_icon_name(size: u32) -> String {
    format!("fresh_icon_{size}.png")
}

/// Parse a CSS colour string into RGBA
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let parsed = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid CSS color: {}", color))?;
    Ok(Rgba([
        (parsed.red * 255.).round() as u8,
        (parsed.green * 255.).round() as u8,
        (parsed.blue * 255.).round() as u8,
        (parsed.alpha * 255.).round() as u8,
    ]))
}

/// Render one icon and save it to `path`
pub fn generate_icon(size: u32, style: &IconStyle, path: &Path) -> Result<RgbaImage> {
    let icon = render_icon(size, style)
        .with_context(|| format!("Failed to render {size}x{size} icon"))?;
    save_rgba_png(&icon, path)?;
    Ok(icon)
}

/// Render every icon, write the manifest and optionally the .icns bundle.
///
/// Individual sizes that fail are logged and counted; the batch carries on.
pub fn generate_icons(args: &Args) -> Result<BatchReport> {
    let paths = IconPaths::new(&args.root);

    let web = generate_web_icons(&paths, &args.style);
    let (mac, rendered) = generate_macos_icons(&paths, &args.style, args.icns);

    println!("Generating Contents.json...");
    let contents = write_macos_contents_json(&paths.appiconset_dir)?;
    let missing = contents.missing_files(&paths.appiconset_dir);
    if missing.is_empty() {
        println!("  ✓ Generated Contents.json");
    } else {
        println!("  ✗ Contents.json references missing files: {}", missing.join(", "));
    }

    if args.icns {
        generate_icns(&rendered, &paths.assets_dir.join("AppIcon.icns"))?;
    }

    let report = web.merge(mac);
    println!("\n📊 Summary: {}/{} icons generated", report.succeeded, report.total);
    if report.all_succeeded() {
        println!(
            "✓ AppIcon.appiconset/Contents.json now points at the fresh_icon_* files"
        );
    }

    Ok(report)
}

fn generate_web_icons(paths: &IconPaths, style: &IconStyle) -> BatchReport {
    println!("Generating web/preview icons...");
    let mut report = BatchReport::default();

    for size in WEB_SIZES {
        let filename = web_icon_name(size);
        let asset_path = paths.assets_dir.join(&filename);

        match generate_icon(size, style, &asset_path) {
            Ok(icon) => {
                report.record(true);
                println!("  ✓ Generated assets/icons/{filename}");

                // The web copy is best effort and never affects the count
                let web_path = paths.web_icons_dir.join(&filename);
                match save_rgba_png(&icon, &web_path) {
                    Ok(()) => println!("  ✓ Generated web/icons/{filename}"),
                    Err(err) => println!("  ✗ Skipped web/icons/{filename}: {err:#}"),
                }
            }
            Err(err) => {
                report.record(false);
                println!("  ✗ Failed {size}x{size}: {err:#}");
            }
        }
    }

    report
}

fn generate_macos_icons(
    paths: &IconPaths,
    style: &IconStyle,
    keep_images: bool,
) -> (BatchReport, BTreeMap<u32, RgbaImage>) {
    println!("Generating macOS icons...");
    let mut report = BatchReport::default();
    let mut rendered = BTreeMap::new();

    for size in MAC_SIZES {
        let filename = mac_icon_name(size);
        let output_path = paths.appiconset_dir.join(&filename);

        match generate_icon(size, style, &output_path) {
            Ok(icon) => {
                report.record(true);
                println!("  ✓ Generated AppIcon.appiconset/{filename}");
                if keep_images {
                    rendered.insert(size, icon);
                }
            }
            Err(err) => {
                report.record(false);
                println!("  ✗ Failed {size}x{size}: {err:#}");
            }
        }
    }

    (report, rendered)
}

/// The fixed ten-entry manifest for the macOS icon set
pub fn build_macos_contents_json() -> ContentsFile {
    let mut contents = ContentsFile::new("xcode".to_string());

    for slot in MAC_ICON_SLOTS {
        contents.add_image(ImageEntry::mac(
            format!("{0}x{0}", slot.points),
            mac_icon_name(slot.pixels()),
            format!("{}x", slot.scale),
        ));
    }

    contents
}

/// Write Contents.json next to the macOS renditions
pub fn write_macos_contents_json(appiconset_dir: &Path) -> Result<ContentsFile> {
    create_dir_all(appiconset_dir).context("Can't create AppIcon.appiconset directory")?;
    let contents = build_macos_contents_json();
    contents.write(appiconset_dir)?;
    Ok(contents)
}

/// Pack the rendered macOS sizes into an .icns file
fn generate_icns(rendered: &BTreeMap<u32, RgbaImage>, out_path: &Path) -> Result<()> {
    println!("Generating AppIcon.icns...");
    let mut family = IconFamily::new();

    for slot in MAC_ICON_SLOTS {
        let name = format!("{0}x{0}@{1}x", slot.points, slot.scale);
        let Some(icon) = rendered.get(&slot.pixels()) else {
            println!("  ✗ Skipped {name}: no {0}x{0} rendition", slot.pixels());
            continue;
        };

        let buf = encode_rgba_png(icon)?;
        let image = icns::Image::read_png(&buf[..])?;
        let ostype = OSType::from_str(slot.ostype)
            .map_err(|_| anyhow::anyhow!("Invalid OSType: {}", slot.ostype))?;
        let icon_type = IconType::from_ostype(ostype)
            .with_context(|| format!("Unsupported icon type {}", slot.ostype))?;

        family
            .add_icon_with_type(&image, icon_type)
            .with_context(|| format!("Can't add {name} to Icns Family"))?;
    }

    if let Some(parent) = out_path.parent() {
        create_dir_all(parent)?;
    }
    let mut out_file = BufWriter::new(File::create(out_path)?);
    family.write(&mut out_file)?;
    out_file.flush()?;

    println!("  ✓ Generated AppIcon.icns");
    Ok(())
}
