use clipflow_assets::contents_json::ContentsFile;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_clipflow_assets(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clipflow-assets"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run clipflow-assets command")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("clipflow-assets command failed");
    }
}

/// Runs `clipflow-assets icon --root <tmp>` and checks every rendition, the
/// web copies and the macOS Contents.json.
#[test]
fn test_icon_batch_writes_all_sizes_and_manifest() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();

    let output = run_clipflow_assets(&["icon", "--root", root.to_str().unwrap()], root);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("10/10"), "unexpected summary:\n{stdout}");

    for size in [192u32, 512, 1024] {
        for dir in ["assets/icons", "web/icons"] {
            let path = root.join(dir).join(format!("clipboard_brand_fresh_{size}.png"));
            let icon = image::open(&path)
                .unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
            assert_eq!((icon.width(), icon.height()), (size, size));
        }
    }

    let appiconset = root.join("macos/Runner/Assets.xcassets/AppIcon.appiconset");
    for size in [16u32, 32, 64, 128, 256, 512, 1024] {
        let icon = image::open(appiconset.join(format!("fresh_icon_{size}.png")))
            .expect("Failed to open macOS icon");
        assert_eq!((icon.width(), icon.height()), (size, size));

        // Rounded corners are cut out of every rendition
        let rgba = icon.to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0)[3], 0);
        assert_eq!(rgba.get_pixel(size / 2, size / 2)[3], 255);
    }

    let contents = ContentsFile::read(&appiconset).expect("Contents.json should parse");
    assert_eq!(contents.images.len(), 10);
    for (i, image) in contents.images.iter().enumerate() {
        assert_eq!(image.idiom, "mac", "Image entry {i} should be a mac icon");
    }
    assert_eq!(contents.info.version, 1);
    assert_eq!(contents.info.author, "xcode");
    assert!(
        contents.missing_files(&appiconset).is_empty(),
        "Contents.json references files that were not written: {:?}",
        contents.missing_files(&appiconset)
    );

    // Removing a rendition shows up as a missing manifest entry
    std::fs::remove_file(appiconset.join("fresh_icon_64.png")).unwrap();
    assert_eq!(contents.missing_files(&appiconset), vec!["fresh_icon_64.png"]);

    assert!(!root.join("assets/icons/AppIcon.icns").exists());
}

#[test]
fn test_icon_batch_with_icns_and_custom_colors() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();

    let output = run_clipflow_assets(
        &[
            "icon",
            "--root",
            root.to_str().unwrap(),
            "--start-color",
            "#ff0000",
            "--end-color",
            "#0000ff",
            "--icns",
        ],
        root,
    );
    assert_success(&output);

    let icns_path = root.join("assets/icons/AppIcon.icns");
    let family = icns::IconFamily::read(std::fs::File::open(&icns_path).unwrap())
        .expect("AppIcon.icns should be a valid icon family");
    assert!(!family.elements.is_empty());

    // The top-left edge of the card starts red
    let icon = image::open(
        root.join("macos/Runner/Assets.xcassets/AppIcon.appiconset/fresh_icon_256.png"),
    )
    .unwrap()
    .to_rgba8();
    let edge = icon.get_pixel(2, 128);
    assert!(edge[0] > edge[2], "expected a red-leaning edge, got {edge:?}");
}

#[test]
fn test_icon_rejects_invalid_color() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = run_clipflow_assets(&["icon", "--start-color", "nope"], temp_dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid CSS color"));
}

#[test]
fn test_text_fixtures_default_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cwd = temp_dir.path();

    let fixtures = [
        ("ocr-digits", "test_ocr_image.png", 200, 100),
        ("text-lines", "test_text_image.png", 400, 200),
        ("ocr-multiline", "ocr_test_image.png", 400, 200),
    ];

    for (command, file_name, width, height) in fixtures {
        let output = run_clipflow_assets(&[command], cwd);
        assert_success(&output);

        let path = cwd.join(file_name);
        assert!(path.exists(), "{command} should write {}", path.display());

        let fixture = image::open(&path).expect("Failed to open fixture");
        assert_eq!(fixture.width(), width);
        assert_eq!(fixture.height(), height);

        // Some dark text on the white canvas
        let rgb = fixture.to_rgb8();
        assert!(rgb.pixels().any(|p| p[0] < 128));
        assert_eq!(rgb.get_pixel(0, 0), &image::Rgb([255, 255, 255]));
    }
}

#[test]
fn test_text_fixture_custom_output_and_bad_font() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cwd = temp_dir.path();
    std::fs::write(cwd.join("bogus.ttf"), b"not a font").unwrap();

    let output = run_clipflow_assets(
        &[
            "ocr-digits",
            "--font",
            "bogus.ttf",
            "--output",
            "fixtures/digits.png",
        ],
        cwd,
    );
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Font unavailable: bogus.ttf"));

    let fixture = image::open(cwd.join("fixtures/digits.png")).unwrap();
    assert_eq!((fixture.width(), fixture.height()), (200, 100));
}
