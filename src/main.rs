use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use clipflow_assets::{
    icon_gen::{self, parse_color},
    render::IconStyle,
    text_fixture::{TextFixture, OCR_DIGITS, OCR_MULTILINE, TEXT_LINES},
};
use std::{path::PathBuf, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(
    name = "clipflow-assets",
    about = "Generate OCR test fixtures and the ClipFlow Pro app icon set"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render "123" centred on a 200x100 canvas
    OcrDigits(FixtureArgs),

    /// Render five lines of text at a fixed 30px pitch on a 400x200 canvas
    TextLines(FixtureArgs),

    /// Render a centred three-line block, including CJK text, on a 400x200 canvas
    OcrMultiline(FixtureArgs),

    /// Render the clipboard icon at every size and write the macOS icon set
    Icon(IconArgs),
}

#[derive(Debug, ClapArgs)]
struct FixtureArgs {
    /// Output PNG path. Defaults to the fixture's file name in the current directory.
    #[clap(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Font file to try before the system fonts. May be repeated.
    #[clap(long, value_name = "FONT")]
    font: Vec<PathBuf>,
}

#[derive(Debug, ClapArgs)]
struct IconArgs {
    /// Project root holding assets/, web/ and macos/
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Gradient colour at the top-left corner (CSS color format)
    #[clap(long, default_value = "#1c63ea")]
    start_color: String,

    /// Gradient colour at the bottom-right corner (CSS color format)
    #[clap(long, default_value = "#14b8a6")]
    end_color: String,

    /// Also pack the macOS renditions into assets/icons/AppIcon.icns
    #[clap(long)]
    icns: bool,
}

fn run_fixture(fixture: &TextFixture, args: FixtureArgs) -> Result<ExitCode> {
    println!("Generating {}...", fixture.file_name);
    let font = fixture.load_font(&args.font);
    println!("  · Using {}", font.describe());

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(fixture.file_name));
    fixture.write(&font, &output)?;
    Ok(ExitCode::SUCCESS)
}

fn run_icon(args: IconArgs) -> Result<ExitCode> {
    println!("🎨 Clipboard icon generator");
    let style = IconStyle {
        start: parse_color(&args.start_color)?,
        end: parse_color(&args.end_color)?,
    };

    let report = icon_gen::generate_icons(&icon_gen::Args {
        root: args.root,
        style,
        icns: args.icns,
    })?;

    if report.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::OcrDigits(args) => run_fixture(&OCR_DIGITS, args),
        Command::TextLines(args) => run_fixture(&TEXT_LINES, args),
        Command::OcrMultiline(args) => run_fixture(&OCR_MULTILINE, args),
        Command::Icon(args) => run_icon(args),
    }
}
