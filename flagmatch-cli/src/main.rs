//! flagmatch CLI - perceptual flag matching
//!
//! Compare guessed flags against a target flag, score each guess, and build
//! the cumulative reveal composite.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ColorChoice, Parser, ValueEnum};
use colored::Colorize;
use flagmatch::{compare, union, Img, ImgRef, ImgVec, MatchParams, SimilarityModel, RGBA8};
use image::imageops::FilterType;
use image::GenericImageView;
use serde::Serialize;

/// Perceptual flag matching
///
/// Compares each GUESS against TARGET pixel by pixel and reports the match
/// percentage over the target's non-transparent pixels. With several
/// guesses, the per-guess match images are folded into one cumulative
/// composite, replaying a whole game from its guess list.
///
/// Guesses are resized to the target's dimensions before comparison.
#[derive(Parser, Debug)]
#[command(name = "flagmatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    Score one guess:
        flagmatch target.png guess.png

    Replay a game and keep the reveal composite:
        flagmatch target.png guess1.png guess2.png guess3.png --composite reveal.png

    Save the last guess's match image:
        flagmatch target.png guess.png --match-image match.png

    Output JSON for scripting:
        flagmatch --json target.png guess.png

    CI mode - fail unless some guess reaches 90%:
        flagmatch --min-percentage 90 target.png guess*.png

EXIT CODES:
    0 - Success (threshold met if --min-percentage specified)
    1 - No guess reached --min-percentage
    2 - Error (file not found, invalid image, etc.)")]
struct Cli {
    /// Target flag image
    #[arg(value_name = "TARGET")]
    target: PathBuf,

    /// Guessed flag images, compared in order
    #[arg(value_name = "GUESS", required = true)]
    guesses: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output JSON (shorthand for --format json)
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Quiet mode - only output the percentage numbers
    #[arg(long, short = 's', conflicts_with = "format")]
    quiet: bool,

    /// Save the last guess's match image to a PNG file
    #[arg(short, long, value_name = "FILE")]
    match_image: Option<PathBuf>,

    /// Save the final reveal composite to a PNG file
    #[arg(short, long, value_name = "FILE")]
    composite: Option<PathBuf>,

    /// Color similarity model
    #[arg(long, value_enum, default_value = "hsl-banded")]
    model: ModelArg,

    /// Maximum circular hue difference in degrees (hsl-banded)
    #[arg(long, value_name = "DEGREES")]
    hue_threshold: Option<f32>,

    /// Maximum saturation difference (hsl-banded)
    #[arg(long, value_name = "DELTA")]
    saturation_threshold: Option<f32>,

    /// Maximum lightness difference (hsl-banded)
    #[arg(long, value_name = "DELTA")]
    lightness_threshold: Option<f32>,

    /// Maximum Rec. 601 luma difference (luminance)
    #[arg(long, value_name = "DELTA")]
    luma_threshold: Option<f32>,

    /// Maximum per-channel difference (luminance)
    #[arg(long, value_name = "DELTA")]
    channel_threshold: Option<f32>,

    /// Maximum RGB distance (euclidean)
    #[arg(long, value_name = "DELTA")]
    distance_threshold: Option<f32>,

    /// Minimum acceptable best percentage (exit code 1 if not reached)
    ///
    /// Useful for scripted checks: a replayed winning game must contain a
    /// guess at or above this score.
    #[arg(long, value_name = "PERCENT")]
    min_percentage: Option<u8>,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Per-guess lines with ratings
    Text,
    /// JSON report with all guesses
    Json,
    /// Minimal - just the percentage numbers
    Score,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModelArg {
    /// HSL with lightness/saturation banding
    HslBanded,
    /// Luma gate plus per-channel distance
    Luminance,
    /// Euclidean RGB distance
    Euclidean,
}

impl From<ModelArg> for SimilarityModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::HslBanded => SimilarityModel::HslBanded,
            ModelArg::Luminance => SimilarityModel::LuminanceDistance,
            ModelArg::Euclidean => SimilarityModel::EuclideanDistance,
        }
    }
}

#[derive(Serialize)]
struct JsonOutput {
    target: String,
    model: String,
    width: u32,
    height: u32,
    guesses: Vec<JsonGuess>,
    best_percentage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_met: Option<bool>,
}

#[derive(Serialize)]
struct JsonGuess {
    guess: String,
    percentage: u8,
    rating: String,
}

struct GuessOutcome {
    path: PathBuf,
    percentage: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_colors(&cli);

    match run(&cli) {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn setup_colors(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            // Disable colors if not a terminal
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn build_params(cli: &Cli) -> MatchParams {
    let mut params = MatchParams::new().with_model(cli.model.into());
    if let Some(v) = cli.hue_threshold {
        params = params.with_hue_threshold(v);
    }
    if let Some(v) = cli.saturation_threshold {
        params = params.with_saturation_threshold(v);
    }
    if let Some(v) = cli.lightness_threshold {
        params = params.with_lightness_threshold(v);
    }
    if let Some(v) = cli.luma_threshold {
        params = params.with_luma_threshold(v);
    }
    if let Some(v) = cli.channel_threshold {
        params = params.with_channel_threshold(v);
    }
    if let Some(v) = cli.distance_threshold {
        params = params.with_distance_threshold(v);
    }
    params
}

fn run(cli: &Cli) -> Result<ExitCode, String> {
    let target = load_rgba(&cli.target, None)?;
    let (width, height) = (target.width(), target.height());
    let params = build_params(cli);

    let mut outcomes: Vec<GuessOutcome> = Vec::with_capacity(cli.guesses.len());
    let mut composite: Option<ImgVec<RGBA8>> = None;
    let mut last_match: Option<ImgVec<RGBA8>> = None;

    for guess_path in &cli.guesses {
        // The target's dimensions are the frame of reference; every guess
        // is resized into it before comparison.
        let guess = load_rgba(guess_path, Some((width, height)))?;

        let result = compare(target.as_ref(), guess.as_ref(), &params)
            .map_err(|e| format!("comparing '{}': {e}", guess_path.display()))?;

        composite = Some(
            union(composite.as_ref().map(|c| c.as_ref()), result.image.as_ref())
                .map_err(|e| format!("merging '{}': {e}", guess_path.display()))?,
        );

        outcomes.push(GuessOutcome {
            path: guess_path.clone(),
            percentage: result.percentage,
        });
        last_match = Some(result.image);
    }

    if let Some(path) = &cli.match_image {
        if let Some(img) = &last_match {
            save_rgba_png(img.as_ref(), path)?;
            if !cli.quiet && get_format(cli) != OutputFormat::Json {
                eprintln!("Match image saved to: {}", path.display());
            }
        }
    }

    if let Some(path) = &cli.composite {
        if let Some(img) = &composite {
            save_rgba_png(img.as_ref(), path)?;
            if !cli.quiet && get_format(cli) != OutputFormat::Json {
                eprintln!("Composite saved to: {}", path.display());
            }
        }
    }

    output_results(cli, &outcomes, width as u32, height as u32)?;

    let best = outcomes.iter().map(|o| o.percentage).max().unwrap_or(0);
    if let Some(min) = cli.min_percentage {
        if best < min {
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Decodes an image into the RGBA grid the engine works on, resizing to
/// `fit` when the decoded dimensions differ.
fn load_rgba(path: &Path, fit: Option<(usize, usize)>) -> Result<ImgVec<RGBA8>, String> {
    let img = image::open(path).map_err(|e| format!("failed to load '{}': {e}", path.display()))?;

    let img = match fit {
        Some((w, h)) if img.dimensions() != (w as u32, h as u32) => {
            img.resize_exact(w as u32, h as u32, FilterType::Lanczos3)
        }
        _ => img,
    };

    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let pixels: Vec<RGBA8> = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
        .collect();

    Ok(Img::new(pixels, w as usize, h as usize))
}

fn save_rgba_png(img: ImgRef<RGBA8>, path: &Path) -> Result<(), String> {
    let mut bytes = Vec::with_capacity(img.width() * img.height() * 4);
    for row in img.rows() {
        for p in row {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
    }

    image::save_buffer(
        path,
        &bytes,
        img.width() as u32,
        img.height() as u32,
        image::ColorType::Rgba8,
    )
    .map_err(|e| format!("failed to save '{}': {e}", path.display()))
}

fn get_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else if cli.quiet {
        OutputFormat::Score
    } else {
        cli.format
    }
}

fn rating(percentage: u8) -> (&'static str, colored::Color) {
    use colored::Color;
    match percentage {
        100 => ("correct", Color::Green),
        75..=99 => ("close", Color::Green),
        40..=74 => ("warm", Color::Yellow),
        _ => ("cold", Color::Red),
    }
}

fn output_results(
    cli: &Cli,
    outcomes: &[GuessOutcome],
    width: u32,
    height: u32,
) -> Result<(), String> {
    match get_format(cli) {
        OutputFormat::Score => {
            for o in outcomes {
                println!("{}", o.percentage);
            }
        }
        OutputFormat::Json => {
            let best = outcomes.iter().map(|o| o.percentage).max().unwrap_or(0);
            let output = JsonOutput {
                target: cli.target.display().to_string(),
                model: format!("{:?}", SimilarityModel::from(cli.model)),
                width,
                height,
                guesses: outcomes
                    .iter()
                    .map(|o| JsonGuess {
                        guess: o.path.display().to_string(),
                        percentage: o.percentage,
                        rating: rating(o.percentage).0.to_string(),
                    })
                    .collect(),
                best_percentage: best,
                threshold_met: cli.min_percentage.map(|min| best >= min),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let name_width = outcomes
                .iter()
                .map(|o| o.path.file_name().unwrap_or_default().len())
                .max()
                .unwrap_or(20);

            for o in outcomes {
                let filename = o.path.file_name().and_then(|s| s.to_str()).unwrap_or("?");
                let (label, color) = rating(o.percentage);
                let pct_str = format!("{}%", o.percentage);

                println!(
                    "{:name_width$}  {:>4}  {}",
                    filename,
                    pct_str.color(color),
                    label.color(color).bold()
                );
            }

            if let Some(min) = cli.min_percentage {
                let best = outcomes.iter().map(|o| o.percentage).max().unwrap_or(0);
                if best >= min {
                    println!("{}", format!("Threshold met: {best}% >= {min}%").green());
                } else {
                    println!(
                        "{}",
                        format!("Threshold not met: {best}% < {min}%").red().bold()
                    );
                }
            }
        }
    }

    // Flush stdout
    let _ = io::stdout().flush();

    Ok(())
}
