use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use rbx430_img::config::{validate_height, validate_width, MAX_HEIGHT, MAX_WIDTH};
use rbx430_img::render::write_array;
use rbx430_img::{
    analyze, convert_image, encode_intensities, ConvertConfig, EncodedImage, ImageCrateBackend,
    OutputFormat, QuantizeStrategy, ScaleMethod,
};

/// Converts any image to an RBX430_lcd-compatible C array.
#[derive(Parser, Debug)]
#[command(name = "rbx430img", version)]
#[command(about = "Converts any image to an RBX430_lcd-compatible C array.")]
#[command(after_help = "This code is open-sourced under the MIT license!")]
struct Args {
    /// The image to load. Most image formats are supported.
    imagefile: PathBuf,

    /// The destination width of the image. It must be a multiple of 3 from 3-159.
    #[arg(value_parser = parse_width)]
    width: u32,

    /// The destination height of the image, from 1-160. If it is not specified,
    /// it is calculated from the width and the aspect ratio of the image.
    #[arg(value_parser = parse_height)]
    height: Option<u32>,

    /// The output format of the data.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::OneLine, value_name = "FMT")]
    format: OutputFormat,

    /// The function used to downscale the pixels to 5-bit grayscale.
    #[arg(
        short,
        long = "map",
        value_enum,
        default_value_t = QuantizeStrategy::SquareRoot,
        value_name = "FUNC"
    )]
    map: QuantizeStrategy,

    /// The method used to scale the given image down or up.
    #[arg(short, long, value_enum, default_value_t = ScaleMethod::Antialias, value_name = "METHOD")]
    scale: ScaleMethod,

    /// Do not compress the image; leave the pixels as-is. Easier for debugging.
    #[arg(long)]
    nocompress: bool,

    /// Print size statistics for the encoded image as JSON to stderr.
    #[arg(long)]
    stats: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            width: self.width,
            height: self.height,
            format: self.format,
            quantize: self.map,
            scale: self.scale,
            compress: !self.nocompress,
        }
    }
}

fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("Width must be a multiple of 3 from 3-{}!", MAX_WIDTH))?;
    validate_width(width).map_err(|e| e.to_string())
}

fn parse_height(s: &str) -> Result<u32, String> {
    let height: u32 = s
        .parse()
        .map_err(|_| format!("Height must be from 1-{}!", MAX_HEIGHT))?;
    validate_height(height).map_err(|e| e.to_string())
}

/// Writes the size statistics as one JSON line. Independent of the log level,
/// so `-q` does not hide stats that were asked for.
fn write_stats<W: Write>(out: &mut W, encoded: &EncodedImage) -> Result<()> {
    let stats = analyze(encoded);
    writeln!(out, "{}", serde_json::to_string(&stats)?)?;
    Ok(())
}

fn init_logging(quiet: bool) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(if quiet { LevelFilter::Warn } else { LevelFilter::Info });
    builder.parse_default_env();

    // Custom formatter: just print the level and message
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder.target(env_logger::Target::Stderr);

    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let config = args.to_config();
    let encoded = convert_image(&ImageCrateBackend, &args.imagefile, &config)
        .with_context(|| format!("failed to convert {}", args.imagefile.display()))?;

    if args.stats {
        let stderr = std::io::stderr();
        write_stats(&mut stderr.lock(), &encoded)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_array(&mut out, encoded.width, encoded.height, &encoded.codes, config.format)?;
    out.flush()?;
    Ok(())
}
