pub use self::error::{Error, Result};
pub use self::generator::{GeneratorOptions, PaletteGenerator, generate_palette};
pub use self::pixel_source::{Color, Coordinate, PixelSource};

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use itertools::Itertools; // for join() iterator function
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand_xoshiro::Xoroshiro128PlusPlus;
use wild::ArgsOs;

mod arg_validators;
pub mod color_ops;
mod error;
mod generator;
mod pixel_source;

/// How palette colors are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// #RRGGBB
    Hex,
    /// rgb(R, G, B)
    Rgb,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image files
    #[arg(required(true))]
    files: Vec<PathBuf>,
    /// Number of palette colors
    #[arg(short('n'), long, default_value_t = 6, value_parser = arg_validators::validate_color_count)]
    colors: usize,
    /// Random seed (picked at random when omitted)
    #[arg(short('s'), long)]
    seed: Option<u64>,
    /// Maximum refinement cycles
    #[arg(short('c'), long, default_value_t = 3)]
    cycles: u32,
    /// Cluster distance threshold (euclidean RGB distance)
    #[arg(short('t'), long, default_value_t = 5.0, value_parser = arg_validators::validate_distance_threshold)]
    threshold: f64,
    /// Output color format
    #[arg(short('f'), long, value_enum, default_value_t = OutputFormat::Hex)]
    format: OutputFormat,
    /// Verbose messages
    #[arg(short('v'), long, default_value_t = false)]
    verbose: bool,
}

pub fn run(args: ArgsOs) -> Result<()> {
    let args = Args::parse_from(args);
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG still takes precedence; ignore the error if a logger is already installed
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();

    let generator = PaletteGenerator::new(
        GeneratorOptions::new()
            .max_cycles(args.cycles)
            .distance_threshold(args.threshold),
    );
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using seed {seed}");

    for file in &args.files {
        let image = image::open(file)?.to_rgb8();
        info!("{}: {}x{}", file.display(), image.width(), image.height());
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
        let palette = generator.generate(&image, args.colors, &mut rng)?;
        println!(
            "{}: {}",
            file.display(),
            palette.iter().map(|&c| format_color(c, args.format)).join(" ")
        );
    }
    Ok(())
}

fn format_color(color: Color, format: OutputFormat) -> String {
    match format {
        OutputFormat::Hex => color_ops::to_hex(color),
        OutputFormat::Rgb => format!("rgb({}, {}, {})", color[0], color[1], color[2]),
    }
}
