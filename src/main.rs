use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};

use outline_field::prelude::*;
use outline_field::distance_field::{DEFAULT_INTENSITY, DEFAULT_INTERIOR_ALPHA, DEFAULT_MAX_DISTANCE};

const FAILED_TO_LOAD_IMAGE: u8 = 1;
const FAILED_TO_WRITE_IMAGE: u8 = 2;

/// Derives an outline fill image and an alpha falloff field from a sprite.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The input file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// The output file for the distance field.
    /// The fill image is written next to it, prefixed with `e_`
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// The minification factor, reserved for downscaling
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    minification: u32,

    /// Rings at this distance and beyond are not searched
    #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE)]
    max_distance: u32,

    /// Alpha of transparent pixels directly next to the sprite
    #[arg(long, default_value_t = DEFAULT_INTENSITY)]
    intensity: u8,

    /// Alpha of the sprite itself in the distance field
    #[arg(long, default_value_t = DEFAULT_INTERIOR_ALPHA)]
    interior_alpha: u8,

    /// Per-channel bitmask applied to the fill image, as hexadecimal `RRGGBBAA`
    #[arg(long, value_name = "RRGGBBAA", value_parser = parse_channel_mask, default_value = "0xff0000ff")]
    fill_mask: ChannelMask,

    /// Let rings wrap around the left and right borders,
    /// reproducing images made by earlier versions of this tool
    #[arg(long)]
    wrap_edges: bool,
}

fn parse_channel_mask(text: &str) -> std::result::Result<ChannelMask, String> {
    let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);

    u32::from_str_radix(digits, 16)
        .map(ChannelMask::from)
        .map_err(|error| format!("`{}` is not a hexadecimal mask: {}", text, error))
}

impl Args {
    fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            edge_mode: if self.wrap_edges { EdgeMode::Wrapping } else { EdgeMode::Clamped },
            fill_mask: self.fill_mask,
            max_distance: self.max_distance,
            intensity: self.intensity,
            interior_alpha: self.interior_alpha,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    // usage errors print the help text but are not failures
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(usage) => {
            let _ = usage.print();
            return ExitCode::SUCCESS;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            error!("{:#}", failure);
            ExitCode::from(exit_code(&failure))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = load_rgba(&args.input)?;
    info!("Loaded image: {}", args.input.display());
    debug!("minification factor {} is not applied", args.minification);

    let derived = derive_images(&source.as_image(), &args.settings())
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    info!("Done with filter");

    write_outputs(&args.output, &derived)?;

    info!("Wrote: {}", args.output.display());
    info!("Done!");
    Ok(())
}

/// Writes the distance field to `output` and the fill next to it.
/// Both are attempted, even if the first one fails.
fn write_outputs(output: &Path, derived: &DerivedImages) -> outline_field::error::Result<()> {
    let fill_written = save_png(fill_path(output), &derived.fill);
    let field_written = save_png(output, &derived.distance_field);
    fill_written.and(field_written)
}

fn exit_code(failure: &anyhow::Error) -> u8 {
    match failure.downcast_ref::<Error>() {
        Some(Error::Encode { .. }) => FAILED_TO_WRITE_IMAGE,
        _ => FAILED_TO_LOAD_IMAGE,
    }
}
