use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use squoosh_gltf::{
    Document, EncodeProfile, MozJpegOptions, OxiPngOptions, SQUOOSH_CLI, SquooshCli,
    SquooshCliOpts, ToWebpOptions, WebpOptions, compress_textures,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "squoosh-gltf", version)]
struct Cli {
    /// Log per-texture diagnostics (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompress textures to WebP.
    Webp(WebpArgs),
    /// Recompress textures with MozJPEG.
    Mozjpeg(MozJpegArgs),
    /// Recompress textures with OxiPNG.
    Oxipng(OxiPngArgs),
    /// Convert every texture that is not already WebP to WebP.
    Towebp(ToWebpArgs),
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input document manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output document manifest JSON; textures are written next to it.
    #[arg(long)]
    out: PathBuf,

    /// Only process textures bound to a slot matching this glob (case-insensitive).
    #[arg(long, default_value = "*")]
    slots: String,

    /// Encoder executable.
    #[arg(long, default_value = SQUOOSH_CLI)]
    encoder: PathBuf,
}

#[derive(Args, Debug)]
struct WebpArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Only process textures of this image subtype (e.g. `png`), or `*`.
    #[arg(long, default_value = "*")]
    formats: String,

    /// WebP quality (0-100).
    #[arg(long)]
    quality: Option<u8>,
}

#[derive(Args, Debug)]
struct MozJpegArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Only process textures of this image subtype, or `*`.
    #[arg(long, default_value = "jpeg")]
    formats: String,

    /// MozJPEG quality (0-100).
    #[arg(long)]
    quality: Option<u8>,
}

#[derive(Args, Debug)]
struct OxiPngArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Only process textures of this image subtype, or `*`.
    #[arg(long, default_value = "png")]
    formats: String,

    /// OxiPNG optimization effort.
    #[arg(long)]
    effort: Option<u8>,
}

#[derive(Args, Debug)]
struct ToWebpArgs {
    #[command(flatten)]
    io: IoArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (io, profile) = match cli.cmd {
        Command::Webp(args) => {
            let profile = EncodeProfile::webp(&WebpOptions {
                slots: args.io.slots.clone(),
                formats: args.formats,
                quality: args.quality,
            })?;
            (args.io, profile)
        }
        Command::Mozjpeg(args) => {
            let profile = EncodeProfile::mozjpeg(&MozJpegOptions {
                slots: args.io.slots.clone(),
                formats: args.formats,
                quality: args.quality,
            })?;
            (args.io, profile)
        }
        Command::Oxipng(args) => {
            let profile = EncodeProfile::oxipng(&OxiPngOptions {
                slots: args.io.slots.clone(),
                formats: args.formats,
                effort: args.effort,
            })?;
            (args.io, profile)
        }
        Command::Towebp(args) => {
            let profile = EncodeProfile::to_webp(&ToWebpOptions {
                slots: args.io.slots.clone(),
            })?;
            (args.io, profile)
        }
    };

    run(io, &profile)
}

fn run(io: IoArgs, profile: &EncodeProfile) -> anyhow::Result<()> {
    let mut doc = Document::from_path(&io.in_path)?;
    let encoder = SquooshCli::new(SquooshCliOpts {
        program: io.encoder,
        ..SquooshCliOpts::from_env()
    });

    let n = compress_textures(&mut doc, profile, &encoder)?;

    if let Some(parent) = io.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    doc.write_to_path(&io.out)?;

    eprintln!("compressed {n} texture(s); wrote {}", io.out.display());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
