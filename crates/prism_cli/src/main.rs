// Render a JSON scene to a PNG.
// Run with: cargo run --release -- <scene.json> [output.png] [options]

use anyhow::{bail, Context, Result};
use prism_renderer::{render, PixelBuffer, RenderConfig};
use std::env;
use std::path::{Path, PathBuf};

const USAGE: &str = "Usage: prism <scene.json> [output.png] [--samples N] [--threads N] [--seed N] [--sequential]";

/// Command line options
#[derive(Debug)]
struct Options {
    scene: PathBuf,
    output: PathBuf,
    config: RenderConfig,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .with_context(|| format!("invalid value for {flag}: {value}"))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut args = args.into_iter();
    let mut positional = Vec::new();
    let mut config = RenderConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--samples" => config.num_sections = parse_value(&arg, args.next())?,
            "--threads" => config.threads = Some(parse_value(&arg, args.next())?),
            "--seed" => config.seed = Some(parse_value(&arg, args.next())?),
            "--sequential" => config.parallel = false,
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    let mut positional = positional.into_iter();
    let scene = positional.next().with_context(|| USAGE.to_string())?;
    let output = positional.next().unwrap_or_else(|| PathBuf::from("render.png"));
    if positional.next().is_some() {
        bail!("too many arguments\n{USAGE}");
    }

    Ok(Options { scene, output, config })
}

fn save_png(image: &PixelBuffer, path: &Path) -> Result<()> {
    // Buffer rows run bottom-up; PNG rows run top-down
    let bytes = image.to_rgb_bytes_top_down();
    let png = image::RgbImage::from_raw(image.width(), image.height(), bytes)
        .context("pixel buffer does not match image dimensions")?;
    png.save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args(env::args().skip(1))?;

    let scene = prism_core::load_scene(&options.scene)
        .with_context(|| format!("failed to load scene {}", options.scene.display()))?;

    let image = render(&scene, &options.config).context("render failed")?;

    save_png(&image, &options.output)?;
    log::info!("Saved to {}", options.output.display());

    Ok(())
}
