use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use keyglass::{OPACITY_LEVELS, VariationCache, apply_effects, decode_and_resize};
use keyglass::assets::decode::read_source_bytes;

#[derive(Parser, Debug)]
#[command(name = "keyglass", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the overlay image with one opacity/invert setting to a PNG.
    Preview(PreviewArgs),
    /// Precompute every cached variation and write each as a PNG.
    Variations(VariationsArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image; omitted uses keymap.png beside the executable, then the
    /// embedded fallback.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Overlay opacity in [0, 1].
    #[arg(long, default_value_t = 0.8)]
    opacity: f32,

    /// Invert the overlay colors.
    #[arg(long)]
    invert: bool,

    /// Bounding width for the decoded image.
    #[arg(long, default_value_t = 1920)]
    max_width: u32,

    /// Bounding height for the decoded image.
    #[arg(long, default_value_t = 1080)]
    max_height: u32,
}

#[derive(Parser, Debug)]
struct VariationsArgs {
    /// Input image; omitted uses keymap.png beside the executable, then the
    /// embedded fallback.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output directory for variation PNGs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Bounding width for the decoded image.
    #[arg(long, default_value_t = 1920)]
    max_width: u32,

    /// Bounding height for the decoded image.
    #[arg(long, default_value_t = 1080)]
    max_height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Variations(args) => cmd_variations(args),
    }
}

fn write_png(path: &std::path::Path, pixels: &keyglass::PixelBuffer) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        pixels.as_bytes(),
        pixels.width(),
        pixels.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let encoded = read_source_bytes(args.in_path.as_deref());
    let mut frame = decode_and_resize(&encoded, args.max_width, args.max_height)?;
    apply_effects(&mut frame, args.opacity.clamp(0.0, 1.0), args.invert);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_variations(args: VariationsArgs) -> anyhow::Result<()> {
    let encoded = read_source_bytes(args.in_path.as_deref());
    let base = decode_and_resize(&encoded, args.max_width, args.max_height)?;

    let cache = VariationCache::new();
    cache.populate(&base);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0usize;
    for &opacity in &OPACITY_LEVELS {
        for invert in [false, true] {
            let Some(pixels) = cache.variation(opacity, invert) else {
                eprintln!("variation {opacity}/{invert} missing (allocation failed?)");
                continue;
            };
            let name = format!(
                "variation_{:03}_{}.png",
                (opacity * 100.0) as u32,
                if invert { "inverted" } else { "normal" }
            );
            write_png(&args.out_dir.join(&name), &pixels)?;
            written += 1;
        }
    }

    let (w, h) = base.dimensions();
    eprintln!(
        "wrote {written} variations ({w}x{h}) to {}",
        args.out_dir.display()
    );
    Ok(())
}
