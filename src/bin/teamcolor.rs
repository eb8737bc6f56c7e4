use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use teamcolor::{
    AssetCategory, BadgePlacement, CommitOutcome, CoordinateMapper, Mode, PresetBook, Rgb8,
    Session,
};

#[derive(Parser, Debug)]
#[command(name = "teamcolor", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recolor a base texture with a two-color team gradient.
    Recolor(RecolorArgs),
    /// Composite a badge onto an image at a display-space placement.
    Badge(BadgeArgs),
    /// List the color presets found in a preset file.
    Presets(PresetsArgs),
    /// Print how an image fits into a display area, as JSON.
    Fit(FitArgs),
}

#[derive(Parser, Debug)]
struct RecolorArgs {
    /// Base texture.
    #[arg(long)]
    base: PathBuf,

    /// Gradient-control texture (red channel drives the blend).
    #[arg(long)]
    gradient: PathBuf,

    /// Optional mask; its alpha limits where the recolor applies.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Optional glow-control texture (alternate mode only).
    #[arg(long)]
    glow: Option<PathBuf>,

    /// Texture pipeline.
    #[arg(long, value_enum, default_value_t = ModeChoice::Standard)]
    mode: ModeChoice,

    /// Endpoint color A (hex).
    #[arg(long)]
    color_a: Option<Rgb8>,

    /// Endpoint color B (hex).
    #[arg(long)]
    color_b: Option<Rgb8>,

    /// Take both endpoint colors from this named preset.
    #[arg(long, conflicts_with_all = ["color_a", "color_b"])]
    preset: Option<String>,

    /// Preset file (defaults are searched in the working directory).
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Run the per-row loops on the rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Output PNG path. In alternate mode the glow layer goes next to it.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BadgeArgs {
    /// Image the badge is composited onto.
    #[arg(long)]
    image: PathBuf,

    /// Badge image.
    #[arg(long)]
    badge: PathBuf,

    /// Display area the placement coordinates refer to, as WxH.
    #[arg(long, value_parser = parse_size, default_value = "800x600")]
    container: (f64, f64),

    /// Badge left edge in display units (default: centred).
    #[arg(long, requires = "y")]
    x: Option<f64>,

    /// Badge top edge in display units (default: centred).
    #[arg(long, requires = "x")]
    y: Option<f64>,

    /// Badge width in display units (default: a fifth of the displayed image).
    #[arg(long)]
    width: Option<f64>,

    /// Rotation in degrees, counter-clockwise.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation: f64,

    /// Badge opacity, 0-255.
    #[arg(long, default_value_t = 255)]
    opacity: u8,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Preset file (defaults are searched in the working directory).
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Case-insensitive substring filter on preset names.
    #[arg(long, default_value = "")]
    filter: String,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Source image size, as WxH.
    #[arg(long, value_parser = parse_size)]
    image_size: (f64, f64),

    /// Display area, as WxH.
    #[arg(long, value_parser = parse_size)]
    container: (f64, f64),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Standard,
    Alternate,
}

impl From<ModeChoice> for Mode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Standard => Mode::Standard,
            ModeChoice::Alternate => Mode::Alternate,
        }
    }
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width in '{s}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height in '{s}'"))?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Recolor(args) => cmd_recolor(args),
        Command::Badge(args) => cmd_badge(args),
        Command::Presets(args) => cmd_presets(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_presets(explicit: Option<&Path>) -> anyhow::Result<Option<PresetBook>> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    Ok(PresetBook::discover(explicit, &cwd)?)
}

fn cmd_recolor(args: RecolorArgs) -> anyhow::Result<()> {
    let mut sess = Session::new();
    sess.set_mode(args.mode.into());
    sess.set_parallel(args.parallel);

    sess.load(AssetCategory::Base, teamcolor::load_image(&args.base)?);
    sess.load(
        AssetCategory::GradientControl,
        teamcolor::load_image(&args.gradient)?,
    );
    if let Some(mask) = &args.mask {
        sess.load(AssetCategory::Mask, teamcolor::load_image(mask)?);
    }
    if let Some(glow) = &args.glow {
        sess.load(AssetCategory::GlowControl, teamcolor::load_image(glow)?);
    }

    if let Some(name) = &args.preset {
        let book = load_presets(args.presets.as_deref())?
            .context("no preset file found; pass --presets")?;
        sess.apply_preset(&book, name)?;
    } else {
        let (a, b) = sess.endpoints();
        sess.set_endpoints(args.color_a.unwrap_or(a), args.color_b.unwrap_or(b));
    }
    let (a, b) = sess.endpoints();
    tracing::info!(a = %a.to_hex(), b = %b.to_hex(), mode = ?sess.mode(), "recoloring");

    let output = sess.apply_team_color()?;
    teamcolor::save_image(output, &args.out)?;
    eprintln!("wrote {}", args.out.display());

    if let Some(glow) = sess.glow_output() {
        let glow_path = teamcolor::glow_output_path(&args.out);
        teamcolor::save_image(glow, &glow_path)?;
        eprintln!("wrote {}", glow_path.display());
    } else if args.glow.is_some() && !sess.mode().is_alternate() {
        tracing::warn!("--glow is only used in alternate mode");
    }
    Ok(())
}

fn cmd_badge(args: BadgeArgs) -> anyhow::Result<()> {
    let mut target = teamcolor::load_image(&args.image)?;
    let badge = teamcolor::load_image(&args.badge)?;

    let (cw, ch) = args.container;
    let mapping = CoordinateMapper::fit(target.width(), target.height(), cw, ch);
    let mut placement = BadgePlacement::new(&mapping, badge.width(), badge.height())?;
    if args.x.is_some() || args.width.is_some() {
        let r = placement.rect();
        placement.set_geometry(
            args.x.unwrap_or(r.x),
            args.y.unwrap_or(r.y),
            args.width.unwrap_or(r.width),
        );
    }
    placement.set_rotation(args.rotation);
    placement.set_opacity(args.opacity);

    let outcome = teamcolor::commit_badge(&placement, &badge, &mapping, &mut target)?;
    match outcome {
        CommitOutcome::Applied(r) => {
            teamcolor::save_image(&target, &args.out)?;
            eprintln!(
                "badge applied at {},{} ({}x{}); wrote {}",
                r.x,
                r.y,
                r.width,
                r.height,
                args.out.display()
            );
        }
        CommitOutcome::Skipped(r) => {
            anyhow::bail!(
                "badge maps to {}x{} source pixels, below the {} pixel minimum; nothing written",
                r.width,
                r.height,
                teamcolor::MIN_COMMIT_PIXELS
            );
        }
    }
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let Some(book) = load_presets(args.presets.as_deref())? else {
        anyhow::bail!("no preset file found; pass --presets");
    };
    for name in book.filter(&args.filter) {
        if let Some(pair) = book.resolve(name) {
            println!(
                "{name}\t{}\t{}",
                pair.primary.to_hex(),
                pair.secondary.to_hex()
            );
        }
    }
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let (iw, ih) = args.image_size;
    let (cw, ch) = args.container;
    let mapping = CoordinateMapper::fit(iw as u32, ih as u32, cw, ch);
    println!(
        "{}",
        serde_json::to_string_pretty(&mapping).context("serialize mapping")?
    );
    Ok(())
}
