use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use starbeams::{
    Canvas, FeatureSink, InMemoryExporter, JitterMode, JsonFileFeatureSink, LogFeatureSink,
    PngExporter, RenderConfig, SceneParameters, Seed, Sketch, SplitMix64,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "starbeams", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an artwork to completion and write the full-resolution still.
    Render(RenderArgs),
    /// Print the feature labels of a seed as JSON.
    Features(FeaturesArgs),
    /// Render an artwork and write the letterboxed visible-canvas frame.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Seed text. A clock-derived seed is used when omitted.
    #[arg(long)]
    seed: Option<String>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Buffer width override.
    #[arg(long)]
    width: Option<u32>,

    /// Buffer height override.
    #[arg(long)]
    height: Option<u32>,

    /// Derive scatter thinning from the seed.
    #[arg(long, default_value_t = false)]
    scatter: bool,

    /// Draw the starfield and the beams on one surface.
    #[arg(long, default_value_t = false)]
    single_buffer: bool,

    /// Offset the y axis against the x axis when jittering.
    #[arg(long, default_value_t = false)]
    mirrored_jitter: bool,

    /// Draw a progress bar on blitted frames.
    #[arg(long, default_value_t = false)]
    debug_overlay: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for the still.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Also write the feature labels to this JSON file.
    #[arg(long)]
    features_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FeaturesArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Visible canvas size, `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    visible: Option<Canvas>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Features(args) => cmd_features(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (seed, mut config) = load(&args.scene)?;
    if let Some(dir) = args.out_dir {
        config.out_dir = dir;
    }
    config.auto_export = true;
    let mut exporter = PngExporter::new(config.out_dir.clone());

    let mut sketch = match &args.features_out {
        Some(path) => {
            let mut sink = Tee(LogFeatureSink, JsonFileFeatureSink::new(path));
            Sketch::on_setup(seed, config, &mut sink)
        }
        None => Sketch::on_setup(seed, config, &mut LogFeatureSink),
    }
    .context("set up artwork")?;

    let summary = sketch
        .run_to_completion(&mut exporter)
        .context("render artwork")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    if let Some(name) = &summary.exported {
        eprintln!("wrote {}", exporter.path_for(name).display());
    }
    Ok(())
}

fn cmd_features(args: FeaturesArgs) -> anyhow::Result<()> {
    let (seed, config) = load(&args.scene)?;
    let mut rng = SplitMix64::from_seed(&seed);
    let params = SceneParameters::derive(&mut rng, config.variant)?;
    println!("{}", params.labels().to_json_string());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let (seed, mut config) = load(&args.scene)?;
    if let Some(visible) = args.visible {
        config.visible = visible;
    }
    config.auto_export = false;

    let mut sketch =
        Sketch::on_setup(seed, config, &mut LogFeatureSink).context("set up artwork")?;
    sketch
        .run_to_completion(&mut InMemoryExporter::new())
        .context("render artwork")?;
    let frame = sketch.preview().context("run finished without a preview")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    starbeams::sink::write_png(frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn load(args: &SceneArgs) -> anyhow::Result<(Seed, RenderConfig)> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(w) = args.width {
        config.buffer.width = w;
    }
    if let Some(h) = args.height {
        config.buffer.height = h;
    }
    config.variant.scatter |= args.scatter;
    config.variant.dual_buffer &= !args.single_buffer;
    config.variant.debug_overlay |= args.debug_overlay;
    if args.mirrored_jitter {
        config.variant.jitter = JitterMode::Mirrored;
    }
    config.validate().context("invalid configuration")?;

    let seed = match &args.seed {
        Some(s) => Seed::new(s.as_str()),
        None => Seed::from_clock(),
    };
    Ok((seed, config))
}

fn parse_size(s: &str) -> Result<Canvas, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let height = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Canvas::new(width, height).map_err(|e| e.to_string())
}

struct Tee<A, B>(A, B);

impl<A: FeatureSink, B: FeatureSink> FeatureSink for Tee<A, B> {
    fn publish(&mut self, labels: &starbeams::FeatureLabels) -> starbeams::StarbeamsResult<()> {
        self.0.publish(labels)?;
        self.1.publish(labels)
    }
}
