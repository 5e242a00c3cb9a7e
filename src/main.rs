use clap::{Parser, Subcommand};
use emote_sizer::{archive, config, output, process, types::SourceImage};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "emote-sizer")]
#[command(about = "Resize images into platform emote and badge sizes")]
#[command(long_about = "\
Resize images into platform emote and badge sizes

Every input is resized to each emote and badge size of the chosen platform:

  twitch   emotes 28, 56, 112   badges 18, 36, 72
  discord  emotes 128           badges 64
  youtube  emotes 32            badges 32

Static images (PNG, JPEG, WebP, BMP) keep their format. Animated GIFs keep
their frame count and timing and get a single global palette.

Outputs are named <name>_<size>x<size>.<ext>. If any input fails, nothing is
written.

Run 'emote-sizer gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline internals to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize images for a platform
    Resize(ResizeArgs),
    /// List supported platforms and their sizes
    Platforms,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Target platform: twitch, discord or youtube (overrides config)
    #[arg(long, short)]
    platform: Option<String>,

    /// Directory the resized files are written to
    #[arg(long, short, default_value = "resized")]
    output: PathBuf,

    /// Also write every file into a single zip archive
    #[arg(long)]
    zip: bool,

    /// Images to resize
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Resize(args) => {
            let resizer_config = match &cli.config {
                Some(path) => config::load_config_file(path)?,
                None => config::load_config(Path::new("."))?,
            };
            resize(&resizer_config, args)?;
        }
        Command::Platforms => {
            output::print_platforms();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn resize(
    resizer_config: &config::ResizerConfig,
    args: ResizeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    init_thread_pool(&resizer_config.processing);

    let sources = args
        .files
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>, _>>()?;
    let platform = args.platform.as_deref().unwrap_or(&resizer_config.platform);
    let process_config = process::ProcessConfig::from_resizer_config(resizer_config);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::run(&sources, platform, &process_config, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    let groups = result?;

    std::fs::create_dir_all(&args.output)?;
    for file in groups.iter().flat_map(|g| g.files.iter()) {
        std::fs::write(args.output.join(&file.name), &file.bytes)?;
    }
    let json = serde_json::to_string_pretty(&groups)?;
    std::fs::write(args.output.join("manifest.json"), json)?;

    if args.zip {
        let archive_path = args.output.join(&resizer_config.archive_name);
        std::fs::write(&archive_path, archive::export_zip(&groups)?)?;
        info!(path = %archive_path.display(), "archive written");
    }

    println!();
    output::print_results(&groups);
    println!("==> Wrote {}", args.output.display());
    Ok(())
}

/// Read an input file, deriving its MIME type from the extension.
fn read_source(path: &Path) -> std::io::Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream");
    Ok(SourceImage::new(name, mime, bytes))
}

/// Diagnostics go to stderr so stdout stays the progress and result listing.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
