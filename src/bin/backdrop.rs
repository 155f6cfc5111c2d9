use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng as _;

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the CSS snippet for the active background.
    Css(SessionArgs),
    /// Print the normalized session JSON.
    Json(SessionArgs),
    /// Rasterize the preview to a PNG.
    Png(PngArgs),
    /// Print page and card contrast estimates.
    Contrast(SessionArgs),
    /// Print a fresh batch of cards as JSON.
    Cards(CardsArgs),
    /// Add image files to a session.
    Add(AddArgs),
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PngArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the viewport (current or legacy key).
    #[arg(long)]
    viewport: Option<String>,

    /// Override the output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Override the output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Background id for the left half of a split compare.
    #[arg(long)]
    compare_left: Option<String>,

    /// Background id for the right half of a split compare.
    #[arg(long)]
    compare_right: Option<String>,

    /// Exchange the split-compare halves.
    #[arg(long)]
    swap: bool,
}

#[derive(Parser, Debug)]
struct CardsArgs {
    /// Number of cards (clamped to 1..=12).
    #[arg(long, default_value_t = backdrop::DEFAULT_CARD_COUNT)]
    count: usize,

    /// Seed for a reproducible batch.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Session JSON to update; created when missing.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Image files to add.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Css(args) => cmd_css(args),
        Command::Json(args) => cmd_json(args),
        Command::Png(args) => cmd_png(args),
        Command::Contrast(args) => cmd_contrast(args),
        Command::Cards(args) => cmd_cards(args),
        Command::Add(args) => cmd_add(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_session(path: &Path) -> anyhow::Result<backdrop::SessionState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read session '{}'", path.display()))?;
    Ok(backdrop::session_from_json_str(&text))
}

fn emit(text: &str, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            write_file(path, text.as_bytes())?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn assets_root(in_path: &Path) -> PathBuf {
    in_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn cmd_css(args: SessionArgs) -> anyhow::Result<()> {
    let state = read_session(&args.in_path)?;
    emit(&state.css_snippet(), args.out.as_deref())
}

fn cmd_json(args: SessionArgs) -> anyhow::Result<()> {
    let state = read_session(&args.in_path)?;
    emit(&backdrop::session_to_json(&state)?, args.out.as_deref())
}

fn cmd_contrast(args: SessionArgs) -> anyhow::Result<()> {
    let state = read_session(&args.in_path)?;
    let page = state.page_contrast();
    let card = state.card_contrast();
    let text = format!(
        "page text (white): {page}\ncard text ({}): {} [white {:.2}:1, black {:.2}:1]",
        card.text_color.color(),
        card.report,
        card.ratio_white,
        card.ratio_black,
    );
    emit(&text, args.out.as_deref())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let mut state = read_session(&args.in_path)?;
    if let Some(key) = &args.viewport {
        let viewport = backdrop::resolve_viewport_key(key)
            .with_context(|| format!("unknown viewport '{key}'"))?;
        state = backdrop::reduce(state, backdrop::Action::SelectViewport(viewport.key.to_owned()));
    }

    let base = state.export_canvas();
    let canvas = backdrop::Canvas {
        width: args.width.unwrap_or(base.width),
        height: args.height.unwrap_or(base.height),
    };

    let find = |id: &Option<String>| -> anyhow::Result<Option<&backdrop::BackgroundEntry>> {
        match id {
            None => Ok(None),
            Some(id) => state
                .backgrounds
                .iter()
                .find(|e| &e.id == id)
                .map(Some)
                .with_context(|| format!("no background with id '{id}'")),
        }
    };
    let compare = backdrop::CompareSlots {
        left: find(&args.compare_left)?,
        right: find(&args.compare_right)?,
        swapped: args.swap,
    };

    let request = backdrop::RasterExportRequest::new(state.active_entry(), state.params, canvas)
        .with_compare(compare);
    let mut loader = backdrop::SourceLoader::with_root(assets_root(&args.in_path));
    let export = backdrop::export_raster(&request, &mut loader)?;
    if export.skipped_sources > 0 {
        eprintln!("warning: {} background(s) could not be decoded", export.skipped_sources);
    }

    write_file(&args.out, &export.png)?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        export.canvas.width,
        export.canvas.height
    );
    Ok(())
}

fn cmd_cards(args: CardsArgs) -> anyhow::Result<()> {
    let cards = match args.seed {
        Some(seed) => {
            backdrop::generate_cards_with(args.count, &mut rand::rngs::StdRng::seed_from_u64(seed))
        }
        None => backdrop::generate_cards(args.count),
    };
    let text = serde_json::to_string_pretty(&cards).context("serialize cards")?;
    emit(&text, None)
}

fn cmd_add(args: AddArgs) -> anyhow::Result<()> {
    let state = if args.in_path.exists() {
        read_session(&args.in_path)?
    } else {
        backdrop::SessionState::default()
    };

    let mut uploads = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        uploads.push(backdrop::UploadFile {
            name,
            media_type: None,
            bytes,
        });
    }

    let entries = backdrop::ingest_uploads(&uploads);
    let added = entries.len();
    let state = backdrop::reduce(state, backdrop::Action::AddBackgrounds(entries));
    write_file(&args.in_path, backdrop::session_to_json(&state)?.as_bytes())?;
    eprintln!(
        "added {added} of {} file(s) to {}",
        args.files.len(),
        args.in_path.display()
    );
    Ok(())
}
