use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use platemap::{PlateRenderer, PlateScene, RenderSettings, fonts, load_annotations, save_png, scene};

#[derive(Parser, Debug)]
#[command(
    name = "platemap",
    version,
    about = "Generate annotated 96-well plate maps from CSV input"
)]
struct Cli {
    /// Annotations CSV with columns: well, label and optionally fill,
    /// label_color.
    annotation_csv: PathBuf,

    /// Title string.
    #[arg(short, long)]
    title: Option<String>,

    /// Subtitle string. Literal `\n` sequences become line breaks.
    #[arg(short, long)]
    subtitle: Option<String>,

    /// Output image path. Defaults to `<timestamp>_plate_map.png` in the
    /// working directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the date stamp text.
    #[arg(short, long)]
    date: Option<String>,

    /// TTF/OTF font file. Defaults to a search over common system font
    /// locations.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let annotations = load_annotations(&cli.annotation_csv)
        .with_context(|| format!("load annotations '{}'", cli.annotation_csv.display()))?;

    let scene = PlateScene {
        title: cli.title,
        subtitle: cli.subtitle.map(|s| scene::unescape_newlines(&s)),
        date_text: cli
            .date
            .unwrap_or_else(|| chrono::Local::now().format("%Y.%m.%d").to_string()),
        annotations,
    };

    let font_bytes = fonts::load_font(cli.font.as_deref())?;
    let mut renderer = PlateRenderer::new(font_bytes, RenderSettings::default())?;
    let frame = renderer.render(&scene)?;

    let out_path = cli.output.unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H%M%S");
        PathBuf::from(format!("{timestamp}_plate_map.png"))
    });
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_png(&frame, &out_path)?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}
