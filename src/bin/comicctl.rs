//! comicctl - snapshot generator and terminal front end for the comics viewer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use comic_shelf::services::catalog::Catalog;
use comic_shelf::services::snapshot::write_snapshot;
use comic_shelf::viewer::controller::Viewer;
use comic_shelf::viewer::query::ViewerQuery;
use comic_shelf::viewer::source::{ApiSource, DataSource, LocalSource, SnapshotSource};
use comic_shelf::viewer::state::{Key, Navigation};
use comic_shelf::viewer::view::ViewerView;

#[derive(Parser, Debug)]
#[command(name = "comicctl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comics root directory.
    #[arg(long, env = "COMICS_DIR", default_value = "comics", global = true)]
    comics_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write chapters.json for every comic (or one) so the viewer works without a server.
    Generate {
        /// Only this comic.
        #[arg(long)]
        comic: Option<String>,

        /// Also write into <DIR>/comics/<slug>/ when DIR exists.
        #[arg(long, value_name = "DIR")]
        mirror: Option<PathBuf>,
    },
    /// Read a comic chapter by chapter.
    Browse {
        #[arg(long)]
        comic: Option<String>,

        #[arg(long)]
        chapter: Option<String>,

        #[arg(long, value_enum, default_value_t = SourceKind::Local)]
        source: SourceKind,

        /// Server or static host for the api and snapshot sources.
        #[arg(long, default_value = "http://localhost:3000/")]
        base_url: Url,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceKind {
    Api,
    Snapshot,
    Local,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let catalog = Catalog::new(args.comics_dir);

    match args.command {
        Command::Generate { comic, mirror } => generate(&catalog, comic, mirror).await,
        Command::Browse {
            comic,
            chapter,
            source,
            base_url,
        } => {
            let query = ViewerQuery { comic, chapter };
            let source: Box<dyn DataSource> = match source {
                SourceKind::Api => Box::new(ApiSource::new(base_url)),
                SourceKind::Snapshot => Box::new(SnapshotSource::new(base_url)),
                SourceKind::Local => Box::new(LocalSource::new(catalog)),
            };
            browse(Viewer::new(source), query).await
        }
    }
}

async fn generate(catalog: &Catalog, comic: Option<String>, mirror: Option<PathBuf>) -> Result<()> {
    let slugs = match comic {
        Some(slug) => vec![slug],
        None => catalog.comic_slugs().await,
    };
    if slugs.is_empty() {
        log::warn!("No comics found in {}", catalog.comics_dir().display());
    }

    for slug in slugs {
        let report = write_snapshot(catalog, &slug, mirror.as_deref())
            .await
            .with_context(|| format!("Failed to snapshot comic {}", slug))?;
        log::info!(
            "Generated chapters.json for {} with {} chapters",
            report.slug,
            report.chapters
        );
        for path in report.written.iter().skip(1) {
            log::info!("Also wrote {}", path.display());
        }
    }
    Ok(())
}

async fn browse<S: DataSource>(mut viewer: Viewer<S>, query: ViewerQuery) -> Result<()> {
    viewer.open(query).await;
    print_view(&viewer.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let nav = match line.trim() {
            "q" | "quit" => break,
            "n" | "next" => Navigation::Next,
            "p" | "prev" => Navigation::Previous,
            "right" => Navigation::Key(Key::ArrowRight),
            "left" => Navigation::Key(Key::ArrowLeft),
            other => match other.parse::<usize>() {
                Ok(index) => Navigation::Select(index),
                Err(_) => {
                    println!("commands: n, p, left, right, <chapter index>, q");
                    continue;
                }
            },
        };
        viewer.navigate(nav).await;
        print_view(&viewer.view());
    }
    Ok(())
}

fn print_view(view: &ViewerView) {
    println!();
    println!("== {}", view.heading);
    if let Some(address) = &view.address {
        println!("   ?{}", address);
    }
    for option in &view.options {
        let marker = if option.selected { '*' } else { ' ' };
        println!(" {} [{}] {}", marker, option.index, option.label);
    }
    match &view.message {
        Some(message) => println!("   {}", message),
        None => {
            for page in &view.pages {
                println!("   {}", page.url);
            }
        }
    }
    println!(
        "   prev: {}  next: {}",
        if view.prev_enabled { "on" } else { "off" },
        if view.next_enabled { "on" } else { "off" }
    );
}
