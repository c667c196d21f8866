//! Command-line polygon editing.
//!
//! Every command loads a session file (the same keys the browser tool keeps in
//! localStorage), applies one editing operation and writes the file back when
//! anything changed.

mod render;
mod store;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use polyedit_core::{export, Action, Controller, InputEvent, Polygon, Session};

use crate::render::{render_svg, Backdrop, RenderConfig};
use crate::store::FileStore;

#[derive(Parser)]
#[command(name = "polyedit")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("POLYEDIT_BUILD_SHA"), ")"))]
#[command(about = "Edit a polygon traced over an image", long_about = None)]
struct Cli {
    /// Session file (JSON; `.gz` for gzip)
    #[arg(short, long, global = true, default_value = "polyedit-session.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the polygon, image source and view scale
    Show,

    /// Add a vertex, splitting the nearest edge
    Insert {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Remove the vertex at an offset (0, 2, 4, ...)
    Remove { index: usize },

    /// Move the vertex at an offset
    Move {
        index: usize,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Print the start offset of the edge nearest to a point
    Nearest {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Remove all vertices
    Clear,

    /// Print points in image pixel coordinates
    Export {
        /// Image width in pixels
        #[arg(long)]
        width: f64,

        /// Image height in pixels
        #[arg(long)]
        height: f64,

        /// Print `[x, y]` pairs instead of a flat list
        #[arg(long)]
        pairs: bool,
    },

    /// Render the polygon and its handles to SVG
    Render {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Draw the session image with this width (requires --image-height)
        #[arg(long, requires = "image_height")]
        image_width: Option<f64>,

        /// Draw the session image with this height
        #[arg(long, requires = "image_width")]
        image_height: Option<f64>,

        /// Label handles with their offsets
        #[arg(long)]
        show_offsets: bool,
    },

    /// Feed a JSON array of input events through the interaction controller
    Replay {
        /// File containing e.g. [{"type": "PointerDown", "x": 1, "y": 2}, {"type": "PointerUp"}]
        events: PathBuf,
    },

    /// Apply a wheel delta to the view scale
    Zoom {
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },

    /// Set (or with no argument, forget) the image source
    Image { source: Option<String> },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut store = FileStore::open(&cli.file)?;
    let mut session = Session::load(&store)
        .with_context(|| format!("Failed to load session from {}", store.path().display()))?;

    let changed = match cli.command {
        Commands::Show => {
            println!("vertices: {}", session.polygon.num_vertices());
            println!("points: {}", session.polygon.serialize());
            println!("image: {}", session.image.as_deref().unwrap_or("none"));
            println!("scale: {}", session.view.scale);
            false
        }
        Commands::Insert { x, y } => {
            let index = session.polygon.insert_vertex(x, y);
            info!("inserted ({}, {}) at offset {}", x, y, index);
            session.save_points(&mut store)?;
            println!("{}", index);
            true
        }
        Commands::Remove { index } => {
            session.polygon.remove_vertex(index)?;
            info!("removed vertex at offset {}", index);
            session.save_points(&mut store)?;
            true
        }
        Commands::Move { index, x, y } => {
            session.polygon.move_vertex(index, x, y)?;
            info!("moved vertex at offset {} to ({}, {})", index, x, y);
            session.save_points(&mut store)?;
            true
        }
        Commands::Nearest { x, y } => {
            println!("{}", session.polygon.nearest_edge_start(x, y));
            false
        }
        Commands::Clear => {
            session.clear_points(&mut store)?;
            info!("cleared polygon");
            true
        }
        Commands::Export { width, height, pairs } => {
            let points = session.polygon.points();
            let json = if pairs {
                serde_json::to_string(&export::export_pairs(points, width, height))?
            } else {
                serde_json::to_string(&export::export_points(points, width, height))?
            };
            println!("{}", json);
            false
        }
        Commands::Render { output, image_width, image_height, show_offsets } => {
            let backdrop = match (session.image.as_deref(), image_width, image_height) {
                (Some(href), Some(width), Some(height)) => Some(Backdrop { href, width, height }),
                _ => None,
            };
            let config = RenderConfig { show_offsets, ..RenderConfig::default() };
            let svg = render_svg(&session.polygon, backdrop.as_ref(), &config)?;
            match output {
                Some(path) => {
                    fs::write(&path, svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => print!("{}", svg),
            }
            false
        }
        Commands::Replay { events } => {
            let text = fs::read_to_string(&events)
                .with_context(|| format!("Failed to read {}", events.display()))?;
            let events: Vec<InputEvent> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse events in {}", events.display()))?;
            let (actions, dirty) = replay(&mut session.polygon, events)?;
            for action in actions {
                println!("{}", action);
            }
            if dirty {
                session.save_points(&mut store)?;
            }
            info!("replayed into {}", session.polygon);
            dirty
        }
        Commands::Zoom { delta } => {
            session.view.zoom(delta);
            session.save_view(&mut store)?;
            println!("{}", session.view.scale);
            true
        }
        Commands::Image { source } => {
            session.image = source;
            session.save_image(&mut store)?;
            true
        }
    };

    if changed {
        store.save()?;
    }
    Ok(())
}

/// Dispatch `events` onto `polygon` with a fresh controller.
///
/// Returns each event's action, and whether the points differ from before the
/// first event (a drag still in progress at the end counts).
fn replay(polygon: &mut Polygon, events: Vec<InputEvent>) -> Result<(Vec<Action>, bool)> {
    let before = polygon.clone();
    let mut controller = Controller::new();
    let mut actions = Vec::with_capacity(events.len());
    for (i, event) in events.into_iter().enumerate() {
        let outcome = controller
            .dispatch(polygon, event)
            .with_context(|| format!("Event {} ({:?}) failed", i, event))?;
        actions.push(outcome.action);
    }
    Ok((actions, *polygon != before))
}
