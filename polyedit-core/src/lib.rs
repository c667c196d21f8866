#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

// Organized modules
pub mod editor;
pub mod geometry;
pub mod interaction;
pub mod session;

// Utility modules
pub mod error;
pub mod export;
pub mod view;

// Re-exports for convenience
pub use geometry::distance;
pub use geometry::r2;

// Re-export key types for external use
pub use editor::Polygon;
pub use error::{EditError, StoreError};
pub use interaction::{Action, Controller, InputEvent, Outcome};
pub use r2::R2;
pub use session::{MemoryStore, Session, Store};
pub use view::View;

/// Parse a log level string into LevelFilter; unknown names fall back to `Info`.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => {
            log::warn!("invalid log level: {}, using info", level);
            log::LevelFilter::Info
        }
    }
}
