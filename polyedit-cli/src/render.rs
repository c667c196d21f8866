//! SVG rendering of a polygon and its vertex handles.
//!
//! Draws what the interactive host draws: the image centred on the origin, a
//! closed path through the points in order (wrapping from the last point to
//! the first), and one handle per vertex offset.

use std::fmt::{self, Write};

use polyedit_core::{interaction::HANDLE_RADIUS, Polygon};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Padding around the content (fraction of its extent)
    pub padding: f64,
    /// Stroke width for the polygon outline
    pub stroke_width: f64,
    /// Radius of the vertex handles
    pub handle_radius: f64,
    /// Whether to label handles with their offsets
    pub show_offsets: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 0.1,
            stroke_width: 1.0,
            handle_radius: HANDLE_RADIUS,
            show_offsets: false,
        }
    }
}

/// Background image, drawn centred on the origin.
#[derive(Debug, Clone)]
pub struct Backdrop<'a> {
    pub href: &'a str,
    pub width: f64,
    pub height: f64,
}

const BACKGROUND: &str = "#000000";
const OUTLINE: &str = "#ffffff";
const HANDLE_FILL: &str = "#ffffff";
const HANDLE_OPACITY: f64 = 0.8;

/// Render a polygon (and optional backdrop image) to an SVG string
pub fn render_svg(polygon: &Polygon, backdrop: Option<&Backdrop>, config: &RenderConfig) -> Result<String, fmt::Error> {
    let (min_x, max_x, min_y, max_y) = compute_bounds(polygon, backdrop, config.handle_radius);

    // Add padding
    let width = max_x - min_x;
    let height = max_y - min_y;
    let pad_x = width * config.padding;
    let pad_y = height * config.padding;

    let view_min_x = min_x - pad_x;
    let view_min_y = min_y - pad_y;
    let view_width = width + 2.0 * pad_x;
    let view_height = height + 2.0 * pad_y;

    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        config.width, config.height, view_min_x, view_min_y, view_width, view_height
    )?;

    writeln!(
        &mut svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        view_min_x, view_min_y, view_width, view_height, BACKGROUND
    )?;

    if let Some(b) = backdrop {
        writeln!(
            &mut svg,
            r#"  <image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            escape(b.href), -b.width / 2.0, -b.height / 2.0, b.width, b.height
        )?;
    }

    let mut vertices = polygon.vertices();
    if let Some(first) = vertices.next() {
        let mut path = format!("M {} {}", first.x, first.y);
        for v in vertices {
            write!(&mut path, " L {} {}", v.x, v.y)?;
        }
        path.push_str(" Z");

        writeln!(
            &mut svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            path, OUTLINE, config.stroke_width
        )?;
    }

    for (offset, v) in polygon.offsets().zip(polygon.vertices()) {
        writeln!(
            &mut svg,
            r#"  <circle data-offset="{}" cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
            offset, v.x, v.y, config.handle_radius, HANDLE_FILL, HANDLE_OPACITY
        )?;
        if config.show_offsets {
            writeln!(
                &mut svg,
                r#"  <text x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
                v.x + config.handle_radius * 1.5, v.y - config.handle_radius * 1.5, config.handle_radius * 4.0, OUTLINE, offset
            )?;
        }
    }

    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

/// Compute bounding box for the polygon, its handles and the backdrop
fn compute_bounds(polygon: &Polygon, backdrop: Option<&Backdrop>, handle_radius: f64) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for v in polygon.vertices() {
        min_x = min_x.min(v.x - handle_radius);
        max_x = max_x.max(v.x + handle_radius);
        min_y = min_y.min(v.y - handle_radius);
        max_y = max_y.max(v.y + handle_radius);
    }

    if let Some(b) = backdrop {
        min_x = min_x.min(-b.width / 2.0);
        max_x = max_x.max(b.width / 2.0);
        min_y = min_y.min(-b.height / 2.0);
        max_y = max_y.max(b.height / 2.0);
    }

    // Handle empty/degenerate cases
    if min_x > max_x {
        min_x = -1.0;
        max_x = 1.0;
    }
    if min_y > max_y {
        min_y = -1.0;
        max_y = 1.0;
    }

    (min_x, max_x, min_y, max_y)
}
