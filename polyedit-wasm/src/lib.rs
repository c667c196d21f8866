//! WASM bindings for the polygon editing model.
//!
//! The browser host (scene graph, pointer wiring, buttons) owns the flat point
//! array and the controller state; every call takes them as plain JS values and
//! hands back the updated values. Offsets returned here are only valid until
//! the next insert/remove, after which the host must rebuild its vertex handles.

use log::{error, info, warn};
use polyedit_core::{
    editor::{self, Points, Polygon},
    error::StoreError,
    export, Controller, InputEvent, Outcome, Session, Store, View,
};
use serde::{de::DeserializeOwned, Serialize};
use tsify::Tsify;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;
use web_sys::Storage;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty, null, not a string, or unrecognized.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) {
    let level: Option<String> = serde_wasm_bindgen::from_value(level).unwrap_or_else(|e| {
        warn!("log level is not a string ({}), using info", e);
        None
    });
    let level = polyedit_core::parse_log_level(level.as_deref());
    log::set_max_level(level);
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

fn err_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Points after an insertion, plus where the new vertex went.
#[derive(Debug, Clone, Serialize, Tsify)]
pub struct Inserted {
    pub points: Points,
    pub index: usize,
}

/// Everything that may change when one input event is dispatched.
#[derive(Debug, Clone, Serialize, Tsify)]
pub struct Dispatched {
    pub controller: Controller,
    pub points: Points,
    pub outcome: Outcome,
}

/// Offset of the start of the polygon edge nearest to `(x, y)`.
///
/// # Arguments
/// * `points` - Flat coordinate array `[x0, y0, x1, y1, …]`.
///
/// # Returns
/// An even offset; `0` when there are fewer than two vertices.
#[wasm_bindgen]
pub fn nearest_edge_start(points: JsValue, x: f64, y: f64) -> Result<usize, JsValue> {
    let polygon: Polygon = from_js(points, "points")?;
    Ok(polygon.nearest_edge_start(x, y))
}

/// Inserts a vertex next to the nearest edge (or appends, with fewer than two vertices).
///
/// # Returns
/// An [`Inserted`] with the new points and the new vertex's offset.
#[wasm_bindgen]
pub fn insert_vertex(points: JsValue, x: f64, y: f64) -> Result<JsValue, JsValue> {
    let mut polygon: Polygon = from_js(points, "points")?;
    let index = polygon.insert_vertex(x, y);
    to_js(&Inserted { points: polygon.into(), index })
}

/// Removes the vertex at `index`; throws on an odd or out-of-range offset.
#[wasm_bindgen]
pub fn remove_vertex(points: JsValue, index: usize) -> Result<JsValue, JsValue> {
    let mut polygon: Polygon = from_js(points, "points")?;
    polygon.remove_vertex(index).map_err(err_js)?;
    to_js(&polygon)
}

/// Moves the vertex at `index` to `(x, y)`; throws on an odd or out-of-range offset.
#[wasm_bindgen]
pub fn move_vertex(points: JsValue, index: usize, x: f64, y: f64) -> Result<JsValue, JsValue> {
    let mut polygon: Polygon = from_js(points, "points")?;
    polygon.move_vertex(index, x, y).map_err(err_js)?;
    to_js(&polygon)
}

/// JSON text form of the points.
#[wasm_bindgen]
pub fn serialize(points: JsValue) -> Result<String, JsValue> {
    let polygon: Polygon = from_js(points, "points")?;
    Ok(polygon.serialize())
}

/// Parses the JSON text form of the points; throws on malformed input.
#[wasm_bindgen]
pub fn deserialize(text: &str) -> Result<JsValue, JsValue> {
    let points = editor::deserialize(text).map_err(err_js)?;
    to_js(&points)
}

/// Points in image pixel coordinates, rounded (what "Log Polygon" prints).
#[wasm_bindgen]
pub fn export_points(points: JsValue, image_width: f64, image_height: f64) -> Result<JsValue, JsValue> {
    let polygon: Polygon = from_js(points, "points")?;
    to_js(&export::export_points(polygon.points(), image_width, image_height))
}

/// Creates empty gesture state for [`dispatch`].
#[wasm_bindgen]
pub fn make_controller() -> Result<JsValue, JsValue> {
    to_js(&Controller::new())
}

/// Feeds one input event through the controller.
///
/// # Arguments
/// * `controller` - State from [`make_controller`] or a previous [`dispatch`].
/// * `points` - Current flat coordinate array.
/// * `event` - An `InputEvent`, e.g. `{type: "PointerDown", x, y}`.
///
/// # Returns
/// A [`Dispatched`] with the new controller state, points and outcome. When
/// `outcome.rebuildHandles` is set, every handle must be recreated.
#[wasm_bindgen]
pub fn dispatch(controller: JsValue, points: JsValue, event: JsValue) -> Result<JsValue, JsValue> {
    let mut controller: Controller = from_js(controller, "controller")?;
    let mut polygon: Polygon = from_js(points, "points")?;
    let event: InputEvent = from_js(event, "event")?;
    let outcome = controller.dispatch(&mut polygon, event).map_err(err_js)?;
    to_js(&Dispatched { controller, points: polygon.into(), outcome })
}

/// Tint (0xRRGGBB) for the handle at `index`.
#[wasm_bindgen]
pub fn handle_tint(controller: JsValue, index: usize) -> Result<u32, JsValue> {
    let controller: Controller = from_js(controller, "controller")?;
    Ok(controller.handle_tint(index))
}

/// Applies one wheel event to the view and returns it.
#[wasm_bindgen]
pub fn zoom(view: JsValue, delta_y: f64) -> Result<JsValue, JsValue> {
    let mut view: View = from_js(view, "view")?;
    view.zoom(delta_y);
    to_js(&view)
}

// ============================================================================
// localStorage persistence
// ============================================================================

struct LocalStore(Storage);

impl LocalStore {
    fn open() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        Ok(LocalStore(storage))
    }
}

fn backend(e: JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", e))
}

impl Store for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.get_item(key).map_err(backend)
    }
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.set_item(key, value).map_err(backend)
    }
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.0.remove_item(key).map_err(backend)
    }
}

/// Restores the session saved in localStorage.
///
/// # Returns
/// A `Session` (`{polygon, image, view}`); throws if the stored points are malformed.
#[wasm_bindgen]
pub fn load_session() -> Result<JsValue, JsValue> {
    let store = LocalStore::open()?;
    let session = Session::load(&store).map_err(err_js)?;
    to_js(&session)
}

#[wasm_bindgen]
pub fn save_points(points: JsValue) -> Result<(), JsValue> {
    let mut store = LocalStore::open()?;
    let session = Session { polygon: from_js(points, "points")?, ..Session::default() };
    session.save_points(&mut store).map_err(err_js)
}

#[wasm_bindgen]
pub fn save_view(view: JsValue) -> Result<(), JsValue> {
    let mut store = LocalStore::open()?;
    let session = Session { view: from_js(view, "view")?, ..Session::default() };
    session.save_view(&mut store).map_err(err_js)
}

/// Stores the image source (a data URL), or forgets it when `image` is null.
#[wasm_bindgen]
pub fn save_image(image: Option<String>) -> Result<(), JsValue> {
    let mut store = LocalStore::open()?;
    let session = Session { image, ..Session::default() };
    session.save_image(&mut store).map_err(err_js)
}

/// Forgets the stored points ("Clear Polygon").
#[wasm_bindgen]
pub fn clear_points() -> Result<(), JsValue> {
    let mut store = LocalStore::open()?;
    Session::default().clear_points(&mut store).map_err(err_js)
}
