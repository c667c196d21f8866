//! Persisting an editing session to a string key/value store.
//!
//! The layout mirrors browser `localStorage`: the polygon's JSON text, the
//! image source and the view scale, each under a fixed key.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{editor::Polygon, error::StoreError, view::View};

pub const POINTS_KEY: &str = "mainPolygonPoints";
pub const IMAGE_KEY: &str = "sourcePath";
pub const SCALE_KEY: &str = "mainContainerScale";

pub type Result<T> = std::result::Result<T, StoreError>;

/// String key/value storage.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Everything the tool restores on startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Session {
    #[tsify(type = "Points")]
    pub polygon: Polygon,
    /// Image source, typically a data URL.
    pub image: Option<String>,
    pub view: View,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a session from `store`; absent keys keep their defaults.
    ///
    /// Stored points that fail to parse are an error and nothing is applied.
    /// An unreadable scale only falls back to the default.
    pub fn load<S: Store + ?Sized>(store: &S) -> Result<Session> {
        let mut session = Session::new();
        if let Some(text) = store.get(POINTS_KEY)? {
            session.polygon.restore(&text)?;
        }
        session.image = store.get(IMAGE_KEY)?;
        if let Some(text) = store.get(SCALE_KEY)? {
            match serde_json::from_str(&text) {
                Ok(scale) => session.view.scale = scale,
                Err(e) => warn!("ignoring stored scale {:?}: {}", text, e),
            }
        }
        debug!(
            "loaded session: {} vertices, image: {}, scale: {}",
            session.polygon.num_vertices(),
            session.image.is_some(),
            session.view.scale,
        );
        Ok(session)
    }

    pub fn save_points<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(POINTS_KEY, &self.polygon.serialize())
    }

    pub fn save_image<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        match &self.image {
            Some(image) => store.set(IMAGE_KEY, image),
            None => store.remove(IMAGE_KEY),
        }
    }

    pub fn save_view<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        let text = serde_json::to_string(&self.view.scale)
            .map_err(|source| StoreError::Encode { key: SCALE_KEY, source })?;
        store.set(SCALE_KEY, &text)
    }

    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        self.save_points(store)?;
        self.save_image(store)?;
        self.save_view(store)
    }

    /// Empty the polygon and drop its stored points.
    pub fn clear_points<S: Store + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        self.polygon.clear();
        store.remove(POINTS_KEY)
    }
}
