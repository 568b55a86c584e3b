// crates/camerconnect-core/src/favorites.rs

//! Locally persisted favorites: an ordered list of business ids.
//!
//! This is the only state that survives navigation. On disk it is a plain
//! JSON array of ids, the same shape the web front-end keeps under the
//! `camerconnect_favorites` storage key.

use crate::directory::Directory;
use crate::error::Result;
use crate::model::BusinessRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

pub const FAVORITES_KEY: &str = "camerconnect_favorites";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    /// Returns `false` if the id was already a favorite.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns `false` if the id was not a favorite.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|x| x != id);
        self.ids.len() != before
    }

    /// Flip membership; returns the new state (`true` = now a favorite).
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_owned());
            true
        }
    }

    /// Favorites that still exist in `dir`, in favorite order.
    pub fn resolve<'a>(&self, dir: &'a Directory) -> Vec<&'a BusinessRecord> {
        self.ids.iter().filter_map(|id| dir.find(id)).collect()
    }

    /// Missing file means no favorites yet. A corrupt file is logged and
    /// treated the same way, as the browser does with bad local storage.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable favorites file");
                Favorites::default()
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Favorites::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }
}
