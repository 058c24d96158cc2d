//! Persistence of the active cart id.
//!
//! The file layout is a flat JSON object of string keys so it can hold other
//! client settings later; only [`CART_ID_KEY`] is read or written here.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::SessionError;

/// Key under which the active cart id is stored.
pub const CART_ID_KEY: &str = "tonic-cart-id";

/// Storage for the single persisted cart id.
pub trait CartIdStore {
    /// Returns the persisted id, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// # Errors
    ///
    /// Returns [`SessionError`] when the backing store cannot be written.
    fn save(&self, cart_id: &str) -> Result<(), SessionError>;

    /// # Errors
    ///
    /// Returns [`SessionError`] when the backing store cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Cart id persisted in a JSON file, e.g. `./.tonic/session.json`.
#[derive(Debug, Clone)]
pub struct FileCartIdStore {
    path: PathBuf,
}

impl FileCartIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(SessionError::Storage {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Storage {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(map).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, body).map_err(io_err)
    }
}

impl CartIdStore for FileCartIdStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let map = self.read_map()?;
        Ok(map
            .get(CART_ID_KEY)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_owned))
    }

    fn save(&self, cart_id: &str) -> Result<(), SessionError> {
        // A corrupt file is replaced rather than blocking a fresh session.
        let mut map = self.read_map().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding unreadable session storage");
            Map::new()
        });
        map.insert(CART_ID_KEY.to_owned(), Value::String(cart_id.to_owned()));
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(SessionError::Corrupt { .. }) => Map::new(),
            Err(e) => return Err(e),
        };
        if map.remove(CART_ID_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

/// In-process store, used in tests and for sessions that should not outlive
/// the process.
#[derive(Debug, Default)]
pub struct MemoryCartIdStore {
    cart_id: Mutex<Option<String>>,
}

impl MemoryCartIdStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cart_id(cart_id: &str) -> Self {
        Self {
            cart_id: Mutex::new(Some(cart_id.to_owned())),
        }
    }

    /// Current value, for assertions.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.cart_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set(&self, value: Option<String>) {
        *self
            .cart_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = value;
    }
}

impl CartIdStore for MemoryCartIdStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.current())
    }

    fn save(&self, cart_id: &str) -> Result<(), SessionError> {
        self.set(Some(cart_id.to_owned()));
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.set(None);
        Ok(())
    }
}
