pub mod theme;
pub mod wishlist;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::errors::{WidgetError, WidgetResult};

/// String key-value storage that survives page loads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> WidgetResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> WidgetResult<()>;
}

/// In-memory store for headless use. Can be switched to "unavailable" to
/// behave like a browser with storage disabled.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> WidgetResult<Option<String>> {
        if self.unavailable {
            return Err(WidgetError::StorageUnavailable(format!("read of '{}'", key)));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        if self.unavailable {
            return Err(WidgetError::StorageUnavailable(format!("write of '{}'", key)));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get(&self, key: &str) -> WidgetResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        (**self).set(key, value)
    }
}
