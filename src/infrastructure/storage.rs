use web_sys::Storage;

use crate::domain::errors::{WidgetError, WidgetResult, js_error_message};
use crate::domain::preferences::PreferenceStore;

/// `window.localStorage`. Looked up on every call: private browsing modes
/// and blocked cookies make the getter itself throw.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage(&self) -> WidgetResult<Storage> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::StorageUnavailable("window not available".to_string()))?;
        window
            .local_storage()
            .map_err(|err| WidgetError::StorageUnavailable(js_error_message(&err)))?
            .ok_or_else(|| WidgetError::StorageUnavailable("localStorage disabled".to_string()))
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> WidgetResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| WidgetError::StorageUnavailable(js_error_message(&err)))
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| WidgetError::StorageUnavailable(js_error_message(&err)))
    }
}
