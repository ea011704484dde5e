use serde::Deserialize;

use super::PreferenceStore;
use crate::domain::errors::{WidgetError, WidgetResult};
use crate::domain::logging::LogComponent;
use crate::log_debug;

pub const WISHLIST_KEY: &str = "wishlist";
pub const IDS_PARAM: &str = "ids";

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Text(String),
    Number(serde_json::Number),
}

impl StoredId {
    fn into_id(self) -> String {
        match self {
            StoredId::Text(text) => text.trim().to_string(),
            StoredId::Number(number) => number.to_string(),
        }
    }
}

/// Decode the persisted JSON id list, dropping blanks and duplicates.
pub fn parse_ids(raw: &str) -> WidgetResult<Vec<String>> {
    let stored: Vec<StoredId> = serde_json::from_str(raw)?;
    let mut ids: Vec<String> = Vec::with_capacity(stored.len());
    for id in stored.into_iter().map(StoredId::into_id) {
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Product ids the shopper has saved, in the order they were added.
pub struct WishlistIds<P: PreferenceStore> {
    store: P,
    ids: Vec<String>,
}

impl<P: PreferenceStore> WishlistIds<P> {
    /// Missing, unreadable or malformed data all load as an empty list.
    pub fn load(store: P) -> Self {
        let ids = match store.get(WISHLIST_KEY).and_then(|raw| raw.map(|r| parse_ids(&r)).transpose()) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(err) => {
                log_debug!(LogComponent::Domain("Wishlist"), "starting with an empty wishlist: {}", err);
                Vec::new()
            }
        };
        Self { store, ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `false` if the id was already saved or is blank.
    pub fn remember(&mut self, id: &str) -> WidgetResult<bool> {
        let id = id.trim();
        if id.is_empty() || self.ids.iter().any(|known| known == id) {
            return Ok(false);
        }
        self.ids.push(id.to_string());
        self.persist()?;
        Ok(true)
    }

    pub fn forget(&mut self, id: &str) -> WidgetResult<bool> {
        let before = self.ids.len();
        self.ids.retain(|known| known != id.trim());
        if self.ids.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Link to the wishlist page for the saved ids, `None` when empty.
    pub fn href(&self, base: &str) -> Option<String> {
        build_href(base, &self.ids)
    }

    fn persist(&self) -> WidgetResult<()> {
        let encoded = serde_json::to_string(&self.ids)
            .map_err(|err| WidgetError::MalformedPersistedValue(err.to_string()))?;
        self.store.set(WISHLIST_KEY, &encoded)
    }
}

/// Set `ids=<a,b,c>` on `base`, keeping the rest of the query and any
/// fragment. An `ids` parameter already present is replaced.
pub fn build_href(base: &str, ids: &[String]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let (rest, fragment) = match base.find('#') {
        Some(at) => base.split_at(at),
        None => (base, ""),
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let ids_param = format!("{}={}", IDS_PARAM, ids.join(","));
    let mut params: Vec<&str> = query
        .split('&')
        .filter(|param| !param.is_empty() && param.split('=').next() != Some(IDS_PARAM))
        .collect();
    params.push(&ids_param);
    Some(format!("{}?{}{}", path, params.join("&"), fragment))
}

/// Open/closed state of the wishlist dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Button click.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Any document click; returns whether the panel must now be hidden.
    pub fn outside_click(&mut self, inside_panel: bool, on_button: bool) -> bool {
        if inside_panel || on_button {
            return false;
        }
        self.open = false;
        true
    }
}
