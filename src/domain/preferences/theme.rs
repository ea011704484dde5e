use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

use super::PreferenceStore;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr)]
pub enum Theme {
    #[default]
    #[display(fmt = "light")]
    #[strum(serialize = "light")]
    Light,
    #[display(fmt = "dark")]
    #[strum(serialize = "dark")]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value for `<html data-theme>`; light removes the attribute.
    pub fn data_attribute(self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some("dark"),
            Theme::Light => None,
        }
    }
}

/// Theme preference backed by a store, falling back to session-only memory
/// when the store fails.
pub struct ThemeController<P: PreferenceStore> {
    store: P,
    session: Theme,
}

impl<P: PreferenceStore> ThemeController<P> {
    pub fn load(store: P) -> Self {
        let session = match store.get(THEME_KEY) {
            Ok(Some(value)) if value == "dark" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(err) => {
                log_debug!(LogComponent::Domain("Theme"), "using default theme: {}", err);
                Theme::Light
            }
        };
        Self { store, session }
    }

    pub fn current(&self) -> Theme {
        self.session
    }

    pub fn toggle(&mut self) -> Theme {
        self.session = self.session.toggled();
        if let Err(err) = self.store.set(THEME_KEY, self.session.as_ref()) {
            log_warn!(LogComponent::Domain("Theme"), "theme kept for this session only: {}", err);
        }
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preferences::MemoryStore;

    #[test]
    fn only_dark_value_means_dark() {
        let store = MemoryStore::new().with_entry(THEME_KEY, "dark");
        assert_eq!(ThemeController::load(&store).current(), Theme::Dark);

        let store = MemoryStore::new().with_entry(THEME_KEY, "purple");
        assert_eq!(ThemeController::load(&store).current(), Theme::Light);
    }

    #[test]
    fn toggle_persists_plain_strings() {
        let store = MemoryStore::new();
        let mut theme = ThemeController::load(&store);
        assert_eq!(theme.toggle(), Theme::Dark);
        assert_eq!(store.raw(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(theme.toggle(), Theme::Light);
        assert_eq!(store.raw(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn unavailable_storage_degrades_to_session() {
        let store = MemoryStore::unavailable();
        let mut theme = ThemeController::load(&store);
        assert_eq!(theme.current(), Theme::Light);
        assert_eq!(theme.toggle(), Theme::Dark);
        assert_eq!(theme.current(), Theme::Dark);
    }
}
