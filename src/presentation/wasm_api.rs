use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::application::{StorefrontCoordinator, apply_theme};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::preferences::wishlist::WishlistIds;
use crate::event_utils::{EventListenerHandle, EventOptions, listen_named};
use crate::global_state::{self, mounted_count, unmount_all, with_theme};
use crate::infrastructure::LocalStore;
use crate::infrastructure::dom::{Selectors, document};

/// Thin bridge between JavaScript and the application layer.
const COMPONENT: LogComponent = LogComponent::Presentation("WasmApi");

thread_local! {
    static READY_LISTENER: RefCell<Option<EventListenerHandle>> = const { RefCell::new(None) };
}

/// Mount once the DOM is parsed.
pub(crate) fn mount_when_ready() {
    let Ok(doc) = document() else {
        return;
    };
    if doc.ready_state() != "loading" {
        mount_storefront();
        return;
    }
    let target: &EventTarget = doc.as_ref();
    let options = EventOptions { once: true, ..EventOptions::default() };
    let handle = listen_named(target, "DOMContentLoaded", &options, |_| {
        mount_storefront();
    });
    READY_LISTENER.with(|slot| *slot.borrow_mut() = Some(handle));
}

/// Mount every widget found with the default selectors. Widgets mounted
/// earlier are torn down first. Returns the number of live widgets.
#[wasm_bindgen]
pub fn mount_storefront() -> usize {
    mount_with(Selectors::default())
}

/// Same as [`mount_storefront`] with selector overrides given as JSON.
/// Falls back to the defaults when the JSON is invalid.
#[wasm_bindgen]
pub fn mount_storefront_with(selectors_json: &str) -> usize {
    let selectors = Selectors::from_json(selectors_json).unwrap_or_else(|err| {
        get_logger().warn(COMPONENT, &format!("using default selectors: {}", err));
        Selectors::default()
    });
    mount_with(selectors)
}

fn mount_with(selectors: Selectors) -> usize {
    unmount_all();
    match StorefrontCoordinator::new(selectors) {
        Ok(coordinator) => {
            coordinator.mount_all();
        }
        Err(err) => get_logger().error(COMPONENT, &format!("cannot mount storefront: {}", err)),
    }
    mounted_count()
}

/// Cancel every timer and detach every listener.
#[wasm_bindgen]
pub fn unmount_storefront() {
    unmount_all();
}

#[wasm_bindgen]
pub fn mounted_widget_count() -> usize {
    mounted_count()
}

/// Flip the theme, apply it to `<html>` and return the new theme name.
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    let theme = with_theme(|theme| theme.toggle());
    if let Some(html) = document().ok().and_then(|doc| doc.document_element()) {
        apply_theme(&html, theme);
    }
    theme.to_string()
}

#[wasm_bindgen]
pub fn current_theme() -> String {
    global_state::current_theme().to_string()
}

/// Save a product id to the wishlist. Returns false when it was already saved
/// or storage is unavailable.
#[wasm_bindgen]
pub fn wishlist_remember(id: &str) -> bool {
    let mut wishlist = WishlistIds::load(LocalStore);
    wishlist.remember(id).unwrap_or_else(|err| {
        get_logger().warn(COMPONENT, &format!("wishlist not saved: {}", err));
        false
    })
}

#[wasm_bindgen]
pub fn wishlist_forget(id: &str) -> bool {
    let mut wishlist = WishlistIds::load(LocalStore);
    wishlist.forget(id).unwrap_or_else(|err| {
        get_logger().warn(COMPONENT, &format!("wishlist not saved: {}", err));
        false
    })
}

/// Wishlist page link for `base`, or `undefined` when nothing is saved.
#[wasm_bindgen]
pub fn wishlist_href(base: &str) -> Option<String> {
    WishlistIds::load(LocalStore).href(base)
}
