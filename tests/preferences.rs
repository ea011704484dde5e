use storefront_widgets::domain::cart::{CartPanel, QuantityStepper, StepAction};
use storefront_widgets::domain::preferences::MemoryStore;
use storefront_widgets::domain::preferences::theme::{THEME_KEY, Theme, ThemeController};
use storefront_widgets::domain::preferences::wishlist::{WISHLIST_KEY, WishlistIds, build_href};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn theme_survives_reload() {
    let store = MemoryStore::new();
    ThemeController::load(&store).toggle();

    let reloaded = ThemeController::load(&store);
    assert_eq!(reloaded.current(), Theme::Dark);
    assert_eq!(reloaded.current().data_attribute(), Some("dark"));
    assert_eq!(store.raw(THEME_KEY).as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn wishlist_link_carries_saved_ids() {
    let store = MemoryStore::new().with_entry(WISHLIST_KEY, r#"["sku-1", 42, "sku-1", "  "]"#);
    let wishlist = WishlistIds::load(&store);

    assert_eq!(wishlist.ids(), ["sku-1", "42"]);
    assert_eq!(wishlist.href("/wishlist").as_deref(), Some("/wishlist?ids=sku-1,42"));
    assert_eq!(
        wishlist.href("/wishlist?sort=new#top").as_deref(),
        Some("/wishlist?sort=new&ids=sku-1,42#top")
    );
}

#[wasm_bindgen_test]
fn wishlist_link_untouched_without_ids() {
    let empty = MemoryStore::new();
    assert_eq!(WishlistIds::load(&empty).href("/wishlist"), None);

    let broken = MemoryStore::new().with_entry(WISHLIST_KEY, "{not json");
    assert!(WishlistIds::load(&broken).is_empty());

    let unavailable = MemoryStore::unavailable();
    assert!(WishlistIds::load(&unavailable).is_empty());
    assert_eq!(build_href("/wishlist", &[]), None);
}

#[wasm_bindgen_test]
fn wishlist_changes_are_persisted_as_json() {
    let store = MemoryStore::new();
    let mut wishlist = WishlistIds::load(&store);

    assert_eq!(wishlist.remember("a").ok(), Some(true));
    assert_eq!(wishlist.remember("b").ok(), Some(true));
    assert_eq!(wishlist.remember("a").ok(), Some(false));
    assert_eq!(wishlist.forget("a").ok(), Some(true));

    let saved: Vec<String> = serde_json::from_str(&store.raw(WISHLIST_KEY).unwrap_or_default()).unwrap();
    assert_eq!(saved, vec!["b".to_string()]);
}

#[wasm_bindgen_test]
fn minus_at_zero_still_submits_zero() {
    let mut stepper = QuantityStepper::from_input("0");

    let submission = stepper.press(StepAction::Decrement);

    assert_eq!(submission.map(|s| s.quantity), Some(0));
    assert!(stepper.is_submitting());
    assert_eq!(stepper.press(StepAction::Increment), None);
}

#[wasm_bindgen_test]
fn stepper_reads_action_names_from_markup() {
    assert_eq!("plus".parse::<StepAction>().ok(), Some(StepAction::Increment));
    assert_eq!("-".parse::<StepAction>().ok(), Some(StepAction::Decrement));
    assert!("double".parse::<StepAction>().is_err());

    let mut stepper = QuantityStepper::from_input(" 3 ");
    assert_eq!(stepper.press(StepAction::Increment).map(|s| s.quantity), Some(4));
}

#[wasm_bindgen_test]
fn cart_panel_follows_hover() {
    let mut panel = CartPanel::default();
    assert_eq!(panel.hover(true), "block");
    assert!(panel.is_visible());
    assert_eq!(panel.hover(false), "none");
}
