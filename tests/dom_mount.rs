#![cfg(target_arch = "wasm32")]

use storefront_widgets::application::StorefrontCoordinator;
use storefront_widgets::domain::preferences::theme::THEME_KEY;
use storefront_widgets::domain::preferences::wishlist::WISHLIST_KEY;
use storefront_widgets::global_state::{WidgetKind, current_theme, mounted_count, unmount_all};
use storefront_widgets::infrastructure::dom::Selectors;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, Storage};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
<div id="product-carousel" data-auto="false">
  <button data-pc-prev>prev</button>
  <div class="pc-track"><div>1</div><div>2</div><div>3</div><div>4</div><div>5</div><div>6</div></div>
  <button data-pc-next>next</button>
</div>
<div class="brand-stack">
  <div class="brand-item">A</div><div class="brand-item">B</div>
  <span class="brand-dot"></span><span class="brand-dot"></span>
</div>
<div class="brand-marquee"><span>one</span><span>two</span></div>
<div class="promo-ribbon">sale</div>
<button id="theme-toggle">theme</button>
<div id="nav-wishlist"><button>wishlist</button></div>
<div id="wishlist-panel" style="display: none">saved</div>
<a data-wishlist-open href="/wishlist">open</a>
<form action="/cart" method="post">
  <div data-qty-stepper>
    <button type="button" data-qty-step="minus">-</button>
    <input name="quantity" value="2">
    <button type="button" data-qty-step="plus">+</button>
  </div>
</form>
"#;

fn document() -> Document {
    web_sys::window().and_then(|w| w.document()).expect("document")
}

fn storage() -> Storage {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten()).expect("localStorage")
}

fn html(selector: &str) -> HtmlElement {
    document()
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .expect(selector)
}

fn display(selector: &str) -> String {
    html(selector).style().get_property_value("display").unwrap_or_default()
}

#[wasm_bindgen_test]
fn storefront_page_mounts_and_reacts() {
    storage().set_item(WISHLIST_KEY, r#"["7","9"]"#).unwrap();
    let body = document().body().expect("body");
    body.set_inner_html(PAGE);

    let report = StorefrontCoordinator::new(Selectors::default())
        .unwrap()
        .with_reduced_motion(false)
        .mount_all();

    assert_eq!(report.count(WidgetKind::ProductCarousel), 1);
    assert_eq!(report.count(WidgetKind::BrandStack), 1);
    assert_eq!(report.count(WidgetKind::BrandMarquee), 1);
    assert_eq!(report.count(WidgetKind::PromoRibbon), 1);
    assert_eq!(report.count(WidgetKind::ThemeToggle), 1);
    assert_eq!(report.count(WidgetKind::WishlistPanel), 1);
    assert_eq!(report.count(WidgetKind::WishlistLink), 1);
    assert_eq!(report.count(WidgetKind::QuantityStepper), 1);
    assert!(report.skipped.iter().any(|(kind, _)| *kind == WidgetKind::CartPanel));
    assert!(report.skipped.iter().any(|(kind, _)| *kind == WidgetKind::BrandRotator));

    // Carousel
    let track = html(".pc-track");
    assert_eq!(track.style().get_property_value("transform").unwrap(), "translateX(0px)");
    html("[data-pc-next]").click();
    assert_ne!(track.style().get_property_value("transform").unwrap(), "translateX(0px)");

    // Brand stack
    assert!(html(".brand-item").class_list().contains("is-active"));
    assert!(html(".brand-dot").class_list().contains("is-active"));

    // Marquee content is doubled for a seamless wrap.
    let marquee = html(".brand-marquee");
    assert_eq!(marquee.child_element_count(), 4);
    assert_eq!(
        marquee.last_element_child().and_then(|el| el.get_attribute("aria-hidden")).as_deref(),
        Some("true")
    );

    assert!(html(".promo-ribbon").class_list().contains("is-entering"));

    // Theme
    let before = current_theme();
    html("#theme-toggle").click();
    let after = current_theme();
    assert_eq!(after, before.toggled());
    let root = document().document_element().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), after.data_attribute());
    assert_eq!(storage().get_item(THEME_KEY).unwrap().as_deref(), Some(after.as_ref()));
    html("#theme-toggle").click();

    // Wishlist
    assert_eq!(
        html("[data-wishlist-open]").get_attribute("href").as_deref(),
        Some("/wishlist?ids=7,9")
    );
    html("#nav-wishlist button").click();
    assert_eq!(display("#wishlist-panel"), "block");
    html("#wishlist-panel").click();
    assert_eq!(display("#wishlist-panel"), "block");
    body.click();
    assert_eq!(display("#wishlist-panel"), "none");

    assert!(mounted_count() > 0);
    unmount_all();
    assert_eq!(mounted_count(), 0);

    // Listeners are gone after unmount.
    html("#nav-wishlist button").click();
    assert_eq!(display("#wishlist-panel"), "none");

    storage().remove_item(WISHLIST_KEY).unwrap();
    body.set_inner_html("");
}

#[wasm_bindgen_test]
fn mounting_again_leaves_page_as_first_mount_did() {
    storage().set_item(WISHLIST_KEY, r#"["7","9"]"#).unwrap();
    let body = document().body().expect("body");
    body.set_inner_html(PAGE);

    let mount = || {
        StorefrontCoordinator::new(Selectors::default())
            .unwrap()
            .with_reduced_motion(false)
            .mount_all()
    };
    mount();
    unmount_all();
    let report = mount();

    assert_eq!(report.count(WidgetKind::BrandMarquee), 1);
    assert_eq!(html(".brand-marquee").child_element_count(), 4);
    assert_eq!(
        html("[data-wishlist-open]").get_attribute("href").as_deref(),
        Some("/wishlist?ids=7,9")
    );

    // Emptied wishlist: the link goes back to its markup href.
    storage().remove_item(WISHLIST_KEY).unwrap();
    unmount_all();
    mount();
    assert_eq!(html("[data-wishlist-open]").get_attribute("href").as_deref(), Some("/wishlist"));

    unmount_all();
    body.set_inner_html("");
}

#[wasm_bindgen_test]
fn resize_drops_pending_track_transition() {
    let body = document().body().expect("body");
    body.set_inner_html(PAGE);
    StorefrontCoordinator::new(Selectors::default())
        .unwrap()
        .with_reduced_motion(false)
        .mount_all();

    let track = html(".pc-track");
    html("[data-pc-next]").click();
    assert_ne!(track.style().get_property_value("transition").unwrap(), "none");

    let resize = web_sys::Event::new("resize").unwrap();
    web_sys::window().unwrap().dispatch_event(&resize).unwrap();
    assert_eq!(track.style().get_property_value("transition").unwrap(), "none");

    unmount_all();
    body.set_inner_html("");
}
