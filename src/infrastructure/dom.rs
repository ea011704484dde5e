use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::domain::carousel::{SlideChange, SlideRenderer};
use crate::domain::errors::{WidgetError, WidgetResult, js_error_message};
use crate::domain::ribbon::RibbonSurface;

/// CSS selectors for every widget root and part. Defaults match the
/// storefront templates; any subset can be overridden from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub product_carousel: String,
    pub carousel_track: String,
    pub carousel_prev: String,
    pub carousel_next: String,
    pub brand_stack: String,
    pub brand_item: String,
    pub brand_dot: String,
    /// Dots rendered outside their stack (brand rail pagination).
    pub brand_pagination_dot: String,
    pub brand_rotator: String,
    pub rotor_panel: String,
    pub brand_marquee: String,
    pub hero_strip: String,
    pub promo_ribbon: String,
    pub theme_toggle: String,
    pub wishlist_button: String,
    pub wishlist_panel: String,
    pub wishlist_open: String,
    pub cart_button: String,
    pub cart_panel: String,
    pub qty_stepper: String,
    pub qty_input: String,
    /// Stepper buttons; `data-qty-step` names the action.
    pub qty_button: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            product_carousel: "#product-carousel".into(),
            carousel_track: ".pc-track".into(),
            carousel_prev: "[data-pc-prev]".into(),
            carousel_next: "[data-pc-next]".into(),
            brand_stack: ".brand-stack, #brand-stack".into(),
            brand_item: ".brand-item".into(),
            brand_dot: ".brand-dot".into(),
            brand_pagination_dot: ".brand-pagination .brand-dot".into(),
            brand_rotator: "#brand-rotator".into(),
            rotor_panel: ".rotor-panel".into(),
            brand_marquee: ".brand-marquee".into(),
            hero_strip: ".hero-product-strip".into(),
            promo_ribbon: ".promo-ribbon".into(),
            theme_toggle: "#theme-toggle".into(),
            wishlist_button: "#nav-wishlist button".into(),
            wishlist_panel: "#wishlist-panel".into(),
            wishlist_open: "[data-wishlist-open]".into(),
            cart_button: "#nav-cart a.icon-btn".into(),
            cart_panel: "#cart-panel".into(),
            qty_stepper: "[data-qty-stepper]".into(),
            qty_input: "input[name=quantity], input[type=number]".into(),
            qty_button: "[data-qty-step]".into(),
        }
    }
}

impl Selectors {
    /// Overrides from JSON; unknown keys are ignored, missing keys keep defaults.
    pub fn from_json(raw: &str) -> WidgetResult<Self> {
        serde_json::from_str(raw).map_err(|err| WidgetError::InvalidConfiguration(err.to_string()))
    }
}

pub fn document() -> WidgetResult<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| WidgetError::BrowserApi("document not available".to_string()))
}

/// First match of `selector` under `scope`, or `MissingElement`.
pub fn require(scope: &impl QueryScope, selector: &str) -> WidgetResult<Element> {
    scope.query(selector)?.ok_or_else(|| WidgetError::MissingElement(selector.to_string()))
}

pub fn require_html(scope: &impl QueryScope, selector: &str) -> WidgetResult<HtmlElement> {
    require(scope, selector)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WidgetError::MissingElement(format!("{} (not an HTML element)", selector)))
}

/// Documents and elements both answer `querySelector(All)`.
pub trait QueryScope {
    fn query(&self, selector: &str) -> WidgetResult<Option<Element>>;
    fn query_all(&self, selector: &str) -> WidgetResult<Vec<Element>>;
}

macro_rules! impl_query_scope {
    ($ty:ty) => {
        impl QueryScope for $ty {
            fn query(&self, selector: &str) -> WidgetResult<Option<Element>> {
                self.query_selector(selector)
                    .map_err(|err| WidgetError::BrowserApi(js_error_message(&err)))
            }

            fn query_all(&self, selector: &str) -> WidgetResult<Vec<Element>> {
                let list = self
                    .query_selector_all(selector)
                    .map_err(|err| WidgetError::BrowserApi(js_error_message(&err)))?;
                Ok((0..list.length())
                    .filter_map(|i| list.item(i))
                    .filter_map(|node| node.dyn_into::<Element>().ok())
                    .collect())
            }
        }
    };
}

impl_query_scope!(Document);
impl_query_scope!(Element);

pub fn children(element: &Element) -> Vec<Element> {
    let collection = element.children();
    (0..collection.length()).filter_map(|i| collection.item(i)).collect()
}

pub fn data_attribute(element: &Element, key: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", key))
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// Cards sliding along a track with `translateX`.
pub struct TrackRenderer {
    track: HtmlElement,
    first_card: Element,
    gap_px: f64,
    easing: &'static str,
}

impl TrackRenderer {
    pub fn new(track: HtmlElement, first_card: Element, gap_px: f64) -> Self {
        Self { track, first_card, gap_px, easing: "cubic-bezier(.2,.7,.3,1)" }
    }

    fn card_width(&self) -> f64 {
        self.first_card.get_bounding_client_rect().width() + self.gap_px
    }
}

impl SlideRenderer for TrackRenderer {
    fn show(&mut self, change: &SlideChange) {
        match change.transition_ms {
            Some(ms) => set_style(&self.track, "transition", &format!("transform {}ms {}", ms, self.easing)),
            None => set_style(&self.track, "transition", "none"),
        }
        let offset = 0.0 - change.index as f64 * self.card_width();
        set_style(&self.track, "transform", &format!("translateX({}px)", offset));
    }

    fn settle(&mut self) {
        set_style(&self.track, "transition", "none");
    }

    fn scroll_to(&mut self, _offset_px: f64) {}
}

/// How a stacked panel shows that it is the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMarker {
    /// Current panel gets `is-active` (brand stack / rail).
    Active,
    /// Every other panel gets `is-hidden` (rotator).
    HideOthers,
}

/// Panels stacked on top of each other, plus optional pagination dots.
pub struct StackRenderer {
    panels: Vec<Element>,
    dots: Vec<Element>,
    marker: PanelMarker,
}

impl StackRenderer {
    pub fn new(panels: Vec<Element>, dots: Vec<Element>, marker: PanelMarker) -> Self {
        Self { panels, dots, marker }
    }
}

impl SlideRenderer for StackRenderer {
    fn show(&mut self, change: &SlideChange) {
        for (i, panel) in self.panels.iter().enumerate() {
            let current = i == change.index;
            match self.marker {
                PanelMarker::Active => toggle_class(panel, "is-active", current),
                PanelMarker::HideOthers => toggle_class(panel, "is-hidden", !current),
            }
            if current {
                match change.direction {
                    Some(direction) => {
                        let _ = panel.set_attribute("data-enter", direction.as_ref());
                    }
                    None => {
                        let _ = panel.remove_attribute("data-enter");
                    }
                }
                if let (Some(ms), Ok(html)) = (change.transition_ms, panel.clone().dyn_into::<HtmlElement>()) {
                    set_style(&html, "--rotor-duration", &format!("{}ms", ms));
                }
            }
        }
        for (i, dot) in self.dots.iter().enumerate() {
            toggle_class(dot, "is-active", i == change.index);
        }
    }

    fn settle(&mut self) {
        for panel in &self.panels {
            let _ = panel.remove_attribute("data-enter");
        }
    }

    fn scroll_to(&mut self, _offset_px: f64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Move the element's own `scrollLeft` (marquee).
    ScrollLeft,
    /// Translate the element (hero strip).
    Translate,
}

pub struct ScrollRenderer {
    element: HtmlElement,
    mode: ScrollMode,
}

impl ScrollRenderer {
    pub fn new(element: HtmlElement, mode: ScrollMode) -> Self {
        Self { element, mode }
    }
}

impl SlideRenderer for ScrollRenderer {
    fn show(&mut self, _change: &SlideChange) {}

    fn settle(&mut self) {}

    fn scroll_to(&mut self, offset_px: f64) {
        match self.mode {
            ScrollMode::ScrollLeft => self.element.set_scroll_left(offset_px.abs().round() as i32),
            ScrollMode::Translate => {
                set_style(&self.element, "transform", &format!("translateX({}px)", offset_px))
            }
        }
    }
}

/// Marks children appended by [`duplicate_children`].
pub const DUPLICATE_ATTRIBUTE: &str = "data-duplicate";

/// Append a copy of every child so the wrap back to offset 0 is invisible.
/// Copies left by an earlier mount are replaced, so the content is doubled
/// exactly once.
pub fn duplicate_children(element: &Element) -> WidgetResult<()> {
    let (copies, originals): (Vec<Element>, Vec<Element>) =
        children(element).into_iter().partition(|child| child.has_attribute(DUPLICATE_ATTRIBUTE));
    for stale in copies {
        stale.remove();
    }
    for child in originals {
        let copy = child
            .clone_node_with_deep(true)
            .map_err(|err| WidgetError::BrowserApi(js_error_message(&err)))?;
        if let Some(copy) = copy.dyn_ref::<Element>() {
            let _ = copy.set_attribute("aria-hidden", "true");
            let _ = copy.set_attribute(DUPLICATE_ATTRIBUTE, "");
        }
        element
            .append_child(&copy)
            .map_err(|err| WidgetError::BrowserApi(js_error_message(&err)))?;
    }
    Ok(())
}

/// Promo ribbon animation classes.
pub struct RibbonClasses {
    element: Element,
}

impl RibbonClasses {
    pub fn new(element: Element) -> Self {
        if let Ok(html) = element.clone().dyn_into::<HtmlElement>() {
            set_style(&html, "transform-origin", "left");
        }
        Self { element }
    }
}

impl RibbonSurface for RibbonClasses {
    fn set_entering(&mut self, on: bool) {
        toggle_class(&self.element, "is-entering", on);
    }

    fn set_pulsing(&mut self, on: bool) {
        toggle_class(&self.element, "is-pulsing", on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_default_selectors() {
        let selectors = Selectors::from_json(r##"{"product_carousel": "#deals"}"##).unwrap();
        assert_eq!(selectors.product_carousel, "#deals");
        assert_eq!(selectors.carousel_track, ".pc-track");
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            Selectors::from_json("nope"),
            Err(WidgetError::InvalidConfiguration(_))
        ));
    }
}
