use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use leptos::ev;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement, MouseEvent, Node};

use crate::domain::carousel::value_objects::DEFAULT_CARD_GAP_PX;
use crate::domain::carousel::{
    CarouselOptions, ControllerPorts, Measurements, SlideController, SlideLayout, SlideRenderer,
};
use crate::domain::cart::{CartPanel, QuantityStepper, StepAction};
use crate::domain::errors::{WidgetError, WidgetResult, js_error_message};
use crate::domain::logging::LogComponent;
use crate::domain::preferences::theme::Theme;
use crate::domain::preferences::wishlist::{PanelState, WishlistIds};
use crate::domain::ribbon::RibbonPulse;
use crate::event_utils::{EventListenerHandle, EventOptions, listen, on, window_target};
use crate::global_state::{WidgetKind, current_theme, keep_alive, with_theme};
use crate::infrastructure::dom::{
    PanelMarker, QueryScope, RibbonClasses, ScrollMode, ScrollRenderer, Selectors, StackRenderer,
    TrackRenderer, children, data_attribute, document, duplicate_children, require, require_html,
};
use crate::infrastructure::{BrowserRandom, BrowserScheduler, LocalStore, TimerDispatch, prefers_reduced_motion};
use crate::{log_debug, log_info, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("Coordinator");

/// Default per-frame movement of the hero product strip (moves left).
const HERO_STRIP_DELTA_PX: f64 = -0.5;

/// `data-*` suffix holding a wishlist link's original href.
const WISHLIST_BASE: &str = "wishlist-base";

type Shared<T> = Rc<RefCell<T>>;
pub type BrowserController<R> = SlideController<BrowserScheduler, R>;

/// A controller together with the listeners that drive it.
pub struct SlideMount<R: SlideRenderer> {
    pub controller: Shared<BrowserController<R>>,
    pub listeners: Vec<EventListenerHandle>,
}

/// Run `f` if the target is still alive and not already borrowed.
fn with_live<T>(weak: &Weak<RefCell<T>>, f: impl FnOnce(&mut T)) {
    if let Some(shared) = weak.upgrade() {
        if let Ok(mut inner) = shared.try_borrow_mut() {
            f(&mut inner);
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MountReport {
    pub mounted: Vec<WidgetKind>,
    /// Widgets left inactive and why.
    pub skipped: Vec<(WidgetKind, String)>,
}

impl MountReport {
    pub fn count(&self, kind: WidgetKind) -> usize {
        self.mounted.iter().filter(|mounted| **mounted == kind).count()
    }
}

/// Finds widget roots in the document and attaches behaviour to them.
pub struct StorefrontCoordinator {
    document: Document,
    selectors: Selectors,
    reduced_motion: bool,
}

impl StorefrontCoordinator {
    pub fn new(selectors: Selectors) -> WidgetResult<Self> {
        Ok(Self { document: document()?, selectors, reduced_motion: prefers_reduced_motion() })
    }

    /// Override the reduced-motion media query result.
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn mount_all(&self) -> MountReport {
        let mut report = MountReport::default();
        self.record(&mut report, WidgetKind::ProductCarousel, self.mount_product_carousel());
        self.record(&mut report, WidgetKind::BrandStack, self.mount_brand_stacks());
        self.record(&mut report, WidgetKind::BrandRotator, self.mount_brand_rotator());
        self.record(
            &mut report,
            WidgetKind::BrandMarquee,
            self.mount_scrollers(&self.selectors.brand_marquee, WidgetKind::BrandMarquee, ScrollMode::ScrollLeft, None),
        );
        self.record(
            &mut report,
            WidgetKind::HeroStrip,
            self.mount_scrollers(
                &self.selectors.hero_strip,
                WidgetKind::HeroStrip,
                ScrollMode::Translate,
                Some(HERO_STRIP_DELTA_PX),
            ),
        );
        self.record(&mut report, WidgetKind::PromoRibbon, self.mount_ribbons());
        self.record(&mut report, WidgetKind::ThemeToggle, self.mount_theme_toggle());
        self.record(&mut report, WidgetKind::WishlistPanel, self.mount_wishlist_panel());
        self.record(&mut report, WidgetKind::WishlistLink, self.mount_wishlist_links());
        self.record(&mut report, WidgetKind::CartPanel, self.mount_cart_panel());
        self.record(&mut report, WidgetKind::QuantityStepper, self.mount_quantity_steppers());

        log_info!(
            COMPONENT,
            "mounted {} widgets, {} inactive",
            report.mounted.len(),
            report.skipped.len()
        );
        report
    }

    fn record(&self, report: &mut MountReport, kind: WidgetKind, result: WidgetResult<usize>) {
        match result {
            Ok(count) => report.mounted.extend(std::iter::repeat_n(kind, count)),
            Err(WidgetError::MissingElement(what)) => {
                log_debug!(COMPONENT, "{} not on this page ({})", kind, what);
                report.skipped.push((kind, what));
            }
            Err(err) => {
                log_warn!(COMPONENT, "{} left inactive: {}", kind, err);
                report.skipped.push((kind, err.to_string()));
            }
        }
    }

    fn mount_slides<R: SlideRenderer + 'static>(
        &self,
        root: &Element,
        slide_count: usize,
        options: CarouselOptions,
        measure: impl Fn() -> Measurements + 'static,
        renderer: R,
    ) -> WidgetResult<SlideMount<R>> {
        let dispatch = TimerDispatch::new();
        let ports = ControllerPorts::new(BrowserScheduler::new(dispatch.clone()), renderer, Box::new(BrowserRandom));
        let controller = SlideController::initialize(slide_count, options, measure(), self.reduced_motion, ports)
            .ok_or_else(|| WidgetError::MissingElement("slides".to_string()))?;
        let controller = Rc::new(RefCell::new(controller));

        let weak = Rc::downgrade(&controller);
        dispatch.connect(move |id| with_live(&weak, |c| c.handle_timer(id)));

        let target: &EventTarget = root.as_ref();
        let mut listeners = Vec::new();
        let weak = Rc::downgrade(&controller);
        listeners.push(on(target, ev::mouseenter, move |_| with_live(&weak, |c| c.pause())));
        let weak = Rc::downgrade(&controller);
        listeners.push(on(target, ev::mouseleave, move |_| with_live(&weak, |c| c.resume())));
        if let Some(window) = window_target() {
            let weak = Rc::downgrade(&controller);
            listeners.push(on(&window, ev::resize, move |_| with_live(&weak, |c| c.on_resize(measure()))));
        }

        Ok(SlideMount { controller, listeners })
    }

    pub fn mount_product_carousel(&self) -> WidgetResult<usize> {
        let root = require(&self.document, &self.selectors.product_carousel)?;
        let track = require_html(&root, &self.selectors.carousel_track)?;
        let cards = children(&track);
        let first_card = cards
            .first()
            .cloned()
            .ok_or_else(|| WidgetError::MissingElement(format!("{} > *", self.selectors.carousel_track)))?;

        let options = CarouselOptions::from_attributes(SlideLayout::Track, |key| data_attribute(&root, key));
        let renderer = TrackRenderer::new(track, first_card, DEFAULT_CARD_GAP_PX);
        let mut mount = self.mount_slides(&root, cards.len(), options, measure_width(&root), renderer)?;

        for (selector, forward) in [(&self.selectors.carousel_prev, false), (&self.selectors.carousel_next, true)] {
            if let Some(button) = root.query(selector)? {
                let weak = Rc::downgrade(&mount.controller);
                mount.listeners.push(on(button.as_ref(), ev::click, move |_| {
                    with_live(&weak, |c| if forward { c.next() } else { c.prev() })
                }));
            }
        }

        keep_alive(WidgetKind::ProductCarousel, mount);
        Ok(1)
    }

    pub fn mount_brand_stacks(&self) -> WidgetResult<usize> {
        let roots = self.document.query_all(&self.selectors.brand_stack)?;
        if roots.is_empty() {
            return Err(WidgetError::MissingElement(self.selectors.brand_stack.clone()));
        }

        let mut mounted = 0;
        for root in roots {
            let items = root.query_all(&self.selectors.brand_item)?;
            if items.len() <= 1 {
                for item in &items {
                    let _ = item.class_list().add_1("is-active");
                }
                continue;
            }
            let mut dots = root.query_all(&self.selectors.brand_dot)?;
            if dots.is_empty() {
                dots = self.document.query_all(&self.selectors.brand_pagination_dot)?;
            }

            let count = items.len();
            let options = CarouselOptions::from_attributes(SlideLayout::Stacked, |key| data_attribute(&root, key));
            let renderer = StackRenderer::new(items, dots, PanelMarker::Active);
            let mount = self.mount_slides(&root, count, options, measure_width(&root), renderer)?;
            keep_alive(WidgetKind::BrandStack, mount);
            mounted += 1;
        }
        Ok(mounted)
    }

    pub fn mount_brand_rotator(&self) -> WidgetResult<usize> {
        let root = require(&self.document, &self.selectors.brand_rotator)?;
        let panels = root.query_all(&self.selectors.rotor_panel)?;
        if panels.is_empty() {
            return Err(WidgetError::MissingElement(self.selectors.rotor_panel.clone()));
        }

        let count = panels.len();
        let options = CarouselOptions::from_attributes(SlideLayout::Stacked, |key| data_attribute(&root, key))
            .with_randomized_interval();
        let renderer = StackRenderer::new(panels, Vec::new(), PanelMarker::HideOthers);
        let mount = self.mount_slides(&root, count, options, measure_width(&root), renderer)?;
        keep_alive(WidgetKind::BrandRotator, mount);
        Ok(1)
    }

    /// Marquees and strips. `default_delta` applies when `data-delta` is absent.
    pub fn mount_scrollers(
        &self,
        selector: &str,
        kind: WidgetKind,
        mode: ScrollMode,
        default_delta: Option<f64>,
    ) -> WidgetResult<usize> {
        let roots = self.document.query_all(selector)?;
        if roots.is_empty() {
            return Err(WidgetError::MissingElement(selector.to_string()));
        }

        let mut mounted = 0;
        for root in roots {
            let Ok(element) = root.clone().dyn_into::<HtmlElement>() else {
                continue;
            };
            let duplicated = data_attribute(&root, "clone").as_deref() != Some("false");
            if duplicated {
                duplicate_children(&root)?;
            }

            let mut options = CarouselOptions::from_attributes(SlideLayout::Continuous, |key| data_attribute(&root, key));
            if let (Some(delta), None) = (default_delta, data_attribute(&root, "delta")) {
                options.frame_delta_px = delta;
            }
            let measure = {
                let root = root.clone();
                move || scroll_measurements(&root, mode, duplicated)
            };
            let slide_count = children(&root).len().max(1);
            let mount = self.mount_slides(&root, slide_count, options, measure, ScrollRenderer::new(element, mode))?;
            keep_alive(kind, mount);
            mounted += 1;
        }
        Ok(mounted)
    }

    pub fn mount_ribbons(&self) -> WidgetResult<usize> {
        let ribbons = self.document.query_all(&self.selectors.promo_ribbon)?;
        if ribbons.is_empty() {
            return Err(WidgetError::MissingElement(self.selectors.promo_ribbon.clone()));
        }

        let count = ribbons.len();
        for ribbon in ribbons {
            let dispatch = TimerDispatch::new();
            let pulse = RibbonPulse::start(
                BrowserScheduler::new(dispatch.clone()),
                RibbonClasses::new(ribbon),
                self.reduced_motion,
            );
            let pulse = Rc::new(RefCell::new(pulse));
            let weak = Rc::downgrade(&pulse);
            dispatch.connect(move |id| with_live(&weak, |p| p.handle_timer(id)));
            keep_alive(WidgetKind::PromoRibbon, pulse);
        }
        Ok(count)
    }

    pub fn mount_theme_toggle(&self) -> WidgetResult<usize> {
        let button = require(&self.document, &self.selectors.theme_toggle)?;
        let html = self
            .document
            .document_element()
            .ok_or_else(|| WidgetError::MissingElement("<html>".to_string()))?;

        apply_theme(&html, current_theme());
        let listener = on(button.as_ref(), ev::click, move |_| {
            let theme = with_theme(|theme| theme.toggle());
            apply_theme(&html, theme);
        });
        keep_alive(WidgetKind::ThemeToggle, listener);
        Ok(1)
    }

    pub fn mount_wishlist_panel(&self) -> WidgetResult<usize> {
        let button = require_html(&self.document, &self.selectors.wishlist_button)?;
        let panel = require_html(&self.document, &self.selectors.wishlist_panel)?;

        let initially_open = panel.style().get_property_value("display").map(|d| d == "block").unwrap_or(false);
        let state = Rc::new(RefCell::new(PanelState::new(initially_open)));

        let toggle = {
            let (state, panel) = (state.clone(), panel.clone());
            on(button.as_ref(), ev::click, move |_| {
                let open = state.borrow_mut().toggle();
                set_display(&panel, open);
            })
        };
        let outside = {
            let state = state.clone();
            let document: &EventTarget = self.document.as_ref();
            on(document, ev::click, move |event: MouseEvent| {
                let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
                let inside_panel = panel.contains(target.as_ref());
                let on_button = button.contains(target.as_ref());
                if state.borrow_mut().outside_click(inside_panel, on_button) {
                    set_display(&panel, false);
                }
            })
        };

        keep_alive(WidgetKind::WishlistPanel, (state, toggle, outside));
        Ok(1)
    }

    /// Point "open wishlist" links at the saved ids. The markup's href is kept
    /// in `data-wishlist-base` so every mount builds from it; with nothing
    /// saved the link keeps (or gets back) that href.
    pub fn mount_wishlist_links(&self) -> WidgetResult<usize> {
        let links = self.document.query_all(&self.selectors.wishlist_open)?;
        if links.is_empty() {
            return Err(WidgetError::MissingElement(self.selectors.wishlist_open.clone()));
        }

        let wishlist = WishlistIds::load(LocalStore);
        let mut rewritten = 0;
        for link in links {
            let base = data_attribute(&link, WISHLIST_BASE)
                .or_else(|| link.get_attribute("href"))
                .or_else(|| data_attribute(&link, "href"));
            let Some(base) = base else {
                continue;
            };
            let set = |name: &str, value: &str| {
                link.set_attribute(name, value)
                    .map_err(|err| WidgetError::BrowserApi(js_error_message(&err)))
            };
            set(&format!("data-{}", WISHLIST_BASE), &base)?;
            match wishlist.href(&base) {
                Some(href) => {
                    set("href", &href)?;
                    rewritten += 1;
                }
                None if link.has_attribute("href") => set("href", &base)?,
                None => {}
            }
        }
        Ok(rewritten)
    }

    pub fn mount_cart_panel(&self) -> WidgetResult<usize> {
        let button = require(&self.document, &self.selectors.cart_button)?;
        let panel = require_html(&self.document, &self.selectors.cart_panel)?;
        let state = Rc::new(RefCell::new(CartPanel::default()));

        let target: &EventTarget = button.as_ref();
        let hover = |inside: bool| {
            let (state, panel) = (state.clone(), panel.clone());
            move |_: MouseEvent| {
                let display = state.borrow_mut().hover(inside);
                let _ = panel.style().set_property("display", display);
            }
        };
        let listeners = vec![on(target, ev::mouseenter, hover(true)), on(target, ev::mouseleave, hover(false))];

        keep_alive(WidgetKind::CartPanel, (state, listeners));
        Ok(1)
    }

    pub fn mount_quantity_steppers(&self) -> WidgetResult<usize> {
        let roots = self.document.query_all(&self.selectors.qty_stepper)?;
        if roots.is_empty() {
            return Err(WidgetError::MissingElement(self.selectors.qty_stepper.clone()));
        }

        let mut mounted = 0;
        for root in roots {
            match self.mount_quantity_stepper(&root) {
                Ok(()) => mounted += 1,
                Err(err) => {
                    log_debug!(COMPONENT, "quantity stepper skipped: {}", err);
                }
            }
        }
        Ok(mounted)
    }

    fn mount_quantity_stepper(&self, root: &Element) -> WidgetResult<()> {
        let input = require(root, &self.selectors.qty_input)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| WidgetError::MissingElement(self.selectors.qty_input.clone()))?;
        let form = root
            .closest("form")
            .map_err(|err| WidgetError::BrowserApi(js_error_message(&err)))?
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
            .ok_or_else(|| WidgetError::MissingElement("enclosing form".to_string()))?;
        let buttons = root.query_all(&self.selectors.qty_button)?;

        let stepper = Rc::new(RefCell::new(QuantityStepper::from_input(&input.value())));
        let options = EventOptions { passive: false, ..EventOptions::default() };
        let mut listeners = Vec::new();
        for button in &buttons {
            let Some(action) = data_attribute(button, "qty-step").and_then(|raw| StepAction::from_str(&raw).ok())
            else {
                continue;
            };
            let (stepper, input, form, buttons) = (stepper.clone(), input.clone(), form.clone(), buttons.clone());
            listeners.push(listen(button.as_ref(), ev::click, &options, move |event: MouseEvent| {
                event.prevent_default();
                let Some(submission) = stepper.borrow_mut().press(action) else {
                    return;
                };
                input.set_value(&submission.quantity.to_string());
                for button in &buttons {
                    let _ = button.set_attribute("disabled", "");
                }
                if let Err(err) = form.submit() {
                    log_warn!(COMPONENT, "quantity form did not submit: {}", js_error_message(&err));
                    stepper.borrow_mut().release();
                    for button in &buttons {
                        let _ = button.remove_attribute("disabled");
                    }
                }
            }));
        }
        if listeners.is_empty() {
            return Err(WidgetError::MissingElement(self.selectors.qty_button.clone()));
        }

        keep_alive(WidgetKind::QuantityStepper, (stepper, listeners));
        Ok(())
    }
}

fn measure_width(root: &Element) -> impl Fn() -> Measurements + 'static {
    let root = root.clone();
    move || Measurements::with_width(root.client_width() as f64)
}

/// With duplicated content the track wraps after exactly one copy.
fn scroll_measurements(root: &Element, mode: ScrollMode, duplicated: bool) -> Measurements {
    let width = root.client_width() as f64;
    let scroll_width = root.scroll_width() as f64;
    let scroll_extent = match (duplicated, mode) {
        (true, _) => scroll_width / 2.0,
        (false, ScrollMode::ScrollLeft) => (scroll_width - width).max(0.0),
        (false, ScrollMode::Translate) => width,
    };
    Measurements { container_width: width, scroll_extent }
}

pub fn apply_theme(html: &Element, theme: Theme) {
    let _ = match theme.data_attribute() {
        Some(value) => html.set_attribute("data-theme", value),
        None => html.remove_attribute("data-theme"),
    };
}

fn set_display(element: &HtmlElement, visible: bool) {
    let _ = element.style().set_property("display", if visible { "block" } else { "none" });
}
