use std::any::Any;
use std::cell::RefCell;

use derive_more::Display;
use strum::{AsRefStr, EnumIter};

use crate::domain::preferences::theme::{Theme, ThemeController};
use crate::infrastructure::storage::LocalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum WidgetKind {
    #[display(fmt = "product-carousel")]
    ProductCarousel,
    #[display(fmt = "brand-stack")]
    BrandStack,
    #[display(fmt = "brand-rotator")]
    BrandRotator,
    #[display(fmt = "brand-marquee")]
    BrandMarquee,
    #[display(fmt = "hero-strip")]
    HeroStrip,
    #[display(fmt = "promo-ribbon")]
    PromoRibbon,
    #[display(fmt = "theme-toggle")]
    ThemeToggle,
    #[display(fmt = "wishlist-panel")]
    WishlistPanel,
    #[display(fmt = "wishlist-link")]
    WishlistLink,
    #[display(fmt = "cart-panel")]
    CartPanel,
    #[display(fmt = "quantity-stepper")]
    QuantityStepper,
}

/// A mounted widget's controller, closures and listeners, held until unload.
pub struct MountedWidget {
    pub kind: WidgetKind,
    _parts: Box<dyn Any>,
}

thread_local! {
    static MOUNTED: RefCell<Vec<MountedWidget>> = const { RefCell::new(Vec::new()) };
    static THEME: RefCell<ThemeController<LocalStore>> = RefCell::new(ThemeController::load(LocalStore));
}

pub fn keep_alive(kind: WidgetKind, parts: impl Any) {
    MOUNTED.with(|mounted| {
        mounted.borrow_mut().push(MountedWidget { kind, _parts: Box::new(parts) });
    });
}

pub fn mounted_count() -> usize {
    MOUNTED.with(|mounted| mounted.borrow().len())
}

pub fn mounted_kinds() -> Vec<WidgetKind> {
    MOUNTED.with(|mounted| mounted.borrow().iter().map(|widget| widget.kind).collect())
}

/// Drop every mounted widget: cancels its timers and detaches its listeners
/// (closures die with their handles).
pub fn unmount_all() {
    let widgets = MOUNTED.with(|mounted| std::mem::take(&mut *mounted.borrow_mut()));
    drop(widgets);
}

/// Page-wide theme session, shared by the toggle button and the JS API.
pub fn with_theme<T>(f: impl FnOnce(&mut ThemeController<LocalStore>) -> T) -> T {
    THEME.with(|theme| f(&mut theme.borrow_mut()))
}

pub fn current_theme() -> Theme {
    with_theme(|theme| theme.current())
}
