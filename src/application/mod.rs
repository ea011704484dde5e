//! Application layer: wires domain controllers to the page.

pub mod coordinator;

pub use coordinator::{MountReport, SlideMount, StorefrontCoordinator, apply_theme};
