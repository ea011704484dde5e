//! Widget logic with no browser access: everything here runs (and is tested)
//! natively, and reaches timers, storage and the DOM only through ports.

pub mod carousel;
pub mod cart;
pub mod errors;
pub mod logging;
pub mod preferences;
pub mod ribbon;
