pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{ControllerPorts, SlideController};
pub use services::{RandomSource, SlideRenderer, TimerScheduler};
pub use value_objects::{
    CarouselOptions, ControllerPhase, EnterDirection, IntervalPolicy, Measurements, SlideChange,
    SlideLayout, TimerId, TimerKind,
};
