pub mod dom;
pub mod scheduler;
pub mod services;
pub mod storage;

pub use scheduler::{BrowserScheduler, TimerDispatch, VirtualScheduler, run_for};
pub use services::{BrowserRandom, BrowserTimeProvider, ConsoleLogger, prefers_reduced_motion};
pub use storage::LocalStore;
