//! Terminal presentation for the monitor.

pub mod bars;
pub mod color;
pub mod screen;

pub use bars::{Frame, handler_summary, render_frame};
pub use screen::MonitorScreen;
