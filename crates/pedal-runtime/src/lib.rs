#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod monitor;
pub mod process;
pub mod system;

// Re-export key types for convenience
pub use monitor::MonitorService;
pub use process::TokioCommandRunner;
pub use system::DefaultSystemProbe;
