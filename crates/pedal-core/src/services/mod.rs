//! Core services orchestrating ports.

pub mod launcher;

pub use launcher::{
    LaunchError, LaunchEvent, LaunchPlan, LaunchReport, LaunchStep, UpgradeOutcome, launch,
};
