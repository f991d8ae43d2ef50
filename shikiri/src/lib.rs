pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod ipc;
pub mod layout;
pub mod platform;

pub use controller::{ApplyReport, LayoutController, RefreshReport, Truncation};
