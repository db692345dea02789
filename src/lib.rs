//! Tendernav: Permission-Aware Navigation
//!
//! Capability-gated routes and menus for the tender management suite, plus
//! an editor for renaming and reordering an installation's menu structure.

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod menu;
pub mod notice;
pub mod permission;
pub mod route;
pub mod tooling;
pub mod types;
