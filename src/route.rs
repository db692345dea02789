//! Routing
//!
//! Permission-gated application routes.

pub mod guard;
pub mod table;

pub use guard::{Guarded, RouteDecision, RouteGuard};
pub use table::{RouteTable, RouteVisit};
