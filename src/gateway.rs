//! Menu Persistence Gateway
//!
//! The only code that talks to a menu backend. Structures are fetched and stored
//! wholesale per installation; there is no partial update.

pub mod contract;
pub mod http;
pub mod sled_store;

pub use contract::MenuGateway;
pub use http::{HttpMenuGateway, ACTING_USER_HEADER};
pub use sled_store::{fingerprint, MenuRecord, SledMenuGateway};
