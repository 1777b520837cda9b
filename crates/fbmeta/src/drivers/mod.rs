//! Database driver implementations.
//!
//! - [`firebird`]: Firebird over the pure Rust client (feature `firebird`)
//!
//! Drivers implement [`CatalogSource`](crate::core::CatalogSource),
//! [`ScriptTarget`](crate::core::ScriptTarget) and
//! [`DatabaseFactory`](crate::core::DatabaseFactory).

#[cfg(feature = "firebird")]
pub mod firebird;

#[cfg(feature = "firebird")]
pub use firebird::{FirebirdConnection, FirebirdFactory};
