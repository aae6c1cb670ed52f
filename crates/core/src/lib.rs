//! Domain rules shared by the portfolio service crates.
//!
//! Nothing in here touches the database or the network: identifiers, image
//! addressing, public URL construction and the announcement caption.

pub mod error;
pub mod notice;
pub mod project;
pub mod types;
