//! Domain types shared by the persistence and HTTP layers.

pub mod error;
pub mod messages;
pub mod types;
