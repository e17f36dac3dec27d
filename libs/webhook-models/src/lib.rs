//! Deploy relay HTTP models

pub mod models;

pub use models::*;
