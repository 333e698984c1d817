//! # Domain Module
//!
//! Published registry state and the pure status rules.

pub mod entities;
pub mod rules;

pub use entities::*;
pub use rules::*;
