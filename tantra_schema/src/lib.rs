//! # Tantra Schema
//!
//! The ritual schema crate - contains the interaction modes, the resolved protocol
//! units, and the shape of the Mirror Tantra document.
//! This crate holds no engine logic and performs no I/O.

pub mod document;
pub mod modes;
pub mod units;

pub use document::*;
pub use modes::*;
pub use units::*;
