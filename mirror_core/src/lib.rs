//! # Mirror Core
//!
//! The Mirror Tantra engine. It loads the `tantra_schema` document, flattens it into
//! a protocol index, classifies prompts into interaction modes, and assembles
//! ritual context for LLM prompt construction.
//!
//! ## Core Components
//!
//! - **index**: The flat, read-only mapping from protocol id to resolved unit
//! - **classifier**: Ordered keyword rules mapping prompt text to a mode
//! - **resolver**: Guidance payloads and system-prompt context blocks
//! - **engine**: Facade tying the three together for host applications
//!
//! Everything is built once at load time; all lookups afterwards are pure reads.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod resolver;

pub use classifier::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use index::*;
pub use resolver::*;

pub use tantra_schema::{Mantra, Mode, ProtocolContext};
