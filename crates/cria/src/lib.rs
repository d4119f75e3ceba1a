//! Cria core — creative intake, placement catalog, session state, and the
//! analysis engine.
//!
//! Everything terminal-facing lives in `criactl`; this crate never prints.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini;
pub mod guidelines;
pub mod intake;
pub mod preview;
pub mod prompt;
pub mod schema;
pub mod session;
pub mod types;

pub use analysis::AnalysisEngine;
pub use config::CriaConfig;
pub use session::{Session, View};
pub use types::*;
