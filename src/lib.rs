// KreolGuard: content moderation for Mauritian Creole, French and English.
//
// This is the library root. Each module is one stage of the moderation
// pipeline, plus the ambient pieces (config, audit log, terminal output)
// the CLI wires together.

pub mod config;
pub mod db;
pub mod error;
pub mod fusion;
pub mod lexicon;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod signals;
#[cfg(feature = "sqlite")]
pub mod status;
