//! Neulish Engine - regulation-first cognitive wellness recommendations
//!
//! The engine turns a self-reported check-in into a short, prioritised plan through a
//! deterministic pipeline: raw input → normalization → decision tree → response.
//! Separately, weekly and corporate records are reduced to mean-based summaries.
//!
//! ## Modules
//!
//! - **Recommendations**: normalize a check-in and build an ordered activity plan
//! - **Summaries**: weekly recap, weekly narrative and corporate participation metrics
//! - **Features**: preprocess check-in batches into fixed feature vectors

pub mod encoder;
pub mod engine;
pub mod error;
pub mod features;
pub mod normalizer;
pub mod pipeline;
pub mod summary;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use engine::{cap_session_minutes, day_outlook, decide, recommend, Decision};
pub use error::EngineError;
pub use normalizer::{clamp, normalize_10_to_5, Normalizer};
pub use pipeline::{health, recommend_input, recommend_json};
pub use types::{RecommendationResponse, UserInput, UserState};

// Summary exports
pub use summary::{corporate_metrics, narrative, summarize_week, WeeklyAggregator};

/// Engine version embedded in envelopes and health reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for envelopes and health reports
pub const PRODUCER_NAME: &str = "neulish-engine";
