//! N-gram-based language detection library.
//!
//! This crate estimates which language a text is written in:
//! - Per-language character n-gram profiles merged into one global index
//! - N-gram extraction from raw text
//! - Randomized Naive-Bayes classification with reproducible seeding
//! - Ranking, thresholding and code mapping of the results
//!
//! The entry point is [`model::detector::Detector`], built once from
//! [`settings::DetectorSettings`] and a profile directory, then shared.

/// Detection engine: profiles, index, extraction, classification, ranking.
pub mod model;

/// Detector settings (defaults, JSON loading, validation).
pub mod settings;

/// Error type shared by the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{LangdetectError, Result};
pub use model::detector::Detector;
pub use model::ranker::Language;
pub use settings::DetectorSettings;
