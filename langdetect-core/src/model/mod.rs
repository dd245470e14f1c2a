//! Top-level module for the detection engine.
//!
//! Leaf-first:
//! - Language profiles (`LanguageProfile`) and their on-disk loader
//! - The global n-gram index (`ProfileStore`)
//! - N-gram extraction from raw text
//! - The randomized Naive-Bayes `Classifier`
//! - Result ranking
//! - The `Detector` service tying them together

/// Frequency profile of one language.
pub mod profile;

/// Reads profiles and code maps from a directory.
pub mod profile_loader;

/// Global n-gram → per-language probability index.
///
/// Built once through `ProfileStoreBuilder`, read-only afterwards.
pub mod profile_store;

/// Text cleaning and n-gram extraction.
pub mod ngram;

/// Monte-Carlo Naive-Bayes inference over the index.
pub mod classifier;

/// Filtering, ordering and truncation of classifier output.
pub mod ranker;

/// Validated detection parameters.
pub mod detection_config;

/// The detection service.
pub mod detector;
