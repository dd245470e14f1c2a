use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a detector.
///
/// Detection itself never fails: unknown n-grams are skipped and a text
/// without signal yields an empty result list.
#[derive(Error, Debug)]
pub enum LangdetectError {
	#[error("profile '{language}' not found in {}", .path.display())]
	ProfileNotFound { language: String, path: PathBuf },

	#[error("duplicate of the same language profile: {0}")]
	DuplicateLanguage(String),

	#[error("too many profiles, store was sized for {expected} languages")]
	ProfileOverflow { expected: usize },

	#[error("invalid profile '{language}': {message}")]
	InvalidProfile { language: String, message: String },

	#[error("invalid filter pattern '{pattern}': {source}")]
	PatternCompile {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("invalid setting: {0}")]
	InvalidSetting(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("binary profile error: {0}")]
	Binary(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, LangdetectError>;
