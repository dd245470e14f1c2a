use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io;
use crate::model::detection_config::{
	DEFAULT_ALPHA, DEFAULT_ALPHA_WIDTH, DEFAULT_BASE_FREQ, DEFAULT_CONV_THRESHOLD, DEFAULT_ITERATION_LIMIT,
	DEFAULT_N_TRIALS, DEFAULT_PROB_THRESHOLD, DEFAULT_SEED, DetectionConfig, RawConfig,
};

/// Languages loaded when the settings do not name any.
pub const DEFAULT_LANGUAGES: &[&str] = &[
	"ar", "bg", "bn", "cs", "da", "de", "el", "en", "es", "et", "fa", "fi", "fr", "gu", "he", "hi", "hr", "hu",
	"id", "it", "ja", "ko", "lt", "lv", "mk", "ml", "nl", "no", "pa", "pl", "pt", "ro", "ru", "sq", "sv", "ta",
	"te", "th", "tl", "tr", "uk", "ur", "vi", "zh-cn", "zh-tw",
];

/// User-facing detector settings.
///
/// Every field has a default, so a settings file only lists what it changes:
///
/// ```json
/// { "languages": ["en", "de"], "max": 1, "map": { "en": "eng" } }
/// ```
///
/// Settings are plain data; `detection_config` validates them once and
/// compiles the text filter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DetectorSettings {
	/// Language codes to load, in index order.
	pub languages: Vec<String>,
	/// Optional profile variant, a sub-directory of the profile root.
	pub profile: Option<String>,
	/// Inline code map. When empty, `language.json` in the profile
	/// directory is used if present.
	pub map: HashMap<String, String>,
	pub number_of_trials: usize,
	pub alpha: f64,
	pub alpha_width: f64,
	pub iteration_limit: usize,
	pub prob_threshold: f64,
	pub conv_threshold: f64,
	pub base_freq: u32,
	/// Whole-text filter; non-matching texts are not classified.
	pub pattern: Option<String>,
	/// Maximum number of results, unbounded when absent.
	pub max: Option<usize>,
	/// Initial probability per language (same order as `languages`).
	pub prior: Option<Vec<f64>>,
	pub seed: u64,
	pub parallel_trials: bool,
	/// Read and write `postcard` copies of the profiles.
	pub binary_cache: bool,
}

impl Default for DetectorSettings {
	fn default() -> Self {
		Self {
			languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
			profile: None,
			map: HashMap::new(),
			number_of_trials: DEFAULT_N_TRIALS,
			alpha: DEFAULT_ALPHA,
			alpha_width: DEFAULT_ALPHA_WIDTH,
			iteration_limit: DEFAULT_ITERATION_LIMIT,
			prob_threshold: DEFAULT_PROB_THRESHOLD,
			conv_threshold: DEFAULT_CONV_THRESHOLD,
			base_freq: DEFAULT_BASE_FREQ,
			pattern: None,
			max: None,
			prior: None,
			seed: DEFAULT_SEED,
			parallel_trials: false,
			binary_cache: false,
		}
	}
}

impl DetectorSettings {
	/// Settings restricted to `languages`, everything else default.
	pub fn with_languages<S: AsRef<str>>(languages: &[S]) -> Self {
		Self {
			languages: languages.iter().map(|l| l.as_ref().to_owned()).collect(),
			..Default::default()
		}
	}

	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		Ok(serde_json::from_reader(io::open_buffered(path)?)?)
	}

	/// Validates the numeric settings and compiles the filter pattern.
	///
	/// # Errors
	/// `InvalidSetting` for out-of-range values, `PatternCompile` for a bad
	/// pattern.
	pub fn detection_config(&self) -> Result<DetectionConfig> {
		DetectionConfig::new(RawConfig {
			alpha: self.alpha,
			alpha_width: self.alpha_width,
			n_trials: self.number_of_trials,
			iteration_limit: self.iteration_limit,
			prob_threshold: self.prob_threshold,
			conv_threshold: self.conv_threshold,
			base_freq: self.base_freq,
			max_results: self.max,
			pattern: self.pattern.as_deref(),
			prior: self.prior.as_deref(),
			seed: self.seed,
			parallel_trials: self.parallel_trials,
		})
	}
}
