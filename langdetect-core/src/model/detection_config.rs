use regex::Regex;

use crate::error::{LangdetectError, Result};

pub const DEFAULT_ALPHA: f64 = 0.5;
pub const DEFAULT_ALPHA_WIDTH: f64 = 0.05;
pub const DEFAULT_N_TRIALS: usize = 7;
pub const DEFAULT_ITERATION_LIMIT: usize = 10_000;
pub const DEFAULT_PROB_THRESHOLD: f64 = 0.1;
pub const DEFAULT_CONV_THRESHOLD: f64 = 0.99999;
pub const DEFAULT_BASE_FREQ: u32 = 10_000;
pub const DEFAULT_SEED: u64 = 0;

/// Validated, immutable detection parameters.
///
/// Built once (usually through `DetectorSettings::detection_config`) and
/// never changed for the life of a detector. The text filter is compiled
/// here, not per call.
///
/// # Invariants
/// - `n_trials >= 1`, `iteration_limit >= 1`, `base_freq > 0`
/// - `prob_threshold` and `conv_threshold` lie in `[0, 1]`
/// - `prior`, when set, is non-negative and sums to 1
#[derive(Debug, Clone)]
pub struct DetectionConfig {
	alpha: f64,
	alpha_width: f64,
	n_trials: usize,
	iteration_limit: usize,
	prob_threshold: f64,
	conv_threshold: f64,
	base_freq: u32,
	max_results: usize,
	text_filter: Option<Regex>,
	prior: Option<Vec<f64>>,
	seed: u64,
	parallel_trials: bool,
}

impl Default for DetectionConfig {
	fn default() -> Self {
		Self {
			alpha: DEFAULT_ALPHA,
			alpha_width: DEFAULT_ALPHA_WIDTH,
			n_trials: DEFAULT_N_TRIALS,
			iteration_limit: DEFAULT_ITERATION_LIMIT,
			prob_threshold: DEFAULT_PROB_THRESHOLD,
			conv_threshold: DEFAULT_CONV_THRESHOLD,
			base_freq: DEFAULT_BASE_FREQ,
			max_results: usize::MAX,
			text_filter: None,
			prior: None,
			seed: DEFAULT_SEED,
			parallel_trials: false,
		}
	}
}

/// Raw values handed to `DetectionConfig::new`.
///
/// Kept separate so that validation happens in exactly one place.
#[derive(Debug, Clone)]
pub(crate) struct RawConfig<'a> {
	pub alpha: f64,
	pub alpha_width: f64,
	pub n_trials: usize,
	pub iteration_limit: usize,
	pub prob_threshold: f64,
	pub conv_threshold: f64,
	pub base_freq: u32,
	pub max_results: Option<usize>,
	pub pattern: Option<&'a str>,
	pub prior: Option<&'a [f64]>,
	pub seed: u64,
	pub parallel_trials: bool,
}

impl DetectionConfig {
	pub(crate) fn new(raw: RawConfig<'_>) -> Result<Self> {
		if !raw.alpha.is_finite() || raw.alpha <= 0.0 {
			return invalid(format!("alpha must be a positive number, got {}", raw.alpha));
		}
		if !raw.alpha_width.is_finite() || raw.alpha_width < 0.0 {
			return invalid(format!("alpha_width must be a non-negative number, got {}", raw.alpha_width));
		}
		if raw.n_trials == 0 {
			return invalid("number_of_trials must be >= 1".to_owned());
		}
		if raw.iteration_limit == 0 {
			return invalid("iteration_limit must be >= 1".to_owned());
		}
		if !(0.0..=1.0).contains(&raw.prob_threshold) {
			return invalid(format!("prob_threshold must be between 0.0 and 1.0, got {}", raw.prob_threshold));
		}
		if !(0.0..=1.0).contains(&raw.conv_threshold) {
			return invalid(format!("conv_threshold must be between 0.0 and 1.0, got {}", raw.conv_threshold));
		}
		if raw.base_freq == 0 {
			return invalid("base_freq must be > 0".to_owned());
		}
		if raw.max_results == Some(0) {
			return invalid("max must be >= 1".to_owned());
		}

		let text_filter = raw.pattern.map(compile_filter).transpose()?;
		let prior = raw.prior.map(normalize_prior).transpose()?;

		Ok(Self {
			alpha: raw.alpha,
			alpha_width: raw.alpha_width,
			n_trials: raw.n_trials,
			iteration_limit: raw.iteration_limit,
			prob_threshold: raw.prob_threshold,
			conv_threshold: raw.conv_threshold,
			base_freq: raw.base_freq,
			max_results: raw.max_results.unwrap_or(usize::MAX),
			text_filter,
			prior,
			seed: raw.seed,
			parallel_trials: raw.parallel_trials,
		})
	}

	/// Base smoothing weight.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Standard deviation of the per-trial jitter applied to `alpha`.
	pub fn alpha_width(&self) -> f64 {
		self.alpha_width
	}

	pub fn n_trials(&self) -> usize {
		self.n_trials
	}

	pub fn iteration_limit(&self) -> usize {
		self.iteration_limit
	}

	pub fn prob_threshold(&self) -> f64 {
		self.prob_threshold
	}

	pub fn conv_threshold(&self) -> f64 {
		self.conv_threshold
	}

	pub fn base_freq(&self) -> u32 {
		self.base_freq
	}

	pub fn max_results(&self) -> usize {
		self.max_results
	}

	pub fn text_filter(&self) -> Option<&Regex> {
		self.text_filter.as_ref()
	}

	/// Normalized prior, `None` for the uniform prior.
	pub fn prior(&self) -> Option<&[f64]> {
		self.prior.as_deref()
	}

	pub fn seed(&self) -> u64 {
		self.seed
	}

	pub fn parallel_trials(&self) -> bool {
		self.parallel_trials
	}

	/// Whether `text` passes the whole-text filter (always true without one).
	pub fn accepts(&self, text: &str) -> bool {
		self.text_filter.as_ref().is_none_or(|re| re.is_match(text))
	}
}

fn invalid<T>(message: String) -> Result<T> {
	Err(LangdetectError::InvalidSetting(message))
}

/// Compiles `pattern` so that it must match the whole text.
fn compile_filter(pattern: &str) -> Result<Regex> {
	Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| LangdetectError::PatternCompile {
		pattern: pattern.to_owned(),
		source,
	})
}

fn normalize_prior(prior: &[f64]) -> Result<Vec<f64>> {
	if prior.iter().any(|p| !p.is_finite() || *p < 0.0) {
		return invalid("prior entries must be non-negative numbers".to_owned());
	}
	let sum: f64 = prior.iter().sum();
	if sum <= 0.0 {
		return invalid("prior must have a positive sum".to_owned());
	}
	Ok(prior.iter().map(|p| p / sum).collect())
}
