use std::collections::HashMap;
use std::path::Path;

use log::{debug, trace};

use super::classifier::Classifier;
use super::detection_config::DetectionConfig;
use super::ngram;
use super::profile_loader::ProfileLoader;
use super::profile_store::ProfileStore;
use super::ranker::{self, Language};
use crate::error::{LangdetectError, Result};
use crate::settings::DetectorSettings;

/// Language detection service.
///
/// A `Detector` is fully initialised by its constructor and immutable
/// afterwards: the profile store, code map and configuration never change,
/// so one instance can serve any number of threads (share it behind an
/// `Arc`). Loading a different language set means building a new detector.
///
/// Detection pipeline: text → n-gram extraction → classification → ranking.
#[derive(Debug, Clone)]
pub struct Detector {
	store: ProfileStore,
	code_map: HashMap<String, String>,
	config: DetectionConfig,
}

impl Detector {
	/// Assembles a detector from an already built store.
	///
	/// # Errors
	/// `InvalidSetting` if the configured prior does not have one entry per
	/// language.
	pub fn new(store: ProfileStore, code_map: HashMap<String, String>, config: DetectionConfig) -> Result<Self> {
		if let Some(prior) = config.prior() {
			if prior.len() != store.len() {
				return Err(LangdetectError::InvalidSetting(format!(
					"prior has {} entries for {} languages",
					prior.len(),
					store.len()
				)));
			}
		}
		Ok(Self { store, code_map, config })
	}

	/// Loads every profile named in `settings` from `profile_root` and
	/// builds the detector.
	///
	/// The code map comes from `settings.map`, or from the profile
	/// directory's `language.json` when the settings carry none.
	///
	/// # Errors
	/// Any load or validation failure; no partially loaded detector is
	/// returned.
	pub fn from_settings<P: AsRef<Path>>(settings: &DetectorSettings, profile_root: P) -> Result<Self> {
		let config = settings.detection_config()?;
		let loader = ProfileLoader::new(profile_root, settings.profile.as_deref())
			.with_binary_cache(settings.binary_cache);

		let store = loader.load_store(&settings.languages)?;
		let code_map = if settings.map.is_empty() { loader.load_code_map()? } else { settings.map.clone() };
		debug!("language detection service installed for {:?} from {}", store.languages(), loader.dir().display());

		Self::new(store, code_map, config)
	}

	/// Ranked languages of `text`, most probable first.
	///
	/// Returns an empty list when the text is rejected by the filter or
	/// carries no known n-gram.
	pub fn detect_all(&self, text: &str) -> Vec<Language> {
		if !self.config.accepts(text) {
			trace!("text rejected by filter");
			return Vec::new();
		}

		let ngrams = ngram::extract(text, &self.store);
		trace!("{} known n-grams", ngrams.len());
		let probabilities = Classifier::new(&self.store, &self.config).classify(&ngrams);

		ranker::rank(&probabilities, self.store.languages(), &self.code_map, &self.config)
	}

	/// Most probable language of `text`, if any passes the threshold.
	pub fn detect(&self, text: &str) -> Option<Language> {
		self.detect_all(text).into_iter().next()
	}

	/// Loaded language codes, in index order (before code mapping).
	pub fn languages(&self) -> &[String] {
		self.store.languages()
	}

	pub fn store(&self) -> &ProfileStore {
		&self.store
	}

	pub fn code_map(&self) -> &HashMap<String, String> {
		&self.code_map
	}

	pub fn config(&self) -> &DetectionConfig {
		&self.config
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::profile::LanguageProfile;

	fn store() -> ProfileStore {
		let profile = |name: &str, freq: &[(&str, u64)]| {
			let freq = freq.iter().map(|(k, v)| (k.to_string(), *v)).collect();
			LanguageProfile::new(name, freq, [100, 50, 20]).unwrap()
		};
		ProfileStore::from_profiles(&[
			profile("en", &[("t", 30), ("h", 20), ("e", 40), ("th", 15), ("he", 12), ("the", 10)]),
			profile("de", &[("d", 25), ("e", 45), ("r", 30), ("de", 10), ("er", 14), ("der", 8)]),
		])
		.unwrap()
	}

	#[test]
	fn test_detect_all_picks_language() {
		let detector = Detector::new(store(), HashMap::new(), DetectionConfig::default()).unwrap();
		let result = detector.detect_all("the the the");

		assert_eq!(result.len(), 1);
		assert_eq!(result[0].code, "en");
		assert!(result[0].probability > 0.9);
	}

	#[test]
	fn test_filter_gate_skips_classification() {
		let config = DetectorSettings { pattern: Some("[0-9]+".to_owned()), ..Default::default() }
			.detection_config()
			.unwrap();
		let detector = Detector::new(store(), HashMap::new(), config).unwrap();

		assert!(detector.detect_all("the the the").is_empty());
	}

	#[test]
	fn test_prior_length_is_checked() {
		let config = DetectorSettings { prior: Some(vec![1.0, 1.0, 1.0]), ..Default::default() }
			.detection_config()
			.unwrap();

		assert!(matches!(
			Detector::new(store(), HashMap::new(), config),
			Err(LangdetectError::InvalidSetting(_))
		));
	}

	#[test]
	fn test_detect_returns_best() {
		let map = HashMap::from([("de".to_string(), "Deutsch".to_string())]);
		let detector = Detector::new(store(), map, DetectionConfig::default()).unwrap();

		assert_eq!(detector.detect("der der der").map(|l| l.code), Some("Deutsch".to_string()));
		assert_eq!(detector.detect("???"), None);
	}

	#[test]
	fn test_detector_is_shareable() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Detector>();
	}
}
