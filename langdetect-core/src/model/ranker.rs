use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::detection_config::DetectionConfig;

/// A detected language and its probability.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Language {
	/// Language code, after the optional code map.
	pub code: String,
	/// Probability in `(prob_threshold, 1.0]`.
	pub probability: f64,
}

impl Language {
	pub fn new(code: &str, probability: f64) -> Self {
		Self { code: code.to_owned(), probability }
	}
}

/// Turns a probability vector into the ranked result list.
///
/// - Languages at or below `prob_threshold` are dropped
/// - Each kept language is inserted before the first entry with a strictly
///   lower probability, so ties keep load order
/// - Codes go through `code_map` when it has an entry
/// - The list is cut to `max_results`
pub fn rank(
	probabilities: &[f64],
	languages: &[String],
	code_map: &HashMap<String, String>,
	config: &DetectionConfig,
) -> Vec<Language> {
	let mut list: Vec<Language> = Vec::new();

	for (code, &p) in languages.iter().zip(probabilities) {
		if p > config.prob_threshold() {
			let position = list.iter().position(|l| l.probability < p).unwrap_or(list.len());
			let code = code_map.get(code).unwrap_or(code);
			list.insert(position, Language::new(code, p));
		}
	}

	list.truncate(config.max_results());
	list
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::DetectorSettings;

	fn languages(codes: &[&str]) -> Vec<String> {
		codes.iter().map(|c| c.to_string()).collect()
	}

	#[test]
	fn test_rank_sorts_descending_and_filters() {
		let config = DetectionConfig::default();
		let ranked = rank(&[0.2, 0.05, 0.7, 0.1], &languages(&["a", "b", "c", "d"]), &HashMap::new(), &config);

		assert_eq!(ranked, vec![Language::new("c", 0.7), Language::new("a", 0.2)]);
	}

	#[test]
	fn test_rank_ties_keep_load_order() {
		let config = DetectionConfig::default();
		let ranked = rank(&[0.4, 0.4, 0.2], &languages(&["fr", "it", "es"]), &HashMap::new(), &config);

		let codes: Vec<&str> = ranked.iter().map(|l| l.code.as_str()).collect();
		assert_eq!(codes, vec!["fr", "it", "es"]);
	}

	#[test]
	fn test_rank_maps_codes() {
		let config = DetectionConfig::default();
		let map = HashMap::from([("en".to_string(), "eng".to_string())]);
		let ranked = rank(&[0.9, 0.3], &languages(&["en", "de"]), &map, &config);

		assert_eq!(ranked, vec![Language::new("eng", 0.9), Language::new("de", 0.3)]);
	}

	#[test]
	fn test_rank_truncates_to_max() {
		let config = DetectorSettings { max: Some(1), ..Default::default() }.detection_config().unwrap();
		let ranked = rank(&[0.3, 0.6], &languages(&["en", "de"]), &HashMap::new(), &config);

		assert_eq!(ranked, vec![Language::new("de", 0.6)]);
	}

	#[test]
	fn test_rank_zero_vector_is_empty() {
		let config = DetectionConfig::default();

		assert!(rank(&[0.0, 0.0], &languages(&["en", "de"]), &HashMap::new(), &config).is_empty());
	}
}
