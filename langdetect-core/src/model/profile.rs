use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{LangdetectError, Result};

/// Longest n-gram a profile contributes to the index.
pub const MAX_NGRAM_LENGTH: usize = 3;

/// Frequency profile of a single language.
///
/// A profile is a precomputed table of character n-gram counts together with
/// the total number of n-grams observed for each length (1, 2 and 3).
///
/// The serialized form is the usual JSON profile layout:
/// `{"name": "en", "freq": {"a": 42, "th": 7}, "n_words": [n1, n2, n3]}`.
///
/// ## Invariants
/// - Immutable once read
/// - `n_words[len - 1]` is strictly positive for every length that has keys
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LanguageProfile {
	/// Language code (e.g. `"en"`, `"zh-cn"`).
	name: String,
	/// N-gram to observed count.
	freq: HashMap<String, u64>,
	/// Total n-grams observed, indexed by length - 1.
	n_words: [u64; MAX_NGRAM_LENGTH],
}

impl LanguageProfile {
	/// Creates a profile from already counted data.
	///
	/// # Errors
	/// Returns `InvalidProfile` if a length has keys but a zero total.
	pub fn new(name: &str, freq: HashMap<String, u64>, n_words: [u64; MAX_NGRAM_LENGTH]) -> Result<Self> {
		let profile = Self { name: name.to_owned(), freq, n_words };
		profile.validate()?;
		Ok(profile)
	}

	/// Parses a profile from its JSON form.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let profile: Self = serde_json::from_str(json)?;
		profile.validate()?;
		Ok(profile)
	}

	/// Parses a profile from a JSON stream.
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let profile: Self = serde_json::from_reader(reader)?;
		profile.validate()?;
		Ok(profile)
	}

	/// Decodes the compact binary (`postcard`) form.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let profile: Self = postcard::from_bytes(bytes)?;
		profile.validate()?;
		Ok(profile)
	}

	/// Encodes the profile into its compact binary (`postcard`) form.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn freq(&self) -> &HashMap<String, u64> {
		&self.freq
	}

	pub fn n_words(&self) -> &[u64; MAX_NGRAM_LENGTH] {
		&self.n_words
	}

	/// Probability of `ngram` within its length class, `None` for lengths the
	/// index does not use.
	pub fn probability(&self, ngram: &str, count: u64) -> Option<f64> {
		let length = ngram.chars().count();
		if !(1..=MAX_NGRAM_LENGTH).contains(&length) {
			return None;
		}
		Some(count as f64 / self.n_words[length - 1] as f64)
	}

	fn validate(&self) -> Result<()> {
		if self.name.trim().is_empty() {
			return Err(LangdetectError::InvalidProfile {
				language: self.name.clone(),
				message: "empty language name".to_owned(),
			});
		}

		for key in self.freq.keys() {
			let length = key.chars().count();
			if (1..=MAX_NGRAM_LENGTH).contains(&length) && self.n_words[length - 1] == 0 {
				return Err(LangdetectError::InvalidProfile {
					language: self.name.clone(),
					message: format!("no total count for {}-grams", length),
				});
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_json_profile() {
		let profile = LanguageProfile::from_json_str(
			r#"{"name":"en","freq":{"t":10,"th":4,"the":2},"n_words":[100,50,20]}"#,
		)
		.unwrap();

		assert_eq!(profile.name(), "en");
		assert_eq!(profile.freq().len(), 3);
		assert_eq!(profile.n_words(), &[100, 50, 20]);
		assert_eq!(profile.probability("th", 4), Some(0.08));
		assert_eq!(profile.probability("the", 2), Some(0.1));
	}

	#[test]
	fn test_probability_ignores_unsupported_lengths() {
		let profile = LanguageProfile::from_json_str(
			r#"{"name":"en","freq":{"t":1},"n_words":[1,1,1]}"#,
		)
		.unwrap();

		assert_eq!(profile.probability("", 1), None);
		assert_eq!(profile.probability("then", 1), None);
	}

	#[test]
	fn test_zero_total_is_rejected() {
		let err = LanguageProfile::from_json_str(
			r#"{"name":"en","freq":{"th":4},"n_words":[10,0,10]}"#,
		)
		.unwrap_err();

		assert!(matches!(err, LangdetectError::InvalidProfile { .. }));
	}

	#[test]
	fn test_binary_form_matches_json_form() {
		let profile = LanguageProfile::from_json_str(
			r#"{"name":"de","freq":{"ä":3,"sch":5},"n_words":[30,20,10]}"#,
		)
		.unwrap();

		let bytes = profile.to_bytes().unwrap();
		assert_eq!(LanguageProfile::from_bytes(&bytes).unwrap(), profile);
	}
}
