use std::collections::HashMap;

use log::debug;

use super::profile::LanguageProfile;
use crate::error::{LangdetectError, Result};

/// Accumulates language profiles into the global n-gram index.
///
/// This is the only mutable phase of a store's life. Once every profile has
/// been added, `build` turns the builder into an immutable `ProfileStore`
/// that can be shared freely between threads.
///
/// # Invariants
/// - No language code appears twice
/// - Every probability vector has `expected_languages` entries
#[derive(Debug)]
pub struct ProfileStoreBuilder {
	expected_languages: usize,
	languages: Vec<String>,
	ngram_probabilities: HashMap<String, Vec<f64>>,
}

impl ProfileStoreBuilder {
	/// Creates an empty builder sized for `expected_languages` profiles.
	pub fn new(expected_languages: usize) -> Self {
		Self {
			expected_languages,
			languages: Vec::with_capacity(expected_languages),
			ngram_probabilities: HashMap::new(),
		}
	}

	/// Adds a profile, assigning it the next language index.
	///
	/// N-grams of length 0 or above 3 are ignored.
	///
	/// # Errors
	/// - `DuplicateLanguage` if the code is already loaded; the store keeps the
	///   first profile untouched.
	/// - `ProfileOverflow` if the builder is already full.
	pub fn add_profile(&mut self, profile: &LanguageProfile) -> Result<()> {
		let lang = profile.name();
		if self.languages.iter().any(|l| l == lang) {
			return Err(LangdetectError::DuplicateLanguage(lang.to_owned()));
		}
		if self.languages.len() >= self.expected_languages {
			return Err(LangdetectError::ProfileOverflow { expected: self.expected_languages });
		}

		let index = self.languages.len();
		self.languages.push(lang.to_owned());

		let size = self.expected_languages;
		for (ngram, count) in profile.freq() {
			if let Some(prob) = profile.probability(ngram, *count) {
				let vector = self
					.ngram_probabilities
					.entry(ngram.clone())
					.or_insert_with(|| vec![0.0; size]);
				vector[index] = prob;
			}
		}

		Ok(())
	}

	/// Number of profiles added so far.
	pub fn len(&self) -> usize {
		self.languages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.languages.is_empty()
	}

	/// Freezes the index.
	///
	/// Vectors are trimmed to the number of languages actually loaded so that
	/// every vector lines up with `languages()`.
	pub fn build(mut self) -> ProfileStore {
		let count = self.languages.len();
		if count < self.expected_languages {
			for vector in self.ngram_probabilities.values_mut() {
				vector.truncate(count);
			}
		}
		debug!("language detection store installed for {:?}", self.languages);

		ProfileStore {
			languages: self.languages,
			ngram_probabilities: self.ngram_probabilities,
		}
	}
}

/// Immutable n-gram index shared by every detection call.
///
/// Built once through `ProfileStoreBuilder` and never modified afterwards, so
/// concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct ProfileStore {
	languages: Vec<String>,
	ngram_probabilities: HashMap<String, Vec<f64>>,
}

impl ProfileStore {
	/// Builds a store from profiles in load order.
	pub fn from_profiles(profiles: &[LanguageProfile]) -> Result<Self> {
		let mut builder = ProfileStoreBuilder::new(profiles.len());
		for profile in profiles {
			builder.add_profile(profile)?;
		}
		Ok(builder.build())
	}

	/// Language codes, index = position in every probability vector.
	pub fn languages(&self) -> &[String] {
		&self.languages
	}

	pub fn len(&self) -> usize {
		self.languages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.languages.is_empty()
	}

	/// Per-language probabilities of `ngram`, if any profile contains it.
	pub fn probabilities(&self, ngram: &str) -> Option<&[f64]> {
		self.ngram_probabilities.get(ngram).map(Vec::as_slice)
	}

	/// Returns the stored key equal to `ngram`.
	///
	/// Lets callers keep a borrowed n-gram instead of allocating their own.
	pub fn key(&self, ngram: &str) -> Option<&str> {
		self.ngram_probabilities.get_key_value(ngram).map(|(k, _)| k.as_str())
	}

	pub fn contains(&self, ngram: &str) -> bool {
		self.ngram_probabilities.contains_key(ngram)
	}

	/// Number of distinct n-grams in the index.
	pub fn ngram_count(&self) -> usize {
		self.ngram_probabilities.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profile(name: &str, freq: &[(&str, u64)], n_words: [u64; 3]) -> LanguageProfile {
		let freq = freq.iter().map(|(k, v)| (k.to_string(), *v)).collect();
		LanguageProfile::new(name, freq, n_words).unwrap()
	}

	#[test]
	fn test_probabilities_are_indexed_by_load_order() {
		let mut builder = ProfileStoreBuilder::new(2);
		builder.add_profile(&profile("en", &[("a", 10), ("th", 5)], [100, 50, 10])).unwrap();
		builder.add_profile(&profile("de", &[("a", 20), ("sch", 2)], [100, 50, 10])).unwrap();
		let store = builder.build();

		assert_eq!(store.languages(), &["en".to_string(), "de".to_string()]);
		assert_eq!(store.probabilities("a"), Some(&[0.1, 0.2][..]));
		assert_eq!(store.probabilities("th"), Some(&[0.1, 0.0][..]));
		assert_eq!(store.probabilities("sch"), Some(&[0.0, 0.2][..]));
		assert_eq!(store.probabilities("xyz"), None);
	}

	#[test]
	fn test_duplicate_language_keeps_first() {
		let mut builder = ProfileStoreBuilder::new(3);
		builder.add_profile(&profile("en", &[("a", 10)], [100, 1, 1])).unwrap();

		let err = builder.add_profile(&profile("en", &[("a", 50), ("b", 5)], [100, 1, 1])).unwrap_err();
		assert!(matches!(err, LangdetectError::DuplicateLanguage(ref l) if l == "en"));

		let store = builder.build();
		assert_eq!(store.len(), 1);
		assert_eq!(store.probabilities("a"), Some(&[0.1][..]));
		assert!(!store.contains("b"));
	}

	#[test]
	fn test_overflow_is_rejected() {
		let mut builder = ProfileStoreBuilder::new(1);
		builder.add_profile(&profile("en", &[("a", 1)], [1, 1, 1])).unwrap();

		let err = builder.add_profile(&profile("de", &[("a", 1)], [1, 1, 1])).unwrap_err();
		assert!(matches!(err, LangdetectError::ProfileOverflow { expected: 1 }));
	}

	#[test]
	fn test_long_ngrams_are_ignored() {
		let store = ProfileStore::from_profiles(&[profile("en", &[("a", 1), ("then", 3)], [10, 1, 1])]).unwrap();

		assert!(store.contains("a"));
		assert!(!store.contains("then"));
		assert_eq!(store.ngram_count(), 1);
	}

	#[test]
	fn test_vectors_are_trimmed_to_loaded_languages() {
		let mut builder = ProfileStoreBuilder::new(5);
		builder.add_profile(&profile("en", &[("a", 5)], [10, 1, 1])).unwrap();
		let store = builder.build();

		assert_eq!(store.probabilities("a"), Some(&[0.5][..]));
	}

	#[test]
	fn test_key_borrows_stored_ngram() {
		let store = ProfileStore::from_profiles(&[profile("en", &[("th", 1)], [1, 1, 1])]).unwrap();

		assert_eq!(store.key("th"), Some("th"));
		assert_eq!(store.key("he"), None);
	}
}
