#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use langdetect_core::model::ngram::clean_text;
use langdetect_core::model::profile::LanguageProfile;

pub const ENGLISH: &str = "the quick brown fox jumps over the lazy dog. \
	this is a short sample of english text with the usual words in it. \
	which of them would you like to have for the weekend and where are we going";

pub const GERMAN: &str = "der schnelle braune fuchs springt über den faulen hund. \
	das ist ein kurzer beispieltext auf deutsch mit den üblichen wörtern. \
	welche davon möchtest du für das wochenende haben und wohin gehen wir";

/// Counts every 1..3-gram of `text` the same way the extractor windows it.
///
/// Grams made only of spaces are skipped.
pub fn profile_from_text(name: &str, text: &str) -> LanguageProfile {
	let mut freq: HashMap<String, u64> = HashMap::new();
	let mut n_words = [0u64; 3];
	let chars: Vec<char> = clean_text(text).chars().collect();

	for end in 1..=chars.len() {
		for n in 1..=3 {
			if n > end {
				break;
			}
			let gram: String = chars[end - n..end].iter().collect();
			if gram.trim().is_empty() {
				continue;
			}
			*freq.entry(gram).or_insert(0) += 1;
			n_words[n - 1] += 1;
		}
	}

	LanguageProfile::new(name, freq, n_words).unwrap()
}

/// Writes `profile` as `<dir>/<name>` in the JSON profile format.
pub fn write_profile(dir: &Path, profile: &LanguageProfile) {
	fs::write(dir.join(profile.name()), serde_json::to_string(profile).unwrap()).unwrap();
}

/// Profile directory holding `en` and `de`.
pub fn profile_dir() -> tempfile::TempDir {
	let dir = tempfile::tempdir().unwrap();
	write_profile(dir.path(), &profile_from_text("en", ENGLISH));
	write_profile(dir.path(), &profile_from_text("de", GERMAN));
	dir
}
