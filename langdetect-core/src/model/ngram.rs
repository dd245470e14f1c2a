use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;

use super::profile::MAX_NGRAM_LENGTH;
use super::profile_store::ProfileStore;

/// Matches a single non-word character (Unicode aware).
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").expect("static pattern"));

/// Replaces every non-word character by one space.
///
/// Runs are not collapsed: `"a, b"` becomes `"a  b"`. Consecutive spaces act
/// as n-gram boundaries for the extractor.
pub fn clean_text(text: &str) -> String {
	NON_WORD.replace_all(text, " ").into_owned()
}

/// Rolling window over the last `MAX_NGRAM_LENGTH` characters.
#[derive(Debug, Default)]
struct NGramWindow {
	chars: VecDeque<char>,
	buffer: String,
}

impl NGramWindow {
	fn push(&mut self, c: char) {
		if self.chars.len() == MAX_NGRAM_LENGTH {
			self.chars.pop_front();
		}
		self.chars.push_back(c);
	}

	/// The `n`-gram ending at the current position, if enough characters
	/// have been seen.
	fn get(&mut self, n: usize) -> Option<&str> {
		let len = self.chars.len();
		if n == 0 || n > len {
			return None;
		}
		self.buffer.clear();
		self.buffer.extend(self.chars.iter().skip(len - n));
		Some(&self.buffer)
	}
}

/// Converts text into the ordered sequence of n-grams known to `store`.
///
/// The sequence keeps duplicates, since repetition drives the sampling weight
/// in the classifier. N-grams absent from the store are dropped on the spot,
/// and the kept ones borrow the store's own keys.
///
/// Returns an empty vector when nothing in the text is known.
pub fn extract<'a>(text: &str, store: &'a ProfileStore) -> Vec<&'a str> {
	let cleaned = clean_text(text);
	let mut ngrams = Vec::new();
	let mut window = NGramWindow::default();

	for c in cleaned.chars() {
		window.push(c);
		for n in 1..=MAX_NGRAM_LENGTH {
			if let Some(key) = window.get(n).and_then(|w| store.key(w)) {
				ngrams.push(key);
			}
		}
	}

	ngrams
}
