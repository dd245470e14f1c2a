use std::sync::mpsc;
use std::thread;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::detection_config::DetectionConfig;
use super::profile_store::ProfileStore;

/// Normalization and convergence are checked every this many iterations.
const CONVERGENCE_CHECK_INTERVAL: usize = 5;

/// Randomized Naive-Bayes classifier over a `ProfileStore`.
///
/// Each trial starts from the prior, draws a jittered smoothing weight and
/// repeatedly multiplies the language probabilities by the profile
/// probabilities of a randomly picked n-gram until one language dominates or
/// the iteration limit is hit. Trial results are averaged.
///
/// ## Determinism
/// Every call to `classify` re-seeds from `config.seed()`. Trial `t` owns the
/// ChaCha stream `t` of that seed, so the output does not depend on whether
/// trials run sequentially or on worker threads.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
	store: &'a ProfileStore,
	config: &'a DetectionConfig,
}

impl<'a> Classifier<'a> {
	pub fn new(store: &'a ProfileStore, config: &'a DetectionConfig) -> Self {
		Self { store, config }
	}

	/// Returns one probability per language, in store order.
	///
	/// An empty n-gram sequence yields a zero vector.
	pub fn classify(&self, ngrams: &[&str]) -> Vec<f64> {
		let mut langprob = vec![0.0; self.store.len()];
		if ngrams.is_empty() || self.store.is_empty() {
			return langprob;
		}

		let n_trials = self.config.n_trials();
		let trials = if self.config.parallel_trials() && n_trials > 1 {
			self.run_parallel(ngrams)
		} else {
			(0..n_trials).map(|t| self.run_trial(&mut self.trial_rng(t), ngrams)).collect()
		};

		// Aggregate in trial order so the float sums are reproducible
		for prob in &trials {
			for (total, p) in langprob.iter_mut().zip(prob) {
				*total += p / n_trials as f64;
			}
		}

		langprob
	}

	/// Reproducible random source of trial `trial`.
	pub fn trial_rng(&self, trial: usize) -> ChaCha8Rng {
		let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed());
		rng.set_stream(trial as u64);
		rng
	}

	/// Runs a single trial with the given random source.
	pub fn run_trial<R: Rng>(&self, rng: &mut R, ngrams: &[&str]) -> Vec<f64> {
		let mut prob = self.initial_probability();
		let alpha = self.config.alpha() + standard_normal(rng) * self.config.alpha_width();
		let weight = alpha / self.config.base_freq() as f64;

		let mut i = 0;
		loop {
			let ngram = ngrams[rng.random_range(0..ngrams.len())];
			self.update(&mut prob, ngram, weight);

			if i % CONVERGENCE_CHECK_INTERVAL == 0
				&& (normalize(&mut prob) > self.config.conv_threshold() || i >= self.config.iteration_limit())
			{
				break;
			}
			i += 1;
		}

		prob
	}

	fn run_parallel(&self, ngrams: &[&str]) -> Vec<Vec<f64>> {
		let n_trials = self.config.n_trials();
		let workers = num_cpus::get().clamp(1, n_trials);
		let chunk_size = n_trials.div_ceil(workers);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for first in (0..n_trials).step_by(chunk_size) {
				let tx = tx.clone();
				let last = (first + chunk_size).min(n_trials);
				scope.spawn(move || {
					for trial in first..last {
						let prob = self.run_trial(&mut self.trial_rng(trial), ngrams);
						// Receiver outlives the scope
						let _ = tx.send((trial, prob));
					}
				});
			}
		});
		drop(tx);

		let mut trials = vec![Vec::new(); n_trials];
		for (trial, prob) in rx.iter() {
			trials[trial] = prob;
		}
		trials
	}

	fn initial_probability(&self) -> Vec<f64> {
		match self.config.prior() {
			Some(prior) => prior.to_vec(),
			None => vec![1.0 / self.store.len() as f64; self.store.len()],
		}
	}

	/// Multiplies `prob` by the smoothed profile probabilities of `ngram`.
	///
	/// Unknown n-grams leave `prob` untouched.
	fn update(&self, prob: &mut [f64], ngram: &str, weight: f64) -> bool {
		let Some(lang_prob) = self.store.probabilities(ngram) else {
			return false;
		};
		for (p, lp) in prob.iter_mut().zip(lang_prob) {
			*p *= weight + lp;
		}
		true
	}
}

/// Normalizes `prob` to sum to 1 and returns its largest entry.
///
/// A vector with no positive mass is left as is and reports 0.
fn normalize(prob: &mut [f64]) -> f64 {
	let sum: f64 = prob.iter().sum();
	if sum.is_nan() || sum <= 0.0 {
		return 0.0;
	}
	let mut max = 0.0;
	for p in prob.iter_mut() {
		*p /= sum;
		if max < *p {
			max = *p;
		}
	}
	max
}

/// Standard normal sample (Marsaglia polar method).
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
	loop {
		let u = 2.0 * rng.random::<f64>() - 1.0;
		let v = 2.0 * rng.random::<f64>() - 1.0;
		let s = u * u + v * v;
		if s > 0.0 && s < 1.0 {
			return u * (-2.0 * s.ln() / s).sqrt();
		}
	}
}
