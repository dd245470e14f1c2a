use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::profile::LanguageProfile;
use super::profile_store::{ProfileStore, ProfileStoreBuilder};
use crate::error::{LangdetectError, Result};
use crate::io;

/// Name of the optional code map file inside a profile directory.
pub const CODE_MAP_FILE: &str = "language.json";

const BINARY_EXTENSION: &str = "bin";
const JSON_EXTENSION: &str = "json";

/// Reads language profiles from a directory.
///
/// A profile for code `xx` is looked up as `<dir>/xx`, then `<dir>/xx.json`.
/// With the binary cache enabled, a `postcard` copy `<file>.bin` is read when
/// present and written after the first JSON parse otherwise.
#[derive(Debug, Clone)]
pub struct ProfileLoader {
	dir: PathBuf,
	binary_cache: bool,
}

impl ProfileLoader {
	/// Creates a loader over `root`, or `root/<profile>` when a profile
	/// variant (such as `short-text`) is given.
	pub fn new<P: AsRef<Path>>(root: P, profile: Option<&str>) -> Self {
		let mut dir = io::normalize_folder(root.as_ref());
		if let Some(profile) = profile.filter(|p| !p.is_empty()) {
			dir.push(profile);
		}
		Self { dir, binary_cache: false }
	}

	/// Enables reading and writing `.bin` profile copies.
	pub fn with_binary_cache(mut self, binary_cache: bool) -> Self {
		self.binary_cache = binary_cache;
		self
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Loads the profile of `language`.
	///
	/// # Errors
	/// `ProfileNotFound` when no file exists for the code, or the parse error.
	pub fn load(&self, language: &str) -> Result<LanguageProfile> {
		let path = self.resolve(language)?;

		if self.binary_cache {
			let binary_path = io::build_output_path(&path, BINARY_EXTENSION)?;
			if binary_path.exists() {
				if io::is_up_to_date(&binary_path, &path).unwrap_or(false) {
					match Self::read_binary(&binary_path) {
						Ok(profile) => return Ok(profile),
						Err(e) => warn!("ignoring unreadable cache {}: {}", binary_path.display(), e),
					}
				} else {
					debug!("cache {} is older than {}", binary_path.display(), path.display());
				}
			}

			let profile = LanguageProfile::from_reader(io::open_buffered(&path)?)?;
			if let Err(e) = profile.to_bytes().and_then(|b| Ok(std::fs::write(&binary_path, b)?)) {
				warn!("could not write cache {}: {}", binary_path.display(), e);
			}
			return Ok(profile);
		}

		LanguageProfile::from_reader(io::open_buffered(&path)?)
	}

	fn read_binary(path: &Path) -> Result<LanguageProfile> {
		let bytes = io::read_bytes(path)?;
		LanguageProfile::from_bytes(&bytes)
	}

	/// Loads `languages` in order into a new store.
	///
	/// Blank codes are skipped and do not take an index.
	pub fn load_store(&self, languages: &[String]) -> Result<ProfileStore> {
		let codes: Vec<&str> = languages.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();

		let mut builder = ProfileStoreBuilder::new(codes.len());
		for code in codes {
			builder.add_profile(&self.load(code)?)?;
		}
		Ok(builder.build())
	}

	/// Reads `<dir>/language.json` as a code map, empty if the file is absent.
	pub fn load_code_map(&self) -> Result<HashMap<String, String>> {
		let path = self.dir.join(CODE_MAP_FILE);
		if !path.is_file() {
			debug!("no code map at {}", path.display());
			return Ok(HashMap::new());
		}
		Ok(serde_json::from_reader(io::open_buffered(&path)?)?)
	}

	/// Language codes with a profile file in the directory.
	///
	/// Only extension-less and `.json` files that parse as a profile count,
	/// so other files kept next to the profiles are not listed.
	pub fn available(&self) -> Result<Vec<String>> {
		let json_suffix = format!(".{}", JSON_EXTENSION);

		let mut codes = Vec::new();
		for name in io::list_files(&self.dir)? {
			if name == CODE_MAP_FILE {
				continue;
			}
			let code = match name.strip_suffix(&json_suffix) {
				Some(code) => code,
				None if !name.contains('.') => name.as_str(),
				None => continue,
			};
			let parsed = io::open_buffered(self.dir.join(&name))
				.map_err(LangdetectError::from)
				.and_then(LanguageProfile::from_reader);
			match parsed {
				Ok(_) => codes.push(code.to_owned()),
				Err(e) => debug!("skipping {}: {}", name, e),
			}
		}
		codes.sort();
		codes.dedup();
		Ok(codes)
	}

	fn resolve(&self, language: &str) -> Result<PathBuf> {
		let plain = self.dir.join(language);
		if plain.is_file() {
			return Ok(plain);
		}
		let json = self.dir.join(format!("{}.{}", language, JSON_EXTENSION));
		if json.is_file() {
			return Ok(json);
		}
		Err(LangdetectError::ProfileNotFound { language: language.to_owned(), path: self.dir.clone() })
	}
}
