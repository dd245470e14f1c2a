use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole file into memory.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P) -> io::Result<Vec<u8>> {
	let mut contents = Vec::new();
	File::open(filename)?.read_to_end(&mut contents)?;
	Ok(contents)
}

/// Opens a file for buffered reading.
pub(crate) fn open_buffered<P: AsRef<Path>>(filename: P) -> io::Result<BufReader<File>> {
	Ok(BufReader::new(File::open(filename)?))
}

/// Builds a sibling path of `input_path` with `output_extension` appended.
///
/// Profile files usually have no extension, so the extension is added rather
/// than substituted:
/// `profiles/en` + `"bin"` → `profiles/en.bin`
/// `profiles/en.json` + `"bin"` → `profiles/en.json.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let file_name = input_path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut name = file_name.to_os_string();
	name.push(".");
	name.push(output_extension);

	Ok(input_path.with_file_name(name))
}

/// Whether `derived` was modified no earlier than `source`.
pub(crate) fn is_up_to_date<P: AsRef<Path>, Q: AsRef<Path>>(derived: P, source: Q) -> io::Result<bool> {
	let derived = fs::metadata(derived)?.modified()?;
	let source = fs::metadata(source)?.modified()?;
	Ok(derived >= source)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists the file names directly inside `dir` (no recursion).
///
/// Returns file names only (no paths), sorted.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, SystemTime};

	use super::*;

	#[test]
	fn test_is_up_to_date_compares_modification_times() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("en");
		let derived = dir.path().join("en.bin");
		fs::write(&source, "{}").unwrap();
		fs::write(&derived, [0u8]).unwrap();

		let now = SystemTime::now();
		let touch = |path: &Path, time: SystemTime| {
			File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
		};
		touch(&source, now);
		touch(&derived, now - Duration::from_secs(60));
		assert!(!is_up_to_date(&derived, &source).unwrap());
		assert!(is_up_to_date(&source, &derived).unwrap());
		assert!(is_up_to_date(dir.path().join("missing"), &source).is_err());
	}

	#[test]
	fn test_build_output_path_appends_extension() {
		assert_eq!(build_output_path("profiles/en", "bin").unwrap(), PathBuf::from("profiles/en.bin"));
		assert_eq!(build_output_path("zh-cn", "bin").unwrap(), PathBuf::from("zh-cn.bin"));
		assert_eq!(
			build_output_path("profiles/en.json", "bin").unwrap(),
			PathBuf::from("profiles/en.json.bin")
		);
	}

	#[test]
	fn test_normalize_folder_keeps_other_paths() {
		assert_eq!(normalize_folder(Path::new("profiles")), PathBuf::from("profiles"));
	}
}
