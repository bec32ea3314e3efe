//! Generic file handling utilities

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{AsfError, Result};
use crate::util::io::{FileLike, Length, Truncate};

use std::fs::OpenOptions;
use std::io::{Read, Seek};
use std::path::Path;

/// Provides various methods for interaction with a file
pub trait AudioFile {
	/// The struct the file uses for audio properties
	type Properties;

	/// Read a file from a reader
	///
	/// # Errors
	///
	/// Errors depend on the file and tags being read. See [`AsfError`]
	fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
		Self: Sized;

	/// Attempts to write all tags to a path
	///
	/// # Errors
	///
	/// * `path` does not exist
	/// * `path` is not writable
	/// * See [`AudioFile::save_to`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use asf_tag::asf::AsfFile;
	/// use asf_tag::config::{ParseOptions, WriteOptions};
	/// use asf_tag::file::AudioFile;
	///
	/// # fn main() -> asf_tag::error::Result<()> {
	/// # let path = "music.wma";
	/// let mut file = std::fs::File::open(path)?;
	/// let mut wma_file = AsfFile::read_from(&mut file, ParseOptions::new())?;
	///
	/// // Edit the tags
	///
	/// wma_file.save_to_path(path, WriteOptions::default())?;
	/// # Ok(()) }
	/// ```
	fn save_to_path(&self, path: impl AsRef<Path>, write_options: WriteOptions) -> Result<()> {
		self.save_to(
			&mut OpenOptions::new().read(true).write(true).open(path)?,
			write_options,
		)
	}

	/// Attempts to write all tags to a file
	///
	/// # Errors
	///
	/// * The file is not a valid container
	/// * The file is not writable
	fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		AsfError: From<<F as Truncate>::Error>,
		AsfError: From<<F as Length>::Error>;

	/// Returns a reference to the file's properties
	fn properties(&self) -> &Self::Properties;

	/// Checks if the file contains any tags
	fn contains_tag(&self) -> bool;
}
