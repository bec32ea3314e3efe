use crate::config::WriteOptions;
use crate::error::AsfError;
use crate::tag::Accessor;
use crate::util::io::{FileLike, Length, Truncate};

use std::path::Path;

/// A set of common methods between tags
///
/// This provides a set of methods to make interaction with a tag a familiar
/// experience, regardless of where it came from.
pub trait TagExt: Accessor + Sized + crate::tag::private::Sealed {
	/// The associated error which can be returned from IO operations
	type Err: From<std::io::Error> + From<AsfError>;
	/// The type of key used in the tag for non-mutating functions
	type RefKey<'a>
	where
		Self: 'a;

	/// Returns the number of items in the tag
	///
	/// This will also include any extras, such as pictures.
	fn len(&self) -> usize;

	/// Whether the tag contains an item with the key
	fn contains<'a>(&'a self, key: Self::RefKey<'a>) -> bool;

	/// Whether the tag has any items
	fn is_empty(&self) -> bool;

	/// Save the tag to a path
	///
	/// # Errors
	///
	/// * Path doesn't exist
	/// * Path is not writable
	/// * See [`TagExt::save_to`]
	fn save_to_path<P: AsRef<Path>>(
		&self,
		path: P,
		write_options: WriteOptions,
	) -> std::result::Result<(), Self::Err> {
		self.save_to(
			&mut std::fs::OpenOptions::new()
				.read(true)
				.write(true)
				.open(path)?,
			write_options,
		)
	}

	/// Save the tag to a [`FileLike`]
	///
	/// # Errors
	///
	/// * The file is not a valid container for the tag
	/// * It is unable to write to the file
	fn save_to<F>(
		&self,
		file: &mut F,
		write_options: WriteOptions,
	) -> std::result::Result<(), Self::Err>
	where
		F: FileLike,
		AsfError: From<<F as Truncate>::Error>,
		AsfError: From<<F as Length>::Error>;

	#[allow(clippy::missing_errors_doc)]
	/// Dump the tag to a writer
	///
	/// This will only write the tag, it will not produce a usable file.
	fn dump_to<W: std::io::Write>(
		&self,
		writer: &mut W,
		write_options: WriteOptions,
	) -> std::result::Result<(), Self::Err>;

	/// Remove the tag from a [`Path`]
	///
	/// # Errors
	///
	/// See [`TagExt::remove_from`]
	fn remove_from_path<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Self::Err> {
		self.remove_from(
			&mut std::fs::OpenOptions::new()
				.read(true)
				.write(true)
				.open(path)?,
		)
	}

	/// Remove the tag from a [`FileLike`]
	///
	/// # Errors
	///
	/// * The file is not a valid container for the tag
	/// * It is unable to write to the file
	fn remove_from<F>(&self, file: &mut F) -> std::result::Result<(), Self::Err>
	where
		F: FileLike,
		AsfError: From<<F as Truncate>::Error>,
		AsfError: From<<F as Length>::Error>;

	/// Clear the tag, removing all items
	fn clear(&mut self);
}
