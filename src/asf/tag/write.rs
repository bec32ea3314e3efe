use super::AsfTag;
use super::super::header::HeaderObject;
use super::super::header_extension::HeaderExtensionObject;
use super::super::object::AsfObject;
use crate::config::{ParsingMode, WriteOptions};
use crate::error::{AsfError, Result};
use crate::macros::err;
use crate::tag::TagExt as _;
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek, Write};

/// Rewrite the tag storage objects of the container in `file`
///
/// `None` (or an empty tag) strips every tag storage object instead.
pub(crate) fn write_to<F>(
	tag: Option<&AsfTag>,
	file: &mut F,
	write_options: WriteOptions,
) -> Result<()>
where
	F: FileLike,
	AsfError: From<<F as Truncate>::Error>,
	AsfError: From<<F as Length>::Error>,
{
	// The header is always re-read fresh. Reusing an object tree from an earlier
	// parse would splice against stale offsets if the file changed in between.
	file.rewind()?;
	let mut header = HeaderObject::read_from(file, ParsingMode::BestAttempt)?;

	match tag {
		Some(tag) if !tag.is_empty() => {
			header.add_unique_object(AsfObject::ContentDescription(
				tag.content_description.clone(),
			));
			header.add_unique_object(AsfObject::ExtendedContentDescription(
				tag.extended_description.clone(),
			));

			if tag.metadata_library.is_empty() {
				if let Some(extension) = header.header_extension_mut() {
					extension.remove_metadata_library();
				}
			} else {
				if header.header_extension().is_none() {
					header.add_unique_object(AsfObject::HeaderExtension(
						HeaderExtensionObject::default(),
					));
				}

				if let Some(extension) = header.header_extension_mut() {
					extension.add_unique_object(AsfObject::MetadataLibrary(
						tag.metadata_library.clone(),
					));
				}
			}
		},
		_ => header.remove_content_descriptors(),
	}

	let output = header.render(write_options)?;

	// Replace the original header byte range with the new render. The data
	// packets after it shift by the size difference without being touched;
	// with padding in play the difference is normally zero.
	file.rewind()?;
	let mut file_bytes = Vec::new();
	file.read_to_end(&mut file_bytes)?;

	if header.original_size as usize > file_bytes.len() {
		err!(SizeMismatch);
	}

	file_bytes.splice(..header.original_size as usize, output);

	file.rewind()?;
	file.truncate(0)?;
	file.write_all(&file_bytes)?;

	Ok(())
}
