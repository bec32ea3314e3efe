//! ASF/WMA specific items
//!
//! ## File notes
//!
//! An ASF container is a sequence of GUID-framed objects; all metadata lives in
//! the root header object. The only supported tag format is [`AsfTag`], which is
//! a view over the header's three tag storage objects.

mod content_description;
mod descriptor;
mod extended_content_description;
mod file_properties;
pub(crate) mod guid;
mod header;
mod header_extension;
mod metadata_library;
mod object;
mod padding;
mod properties;
mod read;
mod stream_properties;
pub(crate) mod tag;

// Exports

pub use descriptor::{DataType, DescriptorValue};
pub use extended_content_description::ContentDescriptor;
pub use guid::Guid;
pub use metadata_library::MetadataDescriptor;
pub use properties::{AsfCodec, AsfProperties};
pub use tag::AsfTag;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{AsfError, Result};
use crate::file::AudioFile;
use crate::tag::TagExt as _;
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek};

/// An ASF (WMA/WMV) file
///
/// # Examples
///
/// ```rust,no_run
/// use asf_tag::asf::AsfFile;
/// use asf_tag::config::ParseOptions;
/// use asf_tag::file::AudioFile;
/// use asf_tag::tag::Accessor;
///
/// # fn main() -> asf_tag::error::Result<()> {
/// let mut file = std::fs::File::open("music.wma")?;
/// let wma_file = AsfFile::read_from(&mut file, ParseOptions::new())?;
///
/// if let Some(tag) = wma_file.asf_tag() {
/// 	println!("Title: {:?}", tag.title());
/// }
/// # Ok(()) }
/// ```
pub struct AsfFile {
	/// The parsed tag, if any of the tag storage objects exist
	pub(crate) asf_tag: Option<AsfTag>,
	/// The file's audio properties
	pub(crate) properties: AsfProperties,
}

impl AsfFile {
	/// Returns a reference to the tag, if one exists
	pub fn asf_tag(&self) -> Option<&AsfTag> {
		self.asf_tag.as_ref()
	}

	/// Returns a mutable reference to the tag, if one exists
	pub fn asf_tag_mut(&mut self) -> Option<&mut AsfTag> {
		self.asf_tag.as_mut()
	}

	/// Sets the tag, returning the old one
	pub fn set_asf_tag(&mut self, tag: AsfTag) -> Option<AsfTag> {
		self.asf_tag.replace(tag)
	}

	/// Takes the tag out of the file
	///
	/// Saving afterwards will strip the tag storage objects from the container.
	pub fn remove_asf_tag(&mut self) -> Option<AsfTag> {
		self.asf_tag.take()
	}
}

impl AudioFile for AsfFile {
	type Properties = AsfProperties;

	fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
		Self: Sized,
	{
		read::read_from(reader, parse_options)
	}

	fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		AsfError: From<<F as Truncate>::Error>,
		AsfError: From<<F as Length>::Error>,
	{
		tag::write::write_to(self.asf_tag.as_ref(), file, write_options)
	}

	fn properties(&self) -> &Self::Properties {
		&self.properties
	}

	fn contains_tag(&self) -> bool {
		matches!(&self.asf_tag, Some(tag) if !tag.is_empty())
	}
}
