use super::AsfFile;
use super::header::HeaderObject;
use super::header_extension::HeaderExtensionObject;
use super::properties::AsfProperties;
use super::tag::AsfTag;
use crate::config::ParseOptions;
use crate::error::Result;

use std::io::{Read, Seek};

pub(super) fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<AsfFile>
where
	R: Read + Seek,
{
	let header = HeaderObject::read_from(reader, parse_options.parsing_mode)?;

	let mut asf_tag = None;
	if parse_options.read_tags {
		let content_description = header.content_description().cloned();
		let extended_description = header.extended_content_description().cloned();
		let metadata_library = header
			.header_extension()
			.and_then(HeaderExtensionObject::metadata_library)
			.cloned();

		// A tag exists iff any of the three storage objects does
		if content_description.is_some()
			|| extended_description.is_some()
			|| metadata_library.is_some()
		{
			asf_tag = Some(AsfTag {
				content_description: content_description.unwrap_or_default(),
				extended_description: extended_description.unwrap_or_default(),
				metadata_library: metadata_library.unwrap_or_default(),
			});
		}
	}

	let properties = if parse_options.read_properties {
		header.properties()
	} else {
		AsfProperties::default()
	};

	Ok(AsfFile {
		properties,
		asf_tag,
	})
}
