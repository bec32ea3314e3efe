use super::content_description::ContentDescriptionObject;
use super::extended_content_description::ExtendedContentDescriptionObject;
use super::file_properties::FilePropertiesObject;
use super::guid::{Guid, constants};
use super::header_extension::HeaderExtensionObject;
use super::metadata_library::MetadataLibraryObject;
use super::padding::PaddingObject;
use super::stream_properties::StreamPropertiesObject;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{decode_err, err, try_vec};

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt as _};

/// Every object is framed as `GUID (16) + size (8, LE)`, with `size` covering the frame itself
pub(crate) const OBJECT_HEADER_LEN: u64 = 24;

/// The leading frame of every ASF object
#[derive(Copy, Clone, Debug)]
pub(crate) struct ObjectHeader {
	pub(crate) guid: Guid,
	pub(crate) size: u64,
}

impl ObjectHeader {
	pub(crate) fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let guid = Guid::read_from(reader)?;
		let size = reader.read_u64::<LittleEndian>()?;

		// All offset arithmetic happens in i64 space
		if size > i64::MAX as u64 {
			err!(TooMuchData);
		}

		if size < OBJECT_HEADER_LEN {
			decode_err!(@BAIL "Object size is smaller than its own header");
		}

		Ok(Self { guid, size })
	}
}

/// Frame a payload with its GUID and total size
pub(crate) fn render_object(guid: Guid, payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(payload.len() + OBJECT_HEADER_LEN as usize);

	out.extend(guid.bytes());
	out.extend((payload.len() as u64 + OBJECT_HEADER_LEN).to_le_bytes());
	out.extend_from_slice(payload);

	out
}

/// An object whose GUID the parser does not recognize
///
/// The payload is carried byte-for-byte so re-serialization is lossless for
/// content this codec does not model.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct UnknownObject {
	pub(crate) guid: Guid,
	pub(crate) data: Vec<u8>,
}

/// A parsed ASF header child
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AsfObject {
	FileProperties(FilePropertiesObject),
	StreamProperties(StreamPropertiesObject),
	HeaderExtension(HeaderExtensionObject),
	ContentDescription(ContentDescriptionObject),
	ExtendedContentDescription(ExtendedContentDescriptionObject),
	MetadataLibrary(MetadataLibraryObject),
	Padding(PaddingObject),
	Unknown(UnknownObject),
}

pub(crate) type ObjectParser = fn(&ObjectHeader, &[u8], ParsingMode) -> Result<AsfObject>;

/// Objects recognized directly inside the header object
pub(crate) const TOP_LEVEL_OBJECTS: &[(Guid, ObjectParser)] = &[
	(constants::FILE_PROPERTIES, |header, data, parse_mode| {
		FilePropertiesObject::parse(header, data, parse_mode).map(AsfObject::FileProperties)
	}),
	(constants::STREAM_PROPERTIES, |header, data, parse_mode| {
		StreamPropertiesObject::parse(header, data, parse_mode).map(AsfObject::StreamProperties)
	}),
	(constants::HEADER_EXTENSION, |header, data, parse_mode| {
		HeaderExtensionObject::parse(header, data, parse_mode).map(AsfObject::HeaderExtension)
	}),
	(constants::CONTENT_DESCRIPTION, |header, data, parse_mode| {
		ContentDescriptionObject::parse(header, data, parse_mode).map(AsfObject::ContentDescription)
	}),
	(
		constants::EXTENDED_CONTENT_DESCRIPTION,
		|header, data, parse_mode| {
			ExtendedContentDescriptionObject::parse(header, data, parse_mode)
				.map(AsfObject::ExtendedContentDescription)
		},
	),
	(constants::PADDING, |header, _data, _parse_mode| {
		Ok(AsfObject::Padding(PaddingObject::from_total_size(
			header.size,
		)))
	}),
];

/// Objects recognized inside the header extension object
pub(crate) const HEADER_EXTENSION_OBJECTS: &[(Guid, ObjectParser)] = &[
	(constants::METADATA_LIBRARY, |header, data, parse_mode| {
		MetadataLibraryObject::parse(header, data, parse_mode).map(AsfObject::MetadataLibrary)
	}),
	(constants::PADDING, |header, _data, _parse_mode| {
		Ok(AsfObject::Padding(PaddingObject::from_total_size(
			header.size,
		)))
	}),
];

impl AsfObject {
	/// Read a single object, dispatching on its GUID through `registry`
	pub(crate) fn read_from<R>(
		reader: &mut R,
		registry: &[(Guid, ObjectParser)],
		parse_mode: ParsingMode,
	) -> Result<Self>
	where
		R: Read,
	{
		let header = ObjectHeader::read_from(reader)?;

		let mut data = try_vec![0; (header.size - OBJECT_HEADER_LEN) as usize];
		reader.read_exact(&mut data)?;

		for (guid, parser) in registry {
			if *guid == header.guid {
				return parser(&header, &data, parse_mode);
			}
		}

		log::debug!("Preserving unrecognized object: {}", header.guid);

		Ok(AsfObject::Unknown(UnknownObject {
			guid: header.guid,
			data,
		}))
	}

	pub(crate) fn render(&self) -> Result<Vec<u8>> {
		match self {
			AsfObject::FileProperties(o) => Ok(o.render()),
			AsfObject::StreamProperties(o) => Ok(o.render()),
			AsfObject::HeaderExtension(o) => o.render(),
			AsfObject::ContentDescription(o) => Ok(o.render()),
			AsfObject::ExtendedContentDescription(o) => o.render(),
			AsfObject::MetadataLibrary(o) => o.render(),
			AsfObject::Padding(o) => Ok(o.render()),
			AsfObject::Unknown(o) => Ok(render_object(o.guid, &o.data)),
		}
	}

	pub(crate) fn is_padding(&self) -> bool {
		matches!(self, AsfObject::Padding(_))
	}
}
