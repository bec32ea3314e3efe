use super::guid::{Guid, constants};
use super::metadata_library::MetadataLibraryObject;
use super::object::{AsfObject, HEADER_EXTENSION_OBJECTS, ObjectHeader, render_object};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::decode_err;

use std::io::Cursor;
use std::mem::discriminant;

use byteorder::{LittleEndian, ReadBytesExt as _};

// 24-byte frame + reserved GUID + reserved word + data size
const MINIMUM_SIZE: u64 = 46;

const RESERVED_2: u16 = 6;

/// The header extension object
///
/// A nested container; the metadata library lives in here. Children with
/// unrecognized GUIDs are preserved byte-for-byte.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HeaderExtensionObject {
	pub(crate) children: Vec<AsfObject>,
}

impl HeaderExtensionObject {
	pub(crate) fn parse(
		header: &ObjectHeader,
		data: &[u8],
		parse_mode: ParsingMode,
	) -> Result<Self> {
		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "Header extension object is undersized");
		}

		let mut reader = Cursor::new(data);

		let reserved_1 = Guid::read_from(&mut reader)?;
		if reserved_1 != constants::HEADER_EXTENSION_RESERVED_1 {
			decode_err!(@BAIL "Header extension object has an invalid reserved field");
		}

		if reader.read_u16::<LittleEndian>()? != RESERVED_2 {
			decode_err!(@BAIL "Header extension object has an invalid reserved field");
		}

		let data_size = u64::from(reader.read_u32::<LittleEndian>()?);
		let remaining = data.len() as u64 - reader.position();
		if data_size > remaining {
			decode_err!(@BAIL "Header extension object data overruns its container");
		}

		let end = reader.position() + data_size;
		let mut children = Vec::new();
		while reader.position() < end {
			children.push(AsfObject::read_from(
				&mut reader,
				HEADER_EXTENSION_OBJECTS,
				parse_mode,
			)?);
		}

		Ok(Self { children })
	}

	pub(crate) fn metadata_library(&self) -> Option<&MetadataLibraryObject> {
		self.children.iter().find_map(|child| match child {
			AsfObject::MetadataLibrary(object) => Some(object),
			_ => None,
		})
	}

	/// Replace the first child of the same kind, or append
	pub(crate) fn add_unique_object(&mut self, object: AsfObject) {
		let target = discriminant(&object);

		match self
			.children
			.iter_mut()
			.find(|child| discriminant(&**child) == target)
		{
			Some(existing) => *existing = object,
			None => self.children.push(object),
		}
	}

	pub(crate) fn remove_metadata_library(&mut self) {
		self.children
			.retain(|child| !matches!(child, AsfObject::MetadataLibrary(_)));
	}

	pub(crate) fn render(&self) -> Result<Vec<u8>> {
		let mut children_data = Vec::new();
		for child in &self.children {
			children_data.extend(child.render()?);
		}

		let mut payload = Vec::with_capacity(children_data.len() + 22);
		payload.extend(constants::HEADER_EXTENSION_RESERVED_1.bytes());
		payload.extend(RESERVED_2.to_le_bytes());
		payload.extend((children_data.len() as u32).to_le_bytes());
		payload.extend_from_slice(&children_data);

		Ok(render_object(constants::HEADER_EXTENSION, &payload))
	}
}
