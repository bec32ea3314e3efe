use super::content_description::ContentDescriptionObject;
use super::extended_content_description::ExtendedContentDescriptionObject;
use super::file_properties::FilePropertiesObject;
use super::guid::constants;
use super::header_extension::HeaderExtensionObject;
use super::object::{
	AsfObject, OBJECT_HEADER_LEN, ObjectHeader, TOP_LEVEL_OBJECTS, render_object,
};
use super::padding::PaddingObject;
use super::properties::{AsfCodec, AsfProperties};
use crate::config::{ParsingMode, WriteOptions};
use crate::error::Result;
use crate::macros::decode_err;

use std::io::Read;
use std::mem::discriminant;

use byteorder::{LittleEndian, ReadBytesExt as _};

// Frame + child count + reserved word
const HEADER_PREFIX_LEN: u64 = OBJECT_HEADER_LEN + 6;

// Reserved1 (0x01) and Reserved2 (0x02), read as one little-endian word
const HEADER_RESERVED: u16 = 0x0201;

const MINIMUM_SIZE: u64 = 26;

/// The root header object
///
/// Owns the ordered list of child objects. All tag reading and writing goes
/// through here: children are looked up, replaced through
/// [`add_unique_object`](HeaderObject::add_unique_object), and the whole header
/// re-rendered with a synthesized padding child keeping the on-disk size stable
/// where possible.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HeaderObject {
	pub(crate) original_size: u64,
	pub(crate) children: Vec<AsfObject>,
}

impl HeaderObject {
	/// Parse a header object, including all of its children
	///
	/// Any structural mismatch (wrong GUID, bad reserved word, truncated child) is
	/// fatal; there is no partial-object recovery.
	pub(crate) fn read_from<R>(reader: &mut R, parse_mode: ParsingMode) -> Result<Self>
	where
		R: Read,
	{
		let header = ObjectHeader::read_from(reader)?;

		if header.guid != constants::HEADER_OBJECT {
			decode_err!(@BAIL "File does not start with an ASF header object");
		}

		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "Header object is undersized");
		}

		let child_count = reader.read_u32::<LittleEndian>()?;
		if reader.read_u16::<LittleEndian>()? != HEADER_RESERVED {
			decode_err!(@BAIL "Header object has an invalid reserved field");
		}

		log::debug!("Parsing {child_count} header children");

		let mut children = Vec::with_capacity(child_count.min(64) as usize);
		for _ in 0..child_count {
			children.push(AsfObject::read_from(reader, TOP_LEVEL_OBJECTS, parse_mode)?);
		}

		Ok(Self {
			original_size: header.size,
			children,
		})
	}

	pub(crate) fn content_description(&self) -> Option<&ContentDescriptionObject> {
		self.children.iter().find_map(|child| match child {
			AsfObject::ContentDescription(object) => Some(object),
			_ => None,
		})
	}

	pub(crate) fn extended_content_description(
		&self,
	) -> Option<&ExtendedContentDescriptionObject> {
		self.children.iter().find_map(|child| match child {
			AsfObject::ExtendedContentDescription(object) => Some(object),
			_ => None,
		})
	}

	pub(crate) fn header_extension(&self) -> Option<&HeaderExtensionObject> {
		self.children.iter().find_map(|child| match child {
			AsfObject::HeaderExtension(object) => Some(object),
			_ => None,
		})
	}

	pub(crate) fn header_extension_mut(&mut self) -> Option<&mut HeaderExtensionObject> {
		self.children.iter_mut().find_map(|child| match child {
			AsfObject::HeaderExtension(object) => Some(object),
			_ => None,
		})
	}

	pub(crate) fn file_properties(&self) -> Option<&FilePropertiesObject> {
		self.children.iter().find_map(|child| match child {
			AsfObject::FileProperties(object) => Some(object),
			_ => None,
		})
	}

	/// Replace the first child of the same kind, or append
	///
	/// This is what keeps the tag storage objects unique: there is never more than
	/// one content description or extended content description in a header we
	/// write.
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

	/// Strip every tag storage object from the header
	pub(crate) fn remove_content_descriptors(&mut self) {
		self.children.retain(|child| {
			!matches!(
				child,
				AsfObject::ContentDescription(_) | AsfObject::ExtendedContentDescription(_)
			)
		});

		if let Some(extension) = self.header_extension_mut() {
			extension.remove_metadata_library();
		}
	}

	/// Render the header, stabilizing its on-disk size with padding
	///
	/// Padding children from the parse are discarded and a single new one is
	/// synthesized to make up the size difference: the exact gap when the header
	/// shrank, `preferred_padding` when it grew (so the *next* edit can happen in
	/// place).
	pub(crate) fn render(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut children_data = Vec::new();
		let mut child_count = 0u32;

		for child in &self.children {
			if child.is_padding() {
				continue;
			}

			children_data.extend(child.render()?);
			child_count += 1;
		}

		let current_size = children_data.len() as u64 + HEADER_PREFIX_LEN;
		let difference = current_size as i64 - self.original_size as i64;

		let mut padding = None;
		if difference < 0 {
			let gap = difference.unsigned_abs();
			if gap >= OBJECT_HEADER_LEN {
				padding = Some(PaddingObject::from_total_size(gap));
			} else if let Some(preferred) = write_options.preferred_padding {
				// The gap cannot even hold a padding frame, grow instead
				padding = Some(PaddingObject::from_payload_size(u64::from(preferred)));
			}
		} else if difference > 0 {
			if let Some(preferred) = write_options.preferred_padding {
				padding = Some(PaddingObject::from_payload_size(u64::from(preferred)));
			}
		}

		if let Some(padding) = padding {
			children_data.extend(padding.render());
			child_count += 1;
		}

		let mut payload = Vec::with_capacity(children_data.len() + 6);
		payload.extend(child_count.to_le_bytes());
		payload.extend(HEADER_RESERVED.to_le_bytes());
		payload.extend_from_slice(&children_data);

		Ok(render_object(constants::HEADER_OBJECT, &payload))
	}

	/// Aggregate the audio properties from the file/stream properties children
	pub(crate) fn properties(&self) -> AsfProperties {
		let mut properties = AsfProperties::default();

		for child in &self.children {
			match child {
				AsfObject::FileProperties(file_properties) => {
					properties.duration = file_properties.duration();
					properties.overall_bitrate = file_properties.maximum_bitrate / 1000;
				},
				AsfObject::StreamProperties(stream_properties) => {
					let Some(format) = stream_properties.audio_format() else {
						log::debug!(
							"Skipping non-audio stream {}",
							stream_properties.stream_number()
						);
						continue;
					};

					// The first audio stream provides the primary format info
					if properties.codecs.is_empty() {
						properties.audio_bitrate = format.average_bytes_per_second * 8 / 1000;
						properties.sample_rate = format.sample_rate;
						properties.channels = format.channels as u8;
						if format.bits_per_sample > 0 {
							properties.bit_depth = Some(format.bits_per_sample as u8);
						}
					}

					properties.codecs.push(AsfCodec::from_codec_id(format.codec_id));
				},
				_ => {},
			}
		}

		properties
	}
}

#[cfg(test)]
mod tests {
	use super::HeaderObject;
	use super::super::content_description::ContentDescriptionObject;
	use super::super::object::AsfObject;
	use crate::config::{ParsingMode, WriteOptions};

	fn header_with_title(title: &str) -> HeaderObject {
		HeaderObject {
			original_size: 0,
			children: vec![AsfObject::ContentDescription(ContentDescriptionObject {
				title: Some(String::from(title)),
				..ContentDescriptionObject::default()
			})],
		}
	}

	#[test_log::test]
	fn render_size_is_stable() {
		let rendered = header_with_title("Foo title").render(WriteOptions::new()).unwrap();

		let mut reader = &rendered[..];
		let header = HeaderObject::read_from(&mut reader, ParsingMode::Strict).unwrap();
		assert_eq!(header.original_size, rendered.len() as u64);

		// An unmodified header re-renders at the same size, with the padding
		// resynthesized to fill the gap
		let rerendered = header.render(WriteOptions::new()).unwrap();
		assert_eq!(rerendered.len(), rendered.len());

		// A slightly shrunken header also holds its size
		let mut shrunk = header.clone();
		let Some(AsfObject::ContentDescription(cd)) = shrunk.children.first_mut() else {
			unreachable!()
		};
		cd.title = Some(String::from("Foo"));

		let shrunk_rendered = shrunk.render(WriteOptions::new()).unwrap();
		assert_eq!(shrunk_rendered.len(), rendered.len());
	}

	#[test_log::test]
	fn no_padding_when_disabled() {
		let rendered = header_with_title("Foo title")
			.render(WriteOptions::new().preferred_padding(0))
			.unwrap();

		let mut reader = &rendered[..];
		let header = HeaderObject::read_from(&mut reader, ParsingMode::Strict).unwrap();

		assert_eq!(header.children.len(), 1);
	}

	#[test_log::test]
	fn corrupt_guid_is_fatal() {
		let mut rendered = header_with_title("Foo title").render(WriteOptions::new()).unwrap();
		rendered[0] ^= 0xFF;

		let mut reader = &rendered[..];
		assert!(HeaderObject::read_from(&mut reader, ParsingMode::Relaxed).is_err());
	}

	#[test_log::test]
	fn bad_reserved_word_is_fatal() {
		let mut rendered = header_with_title("Foo title").render(WriteOptions::new()).unwrap();
		// The reserved word sits right after the child count
		rendered[28] = 0xFF;

		let mut reader = &rendered[..];
		assert!(HeaderObject::read_from(&mut reader, ParsingMode::Relaxed).is_err());
	}
}
