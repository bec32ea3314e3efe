use super::guid::constants;
use super::object::{ObjectHeader, render_object};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::decode_err;
use crate::util::text::{read_utf16le, utf16le_encode_terminated};

use byteorder::{LittleEndian, ReadBytesExt as _};

// 24-byte frame + 5 length words
const MINIMUM_SIZE: u64 = 34;

/// The legacy content description object
///
/// Five fixed UTF-16LE fields in a fixed order. An empty string and an absent
/// field are indistinguishable on the wire, so both surface as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ContentDescriptionObject {
	pub(crate) title: Option<String>,
	pub(crate) author: Option<String>,
	pub(crate) copyright: Option<String>,
	pub(crate) description: Option<String>,
	pub(crate) rating: Option<String>,
}

fn none_if_empty(value: String) -> Option<String> {
	if value.is_empty() { None } else { Some(value) }
}

impl ContentDescriptionObject {
	pub(crate) fn parse(
		header: &ObjectHeader,
		data: &[u8],
		_parse_mode: ParsingMode,
	) -> Result<Self> {
		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "Content description object is undersized");
		}

		let mut reader = data;

		let title_len = usize::from(reader.read_u16::<LittleEndian>()?);
		let author_len = usize::from(reader.read_u16::<LittleEndian>()?);
		let copyright_len = usize::from(reader.read_u16::<LittleEndian>()?);
		let description_len = usize::from(reader.read_u16::<LittleEndian>()?);
		let rating_len = usize::from(reader.read_u16::<LittleEndian>()?);

		Ok(Self {
			title: none_if_empty(read_utf16le(&mut reader, title_len)?),
			author: none_if_empty(read_utf16le(&mut reader, author_len)?),
			copyright: none_if_empty(read_utf16le(&mut reader, copyright_len)?),
			description: none_if_empty(read_utf16le(&mut reader, description_len)?),
			rating: none_if_empty(read_utf16le(&mut reader, rating_len)?),
		})
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.author.is_none()
			&& self.copyright.is_none()
			&& self.description.is_none()
			&& self.rating.is_none()
	}

	pub(crate) fn render(&self) -> Vec<u8> {
		let fields = [
			&self.title,
			&self.author,
			&self.copyright,
			&self.description,
			&self.rating,
		]
		.map(|field| utf16le_encode_terminated(field.as_deref().unwrap_or("")));

		let mut payload = Vec::with_capacity(10 + fields.iter().map(Vec::len).sum::<usize>());

		for field in &fields {
			payload.extend((field.len() as u16).to_le_bytes());
		}

		for field in &fields {
			payload.extend_from_slice(field);
		}

		render_object(constants::CONTENT_DESCRIPTION, &payload)
	}
}

#[cfg(test)]
mod tests {
	use super::ContentDescriptionObject;
	use super::super::object::ObjectHeader;
	use crate::config::ParsingMode;

	#[test_log::test]
	fn round_trip() {
		let object = ContentDescriptionObject {
			title: Some(String::from("Foo title")),
			author: Some(String::from("Bar artist")),
			copyright: None,
			description: Some(String::from("Baz comment")),
			rating: None,
		};

		let rendered = object.render();

		let mut reader = &rendered[..];
		let header = ObjectHeader::read_from(&mut reader).unwrap();
		let reparsed =
			ContentDescriptionObject::parse(&header, reader, ParsingMode::Strict).unwrap();

		// Empty fields render as a lone terminator and come back as `None`
		assert_eq!(reparsed, object);
	}

	#[test_log::test]
	fn empty_object() {
		let object = ContentDescriptionObject::default();
		assert!(object.is_empty());

		let rendered = object.render();

		// 24-byte frame + 5 length words + 5 terminators
		assert_eq!(rendered.len(), 44);
	}
}
