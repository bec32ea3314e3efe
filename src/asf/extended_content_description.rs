use super::descriptor::{BoolWidth, DataType, DescriptorValue};
use super::guid::constants;
use super::object::{ObjectHeader, render_object};
use crate::config::ParsingMode;
use crate::error::{FileEncodingError, Result};
use crate::macros::{decode_err, err, try_vec};
use crate::util::text::{utf16le_decode, utf16le_encode_terminated};

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt as _};

// 24-byte frame + descriptor count
const MINIMUM_SIZE: u64 = 26;

/// A name/value pair in the extended content description object
///
/// This is the primary extensible tag storage in ASF. Note that a descriptor's
/// value length field is 16 bits wide; anything larger (oversized pictures) has
/// to go to the metadata library instead.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentDescriptor {
	pub(crate) name: String,
	pub(crate) value: DescriptorValue,
}

impl ContentDescriptor {
	/// Create a new `ContentDescriptor`
	pub fn new(name: impl Into<String>, value: DescriptorValue) -> Self {
		Self {
			name: name.into(),
			value,
		}
	}

	/// The descriptor's name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The descriptor's declared [`DataType`]
	pub fn data_type(&self) -> DataType {
		self.value.data_type()
	}

	/// The descriptor's value
	pub fn value(&self) -> &DescriptorValue {
		&self.value
	}

	fn render(&self) -> Result<Vec<u8>> {
		let name = utf16le_encode_terminated(&self.name);
		let value = self.value.render(BoolWidth::DWord);

		if name.len() > usize::from(u16::MAX) || value.len() > usize::from(u16::MAX) {
			return Err(FileEncodingError::new(
				"Descriptor does not fit a 16-bit length field",
			)
			.into());
		}

		let mut out = Vec::with_capacity(name.len() + value.len() + 6);
		out.extend((name.len() as u16).to_le_bytes());
		out.extend_from_slice(&name);
		out.extend((self.value.data_type() as u16).to_le_bytes());
		out.extend((value.len() as u16).to_le_bytes());
		out.extend_from_slice(&value);

		Ok(out)
	}
}

/// The extended content description object
///
/// An ordered, flat list of [`ContentDescriptor`]s. Order is preserved across
/// edits; replacing a name reinserts at the position of the first removed entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExtendedContentDescriptionObject {
	pub(crate) descriptors: Vec<ContentDescriptor>,
}

impl ExtendedContentDescriptionObject {
	pub(crate) fn parse(
		header: &ObjectHeader,
		data: &[u8],
		parse_mode: ParsingMode,
	) -> Result<Self> {
		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "Extended content description object is undersized");
		}

		let mut reader = data;
		let count = reader.read_u16::<LittleEndian>()?;

		let mut descriptors = Vec::with_capacity(usize::from(count.min(64)));
		for _ in 0..count {
			let name_len = usize::from(reader.read_u16::<LittleEndian>()?);

			let mut name_bytes = try_vec![0; name_len];
			reader.read_exact(&mut name_bytes)?;
			let name = utf16le_decode(&name_bytes)?;

			let data_type_raw = reader.read_u16::<LittleEndian>()?;
			let value_len = usize::from(reader.read_u16::<LittleEndian>()?);

			if reader.len() < value_len {
				err!(SizeMismatch);
			}

			let value_bytes = &reader[..value_len];
			reader = &reader[value_len..];

			let Some(data_type) = DataType::from_u16(data_type_raw) else {
				if parse_mode == ParsingMode::Strict {
					err!(BadDescriptor("Descriptor declares an unknown data type"));
				}

				log::warn!(
					"Descriptor \"{name}\" declares unknown data type {data_type_raw}, discarding"
				);
				continue;
			};

			if let Some(value) = DescriptorValue::parse(value_bytes, data_type, parse_mode)? {
				descriptors.push(ContentDescriptor { name, value });
			}
		}

		Ok(Self { descriptors })
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	/// Collect descriptors matching any of `names`
	///
	/// The result is grouped by the order of `names`, **not** file order, so a
	/// caller listing names in preference order can simply take the first match
	/// of the type it wants.
	pub(crate) fn get(&self, names: &[&str]) -> Vec<&ContentDescriptor> {
		let mut out = Vec::new();

		for name in names {
			out.extend(self.descriptors.iter().filter(|d| d.name == *name));
		}

		out
	}

	/// Replace every descriptor named `name` with `descriptors`
	///
	/// The replacements take the position of the first removed entry, keeping the
	/// relative order of everything else. An empty `descriptors` is a removal.
	pub(crate) fn set(&mut self, name: &str, descriptors: Vec<ContentDescriptor>) {
		let position = self.remove(name);
		let insert_at = position.unwrap_or_else(|| self.descriptors.len());

		for (i, descriptor) in descriptors.into_iter().enumerate() {
			self.descriptors.insert(insert_at + i, descriptor);
		}
	}

	/// Remove every descriptor named `name`, returning the index of the first removed entry
	pub(crate) fn remove(&mut self, name: &str) -> Option<usize> {
		let position = self.descriptors.iter().position(|d| d.name == name);

		self.descriptors.retain(|d| d.name != name);

		position
	}

	pub(crate) fn render(&self) -> Result<Vec<u8>> {
		let mut payload = Vec::new();
		payload.extend((self.descriptors.len() as u16).to_le_bytes());

		for descriptor in &self.descriptors {
			payload.extend(descriptor.render()?);
		}

		Ok(render_object(
			constants::EXTENDED_CONTENT_DESCRIPTION,
			&payload,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::{ContentDescriptor, ExtendedContentDescriptionObject};
	use super::super::descriptor::DescriptorValue;
	use super::super::object::ObjectHeader;
	use crate::config::ParsingMode;

	fn descriptor(name: &str, value: &str) -> ContentDescriptor {
		ContentDescriptor::new(name, DescriptorValue::Unicode(String::from(value)))
	}

	#[test_log::test]
	fn round_trip() {
		let object = ExtendedContentDescriptionObject {
			descriptors: vec![
				descriptor("WM/AlbumTitle", "Foo album"),
				ContentDescriptor::new("WM/TrackNumber", DescriptorValue::DWord(7)),
				ContentDescriptor::new("WM/Flag", DescriptorValue::Bool(true)),
			],
		};

		let rendered = object.render().unwrap();

		let mut reader = &rendered[..];
		let header = ObjectHeader::read_from(&mut reader).unwrap();
		let reparsed = ExtendedContentDescriptionObject::parse(
			&header,
			reader,
			ParsingMode::Strict,
		)
		.unwrap();

		assert_eq!(reparsed, object);
	}

	#[test_log::test]
	fn preference_order() {
		let object = ExtendedContentDescriptionObject {
			descriptors: vec![descriptor("B", "second"), descriptor("A", "first")],
		};

		// Grouped by requested order, not file order
		let matches = object.get(&["A", "B"]);
		assert_eq!(matches.len(), 2);
		assert_eq!(matches[0].value().text(), Some("first"));
		assert_eq!(matches[1].value().text(), Some("second"));
	}

	#[test_log::test]
	fn set_preserves_position() {
		let mut object = ExtendedContentDescriptionObject {
			descriptors: vec![
				descriptor("A", "1"),
				descriptor("B", "2"),
				descriptor("A", "3"),
				descriptor("C", "4"),
			],
		};

		object.set("A", vec![descriptor("A", "new")]);

		let names: Vec<&str> = object.descriptors.iter().map(|d| d.name()).collect();
		assert_eq!(names, ["A", "B", "C"]);
		assert_eq!(object.descriptors[0].value().text(), Some("new"));

		// Setting an unknown name appends
		object.set("D", vec![descriptor("D", "5")]);
		assert_eq!(object.descriptors.last().unwrap().name(), "D");
	}
}
