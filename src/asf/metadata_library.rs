use super::descriptor::{BoolWidth, DataType, DescriptorValue};
use super::guid::constants;
use super::object::{ObjectHeader, render_object};
use crate::config::ParsingMode;
use crate::error::{FileEncodingError, Result};
use crate::macros::{decode_err, err, try_vec};
use crate::util::text::{utf16le_decode, utf16le_encode_terminated};

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt as _};

// 24-byte frame + record count
const MINIMUM_SIZE: u64 = 26;

/// A record in the metadata library object
///
/// Same value model as [`ContentDescriptor`](crate::asf::ContentDescriptor), but
/// scoped by language and stream, and with a 32-bit data length. This is where
/// values too large for the extended content description go.
#[derive(Clone, Debug, PartialEq)]
pub struct MetadataDescriptor {
	pub(crate) language_list_index: u16,
	pub(crate) stream_number: u16,
	pub(crate) name: String,
	pub(crate) value: DescriptorValue,
}

impl MetadataDescriptor {
	/// Create a new `MetadataDescriptor`
	pub fn new(
		language_list_index: u16,
		stream_number: u16,
		name: impl Into<String>,
		value: DescriptorValue,
	) -> Self {
		Self {
			language_list_index,
			stream_number,
			name: name.into(),
			value,
		}
	}

	/// The index into the language list object
	pub fn language_list_index(&self) -> u16 {
		self.language_list_index
	}

	/// The stream this record is scoped to, 0 meaning the whole file
	pub fn stream_number(&self) -> u16 {
		self.stream_number
	}

	/// The record's name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The record's declared [`DataType`]
	pub fn data_type(&self) -> DataType {
		self.value.data_type()
	}

	/// The record's value
	pub fn value(&self) -> &DescriptorValue {
		&self.value
	}

	fn render(&self) -> Result<Vec<u8>> {
		let name = utf16le_encode_terminated(&self.name);
		// Bools are WORD-wide here, unlike in the extended content description
		let value = self.value.render(BoolWidth::Word);

		if name.len() > usize::from(u16::MAX) {
			return Err(FileEncodingError::new(
				"Descriptor name does not fit a 16-bit length field",
			)
			.into());
		}

		let mut out = Vec::with_capacity(name.len() + value.len() + 12);
		out.extend(self.language_list_index.to_le_bytes());
		out.extend(self.stream_number.to_le_bytes());
		out.extend((name.len() as u16).to_le_bytes());
		out.extend((self.value.data_type() as u16).to_le_bytes());
		out.extend((value.len() as u32).to_le_bytes());
		out.extend_from_slice(&name);
		out.extend_from_slice(&value);

		Ok(out)
	}
}

/// The metadata library object
///
/// Lives inside the header extension object. Holds language/stream scoped
/// records and anything too large for a 16-bit length field.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MetadataLibraryObject {
	pub(crate) records: Vec<MetadataDescriptor>,
}

impl MetadataLibraryObject {
	pub(crate) fn parse(
		header: &ObjectHeader,
		data: &[u8],
		parse_mode: ParsingMode,
	) -> Result<Self> {
		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "Metadata library object is undersized");
		}

		let mut reader = data;
		let count = reader.read_u16::<LittleEndian>()?;

		let mut records = Vec::with_capacity(usize::from(count.min(64)));
		for _ in 0..count {
			let language_list_index = reader.read_u16::<LittleEndian>()?;
			let stream_number = reader.read_u16::<LittleEndian>()?;
			let name_len = usize::from(reader.read_u16::<LittleEndian>()?);
			let data_type_raw = reader.read_u16::<LittleEndian>()?;
			let value_len = reader.read_u32::<LittleEndian>()? as usize;

			let mut name_bytes = try_vec![0; name_len];
			reader.read_exact(&mut name_bytes)?;
			let name = utf16le_decode(&name_bytes)?;

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
					"Metadata record \"{name}\" declares unknown data type {data_type_raw}, \
					 discarding"
				);
				continue;
			};

			if let Some(value) = DescriptorValue::parse(value_bytes, data_type, parse_mode)? {
				records.push(MetadataDescriptor {
					language_list_index,
					stream_number,
					name,
					value,
				});
			}
		}

		Ok(Self { records })
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Collect records matching any of `names`, in requested-name order
	pub(crate) fn get(&self, names: &[&str]) -> Vec<&MetadataDescriptor> {
		let mut out = Vec::new();

		for name in names {
			out.extend(self.records.iter().filter(|r| r.name == *name));
		}

		out
	}

	/// Replace every record named `name` with `records`
	///
	/// Language and stream scoping is part of the identity of the *new* records;
	/// removal is by name alone, mirroring how lookups work.
	pub(crate) fn set(&mut self, name: &str, records: Vec<MetadataDescriptor>) {
		let position = self.remove(name);
		let insert_at = position.unwrap_or_else(|| self.records.len());

		for (i, record) in records.into_iter().enumerate() {
			self.records.insert(insert_at + i, record);
		}
	}

	/// Remove every record named `name`, returning the index of the first removed entry
	pub(crate) fn remove(&mut self, name: &str) -> Option<usize> {
		let position = self.records.iter().position(|r| r.name == name);

		self.records.retain(|r| r.name != name);

		position
	}

	pub(crate) fn render(&self) -> Result<Vec<u8>> {
		let mut payload = Vec::new();
		payload.extend((self.records.len() as u16).to_le_bytes());

		for record in &self.records {
			payload.extend(record.render()?);
		}

		Ok(render_object(constants::METADATA_LIBRARY, &payload))
	}
}

#[cfg(test)]
mod tests {
	use super::{MetadataDescriptor, MetadataLibraryObject};
	use super::super::descriptor::DescriptorValue;
	use super::super::object::ObjectHeader;
	use crate::config::ParsingMode;

	#[test_log::test]
	fn round_trip() {
		let object = MetadataLibraryObject {
			records: vec![
				MetadataDescriptor::new(
					0,
					0,
					"WM/Picture",
					DescriptorValue::Bytes(vec![0xAA; 70_000]),
				),
				MetadataDescriptor::new(0, 2, "Stream/Label", DescriptorValue::Bool(true)),
			],
		};

		let rendered = object.render().unwrap();

		let mut reader = &rendered[..];
		let header = ObjectHeader::read_from(&mut reader).unwrap();
		let reparsed =
			MetadataLibraryObject::parse(&header, reader, ParsingMode::Strict).unwrap();

		assert_eq!(reparsed, object);
	}

	#[test_log::test]
	fn large_values_fit() {
		// This is the whole point of the metadata library: a 32-bit length field
		let record = MetadataDescriptor::new(
			0,
			0,
			"WM/Picture",
			DescriptorValue::Bytes(vec![0; 0x1_0000]),
		);

		let object = MetadataLibraryObject {
			records: vec![record],
		};
		assert!(object.render().is_ok());
	}
}
