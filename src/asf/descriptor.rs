use super::guid::Guid;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{err, parse_mode_choice};
use crate::util::text::{utf16le_decode, utf16le_encode_terminated};

use std::fmt::{Debug, Formatter};

use byteorder::{ByteOrder as _, LittleEndian};

/// The declared type of a descriptor value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum DataType {
	/// A UTF-16LE string
	Unicode = 0,
	/// A raw byte blob
	Bytes = 1,
	/// A boolean
	///
	/// The on-disk width differs between the two descriptor stores, see
	/// [`DescriptorValue::render`].
	Bool = 2,
	/// A little-endian u32
	DWord = 3,
	/// A little-endian u64
	QWord = 4,
	/// A little-endian u16
	Word = 5,
	/// A 16-byte GUID
	Guid = 6,
}

impl DataType {
	/// Get a `DataType` from a u16, must be 0-6 inclusive
	pub fn from_u16(value: u16) -> Option<Self> {
		match value {
			0 => Some(Self::Unicode),
			1 => Some(Self::Bytes),
			2 => Some(Self::Bool),
			3 => Some(Self::DWord),
			4 => Some(Self::QWord),
			5 => Some(Self::Word),
			6 => Some(Self::Guid),
			_ => None,
		}
	}
}

/// The width a bool is rendered at
///
/// The extended content description object stores bools as DWORDs, the metadata
/// library as WORDs. Format quirk, not ours to fix.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum BoolWidth {
	DWord,
	Word,
}

/// A descriptor value
///
/// This is the tagged union shared by the extended content description and
/// metadata library stores. The value's runtime variant **is** its
/// [`DataType`], so a mismatched pairing cannot be constructed.
#[derive(Clone, PartialEq)]
pub enum DescriptorValue {
	/// A UTF-16LE string
	Unicode(String),
	/// A raw byte blob
	Bytes(Vec<u8>),
	/// A boolean
	Bool(bool),
	/// A little-endian u32
	DWord(u32),
	/// A little-endian u64
	QWord(u64),
	/// A little-endian u16
	Word(u16),
	/// A 16-byte GUID
	Guid(Guid),
}

impl Debug for DescriptorValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Unicode(text) => write!(f, "Unicode({text:?})"),
			Self::Bytes(data) => write!(f, "Bytes(<{} bytes>)", data.len()),
			Self::Bool(b) => write!(f, "Bool({b})"),
			Self::DWord(n) => write!(f, "DWord({n})"),
			Self::QWord(n) => write!(f, "QWord({n})"),
			Self::Word(n) => write!(f, "Word({n})"),
			Self::Guid(guid) => write!(f, "{guid:?}"),
		}
	}
}

impl DescriptorValue {
	/// Returns the value's [`DataType`]
	pub fn data_type(&self) -> DataType {
		match self {
			Self::Unicode(_) => DataType::Unicode,
			Self::Bytes(_) => DataType::Bytes,
			Self::Bool(_) => DataType::Bool,
			Self::DWord(_) => DataType::DWord,
			Self::QWord(_) => DataType::QWord,
			Self::Word(_) => DataType::Word,
			Self::Guid(_) => DataType::Guid,
		}
	}

	/// Returns the string content for [`DescriptorValue::Unicode`] values
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Unicode(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the byte content for [`DescriptorValue::Bytes`] values
	pub fn bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Bytes(data) => Some(data),
			_ => None,
		}
	}

	/// Coerce any integer-carrying value to a u64
	///
	/// Unicode values are included, taking the leading decimal digits. Several
	/// taggers write numeric descriptors as strings, sometimes with a suffix
	/// (e.g. a year written as "2004-06-01").
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::Word(n) => Some(u64::from(*n)),
			Self::DWord(n) => Some(u64::from(*n)),
			Self::QWord(n) => Some(*n),
			Self::Unicode(text) => {
				let digits: String = text
					.trim_start()
					.chars()
					.take_while(char::is_ascii_digit)
					.collect();
				digits.parse::<u64>().ok()
			},
			_ => None,
		}
	}

	/// Decode a value from exactly the declared value bytes
	///
	/// Returns `Ok(None)` when the value is malformed but the parsing mode allows
	/// skipping it.
	pub(crate) fn parse(
		data: &[u8],
		data_type: DataType,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>> {
		let value = match data_type {
			DataType::Unicode => match utf16le_decode(data) {
				Ok(text) => Some(Self::Unicode(text)),
				Err(e) => {
					parse_mode_choice!(
						parse_mode,
						STRICT: return Err(e),
						BESTATTEMPT: log::warn!("Descriptor contains invalid UTF-16, discarding"),
					);
					None
				},
			},
			DataType::Bytes => Some(Self::Bytes(data.to_vec())),
			// Bools have been written at both widths historically, the declared
			// length disambiguates
			DataType::Bool => match data.len() {
				4 => Some(Self::Bool(LittleEndian::read_u32(data) != 0)),
				2 => Some(Self::Bool(LittleEndian::read_u16(data) != 0)),
				_ => {
					parse_mode_choice!(
						parse_mode,
						STRICT: err!(BadDescriptor("Bool descriptor has an invalid width")),
						BESTATTEMPT: log::warn!(
							"Bool descriptor is {} bytes wide, discarding",
							data.len()
						),
					);
					None
				},
			},
			DataType::DWord if data.len() == 4 => Some(Self::DWord(LittleEndian::read_u32(data))),
			DataType::QWord if data.len() == 8 => Some(Self::QWord(LittleEndian::read_u64(data))),
			DataType::Word if data.len() == 2 => Some(Self::Word(LittleEndian::read_u16(data))),
			DataType::Guid if data.len() == 16 => Some(Self::Guid(Guid::try_from(data)?)),
			_ => {
				parse_mode_choice!(
					parse_mode,
					STRICT: err!(BadDescriptor("Descriptor value has an invalid width")),
					BESTATTEMPT: log::warn!(
						"{:?} descriptor is {} bytes wide, discarding",
						data_type,
						data.len()
					),
				);
				None
			},
		};

		Ok(value)
	}

	/// Encode the value bytes
	///
	/// `bool_width` selects the bool quirk of the containing store.
	pub(crate) fn render(&self, bool_width: BoolWidth) -> Vec<u8> {
		match self {
			Self::Unicode(text) => utf16le_encode_terminated(text),
			Self::Bytes(data) => data.clone(),
			Self::Bool(b) => match bool_width {
				BoolWidth::DWord => u32::from(*b).to_le_bytes().to_vec(),
				BoolWidth::Word => u16::from(*b).to_le_bytes().to_vec(),
			},
			Self::DWord(n) => n.to_le_bytes().to_vec(),
			Self::QWord(n) => n.to_le_bytes().to_vec(),
			Self::Word(n) => n.to_le_bytes().to_vec(),
			Self::Guid(guid) => guid.bytes().to_vec(),
		}
	}
}
