use crate::error::{AsfError, Result};
use crate::macros::err;

use std::fmt::{Debug, Display, Formatter};
use std::io::Read;

/// A 128-bit GUID, used to identify every object in an ASF container
///
/// The bytes are stored in on-disk order: the first three fields little-endian,
/// the final eight bytes as-is. Two `Guid`s are equal iff all 16 bytes match.
///
/// # Examples
///
/// ```rust
/// use asf_tag::asf::Guid;
///
/// # fn main() -> asf_tag::error::Result<()> {
/// let guid: Guid = "75B22630-668E-11CF-A6D9-00AA0062CE6C".parse()?;
///
/// // Parsing is case-insensitive
/// let lowercase: Guid = "75b22630-668e-11cf-a6d9-00aa0062ce6c".parse()?;
/// assert_eq!(guid, lowercase);
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Guid([u8; 16]);

impl Guid {
	/// Create a `Guid` from bytes already in on-disk order
	#[must_use]
	pub const fn from_bytes(bytes: [u8; 16]) -> Self {
		Self(bytes)
	}

	/// Read a `Guid` from a reader
	///
	/// # Errors
	///
	/// * Unable to read 16 bytes
	pub fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut bytes = [0; 16];
		reader.read_exact(&mut bytes)?;

		Ok(Self(bytes))
	}

	/// Returns the bytes in on-disk order
	pub fn bytes(&self) -> [u8; 16] {
		self.0
	}
}

impl TryFrom<&[u8]> for Guid {
	type Error = AsfError;

	fn try_from(value: &[u8]) -> std::result::Result<Self, Self::Error> {
		let Ok(bytes) = TryInto::<[u8; 16]>::try_into(value) else {
			err!(BadGuid("GUID must be exactly 16 bytes"));
		};

		Ok(Self(bytes))
	}
}

impl std::str::FromStr for Guid {
	type Err = AsfError;

	/// Parse a `Guid` from its canonical hyphenated form
	///
	/// The parse is case-insensitive. Anything other than five hyphen-separated
	/// hex fields of widths 8-4-4-4-12 is an error.
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		if s.len() != 36 {
			err!(BadGuid("GUID string must be 36 characters"));
		}

		let bytes = s.as_bytes();
		for (i, b) in bytes.iter().enumerate() {
			match i {
				8 | 13 | 18 | 23 => {
					if *b != b'-' {
						err!(BadGuid("GUID string has misplaced separators"));
					}
				},
				_ => {
					if !b.is_ascii_hexdigit() {
						err!(BadGuid("GUID string contains non-hex characters"));
					}
				},
			}
		}

		let hex_u32 =
			|range: std::ops::Range<usize>| u32::from_str_radix(&s[range], 16).unwrap(); // Validated above
		let hex_u16 =
			|range: std::ops::Range<usize>| u16::from_str_radix(&s[range], 16).unwrap();
		let hex_u8 = |start: usize| u8::from_str_radix(&s[start..start + 2], 16).unwrap();

		let mut out = [0; 16];
		out[..4].copy_from_slice(&hex_u32(0..8).to_le_bytes());
		out[4..6].copy_from_slice(&hex_u16(9..13).to_le_bytes());
		out[6..8].copy_from_slice(&hex_u16(14..18).to_le_bytes());
		out[8] = hex_u8(19);
		out[9] = hex_u8(21);
		for (i, pos) in (24..36).step_by(2).enumerate() {
			out[10 + i] = hex_u8(pos);
		}

		Ok(Self(out))
	}
}

impl Display for Guid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let b = &self.0;
		write!(
			f,
			"{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
			u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
			u16::from_le_bytes([b[4], b[5]]),
			u16::from_le_bytes([b[6], b[7]]),
			b[8],
			b[9],
			b[10],
			b[11],
			b[12],
			b[13],
			b[14],
			b[15],
		)
	}
}

impl Debug for Guid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Guid({self})")
	}
}

/// Well-known object GUIDs
///
/// The set here is the set the parser dispatches on; everything else round-trips
/// through the opaque unknown-object fallback.
pub(crate) mod constants {
	use super::Guid;

	/// "75B22630-668E-11CF-A6D9-00AA0062CE6C"
	pub(crate) const HEADER_OBJECT: Guid = Guid::from_bytes([
		0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE,
		0x6C,
	]);

	/// "8CABDCA1-A947-11CF-8EE4-00C00C205365"
	pub(crate) const FILE_PROPERTIES: Guid = Guid::from_bytes([
		0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53,
		0x65,
	]);

	/// "B7DC0791-A9B7-11CF-8EE6-00C00C205365"
	pub(crate) const STREAM_PROPERTIES: Guid = Guid::from_bytes([
		0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53,
		0x65,
	]);

	/// "5FBF03B5-A92E-11CF-8EE3-00C00C205365"
	pub(crate) const HEADER_EXTENSION: Guid = Guid::from_bytes([
		0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53,
		0x65,
	]);

	/// "75B22633-668E-11CF-A6D9-00AA0062CE6C"
	pub(crate) const CONTENT_DESCRIPTION: Guid = Guid::from_bytes([
		0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE,
		0x6C,
	]);

	/// "D2D0A440-E307-11D2-97F0-00A0C95EA850"
	pub(crate) const EXTENDED_CONTENT_DESCRIPTION: Guid = Guid::from_bytes([
		0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8,
		0x50,
	]);

	/// "44231C94-9498-49D1-A141-1D134E457054"
	pub(crate) const METADATA_LIBRARY: Guid = Guid::from_bytes([
		0x94, 0x1C, 0x23, 0x44, 0x98, 0x94, 0xD1, 0x49, 0xA1, 0x41, 0x1D, 0x13, 0x4E, 0x45, 0x70,
		0x54,
	]);

	/// "1806D474-CADF-4509-A4BA-9AAB0B65A42A"
	pub(crate) const PADDING: Guid = Guid::from_bytes([
		0x74, 0xD4, 0x06, 0x18, 0xDF, 0xCA, 0x09, 0x45, 0xA4, 0xBA, 0x9A, 0xAB, 0x0B, 0x65, 0xA4,
		0x2A,
	]);

	/// "F8699E40-5B4D-11CF-A8FD-00805F5C442B"
	pub(crate) const AUDIO_MEDIA: Guid = Guid::from_bytes([
		0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44,
		0x2B,
	]);

	/// "BC19EFC0-5B4D-11CF-A8FD-00805F5C442B"
	pub(crate) const VIDEO_MEDIA: Guid = Guid::from_bytes([
		0xC0, 0xEF, 0x19, 0xBC, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44,
		0x2B,
	]);

	/// "ABD3D211-A9BA-11CF-8EE6-00C00C205365" (header extension reserved field 1)
	pub(crate) const HEADER_EXTENSION_RESERVED_1: Guid = Guid::from_bytes([
		0x11, 0xD2, 0xD3, 0xAB, 0xBA, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53,
		0x65,
	]);
}

#[cfg(test)]
mod tests {
	use super::Guid;
	use super::constants::HEADER_OBJECT;

	#[test_log::test]
	fn parse_case_insensitive() {
		let upper: Guid = "75B22630-668E-11CF-A6D9-00AA0062CE6C".parse().unwrap();
		let lower: Guid = "75b22630-668e-11cf-a6d9-00aa0062ce6c".parse().unwrap();

		assert_eq!(upper, lower);
		assert_eq!(upper, HEADER_OBJECT);
	}

	#[test_log::test]
	fn display_round_trip() {
		let text = "D2D0A440-E307-11D2-97F0-00A0C95EA850";
		let guid: Guid = text.parse().unwrap();

		assert_eq!(guid.to_string(), text);
	}

	#[test_log::test]
	fn reject_malformed() {
		assert!("75B22630-668E-11CF-A6D9-00AA0062CE6".parse::<Guid>().is_err());
		assert!("75B22630_668E_11CF_A6D9_00AA0062CE6C".parse::<Guid>().is_err());
		assert!("75B2263G-668E-11CF-A6D9-00AA0062CE6C".parse::<Guid>().is_err());

		// A GUID must be exactly 16 bytes
		assert!(Guid::try_from(&[0u8; 15][..]).is_err());
		assert!(Guid::try_from(&[0u8; 16][..]).is_ok());
	}
}
