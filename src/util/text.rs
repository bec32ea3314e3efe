use crate::error::{AsfError, ErrorKind, Result};
use crate::macros::{err, try_vec};

use std::io::Read;

/// Decode a fixed-width UTF-16LE field
///
/// ASF stores strings as UTF-16LE in fields whose byte width is declared up front.
/// The content stops at the first embedded NUL, regardless of how many bytes the
/// field declares; anything past it is padding.
pub(crate) fn utf16le_decode(bytes: &[u8]) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	if bytes.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let units: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| u16::from_le_bytes(c.try_into().unwrap())) // Infallible
		.take_while(|unit| *unit != 0)
		.collect();

	String::from_utf16(&units)
		.map_err(|_| AsfError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

/// Read `byte_len` bytes and decode them as a NUL-padded UTF-16LE field
pub(crate) fn read_utf16le<R>(reader: &mut R, byte_len: usize) -> Result<String>
where
	R: Read,
{
	let mut bytes = try_vec![0; byte_len];
	reader.read_exact(&mut bytes)?;

	utf16le_decode(&bytes)
}

/// Encode a string as UTF-16LE with no terminator
pub(crate) fn utf16le_encode(text: &str) -> Vec<u8> {
	let mut encoded = Vec::with_capacity(text.len() * 2);

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&ch.to_le_bytes());
	}

	encoded
}

/// Encode a string as UTF-16LE, appending a single 2-byte NUL terminator
pub(crate) fn utf16le_encode_terminated(text: &str) -> Vec<u8> {
	let mut encoded = utf16le_encode(text);
	encoded.extend_from_slice(&[0, 0]);
	encoded
}

#[cfg(test)]
mod tests {
	const TEST_STRING: &str = "l\u{00f8}ft\u{00a5}";

	#[test_log::test]
	fn text_decode() {
		let decoded = super::utf16le_decode(&[
			0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00,
		])
		.unwrap();

		assert_eq!(decoded, TEST_STRING.to_string());

		// Content stops at the first NUL, the remainder is padding
		let padded = super::utf16le_decode(&[
			0x6C, 0x00, 0xF8, 0x00, 0x00, 0x00, 0x66, 0x00, 0x74, 0x00,
		])
		.unwrap();

		assert_eq!(padded, "l\u{00f8}");

		assert!(super::utf16le_decode(&[0x6C, 0x00, 0xF8]).is_err());
	}

	#[test_log::test]
	fn text_encode() {
		let encoded = super::utf16le_encode(TEST_STRING);

		assert_eq!(
			encoded.as_slice(),
			&[0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00]
		);

		let terminated = super::utf16le_encode_terminated(TEST_STRING);

		assert_eq!(
			terminated.as_slice(),
			&[0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00, 0x00]
		);

		// Round trip
		assert_eq!(
			super::utf16le_decode(&terminated).unwrap(),
			TEST_STRING.to_string()
		);
	}
}
