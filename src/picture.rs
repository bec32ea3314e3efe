//! Format-agnostic picture handling

use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::util::text::{utf16le_decode, utf16le_encode_terminated};

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt as _};

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use asf_tag::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use asf_tag::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
///
/// ASF's picture descriptor borrowed the ID3v2 type byte wholesale, so the
/// same table applies here.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// Builder for a [`Picture`]
///
/// This is created through [`Picture::unchecked()`].
pub struct PictureBuilder {
	pic_type: PictureType,
	mime_type: Option<MimeType>,
	description: Option<Cow<'static, str>>,
	data: Cow<'static, [u8]>,
}

impl PictureBuilder {
	fn new(data: Cow<'static, [u8]>) -> Self {
		Self {
			pic_type: PictureType::Other,
			mime_type: None,
			description: None,
			data,
		}
	}

	/// Set the [`PictureType`] for this picture
	pub fn pic_type(mut self, pic_type: PictureType) -> Self {
		self.pic_type = pic_type;
		self
	}

	/// Set the [`MimeType`] for this picture
	pub fn mime_type(mut self, mime_type: MimeType) -> Self {
		self.mime_type = Some(mime_type);
		self
	}

	/// Set the description for this picture
	pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Convert this builder into a [`Picture`]
	pub fn build(self) -> Picture {
		self.into()
	}
}

impl From<PictureBuilder> for Picture {
	fn from(builder: PictureBuilder) -> Self {
		Self {
			pic_type: builder.pic_type,
			mime_type: builder.mime_type,
			description: builder.description,
			data: builder.data,
		}
	}
}

/// Represents a picture.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	/// The picture type according to ID3v2 APIC
	pub(crate) pic_type: PictureType,
	/// The picture's mimetype
	pub(crate) mime_type: Option<MimeType>,
	/// The picture's description
	pub(crate) description: Option<Cow<'static, str>>,
	/// The binary data of the picture
	pub(crate) data: Cow<'static, [u8]>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// Create a [`Picture`] from a reader
	///
	/// NOTES:
	///
	/// * This is for reading picture data only, from a [`File`](std::fs::File) for example.
	/// * `pic_type` will always be [`PictureType::Other`], be sure to change it accordingly if
	///   writing.
	///
	/// # Errors
	///
	/// * `reader` contains less than 8 bytes
	/// * `reader` does not contain a supported format. See [`MimeType`] for valid formats
	pub fn from_reader<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		if data.len() < 8 {
			err!(NotAPicture);
		}

		let mime_type = Self::mimetype_from_bin(&data[..8])?;

		Ok(Self {
			pic_type: PictureType::Other,
			mime_type: Some(mime_type),
			description: None,
			data: data.into(),
		})
	}

	/// Create a new `Picture` with no verification
	///
	/// This will **not** verify `data`'s signature.
	///
	/// This should only be used if all data has been verified beforehand.
	///
	/// # Examples
	///
	/// ```rust
	/// use asf_tag::picture::{MimeType, Picture, PictureType};
	///
	/// # let picture_data = vec![0xFF, 0xD8, 0xFF, 0xE0];
	/// let picture = Picture::unchecked(picture_data)
	/// 	.pic_type(PictureType::CoverFront)
	/// 	.mime_type(MimeType::Jpeg)
	/// 	.description("The band on stage")
	/// 	.build();
	/// ```
	pub fn unchecked(data: Vec<u8>) -> PictureBuilder {
		PictureBuilder::new(Cow::Owned(data))
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Sets the [`PictureType`]
	pub fn set_pic_type(&mut self, pic_type: PictureType) {
		self.pic_type = pic_type
	}

	/// Returns the [`MimeType`]
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	// Used commonly internally
	pub(crate) fn mime_str(&self) -> &str {
		match self.mime_type.as_ref() {
			Some(mime_type) => mime_type.as_str(),
			None => "",
		}
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Sets the description
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description.map(Cow::from);
	}

	/// Returns the [`Picture`] data as borrowed bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes a [`Picture`], returning the data as [`Vec`] without clones or allocation.
	pub fn into_data(self) -> Vec<u8> {
		self.data.into_owned()
	}

	/// Convert a [`Picture`] to a `WM/Picture` descriptor value
	///
	/// The layout is `type (1) + data length (4, LE) + mime (UTF-16LE, NUL terminated) +
	/// description (UTF-16LE, NUL terminated) + data`.
	pub fn as_asf_bytes(&self) -> Vec<u8> {
		let mut data = Vec::with_capacity(self.data.len() + 64);

		data.push(self.pic_type.as_u8());
		data.extend((self.data.len() as u32).to_le_bytes());
		data.extend(utf16le_encode_terminated(self.mime_str()));
		data.extend(utf16le_encode_terminated(
			self.description.as_deref().unwrap_or(""),
		));
		data.extend(self.data.iter());

		data
	}

	/// Get a [`Picture`] from a `WM/Picture` descriptor value
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`](crate::error::ErrorKind::NotAPicture) if
	/// at any point it's unable to parse the data. Real-world files contain slightly
	/// non-conformant picture records fairly often, so callers are expected to treat this
	/// error as "no picture" rather than corruption.
	pub fn from_asf_bytes(bytes: &[u8], parse_mode: ParsingMode) -> Result<Self> {
		// type (1) + length (4) + two NUL terminators (4)
		if bytes.len() < 9 {
			err!(NotAPicture);
		}

		let mut reader = Cursor::new(bytes);

		let pic_type = PictureType::from_u8(reader.read_u8()?);
		let data_len = reader.read_u32::<LittleEndian>()? as usize;

		let mime_type_str = read_terminated_utf16le(&mut reader)?;
		let description = read_terminated_utf16le(&mut reader)?;

		let remaining = &bytes[reader.position() as usize..];
		if remaining.len() < data_len {
			err!(NotAPicture);
		}

		if remaining.len() > data_len {
			// Trailing garbage after the declared data. Some writers pad the record,
			// so the declared length wins outside of `Strict`.
			if parse_mode == ParsingMode::Strict {
				err!(SizeMismatch);
			}

			log::warn!(
				"WM/Picture record has {} trailing bytes, taking the declared length",
				remaining.len() - data_len
			);
		}

		let mime_type = if mime_type_str.is_empty() {
			None
		} else {
			Some(MimeType::from_str(&mime_type_str))
		};

		Ok(Self {
			pic_type,
			mime_type,
			description: if description.is_empty() {
				None
			} else {
				Some(Cow::Owned(description))
			},
			data: Cow::Owned(remaining[..data_len].to_vec()),
		})
	}

	pub(crate) fn mimetype_from_bin(bytes: &[u8]) -> Result<MimeType> {
		match bytes[..8] {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A] => Ok(MimeType::Png),
			[0xFF, 0xD8, ..] => Ok(MimeType::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Ok(MimeType::Gif),
			[b'B', b'M', ..] => Ok(MimeType::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Ok(MimeType::Tiff),
			_ => err!(NotAPicture),
		}
	}
}

// Collects UTF-16LE units up to (and consuming) the NUL terminator.
//
// A missing terminator is an error, the record cannot be split into fields without it.
fn read_terminated_utf16le<R>(reader: &mut R) -> Result<String>
where
	R: Read,
{
	let mut bytes = Vec::new();

	loop {
		let mut unit = [0u8; 2];
		if reader.read_exact(&mut unit).is_err() {
			err!(NotAPicture);
		}

		if unit == [0, 0] {
			break;
		}

		bytes.extend_from_slice(&unit);
	}

	utf16le_decode(&bytes)
}

#[cfg(test)]
mod tests {
	use super::{MimeType, Picture, PictureType};
	use crate::config::ParsingMode;

	fn test_picture() -> Picture {
		Picture::unchecked(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x13, 0x37])
			.pic_type(PictureType::CoverFront)
			.mime_type(MimeType::Jpeg)
			.description("Front cover")
			.build()
	}

	#[test_log::test]
	fn asf_bytes_round_trip() {
		let picture = test_picture();

		let bytes = picture.as_asf_bytes();
		let parsed = Picture::from_asf_bytes(&bytes, ParsingMode::Strict).unwrap();

		assert_eq!(parsed, picture);
	}

	#[test_log::test]
	fn asf_bytes_no_description() {
		let mut picture = test_picture();
		picture.set_description(None);

		let bytes = picture.as_asf_bytes();
		let parsed = Picture::from_asf_bytes(&bytes, ParsingMode::Strict).unwrap();

		assert_eq!(parsed.description(), None);
		assert_eq!(parsed, picture);
	}

	#[test_log::test]
	fn asf_bytes_malformed() {
		let picture = test_picture();
		let bytes = picture.as_asf_bytes();

		// Missing NUL delimiter
		let truncated = &bytes[..12];
		assert!(Picture::from_asf_bytes(truncated, ParsingMode::BestAttempt).is_err());

		// Data shorter than declared
		let mut short = bytes.clone();
		short.truncate(bytes.len() - 2);
		assert!(Picture::from_asf_bytes(&short, ParsingMode::BestAttempt).is_err());

		// Trailing garbage is tolerated outside of `Strict`
		let mut padded = bytes;
		padded.extend_from_slice(&[0xAB, 0xCD]);
		assert!(Picture::from_asf_bytes(&padded, ParsingMode::Strict).is_err());
		assert_eq!(
			Picture::from_asf_bytes(&padded, ParsingMode::BestAttempt).unwrap(),
			picture
		);
	}
}
