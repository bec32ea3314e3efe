use super::guid::{Guid, constants};
use super::object::{ObjectHeader, render_object};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{decode_err, err};

use byteorder::{LittleEndian, ReadBytesExt as _};

// 24-byte frame + 54 bytes of fixed fields
const MINIMUM_SIZE: u64 = 78;

/// The decoded leading fields of a WAVEFORMATEX structure
///
/// Audio-media streams carry one of these in their type-specific data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct AudioFormat {
	pub(crate) codec_id: u16,
	pub(crate) channels: u16,
	pub(crate) sample_rate: u32,
	pub(crate) average_bytes_per_second: u32,
	pub(crate) block_alignment: u16,
	pub(crate) bits_per_sample: u16,
}

/// A stream properties object
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StreamPropertiesObject {
	pub(crate) stream_type: Guid,
	pub(crate) error_correction_type: Guid,
	pub(crate) time_offset: u64,
	pub(crate) flags: u16,
	pub(crate) reserved: u32,
	pub(crate) type_specific_data: Vec<u8>,
	pub(crate) error_correction_data: Vec<u8>,
}

impl StreamPropertiesObject {
	pub(crate) fn parse(
		header: &ObjectHeader,
		data: &[u8],
		_parse_mode: ParsingMode,
	) -> Result<Self> {
		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "Stream properties object is undersized");
		}

		let mut reader = data;

		let stream_type = Guid::read_from(&mut reader)?;
		let error_correction_type = Guid::read_from(&mut reader)?;
		let time_offset = reader.read_u64::<LittleEndian>()?;
		let type_specific_len = reader.read_u32::<LittleEndian>()? as usize;
		let error_correction_len = reader.read_u32::<LittleEndian>()? as usize;
		let flags = reader.read_u16::<LittleEndian>()?;
		let reserved = reader.read_u32::<LittleEndian>()?;

		if reader.len() < type_specific_len + error_correction_len {
			err!(SizeMismatch);
		}

		let type_specific_data = reader[..type_specific_len].to_vec();
		let error_correction_data =
			reader[type_specific_len..type_specific_len + error_correction_len].to_vec();

		Ok(Self {
			stream_type,
			error_correction_type,
			time_offset,
			flags,
			reserved,
			type_specific_data,
			error_correction_data,
		})
	}

	/// The stream number, from the low 7 bits of the flags
	pub(crate) fn stream_number(&self) -> u8 {
		(self.flags & 0x7F) as u8
	}

	/// Decode the WAVEFORMATEX fields for audio-media streams
	///
	/// Returns `None` for non-audio streams and for type-specific data too short
	/// to contain the fixed fields.
	pub(crate) fn audio_format(&self) -> Option<AudioFormat> {
		if self.stream_type != constants::AUDIO_MEDIA {
			return None;
		}

		let mut reader = &*self.type_specific_data;
		if reader.len() < 16 {
			log::warn!("Audio stream has a truncated WAVEFORMATEX, ignoring");
			return None;
		}

		// Reads from a large enough slice, cannot fail
		Some(AudioFormat {
			codec_id: reader.read_u16::<LittleEndian>().ok()?,
			channels: reader.read_u16::<LittleEndian>().ok()?,
			sample_rate: reader.read_u32::<LittleEndian>().ok()?,
			average_bytes_per_second: reader.read_u32::<LittleEndian>().ok()?,
			block_alignment: reader.read_u16::<LittleEndian>().ok()?,
			bits_per_sample: reader.read_u16::<LittleEndian>().ok()?,
		})
	}

	pub(crate) fn render(&self) -> Vec<u8> {
		let mut payload = Vec::with_capacity(
			54 + self.type_specific_data.len() + self.error_correction_data.len(),
		);

		payload.extend(self.stream_type.bytes());
		payload.extend(self.error_correction_type.bytes());
		payload.extend(self.time_offset.to_le_bytes());
		payload.extend((self.type_specific_data.len() as u32).to_le_bytes());
		payload.extend((self.error_correction_data.len() as u32).to_le_bytes());
		payload.extend(self.flags.to_le_bytes());
		payload.extend(self.reserved.to_le_bytes());
		payload.extend_from_slice(&self.type_specific_data);
		payload.extend_from_slice(&self.error_correction_data);

		render_object(constants::STREAM_PROPERTIES, &payload)
	}
}

#[cfg(test)]
mod tests {
	use super::{AudioFormat, StreamPropertiesObject};
	use super::super::guid::constants;
	use super::super::object::ObjectHeader;
	use crate::config::ParsingMode;

	fn wma_stream() -> StreamPropertiesObject {
		let mut waveformatex = Vec::new();
		waveformatex.extend(0x0161u16.to_le_bytes()); // WMA v2
		waveformatex.extend(2u16.to_le_bytes());
		waveformatex.extend(44_100u32.to_le_bytes());
		waveformatex.extend(16_000u32.to_le_bytes());
		waveformatex.extend(2048u16.to_le_bytes());
		waveformatex.extend(16u16.to_le_bytes());

		StreamPropertiesObject {
			stream_type: constants::AUDIO_MEDIA,
			error_correction_type: constants::AUDIO_MEDIA,
			time_offset: 0,
			flags: 1,
			reserved: 0,
			type_specific_data: waveformatex,
			error_correction_data: Vec::new(),
		}
	}

	#[test_log::test]
	fn audio_format_decode() {
		let stream = wma_stream();

		assert_eq!(stream.stream_number(), 1);
		assert_eq!(
			stream.audio_format(),
			Some(AudioFormat {
				codec_id: 0x0161,
				channels: 2,
				sample_rate: 44_100,
				average_bytes_per_second: 16_000,
				block_alignment: 2048,
				bits_per_sample: 16,
			})
		);

		// Non-audio streams have no audio format
		let mut video = wma_stream();
		video.stream_type = constants::VIDEO_MEDIA;
		assert_eq!(video.audio_format(), None);
	}

	#[test_log::test]
	fn render_round_trip() {
		let stream = wma_stream();

		let rendered = stream.render();

		let mut reader = &rendered[..];
		let header = ObjectHeader::read_from(&mut reader).unwrap();
		let reparsed =
			StreamPropertiesObject::parse(&header, reader, ParsingMode::Strict).unwrap();

		assert_eq!(reparsed, stream);
	}
}
