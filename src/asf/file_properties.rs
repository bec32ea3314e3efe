use super::guid::{Guid, constants};
use super::object::{ObjectHeader, render_object};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::decode_err;

use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt as _};

// 24-byte frame + 80 byte fixed payload
const MINIMUM_SIZE: u64 = 104;

/// The file properties object
///
/// This is the source of the container-wide timing information. Everything is kept
/// verbatim so an untouched object renders back byte-exact.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FilePropertiesObject {
	pub(crate) file_id: Guid,
	pub(crate) file_size: u64,
	/// 100-nanosecond intervals since January 1, 1601
	pub(crate) creation_date: u64,
	pub(crate) data_packets_count: u64,
	/// Playtime in 100-nanosecond units, *including* the preroll
	pub(crate) play_duration: u64,
	pub(crate) send_duration: u64,
	/// Buffering time in milliseconds
	pub(crate) preroll: u64,
	pub(crate) flags: u32,
	pub(crate) minimum_data_packet_size: u32,
	pub(crate) maximum_data_packet_size: u32,
	pub(crate) maximum_bitrate: u32,
}

impl FilePropertiesObject {
	pub(crate) fn parse(
		header: &ObjectHeader,
		data: &[u8],
		_parse_mode: ParsingMode,
	) -> Result<Self> {
		if header.size < MINIMUM_SIZE {
			decode_err!(@BAIL "File properties object is undersized");
		}

		let mut reader = data;

		let file_id = Guid::read_from(&mut reader)?;
		let file_size = reader.read_u64::<LittleEndian>()?;
		let creation_date = reader.read_u64::<LittleEndian>()?;
		let data_packets_count = reader.read_u64::<LittleEndian>()?;
		let play_duration = reader.read_u64::<LittleEndian>()?;
		let send_duration = reader.read_u64::<LittleEndian>()?;
		let preroll = reader.read_u64::<LittleEndian>()?;
		let flags = reader.read_u32::<LittleEndian>()?;
		let minimum_data_packet_size = reader.read_u32::<LittleEndian>()?;
		let maximum_data_packet_size = reader.read_u32::<LittleEndian>()?;
		let maximum_bitrate = reader.read_u32::<LittleEndian>()?;

		Ok(Self {
			file_id,
			file_size,
			creation_date,
			data_packets_count,
			play_duration,
			send_duration,
			preroll,
			flags,
			minimum_data_packet_size,
			maximum_data_packet_size,
			maximum_bitrate,
		})
	}

	/// The media duration, with the preroll subtracted out
	pub(crate) fn duration(&self) -> Duration {
		let play_duration_ms = self.play_duration / 10_000;
		Duration::from_millis(play_duration_ms.saturating_sub(self.preroll))
	}

	pub(crate) fn render(&self) -> Vec<u8> {
		let mut payload = Vec::with_capacity(80);

		payload.extend(self.file_id.bytes());
		payload.extend(self.file_size.to_le_bytes());
		payload.extend(self.creation_date.to_le_bytes());
		payload.extend(self.data_packets_count.to_le_bytes());
		payload.extend(self.play_duration.to_le_bytes());
		payload.extend(self.send_duration.to_le_bytes());
		payload.extend(self.preroll.to_le_bytes());
		payload.extend(self.flags.to_le_bytes());
		payload.extend(self.minimum_data_packet_size.to_le_bytes());
		payload.extend(self.maximum_data_packet_size.to_le_bytes());
		payload.extend(self.maximum_bitrate.to_le_bytes());

		render_object(constants::FILE_PROPERTIES, &payload)
	}
}

#[cfg(test)]
mod tests {
	use super::FilePropertiesObject;
	use super::super::object::ObjectHeader;
	use crate::config::ParsingMode;

	use std::time::Duration;

	#[test_log::test]
	fn duration_subtracts_preroll() {
		let mut object = FilePropertiesObject {
			file_id: crate::asf::guid::constants::HEADER_OBJECT,
			file_size: 0,
			creation_date: 0,
			data_packets_count: 0,
			// 65 seconds in 100ns units
			play_duration: 65 * 10_000_000,
			send_duration: 0,
			// 3 seconds of preroll
			preroll: 3000,
			flags: 0,
			minimum_data_packet_size: 0,
			maximum_data_packet_size: 0,
			maximum_bitrate: 0,
		};

		assert_eq!(object.duration(), Duration::from_secs(62));

		// A preroll longer than the play duration must not underflow
		object.preroll = 100_000;
		assert_eq!(object.duration(), Duration::ZERO);
	}

	#[test_log::test]
	fn render_round_trip() {
		let object = FilePropertiesObject {
			file_id: crate::asf::guid::constants::AUDIO_MEDIA,
			file_size: 123_456,
			creation_date: 0x0123_4567_89AB_CDEF,
			data_packets_count: 42,
			play_duration: 65 * 10_000_000,
			send_duration: 60 * 10_000_000,
			preroll: 3000,
			flags: 0x02,
			minimum_data_packet_size: 3200,
			maximum_data_packet_size: 3200,
			maximum_bitrate: 128_000,
		};

		let rendered = object.render();
		assert_eq!(rendered.len(), 104);

		let mut reader = &rendered[..];
		let header = ObjectHeader::read_from(&mut reader).unwrap();
		let reparsed =
			FilePropertiesObject::parse(&header, reader, ParsingMode::Strict).unwrap();

		assert_eq!(reparsed, object);
	}
}
