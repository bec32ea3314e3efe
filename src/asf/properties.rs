use std::fmt::{Display, Formatter};
use std::time::Duration;

/// An audio codec, as declared by a stream's WAVEFORMATEX codec id
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum AsfCodec {
	/// Windows Media Audio v1
	WmaV1,
	/// Windows Media Audio v2 ("standard" WMA)
	WmaV2,
	/// Windows Media Audio Professional
	WmaPro,
	/// Windows Media Audio Lossless
	WmaLossless,
	/// Windows Media Audio Voice
	WmaVoice,
	/// Some other codec id
	Unknown(u16),
}

impl AsfCodec {
	pub(crate) fn from_codec_id(codec_id: u16) -> Self {
		match codec_id {
			0x000A => Self::WmaVoice,
			0x0160 => Self::WmaV1,
			0x0161 => Self::WmaV2,
			0x0162 => Self::WmaPro,
			0x0163 => Self::WmaLossless,
			other => Self::Unknown(other),
		}
	}
}

impl Display for AsfCodec {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::WmaV1 => write!(f, "Windows Media Audio V1"),
			Self::WmaV2 => write!(f, "Windows Media Audio V2"),
			Self::WmaPro => write!(f, "Windows Media Audio Professional"),
			Self::WmaLossless => write!(f, "Windows Media Audio Lossless"),
			Self::WmaVoice => write!(f, "Windows Media Audio Voice"),
			Self::Unknown(id) => write!(f, "Unknown (0x{id:04X})"),
		}
	}
}

/// An ASF file's audio properties
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct AsfProperties {
	pub(crate) duration: Duration,
	pub(crate) overall_bitrate: u32,
	pub(crate) audio_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) bit_depth: Option<u8>,
	pub(crate) channels: u8,
	pub(crate) codecs: Vec<AsfCodec>,
}

impl Default for AsfProperties {
	fn default() -> Self {
		Self {
			duration: Duration::ZERO,
			overall_bitrate: 0,
			audio_bitrate: 0,
			sample_rate: 0,
			bit_depth: None,
			channels: 0,
			codecs: Vec::new(),
		}
	}
}

impl AsfProperties {
	/// Duration of the audio, preroll excluded
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Overall bitrate (kbps)
	pub fn overall_bitrate(&self) -> u32 {
		self.overall_bitrate
	}

	/// Audio bitrate (kbps), from the first audio stream
	pub fn audio_bitrate(&self) -> u32 {
		self.audio_bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Bits per sample, when the stream declares a meaningful value
	pub fn bit_depth(&self) -> Option<u8> {
		self.bit_depth
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// The codec of every audio stream in the file, in stream order
	pub fn codecs(&self) -> &[AsfCodec] {
		&self.codecs
	}
}
