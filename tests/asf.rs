#![allow(missing_docs)]

use asf_tag::asf::AsfFile;
use asf_tag::config::{ParseOptions, WriteOptions};
use asf_tag::picture::{MimeType, Picture, PictureType};
use asf_tag::prelude::*;

use std::io::{Cursor, Read, Seek, Write};

// On-disk GUIDs of the objects the synthesized container uses
const HEADER: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
const FILE_PROPERTIES: [u8; 16] = [
	0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
const STREAM_PROPERTIES: [u8; 16] = [
	0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
const HEADER_EXTENSION: [u8; 16] = [
	0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
const HEADER_EXTENSION_RESERVED_1: [u8; 16] = [
	0x11, 0xD2, 0xD3, 0xAB, 0xBA, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
const CONTENT_DESCRIPTION: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
const EXTENDED_CONTENT_DESCRIPTION: [u8; 16] = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];
const AUDIO_MEDIA: [u8; 16] = [
	0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
];
// Codec list, which the codec does not model; it must survive round trips untouched
const CODEC_LIST: [u8; 16] = [
	0x40, 0x52, 0xD1, 0x86, 0x1D, 0x31, 0xD0, 0x11, 0xA3, 0xA4, 0x00, 0xA0, 0xC9, 0x03, 0x48, 0xF6,
];
const DATA: [u8; 16] = [
	0x36, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

fn utf16(text: &str) -> Vec<u8> {
	let mut out: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
	out.extend([0, 0]);
	out
}

fn object(guid: [u8; 16], payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(payload.len() + 24);
	out.extend(guid);
	out.extend((payload.len() as u64 + 24).to_le_bytes());
	out.extend_from_slice(payload);
	out
}

fn unicode_descriptor(name: &str, value: &str) -> Vec<u8> {
	let name = utf16(name);
	let value = utf16(value);

	let mut out = Vec::new();
	out.extend((name.len() as u16).to_le_bytes());
	out.extend_from_slice(&name);
	out.extend(0u16.to_le_bytes()); // Unicode
	out.extend((value.len() as u16).to_le_bytes());
	out.extend_from_slice(&value);
	out
}

fn dword_descriptor(name: &str, value: u32) -> Vec<u8> {
	let name = utf16(name);

	let mut out = Vec::new();
	out.extend((name.len() as u16).to_le_bytes());
	out.extend_from_slice(&name);
	out.extend(3u16.to_le_bytes()); // DWord
	out.extend(4u16.to_le_bytes());
	out.extend(value.to_le_bytes());
	out
}

/// Builds a syntactically valid WMA file: a header carrying every object kind the
/// codec models (plus one it does not), followed by a stand-in data object.
fn minimal_wma() -> Vec<u8> {
	let file_properties = {
		let mut payload = Vec::new();
		payload.extend([0x42; 16]); // file id
		payload.extend(0u64.to_le_bytes()); // file size
		payload.extend(0u64.to_le_bytes()); // creation date
		payload.extend(21u64.to_le_bytes()); // packet count
		payload.extend(650_000_000u64.to_le_bytes()); // play duration: 65s
		payload.extend(620_000_000u64.to_le_bytes()); // send duration
		payload.extend(3000u64.to_le_bytes()); // preroll: 3s
		payload.extend(0x02u32.to_le_bytes()); // flags: seekable
		payload.extend(3200u32.to_le_bytes());
		payload.extend(3200u32.to_le_bytes());
		payload.extend(128_000u32.to_le_bytes()); // max bitrate
		object(FILE_PROPERTIES, &payload)
	};

	let stream_properties = {
		let mut waveformatex = Vec::new();
		waveformatex.extend(0x0161u16.to_le_bytes()); // WMA v2
		waveformatex.extend(2u16.to_le_bytes());
		waveformatex.extend(44_100u32.to_le_bytes());
		waveformatex.extend(16_000u32.to_le_bytes());
		waveformatex.extend(2048u16.to_le_bytes());
		waveformatex.extend(16u16.to_le_bytes());
		waveformatex.extend(0u16.to_le_bytes()); // cbSize

		let mut payload = Vec::new();
		payload.extend(AUDIO_MEDIA);
		payload.extend([0u8; 16]); // error correction type
		payload.extend(0u64.to_le_bytes()); // time offset
		payload.extend((waveformatex.len() as u32).to_le_bytes());
		payload.extend(0u32.to_le_bytes()); // error correction length
		payload.extend(1u16.to_le_bytes()); // flags: stream number 1
		payload.extend(0u32.to_le_bytes()); // reserved
		payload.extend_from_slice(&waveformatex);
		object(STREAM_PROPERTIES, &payload)
	};

	let content_description = {
		let title = utf16("Foo title");
		let author = utf16("Bar artist");
		let empty = utf16("");
		let description = utf16("Qux comment");

		let mut payload = Vec::new();
		for field in [&title, &author, &empty, &description, &empty] {
			payload.extend((field.len() as u16).to_le_bytes());
		}
		payload.extend_from_slice(&title);
		payload.extend_from_slice(&author);
		payload.extend_from_slice(&empty);
		payload.extend_from_slice(&description);
		payload.extend_from_slice(&empty);
		object(CONTENT_DESCRIPTION, &payload)
	};

	let extended_content_description = {
		let mut payload = Vec::new();
		payload.extend(2u16.to_le_bytes());
		payload.extend(unicode_descriptor("WM/AlbumTitle", "Baz album"));
		payload.extend(dword_descriptor("WM/TrackNumber", 7));
		object(EXTENDED_CONTENT_DESCRIPTION, &payload)
	};

	let header_extension = {
		let mut payload = Vec::new();
		payload.extend(HEADER_EXTENSION_RESERVED_1);
		payload.extend(6u16.to_le_bytes());
		payload.extend(0u32.to_le_bytes()); // no nested objects
		object(HEADER_EXTENSION, &payload)
	};

	let codec_list = object(CODEC_LIST, &[0xC0; 10]);

	let children = [
		file_properties,
		stream_properties,
		content_description,
		extended_content_description,
		header_extension,
		codec_list,
	]
	.concat();

	let mut header_payload = Vec::new();
	header_payload.extend(6u32.to_le_bytes());
	header_payload.extend([0x01, 0x02]); // reserved
	header_payload.extend_from_slice(&children);

	let mut file = object(HEADER, &header_payload);
	file.extend(object(DATA, &[0xAB; 64]));
	file
}

fn read_wma(content: Vec<u8>) -> AsfFile {
	let mut reader = Cursor::new(content);
	AsfFile::read_from(&mut reader, ParseOptions::new()).unwrap()
}

#[test]
fn read() {
	let file = read_wma(minimal_wma());

	let tag = file.asf_tag().unwrap();
	assert_eq!(tag.title().as_deref(), Some("Foo title"));
	assert_eq!(tag.artist().as_deref(), Some("Bar artist"));
	assert_eq!(tag.comment().as_deref(), Some("Qux comment"));
	assert_eq!(tag.album().as_deref(), Some("Baz album"));
	assert_eq!(tag.track(), Some(7));

	let properties = file.properties();
	assert_eq!(properties.duration().as_secs(), 62);
	assert_eq!(properties.sample_rate(), 44_100);
	assert_eq!(properties.channels(), 2);
	assert_eq!(properties.audio_bitrate(), 128);
	assert_eq!(properties.overall_bitrate(), 128);
	assert_eq!(properties.bit_depth(), Some(16));
	assert_eq!(properties.codecs(), &[asf_tag::asf::AsfCodec::WmaV2]);
}

#[test]
fn unmodified_save_is_byte_identical() {
	let original = minimal_wma();

	let file = read_wma(original.clone());
	let mut reader = Cursor::new(original.clone());
	// Nothing changed, so the header renders at its original size and nothing shifts
	file.save_to(&mut reader, WriteOptions::new()).unwrap();

	assert_eq!(reader.into_inner(), original);

	// The same holds for the tag-level save path
	let mut reader = Cursor::new(original.clone());
	let tag = read_wma(original.clone()).remove_asf_tag().unwrap();
	tag.save_to(&mut reader, WriteOptions::new()).unwrap();

	assert_eq!(reader.into_inner(), original);
}

#[test]
fn write() {
	let original = minimal_wma();
	let mut reader = Cursor::new(original.clone());

	let mut file = read_wma(original);
	file.asf_tag_mut()
		.unwrap()
		.set_artist(String::from("Much longer replacement artist"));
	file.save_to(&mut reader, WriteOptions::new()).unwrap();

	// Now reread the file
	reader.rewind().unwrap();
	let mut file = AsfFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	assert_eq!(
		file.asf_tag().unwrap().artist().as_deref(),
		Some("Much longer replacement artist")
	);

	// The audio data must have survived the header growth
	let contents = {
		reader.rewind().unwrap();
		let mut contents = Vec::new();
		reader.read_to_end(&mut contents).unwrap();
		contents
	};
	assert_eq!(&contents[contents.len() - 88..], &object(DATA, &[0xAB; 64])[..]);

	// Unrecognized objects are preserved byte-for-byte
	let codec_list = object(CODEC_LIST, &[0xC0; 10]);
	assert!(
		contents
			.windows(codec_list.len())
			.any(|window| window == codec_list)
	);

	// And the second save happens in place, eating into the padding
	let len_after_first_save = contents.len();
	let mut reader = Cursor::new(contents);
	file.asf_tag_mut()
		.unwrap()
		.set_artist(String::from("Even longer replacement artist, still fits"));
	file.save_to(&mut reader, WriteOptions::new()).unwrap();

	assert_eq!(reader.get_ref().len(), len_after_first_save);
}

#[test]
fn remove() {
	let original = minimal_wma();
	let mut reader = Cursor::new(original.clone());

	let mut file = read_wma(original);
	assert!(file.contains_tag());

	file.remove_asf_tag();
	assert!(!file.contains_tag());
	file.save_to(&mut reader, WriteOptions::new()).unwrap();

	reader.rewind().unwrap();
	let file = AsfFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	assert!(file.asf_tag().is_none());

	// Properties are untouched by tag removal
	assert_eq!(file.properties().duration().as_secs(), 62);
}

#[test]
fn save_to_tempfile() {
	let mut temp_file = tempfile::tempfile().unwrap();
	temp_file.write_all(&minimal_wma()).unwrap();
	temp_file.rewind().unwrap();

	let mut file = AsfFile::read_from(&mut temp_file, ParseOptions::new()).unwrap();
	file.asf_tag_mut().unwrap().set_album(String::from("Tempfile album"));

	temp_file.rewind().unwrap();
	file.save_to(&mut temp_file, WriteOptions::new()).unwrap();

	temp_file.rewind().unwrap();
	let file = AsfFile::read_from(&mut temp_file, ParseOptions::new()).unwrap();
	assert_eq!(
		file.asf_tag().unwrap().album().as_deref(),
		Some("Tempfile album")
	);
}

#[test]
fn large_picture_survives_file_round_trip() {
	let original = minimal_wma();
	let mut reader = Cursor::new(original.clone());

	let picture = Picture::unchecked(vec![0x5A; 70_000])
		.pic_type(PictureType::CoverFront)
		.mime_type(MimeType::Jpeg)
		.description("front cover")
		.build();

	let mut file = read_wma(original);
	file.asf_tag_mut().unwrap().set_pictures(vec![picture.clone()]);
	file.save_to(&mut reader, WriteOptions::new()).unwrap();

	reader.rewind().unwrap();
	let file = AsfFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	let tag = file.asf_tag().unwrap();

	// Oversized pictures are routed to the metadata library, not the extended
	// content description
	assert!(tag.descriptor("WM/Picture").is_none());
	assert_eq!(tag.pictures(), vec![picture]);
}

#[test]
fn small_picture_stays_in_content_descriptors() {
	let original = minimal_wma();
	let mut reader = Cursor::new(original.clone());

	let picture = Picture::unchecked(vec![0x5A; 64])
		.pic_type(PictureType::CoverFront)
		.mime_type(MimeType::Png)
		.build();

	let mut file = read_wma(original);
	file.asf_tag_mut().unwrap().set_pictures(vec![picture.clone()]);
	file.save_to(&mut reader, WriteOptions::new()).unwrap();

	reader.rewind().unwrap();
	let file = AsfFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	let tag = file.asf_tag().unwrap();

	assert!(tag.descriptor("WM/Picture").is_some());
	assert_eq!(tag.pictures(), vec![picture]);
}

#[test]
fn corrupted_header_is_rejected() {
	// Wrong leading GUID
	let mut content = minimal_wma();
	content[0] ^= 0xFF;
	let mut reader = Cursor::new(content);
	assert!(AsfFile::read_from(&mut reader, ParseOptions::new()).is_err());

	// Truncated mid-child
	let mut content = minimal_wma();
	content.truncate(100);
	let mut reader = Cursor::new(content);
	assert!(AsfFile::read_from(&mut reader, ParseOptions::new()).is_err());

	// A failed parse must not have written anything
	let original = minimal_wma();
	let mut corrupt = original.clone();
	corrupt[0] ^= 0xFF;
	let mut reader = Cursor::new(corrupt.clone());
	let tag = asf_tag::asf::AsfTag::new();
	assert!(tag.remove_from(&mut reader).is_err());
	assert_eq!(reader.into_inner(), corrupt);
}

#[test]
fn tag_round_trip_through_new_file() {
	// A tag created from scratch, saved, and reread must come back field-for-field
	let original = minimal_wma();
	let mut reader = Cursor::new(original);

	let mut tag = asf_tag::asf::AsfTag::new();
	tag.set_title(String::from("Round trip title"));
	tag.set_artist(String::from("First; Second"));
	tag.set_album(String::from("Round trip album"));
	tag.set_genres(&[String::from("Rock"), String::from("Jazz")]);
	tag.set_disk(3);
	tag.set_disk_total(7);
	tag.set_year(2004);
	tag.set_lyrics(String::from("la la la"));
	tag.set_replay_gain_track_gain(-3.456);
	tag.set_musicbrainz_track_id(String::from("11dcbd4d-bde3-4af0-aedd-43f06b11ba10"));

	tag.save_to(&mut reader, WriteOptions::new()).unwrap();

	reader.rewind().unwrap();
	let file = AsfFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	let reread = file.asf_tag().unwrap();

	assert_eq!(reread.title().as_deref(), Some("Round trip title"));
	assert_eq!(
		reread.performers(),
		vec![String::from("First"), String::from("Second")]
	);
	assert_eq!(reread.album().as_deref(), Some("Round trip album"));
	assert_eq!(
		reread.genres(),
		vec![String::from("Rock"), String::from("Jazz")]
	);
	assert_eq!(reread.disk(), Some(3));
	assert_eq!(reread.disk_total(), Some(7));
	assert_eq!(reread.year(), Some(2004));
	assert_eq!(reread.lyrics(), Some("la la la"));
	assert!((reread.replay_gain_track_gain() - -3.46).abs() < f64::EPSILON);
	assert_eq!(
		reread.musicbrainz_track_id(),
		Some("11dcbd4d-bde3-4af0-aedd-43f06b11ba10")
	);
}
