pub(super) mod genres;
pub(crate) mod write;

use super::content_description::ContentDescriptionObject;
use super::descriptor::DescriptorValue;
use super::extended_content_description::{ContentDescriptor, ExtendedContentDescriptionObject};
use super::metadata_library::{MetadataDescriptor, MetadataLibraryObject};
use crate::config::{ParsingMode, WriteOptions};
use crate::error::AsfError;
use crate::picture::Picture;
use crate::tag::{Accessor, TagExt};
use crate::util::io::{FileLike, Length, Truncate};
use genres::GENRES;

use std::borrow::Cow;
use std::io::Write;

const ALBUM: &[&str] = &["WM/AlbumTitle", "Album"];
const ALBUM_ARTIST: &[&str] = &["WM/AlbumArtist", "AlbumArtist"];
const COMPOSER: &[&str] = &["WM/Composer"];
const GENRE: &[&str] = &["WM/Genre", "WM/GenreID", "Genre"];
const GROUPING: &[&str] = &["WM/ContentGroupDescription"];
const CONDUCTOR: &[&str] = &["WM/Conductor"];
const LYRICS: &[&str] = &["WM/Lyrics"];
const SUBTITLE: &[&str] = &["WM/SubTitle"];
const YEAR: &[&str] = &["WM/Year"];
const BPM: &[&str] = &["WM/BeatsPerMinute"];
const TRACK_NUMBER: &[&str] = &["WM/TrackNumber"];
const PART_OF_SET: &[&str] = &["WM/PartOfSet"];
const PICTURE: &str = "WM/Picture";

// A descriptor value must fit the extended content description's 16-bit length
// field; anything bigger is routed to the metadata library
const MAX_CONTENT_DESCRIPTOR_LEN: usize = 65_535;

// Generates accessors for fields that are a plain preference-ordered string
// descriptor. Writes go to the first name, the rest are cleared.
macro_rules! impl_descriptor_accessor {
	($($name:ident => $names:ident;)+) => {
		paste::paste! {
			$(
				#[doc = "Returns the " $name " string"]
				pub fn $name(&self) -> Option<&str> {
					self.descriptor_string($names)
				}

				#[doc = "Sets the " $name " string"]
				///
				/// An empty (or all-whitespace) value removes the descriptor instead.
				pub fn [<set_ $name>](&mut self, value: String) {
					self.set_descriptor_string($names, value)
				}

				#[doc = "Removes the " $name " string"]
				pub fn [<remove_ $name>](&mut self) {
					self.remove_descriptors($names)
				}
			)+
		}
	}
}

// Same, for the fixed fields of the content description object
macro_rules! impl_content_description_accessor {
	($($name:ident),+ $(,)?) => {
		paste::paste! {
			$(
				#[doc = "Returns the content description `" $name "` field"]
				pub fn $name(&self) -> Option<&str> {
					self.content_description.$name.as_deref()
				}

				#[doc = "Sets the content description `" $name "` field"]
				///
				/// An empty (or all-whitespace) value removes the field instead.
				pub fn [<set_ $name>](&mut self, value: String) {
					let trimmed = value.trim();
					self.content_description.$name = if trimmed.is_empty() {
						None
					} else {
						Some(trimmed.to_owned())
					};
				}

				#[doc = "Removes the content description `" $name "` field"]
				pub fn [<remove_ $name>](&mut self) {
					self.content_description.$name = None;
				}
			)+
		}
	}
}

/// An ASF tag
///
/// A logical view over the three tag storage objects of an ASF header: the
/// legacy content description (title, author, copyright, description, rating),
/// the extended content description (arbitrary `WM/*` descriptors), and the
/// metadata library (oversized and stream-scoped values).
///
/// ## Pictures
///
/// Pictures are stored as `WM/Picture` descriptors. A descriptor value is
/// capped at 65 535 bytes, so whenever **any** picture exceeds that, **all**
/// pictures are written to the metadata library instead.
///
/// # Examples
///
/// ```rust
/// use asf_tag::asf::AsfTag;
/// use asf_tag::tag::Accessor;
///
/// let mut tag = AsfTag::new();
/// tag.set_title(String::from("Foo title"));
///
/// assert_eq!(tag.title().as_deref(), Some("Foo title"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AsfTag {
	pub(crate) content_description: ContentDescriptionObject,
	pub(crate) extended_description: ExtendedContentDescriptionObject,
	pub(crate) metadata_library: MetadataLibraryObject,
}

impl AsfTag {
	/// Create a new empty `AsfTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use asf_tag::asf::AsfTag;
	/// use asf_tag::tag::TagExt;
	///
	/// let tag = AsfTag::new();
	/// assert!(tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the first string descriptor among `names`
	///
	/// `names` is a preference order: all candidates for `names[0]` are
	/// considered before any candidate for `names[1]`.
	pub fn descriptor_string(&self, names: &[&str]) -> Option<&str> {
		self.extended_description
			.get(names)
			.into_iter()
			.find_map(|descriptor| descriptor.value().text())
	}

	/// Write `value` under `names[0]`, clearing every other name in the list
	///
	/// A value that trims to nothing removes all of the names instead.
	pub fn set_descriptor_string(&mut self, names: &[&str], value: String) {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			self.remove_descriptors(names);
			return;
		}

		let value = if trimmed.len() == value.len() {
			value
		} else {
			trimmed.to_owned()
		};

		self.extended_description.set(
			names[0],
			vec![ContentDescriptor::new(
				names[0],
				DescriptorValue::Unicode(value),
			)],
		);

		for name in &names[1..] {
			self.extended_description.remove(name);
		}
	}

	/// Remove every descriptor matching any of `names`
	pub fn remove_descriptors(&mut self, names: &[&str]) {
		for name in names {
			self.extended_description.remove(name);
		}
	}

	/// Get a descriptor by name, in raw form
	pub fn descriptor(&self, name: &str) -> Option<&ContentDescriptor> {
		self.extended_description.get(&[name]).into_iter().next()
	}

	/// Insert a raw descriptor, replacing any with the same name
	pub fn insert_descriptor(&mut self, descriptor: ContentDescriptor) {
		let name = descriptor.name().to_owned();
		self.extended_description.set(&name, vec![descriptor]);
	}

	// `;`-joined list semantics shared by performers/album artists/composers/genres
	fn split_list(value: &str) -> Vec<String> {
		value
			.split(';')
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.map(ToOwned::to_owned)
			.collect()
	}

	fn descriptor_strings(&self, names: &[&str]) -> Vec<String> {
		self.descriptor_string(names)
			.map(Self::split_list)
			.unwrap_or_default()
	}

	fn set_descriptor_strings(&mut self, names: &[&str], values: &[String]) {
		self.set_descriptor_string(names, values.join("; "));
	}

	impl_content_description_accessor!(copyright, rating);

	impl_descriptor_accessor!(
		grouping    => GROUPING;
		conductor   => CONDUCTOR;
		lyrics      => LYRICS;
		subtitle    => SUBTITLE;
	);

	/// Returns the performers, from the content description author field
	pub fn performers(&self) -> Vec<String> {
		self.content_description
			.author
			.as_deref()
			.map(Self::split_list)
			.unwrap_or_default()
	}

	/// Sets the performers, `;`-joined into the author field
	pub fn set_performers(&mut self, performers: &[String]) {
		let joined = performers.join("; ");
		self.content_description.author = if joined.is_empty() {
			None
		} else {
			Some(joined)
		};
	}

	/// Returns the album artists
	pub fn album_artists(&self) -> Vec<String> {
		self.descriptor_strings(ALBUM_ARTIST)
	}

	/// Sets the album artists
	pub fn set_album_artists(&mut self, album_artists: &[String]) {
		self.set_descriptor_strings(ALBUM_ARTIST, album_artists);
	}

	/// Returns the composers
	pub fn composers(&self) -> Vec<String> {
		self.descriptor_strings(COMPOSER)
	}

	/// Sets the composers
	pub fn set_composers(&mut self, composers: &[String]) {
		self.set_descriptor_strings(COMPOSER, composers);
	}

	/// Returns the genres
	///
	/// Both literal genre names and the parenthesized index convention (`"(17)"`
	/// meaning "Rock") are supported, the latter resolved against the standard
	/// genre table.
	pub fn genres(&self) -> Vec<String> {
		self.descriptor_strings(GENRE)
			.into_iter()
			.map(|genre| resolve_genre_id(&genre))
			.collect()
	}

	/// Sets the genres
	pub fn set_genres(&mut self, genres: &[String]) {
		self.set_descriptor_strings(GENRE, genres);
	}

	/// Returns the beats per minute
	pub fn beats_per_minute(&self) -> Option<u32> {
		self.descriptor_u32(BPM)
	}

	/// Sets the beats per minute
	///
	/// The value is stored as a decimal string, the way every known tagger
	/// writes it.
	pub fn set_beats_per_minute(&mut self, bpm: u32) {
		self.set_descriptor_string(BPM, bpm.to_string());
	}

	/// Removes the beats per minute
	pub fn remove_beats_per_minute(&mut self) {
		self.remove_descriptors(BPM);
	}

	fn descriptor_u32(&self, names: &[&str]) -> Option<u32> {
		self.extended_description
			.get(names)
			.into_iter()
			.find_map(|descriptor| descriptor.value().as_u64())
			.and_then(|value| u32::try_from(value).ok())
			.filter(|value| *value != 0)
	}

	// The disc descriptor packs "number/total" into one string. Both halves are
	// re-read before either is written so setting one never clobbers the other.
	fn disk_pair(&self) -> (u32, u32) {
		let Some(text) = self.descriptor_string(PART_OF_SET) else {
			return (0, 0);
		};

		let mut split = text.splitn(2, '/');
		let number = split
			.next()
			.and_then(|part| part.trim().parse::<u32>().ok())
			.unwrap_or(0);
		let total = split
			.next()
			.and_then(|part| part.trim().parse::<u32>().ok())
			.unwrap_or(0);

		(number, total)
	}

	fn set_disk_pair(&mut self, number: u32, total: u32) {
		match (number, total) {
			(0, 0) => self.remove_descriptors(PART_OF_SET),
			(number, 0) => self.set_descriptor_string(PART_OF_SET, number.to_string()),
			(number, total) => {
				self.set_descriptor_string(PART_OF_SET, format!("{number}/{total}"))
			},
		}
	}

	/// Returns all pictures
	///
	/// This concatenates the extended content description pictures and the
	/// metadata library pictures, in that order. Malformed picture records are
	/// silently skipped; they are cosmetic, and common in the wild.
	pub fn pictures(&self) -> Vec<Picture> {
		let small = self
			.extended_description
			.get(&[PICTURE])
			.into_iter()
			.filter_map(|descriptor| descriptor.value().bytes());

		let large = self
			.metadata_library
			.get(&[PICTURE])
			.into_iter()
			.filter_map(|record| record.value().bytes());

		small
			.chain(large)
			.filter_map(|data| Picture::from_asf_bytes(data, ParsingMode::BestAttempt).ok())
			.collect()
	}

	/// Sets the pictures, replacing any existing ones
	///
	/// If any encoded picture exceeds 65 535 bytes, **all** pictures go to the
	/// metadata library; otherwise all go to the extended content description.
	/// The routing is all-or-nothing per write, never mixed.
	pub fn set_pictures(&mut self, pictures: Vec<Picture>) {
		if pictures.is_empty() {
			self.remove_pictures();
			return;
		}

		let encoded: Vec<Vec<u8>> = pictures
			.into_iter()
			.map(|picture| picture.as_asf_bytes())
			.collect();
		let oversized = encoded
			.iter()
			.any(|data| data.len() > MAX_CONTENT_DESCRIPTOR_LEN);

		if oversized {
			self.extended_description.remove(PICTURE);
			self.metadata_library.set(
				PICTURE,
				encoded
					.into_iter()
					.map(|data| {
						MetadataDescriptor::new(0, 0, PICTURE, DescriptorValue::Bytes(data))
					})
					.collect(),
			);
		} else {
			self.metadata_library.remove(PICTURE);
			self.extended_description.set(
				PICTURE,
				encoded
					.into_iter()
					.map(|data| ContentDescriptor::new(PICTURE, DescriptorValue::Bytes(data)))
					.collect(),
			);
		}
	}

	/// Appends a picture to the existing set
	pub fn insert_picture(&mut self, picture: Picture) {
		let mut pictures = self.pictures();
		pictures.push(picture);
		self.set_pictures(pictures);
	}

	/// Removes all pictures, from both storage objects
	pub fn remove_pictures(&mut self) {
		self.extended_description.remove(PICTURE);
		self.metadata_library.remove(PICTURE);
	}

	/// Returns the track ReplayGain gain in dB, [`f64::NAN`] when absent
	pub fn replay_gain_track_gain(&self) -> f64 {
		self.replay_gain_field("ReplayGain/Track")
	}

	/// Sets the track ReplayGain gain, formatted as `"{:.2} dB"`
	///
	/// A NaN value removes the descriptor.
	pub fn set_replay_gain_track_gain(&mut self, gain: f64) {
		self.set_replay_gain_gain("ReplayGain/Track", gain);
	}

	/// Returns the track ReplayGain peak, [`f64::NAN`] when absent
	pub fn replay_gain_track_peak(&self) -> f64 {
		self.replay_gain_field("ReplayGain/Track Peak")
	}

	/// Sets the track ReplayGain peak, formatted as `"{:.6}"`
	///
	/// A NaN value removes the descriptor.
	pub fn set_replay_gain_track_peak(&mut self, peak: f64) {
		self.set_replay_gain_peak("ReplayGain/Track Peak", peak);
	}

	/// Returns the album ReplayGain gain in dB, [`f64::NAN`] when absent
	pub fn replay_gain_album_gain(&self) -> f64 {
		self.replay_gain_field("ReplayGain/Album")
	}

	/// Sets the album ReplayGain gain, formatted as `"{:.2} dB"`
	///
	/// A NaN value removes the descriptor.
	pub fn set_replay_gain_album_gain(&mut self, gain: f64) {
		self.set_replay_gain_gain("ReplayGain/Album", gain);
	}

	/// Returns the album ReplayGain peak, [`f64::NAN`] when absent
	pub fn replay_gain_album_peak(&self) -> f64 {
		self.replay_gain_field("ReplayGain/Album Peak")
	}

	/// Sets the album ReplayGain peak, formatted as `"{:.6}"`
	///
	/// A NaN value removes the descriptor.
	pub fn set_replay_gain_album_peak(&mut self, peak: f64) {
		self.set_replay_gain_peak("ReplayGain/Album Peak", peak);
	}

	fn replay_gain_field(&self, name: &str) -> f64 {
		let Some(text) = self.descriptor_string(&[name]) else {
			return f64::NAN;
		};

		// Gains carry a "dB" suffix, peaks do not
		text.trim()
			.trim_end_matches("dB")
			.trim_end()
			.parse::<f64>()
			.unwrap_or(f64::NAN)
	}

	fn set_replay_gain_gain(&mut self, name: &str, gain: f64) {
		if gain.is_nan() {
			self.remove_descriptors(&[name]);
			return;
		}

		self.set_descriptor_string(&[name], format!("{gain:.2} dB"));
	}

	fn set_replay_gain_peak(&mut self, name: &str, peak: f64) {
		if peak.is_nan() {
			self.remove_descriptors(&[name]);
			return;
		}

		self.set_descriptor_string(&[name], format!("{peak:.6}"));
	}

	impl_descriptor_accessor!(
		musicbrainz_track_id          => MUSICBRAINZ_TRACK_ID;
		musicbrainz_release_track_id  => MUSICBRAINZ_RELEASE_TRACK_ID;
		musicbrainz_album_id          => MUSICBRAINZ_ALBUM_ID;
		musicbrainz_artist_id         => MUSICBRAINZ_ARTIST_ID;
		musicbrainz_album_artist_id   => MUSICBRAINZ_ALBUM_ARTIST_ID;
		musicbrainz_release_group_id  => MUSICBRAINZ_RELEASE_GROUP_ID;
		musicbrainz_disc_id           => MUSICBRAINZ_DISC_ID;
		musicbrainz_release_status    => MUSICBRAINZ_RELEASE_STATUS;
		musicbrainz_release_type      => MUSICBRAINZ_RELEASE_TYPE;
		musicbrainz_release_country   => MUSICBRAINZ_RELEASE_COUNTRY;
		musicip_puid                  => MUSICIP_PUID;
	);
}

const MUSICBRAINZ_TRACK_ID: &[&str] = &["MusicBrainz/Track Id"];
const MUSICBRAINZ_RELEASE_TRACK_ID: &[&str] = &["MusicBrainz/Release Track Id"];
const MUSICBRAINZ_ALBUM_ID: &[&str] = &["MusicBrainz/Album Id"];
const MUSICBRAINZ_ARTIST_ID: &[&str] = &["MusicBrainz/Artist Id"];
const MUSICBRAINZ_ALBUM_ARTIST_ID: &[&str] = &["MusicBrainz/Album Artist Id"];
const MUSICBRAINZ_RELEASE_GROUP_ID: &[&str] = &["MusicBrainz/Release Group Id"];
const MUSICBRAINZ_DISC_ID: &[&str] = &["MusicBrainz/Disc Id"];
const MUSICBRAINZ_RELEASE_STATUS: &[&str] = &["MusicBrainz/Album Status"];
const MUSICBRAINZ_RELEASE_TYPE: &[&str] = &["MusicBrainz/Album Type"];
const MUSICBRAINZ_RELEASE_COUNTRY: &[&str] = &["MusicBrainz/Album Release Country"];
const MUSICIP_PUID: &[&str] = &["MusicIP/PUID"];

// "(17)" -> "Rock"
fn resolve_genre_id(genre: &str) -> String {
	if let Some(id) = genre
		.strip_prefix('(')
		.and_then(|rest| rest.strip_suffix(')'))
	{
		if let Ok(index) = id.parse::<usize>() {
			if let Some(resolved) = GENRES.get(index) {
				return (*resolved).to_owned();
			}
		}
	}

	genre.to_owned()
}

impl Accessor for AsfTag {
	fn title(&self) -> Option<Cow<'_, str>> {
		self.content_description.title.as_deref().map(Cow::Borrowed)
	}

	fn set_title(&mut self, value: String) {
		let trimmed = value.trim();
		self.content_description.title = if trimmed.is_empty() {
			None
		} else {
			Some(trimmed.to_owned())
		};
	}

	fn remove_title(&mut self) {
		self.content_description.title = None;
	}

	fn artist(&self) -> Option<Cow<'_, str>> {
		self.content_description
			.author
			.as_deref()
			.map(Cow::Borrowed)
	}

	fn set_artist(&mut self, value: String) {
		let trimmed = value.trim();
		self.content_description.author = if trimmed.is_empty() {
			None
		} else {
			Some(trimmed.to_owned())
		};
	}

	fn remove_artist(&mut self) {
		self.content_description.author = None;
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.content_description
			.description
			.as_deref()
			.map(Cow::Borrowed)
	}

	fn set_comment(&mut self, value: String) {
		let trimmed = value.trim();
		self.content_description.description = if trimmed.is_empty() {
			None
		} else {
			Some(trimmed.to_owned())
		};
	}

	fn remove_comment(&mut self) {
		self.content_description.description = None;
	}

	fn album(&self) -> Option<Cow<'_, str>> {
		self.descriptor_string(ALBUM).map(Cow::Borrowed)
	}

	fn set_album(&mut self, value: String) {
		self.set_descriptor_string(ALBUM, value);
	}

	fn remove_album(&mut self) {
		self.remove_descriptors(ALBUM);
	}

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.genres().into_iter().next().map(Cow::Owned)
	}

	fn set_genre(&mut self, value: String) {
		self.set_descriptor_string(GENRE, value);
	}

	fn remove_genre(&mut self) {
		self.remove_descriptors(GENRE);
	}

	fn track(&self) -> Option<u32> {
		self.descriptor_u32(TRACK_NUMBER)
	}

	fn set_track(&mut self, value: u32) {
		if value == 0 {
			self.remove_track();
			return;
		}

		self.extended_description.set(
			TRACK_NUMBER[0],
			vec![ContentDescriptor::new(
				TRACK_NUMBER[0],
				DescriptorValue::DWord(value),
			)],
		);
	}

	fn remove_track(&mut self) {
		self.remove_descriptors(TRACK_NUMBER);
	}

	fn disk(&self) -> Option<u32> {
		match self.disk_pair().0 {
			0 => None,
			number => Some(number),
		}
	}

	fn set_disk(&mut self, value: u32) {
		let (_, total) = self.disk_pair();
		self.set_disk_pair(value, total);
	}

	fn remove_disk(&mut self) {
		self.remove_descriptors(PART_OF_SET);
	}

	fn disk_total(&self) -> Option<u32> {
		match self.disk_pair().1 {
			0 => None,
			total => Some(total),
		}
	}

	fn set_disk_total(&mut self, value: u32) {
		let (number, _) = self.disk_pair();
		self.set_disk_pair(number, value);
	}

	fn remove_disk_total(&mut self) {
		let (number, _) = self.disk_pair();
		self.set_disk_pair(number, 0);
	}

	fn year(&self) -> Option<u32> {
		self.descriptor_u32(YEAR)
	}

	fn set_year(&mut self, value: u32) {
		if value == 0 {
			self.remove_year();
			return;
		}

		self.set_descriptor_string(YEAR, value.to_string());
	}

	fn remove_year(&mut self) {
		self.remove_descriptors(YEAR);
	}
}

impl TagExt for AsfTag {
	type Err = AsfError;
	type RefKey<'a> = &'a str;

	fn len(&self) -> usize {
		let content_description_fields = [
			&self.content_description.title,
			&self.content_description.author,
			&self.content_description.copyright,
			&self.content_description.description,
			&self.content_description.rating,
		]
		.iter()
		.filter(|field| field.is_some())
		.count();

		content_description_fields
			+ self.extended_description.descriptors.len()
			+ self.metadata_library.records.len()
	}

	fn contains<'a>(&'a self, key: Self::RefKey<'a>) -> bool {
		!self.extended_description.get(&[key]).is_empty()
			|| !self.metadata_library.get(&[key]).is_empty()
	}

	fn is_empty(&self) -> bool {
		self.content_description.is_empty()
			&& self.extended_description.is_empty()
			&& self.metadata_library.is_empty()
	}

	fn save_to<F>(
		&self,
		file: &mut F,
		write_options: WriteOptions,
	) -> std::result::Result<(), Self::Err>
	where
		F: FileLike,
		AsfError: From<<F as Truncate>::Error>,
		AsfError: From<<F as Length>::Error>,
	{
		write::write_to(Some(self), file, write_options)
	}

	fn dump_to<W: Write>(
		&self,
		writer: &mut W,
		_write_options: WriteOptions,
	) -> std::result::Result<(), Self::Err> {
		writer.write_all(&self.content_description.render())?;
		writer.write_all(&self.extended_description.render()?)?;

		if !self.metadata_library.is_empty() {
			writer.write_all(&self.metadata_library.render()?)?;
		}

		Ok(())
	}

	fn remove_from<F>(&self, file: &mut F) -> std::result::Result<(), Self::Err>
	where
		F: FileLike,
		AsfError: From<<F as Truncate>::Error>,
		AsfError: From<<F as Length>::Error>,
	{
		write::write_to(None, file, WriteOptions::default())
	}

	fn clear(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::AsfTag;
	use super::super::descriptor::DescriptorValue;
	use super::super::extended_content_description::ContentDescriptor;
	use crate::picture::{MimeType, Picture, PictureType};
	use crate::tag::Accessor;

	#[test_log::test]
	fn album_name_preference() {
		let mut tag = AsfTag::new();
		tag.extended_description.set(
			"Album",
			vec![ContentDescriptor::new(
				"Album",
				DescriptorValue::Unicode(String::from("Legacy album")),
			)],
		);

		assert_eq!(tag.album().as_deref(), Some("Legacy album"));

		// Setting writes only "WM/AlbumTitle" and clears "Album"
		tag.set_album(String::from("New album"));

		assert_eq!(tag.album().as_deref(), Some("New album"));
		assert!(tag.extended_description.get(&["Album"]).is_empty());
		assert_eq!(tag.extended_description.get(&["WM/AlbumTitle"]).len(), 1);
	}

	#[test_log::test]
	fn disk_packing() {
		let mut tag = AsfTag::new();

		tag.set_disk(3);
		tag.set_disk_total(7);

		assert_eq!(tag.descriptor_string(&["WM/PartOfSet"]), Some("3/7"));

		// Order must not matter
		let mut reversed = AsfTag::new();
		reversed.set_disk_total(7);
		reversed.set_disk(3);

		assert_eq!(tag, reversed);
		assert_eq!(tag.disk(), Some(3));
		assert_eq!(tag.disk_total(), Some(7));

		// Both zero removes the descriptor entirely
		tag.set_disk(0);
		tag.set_disk_total(0);
		assert_eq!(tag.descriptor_string(&["WM/PartOfSet"]), None);
		assert_eq!(tag.disk(), None);
		assert_eq!(tag.disk_total(), None);
	}

	#[test_log::test]
	fn replay_gain_formatting() {
		let mut tag = AsfTag::new();

		tag.set_replay_gain_track_gain(-3.456);
		assert_eq!(tag.descriptor_string(&["ReplayGain/Track"]), Some("-3.46 dB"));
		assert!((tag.replay_gain_track_gain() - -3.46).abs() < f64::EPSILON);

		tag.set_replay_gain_track_peak(0.987_654_321);
		assert_eq!(
			tag.descriptor_string(&["ReplayGain/Track Peak"]),
			Some("0.987654")
		);

		// NaN means absent
		tag.set_replay_gain_track_gain(f64::NAN);
		assert_eq!(tag.descriptor_string(&["ReplayGain/Track"]), None);
		assert!(tag.replay_gain_track_gain().is_nan());
	}

	#[test_log::test]
	fn genre_id_resolution() {
		let mut tag = AsfTag::new();
		tag.set_genre(String::from("(17); Psytrance; (255)"));

		assert_eq!(
			tag.genres(),
			["Rock", "Psytrance", "(255)"]
				.map(String::from)
				.to_vec()
		);
	}

	#[test_log::test]
	fn large_picture_routing() {
		let small = Picture::unchecked(vec![0xFF; 64])
			.mime_type(MimeType::Jpeg)
			.pic_type(PictureType::CoverFront)
			.description("front")
			.build();
		let large = Picture::unchecked(vec![0xAA; 70_000])
			.mime_type(MimeType::Png)
			.pic_type(PictureType::CoverBack)
			.description("back")
			.build();

		// Small pictures only: everything in the extended content description
		let mut tag = AsfTag::new();
		tag.set_pictures(vec![small.clone()]);
		assert_eq!(tag.extended_description.get(&["WM/Picture"]).len(), 1);
		assert!(tag.metadata_library.get(&["WM/Picture"]).is_empty());

		// One oversized picture drags *all* of them to the metadata library
		tag.set_pictures(vec![small.clone(), large.clone()]);
		assert!(tag.extended_description.get(&["WM/Picture"]).is_empty());
		assert_eq!(tag.metadata_library.get(&["WM/Picture"]).len(), 2);

		// And they all round trip
		assert_eq!(tag.pictures(), vec![small, large]);
	}

	#[test_log::test]
	fn list_fields_split_and_trim() {
		let mut tag = AsfTag::new();
		tag.set_artist(String::from("Foo ; Bar;Baz ;"));

		assert_eq!(
			tag.performers(),
			["Foo", "Bar", "Baz"].map(String::from).to_vec()
		);
	}

	#[test_log::test]
	fn track_coercion() {
		let mut tag = AsfTag::new();

		// Some taggers write the track number as a string
		tag.extended_description.set(
			"WM/TrackNumber",
			vec![ContentDescriptor::new(
				"WM/TrackNumber",
				DescriptorValue::Unicode(String::from("12")),
			)],
		);
		assert_eq!(tag.track(), Some(12));

		// We always write a DWORD
		tag.set_track(7);
		assert_eq!(
			tag.extended_description.get(&["WM/TrackNumber"])[0].value(),
			&DescriptorValue::DWord(7)
		);
	}
}
