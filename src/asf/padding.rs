use super::guid::constants;
use super::object::{OBJECT_HEADER_LEN, render_object};

/// A padding object
///
/// The payload is all zeroes; only the size matters. Padding lets the header be
/// rewritten in place after metadata edits without shifting the data packets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PaddingObject {
	/// Payload size, *excluding* the 24-byte object frame
	pub(crate) size: u64,
}

impl PaddingObject {
	pub(crate) fn from_payload_size(size: u64) -> Self {
		Self { size }
	}

	/// Construct from a total on-disk size (frame included)
	pub(crate) fn from_total_size(total: u64) -> Self {
		Self {
			size: total.saturating_sub(OBJECT_HEADER_LEN),
		}
	}

	pub(crate) fn render(&self) -> Vec<u8> {
		render_object(constants::PADDING, &vec![0; self.size as usize])
	}
}

#[cfg(test)]
mod tests {
	use super::PaddingObject;

	#[test_log::test]
	fn render_size() {
		let padding = PaddingObject::from_payload_size(4096);
		assert_eq!(padding.render().len(), 4096 + 24);

		let from_total = PaddingObject::from_total_size(4120);
		assert_eq!(from_total, padding);
	}
}
