//! Format-agnostic tag traits

mod accessor;
mod tag_ext;

pub use accessor::Accessor;
pub use tag_ext::TagExt;

pub(crate) mod private {
	// https://rust-lang.github.io/api-guidelines/future-proofing.html#c-sealed
	pub trait Sealed {}

	impl Sealed for crate::asf::AsfTag {}
}
