//! Parse, edit, and write metadata in ASF (WMA/WMV) containers.
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> asf_tag::error::Result<()> {
//! use asf_tag::asf::AsfFile;
//! use asf_tag::config::ParseOptions;
//! use asf_tag::prelude::*;
//!
//! let mut file = std::fs::File::open("test.wma")?;
//! let wma_file = AsfFile::read_from(&mut file, ParseOptions::new())?;
//!
//! println!("Duration: {:?}", wma_file.properties().duration());
//!
//! if let Some(tag) = wma_file.asf_tag() {
//! 	println!("Title: {:?}", tag.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing tags
//!
//! ```rust,no_run
//! # fn main() -> asf_tag::error::Result<()> {
//! use asf_tag::asf::AsfTag;
//! use asf_tag::config::WriteOptions;
//! use asf_tag::prelude::*;
//!
//! let mut tag = AsfTag::new();
//! tag.set_title(String::from("Foo title"));
//! tag.set_artist(String::from("Bar artist"));
//!
//! tag.save_to_path("test.wma", WriteOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Important notes
//!
//! The header object is re-parsed from the file on every save, so a long-lived
//! [`AsfFile`](asf::AsfFile) never holds stale byte offsets. Concurrent writers
//! to the same file are out of contract; callers must serialize access.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod asf;
pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod picture;
pub mod tag;
mod util;

pub use util::io;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use asf_tag::prelude::*;
	//! ```

	pub use crate::file::AudioFile;
	pub use crate::tag::{Accessor, TagExt};
}
