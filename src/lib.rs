//! filemagic: file type identification via the magic engine
//!
//! Safe bindings to libmagic, the byte-signature classification engine
//! behind `file(1)`. One [`Magic`] session wraps one engine cookie and
//! answers three kinds of question about a file or an in-memory buffer:
//! a human-readable description, a MIME type/encoding pair, or the set of
//! plausible file extensions.
//!
//! ```no_run
//! use filemagic::{Magic, MagicOption};
//!
//! # fn main() -> filemagic::Result<()> {
//! let mut magic = Magic::open_default()?;
//!
//! let description = magic.describe_path("/etc/hosts", &[])?;
//! let mime = magic.mime_path("/etc/hosts", &[MagicOption::FollowSymlinks])?;
//! let extensions = magic.extensions_buffer(&[0xFF, 0xD8, 0xFF, 0xE0], &[])?;
//! # let _ = (description, mime, extensions);
//! # Ok(())
//! # }
//! ```
//!
//! Sessions are cheap but stateful: queries take `&mut self`, and callers
//! wanting parallelism open one session per thread rather than sharing one.

pub mod error;
pub mod ffi;
pub mod flags;

mod extensions;
mod magic;

pub use error::{MagicError, Result};
pub use flags::MagicOption;
pub use magic::{version, Magic};
