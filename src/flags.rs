//! Query modes and option flags
//!
//! The engine takes one integer flag word per query: a mutually exclusive
//! base mode ORed with any number of independent option bits. This module
//! owns the closed set of options, the mode base values, and the fold that
//! combines them.

use libc::c_int;

use crate::ffi;

/// One independent toggle affecting how the engine matches.
///
/// The set is closed: every variant maps to a fixed engine bit in
/// [`MagicOption::bits`], and growing the set means adding a variant there,
/// never inferring bits at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagicOption {
    /// Turn on the engine's own debug output (stderr).
    Debug,

    /// Follow symlinks instead of describing the link itself.
    FollowSymlinks,

    /// Look inside compressed files and report the compression.
    Compress,

    /// Look inside compressed files without reporting the compression.
    CompressTransp,

    /// Look at the contents of block/character devices.
    Devices,

    /// Restore the file's access time after reading it.
    PreserveAtime,
}

impl MagicOption {
    /// The engine bit for this option.
    pub(crate) fn bits(self) -> c_int {
        match self {
            MagicOption::Debug => ffi::MAGIC_DEBUG,
            MagicOption::FollowSymlinks => ffi::MAGIC_SYMLINK,
            MagicOption::Compress => ffi::MAGIC_COMPRESS,
            MagicOption::CompressTransp => ffi::MAGIC_COMPRESS_TRANSP,
            MagicOption::Devices => ffi::MAGIC_DEVICES,
            MagicOption::PreserveAtime => ffi::MAGIC_PRESERVE_ATIME,
        }
    }
}

/// The mutually exclusive base behavior of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryMode {
    /// Plain human-readable description.
    Description,

    /// MIME type and encoding.
    Mime,

    /// Slash-separated list of plausible extensions.
    Extensions,
}

impl QueryMode {
    fn base(self) -> c_int {
        match self {
            QueryMode::Description => ffi::MAGIC_NONE,
            QueryMode::Mime => ffi::MAGIC_MIME,
            QueryMode::Extensions => ffi::MAGIC_EXTENSION,
        }
    }
}

/// Fold a query mode and its options into the engine's flag word.
///
/// Duplicate options are idempotent under OR and never an error.
pub(crate) fn combine(mode: QueryMode, options: &[MagicOption]) -> c_int {
    options
        .iter()
        .fold(mode.base(), |flags, option| flags | option.bits())
}
