//! Raw libmagic interface
//!
//! The complete foreign surface of the magic engine, declared in one place:
//! every `magic_*` entry point and the full flag/parameter constant table
//! mirrored from `magic.h`. The link name of the engine library is fixed
//! here and nowhere else.
//!
//! Nothing in this module validates anything. Use [`crate::Magic`] unless
//! you are building your own safe layer on top.

#![allow(non_camel_case_types)]

use libc::{c_char, c_int, c_void, size_t};

/// Opaque engine cookie. Only ever handled behind a pointer.
#[repr(C)]
pub struct MagicSet {
    _opaque: [u8; 0],
}

/// The engine's `magic_t`: a raw pointer to one live cookie.
pub type magic_t = *mut MagicSet;

/// No flags
pub const MAGIC_NONE: c_int = 0x0000000;

/// Turn on debugging
pub const MAGIC_DEBUG: c_int = 0x0000001;

/// Follow symlinks
pub const MAGIC_SYMLINK: c_int = 0x0000002;

/// Check inside compressed files
pub const MAGIC_COMPRESS: c_int = 0x0000004;

/// Look at the contents of devices
pub const MAGIC_DEVICES: c_int = 0x0000008;

/// Return the MIME type
pub const MAGIC_MIME_TYPE: c_int = 0x0000010;

/// Return all matches
pub const MAGIC_CONTINUE: c_int = 0x0000020;

/// Print warnings to stderr
pub const MAGIC_CHECK: c_int = 0x0000040;

/// Restore access time on exit
pub const MAGIC_PRESERVE_ATIME: c_int = 0x0000080;

/// Don't convert unprintable chars
pub const MAGIC_RAW: c_int = 0x0000100;

/// Handle ENOENT etc as real errors
pub const MAGIC_ERROR: c_int = 0x0000200;

/// Return the MIME encoding
pub const MAGIC_MIME_ENCODING: c_int = 0x0000400;

/// Return both the MIME type and encoding
pub const MAGIC_MIME: c_int = MAGIC_MIME_TYPE | MAGIC_MIME_ENCODING;

/// Return the Apple creator/type
pub const MAGIC_APPLE: c_int = 0x0000800;

/// Return a /-separated list of extensions
pub const MAGIC_EXTENSION: c_int = 0x1000000;

/// Check inside compressed files but don't report compression
pub const MAGIC_COMPRESS_TRANSP: c_int = 0x2000000;

/// Any non-description output
pub const MAGIC_NODESC: c_int = MAGIC_EXTENSION | MAGIC_MIME | MAGIC_APPLE;

/// Don't check for compressed files
pub const MAGIC_NO_CHECK_COMPRESS: c_int = 0x0001000;

/// Don't check for tar files
pub const MAGIC_NO_CHECK_TAR: c_int = 0x0002000;

/// Don't check magic entries
pub const MAGIC_NO_CHECK_SOFT: c_int = 0x0004000;

/// Don't check application type
pub const MAGIC_NO_CHECK_APPTYPE: c_int = 0x0008000;

/// Don't check for elf details
pub const MAGIC_NO_CHECK_ELF: c_int = 0x0010000;

/// Don't check for text files
pub const MAGIC_NO_CHECK_TEXT: c_int = 0x0020000;

/// Don't check for cdf files
pub const MAGIC_NO_CHECK_CDF: c_int = 0x0040000;

/// Don't check for CSV files
pub const MAGIC_NO_CHECK_CSV: c_int = 0x0080000;

/// Don't check tokens
pub const MAGIC_NO_CHECK_TOKENS: c_int = 0x0100000;

/// Don't check text encodings
pub const MAGIC_NO_CHECK_ENCODING: c_int = 0x0200000;

/// Don't check for JSON files
pub const MAGIC_NO_CHECK_JSON: c_int = 0x0400000;

pub const MAGIC_PARAM_INDIR_MAX: c_int = 0;
pub const MAGIC_PARAM_NAME_MAX: c_int = 1;
pub const MAGIC_PARAM_ELF_PHNUM_MAX: c_int = 2;
pub const MAGIC_PARAM_ELF_SHNUM_MAX: c_int = 3;
pub const MAGIC_PARAM_ELF_NOTES_MAX: c_int = 4;
pub const MAGIC_PARAM_REGEX_MAX: c_int = 5;
pub const MAGIC_PARAM_BYTES_MAX: c_int = 6;

#[link(name = "magic")]
extern "C" {
    /// Allocate a cookie, or NULL on allocation failure.
    pub fn magic_open(flags: c_int) -> magic_t;

    /// Close the cookie and free every resource attached to it.
    pub fn magic_close(cookie: magic_t);

    /// Textual explanation of the last error on this cookie, or NULL if
    /// there was none.
    pub fn magic_error(cookie: magic_t) -> *const c_char;

    /// Last OS error number hit by a system call on behalf of this cookie.
    pub fn magic_errno(cookie: magic_t) -> c_int;

    /// Describe the contents of `path`, or NULL on error. A NULL path
    /// means stdin.
    pub fn magic_file(cookie: magic_t, path: *const c_char) -> *const c_char;

    /// Describe the first `length` bytes of `buffer`, or NULL on error.
    pub fn magic_buffer(cookie: magic_t, buffer: *const c_void, length: size_t) -> *const c_char;

    /// Current flag word of the cookie.
    pub fn magic_getflags(cookie: magic_t) -> c_int;

    /// Overwrite the cookie's flag word. Returns -1 if a flag is not
    /// supported on this platform (PRESERVE_ATIME on some systems).
    pub fn magic_setflags(cookie: magic_t, flags: c_int) -> c_int;

    /// Version of the linked engine (MAGIC_VERSION from magic.h).
    pub fn magic_version() -> c_int;

    /// Load the colon-separated database list, or the compiled-in default
    /// when `path` is NULL. Must run before any query. Non-zero on failure.
    pub fn magic_load(cookie: magic_t, path: *const c_char) -> c_int;

    /// Load databases from in-memory buffers instead of the filesystem,
    /// for environments where the engine cannot touch disk.
    pub fn magic_load_buffers(
        cookie: magic_t,
        buffers: *mut *mut c_void,
        sizes: *mut size_t,
        nbuffers: size_t,
    ) -> c_int;

    /// Compile the colon-separated database list (NULL for the default)
    /// into `.mgc` form next to each source file. 0 on success.
    pub fn magic_compile(cookie: magic_t, path: *const c_char) -> c_int;

    /// Check the validity of entries in the colon-separated database list
    /// (NULL for the default). 0 on success.
    pub fn magic_check(cookie: magic_t, path: *const c_char) -> c_int;

    /// Dump all patterns of the colon-separated database list to stdout.
    pub fn magic_list(cookie: magic_t, path: *const c_char) -> c_int;

    /// Set one of the MAGIC_PARAM_* engine limits.
    pub fn magic_setparam(cookie: magic_t, param: c_int, value: *const c_void) -> c_int;

    /// Read one of the MAGIC_PARAM_* engine limits.
    pub fn magic_getparam(cookie: magic_t, param: c_int, value: *mut c_void) -> c_int;
}
