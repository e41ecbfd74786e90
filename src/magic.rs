//! The Magic session handle
//!
//! One [`Magic`] owns exactly one engine cookie from open to close. Every
//! query overwrites the cookie's flag word and then issues the foreign
//! call, and every foreign result passes through the same two sentinel
//! checks before a caller ever sees it. The raw flag register is never
//! exposed.

use std::collections::HashSet;
use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt; // Required for handling paths as bytes
use std::path::Path;
use std::ptr;

use libc::{c_char, c_int, c_void, size_t};

use crate::error::{MagicError, Result};
use crate::extensions::split_extensions;
use crate::ffi;
use crate::flags::{combine, MagicOption, QueryMode};

/// A live session against the magic engine.
///
/// Construction opens a cookie and loads a signature database into it;
/// dropping the handle closes the cookie. Queries take `&mut self` because
/// the flag word they write belongs to the session, not to the call: two
/// overlapping queries on one session would race on it. Open one session
/// per concurrent caller instead.
///
/// ```no_run
/// use filemagic::{Magic, MagicOption};
///
/// # fn main() -> filemagic::Result<()> {
/// let mut magic = Magic::open_default()?;
/// let mime = magic.mime_path("/etc/hosts", &[MagicOption::FollowSymlinks])?;
/// println!("{}", mime);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Magic {
    cookie: ffi::magic_t,
}

// SAFETY: the cookie has no thread affinity and may move between threads;
// queries on it must be serialized, which `&mut self` already guarantees.
// Deliberately not Sync.
unsafe impl Send for Magic {}

impl Magic {
    /// Open a session and load the given signature databases into it.
    ///
    /// Blank entries are ignored and the rest are joined with `:` for the
    /// engine. An empty (or all-blank) list loads the engine's compiled-in
    /// default database.
    ///
    /// Fails with [`MagicError::EngineUnavailable`] when no cookie can be
    /// allocated, or [`MagicError::DatabaseLoadFailed`] when the databases
    /// cannot be loaded.
    pub fn open(database_paths: &[&str]) -> Result<Self> {
        let cookie = unsafe { ffi::magic_open(ffi::MAGIC_NONE) };
        if cookie.is_null() {
            return Err(MagicError::EngineUnavailable);
        }

        // The handle owns the cookie from here on, so an early return below
        // still closes it.
        let magic = Magic { cookie };

        let joined = combine_paths(database_paths)?;
        let path_arg = joined
            .as_ref()
            .map_or(ptr::null(), |paths| paths.as_ptr());

        let status = unsafe { ffi::magic_load(magic.cookie, path_arg) };
        magic.check_status(status, MagicError::DatabaseLoadFailed)?;

        tracing::debug!(
            "[Magic] Session open, database = {}",
            joined
                .as_deref()
                .map(|paths| paths.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<default>".to_string())
        );

        Ok(magic)
    }

    /// Open a session against the engine's compiled-in default database.
    pub fn open_default() -> Result<Self> {
        Self::open(&[])
    }

    /// Human-readable description of the file at `path`.
    pub fn describe_path(&mut self, path: impl AsRef<Path>, options: &[MagicOption]) -> Result<String> {
        self.query_path(QueryMode::Description, path.as_ref(), options)
    }

    /// Human-readable description of an in-memory buffer.
    ///
    /// Empty buffers are valid input; whatever the engine makes of them
    /// (usually "empty") is the answer.
    pub fn describe_buffer(&mut self, content: &[u8], options: &[MagicOption]) -> Result<String> {
        self.query_buffer(QueryMode::Description, content, options)
    }

    /// MIME type and encoding of the file at `path`, e.g.
    /// `text/plain; charset=us-ascii`.
    pub fn mime_path(&mut self, path: impl AsRef<Path>, options: &[MagicOption]) -> Result<String> {
        self.query_path(QueryMode::Mime, path.as_ref(), options)
    }

    /// MIME type and encoding of an in-memory buffer.
    pub fn mime_buffer(&mut self, content: &[u8], options: &[MagicOption]) -> Result<String> {
        self.query_buffer(QueryMode::Mime, content, options)
    }

    /// Plausible file extensions for the file at `path`.
    pub fn extensions_path(
        &mut self,
        path: impl AsRef<Path>,
        options: &[MagicOption],
    ) -> Result<HashSet<String>> {
        self.query_path(QueryMode::Extensions, path.as_ref(), options)
            .map(|raw| split_extensions(&raw))
    }

    /// Plausible file extensions for an in-memory buffer.
    pub fn extensions_buffer(
        &mut self,
        content: &[u8],
        options: &[MagicOption],
    ) -> Result<HashSet<String>> {
        self.query_buffer(QueryMode::Extensions, content, options)
            .map(|raw| split_extensions(&raw))
    }

    /// Release the session explicitly.
    ///
    /// Dropping the handle does the same thing; this form only makes the
    /// release visible at the call site. Either way the cookie is closed
    /// exactly once, and the handle cannot be used afterwards:
    ///
    /// ```compile_fail
    /// use filemagic::Magic;
    ///
    /// let mut magic = Magic::open_default().unwrap();
    /// magic.close();
    /// magic.describe_buffer(b"hello", &[]).unwrap(); // moved: does not compile
    /// ```
    pub fn close(self) {}

    /// The gate every path query passes through: overwrite the session's
    /// flag word, then issue the foreign call.
    fn query_path(&mut self, mode: QueryMode, path: &Path, options: &[MagicOption]) -> Result<String> {
        let c_path = existing_path(path)?;
        let flags = combine(mode, options);

        let _ = unsafe { ffi::magic_setflags(self.cookie, flags) };
        tracing::trace!("[Magic] Query path={} flags={:#x}", path.display(), flags);

        let answer = unsafe { ffi::magic_file(self.cookie, c_path.as_ptr()) };
        self.check_answer(answer)
    }

    /// Buffer twin of [`Magic::query_path`]. The buffer is handed to the
    /// engine by reference with its exact length, never copied.
    fn query_buffer(&mut self, mode: QueryMode, content: &[u8], options: &[MagicOption]) -> Result<String> {
        let flags = combine(mode, options);

        let _ = unsafe { ffi::magic_setflags(self.cookie, flags) };
        tracing::trace!("[Magic] Query buffer len={} flags={:#x}", content.len(), flags);

        let answer = unsafe {
            ffi::magic_buffer(
                self.cookie,
                content.as_ptr() as *const c_void,
                content.len() as size_t,
            )
        };
        self.check_answer(answer)
    }

    /// Integer-shaped engine results: non-zero is failure, explained by the
    /// engine's last error on this cookie.
    fn check_status(&self, status: c_int, err: impl FnOnce(String) -> MagicError) -> Result<()> {
        if status != 0 {
            return Err(err(self.last_error()));
        }
        Ok(())
    }

    /// Pointer-shaped engine results: null is failure. On success the
    /// engine-owned string is copied out before the next call can
    /// invalidate it.
    fn check_answer(&self, answer: *const c_char) -> Result<String> {
        if answer.is_null() {
            return Err(MagicError::QueryFailed(self.last_error()));
        }
        let answer = unsafe { CStr::from_ptr(answer) };
        Ok(answer.to_string_lossy().into_owned())
    }

    /// The engine's last-error text for this cookie.
    fn last_error(&self) -> String {
        let err = unsafe { ffi::magic_error(self.cookie) };
        if err.is_null() {
            return "unknown magic error".to_string();
        }
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}

impl Drop for Magic {
    fn drop(&mut self) {
        unsafe { ffi::magic_close(self.cookie) };
        tracing::trace!("[Magic] Session closed");
    }
}

/// Version number of the linked engine, e.g. 545 for file 5.45.
pub fn version() -> i32 {
    unsafe { ffi::magic_version() }
}

/// Join non-blank database paths with `:` into the engine's single path
/// argument. `None` means "use the default database".
fn combine_paths(database_paths: &[&str]) -> Result<Option<CString>> {
    let joined = database_paths
        .iter()
        .filter(|path| !path.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(":");

    if joined.is_empty() {
        return Ok(None);
    }

    CString::new(joined)
        .map(Some)
        .map_err(|_| MagicError::InvalidInput("database path contains a NUL byte".to_string()))
}

/// Path precondition: non-blank and present on the filesystem, checked
/// before the engine is ever invoked.
fn existing_path(path: &Path) -> Result<CString> {
    if path.to_string_lossy().trim().is_empty() || !path.exists() {
        return Err(MagicError::InvalidInput(format!(
            "No such file or directory: {}",
            path.display()
        )));
    }

    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        MagicError::InvalidInput(format!("Path contains a NUL byte: {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// A small JFIF header: enough signature bytes for the engine to
    /// commit to JPEG.
    const JPEG_HEADER: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
    ];

    fn text_fixture() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        writeln!(file, "Hello, magic world.").expect("write temp file");
        file
    }

    #[test]
    fn test_open_with_default_database() {
        Magic::open(&[]).expect("default database should load");
    }

    #[test]
    fn test_open_ignores_blank_database_paths() {
        Magic::open(&["", "   "]).expect("blank paths fall back to the default database");
    }

    #[test]
    fn test_open_with_missing_database_fails() {
        let err = Magic::open(&["/no/such/database.mgc"]).unwrap_err();
        assert!(matches!(err, MagicError::DatabaseLoadFailed(_)));
    }

    #[test]
    fn test_describe_text_file() {
        let file = text_fixture();
        let mut magic = Magic::open_default().expect("open");

        let description = magic.describe_path(file.path(), &[]).expect("describe");
        assert!(!description.is_empty());
        assert!(description.contains("text"), "got: {}", description);
    }

    #[test]
    fn test_mime_contains_type_subtype_separator() {
        let file = text_fixture();
        let mut magic = Magic::open_default().expect("open");

        let mime = magic.mime_path(file.path(), &[]).expect("mime");
        assert!(mime.contains('/'), "got: {}", mime);
        assert!(mime.starts_with("text/"), "got: {}", mime);
    }

    #[test]
    fn test_missing_path_is_rejected_before_the_engine_runs() {
        let mut magic = Magic::open_default().expect("open");

        let err = magic
            .describe_path("/definitely/not/here.bin", &[])
            .unwrap_err();
        assert!(matches!(err, MagicError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_path_is_rejected() {
        let mut magic = Magic::open_default().expect("open");

        let err = magic.describe_path("   ", &[]).unwrap_err();
        assert!(matches!(err, MagicError::InvalidInput(_)));
    }

    #[test]
    fn test_query_failure_does_not_poison_the_session() {
        let file = text_fixture();
        let mut magic = Magic::open_default().expect("open");

        assert!(magic.describe_path("/definitely/not/here.bin", &[]).is_err());
        magic
            .describe_path(file.path(), &[])
            .expect("session still usable after a failed query");
    }

    #[test]
    fn test_describe_buffer() {
        let mut magic = Magic::open_default().expect("open");

        let description = magic
            .describe_buffer(b"Hello, magic world.\n", &[])
            .expect("describe buffer");
        assert!(description.contains("text"), "got: {}", description);
    }

    #[test]
    fn test_empty_buffer_is_valid_input() {
        let mut magic = Magic::open_default().expect("open");

        let description = magic.describe_buffer(&[], &[]).expect("empty buffer");
        assert!(description.contains("empty"), "got: {}", description);
    }

    #[test]
    fn test_mime_buffer_identifies_jpeg() {
        let mut magic = Magic::open_default().expect("open");

        let mime = magic.mime_buffer(JPEG_HEADER, &[]).expect("mime buffer");
        assert!(mime.starts_with("image/jpeg"), "got: {}", mime);
    }

    #[test]
    fn test_extensions_buffer_yields_jpeg_set() {
        let mut magic = Magic::open_default().expect("open");

        let extensions = magic
            .extensions_buffer(JPEG_HEADER, &[])
            .expect("extensions buffer");
        assert!(
            extensions.contains("jpg") || extensions.contains("jpeg"),
            "got: {:?}",
            extensions
        );
    }

    #[test]
    fn test_extensions_path_on_text_fixture() {
        let file = text_fixture();
        let mut magic = Magic::open_default().expect("open");

        // Plain text has no extension entry in most databases; the point is
        // that extension mode answers (possibly with an empty set) rather
        // than erroring on an ordinary file.
        match magic.extensions_path(file.path(), &[]) {
            Ok(extensions) => {
                assert!(!extensions.contains(""));
            }
            Err(MagicError::QueryFailed(_)) => {}
            Err(other) => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn test_flags_are_overwritten_not_merged_between_queries() {
        let file = text_fixture();
        let mut magic = Magic::open_default().expect("open");

        let mime = magic.mime_path(file.path(), &[]).expect("mime");
        assert!(mime.contains("charset="), "got: {}", mime);

        // If the MIME bits leaked into the next query, the description
        // would come back as a type/encoding pair.
        let description = magic.describe_path(file.path(), &[]).expect("describe");
        assert!(!description.contains("charset="), "got: {}", description);
    }

    #[test]
    fn test_duplicate_options_behave_like_one() {
        let file = text_fixture();
        let mut magic = Magic::open_default().expect("open");

        let once = magic
            .describe_path(file.path(), &[MagicOption::FollowSymlinks])
            .expect("describe");
        let twice = magic
            .describe_path(
                file.path(),
                &[MagicOption::FollowSymlinks, MagicOption::FollowSymlinks],
            )
            .expect("describe");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_engine_version_is_positive() {
        assert!(version() > 0);
    }
}
