#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `Deskmate` unit tests.
//!
//! Temp directories, APPDATA redirection, and PNG sprite fixtures.
//! Only compiled during testing (`#[cfg(test)]`).

use image::{Rgba, RgbaImage};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify the APPDATA environment variable.
static APPDATA_LOCK: Mutex<()> = Mutex::new(());

/// Create a temporary test directory that cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a solid-colour PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .unwrap();
}

/// Write a PNG that is transparent except for an opaque block.
///
/// The block spans `x0..x1` × `y0..y1`.
pub fn write_png_with_block(
    path: &Path,
    size: (u32, u32),
    block: (u32, u32, u32, u32),
    color: [u8; 4],
) {
    let (x0, y0, x1, y1) = block;
    let image = RgbaImage::from_fn(size.0, size.1, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    image.save(path).unwrap();
}

/// RAII guard that sets the APPDATA environment variable for a test scope
/// and restores the original value when dropped.
///
/// The `APPDATA_LOCK` mutex is held for the guard's lifetime, so tests that
/// redirect APPDATA run one at a time while all other tests stay parallel.
pub struct AppdataGuard {
    original: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding APPDATA_LOCK"
)]
impl AppdataGuard {
    /// Create a new guard that sets APPDATA to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = APPDATA_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var("APPDATA").ok();
        // SAFETY: APPDATA_LOCK is held, so no other guarded test reads or
        // writes APPDATA concurrently; the original value is restored on drop.
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding APPDATA_LOCK"
)]
impl Drop for AppdataGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held by `self._lock` while this runs.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var("APPDATA", original);
            }
        } else {
            unsafe {
                std::env::remove_var("APPDATA");
            }
        }
    }
}
