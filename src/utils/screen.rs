//! Screen work area detection
//!
//! The character is kept inside the work area of the primary monitor, i.e.
//! the desktop minus the taskbar.

use crate::character::geometry::Rect;
use tracing::debug;

#[cfg(windows)]
use tracing::warn;

#[cfg(windows)]
use windows::Win32::Foundation::RECT;
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    SPI_GETWORKAREA, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
};

/// Work area of the primary monitor, if the platform reports one
#[cfg(windows)]
#[allow(unsafe_code)] // Windows FFI for SystemParametersInfoW
pub fn primary_work_area() -> Option<Rect> {
    let mut area = RECT::default();
    let result = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some((&raw mut area).cast()),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };

    if let Err(e) = result {
        warn!("SystemParametersInfoW(SPI_GETWORKAREA) failed: {}", e);
        return None;
    }

    let width = u32::try_from(area.right - area.left).ok()?;
    let height = u32::try_from(area.bottom - area.top).ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect::new(area.left, area.top, width, height))
}

/// Work area of the primary monitor, if the platform reports one
#[cfg(not(windows))]
pub fn primary_work_area() -> Option<Rect> {
    None
}

/// Primary work area, or `fallback` when it cannot be queried
pub fn work_area_or(fallback: Rect) -> Rect {
    if let Some(area) = primary_work_area() {
        debug!(
            "Work area {}x{} at ({}, {})",
            area.width, area.height, area.x, area.y
        );
        area
    } else {
        debug!(
            "Work area unavailable, using configured {}x{}",
            fallback.width, fallback.height
        );
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_area_is_non_empty() {
        let area = work_area_or(Rect::new(0, 0, 800, 600));
        assert!(area.width > 0);
        assert!(area.height > 0);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_fallback_used_off_windows() {
        let fallback = Rect::new(10, 20, 800, 600);
        assert_eq!(work_area_or(fallback), fallback);
    }
}
