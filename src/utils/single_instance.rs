//! Single instance enforcement
//!
//! Two characters on one desktop would fight over the same hotkeys, so only
//! one process may run. Uses a Windows named mutex.

use crate::error::Result;

#[cfg(windows)]
use crate::error::DeskmateError;

#[cfg(windows)]
use windows::Win32::Foundation::{CloseHandle, HANDLE};
#[cfg(windows)]
use windows::Win32::System::Threading::{CreateMutexW, OpenMutexW, SYNCHRONIZATION_SYNCHRONIZE};

/// Name of the process-wide mutex
#[cfg(windows)]
const MUTEX_NAME: &str = "Global\\Deskmate_SingleInstance_Mutex";

/// Single instance guard using a Windows named mutex (released on drop)
#[cfg(windows)]
pub struct SingleInstanceGuard {
    mutex_handle: HANDLE,
}

#[cfg(windows)]
impl SingleInstanceGuard {
    /// Acquire the guard
    ///
    /// # Errors
    ///
    /// `AlreadyRunning` if another Deskmate process holds the mutex.
    #[allow(unsafe_code)] // Windows FFI for mutex
    pub fn new() -> Result<Self> {
        use tracing::{debug, warn};
        use windows::core::HSTRING;

        let mutex_name = HSTRING::from(MUTEX_NAME);

        unsafe {
            if let Ok(existing_handle) = OpenMutexW(SYNCHRONIZATION_SYNCHRONIZE, false, &mutex_name)
            {
                warn!("Another instance of Deskmate is already running");
                let _ = CloseHandle(existing_handle);
                Err(DeskmateError::AlreadyRunning)
            } else {
                let mutex_handle = CreateMutexW(None, true, &mutex_name)?;
                debug!("Single instance mutex created");
                Ok(Self { mutex_handle })
            }
        }
    }
}

#[cfg(windows)]
impl Drop for SingleInstanceGuard {
    #[allow(unsafe_code)] // Windows FFI for mutex cleanup
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.mutex_handle);
        }
        tracing::debug!("Single instance mutex released");
    }
}

/// Stub implementation for non-Windows platforms
#[cfg(not(windows))]
pub struct SingleInstanceGuard;

#[cfg(not(windows))]
impl SingleInstanceGuard {
    /// Acquire the guard (always succeeds off Windows)
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}
