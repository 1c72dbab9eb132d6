use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Unavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Destination for "copy" actions on the host running the service.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard of the machine the service runs on.
///
/// On X11 and Wayland the copied text is only served while the handle is
/// alive, so it is opened on first use and kept for the life of the process.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

        let mut clipboard = match handle.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };

        let copied = clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()));
        *handle = Some(clipboard);
        copied
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records everything copied instead of touching the desktop.
    #[derive(Debug, Default)]
    pub struct MemoryClipboard {
        pub copied: Mutex<Vec<String>>,
    }

    impl Clipboard for MemoryClipboard {
        fn copy(&self, text: &str) -> Result<(), ClipboardError> {
            self.copied
                .lock()
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?
                .push(text.to_owned());
            Ok(())
        }
    }

    /// Behaves like a headless host with no clipboard.
    #[derive(Debug, Default)]
    pub struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn copy(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clipboard_keeps_handle_after_copy() {
        let clipboard = SystemClipboard::default();

        match clipboard.copy("kept-alive") {
            Ok(()) => assert!(clipboard.handle.lock().unwrap().is_some()),
            // Headless hosts: nothing is cached so a later copy retries.
            Err(ClipboardError::Unavailable(_)) => {
                assert!(clipboard.handle.lock().unwrap().is_none())
            }
            Err(ClipboardError::CopyFailed(_)) => {
                assert!(clipboard.handle.lock().unwrap().is_some())
            }
        }
    }
}
