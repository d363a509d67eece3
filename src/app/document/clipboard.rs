// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/clipboard.rs
//
// Clipboard placement of the final banner.

use std::time::Duration;

use image::RgbaImage;

use crate::error::ClipboardError;

/// Destination for a copied raster.
pub trait ClipboardSink {
    /// Place `raster` on the clipboard as an image.
    fn set_image(&mut self, raster: &RgbaImage) -> Result<(), ClipboardError>;
}

/// How long a copy keeps serving the clipboard.
///
/// On Linux the copied data lives in this process until another application
/// takes ownership of the clipboard; a process that exits right after
/// copying takes the image with it unless a clipboard manager grabbed it.
/// Other platforms hand the data to the system and ignore the hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardHold {
    /// Return as soon as the image is offered.
    #[default]
    None,
    /// Block until another application takes the clipboard.
    UntilReplaced,
    /// Block until replaced or until the timeout elapses.
    For(Duration),
}

impl ClipboardHold {
    /// `None` waits until replaced, zero seconds does not wait at all.
    pub fn from_secs(secs: Option<u64>) -> Self {
        match secs {
            None => Self::UntilReplaced,
            Some(0) => Self::None,
            Some(secs) => Self::For(Duration::from_secs(secs)),
        }
    }
}

/// The platform clipboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    hold: ClipboardHold,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(map_error)?;
        Ok(Self {
            inner,
            hold: ClipboardHold::None,
        })
    }

    /// Keep serving copied images according to `hold`. With anything but
    /// [`ClipboardHold::None`], `set_image` blocks on Linux.
    pub fn with_hold(mut self, hold: ClipboardHold) -> Self {
        self.hold = hold;
        self
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn set_image(&mut self, raster: &RgbaImage) -> Result<(), ClipboardError> {
        let (width, height) = raster.dimensions();
        let image = arboard::ImageData {
            width: width as usize,
            height: height as usize,
            bytes: std::borrow::Cow::Borrowed(raster.as_raw()),
        };
        offer(&mut self.inner, image, self.hold).map_err(map_error)
    }
}

#[cfg(all(feature = "clipboard", target_os = "linux"))]
fn offer(
    clipboard: &mut arboard::Clipboard,
    image: arboard::ImageData<'_>,
    hold: ClipboardHold,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    let set = clipboard.set();
    let set = match hold {
        ClipboardHold::None => set,
        ClipboardHold::UntilReplaced => {
            log::info!("Serving the clipboard until another application takes it");
            set.wait()
        }
        ClipboardHold::For(timeout) => {
            log::info!("Serving the clipboard for up to {}s", timeout.as_secs());
            set.wait_until(std::time::Instant::now() + timeout)
        }
    };
    set.image(image)
}

#[cfg(all(feature = "clipboard", not(target_os = "linux")))]
fn offer(
    clipboard: &mut arboard::Clipboard,
    image: arboard::ImageData<'_>,
    _hold: ClipboardHold,
) -> Result<(), arboard::Error> {
    clipboard.set_image(image)
}

#[cfg(feature = "clipboard")]
fn map_error(error: arboard::Error) -> ClipboardError {
    match error {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
        arboard::Error::ClipboardOccupied => ClipboardError::Denied(error.to_string()),
        other => ClipboardError::Failed(other.to_string()),
    }
}

/// Stand-in when built without the `clipboard` feature; every copy fails
/// as unsupported.
#[cfg(not(feature = "clipboard"))]
pub struct SystemClipboard;

#[cfg(not(feature = "clipboard"))]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        Err(ClipboardError::Unsupported)
    }

    pub fn with_hold(self, _hold: ClipboardHold) -> Self {
        self
    }
}

#[cfg(not(feature = "clipboard"))]
impl ClipboardSink for SystemClipboard {
    fn set_image(&mut self, _raster: &RgbaImage) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}
