// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/mod.rs
//
// Document IO: decoding sources, encoding banners, clipboard placement.

pub mod clipboard;
pub mod export;
pub mod raster;

pub use clipboard::{ClipboardHold, ClipboardSink, SystemClipboard};
