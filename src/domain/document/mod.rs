// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/mod.rs
//
// Document domain: source bitmap, crop geometry and compositing.

pub mod core;
pub mod operations;

pub use self::core::bitmap::SourceBitmap;
pub use self::core::color::{Color, ParseColorError};
pub use self::operations::compose::{ExportFormat, FinalRaster, OutputConfig, compose};
pub use self::operations::crop::{CropCommand, CropModel, FillMode};
pub use self::operations::inner::InnerRaster;
