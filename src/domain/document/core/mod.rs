// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/core/mod.rs
//
// Core document types and raster primitives.

pub mod bitmap;
pub mod color;
pub mod raster;
