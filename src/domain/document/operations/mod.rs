// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/mod.rs
//
// Operations on documents: crop state, inner and output compositing.

pub mod compose;
pub mod crop;
pub mod inner;
