// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop editor: gesture translation and the live preview viewport.

pub mod editor;
pub mod gesture;

pub use editor::EditorViewport;
pub use gesture::{EditorEvent, EventStatus, Gesture, GestureTranslator, Point};
