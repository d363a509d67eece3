// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/mod.rs
//
// Views rendered by the session.

pub mod crop;
