// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query module - search execution and hit rendering

pub mod search;
