//! Utilities shared by the host side (display helpers).

pub mod unicode;

pub use unicode::truncate_display;
