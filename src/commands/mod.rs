//! Command handlers for the front end.
//!
//! This module exposes the actions a front end can trigger:
//! - [`convert_images`]: Convert dropped images in one batch
//! - [`clear_output`]: Delete the output tree
//! - [`open_output`]: Show the output tree in the file browser

mod convert;

pub use convert::*;
