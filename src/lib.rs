//! Image editing through Gemini
//!
//! Loads an image from disk or a URL, sends it to Gemini together with a
//! natural-language instruction, and classifies the response into either the
//! edited image or a descriptive failure.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;

pub use error::{EditFailure, Error, Result};
