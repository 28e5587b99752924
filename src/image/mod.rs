//! Image acquisition and encoding
//!
//! Reads local files or fetches remote URLs and normalizes them into
//! base64-encoded [`ImageData`](crate::models::ImageData) values.

pub mod encoder;
pub mod mime;

pub use encoder::{ImageEncoder, ImageFile};
