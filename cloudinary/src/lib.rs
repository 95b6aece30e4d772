//! Client for unsigned image uploads to Cloudinary.
//!
//! A single multipart `POST` per image, tagged with an upload preset. The
//! hosted service owns all size and format checks.

mod client;
mod upload_url;

pub use client::*;
pub use upload_url::*;
