pub mod base64_bytes;
pub mod image;
pub mod project;
