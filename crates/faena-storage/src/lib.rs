//! faena-storage
//!
//! Object storage for picture attachments. One [`upload::PictureUploader`]
//! seam with two backends: a multipart HTTP endpoint and S3.

pub mod client;
pub mod error;
pub mod http;
pub mod objects;
pub mod s3;
pub mod upload;
