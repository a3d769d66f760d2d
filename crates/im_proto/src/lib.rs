//! im_proto — wire types and request builders for the group media service
//!
//! Everything here is pure: no sockets, no clocks. The only nondeterminism is
//! the per-request client nonce drawn in `upload`.
//!
//! # Modules
//! - `constants` — fixed protocol literals for rich media v2 uploads
//! - `error`     — unified error type
//! - `image`     — picture format / dimension sniffing and content digests
//! - `oidb`      — OIDB base envelope (wrap / unwrap typed bodies)
//! - `richmedia` — NTV2 rich media request/response protobuf messages
//! - `upload`    — group image upload request builder and response parser

pub mod constants;
pub mod error;
pub mod image;
pub mod oidb;
pub mod richmedia;
pub mod upload;

pub use error::ProtoError;
pub use image::{ImageFormat, ImageInfo};
pub use oidb::{EnvelopeResponse, OidbPacket};
pub use upload::{
    build_group_image_upload, parse_group_image_upload_response, GroupImageUpload, UploadRequest,
};
