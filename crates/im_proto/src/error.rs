use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("Stream read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Digest computation failed: {0}")]
    HashCompute(String),

    #[error("Unsupported or unrecognised image format")]
    UnsupportedFormat,

    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Remote rejected request (code {code}): {message}")]
    RemoteRejected { code: i32, message: String },
}

impl ProtoError {
    /// Server-side error code, when the failure came from the remote end.
    pub fn remote_code(&self) -> Option<i32> {
        match self {
            ProtoError::RemoteRejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}
