//! OIDB base envelope.
//!
//! Every OIDB service call travels as an `OidbSvcTrpcTcpBase` whose `body` is
//! the serialized, command-specific message. Responses reuse the same shape
//! and report failures through `error_code` / `error_msg`.

use prost::Message;

use crate::error::ProtoError;

const SERVICE_PREFIX: &str = "OidbSvcTrpcTcp";

#[derive(Clone, PartialEq, prost::Message)]
pub struct OidbSvcTrpcTcpBase {
    #[prost(uint32, tag = "1")]
    pub command: u32,
    #[prost(uint32, tag = "2")]
    pub sub_command: u32,
    #[prost(uint32, tag = "3")]
    pub error_code: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub body: Vec<u8>,
    #[prost(string, tag = "5")]
    pub error_msg: String,
    /// 1 for uplink (uid-addressed) requests.
    #[prost(int32, tag = "12")]
    pub reserved: i32,
}

/// A serialized envelope ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidbPacket {
    /// Fully-qualified command, e.g. `OidbSvcTrpcTcp.0x11c4_100`.
    pub command: String,
    pub data: Vec<u8>,
    /// Whether the transport should wait for a reply to this packet.
    pub needs_response: bool,
}

/// Decoded response envelope. `body` is only present when `error_code == 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeResponse<T> {
    pub error_code: i32,
    pub error_message: String,
    pub body: Option<T>,
}

impl<T> EnvelopeResponse<T> {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    /// Surface a non-zero error code as `RemoteRejected`, dropping any body.
    pub fn into_result(self) -> Result<T, ProtoError> {
        match self.body {
            Some(body) if self.error_code == 0 => Ok(body),
            _ => Err(ProtoError::RemoteRejected {
                code: self.error_code,
                message: self.error_message,
            }),
        }
    }
}

pub fn command_name(command: u32, sub_command: u32) -> String {
    format!("{SERVICE_PREFIX}.0x{command:02x}_{sub_command}")
}

pub fn build_envelope<M: Message>(
    command: u32,
    sub_command: u32,
    body: &M,
    is_uplink: bool,
    needs_response: bool,
) -> OidbPacket {
    let base = OidbSvcTrpcTcpBase {
        command,
        sub_command,
        body: body.encode_to_vec(),
        reserved: i32::from(is_uplink),
        ..Default::default()
    };
    OidbPacket {
        command: command_name(command, sub_command),
        data: base.encode_to_vec(),
        needs_response,
    }
}

pub fn parse_envelope<T: Message + Default>(data: &[u8]) -> Result<EnvelopeResponse<T>, ProtoError> {
    let base = OidbSvcTrpcTcpBase::decode(data)?;
    // Wire field is unsigned; negative codes arrive as their two's complement.
    let error_code = base.error_code as i32;
    let body = if error_code == 0 {
        Some(T::decode(base.body.as_slice())?)
    } else {
        None
    };
    Ok(EnvelopeResponse {
        error_code,
        error_message: base.error_msg,
        body,
    })
}
