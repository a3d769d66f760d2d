//! Fixed literals of the NT rich media v2 protocol (`OidbSvcTrpcTcp.0x11c4_100`,
//! group picture upload). None of these are caller-configurable; a protocol
//! revision should only need to touch this file.

/// OIDB command id for group rich media operations.
pub const GROUP_MEDIA_COMMAND: u32 = 0x11c4;
/// OIDB sub command for an upload request.
pub const UPLOAD_SUB_COMMAND: u32 = 100;

/// `CommonHead.request_id`
pub const HEAD_REQUEST_ID: u32 = 1;
/// `CommonHead.command`, mirrors the OIDB sub command.
pub const HEAD_COMMAND: u32 = 100;

pub const REQUEST_TYPE: u32 = 2;
pub const BUSINESS_TYPE: u32 = 1;
pub const SCENE_TYPE: u32 = 2;
pub const AGENT_TYPE: u32 = 2;

/// `FileType.type` for pictures.
pub const FILE_TYPE_PICTURE: u32 = 1;
/// Uploads always claim the original (uncompressed) picture.
pub const ORIGINAL_FLAG: u32 = 1;
pub const COMPAT_QMSG_SCENE_TYPE: u32 = 2;
pub const CLIENT_SEQ: u32 = 0;

/// Opaque reserved blob attached to `PicExtBizInfo.bytes_pb_reserve_troop`.
pub const PIC_RESERVE_TROOP: [u8; 33] = [
    0x08, 0x00, 0x18, 0x00, 0x20, 0x00, 0x4a, 0x00, 0x50, 0x00, 0x62, 0x00, 0x92, 0x01, 0x00,
    0x9a, 0x01, 0x00, 0xaa, 0x01, 0x0c, 0x08, 0x00, 0x12, 0x00, 0x18, 0x00, 0x20, 0x00, 0x28,
    0x00, 0x3a, 0x00,
];
