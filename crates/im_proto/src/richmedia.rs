//! NTV2 rich media protobuf messages.
//!
//! Only the branches used for group picture uploads are modelled; the
//! download / delete / rkey branches of the same service are left out.
//! Tags follow the service schema, so unknown fields sent by the server are
//! skipped by prost rather than rejected.

// ── Request ──────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, prost::Message)]
pub struct NtV2RichMediaReq {
    #[prost(message, optional, tag = "1")]
    pub req_head: Option<MultiMediaReqHead>,
    #[prost(message, optional, tag = "2")]
    pub upload: Option<UploadReq>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MultiMediaReqHead {
    #[prost(message, optional, tag = "1")]
    pub common: Option<CommonHead>,
    #[prost(message, optional, tag = "2")]
    pub scene: Option<SceneInfo>,
    #[prost(message, optional, tag = "3")]
    pub client: Option<ClientMeta>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CommonHead {
    #[prost(uint32, tag = "1")]
    pub request_id: u32,
    #[prost(uint32, tag = "2")]
    pub command: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SceneInfo {
    #[prost(uint32, tag = "101")]
    pub request_type: u32,
    #[prost(uint32, tag = "102")]
    pub business_type: u32,
    #[prost(uint32, tag = "200")]
    pub scene_type: u32,
    #[prost(message, optional, tag = "202")]
    pub group: Option<NtGroupInfo>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NtGroupInfo {
    #[prost(uint32, tag = "1")]
    pub group_uin: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClientMeta {
    #[prost(uint32, tag = "1")]
    pub agent_type: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadReq {
    #[prost(message, repeated, tag = "1")]
    pub upload_info: Vec<UploadInfo>,
    #[prost(bool, tag = "2")]
    pub try_fast_upload_completed: bool,
    #[prost(bool, tag = "3")]
    pub srv_send_msg: bool,
    #[prost(uint64, tag = "4")]
    pub client_random_id: u64,
    #[prost(uint32, tag = "5")]
    pub compat_qmsg_scene_type: u32,
    #[prost(message, optional, tag = "6")]
    pub ext_biz_info: Option<ExtBizInfo>,
    #[prost(uint32, tag = "7")]
    pub client_seq: u32,
    #[prost(bool, tag = "8")]
    pub no_need_compat_msg: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadInfo {
    #[prost(message, optional, tag = "1")]
    pub file_info: Option<FileInfo>,
    #[prost(uint32, tag = "2")]
    pub sub_file_type: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FileInfo {
    #[prost(uint32, tag = "1")]
    pub file_size: u32,
    /// Lowercase hex MD5 of the file.
    #[prost(string, tag = "2")]
    pub file_hash: String,
    /// Lowercase hex SHA-1 of the file.
    #[prost(string, tag = "3")]
    pub file_sha1: String,
    #[prost(string, tag = "4")]
    pub file_name: String,
    #[prost(message, optional, tag = "5")]
    pub r#type: Option<FileType>,
    #[prost(uint32, tag = "6")]
    pub width: u32,
    #[prost(uint32, tag = "7")]
    pub height: u32,
    #[prost(uint32, tag = "8")]
    pub time: u32,
    #[prost(uint32, tag = "9")]
    pub original: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FileType {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub pic_format: u32,
    #[prost(uint32, tag = "3")]
    pub video_format: u32,
    #[prost(uint32, tag = "4")]
    pub voice_format: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ExtBizInfo {
    #[prost(message, optional, tag = "1")]
    pub pic: Option<PicExtBizInfo>,
    #[prost(message, optional, tag = "2")]
    pub video: Option<VideoExtBizInfo>,
    #[prost(message, optional, tag = "3")]
    pub ptt: Option<PttExtBizInfo>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PicExtBizInfo {
    #[prost(uint32, tag = "1")]
    pub biz_type: u32,
    #[prost(string, tag = "2")]
    pub text_summary: String,
    #[prost(bytes = "vec", tag = "11")]
    pub bytes_pb_reserve_c2c: Vec<u8>,
    #[prost(bytes = "vec", tag = "12")]
    pub bytes_pb_reserve_troop: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VideoExtBizInfo {
    #[prost(bytes = "vec", tag = "3")]
    pub bytes_pb_reserve: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PttExtBizInfo {
    #[prost(bytes = "vec", tag = "11")]
    pub bytes_reserve: Vec<u8>,
    #[prost(bytes = "vec", tag = "12")]
    pub bytes_pb_reserve: Vec<u8>,
    #[prost(bytes = "vec", tag = "13")]
    pub bytes_general_flags: Vec<u8>,
}

// ── Response ─────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, prost::Message)]
pub struct NtV2RichMediaResp {
    #[prost(message, optional, tag = "1")]
    pub resp_head: Option<MultiMediaRespHead>,
    #[prost(message, optional, tag = "2")]
    pub upload: Option<UploadResp>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MultiMediaRespHead {
    #[prost(message, optional, tag = "1")]
    pub common: Option<CommonHead>,
    #[prost(uint32, tag = "2")]
    pub ret_code: u32,
    #[prost(string, tag = "3")]
    pub message: String,
}

/// Upload grant. Field meaning beyond the upload key is not interpreted here.
#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadResp {
    /// Empty when the server already holds the file (fast upload).
    #[prost(string, tag = "1")]
    pub u_key: String,
    #[prost(uint32, tag = "2")]
    pub u_key_ttl_second: u32,
    #[prost(message, repeated, tag = "3")]
    pub ipv4s: Vec<IPv4>,
    #[prost(uint64, tag = "5")]
    pub msg_seq: u64,
    #[prost(bytes = "vec", tag = "8")]
    pub compat_qmsg: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct IPv4 {
    #[prost(uint32, tag = "1")]
    pub out_ip: u32,
    #[prost(uint32, tag = "2")]
    pub out_port: u32,
}
