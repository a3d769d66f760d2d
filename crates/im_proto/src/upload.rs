//! Group image upload (`OidbSvcTrpcTcp.0x11c4_100`).
//!
//! The builder derives every file descriptor field from the raw bytes: size,
//! MD5 / SHA-1, picture format and dimensions. Only the client nonce is random.

use std::io::{self, Read};

use tracing::{debug, warn};

use crate::constants;
use crate::error::ProtoError;
use crate::image::{self, ImageFormat};
use crate::oidb::{self, OidbPacket};
use crate::richmedia::{
    ClientMeta, CommonHead, ExtBizInfo, FileInfo, FileType, MultiMediaReqHead, NtGroupInfo,
    NtV2RichMediaReq, NtV2RichMediaResp, PicExtBizInfo, PttExtBizInfo, SceneInfo, UploadInfo,
    UploadReq, VideoExtBizInfo,
};

/// Everything the upload request says about one file. Built once per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub group_id: u32,
    pub file_size: u32,
    pub md5_hex: String,
    pub sha1_hex: String,
    /// `<md5_hex>.<ext>`
    pub file_name: String,
    pub picture_format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub is_original: bool,
    pub client_nonce: u64,
    pub scene_type: u32,
    pub business_type: u32,
    pub client_sequence: u32,
}

impl UploadRequest {
    /// Nested rich media request as sent inside the OIDB envelope.
    pub fn to_message(&self) -> NtV2RichMediaReq {
        let file_info = FileInfo {
            file_size: self.file_size,
            file_hash: self.md5_hex.clone(),
            file_sha1: self.sha1_hex.clone(),
            file_name: self.file_name.clone(),
            r#type: Some(FileType {
                r#type: constants::FILE_TYPE_PICTURE,
                pic_format: self.picture_format.code(),
                video_format: 0,
                voice_format: 0,
            }),
            width: self.width,
            height: self.height,
            time: 0,
            original: if self.is_original {
                constants::ORIGINAL_FLAG
            } else {
                0
            },
        };

        NtV2RichMediaReq {
            req_head: Some(MultiMediaReqHead {
                common: Some(CommonHead {
                    request_id: constants::HEAD_REQUEST_ID,
                    command: constants::HEAD_COMMAND,
                }),
                scene: Some(SceneInfo {
                    request_type: constants::REQUEST_TYPE,
                    business_type: self.business_type,
                    scene_type: self.scene_type,
                    group: Some(NtGroupInfo {
                        group_uin: self.group_id,
                    }),
                }),
                client: Some(ClientMeta {
                    agent_type: constants::AGENT_TYPE,
                }),
            }),
            upload: Some(UploadReq {
                upload_info: vec![UploadInfo {
                    file_info: Some(file_info),
                    sub_file_type: 0,
                }],
                try_fast_upload_completed: true,
                srv_send_msg: false,
                client_random_id: self.client_nonce,
                compat_qmsg_scene_type: constants::COMPAT_QMSG_SCENE_TYPE,
                ext_biz_info: Some(ExtBizInfo {
                    pic: Some(PicExtBizInfo {
                        bytes_pb_reserve_troop: constants::PIC_RESERVE_TROOP.to_vec(),
                        ..Default::default()
                    }),
                    video: Some(VideoExtBizInfo::default()),
                    ptt: Some(PttExtBizInfo::default()),
                }),
                client_seq: self.client_sequence,
                no_need_compat_msg: false,
            }),
        }
    }
}

/// Built request plus its serialized envelope.
#[derive(Debug, Clone)]
pub struct GroupImageUpload {
    pub request: UploadRequest,
    pub packet: OidbPacket,
}

/// Read `stream` to the end and build the upload envelope for `group_id`.
pub fn build_group_image_upload<R: Read>(
    group_id: u32,
    mut stream: R,
) -> Result<GroupImageUpload, ProtoError> {
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    let file_size = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "image exceeds 4 GiB"))?;

    let md5_hex = image::md5_hex(&data);
    let sha1_hex = image::sha1_hex(&data);
    let info = image::resolve(&data).map_err(|err| {
        debug!(group_id, file_size, "image format not recognised");
        err
    })?;

    let request = UploadRequest {
        group_id,
        file_size,
        file_name: format!("{}.{}", md5_hex, info.format.extension()),
        md5_hex,
        sha1_hex,
        picture_format: info.format,
        width: info.width,
        height: info.height,
        is_original: true,
        client_nonce: rand::random::<u64>(),
        scene_type: constants::SCENE_TYPE,
        business_type: constants::BUSINESS_TYPE,
        client_sequence: constants::CLIENT_SEQ,
    };

    let packet = oidb::build_envelope(
        constants::GROUP_MEDIA_COMMAND,
        constants::UPLOAD_SUB_COMMAND,
        &request.to_message(),
        true,
        true,
    );
    debug!(
        group_id,
        file_size,
        format = ?request.picture_format,
        width = request.width,
        height = request.height,
        "built group image upload"
    );

    Ok(GroupImageUpload { request, packet })
}

/// Decode an upload response; a non-zero OIDB error code becomes `RemoteRejected`.
pub fn parse_group_image_upload_response(data: &[u8]) -> Result<NtV2RichMediaResp, ProtoError> {
    let resp = oidb::parse_envelope::<NtV2RichMediaResp>(data)?;
    if !resp.is_success() {
        warn!(
            code = resp.error_code,
            message = %resp.error_message,
            "group image upload rejected"
        );
    }
    resp.into_result()
}
