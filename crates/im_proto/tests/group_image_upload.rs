use im_proto::oidb::{command_name, OidbSvcTrpcTcpBase};
use im_proto::richmedia::{CommonHead, MultiMediaRespHead, NtV2RichMediaResp, UploadResp};
use im_proto::{build_group_image_upload, parse_group_image_upload_response, ImageFormat, ProtoError};
use prost::Message;

fn gif(width: u16, height: u16) -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&[0xf7, 0x00, 0x00]);
    data
}

fn response(error_code: u32, error_msg: &str, body: &NtV2RichMediaResp) -> Vec<u8> {
    OidbSvcTrpcTcpBase {
        command: 0x11c4,
        sub_command: 100,
        error_code,
        body: body.encode_to_vec(),
        error_msg: error_msg.to_string(),
        reserved: 0,
    }
    .encode_to_vec()
}

fn granted() -> NtV2RichMediaResp {
    NtV2RichMediaResp {
        resp_head: Some(MultiMediaRespHead {
            common: Some(CommonHead {
                request_id: 1,
                command: 100,
            }),
            ret_code: 0,
            message: "success".to_string(),
        }),
        upload: Some(UploadResp {
            u_key: "ukey-abc".to_string(),
            u_key_ttl_second: 3600,
            ipv4s: vec![],
            msg_seq: 99,
            compat_qmsg: vec![0x01, 0x02],
        }),
    }
}

#[test]
fn gif_upload_names_file_after_md5() {
    let data = gif(120, 90);
    let built = build_group_image_upload(987_654_321, std::io::Cursor::new(&data)).unwrap();
    let expected_md5 = hex::encode(<md5::Md5 as md5::Digest>::digest(&data));

    assert_eq!(built.request.file_name, format!("{expected_md5}.gif"));
    assert_eq!(built.request.picture_format, ImageFormat::Gif);
    assert_eq!((built.request.width, built.request.height), (120, 90));
    assert_eq!(built.packet.command, command_name(0x11c4, 100));
}

#[test]
fn successful_response_is_returned_unchanged() {
    let body = granted();
    let parsed = parse_group_image_upload_response(&response(0, "", &body)).unwrap();
    assert_eq!(parsed, body);
}

#[test]
fn quota_exceeded_is_remote_rejection() {
    let err = parse_group_image_upload_response(&response(1, "quota exceeded", &granted()))
        .unwrap_err();
    assert_eq!(err.remote_code(), Some(1));
    match err {
        ProtoError::RemoteRejected { code, message } => {
            assert_eq!(code, 1);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn garbage_response_is_decode_error() {
    let err = parse_group_image_upload_response(&[0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, ProtoError::Decode(_)));
    assert_eq!(err.remote_code(), None);
}
