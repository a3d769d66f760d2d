use assert_cmd::Command;
use im_proto::oidb::OidbSvcTrpcTcpBase;
use im_proto::richmedia::{MultiMediaRespHead, NtV2RichMediaResp, UploadResp};
use predicates::prelude::*;
use prost::Message;
use std::fs;
use tempfile::tempdir;

fn gif_bytes() -> Vec<u8> {
    let mut data = b"GIF87a".to_vec();
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(&9u16.to_le_bytes());
    data.extend_from_slice(&[0x80, 0x00, 0x00]);
    data
}

fn response_bytes(error_code: u32, error_msg: &str) -> Vec<u8> {
    let body = NtV2RichMediaResp {
        resp_head: Some(MultiMediaRespHead {
            common: None,
            ret_code: 0,
            message: "success".into(),
        }),
        upload: Some(UploadResp {
            u_key: "ukey-1".into(),
            u_key_ttl_second: 600,
            ..Default::default()
        }),
    };
    OidbSvcTrpcTcpBase {
        command: 0x11c4,
        sub_command: 100,
        error_code,
        body: body.encode_to_vec(),
        error_msg: error_msg.into(),
        reserved: 0,
    }
    .encode_to_vec()
}

#[test]
fn upload_prints_derived_metadata() {
    let dir = tempdir().unwrap();
    let pic = dir.path().join("pic.gif");
    fs::write(&pic, gif_bytes()).unwrap();

    Command::cargo_bin("im")
        .unwrap()
        .args(["upload", "--group", "1234", "--file"])
        .arg(&pic)
        .assert()
        .success()
        .stdout(predicate::str::contains("OidbSvcTrpcTcp.0x11c4_100"))
        .stdout(predicate::str::contains("pixels:   16x9"))
        .stdout(predicate::str::contains(".gif"))
        .stdout(predicate::str::contains("envelope: "));
}

#[test]
fn upload_writes_envelope_file() {
    let dir = tempdir().unwrap();
    let pic = dir.path().join("pic.gif");
    let out = dir.path().join("envelope.bin");
    fs::write(&pic, gif_bytes()).unwrap();

    Command::cargo_bin("im")
        .unwrap()
        .args(["upload", "--group", "1234", "--file"])
        .arg(&pic)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let envelope = OidbSvcTrpcTcpBase::decode(fs::read(&out).unwrap().as_slice()).unwrap();
    assert_eq!(envelope.command, 0x11c4);
    assert_eq!(envelope.sub_command, 100);
}

#[test]
fn upload_rejects_non_image() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, b"just some text").unwrap();

    Command::cargo_bin("im")
        .unwrap()
        .args(["upload", "--group", "1", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported"));
}

#[test]
fn parse_response_reports_grant_and_rejection() {
    let dir = tempdir().unwrap();
    let ok = dir.path().join("ok.bin");
    let rejected = dir.path().join("rejected.bin");
    fs::write(&ok, response_bytes(0, "")).unwrap();
    fs::write(&rejected, response_bytes(1, "quota exceeded")).unwrap();

    Command::cargo_bin("im")
        .unwrap()
        .args(["parse-response", "--file"])
        .arg(&ok)
        .assert()
        .success()
        .stdout(predicate::str::contains("ukey:     ukey-1"));

    Command::cargo_bin("im")
        .unwrap()
        .args(["parse-response", "--file"])
        .arg(&rejected)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
}

#[test]
fn sign_skips_unlisted_command() {
    Command::cargo_bin("im")
        .unwrap()
        .env_remove("SIGN_SERVER_URL")
        .args([
            "sign",
            "--endpoint",
            "http://127.0.0.1:9/sign",
            "--cmd",
            "OidbSvcTrpcTcp.0x11c4_100",
            "--seq",
            "1",
            "--body-hex",
            "dead",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no signature"));
}

#[test]
fn sign_rejects_bad_body_hex() {
    Command::cargo_bin("im")
        .unwrap()
        .args([
            "sign",
            "--endpoint",
            "http://127.0.0.1:9/sign",
            "--cmd",
            "MessageSvc.PbSendMsg",
            "--seq",
            "1",
            "--body-hex",
            "zz",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode body hex"));
}
