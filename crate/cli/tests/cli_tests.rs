#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use std::{fs, path::Path, process::Command};

use assert_cmd::prelude::*;
use openssl::{pkey::PKey, rsa::Rsa};
use predicates::prelude::*;
use secure_session_cli::{actions::EncryptedPayload, config::SECURE_SESSION_CONF_ENV};
use secure_session_crypto::crypto::encoding::{b64_decode, b64_encode};
use tempfile::TempDir;

const PROG_NAME: &str = "ssession";

fn ssession() -> Command {
    let mut cmd = Command::cargo_bin(PROG_NAME).unwrap();
    cmd.env_remove(SECURE_SESSION_CONF_ENV).env_remove("RUST_LOG");
    cmd
}

fn stdout_line(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_owned()
}

/// Write an RSA key pair as `private.pem` and `public.pem` in `dir`.
fn write_key_pair(dir: &Path) {
    let private_key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
    fs::write(
        dir.join("private.pem"),
        private_key.private_key_to_pem_pkcs8().unwrap(),
    )
    .unwrap();
    fs::write(dir.join("public.pem"), private_key.public_key_to_pem().unwrap()).unwrap();
}

fn encrypt(session_key: &str, data: &str) -> EncryptedPayload {
    let output = stdout_line(ssession().args([
        "encrypt",
        "--session-key",
        session_key,
        "--data",
        data,
    ]));
    serde_json::from_str(&output).unwrap()
}

#[test]
fn test_generate_session_key_and_iv() {
    let session_key = stdout_line(ssession().arg("session-key"));
    assert_eq!(b64_decode(&session_key).unwrap().len(), 24);

    let iv = stdout_line(ssession().arg("iv"));
    assert_eq!(b64_decode(&iv).unwrap().len(), 16);
}

#[test]
fn test_wrap_unwrap() {
    let tmp_dir = TempDir::new().unwrap();
    write_key_pair(tmp_dir.path());
    let public_key = tmp_dir.path().join("public.pem");
    let private_key = tmp_dir.path().join("private.pem");

    let session_key = stdout_line(ssession().arg("session-key"));
    let wrapped = stdout_line(ssession().args([
        "wrap",
        "--session-key",
        &session_key,
        "--public-key-file",
        public_key.to_str().unwrap(),
    ]));
    assert_eq!(b64_decode(&wrapped).unwrap().len(), 256);

    let unwrapped = stdout_line(ssession().args([
        "unwrap",
        &wrapped,
        "--private-key-file",
        private_key.to_str().unwrap(),
    ]));
    assert_eq!(unwrapped, session_key);

    let url_encoded = stdout_line(ssession().args([
        "wrap",
        "-k",
        &session_key,
        "-p",
        public_key.to_str().unwrap(),
        "--url-encoded",
    ]));
    assert!(!url_encoded.contains(['+', '/', '=']));
}

#[test]
fn test_wrap_invalid_public_key() {
    let tmp_dir = TempDir::new().unwrap();
    let public_key = tmp_dir.path().join("public.pem");
    fs::write(
        &public_key,
        "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n",
    )
    .unwrap();

    ssession()
        .args(["wrap", "-k", "AAECAwQFBgcICQoLDA0ODxAREhMUFRYX", "-p"])
        .arg(&public_key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to wrap session key"));
}

#[test]
fn test_encrypt_decrypt() {
    let session_key = stdout_line(ssession().arg("session-key"));
    let payload = encrypt(&session_key, "test");
    assert_eq!(b64_decode(&payload.iv).unwrap().len(), 16);

    ssession()
        .args([
            "decrypt",
            &payload.envelope,
            "--iv",
            &payload.iv,
            "--session-key",
            &session_key,
        ])
        .assert()
        .success()
        .stdout(predicate::eq("dGVzdA==\n"));
}

#[test]
fn test_encrypt_file_decrypt_to_file() {
    let tmp_dir = TempDir::new().unwrap();
    let input_file = tmp_dir.path().join("plain.txt");
    let output_file = tmp_dir.path().join("plain.dec");
    fs::write(&input_file, b"some longer payload read from a file").unwrap();

    let session_key = stdout_line(ssession().arg("session-key"));
    let iv = stdout_line(ssession().arg("iv"));
    let output = stdout_line(
        ssession()
            .args(["encrypt", "-k", &session_key, "-i", &iv])
            .arg(&input_file),
    );
    let payload: EncryptedPayload = serde_json::from_str(&output).unwrap();
    assert_eq!(payload.iv, iv);

    ssession()
        .args(["decrypt", &payload.envelope, "-i", &iv, "-k", &session_key, "-o"])
        .arg(&output_file)
        .assert()
        .success();
    assert_eq!(
        fs::read(&output_file).unwrap(),
        b"some longer payload read from a file"
    );
}

#[test]
fn test_decrypt_with_wrong_key() {
    let session_key = stdout_line(ssession().arg("session-key"));
    let other_key = stdout_line(ssession().arg("session-key"));
    let payload = encrypt(&session_key, "test");

    ssession()
        .args([
            "decrypt",
            &payload.envelope,
            "--iv",
            &payload.iv,
            "--session-key",
            &other_key,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decrypt"));
}

#[test]
fn test_decrypt_card_data() {
    let session_key = stdout_line(ssession().arg("session-key"));
    let payload = encrypt(&session_key, "4111111111111111 and a trailing block");

    ssession()
        .args([
            "decrypt",
            &payload.envelope,
            "--iv",
            &payload.iv,
            "--session-key",
            &session_key,
            "--card-data",
        ])
        .assert()
        .success()
        .stdout(predicate::eq(format!(
            "{}\n",
            b64_encode(b"4111111111111111 and ")
        )));
}

#[test]
fn test_configuration_file() {
    let tmp_dir = TempDir::new().unwrap();
    write_key_pair(tmp_dir.path());
    let session_key = stdout_line(ssession().arg("session-key"));

    let conf = tmp_dir.path().join("ssession.json");
    fs::write(
        &conf,
        serde_json::json!({
            "public_key_file": tmp_dir.path().join("public.pem"),
            "private_key_file": tmp_dir.path().join("private.pem"),
            "session_key": session_key,
            "log_level": "error",
        })
        .to_string(),
    )
    .unwrap();

    // located through the env variable
    let wrapped = stdout_line(ssession().env(SECURE_SESSION_CONF_ENV, &conf).arg("wrap"));
    let unwrapped = stdout_line(
        ssession()
            .env(SECURE_SESSION_CONF_ENV, &conf)
            .args(["unwrap", &wrapped]),
    );
    assert_eq!(unwrapped, session_key);

    // or on the command line
    let output = stdout_line(
        ssession()
            .arg("--conf")
            .arg(&conf)
            .args(["encrypt", "-d", "test"]),
    );
    let payload: EncryptedPayload = serde_json::from_str(&output).unwrap();
    ssession()
        .arg("--conf")
        .arg(&conf)
        .args(["decrypt", &payload.envelope, "-i", &payload.iv])
        .assert()
        .success()
        .stdout(predicate::eq("dGVzdA==\n"));
}

#[test]
fn test_missing_session_key() {
    ssession()
        .args(["encrypt", "--data", "test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no session key"));

    ssession()
        .args(["encrypt", "--session-key", "AAAA"])
        .assert()
        .failure();
}
