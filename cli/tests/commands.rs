use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

fn testdata_path(name: &str) -> String {
    project_root()
        .join("testdata")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn pfx_der() -> Vec<u8> {
    let text = std::fs::read_to_string(testdata_path("pfx.b64")).unwrap();
    hako_pem::read_base64_text(&text).unwrap()
}

fn hako() -> Command {
    let mut cmd = Command::cargo_bin("hako").unwrap();
    cmd.current_dir(project_root());
    cmd
}

#[test]
fn test_der_dump_base64_file() {
    hako()
        .args(["der", "dump", &testdata_path("pfx.b64")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "00000000  30 82 09 d3 02 01 03 30",
        ));
}

#[test]
fn test_der_dump_stdin_binary() {
    hako()
        .args(["der", "dump"])
        .write_stdin(vec![0x05, 0x00])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("00000000  05 00 "))
        .stdout(predicate::str::ends_with("|..|\n"));
}

#[test]
fn test_der_tree() {
    hako()
        .args(["der", "tree", &testdata_path("pfx.b64")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "SEQUENCE (2515 bytes)\n  INTEGER (1 bytes): 3\n",
        ))
        .stdout(predicate::str::contains("1.3.14.3.2.26 (sha1)"));
}

#[test]
fn test_der_tree_indefinite_length() {
    let der = pfx_der();
    let mut ber = vec![0x30, 0x80];
    ber.extend_from_slice(&der[4..]);
    ber.extend_from_slice(&[0x00, 0x00]);

    hako()
        .args(["der", "tree"])
        .write_stdin(ber.clone())
        .assert()
        .failure();

    hako()
        .args(["der", "tree", "--ber"])
        .write_stdin(ber)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SEQUENCE (2515 bytes)\n"));
}

#[test]
fn test_pkcs12_inspect_text() {
    hako()
        .args(["pkcs12", "inspect", &testdata_path("pfx.b64")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PFX:\n    Version: 3\n"))
        .stdout(predicate::str::contains("Algorithm: sha1 (1.3.14.3.2.26)"))
        .stdout(predicate::str::contains("pkcs8ShroudedKeyBag:"))
        .stdout(predicate::str::contains("certBag:"));
}

#[test]
fn test_pkcs12_inspect_json() {
    let output = hako()
        .args(["pkcs12", "inspect", &testdata_path("pfx.b64"), "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(3, json["version"]);
    assert_eq!(2, json["safes"].as_array().unwrap().len());
    assert_eq!("pkcs8ShroudedKeyBag", json["safes"][0]["bags"][0]["bag_type"]);
}

#[test]
fn test_pkcs12_inspect_nested_bags_json() {
    let output = hako()
        .args(["pkcs12", "inspect", &testdata_path("bags.b64"), "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!("encrypted", json["safes"][0]["kind"]);
    let bags = &json["safes"][1]["bags"];
    assert_eq!("safeContentsBag", bags[0]["bag_type"]);
    assert_eq!("secretBag", bags[0]["children"][0]["bag_type"]);
    assert_eq!("keyBag", bags[1]["bag_type"]);
    assert_eq!("crlBag", bags[2]["bag_type"]);
}

#[test]
fn test_pkcs12_inspect_stdin_binary() {
    hako()
        .args(["pkcs12", "inspect", "--no-verify"])
        .write_stdin(pfx_der())
        .assert()
        .success()
        .stdout(predicate::str::contains("Iterations: 2000"));
}

#[test]
fn test_pkcs12_inspect_ber() {
    let der = pfx_der();
    let mut ber = vec![0x30, 0x80];
    ber.extend_from_slice(&der[4..]);
    ber.extend_from_slice(&[0x00, 0x00]);

    hako()
        .args(["pkcs12", "inspect"])
        .write_stdin(ber.clone())
        .assert()
        .failure();

    hako()
        .args(["pkcs12", "inspect", "--ber"])
        .write_stdin(ber)
        .assert()
        .success()
        .stdout(predicate::str::contains("pkcs8ShroudedKeyBag:"));
}

#[test]
fn test_pkcs12_inspect_not_a_pfx() {
    // SEQUENCE { INTEGER 3 }
    hako()
        .args(["pkcs12", "inspect"])
        .write_stdin(vec![0x30, 0x03, 0x02, 0x01, 0x03])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_file() {
    hako()
        .args(["der", "dump", "no-such-file.der"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Io"));
}
