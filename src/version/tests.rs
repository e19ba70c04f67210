// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Version, bump_version_file, read_version_file};
use crate::error::FetchError;

#[test]
fn test_parse_and_display() {
    let version = Version::parse("1.2.3").expect("valid version");
    assert_eq!(version, Version::new(1, 2, 3));
    assert_eq!((version.major(), version.minor(), version.patch()), (1, 2, 3));
    assert_eq!(version.to_string(), "1.2.3");
}

#[test]
fn test_parse_trims_whitespace() {
    assert_eq!(
        "  4.5.6\r\n".parse::<Version>().ok(),
        Some(Version::new(4, 5, 6))
    );
}

#[test]
fn test_parse_leading_zeros_are_normalized() {
    let version = Version::parse("01.002.3").expect("decimal parts");
    assert_eq!(version.to_string(), "1.2.3");
}

#[test]
fn test_parse_rejects_malformed() {
    for content in ["", "1.2", "1.2.3.4", "a.b.c", "1.2.-3", "v1.2.3", "1 .2.3"] {
        let err = Version::parse(content).expect_err(content);
        assert!(matches!(err, FetchError::Version(_)), "{content}: {err}");
    }

    let err = Version::parse("1.2.x\n").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"malformed version '1.2.x', expected MAJOR.MINOR.PATCH");
}

#[test]
fn test_parse_rejects_out_of_range() {
    let err = Version::parse("1.2.99999999999999999999").unwrap_err();
    assert!(matches!(err, FetchError::Version(_)));
}

#[test]
fn test_bump_patch() {
    let bump = |s: &str| {
        Version::parse(s)
            .and_then(Version::bump_patch)
            .map(|v| v.to_string())
            .expect("bumpable")
    };
    assert_eq!(bump("1.2.3"), "1.2.4");
    assert_eq!(bump("9.9.9"), "9.9.10");
    assert_eq!(bump("0.0.0"), "0.0.1");
}

#[test]
fn test_bump_patch_overflow() {
    let err = Version::new(1, 0, u64::MAX).bump_patch().unwrap_err();
    assert!(matches!(err, FetchError::Version(_)));
}

#[tokio::test]
async fn test_bump_version_file_rewrites_in_place() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("version.txt");
    std::fs::write(&path, "1.2.3\n").expect("write");

    let next = bump_version_file(&path).await.expect("bump succeeds");

    assert_eq!(next, Version::new(1, 2, 4));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "1.2.4");
}

#[tokio::test]
async fn test_bump_version_file_missing_is_not_created() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("version.txt");

    let err = bump_version_file(&path).await.expect_err("file is absent");

    assert!(matches!(err, FetchError::Version(_)));
    assert!(err.to_string().ends_with("version.txt not found"), "{err}");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_bump_version_file_malformed_is_left_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("version.txt");
    std::fs::write(&path, "release-7").expect("write");

    let err = bump_version_file(&path).await.expect_err("not a version");

    assert!(err.to_string().contains("release-7"), "{err}");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "release-7");
}

#[tokio::test]
async fn test_read_version_file_on_directory_is_io_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = read_version_file(tmp.path()).await.expect_err("a directory");
    assert!(matches!(err, FetchError::Fs(_)), "{err}");
}
