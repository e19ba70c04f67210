// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, FetchError, FetchResult, ProcessError, VersionError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "root".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'root' in section '[paths]'");
}

#[test]
fn test_command_failed_keeps_command_text() {
    let err: FetchError = ProcessError::CommandFailed {
        command: "git clone https://example.com/repo.git /tmp/repo".to_string(),
        cause: "exited with code 128".to_string(),
    }
    .into();

    assert_eq!(
        err.failed_command(),
        Some("git clone https://example.com/repo.git /tmp/repo")
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"command failed: git clone https://example.com/repo.git /tmp/repo: exited with code 128"
    );
}

#[test]
fn test_version_error_display() {
    let missing: FetchError = VersionError::MissingFile {
        path: "version.txt".to_string(),
    }
    .into();
    let malformed: FetchError = VersionError::MalformedVersion {
        content: "1.2".to_string(),
    }
    .into();

    assert!(missing.failed_command().is_none());
    insta::assert_snapshot!(missing.to_string(), @"version.txt not found");
    insta::assert_snapshot!(
        malformed.to_string(),
        @"malformed version '1.2', expected MAJOR.MINOR.PATCH"
    );
}

#[test]
fn test_fetch_error_size() {
    // Boxed variants keep the enum at a fat pointer plus discriminant
    let size = std::mem::size_of::<FetchError>();
    assert!(size <= 24, "FetchError is {size} bytes, expected <= 24");
}

#[test]
fn test_fetch_result_size() {
    let size = std::mem::size_of::<FetchResult<()>>();
    assert!(size <= 24, "FetchResult<()> is {size} bytes, expected <= 24");
}
