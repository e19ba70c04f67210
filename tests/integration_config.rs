// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration layering.

use std::path::Path;

use fetchbuild::config::{Config, ConfigLoader};
use fetchbuild::error::ConfigError;

const CROSS_TOML: &str = r#"
[toolchain]
cross_compile_path = "/home/ubuntu/Tools/arm-none-linux-gnueabihf-10.02/bin/"
cross_compile = "arm-none-linux-gnueabihf-"
"#;

fn load(root: &Path, toml: &str) -> fetchbuild::error::Result<Config> {
    ConfigLoader::new().add_toml_str(toml).with_base_dir(root).build()
}

#[test]
fn test_arm_cross_toolchain_is_derived() {
    let config = load(Path::new("/work"), CROSS_TOML).unwrap();
    let toolchain = &config.toolchain;

    assert!(toolchain.is_cross());
    let lines: Vec<_> = toolchain
        .variables()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    CC=/home/ubuntu/Tools/arm-none-linux-gnueabihf-10.02/bin/arm-none-linux-gnueabihf-gcc
    CXX=/home/ubuntu/Tools/arm-none-linux-gnueabihf-10.02/bin/arm-none-linux-gnueabihf-g++
    LD=/home/ubuntu/Tools/arm-none-linux-gnueabihf-10.02/bin/arm-none-linux-gnueabihf-ld
    ");
}

#[test]
fn test_later_files_override_earlier_ones() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("base.toml");
    let local = tmp.path().join("local.toml");
    std::fs::write(&base, "[global]\nlog_level = 4\n[toolchain]\nbuild_type = \"Debug\"\n").unwrap();
    std::fs::write(&local, "[toolchain]\nbuild_type = \"MinSizeRel\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .with_base_dir(tmp.path())
        .build()
        .unwrap();

    assert_eq!(config.global.log_level.as_u8(), 4);
    assert_eq!(config.toolchain.build_type.to_string(), "MinSizeRel");
}

#[test]
fn test_custom_dependency_list_replaces_defaults() {
    let toml = r#"
[[dependencies]]
name = "cjson"
repository = "https://github.com/DaveGamble/cJSON.git"
revision = "v1.7.18"
build_steps = [["make"], ["make", "PREFIX={install}", "install"]]

[[dependencies]]
name = "spdlog"
repository = "https://github.com/gabime/spdlog.git"
"#;
    let config = load(Path::new("/work"), toml).unwrap();
    let names: Vec<_> = config.dependencies.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["cjson", "spdlog"]);
    assert!(config.dependencies[1].revision.is_none());
    assert!(config.dependencies[1].build_steps.is_empty());
}

#[test]
fn test_duplicate_dependency_is_rejected() {
    let toml = r#"
[[dependencies]]
name = "spdlog"
repository = "https://github.com/gabime/spdlog.git"

[[dependencies]]
name = "spdlog"
repository = "https://example.com/spdlog.git"
"#;
    let err = load(Path::new("/work"), toml).unwrap_err();
    let cause = err
        .chain()
        .find_map(|e| e.downcast_ref::<ConfigError>());
    assert!(
        matches!(cause, Some(ConfigError::DuplicateDependency(name)) if name == "spdlog"),
        "{err:#}"
    );
}

#[test]
fn test_relative_paths_resolve_against_root() {
    let toml = "[paths]\nexternal = \"third_party\"\nbuild = \"out/arm\"\n";
    let config = load(Path::new("/work"), toml).unwrap();

    assert_eq!(config.paths.external().unwrap(), Path::new("/work/third_party"));
    assert_eq!(config.paths.install().unwrap(), Path::new("/work/third_party/install"));
    assert_eq!(config.paths.build().unwrap(), Path::new("/work/out/arm"));
}

#[test]
fn test_demo_config_parses() {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/fetchbuild.toml");
    let config = ConfigLoader::new()
        .add_toml_file(&demo)
        .with_base_dir("/work")
        .build()
        .unwrap();

    assert!(config.toolchain.is_cross());
    assert_eq!(config.dependencies.len(), 4);
}
