// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Built-in dependency list, in build order.
//!
//! ```text
//! openssl --> paho.mqtt.c --> paho.mqtt.cpp --> spdlog
//! ```
//!
//! Replaced wholesale by `[[dependencies]]` entries in a config file.

use super::types::{BuildStep, DependencyConfig};

/// Standard `CMake` configure/build/install triple for a dependency.
fn cmake_steps(definitions: &[&str]) -> Vec<BuildStep> {
    let configure = [
        "cmake",
        "-S",
        "{source}",
        "-B",
        "{source}/build",
        "-DCMAKE_BUILD_TYPE={build_type}",
        "-DCMAKE_INSTALL_PREFIX={install}",
        "-DCMAKE_PREFIX_PATH={install}",
    ]
    .into_iter()
    .chain(definitions.iter().copied());

    vec![
        BuildStep::new(configure),
        BuildStep::new([
            "cmake",
            "--build",
            "{source}/build",
            "--config",
            "{build_type}",
        ]),
        BuildStep::new(["cmake", "--install", "{source}/build", "--config", "{build_type}"]),
    ]
}

/// Returns the built-in dependencies.
#[must_use]
pub fn default_dependencies() -> Vec<DependencyConfig> {
    vec![
        DependencyConfig {
            name: "openssl".to_string(),
            repository: "https://github.com/openssl/openssl.git".to_string(),
            revision: Some("OpenSSL_1_1_1t".to_string()),
            directory: None,
            shallow: false,
            build_steps: vec![
                BuildStep::new([
                    "./config",
                    "--prefix={install}",
                    "--openssldir={install}/ssl",
                    "no-shared",
                ]),
                BuildStep::new(["make"]),
                BuildStep::new(["make", "install_sw"]),
            ],
        },
        DependencyConfig {
            name: "paho.mqtt.c".to_string(),
            repository: "https://github.com/eclipse/paho.mqtt.c.git".to_string(),
            revision: Some("v1.3.13".to_string()),
            directory: None,
            shallow: false,
            build_steps: cmake_steps(&[
                "-DPAHO_WITH_SSL=ON",
                "-DPAHO_BUILD_STATIC=ON",
                "-DPAHO_BUILD_SHARED=OFF",
                "-DPAHO_ENABLE_TESTING=OFF",
                "-DOPENSSL_ROOT_DIR={install}",
            ]),
        },
        DependencyConfig {
            name: "paho.mqtt.cpp".to_string(),
            repository: "https://github.com/eclipse/paho.mqtt.cpp.git".to_string(),
            revision: Some("v1.4.1".to_string()),
            directory: None,
            shallow: false,
            build_steps: cmake_steps(&[
                "-DPAHO_WITH_SSL=ON",
                "-DPAHO_BUILD_STATIC=ON",
                "-DPAHO_BUILD_SHARED=OFF",
                "-DOPENSSL_ROOT_DIR={install}",
            ]),
        },
        DependencyConfig {
            name: "spdlog".to_string(),
            repository: "https://github.com/gabime/spdlog.git".to_string(),
            revision: Some("v1.14.1".to_string()),
            directory: None,
            shallow: false,
            build_steps: cmake_steps(&["-DSPDLOG_BUILD_EXAMPLE=OFF"]),
        },
    ]
}
