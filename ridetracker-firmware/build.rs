//! Build script for ridetracker-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates ride.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use ridetracker_core::config::{parse_config, RideConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate ride.toml at compile time
///
/// The firmware parses the same file at boot with a small no_std parser
/// and falls back to defaults on error. Failing here keeps that fallback
/// from ever being taken silently.
fn validate_config() {
    println!("cargo:rerun-if-changed=ride.toml");

    let config_path = Path::new("ride.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: ride.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a ride.toml configuration file.           ║\n\
            ║  Please create one in the ridetracker-firmware directory.        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read ride.toml", &e.to_string()),
    };

    // Syntax and types, through the serde derives on the config types
    let typed: RideConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => fail("Invalid ride.toml", &e.to_string()),
    };

    if let Err(v) = typed.validate() {
        fail("Invalid ride.toml", &format!("{:?}", v));
    }

    // The boot-time parser must accept the file and agree with serde
    match parse_config(&config_content) {
        Ok(parsed) if parsed == typed => {}
        Ok(parsed) => fail(
            "ride.toml parsers disagree",
            &format!("toml: {:?}\nboot: {:?}", typed, parsed),
        ),
        Err(e) => fail("ride.toml rejected by boot parser", &format!("{:?}", e)),
    }

    println!("cargo:warning=ride.toml validated successfully");
}

fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
