//! Build script for nixie-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml and embeds it as a postcard blob

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nixie_core::config::ClockConfig;

/// Upper bound for the encoded config
const CONFIG_BLOB_MAX: usize = 128;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    embed_config(&out_dir);
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml and write the encoded config to OUT_DIR
fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    let config = if config_path.exists() {
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) => fail("Failed to read clock.toml", &e.to_string()),
        };
        match toml::from_str::<ClockConfig>(&content) {
            Ok(config) => config,
            Err(e) => fail("Invalid clock.toml", &e.to_string()),
        }
    } else {
        println!("cargo:warning=clock.toml not found, using defaults");
        ClockConfig::default()
    };

    if let Err(e) = config.validate() {
        fail("Invalid value in clock.toml", &format!("{:?}", e));
    }

    let mut buf = [0u8; CONFIG_BLOB_MAX];
    let blob = match postcard::to_slice(&config, &mut buf) {
        Ok(blob) => blob,
        Err(e) => fail("Failed to encode clock.toml", &e.to_string()),
    };
    fs::write(out_dir.join("clock.bin"), blob).unwrap();

    println!("cargo:warning=clock.toml validated successfully");
}

/// Abort the build with a boxed error message
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
