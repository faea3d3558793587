//! Build script for lcdmenu-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates panel.toml and turns it into constants for the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Geometry limits of the HD44780 controller (rows >= 2 for the demo screens)
const COLS_RANGE: (i64, i64) = (8, 40);
const ROWS_RANGE: (i64, i64) = (2, 4);
const DEBOUNCE_RANGE: (i64, i64) = (0, 500);
const POLL_RANGE: (i64, i64) = (1, 100);

/// Validated panel settings
struct Panel {
    cols: i64,
    rows: i64,
    address: i64,
    debounce_ms: i64,
    poll_ms: i64,
}

fn main() {
    setup_linker();
    let panel = validate_config();
    generate_constants(&panel);
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
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() -> Panel {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the lcdmenu-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let cols = integer_in(&config, "lcd", "cols", COLS_RANGE, &mut errors);
    let rows = integer_in(&config, "lcd", "rows", ROWS_RANGE, &mut errors);
    let address = integer_in(&config, "lcd", "address", (0x08, 0x77), &mut errors);
    let debounce_ms = integer_in(&config, "buttons", "debounce_ms", DEBOUNCE_RANGE, &mut errors);
    let poll_ms = integer_in(&config, "buttons", "poll_ms", POLL_RANGE, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");

    Panel {
        cols,
        rows,
        address,
        debounce_ms,
        poll_ms,
    }
}

/// Look up `[section] key` and check it is an integer within `range`
///
/// Problems are collected into `errors`; the returned value is only
/// meaningful when no error was recorded.
fn integer_in(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: (i64, i64),
    errors: &mut Vec<String>,
) -> i64 {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return 0;
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return 0;
        }
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) => {
            if *value < range.0 || *value > range.1 {
                errors.push(format!(
                    "[{}] {} must be {}-{}",
                    section, key, range.0, range.1
                ));
            }
            *value
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            0
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            0
        }
    }
}

/// Write the validated settings as Rust constants into OUT_DIR
fn generate_constants(panel: &Panel) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("panel_config.rs")).unwrap();
    writeln!(f, "pub const PANEL_COLS: u8 = {};", panel.cols).unwrap();
    writeln!(f, "pub const PANEL_ROWS: u8 = {};", panel.rows).unwrap();
    writeln!(f, "pub const LCD_ADDRESS: u8 = {:#04x};", panel.address).unwrap();
    writeln!(f, "pub const DEBOUNCE_MS: u16 = {};", panel.debounce_ms).unwrap();
    writeln!(f, "pub const POLL_MS: u64 = {};", panel.poll_ms).unwrap();
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
