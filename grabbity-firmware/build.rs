//! Build script for grabbity-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates the selected glove's TOML at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections every glove file must carry
const REQUIRED_SECTIONS: [&str; 8] = [
    "glove",
    "display",
    "heartbeat",
    "filter",
    "resin",
    "pulse",
    "pixels",
    "fan",
];

fn main() {
    setup_linker();
    let glove = selected_glove();
    validate_config(glove);
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
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Glove chosen by cargo feature
fn selected_glove() -> &'static str {
    let left = env::var_os("CARGO_FEATURE_LEFT").is_some();
    let right = env::var_os("CARGO_FEATURE_RIGHT").is_some();

    match (left, right) {
        (true, false) => "left",
        (false, true) => "right",
        _ => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Select exactly one glove                                 ║\n\
            ║                                                                  ║\n\
            ║  Build with --no-default-features --features defmt,left          ║\n\
            ║  or with the default features for the right glove.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        ),
    }
}

/// Validate `<glove>.toml` at compile time
fn validate_config(glove: &str) {
    let file_name = format!("{glove}.toml");
    println!("cargo:rerun-if-changed={file_name}");
    println!("cargo:rerun-if-changed=corpus.txt");

    let config_path = Path::new(&file_name);

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: {:<56} ║\n\
            ║                                                                  ║\n\
            ║  Each glove needs its TOML file in the grabbity-firmware         ║\n\
            ║  directory.                                                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{file_name} not found!")
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read {:<41} ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                file_name, e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in {:<33} ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                file_name,
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_glove(&config, glove, &mut errors);
    validate_display(&config, &mut errors);
    validate_ranges(&config, &mut errors);
    validate_choices(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: {:<56} ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("Configuration errors in {file_name}"),
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning={file_name} validated successfully");
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

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in REQUIRED_SECTIONS {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{section}] must be a table")),
            None => errors.push(format!("Missing [{section}] section")),
        }
    }
}

/// The file's kind must match the feature it is built for
fn validate_glove(config: &toml::Value, glove: &str, errors: &mut Vec<String>) {
    match config
        .get("glove")
        .and_then(|g| g.get("kind"))
        .and_then(|k| k.as_str())
    {
        Some(kind) if kind == glove => {}
        Some(kind) => errors.push(format!("glove.kind is '{kind}' but built for '{glove}'")),
        None => errors.push("glove.kind is required".to_string()),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(header) = config
        .get("display")
        .and_then(|d| d.get("header"))
        .and_then(|h| h.as_str())
    else {
        return;
    };

    if header.len() > 20 {
        errors.push(format!("display.header longer than 20 chars ({})", header.len()));
    }
    if !header.bytes().all(|b| (b' '..=b'~').contains(&b)) {
        errors.push("display.header must be printable ASCII".to_string());
    }
}

/// Numeric keys and their accepted ranges
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let integers: [(&str, &str, i64, i64); 9] = [
        ("glove", "tick_ms", 1, 60_000),
        ("display", "refresh_ms", 0, 600_000),
        ("display", "width_chars", 2, 20),
        ("display", "lines_per_tick", 1, 2),
        ("heartbeat", "interval_ms", 0, 600_000),
        ("filter", "max_level", 0, 255),
        ("filter", "half_period_s", 1, 30),
        ("resin", "interval_ms", 0, 600_000),
        ("fan", "toggle_ms", 1, 600_000),
    ];
    for (section, key, min, max) in integers {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            match value.as_integer() {
                Some(v) if (min..=max).contains(&v) => {}
                Some(v) => errors.push(format!("{section}.{key} = {v} not in {min}..={max}")),
                None => errors.push(format!("{section}.{key} must be an integer")),
            }
        }
    }

    let floats: [(&str, &str, f64, f64); 5] = [
        ("filter", "time_constant_s", 0.0, 3600.0),
        ("resin", "rate_per_second", 0.0, 1000.0),
        ("pulse", "hue", 0.0, 1.0),
        ("pulse", "saturation", 0.0, 1.0),
        ("pulse", "value", 0.0, 1.0),
    ];
    for (section, key, min, max) in floats {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            let number = value
                .as_float()
                .or_else(|| value.as_integer().map(|i| i as f64));
            match number {
                Some(v) if v >= min && v <= max => {}
                Some(v) => errors.push(format!("{section}.{key} = {v} not in {min}..={max}")),
                None => errors.push(format!("{section}.{key} must be a number")),
            }
        }
    }
}

/// String keys limited to a fixed set of words
fn validate_choices(config: &toml::Value, errors: &mut Vec<String>) {
    let choices: [(&str, &str, &[&str]); 4] = [
        ("display", "advance", &["line", "window"]),
        ("heartbeat", "policy", &["wall_clock", "free_running"]),
        ("pixels", "source", &["off", "heartbeat", "pulse"]),
        ("pixels", "order", &["grbw", "rgbw"]),
    ];
    for (section, key, allowed) in choices {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            match value.as_str() {
                Some(v) if allowed.contains(&v) => {}
                Some(v) => errors.push(format!(
                    "{section}.{key} = '{v}' (expected {})",
                    allowed.join(" or ")
                )),
                None => errors.push(format!("{section}.{key} must be a string")),
            }
        }
    }
}
