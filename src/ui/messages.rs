//! Coloured one-line status messages for the CLI.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// Honour https://no-color.org
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Paints `text` unless colours are disabled.
pub fn styled(style: Style, text: &str) -> String {
    if color_enabled() {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", styled(Colour::Blue.bold(), ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", styled(Colour::Green.bold(), ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", styled(Colour::Yellow.bold(), ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", styled(Colour::Red.bold(), ICON_ERR), msg);
}
