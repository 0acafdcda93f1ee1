use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::ui::messages::color_enabled;
use ansi_term::Colour;
use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use rusqlite::Connection;
use std::sync::LazyLock;

const OP_WIDTH_MAX: usize = 60;
const DATE_FMT: &str = "%Y-%m-%d %H:%M:%S";

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Display form of a stored timestamp. Rows written by older builds hold a
/// bare `YYYY-MM-DD HH:MM:SS`; anything else unparsable is shown as is.
fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE_FMT).to_string();
    }
    NaiveDateTime::parse_from_str(raw, DATE_FMT)
        .map(|dt| dt.format(DATE_FMT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn op_target(e: &LogEntry) -> String {
    if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    }
}

/// Colours the operation word (when `colored`) and truncates the visible text.
fn format_op(entry: &LogEntry, colored: bool) -> String {
    let visible = op_target(entry);
    let visible = if visible.chars().count() > OP_WIDTH_MAX {
        let mut s: String = visible.chars().take(OP_WIDTH_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    if !colored {
        return visible;
    }

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn render_log(entries: &[LogEntry]) -> String {
        Self::render_log_with(entries, color_enabled())
    }

    pub fn render_log_with(entries: &[LogEntry], colored: bool) -> String {
        if entries.is_empty() {
            return "📜 Internal log is empty.\n".to_string();
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let dates: Vec<String> = entries.iter().map(|e| format_date(&e.date)).collect();
        let date_w = dates.iter().map(|d| d.chars().count()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| op_target(e).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);

        let mut out = String::from("📜 Internal log:\n\n");
        for (e, date) in entries.iter().zip(&dates) {
            let op = format_op(e, colored);
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op).chars().count()));

            out.push_str(&format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}\n",
                e.id, date, op, padding, e.message
            ));
        }
        out
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        print!("{}", Self::render_log(&entries));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, op: &str, target: &str, msg: &str) -> LogEntry {
        dated(id, "2025-03-01T10:00:00+01:00", op, target, msg)
    }

    fn dated(id: i64, date: &str, op: &str, target: &str, msg: &str) -> LogEntry {
        LogEntry {
            id,
            date: date.into(),
            operation: op.into(),
            target: target.into(),
            message: msg.into(),
        }
    }

    #[test]
    fn renders_one_line_per_entry() {
        let entries = [entry(1, "init", "", "db ready"), entry(2, "add", "7", "added")];
        let plain = strip_ansi(&LogLogic::render_log_with(&entries, true));
        assert!(plain.contains("1: 2025-03-01 10:00:00 | init    => db ready"));
        assert!(plain.contains("2: 2025-03-01 10:00:00 | add (7) => added"));
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let entries = [entry(1, "del", "3", "removed"), entry(2, "migration_applied", "v1", "ok")];
        let out = LogLogic::render_log_with(&entries, false);
        assert!(!out.contains('\x1b'));
        assert!(out.contains(&format!("| {:<22} => removed", "del (3)")));

        let colored = LogLogic::render_log_with(&entries, true);
        assert!(colored.contains('\x1b'));
    }

    #[test]
    fn date_column_uses_one_format() {
        let entries = [
            dated(1, "2025-03-01 09:00:00", "migration_applied", "v1", "ok"),
            dated(2, "2025-03-01T10:00:00+01:00", "init", "", "db ready"),
        ];
        let out = LogLogic::render_log_with(&entries, false);
        let lines: Vec<&str> = out.lines().skip(2).collect();
        assert!(lines[0].starts_with("1: 2025-03-01 09:00:00 | "));
        assert!(lines[1].starts_with("2: 2025-03-01 10:00:00 | "));
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(100);
        let plain = format_op(&entry(1, "export", &long, ""), false);
        assert_eq!(plain.chars().count(), OP_WIDTH_MAX);
        assert!(plain.ends_with("..."));
    }
}
