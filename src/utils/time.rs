//! Time utilities: parsing HH:MM and validating time spans.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// A span is valid when it has no end yet, or ends after it starts.
pub fn check_span(start: NaiveTime, end: Option<NaiveTime>) -> AppResult<()> {
    match end {
        Some(e) if e <= start => Err(AppError::InvalidRange(format!(
            "end {} is not after start {}",
            e.format("%H:%M"),
            start.format("%H:%M")
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_time_rejects_garbage() {
        assert_eq!(parse_optional_time(None).unwrap(), None);
        assert!(parse_optional_time(Some(&"25:00".to_string())).is_err());
        assert_eq!(
            parse_optional_time(Some(&"08:10".to_string())).unwrap(),
            NaiveTime::from_hms_opt(8, 10, 0)
        );
    }

    #[test]
    fn span_must_move_forward() {
        let nine = parse_time("09:00").unwrap();
        let five = parse_time("17:00").unwrap();
        assert!(check_span(nine, Some(five)).is_ok());
        assert!(check_span(nine, None).is_ok());
        assert!(matches!(check_span(five, Some(nine)), Err(AppError::InvalidRange(_))));
        assert!(check_span(nine, Some(nine)).is_err());
    }
}
