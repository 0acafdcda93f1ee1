use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parses `YYYY-MM-DD`; `today` is accepted as a shortcut.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.eq_ignore_ascii_case("today") {
        return Some(today());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Short weekday label used in calendar headers, e.g. `Fri`.
pub fn weekday_str(d: &NaiveDate) -> String {
    d.format("%a").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2023-02-03"), NaiveDate::from_ymd_opt(2023, 2, 3));
        assert_eq!(parse_date("03/02/2023"), None);
        assert_eq!(parse_date("TODAY"), Some(today()));
    }

    #[test]
    fn weekday_is_abbreviated() {
        let d = NaiveDate::from_ymd_opt(2023, 2, 3).unwrap();
        assert_eq!(weekday_str(&d), "Fri");
    }
}
