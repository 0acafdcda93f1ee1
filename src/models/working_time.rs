use super::entity::Entity;
use super::location::Location;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One working-time entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTime {
    pub id: i64,                   // ⇔ working_times.id
    pub date: NaiveDate,           // ⇔ working_times.date (TEXT "YYYY-MM-DD")
    #[serde(with = "hhmm")]
    pub start: NaiveTime,          // ⇔ working_times.start (TEXT "HH:MM")
    #[serde(with = "hhmm_opt", default)]
    pub end: Option<NaiveTime>,    // ⇔ working_times.end (NULL while still open)
    #[serde(default)]
    pub lunch: i32,                // ⇔ working_times.lunch (minutes)
    #[serde(default)]
    pub location: Location,        // ⇔ working_times.location ('O','R','H','C','M')
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub created_at: String,        // RFC 3339
}

impl WorkingTime {
    /// Builds an unsaved entry (`id = 0`) stamped with the current time.
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: Option<NaiveTime>,
        lunch: i32,
        location: Location,
    ) -> Self {
        Self {
            id: 0,
            date,
            start,
            end,
            lunch,
            location,
            note: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    /// Minutes between start and end minus lunch, never negative.
    /// `None` while the entry has no end time.
    pub fn worked_minutes(&self) -> Option<i64> {
        let end = self.end?;
        let span = (end - self.start).num_minutes() - i64::from(self.lunch);
        Some(span.max(0))
    }
}

impl Entity for WorkingTime {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => super::hhmm::serialize(t, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|r| NaiveTime::parse_from_str(&r, "%H:%M").map_err(serde::de::Error::custom))
            .transpose()
    }
}
