use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Location {
    #[default]
    #[serde(rename = "O")]
    Office,
    #[serde(rename = "R")]
    Remote,
    #[serde(rename = "H")]
    Holiday,
    #[serde(rename = "C")]
    OnSite, // customer site
    #[serde(rename = "M")]
    Mixed,
}

impl Location {
    pub fn code(&self) -> &'static str {
        match self {
            Location::Office => "O",
            Location::Remote => "R",
            Location::Holiday => "H",
            Location::OnSite => "C",
            Location::Mixed => "M",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::Office => "Office",
            Location::Remote => "Remote",
            Location::Holiday => "Holiday",
            Location::OnSite => "On-site (Client)",
            Location::Mixed => "Mixed",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "O" => Some(Location::Office),
            "R" => Some(Location::Remote),
            "H" => Some(Location::Holiday),
            "C" => Some(Location::OnSite),
            "M" => Some(Location::Mixed),
            _ => None,
        }
    }

    /// Accepts a one-letter code or the long name, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "office" => Some(Location::Office),
            "remote" => Some(Location::Remote),
            "holiday" => Some(Location::Holiday),
            "customer" | "client" | "onsite" => Some(Location::OnSite),
            "mixed" => Some(Location::Mixed),
            _ => Location::from_db_str(&code.to_uppercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!(Location::from_code("r"), Some(Location::Remote));
        assert_eq!(Location::from_code("Customer"), Some(Location::OnSite));
        assert_eq!(Location::from_code("x"), None);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Location::OnSite).unwrap();
        assert_eq!(json, "\"C\"");
    }
}
