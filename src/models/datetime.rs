use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Accepts RFC 3339 timestamps as well as the naive ISO timestamps the
/// backend emits for columns without a zone. Unparseable values become
/// `None` instead of failing the whole document.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// `March 4, 2025` style, as shown on blog cards.
pub fn display_date(dt: &Option<DateTime<Utc>>) -> String {
    dt.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse("2025-03-04T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_naive_backend_timestamp() {
        let dt = parse("2025-03-04T10:30:00.123456").unwrap();
        assert_eq!(dt.day(), 4);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn test_display_date() {
        let dt = parse("2025-03-04T10:30:00Z");
        assert_eq!(display_date(&dt), "March 4, 2025");
        assert_eq!(display_date(&None), "");
    }
}
