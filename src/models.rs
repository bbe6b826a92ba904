use crate::mood::ResolvedEntry;
use crate::stats::{DateGroup, History, MonthGroup, TimeRange};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mood entry as stored. Optional fields stay raw here and are resolved
/// through [`MoodEntry::resolve`] before any aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub intensity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub activities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood_entry_id: Option<Uuid>,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub const DEFAULT_REMIND_TIME: &str = "20:00";

/// Display and reminder settings. A store without one gets the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub display_name: String,
    pub email_notifications: bool,
    pub remind_time: String,
    pub theme: Theme,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            email_notifications: false,
            remind_time: DEFAULT_REMIND_TIME.to_string(),
            theme: Theme::Light,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct NewMoodEntry {
    pub mood: String,
    pub intensity: Option<i64>,
    #[serde(default)]
    pub activities: Vec<String>,
    pub note: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub mood_entry_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email_notifications: Option<bool>,
    pub remind_time: Option<String>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub is_pinned: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub range: TimeRange,
    pub activity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub range: TimeRange,
    pub activity: Option<String>,
    #[serde(flatten)]
    pub history: History,
    pub days: Vec<DateGroup<ResolvedEntry>>,
}

#[derive(Debug, Serialize)]
pub struct JournalMonthsResponse {
    pub months: Vec<MonthGroup<JournalEntry>>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub date: NaiveDate,
    pub content: &'static str,
    pub author: &'static str,
}

/// Field readers for stored entries. A value of the wrong shape reads as
/// absent so the entry falls back to its defaults instead of failing the
/// whole document.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(value) => Some(value),
            _ => None,
        })
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(number) => number.as_i64(),
            _ => None,
        })
    }

    /// Non-string elements are skipped; anything but an array is absent.
    pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(tag) => Some(tag),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> MoodEntry {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn malformed_optional_fields_read_as_absent() {
        let entry = parse(
            r#"{"id":"6f2c7a4e-8d0b-4c55-9a8e-2f1b1c3d4e5f","date":"2024-01-01T10:00:00Z",
                "mood":42,"intensity":7.5,"activities":"Work","note":{"text":"x"}}"#,
        );
        assert_eq!(entry.mood, None);
        assert_eq!(entry.intensity, None);
        assert_eq!(entry.activities, None);
        assert_eq!(entry.note, None);

        let resolved = entry.resolve();
        assert_eq!(resolved.intensity, 5);
        assert!(resolved.activities.is_empty());
    }

    #[test]
    fn string_intensity_and_mixed_tags() {
        let entry = parse(
            r#"{"id":"6f2c7a4e-8d0b-4c55-9a8e-2f1b1c3d4e5f","date":"2024-01-01T10:00:00Z",
                "mood":"Sad","intensity":"8","activities":["Work",3,null,"Sleep"]}"#,
        );
        assert_eq!(entry.mood.as_deref(), Some("Sad"));
        assert_eq!(entry.intensity, None);
        assert_eq!(entry.activities, Some(vec!["Work".to_string(), "Sleep".to_string()]));
    }

    #[test]
    fn well_formed_fields_are_kept() {
        let entry = parse(
            r#"{"id":"6f2c7a4e-8d0b-4c55-9a8e-2f1b1c3d4e5f","date":"2024-01-01T10:00:00Z",
                "mood":"Happy","intensity":8,"activities":["Exercise"],"note":"run"}"#,
        );
        assert_eq!(entry.intensity, Some(8));
        assert_eq!(entry.note.as_deref(), Some("run"));
    }

    #[test]
    fn missing_profile_uses_defaults() {
        let data: AppData = serde_json::from_str(r#"{"moods":[],"journal":[]}"#).unwrap();
        assert_eq!(data.profile.remind_time, "20:00");
        assert_eq!(data.profile.theme, Theme::Light);
        assert!(!data.profile.email_notifications);
        assert!(data.profile.display_name.is_empty());
    }
}
