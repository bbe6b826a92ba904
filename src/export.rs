use crate::models::{AppData, JournalEntry, MoodEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EXPORT_FILENAME: &str = "mood-journal-data.json";

/// Snapshot of everything a user has recorded, for download.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub mood_entries: Vec<MoodEntry>,
    pub journal_entries: Vec<JournalEntry>,
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    pub fn from_data(data: &AppData, exported_at: DateTime<Utc>) -> Self {
        Self {
            mood_entries: data.moods.clone(),
            journal_entries: data.journal.clone(),
            exported_at,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn content_disposition() -> String {
        format!("attachment; filename=\"{EXPORT_FILENAME}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn export_keeps_raw_entries_and_timestamp() {
        let mut data = AppData::default();
        data.moods.push(MoodEntry {
            id: Uuid::new_v4(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            mood: Some("calm".into()),
            intensity: None,
            activities: None,
            note: None,
        });
        let exported_at = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();

        let json = ExportDocument::from_data(&data, exported_at)
            .to_pretty_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["mood_entries"][0]["mood"], "calm");
        assert!(value["mood_entries"][0]["intensity"].is_null());
        assert_eq!(value["journal_entries"], serde_json::json!([]));
        assert_eq!(value["exported_at"], "2024-05-02T00:00:00Z");
    }

    #[test]
    fn content_disposition_names_the_file() {
        assert_eq!(
            ExportDocument::content_disposition(),
            "attachment; filename=\"mood-journal-data.json\""
        );
    }
}
