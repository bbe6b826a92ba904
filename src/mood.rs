use crate::models::MoodEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_INTENSITY: u8 = 5;
pub const MIN_INTENSITY: i64 = 1;
pub const MAX_INTENSITY: i64 = 10;

/// The four categories every aggregation works on.
///
/// Variant order is the fixed display order used by the distribution chart,
/// so the derived `Ord` doubles as the chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoodCategory {
    Happy,
    Neutral,
    Sad,
    Angry,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 4] = [
        MoodCategory::Happy,
        MoodCategory::Neutral,
        MoodCategory::Sad,
        MoodCategory::Angry,
    ];

    /// Position in [`MoodCategory::ALL`], the dense distribution order.
    pub fn index(self) -> usize {
        match self {
            MoodCategory::Happy => 0,
            MoodCategory::Neutral => 1,
            MoodCategory::Sad => 2,
            MoodCategory::Angry => 3,
        }
    }

    /// Y-axis position on the trend chart. Not a weight.
    pub fn ordinal(self) -> u8 {
        match self {
            MoodCategory::Angry => 1,
            MoodCategory::Sad => 2,
            MoodCategory::Neutral => 3,
            MoodCategory::Happy => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodCategory::Happy => "Happy",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Sad => "Sad",
            MoodCategory::Angry => "Angry",
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a free-form label onto a category by case-insensitive substring
/// match. First hit in the order happy, neutral/calm, sad, angry wins, so
/// "SADly" is Sad and anything unrecognized is Neutral.
pub fn normalize_mood(raw: &str) -> MoodCategory {
    let label = raw.to_lowercase();
    if label.contains("happy") {
        MoodCategory::Happy
    } else if label.contains("neutral") || label.contains("calm") {
        MoodCategory::Neutral
    } else if label.contains("sad") {
        MoodCategory::Sad
    } else if label.contains("angry") {
        MoodCategory::Angry
    } else {
        MoodCategory::Neutral
    }
}

pub fn resolve_intensity(raw: Option<i64>) -> u8 {
    match raw {
        Some(value) if (MIN_INTENSITY..=MAX_INTENSITY).contains(&value) => value as u8,
        _ => DEFAULT_INTENSITY,
    }
}

/// Trims tags, drops blanks and keeps the first occurrence of each.
pub fn resolve_activities(raw: Option<&[String]>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.unwrap_or_default() {
        let tag = tag.trim();
        if tag.is_empty() || tags.iter().any(|seen| seen == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// A stored entry with every optional field resolved to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: MoodCategory,
    pub intensity: u8,
    pub activities: Vec<String>,
    pub note: Option<String>,
}

impl ResolvedEntry {
    pub fn has_activity(&self, activity: &str) -> bool {
        self.activities.iter().any(|tag| tag == activity)
    }
}

impl MoodEntry {
    pub fn resolve(&self) -> ResolvedEntry {
        ResolvedEntry {
            id: self.id,
            date: self.date,
            mood: normalize_mood(self.mood.as_deref().unwrap_or_default()),
            intensity: resolve_intensity(self.intensity),
            activities: resolve_activities(self.activities.as_deref()),
            note: self.note.clone(),
        }
    }
}

pub fn resolve_all(entries: &[MoodEntry]) -> Vec<ResolvedEntry> {
    entries.iter().map(MoodEntry::resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_entry(
        mood: Option<&str>,
        intensity: Option<i64>,
        activities: Option<Vec<&str>>,
    ) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            mood: mood.map(str::to_string),
            intensity,
            activities: activities.map(|tags| tags.into_iter().map(str::to_string).collect()),
            note: None,
        }
    }

    #[test]
    fn normalize_matches_substrings_in_priority_order() {
        assert_eq!(normalize_mood("Happy"), MoodCategory::Happy);
        assert_eq!(normalize_mood("so HAPPY today"), MoodCategory::Happy);
        assert_eq!(normalize_mood("calm"), MoodCategory::Neutral);
        assert_eq!(normalize_mood("Neutral"), MoodCategory::Neutral);
        assert_eq!(normalize_mood("SADly"), MoodCategory::Sad);
        assert_eq!(normalize_mood("angry"), MoodCategory::Angry);
        // happy is tested before sad
        assert_eq!(normalize_mood("happy-sad"), MoodCategory::Happy);
        assert_eq!(normalize_mood("sad and angry"), MoodCategory::Sad);
    }

    #[test]
    fn normalize_falls_back_to_neutral() {
        assert_eq!(normalize_mood(""), MoodCategory::Neutral);
        assert_eq!(normalize_mood("excited"), MoodCategory::Neutral);
        assert_eq!(normalize_mood("anxious"), MoodCategory::Neutral);
        assert_eq!(normalize_mood("tired"), MoodCategory::Neutral);
    }

    #[test]
    fn index_matches_display_order() {
        for (position, category) in MoodCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn ordinals_follow_severity() {
        assert_eq!(MoodCategory::Angry.ordinal(), 1);
        assert_eq!(MoodCategory::Sad.ordinal(), 2);
        assert_eq!(MoodCategory::Neutral.ordinal(), 3);
        assert_eq!(MoodCategory::Happy.ordinal(), 4);
    }

    #[test]
    fn intensity_out_of_range_defaults() {
        assert_eq!(resolve_intensity(None), 5);
        assert_eq!(resolve_intensity(Some(0)), 5);
        assert_eq!(resolve_intensity(Some(-3)), 5);
        assert_eq!(resolve_intensity(Some(11)), 5);
        assert_eq!(resolve_intensity(Some(1)), 1);
        assert_eq!(resolve_intensity(Some(10)), 10);
    }

    #[test]
    fn resolve_applies_every_default() {
        let entry = raw_entry(Some("excited"), None, None);
        let resolved = entry.resolve();
        assert_eq!(resolved.mood, MoodCategory::Neutral);
        assert_eq!(resolved.intensity, 5);
        assert!(resolved.activities.is_empty());
    }

    #[test]
    fn resolve_treats_missing_mood_as_neutral() {
        let resolved = raw_entry(None, Some(7), None).resolve();
        assert_eq!(resolved.mood, MoodCategory::Neutral);
        assert_eq!(resolved.intensity, 7);
    }

    #[test]
    fn activities_are_deduplicated() {
        let tags = vec!["Work", " Work ", "", "Sleep", "Work"];
        let entry = raw_entry(Some("sad"), Some(2), Some(tags));
        assert_eq!(entry.resolve().activities, vec!["Work", "Sleep"]);
    }

    #[test]
    fn resolve_leaves_source_untouched() {
        let entry = raw_entry(Some("Happy"), Some(42), Some(vec!["A", "A"]));
        let before = entry.clone();
        let _ = entry.resolve();
        assert_eq!(entry, before);
    }

    #[test]
    fn categories_serialize_as_names() {
        let json = serde_json::to_string(&MoodCategory::ALL).unwrap();
        assert_eq!(json, r#"["Happy","Neutral","Sad","Angry"]"#);
    }
}
