use crate::models::{JournalEntry, MoodEntry};
use crate::mood::{MoodCategory, ResolvedEntry, DEFAULT_INTENSITY};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Anything that can be placed on a calendar.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

impl Dated for MoodEntry {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Dated for ResolvedEntry {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Dated for JournalEntry {
    fn date(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub values: Vec<u8>,
    pub intensities: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub labels: Vec<MoodCategory>,
    pub counts: Vec<usize>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStat {
    pub count: usize,
    pub average_intensity: f64,
    pub mood_distribution: BTreeMap<MoodCategory, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup<T> {
    pub date: NaiveDate,
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGroup<T> {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<T>,
}

impl<T> MonthGroup<T> {
    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "1W")]
    Week,
    #[default]
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "3M")]
    Quarter,
    #[serde(rename = "6M")]
    HalfYear,
    #[serde(rename = "1Y")]
    Year,
}

impl TimeRange {
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::HalfYear => 180,
            TimeRange::Year => 365,
        }
    }
}

/// Everything the history view charts, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    pub time_series: TimeSeries,
    pub distribution: Distribution,
    pub activities: Vec<String>,
    pub activity_stats: BTreeMap<String, ActivityStat>,
}

/// Line-chart series ordered by date ascending. The sort is stable, so
/// entries sharing a timestamp keep their input order.
pub fn build_time_series<F>(entries: &[ResolvedEntry], label: F) -> TimeSeries
where
    F: Fn(&DateTime<Utc>) -> String,
{
    let mut sorted: Vec<&ResolvedEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);

    let mut series = TimeSeries {
        labels: Vec::with_capacity(sorted.len()),
        values: Vec::with_capacity(sorted.len()),
        intensities: Vec::with_capacity(sorted.len()),
    };
    for entry in sorted {
        series.labels.push(label(&entry.date));
        series.values.push(entry.mood.ordinal());
        series.intensities.push(entry.intensity);
    }
    series
}

/// Dense tally in the fixed category order, zero buckets included.
pub fn build_distribution(entries: &[ResolvedEntry]) -> Distribution {
    let mut counts = [0usize; MoodCategory::ALL.len()];
    for entry in entries {
        counts[entry.mood.index()] += 1;
    }

    Distribution {
        labels: MoodCategory::ALL.to_vec(),
        counts: counts.to_vec(),
    }
}

/// Every tag used by any entry, in order of first appearance.
pub fn activity_universe(entries: &[ResolvedEntry]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in entries.iter().flat_map(|entry| entry.activities.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

pub fn build_activity_stats(entries: &[ResolvedEntry]) -> BTreeMap<String, ActivityStat> {
    activity_universe(entries)
        .into_iter()
        .map(|tag| {
            let stat = activity_stat(entries, &tag);
            (tag, stat)
        })
        .collect()
}

fn activity_stat(entries: &[ResolvedEntry], tag: &str) -> ActivityStat {
    let mut count = 0usize;
    let mut intensity_sum = 0u64;
    let mut mood_distribution = BTreeMap::new();

    for entry in entries.iter().filter(|entry| entry.has_activity(tag)) {
        count += 1;
        intensity_sum += u64::from(entry.intensity);
        *mood_distribution.entry(entry.mood).or_insert(0) += 1;
    }

    ActivityStat {
        count,
        average_intensity: average_to_tenth(intensity_sum, count as u64),
        mood_distribution,
    }
}

/// Mean of `sum / count` rounded half-up to one decimal. Computed in integer
/// tenths so that x.x5 always rounds up regardless of float representation.
/// An empty set averages to the default intensity.
pub fn average_to_tenth(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return f64::from(DEFAULT_INTENSITY);
    }
    let tenths = (sum * 20 + count) / (count * 2);
    tenths as f64 / 10.0
}

/// Groups by calendar date in `tz`. Groups appear in first-seen order.
pub fn group_by_calendar_date<T, Tz>(entries: &[T], tz: &Tz) -> Vec<DateGroup<T>>
where
    T: Dated + Clone,
    Tz: TimeZone,
{
    let mut groups: Vec<DateGroup<T>> = Vec::new();
    for entry in entries {
        let date = entry.date().with_timezone(tz).date_naive();
        match groups.iter_mut().find(|group| group.date == date) {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(DateGroup {
                date,
                entries: vec![entry.clone()],
            }),
        }
    }
    groups
}

/// Groups by `(year, month)` in `tz`, first-seen order. See
/// [`sort_month_groups_desc`] for display order.
pub fn group_by_month<T, Tz>(entries: &[T], tz: &Tz) -> Vec<MonthGroup<T>>
where
    T: Dated + Clone,
    Tz: TimeZone,
{
    let mut groups: Vec<MonthGroup<T>> = Vec::new();
    for entry in entries {
        let local = entry.date().with_timezone(tz);
        let (year, month) = (local.year(), local.month());
        match groups
            .iter_mut()
            .find(|group| group.year == year && group.month == month)
        {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(MonthGroup {
                year,
                month,
                entries: vec![entry.clone()],
            }),
        }
    }
    groups
}

pub fn sort_newest_first<T: Dated>(entries: &mut [T]) {
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.date()));
}

/// Most recent month first, and newest entry first inside each month.
pub fn sort_month_groups_desc<T: Dated>(groups: &mut [MonthGroup<T>]) {
    groups.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    for group in groups.iter_mut() {
        sort_newest_first(&mut group.entries);
    }
}

/// Keeps entries dated within the last `range` days up to and including `now`.
pub fn filter_by_range<T>(entries: &[T], range: TimeRange, now: DateTime<Utc>) -> Vec<T>
where
    T: Dated + Clone,
{
    let start = now - Duration::days(range.days());
    entries
        .iter()
        .filter(|entry| {
            let date = entry.date();
            date >= start && date <= now
        })
        .cloned()
        .collect()
}

/// `None` and `"all"` keep everything.
pub fn filter_by_activity(entries: &[ResolvedEntry], activity: Option<&str>) -> Vec<ResolvedEntry> {
    match activity {
        None | Some("all") => entries.to_vec(),
        Some(tag) => entries
            .iter()
            .filter(|entry| entry.has_activity(tag))
            .cloned()
            .collect(),
    }
}

/// Charts cover the activity-filtered entries; activity statistics always
/// cover the whole snapshot so every tag stays selectable.
pub fn build_history<F>(entries: &[ResolvedEntry], activity: Option<&str>, label: F) -> History
where
    F: Fn(&DateTime<Utc>) -> String,
{
    let charted = filter_by_activity(entries, activity);
    History {
        time_series: build_time_series(&charted, label),
        distribution: build_distribution(&charted),
        activities: activity_universe(entries),
        activity_stats: build_activity_stats(entries),
    }
}

pub fn local_date_label(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
