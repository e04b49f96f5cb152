// src/journal/trends.rs — Per-day activity and mood over a trailing window

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::JournalEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTrend {
    pub date: NaiveDate,
    pub entry_count: usize,
    /// Mean of the moods recorded that day; `None` when no entry had one.
    pub mean_mood: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Improving,
    Declining,
    Stable,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

/// Longest window `daily_trend` reports, about ten years.
pub const MAX_TREND_DAYS: u32 = 3650;

/// One row per calendar day in `tz`, the `days` days ending at `today`.
///
/// Days without entries are included with a zero count. Windows longer than
/// [`MAX_TREND_DAYS`] are cut to it, and a window reaching past the earliest
/// representable date starts at that date.
pub fn daily_trend<Tz: TimeZone>(
    entries: &[JournalEntry],
    today: NaiveDate,
    days: u32,
    tz: &Tz,
) -> Vec<DayTrend> {
    if days == 0 {
        return Vec::new();
    }
    let days = days.min(MAX_TREND_DAYS);
    let first = Duration::try_days(days as i64 - 1)
        .and_then(|span| today.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN);

    let mut buckets: BTreeMap<NaiveDate, (usize, Vec<u8>)> = BTreeMap::new();
    for entry in entries {
        let day = entry.timestamp.with_timezone(tz).date_naive();
        if day < first || day > today {
            continue;
        }
        let bucket = buckets.entry(day).or_default();
        bucket.0 += 1;
        if let Some(mood) = entry.mood {
            bucket.1.push(mood);
        }
    }

    first
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            let (entry_count, moods) = buckets.remove(&date).unwrap_or_default();
            DayTrend {
                date,
                entry_count,
                mean_mood: mean(&moods),
            }
        })
        .collect()
}

/// Compare mean mood of the last seven days against the seven before.
///
/// Stable when either week has no mood, or the difference is under half a point.
pub fn mood_direction(trend: &[DayTrend]) -> Direction {
    let split = trend.len().saturating_sub(7);
    let recent = &trend[split..];
    let older = &trend[split.saturating_sub(7)..split];

    let avg = |days: &[DayTrend]| -> Option<f64> {
        let moods: Vec<f64> = days.iter().filter_map(|d| d.mean_mood).collect();
        if moods.is_empty() {
            None
        } else {
            Some(moods.iter().sum::<f64>() / moods.len() as f64)
        }
    };

    match (avg(recent), avg(older)) {
        (Some(r), Some(o)) if r - o >= 0.5 => Direction::Improving,
        (Some(r), Some(o)) if o - r >= 0.5 => Direction::Declining,
        _ => Direction::Stable,
    }
}

/// Theme counts, most frequent first; ties by name.
pub fn theme_frequency(entries: &[JournalEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        for theme in &entry.themes {
            *counts.entry(theme.as_str()).or_default() += 1;
        }
    }
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(theme, n)| (theme.to_string(), n))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

fn mean(values: &[u8]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn entry(content: &str, mood: Option<u8>, when: DateTime<Utc>) -> JournalEntry {
        JournalEntry::new("a", content, mood, None, when)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_daily_trend_fills_gaps() {
        let entries = vec![
            entry("x", Some(4), at(8, 9)),
            entry("y", Some(8), at(8, 20)),
            entry("z", None, at(10, 9)),
            entry("old", Some(1), at(1, 9)),
        ];
        let trend = daily_trend(&entries, day(10), 3, &Utc);
        assert_eq!(
            trend,
            vec![
                DayTrend { date: day(8), entry_count: 2, mean_mood: Some(6.0) },
                DayTrend { date: day(9), entry_count: 0, mean_mood: None },
                DayTrend { date: day(10), entry_count: 1, mean_mood: None },
            ]
        );
        assert!(daily_trend(&entries, day(10), 0, &Utc).is_empty());
    }

    #[test]
    fn test_daily_trend_huge_window_is_clamped() {
        let entries = vec![entry("x", Some(5), at(4, 9))];
        let trend = daily_trend(&entries, day(10), 200_000_000, &Utc);
        assert_eq!(trend.len(), MAX_TREND_DAYS as usize);
        assert_eq!(trend.last().unwrap().date, day(10));
        assert_eq!(trend.iter().map(|d| d.entry_count).sum::<usize>(), 1);

        let trend = daily_trend(&entries, NaiveDate::MIN + Duration::days(2), 200_000_000, &Utc);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].date, NaiveDate::MIN);
        assert!(trend.iter().all(|d| d.entry_count == 0));
    }

    #[test]
    fn test_mood_direction() {
        let mut entries = Vec::new();
        for d in 1..=7 {
            entries.push(entry("x", Some(3), at(d, 12)));
        }
        for d in 8..=14 {
            entries.push(entry("x", Some(7), at(d, 12)));
        }
        let trend = daily_trend(&entries, day(14), 14, &Utc);
        assert_eq!(mood_direction(&trend), Direction::Improving);

        let flat = daily_trend(&entries[7..], day(14), 14, &Utc);
        assert_eq!(mood_direction(&flat), Direction::Stable);
    }

    #[test]
    fn test_theme_frequency_sorted() {
        let entries = vec![
            entry("money worries and my boss", None, at(1, 9)),
            entry("budget again", None, at(2, 9)),
            entry("met friends", None, at(3, 9)),
        ];
        let freq = theme_frequency(&entries);
        assert_eq!(freq[0], ("finances".to_string(), 2));
        assert_eq!(freq.len(), 3);
        // ties broken alphabetically
        let names: Vec<&str> = freq[1..].iter().map(|(t, _)| t.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
