// src/consistency/scoring.rs — Streak, tier, engagement and goal arithmetic
//
// `on_new_entry` is the only mutation. Everything except the streak
// transition is recomputed from scratch on every call.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use super::model::{ConsistencyData, ConsistencyLevel, GoalProgress};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Record one new journal entry made at `now`.
///
/// `entry_times` is the account's entry log (at least everything since the
/// start of the current month), including the entry being recorded.
pub fn on_new_entry<Tz: TimeZone>(
    data: &mut ConsistencyData,
    now: &DateTime<Tz>,
    entry_times: &[DateTime<Utc>],
) {
    let today = now.date_naive();
    advance_streak(data, today);
    recompute(data, now, entry_times);
    data.updated_at = now.with_timezone(&Utc);
}

fn advance_streak(data: &mut ConsistencyData, today: NaiveDate) {
    let yesterday = today.pred_opt();
    match data.last_entry_date {
        Some(last) if last == today => {
            data.total_entries += 1;
        }
        Some(last) if Some(last) == yesterday => {
            data.current_streak += 1;
            data.total_entries += 1;
            data.last_entry_date = Some(today);
        }
        // First entry, a gap, or a last date in the future (clock skew)
        _ => {
            data.current_streak = 1;
            data.total_entries += 1;
            data.last_entry_date = Some(today);
        }
    }
    data.longest_streak = data.longest_streak.max(data.current_streak);
}

/// Refresh every derived field.
pub fn recompute<Tz: TimeZone>(
    data: &mut ConsistencyData,
    now: &DateTime<Tz>,
    entry_times: &[DateTime<Utc>],
) {
    let days = days_since_start(data.created_at, now.with_timezone(&Utc));
    data.average_entries_per_day = data.total_entries as f64 / days as f64;
    data.consistency_level = consistency_level(
        data.longest_streak,
        data.average_entries_per_day,
        data.total_entries,
    );
    data.engagement_score = engagement_score(
        data.current_streak,
        data.longest_streak,
        data.average_entries_per_day,
        data.total_entries,
    );
    data.goal_progress = goal_progress(now, entry_times, data.weekly_goal, data.monthly_goal);
}

/// Started days since the record was created, never less than one.
pub fn days_since_start(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - created_at).num_milliseconds();
    if elapsed_ms <= 0 {
        return 1;
    }
    ((elapsed_ms + DAY_MS - 1) / DAY_MS).max(1)
}

/// Tier rules, first match wins.
pub fn consistency_level(longest_streak: u32, average_per_day: f64, total_entries: u32) -> ConsistencyLevel {
    if longest_streak >= 30 && average_per_day >= 2.0 {
        ConsistencyLevel::Expert
    } else if longest_streak >= 14 && average_per_day >= 1.0 {
        ConsistencyLevel::Advanced
    } else if longest_streak >= 7 || total_entries >= 50 {
        ConsistencyLevel::Intermediate
    } else {
        ConsistencyLevel::Beginner
    }
}

/// Weighted 0-100 score: streak 40, frequency 30, volume 20, best streak 10.
pub fn engagement_score(
    current_streak: u32,
    longest_streak: u32,
    average_per_day: f64,
    total_entries: u32,
) -> u8 {
    let streak = (current_streak as f64 / 30.0 * 40.0).min(40.0);
    let consistency = (average_per_day / 2.0 * 30.0).min(30.0);
    let commitment = (total_entries as f64 / 100.0 * 20.0).min(20.0);
    let longest_bonus = (longest_streak as f64 / 50.0 * 10.0).min(10.0);

    let score = (streak + consistency + commitment + longest_bonus).round();
    score.clamp(0.0, 100.0) as u8
}

/// Progress toward the weekly (since Sunday) and monthly (since the 1st) goals.
///
/// Week and month boundaries are calendar days in `now`'s time zone.
pub fn goal_progress<Tz: TimeZone>(
    now: &DateTime<Tz>,
    entry_times: &[DateTime<Utc>],
    weekly_goal: u32,
    monthly_goal: u32,
) -> GoalProgress {
    let today = now.date_naive();
    let week_start = week_start(today);
    let month_start = month_start(today);
    let tz = now.timezone();

    let (mut weekly, mut monthly) = (0u32, 0u32);
    for entry in entry_times {
        let day = entry.with_timezone(&tz).date_naive();
        if day >= week_start {
            weekly += 1;
        }
        if day >= month_start {
            monthly += 1;
        }
    }

    GoalProgress {
        weekly: progress_percent(weekly, weekly_goal),
        monthly: progress_percent(monthly, monthly_goal),
    }
}

/// Most recent Sunday, `day` itself when it is a Sunday.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_sunday() as i64)
}

pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn progress_percent(count: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (count as f64 / goal as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::GoalsConfig;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn fresh(created: DateTime<Utc>) -> ConsistencyData {
        ConsistencyData::new("acct", &GoalsConfig::default(), created)
    }

    #[test]
    fn test_consecutive_days_then_gap() {
        let created = at(2026, 3, 1, 8);
        let mut data = fresh(created);
        let mut log = Vec::new();
        let mut streaks = Vec::new();

        for day in [1, 2, 3, 6] {
            let now = at(2026, 3, day, 20);
            log.push(now);
            on_new_entry(&mut data, &now, &log);
            streaks.push(data.current_streak);
        }

        assert_eq!(streaks, vec![1, 2, 3, 1]);
        assert_eq!(data.longest_streak, 3);
        assert_eq!(data.total_entries, 4);
    }

    #[test]
    fn test_same_day_only_counts_total() {
        let mut data = fresh(at(2026, 3, 1, 8));
        let mut log = vec![at(2026, 3, 1, 9)];
        on_new_entry(&mut data, &at(2026, 3, 1, 9), &log);
        log.push(at(2026, 3, 1, 21));
        on_new_entry(&mut data, &at(2026, 3, 1, 21), &log);

        assert_eq!(data.current_streak, 1);
        assert_eq!(data.total_entries, 2);
        assert_eq!(data.last_entry_date, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn test_future_last_entry_resets_streak() {
        let mut data = fresh(at(2026, 3, 1, 8));
        data.current_streak = 9;
        data.longest_streak = 9;
        data.last_entry_date = NaiveDate::from_ymd_opt(2026, 3, 20);
        let now = at(2026, 3, 10, 12);
        on_new_entry(&mut data, &now, &[now]);
        assert_eq!(data.current_streak, 1);
        assert_eq!(data.longest_streak, 9);
        assert_eq!(data.last_entry_date, Some(now.date_naive()));
    }

    #[test]
    fn test_average_uses_started_days() {
        let created = at(2026, 3, 1, 0);
        assert_eq!(days_since_start(created, created), 1);
        assert_eq!(days_since_start(created, at(2026, 3, 1, 1)), 1);
        assert_eq!(days_since_start(created, at(2026, 3, 2, 1)), 2);
        assert_eq!(days_since_start(created, at(2026, 2, 20, 0)), 1);

        let mut data = fresh(created);
        let now = at(2026, 3, 3, 12); // 2.5 days -> 3
        on_new_entry(&mut data, &now, &[now]);
        assert!((data.average_entries_per_day - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tier_precedence() {
        assert_eq!(consistency_level(30, 2.0, 10), ConsistencyLevel::Expert);
        assert_eq!(consistency_level(30, 1.5, 10), ConsistencyLevel::Advanced);
        assert_eq!(consistency_level(14, 1.0, 0), ConsistencyLevel::Advanced);
        assert_eq!(consistency_level(14, 0.9, 0), ConsistencyLevel::Intermediate);
        assert_eq!(consistency_level(7, 0.1, 0), ConsistencyLevel::Intermediate);
        assert_eq!(consistency_level(2, 0.1, 50), ConsistencyLevel::Intermediate);
        assert_eq!(consistency_level(6, 3.0, 49), ConsistencyLevel::Beginner);
    }

    #[test]
    fn test_engagement_score_terms() {
        assert_eq!(engagement_score(0, 0, 0.0, 0), 0);
        assert_eq!(engagement_score(30, 50, 2.0, 100), 100);
        assert_eq!(engagement_score(300, 500, 20.0, 10_000), 100);
        // 15/30*40 = 20, 1/2*30 = 15, 50/100*20 = 10, 25/50*10 = 5
        assert_eq!(engagement_score(15, 25, 1.0, 50), 50);
        // 1/30*40 = 1.33 + 0.5/2*30 = 7.5 + 0.2 + 0.2 = 9.23 -> 9
        assert_eq!(engagement_score(1, 1, 0.5, 1), 9);
    }

    #[test]
    fn test_engagement_score_monotonic() {
        let mut previous = 0;
        for streak in 0..60 {
            let s = engagement_score(streak, 10, 1.0, 20);
            assert!(s >= previous);
            assert!(s <= 100);
            previous = s;
        }
        let mut previous = 0;
        for total in 0..300 {
            let s = engagement_score(5, 10, 1.0, total);
            assert!(s >= previous);
            previous = s;
        }
        let mut previous = 0;
        for longest in 0..120 {
            let s = engagement_score(5, longest, 1.0, 20);
            assert!(s >= previous);
            previous = s;
        }
    }

    #[test]
    fn test_weekly_goal_progress_unrounded() {
        // 2026-03-04 is a Wednesday; week started Sunday 2026-03-01
        let now = at(2026, 3, 4, 18);
        let log = vec![
            at(2026, 2, 28, 10), // Saturday before: neither week nor month
            at(2026, 3, 1, 10),
            at(2026, 3, 2, 10),
            at(2026, 3, 4, 10),
        ];
        let progress = goal_progress(&now, &log, 7, 30);
        assert!((progress.weekly - 300.0 / 7.0).abs() < 1e-9);
        assert!((progress.monthly - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress_clamped_and_zero_goal() {
        let now = at(2026, 3, 4, 18);
        let log: Vec<_> = (0..20).map(|h| at(2026, 3, 3, h)).collect();
        let progress = goal_progress(&now, &log, 7, 0);
        assert_eq!(progress.weekly, 100.0);
        assert_eq!(progress.monthly, 0.0);
    }

    #[test]
    fn test_week_and_month_start() {
        let wed = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(week_start(wed), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert_eq!(week_start(sunday), sunday);
        assert_eq!(month_start(wed), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_calendar_follows_time_zone() {
        use chrono::FixedOffset;
        // 23:30 on Saturday in UTC-5 is already Sunday in UTC
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 7, 23, 30, 0).unwrap();
        let entry = now.with_timezone(&Utc);
        let progress = goal_progress(&now, &[entry], 1, 1);
        // Local week began Sunday 2026-03-01, so the entry counts
        assert_eq!(progress.weekly, 100.0);

        let sunday_local = tz.with_ymd_and_hms(2026, 3, 8, 9, 0, 0).unwrap();
        let progress = goal_progress(&sunday_local, &[entry], 1, 1);
        // New local week: Saturday's entry no longer counts
        assert_eq!(progress.weekly, 0.0);
    }

    #[test]
    fn test_recompute_idempotent() {
        let mut data = fresh(at(2026, 3, 1, 8));
        let now = at(2026, 3, 2, 8);
        on_new_entry(&mut data, &now, &[now]);
        let snapshot = data.clone();
        recompute(&mut data, &now, &[now]);
        assert_eq!(data, snapshot);
    }
}
