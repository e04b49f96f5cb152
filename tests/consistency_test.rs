// tests/consistency_test.rs — Integration test: journaling drives streaks, tiers and goals

use std::sync::Arc;

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;

use kaizen::cli::app::App;
use kaizen::consistency::insights;
use kaizen::consistency::{ConsistencyLevel, ConsistencyService};
use kaizen::infra::config::{Config, GoalsConfig};
use kaizen::journal::JournalService;
use kaizen::store::{ConsistencyStore, EntryLog, Store};

fn journal() -> (JournalService, Arc<ConsistencyService>, Arc<Store>) {
    let store = Arc::new(Store::open_in_memory().unwrap());
    let consistency = Arc::new(ConsistencyService::new(
        store.clone(),
        store.clone(),
        GoalsConfig::default(),
    ));
    let journal = JournalService::new(store.clone(), consistency.clone());
    (journal, consistency, store)
}

#[test]
fn test_streak_breaks_after_gap() {
    let (journal, _, _) = journal();
    let start = Utc.with_ymd_and_hms(2026, 4, 1, 19, 0, 0).unwrap();

    for day in 0..3 {
        journal
            .record("acct", "evening notes", Some(6), None, &(start + Duration::days(day)))
            .unwrap();
    }
    let (_, data) = journal
        .record("acct", "back after a break", Some(5), None, &(start + Duration::days(5)))
        .unwrap();

    assert_eq!(data.current_streak, 1);
    assert_eq!(data.longest_streak, 3);
    assert_eq!(data.total_entries, 4);
}

#[test]
fn test_same_day_entries_count_once_for_streak() {
    let (journal, _, _) = journal();
    let morning = Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap();

    journal.record("acct", "morning", None, None, &morning).unwrap();
    let (_, data) = journal
        .record("acct", "evening", None, None, &(morning + Duration::hours(12)))
        .unwrap();

    assert_eq!(data.current_streak, 1);
    assert_eq!(data.total_entries, 2);
}

#[test]
fn test_local_calendar_decides_days() {
    let (journal, _, _) = journal();
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    // 14:30Z and 15:30Z fall on one UTC day but two Tokyo days
    let late = tokyo.with_ymd_and_hms(2026, 4, 1, 23, 30, 0).unwrap();
    let early = tokyo.with_ymd_and_hms(2026, 4, 2, 0, 30, 0).unwrap();

    journal.record("acct", "late night", None, None, &late).unwrap();
    let (_, data) = journal.record("acct", "just after midnight", None, None, &early).unwrap();

    assert_eq!(data.current_streak, 2);
    assert_eq!(data.last_entry_date, Some(early.date_naive()));
}

#[test]
fn test_month_of_daily_entries_reaches_advanced() {
    let (journal, consistency, _) = journal();
    let start = Utc.with_ymd_and_hms(2026, 6, 1, 20, 0, 0).unwrap();

    let mut last = None;
    for day in 0..30 {
        let (_, data) = journal
            .record("acct", "daily check-in", Some(7), None, &(start + Duration::days(day)))
            .unwrap();
        last = Some(data);
    }
    let data = last.unwrap();

    assert_eq!(data.current_streak, 30);
    assert_eq!(data.consistency_level, ConsistencyLevel::Advanced);
    assert!((data.goal_progress.monthly - 100.0).abs() < 1e-9);
    assert_eq!(consistency.get("acct").unwrap().unwrap(), data);

    let summary = insights::insights(Some(&data));
    assert!(!summary.pattern.is_empty());
    assert!(!summary.next_milestone.is_empty());
}

#[test]
fn test_entries_and_record_agree() {
    let (journal, _, store) = journal();
    let at = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();

    let (entry, data) = journal
        .record("acct", "Argued with my boss about money", Some(3), None, &at)
        .unwrap();

    assert!(entry.themes.contains(&"finances".to_string()));
    assert_eq!(store.entries("acct").unwrap(), vec![entry]);
    assert_eq!(store.load("acct").unwrap().unwrap(), data);
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("kaizen.db");
    let at = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();

    {
        let app = App::open_at(Config::default(), Some("acct".into()), &db).unwrap();
        app.journal.record("acct", "first", None, None, &at).unwrap();
        app.journal
            .record("acct", "second", None, None, &(at + Duration::days(1)))
            .unwrap();
    }

    let app = App::open_at(Config::default(), Some("acct".into()), &db).unwrap();
    let data = app.consistency.get("acct").unwrap().unwrap();
    assert_eq!(data.current_streak, 2);
    assert_eq!(app.journal.entries("acct").unwrap().len(), 2);
}
