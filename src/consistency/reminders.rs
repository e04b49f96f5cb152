// src/consistency/reminders.rs — When to nudge, and what to say

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;

use super::model::{ConsistencyData, ConsistencyLevel, ReminderFrequency, ReminderSettings};

const TWICE_DAILY_TIMES: [&str; 2] = ["09:00", "18:00"];
/// Monday, Wednesday, Friday.
const CUSTOM_DAYS: [u8; 3] = [1, 3, 5];

const DEFAULT_MESSAGE: &str = "Time for your daily reflection!";

/// True when `now` (local wall clock, minute resolution) is a reminder slot.
pub fn should_send_reminder<Tz: TimeZone>(settings: &ReminderSettings, now: &DateTime<Tz>) -> bool {
    if !settings.enabled {
        return false;
    }

    let clock = format!("{:02}:{:02}", now.hour(), now.minute());
    let weekday = now.weekday().num_days_from_sunday() as u8;

    match settings.frequency {
        ReminderFrequency::Daily => clock == settings.time,
        ReminderFrequency::TwiceDaily => {
            if settings.custom_times.is_empty() {
                TWICE_DAILY_TIMES.contains(&clock.as_str())
            } else {
                settings.custom_times.iter().any(|t| *t == clock)
            }
        }
        ReminderFrequency::Weekly => weekday == 0 && clock == settings.time,
        ReminderFrequency::Custom => {
            let on_day = if settings.custom_days.is_empty() {
                CUSTOM_DAYS.contains(&weekday)
            } else {
                settings.custom_days.contains(&weekday)
            };
            on_day && clock == settings.time
        }
    }
}

/// Reminder text for the account's tier, mentioning the streak where it fits.
pub fn personalized_message<R: Rng + ?Sized>(data: Option<&ConsistencyData>, rng: &mut R) -> String {
    let Some(data) = data else {
        return DEFAULT_MESSAGE.to_string();
    };

    let streak = data.current_streak;
    let options: Vec<String> = match data.consistency_level {
        ConsistencyLevel::Beginner => vec![
            "Ready to start your reflection journey? Take a moment to check in with yourself.".into(),
            "Your first steps toward mindfulness await. How are you feeling today?".into(),
            "Begin your daily practice with a gentle reflection.".into(),
        ],
        ConsistencyLevel::Intermediate => vec![
            format!("Great job maintaining your {streak}-day streak! Keep the momentum going."),
            "Your consistency is building. Time for today's reflection.".into(),
            format!("You're on a {streak}-day streak! Don't break the chain."),
        ],
        ConsistencyLevel::Advanced => vec![
            format!("Impressive {streak}-day streak! Your dedication is inspiring."),
            "Your advanced practice continues. How has your day been?".into(),
            format!("Maintaining excellence with {streak} days of reflection."),
        ],
        ConsistencyLevel::Expert => vec![
            format!("Master level: {streak} days strong! Your wisdom grows daily."),
            "Your expert practice continues. Share your insights.".into(),
            format!("Legendary {streak}-day streak! Your journey inspires others."),
        ],
    };

    options
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
}

/// Accepts "HH:MM" with a 24-hour clock.
pub fn is_valid_time(s: &str) -> bool {
    let Some((h, m)) = s.split_once(':') else {
        return false;
    };
    if h.len() != 2 || m.len() != 2 {
        return false;
    }
    matches!((h.parse::<u8>(), m.parse::<u8>()), (Ok(h), Ok(m)) if h < 24 && m < 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::GoalsConfig;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // 2026-03-01 is a Sunday
    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, h, m, 0).unwrap()
    }

    fn settings(frequency: ReminderFrequency) -> ReminderSettings {
        ReminderSettings {
            frequency,
            ..ReminderSettings::default()
        }
    }

    #[test]
    fn test_daily() {
        let s = settings(ReminderFrequency::Daily);
        assert!(should_send_reminder(&s, &at(3, 9, 0)));
        assert!(!should_send_reminder(&s, &at(3, 9, 1)));
        let off = ReminderSettings {
            enabled: false,
            ..s
        };
        assert!(!should_send_reminder(&off, &at(3, 9, 0)));
    }

    #[test]
    fn test_twice_daily_defaults_and_custom() {
        let s = settings(ReminderFrequency::TwiceDaily);
        assert!(should_send_reminder(&s, &at(3, 9, 0)));
        assert!(should_send_reminder(&s, &at(3, 18, 0)));
        assert!(!should_send_reminder(&s, &at(3, 12, 0)));

        let custom = ReminderSettings {
            custom_times: vec!["07:30".into(), "21:15".into()],
            ..s
        };
        assert!(should_send_reminder(&custom, &at(3, 21, 15)));
        assert!(!should_send_reminder(&custom, &at(3, 18, 0)));
    }

    #[test]
    fn test_weekly_on_sunday() {
        let s = settings(ReminderFrequency::Weekly);
        assert!(should_send_reminder(&s, &at(1, 9, 0)));
        assert!(!should_send_reminder(&s, &at(2, 9, 0)));
    }

    #[test]
    fn test_custom_days() {
        let s = settings(ReminderFrequency::Custom);
        assert!(should_send_reminder(&s, &at(2, 9, 0))); // Monday
        assert!(!should_send_reminder(&s, &at(3, 9, 0))); // Tuesday

        let s = ReminderSettings {
            custom_days: vec![2],
            ..s
        };
        assert!(should_send_reminder(&s, &at(3, 9, 0)));
        assert!(!should_send_reminder(&s, &at(2, 9, 0)));
    }

    #[test]
    fn test_message_interpolates_streak() {
        let mut data = ConsistencyData::new("acct", &GoalsConfig::default(), Utc::now());
        data.consistency_level = ConsistencyLevel::Expert;
        data.current_streak = 42;
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let msg = personalized_message(Some(&data), &mut rng);
            assert!(msg.contains("42") || msg.contains("expert practice"), "{msg}");
        }
        assert_eq!(personalized_message(None, &mut rng), DEFAULT_MESSAGE);
    }

    #[test]
    fn test_time_validation() {
        assert!(is_valid_time("09:00"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("09-00"));
    }
}
