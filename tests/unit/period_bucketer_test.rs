// Property-based tests for period bucketing
//
// Keys must sort the same way the dates they were derived from do, so that
// ascending key order is chronological order for every period and week rule.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use venuebook::reports::{Period, PeriodBucketer, WeekRule};

const PERIODS: [Period; 4] = [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly];
const WEEK_RULES: [WeekRule; 3] = [WeekRule::Iso, WeekRule::Sunday, WeekRule::Monday];

fn epoch_plus(days: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + Duration::days(days)
}

proptest! {
    #[test]
    fn test_keys_are_monotonic_in_date(a in 0i64..60_000, b in 0i64..60_000) {
        let (earlier, later) = (epoch_plus(a.min(b)), epoch_plus(a.max(b)));

        for rule in WEEK_RULES {
            let bucketer = PeriodBucketer::new(rule);
            for period in PERIODS {
                let k1 = bucketer.bucket_date(period, earlier).key;
                let k2 = bucketer.bucket_date(period, later).key;
                prop_assert!(
                    k1 <= k2,
                    "{:?}/{:?}: {} ({}) sorted after {} ({})",
                    rule, period, k1, earlier, k2, later
                );
            }
        }
    }

    #[test]
    fn test_week_numbers_stay_in_range(days in 0i64..60_000) {
        let date = epoch_plus(days);

        let (_, iso) = WeekRule::Iso.week_of(date);
        prop_assert!((1..=53).contains(&iso));

        for rule in [WeekRule::Sunday, WeekRule::Monday] {
            let (year, week) = rule.week_of(date);
            prop_assert_eq!(year, date.year());
            prop_assert!(week <= 53);
        }
    }

    #[test]
    fn test_time_of_day_is_ignored(days in 0i64..60_000, secs in 0u32..86_400) {
        let date = epoch_plus(days);
        let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
        let later = midnight + Duration::seconds(secs as i64);
        let bucketer = PeriodBucketer::default();

        for period in PERIODS {
            prop_assert_eq!(bucketer.key(period, midnight), bucketer.key(period, later));
        }
    }

    #[test]
    fn test_daily_keys_identify_the_day(a in 0i64..60_000, b in 0i64..60_000) {
        let bucketer = PeriodBucketer::default();
        let k1 = bucketer.bucket_date(Period::Daily, epoch_plus(a)).key;
        let k2 = bucketer.bucket_date(Period::Daily, epoch_plus(b)).key;
        prop_assert_eq!(k1 == k2, a == b);
    }
}

#[test]
fn test_key_formats() {
    let bucketer = PeriodBucketer::default();
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();

    assert_eq!(bucketer.bucket_date(Period::Daily, date).key, "2025-03-07");
    assert_eq!(bucketer.bucket_date(Period::Weekly, date).key, "2025-W10");
    assert_eq!(bucketer.bucket_date(Period::Monthly, date).key, "2025-03");
    assert_eq!(bucketer.bucket_date(Period::Yearly, date).key, "2025");
}

#[test]
fn test_iso_week_year_boundaries() {
    let bucketer = PeriodBucketer::new(WeekRule::Iso);

    let label = bucketer.bucket_date(Period::Weekly, NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
    assert_eq!(label.key, "2025-W01");
    assert_eq!(label.year, 2025);
    assert_eq!(label.week, Some(1));

    let label = bucketer.bucket_date(Period::Weekly, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    assert_eq!(label.key, "2020-W53");
}

#[test]
fn test_sunday_rule_week_zero() {
    // 2025-01-01 is a Wednesday; the first Sunday is 2025-01-05
    let bucketer = PeriodBucketer::new(WeekRule::Sunday);

    let jan1 = bucketer.bucket_date(Period::Weekly, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(jan1.key, "2025-W00");

    let jan5 = bucketer.bucket_date(Period::Weekly, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    assert_eq!(jan5.key, "2025-W01");
}

#[test]
fn test_monday_rule_week_zero() {
    // First Monday of 2025 is 2025-01-06
    let bucketer = PeriodBucketer::new(WeekRule::Monday);

    let jan5 = bucketer.bucket_date(Period::Weekly, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    assert_eq!(jan5.key, "2025-W00");

    let jan6 = bucketer.bucket_date(Period::Weekly, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    assert_eq!(jan6.key, "2025-W01");
}

#[test]
fn test_period_parsing() {
    assert_eq!(Period::parse_or_default(None).unwrap(), Period::Monthly);
    assert_eq!(Period::parse_or_default(Some("weekly")).unwrap(), Period::Weekly);

    let err = Period::parse_or_default(Some("hourly")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid period 'hourly'. Valid values: daily, weekly, monthly, yearly"
    );
}
