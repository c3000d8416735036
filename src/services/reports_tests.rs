use chrono::{NaiveDate, TimeZone, Utc};

use crate::api::{EntryId, ProjectId};
use crate::models::TimeEntry;
use crate::services::reports::{
    average_hours_per_day, compute_heatmap, compute_report, compute_streak, daily_breakdown,
    day_window, month_window, predict, project_breakdown, tag_breakdown, week_window,
    ReportPeriod, ReportPolicy, Trend,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(project: &str, start: &str, duration: i64, tags: &[&str]) -> TimeEntry {
    TimeEntry {
        id: EntryId::generate(),
        project_id: ProjectId::new(project),
        task_id: None,
        start_time: start.parse().unwrap(),
        end_time: None,
        duration,
        is_running: false,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        notes: None,
        activities: vec![],
    }
}

// =========================================================
// Window helpers
// =========================================================

#[test]
fn test_week_window_from_wednesday() {
    // 2024-01-17 is a Wednesday.
    let (start, end) = week_window(date(2024, 1, 17));
    assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    assert_eq!(
        end,
        date(2024, 1, 21).and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
    );
}

#[test]
fn test_week_window_monday_and_sunday_map_to_same_week() {
    let from_monday = week_window(date(2024, 1, 15));
    let from_sunday = week_window(date(2024, 1, 21));
    assert_eq!(from_monday, from_sunday);
}

#[test]
fn test_day_window_bounds() {
    let (start, end) = day_window(date(2024, 3, 10));
    assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
    assert_eq!(end.date_naive(), date(2024, 3, 10));
}

#[test]
fn test_month_window_covers_calendar_month() {
    let (start, end) = month_window(date(2024, 2, 14));
    assert_eq!(start.date_naive(), date(2024, 2, 1));
    // 2024 is a leap year.
    assert_eq!(end.date_naive(), date(2024, 2, 29));

    let (_, dec_end) = month_window(date(2023, 12, 5));
    assert_eq!(dec_end.date_naive(), date(2023, 12, 31));
}

// =========================================================
// Breakdowns
// =========================================================

#[test]
fn test_project_breakdown_conserves_total() {
    let entries = vec![
        entry("a", "2024-01-01T09:00:00Z", 3600, &[]),
        entry("b", "2024-01-01T11:00:00Z", 1800, &[]),
        entry("a", "2024-01-02T09:00:00Z", 5400, &[]),
    ];
    let slices = project_breakdown(&entries);
    let total_hours: f64 = entries.iter().map(|e| e.duration as f64 / 3600.0).sum();
    let breakdown_hours: f64 = slices.iter().map(|s| s.hours).sum();
    assert!((breakdown_hours - total_hours).abs() < 1e-9);

    let pct_sum: f64 = slices.iter().map(|s| s.percentage).sum();
    assert!((pct_sum - 100.0).abs() < 1e-9);
}

#[test]
fn test_project_breakdown_sorted_descending() {
    let entries = vec![
        entry("small", "2024-01-01T09:00:00Z", 600, &[]),
        entry("big", "2024-01-01T11:00:00Z", 7200, &[]),
    ];
    let slices = project_breakdown(&entries);
    assert_eq!(slices[0].project_id, ProjectId::new("big"));
    assert!(slices[0].hours >= slices[1].hours);
}

#[test]
fn test_breakdowns_empty_when_total_is_zero() {
    // In-window entries with zero accumulated duration must not emit
    // NaN/Infinity percentages; the breakdowns stay empty.
    let entries = vec![entry("a", "2024-01-01T09:00:00Z", 0, &["deep"])];
    assert!(project_breakdown(&entries).is_empty());
    assert!(tag_breakdown(&entries).is_empty());
}

#[test]
fn test_percentages_within_bounds() {
    let entries = vec![
        entry("a", "2024-01-01T09:00:00Z", 100, &["x"]),
        entry("b", "2024-01-01T10:00:00Z", 900, &["x", "y"]),
    ];
    for s in project_breakdown(&entries) {
        assert!((0.0..=100.0).contains(&s.percentage));
    }
    for s in tag_breakdown(&entries) {
        assert!((0.0..=100.0).contains(&s.percentage));
    }
}

#[test]
fn test_tag_fanout_is_intentionally_unnormalized() {
    // One entry with two tags contributes its full duration to both
    // buckets, so the percentage sum exceeds 100. This is the multi-tag
    // model, not a bug; do not normalize.
    let entries = vec![entry("a", "2024-01-01T09:00:00Z", 3600, &["rust", "work"])];
    let slices = tag_breakdown(&entries);
    assert_eq!(slices.len(), 2);
    for s in &slices {
        assert!((s.hours - 1.0).abs() < 1e-9);
        assert!((s.percentage - 100.0).abs() < 1e-9);
    }
    let pct_sum: f64 = slices.iter().map(|s| s.percentage).sum();
    assert!(pct_sum > 100.0);
}

#[test]
fn test_tag_breakdown_ignores_duplicate_tags_on_one_entry() {
    let entries = vec![entry("a", "2024-01-01T09:00:00Z", 3600, &["x", "x"])];
    let slices = tag_breakdown(&entries);
    assert_eq!(slices.len(), 1);
    assert!((slices[0].hours - 1.0).abs() < 1e-9);
}

#[test]
fn test_daily_breakdown_ascending_by_date() {
    let entries = vec![
        entry("a", "2024-01-03T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-01T09:00:00Z", 1800, &[]),
        entry("a", "2024-01-01T15:00:00Z", 1800, &[]),
    ];
    let daily = daily_breakdown(&entries);
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].date, date(2024, 1, 1));
    assert!((daily[0].hours - 1.0).abs() < 1e-9);
    assert_eq!(daily[1].date, date(2024, 1, 3));
}

// =========================================================
// Average and prediction
// =========================================================

#[test]
fn test_average_uses_inclusive_day_count() {
    let (start, end) = week_window(date(2024, 1, 17));
    let avg = average_hours_per_day(14.0, start, end);
    assert!((avg - 2.0).abs() < 1e-9);
}

#[test]
fn test_average_single_day_window_divides_by_one() {
    let (start, end) = day_window(date(2024, 1, 17));
    let avg = average_hours_per_day(5.0, start, end);
    assert!((avg - 5.0).abs() < 1e-9);
}

#[test]
fn test_prediction_applies_optimism_multiplier() {
    let policy = ReportPolicy::default();
    let p = predict(4.0, &policy);
    assert!((p.next_period_hours - 4.0 * 7.0 * 1.1).abs() < 1e-9);
    assert_eq!(p.trend, Trend::Stable);
}

#[test]
fn test_prediction_trend_thresholds() {
    let policy = ReportPolicy::default();
    assert_eq!(predict(6.5, &policy).trend, Trend::Up);
    assert_eq!(predict(2.9, &policy).trend, Trend::Down);
    assert_eq!(predict(6.0, &policy).trend, Trend::Stable);
    assert_eq!(predict(3.0, &policy).trend, Trend::Stable);
}

#[test]
fn test_prediction_policy_is_overridable() {
    let policy = ReportPolicy {
        optimism_multiplier: 1.0,
        trend_up_hours: 1.0,
        trend_down_hours: 0.5,
    };
    let p = predict(2.0, &policy);
    assert!((p.next_period_hours - 14.0).abs() < 1e-9);
    assert_eq!(p.trend, Trend::Up);
}

// =========================================================
// Streak
// =========================================================

#[test]
fn test_streak_three_consecutive_days() {
    let entries = vec![
        entry("a", "2024-01-01T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-02T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-03T09:00:00Z", 3600, &[]),
    ];
    let streak = compute_streak(&entries, date(2024, 1, 3));
    assert_eq!(streak.current, 3);
    assert_eq!(streak.longest, 3);
}

#[test]
fn test_streak_gap_breaks_current_run() {
    // Today present, yesterday absent: the backward walk stops at 1, and
    // no run anywhere exceeds a single day.
    let entries = vec![
        entry("a", "2024-01-01T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-03T09:00:00Z", 3600, &[]),
    ];
    let streak = compute_streak(&entries, date(2024, 1, 3));
    assert_eq!(streak.current, 1);
    assert_eq!(streak.longest, 1);
}

#[test]
fn test_streak_zero_when_today_is_empty() {
    let entries = vec![
        entry("a", "2024-01-01T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-02T09:00:00Z", 3600, &[]),
    ];
    let streak = compute_streak(&entries, date(2024, 1, 3));
    assert_eq!(streak.current, 0);
    assert_eq!(streak.longest, 2);
}

#[test]
fn test_streak_longest_found_in_older_history() {
    let entries = vec![
        entry("a", "2023-11-01T09:00:00Z", 3600, &[]),
        entry("a", "2023-11-02T09:00:00Z", 3600, &[]),
        entry("a", "2023-11-03T09:00:00Z", 3600, &[]),
        entry("a", "2023-11-04T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-03T09:00:00Z", 3600, &[]),
    ];
    let streak = compute_streak(&entries, date(2024, 1, 3));
    assert_eq!(streak.current, 1);
    assert_eq!(streak.longest, 4);
}

#[test]
fn test_streak_empty_history() {
    let streak = compute_streak(&[], date(2024, 1, 3));
    assert_eq!(streak.current, 0);
    assert_eq!(streak.longest, 0);
}

#[test]
fn test_streak_multiple_entries_per_day_count_once() {
    let entries = vec![
        entry("a", "2024-01-02T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-02T14:00:00Z", 3600, &[]),
        entry("a", "2024-01-03T09:00:00Z", 3600, &[]),
    ];
    let streak = compute_streak(&entries, date(2024, 1, 3));
    assert_eq!(streak.current, 2);
    assert_eq!(streak.longest, 2);
}

// =========================================================
// Heatmap
// =========================================================

#[test]
fn test_heatmap_level_boundaries() {
    // Busiest day of the year: 8 hours.
    let entries = vec![
        entry("a", "2024-06-01T08:00:00Z", 8 * 3600, &[]),
        entry("a", "2024-06-02T08:00:00Z", 6 * 3600, &[]),
        entry("a", "2024-06-03T08:00:00Z", 14040, &[]), // 3.9 h, ratio 0.4875
    ];
    let days = compute_heatmap(&entries, 2024);
    let by_date = |d: NaiveDate| days.iter().find(|h| h.date == d).unwrap().clone();

    assert_eq!(by_date(date(2024, 6, 1)).level, 4);
    // 6/8 = 0.75 sits exactly on the top boundary.
    assert_eq!(by_date(date(2024, 6, 2)).level, 4);
    assert_eq!(by_date(date(2024, 6, 3)).level, 2);
    assert_eq!(by_date(date(2024, 6, 4)).level, 0);
}

#[test]
fn test_heatmap_covers_every_day_of_year() {
    let days = compute_heatmap(&[], 2024);
    assert_eq!(days.len(), 366); // leap year
    assert!(days.iter().all(|d| d.level == 0 && d.hours == 0.0));

    let days = compute_heatmap(&[], 2023);
    assert_eq!(days.len(), 365);
}

#[test]
fn test_heatmap_ignores_other_years() {
    let entries = vec![
        entry("a", "2023-12-31T23:00:00Z", 3600, &[]),
        entry("a", "2024-01-01T01:00:00Z", 3600, &[]),
    ];
    let days = compute_heatmap(&entries, 2024);
    assert!(days[0].hours > 0.0);
    let total: f64 = days.iter().map(|d| d.hours).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_heatmap_sub_hour_max_keeps_unit_denominator() {
    // Busiest day under one hour: the denominator floors at 1, so levels
    // still derive from absolute hours.
    let entries = vec![entry("a", "2024-06-01T08:00:00Z", 1800, &[])];
    let days = compute_heatmap(&entries, 2024);
    let day = days.iter().find(|h| h.date == date(2024, 6, 1)).unwrap();
    assert_eq!(day.level, 3); // 0.5 / 1.0 = 0.5
}

// =========================================================
// Full report assembly
// =========================================================

#[test]
fn test_empty_window_yields_zero_valued_report() {
    let (start, end) = week_window(date(2024, 1, 17));
    let report = compute_report(
        ReportPeriod::Week,
        start,
        end,
        &[],
        &[],
        date(2024, 1, 17),
        &ReportPolicy::default(),
    );
    assert_eq!(report.total_hours, 0.0);
    assert!(report.project_breakdown.is_empty());
    assert!(report.tag_breakdown.is_empty());
    assert!(report.daily_breakdown.is_empty());
    assert!(report.best_day.is_none());
    assert_eq!(report.average_hours_per_day, 0.0);
    assert_eq!(report.prediction.trend, Trend::Down);
    assert_eq!(report.streak.current, 0);
}

#[test]
fn test_report_best_day_and_totals() {
    let (start, end) = week_window(date(2024, 1, 17));
    let window = vec![
        entry("a", "2024-01-15T09:00:00Z", 2 * 3600, &["deep"]),
        entry("a", "2024-01-16T09:00:00Z", 5 * 3600, &[]),
        entry("b", "2024-01-17T09:00:00Z", 3600, &[]),
    ];
    let report = compute_report(
        ReportPeriod::Week,
        start,
        end,
        &window,
        &window,
        date(2024, 1, 17),
        &ReportPolicy::default(),
    );
    assert!((report.total_hours - 8.0).abs() < 1e-9);
    let best = report.best_day.unwrap();
    assert_eq!(best.date, date(2024, 1, 16));
    assert!((best.hours - 5.0).abs() < 1e-9);
    // Streak spans the three consecutive days ending today.
    assert_eq!(report.streak.current, 3);
}

#[test]
fn test_report_streak_is_global_not_window_scoped() {
    let (start, end) = day_window(date(2024, 1, 17));
    let window = vec![entry("a", "2024-01-17T09:00:00Z", 3600, &[])];
    let all = vec![
        entry("a", "2024-01-16T09:00:00Z", 3600, &[]),
        entry("a", "2024-01-17T09:00:00Z", 3600, &[]),
    ];
    let report = compute_report(
        ReportPeriod::Day,
        start,
        end,
        &window,
        &all,
        date(2024, 1, 17),
        &ReportPolicy::default(),
    );
    assert_eq!(report.streak.current, 2);
}
