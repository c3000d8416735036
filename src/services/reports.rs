//! Report aggregation engine.
//!
//! Pure aggregation over a caller-supplied entry snapshot: totals,
//! per-project/per-tag/per-day breakdowns, best day, streaks, a calendar
//! heatmap and a deliberately naive next-period prediction. No side effects
//! and no storage writes; the async wrappers at the bottom only fetch the
//! snapshot from the repository.
//!
//! All passes are O(n) or O(n log n) over the entry count, which is plenty
//! at this data scale.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::api::ProjectId;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::TimeEntry;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Reporting window cadence. Informational tag on the report; the window
/// bounds themselves are what drive the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
}

/// Policy constants for the prediction heuristic.
///
/// These are product policy, not a learned model: a fixed optimism
/// multiplier on the weekly extrapolation and two trend thresholds in
/// hours per day. Kept as named overridable values so they can be revisited
/// without touching the aggregation algorithm.
#[derive(Debug, Clone, Copy)]
pub struct ReportPolicy {
    /// Multiplier applied to the extrapolated next-period hours.
    pub optimism_multiplier: f64,
    /// Daily average above which the trend reads as rising.
    pub trend_up_hours: f64,
    /// Daily average below which the trend reads as falling.
    pub trend_down_hours: f64,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            optimism_multiplier: 1.1,
            trend_up_hours: 6.0,
            trend_down_hours: 3.0,
        }
    }
}

/// One project's share of the window total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSlice {
    pub project_id: ProjectId,
    pub hours: f64,
    /// Share of the window total, in `[0, 100]`.
    pub percentage: f64,
}

/// One tag's share of the window total.
///
/// Entries contribute their full duration to every tag they carry, so tag
/// percentages intentionally do not sum to 100% (tags are non-exclusive).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSlice {
    pub tag: String,
    pub hours: f64,
    pub percentage: f64,
}

/// Hours tracked on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySlice {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Consecutive-day streak pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive days with entries ending today; zero when today is empty.
    pub current: u32,
    /// Longest consecutive-day run across the whole history.
    pub longest: u32,
}

/// Trend classification for the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Naive next-period projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    pub next_period_hours: f64,
    pub trend: Trend,
}

/// Report computed on demand for an inclusive `[start_date, end_date]`
/// window. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub period: ReportPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_hours: f64,
    pub project_breakdown: Vec<ProjectSlice>,
    pub tag_breakdown: Vec<TagSlice>,
    pub daily_breakdown: Vec<DaySlice>,
    /// Absent when the window holds no entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_day: Option<DaySlice>,
    pub average_hours_per_day: f64,
    pub prediction: Prediction,
    /// Computed over the whole history, not the report window.
    pub streak: Streak,
}

/// One calendar day of the year heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub hours: f64,
    /// Intensity 0-4 relative to the year's busiest day.
    pub level: u8,
}

// =========================================================
// Window helpers
// =========================================================

/// Midnight to 23:59:59.999 of the given day.
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_default()
        .and_utc();
    (start, end)
}

/// Monday 00:00:00 through Sunday 23:59:59.999 of the ISO week containing
/// the given day.
pub fn week_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    let sunday = monday + Duration::days(6);
    (day_window(monday).0, day_window(sunday).1)
}

/// First through last calendar day of the month containing the given day.
pub fn month_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = date.with_day(1).unwrap_or(date);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_first
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);
    (day_window(first).0, day_window(last).1)
}

/// Window bounds for a period anchored at `date`.
pub fn window_for(period: ReportPeriod, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    match period {
        ReportPeriod::Day => day_window(date),
        ReportPeriod::Week => week_window(date),
        ReportPeriod::Month => month_window(date),
    }
}

// =========================================================
// Breakdowns
// =========================================================

fn hours(seconds: i64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR
}

/// Group window entries by project, descending by hours.
///
/// Empty when total tracked seconds is zero, so percentages never divide by
/// zero and no NaN/Infinity escapes.
pub fn project_breakdown(entries: &[TimeEntry]) -> Vec<ProjectSlice> {
    let total_seconds: i64 = entries.iter().map(|e| e.duration).sum();
    if total_seconds == 0 {
        return Vec::new();
    }

    let mut by_project: HashMap<&ProjectId, i64> = HashMap::new();
    for entry in entries {
        *by_project.entry(&entry.project_id).or_insert(0) += entry.duration;
    }

    let mut slices: Vec<ProjectSlice> = by_project
        .into_iter()
        .map(|(project_id, seconds)| ProjectSlice {
            project_id: project_id.clone(),
            hours: hours(seconds),
            percentage: seconds as f64 / total_seconds as f64 * 100.0,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.hours
            .partial_cmp(&a.hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.project_id.cmp(&b.project_id))
    });
    slices
}

/// Group window entries by tag, descending by hours.
///
/// Fan-out semantics: an entry with two tags contributes its full duration
/// to both buckets, so the percentages are each in `[0, 100]` but their sum
/// may exceed 100. Intentional; do not normalize.
pub fn tag_breakdown(entries: &[TimeEntry]) -> Vec<TagSlice> {
    let total_seconds: i64 = entries.iter().map(|e| e.duration).sum();
    if total_seconds == 0 {
        return Vec::new();
    }

    let mut by_tag: HashMap<&str, i64> = HashMap::new();
    for entry in entries {
        // Duplicate tags on one entry count once.
        let unique: BTreeSet<&str> = entry.tags.iter().map(String::as_str).collect();
        for tag in unique {
            *by_tag.entry(tag).or_insert(0) += entry.duration;
        }
    }

    let mut slices: Vec<TagSlice> = by_tag
        .into_iter()
        .map(|(tag, seconds)| TagSlice {
            tag: tag.to_string(),
            hours: hours(seconds),
            percentage: seconds as f64 / total_seconds as f64 * 100.0,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.hours
            .partial_cmp(&a.hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    slices
}

/// Group window entries by calendar date of `start_time`, ascending by date.
pub fn daily_breakdown(entries: &[TimeEntry]) -> Vec<DaySlice> {
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for entry in entries {
        *by_day.entry(entry.start_time.date_naive()).or_insert(0) += entry.duration;
    }
    by_day
        .into_iter()
        .map(|(date, seconds)| DaySlice {
            date,
            hours: hours(seconds),
        })
        .collect()
}

fn best_day(daily: &[DaySlice]) -> Option<DaySlice> {
    daily
        .iter()
        .max_by(|a, b| {
            a.hours
                .partial_cmp(&b.hours)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .cloned()
}

/// Average hours per day over an inclusive window.
///
/// The divisor is the window length in days rounded up, never below one, so
/// a single-day window still yields a defined average.
pub fn average_hours_per_day(
    total_hours: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> f64 {
    let span_days = (end - start).num_milliseconds() as f64 / 86_400_000.0;
    total_hours / span_days.ceil().max(1.0)
}

/// Extrapolate next-period hours and classify the trend.
pub fn predict(average_hours_per_day: f64, policy: &ReportPolicy) -> Prediction {
    let trend = if average_hours_per_day > policy.trend_up_hours {
        Trend::Up
    } else if average_hours_per_day < policy.trend_down_hours {
        Trend::Down
    } else {
        Trend::Stable
    };
    Prediction {
        next_period_hours: average_hours_per_day * 7.0 * policy.optimism_multiplier,
        trend,
    }
}

// =========================================================
// Streak and heatmap
// =========================================================

/// Streak over the whole entry history.
///
/// Current streak counts back from `today`; a day without entries breaks it
/// at that point, and an empty today means zero immediately. Longest streak
/// is the maximum run of consecutive calendar dates anywhere in history.
pub fn compute_streak(entries: &[TimeEntry], today: NaiveDate) -> Streak {
    let dates: BTreeSet<NaiveDate> = entries.iter().map(|e| e.start_time.date_naive()).collect();

    let mut current = 0u32;
    let mut cursor = today;
    while dates.contains(&cursor) {
        current += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for date in &dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(*date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*date);
    }

    Streak { current, longest }
}

/// Bucket a year of entries into one record per calendar day.
///
/// Levels are relative to the year's busiest day: zero hours is level 0,
/// otherwise the ratio to the max (denominator floored at 1 hour so an
/// all-empty year divides cleanly) maps 0.75/0.5/0.25 to levels 4/3/2 and
/// anything below to 1.
pub fn compute_heatmap(entries: &[TimeEntry], year: i32) -> Vec<HeatmapDay> {
    let mut by_day: HashMap<NaiveDate, i64> = HashMap::new();
    for entry in entries {
        let date = entry.start_time.date_naive();
        if date.year() == year {
            *by_day.entry(date).or_insert(0) += entry.duration;
        }
    }

    let max_hours = by_day
        .values()
        .map(|&s| hours(s))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut days = Vec::with_capacity(366);
    let mut cursor = NaiveDate::from_ymd_opt(year, 1, 1);
    while let Some(date) = cursor {
        if date.year() != year {
            break;
        }
        let day_hours = hours(by_day.get(&date).copied().unwrap_or(0));
        let level = if day_hours == 0.0 {
            0
        } else {
            let ratio = day_hours / max_hours;
            if ratio >= 0.75 {
                4
            } else if ratio >= 0.5 {
                3
            } else if ratio >= 0.25 {
                2
            } else {
                1
            }
        };
        days.push(HeatmapDay {
            date,
            hours: day_hours,
            level,
        });
        cursor = date.succ_opt();
    }
    days
}

// =========================================================
// Report assembly
// =========================================================

/// Assemble a full report from a window snapshot plus the whole history
/// (needed for the streak). Pure; an empty window yields a fully-defined
/// zero-valued report.
pub fn compute_report(
    period: ReportPeriod,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    window_entries: &[TimeEntry],
    all_entries: &[TimeEntry],
    today: NaiveDate,
    policy: &ReportPolicy,
) -> Report {
    let total_seconds: i64 = window_entries.iter().map(|e| e.duration).sum();
    let total_hours = hours(total_seconds);
    let daily = daily_breakdown(window_entries);
    let average = average_hours_per_day(total_hours, start, end);

    Report {
        period,
        start_date: start,
        end_date: end,
        total_hours,
        project_breakdown: project_breakdown(window_entries),
        tag_breakdown: tag_breakdown(window_entries),
        best_day: best_day(&daily),
        daily_breakdown: daily,
        average_hours_per_day: average,
        prediction: predict(average, policy),
        streak: compute_streak(all_entries, today),
    }
}

// =========================================================
// Repository-backed wrappers
// =========================================================

/// Fetch a snapshot and compute the report for the period containing
/// `date`.
pub async fn generate_report(
    repo: &dyn FullRepository,
    period: ReportPeriod,
    date: NaiveDate,
    policy: &ReportPolicy,
) -> RepositoryResult<Report> {
    let (start, end) = window_for(period, date);
    let all_entries = repo.list_entries().await?;
    let window_entries: Vec<TimeEntry> = all_entries
        .iter()
        .filter(|e| e.start_time >= start && e.start_time <= end)
        .cloned()
        .collect();
    Ok(compute_report(
        period,
        start,
        end,
        &window_entries,
        &all_entries,
        Utc::now().date_naive(),
        policy,
    ))
}

/// Fetch a snapshot and compute the calendar-year heatmap.
pub async fn generate_heatmap(
    repo: &dyn FullRepository,
    year: i32,
) -> RepositoryResult<Vec<HeatmapDay>> {
    let entries = repo.list_entries().await?;
    Ok(compute_heatmap(&entries, year))
}

/// Fetch a snapshot and compute the global streak as of today.
pub async fn calculate_streak(repo: &dyn FullRepository) -> RepositoryResult<Streak> {
    let entries = repo.list_entries().await?;
    Ok(compute_streak(&entries, Utc::now().date_naive()))
}
