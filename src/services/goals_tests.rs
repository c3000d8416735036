use chrono::{TimeZone, Utc};

use crate::api::{EntryId, GoalId, ProjectId};
use crate::models::{Goal, GoalPeriod, TimeEntry};
use crate::services::goals::goal_progress;

fn weekly_goal(target_hours: f64, project: Option<&str>) -> Goal {
    Goal {
        id: GoalId::new("g1"),
        period: GoalPeriod::Weekly,
        target_hours,
        start_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 1, 22, 0, 0, 0).unwrap(),
        project_id: project.map(ProjectId::new),
    }
}

fn entry(project: &str, start: &str, duration: i64) -> TimeEntry {
    TimeEntry {
        id: EntryId::generate(),
        project_id: ProjectId::new(project),
        task_id: None,
        start_time: start.parse().unwrap(),
        end_time: None,
        duration,
        is_running: false,
        tags: vec![],
        notes: None,
        activities: vec![],
    }
}

#[test]
fn test_progress_is_derived_from_window_entries() {
    let goal = weekly_goal(10.0, None);
    let entries = vec![
        entry("a", "2024-01-15T09:00:00Z", 2 * 3600),
        entry("b", "2024-01-16T09:00:00Z", 3 * 3600),
        // Outside the window.
        entry("a", "2024-01-10T09:00:00Z", 8 * 3600),
    ];
    let progress = goal_progress(&goal, &entries);
    assert!((progress.current_hours - 5.0).abs() < 1e-9);
    assert!((progress.percentage - 50.0).abs() < 1e-9);
    assert!(!progress.achieved);
}

#[test]
fn test_window_end_is_exclusive() {
    let goal = weekly_goal(1.0, None);
    let entries = vec![entry("a", "2024-01-22T00:00:00Z", 3600)];
    let progress = goal_progress(&goal, &entries);
    assert_eq!(progress.current_hours, 0.0);
}

#[test]
fn test_project_scope_filters_entries() {
    let goal = weekly_goal(2.0, Some("a"));
    let entries = vec![
        entry("a", "2024-01-15T09:00:00Z", 3600),
        entry("b", "2024-01-15T11:00:00Z", 3600),
    ];
    let progress = goal_progress(&goal, &entries);
    assert!((progress.current_hours - 1.0).abs() < 1e-9);
}

#[test]
fn test_overachieved_goal_exceeds_hundred_percent() {
    let goal = weekly_goal(1.0, None);
    let entries = vec![entry("a", "2024-01-15T09:00:00Z", 2 * 3600)];
    let progress = goal_progress(&goal, &entries);
    assert!(progress.percentage > 100.0);
    assert!(progress.achieved);
}

#[test]
fn test_zero_target_guard_yields_zero_percent() {
    let goal = weekly_goal(0.0, None);
    let entries = vec![entry("a", "2024-01-15T09:00:00Z", 3600)];
    let progress = goal_progress(&goal, &entries);
    assert_eq!(progress.percentage, 0.0);
}

#[tokio::test]
async fn test_list_goal_progress_covers_every_goal() {
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{EntryRepository, GoalRepository, ProjectRepository};
    use crate::models::Project;
    use crate::services::goals::list_goal_progress;
    use chrono::Duration;

    let repo = LocalRepository::new();
    let project = repo
        .insert_project(Project {
            id: ProjectId::new("a"),
            name: "a".to_string(),
            color: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    let mut logged = entry("a", "2024-01-15T09:00:00Z", 3600);
    logged.project_id = project.id.clone();
    logged.end_time = Some(logged.start_time + Duration::seconds(3600));
    repo.insert_entry(logged).await.unwrap();

    let mut scoped = weekly_goal(2.0, Some("a"));
    scoped.id = GoalId::generate();
    repo.insert_goal(scoped).await.unwrap();
    let mut unscoped = weekly_goal(1.0, None);
    unscoped.id = GoalId::generate();
    repo.insert_goal(unscoped).await.unwrap();

    let all = list_goal_progress(&repo).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|p| p.achieved));
    assert!(all.iter().any(|p| !p.achieved));
}
