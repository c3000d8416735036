//! HTTP request handlers.
//!
//! Thin translation layer: deserialize the request, call the service or
//! repository, map the result into JSON. Domain rules (single running
//! entry, goal windows, report math) live below this layer.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use tracing::info;

use crate::api::{EntryId, GoalId, ProjectId, ReportPolicy, TaskId};
use crate::models::{Goal, Project, Task, TimeEntry};
use crate::services::{goals, reports, timer};

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

type HandlerResult<T> = Result<Json<T>, AppError>;

// =========================================================
// Health
// =========================================================

pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let healthy = state.repository.health_check().await.unwrap_or(false);
    Ok(Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: if healthy { "connected" } else { "unavailable" }.to_string(),
    }))
}

// =========================================================
// Timer
// =========================================================

pub async fn start_timer(
    State(state): State<AppState>,
    Json(req): Json<NewTimerEntry>,
) -> HandlerResult<StartedTimer> {
    let started = timer::start_timer(state.repository.as_ref(), req).await?;
    info!(entry_id = %started.started.id, "timer started");
    Ok(Json(started))
}

pub async fn stop_timer(
    State(state): State<AppState>,
    Json(req): Json<StopTimerRequest>,
) -> HandlerResult<StopTimerResponse> {
    let id = EntryId::new(req.entry_id);
    let stopped = timer::stop_timer(state.repository.as_ref(), &id).await?;
    if let Some(entry) = &stopped {
        info!(entry_id = %entry.id, duration = entry.duration, "timer stopped");
    }
    Ok(Json(StopTimerResponse { stopped }))
}

pub async fn timer_status(State(state): State<AppState>) -> HandlerResult<TimerStatusResponse> {
    let running = timer::running_entry(state.repository.as_ref()).await?;
    let elapsed_seconds = running.as_ref().map(|e| e.current_duration(Utc::now()));
    Ok(Json(TimerStatusResponse {
        running,
        elapsed_seconds,
    }))
}

// =========================================================
// Entries
// =========================================================

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntryWindowQuery>,
) -> HandlerResult<EntryListResponse> {
    let entries = match (query.from, query.to) {
        (Some(from), Some(to)) => state.repository.list_entries_between(from, to).await?,
        _ => state.repository.list_entries().await?,
    };
    let total = entries.len();
    Ok(Json(EntryListResponse { entries, total }))
}

pub async fn log_entry(
    State(state): State<AppState>,
    Json(req): Json<LogEntryRequest>,
) -> HandlerResult<TimeEntry> {
    let end_time = req
        .end_time
        .unwrap_or(req.start_time + Duration::seconds(req.duration));
    let entry = TimeEntry {
        id: EntryId::generate(),
        project_id: ProjectId::new(req.project_id),
        task_id: req.task_id.map(TaskId::new),
        start_time: req.start_time,
        end_time: Some(end_time),
        duration: req.duration,
        is_running: false,
        tags: req.tags,
        notes: req.notes,
        activities: Vec::new(),
    };
    let entry = state.repository.insert_entry(entry).await?;
    Ok(Json(entry))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<TimeEntry> {
    let id = EntryId::new(id);
    let entry = state.repository.get_entry(&id).await?;
    entry
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("entry {id} not found")))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EntryPatch>,
) -> HandlerResult<TimeEntry> {
    let id = EntryId::new(id);
    let updated = state.repository.update_entry(&id, patch).await?;
    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("entry {id} not found")))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteResponse> {
    let id = EntryId::new(id);
    let deleted = state.repository.delete_entry(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("entry {id} not found")));
    }
    Ok(Json(DeleteResponse { deleted }))
}

// =========================================================
// Projects and tasks
// =========================================================

pub async fn list_projects(State(state): State<AppState>) -> HandlerResult<ProjectListResponse> {
    let projects = state.repository.list_projects().await?;
    let total = projects.len();
    Ok(Json(ProjectListResponse { projects, total }))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> HandlerResult<Project> {
    let project = Project {
        id: ProjectId::generate(),
        name: req.name,
        color: req.color,
        created_at: Utc::now(),
    };
    let project = state.repository.insert_project(project).await?;
    info!(project_id = %project.id, "project created");
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteResponse> {
    let id = ProjectId::new(id);
    let deleted = state.repository.delete_project(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("project {id} not found")));
    }
    Ok(Json(DeleteResponse { deleted }))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> HandlerResult<TaskListResponse> {
    let project_id = ProjectId::new(project_id);
    let tasks = state.repository.list_tasks(Some(&project_id)).await?;
    let total = tasks.len();
    Ok(Json(TaskListResponse { tasks, total }))
}

pub async fn create_task(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> HandlerResult<Task> {
    let task = Task {
        id: TaskId::generate(),
        project_id: ProjectId::new(project_id),
        name: req.name,
        completed: false,
        created_at: Utc::now(),
    };
    let task = state.repository.insert_task(task).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteResponse> {
    let id = TaskId::new(id);
    let deleted = state.repository.delete_task(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("task {id} not found")));
    }
    Ok(Json(DeleteResponse { deleted }))
}

// =========================================================
// Goals
// =========================================================

pub async fn list_goals(State(state): State<AppState>) -> HandlerResult<GoalListResponse> {
    let goals = state.repository.list_goals().await?;
    let total = goals.len();
    Ok(Json(GoalListResponse { goals, total }))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Json(req): Json<CreateGoalRequest>,
) -> HandlerResult<Goal> {
    let goal = Goal {
        id: GoalId::generate(),
        period: req.period,
        target_hours: req.target_hours,
        start_date: req.start_date,
        end_date: req.end_date,
        project_id: req.project_id.map(ProjectId::new),
    };
    let goal = state.repository.insert_goal(goal).await?;
    Ok(Json(goal))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteResponse> {
    let id = GoalId::new(id);
    let deleted = state.repository.delete_goal(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("goal {id} not found")));
    }
    Ok(Json(DeleteResponse { deleted }))
}

pub async fn goal_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<GoalProgress> {
    let id = GoalId::new(id);
    let progress = goals::get_goal_progress(state.repository.as_ref(), &id).await?;
    progress
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("goal {id} not found")))
}

// =========================================================
// Reports
// =========================================================

pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> HandlerResult<Report> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let report = reports::generate_report(
        state.repository.as_ref(),
        query.period,
        date,
        &ReportPolicy::default(),
    )
    .await?;
    Ok(Json(report))
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> HandlerResult<HeatmapResponse> {
    let days = reports::generate_heatmap(state.repository.as_ref(), query.year).await?;
    Ok(Json(HeatmapResponse {
        year: query.year,
        days,
    }))
}

pub async fn get_streak(State(state): State<AppState>) -> HandlerResult<Streak> {
    let streak = reports::calculate_streak(state.repository.as_ref()).await?;
    Ok(Json(streak))
}
