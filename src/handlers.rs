use crate::errors::AppError;
use crate::export::ExportDocument;
use crate::models::{
    HistoryQuery, HistoryResponse, JournalEntry, JournalMonthsResponse, MoodEntry, NewJournalEntry,
    NewMoodEntry, PinRequest, Profile, ProfileUpdate, QuoteResponse,
};
use crate::quotes::daily_quote;
use crate::mood::{resolve_all, resolve_activities, ResolvedEntry, MAX_INTENSITY, MIN_INTENSITY};
use crate::state::AppState;
use crate::stats::{
    build_history, filter_by_activity, filter_by_range, group_by_calendar_date, group_by_month,
    local_date_label, sort_month_groups_desc, sort_newest_first,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveTime, Utc};
use tracing::info;
use uuid::Uuid;

pub async fn list_moods(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ResolvedEntry>>, AppError> {
    let data = state.data.lock().await;
    let in_range = filter_by_range(&data.moods, query.range, Utc::now());
    let mut entries = filter_by_activity(&resolve_all(&in_range), query.activity.as_deref());
    sort_newest_first(&mut entries);
    Ok(Json(entries))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Json(payload): Json<NewMoodEntry>,
) -> Result<(StatusCode, Json<ResolvedEntry>), AppError> {
    let mood = payload.mood.trim();
    if mood.is_empty() {
        return Err(AppError::bad_request("mood is required"));
    }
    if let Some(intensity) = payload.intensity {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
            return Err(AppError::bad_request("intensity must be between 1 and 10"));
        }
    }

    let now = Utc::now();
    let date = payload.date.unwrap_or(now);
    if date > now {
        return Err(AppError::bad_request("date cannot be in the future"));
    }

    let entry = MoodEntry {
        id: Uuid::new_v4(),
        date,
        mood: Some(mood.to_string()),
        intensity: payload.intensity,
        activities: Some(resolve_activities(Some(payload.activities.as_slice()))),
        note: payload.note.filter(|note| !note.trim().is_empty()),
    };

    let mut data = state.data.lock().await;
    data.moods.push(entry.clone());
    state.store.persist(&data).await?;

    info!(id = %entry.id, mood = %mood, "mood entry created");
    Ok((StatusCode::CREATED, Json(entry.resolve())))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let before = data.moods.len();
    data.moods.retain(|entry| entry.id != id);
    if data.moods.len() == before {
        return Err(AppError::not_found("mood entry not found"));
    }
    for journal in data.journal.iter_mut() {
        if journal.mood_entry_id == Some(id) {
            journal.mood_entry_id = None;
        }
    }
    state.store.persist(&data).await?;

    info!(%id, "mood entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let data = state.data.lock().await;
    let in_range = resolve_all(&filter_by_range(&data.moods, query.range, Utc::now()));
    drop(data);

    let activity = query.activity.as_deref();
    let history = build_history(&in_range, activity, local_date_label);
    let mut charted = filter_by_activity(&in_range, activity);
    sort_newest_first(&mut charted);
    let days = group_by_calendar_date(&charted, &Local);

    Ok(Json(HistoryResponse {
        range: query.range,
        activity: query.activity,
        history,
        days,
    }))
}

pub async fn list_journal(
    State(state): State<AppState>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let data = state.data.lock().await;
    let mut entries = data.journal.clone();
    sort_newest_first(&mut entries);
    // stable, so pinned entries stay newest first among themselves
    entries.sort_by_key(|entry| !entry.is_pinned);
    Ok(Json(entries))
}

pub async fn journal_months(
    State(state): State<AppState>,
) -> Result<Json<JournalMonthsResponse>, AppError> {
    let data = state.data.lock().await;
    let mut months = group_by_month(&data.journal, &Local);
    sort_month_groups_desc(&mut months);
    Ok(Json(JournalMonthsResponse { months }))
}

pub async fn create_journal(
    State(state): State<AppState>,
    Json(payload): Json<NewJournalEntry>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let title = payload.title.trim();
    let content = payload.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::bad_request("title and content are required"));
    }

    let mut data = state.data.lock().await;
    if let Some(mood_id) = payload.mood_entry_id {
        if !data.moods.iter().any(|entry| entry.id == mood_id) {
            return Err(AppError::bad_request("mood_entry_id does not match any mood entry"));
        }
    }

    let entry = JournalEntry {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: content.to_string(),
        mood_entry_id: payload.mood_entry_id,
        is_pinned: false,
        created_at: Utc::now(),
    };
    data.journal.push(entry.clone());
    state.store.persist(&data).await?;

    info!(id = %entry.id, "journal entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn pin_journal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PinRequest>,
) -> Result<Json<JournalEntry>, AppError> {
    let mut data = state.data.lock().await;
    let updated = {
        let entry = data
            .journal
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::not_found("journal entry not found"))?;
        entry.is_pinned = payload.is_pinned;
        entry.clone()
    };
    state.store.persist(&data).await?;

    Ok(Json(updated))
}

pub async fn delete_journal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let before = data.journal.len();
    data.journal.retain(|entry| entry.id != id);
    if data.journal.len() == before {
        return Err(AppError::not_found("journal entry not found"));
    }
    state.store.persist(&data).await?;

    info!(%id, "journal entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = state.data.lock().await;
    let body = ExportDocument::from_data(&data, Utc::now()).to_pretty_json()?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, ExportDocument::content_disposition()),
        ],
        body,
    ))
}

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.profile.clone()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let remind_time = payload
        .remind_time
        .as_deref()
        .map(|value| NaiveTime::parse_from_str(value.trim(), "%H:%M"))
        .transpose()
        .map_err(|_| AppError::bad_request("remind_time must be HH:MM"))?;

    let mut data = state.data.lock().await;
    let updated = {
        let profile = &mut data.profile;
        if let Some(display_name) = payload.display_name {
            profile.display_name = display_name.trim().to_string();
        }
        if let Some(email_notifications) = payload.email_notifications {
            profile.email_notifications = email_notifications;
        }
        if let Some(remind_time) = remind_time {
            profile.remind_time = remind_time.format("%H:%M").to_string();
        }
        if let Some(theme) = payload.theme {
            profile.theme = theme;
        }
        profile.updated_at = Some(Utc::now());
        profile.clone()
    };
    state.store.persist(&data).await?;

    info!("profile updated");
    Ok(Json(updated))
}

pub async fn get_quote() -> Json<QuoteResponse> {
    let date = Local::now().date_naive();
    let quote = daily_quote(date);
    Json(QuoteResponse {
        date,
        content: quote.content,
        author: quote.author,
    })
}
