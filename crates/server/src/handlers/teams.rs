//! Team endpoints.

use crate::auth::require_auth;
use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{IdParam, MutationResponse, format_timestamp, read_form};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use paddock_core::filter::{FilterOp, TeamField};
use paddock_core::record::Team;
use paddock_store::models::TeamRow;
use paddock_store::repos::TeamRepo;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Add/edit form fields for a team.
#[derive(Debug, Deserialize)]
pub struct TeamForm {
    pub team_name: String,
    pub year_founded: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_constructor_titles: i64,
    pub finishing_position: i64,
}

impl TeamForm {
    fn into_record(self) -> Team {
        Team {
            team_name: self.team_name,
            year_founded: self.year_founded,
            total_pole_positions: self.total_pole_positions,
            total_race_wins: self.total_race_wins,
            total_constructor_titles: self.total_constructor_titles,
            finishing_position: self.finishing_position,
        }
    }
}

/// Filter form: attribute/operator/value triple.
#[derive(Debug, Deserialize)]
pub struct TeamFilterForm {
    pub attribute: String,
    pub operator: String,
    pub value: i64,
}

/// Comparison form: two team ids.
#[derive(Debug, Deserialize)]
pub struct CompareTeamsForm {
    pub team1: Uuid,
    pub team2: Uuid,
}

/// Response for team details (used by listings too).
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub team_id: String,
    pub team_name: String,
    pub year_founded: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_constructor_titles: i64,
    pub finishing_position: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Response for listing teams.
#[derive(Debug, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
}

/// Response for the comparison view.
#[derive(Debug, Serialize)]
pub struct CompareTeamsResponse {
    pub left: TeamResponse,
    pub right: TeamResponse,
    /// Full roster for the picker.
    pub teams: Vec<TeamResponse>,
}

fn team_row_to_response(row: TeamRow) -> ApiResult<TeamResponse> {
    let created_at = format_timestamp(row.created_at, "created_at")?;
    let updated_at = format_timestamp(row.updated_at, "updated_at")?;

    Ok(TeamResponse {
        team_id: row.team_id.to_string(),
        team_name: row.team_name,
        year_founded: row.year_founded,
        total_pole_positions: row.total_pole_positions,
        total_race_wins: row.total_race_wins,
        total_constructor_titles: row.total_constructor_titles,
        finishing_position: row.finishing_position,
        created_at,
        updated_at,
    })
}

fn rows_to_responses(rows: Vec<TeamRow>) -> ApiResult<Vec<TeamResponse>> {
    rows.into_iter().map(team_row_to_response).collect()
}

/// GET /view_team - List all teams.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<ListTeamsResponse>> {
    let rows = state.store.list_teams().await?;
    Ok(Json(ListTeamsResponse {
        teams: rows_to_responses(rows)?,
    }))
}

/// GET /team_details?id= - One team.
pub async fn team_details(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> ApiResult<Json<TeamResponse>> {
    let row = state
        .store
        .get_team(params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", params.id)))?;

    Ok(Json(team_row_to_response(row)?))
}

/// GET /add_team - Existing teams, for duplicate hints on the add form.
pub async fn add_team_form(State(state): State<AppState>) -> ApiResult<Json<ListTeamsResponse>> {
    let rows = state.store.list_teams().await?;
    Ok(Json(ListTeamsResponse {
        teams: rows_to_responses(rows)?,
    }))
}

/// POST /add_team - Create a team.
pub async fn add_team(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<MutationResponse>)> {
    require_auth(&req)?;
    let form: TeamForm = read_form(req).await?;

    let record = form.into_record();
    record.validate()?;

    let row = TeamRow::from_record(&record, OffsetDateTime::now_utc());
    state.store.create_team(&row).await?;
    tracing::info!(team_id = %row.team_id, team_name = %row.team_name, "Team created");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            status: "created",
            id: Some(row.team_id.to_string()),
            redirect: "/view_team",
        }),
    ))
}

/// GET /edit_team?id= - Form context for editing a team.
pub async fn edit_team_form(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> ApiResult<Json<TeamResponse>> {
    let row = state
        .store
        .get_team(params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", params.id)))?;

    Ok(Json(team_row_to_response(row)?))
}

/// POST /edit_team?id= - Full-replace a team's fields.
pub async fn edit_team(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
    req: Request,
) -> ApiResult<Json<MutationResponse>> {
    require_auth(&req)?;
    let form: TeamForm = read_form(req).await?;

    let existing = state
        .store
        .get_team(params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", params.id)))?;

    let record = form.into_record();
    record.validate()?;

    let row = TeamRow {
        team_id: existing.team_id,
        team_name: record.team_name,
        year_founded: record.year_founded,
        total_pole_positions: record.total_pole_positions,
        total_race_wins: record.total_race_wins,
        total_constructor_titles: record.total_constructor_titles,
        finishing_position: record.finishing_position,
        created_at: existing.created_at,
        updated_at: OffsetDateTime::now_utc(),
    };
    state.store.update_team(&row).await?;
    tracing::info!(team_id = %row.team_id, "Team updated");

    Ok(Json(MutationResponse {
        status: "updated",
        id: Some(row.team_id.to_string()),
        redirect: "/view_team",
    }))
}

/// POST /delete_team/{id} - Delete a team.
///
/// Referencing drivers keep their now-dangling team id; details views fall
/// back to the "Unknown Team" label.
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    req: Request,
) -> ApiResult<Json<MutationResponse>> {
    require_auth(&req)?;

    state.store.delete_team(team_id).await?;
    tracing::info!(team_id = %team_id, "Team deleted");

    Ok(Json(MutationResponse {
        status: "deleted",
        id: Some(team_id.to_string()),
        redirect: "/view_team",
    }))
}

/// POST /filter_team - Filtered listing.
pub async fn filter_teams(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<ListTeamsResponse>> {
    let form: TeamFilterForm = read_form(req).await?;

    let field = TeamField::parse(&form.attribute)?;
    let op = FilterOp::parse(&form.operator)?;

    let rows = state.store.filter_teams(field, op, form.value).await?;
    Ok(Json(ListTeamsResponse {
        teams: rows_to_responses(rows)?,
    }))
}

/// POST /compare_teams - Fetch both sides of a comparison.
pub async fn compare_teams(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<CompareTeamsResponse>> {
    let form: CompareTeamsForm = read_form(req).await?;

    if form.team1 == form.team2 {
        return Err(ApiError::BadRequest(
            "a team cannot be compared against itself".to_string(),
        ));
    }

    let left = state
        .store
        .get_team(form.team1)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", form.team1)))?;
    let right = state
        .store
        .get_team(form.team2)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", form.team2)))?;

    let roster = state.store.list_teams().await?;

    Ok(Json(CompareTeamsResponse {
        left: team_row_to_response(left)?,
        right: team_row_to_response(right)?,
        teams: rows_to_responses(roster)?,
    }))
}

/// GET /compare_teams - Roster for the comparison picker.
pub async fn compare_teams_form(
    State(state): State<AppState>,
) -> ApiResult<Json<ListTeamsResponse>> {
    let rows = state.store.list_teams().await?;
    Ok(Json(ListTeamsResponse {
        teams: rows_to_responses(rows)?,
    }))
}
