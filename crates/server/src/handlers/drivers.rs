//! Driver endpoints.

use crate::auth::require_auth;
use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{
    IdParam, MutationResponse, empty_uuid_as_none, format_timestamp, read_form,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use paddock_core::filter::{DriverField, FilterOp};
use paddock_core::record::{Driver, UNKNOWN_TEAM};
use paddock_store::models::DriverRow;
use paddock_store::repos::{DriverRepo, TeamRepo};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Add/edit form fields for a driver.
#[derive(Debug, Deserialize)]
pub struct DriverForm {
    pub name: String,
    pub age: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_points: i64,
    pub total_world_titles: i64,
    pub total_fastest_laps: i64,
    /// Unselected dropdown posts an empty string.
    #[serde(default, deserialize_with = "empty_uuid_as_none")]
    pub team_id: Option<Uuid>,
}

impl DriverForm {
    fn into_record(self) -> Driver {
        Driver {
            name: self.name,
            age: self.age,
            total_pole_positions: self.total_pole_positions,
            total_race_wins: self.total_race_wins,
            total_points: self.total_points,
            total_world_titles: self.total_world_titles,
            total_fastest_laps: self.total_fastest_laps,
            team_id: self.team_id,
        }
    }
}

/// Filter form: attribute/operator/value triple.
#[derive(Debug, Deserialize)]
pub struct DriverFilterForm {
    pub attribute: String,
    pub operator: String,
    pub value: i64,
}

/// Comparison form: two driver ids.
#[derive(Debug, Deserialize)]
pub struct CompareDriversForm {
    pub driver1: Uuid,
    pub driver2: Uuid,
}

/// Response for driver details (used by listings too).
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub driver_id: String,
    pub name: String,
    pub age: i64,
    pub total_pole_positions: i64,
    pub total_race_wins: i64,
    pub total_points: i64,
    pub total_world_titles: i64,
    pub total_fastest_laps: i64,
    pub team_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Response for listing drivers.
#[derive(Debug, Serialize)]
pub struct ListDriversResponse {
    pub drivers: Vec<DriverResponse>,
}

/// Response for the details view: the record plus the resolved team name.
#[derive(Debug, Serialize)]
pub struct DriverDetailsResponse {
    pub driver: DriverResponse,
    /// "Unknown Team" when the reference is absent or dangles.
    pub team_name: String,
}

/// Team choice offered by the add/edit forms.
#[derive(Debug, Serialize)]
pub struct TeamOption {
    pub team_id: String,
    pub team_name: String,
}

/// Response for the add/edit form views.
#[derive(Debug, Serialize)]
pub struct DriverFormResponse {
    /// Record being edited, absent on the add form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<DriverResponse>,
    pub teams: Vec<TeamOption>,
}

/// Response for the comparison view.
#[derive(Debug, Serialize)]
pub struct CompareDriversResponse {
    pub left: DriverResponse,
    pub right: DriverResponse,
    /// Full roster for the picker.
    pub drivers: Vec<DriverResponse>,
}

fn driver_row_to_response(row: DriverRow) -> ApiResult<DriverResponse> {
    let created_at = format_timestamp(row.created_at, "created_at")?;
    let updated_at = format_timestamp(row.updated_at, "updated_at")?;

    Ok(DriverResponse {
        driver_id: row.driver_id.to_string(),
        name: row.name,
        age: row.age,
        total_pole_positions: row.total_pole_positions,
        total_race_wins: row.total_race_wins,
        total_points: row.total_points,
        total_world_titles: row.total_world_titles,
        total_fastest_laps: row.total_fastest_laps,
        team_id: row.team_id.map(|id| id.to_string()),
        created_at,
        updated_at,
    })
}

fn rows_to_responses(rows: Vec<DriverRow>) -> ApiResult<Vec<DriverResponse>> {
    rows.into_iter().map(driver_row_to_response).collect()
}

async fn team_roster(state: &AppState) -> ApiResult<Vec<TeamOption>> {
    let teams = state.store.list_teams().await?;
    Ok(teams
        .into_iter()
        .map(|row| TeamOption {
            team_id: row.team_id.to_string(),
            team_name: row.team_name,
        })
        .collect())
}

/// GET /view_driver - List all drivers.
pub async fn list_drivers(State(state): State<AppState>) -> ApiResult<Json<ListDriversResponse>> {
    let rows = state.store.list_drivers().await?;
    Ok(Json(ListDriversResponse {
        drivers: rows_to_responses(rows)?,
    }))
}

/// GET /driver_details?id= - One driver with its resolved team name.
pub async fn driver_details(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> ApiResult<Json<DriverDetailsResponse>> {
    let row = state
        .store
        .get_driver(params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("driver {} not found", params.id)))?;

    // Weak reference: the team may have been deleted since.
    let team_name = match row.team_id {
        Some(team_id) => state.store.get_team(team_id).await?.map(|t| t.team_name),
        None => None,
    };

    Ok(Json(DriverDetailsResponse {
        driver: driver_row_to_response(row)?,
        team_name: team_name.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
    }))
}

/// GET /add_driver - Form context for adding a driver.
pub async fn add_driver_form(
    State(state): State<AppState>,
) -> ApiResult<Json<DriverFormResponse>> {
    Ok(Json(DriverFormResponse {
        driver: None,
        teams: team_roster(&state).await?,
    }))
}

/// POST /add_driver - Create a driver.
pub async fn add_driver(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<MutationResponse>)> {
    require_auth(&req)?;
    let form: DriverForm = read_form(req).await?;

    let record = form.into_record();
    record.validate()?;

    let row = DriverRow::from_record(&record, OffsetDateTime::now_utc());
    state.store.create_driver(&row).await?;
    tracing::info!(driver_id = %row.driver_id, name = %row.name, "Driver created");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            status: "created",
            id: Some(row.driver_id.to_string()),
            redirect: "/view_driver",
        }),
    ))
}

/// GET /edit_driver?id= - Form context for editing a driver.
pub async fn edit_driver_form(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> ApiResult<Json<DriverFormResponse>> {
    let row = state
        .store
        .get_driver(params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("driver {} not found", params.id)))?;

    Ok(Json(DriverFormResponse {
        driver: Some(driver_row_to_response(row)?),
        teams: team_roster(&state).await?,
    }))
}

/// POST /edit_driver?id= - Full-replace a driver's fields.
pub async fn edit_driver(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
    req: Request,
) -> ApiResult<Json<MutationResponse>> {
    require_auth(&req)?;
    let form: DriverForm = read_form(req).await?;

    let existing = state
        .store
        .get_driver(params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("driver {} not found", params.id)))?;

    let record = form.into_record();
    record.validate()?;

    let row = DriverRow {
        driver_id: existing.driver_id,
        name: record.name,
        age: record.age,
        total_pole_positions: record.total_pole_positions,
        total_race_wins: record.total_race_wins,
        total_points: record.total_points,
        total_world_titles: record.total_world_titles,
        total_fastest_laps: record.total_fastest_laps,
        team_id: record.team_id,
        created_at: existing.created_at,
        updated_at: OffsetDateTime::now_utc(),
    };
    state.store.update_driver(&row).await?;
    tracing::info!(driver_id = %row.driver_id, "Driver updated");

    Ok(Json(MutationResponse {
        status: "updated",
        id: Some(row.driver_id.to_string()),
        redirect: "/view_driver",
    }))
}

/// POST /delete_driver/{id} - Delete a driver.
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
    req: Request,
) -> ApiResult<Json<MutationResponse>> {
    require_auth(&req)?;

    state.store.delete_driver(driver_id).await?;
    tracing::info!(driver_id = %driver_id, "Driver deleted");

    Ok(Json(MutationResponse {
        status: "deleted",
        id: Some(driver_id.to_string()),
        redirect: "/view_driver",
    }))
}

/// POST /filter_driver - Filtered listing.
pub async fn filter_drivers(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<ListDriversResponse>> {
    let form: DriverFilterForm = read_form(req).await?;

    let field = DriverField::parse(&form.attribute)?;
    let op = FilterOp::parse(&form.operator)?;

    let rows = state.store.filter_drivers(field, op, form.value).await?;
    Ok(Json(ListDriversResponse {
        drivers: rows_to_responses(rows)?,
    }))
}

/// POST /compare_drivers - Fetch both sides of a comparison.
pub async fn compare_drivers(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<CompareDriversResponse>> {
    let form: CompareDriversForm = read_form(req).await?;

    if form.driver1 == form.driver2 {
        return Err(ApiError::BadRequest(
            "a driver cannot be compared against itself".to_string(),
        ));
    }

    let left = state
        .store
        .get_driver(form.driver1)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("driver {} not found", form.driver1)))?;
    let right = state
        .store
        .get_driver(form.driver2)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("driver {} not found", form.driver2)))?;

    let roster = state.store.list_drivers().await?;

    Ok(Json(CompareDriversResponse {
        left: driver_row_to_response(left)?,
        right: driver_row_to_response(right)?,
        drivers: rows_to_responses(roster)?,
    }))
}

/// GET /compare_drivers - Roster for the comparison picker.
pub async fn compare_drivers_form(
    State(state): State<AppState>,
) -> ApiResult<Json<ListDriversResponse>> {
    let rows = state.store.list_drivers().await?;
    Ok(Json(ListDriversResponse {
        drivers: rows_to_responses(rows)?,
    }))
}
