use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::forms::{BulkDeletePlayers, PurgeTestData};
use service::dto::{PlacementCheck, PlayerPlacement, SettlementReport, TeamPlacement};
use service::error::GenericError;
use service::{BulkDeleteReport, DeletionLog, PurgeReport};

/// # Settle a tournament from team placements
///
/// # Parameters
///
/// - `id` - The tournament to settle
///
/// - `placements` - One row per team, `placement` 1 to 4 or 0 for unplaced
///
/// # Returns
///
/// A summary of the awarded points and any best-effort steps that failed
///
/// # Errors
///
/// - `GenericError::Validation` - Duplicate or non-contiguous placements, nothing was written
///
/// - `GenericError::NotFound` - The tournament does not exist
///
/// - `GenericError::Store` - Saving the results or the status failed
#[openapi(tag = "Settlement")]
#[post("/tournament/<id>/settle/teams", format = "json", data = "<placements>")]
pub(crate) async fn settle_teams(
    db: &State<DatabaseConnection>,
    id: i32,
    placements: Json<Vec<TeamPlacement>>,
) -> Result<Json<SettlementReport>, GenericError> {
    service::settle_by_team(db.inner(), id, &placements.into_inner())
        .await
        .map(Json)
}

/// # Settle a tournament from player placements
///
/// Every player placed within the tournament's top players count earns their full potential points.
#[openapi(tag = "Settlement")]
#[post("/tournament/<id>/settle/players", format = "json", data = "<placements>")]
pub(crate) async fn settle_players(
    db: &State<DatabaseConnection>,
    id: i32,
    placements: Json<Vec<PlayerPlacement>>,
) -> Result<Json<SettlementReport>, GenericError> {
    service::settle_by_player(db.inner(), id, &placements.into_inner())
        .await
        .map(Json)
}

/// # Take back every award of a tournament
#[openapi(tag = "Settlement")]
#[post("/tournament/<id>/settle/revert")]
pub(crate) async fn revert_tournament_settlement(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<SettlementReport>, GenericError> {
    service::revert_settlement(db.inner(), id).await.map(Json)
}

/// # Check team placements without saving them
#[openapi(tag = "Settlement")]
#[post("/placements/validate", format = "json", data = "<placements>")]
pub(crate) async fn check_team_placements(placements: Json<Vec<TeamPlacement>>) -> Json<PlacementCheck> {
    Json(service::check_placements(&placements.into_inner()))
}

/// # Delete a player
///
/// Refused with 409 while the player is on any team roster.
#[openapi(tag = "Player")]
#[delete("/player/<id>")]
pub(crate) async fn remove_player(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<DeletionLog>, GenericError> {
    service::delete_player(db.inner(), id).await.map(Json)
}

/// # Delete a team with its roster, results and ledger rows
#[openapi(tag = "Team")]
#[delete("/team/<id>")]
pub(crate) async fn remove_team(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<DeletionLog>, GenericError> {
    service::delete_team(db.inner(), id).await.map(Json)
}

/// # Delete a tournament and everything under it
#[openapi(tag = "Tournament")]
#[delete("/tournament/<id>")]
pub(crate) async fn remove_tournament(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<DeletionLog>, GenericError> {
    service::delete_tournament(db.inner(), id).await.map(Json)
}

/// # Delete many players at once
///
/// Ids that no longer exist are counted as skipped. Remaining players are re-ranked afterwards.
#[openapi(tag = "Player")]
#[post("/players/bulk-delete", format = "json", data = "<players>")]
pub(crate) async fn bulk_remove_players(
    db: &State<DatabaseConnection>,
    players: Json<BulkDeletePlayers>,
) -> Result<Json<BulkDeleteReport>, GenericError> {
    service::bulk_delete_players(db.inner(), &players.into_inner().ids)
        .await
        .map(Json)
}

/// # Re-rank every player by CPI
#[openapi(tag = "Player")]
#[post("/players/recompute-ranks")]
pub(crate) async fn recompute_ranks(db: &State<DatabaseConnection>) -> Result<Json<usize>, GenericError> {
    service::recompute_player_ranks(db.inner()).await.map(Json)
}

/// # Purge test data by name prefix
#[openapi(tag = "Maintenance")]
#[post("/purge-test-data", format = "json", data = "<purge>")]
pub(crate) async fn purge_test_players_and_tournaments(
    db: &State<DatabaseConnection>,
    purge: Json<PurgeTestData>,
) -> Result<Json<PurgeReport>, GenericError> {
    let purge = purge.into_inner();
    let prefix = purge.prefix.unwrap_or_else(service::configured_test_prefix);
    service::purge_test_data(db.inner(), &prefix, purge.options)
        .await
        .map(Json)
}

/// # Rewrite a player's actual points from the ledger
#[openapi(tag = "Player")]
#[post("/player/<id>/reconcile-points")]
pub(crate) async fn reconcile_player_points(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<i32>, GenericError> {
    service::reconcile_actual_points(db.inner(), id).await.map(Json)
}
