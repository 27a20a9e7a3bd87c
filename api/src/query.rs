use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::{PointsHistoryEntry, TeamPotential, TournamentStatus};
use service::error::GenericError;

#[openapi(tag = "Player")]
#[get("/player/<id>/points-history")]
pub(crate) async fn get_points_history(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<PointsHistoryEntry>>, GenericError> {
    service::player_points_history(db.inner(), id).await.map(Json)
}

#[openapi(tag = "Team")]
#[get("/team/<id>/potential-points")]
pub(crate) async fn get_team_potential(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<TeamPotential>, GenericError> {
    service::team_potential(db.inner(), id).await.map(Json)
}

#[openapi(tag = "Tournament")]
#[get("/tournament/<id>/status")]
pub(crate) async fn get_tournament_status(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<TournamentStatus>, GenericError> {
    service::get_tournament_status(db.inner(), id).await.map(Json)
}

/// # Potential points for a rank
#[openapi(tag = "Player")]
#[get("/potential-points/<rank>")]
pub(crate) async fn get_potential_points(rank: i32) -> Result<Json<i32>, GenericError> {
    if rank < 1 {
        return Err(GenericError::Validation(format!("Rank must be at least 1, got {rank}")));
    }
    Ok(Json(service::compute_potential_points(rank)))
}
