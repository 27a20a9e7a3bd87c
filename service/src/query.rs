use chrono::NaiveDate;
use entity::prelude::*;
use entity::sea_orm_active_enums::TournamentStatus;
use entity::*;
use itertools::Itertools;
use log::{error, info};
use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, QueryOrder, Set};

use crate::dto;
use crate::error::GenericError;
use crate::scoring::{placement_points, LAST_PAYING_PLACEMENT};

pub(crate) async fn get_tournament_model(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<Option<tournament::Model>, GenericError> {
    Tournament::find_by_id(tournament_id).one(db).await.map_err(|e| {
        error!("Error while getting tournament: {:#?}", e);
        GenericError::Store("Unknown error while getting tournament".to_string())
    })
}

/// Status of a tournament on `today`. An explicit status always wins, otherwise
/// it follows the start and end dates.
pub fn effective_status(tournament: &tournament::Model, today: NaiveDate) -> dto::TournamentStatus {
    if let Some(status) = tournament.status {
        return status.into();
    }
    match (tournament.start_date, tournament.end_date) {
        (Some(start), _) if today < start => dto::TournamentStatus::Upcoming,
        (_, Some(end)) if today > end => dto::TournamentStatus::Completed,
        (None, None) => dto::TournamentStatus::Upcoming,
        _ => dto::TournamentStatus::Active,
    }
}

pub async fn get_tournament_status(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<dto::TournamentStatus, GenericError> {
    let tournament = get_tournament_model(db, tournament_id)
        .await?
        .ok_or_else(|| GenericError::NotFound(format!("Tournament {tournament_id} not found")))?;
    Ok(effective_status(&tournament, chrono::Utc::now().date_naive()))
}

pub async fn player_points_history(
    db: &impl ConnectionTrait,
    player_id: i32,
) -> Result<Vec<dto::PointsHistoryEntry>, GenericError> {
    if Player::find_by_id(player_id).one(db).await?.is_none() {
        return Err(GenericError::NotFound(format!("Player {player_id} not found")));
    }
    let ledger = PlayerTournamentPoints::find()
        .filter(player_tournament_points::Column::PlayerId.eq(player_id))
        .order_by_asc(player_tournament_points::Column::Id)
        .all(db)
        .await?;

    let tournament_ids = ledger.iter().map(|e| e.tournament_id).unique().collect_vec();
    let names: std::collections::HashMap<i32, String> = Tournament::find()
        .filter(tournament::Column::Id.is_in(tournament_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    Ok(ledger
        .into_iter()
        .map(|entry| {
            let tournament_name = names.get(&entry.tournament_id).cloned();
            dto::PointsHistoryEntry {
                tournament_name,
                ..dto::PointsHistoryEntry::from(entry)
            }
        })
        .collect())
}

pub async fn ledger_total(db: &impl ConnectionTrait, player_id: i32) -> Result<i32, GenericError> {
    Ok(PlayerTournamentPoints::find()
        .filter(player_tournament_points::Column::PlayerId.eq(player_id))
        .all(db)
        .await?
        .iter()
        .map(|entry| entry.points_earned)
        .sum::<i32>())
}

/// Rewrites `actual_points` to what the ledger says the player has earned.
pub async fn reconcile_actual_points(
    db: &impl ConnectionTrait,
    player_id: i32,
) -> Result<i32, GenericError> {
    let player = Player::find_by_id(player_id)
        .one(db)
        .await?
        .ok_or_else(|| GenericError::NotFound(format!("Player {player_id} not found")))?;
    let total = ledger_total(db, player_id).await?;
    if player.actual_points != Some(total) {
        info!(
            "Correcting actual points of player {player_id} from {:?} to {total}",
            player.actual_points
        );
        let mut model = player.into_active_model();
        model.actual_points = Set(Some(total));
        model.update(db).await?;
    }
    Ok(total)
}

/// Sum of the draft-time potential points on a team's roster.
pub async fn team_potential_points(db: &impl ConnectionTrait, team_id: i32) -> Result<i32, GenericError> {
    if Team::find_by_id(team_id).one(db).await?.is_none() {
        return Err(GenericError::NotFound(format!("Team {team_id} not found")));
    }
    Ok(TeamPlayer::find()
        .filter(team_player::Column::TeamId.eq(team_id))
        .all(db)
        .await?
        .iter()
        .map(|member| member.potential_points)
        .sum::<i32>())
}

/// What a team earns at each paying placement, used to prefill `points_earned`.
pub async fn team_potential(db: &impl ConnectionTrait, team_id: i32) -> Result<dto::TeamPotential, GenericError> {
    let potential_points = team_potential_points(db, team_id).await?;
    Ok(dto::TeamPotential {
        team_id,
        potential_points,
        points_by_placement: (1..=LAST_PAYING_PLACEMENT)
            .map(|placement| placement_points(potential_points, placement))
            .collect(),
    })
}

pub(crate) fn is_completed(tournament: &tournament::Model) -> bool {
    tournament.status == Some(TournamentStatus::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        status: Option<TournamentStatus>,
    ) -> tournament::Model {
        tournament::Model {
            id: 1,
            name: "Spring Open".to_string(),
            start_date: start,
            end_date: end,
            status,
            top_players_count: 4,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn status_follows_dates_when_unset() {
        let t = tournament(Some(day(10)), Some(day(12)), None);
        assert_eq!(effective_status(&t, day(9)), dto::TournamentStatus::Upcoming);
        assert_eq!(effective_status(&t, day(10)), dto::TournamentStatus::Active);
        assert_eq!(effective_status(&t, day(12)), dto::TournamentStatus::Active);
        assert_eq!(effective_status(&t, day(13)), dto::TournamentStatus::Completed);
    }

    #[test]
    fn explicit_status_wins() {
        let t = tournament(Some(day(10)), Some(day(12)), Some(TournamentStatus::Completed));
        assert_eq!(effective_status(&t, day(1)), dto::TournamentStatus::Completed);
        assert!(is_completed(&t));
    }

    #[test]
    fn open_ended_and_undated() {
        let t = tournament(Some(day(10)), None, None);
        assert_eq!(effective_status(&t, day(20)), dto::TournamentStatus::Active);
        let t = tournament(None, None, None);
        assert_eq!(effective_status(&t, day(20)), dto::TournamentStatus::Upcoming);
    }
}
