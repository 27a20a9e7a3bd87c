//! Turning final placements into point awards.
//!
//! Settlement is not transactional. Each store call is applied on its own and a
//! failure part way leaves the earlier calls in place. Result rows are replaced
//! on every run, but `actual_points` credits and ledger rows are appended, so
//! settling the same tournament twice counts the awards twice. Use
//! [`revert_settlement`] before re-settling.

use entity::prelude::*;
use entity::sea_orm_active_enums::TournamentStatus;
use entity::*;
use itertools::Itertools;
use log::{debug, error, info, warn};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{IntoActiveModel, Set};

use crate::dto::{active_ledger_entry, PlayerPlacement, SettlementReport, TeamPlacement};
use crate::error::GenericError;
use crate::placements::{validate_placements, validate_player_placements};
use crate::query::{get_tournament_model, is_completed};
use crate::scoring::{ordinal, placement_points};

#[derive(Default)]
struct Awards {
    players: usize,
    points: i64,
    warnings: Vec<String>,
}

impl Awards {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// Settles a tournament from its team placements.
///
/// Every player on a placed team earns their draft-time potential points scaled
/// by the team's payout tier (100/75/50/25%), rounded per player. Results are
/// replaced, team ranks and winnings are written and the tournament is marked
/// completed.
pub async fn settle_by_team(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    rows: &[TeamPlacement],
) -> Result<SettlementReport, GenericError> {
    validate_placements(rows)?;
    let tournament = get_tournament_model(db, tournament_id)
        .await?
        .ok_or_else(|| GenericError::NotFound(format!("Tournament {tournament_id} not found")))?;

    let placed = rows
        .iter()
        .filter(|r| r.placement > 0)
        .sorted_by_key(|r| r.placement)
        .collect_vec();

    ensure_teams_in_tournament(db, tournament_id, placed.iter().map(|r| r.team_id)).await?;

    let mut awards = Awards::default();
    if is_completed(&tournament) {
        awards.warn(format!(
            "Tournament {tournament_id} was already settled, earlier awards are kept and counted again"
        ));
    }

    if let Err(e) = TournamentResult::delete_many()
        .filter(tournament_result::Column::TournamentId.eq(tournament_id))
        .exec(db)
        .await
    {
        awards.warn(format!("Could not clear previous results: {e}"));
    }

    for row in &placed {
        award_team(db, tournament_id, row, &mut awards).await;
    }

    for row in &placed {
        if let Err(e) = Team::update_many()
            .col_expr(team::Column::FinalRank, Expr::value(row.placement))
            .col_expr(team::Column::Winnings, Expr::value(row.winnings))
            .filter(team::Column::Id.eq(row.team_id))
            .exec(db)
            .await
        {
            awards.warn(format!("Could not update rank of team {}: {e}", row.team_id));
        }
    }

    TournamentResult::insert_many(placed.iter().map(|r| r.active_result(tournament_id)))
        .exec(db)
        .await
        .map_err(|e| {
            error!("Error while inserting results of tournament {tournament_id}: {:#?}", e);
            GenericError::Store(format!("Could not save tournament results: {e}"))
        })?;

    mark_completed(db, tournament).await?;

    info!(
        "Settled tournament {tournament_id}: {} team(s), {} point(s) to {} player(s)",
        placed.len(),
        awards.points,
        awards.players
    );
    Ok(SettlementReport::settled(
        format!(
            "Settled {} placed team(s), awarded {} point(s) to {} player(s)",
            placed.len(),
            awards.points,
            awards.players
        ),
        awards.warnings,
    ))
}

async fn ensure_teams_in_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    team_ids: impl Iterator<Item = i32>,
) -> Result<(), GenericError> {
    let teams_in_tournament = Team::find()
        .filter(team::Column::TournamentId.eq(tournament_id))
        .all(db)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect_vec();
    for team_id in team_ids {
        if !teams_in_tournament.contains(&team_id) {
            return Err(GenericError::Validation(format!(
                "Team {team_id} is not part of tournament {tournament_id}"
            )));
        }
    }
    Ok(())
}

async fn award_team(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    row: &TeamPlacement,
    awards: &mut Awards,
) {
    let roster = match TeamPlayer::find()
        .filter(team_player::Column::TeamId.eq(row.team_id))
        .all(db)
        .await
    {
        Ok(roster) => roster,
        Err(e) => {
            awards.warn(format!("Could not load roster of team {}: {e}", row.team_id));
            return;
        }
    };

    for member in roster {
        let points = placement_points(member.potential_points, row.placement);
        if points == 0 {
            continue;
        }
        match award(
            db,
            member.player_id,
            tournament_id,
            Some(row.team_id),
            row.placement,
            points,
        )
        .await
        {
            Ok(()) => {
                awards.players += 1;
                awards.points += i64::from(points);
            }
            Err(e) => awards.warn(format!(
                "Could not award {points} point(s) to player {} for {} place: {e}",
                member.player_id,
                ordinal(row.placement)
            )),
        }
    }
}

/// Appends the ledger row, then credits `points` to the player's career total.
///
/// A rejected ledger row leaves the total untouched. Read-then-write; two
/// settlements crediting the same player at the same time can lose an update.
async fn award(
    db: &impl ConnectionTrait,
    player_id: i32,
    tournament_id: i32,
    team_id: Option<i32>,
    placement: i32,
    points: i32,
) -> Result<(), DbErr> {
    let player = Player::find_by_id(player_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("player {player_id}")))?;

    PlayerTournamentPoints::insert(active_ledger_entry(
        player_id,
        tournament_id,
        team_id,
        placement,
        points,
    ))
    .exec(db)
    .await?;

    let total = player.actual_points.unwrap_or(0) + points;
    let mut model = player.into_active_model();
    model.actual_points = Set(Some(total));
    model.update(db).await?;
    debug!("Player {player_id} earned {points} point(s), total now {total}");
    Ok(())
}

/// Settles a tournament from individual player placements.
///
/// Any player placed within the tournament's `top_players_count` earns their
/// full potential points, regardless of the exact placement. Teams and results
/// are left alone.
pub async fn settle_by_player(
    db: &impl ConnectionTrait,
    tournament_id: i32,
    rows: &[PlayerPlacement],
) -> Result<SettlementReport, GenericError> {
    validate_player_placements(rows)?;
    let tournament = get_tournament_model(db, tournament_id)
        .await?
        .ok_or_else(|| GenericError::NotFound(format!("Tournament {tournament_id} not found")))?;
    let top = tournament.top_players_count;
    let team_ids = rows.iter().filter_map(|r| r.team_id).unique().collect_vec();
    ensure_teams_in_tournament(db, tournament_id, team_ids.into_iter()).await?;

    let mut awards = Awards::default();
    if is_completed(&tournament) {
        awards.warn(format!(
            "Tournament {tournament_id} was already settled, earlier awards are kept and counted again"
        ));
    }
    for row in rows.iter().filter(|r| r.placement >= 1 && r.placement <= top) {
        let potential = match Player::find_by_id(row.player_id).one(db).await {
            Ok(Some(player)) => player.potential_points,
            Ok(None) => {
                awards.warn(format!("Player {} not found", row.player_id));
                continue;
            }
            Err(e) => {
                awards.warn(format!("Could not load player {}: {e}", row.player_id));
                continue;
            }
        };
        if potential == 0 {
            continue;
        }
        match award(
            db,
            row.player_id,
            tournament_id,
            row.team_id,
            row.placement,
            potential,
        )
        .await
        {
            Ok(()) => {
                awards.players += 1;
                awards.points += i64::from(potential);
            }
            Err(e) => awards.warn(format!(
                "Could not award {potential} point(s) to player {}: {e}",
                row.player_id
            )),
        }
    }

    mark_completed(db, tournament).await?;

    info!(
        "Settled tournament {tournament_id} by player: {} point(s) to {} player(s)",
        awards.points, awards.players
    );
    Ok(SettlementReport::settled(
        format!(
            "Awarded {} point(s) to {} player(s) placed in the top {top}",
            awards.points, awards.players
        ),
        awards.warnings,
    ))
}

async fn mark_completed(
    db: &impl ConnectionTrait,
    tournament: tournament::Model,
) -> Result<(), GenericError> {
    let id = tournament.id;
    let mut model = tournament.into_active_model();
    model.status = Set(Some(TournamentStatus::Completed));
    model.update(db).await.map_err(|e| {
        error!("Error while completing tournament {id}: {:#?}", e);
        GenericError::Store(format!("Could not mark tournament {id} completed: {e}"))
    })?;
    Ok(())
}

/// Undoes every award of a tournament's settlement.
///
/// Ledger points are taken back off each player's `actual_points` (never below
/// zero), then the ledger rows, results and team ranks are cleared and the
/// status goes back to being derived from the dates.
pub async fn revert_settlement(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<SettlementReport, GenericError> {
    let tournament = get_tournament_model(db, tournament_id)
        .await?
        .ok_or_else(|| GenericError::NotFound(format!("Tournament {tournament_id} not found")))?;

    let ledger = PlayerTournamentPoints::find()
        .filter(player_tournament_points::Column::TournamentId.eq(tournament_id))
        .all(db)
        .await?;
    let by_player = ledger
        .iter()
        .into_grouping_map_by(|entry| entry.player_id)
        .fold(0, |acc, _, entry| acc + entry.points_earned);

    let mut warnings = Vec::new();
    for (player_id, points) in by_player.iter().sorted() {
        let Some(player) = Player::find_by_id(*player_id).one(db).await? else {
            warnings.push(format!("Player {player_id} no longer exists"));
            continue;
        };
        let total = (player.actual_points.unwrap_or(0) - points).max(0);
        let mut model = player.into_active_model();
        model.actual_points = Set(Some(total));
        model.update(db).await?;
    }

    PlayerTournamentPoints::delete_many()
        .filter(player_tournament_points::Column::TournamentId.eq(tournament_id))
        .exec(db)
        .await?;
    TournamentResult::delete_many()
        .filter(tournament_result::Column::TournamentId.eq(tournament_id))
        .exec(db)
        .await?;
    Team::update_many()
        .col_expr(team::Column::FinalRank, Expr::value(Option::<i32>::None))
        .col_expr(team::Column::Winnings, Expr::value(Option::<f64>::None))
        .filter(team::Column::TournamentId.eq(tournament_id))
        .exec(db)
        .await?;

    let mut model = tournament.into_active_model();
    model.status = Set(None);
    model.update(db).await?;

    let points: i32 = by_player.values().sum();
    info!("Reverted settlement of tournament {tournament_id}: {points} point(s) taken back");
    Ok(SettlementReport::settled(
        format!(
            "Reverted {} ledger entries, took back {points} point(s) from {} player(s)",
            ledger.len(),
            by_player.len()
        ),
        warnings,
    ))
}
