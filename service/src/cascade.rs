//! Foreign-key-safe deletion of players, teams and tournaments.
//!
//! Every deletion is a fixed list of delete steps run in order, leaf rows first.
//! A blocking step stops the pipeline when it fails, a best-effort step only
//! logs. Nothing is rolled back; the returned [`DeletionLog`] shows which steps
//! ran and what they removed.

use std::future::Future;

use entity::prelude::*;
use entity::*;
use itertools::Itertools;
use log::{debug, info, warn};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use sea_orm::entity::prelude::*;
use sea_orm::{DeleteResult, IntoActiveModel, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::GenericError;
use crate::scoring::compute_potential_points;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StoreTable {
    Player,
    Tournament,
    Team,
    TeamPlayer,
    TournamentResult,
    PlayerTournamentPoints,
    TournamentPlayers,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Blocking,
    BestEffort,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub table: StoreTable,
    pub kind: StepKind,
    pub rows_affected: u64,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct DeletionLog {
    pub steps: Vec<StepRecord>,
}

impl DeletionLog {
    async fn run<F>(&mut self, table: StoreTable, kind: StepKind, step: F) -> Result<u64, GenericError>
    where
        F: Future<Output = Result<DeleteResult, DbErr>>,
    {
        match step.await {
            Ok(res) => {
                debug!("Deleted {} row(s) from {table}", res.rows_affected);
                self.steps.push(StepRecord {
                    table,
                    kind,
                    rows_affected: res.rows_affected,
                    error: None,
                });
                Ok(res.rows_affected)
            }
            Err(e) => {
                self.steps.push(StepRecord {
                    table,
                    kind,
                    rows_affected: 0,
                    error: Some(e.to_string()),
                });
                match kind {
                    StepKind::BestEffort => {
                        warn!("Could not delete from {table}, continuing: {e}");
                        Ok(0)
                    }
                    StepKind::Blocking => Err(GenericError::Store(format!(
                        "Could not delete from {table}: {e}"
                    ))),
                }
            }
        }
    }

    async fn best_effort<F>(&mut self, table: StoreTable, step: F) -> u64
    where
        F: Future<Output = Result<DeleteResult, DbErr>>,
    {
        self.run(table, StepKind::BestEffort, step).await.unwrap_or(0)
    }

    async fn blocking<F>(&mut self, table: StoreTable, step: F) -> Result<u64, GenericError>
    where
        F: Future<Output = Result<DeleteResult, DbErr>>,
    {
        self.run(table, StepKind::Blocking, step).await
    }

    /// Tables touched, in execution order.
    pub fn tables(&self) -> Vec<StoreTable> {
        self.steps.iter().map(|s| s.table).collect()
    }

    pub fn rows_deleted_from(&self, table: StoreTable) -> u64 {
        self.steps
            .iter()
            .filter(|s| s.table == table)
            .map(|s| s.rows_affected)
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| s.error.is_some())
    }
}

pub async fn delete_player(db: &impl ConnectionTrait, player_id: i32) -> Result<DeletionLog, GenericError> {
    let rosters = TeamPlayer::find()
        .filter(team_player::Column::PlayerId.eq(player_id))
        .count(db)
        .await?;
    if rosters > 0 {
        return Err(GenericError::ReferentialBlock(format!(
            "Player {player_id} is in use by {rosters} team roster(s) and cannot be deleted"
        )));
    }

    let mut log = DeletionLog::default();
    log.best_effort(
        StoreTable::PlayerTournamentPoints,
        PlayerTournamentPoints::delete_many()
            .filter(player_tournament_points::Column::PlayerId.eq(player_id))
            .exec(db),
    )
    .await;
    log.best_effort(
        StoreTable::TournamentPlayers,
        TournamentPlayers::delete_many()
            .filter(tournament_players::Column::PlayerId.eq(player_id))
            .exec(db),
    )
    .await;
    let deleted = log
        .blocking(StoreTable::Player, Player::delete_by_id(player_id).exec(db))
        .await?;
    if deleted == 0 {
        return Err(GenericError::NotFound(format!("Player {player_id} not found")));
    }
    info!("Deleted player {player_id}");
    Ok(log)
}

pub async fn delete_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<DeletionLog, GenericError> {
    let mut log = DeletionLog::default();
    log.best_effort(
        StoreTable::TournamentResult,
        TournamentResult::delete_many()
            .filter(tournament_result::Column::TournamentId.eq(tournament_id))
            .exec(db),
    )
    .await;
    log.best_effort(
        StoreTable::PlayerTournamentPoints,
        PlayerTournamentPoints::delete_many()
            .filter(player_tournament_points::Column::TournamentId.eq(tournament_id))
            .exec(db),
    )
    .await;

    let team_ids = match Team::find()
        .filter(team::Column::TournamentId.eq(tournament_id))
        .all(db)
        .await
    {
        Ok(teams) => teams.into_iter().map(|t| t.id).collect_vec(),
        Err(e) => {
            warn!("Could not list teams of tournament {tournament_id}: {e}");
            Vec::new()
        }
    };
    if !team_ids.is_empty() {
        log.best_effort(
            StoreTable::TeamPlayer,
            TeamPlayer::delete_many()
                .filter(team_player::Column::TeamId.is_in(team_ids))
                .exec(db),
        )
        .await;
    }
    log.best_effort(
        StoreTable::Team,
        Team::delete_many()
            .filter(team::Column::TournamentId.eq(tournament_id))
            .exec(db),
    )
    .await;
    log.best_effort(
        StoreTable::TournamentPlayers,
        TournamentPlayers::delete_many()
            .filter(tournament_players::Column::TournamentId.eq(tournament_id))
            .exec(db),
    )
    .await;

    let deleted = log
        .blocking(
            StoreTable::Tournament,
            Tournament::delete_by_id(tournament_id).exec(db),
        )
        .await?;
    if deleted == 0 {
        return Err(GenericError::NotFound(format!(
            "Tournament {tournament_id} not found"
        )));
    }
    info!("Deleted tournament {tournament_id}");
    Ok(log)
}

pub async fn delete_team(db: &impl ConnectionTrait, team_id: i32) -> Result<DeletionLog, GenericError> {
    let mut log = DeletionLog::default();
    log.best_effort(
        StoreTable::TournamentResult,
        TournamentResult::delete_many()
            .filter(tournament_result::Column::TeamId.eq(team_id))
            .exec(db),
    )
    .await;
    log.best_effort(
        StoreTable::PlayerTournamentPoints,
        PlayerTournamentPoints::delete_many()
            .filter(player_tournament_points::Column::TeamId.eq(team_id))
            .exec(db),
    )
    .await;
    // A roster row left behind would point at a team that no longer exists
    log.blocking(
        StoreTable::TeamPlayer,
        TeamPlayer::delete_many()
            .filter(team_player::Column::TeamId.eq(team_id))
            .exec(db),
    )
    .await?;
    let deleted = log
        .blocking(StoreTable::Team, Team::delete_by_id(team_id).exec(db))
        .await?;
    if deleted == 0 {
        return Err(GenericError::NotFound(format!("Team {team_id} not found")));
    }
    info!("Deleted team {team_id}");
    Ok(log)
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct BulkDeleteReport {
    pub total: usize,
    pub successful: usize,
    /// Requested ids that were already gone
    pub skipped: usize,
    pub failed_ids: Vec<i32>,
    pub message: String,
    pub log: DeletionLog,
}

/// Deletes many players at once, clearing their ledger, tournament rosters and
/// team rosters first, then re-ranks everyone left.
pub async fn bulk_delete_players(
    db: &impl ConnectionTrait,
    ids: &[i32],
) -> Result<BulkDeleteReport, GenericError> {
    let report = delete_players_cascading(db, ids).await?;
    if report.successful > 0 {
        if let Err(e) = recompute_player_ranks(db).await {
            warn!("Players deleted but re-ranking failed: {e}");
        }
    }
    Ok(report)
}

pub(crate) async fn delete_players_cascading(
    db: &impl ConnectionTrait,
    ids: &[i32],
) -> Result<BulkDeleteReport, GenericError> {
    let ids = ids.iter().copied().unique().collect_vec();
    if ids.is_empty() {
        return Err(GenericError::Validation("No players selected".to_string()));
    }
    let total = ids.len();

    let mut log = DeletionLog::default();
    log.best_effort(
        StoreTable::PlayerTournamentPoints,
        PlayerTournamentPoints::delete_many()
            .filter(player_tournament_points::Column::PlayerId.is_in(ids.clone()))
            .exec(db),
    )
    .await;
    log.best_effort(
        StoreTable::TournamentPlayers,
        TournamentPlayers::delete_many()
            .filter(tournament_players::Column::PlayerId.is_in(ids.clone()))
            .exec(db),
    )
    .await;

    let outcome = async {
        let rosters = TeamPlayer::find()
            .filter(team_player::Column::PlayerId.is_in(ids.clone()))
            .count(db)
            .await?;
        if rosters > 0 {
            log.blocking(
                StoreTable::TeamPlayer,
                TeamPlayer::delete_many()
                    .filter(team_player::Column::PlayerId.is_in(ids.clone()))
                    .exec(db),
            )
            .await?;
        }

        let existing = Player::find()
            .filter(player::Column::Id.is_in(ids.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect_vec();
        if !existing.is_empty() {
            log.blocking(
                StoreTable::Player,
                Player::delete_many()
                    .filter(player::Column::Id.is_in(existing.clone()))
                    .exec(db),
            )
            .await?;
        }
        Ok::<_, GenericError>(existing)
    }
    .await;

    match outcome {
        Ok(deleted) => {
            let successful = deleted.len();
            let skipped = total - successful;
            info!("Bulk deleted {successful} of {total} player(s), {skipped} already gone");
            Ok(BulkDeleteReport {
                total,
                successful,
                skipped,
                failed_ids: Vec::new(),
                message: format!(
                    "Deleted {successful} of {total} player(s), skipped {skipped} already gone"
                ),
                log,
            })
        }
        Err(e) => {
            warn!("Bulk delete of {total} player(s) aborted: {e}");
            Ok(BulkDeleteReport {
                total,
                successful: 0,
                skipped: 0,
                failed_ids: ids,
                message: e.to_string(),
                log,
            })
        }
    }
}

/// Re-ranks every player by descending CPI and rewrites rank and potential points.
///
/// Players without a CPI go last; ties keep id order. Returns the number of players updated.
pub async fn recompute_player_ranks(db: &impl ConnectionTrait) -> Result<usize, GenericError> {
    let mut players = Player::find()
        .order_by_asc(player::Column::Id)
        .all(db)
        .await?;
    players.sort_by(|a, b| match (a.cpi, b.cpi) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let count = players.len();
    for (index, player) in players.into_iter().enumerate() {
        let rank = index as i32 + 1;
        let mut model = player.into_active_model();
        model.rank = Set(rank);
        model.potential_points = Set(compute_potential_points(rank));
        model.update(db).await?;
    }
    info!("Re-ranked {count} player(s)");
    Ok(count)
}
