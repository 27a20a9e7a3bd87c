use entity::prelude::*;
use entity::*;
use itertools::Itertools;
use log::{info, warn};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

use crate::cascade::{delete_players_cascading, delete_team, delete_tournament, StoreTable};
use crate::dto::forms::PurgeOptions;
use crate::error::GenericError;

pub const DEFAULT_TEST_DATA_PREFIX: &str = "test_";

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct PurgeReport {
    pub success: bool,
    pub tournaments_deleted: usize,
    pub teams_deleted: usize,
    pub players_deleted: usize,
    pub failures: Vec<String>,
}

/// Prefix from `TEST_DATA_PREFIX`, or `test_` when unset.
pub fn configured_test_prefix() -> String {
    std::env::var("TEST_DATA_PREFIX")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEST_DATA_PREFIX.to_string())
}

fn name_starts_with<C: ColumnTrait>(column: C, prefix: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("{}%", prefix.to_lowercase()))
}

/// Removes test data by name prefix, matched case-insensitively.
///
/// Matching tournaments are removed with the full tournament cascade, `all_teams`
/// then sweeps every remaining team, and players are matched on their own name
/// and removed with the bulk player pipeline.
pub async fn purge_test_data(
    db: &impl ConnectionTrait,
    prefix: &str,
    options: PurgeOptions,
) -> Result<PurgeReport, GenericError> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(GenericError::Validation(
            "A name prefix is required to purge test data".to_string(),
        ));
    }
    if options.players_only && options.tournaments_only {
        return Err(GenericError::Validation(
            "Choose either players only or tournaments only, not both".to_string(),
        ));
    }

    let mut report = PurgeReport::default();

    if !options.players_only {
        let tournament_ids = Tournament::find()
            .filter(name_starts_with(tournament::Column::Name, prefix))
            .order_by_asc(tournament::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect_vec();
        for tournament_id in tournament_ids {
            match delete_tournament(db, tournament_id).await {
                Ok(log) => {
                    report.tournaments_deleted += 1;
                    report.teams_deleted += log.rows_deleted_from(StoreTable::Team) as usize;
                    report.failures.extend(
                        log.failures()
                            .filter_map(|step| step.error.clone())
                            .map(|e| format!("Tournament {tournament_id}: {e}")),
                    );
                }
                Err(e) => {
                    warn!("Could not purge tournament {tournament_id}: {e}");
                    report.failures.push(format!("Tournament {tournament_id}: {e}"));
                }
            }
        }

        if options.all_teams {
            let team_ids = Team::find()
                .order_by_asc(team::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(|t| t.id)
                .collect_vec();
            for team_id in team_ids {
                match delete_team(db, team_id).await {
                    Ok(_) => report.teams_deleted += 1,
                    Err(e) => {
                        warn!("Could not purge team {team_id}: {e}");
                        report.failures.push(format!("Team {team_id}: {e}"));
                    }
                }
            }
        }
    }

    if !options.tournaments_only {
        let player_ids = Player::find()
            .filter(name_starts_with(player::Column::Name, prefix))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect_vec();
        if !player_ids.is_empty() {
            let bulk = delete_players_cascading(db, &player_ids).await?;
            report.players_deleted = bulk.successful;
            if !bulk.failed_ids.is_empty() {
                report
                    .failures
                    .push(format!("Players {:?}: {}", bulk.failed_ids, bulk.message));
            }
        }
    }

    report.success = report.failures.is_empty();
    info!(
        "Purged test data with prefix {prefix:?}: {} tournament(s), {} team(s), {} player(s)",
        report.tournaments_deleted, report.teams_deleted, report.players_deleted
    );
    Ok(report)
}
