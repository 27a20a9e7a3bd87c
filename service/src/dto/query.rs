use sea_orm::ActiveValue::Set;
use sea_orm::NotSet;

use entity::{player_tournament_points, tournament_result};

use super::*;

impl From<sea_orm_active_enums::TournamentStatus> for TournamentStatus {
    fn from(status: sea_orm_active_enums::TournamentStatus) -> Self {
        match status {
            sea_orm_active_enums::TournamentStatus::Upcoming => TournamentStatus::Upcoming,
            sea_orm_active_enums::TournamentStatus::Active => TournamentStatus::Active,
            sea_orm_active_enums::TournamentStatus::Completed => TournamentStatus::Completed,
        }
    }
}

impl From<TournamentStatus> for sea_orm_active_enums::TournamentStatus {
    fn from(status: TournamentStatus) -> Self {
        match status {
            TournamentStatus::Upcoming => sea_orm_active_enums::TournamentStatus::Upcoming,
            TournamentStatus::Active => sea_orm_active_enums::TournamentStatus::Active,
            TournamentStatus::Completed => sea_orm_active_enums::TournamentStatus::Completed,
        }
    }
}

impl TeamPlacement {
    pub(crate) fn active_result(&self, tournament_id: i32) -> tournament_result::ActiveModel {
        tournament_result::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id),
            team_id: Set(self.team_id),
            placement: Set(self.placement),
            points_earned: Set(self.points_earned),
        }
    }
}

impl SettlementReport {
    pub(crate) fn settled(message: String, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            message,
            warnings,
        }
    }
}

pub(crate) fn active_ledger_entry(
    player_id: i32,
    tournament_id: i32,
    team_id: Option<i32>,
    placement: i32,
    points_earned: i32,
) -> player_tournament_points::ActiveModel {
    player_tournament_points::ActiveModel {
        id: NotSet,
        player_id: Set(player_id),
        tournament_id: Set(tournament_id),
        team_id: Set(team_id),
        placement: Set(placement),
        points_earned: Set(points_earned),
    }
}

impl From<player_tournament_points::Model> for PointsHistoryEntry {
    fn from(entry: player_tournament_points::Model) -> Self {
        PointsHistoryEntry {
            tournament_id: entry.tournament_id,
            tournament_name: None,
            team_id: entry.team_id,
            placement: entry.placement,
            points_earned: entry.points_earned,
        }
    }
}
