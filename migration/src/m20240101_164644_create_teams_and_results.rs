use sea_orm_migration::prelude::*;

use crate::enums::*;
use crate::macros::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .col(
                        ColumnDef::new(Team::Id)
                            .integer()
                            .auto_increment()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::TournamentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Team::Table, Team::TournamentId)
                            .to(Tournament::Table, Tournament::Id),
                    )
                    .col(ColumnDef::new(Team::UserId).string().not_null())
                    .col(ColumnDef::new(Team::Name).string())
                    .col(ColumnDef::new(Team::FinalRank).integer())
                    .col(ColumnDef::new(Team::Winnings).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeamPlayer::Table)
                    .col(
                        ColumnDef::new(TeamPlayer::Id)
                            .integer()
                            .auto_increment()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamPlayer::TeamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamPlayer::Table, TeamPlayer::TeamId)
                            .to(Team::Table, Team::Id),
                    )
                    .col(ColumnDef::new(TeamPlayer::PlayerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamPlayer::Table, TeamPlayer::PlayerId)
                            .to(Player::Table, Player::Id),
                    )
                    .col(
                        ColumnDef::new(TeamPlayer::PotentialPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("team_player_team_player_unique")
                    .table(TeamPlayer::Table)
                    .col(TeamPlayer::TeamId)
                    .col(TeamPlayer::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentResult::Table)
                    .col(
                        ColumnDef::new(TournamentResult::Id)
                            .integer()
                            .auto_increment()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentResult::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentResult::Table, TournamentResult::TournamentId)
                            .to(Tournament::Table, Tournament::Id),
                    )
                    .col(ColumnDef::new(TournamentResult::TeamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentResult::Table, TournamentResult::TeamId)
                            .to(Team::Table, Team::Id),
                    )
                    .col(
                        ColumnDef::new(TournamentResult::Placement)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentResult::PointsEarned)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Ledger rows are only ever appended; corrections go through player.actual_points
        manager
            .create_table(
                Table::create()
                    .table(PlayerTournamentPoints::Table)
                    .col(
                        ColumnDef::new(PlayerTournamentPoints::Id)
                            .integer()
                            .auto_increment()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlayerTournamentPoints::PlayerId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlayerTournamentPoints::Table, PlayerTournamentPoints::PlayerId)
                            .to(Player::Table, Player::Id),
                    )
                    .col(
                        ColumnDef::new(PlayerTournamentPoints::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                PlayerTournamentPoints::Table,
                                PlayerTournamentPoints::TournamentId,
                            )
                            .to(Tournament::Table, Tournament::Id),
                    )
                    .col(ColumnDef::new(PlayerTournamentPoints::TeamId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlayerTournamentPoints::Table, PlayerTournamentPoints::TeamId)
                            .to(Team::Table, Team::Id),
                    )
                    .col(
                        ColumnDef::new(PlayerTournamentPoints::Placement)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerTournamentPoints::PointsEarned)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(PlayerTournamentPoints, manager);
        drop_table!(TournamentResult, manager);
        drop_table!(TeamPlayer, manager);
        drop_table!(Team, manager);
        Ok(())
    }
}
