use crate::macros::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

use crate::enums::*;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Player::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Player::Name).string().not_null())
                    .col(ColumnDef::new(Player::Rank).integer().not_null())
                    .col(
                        ColumnDef::new(Player::PotentialPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Player::ActualPoints).integer().default(0))
                    .col(ColumnDef::new(Player::Cpi).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournament::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tournament::Name).string().not_null())
                    .col(ColumnDef::new(Tournament::StartDate).date())
                    .col(ColumnDef::new(Tournament::EndDate).date())
                    .col(ColumnDef::new(Tournament::Status).text())
                    .col(
                        ColumnDef::new(Tournament::TopPlayersCount)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TournamentPlayers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentPlayers::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentPlayers::Table, TournamentPlayers::TournamentId)
                            .to(Tournament::Table, Tournament::Id),
                    )
                    .col(
                        ColumnDef::new(TournamentPlayers::PlayerId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentPlayers::Table, TournamentPlayers::PlayerId)
                            .to(Player::Table, Player::Id),
                    )
                    .col(ColumnDef::new(TournamentPlayers::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(TournamentPlayers, manager);
        drop_table!(Tournament, manager);
        drop_table!(Player, manager);
        Ok(())
    }
}
