use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Player {
    Table,
    Id,
    Name,
    Rank,
    PotentialPoints,
    ActualPoints,
    Cpi,
}

#[derive(DeriveIden)]
pub(crate) enum Tournament {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    Status,
    TopPlayersCount,
}

#[derive(DeriveIden)]
pub(crate) enum TournamentPlayers {
    Table,
    Id,
    TournamentId,
    PlayerId,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Team {
    Table,
    Id,
    TournamentId,
    UserId,
    Name,
    FinalRank,
    Winnings,
}

#[derive(DeriveIden)]
pub(crate) enum TeamPlayer {
    Table,
    Id,
    TeamId,
    PlayerId,
    PotentialPoints,
}

#[derive(DeriveIden)]
pub(crate) enum TournamentResult {
    Table,
    Id,
    TournamentId,
    TeamId,
    Placement,
    PointsEarned,
}

#[derive(DeriveIden)]
pub(crate) enum PlayerTournamentPoints {
    Table,
    Id,
    PlayerId,
    TournamentId,
    TeamId,
    Placement,
    PointsEarned,
}
