mod common;

use common::*;
use entity::prelude::*;
use rocket::async_test;
use sea_orm::{ConnectionTrait, EntityTrait};
use service::dto::forms::PurgeOptions;
use service::dto::{PlayerPlacement, TeamPlacement};
use service::error::GenericError;
use service::StoreTable;

fn placed(team_id: i32, placement: i32) -> TeamPlacement {
    TeamPlacement {
        team_id,
        placement,
        points_earned: 0,
        winnings: None,
    }
}

#[async_test]
async fn tournament_goes_with_everything_hanging_off_it() {
    let db = make_db().await;
    let doomed = add_tournament(&db, "Spring Open").await;
    let kept = add_tournament(&db, "Summer Open").await;

    let mut teams = Vec::new();
    for user in ["ann", "ben", "cid"] {
        teams.push(team_with_roster(&db, doomed.id, user, &[30, 40, 50, 60]).await);
    }
    let (kept_team, _) = team_with_roster(&db, kept.id, "dee", &[30, 40]).await;
    service::settle_by_team(
        &db,
        doomed.id,
        &[placed(teams[0].0.id, 1), placed(teams[1].0.id, 2), placed(teams[2].0.id, 3)],
    )
    .await
    .unwrap();
    service::settle_by_team(&db, kept.id, &[placed(kept_team.id, 1)])
        .await
        .unwrap();

    let log = service::delete_tournament(&db, doomed.id).await.unwrap();
    assert_eq!(
        log.tables(),
        vec![
            StoreTable::TournamentResult,
            StoreTable::PlayerTournamentPoints,
            StoreTable::TeamPlayer,
            StoreTable::Team,
            StoreTable::TournamentPlayers,
            StoreTable::Tournament,
        ]
    );
    assert_eq!(log.failures().count(), 0);
    assert_eq!(log.rows_deleted_from(StoreTable::TournamentResult), 3);
    assert_eq!(log.rows_deleted_from(StoreTable::PlayerTournamentPoints), 12);
    assert_eq!(log.rows_deleted_from(StoreTable::TeamPlayer), 12);
    assert_eq!(log.rows_deleted_from(StoreTable::Team), 3);
    assert_eq!(log.rows_deleted_from(StoreTable::TournamentPlayers), 12);

    assert!(Tournament::find_by_id(doomed.id).one(&db).await.unwrap().is_none());
    assert!(rows::<Team>(&db).await.iter().all(|t| t.tournament_id == kept.id));
    assert!(rows::<TeamPlayer>(&db).await.iter().all(|m| m.team_id == kept_team.id));
    assert!(rows::<TournamentResult>(&db).await.iter().all(|r| r.tournament_id == kept.id));
    assert_eq!(rows::<PlayerTournamentPoints>(&db).await.len(), 2);
    assert_eq!(rows::<TournamentPlayers>(&db).await.len(), 2);
    // players are not owned by a tournament
    assert_eq!(rows::<Player>(&db).await.len(), 14);

    let err = service::delete_tournament(&db, doomed.id).await.unwrap_err();
    assert!(matches!(err, GenericError::NotFound(_)));
}

#[async_test]
async fn drafted_player_is_refused() {
    let db = make_db().await;
    let tournament = add_tournament(&db, "Spring Open").await;
    let (team, players) = team_with_roster(&db, tournament.id, "ann", &[40]).await;
    service::settle_by_team(&db, tournament.id, &[placed(team.id, 1)])
        .await
        .unwrap();

    let err = service::delete_player(&db, players[0].id).await.unwrap_err();
    assert!(matches!(err, GenericError::ReferentialBlock(_)));

    assert_eq!(rows::<Player>(&db).await.len(), 1);
    assert_eq!(rows::<TeamPlayer>(&db).await.len(), 1);
    assert_eq!(rows::<PlayerTournamentPoints>(&db).await.len(), 1);
    assert_eq!(rows::<TournamentPlayers>(&db).await.len(), 1);
}

#[async_test]
async fn free_player_takes_ledger_and_entries_along() {
    let db = make_db().await;
    let tournament = add_tournament(&db, "Spring Open").await;
    let solo = add_player(&db, "solo", 40, Some(0)).await;
    let other = add_player(&db, "other", 40, Some(0)).await;
    enter(&db, tournament.id, &solo).await;
    enter(&db, tournament.id, &other).await;
    service::settle_by_player(
        &db,
        tournament.id,
        &[PlayerPlacement {
            player_id: solo.id,
            team_id: None,
            placement: 1,
            points_earned: 40,
        }],
    )
    .await
    .unwrap();

    let log = service::delete_player(&db, solo.id).await.unwrap();
    assert_eq!(
        log.tables(),
        vec![
            StoreTable::PlayerTournamentPoints,
            StoreTable::TournamentPlayers,
            StoreTable::Player,
        ]
    );
    assert_eq!(log.rows_deleted_from(StoreTable::PlayerTournamentPoints), 1);
    assert_eq!(log.rows_deleted_from(StoreTable::TournamentPlayers), 1);
    assert_eq!(log.rows_deleted_from(StoreTable::Player), 1);

    let entries = rows::<TournamentPlayers>(&db).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].player_id, other.id);

    let err = service::delete_player(&db, solo.id).await.unwrap_err();
    assert_eq!(err, GenericError::NotFound(format!("Player {} not found", solo.id)));
}

#[async_test]
async fn team_leaves_its_players_behind() {
    let db = make_db().await;
    let tournament = add_tournament(&db, "Spring Open").await;
    let (doomed, players) = team_with_roster(&db, tournament.id, "ann", &[40, 60]).await;
    let (kept, _) = team_with_roster(&db, tournament.id, "ben", &[50]).await;
    service::settle_by_team(&db, tournament.id, &[placed(doomed.id, 1), placed(kept.id, 2)])
        .await
        .unwrap();

    let log = service::delete_team(&db, doomed.id).await.unwrap();
    assert_eq!(
        log.tables(),
        vec![
            StoreTable::TournamentResult,
            StoreTable::PlayerTournamentPoints,
            StoreTable::TeamPlayer,
            StoreTable::Team,
        ]
    );
    assert_eq!(log.rows_deleted_from(StoreTable::TeamPlayer), 2);
    assert_eq!(log.rows_deleted_from(StoreTable::PlayerTournamentPoints), 2);

    assert!(Team::find_by_id(doomed.id).one(&db).await.unwrap().is_none());
    assert_eq!(rows::<Team>(&db).await.len(), 1);
    assert_eq!(rows::<TournamentResult>(&db).await.len(), 1);
    assert_eq!(rows::<PlayerTournamentPoints>(&db).await.len(), 1);
    assert_eq!(rows::<Player>(&db).await.len(), 3);
    // awards already credited stay on the career total
    assert_eq!(actual_points(&db, players[1].id).await, Some(60));

    let err = service::delete_team(&db, doomed.id).await.unwrap_err();
    assert!(matches!(err, GenericError::NotFound(_)));
}

#[async_test]
async fn roster_failure_stops_team_deletion() {
    let db = make_db().await;
    let tournament = add_tournament(&db, "Spring Open").await;
    let (team, _) = team_with_roster(&db, tournament.id, "ann", &[40]).await;
    service::settle_by_team(&db, tournament.id, &[placed(team.id, 1)])
        .await
        .unwrap();
    db.execute_unprepared("DROP TABLE team_player").await.unwrap();

    let err = service::delete_team(&db, team.id).await.unwrap_err();
    assert!(matches!(err, GenericError::Store(_)));

    assert!(Team::find_by_id(team.id).one(&db).await.unwrap().is_some());
    // earlier steps are not rolled back
    assert!(rows::<TournamentResult>(&db).await.is_empty());
    assert!(rows::<PlayerTournamentPoints>(&db).await.is_empty());
}

#[async_test]
async fn best_effort_failure_is_logged_and_skipped() {
    let db = make_db().await;
    let tournament = add_tournament(&db, "Spring Open").await;
    team_with_roster(&db, tournament.id, "ann", &[40, 50]).await;
    db.execute_unprepared("DROP TABLE tournament_result").await.unwrap();

    let log = service::delete_tournament(&db, tournament.id).await.unwrap();
    let failed = log.failures().map(|s| s.table).collect::<Vec<_>>();
    assert_eq!(failed, vec![StoreTable::TournamentResult]);
    assert_eq!(log.rows_deleted_from(StoreTable::Team), 1);
    assert_eq!(log.rows_deleted_from(StoreTable::Tournament), 1);
    assert!(rows::<Tournament>(&db).await.is_empty());
}

#[async_test]
async fn bulk_delete_skips_missing_and_reranks() {
    let db = make_db().await;
    let tournament = add_tournament(&db, "Spring Open").await;
    let drafted = add_rated_player(&db, "drafted", Some(990.0)).await;
    let survivor = add_rated_player(&db, "survivor", Some(900.0)).await;
    let entered = add_rated_player(&db, "entered", Some(950.0)).await;
    let team = add_team(&db, tournament.id, "ann").await;
    draft(&db, team.id, &drafted).await;
    enter(&db, tournament.id, &entered).await;

    let report = service::bulk_delete_players(&db, &[drafted.id, 999, entered.id, drafted.id])
        .await
        .unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.successful, 2);
    assert_eq!(report.skipped, 1);
    assert!(report.failed_ids.is_empty());
    assert_eq!(report.log.rows_deleted_from(StoreTable::TeamPlayer), 1);
    assert_eq!(report.log.rows_deleted_from(StoreTable::TournamentPlayers), 1);
    assert_eq!(report.log.rows_deleted_from(StoreTable::Player), 2);

    assert!(rows::<TeamPlayer>(&db).await.is_empty());
    assert!(rows::<TournamentPlayers>(&db).await.is_empty());
    let left = rows::<Player>(&db).await;
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, survivor.id);
    assert_eq!(left[0].rank, 1);
    assert_eq!(left[0].potential_points, 30);
}

#[async_test]
async fn bulk_delete_needs_ids() {
    let db = make_db().await;
    let err = service::bulk_delete_players(&db, &[]).await.unwrap_err();
    assert!(matches!(err, GenericError::Validation(_)));
}

#[async_test]
async fn bulk_delete_reports_every_id_when_blocked() {
    let db = make_db().await;
    let a = add_rated_player(&db, "a", Some(900.0)).await;
    let b = add_rated_player(&db, "b", Some(800.0)).await;
    db.execute_unprepared("DROP TABLE team_player").await.unwrap();

    let report = service::bulk_delete_players(&db, &[a.id, b.id]).await.unwrap();
    assert_eq!(report.successful, 0);
    assert_eq!(report.failed_ids, vec![a.id, b.id]);
    assert_eq!(rows::<Player>(&db).await.len(), 2);
}

#[async_test]
async fn ranks_follow_cpi_with_unrated_last() {
    let db = make_db().await;
    let steady = add_rated_player(&db, "steady", Some(900.0)).await;
    let unrated = add_rated_player(&db, "unrated", None).await;
    let best = add_rated_player(&db, "best", Some(950.0)).await;
    let tied = add_rated_player(&db, "tied", Some(900.0)).await;

    assert_eq!(service::recompute_player_ranks(&db).await.unwrap(), 4);

    let expected = [(best.id, 1, 30), (steady.id, 2, 32), (tied.id, 3, 34), (unrated.id, 4, 36)];
    for (id, rank, potential) in expected {
        let player = Player::find_by_id(id).one(&db).await.unwrap().unwrap();
        assert_eq!((player.rank, player.potential_points), (rank, potential), "player {id}");
    }
}

async fn seed_test_data(db: &sea_orm::DatabaseConnection) -> (i32, i32) {
    let test_event = add_tournament(db, "Test_Open").await;
    let real_event = add_tournament(db, "Real Cup").await;
    let test_team = add_team(db, test_event.id, "ann").await;
    let real_team = add_team(db, real_event.id, "ben").await;
    let alice = add_player(db, "test_alice", 40, Some(0)).await;
    let bob = add_player(db, "TEST_bob", 40, Some(0)).await;
    let carol = add_player(db, "carol", 40, Some(0)).await;
    draft(db, test_team.id, &alice).await;
    draft(db, real_team.id, &bob).await;
    draft(db, real_team.id, &carol).await;
    (real_event.id, real_team.id)
}

#[async_test]
async fn purge_matches_prefix_case_insensitively() {
    let db = make_db().await;
    let (real_event, real_team) = seed_test_data(&db).await;

    let report = service::purge_test_data(&db, "test_", PurgeOptions::default())
        .await
        .unwrap();
    assert!(report.success, "{:?}", report.failures);
    assert_eq!(report.tournaments_deleted, 1);
    assert_eq!(report.teams_deleted, 1);
    assert_eq!(report.players_deleted, 2);

    let tournaments = rows::<Tournament>(&db).await;
    assert_eq!(tournaments.len(), 1);
    assert_eq!(tournaments[0].id, real_event);
    let players = rows::<Player>(&db).await;
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "carol");
    let roster = rows::<TeamPlayer>(&db).await;
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].team_id, real_team);
}

#[async_test]
async fn purge_scopes() {
    let db = make_db().await;
    seed_test_data(&db).await;
    let players_only = PurgeOptions {
        players_only: true,
        ..Default::default()
    };
    let report = service::purge_test_data(&db, "TEST_", players_only).await.unwrap();
    assert_eq!((report.tournaments_deleted, report.players_deleted), (0, 2));
    assert_eq!(rows::<Tournament>(&db).await.len(), 2);

    let db = make_db().await;
    seed_test_data(&db).await;
    let tournaments_only = PurgeOptions {
        tournaments_only: true,
        ..Default::default()
    };
    let report = service::purge_test_data(&db, "test_", tournaments_only).await.unwrap();
    assert_eq!((report.tournaments_deleted, report.players_deleted), (1, 0));
    assert_eq!(rows::<Player>(&db).await.len(), 3);

    let db = make_db().await;
    seed_test_data(&db).await;
    let all_teams = PurgeOptions {
        all_teams: true,
        ..Default::default()
    };
    let report = service::purge_test_data(&db, "test_", all_teams).await.unwrap();
    assert!(report.success);
    assert_eq!(report.teams_deleted, 2);
    assert!(rows::<Team>(&db).await.is_empty());
    assert!(rows::<TeamPlayer>(&db).await.is_empty());
    assert_eq!(rows::<Tournament>(&db).await.len(), 1);
}

#[async_test]
async fn purge_rejects_bad_requests() {
    let db = make_db().await;
    seed_test_data(&db).await;

    let err = service::purge_test_data(&db, "  ", PurgeOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GenericError::Validation(_)));

    let both = PurgeOptions {
        players_only: true,
        tournaments_only: true,
        all_teams: false,
    };
    let err = service::purge_test_data(&db, "test_", both).await.unwrap_err();
    assert!(matches!(err, GenericError::Validation(_)));
    assert_eq!(rows::<Player>(&db).await.len(), 3);
}
