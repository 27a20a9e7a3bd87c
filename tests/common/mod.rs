#![allow(dead_code)]

use migration::MigratorTrait;
use rocket::log::private::LevelFilter;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, NotSet,
};

// in-memory sqlite per test, one connection so every query sees the same database
pub async fn make_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1);
    opt.min_connections(1);
    opt.sqlx_logging(false);
    opt.sqlx_logging_level(LevelFilter::Off);
    let db = Database::connect(opt).await.expect("Database must exist");
    migration::Migrator::up(&db, None)
        .await
        .expect("Migration success");
    db
}

pub async fn add_player(
    db: &DatabaseConnection,
    name: &str,
    potential_points: i32,
    actual_points: Option<i32>,
) -> entity::player::Model {
    entity::player::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        rank: Set(1),
        potential_points: Set(potential_points),
        actual_points: Set(actual_points),
        cpi: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn add_rated_player(db: &DatabaseConnection, name: &str, cpi: Option<f64>) -> entity::player::Model {
    entity::player::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        rank: Set(999),
        potential_points: Set(0),
        actual_points: Set(Some(0)),
        cpi: Set(cpi),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn add_tournament(db: &DatabaseConnection, name: &str) -> entity::tournament::Model {
    add_tournament_with_top(db, name, 4).await
}

pub async fn add_tournament_with_top(
    db: &DatabaseConnection,
    name: &str,
    top_players_count: i32,
) -> entity::tournament::Model {
    entity::tournament::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        start_date: Set(None),
        end_date: Set(None),
        status: Set(None),
        top_players_count: Set(top_players_count),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn add_team(db: &DatabaseConnection, tournament_id: i32, user: &str) -> entity::team::Model {
    entity::team::ActiveModel {
        id: NotSet,
        tournament_id: Set(tournament_id),
        user_id: Set(user.to_string()),
        name: Set(Some(format!("{user}'s team"))),
        final_rank: Set(None),
        winnings: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn draft(db: &DatabaseConnection, team_id: i32, player: &entity::player::Model) {
    entity::team_player::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        player_id: Set(player.id),
        potential_points: Set(player.potential_points),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn enter(db: &DatabaseConnection, tournament_id: i32, player: &entity::player::Model) {
    entity::tournament_players::ActiveModel {
        id: NotSet,
        tournament_id: Set(tournament_id),
        player_id: Set(player.id),
        name: Set(player.name.clone()),
    }
    .insert(db)
    .await
    .unwrap();
}

/// A team in `tournament_id` drafted with fresh players of the given potential points.
pub async fn team_with_roster(
    db: &DatabaseConnection,
    tournament_id: i32,
    user: &str,
    potentials: &[i32],
) -> (entity::team::Model, Vec<entity::player::Model>) {
    let team = add_team(db, tournament_id, user).await;
    let mut players = Vec::new();
    for (i, potential) in potentials.iter().enumerate() {
        let player = add_player(db, &format!("{user} pick {i}"), *potential, Some(0)).await;
        draft(db, team.id, &player).await;
        enter(db, tournament_id, &player).await;
        players.push(player);
    }
    (team, players)
}

pub async fn actual_points(db: &DatabaseConnection, player_id: i32) -> Option<i32> {
    entity::player::Entity::find_by_id(player_id)
        .one(db)
        .await
        .unwrap()
        .expect("player exists")
        .actual_points
}

pub async fn rows<E: EntityTrait>(db: &DatabaseConnection) -> Vec<E::Model> {
    E::find().all(db).await.unwrap()
}
