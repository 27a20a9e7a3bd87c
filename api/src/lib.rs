mod mutation;
mod query;

use rocket_okapi::openapi_get_routes;

#[macro_use]
extern crate rocket;

use dotenvy::dotenv;
use mutation::*;
use query::*;
use rocket::{Build, Rocket};

use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

#[catch(404)]
fn general_not_found() -> &'static str {
    "Api endpoint not found"
}

pub fn routes() -> Vec<rocket::Route> {
    openapi_get_routes![
        settle_teams,
        settle_players,
        revert_tournament_settlement,
        check_team_placements,
        remove_player,
        remove_team,
        remove_tournament,
        bulk_remove_players,
        recompute_ranks,
        purge_test_players_and_tournaments,
        reconcile_player_points,
        get_points_history,
        get_team_potential,
        get_tournament_status,
        get_potential_points,
    ]
}

/// Builds the admin API around an already connected database.
pub fn build(db: sea_orm::DatabaseConnection) -> Rocket<Build> {
    rocket::build()
        .manage(db)
        .mount("/api", routes())
        .mount(
            "/api/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .register("/api", catchers![general_not_found])
}

pub async fn launch() -> Rocket<Build> {
    dotenv().ok();

    let db =
        sea_orm::Database::connect(std::env::var("DATABASE_URL").expect("DATABASE_URL not set"))
            .await
            .expect("Could not connect to DATABASE_URL");

    build(db)
}
