pub mod forms;
mod query;

pub(crate) use query::active_ledger_entry;

use entity::sea_orm_active_enums;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::{self, JsonSchema};

/// One row of the team placement form. `placement = 0` means the team did not place.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct TeamPlacement {
    pub team_id: i32,
    pub placement: i32,
    pub points_earned: i32,
    pub winnings: Option<f64>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct PlayerPlacement {
    pub player_id: i32,
    pub team_id: Option<i32>,
    pub placement: i32,
    pub points_earned: i32,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct SettlementReport {
    pub success: bool,
    pub message: String,
    /// Best-effort steps that failed but did not stop the settlement
    pub warnings: Vec<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct PlacementCheck {
    pub valid: bool,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct PointsHistoryEntry {
    pub tournament_id: i32,
    pub tournament_name: Option<String>,
    pub team_id: Option<i32>,
    pub placement: i32,
    pub points_earned: i32,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct TeamPotential {
    pub team_id: i32,
    pub potential_points: i32,
    /// Points the team earns at each placement, 1st to 4th
    pub points_by_placement: Vec<i32>,
}
