use super::{schemars, JsonSchema};
use rocket::serde::{Deserialize, Serialize};

#[derive(Debug, JsonSchema, Serialize, Deserialize)]
pub struct BulkDeletePlayers {
    pub ids: Vec<i32>,
}

#[derive(Debug, JsonSchema, Serialize, Deserialize, Default, Clone, Copy)]
#[serde(default)]
pub struct PurgeOptions {
    pub players_only: bool,
    pub tournaments_only: bool,
    /// Also remove every remaining team in every tournament. Ignores the prefix.
    pub all_teams: bool,
}

#[derive(Debug, JsonSchema, Serialize, Deserialize)]
pub struct PurgeTestData {
    /// Falls back to `TEST_DATA_PREFIX`, then `test_`
    pub prefix: Option<String>,
    #[serde(default)]
    pub options: PurgeOptions,
}
