use itertools::Itertools;

use crate::dto::{PlacementCheck, PlayerPlacement, TeamPlacement};
use crate::error::GenericError;
use crate::scoring::{ordinal, LAST_PAYING_PLACEMENT};

/// Checks a team placement form before anything is written.
///
/// Placements must lie in `0..=4` (0 = did not place), each team appears once,
/// at least one team is placed, no placement is shared and placements are
/// contiguous from 1st.
pub fn validate_placements(rows: &[TeamPlacement]) -> Result<(), GenericError> {
    if let Some(row) = rows
        .iter()
        .find(|r| r.placement < 0 || r.placement > LAST_PAYING_PLACEMENT)
    {
        return Err(GenericError::Validation(format!(
            "Invalid placement {} for team {}",
            row.placement, row.team_id
        )));
    }

    if let Some(team_id) = rows.iter().map(|r| r.team_id).duplicates().next() {
        return Err(GenericError::Validation(format!(
            "Team {team_id} appears more than once"
        )));
    }

    let counts = rows
        .iter()
        .filter(|r| r.placement > 0)
        .counts_by(|r| r.placement);

    if counts.is_empty() {
        return Err(GenericError::Validation(
            "At least one team must be placed".to_string(),
        ));
    }

    for place in 1..=LAST_PAYING_PLACEMENT {
        if counts.get(&place).copied().unwrap_or(0) > 1 {
            return Err(GenericError::Validation(format!(
                "Duplicate placement: {} place is assigned to more than one team",
                ordinal(place)
            )));
        }
    }

    for place in 2..=LAST_PAYING_PLACEMENT {
        if counts.contains_key(&place) && !counts.contains_key(&(place - 1)) {
            return Err(GenericError::Validation(format!(
                "Missing {} place before {} place",
                ordinal(place - 1),
                ordinal(place)
            )));
        }
    }

    Ok(())
}

/// Live-feedback form of [`validate_placements`].
pub fn check_placements(rows: &[TeamPlacement]) -> PlacementCheck {
    match validate_placements(rows) {
        Ok(()) => PlacementCheck {
            valid: true,
            message: None,
        },
        Err(e) => PlacementCheck {
            valid: false,
            message: Some(e.message().to_string()),
        },
    }
}

pub fn validate_player_placements(rows: &[PlayerPlacement]) -> Result<(), GenericError> {
    if let Some(row) = rows.iter().find(|r| r.placement < 0) {
        return Err(GenericError::Validation(format!(
            "Invalid placement {} for player {}",
            row.placement, row.player_id
        )));
    }
    if let Some(player_id) = rows.iter().map(|r| r.player_id).duplicates().next() {
        return Err(GenericError::Validation(format!(
            "Player {player_id} appears more than once"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(team_id: i32, placement: i32) -> TeamPlacement {
        TeamPlacement {
            team_id,
            placement,
            points_earned: 0,
            winnings: None,
        }
    }

    fn message(rows: &[TeamPlacement]) -> String {
        validate_placements(rows).unwrap_err().message().to_string()
    }

    #[test]
    fn full_podium_passes() {
        let rows = [placed(1, 1), placed(2, 2), placed(3, 3), placed(4, 4)];
        assert_eq!(validate_placements(&rows), Ok(()));
    }

    #[test]
    fn unplaced_teams_are_ignored() {
        let rows = [placed(1, 0), placed(2, 1), placed(3, 0), placed(4, 2)];
        assert!(validate_placements(&rows).is_ok());
    }

    #[test]
    fn second_without_first_is_missing_first() {
        assert_eq!(message(&[placed(1, 2)]), "Missing 1st place before 2nd place");
    }

    #[test]
    fn gap_in_the_middle() {
        let rows = [placed(1, 1), placed(2, 2), placed(3, 4)];
        assert_eq!(message(&rows), "Missing 3rd place before 4th place");
    }

    #[test]
    fn shared_first_is_duplicate() {
        let rows = [placed(1, 1), placed(2, 1)];
        assert_eq!(
            message(&rows),
            "Duplicate placement: 1st place is assigned to more than one team"
        );
    }

    #[test]
    fn duplicates_are_reported_before_gaps() {
        let rows = [placed(1, 3), placed(2, 3)];
        assert!(message(&rows).starts_with("Duplicate placement: 3rd"));
    }

    #[test]
    fn out_of_range_and_repeated_teams() {
        assert_eq!(message(&[placed(7, 5)]), "Invalid placement 5 for team 7");
        assert_eq!(message(&[placed(7, -1)]), "Invalid placement -1 for team 7");
        assert_eq!(
            message(&[placed(7, 1), placed(7, 2)]),
            "Team 7 appears more than once"
        );
    }

    #[test]
    fn nobody_placed() {
        assert_eq!(
            message(&[placed(1, 0), placed(2, 0)]),
            "At least one team must be placed"
        );
        assert!(validate_placements(&[]).is_err());
    }

    #[test]
    fn check_reports_message() {
        let check = check_placements(&[placed(1, 2)]);
        assert!(!check.valid);
        assert_eq!(
            check.message.as_deref(),
            Some("Missing 1st place before 2nd place")
        );
        assert!(check_placements(&[placed(1, 1)]).valid);
    }

    #[test]
    fn player_rows() {
        let row = |player_id, placement| PlayerPlacement {
            player_id,
            team_id: None,
            placement,
            points_earned: 0,
        };
        assert!(validate_player_placements(&[row(1, 1), row(2, 9), row(3, 0)]).is_ok());
        assert!(validate_player_placements(&[row(1, 1), row(1, 2)]).is_err());
        assert!(validate_player_placements(&[row(1, -2)]).is_err());
    }
}
