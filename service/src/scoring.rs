/// Best placement that still pays out.
pub const LAST_PAYING_PLACEMENT: i32 = 4;

/// Maximum points a player of the given rank can earn in a tournament cycle.
///
/// Ranks 1 to 10 earn 30 to 48 in steps of two, ranks 11 to 30 earn 51 to 70 in
/// steps of one, and everything below climbs by 0.8 per rank up to a cap of 100.
pub fn compute_potential_points(rank: i32) -> i32 {
    if rank <= 10 {
        30 + (rank - 1) * 2
    } else if rank <= 30 {
        50 + (rank - 10)
    } else {
        let points = (70.0 + f64::from(rank - 30) * 0.8).round() as i32;
        points.min(100)
    }
}

/// Share of a team's potential points paid out for a placement.
pub fn payout_fraction(placement: i32) -> Option<f64> {
    match placement {
        1 => Some(1.0),
        2 => Some(0.75),
        3 => Some(0.5),
        4 => Some(0.25),
        _ => None,
    }
}

/// Points earned at `placement` by something worth `potential_points`. Zero when the placement does not pay.
pub fn placement_points(potential_points: i32, placement: i32) -> i32 {
    payout_fraction(placement)
        .map(|fraction| (f64::from(potential_points) * fraction).round() as i32)
        .unwrap_or(0)
}

pub(crate) fn ordinal(n: i32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_ten_climbs_by_two_from_thirty() {
        for rank in 1..=10 {
            assert_eq!(compute_potential_points(rank), 30 + (rank - 1) * 2);
        }
        assert_eq!(compute_potential_points(1), 30);
        assert_eq!(compute_potential_points(10), 48);
    }

    #[test]
    fn ranks_eleven_to_thirty_climb_by_one() {
        assert_eq!(compute_potential_points(11), 51);
        for rank in 12..=30 {
            assert_eq!(
                compute_potential_points(rank) - compute_potential_points(rank - 1),
                1
            );
        }
        assert_eq!(compute_potential_points(30), 70);
    }

    #[test]
    fn deep_ranks_are_capped_at_one_hundred() {
        assert_eq!(compute_potential_points(31), 71);
        assert_eq!(compute_potential_points(35), 74);
        assert_eq!(compute_potential_points(67), 100);
        assert_eq!(compute_potential_points(100), 100);
        for rank in 31..500 {
            let points = compute_potential_points(rank);
            assert!(points <= 100);
            assert_eq!(
                points,
                100.min((70.0 + f64::from(rank - 30) * 0.8).round() as i32)
            );
        }
    }

    #[test]
    fn payout_tiers() {
        assert_eq!(placement_points(200, 1), 200);
        assert_eq!(placement_points(200, 2), 150);
        assert_eq!(placement_points(200, 3), 100);
        assert_eq!(placement_points(200, 4), 50);
        assert_eq!(placement_points(200, 0), 0);
        assert_eq!(placement_points(200, 5), 0);
        // halves round up
        assert_eq!(placement_points(50, 2), 38);
        assert_eq!(placement_points(30, 4), 8);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }
}
