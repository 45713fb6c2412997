use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Slice;
use crate::shared_wheel_game::WinTally;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub slice: Slice,
    pub wins: u32,
}

/// Ranks every slice by wins (desc), then rating (desc). Ties keep catalog order.
pub fn rank_slices(catalog: &[Slice], tally: &WinTally) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(&Slice, u32)> = catalog
        .iter()
        .map(|slice| (slice, tally.wins(&slice.id)))
        .collect();

    ranked.sort_by(|(a, a_wins), (b, b_wins)| {
        b_wins
            .cmp(a_wins)
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (slice, wins))| LeaderboardEntry {
            rank: i + 1,
            slice: slice.clone(),
            wins,
        })
        .collect()
}
