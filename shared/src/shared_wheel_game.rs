use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Slice;
use crate::content::{ImageReference, TravelTip};

// Constants shared by the engine and the frontend animation
pub const SPIN_DURATION_MS: u32 = 4000; // Duration of the spin animation
pub const MIN_SPINS: u32 = 5; // Minimum number of full rotations (inclusive)
pub const MAX_SPINS: u32 = 9; // Maximum number of full rotations (inclusive)
pub const POINTER_ANGLE: f64 = 270.0; // Pointer position in the unrotated wheel frame

/// Session-wide state of the wheel. Only `trigger_spin` and `on_spin_settled`
/// mutate it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SpinState {
    pub cumulative_rotation: f64,
    pub is_spinning: bool,
    pub current_winner: Option<Slice>,
}

/// What the view layer needs to play back a spin that is already decided.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinOutcome {
    pub rotation: f64,
    pub spin_delta: f64,
    pub winner_index: usize,
    pub winner: Slice,
}

/// Win counts keyed by slice id.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct WinTally(HashMap<String, u32>);

impl WinTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, slice_id: &str) -> u32 {
        let count = self.0.entry(slice_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn wins(&self, slice_id: &str) -> u32 {
        self.0.get(slice_id).copied().unwrap_or(0)
    }

}

/// Index of the slice under the pointer once the wheel has turned by
/// `rotation` degrees. Depends only on `rotation mod 360` and the slice count.
pub fn winning_index(rotation: f64, slice_count: usize) -> usize {
    assert!(slice_count > 0, "wheel needs at least one slice");

    let slice_angle = 360.0 / slice_count as f64;
    let normalized = rotation % 360.0;

    let mut effective = (POINTER_ANGLE - normalized) % 360.0;
    if effective < 0.0 {
        effective += 360.0;
    }

    // 360 - tiny can round up to 360 exactly, which would index past the end
    ((effective / slice_angle).floor() as usize).min(slice_count - 1)
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a new rotation target and decides the winner right away.
    /// Returns `None` without touching anything while a spin is in flight.
    pub fn trigger_spin<R: Rng>(
        &mut self,
        catalog: &[Slice],
        rng: &mut R,
    ) -> Option<SpinOutcome> {
        if self.is_spinning {
            log::debug!("Spin requested while the wheel is still turning, ignoring.");
            return None;
        }

        let offset: f64 = rng.gen_range(0.0..360.0);
        let rounds = rng.gen_range(MIN_SPINS..=MAX_SPINS);
        let spin_delta = f64::from(rounds) * 360.0 + offset;

        self.spin_by(catalog, spin_delta)
    }

    /// Same as `trigger_spin` with an explicit rotation delta instead of a
    /// random draw. `spin_delta` must be positive.
    pub fn spin_by(&mut self, catalog: &[Slice], spin_delta: f64) -> Option<SpinOutcome> {
        if self.is_spinning || catalog.is_empty() || spin_delta <= 0.0 {
            return None;
        }

        let rotation = self.cumulative_rotation + spin_delta;
        let winner_index = winning_index(rotation, catalog.len());
        let winner = catalog[winner_index].clone();

        self.is_spinning = true;
        self.cumulative_rotation = rotation;
        self.current_winner = Some(winner.clone());

        Some(SpinOutcome {
            rotation,
            spin_delta,
            winner_index,
            winner,
        })
    }

    /// Releases the spin gate and counts the win. Returns the settled winner,
    /// or `None` when no spin was pending.
    pub fn on_spin_settled(&mut self, tally: &mut WinTally) -> Option<Slice> {
        if !self.is_spinning {
            return None;
        }
        self.is_spinning = false;

        let winner = self.current_winner.clone()?;
        let wins = tally.record(&winner.id);
        log::info!("Spin settled on {} ({} wins)", winner.name, wins);
        Some(winner)
    }
}

// === API Types ===

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WheelSpinResponse {
    pub success: bool,
    pub rotation: f64,
    pub spin_delta: Option<f64>,
    pub winner_index: Option<usize>,
    pub winner: Option<Slice>,
    pub duration_ms: u32,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WheelSettleResponse {
    pub winner: Slice,
    pub wins: u32,
    pub episode: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WheelStateResponse {
    pub rotation: f64,
    pub is_spinning: bool,
    pub winner: Option<Slice>,
    pub tally: WinTally,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentResponse {
    pub status: ContentStatus,
    pub episode: Option<Uuid>,
    pub winner: Option<Slice>,
    pub tip: Option<TravelTip>,
    pub image: Option<ImageReference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog_of(n: usize) -> Vec<Slice> {
        CATALOG.iter().cycle().take(n).cloned().enumerate()
            .map(|(i, mut slice)| {
                slice.id = format!("s{}", i);
                slice
            })
            .collect()
    }

    #[test]
    fn test_spin_delta_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=12 {
            let catalog = catalog_of(n);
            let mut state = SpinState::new();
            let mut tally = WinTally::new();
            for _ in 0..200 {
                let before = state.cumulative_rotation;
                let outcome = state.trigger_spin(&catalog, &mut rng).unwrap();
                assert!(outcome.rotation > before);
                let delta = outcome.rotation - before;
                assert!((1800.0..3600.0).contains(&delta), "delta {} out of range", delta);
                assert!(outcome.winner_index < n);
                state.on_spin_settled(&mut tally);
            }
        }
    }

    #[test]
    fn test_pointer_reference_cases() {
        assert_eq!(winning_index(0.0, 10), 7);
        assert_eq!(winning_index(270.0, 10), 0);
        assert_eq!(winning_index(350.0, 10), 7);
        assert_eq!(winning_index(720.0 + 350.0, 10), 7);
        assert_eq!(winning_index(123.4, 1), 0);
    }

    #[test]
    fn test_full_turns_keep_winner() {
        for n in 1..=12 {
            let start = winning_index(0.0, n);
            for j in 1..20 {
                assert_eq!(winning_index(360.0 * j as f64, n), start);
            }
        }

        let catalog = CATALOG.clone();
        let mut state = SpinState::new();
        let mut tally = WinTally::new();
        let first = state.spin_by(&catalog, 360.0 * 5.0).unwrap();
        state.on_spin_settled(&mut tally);
        let second = state.spin_by(&catalog, 360.0 * 7.0).unwrap();
        assert_eq!(first.winner_index, winning_index(0.0, catalog.len()));
        assert_eq!(first.winner, second.winner);
    }

    #[test]
    fn test_winner_matches_index() {
        let catalog = CATALOG.clone();
        let mut state = SpinState::new();
        let outcome = state.spin_by(&catalog, 1800.0 + 270.0).unwrap();
        assert_eq!(outcome.winner_index, 0);
        assert_eq!(outcome.winner.id, "1");
        assert_eq!(state.current_winner.as_ref(), Some(&catalog[0]));
        assert!(state.is_spinning);
    }

    #[test]
    fn test_spin_while_spinning_is_noop() {
        let catalog = CATALOG.clone();
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = SpinState::new();
        state.trigger_spin(&catalog, &mut rng).unwrap();
        let snapshot = state.clone();

        assert!(state.trigger_spin(&catalog, &mut rng).is_none());
        assert_eq!(state.cumulative_rotation, snapshot.cumulative_rotation);
        assert_eq!(state.current_winner, snapshot.current_winner);
        assert!(state.is_spinning);
    }

    #[test]
    fn test_settle_counts_wins() {
        let catalog = CATALOG.clone();
        let mut state = SpinState::new();
        let mut tally = WinTally::new();

        // 5 turns + 270 lands on index 0, a full turn more keeps it there
        state.spin_by(&catalog, 1800.0 + 270.0).unwrap();
        assert_eq!(state.on_spin_settled(&mut tally).unwrap().id, "1");
        state.spin_by(&catalog, 1800.0).unwrap();
        state.on_spin_settled(&mut tally);
        assert_eq!(tally.wins("1"), 2);
        assert_eq!(tally.wins("2"), 0);

        // normalized 270 -> 216 puts effective at 54, inside slice 1
        state.spin_by(&catalog, 1800.0 + 306.0).unwrap();
        let winner = state.on_spin_settled(&mut tally).unwrap();
        assert_eq!(winner.id, "2");
        assert_eq!(tally.wins("1"), 2);
        assert_eq!(tally.wins("2"), 1);
    }

    #[test]
    fn test_distinct_winners_tally_separately() {
        let catalog = CATALOG.clone();
        let mut state = SpinState::new();
        let mut tally = WinTally::new();

        state.spin_by(&catalog, 1800.0 + 270.0).unwrap();
        state.on_spin_settled(&mut tally);
        state.spin_by(&catalog, 1800.0 + 306.0).unwrap();
        state.on_spin_settled(&mut tally);

        assert_eq!(tally.wins("1"), 1);
        assert_eq!(tally.wins("2"), 1);
        assert_eq!(tally.wins("3"), 0);
    }

    #[test]
    fn test_settle_without_spin_is_noop() {
        let mut state = SpinState::new();
        let mut tally = WinTally::new();
        assert!(state.on_spin_settled(&mut tally).is_none());
        assert_eq!(tally, WinTally::new());
    }

    #[test]
    fn test_content_status_wire_format() {
        let json = serde_json::to_string(&ContentStatus::Loading).unwrap();
        assert_eq!(json, "\"loading\"");
    }
}
