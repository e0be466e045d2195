use std::f64::consts::TAU;

use rand::Rng;

use crate::arena::{Arena, Position};

/// Largest jump, in cells, between the avoided point and a new target.
pub const MAX_DISTANCE: u32 = 15;

/// Sampling attempts before falling back to a deterministic cell.
pub const MAX_ATTEMPTS: usize = 1000;

/// Picks a new target position near `avoid`.
///
/// Samples a distance in `1..=MAX_DISTANCE` and an angle in `[0, 2π)`, offsets
/// `avoid` by the rounded polar coordinates (row from the sine, column from the
/// cosine) and clamps the result into the arena interior. Candidates landing on
/// `avoid` are resampled. The returned cell is always inside the interior and
/// never equal to `avoid`.
pub fn place_target<R: Rng>(arena: &Arena, avoid: Position, rng: &mut R) -> Position {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = sample_candidate(arena, avoid, rng);
        if candidate != avoid {
            return candidate;
        }
    }

    tracing::warn!(
        ?avoid,
        attempts = MAX_ATTEMPTS,
        "target sampling exhausted, using nearest free cell"
    );
    fallback_cell(arena, avoid)
}

fn sample_candidate<R: Rng>(arena: &Arena, avoid: Position, rng: &mut R) -> Position {
    let distance = f64::from(rng.gen_range(1..=MAX_DISTANCE));
    let angle = rng.gen_range(0.0..TAU);

    let d_row = (distance * angle.sin()).round() as i32;
    let d_col = (distance * angle.cos()).round() as i32;

    arena.clamp(i32::from(avoid.row) + d_row, i32::from(avoid.col) + d_col)
}

fn fallback_cell(arena: &Arena, avoid: Position) -> Position {
    // Arena guarantees two interior cells, so a free one always exists.
    arena
        .interior()
        .find(|cell| *cell != avoid)
        .unwrap_or(avoid)
}
