/// Squeala population management.
///
/// Spawning is the only place rarity is rolled.  Each creature consumes
/// three samples from the injected RNG, in order: rarity roll, x, y.

use rand::Rng;

use crate::entities::{GameState, Rarity, Squeala, FIELD_WIDTH, POOL_BOTTOM, POOL_TOP, SQUEALA_WIDTH};

/// Creatures added by one spawn wave.
pub const SPAWN_COUNT: usize = 15;
/// Newest survivors kept when a wave merges into an existing population.
pub const KEEP_SURVIVORS: usize = 5;
/// Population threshold that triggers a replenish after a grab cycle.
pub const MIN_POPULATION: usize = 10;

/// Maps a percentage roll in [0, 100) to a rarity tier.
pub fn rarity_for_roll(roll: f32) -> Rarity {
    if roll < 10.0 {
        Rarity::Common
    } else if roll < 25.0 {
        Rarity::Uncommon
    } else if roll < 45.0 {
        Rarity::Rare
    } else if roll < 65.0 {
        Rarity::Epic
    } else if roll < 80.0 {
        Rarity::Legendary
    } else if roll < 90.0 {
        Rarity::Mythical
    } else if roll < 96.0 {
        Rarity::Divine
    } else {
        Rarity::Prismatic
    }
}

pub fn spawn_one(id: u64, rng: &mut impl Rng) -> Squeala {
    let rarity = rarity_for_roll(rng.gen_range(0.0..100.0));
    let x = rng.gen_range(0.0..FIELD_WIDTH - SQUEALA_WIDTH);
    let y = rng.gen_range(POOL_TOP..POOL_BOTTOM);
    Squeala { id, rarity, x, y }
}

/// Spawns a fresh wave of SPAWN_COUNT creatures.  At most KEEP_SURVIVORS of
/// the newest existing creatures survive the merge; the wave lands after them,
/// so ids stay unique and monotonically increasing across the whole round.
pub fn repopulate(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    let stale = next.squealas.len().saturating_sub(KEEP_SURVIVORS);
    next.squealas.drain(..stale);
    for _ in 0..SPAWN_COUNT {
        let squeala = spawn_one(next.next_squeala_id, rng);
        next.next_squeala_id += 1;
        next.squealas.push(squeala);
    }
    next
}
