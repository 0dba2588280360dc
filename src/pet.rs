/// Pet shop and the autonomous pet hunter.
///
/// A deployed pet acts once per encounter interval: it picks a target, drifts,
/// and if close enough tries to catch.  Pet catches score and fill the dex but
/// never count toward the grab-victory tally and never trigger a replenish.
/// RNG sample order per encounter: target index, drift x, drift y, catch roll,
/// then (only after a failed catch) the retaliation roll.

use rand::Rng;

use crate::entities::{
    ActivePet, AudioEvent, GameState, PetSpecies, FIELD_WIDTH, POOL_BOTTOM, POOL_TOP,
    SQUEALA_WIDTH, TICK_RATE,
};

/// Ticks between pet encounters (2 seconds).
pub const ENCOUNTER_TICKS: u64 = TICK_RATE as u64 * 2;
/// A pet must end its drift within this distance of the target to attempt a catch.
pub const CATCH_RANGE: f32 = 15.0;
/// Chance a close pet catches its target.
pub const CATCH_CHANCE: f64 = 0.5;
/// Chance a creature that slipped away bites back.
pub const RETALIATE_CHANCE: f64 = 0.6;
/// Horizontal drift per encounter is drawn from ±DRIFT_X, vertical from ±DRIFT_Y.
pub const DRIFT_X: f32 = 5.0;
pub const DRIFT_Y: f32 = 2.5;

/// Where a freshly deployed pet enters the pool.
pub const DEPLOY_X: f32 = 50.0;
pub const DEPLOY_Y: f32 = 80.0;

// ── Shop ──────────────────────────────────────────────────────────────────────

/// Buys a pet with points.  Already-owned species and unaffordable ones are
/// rejected silently.
pub fn buy(state: &GameState, species: PetSpecies) -> GameState {
    if state.owned_pets.contains(&species) || state.score < species.cost() {
        return state.clone();
    }
    let mut next = state.clone();
    next.audio_events.push(AudioEvent::Buy);
    next.score -= species.cost();
    next.owned_pets.insert(species);
    next
}

/// Deploys an owned pet at full health, or recalls it if that species is
/// already out.  Recalling is free and silent; a recalled pet keeps nothing,
/// the next deploy starts fresh.
pub fn toggle_deploy(state: &GameState, species: PetSpecies) -> GameState {
    let mut next = state.clone();
    if next.pet.as_ref().map(|p| p.species) == Some(species) {
        next.pet = None;
    } else if next.owned_pets.contains(&species) {
        next.audio_events.push(AudioEvent::PetDeploy);
        next.pet = Some(ActivePet {
            species,
            health: species.base_health(),
            x: DEPLOY_X,
            y: DEPLOY_Y,
        });
    }
    next
}

// ── Encounters ────────────────────────────────────────────────────────────────

/// One pet encounter.  The caller owns the cadence; this fires every
/// ENCOUNTER_TICKS while the round is live.  No-op without a pet or prey.
pub fn advance(state: &GameState, rng: &mut impl Rng) -> GameState {
    let Some(mut pet) = state.pet.clone() else {
        return state.clone();
    };
    if state.squealas.is_empty() {
        return state.clone();
    }
    let mut next = state.clone();

    // Target first, then drift; the pet lunges toward where it last saw prey.
    let target = next.squealas[rng.gen_range(0..next.squealas.len())].clone();
    pet.x = (pet.x + rng.gen_range(-DRIFT_X..DRIFT_X)).clamp(0.0, FIELD_WIDTH - SQUEALA_WIDTH);
    pet.y = (pet.y + rng.gen_range(-DRIFT_Y..DRIFT_Y)).clamp(POOL_TOP, POOL_BOTTOM);

    let distance = ((target.x - pet.x).powi(2) + (target.y - pet.y).powi(2)).sqrt();
    if distance < CATCH_RANGE {
        if rng.gen_bool(CATCH_CHANCE) {
            next.score += target.rarity.points();
            next.collected.insert(target.rarity);
            next.squealas.retain(|s| s.id != target.id);
            next.audio_events.push(AudioEvent::PetCatch);
        } else if rng.gen_bool(RETALIATE_CHANCE) {
            pet.health = pet.health.saturating_sub(target.rarity.damage());
            next.audio_events.push(AudioEvent::PetDamage);
            next.audio_events.push(AudioEvent::SquealaCry);
            if pet.health == 0 {
                // Death is permanent: the species leaves the owned set too.
                next.audio_events.push(AudioEvent::PetDie);
                next.owned_pets.remove(&pet.species);
                next.pet = None;
                return next;
            }
        }
    }
    next.pet = Some(pet);
    next
}
