/// Session lifecycle and the tick driver.
///
/// `tick` is the only clock in the game: it advances the claw phase machine,
/// the refill ritual, the pet cadence, the round countdown, and the cosmetic
/// timers, one tick at a time.  Nothing advances while the round is not live,
/// so an in-flight grab or refill freezes at round end and is cleared by the
/// next `start_round`.

use std::collections::HashSet;

use rand::Rng;

use crate::claw;
use crate::entities::{
    AudioEvent, Claw, ClawPhase, GameState, GameStatus, View, MAX_CLAW_HEALTH, MAX_MIST_CHARGES,
    TICK_RATE,
};
use crate::pet;
use crate::spawn;

/// Round length in seconds.
pub const ROUND_SECONDS: u32 = 600;

/// A fresh idle session: empty pool, pristine claw, nothing owned.
pub fn new_game() -> GameState {
    GameState {
        squealas: Vec::new(),
        claw: Claw {
            x: 50.0,
            y: 0.0,
            pincers_open: true,
            phase: ClawPhase::Ready,
            health: MAX_CLAW_HEALTH,
            mist_charges: MAX_MIST_CHARGES,
            mist_armed: false,
            locked_target: None,
            held: None,
            biting: None,
            refill: None,
        },
        pet: None,
        owned_pets: HashSet::new(),
        collected: HashSet::new(),
        score: 0,
        time_left: ROUND_SECONDS,
        status: GameStatus::Idle,
        view: View::Game,
        grabs_this_round: 0,
        next_squeala_id: 0,
        tick: 0,
        celebrate_ticks: 0,
        flash_ticks: 0,
        audio_events: Vec::new(),
    }
}

/// Starts (or restarts) a round.  Score, timer, grab tally, claw health, and
/// the deployed pet reset; owned pets, the dex, and leftover mist charges
/// carry over.  The pool is rebuilt from scratch.
pub fn start_round(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    next.audio_events.push(AudioEvent::LevelStart);
    next.score = 0;
    next.time_left = ROUND_SECONDS;
    next.status = GameStatus::Playing;
    next.pet = None;
    next.grabs_this_round = 0;
    next.tick = 0;
    next.celebrate_ticks = 0;
    next.flash_ticks = 0;

    // The claw comes home: any frozen grab or refill from the previous round
    // is abandoned and health is restored.
    next.claw.y = 0.0;
    next.claw.pincers_open = true;
    next.claw.phase = ClawPhase::Ready;
    next.claw.health = MAX_CLAW_HEALTH;
    next.claw.locked_target = None;
    next.claw.held = None;
    next.claw.biting = None;
    next.claw.refill = None;

    next.squealas.clear();
    spawn::repopulate(&next, rng)
}

/// Switches the active screen.
pub fn set_view(state: &GameState, view: View) -> GameState {
    let mut next = state.clone();
    next.audio_events.push(AudioEvent::UiClick);
    next.view = view;
    next
}

/// One tick of the whole simulation.  A no-op unless a round is live.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    next.tick += 1;

    // ── 1. Claw phases and the refill ritual ──
    next = claw::advance(&next, rng);
    if next.status != GameStatus::Playing {
        return next;
    }

    // ── 2. Pet encounter cadence ──
    if next.tick % pet::ENCOUNTER_TICKS == 0 {
        next = pet::advance(&next, rng);
    }

    // ── 3. Cosmetic timers ──
    next.celebrate_ticks = next.celebrate_ticks.saturating_sub(1);
    next.flash_ticks = next.flash_ticks.saturating_sub(1);

    // ── 4. Round countdown ──
    if next.tick % TICK_RATE as u64 == 0 {
        next.time_left = next.time_left.saturating_sub(1);
        if next.time_left == 0 {
            next.status = GameStatus::Ended;
            next.squealas.clear();
            next.audio_events.push(AudioEvent::TimesUp);
        }
    }
    next
}
