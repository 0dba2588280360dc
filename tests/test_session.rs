use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use squeala_claw::claw;
use squeala_claw::entities::*;
use squeala_claw::pet;
use squeala_claw::session::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Rng that yields the same raw word forever, pinning every roll.
struct FixedRng(u64);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }
    fn next_u64(&mut self) -> u64 {
        self.0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0 as u8);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Rng that plays back a fixed script of raw words, then zeros.
struct ScriptRng(VecDeque<u64>);

impl ScriptRng {
    fn new(words: &[u64]) -> ScriptRng {
        ScriptRng(words.iter().copied().collect())
    }
}

impl RngCore for ScriptRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }
    fn next_u64(&mut self) -> u64 {
        self.0.pop_front().unwrap_or(0)
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

const MID_F32: u64 = 0x8000_0000;
const PASS: u64 = 0;
const FAIL: u64 = u64::MAX;

fn make_state() -> GameState {
    let mut state = new_game();
    state.status = GameStatus::Playing;
    state.claw.x = 45.0;
    state
}

fn put_squeala(state: &mut GameState, id: u64, rarity: Rarity, x: f32, y: f32) {
    state.squealas.push(Squeala { id, rarity, x, y });
    state.next_squeala_id = state.next_squeala_id.max(id + 1);
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_idle() {
    let state = new_game();

    assert_eq!(state.status, GameStatus::Idle);
    assert_eq!(state.view, View::Game);
    assert_eq!(state.score, 0);
    assert_eq!(state.time_left, ROUND_SECONDS);
    assert_eq!(state.claw.health, MAX_CLAW_HEALTH);
    assert_eq!(state.claw.mist_charges, MAX_MIST_CHARGES);
    assert!(state.claw.pincers_open);
    assert!(state.squealas.is_empty());
    assert!(state.owned_pets.is_empty());
    assert!(state.collected.is_empty());
    assert!(state.audio_events.is_empty());
}

#[test]
fn start_round_stocks_the_pool() {
    let state = new_game();
    let mut rng = seeded_rng();

    let state2 = start_round(&state, &mut rng);

    assert_eq!(state2.status, GameStatus::Playing);
    assert_eq!(state2.squealas.len(), 15);
    assert_eq!(state2.next_squeala_id, 15);
    assert!(state2.audio_events.contains(&AudioEvent::LevelStart));
}

#[test]
fn start_round_resets_but_keeps_progress() {
    let mut state = new_game();
    state.status = GameStatus::Ended;
    state.score = 500;
    state.time_left = 3;
    state.grabs_this_round = 7;
    state.tick = 4_000;
    state.celebrate_ticks = 30;
    state.flash_ticks = 5;
    state.claw.x = 12.0;
    state.claw.health = 40;
    state.claw.mist_charges = 2;
    state.claw.mist_armed = true;
    state.owned_pets.insert(PetSpecies::Lila);
    state.collected.insert(Rarity::Epic);
    state.pet = Some(ActivePet {
        species: PetSpecies::Lila,
        health: 20,
        x: 30.0,
        y: 70.0,
    });
    let mut rng = seeded_rng();

    let state2 = start_round(&state, &mut rng);

    // Round-scoped progress resets
    assert_eq!(state2.score, 0);
    assert_eq!(state2.time_left, ROUND_SECONDS);
    assert_eq!(state2.grabs_this_round, 0);
    assert_eq!(state2.tick, 0);
    assert_eq!(state2.celebrate_ticks, 0);
    assert_eq!(state2.flash_ticks, 0);
    assert_eq!(state2.claw.health, MAX_CLAW_HEALTH);
    assert!(state2.pet.is_none());
    // Purchases, the dex, charges, and claw position carry over
    assert!(state2.owned_pets.contains(&PetSpecies::Lila));
    assert!(state2.collected.contains(&Rarity::Epic));
    assert_eq!(state2.claw.mist_charges, 2);
    assert!(state2.claw.mist_armed);
    assert_eq!(state2.claw.x, 12.0);
}

#[test]
fn start_round_ignored_mid_round() {
    let state = make_state();
    let mut rng = seeded_rng();

    let state2 = start_round(&state, &mut rng);

    assert!(state2.squealas.is_empty());
    assert!(!state2.audio_events.contains(&AudioEvent::LevelStart));
}

#[test]
fn start_round_clears_frozen_machinery() {
    let mut state = make_state();
    state.status = GameStatus::Ended;
    state.claw.y = 30.0;
    state.claw.phase = ClawPhase::Dropping {
        ticks_left: 15,
        from_y: 0.0,
    };
    state.claw.locked_target = Some(9);
    state.claw.refill = Some(Refill {
        stage: RefillStage::Filling,
        ticks_left: 12,
    });
    let mut rng = seeded_rng();

    let state2 = start_round(&state, &mut rng);

    assert_eq!(state2.claw.phase, ClawPhase::Ready);
    assert_eq!(state2.claw.y, 0.0);
    assert!(state2.claw.pincers_open);
    assert!(state2.claw.locked_target.is_none());
    assert!(state2.claw.refill.is_none());
    assert_eq!(state2.squealas.len(), 15);
}

#[test]
fn set_view_clicks() {
    let state = new_game();

    let state2 = set_view(&state, View::Shop);

    assert_eq!(state2.view, View::Shop);
    assert!(state2.audio_events.contains(&AudioEvent::UiClick));
}

// ── Tick driver ───────────────────────────────────────────────────────────────

#[test]
fn tick_is_a_noop_while_idle() {
    let state = new_game();
    let mut rng = seeded_rng();

    let state2 = tick(&state, &mut rng);

    assert_eq!(state2.tick, 0);
    assert!(state2.audio_events.is_empty());
}

#[test]
fn countdown_drops_one_second_per_tick_rate() {
    let mut state = make_state();
    let mut rng = seeded_rng();

    for _ in 0..TICK_RATE - 1 {
        state = tick(&state, &mut rng);
    }
    assert_eq!(state.time_left, ROUND_SECONDS);

    state = tick(&state, &mut rng); // tick 30
    assert_eq!(state.time_left, ROUND_SECONDS - 1);
    assert_eq!(state.tick, TICK_RATE as u64);
}

#[test]
fn countdown_ends_the_round_once() {
    let mut state = make_state();
    state.time_left = 1;
    put_squeala(&mut state, 1, Rarity::Common, 10.0, 70.0);
    let mut rng = seeded_rng();

    for _ in 0..TICK_RATE {
        state = tick(&state, &mut rng);
    }

    assert_eq!(state.status, GameStatus::Ended);
    assert_eq!(state.time_left, 0);
    assert!(state.squealas.is_empty()); // pool drains at the bell
    assert!(state.audio_events.contains(&AudioEvent::TimesUp));

    // The world is frozen now
    for _ in 0..60 {
        state = tick(&state, &mut rng);
    }
    assert_eq!(state.tick, TICK_RATE as u64);
    let bells = state
        .audio_events
        .iter()
        .filter(|e| **e == AudioEvent::TimesUp)
        .count();
    assert_eq!(bells, 1);
}

#[test]
fn round_end_freezes_a_grab_in_flight() {
    let mut state = make_state();
    state.time_left = 1;
    let mut rng = seeded_rng();

    state = claw::start_grab(&state);
    for _ in 0..TICK_RATE {
        state = tick(&state, &mut rng);
    }

    // 30 of 45 descent ticks elapsed when the bell rang
    assert_eq!(state.status, GameStatus::Ended);
    assert_eq!(
        state.claw.phase,
        ClawPhase::Dropping {
            ticks_left: 15,
            from_y: 0.0,
        }
    );

    let state2 = tick(&state, &mut rng);
    assert_eq!(state2.claw.phase, state.claw.phase);
}

#[test]
fn pet_hunts_every_two_seconds() {
    let mut state = make_state();
    state.owned_pets.insert(PetSpecies::Lila);
    state = pet::toggle_deploy(&state, PetSpecies::Lila);
    put_squeala(&mut state, 1, Rarity::Epic, 5.0, 62.0); // too far to ever catch
    // Two encounters: each drifts x by its low extreme, y by zero
    let mut rng = ScriptRng::new(&[0, 0, MID_F32, 0, 0, MID_F32]);

    for _ in 0..pet::ENCOUNTER_TICKS - 1 {
        state = tick(&state, &mut rng);
    }
    assert_eq!(state.pet.as_ref().unwrap().x, pet::DEPLOY_X);

    state = tick(&state, &mut rng); // tick 60: first encounter
    assert_eq!(state.pet.as_ref().unwrap().x, pet::DEPLOY_X - pet::DRIFT_X);

    for _ in 0..pet::ENCOUNTER_TICKS - 1 {
        state = tick(&state, &mut rng);
    }
    assert_eq!(state.pet.as_ref().unwrap().x, pet::DEPLOY_X - pet::DRIFT_X);

    state = tick(&state, &mut rng); // tick 120: second encounter
    assert_eq!(state.pet.as_ref().unwrap().x, pet::DEPLOY_X - 2.0 * pet::DRIFT_X);
}

// ── Full rounds ───────────────────────────────────────────────────────────────

#[test]
fn prismatic_jackpot_ends_the_round() {
    let mut state = make_state();
    put_squeala(&mut state, 1, Rarity::Prismatic, 45.0, 80.0);
    let mut rng = FixedRng(FAIL); // a locked catch never consults the dice

    state = claw::toggle_mist(&state);
    state = claw::start_grab(&state);
    assert_eq!(state.claw.locked_target, Some(1));
    assert_eq!(state.claw.mist_charges, MAX_MIST_CHARGES - 1);

    for _ in 0..120 {
        state = tick(&state, &mut rng);
    }

    assert_eq!(state.status, GameStatus::Won);
    assert_eq!(state.score, 1_000_000);
    assert!(state.collected.contains(&Rarity::Prismatic));
    assert!(state.squealas.is_empty());
    assert!(state.audio_events.contains(&AudioEvent::Win));
    // 30 mist + 45 drop + 45 rise; the winning tick skips the countdown
    assert_eq!(state.tick, 120);
    assert_eq!(state.time_left, ROUND_SECONDS - 3);
}

#[test]
fn ten_epics_win_the_round() {
    let mut state = make_state();
    let mut rng = FixedRng(PASS); // every plain roll succeeds

    for cycle in 0..10 {
        let id = state.next_squeala_id;
        put_squeala(&mut state, id, Rarity::Epic, 45.0, 80.0);
        state = claw::start_grab(&state);
        for _ in 0..90 {
            state = tick(&state, &mut rng);
        }
        if cycle < 9 {
            assert_eq!(state.status, GameStatus::Playing);
        }
    }

    assert_eq!(state.status, GameStatus::Won);
    assert_eq!(state.grabs_this_round, 10);
    assert_eq!(state.score, 5_000); // ten Epics
    assert_eq!(state.tick, 900);
    // 29 countdown beats fired; the winning tick skipped its own
    assert_eq!(state.time_left, ROUND_SECONDS - 29);
}

#[test]
fn pet_falls_in_five_epic_retaliations() {
    let mut state = make_state();
    state.owned_pets.insert(PetSpecies::Lila);
    state = pet::toggle_deploy(&state, PetSpecies::Lila);
    put_squeala(&mut state, 1, Rarity::Epic, 50.0, 80.0); // right where the pet floats
    let script: Vec<u64> = (0..5)
        .flat_map(|_| [0, MID_F32, MID_F32, FAIL, PASS])
        .collect();
    let mut rng = ScriptRng::new(&script);

    // 6 encounter beats; the pet dies on the 5th and the 6th finds nobody out
    for _ in 0..360 {
        state = tick(&state, &mut rng);
    }

    // 75 health, 18 per bite: dead on the fifth encounter
    assert!(state.pet.is_none());
    assert!(!state.owned_pets.contains(&PetSpecies::Lila));
    assert!(state.audio_events.contains(&AudioEvent::PetDie));
    let bites = state
        .audio_events
        .iter()
        .filter(|e| **e == AudioEvent::PetDamage)
        .count();
    assert_eq!(bites, 5);
    assert_eq!(state.squealas.len(), 1); // the Epic outlived it
    assert_eq!(state.status, GameStatus::Playing);
}
