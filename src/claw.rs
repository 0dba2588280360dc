/// Claw control and the grab cycle.
///
/// Commands (`move_claw`, `toggle_mist`, `start_grab`, `call_genie`) validate
/// their guards and return the next state; rejected commands return the input
/// unchanged.  `advance` runs one tick of the claw phase machine and the
/// refill ritual and is called from the session tick driver.

use rand::Rng;

use crate::entities::{
    AudioEvent, ClawPhase, GameState, GameStatus, Rarity, Refill, RefillStage, Squeala,
    CLAW_MAX_Y, CLAW_WIDTH, FIELD_WIDTH, MAX_MIST_CHARGES, SQUEALA_WIDTH,
};
use crate::spawn;

/// Distance one movement command travels, in field units.
pub const MOVE_STEP: f32 = 5.0;
/// Half-width of the capture window around the claw center.
pub const GRAB_BAND: f32 = 7.5;
/// Half-width of the mist targeting window around the claw center.
pub const MIST_BAND: f32 = 5.0;
/// Creatures must sit below this depth to be reachable by the pincers.
pub const GRAB_DEPTH: f32 = 70.0;
/// Chance an unmisted grab holds on to its catch.
pub const GRAB_SUCCESS_CHANCE: f64 = 0.6;
/// Successful grabs in one round needed for victory.
pub const GRABS_TO_WIN: u32 = 10;

pub const MIST_TICKS: u32 = 30;
pub const DROP_TICKS: u32 = 45;
pub const RISE_TICKS: u32 = 45;

pub const REFILL_SUMMON_TICKS: u32 = 60;
pub const REFILL_FILL_TICKS: u32 = 60;
pub const REFILL_TOPPED_TICKS: u32 = 15;
pub const REFILL_DEPART_TICKS: u32 = 60;

/// Genie flyby duration after a non-winning catch.
pub const CELEBRATE_TICKS: u32 = 60;
/// Damage flash duration on the claw.
pub const FLASH_TICKS: u32 = 9;

/// True when the claw can accept a grab, mist, or genie command.
pub fn can_act(state: &GameState) -> bool {
    state.status == GameStatus::Playing
        && state.claw.phase == ClawPhase::Ready
        && state.claw.refill.is_none()
        && state.claw.health > 0
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Moves the claw by one step, clamped to the field.  Allowed whenever the
/// claw is ready and the round is live, even while the genie refills or the
/// claw sits at zero health.
pub fn move_claw(state: &GameState, dx: f32, dy: f32) -> GameState {
    if state.status != GameStatus::Playing || state.claw.phase != ClawPhase::Ready {
        return state.clone();
    }
    let mut next = state.clone();
    next.audio_events.push(AudioEvent::Move);
    next.claw.x = (next.claw.x + dx).clamp(0.0, FIELD_WIDTH - CLAW_WIDTH);
    next.claw.y = (next.claw.y + dy).clamp(0.0, CLAW_MAX_Y);
    next
}

/// Arms or disarms mist for the next grab.  Pure toggle; the charge is only
/// spent when a grab actually locks a target.
pub fn toggle_mist(state: &GameState) -> GameState {
    if !can_act(state) || state.claw.mist_charges == 0 {
        return state.clone();
    }
    let mut next = state.clone();
    next.claw.mist_armed = !next.claw.mist_armed;
    next
}

/// Summons the genie to restore mist charges.  Only answers when the bottle
/// is completely empty.
pub fn call_genie(state: &GameState) -> GameState {
    if !can_act(state) || state.claw.mist_charges > 0 {
        return state.clone();
    }
    let mut next = state.clone();
    next.audio_events.push(AudioEvent::CallGenie);
    next.claw.refill = Some(Refill {
        stage: RefillStage::Summoning,
        ticks_left: REFILL_SUMMON_TICKS,
    });
    next
}

/// Begins a grab cycle.  With mist armed and a target in the mist window the
/// catch is locked in as guaranteed and one charge is spent; with mist armed
/// and no target the bottle still flies but nothing is spent and the drop
/// falls back to the normal success roll.
pub fn start_grab(state: &GameState) -> GameState {
    if !can_act(state) {
        return state.clone();
    }
    let mut next = state.clone();
    if next.claw.mist_armed && next.claw.mist_charges > 0 {
        next.claw.locked_target = mist_candidate(&next).map(|s| s.id);
        if next.claw.locked_target.is_some() {
            next.claw.mist_charges -= 1;
            next.claw.mist_armed = false;
        }
        next.claw.phase = ClawPhase::Misting {
            ticks_left: MIST_TICKS,
        };
        return next;
    }
    begin_drop(&mut next);
    next
}

// ── Target selection ──────────────────────────────────────────────────────────

/// Bottom-most creature whose center lies within the mist window.  Depth does
/// not matter to the mist; it matters to the pincers.
pub fn mist_candidate(state: &GameState) -> Option<&Squeala> {
    let center = state.claw.x + CLAW_WIDTH / 2.0;
    bottom_most(state.squealas.iter().filter(|s| {
        ((s.x + SQUEALA_WIDTH / 2.0) - center).abs() < MIST_BAND
    }))
}

/// Bottom-most creature within the capture window and deep enough to reach.
pub fn grab_candidate(state: &GameState) -> Option<&Squeala> {
    let center = state.claw.x + CLAW_WIDTH / 2.0;
    bottom_most(state.squealas.iter().filter(|s| {
        ((s.x + SQUEALA_WIDTH / 2.0) - center).abs() < GRAB_BAND && s.y > GRAB_DEPTH
    }))
}

/// Greatest y wins; on a tie the later creature does.
fn bottom_most<'a>(candidates: impl Iterator<Item = &'a Squeala>) -> Option<&'a Squeala> {
    let mut best: Option<&Squeala> = None;
    for squeala in candidates {
        best = match best {
            Some(current) if current.y > squeala.y => Some(current),
            _ => Some(squeala),
        };
    }
    best
}

// ── Phase machine ─────────────────────────────────────────────────────────────

/// Advances the claw by one tick: phase countdowns, descent/ascent
/// interpolation, drop resolution, and the refill ritual.
pub fn advance(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    match next.claw.phase.clone() {
        ClawPhase::Ready => advance_refill(&mut next),
        ClawPhase::Misting { ticks_left } => {
            let ticks_left = ticks_left - 1;
            if ticks_left == 0 {
                begin_drop(&mut next);
            } else {
                next.claw.phase = ClawPhase::Misting { ticks_left };
            }
        }
        ClawPhase::Dropping { ticks_left, from_y } => {
            let ticks_left = ticks_left - 1;
            let progress = 1.0 - ticks_left as f32 / DROP_TICKS as f32;
            next.claw.y = from_y + (CLAW_MAX_Y - from_y) * progress;
            if ticks_left == 0 {
                next.claw.y = CLAW_MAX_Y;
                resolve_drop(&mut next, rng);
                next.claw.phase = ClawPhase::Rising {
                    ticks_left: RISE_TICKS,
                };
            } else {
                next.claw.phase = ClawPhase::Dropping { ticks_left, from_y };
            }
        }
        ClawPhase::Rising { ticks_left } => {
            let ticks_left = ticks_left - 1;
            next.claw.y = CLAW_MAX_Y * (ticks_left as f32 / RISE_TICKS as f32);
            if ticks_left == 0 {
                next.claw.y = 0.0;
                finish_rise(&mut next, rng);
            } else {
                next.claw.phase = ClawPhase::Rising { ticks_left };
            }
        }
    }
    next
}

fn begin_drop(state: &mut GameState) {
    state.audio_events.push(AudioEvent::Grab);
    state.claw.phase = ClawPhase::Dropping {
        ticks_left: DROP_TICKS,
        from_y: state.claw.y,
    };
}

/// Runs when the claw bottoms out: pincers close and the catch is decided.
/// Scoring waits for the rise; removal, damage, and cries happen here.
fn resolve_drop(state: &mut GameState, rng: &mut impl Rng) {
    state.claw.pincers_open = false;

    // A locked target is guaranteed, but it must still exist; a pet may have
    // eaten it during the mist flight, and the claw cannot catch a memory.
    let had_lock = state.claw.locked_target.is_some();
    let target = match state.claw.locked_target.take() {
        Some(id) => state.squealas.iter().find(|s| s.id == id).cloned(),
        None => grab_candidate(state).cloned(),
    };

    let Some(squeala) = target else {
        state.audio_events.push(AudioEvent::FailGrab);
        return;
    };

    let success = had_lock || rng.gen_bool(GRAB_SUCCESS_CHANCE);
    state.squealas.retain(|s| s.id != squeala.id);
    state.audio_events.push(AudioEvent::SquealaCry);
    if success {
        state.claw.held = Some(squeala);
    } else {
        state.claw.health = state.claw.health.saturating_sub(squeala.rarity.damage());
        state.flash_ticks = FLASH_TICKS;
        state.audio_events.push(AudioEvent::ClawDamage);
        state.claw.biting = Some(squeala);
    }
}

/// Runs when the claw is back at the top: pincers open, a held catch scores,
/// victory is checked, and a thinned pool is replenished.
fn finish_rise(state: &mut GameState, rng: &mut impl Rng) {
    state.claw.pincers_open = true;

    if let Some(squeala) = state.claw.held.take() {
        state.score += squeala.rarity.points();
        state.collected.insert(squeala.rarity);
        state.grabs_this_round += 1;
        let jackpot = matches!(
            squeala.rarity,
            Rarity::Mythical | Rarity::Divine | Rarity::Prismatic
        );
        state.audio_events.push(AudioEvent::Win);
        if state.grabs_this_round >= GRABS_TO_WIN || jackpot {
            state.status = GameStatus::Won;
            state.squealas.clear();
        } else {
            state.audio_events.push(AudioEvent::GenieSound);
            state.celebrate_ticks = CELEBRATE_TICKS;
        }
    }

    state.claw.biting = None;
    state.claw.phase = ClawPhase::Ready;

    if state.status == GameStatus::Playing && state.squealas.len() < spawn::MIN_POPULATION {
        state.audio_events.push(AudioEvent::Refill);
        *state = spawn::repopulate(state, rng);
    }
}

/// Advances the refill ritual, if one is running.  Charges land when the
/// filling stage completes; the genie lingers briefly and then departs.
fn advance_refill(state: &mut GameState) {
    let Some(mut refill) = state.claw.refill.clone() else {
        return;
    };
    refill.ticks_left -= 1;
    if refill.ticks_left > 0 {
        state.claw.refill = Some(refill);
        return;
    }
    state.claw.refill = match refill.stage {
        RefillStage::Summoning => {
            state.audio_events.push(AudioEvent::GenieSound);
            Some(Refill {
                stage: RefillStage::Filling,
                ticks_left: REFILL_FILL_TICKS,
            })
        }
        RefillStage::Filling => {
            state.claw.mist_charges = MAX_MIST_CHARGES;
            state.audio_events.push(AudioEvent::RefillComplete);
            Some(Refill {
                stage: RefillStage::Topped,
                ticks_left: REFILL_TOPPED_TICKS,
            })
        }
        RefillStage::Topped => Some(Refill {
            stage: RefillStage::Departing,
            ticks_left: REFILL_DEPART_TICKS,
        }),
        RefillStage::Departing => None,
    };
}
