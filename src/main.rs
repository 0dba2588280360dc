mod display;
#[cfg(feature = "sound")]
mod sound;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use squeala_claw::claw::{call_genie, move_claw, start_grab, toggle_mist, MOVE_STEP};
use squeala_claw::entities::{GameState, GameStatus, PetSpecies, View};
use squeala_claw::pet::{buy, toggle_deploy};
use squeala_claw::session::{new_game, set_view, start_round, tick};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min frames between claw movements while a direction key is held.
/// 3 frames @ 30 FPS ≈ 10 moves/sec (≈ normal OS key-repeat feel).
const MOVE_COOLDOWN: u32 = 3;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Number keys ───────────────────────────────────────────────────────────────

/// Number keys mean different things per screen: view switching on the
/// machine, pet slots in the store and the collection.
fn handle_slot(state: &GameState, key: char) -> GameState {
    match state.view {
        View::Game => match key {
            '2' => set_view(state, View::Shop),
            '3' => set_view(state, View::Collection),
            '4' => set_view(state, View::Viewer),
            _ => state.clone(),
        },
        View::Shop | View::Collection => {
            let slot = key as usize - '1' as usize;
            let species = PetSpecies::ALL[slot];
            if state.view == View::Shop && !state.owned_pets.contains(&species) {
                buy(state, species)
            } else {
                toggle_deploy(state, species)
            }
        }
        View::Viewer => state.clone(),
    }
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which direction keys are still
/// "fresh" (within `HOLD_WINDOW` frames) and move the claw accordingly, so
/// horizontal and vertical movement combine cleanly.  Everything else (grab,
/// mist, genie, views, audio switches) is a one-shot on key press.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut state = new_game();

    #[cfg(feature = "sound")]
    let mut sound = sound::Sound::init();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut move_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        // Esc backs out of a sub-screen, or quits from the machine
                        KeyCode::Esc => {
                            if state.view == View::Game {
                                return Ok(());
                            }
                            state = set_view(&state, View::Game);
                        }
                        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status != GameStatus::Playing =>
                        {
                            state = start_round(&state, &mut rng);
                        }
                        KeyCode::Char(' ') if state.view == View::Game => {
                            state = start_grab(&state);
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') if state.view == View::Game => {
                            state = toggle_mist(&state);
                        }
                        KeyCode::Char('g') | KeyCode::Char('G') if state.view == View::Game => {
                            state = call_genie(&state);
                        }
                        KeyCode::Char('z') | KeyCode::Char('Z') => {
                            #[cfg(feature = "sound")]
                            if let Some(snd) = sound.as_mut() {
                                snd.toggle_sfx();
                            }
                        }
                        KeyCode::Char('x') | KeyCode::Char('X') => {
                            #[cfg(feature = "sound")]
                            if let Some(snd) = sound.as_mut() {
                                snd.toggle_music();
                            }
                        }
                        KeyCode::Char(key @ '1'..='4') => {
                            state = handle_slot(&state, key);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held movement keys every frame ──────────────────────────────
        if state.view == View::Game && state.status == GameStatus::Playing {
            let left = is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame);
            let right = is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame);
            let up = is_held(&key_frame, &KeyCode::Up, frame)
                || is_held(&key_frame, &KeyCode::Char('w'), frame)
                || is_held(&key_frame, &KeyCode::Char('W'), frame);
            let down = is_held(&key_frame, &KeyCode::Down, frame)
                || is_held(&key_frame, &KeyCode::Char('s'), frame)
                || is_held(&key_frame, &KeyCode::Char('S'), frame);

            // Movement — throttled so the claw doesn't teleport
            if move_cooldown == 0 {
                let mut dx = 0.0;
                let mut dy = 0.0;
                if left {
                    dx -= MOVE_STEP;
                }
                if right {
                    dx += MOVE_STEP;
                }
                if up {
                    dy -= MOVE_STEP;
                }
                if down {
                    dy += MOVE_STEP;
                }
                if dx != 0.0 || dy != 0.0 {
                    state = move_claw(&state, dx, dy);
                    move_cooldown = MOVE_COOLDOWN;
                }
            }
        }
        move_cooldown = move_cooldown.saturating_sub(1);

        if state.status == GameStatus::Playing {
            state = tick(&state, &mut rng);
        }

        // ── Hand pending sound cues to the mixer ──────────────────────────────
        #[cfg(feature = "sound")]
        {
            if let Some(snd) = sound.as_ref() {
                for cue in state.audio_events.drain(..) {
                    snd.play(cue);
                }
            } else {
                state.audio_events.clear();
            }
        }
        #[cfg(not(feature = "sound"))]
        state.audio_events.clear();

        #[cfg(feature = "sound")]
        let (sfx_on, music_on) = sound
            .as_ref()
            .map(|s| (s.sfx_on, s.music_on))
            .unwrap_or((false, false));
        #[cfg(not(feature = "sound"))]
        let (sfx_on, music_on) = (false, false);

        display::render(out, &state, sfx_on, music_on)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
