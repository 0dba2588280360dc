use squeala_claw::audio::{render, render_music, SAMPLE_RATE};
use squeala_claw::entities::AudioEvent;

const ALL_EVENTS: [AudioEvent; 18] = [
    AudioEvent::Move,
    AudioEvent::Grab,
    AudioEvent::FailGrab,
    AudioEvent::ClawDamage,
    AudioEvent::SquealaCry,
    AudioEvent::Win,
    AudioEvent::LevelStart,
    AudioEvent::TimesUp,
    AudioEvent::CallGenie,
    AudioEvent::GenieSound,
    AudioEvent::RefillComplete,
    AudioEvent::Refill,
    AudioEvent::Buy,
    AudioEvent::UiClick,
    AudioEvent::PetDeploy,
    AudioEvent::PetCatch,
    AudioEvent::PetDamage,
    AudioEvent::PetDie,
];

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0, |m, s| m.max(s.abs()))
}

// ── Event cues ────────────────────────────────────────────────────────────────

#[test]
fn every_cue_renders_clean_audio() {
    for event in ALL_EVENTS {
        let cue = render(event);
        assert!(!cue.is_empty(), "{event:?} rendered nothing");
        assert!(cue.iter().all(|s| s.is_finite()), "{event:?} has bad samples");
        assert!(peak(&cue) <= 1.0, "{event:?} clips");
        assert!(peak(&cue) > 0.0005, "{event:?} is silent");
    }
}

#[test]
fn cue_lengths_match_their_durations() {
    let rate = SAMPLE_RATE as usize;
    assert_eq!(render(AudioEvent::Move).len(), rate / 10); // 0.1 s blip
    assert_eq!(render(AudioEvent::FailGrab).len(), rate); // 1 s moan
    assert_eq!(render(AudioEvent::SquealaCry).len(), 52_920); // 1.2 s
    // Four fanfare notes 0.08 s apart, the last ringing 0.5 s
    assert_eq!(render(AudioEvent::Win).len(), 10_584 + rate / 2);
    // Second dirge voice enters 0.2 s late and rings 2 s
    assert_eq!(render(AudioEvent::PetDie).len(), 8_820 + 2 * rate);
}

#[test]
fn win_and_pet_catch_share_a_fanfare() {
    assert_eq!(render(AudioEvent::Win), render(AudioEvent::PetCatch));
}

#[test]
fn cues_end_quietly() {
    // No cue may cut off hard; the last 10 ms stay near silence
    for event in [
        AudioEvent::Move,
        AudioEvent::Grab,
        AudioEvent::UiClick,
        AudioEvent::SquealaCry,
        AudioEvent::GenieSound,
        AudioEvent::PetDie,
    ] {
        let cue = render(event);
        let tail = &cue[cue.len() - 441..];
        assert!(peak(tail) < 0.02, "{event:?} ends at {}", peak(tail));
    }
}

#[test]
fn genie_voice_swells_in() {
    let cue = render(AudioEvent::GenieSound);
    let rate = SAMPLE_RATE as usize;

    assert!(cue[0].abs() < 0.001); // fades in from nothing
    let swell = peak(&cue[rate / 10..rate / 2]);
    assert!(swell > 0.05, "swell only reached {swell}");
    assert!(swell > 10.0 * peak(&cue[cue.len() - 441..]));
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render(AudioEvent::SquealaCry), render(AudioEvent::SquealaCry));
    assert_eq!(render_music(), render_music());
}

// ── Background music ──────────────────────────────────────────────────────────

#[test]
fn music_fills_exactly_eight_seconds() {
    let music = render_music();

    assert_eq!(music.len(), 8 * SAMPLE_RATE as usize);
    assert!(music.iter().all(|s| s.is_finite()));
    assert!(peak(&music) <= 1.0);
    assert!(peak(&music) > 0.01);
}

#[test]
fn music_tail_lands_on_silence() {
    let music = render_music();
    let tail = &music[music.len() - 441..];

    // The pad envelope reaches zero at the end, so the loop seam is clean
    assert!(peak(tail) < 0.02);
}
