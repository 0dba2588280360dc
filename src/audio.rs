/// Sound synthesis.
///
/// Every cue in the game is rendered offline into a mono f32 buffer at
/// [`SAMPLE_RATE`]; nothing is sampled from disk.  The frontend hands these
/// buffers to the output device.  Rendering is deterministic, so the same
/// event always sounds the same.

use std::f32::consts::TAU;

use fundsp::hacker32 as dsp;

use crate::entities::AudioEvent;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Clone, Copy)]
enum Shape {
    Sine,
    Triangle,
    Square,
    Saw,
}

/// Renders the cue for one audio event.
pub fn render(event: AudioEvent) -> Vec<f32> {
    use Shape::{Saw, Sine, Square, Triangle};
    match event {
        AudioEvent::Move => tone(Square, 175.0, 0.1, 0.1, 0.001),
        AudioEvent::Grab => tone(Saw, 300.0, 0.2, 0.3, 0.01),
        AudioEvent::FailGrab => voice(392.00, 1.0),
        AudioEvent::ClawDamage => sweep(Saw, 120.0, 40.0, 0.3, 0.4, 0.01),
        AudioEvent::SquealaCry => squeala_cry(),
        // A pet catch earns the same fanfare as a claw catch.
        AudioEvent::Win | AudioEvent::PetCatch => jingle(
            &[
                (783.99, Triangle),
                (1046.50, Triangle),
                (1318.51, Triangle),
                (1567.98, Triangle),
            ],
            0.08,
            0.5,
            0.25,
        ),
        AudioEvent::LevelStart => jingle(
            &[
                (523.25, Triangle),
                (659.26, Sine),
                (783.99, Triangle),
                (1046.50, Sine),
                (783.99, Triangle),
                (1046.50, Sine),
                (1318.51, Triangle),
            ],
            0.1,
            0.5,
            0.3,
        ),
        AudioEvent::TimesUp => voice(523.25, 2.5),
        AudioEvent::CallGenie => voice(783.99, 2.0),
        AudioEvent::GenieSound => voice(659.26, 1.5),
        AudioEvent::RefillComplete => voice(987.77, 2.5),
        AudioEvent::Refill => jingle(
            &[
                (1000.0, Sine),
                (1250.0, Sine),
                (1500.0, Sine),
                (1750.0, Sine),
                (2000.0, Sine),
            ],
            0.05,
            0.2,
            0.2,
        ),
        AudioEvent::Buy => jingle(
            &[(523.25, Triangle), (659.26, Triangle), (783.99, Triangle)],
            0.1,
            0.2,
            0.2,
        ),
        AudioEvent::UiClick => tone(Triangle, 1200.0, 0.1, 0.2, 0.001),
        AudioEvent::PetDeploy => jingle(&[(440.0, Sine), (554.0, Sine), (659.0, Sine)], 0.15, 0.3, 0.2),
        AudioEvent::PetDamage => sweep(Square, 100.0, 30.0, 0.4, 0.3, 0.01),
        AudioEvent::PetDie => pet_die(),
    }
}

/// Eight-second dreamy loop: a harp arpeggio over two slow string-pad chords.
/// The frontend repeats the buffer seamlessly.
pub fn render_music() -> Vec<f32> {
    const QUARTER: f32 = 0.5;
    let mut master = vec![0.0; (8.0 * SAMPLE_RATE as f32) as usize];

    let harp = [523.25, 659.26, 783.99, 987.77, 783.99, 587.33, 493.88, 392.00];
    for (beat, &freq) in harp.iter().enumerate() {
        let pluck = tone(Shape::Triangle, freq, QUARTER * 2.0, 0.3, 0.001);
        mix_at(&mut master, beat as f32 * QUARTER, &pluck);
    }

    // C3 for the first half, A2 for the second, each a trio of detuned sines.
    for (half, &root) in [130.81f32, 110.00].iter().enumerate() {
        for detune in [-4.0, 0.0, 4.0] {
            let pad = pad_layer(root + detune, 4.0);
            mix_at(&mut master, half as f32 * 4.0, &pad);
        }
    }
    master
}

// ── Building blocks ───────────────────────────────────────────────────────────

fn render_mono(unit: &mut dyn dsp::AudioUnit, duration: f32) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    unit.reset();
    let count = (duration * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        samples.push(unit.get_mono());
    }
    samples
}

/// Adds `samples` into `master` starting `at` seconds in, growing the master
/// if the tail runs past its end.
fn mix_at(master: &mut Vec<f32>, at: f32, samples: &[f32]) {
    let offset = (at * SAMPLE_RATE as f32) as usize;
    if master.len() < offset + samples.len() {
        master.resize(offset + samples.len(), 0.0);
    }
    for (i, sample) in samples.iter().enumerate() {
        master[offset + i] += sample;
    }
}

/// Fixed-pitch oscillator with an exponential fade from `peak` to `tail`.
fn tone(shape: Shape, freq: f32, dur: f32, peak: f32, tail: f32) -> Vec<f32> {
    let env = move |t: f32| dsp::xerp(peak, tail, (t / dur).min(1.0));
    match shape {
        Shape::Sine => render_mono(&mut (dsp::sine_hz(freq) * dsp::lfo(env)), dur),
        Shape::Triangle => render_mono(&mut (dsp::triangle_hz(freq) * dsp::lfo(env)), dur),
        Shape::Square => render_mono(&mut (dsp::square_hz(freq) * dsp::lfo(env)), dur),
        Shape::Saw => render_mono(&mut (dsp::saw_hz(freq) * dsp::lfo(env)), dur),
    }
}

/// Oscillator gliding exponentially from `from` to `to` Hz while fading.
fn sweep(shape: Shape, from: f32, to: f32, dur: f32, peak: f32, tail: f32) -> Vec<f32> {
    let glide = move |t: f32| dsp::xerp(from, to, (t / dur).min(1.0));
    let env = move |t: f32| dsp::xerp(peak, tail, (t / dur).min(1.0));
    match shape {
        Shape::Sine => render_mono(&mut ((dsp::lfo(glide) >> dsp::sine()) * dsp::lfo(env)), dur),
        Shape::Triangle => {
            render_mono(&mut ((dsp::lfo(glide) >> dsp::triangle()) * dsp::lfo(env)), dur)
        }
        Shape::Square => render_mono(&mut ((dsp::lfo(glide) >> dsp::square()) * dsp::lfo(env)), dur),
        Shape::Saw => render_mono(&mut ((dsp::lfo(glide) >> dsp::saw()) * dsp::lfo(env)), dur),
    }
}

/// A run of notes sharing one articulation: each starts `spacing` seconds
/// after the previous and rings for `dur` seconds.
fn jingle(notes: &[(f32, Shape)], spacing: f32, dur: f32, peak: f32) -> Vec<f32> {
    let mut master = Vec::new();
    for (i, &(freq, shape)) in notes.iter().enumerate() {
        let note = tone(shape, freq, dur, peak, 0.001);
        mix_at(&mut master, i as f32 * spacing, &note);
    }
    master
}

/// The genie's ethereal voice: four sine layers detuned 2 Hz apart, each with
/// its own slow vibrato, swelling in over 0.2 s and fading out to the end.
fn voice(base: f32, dur: f32) -> Vec<f32> {
    let mut master = vec![0.0; (dur * SAMPLE_RATE as f32) as usize];
    for layer in 0..4 {
        let center = base + (layer as f32 * 2.0 - 2.0);
        let rate = 5.0 + layer as f32 * 0.3;
        let vibrato = move |t: f32| center + 3.0 * (TAU * rate * t).sin();
        let env = move |t: f32| {
            if t < 0.2 {
                dsp::lerp(0.0, 0.08, t / 0.2)
            } else {
                dsp::lerp(0.08, 0.0, ((t - 0.2) / (dur - 0.2)).min(1.0))
            }
        };
        let samples = render_mono(&mut ((dsp::lfo(vibrato) >> dsp::sine()) * dsp::lfo(env)), dur);
        mix_at(&mut master, 0.0, &samples);
    }
    master
}

/// The squeal itself: a sawtooth warbling around 800 Hz, swelling fast and
/// tapering off over a second.
fn squeala_cry() -> Vec<f32> {
    let warble = |t: f32| 800.0 + 25.0 * (TAU * 8.0 * t).sin();
    let env = |t: f32| {
        if t < 0.1 {
            dsp::lerp(0.0, 0.4, t / 0.1)
        } else if t < 0.4 {
            dsp::lerp(0.4, 0.2, (t - 0.1) / 0.3)
        } else {
            dsp::xerp(0.2, 0.001, ((t - 0.4) / 0.8).min(1.0))
        }
    };
    render_mono(&mut ((dsp::lfo(warble) >> dsp::saw()) * dsp::lfo(env)), 1.2)
}

/// Two descending voices a major third apart, the second entering late.
fn pet_die() -> Vec<f32> {
    let mut master = voice(329.63, 2.0);
    let low = voice(261.63, 2.0);
    mix_at(&mut master, 0.2, &low);
    master
}

/// One detuned layer of the background string pad.
fn pad_layer(freq: f32, dur: f32) -> Vec<f32> {
    let env = move |t: f32| {
        if t < 0.5 {
            dsp::lerp(0.0, 0.02, t / 0.5)
        } else {
            dsp::lerp(0.02, 0.0, ((t - 0.5) / (dur - 0.5)).min(1.0))
        }
    };
    render_mono(&mut (dsp::sine_hz(freq) * dsp::lfo(env)), dur)
}
