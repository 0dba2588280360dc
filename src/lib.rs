//! Squeala Claw — core logic for the claw-machine arcade game.
//!
//! Everything in here is pure: commands and the tick driver take the current
//! [`entities::GameState`] by reference (plus an RNG handle where chance is
//! involved) and return the next state.  Rendering, input, and audio playback
//! live in the binary.

pub mod audio;
pub mod claw;
pub mod entities;
pub mod pet;
pub mod session;
pub mod spawn;
