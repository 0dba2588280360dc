/// All game entity types — pure data, no logic.

use std::collections::HashSet;

// ── Field geometry (normalized 0–100 units) ──────────────────────────────────

/// Width of the play field in logical units.
pub const FIELD_WIDTH: f32 = 100.0;
/// Sprite width of the claw; its horizontal center is `x + CLAW_WIDTH / 2`.
pub const CLAW_WIDTH: f32 = 10.0;
/// Sprite width of a squeala; its horizontal center is `x + SQUEALA_WIDTH / 2`.
pub const SQUEALA_WIDTH: f32 = 10.0;
/// Deepest point the claw can reach; also its descent target during a grab.
pub const CLAW_MAX_Y: f32 = 75.0;
/// Top of the pool region that squealas (and pets) live in.
pub const POOL_TOP: f32 = 60.0;
/// Bottom of the pool region.
pub const POOL_BOTTOM: f32 = 90.0;

pub const MAX_CLAW_HEALTH: u32 = 100;
pub const MAX_MIST_CHARGES: u32 = 5;

/// Logic ticks per second.  Every duration in this crate is expressed in
/// ticks at this rate; the frontend advances the simulation once per frame.
pub const TICK_RATE: u32 = 30;

// ── Rarity tiers ──────────────────────────────────────────────────────────────

/// The eight squeala rarity classes, in ascending order of worth.
/// Point and damage values are non-decreasing across this ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythical,
    Divine,
    Prismatic,
}

impl Rarity {
    /// Ascending tier order, as listed in the dex and the viewer.
    pub const ALL: [Rarity; 8] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythical,
        Rarity::Divine,
        Rarity::Prismatic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythical => "Mythical",
            Rarity::Divine => "Divine",
            Rarity::Prismatic => "Prismatic",
        }
    }

    /// Reward credited when a creature of this tier is captured.
    pub fn points(self) -> u32 {
        match self {
            Rarity::Common => 50,
            Rarity::Uncommon => 100,
            Rarity::Rare => 300,
            Rarity::Epic => 500,
            Rarity::Legendary => 1_000,
            Rarity::Mythical => 5_000,
            Rarity::Divine => 10_000,
            Rarity::Prismatic => 1_000_000,
        }
    }

    /// Damage dealt to the claw (or a pet) when a capture attempt fails.
    pub fn damage(self) -> u32 {
        match self {
            Rarity::Common => 5,
            Rarity::Uncommon => 8,
            Rarity::Rare => 12,
            Rarity::Epic => 18,
            Rarity::Legendary => 25,
            Rarity::Mythical => 35,
            Rarity::Divine => 50,
            Rarity::Prismatic => 75,
        }
    }

    pub fn has_wings(self) -> bool {
        !matches!(self, Rarity::Common | Rarity::Uncommon)
    }

    pub fn big_wings(self) -> bool {
        matches!(self, Rarity::Epic | Rarity::Legendary | Rarity::Prismatic)
    }

    pub fn has_horns(self) -> bool {
        matches!(
            self,
            Rarity::Legendary | Rarity::Mythical | Rarity::Divine | Rarity::Prismatic
        )
    }
}

// ── Creatures ─────────────────────────────────────────────────────────────────

/// A collectible creature living in the pool.  Owned by the active round;
/// destroyed on capture (successful or not) and never persisted.
#[derive(Clone, Debug)]
pub struct Squeala {
    pub id: u64,
    pub rarity: Rarity,
    /// Left edge; the sprite extends SQUEALA_WIDTH units to the right.
    pub x: f32,
    pub y: f32,
}

// ── Claw ──────────────────────────────────────────────────────────────────────

/// Lifecycle phase of the claw.  Non-ready phases carry their remaining
/// duration; the tick driver decrements it and fires the transition at zero.
#[derive(Clone, Debug, PartialEq)]
pub enum ClawPhase {
    Ready,
    /// Mist bottle flight before the drop.
    Misting { ticks_left: u32 },
    /// Descending from `from_y` toward CLAW_MAX_Y.
    Dropping { ticks_left: u32, from_y: f32 },
    /// Returning to the top with the outcome in hand.
    Rising { ticks_left: u32 },
}

/// Stage of the genie refill ritual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefillStage {
    Summoning,
    Filling,
    Topped,
    Departing,
}

/// A refill ritual in progress — current stage plus ticks remaining in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Refill {
    pub stage: RefillStage,
    pub ticks_left: u32,
}

#[derive(Clone, Debug)]
pub struct Claw {
    /// Left edge; center is `x + CLAW_WIDTH / 2`.
    pub x: f32,
    pub y: f32,
    pub pincers_open: bool,
    pub phase: ClawPhase,
    /// At 0 the claw can no longer grab or arm mist until the next round;
    /// movement stays enabled.
    pub health: u32,
    pub mist_charges: u32,
    /// Mist toggled on for the next grab.
    pub mist_armed: bool,
    /// Guaranteed-catch target locked at grab time, resolved by id at drop end.
    pub locked_target: Option<u64>,
    /// Successful catch riding the claw up; scored when the rise completes.
    pub held: Option<Squeala>,
    /// Failed catch latched onto the claw until the rise completes.
    pub biting: Option<Squeala>,
    /// Refill ritual, if one is running.  Blocks grab/mist, never movement.
    pub refill: Option<Refill>,
}

// ── Pets ──────────────────────────────────────────────────────────────────────

/// The four purchasable pet species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PetSpecies {
    Lila,
    Moline,
    Dogily,
    Genia,
}

impl PetSpecies {
    /// Shop order.
    pub const ALL: [PetSpecies; 4] = [
        PetSpecies::Lila,
        PetSpecies::Moline,
        PetSpecies::Dogily,
        PetSpecies::Genia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PetSpecies::Lila => "Lila",
            PetSpecies::Moline => "Moline",
            PetSpecies::Dogily => "Dogily",
            PetSpecies::Genia => "Genia",
        }
    }

    /// Purchase price in points.
    pub fn cost(self) -> u32 {
        match self {
            PetSpecies::Lila => 300,
            PetSpecies::Moline => 500,
            PetSpecies::Dogily => 1_000,
            PetSpecies::Genia => 1_500,
        }
    }

    /// Health a freshly deployed pet starts with.
    pub fn base_health(self) -> u32 {
        match self {
            PetSpecies::Lila => 75,
            PetSpecies::Moline => 100,
            PetSpecies::Dogily => 150,
            PetSpecies::Genia => 120,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PetSpecies::Lila => "♥",
            PetSpecies::Moline => "✿",
            PetSpecies::Dogily => "▲",
            PetSpecies::Genia => "Ω",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PetSpecies::Lila => "Pink cat with a mermaid tail.",
            PetSpecies::Moline => "Pink and purple fairy poodle.",
            PetSpecies::Dogily => "A powerful dragon dog.",
            PetSpecies::Genia => "Purple genie cat.",
        }
    }
}

/// The deployed pet.  At most one is active; it hunts on its own cadence.
#[derive(Clone, Debug)]
pub struct ActivePet {
    pub species: PetSpecies,
    /// Bounded by the species base health; the pet dies (and is deleted from
    /// the owned set) when this reaches 0.
    pub health: u32,
    pub x: f32,
    pub y: f32,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Playing,
    Ended,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Game,
    Shop,
    Collection,
    Viewer,
}

// ── Audio events ──────────────────────────────────────────────────────────────

/// Named sound cues emitted by the core and drained by the frontend.
/// Fire-and-forget: game logic never observes playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    Move,
    Grab,
    FailGrab,
    ClawDamage,
    SquealaCry,
    Win,
    LevelStart,
    TimesUp,
    CallGenie,
    GenieSound,
    RefillComplete,
    Refill,
    Buy,
    UiClick,
    PetDeploy,
    PetCatch,
    PetDamage,
    PetDie,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub squealas: Vec<Squeala>,
    pub claw: Claw,
    pub pet: Option<ActivePet>,
    /// Species the player has purchased.  A pet that dies in combat is
    /// deleted from here permanently.
    pub owned_pets: HashSet<PetSpecies>,
    /// Dex of every rarity ever captured (claw or pet); survives rounds.
    pub collected: HashSet<Rarity>,
    pub score: u32,
    /// Seconds remaining in the round.
    pub time_left: u32,
    pub status: GameStatus,
    pub view: View,
    /// Successful claw grabs this round; reaching 10 wins.
    pub grabs_this_round: u32,
    /// Id handed to the next spawned squeala.
    pub next_squeala_id: u64,
    /// Monotonic logic tick; drives every timed cadence.  Reset per round.
    pub tick: u64,
    /// Genie celebration flyby after a non-winning catch (ticks remaining).
    pub celebrate_ticks: u32,
    /// Claw damage flash (ticks remaining).
    pub flash_ticks: u32,
    /// Pending sound cues; the frontend drains this every frame.
    pub audio_events: Vec<AudioEvent>,
}
