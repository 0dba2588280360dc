use squeala_claw::entities::*;
use squeala_claw::session::new_game;

// ── Rarity tables ─────────────────────────────────────────────────────────────

#[test]
fn rarity_points_table() {
    assert_eq!(Rarity::Common.points(), 50);
    assert_eq!(Rarity::Uncommon.points(), 100);
    assert_eq!(Rarity::Rare.points(), 300);
    assert_eq!(Rarity::Epic.points(), 500);
    assert_eq!(Rarity::Legendary.points(), 1_000);
    assert_eq!(Rarity::Mythical.points(), 5_000);
    assert_eq!(Rarity::Divine.points(), 10_000);
    assert_eq!(Rarity::Prismatic.points(), 1_000_000);
}

#[test]
fn rarity_damage_table() {
    assert_eq!(Rarity::Common.damage(), 5);
    assert_eq!(Rarity::Uncommon.damage(), 8);
    assert_eq!(Rarity::Rare.damage(), 12);
    assert_eq!(Rarity::Epic.damage(), 18);
    assert_eq!(Rarity::Legendary.damage(), 25);
    assert_eq!(Rarity::Mythical.damage(), 35);
    assert_eq!(Rarity::Divine.damage(), 50);
    assert_eq!(Rarity::Prismatic.damage(), 75);
}

#[test]
fn rarity_tables_rise_with_tier() {
    // Worth and bite both grow strictly along the ALL ordering
    for pair in Rarity::ALL.windows(2) {
        assert!(pair[0].points() < pair[1].points());
        assert!(pair[0].damage() < pair[1].damage());
    }
}

#[test]
fn rarity_trait_flags() {
    // Wings appear at Rare, big on Epic/Legendary/Prismatic, horns at Legendary+
    assert!(!Rarity::Common.has_wings());
    assert!(!Rarity::Uncommon.has_wings());
    assert!(Rarity::Rare.has_wings());
    assert!(!Rarity::Rare.big_wings());
    assert!(Rarity::Epic.big_wings());
    assert!(!Rarity::Epic.has_horns());
    assert!(Rarity::Legendary.big_wings());
    assert!(Rarity::Legendary.has_horns());
    assert!(Rarity::Mythical.has_wings());
    assert!(!Rarity::Mythical.big_wings());
    assert!(Rarity::Mythical.has_horns());
    assert!(!Rarity::Divine.big_wings());
    assert!(Rarity::Divine.has_horns());
    assert!(Rarity::Prismatic.big_wings());
    assert!(Rarity::Prismatic.has_horns());
}

// ── Pet species tables ────────────────────────────────────────────────────────

#[test]
fn species_cost_table() {
    assert_eq!(PetSpecies::Lila.cost(), 300);
    assert_eq!(PetSpecies::Moline.cost(), 500);
    assert_eq!(PetSpecies::Dogily.cost(), 1_000);
    assert_eq!(PetSpecies::Genia.cost(), 1_500);
}

#[test]
fn species_health_table() {
    assert_eq!(PetSpecies::Lila.base_health(), 75);
    assert_eq!(PetSpecies::Moline.base_health(), 100);
    assert_eq!(PetSpecies::Dogily.base_health(), 150);
    assert_eq!(PetSpecies::Genia.base_health(), 120);
}

// ── Derives ───────────────────────────────────────────────────────────────────

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Rarity::Common, Rarity::Common);
    assert_ne!(Rarity::Common, Rarity::Prismatic);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::Won);
    assert_eq!(View::Game, View::Game);
    assert_ne!(View::Shop, View::Collection);
    assert_eq!(PetSpecies::Lila, PetSpecies::Lila);
    assert_ne!(PetSpecies::Lila, PetSpecies::Genia);
    assert_eq!(AudioEvent::Grab, AudioEvent::Grab);
    assert_ne!(AudioEvent::Win, AudioEvent::FailGrab);

    // Clone must produce an equal value
    let phase = ClawPhase::Misting { ticks_left: 30 };
    assert_eq!(phase.clone(), ClawPhase::Misting { ticks_left: 30 });
}

#[test]
fn game_state_clone_is_independent() {
    let original = new_game();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.score = 999;
    cloned.claw.x = 5.0;
    cloned.squealas.push(Squeala {
        id: 1,
        rarity: Rarity::Common,
        x: 10.0,
        y: 70.0,
    });
    cloned.owned_pets.insert(PetSpecies::Lila);
    cloned.audio_events.push(AudioEvent::Buy);

    assert_eq!(original.score, 0);
    assert_eq!(original.claw.x, 50.0);
    assert!(original.squealas.is_empty());
    assert!(original.owned_pets.is_empty());
    assert!(original.audio_events.is_empty());
}
