/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  `render` dispatches on the active view:
/// the machine itself, the pet store, the collection, or the design viewer.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use squeala_claw::claw::CELEBRATE_TICKS;
use squeala_claw::entities::{
    ClawPhase, GameState, GameStatus, PetSpecies, Rarity, RefillStage, Squeala, View,
    CLAW_WIDTH, FIELD_WIDTH, MAX_CLAW_HEALTH, MAX_MIST_CHARGES, POOL_TOP, SQUEALA_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_WATER: Color = Color::DarkCyan;
const C_CLAW: Color = Color::Yellow;
const C_CABLE: Color = Color::DarkGrey;
const C_DAMAGE: Color = Color::Red;
const C_MIST: Color = Color::Cyan;
const C_GENIE: Color = Color::Magenta;
const C_TITLE: Color = Color::Magenta;
const C_HUD_SCORE: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// First interior row of the play field; two HUD rows and the top border
/// sit above it.
const FIELD_TOP: u16 = 3;

const MIN_COLS: u16 = 70;
const MIN_ROWS: u16 = 24;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sfx_on: bool,
    music_on: bool,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if cols < MIN_COLS || rows < MIN_ROWS {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print("please enlarge the terminal"))?;
        return out.flush();
    }

    draw_hud(out, state, cols, sfx_on, music_on)?;
    match state.view {
        View::Game => draw_machine(out, state, cols, rows)?,
        View::Shop => draw_shop(out, state)?,
        View::Collection => draw_collection(out, state)?,
        View::Viewer => draw_viewer(out)?,
    }
    draw_controls_hint(out, state, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Logical x in [0, 100] → interior column.
fn field_col(x: f32, cols: u16) -> u16 {
    let inner = (cols - 2) as f32;
    1 + ((x / FIELD_WIDTH) * (inner - 1.0)).round() as u16
}

/// Logical y in [0, 100] → interior row.
fn field_row(y: f32, rows: u16) -> u16 {
    let inner = (rows - FIELD_TOP - 2) as f32;
    FIELD_TOP + ((y / 100.0) * (inner - 1.0)).round() as u16
}

/// Draw a short sprite centred on a column.
fn put_sprite<W: Write>(
    out: &mut W,
    center: u16,
    row: u16,
    color: Color,
    sprite: &str,
) -> std::io::Result<()> {
    let w = sprite.chars().count() as u16;
    out.queue(cursor::MoveTo(center.saturating_sub(w / 2), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── Squeala looks ─────────────────────────────────────────────────────────────

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::DarkMagenta,
        Rarity::Uncommon => Color::Magenta,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Cyan,
        Rarity::Legendary => Color::Green,
        Rarity::Mythical => Color::Yellow,
        Rarity::Divine => Color::Red,
        Rarity::Prismatic => Color::White,
    }
}

/// Divine and prismatic squealas shimmer with a mist aura.
fn has_aura(rarity: Rarity) -> bool {
    matches!(rarity, Rarity::Divine | Rarity::Prismatic)
}

/// Body row.  Wing size grows with the tier:
///    (ö)    — wingless
///   ‹(ö)›   — wings
///   «(ö)»   — big wings
fn rarity_face(rarity: Rarity) -> &'static str {
    if rarity.big_wings() {
        "«(ö)»"
    } else if rarity.has_wings() {
        "‹(ö)›"
    } else {
        "(ö)"
    }
}

/// Optional head row: horns, wrapped in the aura where one applies.
fn rarity_head(rarity: Rarity) -> Option<&'static str> {
    match (rarity.has_horns(), has_aura(rarity)) {
        (true, true) => Some("~\\ /~"),
        (true, false) => Some("\\ /"),
        _ => None,
    }
}

fn species_color(species: PetSpecies) -> Color {
    match species {
        PetSpecies::Lila => Color::Magenta,
        PetSpecies::Moline => Color::Cyan,
        PetSpecies::Dogily => Color::Green,
        PetSpecies::Genia => Color::DarkMagenta,
    }
}

// ── HUD (rows 0 and 1) ────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    sfx_on: bool,
    music_on: bool,
) -> std::io::Result<()> {
    // Title — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("SQUEALA CLAW"))?;

    // Points and timer — centre
    let mid = format!("Points:{:>8}   Time:{:>4}s", state.score, state.time_left);
    let mx = (cols / 2).saturating_sub(mid.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&mid))?;

    // Audio switches — right
    let flags = format!(
        "Sfx:{} Music:{}",
        if sfx_on { "on " } else { "off" },
        if music_on { "on " } else { "off" }
    );
    let fx = cols.saturating_sub(flags.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(fx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&flags))?;

    // Row 1 — claw health bar, mist charges, pet status
    let filled = ((state.claw.health as f32 / MAX_CLAW_HEALTH as f32) * 10.0).ceil() as usize;
    let bar_color = match state.claw.health {
        h if h > 60 => Color::Green,
        h if h > 30 => Color::Yellow,
        _ => Color::Red,
    };
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print("Claw "))?;
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print(format!(
        "{}{} {:>3}",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        state.claw.health
    )))?;

    let charges = state.claw.mist_charges as usize;
    out.queue(cursor::MoveTo(24, 1))?;
    out.queue(style::SetForegroundColor(C_MIST))?;
    out.queue(Print(format!(
        "Mist {}{}",
        "◆".repeat(charges),
        "◇".repeat(MAX_MIST_CHARGES as usize - charges)
    )))?;
    if state.claw.mist_armed {
        out.queue(cursor::MoveTo(36, 1))?;
        out.queue(Print("[ARMED]"))?;
    }

    out.queue(cursor::MoveTo(46, 1))?;
    match &state.pet {
        Some(pet) => {
            out.queue(style::SetForegroundColor(species_color(pet.species)))?;
            out.queue(Print(format!(
                "{} {} {}hp",
                pet.species.icon(),
                pet.species.name(),
                pet.health
            )))?;
        }
        None => {
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print("no pet out"))?;
        }
    }
    Ok(())
}

// ── The machine view ──────────────────────────────────────────────────────────

fn draw_machine<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    draw_border(out, cols, rows)?;

    // Water line marking the top of the pool
    out.queue(cursor::MoveTo(1, field_row(POOL_TOP, rows)))?;
    out.queue(style::SetForegroundColor(C_WATER))?;
    out.queue(Print("┈".repeat(cols as usize - 2)))?;

    for squeala in &state.squealas {
        draw_squeala(out, squeala, cols, rows)?;
    }
    if let Some(pet) = &state.pet {
        let center = field_col(pet.x + SQUEALA_WIDTH / 2.0, cols);
        put_sprite(
            out,
            center,
            field_row(pet.y, rows),
            species_color(pet.species),
            &format!("‹{}›", pet.species.icon()),
        )?;
    }
    draw_claw(out, state, cols, rows)?;
    draw_mist_cloud(out, state, cols, rows)?;
    draw_genie(out, state, cols)?;

    if state.status != GameStatus::Playing {
        draw_overlay(out, state, cols, rows)?;
    }
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in FIELD_TOP..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_squeala<W: Write>(
    out: &mut W,
    squeala: &Squeala,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let color = rarity_color(squeala.rarity);
    let center = field_col(squeala.x + SQUEALA_WIDTH / 2.0, cols);
    let row = field_row(squeala.y, rows);
    if let Some(head) = rarity_head(squeala.rarity) {
        put_sprite(out, center, row.saturating_sub(1), color, head)?;
    }
    put_sprite(out, center, row, color, rarity_face(squeala.rarity))
}

fn draw_claw<W: Write>(out: &mut W, state: &GameState, cols: u16, rows: u16) -> std::io::Result<()> {
    let claw = &state.claw;
    let color = if state.flash_ticks > 0 { C_DAMAGE } else { C_CLAW };
    let center = field_col(claw.x + CLAW_WIDTH / 2.0, cols);
    let row = field_row(claw.y, rows);

    out.queue(style::SetForegroundColor(C_CABLE))?;
    for cable_row in FIELD_TOP..row {
        out.queue(cursor::MoveTo(center, cable_row))?;
        out.queue(Print("│"))?;
    }

    // Body and pincers (2 rows):
    //   ╔═╗     ← housing
    //   ╱ ╲     ← pincers open  (╲ ╱ when closed)
    put_sprite(out, center, row, color, "╔═╗")?;
    let pincers = if claw.pincers_open { "╱ ╲" } else { "╲ ╱" };
    put_sprite(out, center, row + 1, color, pincers)?;

    if let Some(squeala) = &claw.held {
        put_sprite(out, center, row + 2, rarity_color(squeala.rarity), "(ö)")?;
    } else if claw.biting.is_some() {
        put_sprite(out, center, row + 2, C_DAMAGE, "(Ö)")?;
    }
    Ok(())
}

fn draw_mist_cloud<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    if !matches!(state.claw.phase, ClawPhase::Misting { .. }) {
        return Ok(());
    }
    // The cloud bursts over the locked target, or under the claw when the
    // bottle found nothing to aim at.
    let target = state
        .claw
        .locked_target
        .and_then(|id| state.squealas.iter().find(|s| s.id == id));
    let (center, row) = match target {
        Some(s) => (
            field_col(s.x + SQUEALA_WIDTH / 2.0, cols),
            field_row(s.y, rows).saturating_sub(1),
        ),
        None => (
            field_col(state.claw.x + CLAW_WIDTH / 2.0, cols),
            field_row(POOL_TOP, rows) + 2,
        ),
    };
    put_sprite(out, center, row, C_MIST, "░▒░")
}

fn draw_genie<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    if let Some(refill) = &state.claw.refill {
        let label = match refill.stage {
            RefillStage::Summoning => "a genie is summoned...",
            RefillStage::Filling => "refilling the mist bottle...",
            RefillStage::Topped => "the bottle is full!",
            RefillStage::Departing => "the genie departs",
        };
        let lx = (cols / 2).saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(lx, FIELD_TOP))?;
        out.queue(style::SetForegroundColor(C_GENIE))?;
        out.queue(Print(label))?;
        if refill.stage != RefillStage::Summoning {
            out.queue(cursor::MoveTo(cols - 8, FIELD_TOP + 1))?;
            out.queue(Print("«Ω»"))?;
            out.queue(cursor::MoveTo(cols - 8, FIELD_TOP + 2))?;
            out.queue(Print("≋≋≋"))?;
        }
        return Ok(());
    }

    // Celebration flyby after a non-winning catch
    if state.celebrate_ticks > 0 {
        let progress = 1.0 - state.celebrate_ticks as f32 / CELEBRATE_TICKS as f32;
        let col = 1 + ((cols - 8) as f32 * progress) as u16;
        out.queue(cursor::MoveTo(col, FIELD_TOP))?;
        out.queue(style::SetForegroundColor(C_GENIE))?;
        out.queue(Print("«Ω»✦"))?;
    }
    Ok(())
}

// ── Start / end overlay ───────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, state: &GameState, cols: u16, rows: u16) -> std::io::Result<()> {
    let (title, title_color) = match state.status {
        GameStatus::Playing => return Ok(()),
        GameStatus::Idle => ("READY TO PLAY?", Color::Cyan),
        GameStatus::Ended => ("TIME'S  UP!", Color::Red),
        GameStatus::Won => ("✦ YOU WIN! ✦", Color::Yellow),
    };
    let detail = match state.status {
        GameStatus::Idle => "grab 10 squealas to win".to_string(),
        _ => format!("Final Score: {:>6}", state.score),
    };
    let prompt = if state.status == GameStatus::Idle {
        "ENTER - Start Game  Q - Quit"
    } else {
        "ENTER - Play Again  Q - Quit"
    };

    let box_w: usize = 34;
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(3);

    let top = format!("╔{}╗", "═".repeat(box_w - 2));
    let blank = format!("║{}║", " ".repeat(box_w - 2));
    let bottom = format!("╚{}╝", "═".repeat(box_w - 2));
    let frame = [&top, &blank, &blank, &blank, &bottom];
    for (i, line) in frame.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(C_BORDER))?;
        out.queue(Print(line))?;
    }

    let col = cx.saturating_sub(title.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + 1))?;
    out.queue(style::SetForegroundColor(title_color))?;
    out.queue(Print(title))?;

    let col = cx.saturating_sub(detail.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + 2))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&detail))?;

    let col = cx.saturating_sub(prompt.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + 3))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(prompt))?;
    Ok(())
}

// ── Store, collection, viewer ─────────────────────────────────────────────────

fn draw_shop<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 3))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("MAGICAL PETS STORE"))?;
    out.queue(cursor::MoveTo(1, 4))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("a pet hunts squealas on its own while you work the claw"))?;

    for (slot, species) in PetSpecies::ALL.iter().enumerate() {
        let species = *species;
        let row = 6 + slot as u16 * 3;
        let active = state.pet.as_ref().map(|p| p.species) == Some(species);
        let owned = state.owned_pets.contains(&species);
        let (tag, tag_color) = if active {
            ("active — press to recall", Color::Cyan)
        } else if owned {
            ("owned — press to deploy", Color::Green)
        } else if state.score >= species.cost() {
            ("press to buy", Color::Yellow)
        } else {
            ("not enough points", C_HINT)
        };

        out.queue(cursor::MoveTo(2, row))?;
        out.queue(style::SetForegroundColor(species_color(species)))?;
        out.queue(Print(format!("[{}] {} {}", slot + 1, species.icon(), species.name())))?;
        out.queue(cursor::MoveTo(20, row))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print(format!("{:>7} pts", species.cost())))?;
        out.queue(cursor::MoveTo(34, row))?;
        out.queue(style::SetForegroundColor(tag_color))?;
        out.queue(Print(tag))?;
        out.queue(cursor::MoveTo(6, row + 1))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("{}  hp {}", species.description(), species.base_health())))?;
    }
    Ok(())
}

fn draw_collection<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 3))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("MY COLLECTION"))?;

    out.queue(cursor::MoveTo(1, 5))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print("pets:"))?;
    let mut col: u16 = 8;
    let mut any = false;
    for (slot, species) in PetSpecies::ALL.iter().enumerate() {
        let species = *species;
        if !state.owned_pets.contains(&species) {
            continue;
        }
        any = true;
        let active = state.pet.as_ref().map(|p| p.species) == Some(species);
        let marker = if active { " (out hunting)" } else { "" };
        let label = format!("[{}] {} {}{}   ", slot + 1, species.icon(), species.name(), marker);
        out.queue(cursor::MoveTo(col, 5))?;
        out.queue(style::SetForegroundColor(species_color(species)))?;
        out.queue(Print(&label))?;
        col += label.chars().count() as u16;
    }
    if !any {
        out.queue(cursor::MoveTo(8, 5))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("none yet — visit the store"))?;
    }

    out.queue(cursor::MoveTo(1, 7))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print("squeala-dex:"))?;
    for (i, rarity) in Rarity::ALL.iter().enumerate() {
        let rarity = *rarity;
        let row = 8 + i as u16;
        out.queue(cursor::MoveTo(3, row))?;
        if state.collected.contains(&rarity) {
            out.queue(style::SetForegroundColor(rarity_color(rarity)))?;
            out.queue(Print(rarity_face(rarity)))?;
            out.queue(cursor::MoveTo(10, row))?;
            out.queue(Print(rarity.name()))?;
            out.queue(cursor::MoveTo(22, row))?;
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print(format!("{} pts", rarity.points())))?;
        } else {
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print("?"))?;
            out.queue(cursor::MoveTo(10, row))?;
            out.queue(Print("???"))?;
        }
    }
    Ok(())
}

fn draw_viewer<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 3))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("SQUEALA DESIGN VIEWER"))?;

    for (i, rarity) in Rarity::ALL.iter().enumerate() {
        let rarity = *rarity;
        let row = 5 + i as u16 * 2;
        if let Some(head) = rarity_head(rarity) {
            out.queue(cursor::MoveTo(4, row))?;
            out.queue(style::SetForegroundColor(rarity_color(rarity)))?;
            out.queue(Print(head))?;
        }
        out.queue(cursor::MoveTo(4, row + 1))?;
        out.queue(style::SetForegroundColor(rarity_color(rarity)))?;
        out.queue(Print(rarity_face(rarity)))?;
        out.queue(cursor::MoveTo(12, row + 1))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print(rarity.name()))?;
        out.queue(cursor::MoveTo(24, row + 1))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("{:>7} pts", rarity.points())))?;

        let mut traits = Vec::new();
        if rarity.big_wings() {
            traits.push("big wings");
        } else if rarity.has_wings() {
            traits.push("wings");
        }
        if rarity.has_horns() {
            traits.push("horns");
        }
        if has_aura(rarity) {
            traits.push("aura");
        }
        if traits.is_empty() {
            traits.push("plain");
        }
        out.queue(cursor::MoveTo(38, row + 1))?;
        out.queue(Print(traits.join(", ")))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, rows: u16) -> std::io::Result<()> {
    let hint = match state.view {
        View::Game => "←↑↓→ Move  SPACE Grab  M Mist  G Genie  2/3/4 Views  Z/X Audio  Q Quit",
        View::Shop | View::Collection => "1-4 : Select   ESC : Back   Q : Quit",
        View::Viewer => "ESC : Back   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
