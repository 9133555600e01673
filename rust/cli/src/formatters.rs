//! Face, dice, shop and score formatters for terminal display.
//!
//! Pure functions over engine values. Suits render as Unicode symbols, or
//! as letters on Windows consoles that cannot show them.
//!
//! ## Example
//!
//! ```rust
//! use whale_engine::dice::{Face, Suit};
//! use whale_cli::formatters::format_face;
//!
//! let king = Face::new(13, Some(Suit::Spade)).royal();
//! assert!(format_face(&king) == "K♠" || format_face(&king) == "Ks");
//! ```

use std::fmt::Write as _;

use whale_engine::dice::{DieState, Face, FaceTag, Suit};
use whale_engine::engine::{GameEngine, POTS_PER_FLOOR};
use whale_engine::scoring::HandResult;
use whale_engine::shop::{ItemKind, ShopItem};

/// Check if the terminal supports Unicode suit symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Elsewhere, assumes yes.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Spade => "♠",
            Suit::Heart => "♥",
            Suit::Diamond => "♦",
            Suit::Club => "♣",
        }
    } else {
        match suit {
            Suit::Spade => "s",
            Suit::Heart => "h",
            Suit::Diamond => "d",
            Suit::Club => "c",
        }
    }
}

/// Printed value: 11..=13 as J/Q/K when the face is royal, digits otherwise.
pub fn format_value(face: &Face) -> String {
    match (face.base_value, face.is_royal) {
        (11, true) => "J".into(),
        (12, true) => "Q".into(),
        (13, true) => "K".into(),
        (v, _) => v.to_string(),
    }
}

/// `6♠`, `Q♥`, or with markers: `Q♥ (wild, glass)`.
pub fn format_face(face: &Face) -> String {
    let mut s = format_value(face);
    if let Some(suit) = face.suit {
        s.push_str(format_suit(suit));
    }

    let mut marks: Vec<String> = Vec::new();
    if face.is_royal && !(11..=13).contains(&face.base_value) {
        marks.push("royal".into());
    }
    if face.is_wild {
        marks.push("wild".into());
    }
    if face.dead {
        marks.push("dead".into());
    }
    marks.extend(face.tags.iter().map(|t| tag_label(*t).to_string()));
    if !marks.is_empty() {
        let _ = write!(s, " ({})", marks.join(", "));
    }
    s
}

pub fn tag_label(tag: FaceTag) -> &'static str {
    match tag {
        FaceTag::Glass => "glass",
        FaceTag::Hot => "hot",
        FaceTag::Juiced => "juiced",
        FaceTag::Tab => "tab",
    }
}

pub fn format_faces(faces: &[Face]) -> String {
    let parts: Vec<String> = faces.iter().map(format_face).collect();
    format!("[{}]", parts.join(" "))
}

/// One line per die, numbered from 1 as the `lock` command expects.
pub fn format_dice(dice: &[DieState]) -> String {
    let mut s = String::new();
    for (i, ds) in dice.iter().enumerate() {
        let hold = if ds.is_locked() { "  (held)" } else { "" };
        let _ = writeln!(s, "  {}: {}{}", i + 1, format_face(ds.current_face()), hold);
    }
    s
}

pub fn pot_label(pot_in_floor: u32) -> &'static str {
    match pot_in_floor {
        1 => "Small Pot",
        2 => "Big Pot",
        _ => "Boss Pot",
    }
}

/// Header for the pot in play.
pub fn format_status(engine: &GameEngine) -> String {
    let s = engine.state();
    let ps = &s.pot_state;
    let mut out = format!(
        "Floor {} | {} ({}/{}) | Hand {}/{} | Rerolls {} | Heat {}/{} | Chips {}",
        s.floor,
        pot_label(s.pot_in_floor),
        s.pot_in_floor,
        POTS_PER_FLOOR,
        ps.current_hand_number(),
        ps.hands_per_pot(),
        ps.rerolls_left(),
        ps.pot_heat(),
        ps.pot_target(),
        s.chips,
    );
    if let Some(rule) = s.boss_rule {
        let _ = write!(out, "\nBoss rule: {} - {}", rule.name(), rule.description());
    }
    out
}

/// `Five of a Kind: (6+6+6+6+6) + 120 x 12.00 = 1800 Heat`
pub fn format_result(result: &HandResult) -> String {
    let sum_expr: Vec<String> = result.sum_values.iter().map(|v| v.to_string()).collect();
    format!(
        "{}: ({}) + {} x {:.2} = {} Heat",
        result.hand_def.name,
        sum_expr.join("+"),
        result.base_heat_bonus,
        result.base_mult,
        result.total_heat
    )
}

pub fn format_shop_item(index: usize, item: &ShopItem) -> String {
    let kind = match item.kind {
        ItemKind::Angle => "angle",
        ItemKind::Edge => "edge",
    };
    let sold = if item.purchased { " [SOLD]" } else { "" };
    format!(
        "  {}. {} ({}) - {} chips{}\n     {}",
        index + 1,
        item.name,
        kind,
        item.cost,
        sold,
        item.description
    )
}

pub fn format_shop(items: &[ShopItem]) -> String {
    if items.is_empty() {
        return "  (the shop is empty)".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format_shop_item(i, item))
        .collect::<Vec<_>>()
        .join("\n")
}
