//! Input parsing for the interactive loop and the `score` command.
//!
//! Parsers never touch the engine; they turn text into a [`ParseResult`] or
//! a [`Face`] and report anything else as a message the user can act on.

use whale_engine::dice::{Face, FaceTag, Suit};

/// One command of the `play` loop. Die and item positions are 0-based here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    Lock(usize),
    Roll,
    Submit,
    Shop,
    Buy(usize),
    Next,
    Save,
    Help,
}

/// Result type for parsing a line of `play` input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a line of the `play` loop (case-insensitive).
///
/// - "l N" or "lock N" toggles the hold on die N (1-based)
/// - "r" or "roll" rerolls unheld dice
/// - "s" or "submit" scores the hand
/// - "shop", "buy N", "next", "save", "h"/"help"
/// - "q" or "quit"
///
/// # Example
///
/// ```rust
/// # use whale_cli::validation::{parse_play_command, ParseResult, PlayCommand};
/// assert_eq!(parse_play_command("lock 2"), ParseResult::Command(PlayCommand::Lock(1)));
/// assert_eq!(parse_play_command("R"), ParseResult::Command(PlayCommand::Roll));
/// assert_eq!(parse_play_command("quit"), ParseResult::Quit);
/// assert!(matches!(parse_play_command("lock 0"), ParseResult::Invalid(_)));
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    if head == "q" || head == "quit" {
        return ParseResult::Quit;
    }

    let no_arg = |cmd: PlayCommand| {
        if parts.len() > 1 {
            ParseResult::Invalid(format!("'{}' takes no argument", head))
        } else {
            ParseResult::Command(cmd)
        }
    };

    match head {
        "l" | "lock" => match parse_position(parts.get(1).copied(), "die") {
            Ok(i) => ParseResult::Command(PlayCommand::Lock(i)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "buy" => match parse_position(parts.get(1).copied(), "item") {
            Ok(i) => ParseResult::Command(PlayCommand::Buy(i)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "r" | "roll" => no_arg(PlayCommand::Roll),
        "s" | "submit" => no_arg(PlayCommand::Submit),
        "shop" => no_arg(PlayCommand::Shop),
        "next" | "n" => no_arg(PlayCommand::Next),
        "save" => no_arg(PlayCommand::Save),
        "h" | "help" | "?" => no_arg(PlayCommand::Help),
        _ => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: lock N, roll, submit, shop, buy N, next, save, help, q",
            head
        )),
    }
}

/// 1-based position argument to a 0-based index.
fn parse_position(arg: Option<&str>, what: &str) -> Result<usize, String> {
    let Some(arg) = arg else {
        return Err(format!("Missing {} number (e.g., '1')", what));
    };
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        Ok(_) => Err(format!("{} numbers start at 1", capitalize(what))),
        Err(_) => Err(format!("Invalid {} number '{}'", what, arg)),
    }
}

fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        Some(first) => first.to_uppercase().collect::<String>() + c.as_str(),
        None => String::new(),
    }
}

/// Parse a face token `VALUE[SUIT][:flag,...]`.
///
/// VALUE is 1-13 or one of A, J, Q, K (J, Q and K are royal). SUIT is one of
/// S, H, D, C. Flags: royal, wild, dead, glass, hot, juiced, tab.
///
/// # Example
///
/// ```rust
/// # use whale_cli::validation::parse_face;
/// use whale_engine::dice::{FaceTag, Suit};
///
/// let f = parse_face("QH:glass").unwrap();
/// assert_eq!(f.base_value, 12);
/// assert_eq!(f.suit, Some(Suit::Heart));
/// assert!(f.is_royal);
/// assert!(f.tags.contains(&FaceTag::Glass));
///
/// assert_eq!(parse_face("6").unwrap().suit, None);
/// assert!(parse_face("14S").is_err());
/// ```
pub fn parse_face(token: &str) -> Result<Face, String> {
    let token = token.trim();
    let (head, flags) = match token.split_once(':') {
        Some((h, f)) => (h, Some(f)),
        None => (token, None),
    };
    let head = head.to_ascii_uppercase();
    if head.is_empty() {
        return Err(format!("Empty face in '{}'", token));
    }

    let (value_part, suit) = match head.chars().last().and_then(suit_from_char) {
        Some(suit) if head.len() > 1 => (&head[..head.len() - 1], Some(suit)),
        _ => (head.as_str(), None),
    };

    let (value, royal) = match value_part {
        "A" => (1, false),
        "J" => (11, true),
        "Q" => (12, true),
        "K" => (13, true),
        digits => match digits.parse::<u8>() {
            Ok(v) if (1..=13).contains(&v) => (v, false),
            _ => {
                return Err(format!(
                    "Invalid face value '{}' in '{}' (expected 1-13 or A/J/Q/K)",
                    value_part, token
                ));
            }
        },
    };

    let mut face = Face::new(value, suit);
    if royal {
        face = face.royal();
    }
    for flag in flags.into_iter().flat_map(|f| f.split(',')) {
        let flag = flag.trim().to_ascii_lowercase();
        face = match flag.as_str() {
            "" => face,
            "royal" => face.royal(),
            "wild" => face.wild(),
            "dead" => face.dead(),
            "glass" => face.with_tag(FaceTag::Glass),
            "hot" => face.with_tag(FaceTag::Hot),
            "juiced" => face.with_tag(FaceTag::Juiced),
            "tab" => face.with_tag(FaceTag::Tab),
            other => return Err(format!("Unknown face flag '{}' in '{}'", other, token)),
        };
    }
    Ok(face)
}

fn suit_from_char(c: char) -> Option<Suit> {
    match c {
        'S' => Some(Suit::Spade),
        'H' => Some(Suit::Heart),
        'D' => Some(Suit::Diamond),
        'C' => Some(Suit::Club),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lock_is_one_based() {
        assert_eq!(
            parse_play_command("l 5"),
            ParseResult::Command(PlayCommand::Lock(4))
        );
        assert_eq!(
            parse_play_command("LOCK 1"),
            ParseResult::Command(PlayCommand::Lock(0))
        );
    }

    #[test]
    fn test_parse_lock_requires_number() {
        match parse_play_command("lock") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Missing die number")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        match parse_play_command("lock x") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Invalid die number")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        match parse_play_command("buy 0") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Item numbers start at 1")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_play_command("s"), ParseResult::Command(PlayCommand::Submit));
        assert_eq!(parse_play_command("submit"), ParseResult::Command(PlayCommand::Submit));
        assert_eq!(parse_play_command("shop"), ParseResult::Command(PlayCommand::Shop));
        assert_eq!(parse_play_command("buy 3"), ParseResult::Command(PlayCommand::Buy(2)));
        assert_eq!(parse_play_command("next"), ParseResult::Command(PlayCommand::Next));
        assert_eq!(parse_play_command("save"), ParseResult::Command(PlayCommand::Save));
        assert_eq!(parse_play_command("help"), ParseResult::Command(PlayCommand::Help));
        assert_eq!(parse_play_command("  Q  "), ParseResult::Quit);
    }

    #[test]
    fn test_parse_rejects_extra_arguments() {
        assert!(matches!(parse_play_command("roll 2"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_parse_empty_and_unknown() {
        assert_eq!(
            parse_play_command("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
        match parse_play_command("dance") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized command 'dance'")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_face_letters_and_digits() {
        let k = parse_face("ks").unwrap();
        assert_eq!((k.base_value, k.suit, k.is_royal), (13, Some(Suit::Spade), true));
        let a = parse_face("A").unwrap();
        assert_eq!((a.base_value, a.suit, a.is_royal), (1, None, false));
        let ten = parse_face("10D").unwrap();
        assert_eq!((ten.base_value, ten.suit), (10, Some(Suit::Diamond)));
        let eleven = parse_face("11").unwrap();
        assert!(!eleven.is_royal, "only letter values imply royal");
    }

    #[test]
    fn test_parse_face_flags() {
        let f = parse_face("6C:dead,hot").unwrap();
        assert!(f.dead);
        assert!(f.tags.contains(&FaceTag::Hot));
        let w = parse_face("2:wild,royal").unwrap();
        assert!(w.is_wild && w.is_royal);
        assert!(parse_face("2:sparkly").unwrap_err().contains("Unknown face flag"));
    }

    #[test]
    fn test_parse_face_rejects_bad_values() {
        assert!(parse_face("0").is_err());
        assert!(parse_face("14").is_err());
        assert!(parse_face("S").is_err());
        assert!(parse_face("").is_err());
        assert!(parse_face("ZZ").is_err());
    }
}
