//! `whale score`: classification from the command line.

mod helpers;

use helpers::run_cli;

#[test]
fn five_of_a_kind() {
    let res = run_cli(&["score", "6S", "6H", "6D", "6C", "6S"], "");
    assert_eq!(res.exit_code, 0);
    assert!(
        res.stdout
            .contains("Five of a Kind: (6+6+6+6+6) + 120 x 12.00 = 1800 Heat")
    );
}

#[test]
fn royal_flush_needs_royal_faces() {
    let res = run_cli(&["score", "9S", "10S", "JS", "QS", "KS"], "");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Royal Flush"), "{}", res.stdout);
    assert!(res.stdout.contains("= 2340 Heat"));
}

#[test]
fn numeric_eleven_is_not_a_jack() {
    let res = run_cli(&["score", "9S", "10S", "11S", "12S", "13S"], "");
    assert_eq!(res.exit_code, 0);
    assert!(!res.stdout.contains('J'), "{}", res.stdout);
    assert!(res.stdout.contains("(9+10+11+12+13)"));
}

#[test]
fn ace_high_straight() {
    let res = run_cli(&["score", "A", "10", "J", "Q", "K"], "");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("High Straight"), "{}", res.stdout);
}

#[test]
fn boss_rule_applies() {
    let res = run_cli(
        &["score", "12", "12", "12", "2", "2", "--rule", "low-ceiling"],
        "",
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Rule: Low Ceiling"));
    assert!(res.stdout.contains("Full House"));
    assert!(res.stdout.contains("(10+10+10+2+2)"), "{}", res.stdout);
}

#[test]
fn face_flags() {
    let res = run_cli(&["score", "4:wild", "4", "4", "4", "4:dead,glass"], "");
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("wild"));
    assert!(res.stdout.contains("dead, glass"));
}

#[test]
fn invalid_token_exits_two() {
    let res = run_cli(&["score", "6S", "6H", "6D", "6C", "ZZ"], "");
    assert_eq!(res.exit_code, 2);
    assert_eq!(res.stderr.matches("Error:").count(), 1, "{}", res.stderr);
    assert!(res.stderr.starts_with("Error: Invalid input: Invalid face value 'ZZ'"));
    assert!(res.stdout.is_empty());
}

#[test]
fn unknown_flag_exits_two() {
    let res = run_cli(&["score", "6", "6", "6", "6", "6:shiny"], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Unknown face flag"));
}

#[test]
fn four_faces_is_a_usage_error() {
    let res = run_cli(&["score", "6", "6", "6", "6"], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Whale Dice CLI"));
}
