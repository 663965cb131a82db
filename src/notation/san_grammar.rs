//! Process-wide SAN and tag-line patterns, compiled once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

/// A complete movetext move token: castling or a piece move, optional
/// check/mate marker and an optional trailing annotation suffix.
pub static MOVETEXT_SAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(((O-O|O-O-O)|((P?|[RNBQK])[a-h]?[1-8]?x?[a-h][1-8](=[PRNBQK])?))(\+|#)?(!|\?|!!|\?\?|\?!|!\?)?)$",
    )
    .expect("movetext SAN pattern should compile")
});

/// Prefix of a piece move as the board engine reads it:
/// piece letter, origin hint, destination square and promotion suffix.
pub static BOARD_SAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(P?|[RNBQK])([a-h]?[1-8]?)?x?([a-h][1-8])(=[PRNBQK])?")
        .expect("board SAN pattern should compile")
});

/// A PGN tag pair line such as `[Event "Casual game"]`.
pub static TAG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[?\s*([A-Za-z0-9_]+)\s+"(.*)"\s*\]"#).expect("tag line pattern should compile")
});

#[cfg(test)]
mod tests {
    use super::{BOARD_SAN, MOVETEXT_SAN, TAG_LINE};

    #[test]
    fn movetext_pattern_accepts_common_moves() {
        for san in ["e4", "exd5", "Nbd7", "R1a3", "Qh4xe1+", "e8=Q#", "O-O", "O-O-O+", "Qxf7??", "Nf3!?"] {
            assert!(MOVETEXT_SAN.is_match(san), "{san} should match");
        }
        for san in ["Z9", "e9", "Nf3!!!", "xe4x", "O-O-O-O"] {
            assert!(!MOVETEXT_SAN.is_match(san), "{san} should not match");
        }
    }

    #[test]
    fn board_pattern_splits_hint_from_destination() {
        let caps = BOARD_SAN.captures("Nbd7").expect("Nbd7 should match");
        assert_eq!(&caps[1], "N");
        assert_eq!(caps.get(2).map_or("", |m| m.as_str()), "b");
        assert_eq!(&caps[3], "d7");

        let caps = BOARD_SAN.captures("e4").expect("e4 should match");
        assert_eq!(&caps[1], "");
        assert_eq!(caps.get(2).map_or("", |m| m.as_str()), "");
        assert_eq!(&caps[3], "e4");

        let caps = BOARD_SAN.captures("exd8=N+").expect("exd8=N+ should match");
        assert_eq!(caps.get(2).map_or("", |m| m.as_str()), "e");
        assert_eq!(caps.get(4).map(|m| m.as_str()), Some("=N"));
    }

    #[test]
    fn tag_line_captures_name_and_value() {
        let caps = TAG_LINE
            .captures("[White \"Morphy, Paul\"]\n")
            .expect("tag line should match");
        assert_eq!(&caps[1], "White");
        assert_eq!(&caps[2], "Morphy, Paul");
        assert!(TAG_LINE.captures("1. e4 e5").is_none());
    }
}
