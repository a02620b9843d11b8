use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
}

pub const ALL_POSITIONS: [Position; 4] = [Position::GK, Position::DF, Position::MF, Position::FW];

// Tokens are matched as substrings of the upper-cased text, so compound
// codes ("LCB", "RWF") resolve through their parts.
const GK_TOKENS: &[&str] = &["GK", "GOALKEEPER", "KEEPER"];
const DF_TOKENS: &[&str] = &["DF", "CB", "LB", "RB", "WB", "BACK", "DEFENDER"];
const FW_TOKENS: &[&str] = &["FW", "ST", "CF", "LW", "RW", "FORWARD", "STRIKER", "WING"];

// Whole words that contain a short code by accident ("MIDFIELDER" holds
// "DF", "FIRST" holds "ST"). They are blanked before matching.
const FALSE_HITS: &[&str] = &["MIDFIELD", "MIDFIELDER", "MIDFIELDERS", "FIRST"];

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| text.contains(t))
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map free-form position text ("DF (CB)", "RW", "Goalkeeper") to one of the
/// four position groups. Priority is GK, then defensive tokens, then
/// attacking tokens; anything else is a midfielder.
pub fn position_from_text(raw: &str) -> Position {
    let upper = raw.trim().to_uppercase();
    let text = upper
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty() && !FALSE_HITS.contains(w))
        .collect::<Vec<_>>()
        .join(" ");
    if contains_any(&text, GK_TOKENS) {
        return Position::GK;
    }
    if contains_any(&text, DF_TOKENS) {
        return Position::DF;
    }
    if contains_any(&text, FW_TOKENS) {
        return Position::FW;
    }
    Position::MF
}

#[cfg(test)]
mod tests {
    use super::{Position, position_from_text};

    #[test]
    fn short_codes_map_to_groups() {
        assert_eq!(position_from_text("GK"), Position::GK);
        assert_eq!(position_from_text("CB"), Position::DF);
        assert_eq!(position_from_text("RW"), Position::FW);
        assert_eq!(position_from_text("MF"), Position::MF);
    }

    #[test]
    fn compound_codes_match_through_their_parts() {
        assert_eq!(position_from_text("LCB"), Position::DF);
        assert_eq!(position_from_text("RCB"), Position::DF);
        assert_eq!(position_from_text("LWB"), Position::DF);
        assert_eq!(position_from_text("RWF"), Position::FW);
        assert_eq!(position_from_text("LWF"), Position::FW);
        assert_eq!(position_from_text("SS"), Position::MF);
        assert_eq!(position_from_text("Second Striker"), Position::FW);
    }

    #[test]
    fn priority_prefers_defender_over_forward() {
        // "DF,FW" hybrids resolve to the higher-priority group.
        assert_eq!(position_from_text("DF,FW"), Position::DF);
        assert_eq!(position_from_text("FW-MF (AM)"), Position::FW);
    }

    #[test]
    fn unknown_text_defaults_to_midfield() {
        assert_eq!(position_from_text(""), Position::MF);
        assert_eq!(position_from_text("DM"), Position::MF);
        assert_eq!(position_from_text("Attacking Midfielder"), Position::MF);
        assert_eq!(position_from_text("First choice"), Position::MF);
        assert_eq!(position_from_text("Defensive Midfielder"), Position::MF);
        assert_eq!(position_from_text("Midfield"), Position::MF);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(position_from_text("goalkeeper"), Position::GK);
        assert_eq!(position_from_text("Left Back"), Position::DF);
        assert_eq!(position_from_text("centre forward"), Position::FW);
        assert_eq!(position_from_text("Right Winger"), Position::FW);
        assert_eq!(position_from_text("Wing-Back"), Position::DF);
    }
}
