pub mod generator;
pub mod progression;
pub mod roster;

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub use generator::{BracketGenerator, generate_bracket};
pub use progression::{BracketProgressionController, ConferenceProgress, ConferenceStage, CupStage};

pub type PickResult<T> = Result<T, PickError>;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// A team, identified by its full name. Equality is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Team(String);

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Team {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Conference {
    Eastern,
    Western,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::Eastern, Conference::Western];

    pub fn label(&self) -> &'static str {
        match self {
            Conference::Eastern => "Eastern Conference",
            Conference::Western => "Western Conference",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Conference::Eastern => "East",
            Conference::Western => "West",
        }
    }

    /// Position of this conference in per-conference arrays.
    pub fn index(&self) -> usize {
        match self {
            Conference::Eastern => 0,
            Conference::Western => 1,
        }
    }
}

/// Bracket rounds, ordered from earliest to latest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RoundKind {
    #[default]
    First,
    Second,
    ConferenceFinal,
    CupFinal,
}

impl RoundKind {
    pub const ALL: [RoundKind; 4] = [
        RoundKind::First,
        RoundKind::Second,
        RoundKind::ConferenceFinal,
        RoundKind::CupFinal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoundKind::First => "Round 1",
            RoundKind::Second => "Round 2",
            RoundKind::ConferenceFinal => "Conference Final",
            RoundKind::CupFinal => "Stanley Cup Final",
        }
    }

    /// Matchups in this round for a single conference (the Cup Final is league-wide).
    pub fn matchup_count(&self) -> usize {
        match self {
            RoundKind::First => 4,
            RoundKind::Second => 2,
            RoundKind::ConferenceFinal | RoundKind::CupFinal => 1,
        }
    }

    pub fn is_conference_round(&self) -> bool {
        !matches!(self, RoundKind::CupFinal)
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            RoundKind::First => None,
            RoundKind::Second => Some(RoundKind::First),
            RoundKind::ConferenceFinal => Some(RoundKind::Second),
            RoundKind::CupFinal => Some(RoundKind::ConferenceFinal),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            RoundKind::First => Some(RoundKind::Second),
            RoundKind::Second => Some(RoundKind::ConferenceFinal),
            RoundKind::ConferenceFinal => Some(RoundKind::CupFinal),
            RoundKind::CupFinal => None,
        }
    }
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seed label shown next to a first-round entrant: `A1`, `M3`, `WC2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedLabel {
    /// Top-3 finisher of a division, `rank` in 1..=3.
    Division { abbrev: char, rank: u8 },
    /// Conference wildcard, 1 or 2.
    Wildcard(u8),
}

impl fmt::Display for SeedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedLabel::Division { abbrev, rank } => write!(f, "{abbrev}{rank}"),
            SeedLabel::Wildcard(n) => write!(f, "WC{n}"),
        }
    }
}

impl Serialize for SeedLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One pairing. Seed labels are only set on first-round matchups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchup {
    pub team_a: Team,
    pub team_b: Team,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_a: Option<SeedLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_b: Option<SeedLabel>,
}

impl Matchup {
    pub fn seeded(team_a: Team, seed_a: SeedLabel, team_b: Team, seed_b: SeedLabel) -> Self {
        Self {
            team_a,
            team_b,
            seed_a: Some(seed_a),
            seed_b: Some(seed_b),
        }
    }

    pub fn unseeded(team_a: Team, team_b: Team) -> Self {
        Self {
            team_a,
            team_b,
            seed_a: None,
            seed_b: None,
        }
    }

    pub fn contains(&self, team: &Team) -> bool {
        self.team_a == *team || self.team_b == *team
    }
}

/// Round-1 field of both conferences. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub eastern: [Matchup; 4],
    pub western: [Matchup; 4],
}

impl Bracket {
    pub fn conference(&self, conference: Conference) -> &[Matchup; 4] {
        match conference {
            Conference::Eastern => &self.eastern,
            Conference::Western => &self.western,
        }
    }

    /// Every team drawn into the given conference, in matchup order.
    pub fn teams(&self, conference: Conference) -> impl Iterator<Item = &Team> {
        self.conference(conference)
            .iter()
            .flat_map(|m| [&m.team_a, &m.team_b])
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejected winner selection. A rejected pick never changes any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("no bracket has been generated yet")]
    NoBracket,
    #[error("{round} is not open yet: the previous round is still undecided")]
    PrerequisiteIncomplete { round: RoundKind },
    #[error("{team} is not part of that {round} matchup")]
    InvalidSelection { round: RoundKind, team: Team },
    #[error("{round} has no matchup #{}", .index + 1)]
    UnknownMatchup { round: RoundKind, index: usize },
    #[error("{round} matchup #{} already has a winner", .index + 1)]
    AlreadyDecided { round: RoundKind, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_labels_render_like_the_bracket_sheet() {
        let div = SeedLabel::Division { abbrev: 'A', rank: 1 };
        assert_eq!(div.to_string(), "A1");
        assert_eq!(SeedLabel::Wildcard(2).to_string(), "WC2");
    }

    #[test]
    fn round_navigation_is_linear() {
        assert_eq!(RoundKind::First.prev(), None);
        assert_eq!(RoundKind::CupFinal.next(), None);
        for pair in RoundKind::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].prev(), Some(pair[0]));
        }
    }

    #[test]
    fn matchup_serializes_seed_labels_as_strings() {
        let m = Matchup::seeded(
            Team::new("Boston Bruins"),
            SeedLabel::Division { abbrev: 'A', rank: 2 },
            Team::new("Ottawa Senators"),
            SeedLabel::Division { abbrev: 'A', rank: 3 },
        );
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["team_a"], "Boston Bruins");
        assert_eq!(json["seed_a"], "A2");
        assert_eq!(json["seed_b"], "A3");

        let unseeded = serde_json::to_value(Matchup::unseeded(m.team_a, m.team_b)).unwrap();
        assert!(unseeded.get("seed_a").is_none());
    }

    #[test]
    fn pick_errors_use_one_based_matchup_numbers() {
        let err = PickError::UnknownMatchup { round: RoundKind::Second, index: 2 };
        assert_eq!(err.to_string(), "Round 2 has no matchup #3");
    }
}
