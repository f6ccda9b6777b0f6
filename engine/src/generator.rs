//! Random bracket generation.
//!
//! Each conference draws three seeds per division and two wildcards from the
//! teams its divisions left over. Draws are shuffles of the whole pool, so
//! every team in a pool is equally likely and no team is drawn twice.

use crate::roster::{self, ConferenceRoster, DIVISION_SIZE, Division};
use crate::{Bracket, Conference, Matchup, SeedLabel, Team};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const DIVISION_SEEDS: usize = 3;
const LEFTOVERS: usize = DIVISION_SIZE - DIVISION_SEEDS;

/// Owns the randomness source used for every "new bracket" request.
#[derive(Debug, Clone)]
pub struct BracketGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl Default for BracketGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl BracketGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Reproducible generator: the same seed yields the same sequence of brackets.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn generate(&mut self) -> Bracket {
        generate_bracket(&mut self.rng)
    }
}

/// Draw a full bracket from the fixed league roster.
pub fn generate_bracket<R: Rng + ?Sized>(rng: &mut R) -> Bracket {
    let bracket = Bracket {
        eastern: conference_matchups(roster::conference_roster(Conference::Eastern), rng),
        western: conference_matchups(roster::conference_roster(Conference::Western), rng),
    };
    debug!(
        "generated bracket: east [{}] west [{}]",
        summary(&bracket.eastern),
        summary(&bracket.western)
    );
    bracket
}

/// Seeds and leftovers of one division, in draw order.
struct DivisionDraw {
    abbrev: char,
    seeds: [&'static str; DIVISION_SEEDS],
    leftovers: [&'static str; LEFTOVERS],
}

impl DivisionDraw {
    fn seed(&self, rank: usize) -> (Team, SeedLabel) {
        (
            Team::new(self.seeds[rank - 1]),
            SeedLabel::Division {
                abbrev: self.abbrev,
                rank: rank as u8,
            },
        )
    }
}

fn draw_division<R: Rng + ?Sized>(division: &Division, rng: &mut R) -> DivisionDraw {
    let mut teams = division.teams;
    teams.shuffle(rng);

    let mut seeds = [""; DIVISION_SEEDS];
    let mut leftovers = [""; LEFTOVERS];
    seeds.copy_from_slice(&teams[..DIVISION_SEEDS]);
    leftovers.copy_from_slice(&teams[DIVISION_SEEDS..]);

    DivisionDraw {
        abbrev: division.abbrev,
        seeds,
        leftovers,
    }
}

/// Fixed pairing: D1-1 vs WC2, D1-2 vs D1-3, D2-1 vs WC1, D2-2 vs D2-3.
fn conference_matchups<R: Rng + ?Sized>(conference: &ConferenceRoster, rng: &mut R) -> [Matchup; 4] {
    let [first_division, second_division] = &conference.divisions;
    let first = draw_division(first_division, rng);
    let second = draw_division(second_division, rng);

    let mut pool = [""; 2 * LEFTOVERS];
    pool[..LEFTOVERS].copy_from_slice(&first.leftovers);
    pool[LEFTOVERS..].copy_from_slice(&second.leftovers);
    pool.shuffle(rng);
    let wildcard = |n: u8| (Team::new(pool[usize::from(n) - 1]), SeedLabel::Wildcard(n));

    let pair = |(team_a, seed_a): (Team, SeedLabel), (team_b, seed_b): (Team, SeedLabel)| {
        Matchup::seeded(team_a, seed_a, team_b, seed_b)
    };

    [
        pair(first.seed(1), wildcard(2)),
        pair(first.seed(2), first.seed(3)),
        pair(second.seed(1), wildcard(1)),
        pair(second.seed(2), second.seed(3)),
    ]
}

fn summary(matchups: &[Matchup; 4]) -> String {
    matchups
        .iter()
        .map(|m| {
            format!(
                "{} {} v {} {}",
                m.seed_a.map(|s| s.to_string()).unwrap_or_default(),
                m.team_a,
                m.seed_b.map(|s| s.to_string()).unwrap_or_default(),
                m.team_b
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::conference_roster;
    use std::collections::{HashMap, HashSet};

    fn brackets(count: u64) -> impl Iterator<Item = Bracket> {
        (0..count).map(|seed| BracketGenerator::seeded(seed).generate())
    }

    fn division_seeds(bracket: &Bracket, conference: Conference) -> HashMap<char, Vec<(u8, Team)>> {
        let mut by_division: HashMap<char, Vec<(u8, Team)>> = HashMap::new();
        for m in bracket.conference(conference) {
            for (team, seed) in [(&m.team_a, m.seed_a), (&m.team_b, m.seed_b)] {
                if let Some(SeedLabel::Division { abbrev, rank }) = seed {
                    by_division.entry(abbrev).or_default().push((rank, team.clone()));
                }
            }
        }
        by_division
    }

    fn wildcards(bracket: &Bracket, conference: Conference) -> Vec<(u8, Team)> {
        bracket
            .conference(conference)
            .iter()
            .flat_map(|m| [(&m.team_a, m.seed_a), (&m.team_b, m.seed_b)])
            .filter_map(|(team, seed)| match seed {
                Some(SeedLabel::Wildcard(n)) => Some((n, team.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn each_conference_draws_eight_distinct_teams_from_its_roster() {
        for bracket in brackets(200) {
            let mut seen_anywhere = HashSet::new();
            for conference in Conference::ALL {
                let roster = conference_roster(conference);
                let teams: HashSet<&Team> = bracket.teams(conference).collect();
                assert_eq!(teams.len(), 8);
                assert!(teams.iter().all(|t| roster.contains(t)));
                for team in teams {
                    assert!(seen_anywhere.insert(team.clone()), "{team} drawn twice");
                }
            }
        }
    }

    #[test]
    fn three_seeds_per_division_and_two_wildcards_per_conference() {
        for bracket in brackets(200) {
            for conference in Conference::ALL {
                let roster = conference_roster(conference);
                let seeds = division_seeds(&bracket, conference);
                assert_eq!(seeds.len(), 2);
                for division in &roster.divisions {
                    let mut drawn = seeds[&division.abbrev].clone();
                    drawn.sort();
                    let ranks: Vec<u8> = drawn.iter().map(|(rank, _)| *rank).collect();
                    assert_eq!(ranks, vec![1, 2, 3]);
                    assert!(drawn.iter().all(|(_, team)| division.contains(team)));
                }

                let wild = wildcards(&bracket, conference);
                let mut numbers: Vec<u8> = wild.iter().map(|(n, _)| *n).collect();
                numbers.sort();
                assert_eq!(numbers, vec![1, 2]);
                for (_, team) in &wild {
                    assert!(roster.contains(team));
                    assert!(
                        seeds.values().flatten().all(|(_, seeded)| seeded != team),
                        "wildcard {team} is also a division seed"
                    );
                }
            }
        }
    }

    #[test]
    fn pairing_follows_fixed_seed_policy() {
        let bracket = BracketGenerator::seeded(42).generate();
        let labels: Vec<(String, String)> = bracket
            .eastern
            .iter()
            .map(|m| (m.seed_a.unwrap().to_string(), m.seed_b.unwrap().to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("A1".to_string(), "WC2".to_string()),
                ("A2".to_string(), "A3".to_string()),
                ("M1".to_string(), "WC1".to_string()),
                ("M2".to_string(), "M3".to_string()),
            ]
        );
        let western: Vec<String> = bracket
            .western
            .iter()
            .flat_map(|m| [m.seed_a.unwrap().to_string(), m.seed_b.unwrap().to_string()])
            .collect();
        assert_eq!(western, ["C1", "WC2", "C2", "C3", "P1", "WC1", "P2", "P3"]);
    }

    #[test]
    fn same_seed_reproduces_the_same_brackets() {
        let mut a = BracketGenerator::seeded(2024);
        let mut b = BracketGenerator::seeded(2024);
        for _ in 0..5 {
            assert_eq!(a.generate(), b.generate());
        }
        assert_eq!(a.seed(), Some(2024));
    }

    #[test]
    fn every_team_can_be_seeded_or_wildcard() {
        let mut seeded = HashSet::new();
        let mut wild = HashSet::new();
        for bracket in brackets(400) {
            for conference in Conference::ALL {
                seeded.extend(division_seeds(&bracket, conference).into_values().flatten().map(|(_, t)| t));
                wild.extend(wildcards(&bracket, conference).into_iter().map(|(_, t)| t));
            }
        }
        assert_eq!(seeded.len(), 32);
        assert_eq!(wild.len(), 32);
    }

    #[test]
    fn generate_bracket_accepts_any_rng() {
        let mut rng = StdRng::seed_from_u64(9);
        let bracket = generate_bracket(&mut rng);
        assert_eq!(bracket.teams(Conference::Western).count(), 8);
    }
}
