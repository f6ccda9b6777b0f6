//! Winner selection across rounds.
//!
//! Only first-round matchups are stored. Later matchups are derived from the
//! previous round's winners whenever they are asked for, and only once that
//! round is fully decided.

use crate::generator::BracketGenerator;
use crate::{Bracket, Conference, Matchup, PickError, PickResult, RoundKind, Team};
use log::{info, warn};

/// Where a conference stands in its bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConferenceStage {
    NoBracket,
    Round1Open,
    Round2Open,
    FinalOpen,
    Complete,
}

/// Where the league-wide Cup Final stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CupStage {
    /// At least one conference has no winner yet.
    Pending,
    Open,
    Decided,
}

/// Winners recorded for one conference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceProgress {
    round1: [Option<Team>; 4],
    round2: [Option<Team>; 2],
    final_winner: Option<Team>,
}

static UNSET: ConferenceProgress = ConferenceProgress {
    round1: [None, None, None, None],
    round2: [None, None],
    final_winner: None,
};

impl ConferenceProgress {
    pub fn round1(&self) -> &[Option<Team>; 4] {
        &self.round1
    }

    pub fn round2(&self) -> &[Option<Team>; 2] {
        &self.round2
    }

    pub fn final_winner(&self) -> Option<&Team> {
        self.final_winner.as_ref()
    }

    /// `(W0 v W1, W2 v W3)` once all four first-round winners are in.
    pub fn round2_matchups(&self) -> Option<[Matchup; 2]> {
        let [Some(w0), Some(w1), Some(w2), Some(w3)] = &self.round1 else {
            return None;
        };
        Some([
            Matchup::unseeded(w0.clone(), w1.clone()),
            Matchup::unseeded(w2.clone(), w3.clone()),
        ])
    }

    pub fn final_matchup(&self) -> Option<Matchup> {
        let [Some(w0), Some(w1)] = &self.round2 else {
            return None;
        };
        Some(Matchup::unseeded(w0.clone(), w1.clone()))
    }

    pub fn stage(&self) -> ConferenceStage {
        if self.final_winner.is_some() {
            ConferenceStage::Complete
        } else if self.round2.iter().all(Option::is_some) {
            ConferenceStage::FinalOpen
        } else if self.round1.iter().all(Option::is_some) {
            ConferenceStage::Round2Open
        } else {
            ConferenceStage::Round1Open
        }
    }

    fn slot(&self, round: RoundKind, index: usize) -> Option<&Option<Team>> {
        match round {
            RoundKind::First => self.round1.get(index),
            RoundKind::Second => self.round2.get(index),
            RoundKind::ConferenceFinal if index == 0 => Some(&self.final_winner),
            _ => None,
        }
    }

    fn slot_mut(&mut self, round: RoundKind, index: usize) -> Option<&mut Option<Team>> {
        match round {
            RoundKind::First => self.round1.get_mut(index),
            RoundKind::Second => self.round2.get_mut(index),
            RoundKind::ConferenceFinal if index == 0 => Some(&mut self.final_winner),
            _ => None,
        }
    }
}

/// Everything tied to one generated bracket. Replaced as a whole on regeneration.
#[derive(Debug, Clone)]
struct Session {
    bracket: Bracket,
    conferences: [ConferenceProgress; 2],
    champion: Option<Team>,
}

impl Session {
    fn new(bracket: Bracket) -> Self {
        Self {
            bracket,
            conferences: Default::default(),
            champion: None,
        }
    }

    fn progress(&self, conference: Conference) -> &ConferenceProgress {
        &self.conferences[conference.index()]
    }

    fn cup_final_matchup(&self) -> Option<Matchup> {
        let east = self.progress(Conference::Eastern).final_winner.clone()?;
        let west = self.progress(Conference::Western).final_winner.clone()?;
        Some(Matchup::unseeded(east, west))
    }

    fn matchup(&self, conference: Conference, round: RoundKind, index: usize) -> PickResult<Matchup> {
        if index >= round.matchup_count() {
            return Err(PickError::UnknownMatchup { round, index });
        }
        let progress = self.progress(conference);
        let derived = match round {
            RoundKind::First => self.bracket.conference(conference).get(index).cloned(),
            RoundKind::Second => progress
                .round2_matchups()
                .and_then(|m| m.into_iter().nth(index)),
            RoundKind::ConferenceFinal => progress.final_matchup(),
            RoundKind::CupFinal => self.cup_final_matchup(),
        };
        derived.ok_or(PickError::PrerequisiteIncomplete { round })
    }

    fn record(&mut self, conference: Conference, round: RoundKind, index: usize, team: Team) -> PickResult<()> {
        let matchup = self.matchup(conference, round, index)?;
        let slot = match round {
            RoundKind::CupFinal => Some(&mut self.champion),
            _ => self.conferences[conference.index()].slot_mut(round, index),
        }
        .ok_or(PickError::UnknownMatchup { round, index })?;

        if slot.is_some() {
            return Err(PickError::AlreadyDecided { round, index });
        }
        if !matchup.contains(&team) {
            return Err(PickError::InvalidSelection { round, team });
        }
        *slot = Some(team);
        Ok(())
    }
}

/// Holds the current bracket and every winner picked in it.
#[derive(Debug, Clone, Default)]
pub struct BracketProgressionController {
    generator: BracketGenerator,
    session: Option<Session>,
}

impl BracketProgressionController {
    /// A controller with no bracket yet; call [`Self::regenerate`] to draw one.
    pub fn new(generator: BracketGenerator) -> Self {
        Self {
            generator,
            session: None,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.generator.seed()
    }

    /// Draw a new bracket and discard every previous pick.
    pub fn regenerate(&mut self) -> &Bracket {
        let session = Session::new(self.generator.generate());
        info!("new bracket generated");
        &self.session.insert(session).bracket
    }

    pub fn record_round1_winner(&mut self, conference: Conference, index: usize, team: Team) -> PickResult<()> {
        self.record_winner(conference, RoundKind::First, index, team)
    }

    pub fn record_round2_winner(&mut self, conference: Conference, index: usize, team: Team) -> PickResult<()> {
        self.record_winner(conference, RoundKind::Second, index, team)
    }

    pub fn record_conference_final_winner(&mut self, conference: Conference, team: Team) -> PickResult<()> {
        self.record_winner(conference, RoundKind::ConferenceFinal, 0, team)
    }

    /// Record the Stanley Cup winner. Only one of the two conference winners is accepted.
    pub fn record_champion(&mut self, team: Team) -> PickResult<()> {
        self.record_winner(Conference::Eastern, RoundKind::CupFinal, 0, team)
    }

    /// Record the winner of matchup `index` in `round`. `conference` is ignored for the Cup Final.
    pub fn record_winner(
        &mut self,
        conference: Conference,
        round: RoundKind,
        index: usize,
        team: Team,
    ) -> PickResult<()> {
        let scope = if round.is_conference_round() {
            conference.short_label()
        } else {
            "League"
        };
        let shown = team.clone();
        let result = match self.session.as_mut() {
            Some(session) => session.record(conference, round, index, team),
            None => Err(PickError::NoBracket),
        };
        match &result {
            Ok(()) => info!("{scope} {round}: {shown} advances"),
            Err(err) => warn!("{scope} {round}: rejected pick of {shown}: {err}"),
        }
        result
    }

    // -----------------------------------------------------------------------
    // Read-only projections
    // -----------------------------------------------------------------------

    pub fn bracket(&self) -> Option<&Bracket> {
        self.session.as_ref().map(|s| &s.bracket)
    }

    /// Picks for one conference. All slots read as unset before the first bracket.
    pub fn progress(&self, conference: Conference) -> &ConferenceProgress {
        self.session
            .as_ref()
            .map(|s| s.progress(conference))
            .unwrap_or(&UNSET)
    }

    pub fn round1_matchups(&self, conference: Conference) -> Option<&[Matchup; 4]> {
        self.bracket().map(|b| b.conference(conference))
    }

    pub fn round1_winners(&self, conference: Conference) -> &[Option<Team>; 4] {
        self.progress(conference).round1()
    }

    pub fn round2_matchups(&self, conference: Conference) -> Option<[Matchup; 2]> {
        self.progress(conference).round2_matchups()
    }

    pub fn round2_winners(&self, conference: Conference) -> &[Option<Team>; 2] {
        self.progress(conference).round2()
    }

    pub fn conference_final_matchup(&self, conference: Conference) -> Option<Matchup> {
        self.progress(conference).final_matchup()
    }

    pub fn conference_winner(&self, conference: Conference) -> Option<&Team> {
        self.progress(conference).final_winner()
    }

    /// Eastern winner vs Western winner, once both exist.
    pub fn cup_final_matchup(&self) -> Option<Matchup> {
        self.session.as_ref()?.cup_final_matchup()
    }

    pub fn champion(&self) -> Option<&Team> {
        self.session.as_ref()?.champion.as_ref()
    }

    /// The matchup at `index` in `round`, if it is already known.
    pub fn matchup_of(&self, conference: Conference, round: RoundKind, index: usize) -> Option<Matchup> {
        self.session.as_ref()?.matchup(conference, round, index).ok()
    }

    pub fn winner_of(&self, conference: Conference, round: RoundKind, index: usize) -> Option<&Team> {
        match round {
            RoundKind::CupFinal if index == 0 => self.champion(),
            _ => self.progress(conference).slot(round, index)?.as_ref(),
        }
    }

    pub fn stage(&self, conference: Conference) -> ConferenceStage {
        match &self.session {
            Some(session) => session.progress(conference).stage(),
            None => ConferenceStage::NoBracket,
        }
    }

    pub fn cup_stage(&self) -> CupStage {
        match &self.session {
            Some(session) if session.champion.is_some() => CupStage::Decided,
            Some(session) if session.cup_final_matchup().is_some() => CupStage::Open,
            _ => CupStage::Pending,
        }
    }
}
