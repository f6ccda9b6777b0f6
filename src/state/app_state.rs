use crate::app::MenuItem;
use crate::components::bracket::GameSlot;
use chrono::Local;
use playoff_engine::{
    BracketGenerator, BracketProgressionController, Conference, Matchup, PickError, PickResult,
    RoundKind, Team,
};

// ---------------------------------------------------------------------------
// Banner animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index into the puck frames, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter. Drives the puck's slide across the ice.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count;
    }
}

// ---------------------------------------------------------------------------
// Bracket state
// ---------------------------------------------------------------------------

/// Which part of the bracket the cursor is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Eastern,
    Western,
    CupFinal,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Eastern => Pane::Western,
            Pane::Western => Pane::CupFinal,
            Pane::CupFinal => Pane::Eastern,
        }
    }

    pub fn conference(self) -> Option<Conference> {
        match self {
            Pane::Eastern => Some(Conference::Eastern),
            Pane::Western => Some(Conference::Western),
            Pane::CupFinal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSide {
    /// First listed team of the highlighted matchup.
    Top,
    Bottom,
}

#[derive(Debug)]
pub struct BracketState {
    pub controller: BracketProgressionController,
    pub pane: Pane,
    /// Round column the cursor is on. Always `CupFinal` while `pane` is the Cup Final.
    pub view_round: RoundKind,
    pub selected_game: usize,
    /// Local time the current bracket was drawn.
    pub generated_at: Option<String>,
    pub generated_count: u32,
}

impl BracketState {
    pub fn new(generator: BracketGenerator) -> Self {
        Self {
            controller: BracketProgressionController::new(generator),
            pane: Pane::default(),
            view_round: RoundKind::First,
            selected_game: 0,
            generated_at: None,
            generated_count: 0,
        }
    }

    /// Draw a fresh bracket and put the cursor back on the first Eastern matchup.
    pub fn generate(&mut self) {
        self.controller.regenerate();
        self.generated_count += 1;
        self.generated_at = Some(Local::now().format("%H:%M:%S").to_string());
        self.pane = Pane::Eastern;
        self.view_round = RoundKind::First;
        self.selected_game = 0;
    }

    pub fn has_bracket(&self) -> bool {
        self.controller.bracket().is_some()
    }

    pub fn navigate_round_next(&mut self) {
        if let Some(next) = self.view_round.next()
            && next.is_conference_round()
        {
            self.view_round = next;
            self.selected_game = 0;
        }
    }

    pub fn navigate_round_prev(&mut self) {
        if self.pane == Pane::CupFinal {
            return;
        }
        if let Some(prev) = self.view_round.prev() {
            self.view_round = prev;
            self.selected_game = 0;
        }
    }

    pub fn navigate_game_down(&mut self) {
        let max = self.view_round.matchup_count().saturating_sub(1);
        if self.selected_game < max {
            self.selected_game += 1;
        }
    }

    pub fn navigate_game_up(&mut self) {
        self.selected_game = self.selected_game.saturating_sub(1);
    }

    pub fn cycle_pane(&mut self) {
        self.pane = self.pane.next();
        self.selected_game = 0;
        self.view_round = match self.pane {
            Pane::CupFinal => RoundKind::CupFinal,
            _ => self.open_round(),
        };
    }

    /// `(conference, round, index)` of the highlighted matchup.
    pub fn selection(&self) -> (Conference, RoundKind, usize) {
        match self.pane.conference() {
            Some(conference) => (conference, self.view_round, self.selected_game),
            None => (Conference::Eastern, RoundKind::CupFinal, 0),
        }
    }

    pub fn selected_matchup(&self) -> Option<Matchup> {
        let (conference, round, index) = self.selection();
        self.controller.matchup_of(conference, round, index)
    }

    /// Pick one side of the highlighted matchup as its winner.
    pub fn pick(&mut self, side: PickSide) -> PickResult<Team> {
        let (conference, round, index) = self.selection();
        let Some(matchup) = self.controller.matchup_of(conference, round, index) else {
            return Err(if self.has_bracket() {
                PickError::PrerequisiteIncomplete { round }
            } else {
                PickError::NoBracket
            });
        };
        let team = match side {
            PickSide::Top => matchup.team_a,
            PickSide::Bottom => matchup.team_b,
        };
        self.controller
            .record_winner(conference, round, index, team.clone())?;
        self.advance_cursor();
        Ok(team)
    }

    /// Game slots for the three round columns of one conference.
    pub fn conference_slots(&self, conference: Conference) -> [Vec<GameSlot>; 3] {
        let column = |round: RoundKind| -> Vec<GameSlot> {
            (0..round.matchup_count())
                .map(|index| GameSlot {
                    matchup: self.controller.matchup_of(conference, round, index),
                    winner: self.controller.winner_of(conference, round, index).cloned(),
                })
                .collect()
        };
        [
            column(RoundKind::First),
            column(RoundKind::Second),
            column(RoundKind::ConferenceFinal),
        ]
    }

    /// First round of the current pane that still has an undecided matchup.
    fn open_round(&self) -> RoundKind {
        let Some(conference) = self.pane.conference() else {
            return RoundKind::CupFinal;
        };
        [RoundKind::First, RoundKind::Second, RoundKind::ConferenceFinal]
            .into_iter()
            .find(|round| {
                (0..round.matchup_count())
                    .any(|i| self.controller.winner_of(conference, *round, i).is_none())
            })
            .unwrap_or(RoundKind::ConferenceFinal)
    }

    /// After a pick, move to the next undecided matchup of the same round, or on
    /// to the next round once this one is complete.
    fn advance_cursor(&mut self) {
        let Some(conference) = self.pane.conference() else {
            return;
        };
        let round = self.view_round;
        let next_open = (0..round.matchup_count())
            .find(|i| self.controller.winner_of(conference, round, *i).is_none());
        match next_open {
            Some(index) => self.selected_game = index,
            None => {
                let open = self.open_round();
                if open != round {
                    self.view_round = open;
                    self.selected_game = 0;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// Feedback for the last accepted action.
    pub last_message: Option<String>,
    pub bracket: BracketState,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new(generator: BracketGenerator) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_intro: true,
            show_logs: false,
            last_error: None,
            last_message: None,
            bracket: BracketState::new(generator),
            animation: AnimationState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated() -> BracketState {
        let mut state = BracketState::new(BracketGenerator::seeded(11));
        state.generate();
        state
    }

    #[test]
    fn pick_without_bracket_reports_no_bracket() {
        let mut state = BracketState::new(BracketGenerator::seeded(11));
        assert_eq!(state.pick(PickSide::Top), Err(PickError::NoBracket));
    }

    #[test]
    fn pick_moves_cursor_to_next_open_matchup() {
        let mut state = generated();
        let first = state.selected_matchup().unwrap();
        assert_eq!(state.pick(PickSide::Bottom), Ok(first.team_b.clone()));
        assert_eq!(state.selected_game, 1);
        assert_eq!(
            state.controller.round1_winners(Conference::Eastern)[0].as_ref(),
            Some(&first.team_b)
        );
    }

    #[test]
    fn completing_a_round_opens_the_next_column() {
        let mut state = generated();
        for _ in 0..4 {
            state.pick(PickSide::Top).unwrap();
        }
        assert_eq!(state.view_round, RoundKind::Second);
        assert_eq!(state.selected_game, 0);

        state.pick(PickSide::Top).unwrap();
        state.pick(PickSide::Bottom).unwrap();
        assert_eq!(state.view_round, RoundKind::ConferenceFinal);
        state.pick(PickSide::Top).unwrap();
        assert!(state.controller.conference_winner(Conference::Eastern).is_some());
    }

    #[test]
    fn later_round_pick_before_prerequisites_is_rejected() {
        let mut state = generated();
        state.navigate_round_next();
        assert_eq!(state.view_round, RoundKind::Second);
        assert_eq!(
            state.pick(PickSide::Top),
            Err(PickError::PrerequisiteIncomplete { round: RoundKind::Second })
        );
    }

    #[test]
    fn cursor_stays_inside_the_round() {
        let mut state = generated();
        for _ in 0..10 {
            state.navigate_game_down();
        }
        assert_eq!(state.selected_game, 3);
        state.navigate_round_next();
        state.navigate_round_next();
        state.navigate_round_next();
        assert_eq!(state.view_round, RoundKind::ConferenceFinal);
        state.navigate_game_down();
        assert_eq!(state.selected_game, 0);
    }

    #[test]
    fn cycling_panes_reaches_the_cup_final() {
        let mut state = generated();
        state.cycle_pane();
        assert_eq!(state.pane, Pane::Western);
        assert_eq!(state.view_round, RoundKind::First);
        state.cycle_pane();
        assert_eq!(state.pane, Pane::CupFinal);
        assert_eq!(state.selection(), (Conference::Eastern, RoundKind::CupFinal, 0));
        assert_eq!(
            state.pick(PickSide::Top),
            Err(PickError::PrerequisiteIncomplete { round: RoundKind::CupFinal })
        );
        state.cycle_pane();
        assert_eq!(state.pane, Pane::Eastern);
    }

    #[test]
    fn regenerating_resets_cursor_and_slots() {
        let mut state = generated();
        state.pick(PickSide::Top).unwrap();
        state.cycle_pane();
        state.generate();
        assert_eq!(state.pane, Pane::Eastern);
        assert_eq!(state.generated_count, 2);
        let [first, second, last] = state.conference_slots(Conference::Eastern);
        assert_eq!(first.len(), 4);
        assert!(first.iter().all(|s| s.matchup.is_some() && s.winner.is_none()));
        assert!(second.iter().all(|s| s.matchup.is_none()));
        assert_eq!(last.len(), 1);
    }
}
