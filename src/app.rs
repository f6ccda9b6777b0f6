use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, PickSide};
use log::info;
use playoff_engine::BracketGenerator;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Bracket,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let app = Self::with_settings(AppSettings::load());

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let generator = match settings.seed {
            Some(seed) => BracketGenerator::seeded(seed),
            None => BracketGenerator::from_entropy(),
        };
        Self {
            state: AppState::new(generator),
            settings,
        }
    }

    // -----------------------------------------------------------------------
    // Bracket actions
    // -----------------------------------------------------------------------

    pub fn generate_bracket(&mut self) {
        self.state.bracket.generate();
        self.state.last_error = None;
        let count = self.state.bracket.generated_count;
        self.state.last_message = Some(format!("Bracket #{count} generated"));
        info!("bracket #{count} generated");
    }

    pub fn pick(&mut self, side: PickSide) {
        match self.state.bracket.pick(side) {
            Ok(team) => {
                let message = self.state.bracket.controller.champion().map_or_else(
                    || format!("{team} advances"),
                    |champion| format!("{champion} win the Stanley Cup!"),
                );
                self.state.last_error = None;
                self.state.last_message = Some(message);
            }
            Err(e) => {
                self.state.last_message = None;
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    // -----------------------------------------------------------------------
    // Bracket navigation: delegated to BracketState
    // -----------------------------------------------------------------------

    pub fn bracket_next_round(&mut self) {
        self.state.bracket.navigate_round_next();
    }

    pub fn bracket_prev_round(&mut self) {
        self.state.bracket.navigate_round_prev();
    }

    pub fn bracket_game_down(&mut self) {
        self.state.bracket.navigate_game_down();
    }

    pub fn bracket_game_up(&mut self) {
        self.state.bracket.navigate_game_up();
    }

    pub fn bracket_cycle_pane(&mut self) {
        self.state.bracket.cycle_pane();
    }

    // -----------------------------------------------------------------------
    // Animation tick: called every 80ms from AnimationTick event
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playoff_engine::{Conference, CupStage};

    fn app() -> App {
        App::with_settings(AppSettings {
            seed: Some(2025),
            ..AppSettings::default()
        })
    }

    #[test]
    fn seeded_settings_give_reproducible_brackets() {
        let mut a = app();
        let mut b = app();
        a.generate_bracket();
        b.generate_bracket();
        assert_eq!(
            a.state.bracket.controller.bracket(),
            b.state.bracket.controller.bracket()
        );
        assert_eq!(a.state.bracket.controller.seed(), Some(2025));
    }

    #[test]
    fn pick_before_generate_sets_error() {
        let mut app = app();
        app.pick(PickSide::Top);
        assert_eq!(
            app.state.last_error.as_deref(),
            Some("no bracket has been generated yet")
        );
        assert!(app.state.last_message.is_none());
    }

    #[test]
    fn accepted_pick_clears_error() {
        let mut app = app();
        app.pick(PickSide::Top);
        app.generate_bracket();
        app.pick(PickSide::Bottom);
        assert!(app.state.last_error.is_none());
        assert!(app.state.last_message.as_deref().unwrap().ends_with("advances"));
    }

    #[test]
    fn full_run_crowns_a_champion() {
        let mut app = app();
        app.generate_bracket();
        for _ in 0..7 {
            app.pick(PickSide::Top);
        }
        app.bracket_cycle_pane();
        for _ in 0..7 {
            app.pick(PickSide::Bottom);
        }
        app.bracket_cycle_pane();
        app.pick(PickSide::Top);

        let controller = &app.state.bracket.controller;
        assert_eq!(controller.cup_stage(), CupStage::Decided);
        let east = controller.conference_winner(Conference::Eastern).cloned();
        assert_eq!(controller.champion(), east.as_ref());
        assert!(app.state.last_message.as_deref().unwrap().contains("Stanley Cup"));
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Help);
        assert_eq!(app.state.active_tab, MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Bracket);
    }
}
