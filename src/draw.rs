use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::banner::AnimatedBanner;
use crate::components::banner_frames::BannerTheme;
use crate::components::bracket::{
    BracketGrid, BracketView, CONFERENCE_HEIGHT, CupFinalView, round_to_depth,
};
use crate::state::app_state::Pane;
use crate::ui::layout::LayoutAreas;
use playoff_engine::{Conference, ConferenceStage, CupStage};

static TABS: &[&str; 2] = &["Bracket", "Help"];

/// Side-by-side conference panes need at least this much width.
const WIDE_LAYOUT_MIN_WIDTH: u16 = 140;
const CUP_PANE_HEIGHT: u16 = 6;

const HELP_TEXT: &str = "\
g          generate a new random bracket (clears every pick)
1 / 2      pick the top / bottom team of the highlighted matchup
h l  ← →   move between round columns
j k  ↑ ↓   move between matchups in a round
Tab / c    cycle Eastern → Western → Stanley Cup Final
\"          toggle the log pane
f          toggle full screen
?          this help (Esc to leave)
q          quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        if app.state.show_intro {
            draw_intro(f, f.area(), app);
            return;
        }

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Bracket => draw_bracket(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Stanley Cup Playoffs ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, banner_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            theme: BannerTheme::Dark,
        },
        banner_area,
    );
    f.render_widget(
        Paragraph::new("Press g to draw a bracket, Enter to continue")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Bracket => 0,
        MenuItem::Help => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, key_legend, content, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(Paragraph::new(header_text(app)), header);
    f.render_widget(
        Paragraph::new("Keys: g=generate  1/2=pick  h/l=round  j/k=move  Tab=pane  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );
    draw_status(f, status, app);

    if !app.state.bracket.has_bracket() {
        f.render_widget(
            Paragraph::new("No bracket yet.\nPress g to generate one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let pane_height = CONFERENCE_HEIGHT + 2;
    if content.width >= WIDE_LAYOUT_MIN_WIDTH {
        let [conferences, cup] = Layout::vertical([
            Constraint::Length(pane_height),
            Constraint::Length(CUP_PANE_HEIGHT),
        ])
        .areas(content);
        let [east, west] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(conferences);
        draw_conference(f, east, app, Conference::Eastern, false, Borders::ALL);
        draw_conference(f, west, app, Conference::Western, true, Borders::ALL);
        draw_cup_final(f, cup, app);
    } else if content.height >= 2 * pane_height + CUP_PANE_HEIGHT {
        let [east, west, cup] = Layout::vertical([
            Constraint::Length(pane_height),
            Constraint::Length(pane_height),
            Constraint::Length(CUP_PANE_HEIGHT),
        ])
        .areas(content);
        draw_conference(f, east, app, Conference::Eastern, false, Borders::ALL);
        draw_conference(f, west, app, Conference::Western, false, Borders::ALL);
        draw_cup_final(f, cup, app);
    } else {
        // One pane at a time; Tab switches. The title rule is the only border
        // so a full conference still fits in CONFERENCE_HEIGHT + 1 rows.
        match app.state.bracket.pane.conference() {
            Some(conference) => draw_conference(f, content, app, conference, false, Borders::TOP),
            None => draw_cup_final(f, content, app),
        }
    }
}

fn header_text(app: &App) -> String {
    let bracket = &app.state.bracket;
    let mut text = format!("Stanley Cup Playoffs | {}", bracket.view_round.label());
    if let Some(at) = bracket.generated_at.as_deref() {
        text.push_str(&format!(" | bracket #{} drawn {at}", bracket.generated_count));
    }
    if let Some(seed) = bracket.controller.seed() {
        text.push_str(&format!(" | seed {seed}"));
    }
    if let Some(m) = bracket.selected_matchup() {
        text.push_str(&format!(" | 1: {}  2: {}", m.team_a, m.team_b));
    }
    text
}

fn pane_border(selected: bool) -> Color {
    if selected { Color::Yellow } else { Color::DarkGray }
}

fn draw_conference(
    f: &mut Frame,
    area: Rect,
    app: &App,
    conference: Conference,
    mirrored: bool,
    borders: Borders,
) {
    let bracket = &app.state.bracket;
    let is_selected = bracket.pane.conference() == Some(conference);
    let title = format!(
        " {} | {} ",
        conference.label(),
        stage_label(bracket.controller.stage(conference))
    );
    let block = default_border(pane_border(is_selected)).borders(borders).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grid = if mirrored {
        BracketGrid::compute_mirrored(inner.width)
    } else {
        BracketGrid::compute(inner.width)
    };
    let [first, second, last] = bracket.conference_slots(conference);
    let selected = is_selected.then(|| (round_to_depth(bracket.view_round), bracket.selected_game));

    f.render_widget(
        BracketView {
            rounds: [&first, &second, &last],
            grid: &grid,
            selected,
            theme: BannerTheme::Dark,
        },
        inner,
    );
}

fn draw_cup_final(f: &mut Frame, area: Rect, app: &App) {
    let controller = &app.state.bracket.controller;
    let is_selected = app.state.bracket.pane == Pane::CupFinal;
    let title = format!(" Stanley Cup Final | {} ", cup_stage_label(controller.cup_stage()));
    let block = default_border(pane_border(is_selected)).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    f.render_widget(
        CupFinalView {
            eastern: controller.conference_winner(Conference::Eastern),
            western: controller.conference_winner(Conference::Western),
            champion: controller.champion(),
            selected: is_selected,
            theme: BannerTheme::Dark,
        },
        inner,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(err) = app.state.last_error.as_deref() {
        (err.to_string(), Style::default().fg(Color::Red))
    } else if let Some(msg) = app.state.last_message.as_deref() {
        (msg.to_string(), Style::default().fg(Color::Green))
    } else {
        let controller = &app.state.bracket.controller;
        (
            format!(
                "East: {} | West: {} | Cup: {}",
                stage_label(controller.stage(Conference::Eastern)),
                stage_label(controller.stage(Conference::Western)),
                cup_stage_label(controller.cup_stage())
            ),
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn stage_label(stage: ConferenceStage) -> &'static str {
    match stage {
        ConferenceStage::NoBracket => "no bracket",
        ConferenceStage::Round1Open => "Round 1 open",
        ConferenceStage::Round2Open => "Round 2 open",
        ConferenceStage::FinalOpen => "Final open",
        ConferenceStage::Complete => "complete",
    }
}

fn cup_stage_label(stage: CupStage) -> &'static str {
    match stage {
        CupStage::Pending => "pending",
        CupStage::Open => "open",
        CupStage::Decided => "decided",
    }
}

fn draw_logs(f: &mut Frame, area: Rect) {
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Gray))
            .output_target(false)
            .output_file(false)
            .output_line(false),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use tui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let mut app = App::with_settings(AppSettings {
            seed: Some(3),
            ..AppSettings::default()
        });
        app.dismiss_intro();
        app
    }

    #[test]
    fn empty_bracket_prompts_for_generation() {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        let mut app = app();
        draw(&mut terminal, &mut app);
        assert!(screen_text(&terminal).contains("Press g to generate one."));
    }

    #[test]
    fn generated_bracket_shows_both_conferences() {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        let mut app = app();
        app.generate_bracket();
        draw(&mut terminal, &mut app);
        let text = screen_text(&terminal);
        assert!(text.contains("Eastern Conference"));
        assert!(text.contains("Western Conference"));
        assert!(text.contains("STANLEY CUP FINAL"));
        assert!(text.contains("seed 3"));
    }

    #[test]
    fn short_terminal_shows_the_whole_selected_conference() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app();
        app.generate_bracket();
        app.bracket_cycle_pane();
        for _ in 0..3 {
            app.bracket_game_down();
        }
        draw(&mut terminal, &mut app);

        let last = app.state.bracket.controller.round1_matchups(Conference::Western).unwrap()[3]
            .team_b
            .to_string();
        let prefix: String = last.chars().take(15).collect();
        let text = screen_text(&terminal);
        let rows: Vec<&str> = text.lines().collect();
        // Skip tabs, the bracket border, header and legend; stop before the status line.
        assert!(rows[6..22].iter().any(|row| row.contains(&prefix)), "{text}");
        assert!(text.contains("Western Conference"));
        assert!(!text.contains("Eastern Conference"));
    }

    #[test]
    fn header_includes_generation_count() {
        let mut app = app();
        app.generate_bracket();
        app.generate_bracket();
        assert!(header_text(&app).contains("bracket #2"));
    }
}
