use playoff_engine::{Matchup, RoundKind, SeedLabel, Team};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::components::banner_frames::{BannerColor, BannerTheme, resolve};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per game cell: top-team line, status line, bottom-team line.
pub const GAME_HEIGHT: u16 = 3;

/// Slot heights for each bracket depth (d=0 = Round 1 leaf, d=2 = Conference Final root).
/// Formula: SH[0] = GAME_HEIGHT; SH[d] = 2 * SH[d-1] + 1.
const SH: [u16; 3] = [
    GAME_HEIGHT,                   // Round 1:          3
    2 * GAME_HEIGHT + 1,           // Round 2:          7
    2 * (2 * GAME_HEIGHT + 1) + 1, // Conference Final: 15
];

/// Total terminal rows consumed by one conference bracket. Equals SH[2] = 15.
pub const CONFERENCE_HEIGHT: u16 = SH[2];

/// Width of the connector zone drawn between adjacent round columns.
pub const CONNECTOR_WIDTH: u16 = 3;

/// Maximum game cell width in wider terminals.
const CELL_W_FULL: u16 = 26;

const GAME_COUNTS: [usize; 3] = [4, 2, 1];
const ROUNDS: [RoundKind; 3] = [RoundKind::First, RoundKind::Second, RoundKind::ConferenceFinal];

// ---------------------------------------------------------------------------
// GameCell: pre-computed position for one game
// ---------------------------------------------------------------------------

/// Pre-computed layout position for one game within a conference bracket grid.
#[derive(Debug, Clone)]
pub struct GameCell {
    /// Row index of the status line (center of the 3-row cell), relative to the bracket origin.
    pub center_row: u16,
    /// Starting x-column for this game cell within the grid (origin-relative).
    pub col: u16,
    pub cell_width: u16,
    pub round: RoundKind,
    /// Index of this game within its round (0-based).
    pub game_idx: usize,
}

// ---------------------------------------------------------------------------
// BracketGrid: layout engine for one conference
// ---------------------------------------------------------------------------

/// Pre-computed layout for one 3-round conference bracket (Round 1 → Conference Final).
///
/// Column order left → right: Round 1 | conn | Round 2 | conn | Conference Final
#[derive(Debug, Clone)]
pub struct BracketGrid {
    /// All cells in depth-major order: Round 1 (4) + Round 2 (2) + Final (1) = 7 cells.
    pub cells: Vec<GameCell>,
    /// Starting x-column for each round column. Index: [0=Round 1, 1=Round 2, 2=Final].
    pub round_cols: [u16; 3],
    pub total_width: u16,
    pub cell_width: u16,
    /// When true, Round 1 is on the right and the Conference Final on the left.
    pub mirrored: bool,
}

impl BracketGrid {
    /// Compute the bracket layout for the given pane width.
    ///
    /// `3 * cell_width + 2 * CONNECTOR_WIDTH <= width`; cell width is capped at
    /// `CELL_W_FULL`.
    ///
    /// Center rows follow the triangle formula
    /// `center[d][i] = SH[d]/2 + i * (SH[d+1] - SH[d])`:
    ///   Round 1 (d=0): [1, 5, 9, 13]
    ///   Round 2 (d=1): [3, 11]
    ///   Final   (d=2): [7]
    pub fn compute(width: u16) -> Self {
        Self::compute_inner(width, false)
    }

    /// Round 1 on the right, for the right-hand conference pane.
    pub fn compute_mirrored(width: u16) -> Self {
        Self::compute_inner(width, true)
    }

    fn compute_inner(width: u16, mirrored: bool) -> Self {
        let connector_total = CONNECTOR_WIDTH * 2;
        let per_col = width.saturating_sub(connector_total) / 3;
        let cell_width: u16 = per_col.clamp(1, CELL_W_FULL);
        let stride = cell_width + CONNECTOR_WIDTH;
        let round_cols = if mirrored {
            [stride * 2, stride, 0u16]
        } else {
            [0u16, stride, stride * 2]
        };
        let total_width = stride * 2 + cell_width;

        let first_center = [SH[0] / 2, SH[1] / 2, SH[2] / 2]; // [1, 3, 7]
        let spacing: [u16; 3] = [SH[1] - SH[0], SH[2] - SH[1], 0];

        let mut cells = Vec::with_capacity(7);
        for d in 0..3usize {
            for i in 0..GAME_COUNTS[d] {
                cells.push(GameCell {
                    center_row: first_center[d] + i as u16 * spacing[d],
                    col: round_cols[d],
                    cell_width,
                    round: ROUNDS[d],
                    game_idx: i,
                });
            }
        }

        Self { cells, round_cols, total_width, cell_width, mirrored }
    }

    /// Cells for a specific depth (0=Round 1, 1=Round 2, 2=Conference Final).
    pub fn cells_for_depth(&self, depth: usize) -> &[GameCell] {
        const OFFSETS: [usize; 4] = [0, 4, 6, 7];
        &self.cells[OFFSETS[depth]..OFFSETS[depth + 1]]
    }
}

// ---------------------------------------------------------------------------
// BracketView widget
// ---------------------------------------------------------------------------

/// What one game cell shows: the matchup once it is known, and its winner once picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSlot {
    pub matchup: Option<Matchup>,
    pub winner: Option<Team>,
}

/// Renders one conference bracket (Round 1 → Conference Final).
pub struct BracketView<'a> {
    /// Game slots per depth: [Round 1 (4), Round 2 (2), Final (1)].
    pub rounds: [&'a [GameSlot]; 3],
    /// Pre-computed layout. Rebuild only on resize.
    pub grid: &'a BracketGrid,
    /// `(depth, game)` of the highlighted cell, if the cursor is in this pane.
    pub selected: Option<(usize, usize)>,
    pub theme: BannerTheme,
}

impl<'a> Widget for BracketView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < GAME_HEIGHT {
            return;
        }
        let area = Rect {
            x: area.x + area.width.saturating_sub(self.grid.total_width) / 2,
            width: area.width.min(self.grid.total_width),
            ..area
        };

        // Pass 1: game cells.
        for cell in &self.grid.cells {
            let depth = round_to_depth(cell.round);
            let slot = self.rounds[depth].get(cell.game_idx);
            let selected = self.selected == Some((depth, cell.game_idx));
            draw_game_cell(slot, cell, selected, area, self.theme, buf);
        }

        // Pass 2: connectors. Each parent at depth d+1 joins two children at depth d.
        for depth in 0..2usize {
            let child_cells = self.grid.cells_for_depth(depth);
            let parent_cells = self.grid.cells_for_depth(depth + 1);
            let conn_x_base = if self.grid.mirrored {
                area.x + self.grid.round_cols[depth].saturating_sub(CONNECTOR_WIDTH)
            } else {
                area.x + self.grid.round_cols[depth] + self.grid.cell_width
            };

            for (j, parent) in parent_cells.iter().enumerate() {
                draw_connector(
                    child_cells[2 * j].center_row,
                    parent.center_row,
                    child_cells[2 * j + 1].center_row,
                    conn_x_base,
                    area,
                    self.theme,
                    self.grid.mirrored,
                    buf,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CupFinalView widget
// ---------------------------------------------------------------------------

/// Renders the Stanley Cup Final as three side-by-side cells:
///
/// ```text
///            ── STANLEY CUP FINAL ──
///
///  East champion       Stanley Cup        West champion
///  Florida Panthers ── TBD ────────────── Dallas Stars
/// ```
pub struct CupFinalView<'a> {
    pub eastern: Option<&'a Team>,
    pub western: Option<&'a Team>,
    pub champion: Option<&'a Team>,
    pub selected: bool,
    pub theme: BannerTheme,
}

impl<'a> Widget for CupFinalView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let accent = resolve(BannerColor::Accent, self.theme);
        let dim = resolve(BannerColor::Dim, self.theme);

        let title = "── STANLEY CUP FINAL ──";
        let tx = area.x + area.width.saturating_sub(title.chars().count() as u16) / 2;
        buf.set_string(tx, area.y, title, accent);

        let cell_w: u16 = if area.width >= 80 { 24 } else { 18 };
        let gap: u16 = 4;
        let total_w = cell_w * 3 + gap * 2;
        if total_w + 2 > area.width || area.height < 4 {
            render_cup_compact(&self, area, buf);
            return;
        }

        let x0 = area.x + (area.width - total_w) / 2;
        let col_left = x0;
        let col_mid = x0 + cell_w + gap;
        let col_right = x0 + (cell_w + gap) * 2;
        let label_y = area.y + 2;
        let team_y = label_y + 1;

        let cells = [
            (col_left, "East champion", self.eastern),
            (col_mid, "Stanley Cup", self.champion),
            (col_right, "West champion", self.western),
        ];
        for (x, label, team) in cells {
            buf.set_string(x, label_y, label, dim);
            let name = team.map(Team::name).unwrap_or("TBD");
            let text: String = name.chars().take(cell_w as usize).collect();
            buf.set_string(x, team_y, text, self.team_style(team));
        }

        let limit_x = area.x + area.width;
        for range in [(col_left + cell_w)..col_mid, (col_mid + cell_w)..col_right] {
            for cx in range {
                if cx >= limit_x {
                    break;
                }
                put_char(buf, cx, team_y, '─', dim);
            }
        }
    }
}

impl CupFinalView<'_> {
    fn team_style(&self, team: Option<&Team>) -> Style {
        let is_champion = team.is_some() && team == self.champion;
        if is_champion {
            resolve(BannerColor::Winner, self.theme)
        } else if self.selected && team.is_some() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

/// Narrow-terminal fallback for the Cup Final: one line per entrant.
fn render_cup_compact(view: &CupFinalView, area: Rect, buf: &mut Buffer) {
    let width = area.width as usize;
    let rows = [
        ("E ", view.eastern),
        ("W ", view.western),
        ("* ", view.champion),
    ];
    for (dy, (prefix, team)) in rows.into_iter().enumerate() {
        let y = area.y + 1 + dy as u16;
        if y >= area.y + area.height {
            break;
        }
        let text = format!("{prefix}{}", team.map(Team::name).unwrap_or("TBD"));
        let clipped: String = text.chars().take(width).collect();
        buf.set_string(area.x, y, clipped, view.team_style(team));
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

pub fn round_to_depth(round: RoundKind) -> usize {
    match round {
        RoundKind::First => 0,
        RoundKind::Second => 1,
        RoundKind::ConferenceFinal => 2,
        RoundKind::CupFinal => 2,
    }
}

/// Bracket-relative row to absolute screen y. `None` if the row falls outside `area`.
fn screen_y(bracket_row: u16, area: Rect) -> Option<u16> {
    if bracket_row >= area.height {
        return None;
    }
    Some(area.y + bracket_row)
}

fn draw_game_cell(
    slot: Option<&GameSlot>,
    cell: &GameCell,
    selected: bool,
    area: Rect,
    theme: BannerTheme,
    buf: &mut Buffer,
) {
    let primary = resolve(BannerColor::Primary, theme);
    let winner_style = resolve(BannerColor::Winner, theme);
    let dim = resolve(BannerColor::Dim, theme);

    let x = area.x + cell.col;
    if x >= area.x + area.width {
        return;
    }
    let avail_w = (area.x + area.width).saturating_sub(x) as usize;

    let base_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Gray)
    };

    let matchup = slot.and_then(|s| s.matchup.as_ref());
    let winner = slot.and_then(|s| s.winner.as_ref());

    let top_row = cell.center_row.saturating_sub(1);
    let mid_row = cell.center_row;
    let bot_row = cell.center_row.saturating_add(1);

    for (bracket_row, slot_idx) in [(top_row, 0u8), (mid_row, 1), (bot_row, 2)] {
        let Some(sy) = screen_y(bracket_row, area) else {
            continue;
        };

        let width = cell.cell_width as usize;
        let (content, style) = match (slot_idx, matchup) {
            (1, _) => {
                let style = if matchup.is_some() && winner.is_none() { primary } else { dim };
                (format_status_line(matchup, winner, width), style)
            }
            (_, None) => (format_team_line(None, None, width), base_style),
            (_, Some(m)) => {
                let (team, seed) = if slot_idx == 0 {
                    (&m.team_a, m.seed_a)
                } else {
                    (&m.team_b, m.seed_b)
                };
                let style = if winner == Some(team) {
                    winner_style.add_modifier(Modifier::BOLD)
                } else if winner.is_some() {
                    dim
                } else {
                    base_style
                };
                (format_team_line(seed, Some(team), width), style)
            }
        };

        let text: String = content.chars().take(avail_w).collect();
        buf.set_string(x, sy, &text, style);
    }
}

/// Format a team line: `"[seed] [name          ]"`.
///
/// Total width = seed(3) + " " + name(width-4) = width.
fn format_team_line(seed: Option<SeedLabel>, team: Option<&Team>, width: usize) -> String {
    let seed = seed.map(|s| format!("{s:>3}")).unwrap_or_else(|| "   ".to_string());
    let name = team.map(Team::name).unwrap_or("TBD");
    let name_w = width.saturating_sub(4);
    let name_trunc: String = name.chars().take(name_w).collect();
    format!("{seed} {name_trunc:<name_w$}")
}

/// Format the center status row.
fn format_status_line(matchup: Option<&Matchup>, winner: Option<&Team>, width: usize) -> String {
    let raw = match (matchup, winner) {
        (None, _) => "    ···".to_string(),
        (Some(_), None) => "    1 / 2 to pick".to_string(),
        (Some(_), Some(_)) => "    ✓ decided".to_string(),
    };
    raw.chars().chain(std::iter::repeat(' ')).take(width).collect()
}

/// Draw box-drawing connectors between one parent and its two children.
///
/// ```text
///  child_top  ──┐         (col_a='─'  col_b='┐')
///               │         (col_b='│')
///  parent     ──├──       (col_a='─'  col_b='├'  col_c='─')
///               │         (col_b='│')
///  child_bot  ──┘         (col_a='─'  col_b='┘')
/// ```
#[allow(clippy::too_many_arguments)]
fn draw_connector(
    r_top: u16,
    r_mid: u16,
    r_bot: u16,
    conn_base_x: u16,
    area: Rect,
    theme: BannerTheme,
    mirrored: bool,
    buf: &mut Buffer,
) {
    let style = resolve(BannerColor::Dim, theme);
    let col_a = conn_base_x;
    let col_b = conn_base_x + 1;
    let col_c = conn_base_x + 2;
    let limit_x = area.x + area.width;

    macro_rules! put {
        ($x:expr, $row:expr, $ch:expr) => {
            if $x < limit_x {
                if let Some(sy) = screen_y($row, area) {
                    put_char(buf, $x, sy, $ch, style);
                }
            }
        };
    }

    if mirrored {
        // Children on the right, parent on the left.
        put!(col_b, r_top, '┌');
        put!(col_c, r_top, '─');
        for row in (r_top + 1)..r_mid {
            put!(col_b, row, '│');
        }
        put!(col_a, r_mid, '─');
        put!(col_b, r_mid, '┤');
        for row in (r_mid + 1)..r_bot {
            put!(col_b, row, '│');
        }
        put!(col_b, r_bot, '└');
        put!(col_c, r_bot, '─');
    } else {
        put!(col_a, r_top, '─');
        put!(col_b, r_top, '┐');
        for row in (r_top + 1)..r_mid {
            put!(col_b, row, '│');
        }
        put!(col_a, r_mid, '─');
        put!(col_b, r_mid, '├');
        put!(col_c, r_mid, '─');
        for row in (r_mid + 1)..r_bot {
            put!(col_b, row, '│');
        }
        put!(col_a, r_bot, '─');
        put!(col_b, r_bot, '┘');
    }
}

fn put_char(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conference_height_is_15() {
        assert_eq!(CONFERENCE_HEIGHT, 15);
    }

    #[test]
    fn test_slot_heights() {
        assert_eq!(SH, [3, 7, 15]);
    }

    #[test]
    fn test_bracket_grid_cell_count() {
        let grid = BracketGrid::compute(80);
        assert_eq!(grid.cells.len(), 7); // 4 + 2 + 1
    }

    #[test]
    fn test_round_centers() {
        let grid = BracketGrid::compute(80);
        let centers = |d: usize| -> Vec<u16> {
            grid.cells_for_depth(d).iter().map(|c| c.center_row).collect()
        };
        assert_eq!(centers(0), vec![1, 5, 9, 13]);
        assert_eq!(centers(1), vec![3, 11]);
        assert_eq!(centers(2), vec![7]);
    }

    #[test]
    fn test_parent_center_is_midpoint_of_children() {
        let grid = BracketGrid::compute(80);
        for depth in 0..2usize {
            let children = grid.cells_for_depth(depth);
            let parents = grid.cells_for_depth(depth + 1);
            for (j, parent) in parents.iter().enumerate() {
                let c_top = children[2 * j].center_row;
                let c_bot = children[2 * j + 1].center_row;
                assert_eq!(
                    parent.center_row,
                    (c_top + c_bot) / 2,
                    "depth={depth} parent={j}: expected midpoint of {c_top},{c_bot}"
                );
            }
        }
    }

    #[test]
    fn test_cells_carry_their_round() {
        let grid = BracketGrid::compute(80);
        for (depth, round) in ROUNDS.iter().enumerate() {
            assert!(grid.cells_for_depth(depth).iter().all(|c| c.round == *round));
            assert_eq!(round_to_depth(*round), depth);
        }
    }

    #[test]
    fn test_cell_width_is_computed_from_available_width() {
        let width: u16 = 61;
        let expected = width.saturating_sub(CONNECTOR_WIDTH * 2) / 3;
        let grid = BracketGrid::compute(width);
        assert_eq!(grid.cell_width, expected.min(CELL_W_FULL));
        assert!(grid.total_width <= width);
        for cell in &grid.cells {
            assert_eq!(cell.cell_width, grid.cell_width);
        }
    }

    #[test]
    fn test_cell_width_caps_at_full_width_limit() {
        let grid = BracketGrid::compute(200);
        assert_eq!(grid.cell_width, CELL_W_FULL);
    }

    #[test]
    fn test_mirrored_grid_reverses_columns() {
        let normal = BracketGrid::compute(90);
        let mirrored = BracketGrid::compute_mirrored(90);
        assert_eq!(normal.round_cols[0], mirrored.round_cols[2]);
        assert_eq!(normal.round_cols[2], mirrored.round_cols[0]);
        assert!(mirrored.mirrored);
    }

    #[test]
    fn test_format_team_line_width() {
        let seed = SeedLabel::Wildcard(2);
        let team = Team::new("Columbus Blue Jackets");
        for width in [12usize, 18, 26] {
            let line = format_team_line(Some(seed), Some(&team), width);
            assert_eq!(line.chars().count(), width, "line: {line:?}");
            assert!(line.starts_with("WC2 "));
        }
    }

    #[test]
    fn test_format_team_line_placeholder() {
        let line = format_team_line(None, None, 10);
        assert_eq!(line, "    TBD   ");
    }

    #[test]
    fn test_status_line_tracks_decision() {
        let m = Matchup::unseeded(Team::new("Dallas Stars"), Team::new("Winnipeg Jets"));
        let open = format_status_line(Some(&m), None, 20);
        let done = format_status_line(Some(&m), Some(&m.team_a), 20);
        assert_eq!(open.chars().count(), 20);
        assert!(open.contains("to pick"));
        assert!(done.contains("decided"));
    }

    #[test]
    fn test_view_renders_selected_matchup() {
        let m = Matchup::unseeded(Team::new("Dallas Stars"), Team::new("Winnipeg Jets"));
        let first: Vec<GameSlot> = (0..4)
            .map(|_| GameSlot { matchup: Some(m.clone()), winner: None })
            .collect();
        let second = vec![GameSlot::default(); 2];
        let last = vec![GameSlot::default()];
        let grid = BracketGrid::compute(80);
        let area = Rect::new(0, 0, 80, CONFERENCE_HEIGHT);
        let mut buf = Buffer::empty(area);
        BracketView {
            rounds: [&first, &second, &last],
            grid: &grid,
            selected: Some((0, 0)),
            theme: BannerTheme::Dark,
        }
        .render(area, &mut buf);

        let row: String = (0..grid.cell_width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(row.contains("Dallas Stars"), "row: {row:?}");
    }
}
