use tui::style::{Color, Modifier, Style};

pub const FRAME_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    Primary,
    Secondary,
    Accent,
    Shadow,
    Dim,
    Winner,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BannerTheme {
    #[default]
    Dark,
}

pub fn resolve(color: BannerColor, _theme: BannerTheme) -> Style {
    match color {
        BannerColor::Primary => Style::default().fg(Color::Rgb(170, 200, 230)),
        BannerColor::Secondary => Style::default().fg(Color::Rgb(200, 16, 46)),
        BannerColor::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        BannerColor::Shadow | BannerColor::Dim => Style::default().fg(Color::Indexed(240)),
        BannerColor::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

/// Column of the puck sliding back and forth across a rink `width` cells wide.
pub fn puck_col(tick: u64, width: u16) -> u16 {
    let w = u64::from(width.saturating_sub(1));
    if w == 0 {
        return 0;
    }
    let t = tick % (2 * w);
    w.abs_diff(t) as u16
}

pub fn puck_frame(frame: usize) -> [&'static str; 4] {
    const FRAMES: [[&str; 4]; FRAME_COUNT] = [
        ["   ___   ", " ,'   `. ", "(   *   )", " `.___,' "],
        ["   ___   ", " ,'   `. ", "(   +   )", " `.___,' "],
        ["   ___   ", " ,'   `. ", "(   x   )", " `.___,' "],
        ["   ___   ", " ,'   `. ", "(   +   )", " `.___,' "],
    ];
    FRAMES[frame % FRAME_COUNT]
}

const TITLE_GLYPHS: [[&str; 4]; 11] = [
    [" ___ ", "/ __|", "\\__ \\", "|___/"],                 // S
    [" _____ ", "|_   _|", "  | |  ", "  |_|  "],         // T
    ["   _   ", "  /_\\  ", " / _ \\ ", "/_/ \\_\\"],      // A
    [" _  _ ", "| \\| |", "| .` |", "|_|\\_|"],            // N
    [" _    ", "| |   ", "| |__ ", "|____|"],             // L
    [" ___ ", "| __|", "| _| ", "|___|"],                 // E
    ["__   __", "\\ \\ / /", " \\ V / ", "  |_|  "],      // Y
    ["  ", "  ", "  ", "  "],                             // space
    ["  ___ ", " / __|", "| (__ ", " \\___|"],            // C
    [" _   _ ", "| | | |", "| |_| |", " \\___/ "],        // U
    [" ___ ", "| _ \\", "|  _/", "|_|  "],                // P
];

pub fn title_rows() -> [String; 4] {
    std::array::from_fn(|row| TITLE_GLYPHS.iter().map(|glyph| glyph[row]).collect())
}
