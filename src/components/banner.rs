use crate::components::banner_frames::{
    BannerColor, BannerTheme, puck_col, puck_frame, resolve, title_rows,
};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

pub use crate::components::banner_frames::FRAME_COUNT;

pub struct AnimatedBanner {
    pub frame: usize,
    pub tick: u64,
    pub theme: BannerTheme,
}

impl Default for AnimatedBanner {
    fn default() -> Self {
        Self {
            frame: 0,
            tick: 0,
            theme: BannerTheme::Dark,
        }
    }
}

impl Widget for AnimatedBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(Line::from(" STANLEY CUP "), area.x, area.y, area.width, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(resolve(BannerColor::Primary, self.theme));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if inner.width < 80 {
            render_compact(&self, inner, buf);
            return;
        }
        render_full(&self, inner, buf);
    }
}

const SUBTITLE: &str = "16 TEAMS  |  ONE CUP";

fn render_compact(banner: &AnimatedBanner, inner: Rect, buf: &mut Buffer) {
    render_centered(
        Line::from(Span::styled(
            "STANLEY CUP PLAYOFFS",
            resolve(BannerColor::Accent, banner.theme),
        )),
        inner,
        inner.y,
        buf,
    );
    if inner.height > 1 {
        render_centered(
            Line::from(Span::styled(
                SUBTITLE,
                resolve(BannerColor::Secondary, banner.theme),
            )),
            inner,
            inner.y + 1,
            buf,
        );
    }
}

fn render_full(banner: &AnimatedBanner, inner: Rect, buf: &mut Buffer) {
    let title = title_rows();
    let puck = puck_frame(banner.frame);
    let show_puck = inner.width > 76;

    for row in 0..4u16 {
        if row >= inner.height {
            break;
        }
        let mut spans = Vec::new();
        if show_puck {
            spans.push(Span::styled(
                puck[row as usize],
                resolve(BannerColor::Shadow, banner.theme),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            title[row as usize].as_str(),
            resolve(BannerColor::Primary, banner.theme),
        ));
        render_centered(Line::from(spans), inner, inner.y + row, buf);
    }

    if inner.height > 4 {
        render_centered(
            Line::from(Span::styled(
                format!(" {SUBTITLE} "),
                resolve(BannerColor::Accent, banner.theme),
            )),
            inner,
            inner.y + 4,
            buf,
        );
    }

    // Ice strip with the sliding puck.
    if inner.height > 5 {
        let y = inner.y + 5;
        let dim = resolve(BannerColor::Dim, banner.theme);
        for dx in 0..inner.width {
            buf.set_string(inner.x + dx, y, "·", dim);
        }
        let x = inner.x + puck_col(banner.tick, inner.width);
        buf.set_string(x, y, "●", resolve(BannerColor::Secondary, banner.theme));
    }
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let style: Style = span.style;
        let run: String = span
            .content
            .chars()
            .take(limit.saturating_sub(cx) as usize)
            .collect();
        if run.is_empty() {
            break;
        }
        buf.set_string(cx, y, &run, style);
        cx += run.chars().count() as u16;
    }
}
