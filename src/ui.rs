pub mod charting;

use itertools::{EitherOrBoth, Itertools};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Widget, Wrap},
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    celebration::CelebrationAnimation,
    challenge::Difficulty,
    scoring::{Rating, ScoreReport},
    session::{AttemptState, Severity},
    stats::AggregateStats,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const LOW_TIME_SECS: u64 = 10;

const PALETTE: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

/// The whole game screen as of `now`; the countdown is read at render time.
pub struct AppView<'a> {
    app: &'a App,
    now: Instant,
}

impl<'a> AppView<'a> {
    pub fn new(app: &'a App, now: Instant) -> Self {
        Self { app, now }
    }
}

impl Widget for AppView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.app;
        let session = &app.session;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let text_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2).max(1);
        let sentence_lines = session
            .challenge()
            .map_or(1, |c| wrapped_lines(c.sentence.as_str(), text_width))
            .min(area.height);
        // one spare column for the cursor
        let typed_lines = wrapped_lines(&format!("{}_", session.attempt().typed()), text_width)
            .min(area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),                                // title
                Constraint::Length(1),                                // difficulty selector
                Constraint::Length(sentence_lines.saturating_add(2)), // challenge
                Constraint::Length(1),                                // countdown
                Constraint::Length(typed_lines.saturating_add(2)),    // typed text
                Constraint::Length(1),                                // notice
                Constraint::Min(0),                                   // results and tracker
                Constraint::Length(1),                                // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Typing Speed Challenge", bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(difficulty_line(app.difficulty))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let challenge_block = Block::default().borders(Borders::ALL).title("Type this");
        let challenge = match session.challenge() {
            Some(challenge) => Paragraph::new(Span::styled(
                challenge.sentence.as_str().to_string(),
                bold_style,
            )),
            None => Paragraph::new(Span::styled(
                "Press Ctrl+N for a new sentence",
                dim_style.patch(italic_style),
            )),
        };
        challenge
            .block(challenge_block)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        countdown_line(app, self.now).render(chunks[3], buf);

        let expected = session
            .challenge()
            .map(|c| c.sentence.as_str())
            .unwrap_or_default();
        let mut spans = typed_spans(expected, session.attempt().typed());
        if session.state() != AttemptState::Finalized {
            spans.push(Span::styled(
                "_",
                dim_style.add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Start typing here"))
            .wrap(Wrap { trim: false })
            .render(chunks[4], buf);

        if let Some(notice) = app.notice {
            let style = match notice.severity() {
                Severity::Warning => bold_style.fg(Color::Yellow),
                Severity::Info => Style::default().fg(Color::Cyan),
            };
            Paragraph::new(Span::styled(notice.to_string(), style))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }

        match (session.last_report(), app.show_tracker) {
            (Some(report), true) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[6]);
                render_results(report, halves[0], buf);
                render_tracker(session.stats(), halves[1], buf);
            }
            (Some(report), false) => render_results(report, chunks[6], buf),
            (None, true) => render_tracker(session.stats(), chunks[6], buf),
            (None, false) => {}
        }

        Paragraph::new(Span::styled(
            "(↑/↓) difficulty / (ctrl+n) new sentence / (tab) start / (enter) submit / (ctrl+t) tracker / (esc)ape",
            italic_style,
        ))
        .render(chunks[7], buf);

        if app.celebration.is_active() {
            render_celebration(&app.celebration, area, buf);
        }
    }
}

/// Rows needed to show `text` word-wrapped at `width` columns.
///
/// Follows the paragraph wrapper: words move whole to the next row, the
/// whitespace at a break is dropped, and words wider than a row are split.
fn wrapped_lines(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines: usize = 1;
    let mut line_width = 0;

    for (is_space, chunk) in &text.chars().chunk_by(|c| c.is_whitespace()) {
        let chunk: String = chunk.collect();
        let chunk_width = chunk.width();

        if line_width + chunk_width <= width {
            line_width += chunk_width;
        } else if is_space {
            line_width = width;
        } else if chunk_width <= width {
            lines += 1;
            line_width = chunk_width;
        } else {
            let first_row = if line_width == 0 { 0 } else { 1 };
            let rows = chunk_width.div_ceil(width);
            lines += first_row + rows - 1;
            line_width = chunk_width - (rows - 1) * width;
        }
    }

    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn difficulty_line(selected: Difficulty) -> Line<'static> {
    let mut spans = vec![Span::raw("Difficulty: ")];
    for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let style = if difficulty == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(format!(" {difficulty} "), style));
    }
    Line::from(spans)
}

fn countdown_line(app: &App, now: Instant) -> Paragraph<'static> {
    let session = &app.session;
    let line = match session.state() {
        AttemptState::Started => {
            let secs = session.attempt().timer().remaining_whole_secs(now);
            let style = if secs <= LOW_TIME_SECS {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Span::styled(format!("Time remaining: {secs} seconds"), style)
        }
        AttemptState::NotStarted if session.challenge().is_some() => Span::styled(
            "Press Tab to start the clock",
            Style::default().add_modifier(Modifier::DIM),
        ),
        _ => Span::raw(""),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

/// Color each typed character against the sentence position it lines up with.
///
/// Leading whitespace is left uncolored since scoring trims it before comparing.
fn typed_spans(expected: &str, typed: &str) -> Vec<Span<'static>> {
    let correct = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let wrong = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let body = typed.trim_start();
    let indent = &typed[..typed.len() - body.len()];

    let mut spans = Vec::new();
    if !indent.is_empty() {
        spans.push(Span::styled(
            indent.to_owned(),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    spans.extend(
        body.chars()
            .zip_longest(expected.chars())
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(t, e) if t == e => Some(Span::styled(t.to_string(), correct)),
                EitherOrBoth::Both(t, _) | EitherOrBoth::Left(t) => Some(Span::styled(
                    match t {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    wrong,
                )),
                EitherOrBoth::Right(_) => None,
            }),
    );
    spans
}

fn rating_style(rating: Rating) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match rating {
        Rating::LightningFast => bold.fg(Color::Yellow),
        Rating::GreatJob => bold.fg(Color::Green),
        Rating::KeepPracticing => bold.fg(Color::Cyan),
        Rating::SlowStart => bold.fg(Color::Red),
    }
}

fn render_results(report: &ScoreReport, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title("Your Results");
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    Paragraph::new(vec![
        Line::from(format!("Time Taken: {:.2} seconds", report.elapsed_secs)),
        Line::from(format!("Speed: {:.2} WPM", report.wpm)),
        Line::from(format!("Accuracy: {:.2}%", report.accuracy)),
    ])
    .render(rows[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(report.progress())
        .label(format!("{:.0} / 100 wpm", report.wpm.min(100.0)))
        .render(rows[1], buf);

    let rating = report.rating();
    Paragraph::new(Span::styled(rating.message(), rating_style(rating))).render(rows[2], buf);

    Paragraph::new(Span::styled(
        format!("Words you typed: {}", report.typed_word_count),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(rows[3], buf);
}

fn render_tracker(stats: &AggregateStats, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let block = Block::default().borders(Borders::ALL).title("Score Tracker");
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    Paragraph::new(vec![
        Line::from(format!("Games Played: {}", stats.games_played())),
        Line::from(format!("Average Speed: {:.2} WPM", stats.average_wpm())),
        Line::from(format!("Best Score: {:.2} WPM", stats.best_wpm())),
    ])
    .render(rows[0], buf);

    let chart_area = rows[1];
    if stats.history().is_empty() || chart_area.height < 4 || chart_area.width < 12 {
        return;
    }

    let points = charting::chart_points(stats.history());
    let (last_game, highest_wpm) = charting::compute_chart_params(stats.history());
    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("game")
                .bounds([1.0, last_game])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(last_game), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(chart_area, buf);
}

/// Draw balloons and cheer letters on top of everything else
fn render_celebration(celebration: &CelebrationAnimation, area: Rect, buf: &mut Buffer) {
    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = PALETTE[particle.color_index % PALETTE.len()];
        let style = if particle.is_letter() {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}
