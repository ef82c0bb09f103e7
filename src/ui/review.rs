use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

use super::grade_color;

const LINES_PER_ENTRY: usize = 4;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], app);
    render_entries(frame, chunks[1], app);
    render_controls(frame, chunks[2]);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let title = Line::from(vec![
        Span::styled("REVIEW  ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("{} / {}", session.score(), session.total()),
            Style::default().fg(grade_color(session.percentage())),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_entries(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for entry in app.session().review() {
        let heading_color = if entry.correct {
            Color::Green
        } else {
            Color::Red
        };

        lines.push(Line::from(Span::styled(
            entry.heading(),
            Style::default().fg(heading_color).bold(),
        )));
        lines.push(Line::from(vec![
            Span::styled("  Your answer:    ", Style::default().fg(Color::DarkGray)),
            Span::styled(entry.submitted(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Correct answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(entry.expected(), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
    }

    let scroll = (app.review_scroll() * LINES_PER_ENTRY) as u16;
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Your Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  b back to results  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
