use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::clock::format_time;
use crate::models::{Question, QuestionKind, Response};
use crate::session::AdvanceCause;

const LOW_TIME_THRESHOLD: u32 = 5;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let Some(item) = session.current_item() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_progress(frame, chunks[1], app);
    render_question_text(frame, chunks[2], item.question.prompt());

    match item.question.kind() {
        QuestionKind::FillInBlank => {
            render_text_input(frame, chunks[3], &item.response, session.feedback())
        }
        QuestionKind::SingleChoice | QuestionKind::MultiSelect => render_options(
            frame,
            chunks[3],
            &item.question,
            &item.response,
            app.cursor(),
            session.feedback().is_some(),
        ),
    }

    render_feedback(frame, chunks[4], session.feedback(), app.last_cause());
    render_status(frame, chunks[5], app.status());
    render_controls(frame, chunks[6], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let [tracker_area, timer_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(8)]).areas(area);

    let tracker = format!(
        "Question {}/{}",
        session.current_index() + 1,
        session.total()
    );
    frame.render_widget(Paragraph::new(tracker).fg(Color::DarkGray), tracker_area);

    let remaining = session.remaining_time();
    let timer_color = if remaining <= LOW_TIME_THRESHOLD {
        Color::Red
    } else {
        Color::Cyan
    };
    let timer = Paragraph::new(format_time(remaining))
        .alignment(Alignment::Right)
        .fg(timer_color)
        .bold();
    frame.render_widget(timer, timer_area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let ratio = session.current_index() as f64 / session.total().max(1) as f64;

    let gauge = Gauge::default()
        .ratio(ratio.clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    response: &Response,
    cursor: usize,
    revealed: bool,
) {
    let multi = question.kind() == QuestionKind::MultiSelect;
    let mut lines: Vec<Line> = Vec::with_capacity(question.options().len() * 2);

    for (index, option) in question.options().iter().enumerate() {
        let is_cursor = index == cursor && !revealed;
        let is_selected = response.is_selected(option);

        let style = if revealed && question.is_correct_option(option) {
            Style::default().fg(Color::Green).bold()
        } else if revealed && is_selected {
            Style::default().fg(Color::Red).bold()
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else if is_cursor {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        let marker = if is_cursor { ">" } else { " " };
        let check = match (multi, is_selected) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(•)",
            (false, false) => "( )",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{} ", check), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_text_input(frame: &mut Frame, area: Rect, response: &Response, feedback: Option<bool>) {
    let text = match response {
        Response::Text(text) => text.as_str(),
        _ => "",
    };

    let border_color = match feedback {
        Some(true) => Color::Green,
        Some(false) => Color::Red,
        None => Color::DarkGray,
    };

    let mut spans = vec![Span::styled(text, Style::default().fg(Color::White))];
    if feedback.is_none() {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }

    let [input_area, _] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Your answer ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, input_area);
}

fn render_feedback(
    frame: &mut Frame,
    area: Rect,
    feedback: Option<bool>,
    cause: Option<AdvanceCause>,
) {
    let Some(correct) = feedback else {
        return;
    };

    let prefix = if cause == Some(AdvanceCause::Expired) {
        "Time's up! "
    } else {
        ""
    };
    let (message, color) = if correct {
        ("Correct!", Color::Green)
    } else {
        ("Incorrect!", Color::Red)
    };

    let widget = Paragraph::new(format!("{}{}", prefix, message))
        .alignment(Alignment::Center)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&str>) {
    if let Some(status) = status {
        let widget = Paragraph::new(status)
            .alignment(Alignment::Center)
            .fg(Color::Red);
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let action = if app.session().is_last_question() {
        "submit"
    } else {
        "next"
    };

    let help = if app.is_text_entry() {
        format!("type your answer  ·  enter {}  ·  esc quit", action)
    } else {
        format!(
            "j/k navigate  ·  space select  ·  enter {}  ·  q quit",
            action
        )
    };

    let widget = Paragraph::new(help)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
