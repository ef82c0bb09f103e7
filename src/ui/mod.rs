mod quiz;
mod result;
mod review;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session().phase() {
        Phase::Landing => welcome::render(frame, area, app),
        Phase::InProgress => quiz::render(frame, area, app),
        Phase::Results => result::render(frame, area, app),
        Phase::Review => review::render(frame, area, app),
    }
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}
