use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::App;

/// Render the landing page with one card per section.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Welcome header
            Constraint::Min(9),    // Section cards
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_cards(frame, app, chunks[1]);
    render_help(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from("Welcome to Entertainment Hub").style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from("Your one-stop destination for entertainment recommendations")
            .style(Style::default().fg(Color::Gray)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let sections = app.router.sections();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (i, (profile, column)) in sections.iter().zip(columns.iter()).enumerate() {
        let selected = i == app.landing_selected;
        let border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let card = Paragraph::new(vec![
            Line::from(profile.icon),
            Line::from(""),
            Line::from(profile.title).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from(profile.description).style(Style::default().fg(Color::Gray)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", i + 1)),
        );
        frame.render_widget(card, *column);
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("  \u{2190}/\u{2192} \u{2191}/\u{2193} Move  Enter Select  1-3 Jump  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
