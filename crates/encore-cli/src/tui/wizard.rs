use encore_core::{
    Domain, DomainProfile, FieldKind, Page, PreferenceKey, Recommendations, Wizard, WizardState,
    MAX_FAVORITES,
};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap,
};

use super::App;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const STEPS: [&str; 3] = ["Favorites", "Details", "Recommendations"];

/// Render the wizard page for `domain`.
pub fn render(frame: &mut Frame, app: &App, domain: Domain) {
    let wizard = app.router.wizard(domain);
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar + steps
            Constraint::Min(8),    // Step body
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_title(frame, wizard, chunks[0]);
    match wizard.state() {
        WizardState::CollectingTitles => render_titles(frame, app, wizard, chunks[1]),
        WizardState::CollectingPreferences => render_preferences(frame, app, wizard, chunks[1]),
        WizardState::Submitting { .. } => render_submitting(frame, app, wizard, chunks[1]),
        WizardState::ShowingResults(results) => {
            render_results(frame, wizard, results, chunks[1]);
        }
        WizardState::Failed { reason } => render_failed(frame, reason, chunks[1]),
    }
    render_help(frame, wizard, chunks[2]);
}

fn render_title(frame: &mut Frame, wizard: &Wizard, area: Rect) {
    let profile = wizard.profile();
    let mut spans = vec![
        Span::styled(
            "Entertainment Hub",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  \u{203a} {} {}    ", profile.icon, profile.title)),
    ];

    let step = usize::from(wizard.step());
    for (i, label) in STEPS.iter().enumerate() {
        let number = i + 1;
        let style = if number == step {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if number < step {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if i > 0 {
            spans.push(Span::styled(" \u{2500} ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("{} {}", number, label), style));
    }

    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_titles(frame: &mut Frame, app: &App, wizard: &Wizard, area: Rect) {
    let profile = wizard.profile();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(3), // Input
            Constraint::Length(1), // Notice
            Constraint::Min(3),    // Favorites
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(format!("Add Your Favorite {}", capitalize(profile.noun_plural)))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!(
            "Enter up to {} {} that you enjoy to receive personalized recommendations.",
            MAX_FAVORITES, profile.noun_plural
        ))
        .style(Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(heading, chunks[0]);

    let input = if wizard.draft().is_empty() {
        Paragraph::new(profile.title_placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!("{}\u{2588}", wizard.draft()))
    };
    frame.render_widget(input.block(Block::default().borders(Borders::ALL)), chunks[1]);

    if let Some(notice) = wizard.notice() {
        let line = Paragraph::new(notice.message(profile)).style(Style::default().fg(Color::Red));
        frame.render_widget(line, chunks[2]);
    }

    let title = format!(
        "Your {} ({}/{})",
        capitalize(profile.noun_plural),
        wizard.favorites().len(),
        MAX_FAVORITES
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if wizard.favorites().is_empty() {
        let empty = Paragraph::new(format!("No {} added yet", profile.noun_plural))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[3]);
        return;
    }

    let items: Vec<ListItem> = wizard
        .favorites()
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let style = if i == app.selected_favorite {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}. {}", i + 1, title)).style(style)
        })
        .collect();
    frame.render_widget(List::new(items).block(block), chunks[3]);
}

fn render_preferences(frame: &mut Frame, app: &App, wizard: &Wizard, area: Rect) {
    let profile = wizard.profile();
    let preferences = wizard.preferences();

    let rows: Vec<Row> = profile
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let raw = preferences.get(field.key);
            let (shown, hint) = match field.kind {
                FieldKind::Text { placeholder } if raw.is_empty() => (placeholder, ""),
                FieldKind::Text { .. } => (raw, ""),
                FieldKind::Choice { .. } => (field.display_value(raw), "\u{2190} \u{2192}"),
            };
            let mut value_style = if raw.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let row_style = if i == app.selected_field {
                value_style = value_style.add_modifier(Modifier::BOLD);
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(field.label),
                Cell::from(shown.to_string()).style(value_style),
                Cell::from(hint).style(Style::default().fg(Color::DarkGray)),
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Min(20),
            Constraint::Length(5),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help us understand your preferences better (optional)"),
    );
    frame.render_widget(table, area);
}

fn render_submitting(frame: &mut Frame, app: &App, wizard: &Wizard, area: Rect) {
    let frame_glyph = SPINNER[app.spinner % SPINNER.len()];
    let text = format!(
        "{} Finding {} you'll love...",
        frame_glyph,
        wizard.profile().noun_plural
    );
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, area);
}

fn render_results(frame: &mut Frame, wizard: &Wizard, results: &Recommendations, area: Rect) {
    let profile = wizard.profile();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let name = wizard.preferences().get(PreferenceKey::Name).trim();
    let heading = if name.is_empty() {
        profile.results_heading.to_string()
    } else {
        format!("{}, here are your recommendations", name)
    };
    let header = Paragraph::new(vec![
        Line::from(heading).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!(
            "{}  (fetched {})",
            profile.results_subtitle,
            results.fetched_label()
        ))
        .style(Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(header, chunks[0]);

    let items = &results.items;
    if items.is_empty() {
        let empty = Paragraph::new("No recommendations found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let header_row = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Title").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Details"),
        Cell::from("Rating"),
    ]);
    let rows: Vec<Row> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(item.title.clone()),
                Cell::from(item.byline()),
                Cell::from(
                    item.rating
                        .map(|r| format!("\u{2605} {:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                )
                .style(Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Percentage(40),
            Constraint::Length(8),
        ],
    )
    .header(header_row)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(table, chunks[1]);
}

fn render_failed(frame: &mut Frame, reason: &str, area: Rect) {
    let body = Paragraph::new(vec![
        Line::from("Could not get recommendations")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(reason.to_string()),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, area);
}

fn render_help(frame: &mut Frame, wizard: &Wizard, area: Rect) {
    let text = help_text(wizard.profile(), wizard.state());
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn help_text(profile: &DomainProfile, state: &WizardState) -> String {
    match state {
        WizardState::CollectingTitles => {
            "  Enter Add  \u{2191}/\u{2193} Select  Del/^D Remove  Tab Continue  Esc/^G Home"
                .to_string()
        }
        WizardState::CollectingPreferences => format!(
            "  \u{2191}/\u{2193} Field  \u{2190}/\u{2192} Choose  Enter {}  Esc Back  ^G Home",
            profile.submit_label
        ),
        WizardState::Submitting { .. } => "  ^G Home  ^C Quit".to_string(),
        WizardState::ShowingResults(_) => "  b Back  r Start Over  ^G Home".to_string(),
        WizardState::Failed { .. } => "  Enter Retry  Esc Back  ^G Home".to_string(),
    }
}

/// Draw the leave-confirmation overlay on top of the current page.
pub fn render_confirm(frame: &mut Frame, target: Page) {
    let area = centered(frame.area(), 50, 7);
    let destination = match target {
        Page::Landing => "the home page".to_string(),
        Page::Wizard(domain) => domain.profile().title.to_string(),
    };
    let dialog = Paragraph::new(vec![
        Line::from(format!("Leave for {}?", destination)),
        Line::from("Your progress in this wizard will be lost."),
        Line::from(""),
        Line::from("y Leave   n Stay").style(Style::default().fg(Color::Yellow)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Discard progress "),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("movies"), "Movies");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_help_uses_submit_label() {
        let profile = Domain::Book.profile();
        let text = help_text(profile, &WizardState::CollectingPreferences);
        assert!(text.contains(profile.submit_label));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 30, 4);
        let rect = centered(area, 50, 7);
        assert_eq!(rect, Rect::new(0, 0, 30, 4));
    }
}
