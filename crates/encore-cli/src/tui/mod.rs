use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use encore_client::{build_provider, Config, ProviderResult, RecommendationProvider};
use encore_core::{
    Applied, Domain, FieldKind, LeavePolicy, Page, RecommendationItem, Router, Submission,
    WizardState,
};
use ratatui::prelude::*;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

pub mod landing;
pub mod wizard;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A submission the event loop must hand to the provider.
#[derive(Debug)]
pub struct Request {
    pub domain: Domain,
    pub submission: Submission,
}

/// A provider result on its way back to the wizard that asked for it.
#[derive(Debug)]
pub struct Outcome {
    pub domain: Domain,
    pub ticket: u64,
    pub result: ProviderResult<Vec<RecommendationItem>>,
}

/// Application state for the recommendation TUI.
#[derive(Debug)]
pub struct App {
    pub router: Router,
    pub landing_selected: usize,
    pub selected_favorite: usize,
    pub selected_field: usize,
    pub spinner: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            router: Router::new(policy),
            landing_selected: 0,
            selected_favorite: 0,
            selected_field: 0,
            spinner: 0,
            should_quit: false,
        }
    }

    /// Handle one key press. Returns a request when the key submitted a
    /// wizard.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Request> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.router.pending().is_some() {
            self.handle_confirm_key(key.code);
            return None;
        }

        if ctrl && key.code == KeyCode::Char('g') {
            self.go_home();
            return None;
        }

        match self.router.current() {
            Page::Landing => {
                self.handle_landing_key(key.code);
                None
            }
            Page::Wizard(domain) => self.handle_wizard_key(domain, key),
        }
    }

    /// Apply a provider result to the wizard that requested it.
    pub fn apply(&mut self, outcome: Outcome) -> Applied {
        self.router
            .wizard_mut(outcome.domain)
            .finish_submit(outcome.ticket, outcome.result)
    }

    pub fn tick(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
    }

    fn go_home(&mut self) {
        self.router.logo_click();
        self.reset_cursors();
    }

    fn open(&mut self, domain: Domain) {
        self.router.select(domain);
        self.reset_cursors();
    }

    fn reset_cursors(&mut self) {
        self.selected_favorite = 0;
        self.selected_field = 0;
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y' | 'Y') => {
                self.router.confirm_leave();
                self.reset_cursors();
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.router.cancel_leave(),
            _ => {}
        }
    }

    fn handle_landing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j' | 'l') | KeyCode::Down | KeyCode::Right => {
                if self.landing_selected + 1 < Domain::ALL.len() {
                    self.landing_selected += 1;
                }
            }
            KeyCode::Char('k' | 'h') | KeyCode::Up | KeyCode::Left => {
                self.landing_selected = self.landing_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(&domain) = Domain::ALL.get(self.landing_selected) {
                    self.open(domain);
                }
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.landing_selected = index;
                self.open(Domain::ALL[index]);
            }
            _ => {}
        }
    }

    fn handle_wizard_key(&mut self, domain: Domain, key: KeyEvent) -> Option<Request> {
        match self.router.wizard(domain).state() {
            WizardState::CollectingTitles => {
                self.handle_titles_key(domain, key);
                None
            }
            WizardState::CollectingPreferences => self.handle_preferences_key(domain, key),
            WizardState::Submitting { .. } => None,
            WizardState::ShowingResults(_) => {
                let wizard = self.router.wizard_mut(domain);
                match key.code {
                    KeyCode::Char('b') | KeyCode::Esc => {
                        wizard.back().ok();
                    }
                    KeyCode::Char('r') => {
                        wizard.reset();
                        self.reset_cursors();
                    }
                    _ => {}
                }
                None
            }
            WizardState::Failed { .. } => {
                let wizard = self.router.wizard_mut(domain);
                match key.code {
                    KeyCode::Enter => return submit(domain, wizard.begin_submit()),
                    KeyCode::Char('b') | KeyCode::Esc => {
                        wizard.back().ok();
                    }
                    _ => {}
                }
                None
            }
        }
    }

    fn handle_titles_key(&mut self, domain: Domain, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let wizard = self.router.wizard_mut(domain);

        match key.code {
            KeyCode::Esc => self.go_home(),
            KeyCode::Enter => {
                if wizard.commit_draft().is_ok() {
                    self.selected_favorite = wizard.favorites().len() - 1;
                }
            }
            KeyCode::Tab => {
                if wizard.advance().is_ok() {
                    self.selected_field = 0;
                }
            }
            KeyCode::Delete => self.remove_selected(domain),
            KeyCode::Char('d') if ctrl => self.remove_selected(domain),
            KeyCode::Up => {
                self.selected_favorite = self.selected_favorite.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_favorite + 1 < wizard.favorites().len() {
                    self.selected_favorite += 1;
                }
            }
            KeyCode::Backspace => {
                let mut draft = wizard.draft().to_string();
                draft.pop();
                wizard.set_draft(draft);
            }
            KeyCode::Char(c) if !ctrl => {
                let mut draft = wizard.draft().to_string();
                draft.push(c);
                wizard.set_draft(draft);
            }
            _ => {}
        }
    }

    fn remove_selected(&mut self, domain: Domain) {
        let wizard = self.router.wizard_mut(domain);
        if wizard.remove(self.selected_favorite).is_some() {
            let len = wizard.favorites().len();
            if self.selected_favorite >= len {
                self.selected_favorite = len.saturating_sub(1);
            }
        }
    }

    fn handle_preferences_key(&mut self, domain: Domain, key: KeyEvent) -> Option<Request> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let wizard = self.router.wizard_mut(domain);
        let fields = wizard.profile().fields;
        let field = fields.get(self.selected_field)?;
        let current = wizard.preferences().get(field.key).to_string();

        match key.code {
            KeyCode::Esc => {
                wizard.back().ok();
            }
            KeyCode::Enter => return submit(domain, wizard.begin_submit()),
            KeyCode::Up | KeyCode::BackTab => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.selected_field + 1 < fields.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left | KeyCode::Right => {
                let next = field.cycle(&current, key.code == KeyCode::Right);
                wizard.set_field(field.key, next);
            }
            KeyCode::Backspace if matches!(field.kind, FieldKind::Text { .. }) => {
                let mut text = current;
                text.pop();
                wizard.set_field(field.key, text);
            }
            KeyCode::Char(c) if !ctrl && matches!(field.kind, FieldKind::Text { .. }) => {
                let mut text = current;
                text.push(c);
                wizard.set_field(field.key, text);
            }
            _ => {}
        }
        None
    }
}

fn submit(domain: Domain, begun: encore_core::Result<Submission>) -> Option<Request> {
    match begun {
        Ok(submission) => Some(Request { domain, submission }),
        Err(e) => {
            log::debug!("{}: submit ignored: {}", domain, e);
            None
        }
    }
}

/// Run the recommendation TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(config: &Config) -> Result<()> {
    let provider = build_provider(config).context("Failed to create provider")?;
    let app = App::new(config.leave_policy);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app, &provider);

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    provider: &Arc<dyn RecommendationProvider>,
) -> Result<()> {
    let (tx, mut rx) = unbounded_channel();

    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.apply(outcome);
        }

        terminal.draw(|frame| render(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = app.handle_key(key) {
                        spawn_request(provider, request, tx.clone());
                    }
                }
            }
        }
        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Run the provider call off the UI thread and send the outcome back.
fn spawn_request(
    provider: &Arc<dyn RecommendationProvider>,
    request: Request,
    tx: UnboundedSender<Outcome>,
) {
    let provider = Arc::clone(provider);
    tokio::spawn(async move {
        let result = provider.recommend(&request.submission.request).await;
        let outcome = Outcome {
            domain: request.domain,
            ticket: request.submission.ticket,
            result,
        };
        if tx.send(outcome).is_err() {
            log::debug!("UI closed before result for {} arrived", request.domain);
        }
    });
}

fn render(frame: &mut Frame, app: &App) {
    match app.router.current() {
        Page::Landing => landing::render(frame, app),
        Page::Wizard(domain) => wizard::render(frame, app, domain),
    }
    if let Some(target) = app.router.pending() {
        wizard::render_confirm(frame, target);
    }
}
