/// Things that can happen to the app
mod action;
pub use action::Action;

/// Side effects the app asks the shell to perform
mod effect;
pub use effect::Effect;

/// The email/password form
mod login_form;
use login_form::LoginForm;

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use login_core::LOGIN;
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
#[derive(Debug)]
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Where the app is in its lifecycle
    state: AppState,
}

impl App {
    /// Create a new instance of the app, optionally with the email field
    /// already filled in.
    pub fn new(email: Option<String>) -> Self {
        Self {
            status_line: None,
            state: AppState::Editing(email.map(LoginForm::with_email).unwrap_or_default()),
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.state {
            AppState::Editing(form) => form.render(body_area, frame),
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        }

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "tab: next field · enter: log in · esc: quit",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                let AppState::Editing(form) = &mut self.state else {
                    return vec![];
                };

                match key.code {
                    KeyCode::Esc => {
                        self.state = AppState::Exiting(ExitCode::SUCCESS);

                        vec![]
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.state = AppState::Exiting(ExitCode::SUCCESS);

                        vec![]
                    }
                    KeyCode::Enter => match form.submit(&LOGIN) {
                        Some(data) => {
                            self.status_line = Some("Logging in…".to_owned());

                            vec![Effect::Submit(data)]
                        }
                        None => {
                            tracing::debug!("form data is invalid");
                            self.status_line = Some("Please fix the highlighted fields".to_owned());

                            vec![]
                        }
                    },
                    _ => {
                        form.handle_event(key);

                        vec![]
                    }
                }
            }
            Action::Submitted(email) => {
                self.status_line = Some(format!("Submitted login for {email}"));

                vec![]
            }
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// Filling in the form
    Editing(LoginForm),

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}
