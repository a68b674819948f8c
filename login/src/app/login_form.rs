use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use login_core::{Field, FieldErrors, LoginInput, Schema};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// Height of each input box, including its border
const INPUT_HEIGHT: u16 = 3;

/// Rows reserved under each input for its error message
const ERROR_HEIGHT: u16 = 2;

/// A form for entering login information
#[derive(Debug)]
pub struct LoginForm {
    /// Which field we're editing
    active: Focus,

    /// Who are you?
    email: Input,

    /// What's your password? (Will be masked)
    password: Input,

    /// What was wrong with each field the last time the form was submitted
    errors: FieldErrors,
}

form_fields!(Focus, Email, Password);

impl LoginForm {
    /// Start a form with the email already filled in
    pub fn with_email(email: String) -> Self {
        Self {
            email: Input::new(email),
            active: Focus::Password,
            ..Self::default()
        }
    }

    /// Render the form centered in `body_area`, with each field's error (if
    /// any) underneath it.
    pub fn render(&self, body_area: Rect, frame: &mut Frame<'_>) {
        let height = 2 * (INPUT_HEIGHT + ERROR_HEIGHT) + 2; // +2 for the border
        let popup_vert = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title("Log in")
            .border_style(Style::default().fg(Color::Blue));
        let inner_area = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let fields = Layout::vertical(Constraint::from_lengths([
            INPUT_HEIGHT,
            ERROR_HEIGHT,
            INPUT_HEIGHT,
            ERROR_HEIGHT,
        ]));
        let [email_area, email_error_area, password_area, password_error_area] =
            fields.areas(inner_area);

        self.render_field(frame, Focus::Email, email_area, email_error_area);
        self.render_field(frame, Focus::Password, password_area, password_error_area);
    }

    /// Render one input box and the error line below it
    #[expect(clippy::cast_possible_truncation)]
    fn render_field(&self, frame: &mut Frame<'_>, focus: Focus, area: Rect, error_area: Rect) {
        let (input, title, shown) = match focus {
            Focus::Email => (&self.email, "Email", self.email.value().to_string()),
            Focus::Password => (
                &self.password,
                "Password",
                "*".repeat(self.password.value().chars().count()),
            ),
        };

        let error = self.errors.get(focus.into());

        let width = area.width.saturating_sub(2 + 1) as usize; // -2 for the border, -1 for the cursor

        // The mask is one `*` per character no matter how wide the character
        // is, so the password's cursor and scroll are counted in characters.
        let (cursor, scroll) = match focus {
            Focus::Email => (input.visual_cursor(), input.visual_scroll(width)),
            Focus::Password => (input.cursor(), input.cursor().max(width) - width),
        };

        let border_style = if error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Blue)
        };

        let field = Paragraph::new(shown).scroll((0, scroll as u16)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );
        frame.render_widget(field, area);

        if let Some(error) = error {
            frame.render_widget(
                Paragraph::new(error.to_string())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                error_area,
            );
        }

        if self.active == focus {
            frame.set_cursor_position((
                area.x
                    + (cursor.max(scroll) - scroll) as u16 // current end of text
                    + 1, // just past the end of the text
                area.y + 1, // +1 row for the border/title
            ));
        }
    }

    /// Move focus or edit the focused field
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.active = self.active.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Focus::Email => self.email.handle_event(&event),
                    Focus::Password => self.password.handle_event(&event),
                };
            }
        }
    }

    /// The current contents of the form
    pub fn finish(&self) -> LoginInput {
        LoginInput::new(self.email.value(), self.password.value())
    }

    /// Validate what's been entered, returning the data if it passed. Errors
    /// from the previous attempt are replaced: on failure with the new errors
    /// (and focus moves to the first bad field), on success with nothing.
    pub fn submit(&mut self, schema: &Schema) -> Option<LoginInput> {
        match schema.validate_input(&self.finish()).into_result() {
            Ok(data) => {
                self.errors = FieldErrors::default();

                Some(data)
            }
            Err(errors) => {
                if let Some((first, _)) = errors.iter().next() {
                    if let Some(focus) = Focus::FIELDS
                        .iter()
                        .find(|focus| Field::from(**focus) == *first)
                    {
                        self.active = *focus;
                    }
                }

                self.errors = errors;

                None
            }
        }
    }

    /// Errors from the last submission
    #[cfg(test)]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Which field has focus
    #[cfg(test)]
    pub fn active(&self) -> Focus {
        self.active
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            active: Focus::Email,
            email: Input::new(String::new()),
            password: Input::new(String::new()),
            errors: FieldErrors::default(),
        }
    }
}
