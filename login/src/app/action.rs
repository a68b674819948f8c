use crossterm::event::KeyEvent;

/// Things that can happen to this app
#[derive(Debug, PartialEq)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Validated login data was handed off for this email
    Submitted(String),

    /// Something bad happened; display it to the user
    Problem(String),
}
