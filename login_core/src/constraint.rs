use crate::FieldError;
use regex::Regex;
use std::sync::LazyLock;

/// Everything about an email address except the two rules the regex engine
/// can't express without lookaround (see `is_email`.) Letters are ASCII only.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern is a valid regex")
});

/// Characters that count as "special" in a password.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&#";

/// A group of characters; `Rule::ContainsEach` requires one of each.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharClass {
    /// `a` through `z`
    Lowercase,

    /// `A` through `Z`
    Uppercase,

    /// `0` through `9`
    Digit,

    /// Any character in the given string
    OneOf(&'static str),
}

impl CharClass {
    /// Does this character belong to the class?
    pub fn matches(self, c: char) -> bool {
        match self {
            Self::Lowercase => c.is_ascii_lowercase(),
            Self::Uppercase => c.is_ascii_uppercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::OneOf(chars) => chars.contains(c),
        }
    }
}

/// A predicate over a single string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A syntactically valid email address (`local@domain.tld`.)
    Email,

    /// At least this many characters, counted in UTF-16 code units the way
    /// browsers count string length. Characters outside the Basic
    /// Multilingual Plane (e.g. most emoji) count as two.
    MinLength(usize),

    /// At least one character from every listed class, all appearing before
    /// the first line break.
    ContainsEach(&'static [CharClass]),
}

impl Rule {
    /// Check a value against the rule.
    pub fn holds(&self, value: &str) -> bool {
        match self {
            Self::Email => is_email(value),
            Self::MinLength(min) => value.encode_utf16().count() >= *min,
            Self::ContainsEach(classes) => {
                let first_line = first_line(value);

                classes
                    .iter()
                    .all(|class| first_line.chars().any(|c| class.matches(c)))
            }
        }
    }

    /// Wrap a message in the kind of error this rule produces. Email checks
    /// are about shape; everything else is about strength.
    fn failure(&self, message: &'static str) -> FieldError {
        match self {
            Self::Email => FieldError::Format(message),
            Self::MinLength(_) | Self::ContainsEach(_) => FieldError::Strength(message),
        }
    }
}

/// Check the email grammar. The leading-dot and double-dot rules live here
/// instead of in `EMAIL` because `regex` has no lookahead.
fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL.is_match(value)
}

/// Everything before the first line terminator (`\n`, `\r`, U+2028 or
/// U+2029), or the whole value if there isn't one.
fn first_line(value: &str) -> &str {
    value
        .split(['\n', '\r', '\u{2028}', '\u{2029}'])
        .next()
        .unwrap_or(value)
}

/// A rule plus the message to show when it doesn't hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// What must be true
    rule: Rule,

    /// What to tell the user when it isn't
    message: &'static str,
}

impl Constraint {
    /// Construct a new `Constraint`
    pub fn new(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }

    /// The rule being checked
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Check a value, producing this constraint's error if it fails.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` carrying this constraint's message when the rule
    /// doesn't hold for `value`.
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        if self.rule.holds(value) {
            Ok(())
        } else {
            Err(self.rule.failure(self.message))
        }
    }
}
