use crate::{
    constraint::PASSWORD_SPECIALS, validate, CharClass, Constraint, Field, FieldError,
    LoginInput, Rule, ValidationResult,
};
use serde_json::{json, Value};
use std::sync::LazyLock;

/// The schema the login form validates against. Built once, never changed.
pub static LOGIN: LazyLock<Schema> = LazyLock::new(Schema::login);

/// What a password has to contain besides length.
const PASSWORD_CLASSES: &[CharClass] = &[
    CharClass::Lowercase,
    CharClass::Uppercase,
    CharClass::Digit,
    CharClass::OneOf(PASSWORD_SPECIALS),
];

/// A field and the constraints on it, checked in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Which field this is
    field: Field,

    /// What the value has to satisfy. Only the first failure is reported.
    constraints: Vec<Constraint>,
}

impl FieldSchema {
    /// Which field this describes
    pub fn field(&self) -> Field {
        self.field
    }

    /// The constraints, in evaluation order
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Check a raw JSON value for this field, returning the string if it
    /// passes every constraint. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::Missing` or `FieldError::WrongType` when there's
    /// no string to check, or the first failing constraint's error.
    pub fn check<'a>(&self, value: Option<&'a Value>) -> Result<&'a str, FieldError> {
        let value = match value {
            Some(Value::String(value)) => value,
            Some(other) => {
                return Err(FieldError::WrongType {
                    received: json_type(other),
                })
            }
            None => return Err(FieldError::Missing),
        };

        self.constraints
            .iter()
            .try_for_each(|constraint| constraint.check(value))?;

        Ok(value)
    }
}

/// The name of a JSON value's type, for error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An ordered list of fields and the constraints each must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Fields in declaration order, which is also evaluation order
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// An empty schema. Everything passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its constraints. Declaring the same field twice
    /// replaces the earlier declaration but keeps its position.
    #[must_use]
    pub fn field(mut self, field: Field, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        let constraints = constraints.into_iter().collect();

        match self.fields.iter_mut().find(|existing| existing.field == field) {
            Some(existing) => existing.constraints = constraints,
            None => self.fields.push(FieldSchema { field, constraints }),
        }

        self
    }

    /// The login form: a valid email, and a password that's long and varied
    /// enough.
    pub fn login() -> Self {
        Self::new()
            .field(
                Field::Email,
                [Constraint::new(Rule::Email, "Invalid email address")],
            )
            .field(
                Field::Password,
                [
                    Constraint::new(
                        Rule::MinLength(8),
                        "Password must be at least 8 characters long",
                    ),
                    Constraint::new(
                        Rule::ContainsEach(PASSWORD_CLASSES),
                        "Password must include at least one uppercase letter, one lowercase letter, one number, and one special character",
                    ),
                ],
            )
    }

    /// Fields in evaluation order
    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    /// Validate arbitrary JSON. See `validate::validate`.
    pub fn validate(&self, input: &Value) -> ValidationResult {
        validate(self, input)
    }

    /// Validate already-typed input. Gives the same result as validating its
    /// JSON form.
    pub fn validate_input(&self, input: &LoginInput) -> ValidationResult {
        self.validate(&json!({
            "email": input.email,
            "password": input.password,
        }))
    }
}
