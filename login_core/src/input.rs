use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The fields a login form knows about, in the order they appear on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Email to use for contact and login.
    Email,

    /// Plaintext password to use for login.
    Password,
}

impl Field {
    /// The key this field uses in JSON input and in error mappings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, untrusted values from the login form. Any string is accepted here;
/// use a `Schema` to find out whether they're any good.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct LoginInput {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,
}

impl LoginInput {
    /// Construct a new `LoginInput`
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Replace the value of a single field
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }
}

/// Passwords should never end up in logs, so `Debug` only says whether one
/// was entered.
impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field(
                "password",
                &if self.password.is_empty() {
                    "<empty>"
                } else {
                    "<redacted>"
                },
            )
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod field {
        use super::*;
        use serde_json::Value;

        #[test]
        fn email_sorts_before_password() {
            assert!(Field::Email < Field::Password);
        }

        #[test]
        fn serializes_as_lowercase_key() {
            for field in [Field::Email, Field::Password] {
                assert_eq!(
                    serde_json::to_value(field).unwrap(),
                    Value::String(field.as_str().to_string())
                );
            }
        }
    }

    mod set {
        use super::*;

        #[test]
        fn replaces_the_named_field() {
            let mut input = LoginInput::default();

            input.set(Field::Email, "user@example.com".to_string());
            input.set(Field::Password, "Abcdef1@".to_string());

            assert_eq!(input, LoginInput::new("user@example.com", "Abcdef1@"));
        }
    }

    mod debug {
        use super::*;

        #[test]
        fn does_not_show_password() {
            let input = LoginInput::new("user@example.com", "hunter2!");

            let out = format!("{input:?}");

            assert!(out.contains("user@example.com"), "{out}");
            assert!(!out.contains("hunter2!"), "{out}");
            assert!(out.contains("<redacted>"), "{out}");
        }

        #[test]
        fn says_when_password_is_empty() {
            let input = LoginInput::new("user@example.com", "");

            assert!(format!("{input:?}").contains("<empty>"));
        }
    }

    mod wire {
        use super::*;

        #[test]
        fn reads_wire_shape() {
            let input: LoginInput =
                serde_json::from_str(r#"{"email":"user@example.com","password":"Abcdef1@"}"#)
                    .unwrap();

            assert_eq!(input, LoginInput::new("user@example.com", "Abcdef1@"));
        }
    }
}
