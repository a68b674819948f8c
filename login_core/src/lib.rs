//! Validation for the login form, shared by every login client (TUI, `check`)

/// What someone typed into the form, and the names of its fields.
pub mod input;
pub use input::{Field, LoginInput};

/// Single checks with the message shown when they fail.
pub mod constraint;
pub use constraint::{CharClass, Constraint, Rule};

/// Things that can be wrong with a field.
pub mod error;
pub use error::FieldError;

/// The ordered list of fields and their constraints.
pub mod schema;
pub use schema::{Schema, LOGIN};

/// Running input through a schema.
pub mod validate;
pub use validate::{validate, FieldErrors, ValidationResult};
