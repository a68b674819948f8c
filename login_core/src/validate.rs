use crate::{Field, FieldError, LoginInput, Schema};
use serde::Serialize;
use serde_json::Value;
use std::collections::{btree_map, BTreeMap};

/// Run `input` through `schema`.
///
/// Fields are checked in the order the schema declares them, and each field
/// reports only its first failing constraint. Anything at all can be passed
/// in: missing fields, the wrong types, extra keys, or something that isn't
/// an object. Every one of those ends up as a per-field error rather than a
/// panic, so the caller always gets something it can render.
pub fn validate(schema: &Schema, input: &Value) -> ValidationResult {
    let mut data = LoginInput::default();
    let mut errors = FieldErrors::default();

    for field_schema in schema.fields() {
        let field = field_schema.field();

        // `Value::get` is `None` for non-objects too, so those are treated as
        // having no fields at all.
        match field_schema.check(input.get(field.as_str())) {
            Ok(value) => data.set(field, value.to_owned()),
            Err(error) => errors.insert(field, error),
        }
    }

    if errors.is_empty() {
        ValidationResult::Success { data }
    } else {
        ValidationResult::Failure { errors }
    }
}

/// The outcome of validation. Serializes as either `{"data": {...}}` or
/// `{"errors": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationResult {
    /// Every field passed. `data` holds exactly the declared fields, as given.
    Success {
        /// The validated input
        data: LoginInput,
    },

    /// At least one field failed.
    Failure {
        /// One message per failing field
        errors: FieldErrors,
    },
}

impl ValidationResult {
    /// Did every field pass?
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert to a `Result` for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors if validation failed.
    pub fn into_result(self) -> Result<LoginInput, FieldErrors> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { errors } => Err(errors),
        }
    }
}

/// Field name to the first thing wrong with it. Only failing fields are
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    /// Record the error for a field. Later errors for the same field are
    /// ignored, since the first failure is the one we show.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_insert(error);
    }

    /// The error for a field, if it failed
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Did this field fail?
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// How many fields failed
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Did nothing fail?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields and their errors, in field order
    pub fn iter(&self) -> btree_map::Iter<'_, Field, FieldError> {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Constraint, Rule, LOGIN};
    use proptest::{prop_assert, prop_assert_eq, proptest};
    use serde_json::json;

    const LENGTH: &str = "Password must be at least 8 characters long";
    const VARIETY: &str = "Password must include at least one uppercase letter, one lowercase letter, one number, and one special character";
    const EMAIL: &str = "Invalid email address";

    fn failure(errors: &[(Field, FieldError)]) -> ValidationResult {
        let mut out = FieldErrors::default();
        for (field, error) in errors {
            out.insert(*field, error.clone());
        }

        ValidationResult::Failure { errors: out }
    }

    mod scenarios {
        use super::*;

        #[test]
        fn valid_input_passes_unchanged() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "Abcdef1@"}),
            );

            assert_eq!(
                result,
                ValidationResult::Success {
                    data: LoginInput::new("user@example.com", "Abcdef1@")
                }
            );
        }

        #[test]
        fn bad_email() {
            let result = validate(
                &LOGIN,
                &json!({"email": "not-an-email", "password": "Abcdef1@"}),
            );

            assert_eq!(result, failure(&[(Field::Email, FieldError::Format(EMAIL))]));
        }

        #[test]
        fn short_password() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "short1@"}),
            );

            assert_eq!(
                result,
                failure(&[(Field::Password, FieldError::Strength(LENGTH))])
            );
        }

        #[test]
        fn weak_password() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "alllowercase1"}),
            );

            assert_eq!(
                result,
                failure(&[(Field::Password, FieldError::Strength(VARIETY))])
            );
        }

        #[test]
        fn both_bad() {
            let result = validate(&LOGIN, &json!({"email": "bad", "password": "short"}));

            assert_eq!(
                result,
                failure(&[
                    (Field::Email, FieldError::Format(EMAIL)),
                    (Field::Password, FieldError::Strength(LENGTH)),
                ])
            );
        }

        #[test]
        fn both_empty() {
            let result = validate(&LOGIN, &json!({"email": "", "password": ""}));

            assert_eq!(
                result,
                failure(&[
                    (Field::Email, FieldError::Format(EMAIL)),
                    (Field::Password, FieldError::Strength(LENGTH)),
                ])
            );
        }

        #[test]
        fn length_message_wins_over_variety() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "ab"}),
            );

            assert_eq!(
                result
                    .into_result()
                    .unwrap_err()
                    .get(Field::Password)
                    .cloned(),
                Some(FieldError::Strength(LENGTH))
            );
        }
    }

    mod browser_compatible_passwords {
        use super::*;

        #[test]
        fn emoji_count_as_two_characters() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "Ab1@😀😀"}),
            );

            assert_eq!(
                result,
                ValidationResult::Success {
                    data: LoginInput::new("user@example.com", "Ab1@😀😀")
                }
            );
        }

        #[test]
        fn variety_must_come_before_a_line_break() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "ABCDEFG1@\nx"}),
            );

            assert_eq!(
                result,
                failure(&[(Field::Password, FieldError::Strength(VARIETY))])
            );
        }
    }

    mod malformed_input {
        use super::*;

        #[test]
        fn missing_fields_are_required() {
            let result = validate(&LOGIN, &json!({}));

            assert_eq!(
                result,
                failure(&[
                    (Field::Email, FieldError::Missing),
                    (Field::Password, FieldError::Missing),
                ])
            );
        }

        #[test]
        fn one_missing_field_does_not_hide_the_other() {
            let result = validate(&LOGIN, &json!({"password": "ab"}));

            assert_eq!(
                result,
                failure(&[
                    (Field::Email, FieldError::Missing),
                    (Field::Password, FieldError::Strength(LENGTH)),
                ])
            );
        }

        #[test]
        fn wrong_types() {
            let result = validate(&LOGIN, &json!({"email": null, "password": 12_345_678}));

            assert_eq!(
                result,
                failure(&[
                    (Field::Email, FieldError::WrongType { received: "null" }),
                    (Field::Password, FieldError::WrongType { received: "number" }),
                ])
            );
        }

        #[test]
        fn non_objects_have_no_fields() {
            for input in [json!(null), json!("user@example.com"), json!([1, 2]), json!(3)] {
                let result = validate(&LOGIN, &input);

                assert_eq!(
                    result,
                    failure(&[
                        (Field::Email, FieldError::Missing),
                        (Field::Password, FieldError::Missing),
                    ]),
                    "{input}"
                );
            }
        }

        #[test]
        fn extra_keys_are_dropped() {
            let result = validate(
                &LOGIN,
                &json!({
                    "email": "user@example.com",
                    "password": "Abcdef1@",
                    "remember_me": true,
                }),
            );

            assert_eq!(
                result.into_result(),
                Ok(LoginInput::new("user@example.com", "Abcdef1@"))
            );
        }
    }

    mod other_schemas {
        use super::*;

        #[test]
        fn empty_schema_passes_anything() {
            assert!(validate(&Schema::new(), &json!(42)).is_success());
        }

        #[test]
        fn undeclared_fields_are_not_checked() {
            let schema = Schema::new().field(Field::Email, [Constraint::new(Rule::Email, EMAIL)]);

            let result = validate(&schema, &json!({"email": "user@example.com"}));

            assert_eq!(
                result,
                ValidationResult::Success {
                    data: LoginInput::new("user@example.com", "")
                }
            );
        }
    }

    mod serialize {
        use super::*;

        #[test]
        fn success_shape() {
            let result = validate(
                &LOGIN,
                &json!({"email": "user@example.com", "password": "Abcdef1@"}),
            );

            assert_eq!(
                serde_json::to_value(&result).unwrap(),
                json!({"data": {"email": "user@example.com", "password": "Abcdef1@"}})
            );
        }

        #[test]
        fn failure_shape() {
            let result = validate(&LOGIN, &json!({"email": "bad", "password": 1}));

            assert_eq!(
                serde_json::to_value(&result).unwrap(),
                json!({"errors": {
                    "email": "Invalid email address",
                    "password": "Expected string, received number",
                }})
            );
        }
    }

    mod field_errors {
        use super::*;

        #[test]
        fn first_insert_wins() {
            let mut errors = FieldErrors::default();

            errors.insert(Field::Password, FieldError::Strength(LENGTH));
            errors.insert(Field::Password, FieldError::Strength(VARIETY));

            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get(Field::Password),
                Some(&FieldError::Strength(LENGTH))
            );
        }

        #[test]
        fn iterates_in_field_order() {
            let mut errors = FieldErrors::default();

            errors.insert(Field::Password, FieldError::Missing);
            errors.insert(Field::Email, FieldError::Missing);

            let fields: Vec<Field> = errors.iter().map(|(field, _)| *field).collect();

            assert_eq!(fields, vec![Field::Email, Field::Password]);
        }
    }

    mod into_result {
        use super::*;

        #[test]
        fn success_is_ok() {
            let input = LoginInput::new("user@example.com", "Abcdef1@");

            assert_eq!(LOGIN.validate_input(&input).into_result(), Ok(input));
        }

        #[test]
        fn failure_is_err() {
            let errors = LOGIN
                .validate_input(&LoginInput::new("bad", "Abcdef1@"))
                .into_result()
                .unwrap_err();

            assert!(errors.contains(Field::Email));
            assert!(!errors.contains(Field::Password));
        }
    }

    proptest! {
        #[test]
        fn deterministic(input: LoginInput) {
            prop_assert_eq!(LOGIN.validate_input(&input), LOGIN.validate_input(&input));
        }

        #[test]
        fn typed_and_json_input_agree(input: LoginInput) {
            let json = serde_json::to_value(&input).unwrap();

            prop_assert_eq!(LOGIN.validate_input(&input), validate(&LOGIN, &json));
        }

        #[test]
        fn errors_only_for_failing_fields(input: LoginInput) {
            let result = LOGIN.validate_input(&input);

            let email_ok = Rule::Email.holds(&input.email);
            let password_ok = LOGIN
                    .fields()
                    .find(|schema| schema.field() == Field::Password)
                    .unwrap()
                    .constraints()
                    .iter()
                    .all(|constraint| constraint.rule().holds(&input.password));

            match result {
                ValidationResult::Success { data } => {
                    prop_assert!(email_ok && password_ok);
                    prop_assert_eq!(data, input);
                }
                ValidationResult::Failure { errors } => {
                    prop_assert!(!errors.is_empty());
                    prop_assert_eq!(errors.contains(Field::Email), !email_ok);
                    prop_assert_eq!(errors.contains(Field::Password), !password_ok);
                }
            }
        }

        #[test]
        fn valid_input_always_passes_unchanged(
            email in crate::test::email(),
            password in crate::test::strong_password(),
        ) {
            let input = LoginInput::new(email, password);

            prop_assert_eq!(
                LOGIN.validate_input(&input),
                ValidationResult::Success { data: input }
            );
        }

        #[test]
        fn short_passwords_get_the_length_message(
            email in crate::test::email(),
            password in "[a-zA-Z0-9@$!%*?&#]{0,7}",
        ) {
            let result = LOGIN.validate_input(&LoginInput::new(email, password));

            prop_assert_eq!(
                result,
                failure(&[(Field::Password, FieldError::Strength(LENGTH))])
            );
        }
    }
}
