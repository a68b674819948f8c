use login_core::{ValidationResult, LOGIN};
use std::{
    io::{self, Read, Write},
    process::ExitCode,
};

/// Validate a JSON value read from `input` and write the result as JSON to
/// `output`. Returns whether validation passed.
///
/// # Errors
///
/// Fails if `input` isn't JSON or either stream can't be used. Input that is
/// JSON but the wrong shape is a validation failure, not an error.
pub fn check(input: impl Read, mut output: impl Write) -> Result<bool, Problem> {
    let value: serde_json::Value = serde_json::from_reader(input)?;

    let result = LOGIN.validate(&value);
    tracing::debug!(passed = result.is_success(), "checked input");

    serde_json::to_writer(&mut output, &result)?;
    writeln!(output)?;

    Ok(matches!(result, ValidationResult::Success { .. }))
}

/// Run `check` against stdin and stdout, turning the outcome into an exit
/// code.
pub fn run() -> ExitCode {
    match check(io::stdin().lock(), io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(problem) => {
            tracing::error!(?problem, "could not check input");
            eprintln!("{problem}");
            ExitCode::from(2)
        }
    }
}

/// Problems that can happen while running `check`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We couldn't read input or write output.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// The input wasn't JSON, or the result couldn't be written as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
