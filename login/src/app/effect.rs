use super::Action;
use login_core::LoginInput;

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Hand validated login data off to whatever logs the user in. There's no
    /// server to talk to, so for now this only records that it happened.
    Submit(LoginInput),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    #[expect(clippy::unused_async)]
    pub async fn run(self) -> Option<Action> {
        match self {
            Self::Submit(data) => {
                // `LoginInput`'s `Debug` hides the password.
                tracing::info!(?data, "form data is valid");

                Some(Action::Submitted(data.email))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn submit_reports_who_was_submitted() {
        let effect = Effect::Submit(LoginInput::new("user@example.com", "Abcdef1@"));

        assert_eq!(
            effect.run().await,
            Some(Action::Submitted("user@example.com".to_string()))
        );
    }
}
