//! Interactive sign-in for sessions that are not authorized yet.

use crate::telegram::ConnectError;
use dialoguer::{Input, Password};
use grammers_client::{Client, SignInError};

/// Walks the user through phone, login code and, when the account has
/// two-step verification enabled, password.
pub async fn sign_in(client: &Client) -> Result<(), ConnectError> {
    let phone = ask("Please enter your phone")?;
    let token = client
        .request_login_code(&phone)
        .await
        .map_err(|e| ConnectError::SignIn(e.into()))?;

    let code = ask("Please enter the code you received")?;

    match client.sign_in(&token, &code).await {
        Ok(user) => {
            tracing::info!(user_id = user.id(), "Signed in");
            Ok(())
        }
        Err(SignInError::PasswordRequired(password_token)) => {
            // Typed without echo
            let password = Password::new()
                .with_prompt(password_prompt(password_token.hint()))
                .interact()
                .map_err(ConnectError::Prompt)?;

            let user = client
                .check_password(password_token, password.trim())
                .await
                .map_err(|e| ConnectError::SignIn(e.into()))?;
            tracing::info!(user_id = user.id(), "Signed in with password");
            Ok(())
        }
        Err(e) => Err(ConnectError::SignIn(e.into())),
    }
}

fn ask(prompt: &str) -> Result<String, ConnectError> {
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(ConnectError::Prompt)?;

    Ok(answer.trim().to_string())
}

fn password_prompt(hint: Option<&str>) -> String {
    match hint.filter(|hint| !hint.is_empty()) {
        Some(hint) => format!("Please enter your password (hint: {hint})"),
        None => "Please enter your password".to_string(),
    }
}
