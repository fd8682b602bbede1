//! Interactive login (`--auth`).

use std::fs;
use std::io::{self, BufRead, Write};

use dialoguer::Password;
use grammers_client::SignInError;
use tracing::{info, warn};

use super::TelegramClient;
use crate::config::ClientConfig;
use crate::error::{Result, TgExportError};

/// Logs in from scratch and saves a fresh session.
///
/// Stale session files are removed first, then the user is prompted for the
/// phone number (unless configured), the login code and, for accounts with
/// two-step verification, the password.
pub async fn bootstrap(config: &ClientConfig) -> Result<()> {
    remove_session_files(config);

    let client = TelegramClient::connect(config).await?;
    info!("starting interactive authorization");
    login(&client, config).await?;
    client.save_session()?;

    info!(session = %config.session_path().display(), "authorization complete, session saved");
    Ok(())
}

/// Deletes every session file a previous login may have left.
///
/// Failures are logged and otherwise ignored; a leftover file only means the
/// next connect reuses it.
pub fn remove_session_files(config: &ClientConfig) {
    for path in config.session_files() {
        match fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "removed session file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "could not remove session file"),
        }
    }
}

async fn login(client: &TelegramClient, config: &ClientConfig) -> Result<()> {
    let phone = match &config.phone {
        Some(phone) => phone.clone(),
        None => prompt("Phone number (international format): ")?,
    };

    let token = client
        .client
        .request_login_code(&phone)
        .await
        .map_err(|e| TgExportError::Auth(format!("could not request login code: {}", e)))?;
    let code = prompt("Enter the code you received: ")?;

    match client.client.sign_in(&token, &code).await {
        Ok(_) => Ok(()),
        Err(SignInError::PasswordRequired(password_token)) => {
            let password = prompt_password(&password_prompt(password_token.hint()))?;
            client
                .client
                .check_password(password_token, password.as_str())
                .await
                .map(|_| ())
                .map_err(|e| TgExportError::Auth(format!("password rejected: {}", e)))
        }
        Err(e) => Err(TgExportError::Auth(format!("sign in failed: {}", e))),
    }
}

fn password_prompt(hint: Option<&str>) -> String {
    match hint.map(str::trim).filter(|h| !h.is_empty()) {
        Some(hint) => format!("Two-step verification password (hint: {})", hint),
        None => "Two-step verification password".to_string(),
    }
}

/// Reads the password without echoing it.
fn prompt_password(message: &str) -> Result<String> {
    Password::new()
        .with_prompt(message)
        .interact()
        .map_err(|e| TgExportError::Auth(format!("could not read password: {}", e)))
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_string();
    if answer.is_empty() {
        return Err(TgExportError::Auth("no input given".to_string()));
    }
    Ok(answer)
}
