//! Interactive terminal session: create an account, log in, then serve the
//! numbered menu until the user exits.
//!
//! Everything before login is fatal; everything after it is reported and the
//! menu comes back.

use crate::render::{Theme, render_account, render_detail, render_listing};
use crate::{Client, Error, Outcome, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CheckMessages,
    ViewMessage,
    Exit,
}

impl MenuChoice {
    /// Parse a line of user input; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CheckMessages),
            "2" => Some(Self::ViewMessage),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the whole session against `client`.
///
/// Returns the error that stopped the run before login; after login the only
/// errors are terminal I/O failures.
pub async fn run<R, W>(client: &mut Client, input: &mut R, out: &mut W, theme: Theme) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", theme.title("Temporary Email Client"))?;
    sign_in(client, out, theme).await?;
    menu(client, input, out, theme).await
}

/// Create the account and log in with it.
pub async fn sign_in<W: Write>(client: &mut Client, out: &mut W, theme: Theme) -> Result<()> {
    writeln!(out, "Creating new email account...")?;
    match client.create_account().await {
        Ok(account) => render_account(out, &account, theme)?,
        Err(err) => {
            let text = match err {
                Error::NoDomain => "No domains available",
                _ => "Failed to create account",
            };
            writeln!(out, "{}", theme.error(text))?;
            return Err(err);
        }
    }

    writeln!(out, "\n{}", theme.success("Logging in..."))?;
    if let Err(err) = client.login().await {
        writeln!(out, "{}", theme.error("Login failed"))?;
        return Err(err);
    }
    writeln!(out, "{}", theme.success("Successfully logged in!"))?;
    Ok(())
}

/// Serve the menu until the user picks exit or input ends.
pub async fn menu<R, W>(client: &Client, input: &mut R, out: &mut W, theme: Theme) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        writeln!(out, "\n{}", theme.heading("Menu:"))?;
        writeln!(out, "1. Check messages")?;
        writeln!(out, "2. View message content")?;
        writeln!(out, "3. Exit")?;

        let Some(line) = prompt(input, out, "\nEnter your choice (1-3): ").await? else {
            break;
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::CheckMessages) => {
                writeln!(out, "\n{}", theme.emphasis("Checking messages..."))?;
                show_messages(client, out, theme).await?;
            }
            Some(MenuChoice::ViewMessage) => {
                let Some(id) = prompt(input, out, "Enter message ID: ").await? else {
                    break;
                };
                if id.is_empty() {
                    continue;
                }
                show_message(client, &id, out, theme).await?;
            }
            Some(MenuChoice::Exit) => break,
            None => writeln!(out, "{}", theme.error("Invalid choice"))?,
        }
    }

    writeln!(out, "{}", theme.warning("Goodbye!"))?;
    Ok(())
}

async fn show_messages<W: Write>(client: &Client, out: &mut W, theme: Theme) -> Result<()> {
    let messages = match client.list_messages().await {
        Outcome::Found(messages) => messages,
        Outcome::Empty => Vec::new(),
        Outcome::Failed(err) => {
            tracing::warn!(error = %err, "listing messages failed");
            Vec::new()
        }
    };
    render_listing(out, &messages, theme)?;
    Ok(())
}

async fn show_message<W: Write>(client: &Client, id: &str, out: &mut W, theme: Theme) -> Result<()> {
    match client.fetch_message(id).await {
        Outcome::Found(message) => {
            writeln!(out, "\n{}", theme.emphasis("Message Content:"))?;
            render_detail(out, &message)?;
        }
        Outcome::Empty => writeln!(out, "{}", theme.error("Message not found"))?,
        Outcome::Failed(err) => {
            tracing::warn!(error = %err, id, "fetching message failed");
            writeln!(out, "{}", theme.error("Message not found"))?;
        }
    }
    Ok(())
}

/// Print `text`, then read one trimmed line. `None` means end of input.
async fn prompt<R, W>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
