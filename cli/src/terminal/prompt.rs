//! Interactive prompts: a plain line read and a raw-mode masked secret.

use std::io::{self, Write};

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

pub fn read_line(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim().to_string())
}

/// Read a secret with echo replaced by `*`. Enter submits, Esc or Ctrl-C
/// cancels.
pub fn read_secret(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    enable_raw_mode().context("enabling raw terminal mode")?;
    let outcome = read_secret_raw();
    let _ = disable_raw_mode();
    println!();

    outcome
}

fn read_secret_raw() -> anyhow::Result<String> {
    let mut secret = String::new();

    loop {
        let Event::Key(key) = event::read().context("reading key event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Esc => anyhow::bail!("input cancelled"),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                anyhow::bail!("input cancelled")
            }
            KeyCode::Backspace => {
                if secret.pop().is_some() {
                    print!("\x08 \x08");
                    io::stdout().flush()?;
                }
            }
            KeyCode::Char(c) => {
                secret.push(c);
                print!("*");
                io::stdout().flush()?;
            }
            _ => {}
        }
    }
}
