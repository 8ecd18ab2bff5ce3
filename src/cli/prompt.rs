use std::io::{self, BufRead, Write};

use tokio::runtime::{Handle, RuntimeFlavor};

use crate::sync::Confirm;

/// Asks on stderr and reads one line from stdin. Anything but `y`/`yes`
/// (or a read failure) counts as no.
///
/// On a multi-threaded runtime the read runs under `block_in_place` so the
/// worker's other tasks move elsewhere while it waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        blocking(|| ask(prompt, &mut io::stdin().lock(), &mut io::stderr()))
    }
}

/// Run blocking terminal I/O without stalling a multi-threaded runtime.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

fn ask(prompt: &str, input: &mut impl BufRead, echo: &mut impl Write) -> bool {
    if write!(echo, "{prompt} [y/N] ").and_then(|_| echo.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(err) => {
            tracing::debug!("confirmation read failed: {err}");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
