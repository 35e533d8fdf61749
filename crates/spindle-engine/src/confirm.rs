//! Yes/no confirmation capability injected into the orchestrators.

use std::io::{self, BufRead, Write};

pub trait Confirm {
    /// Ask `prompt`; `default` is the answer assumed on an empty reply.
    fn confirm(&mut self, prompt: &str, default: bool) -> bool;
}

/// Prompts on a writer and reads the answer from a line reader.
///
/// An empty answer or end of input means `default`. Anything starting with
/// `y` or `n` (any case) is taken as yes or no; other input asks again.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Interactive prompt on the controlling terminal.
pub type TerminalConfirm = PromptConfirm<io::StdinLock<'static>, io::Stderr>;

impl TerminalConfirm {
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            if write!(self.output, "{prompt} {hint} ")
                .and_then(|()| self.output.flush())
                .is_err()
            {
                return default;
            }
            let mut answer = String::new();
            match self.input.read_line(&mut answer) {
                Ok(0) | Err(_) => return default,
                Ok(_) => {}
            }
            match answer.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
                None => return default,
                Some('y') => return true,
                Some('n') => return false,
                Some(_) => {}
            }
        }
    }
}

/// Takes the default answer for every prompt without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Confirm for AcceptDefaults {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        tracing::info!(prompt, answer = default, "using default answer");
        default
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm(&mut self, prompt: &str, _default: bool) -> bool {
        tracing::info!(prompt, "answering yes");
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNo;

impl Confirm for AlwaysNo {
    fn confirm(&mut self, prompt: &str, _default: bool) -> bool {
        tracing::info!(prompt, "answering no");
        false
    }
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        (**self).confirm(prompt, default)
    }
}
