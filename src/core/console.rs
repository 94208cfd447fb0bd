//! Operator-facing line I/O.
//!
//! Everything the operator sees or types goes through a [`Console`], which
//! the session receives explicitly. Diagnostics use the `log` facade and
//! never share this channel.

use crate::errors::AppError;
use log::trace;
use std::io::{self, BufRead, Write};

pub trait Console: Send {
    /// Prints one line of operator-facing text.
    fn say(&mut self, text: &str);

    /// Shows `prompt` and reads one line without its line terminator.
    /// A closed input stream is an [`AppError::Input`].
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError>;
}

/// Asks a question with an optional default; an empty answer yields the default.
pub fn prompt(console: &mut dyn Console, question: &str, default_value: Option<&str>) -> Result<String, AppError> {
    let full_prompt = match default_value {
        Some(default) => format!("{} (default: \"{}\") ", question, default),
        None => question.to_string(),
    };
    let answer = console.read_line(&full_prompt)?;
    match default_value {
        Some(default) if answer.trim().is_empty() => Ok(default.to_string()),
        _ => Ok(answer),
    }
}

/// Re-asks until the operator answers y/yes/n/no.
pub fn ask_yes_no(console: &mut dyn Console, question: &str) -> Result<bool, AppError> {
    loop {
        let answer = console.read_line(&format!("{} (y/n): ", question))?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                trace!("Unrecognised yes/no answer '{}'", other);
                console.say("please enter yes or no");
            }
        }
    }
}

/// Terminal console on stdin/stdout.
#[derive(Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt).and_then(|_| stdout.flush())
            .map_err(|e| AppError::Input(format!("failed to write prompt: {}", e)))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| AppError::Input(format!("failed to read operator input: {}", e)))?;
        if read == 0 {
            return Err(AppError::Input("operator input stream closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::Console;
    use crate::errors::AppError;
    use log::debug;
    use std::collections::VecDeque;

    /// Replays canned answers and records a transcript of everything shown.
    #[derive(Debug, Default)]
    pub struct ScriptedConsole {
        answers: VecDeque<String>,
        transcript: Vec<String>,
    }

    impl ScriptedConsole {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            ScriptedConsole {
                answers: answers.into_iter().map(Into::into).collect(),
                transcript: Vec::new(),
            }
        }

        pub fn transcript(&self) -> &[String] {
            &self.transcript
        }

        pub fn remaining_answers(&self) -> usize {
            self.answers.len()
        }

        /// True if any shown line or prompt contains `needle`.
        pub fn mentions(&self, needle: &str) -> bool {
            self.transcript.iter().any(|line| line.contains(needle))
        }
    }

    impl Console for ScriptedConsole {
        fn say(&mut self, text: &str) {
            self.transcript.push(text.to_string());
        }

        fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
            self.transcript.push(prompt.to_string());
            match self.answers.pop_front() {
                Some(answer) => {
                    debug!("Scripted answer to '{}': '{}'", prompt.trim(), answer);
                    Ok(answer)
                }
                None => Err(AppError::Input("operator input stream closed".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedConsole;
    use super::*;

    #[test]
    fn prompt_uses_default_on_empty_answer() {
        let mut console = ScriptedConsole::new(["", "  custom "]);
        assert_eq!(prompt(&mut console, "Where?", Some("/tmp/a")).unwrap(), "/tmp/a");
        assert_eq!(prompt(&mut console, "Where?", Some("/tmp/a")).unwrap(), "  custom ");
        assert!(console.mentions("(default: \"/tmp/a\")"));
    }

    #[test]
    fn ask_yes_no_reprompts_until_valid() {
        let mut console = ScriptedConsole::new(["maybe", "", "YES"]);
        assert!(ask_yes_no(&mut console, "Continue?").unwrap());
        let complaints = console.transcript().iter().filter(|l| *l == "please enter yes or no").count();
        assert_eq!(complaints, 2);

        let mut console = ScriptedConsole::new(["n"]);
        assert!(!ask_yes_no(&mut console, "Continue?").unwrap());
    }

    #[test]
    fn exhausted_script_is_an_input_error() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let err = ask_yes_no(&mut console, "Continue?").unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
    }
}
