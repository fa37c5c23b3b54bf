// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{TtyResult, TtySession};

/// Decides whether an answer means "yes".
pub trait AnswerPredicate {
    fn is_yes(&self, answer: &str) -> bool;
}

/// `y` and `yes` in any case, plus any `extra_yes` words (localized answers supplied by
/// the host). Matching is on the trimmed answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnglishAnswers {
    pub extra_yes: Vec<String>,
}

impl EnglishAnswers {
    #[must_use]
    pub fn with_extra_yes(extra_yes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            extra_yes: extra_yes.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnswerPredicate for EnglishAnswers {
    fn is_yes(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        ["y", "yes"]
            .into_iter()
            .chain(self.extra_yes.iter().map(String::as_str))
            .any(|yes| yes.to_lowercase() == answer)
    }
}

impl TtySession {
    /// Ask `prompt`, erase it, and check the answer with the session's predicate.
    /// End of input is "no".
    ///
    /// # Errors
    ///
    /// See [`TtySession::read_line()`].
    pub fn ask_yes_no(&self, prompt: &str) -> TtyResult<bool> {
        self.ask_yes_no_with(prompt, self.answers.as_ref())
    }

    /// Same as [`Self::ask_yes_no()`] with an explicit predicate.
    ///
    /// # Errors
    ///
    /// See [`TtySession::read_line()`].
    pub fn ask_yes_no_with(&self, prompt: &str, answers: &dyn AnswerPredicate) -> TtyResult<bool> {
        let line = self.read_line(prompt)?;
        self.erase_prompt()?;
        Ok(answers.is_yes(&line.trimmed()))
    }
}
