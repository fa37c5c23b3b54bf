// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CompletionFn, InputDevice, LineEditor, OutputDevice, StdMutex,
            lock_ignore_poison};
use std::{collections::VecDeque, sync::Arc};

#[derive(Default)]
#[allow(missing_debug_implementations)]
pub struct MockLineEditorLog {
    pub prompts: Vec<String>,
    pub history: Vec<String>,
    pub init_stream_count: usize,
    pub cleanup_count: usize,
    pub completer: Option<CompletionFn>,
    pub completion_inhibited: bool,
}

/// Shared view of what a [`MockLineEditor`] was asked to do.
#[derive(Clone, Default)]
#[allow(missing_debug_implementations)]
pub struct MockLineEditorState {
    pub log: Arc<StdMutex<MockLineEditorLog>>,
}

impl MockLineEditorState {
    #[must_use]
    pub fn prompts(&self) -> Vec<String> { lock_ignore_poison(&self.log).prompts.clone() }

    #[must_use]
    pub fn read_count(&self) -> usize { lock_ignore_poison(&self.log).prompts.len() }

    #[must_use]
    pub fn history(&self) -> Vec<String> { lock_ignore_poison(&self.log).history.clone() }

    #[must_use]
    pub fn init_stream_count(&self) -> usize { lock_ignore_poison(&self.log).init_stream_count }

    #[must_use]
    pub fn cleanup_count(&self) -> usize { lock_ignore_poison(&self.log).cleanup_count }

    #[must_use]
    pub fn has_completer(&self) -> bool { lock_ignore_poison(&self.log).completer.is_some() }

    #[must_use]
    pub fn is_completion_inhibited(&self) -> bool {
        lock_ignore_poison(&self.log).completion_inhibited
    }
}

/// [`LineEditor`] that answers from a script of lines, then reports end of input.
#[allow(missing_debug_implementations)]
pub struct MockLineEditor {
    script: VecDeque<String>,
    state: MockLineEditorState,
}

impl MockLineEditor {
    #[must_use]
    pub fn new(
        script: impl IntoIterator<Item = impl Into<String>>,
    ) -> (Self, MockLineEditorState) {
        let state = MockLineEditorState::default();
        let this = Self {
            script: script.into_iter().map(Into::into).collect(),
            state: state.clone(),
        };
        (this, state)
    }
}

impl LineEditor for MockLineEditor {
    fn init_stream(&mut self, _input: &InputDevice, _output: &OutputDevice) {
        lock_ignore_poison(&self.state.log).init_stream_count += 1;
    }

    fn set_completer(&mut self, completer: Option<CompletionFn>) {
        let mut log = lock_ignore_poison(&self.state.log);
        log.completer = completer;
        log.completion_inhibited = false;
    }

    fn inhibit_completion(&mut self, inhibit: bool) {
        lock_ignore_poison(&self.state.log).completion_inhibited = inhibit;
    }

    fn cleanup_after_signal(&mut self) { lock_ignore_poison(&self.state.log).cleanup_count += 1; }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        lock_ignore_poison(&self.state.log)
            .prompts
            .push(prompt.to_string());
        self.script.pop_front()
    }

    fn add_history(&mut self, line: &str) {
        lock_ignore_poison(&self.state.log).history.push(line.to_string());
    }
}
