// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end flows through [`TtySession`] with a mock console.

use pretty_assertions::assert_eq;
use r3bl_ttyio::{CONTROL_D, HiddenModeControl, HiddenModeState, InstrumentedAllocator,
                 MockConsoleOpener, MockLineEditor, TtyConfig, TtyError, TtySession,
                 fake_flags};
use std::sync::{Arc,
                atomic::{AtomicUsize, Ordering}};
use test_case::test_case;

fn new_session(input: &[u8]) -> (TtySession, MockConsoleOpener) {
    let opener = MockConsoleOpener::new(input);
    (TtySession::new_with_opener(TtyConfig::default(), opener.clone()), opener)
}

#[test_case(b"a\tb\n", b"a b"; "single tab")]
#[test_case(b"\t\tx\t\n", b"  x "; "many tabs")]
#[test_case(b"no tabs\n", b"no tabs"; "no tab")]
fn tabs_become_spaces(input: &[u8], expected: &[u8]) {
    let (session, _opener) = new_session(input);
    let line = session.read_line("> ").unwrap();
    assert_eq!(line.as_bytes(), expected);
}

#[test]
fn no_break_space_is_dropped_in_both_readers() {
    let (session, _opener) = new_session(b"\xa0a\xa0b\n\xa0c\xa0\n");
    let plain = session.read_line("> ").unwrap();
    let hidden = session.read_hidden_line("> ").unwrap();
    assert_eq!(plain.as_bytes(), b"ab");
    assert_eq!(hidden.as_bytes(), b"c");
}

#[test]
fn input_without_newline_is_eof_sentinel() {
    let (session, _opener) = new_session(b"first\nsecond");
    assert_eq!(session.read_line("> ").unwrap().as_bytes(), b"first");

    let line = session.read_line("> ").unwrap();
    assert_eq!(line.as_bytes(), [CONTROL_D]);
    assert!(line.is_eof());
}

#[test]
fn erase_after_emit_writes_blanks_once() {
    let (session, opener) = new_session(b"");
    session.emit(format_args!("abc")).unwrap();
    opener.stdout().clear();

    session.erase_prompt().unwrap();
    assert_eq!(opener.stdout().get_copy_of_buffer(), b"\r   \r");
    assert_eq!(session.last_prompt_length(), 0);

    opener.stdout().clear();
    session.erase_prompt().unwrap();
    assert!(opener.stdout().get_copy_of_buffer().is_empty());
}

#[test]
fn hidden_read_leaves_attributes_as_found() {
    let (session, opener) = new_session(b"correct horse\n");
    let before = opener.terminal().local_flags();

    let secret = session.read_hidden_line("Passphrase: ").unwrap();

    assert_eq!(secret.as_bytes(), b"correct horse");
    assert_eq!(opener.terminal().local_flags(), before);
    assert_eq!(opener.hidden_mode().state(), HiddenModeState::Normal);
}

#[test]
fn signal_during_hidden_read_restores_exactly_once() {
    let (session, opener) = new_session(b"secret\n");
    let control = opener.hidden_mode();
    let terminal = opener.terminal();
    let reads = Arc::new(AtomicUsize::new(0));
    let restored_by_signal = Arc::new(AtomicUsize::new(0));

    {
        let reads = Arc::clone(&reads);
        let restored_by_signal = Arc::clone(&restored_by_signal);
        opener.on_read(move || {
            // The third byte arrives together with a signal.
            if reads.fetch_add(1, Ordering::SeqCst) == 2 && control.restore_after_signal() {
                restored_by_signal.fetch_add(1, Ordering::SeqCst);
            }
        });
    }

    let secret = session.read_hidden_line("> ").unwrap();
    assert_eq!(secret.as_bytes(), b"secret");
    assert_eq!(restored_by_signal.load(Ordering::SeqCst), 1);

    // Enter and the signal restore. The guard's restore found nothing owed.
    assert_eq!(terminal.set_count(), 2);
    assert_eq!(terminal.local_flags(), fake_flags::COOKED);
    assert!(!session.cleanup_after_signal());
    assert_eq!(terminal.set_count(), 2);
}

#[test]
fn batch_and_no_terminal_refuse_reads() {
    let opener = MockConsoleOpener::new(b"x\n");
    let session = TtySession::new_with_opener(TtyConfig::default(), opener.clone());

    assert!(!session.set_batch_mode(Some(true)));
    assert!(matches!(
        session.read_line("> "),
        Err(TtyError::BatchModeRefusal)
    ));
    assert!(matches!(
        session.read_hidden_line("> "),
        Err(TtyError::BatchModeRefusal)
    ));

    session.set_batch_mode(Some(false));
    session.set_no_terminal(true);
    let error = session.read_line("> ").unwrap_err();
    assert!(matches!(error, TtyError::NoTerminalRefusal));
    assert_eq!(error.exit_code(), 2);

    assert_eq!(opener.open_count(), 0);
}

#[test]
fn editor_path_trims_and_filters_history() {
    let (session, _opener) = new_session(b"");
    let (editor, state) = MockLineEditor::new(["  show  ", "ls", "   "]);
    session.register_line_editor(Box::new(editor));

    assert_eq!(session.read_line("cmd> ").unwrap().as_bytes(), b"show");
    assert_eq!(session.read_line("cmd> ").unwrap().as_bytes(), b"ls");
    assert_eq!(session.read_line("cmd> ").unwrap().as_bytes(), b"");
    assert!(session.read_line("cmd> ").unwrap().is_eof());

    assert_eq!(state.history(), vec!["show".to_string()]);
    assert_eq!(state.init_stream_count(), 1);
}

#[test]
fn hidden_read_bypasses_editor() {
    let (session, _opener) = new_session(b"pin\n");
    let (editor, state) = MockLineEditor::new(["from editor"]);
    session.register_line_editor(Box::new(editor));

    let secret = session.read_hidden_line("PIN: ").unwrap();
    assert_eq!(secret.as_bytes(), b"pin");
    assert_eq!(state.read_count(), 0);
}

#[test]
fn console_opens_lazily_and_once() {
    let (session, opener) = new_session(b"a\nb\n");
    assert_eq!(opener.open_count(), 0);

    session.read_line("> ").unwrap();
    session.read_hidden_line("> ").unwrap();
    session.erase_prompt().unwrap();
    assert_eq!(opener.open_count(), 1);
}

#[test]
fn grown_secret_leaves_no_remnant() {
    let input: Vec<u8> = b"0123456789".repeat(10).into_iter().chain([b'\n']).collect();
    let (session, _opener) = new_session(&input);
    let allocator = InstrumentedAllocator::default();

    let secret = session.read_hidden_line_in("> ", allocator.clone()).unwrap();
    assert_eq!(secret.capacity(), 150);
    drop(secret);

    let released = allocator.released_blocks();
    assert_eq!(released.len(), 3);
    for block in released {
        assert!(block.iter().all(|&byte| byte == 0));
    }
}

#[test]
fn ask_yes_no_composes_read_and_erase() {
    let (session, opener) = new_session(b"Y\nnope\n");
    assert!(session.ask_yes_no("Sure? ").unwrap());
    assert!(!session.ask_yes_no("Sure? ").unwrap());
    let written = opener.stdout().get_copy_of_buffer_as_string();
    assert_eq!(written.matches("Sure? ").count(), 2);
    assert_eq!(session.last_prompt_length(), 0);
}
