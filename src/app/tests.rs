use super::*;
use crate::agent::ProviderError;

fn app_with_text(text: &str) -> App {
    let mut app = App::new();
    app.input_text = text.to_string();
    app
}

/// Dispatch a summarization and return its sequence number.
fn dispatch_summary(app: &mut App) -> u64 {
    match app.update(Action::Summarize) {
        Some(Command::Summarize { sequence, .. }) => sequence,
        other => panic!("expected summarize command, got {other:?}"),
    }
}

fn finish_summary(app: &mut App, sequence: u64, result: Result<String, AgentError>) {
    let original_text = app.input_text.clone();
    app.handle_backend_event(BackendEvent::SummaryFinished {
        sequence,
        original_text,
        result,
    });
}

fn provider_failure() -> AgentError {
    AgentError::ProviderFailure(ProviderError::Status {
        status: 500,
        body: "boom".into(),
    })
}

fn with_result(text: &str) -> App {
    let mut app = app_with_text(text);
    let seq = dispatch_summary(&mut app);
    finish_summary(&mut app, seq, Ok("Brief.".into()));
    app
}

// ── Initial state ───────────────────────────────────────────────

#[test]
fn starts_idle_with_default_tone() {
    let app = App::new();
    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.tone, Tone::ExecutiveSummary);
    assert!(app.input_text.is_empty());
    assert!(!app.extracting && !app.processing);
}

// ── Summarize ───────────────────────────────────────────────────

#[test]
fn summarize_whitespace_sets_empty_input_error_without_command() {
    let mut app = app_with_text("   \n\t");
    assert_eq!(app.update(Action::Summarize), None);
    assert_eq!(
        app.error.as_deref(),
        Some("Please provide a document to summarize.")
    );
    assert!(!app.processing);
}

#[test]
fn summarize_dispatches_text_and_tone() {
    let mut app = app_with_text("Lease agreement");
    app.update(Action::NextTone);
    app.error = Some("old".into());

    let cmd = app.update(Action::Summarize);
    assert_eq!(
        cmd,
        Some(Command::Summarize {
            sequence: 1,
            text: "Lease agreement".into(),
            tone: Tone::LitigationFocus,
        })
    );
    assert!(app.processing);
    assert!(app.error.is_none());
    assert_eq!(app.phase(), Phase::Summarizing);
}

#[test]
fn starting_a_new_summary_discards_previous_result() {
    let mut app = with_result("Lease");
    assert!(app.result.is_some());
    dispatch_summary(&mut app);
    assert!(app.result.is_none());
}

#[test]
fn success_creates_result_from_dispatched_text() {
    let mut app = app_with_text("Lease");
    let seq = dispatch_summary(&mut app);
    finish_summary(&mut app, seq, Ok("Tenant pays rent monthly.".into()));

    let result = app.result.as_ref().unwrap();
    assert_eq!(result.original_text, "Lease");
    assert_eq!(result.summary, "Tenant pays rent monthly.");
    assert!(result.timestamp > 0);
    assert!(!app.processing);
    assert!(app.error.is_none());
    assert_eq!(app.phase(), Phase::ResultReady);
}

#[test]
fn provider_failure_sets_generic_error_and_no_result() {
    let mut app = app_with_text("Lease");
    let seq = dispatch_summary(&mut app);
    finish_summary(&mut app, seq, Err(provider_failure()));

    assert!(app.result.is_none());
    assert_eq!(
        app.error.as_deref(),
        Some("Failed to process the document. Please ensure the content is valid.")
    );
    assert!(!app.processing);
    assert_eq!(app.phase(), Phase::Error);
}

#[test]
fn summarize_ignored_while_processing_or_extracting() {
    let mut app = app_with_text("Lease");
    dispatch_summary(&mut app);
    assert_eq!(app.update(Action::Summarize), None);

    let mut app = app_with_text("Lease");
    app.extracting = true;
    assert_eq!(app.update(Action::Summarize), None);
    assert!(!app.processing);
}

#[test]
fn stale_summary_response_is_discarded() {
    let mut app = app_with_text("first");
    let first = dispatch_summary(&mut app);
    finish_summary(&mut app, first, Ok("first brief".into()));

    app.input_text = "second".into();
    let second = dispatch_summary(&mut app);
    assert!(second > first);

    // A late answer for the first request must not touch state.
    app.handle_backend_event(BackendEvent::SummaryFinished {
        sequence: first,
        original_text: "first".into(),
        result: Ok("late".into()),
    });
    assert!(app.processing);
    assert!(app.result.is_none());

    finish_summary(&mut app, second, Ok("second brief".into()));
    assert_eq!(app.result.unwrap().summary, "second brief");
}

// ── Tone ────────────────────────────────────────────────────────

#[test]
fn tone_cycles_without_triggering_work() {
    let mut app = app_with_text("Lease");
    assert_eq!(app.update(Action::NextTone), None);
    assert_eq!(app.tone, Tone::LitigationFocus);
    assert_eq!(app.update(Action::PrevTone), None);
    assert_eq!(app.update(Action::PrevTone), None);
    assert_eq!(app.tone, Tone::PlainEnglish);
    assert!(!app.processing);
}

#[test]
fn tone_locked_while_summarizing() {
    let mut app = app_with_text("Lease");
    dispatch_summary(&mut app);
    app.update(Action::NextTone);
    assert_eq!(app.tone, Tone::ExecutiveSummary);
}

// ── Sample & clear ──────────────────────────────────────────────

#[test]
fn load_sample_clears_error_but_keeps_result() {
    let mut app = with_result("Lease");
    app.error = Some("Unsupported file format. Please upload a .pdf or .txt file.".into());

    app.update(Action::LoadSample);
    assert_eq!(app.input_text, SAMPLE_DOCUMENT);
    assert!(app.error.is_none());
    assert_eq!(app.result.as_ref().unwrap().summary, "Brief.");
}

#[test]
fn load_sample_allowed_while_extracting() {
    let mut app = App::new();
    app.upload(PathBuf::from("contract.pdf"));
    assert!(app.extracting);

    app.update(Action::LoadSample);
    assert_eq!(app.input_text, SAMPLE_DOCUMENT);
    assert!(app.extracting);
}

#[test]
fn clear_resets_everything_from_any_state() {
    let mut app = with_result("Lease");
    app.error = Some("x".into());
    app.update(Action::Clear);
    assert!(app.input_text.is_empty());
    assert!(app.result.is_none());
    assert!(app.error.is_none());
    assert_eq!(app.phase(), Phase::Idle);

    let mut app = app_with_text("Lease");
    dispatch_summary(&mut app);
    app.update(Action::Clear);
    assert!(!app.processing);
    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.focus, Pane::Document);
    assert_eq!(app.document_scroll, 0);
}

#[test]
fn response_after_clear_is_discarded() {
    let mut app = app_with_text("Lease");
    let seq = dispatch_summary(&mut app);
    app.update(Action::Clear);
    finish_summary(&mut app, seq, Ok("late brief".into()));
    assert!(app.result.is_none());
    assert!(app.input_text.is_empty());
}

// ── Upload ──────────────────────────────────────────────────────

#[test]
fn unsupported_upload_sets_error_and_keeps_text() {
    let mut app = app_with_text("existing");
    assert_eq!(app.upload(PathBuf::from("scan.png")), None);
    assert_eq!(app.input_text, "existing");
    assert_eq!(
        app.error.as_deref(),
        Some("Unsupported file format. Please upload a .pdf or .txt file.")
    );
    assert!(!app.extracting);
}

#[test]
fn pdf_upload_sets_extracting_until_finished() {
    let mut app = app_with_text("existing");
    app.error = Some("old".into());
    let generation = match app.upload(PathBuf::from("contract.pdf")) {
        Some(Command::Ingest { generation, path }) => {
            assert_eq!(path, PathBuf::from("contract.pdf"));
            generation
        }
        other => panic!("expected ingest, got {other:?}"),
    };
    assert!(app.extracting);
    assert!(app.error.is_none());
    assert_eq!(app.phase(), Phase::Extracting);

    app.handle_backend_event(BackendEvent::IngestFinished {
        generation,
        result: Ok("Page one\n\nPage two".into()),
    });
    assert!(!app.extracting);
    assert_eq!(app.input_text, "Page one\n\nPage two");
}

#[test]
fn failed_pdf_keeps_text_and_clears_extracting() {
    let mut app = app_with_text("existing");
    let Some(Command::Ingest { generation, .. }) = app.upload(PathBuf::from("locked.PDF")) else {
        panic!("expected ingest command");
    };
    app.handle_backend_event(BackendEvent::IngestFinished {
        generation,
        result: Err(IngestError::ExtractionFailure("encrypted".into())),
    });
    assert!(!app.extracting);
    assert_eq!(app.input_text, "existing");
    assert_eq!(
        app.error.as_deref(),
        Some("Failed to extract text from PDF. Ensure the file is not password protected.")
    );
}

#[test]
fn text_upload_replaces_text_verbatim() {
    let mut app = app_with_text("old");
    let Some(Command::Ingest { generation, .. }) = app.upload(PathBuf::from("notes.txt")) else {
        panic!("expected ingest command");
    };
    assert!(!app.extracting);
    app.handle_backend_event(BackendEvent::IngestFinished {
        generation,
        result: Ok("  raw contents \n".into()),
    });
    assert_eq!(app.input_text, "  raw contents \n");
}

#[test]
fn upload_refused_while_extracting() {
    let mut app = App::new();
    app.upload(PathBuf::from("a.pdf")).unwrap();
    assert_eq!(app.upload(PathBuf::from("b.pdf")), None);
    app.update(Action::StartUpload);
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn ingestion_finished_after_clear_is_discarded() {
    let mut app = App::new();
    let Some(Command::Ingest { generation, .. }) = app.upload(PathBuf::from("a.pdf")) else {
        panic!("expected ingest command");
    };
    app.update(Action::Clear);
    app.handle_backend_event(BackendEvent::IngestFinished {
        generation,
        result: Ok("late".into()),
    });
    assert!(app.input_text.is_empty());
    assert!(!app.extracting);
}

#[test]
fn upload_prompt_submits_trimmed_path_and_resets() {
    let mut app = App::new();
    app.update(Action::StartUpload);
    assert_eq!(app.input_mode, InputMode::UploadPath);
    app.update(Action::Paste(" brief.txt\n".into()));
    app.update(Action::InsertChar('x'));
    app.update(Action::DeleteChar);

    let cmd = app.update(Action::Confirm);
    assert!(matches!(
        cmd,
        Some(Command::Ingest { ref path, .. }) if path == &PathBuf::from("brief.txt")
    ));
    assert!(app.upload_path.is_empty());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn empty_upload_prompt_does_nothing() {
    let mut app = App::new();
    app.update(Action::StartUpload);
    assert_eq!(app.update(Action::Confirm), None);
    assert!(app.error.is_none());
}

// ── Editing ─────────────────────────────────────────────────────

#[test]
fn typing_and_pasting_edit_the_document() {
    let mut app = App::new();
    app.update(Action::StartEditing);
    for c in "Hi".chars() {
        app.update(Action::InsertChar(c));
    }
    app.update(Action::InsertChar('\n'));
    app.update(Action::Paste("a\r\nb".into()));
    app.update(Action::DeleteChar);
    assert_eq!(app.input_text, "Hi\na\n");

    app.update(Action::Cancel);
    assert_eq!(app.input_mode, InputMode::Normal);
    app.update(Action::InsertChar('z'));
    assert_eq!(app.input_text, "Hi\na\n");
}

#[test]
fn external_editor_result_replaces_text() {
    let mut app = app_with_text("draft");
    assert_eq!(
        app.update(Action::OpenEditor),
        Some(Command::OpenEditor("draft".into()))
    );
    app.handle_backend_event(BackendEvent::Edited(Some("final".into())));
    assert_eq!(app.input_text, "final");

    app.handle_backend_event(BackendEvent::Edited(None));
    assert_eq!(app.input_text, "final");
    assert_eq!(app.error.as_deref(), Some(EDITOR_FAILED));
}

// ── Copy & download ─────────────────────────────────────────────

#[test]
fn copy_and_download_require_a_result() {
    let mut app = app_with_text("Lease");
    assert_eq!(app.update(Action::Copy), None);
    assert_eq!(app.update(Action::Download), None);

    let mut app = with_result("Lease");
    assert_eq!(
        app.update(Action::Copy),
        Some(Command::CopyToClipboard("Brief.".into()))
    );
    assert_eq!(
        app.update(Action::Download),
        Some(Command::Download("Brief.".into()))
    );
}

#[test]
fn completion_events_set_notices() {
    let mut app = with_result("Lease");
    app.handle_backend_event(BackendEvent::Copied);
    assert_eq!(app.notice.as_deref(), Some(COPIED_NOTICE));

    app.handle_backend_event(BackendEvent::Saved(PathBuf::from("Summary_2024-01-01.txt")));
    assert_eq!(
        app.notice.as_deref(),
        Some("Saved to Summary_2024-01-01.txt")
    );

    // any user action dismisses the notice
    app.update(Action::ScrollDown);
    assert!(app.notice.is_none());

    app.handle_backend_event(BackendEvent::SaveFailed);
    assert_eq!(app.error.as_deref(), Some(SAVE_FAILED));
}

// ── Misc ────────────────────────────────────────────────────────

#[test]
fn scrolling_saturates_and_resets_on_new_result() {
    let mut app = with_result("Lease");
    app.update(Action::ScrollUp);
    assert_eq!(app.summary_scroll, 0);
    app.update(Action::ScrollDown);
    app.update(Action::ScrollDown);
    assert_eq!(app.summary_scroll, 2);

    let seq = dispatch_summary(&mut app);
    finish_summary(&mut app, seq, Ok("New.".into()));
    assert_eq!(app.summary_scroll, 0);
}

#[test]
fn scrolling_follows_the_focused_pane() {
    let mut app = app_with_text("Clause 1.\nClause 2.");
    assert_eq!(app.focus, Pane::Document);
    app.document_scroll_max = 3;

    for _ in 0..5 {
        app.update(Action::ScrollDown);
    }
    assert_eq!(app.document_scroll, 3);
    assert_eq!(app.summary_scroll, 0);

    app.update(Action::SwitchPane);
    assert_eq!(app.focus, Pane::Brief);
    app.update(Action::ScrollUp);
    assert_eq!(app.document_scroll, 3);

    app.update(Action::SwitchPane);
    app.update(Action::ScrollUp);
    assert_eq!(app.document_scroll, 2);
}

#[test]
fn new_result_moves_focus_to_the_brief() {
    let mut app = app_with_text("Lease");
    let seq = dispatch_summary(&mut app);
    assert_eq!(app.focus, Pane::Document);
    finish_summary(&mut app, seq, Ok("Brief.".into()));
    assert_eq!(app.focus, Pane::Brief);
}

#[test]
fn help_toggles_and_escape_closes_it() {
    let mut app = App::new();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::Cancel);
    assert!(!app.show_help);
}

#[test]
fn quit_sets_flag() {
    let mut app = App::new();
    app.update(Action::Quit);
    assert!(app.should_quit);
}
