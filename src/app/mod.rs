//! Presentation controller.
//!
//! [`App`] owns every piece of review state and never performs I/O itself:
//! [`App::update`] turns a user [`Action`] into state changes plus at most one
//! [`Command`] for the runtime to execute, and [`App::handle_backend_event`]
//! folds finished work back in.

mod action;
#[cfg(test)]
mod tests;

pub use action::Action;

use std::path::PathBuf;

use crate::agent::AgentError;
use crate::ingest::{IngestError, MediaType};
use crate::sample::SAMPLE_DOCUMENT;
use crate::summary::SummaryResult;
use crate::tone::Tone;

pub const COPIED_NOTICE: &str = "Summary copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy the summary to the clipboard.";
pub const SAVE_FAILED: &str = "Failed to save the summary file.";
pub const EDITOR_FAILED: &str = "Failed to open the external editor.";

/// Review phase derived from the status flags, result and error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Extracting,
    Summarizing,
    ResultReady,
    Error,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the document pane.
    Editing,
    /// Typing a file path to upload.
    UploadPath,
}

/// Pane that receives scroll input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Document,
    Brief,
}

/// Work the controller asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ingest { generation: u64, path: PathBuf },
    Summarize { sequence: u64, text: String, tone: Tone },
    CopyToClipboard(String),
    Download(String),
    OpenEditor(String),
}

/// Outcomes flowing back from the runtime.
#[derive(Debug)]
pub enum BackendEvent {
    IngestFinished {
        generation: u64,
        result: Result<String, IngestError>,
    },
    SummaryFinished {
        sequence: u64,
        original_text: String,
        result: Result<String, AgentError>,
    },
    Copied,
    CopyFailed,
    Saved(PathBuf),
    SaveFailed,
    Edited(Option<String>),
}

pub struct App {
    pub input_text: String,
    pub tone: Tone,
    /// True while a PDF is being converted to text.
    pub extracting: bool,
    /// True while a summarization call is in flight.
    pub processing: bool,
    pub result: Option<SummaryResult>,
    pub error: Option<String>,
    /// Transient confirmation shown in the status line.
    pub notice: Option<String>,
    pub input_mode: InputMode,
    pub upload_path: String,
    pub show_help: bool,
    pub focus: Pane,
    pub summary_scroll: u16,
    /// First wrapped row of the document pane shown in normal mode.
    pub document_scroll: u16,
    /// Largest useful `document_scroll`, measured by the view on each frame.
    pub document_scroll_max: u16,
    pub should_quit: bool,
    /// Latest dispatched summarization; older responses are stale.
    sequence: u64,
    /// Latest dispatched ingestion; older results are stale.
    ingest_generation: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            tone: Tone::default(),
            extracting: false,
            processing: false,
            result: None,
            error: None,
            notice: None,
            input_mode: InputMode::Normal,
            upload_path: String::new(),
            show_help: false,
            focus: Pane::Document,
            summary_scroll: 0,
            document_scroll: 0,
            document_scroll_max: 0,
            should_quit: false,
            sequence: 0,
            ingest_generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.processing {
            Phase::Summarizing
        } else if self.extracting {
            Phase::Extracting
        } else if self.error.is_some() {
            Phase::Error
        } else if self.result.is_some() {
            Phase::ResultReady
        } else {
            Phase::Idle
        }
    }

    /// Apply a user action. Returns the work to run, if any.
    pub fn update(&mut self, action: Action) -> Option<Command> {
        if action != Action::None {
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::Summarize => self.summarize(),
            Action::NextTone => {
                if !self.processing {
                    self.tone = self.tone.next();
                }
                None
            }
            Action::PrevTone => {
                if !self.processing {
                    self.tone = self.tone.prev();
                }
                None
            }
            Action::LoadSample => {
                self.input_text = SAMPLE_DOCUMENT.to_string();
                self.document_scroll = 0;
                self.error = None;
                None
            }
            Action::Clear => {
                self.clear();
                None
            }
            Action::StartUpload => {
                if !self.extracting {
                    self.upload_path.clear();
                    self.input_mode = InputMode::UploadPath;
                }
                None
            }
            Action::StartEditing => {
                if !self.extracting {
                    self.input_mode = InputMode::Editing;
                }
                None
            }
            Action::OpenEditor => {
                if self.extracting {
                    return None;
                }
                self.input_mode = InputMode::Normal;
                Some(Command::OpenEditor(self.input_text.clone()))
            }
            Action::Copy => self
                .result
                .as_ref()
                .map(|r| Command::CopyToClipboard(r.summary.clone())),
            Action::Download => self
                .result
                .as_ref()
                .map(|r| Command::Download(r.summary.clone())),
            Action::InsertChar(c) => {
                match self.input_mode {
                    InputMode::Editing if !self.extracting => self.input_text.push(c),
                    InputMode::UploadPath if c != '\n' => self.upload_path.push(c),
                    _ => {}
                }
                None
            }
            Action::DeleteChar => {
                match self.input_mode {
                    InputMode::Editing if !self.extracting => {
                        self.input_text.pop();
                    }
                    InputMode::UploadPath => {
                        self.upload_path.pop();
                    }
                    _ => {}
                }
                None
            }
            Action::Confirm => {
                if self.input_mode == InputMode::UploadPath {
                    return self.submit_upload();
                }
                None
            }
            Action::Cancel => {
                match self.input_mode {
                    InputMode::Normal => self.show_help = false,
                    InputMode::Editing => self.input_mode = InputMode::Normal,
                    InputMode::UploadPath => {
                        self.upload_path.clear();
                        self.input_mode = InputMode::Normal;
                    }
                }
                None
            }
            Action::Paste(text) => {
                self.paste(&text);
                None
            }
            Action::SwitchPane => {
                self.focus = match self.focus {
                    Pane::Document => Pane::Brief,
                    Pane::Brief => Pane::Document,
                };
                None
            }
            Action::ScrollUp => {
                match self.focus {
                    Pane::Document => self.document_scroll = self.document_scroll.saturating_sub(1),
                    Pane::Brief => self.summary_scroll = self.summary_scroll.saturating_sub(1),
                }
                None
            }
            Action::ScrollDown => {
                match self.focus {
                    Pane::Document => {
                        self.document_scroll =
                            self.document_scroll.saturating_add(1).min(self.document_scroll_max);
                    }
                    Pane::Brief if self.result.is_some() => {
                        self.summary_scroll = self.summary_scroll.saturating_add(1);
                    }
                    Pane::Brief => {}
                }
                None
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            Action::None => None,
        }
    }

    /// Queue a file for ingestion, as if its path were submitted in the upload prompt.
    pub fn upload(&mut self, path: PathBuf) -> Option<Command> {
        if self.extracting {
            tracing::debug!(path = %path.display(), "upload refused while extracting");
            return None;
        }

        let media_type = match MediaType::from_path(&path) {
            Ok(media_type) => media_type,
            Err(e) => {
                tracing::warn!(path = %path.display(), "rejected upload: {e}");
                self.error = Some(e.to_string());
                return None;
            }
        };

        if media_type == MediaType::Pdf {
            self.extracting = true;
            self.error = None;
        }
        self.ingest_generation += 1;
        tracing::info!(path = %path.display(), mime = media_type.mime(), "uploading document");
        Some(Command::Ingest {
            generation: self.ingest_generation,
            path,
        })
    }

    /// Fold a finished background job back into the state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::IngestFinished { generation, result } => {
                if generation != self.ingest_generation {
                    tracing::debug!(generation, "discarding stale ingestion result");
                    return;
                }
                self.extracting = false;
                match result {
                    Ok(text) => {
                        self.input_text = text;
                        self.document_scroll = 0;
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(error = ?e, "ingestion failed");
                        self.error = Some(e.to_string());
                    }
                }
            }
            BackendEvent::SummaryFinished {
                sequence,
                original_text,
                result,
            } => {
                if sequence != self.sequence {
                    tracing::debug!(
                        sequence,
                        latest = self.sequence,
                        "discarding stale summary"
                    );
                    return;
                }
                self.processing = false;
                match result {
                    Ok(summary) => {
                        self.result = Some(SummaryResult::new(original_text, summary));
                        self.summary_scroll = 0;
                        self.focus = Pane::Brief;
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            BackendEvent::Copied => self.notice = Some(COPIED_NOTICE.to_string()),
            BackendEvent::CopyFailed => self.error = Some(COPY_FAILED.to_string()),
            BackendEvent::Saved(path) => {
                self.notice = Some(format!("Saved to {}", path.display()));
            }
            BackendEvent::SaveFailed => self.error = Some(SAVE_FAILED.to_string()),
            BackendEvent::Edited(Some(text)) => {
                if !self.extracting {
                    self.input_text = text;
                }
            }
            BackendEvent::Edited(None) => self.error = Some(EDITOR_FAILED.to_string()),
        }
    }

    fn summarize(&mut self) -> Option<Command> {
        if self.processing || self.extracting {
            return None;
        }
        if self.input_text.trim().is_empty() {
            self.error = Some(AgentError::EmptyInput.to_string());
            return None;
        }

        self.error = None;
        self.result = None;
        self.processing = true;
        self.input_mode = InputMode::Normal;
        self.sequence += 1;
        Some(Command::Summarize {
            sequence: self.sequence,
            text: self.input_text.clone(),
            tone: self.tone,
        })
    }

    fn submit_upload(&mut self) -> Option<Command> {
        let raw = std::mem::take(&mut self.upload_path);
        self.input_mode = InputMode::Normal;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.upload(expand_home(trimmed))
    }

    fn paste(&mut self, text: &str) {
        match self.input_mode {
            InputMode::UploadPath => {
                self.upload_path
                    .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
            }
            InputMode::Normal | InputMode::Editing => {
                if self.extracting {
                    return;
                }
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.input_text.push_str(&normalized);
            }
        }
    }

    /// Back to idle: everything reset, in-flight work orphaned.
    fn clear(&mut self) {
        self.input_text.clear();
        self.result = None;
        self.error = None;
        self.notice = None;
        self.processing = false;
        self.extracting = false;
        self.input_mode = InputMode::Normal;
        self.upload_path.clear();
        self.focus = Pane::Document;
        self.summary_scroll = 0;
        self.document_scroll = 0;
        self.sequence += 1;
        self.ingest_generation += 1;
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
