/// Everything the user can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Summarize,
    NextTone,
    PrevTone,
    LoadSample,
    Clear,
    /// Open the upload path prompt.
    StartUpload,
    /// Start typing into the document pane.
    StartEditing,
    /// Edit the document in `$EDITOR`.
    OpenEditor,
    Copy,
    Download,
    /// Character typed into the active text field (document or upload path).
    InsertChar(char),
    DeleteChar,
    /// Enter in the upload prompt.
    Confirm,
    /// Esc: leave the active text field or close the help overlay.
    Cancel,
    /// Bracketed paste from the terminal.
    Paste(String),
    /// Move scroll focus between the document and brief panes.
    SwitchPane,
    /// Scroll the focused pane.
    ScrollUp,
    ScrollDown,
    ToggleHelp,
    None,
}
