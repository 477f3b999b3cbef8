//! Clipboard copy via the OSC 52 terminal escape sequence.
//!
//! Works in Ghostty, iTerm2, kitty, WezTerm, and most modern terminals,
//! including over SSH.

use base64::Engine;
use std::io::Write;

/// The escape sequence that asks the terminal to place `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

/// Write the copy sequence directly to `out`, bypassing any terminal backend buffer.
pub fn copy_to(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}
