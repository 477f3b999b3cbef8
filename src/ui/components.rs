//! UI components: document pane, brief pane, status line, overlays.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, InputMode, Pane, Phase};

const ACCENT: Color = Color::Rgb(214, 196, 160);
const MUTED: Color = Color::Gray;

/// Render the whole screen. Records the document pane's scroll bound on `app`.
pub fn render(f: &mut Frame, app: &mut App) {
    let [header, body, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, header, app);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    render_document(f, left, app);
    render_brief(f, right, app);

    render_status(f, status, app);
    render_footer(f, footer, app);

    if app.extracting {
        render_extracting(f, left);
    }
    if app.show_help {
        render_help(f);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let phase = match app.phase() {
        Phase::Idle => "ready",
        Phase::Extracting => "extracting",
        Phase::Summarizing => "analysing",
        Phase::ResultReady => "brief ready",
        Phase::Error => "error",
    };
    let line = Line::from(vec![
        Span::styled(
            " LexiBrief ",
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" AI Legal Summarizer  "),
        Span::styled("Focus: ", Style::default().fg(MUTED)),
        Span::styled(app.tone.label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  [{phase}]"), Style::default().fg(MUTED)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_document(f: &mut Frame, area: Rect, app: &mut App) {
    let editing = app.input_mode == InputMode::Editing;
    let highlighted = editing || (app.focus == Pane::Document && app.input_mode == InputMode::Normal);
    let border = if highlighted { Style::default().fg(ACCENT) } else { Style::default() };
    let title = if editing { " Original Document (editing) " } else { " Original Document " };

    let block = Block::bordered()
        .title(title)
        .title_bottom(
            Line::from(format!(" Characters: {} ", app.input_text.chars().count()))
                .alignment(Alignment::Right),
        )
        .border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let content = if app.input_text.is_empty() && !editing {
        Paragraph::new("Paste legal text here (i to type, e for $EDITOR) or upload a file with o...")
            .style(Style::default().fg(MUTED))
    } else {
        let mut text = app.input_text.clone();
        if editing {
            text.push('\u{258f}');
        }
        Paragraph::new(text)
    };
    let paragraph = content.wrap(Wrap { trim: false });

    // scroll bound in wrapped rows
    let rows = paragraph.line_count(inner.width);
    let max_scroll = rows.saturating_sub(inner.height as usize).min(u16::MAX as usize) as u16;
    app.document_scroll_max = max_scroll;
    app.document_scroll = app.document_scroll.min(max_scroll);

    // typing keeps the cursor row in view
    let scroll = if editing { max_scroll } else { app.document_scroll };
    f.render_widget(paragraph.scroll((scroll, 0)), inner);
}

fn render_brief(f: &mut Frame, area: Rect, app: &App) {
    match &app.result {
        Some(result) => {
            let block = Block::bordered()
                .title(format!(" One Page Brief: {} ", app.tone))
                .title_bottom(
                    Line::from(format!(
                        " Summary Length: {} characters  Words: {} ",
                        result.char_count(),
                        result.word_count()
                    ))
                    .alignment(Alignment::Right),
                )
                .border_style(if app.focus == Pane::Brief {
                    Style::default().fg(ACCENT)
                } else {
                    Style::default()
                });
            let paragraph = Paragraph::new(result.summary.as_str())
                .wrap(Wrap { trim: false })
                .scroll((app.summary_scroll, 0))
                .block(block);
            f.render_widget(paragraph, area);
        }
        None => {
            let (heading, detail) = if app.processing {
                ("Analysing...", "Generating a one page brief.")
            } else {
                (
                    "Review your document",
                    "Paste text or upload a document to generate a high-precision summary.",
                )
            };
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(Span::styled(detail, Style::default().fg(MUTED))),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::bordered().title(" Summarized Legal Document "));
            f.render_widget(paragraph, area);
        }
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!(" ! {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(notice) = &app.notice {
        Line::from(Span::styled(format!(" {notice}"), Style::default().fg(Color::Green)))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::UploadPath => Line::from(vec![
            Span::styled(" Upload (.pdf/.txt): ", Style::default().fg(ACCENT)),
            Span::raw(app.upload_path.as_str()),
            Span::raw("\u{258f}"),
        ]),
        InputMode::Editing => hint_line(&[("Esc", "done"), ("Ctrl+s", "summarize")]),
        InputMode::Normal => hint_line(&[
            ("s", "summarize"),
            ("t", "focus"),
            ("o", "upload"),
            ("i", "type"),
            ("l", "sample"),
            ("y", "copy"),
            ("d", "download"),
            ("c", "clear"),
            ("?", "help"),
            ("q", "quit"),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label} "), Style::default().fg(MUTED)));
    }
    Line::from(spans)
}

fn render_extracting(f: &mut Frame, pane: Rect) {
    let popup = centered_rect(28, 3, pane);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new("Extracting content...")
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

fn render_help(f: &mut Frame) {
    let lines = vec![
        key_line("s / Enter", "Summarize the document"),
        key_line("t / T", "Next / previous summary focus"),
        key_line("o / u", "Upload a .pdf or .txt file"),
        key_line("i", "Type into the document (Esc to stop)"),
        key_line("e", "Edit the document in $EDITOR"),
        key_line("l", "Load the sample agreement"),
        key_line("y", "Copy brief to clipboard (OSC 52)"),
        key_line("d", "Download brief as Summary_<date>.txt"),
        key_line("Tab", "Switch scroll focus between panes"),
        key_line("j / k", "Scroll the focused pane"),
        key_line("c", "Clear everything"),
        key_line("?", "Toggle this help"),
        key_line("q / Ctrl+c", "Quit"),
    ];
    let popup = centered_rect(56, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Keyboard Shortcuts ")),
        popup,
    );
}

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {key:<12}"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(desc),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
