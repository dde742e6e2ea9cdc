use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::form::FormField;
use crate::app::{AppState, InputMode};

/// Create or edit form, depending on the form state.
pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let editing = app.form.is_editing();
    let (title, tone, submit) = if editing {
        ("Update User", app.theme.edit_form, "Enter: update  Esc: cancel")
    } else {
        ("Create New User", app.theme.create_form, "Enter: add user  Esc: back to list")
    };
    let typing = app.input_mode == InputMode::Form;

    let mut lines = Vec::with_capacity(4);
    for field in [FormField::Name, FormField::Email] {
        let focused = typing && app.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let value = app.form.field(field);
        let value_span = if value.is_empty() {
            Span::styled(field.label(), Style::default().fg(app.theme.muted))
        } else {
            Span::styled(value.to_string(), Style::default().fg(app.theme.text))
        };
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker}{:<6} ", field.label())),
            value_span,
            Span::raw(cursor),
        ]));
    }
    lines.push(Line::raw(""));
    let hint = if typing { submit } else { "n: start typing" };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(app.theme.accent).add_modifier(Modifier::ITALIC),
    )));

    let border = if typing { tone } else { app.theme.border };
    let p = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(tone).add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
