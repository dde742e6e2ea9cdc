//! Shared UI components (status bar, dialogs).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::update::CONFIRM_DELETE_MSG;
use crate::app::{AppState, InputMode, ModalState};

/// Render the bottom status bar with mode, count and the main keys.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "LIST",
        InputMode::Form if app.form.is_editing() => "EDIT",
        InputMode::Form => "CREATE",
        InputMode::Modal => "DIALOG",
    };
    let keys = |action| app.keymap.keys_for(action).join("/");
    let hints = format!(
        "{}: edit  {}: delete  {}: new  {}: reload  {}: backend  {}: quit",
        keys(KeyAction::EditSelected),
        keys(KeyAction::DeleteSelected),
        keys(KeyAction::FocusForm),
        keys(KeyAction::Reload),
        keys(KeyAction::SwitchBackend),
        keys(KeyAction::Quit),
    );
    let msg = format!("mode: {mode}  users:{}  {hints}", app.users.len());
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_alert_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Alert { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let width = 46u16.min(max_w);
        let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
        let height = (approx_lines + 4).min(area.height.saturating_sub(4).max(5));
        let rect = centered_rect(width, height, area);
        let lines = vec![
            Line::raw(message.clone()),
            Line::raw(""),
            Line::from(Span::styled(
                "[OK]",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Alert")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.danger)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

pub fn render_confirm_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::ConfirmDelete { id, name, selected } = state {
        let rect = centered_rect(50, 7, area);
        let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
        let no = if *selected == 1 { "[No]" } else { " No  " };
        let body = format!("{CONFIRM_DELETE_MSG}\n{name} (id {id})\n\n  {yes}    {no}");
        let p = Paragraph::new(body).block(
            Block::default()
                .title("Confirm delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.danger)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
