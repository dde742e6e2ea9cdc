//! Rendering. Layout: header, form, user list, status bar; dialogs on top.
pub mod components;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, root[0], app);
    form::render_form(f, root[1], app);
    users::render_users_table(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if let Some(state) = app.modal.clone() {
        match &state {
            ModalState::Alert { .. } => components::render_alert_modal(f, f.area(), app, &state),
            ModalState::ConfirmDelete { .. } => {
                components::render_confirm_modal(f, f.area(), app, &state)
            }
        }
    }
}

fn render_header(f: &mut Frame, area: ratatui::layout::Rect, app: &AppState) {
    let mut spans = vec![
        Span::styled(
            app.header_title(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  logo: {}  ", app.logo_path())),
    ];
    if app.backends.len() > 1 {
        for (idx, name) in app.backends.iter().enumerate() {
            let label = if idx == app.active_backend {
                format!("[{name}] ")
            } else {
                format!("{name} ")
            };
            spans.push(Span::raw(label));
        }
    }
    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title("user-board")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}
