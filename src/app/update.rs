//! State transitions and the event loop.
//!
//! Every user-facing operation is a function over `&mut AppState` and a
//! `&dyn UserBackend`. Failures are logged; create/update/delete failures also
//! raise a blocking alert, load failures do not.
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::{error, info};

use crate::api::{ApiError, UserBackend, UserPayload, UserRecord};
use crate::app::form::{self, FormField, FormState, UpdateUserDraft};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState, Theme};
use crate::ui;

pub const CREATE_FAILED_MSG: &str = "Failed to create user. Please try again.";
pub const UPDATE_FAILED_MSG: &str = "Failed to update user. Please try again.";
pub const DELETE_FAILED_MSG: &str = "Failed to delete user. Please try again.";
pub const CONFIRM_DELETE_MSG: &str = "Are you sure you want to delete this user?";

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
    api: &dyn UserBackend,
) -> Result<()> {
    load(app, api);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, api, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Replace the list with the server's, newest first. Failures are only logged.
pub fn load(app: &mut AppState, api: &dyn UserBackend) {
    let backend = app.backend_name().to_string();
    match api.list_users(&backend) {
        Ok(mut users) => {
            users.reverse();
            info!(%backend, count = users.len(), "loaded users");
            app.users = users;
            app.clamp_selection();
        }
        Err(err) => error!(%backend, error = %err, "error fetching users"),
    }
}

pub fn submit_create(app: &mut AppState, api: &dyn UserBackend) {
    let FormState::Create(draft) = &app.form else {
        return;
    };
    if let Err(msg) = form::check_fields(&draft.name, &draft.email) {
        app.alert(msg);
        return;
    }
    let payload = UserPayload::new(draft.name.clone(), draft.email.clone());
    let backend = app.backend_name().to_string();
    match api.create_user(&backend, &payload) {
        Ok(created) => {
            info!(%backend, id = created.id, "created user");
            app.users.insert(0, created);
            app.selected_index = 0;
            app.form = FormState::default();
            app.focus = FormField::Name;
        }
        Err(err) => {
            error!(%backend, error = %err, "error creating user");
            app.alert(CREATE_FAILED_MSG);
        }
    }
}

/// Copy `record` into the edit form and switch to edit mode.
pub fn begin_edit(app: &mut AppState, record: &UserRecord) {
    app.form = FormState::Edit(UpdateUserDraft {
        id: record.id.to_string(),
        name: record.name.clone(),
        email: record.email.clone(),
    });
    app.focus = FormField::Name;
    app.input_mode = InputMode::Form;
}

pub fn submit_update(app: &mut AppState, api: &dyn UserBackend) {
    let FormState::Edit(draft) = &app.form else {
        return;
    };
    if let Err(msg) = form::check_fields(&draft.name, &draft.email) {
        app.alert(msg);
        return;
    }
    let backend = app.backend_name().to_string();
    let id = match draft.id.trim().parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            let err = ApiError::InvalidId(draft.id.clone());
            error!(%backend, error = %err, "error updating user");
            app.alert(UPDATE_FAILED_MSG);
            return;
        }
    };
    let payload = UserPayload::new(draft.name.clone(), draft.email.clone());
    match api.update_user(&backend, id, &payload) {
        Ok(updated) => {
            info!(%backend, id, "updated user");
            for user in app.users.iter_mut().filter(|u| u.id == id) {
                *user = updated.clone();
            }
            app.form = FormState::default();
            app.focus = FormField::Name;
            app.input_mode = InputMode::Normal;
        }
        Err(err) => {
            error!(%backend, id, error = %err, "error updating user");
            app.alert(UPDATE_FAILED_MSG);
        }
    }
}

/// Drop the edit draft and return to an empty create form.
pub fn cancel_edit(app: &mut AppState) {
    app.form = FormState::default();
    app.focus = FormField::Name;
    app.input_mode = InputMode::Normal;
}

/// Open the confirmation dialog for the selected user.
pub fn request_delete(app: &mut AppState) {
    if let Some(user) = app.selected_user() {
        let modal = ModalState::ConfirmDelete {
            id: user.id,
            name: user.name.clone(),
            selected: 1,
        };
        app.open_modal(modal);
    }
}

/// Close the confirmation dialog; on `confirmed`, delete and drop the row.
pub fn resolve_delete(app: &mut AppState, api: &dyn UserBackend, confirmed: bool) {
    let Some(ModalState::ConfirmDelete { id, .. }) = app.modal.clone() else {
        return;
    };
    app.close_modal();
    if confirmed {
        delete_user(app, api, id);
    }
}

/// Delete by id after confirmation has been given.
pub fn delete_user(app: &mut AppState, api: &dyn UserBackend, id: i64) {
    let backend = app.backend_name().to_string();
    match api.delete_user(&backend, id) {
        Ok(()) => {
            info!(%backend, id, "deleted user");
            app.users.retain(|u| u.id != id);
            app.clamp_selection();
        }
        Err(err) => {
            error!(%backend, id, error = %err, "error deleting user");
            app.alert(DELETE_FAILED_MSG);
        }
    }
}

/// Re-fetch the selected user and replace its row. Failures are only logged.
pub fn refresh_selected(app: &mut AppState, api: &dyn UserBackend) {
    let Some(id) = app.selected_user().map(|u| u.id) else {
        return;
    };
    let backend = app.backend_name().to_string();
    match api.fetch_user(&backend, id) {
        Ok(fresh) => {
            if let Some(slot) = app.users.iter_mut().find(|u| u.id == id) {
                *slot = fresh;
            }
        }
        Err(err) => error!(%backend, id, error = %err, "error fetching user"),
    }
}

/// Cycle to the next backend variant, re-theme and reload from it.
///
/// List and drafts stay as they are until the load succeeds.
pub fn switch_backend(app: &mut AppState, api: &dyn UserBackend) {
    if app.backends.len() < 2 {
        return;
    }
    app.active_backend = (app.active_backend + 1) % app.backends.len();
    app.theme = Theme::for_backend(app.backend_name());
    info!(backend = app.backend_name(), "switched backend");
    load(app, api);
}

pub fn move_selection(app: &mut AppState, delta: isize) {
    if app.users.is_empty() {
        app.selected_index = 0;
        return;
    }
    let last = app.users.len() - 1;
    app.selected_index = app.selected_index.saturating_add_signed(delta).min(last);
}

/// Route a key press to the handler for the current mode. Returns `false` to quit.
pub fn handle_key(app: &mut AppState, api: &dyn UserBackend, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => return handle_normal_key(app, api, key),
        InputMode::Form => handle_form_key(app, api, key),
        InputMode::Modal => handle_modal_key(app, api, key.code),
    }
    true
}

fn handle_normal_key(app: &mut AppState, api: &dyn UserBackend, key: KeyEvent) -> bool {
    let rpp = app.rows_per_page.max(1) as isize;
    match app.keymap.resolve(&key) {
        Some(KeyAction::Quit) => return false,
        Some(KeyAction::MoveUp) => move_selection(app, -1),
        Some(KeyAction::MoveDown) => move_selection(app, 1),
        Some(KeyAction::PageUp) => move_selection(app, -rpp),
        Some(KeyAction::PageDown) => move_selection(app, rpp),
        Some(KeyAction::FocusForm) => app.input_mode = InputMode::Form,
        Some(KeyAction::EditSelected) => {
            if let Some(user) = app.selected_user().cloned() {
                begin_edit(app, &user);
            }
        }
        Some(KeyAction::DeleteSelected) => request_delete(app),
        Some(KeyAction::Reload) => load(app, api),
        Some(KeyAction::RefreshSelected) => refresh_selected(app, api),
        Some(KeyAction::SwitchBackend) => switch_backend(app, api),
        Some(KeyAction::Ignore) | None => {}
    }
    true
}

fn handle_form_key(app: &mut AppState, api: &dyn UserBackend, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.form.is_editing() {
                cancel_edit(app);
            } else {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Enter => {
            if app.form.is_editing() {
                submit_update(app, api);
            } else {
                submit_create(app, api);
            }
        }
        KeyCode::Backspace => {
            app.form.field_mut(app.focus).pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.field_mut(app.focus).push(c);
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, api: &dyn UserBackend, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Alert { .. }) => {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                app.close_modal();
            }
        }
        Some(ModalState::ConfirmDelete { selected, .. }) => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *selected = 1 - *selected;
            }
            KeyCode::Char('y') => resolve_delete(app, api, true),
            KeyCode::Char('n') | KeyCode::Esc => resolve_delete(app, api, false),
            KeyCode::Enter => {
                let confirmed = *selected == 0;
                resolve_delete(app, api, confirmed);
            }
            _ => {}
        },
        None => app.close_modal(),
    }
}
