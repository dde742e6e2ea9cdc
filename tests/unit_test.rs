// Unit tests for user-board
// Reducers are driven through an in-memory backend that records every call.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use user_board::api::{ApiError, UserBackend, UserPayload, UserRecord};

#[derive(Default)]
struct FakeBackend {
    tables: RefCell<HashMap<String, Vec<UserRecord>>>,
    next_id: Cell<i64>,
    fail: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    fn with_users(backend: &str, users: Vec<UserRecord>) -> Self {
        let fake = Self::default();
        let max = users.iter().map(|u| u.id).max().unwrap_or(0);
        fake.next_id.set(max + 1);
        fake.tables.borrow_mut().insert(backend.to_string(), users);
        fake
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.fail.get() {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

impl UserBackend for FakeBackend {
    fn list_users(&self, backend: &str) -> Result<Vec<UserRecord>, ApiError> {
        self.record(format!("GET {backend}"))?;
        Ok(self.tables.borrow().get(backend).cloned().unwrap_or_default())
    }

    fn fetch_user(&self, backend: &str, id: i64) -> Result<UserRecord, ApiError> {
        self.record(format!("GET {backend}/{id}"))?;
        self.tables
            .borrow()
            .get(backend)
            .and_then(|t| t.iter().find(|u| u.id == id).cloned())
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })
    }

    fn create_user(&self, backend: &str, payload: &UserPayload) -> Result<UserRecord, ApiError> {
        self.record(format!("POST {backend}"))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let rec = UserRecord {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
        };
        self.tables
            .borrow_mut()
            .entry(backend.to_string())
            .or_default()
            .push(rec.clone());
        Ok(rec)
    }

    fn update_user(
        &self,
        backend: &str,
        id: i64,
        payload: &UserPayload,
    ) -> Result<UserRecord, ApiError> {
        self.record(format!("PUT {backend}/{id}"))?;
        Ok(UserRecord {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
        })
    }

    fn delete_user(&self, backend: &str, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE {backend}/{id}"))
    }
}

fn user(id: i64, name: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;
    use user_board::app::AppState;
    use user_board::app::update::load;

    #[test]
    fn load_reverses_server_order() {
        let api = FakeBackend::with_users("go", vec![user(1, "Ann"), user(2, "Bob"), user(3, "Cid")]);
        let mut app = AppState::default();
        load(&mut app, &api);
        let ids: Vec<i64> = app.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(api.calls(), vec!["GET go".to_string()]);
    }

    #[test]
    fn failed_load_is_silent_and_keeps_list() {
        let api = FakeBackend::with_users("go", vec![user(1, "Ann")]);
        let mut app = AppState::default();
        app.users = vec![user(9, "Old")];
        api.fail.set(true);
        load(&mut app, &api);
        assert_eq!(app.users, vec![user(9, "Old")]);
        assert!(app.modal.is_none());
    }

    #[test]
    fn load_clamps_selection_when_list_shrinks() {
        let api = FakeBackend::with_users("go", vec![user(1, "Ann")]);
        let mut app = AppState::default();
        app.users = vec![user(1, "Ann"), user(2, "Bob"), user(3, "Cid")];
        app.selected_index = 2;
        load(&mut app, &api);
        assert_eq!(app.selected_index, 0);
    }
}

#[cfg(test)]
mod create_tests {
    use super::*;
    use user_board::app::form::{FormState, INVALID_EMAIL_MSG, NewUserDraft, REQUIRED_FIELDS_MSG};
    use user_board::app::update::{CREATE_FAILED_MSG, submit_create};
    use user_board::app::{AppState, ModalState};

    fn app_with_draft(name: &str, email: &str) -> AppState {
        let mut app = AppState::default();
        app.form = FormState::Create(NewUserDraft {
            name: name.into(),
            email: email.into(),
        });
        app
    }

    #[test]
    fn blank_fields_never_send() {
        for (name, email) in [("", "a@x.com"), ("Ann", ""), ("   ", "  ")] {
            let api = FakeBackend::default();
            let mut app = app_with_draft(name, email);
            submit_create(&mut app, &api);
            assert!(api.calls().is_empty());
            assert_eq!(
                app.modal,
                Some(ModalState::Alert {
                    message: REQUIRED_FIELDS_MSG.to_string()
                })
            );
        }
    }

    #[test]
    fn malformed_email_never_sends() {
        let api = FakeBackend::default();
        let mut app = app_with_draft("Ann", "ann.example.com");
        submit_create(&mut app, &api);
        assert!(api.calls().is_empty());
        assert_eq!(
            app.modal,
            Some(ModalState::Alert {
                message: INVALID_EMAIL_MSG.to_string()
            })
        );
    }

    #[test]
    fn success_prepends_one_record_and_clears_draft() {
        let api = FakeBackend::with_users("go", vec![user(1, "Ann")]);
        let mut app = app_with_draft("Bob", "bob@example.com");
        app.users = vec![user(1, "Ann")];
        submit_create(&mut app, &api);

        assert_eq!(app.users.len(), 2);
        assert_eq!(app.users[0], user(2, "Bob"));
        assert_eq!(app.users[1], user(1, "Ann"));
        assert_eq!(app.form, FormState::default());
        assert_eq!(app.selected_index, 0);
        assert!(app.modal.is_none());
        assert_eq!(api.calls(), vec!["POST go".to_string()]);
    }

    #[test]
    fn failure_alerts_and_keeps_list_and_draft() {
        let api = FakeBackend::default();
        api.fail.set(true);
        let mut app = app_with_draft("Bob", "bob@example.com");
        app.users = vec![user(1, "Ann")];
        submit_create(&mut app, &api);

        assert_eq!(app.users, vec![user(1, "Ann")]);
        assert_eq!(app.form.name(), "Bob");
        assert_eq!(
            app.modal,
            Some(ModalState::Alert {
                message: CREATE_FAILED_MSG.to_string()
            })
        );
    }
}

#[cfg(test)]
mod edit_tests {
    use super::*;
    use user_board::app::form::{FormState, UpdateUserDraft};
    use user_board::app::update::{UPDATE_FAILED_MSG, begin_edit, cancel_edit, submit_update};
    use user_board::app::{AppState, InputMode, ModalState};

    #[test]
    fn begin_edit_copies_record_with_string_id() {
        let mut app = AppState::default();
        begin_edit(&mut app, &user(42, "Ann"));
        assert_eq!(
            app.form,
            FormState::Edit(UpdateUserDraft {
                id: "42".into(),
                name: "Ann".into(),
                email: "ann@example.com".into(),
            })
        );
        assert_eq!(app.input_mode, InputMode::Form);
    }

    #[test]
    fn update_scenario_single_record() {
        let api = FakeBackend::with_users("go", vec![user(1, "Old")]);
        let mut app = AppState::default();
        app.users = vec![user(1, "Old")];
        app.form = FormState::Edit(UpdateUserDraft {
            id: "1".into(),
            name: "A".into(),
            email: "a@x.com".into(),
        });
        submit_update(&mut app, &api);

        assert_eq!(
            app.users,
            vec![UserRecord {
                id: 1,
                name: "A".into(),
                email: "a@x.com".into()
            }]
        );
        assert_eq!(app.form, FormState::default());
        assert!(!app.form.is_editing());
        assert_eq!(api.calls(), vec!["PUT go/1".to_string()]);
    }

    #[test]
    fn update_touches_only_matching_id() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        app.users = vec![user(3, "Cid"), user(2, "Bob"), user(1, "Ann")];
        begin_edit(&mut app, &user(2, "Bob"));
        app.form.field_mut(user_board::app::form::FormField::Name).push_str("by");
        submit_update(&mut app, &api);

        assert_eq!(app.users[0], user(3, "Cid"));
        assert_eq!(app.users[1].name, "Bobby");
        assert_eq!(app.users[1].id, 2);
        assert_eq!(app.users[2], user(1, "Ann"));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn update_failure_stays_in_edit_mode() {
        let api = FakeBackend::default();
        api.fail.set(true);
        let mut app = AppState::default();
        app.users = vec![user(1, "Ann")];
        begin_edit(&mut app, &user(1, "Ann"));
        submit_update(&mut app, &api);

        assert!(app.form.is_editing());
        assert_eq!(app.users, vec![user(1, "Ann")]);
        assert_eq!(
            app.modal,
            Some(ModalState::Alert {
                message: UPDATE_FAILED_MSG.to_string()
            })
        );
    }

    fn app_editing(name: &str, email: &str) -> AppState {
        let mut app = AppState::default();
        app.users = vec![user(1, "Ann")];
        app.form = FormState::Edit(UpdateUserDraft {
            id: "1".into(),
            name: name.into(),
            email: email.into(),
        });
        app.input_mode = InputMode::Form;
        app
    }

    #[test]
    fn update_with_blank_fields_never_sends() {
        use user_board::app::form::REQUIRED_FIELDS_MSG;

        for (name, email) in [("", "a@x.com"), ("A", ""), ("  ", "a@x.com"), ("A", " \t ")] {
            let api = FakeBackend::default();
            let mut app = app_editing(name, email);
            submit_update(&mut app, &api);
            assert!(api.calls().is_empty());
            assert_eq!(
                app.modal,
                Some(ModalState::Alert {
                    message: REQUIRED_FIELDS_MSG.to_string()
                })
            );
            assert!(app.form.is_editing());
            assert_eq!(app.users, vec![user(1, "Ann")]);
        }
    }

    #[test]
    fn update_with_malformed_email_never_sends() {
        use user_board::app::form::INVALID_EMAIL_MSG;

        let api = FakeBackend::default();
        let mut app = app_editing("A", "a-at-x.com");
        submit_update(&mut app, &api);
        assert!(api.calls().is_empty());
        assert_eq!(
            app.modal,
            Some(ModalState::Alert {
                message: INVALID_EMAIL_MSG.to_string()
            })
        );
        assert!(app.form.is_editing());

        app.close_modal();
        assert_eq!(app.input_mode, InputMode::Form);
    }

    #[test]
    fn unparsable_id_is_a_failed_update_without_request() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        app.form = FormState::Edit(UpdateUserDraft {
            id: "abc".into(),
            name: "A".into(),
            email: "a@x.com".into(),
        });
        submit_update(&mut app, &api);
        assert!(api.calls().is_empty());
        assert!(matches!(app.modal, Some(ModalState::Alert { .. })));
    }

    #[test]
    fn cancel_always_returns_to_empty_create_form() {
        let mut app = AppState::default();
        begin_edit(&mut app, &user(5, "Eve"));
        app.form.field_mut(user_board::app::form::FormField::Email).push_str("zzz");
        cancel_edit(&mut app);
        assert_eq!(app.form, FormState::default());
        assert_eq!(app.input_mode, InputMode::Normal);

        // also from create mode with content
        app.form.field_mut(user_board::app::form::FormField::Name).push_str("Draft");
        cancel_edit(&mut app);
        assert_eq!(app.form, FormState::default());
    }
}

#[cfg(test)]
mod delete_tests {
    use super::*;
    use user_board::app::update::{DELETE_FAILED_MSG, request_delete, resolve_delete};
    use user_board::app::{AppState, InputMode, ModalState};

    fn app_with_three() -> AppState {
        let mut app = AppState::default();
        app.users = vec![user(3, "Cid"), user(2, "Bob"), user(1, "Ann")];
        app.selected_index = 1;
        app
    }

    #[test]
    fn request_opens_confirmation_for_selected() {
        let mut app = app_with_three();
        request_delete(&mut app);
        assert_eq!(
            app.modal,
            Some(ModalState::ConfirmDelete {
                id: 2,
                name: "Bob".into(),
                selected: 1
            })
        );
        assert_eq!(app.input_mode, InputMode::Modal);
    }

    #[test]
    fn declining_is_a_no_op() {
        let api = FakeBackend::default();
        let mut app = app_with_three();
        request_delete(&mut app);
        resolve_delete(&mut app, &api, false);
        assert_eq!(app.users.len(), 3);
        assert!(api.calls().is_empty());
        assert!(app.modal.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn confirming_removes_exactly_that_id() {
        let api = FakeBackend::default();
        let mut app = app_with_three();
        request_delete(&mut app);
        resolve_delete(&mut app, &api, true);
        let ids: Vec<i64> = app.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(api.calls(), vec!["DELETE go/2".to_string()]);
    }

    #[test]
    fn failed_delete_alerts_and_keeps_row() {
        let api = FakeBackend::default();
        api.fail.set(true);
        let mut app = app_with_three();
        request_delete(&mut app);
        resolve_delete(&mut app, &api, true);
        assert_eq!(app.users.len(), 3);
        assert_eq!(
            app.modal,
            Some(ModalState::Alert {
                message: DELETE_FAILED_MSG.to_string()
            })
        );
    }

    #[test]
    fn empty_list_has_nothing_to_delete() {
        let mut app = AppState::default();
        request_delete(&mut app);
        assert!(app.modal.is_none());
    }
}

#[cfg(test)]
mod backend_switch_tests {
    use super::*;
    use user_board::app::keymap::Keymap;
    use user_board::app::update::{refresh_selected, switch_backend};
    use user_board::app::{AppState, Theme};

    #[test]
    fn switch_cycles_variant_theme_and_list() {
        let api = FakeBackend::with_users("go", vec![user(1, "Gopher")]);
        api.tables
            .borrow_mut()
            .insert("rust".into(), vec![user(7, "Ferris"), user(8, "Crab")]);
        let mut app = AppState::new(vec!["go".into(), "rust".into()], Keymap::default());
        app.users = vec![user(1, "Gopher")];

        switch_backend(&mut app, &api);
        assert_eq!(app.backend_name(), "rust");
        assert_eq!(app.theme, Theme::for_backend("rust"));
        assert_eq!(app.logo_path(), "/rustlogo.svg");
        let ids: Vec<i64> = app.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![8, 7]);

        switch_backend(&mut app, &api);
        assert_eq!(app.backend_name(), "go");
        assert_eq!(app.theme, Theme::cyan());
    }

    #[test]
    fn failed_load_after_switch_keeps_rows_and_draft() {
        use user_board::app::form::{FormState, NewUserDraft};

        let api = FakeBackend::default();
        api.fail.set(true);
        let mut app = AppState::new(vec!["go".into(), "rust".into()], Keymap::default());
        app.users = vec![user(1, "Ann")];
        app.form = FormState::Create(NewUserDraft {
            name: "Half".into(),
            email: "typed".into(),
        });

        switch_backend(&mut app, &api);
        assert_eq!(app.backend_name(), "rust");
        assert_eq!(api.calls(), vec!["GET rust".to_string()]);
        assert_eq!(app.users, vec![user(1, "Ann")]);
        assert_eq!(app.form.name(), "Half");
        assert_eq!(app.form.email(), "typed");
        assert!(app.modal.is_none());
    }

    #[test]
    fn single_variant_does_not_switch() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        switch_backend(&mut app, &api);
        assert_eq!(app.backend_name(), "go");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn refresh_replaces_selected_row_only() {
        let api = FakeBackend::with_users("go", vec![user(1, "Ann"), user(2, "Robert")]);
        let mut app = AppState::default();
        app.users = vec![user(2, "Bob"), user(1, "Ann")];
        app.selected_index = 0;
        refresh_selected(&mut app, &api);
        assert_eq!(app.users[0].name, "Robert");
        assert_eq!(app.users[1], user(1, "Ann"));
        assert_eq!(api.calls(), vec!["GET go/2".to_string()]);
    }
}

#[cfg(test)]
mod key_tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use user_board::app::update::handle_key;
    use user_board::app::{AppState, InputMode, ModalState};

    fn press(app: &mut AppState, api: &FakeBackend, code: KeyCode) -> bool {
        handle_key(app, api, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, api: &FakeBackend, s: &str) {
        for c in s.chars() {
            press(app, api, KeyCode::Char(c));
        }
    }

    #[test]
    fn type_and_submit_create_form() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        press(&mut app, &api, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Form);
        type_str(&mut app, &api, "Zed");
        press(&mut app, &api, KeyCode::Tab);
        type_str(&mut app, &api, "zed@x.org");
        press(&mut app, &api, KeyCode::Enter);

        assert_eq!(app.users.len(), 1);
        assert_eq!(app.users[0].name, "Zed");
        assert_eq!(app.users[0].email, "zed@x.org");
        assert_eq!(app.form.name(), "");
    }

    #[test]
    fn alert_dismiss_returns_to_form() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        press(&mut app, &api, KeyCode::Char('n'));
        press(&mut app, &api, KeyCode::Enter);
        assert!(matches!(app.modal, Some(ModalState::Alert { .. })));
        press(&mut app, &api, KeyCode::Enter);
        assert!(app.modal.is_none());
        assert_eq!(app.input_mode, InputMode::Form);
    }

    #[test]
    fn q_in_form_is_text_not_quit() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        press(&mut app, &api, KeyCode::Char('n'));
        assert!(press(&mut app, &api, KeyCode::Char('q')));
        assert_eq!(app.form.name(), "q");
        press(&mut app, &api, KeyCode::Esc);
        assert!(!press(&mut app, &api, KeyCode::Char('q')));
    }

    #[test]
    fn delete_dialog_via_keys() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        app.users = vec![user(2, "Bob"), user(1, "Ann")];
        press(&mut app, &api, KeyCode::Char('j'));
        press(&mut app, &api, KeyCode::Char('d'));
        // default selection is "No"
        press(&mut app, &api, KeyCode::Enter);
        assert_eq!(app.users.len(), 2);

        press(&mut app, &api, KeyCode::Char('d'));
        press(&mut app, &api, KeyCode::Left);
        press(&mut app, &api, KeyCode::Enter);
        assert_eq!(app.users, vec![user(2, "Bob")]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn esc_in_edit_cancels() {
        let api = FakeBackend::default();
        let mut app = AppState::default();
        app.users = vec![user(1, "Ann")];
        press(&mut app, &api, KeyCode::Char('e'));
        assert!(app.form.is_editing());
        press(&mut app, &api, KeyCode::Backspace);
        press(&mut app, &api, KeyCode::Esc);
        assert!(!app.form.is_editing());
        assert_eq!(app.form.name(), "");
        assert_eq!(app.users, vec![user(1, "Ann")]);
    }
}
