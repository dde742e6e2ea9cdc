//! Application state types and entry glue.
//!
//! Holds the user list, the form, the modal slot and the backend variant, plus
//! the palette derived from that variant. The event loop lives in `update`
//! (re-exported as `run`).
//!
pub mod form;
pub mod keymap;
pub mod update;

use ratatui::style::Color;

use crate::api::UserRecord;
use form::{FormField, FormState};
use keymap::Keymap;

/// Variant used when none is configured.
pub const DEFAULT_BACKEND: &str = "go";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Browsing the list; keys go through the keymap.
    Normal,
    /// Typing into the form.
    Form,
    /// A dialog owns the keyboard.
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    /// Submit button / accent for the create form.
    pub accent: Color,
    pub create_form: Color,
    pub edit_form: Color,
    pub danger: Color,
}

impl Theme {
    /// Palette for a backend variant. Unknown variants get the neutral gray palette.
    pub fn for_backend(name: &str) -> Self {
        match name {
            "go" => Self::cyan(),
            _ => Self::gray(),
        }
    }

    pub fn cyan() -> Self {
        // Tailwind reference values
        Self {
            header_bg: Color::Rgb(0x06, 0xb6, 0xd4), // cyan-500
            border: Color::Rgb(0x08, 0x91, 0xb2),    // cyan-600
            accent: Color::Rgb(0x0e, 0x74, 0x90),    // cyan-700
            title: Color::Rgb(0x22, 0xd3, 0xee),     // cyan-400
            ..Self::gray()
        }
    }

    pub fn gray() -> Self {
        Self {
            text: Color::Rgb(0xe5, 0xe7, 0xeb),         // gray-200
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),        // gray-400
            title: Color::Rgb(0xd1, 0xd5, 0xdb),        // gray-300
            border: Color::Rgb(0x6b, 0x72, 0x80),       // gray-500
            header_bg: Color::Rgb(0x4b, 0x55, 0x63),    // gray-600
            header_fg: Color::White,
            status_bg: Color::Rgb(0x37, 0x41, 0x51),    // gray-700
            status_fg: Color::Rgb(0xe5, 0xe7, 0xeb),    // gray-200
            highlight_fg: Color::Rgb(0xfd, 0xe0, 0x47), // yellow-300
            highlight_bg: Color::Rgb(0x1f, 0x29, 0x37), // gray-800
            accent: Color::Rgb(0x6b, 0x72, 0x80),       // gray-500
            create_form: Color::Rgb(0x3b, 0x82, 0xf6),  // blue-500
            edit_form: Color::Rgb(0xea, 0xb3, 0x08),    // yellow-500
            danger: Color::Rgb(0xef, 0x44, 0x44),       // red-500
        }
    }
}

/// Dialogs that take over the keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Blocking message, dismissed with Enter or Esc.
    Alert { message: String },
    /// Delete confirmation. `selected`: 0 = Yes, 1 = No.
    ConfirmDelete {
        id: i64,
        name: String,
        selected: usize,
    },
}

pub struct AppState {
    pub users: Vec<UserRecord>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub form: FormState,
    pub focus: FormField,
    pub input_mode: InputMode,
    /// Mode restored when the modal closes.
    pub resume_mode: InputMode,
    pub modal: Option<ModalState>,
    pub backends: Vec<String>,
    pub active_backend: usize,
    pub theme: Theme,
    pub keymap: Keymap,
}

impl AppState {
    /// Fresh state in create mode with an empty list. Nothing is fetched here;
    /// call [`update::load`] to populate the list.
    pub fn new(backends: Vec<String>, keymap: Keymap) -> Self {
        let backends = if backends.is_empty() {
            vec![DEFAULT_BACKEND.to_string()]
        } else {
            backends
        };
        let theme = Theme::for_backend(&backends[0]);
        Self {
            users: Vec::new(),
            selected_index: 0,
            rows_per_page: 10,
            form: FormState::default(),
            focus: FormField::Name,
            input_mode: InputMode::Normal,
            resume_mode: InputMode::Normal,
            modal: None,
            backends,
            active_backend: 0,
            theme,
            keymap,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backends
            .get(self.active_backend)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BACKEND)
    }

    /// Header title, e.g. "Go Backend".
    pub fn header_title(&self) -> String {
        let name = self.backend_name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Backend", first.to_uppercase(), chars.as_str()),
            None => "Backend".to_string(),
        }
    }

    /// Logo asset path for the active variant.
    pub fn logo_path(&self) -> String {
        format!("/{}logo.svg", self.backend_name())
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users.get(self.selected_index)
    }

    pub fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.users.len().saturating_sub(1));
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        if self.input_mode != InputMode::Modal {
            self.resume_mode = self.input_mode;
        }
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = self.resume_mode;
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.open_modal(ModalState::Alert {
            message: message.into(),
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(vec![DEFAULT_BACKEND.to_string()], Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
