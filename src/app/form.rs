//! Form buffers and the checks run before a request is sent.
//!
//! The form is either creating a new user or editing an existing one; the two
//! drafts never coexist, so there is no flag that can disagree with the draft.

/// Alert shown when name or email is blank.
pub const REQUIRED_FIELDS_MSG: &str = "Name and email are required!";
/// Alert shown when the email is not shaped like an address.
pub const INVALID_EMAIL_MSG: &str = "Please enter a valid email address.";

/// Unsaved input of the create form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUserDraft {
    pub name: String,
    pub email: String,
}

/// Unsaved input of the edit form. `id` is the string form of the record id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateUserDraft {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Which form is shown, carrying its draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormState {
    Create(NewUserDraft),
    Edit(UpdateUserDraft),
}

impl Default for FormState {
    fn default() -> Self {
        Self::Create(NewUserDraft::default())
    }
}

/// Input field that receives typed characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
        }
    }
}

impl FormState {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Create(d) => &d.name,
            Self::Edit(d) => &d.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Create(d) => &d.email,
            Self::Edit(d) => &d.email,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => self.name(),
            FormField::Email => self.email(),
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match (self, field) {
            (Self::Create(d), FormField::Name) => &mut d.name,
            (Self::Create(d), FormField::Email) => &mut d.email,
            (Self::Edit(d), FormField::Name) => &mut d.name,
            (Self::Edit(d), FormField::Email) => &mut d.email,
        }
    }
}

/// Check the two required fields; `Err` carries the alert to show.
pub fn check_fields(name: &str, email: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(REQUIRED_FIELDS_MSG);
    }
    if !is_valid_email(email.trim()) {
        return Err(INVALID_EMAIL_MSG);
    }
    Ok(())
}

/// Loose syntactic address check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
