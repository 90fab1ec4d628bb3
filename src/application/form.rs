//! Editable input buffers for the login and employee forms.

use crate::domain::{Department, Employee, EmployeeId, EmployeeInput, FormField, ValidationErrors};

/// A single-line text buffer with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position counted in characters, not bytes
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State of the add/edit employee form.
///
/// `editing` is `Some` when the form was opened on an existing record.
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    pub editing: Option<EmployeeId>,
    pub first_name: TextInput,
    pub last_name: TextInput,
    pub email: TextInput,
    pub phone: TextInput,
    pub position: TextInput,
    pub department: Option<Department>,
    pub hire_date: TextInput,
    pub salary: TextInput,
    pub focus: FormField,
    pub errors: ValidationErrors,
}

impl EmployeeForm {
    pub fn blank() -> Self {
        Self::from_input(None, EmployeeInput::default())
    }

    pub fn for_employee(employee: &Employee) -> Self {
        Self::from_input(Some(employee.id.clone()), EmployeeInput::from(employee))
    }

    fn from_input(editing: Option<EmployeeId>, input: EmployeeInput) -> Self {
        Self {
            editing,
            first_name: TextInput::new(input.first_name),
            last_name: TextInput::new(input.last_name),
            email: TextInput::new(input.email),
            phone: TextInput::new(input.phone),
            position: TextInput::new(input.position),
            department: input.department,
            hire_date: TextInput::new(input.hire_date),
            salary: TextInput::new(input.salary),
            focus: FormField::FirstName,
            errors: ValidationErrors::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn to_input(&self) -> EmployeeInput {
        EmployeeInput {
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            email: self.email.value().to_string(),
            phone: self.phone.value().to_string(),
            position: self.position.value().to_string(),
            department: self.department,
            hire_date: self.hire_date.value().to_string(),
            salary: self.salary.value().to_string(),
        }
    }

    /// The text buffer behind `field`, or `None` for the department select.
    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::FirstName => Some(&self.first_name),
            FormField::LastName => Some(&self.last_name),
            FormField::Email => Some(&self.email),
            FormField::Phone => Some(&self.phone),
            FormField::Position => Some(&self.position),
            FormField::Department => None,
            FormField::HireDate => Some(&self.hire_date),
            FormField::Salary => Some(&self.salary),
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::FirstName => Some(&mut self.first_name),
            FormField::LastName => Some(&mut self.last_name),
            FormField::Email => Some(&mut self.email),
            FormField::Phone => Some(&mut self.phone),
            FormField::Position => Some(&mut self.position),
            FormField::Department => None,
            FormField::HireDate => Some(&mut self.hire_date),
            FormField::Salary => Some(&mut self.salary),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn cycle_department(&mut self, forward: bool) {
        self.department = Department::cycle(self.department, forward);
    }
}
