use super::{card_block, email_error, render_button, render_heading, render_link, render_side_panel, required, split_screen, Credentials};
use crate::constants::{
    AUTH_CLICK_HERE, AUTH_FORGOT_PASSWORD, AUTH_LOGIN_SUBMIT, AUTH_LOGIN_SUBTITLE, AUTH_LOGIN_TITLE, AUTH_NO_ACCOUNT,
    ROUTE_FORGOT_PASSWORD, ROUTE_REGISTER,
};
use crate::ui::components::{InputWithLabel, SecurePassword};
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    Frame,
};

const SIDE_TITLE: &str = "Discuter, Partager, Expédier";
const SIDE_LEAD: &str =
    "Rejoignez des salles, envoyez des messages privés à vos coéquipiers et organisez les discussions";
const SIDE_BULLETS: [&str; 3] = [
    "Salles et fils organisés",
    "Notifications en temps réel",
    "Sécurité de protection de l'entreprise",
];
const SIDE_FOOTER: &str =
    "En continuant, vous acceptez nos conditions et reconnaissez notre politique de confidentialité";

/// Focusable parts of the sign-in card, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    ForgotPassword,
    Submit,
    SignUp,
}

impl LoginField {
    const ORDER: [LoginField; 5] = [
        LoginField::Email,
        LoginField::Password,
        LoginField::ForgotPassword,
        LoginField::Submit,
        LoginField::SignUp,
    ];

    fn step(self, forward: bool) -> LoginField {
        let len = Self::ORDER.len();
        let index = Self::ORDER.iter().position(|field| *field == self).unwrap_or(0);
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Self::ORDER[next]
    }
}

pub struct LoginScreen {
    email: InputWithLabel,
    password: SecurePassword,
    field: LoginField,
    focused: bool,
    areas: Vec<(LoginField, Rect)>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: InputWithLabel::new("Email")
                .with_id("email")
                .with_placeholder("name@company.com"),
            password: SecurePassword::new("Mot de passe")
                .with_id("password")
                .with_placeholder("Entrez votre mot de passe"),
            field: LoginField::Email,
            focused: false,
            areas: Vec::new(),
        }
    }

    pub fn email(&self) -> &InputWithLabel {
        &self.email
    }

    pub fn password(&self) -> &SecurePassword {
        &self.password
    }

    pub fn field(&self) -> LoginField {
        self.field
    }

    pub fn set_field(&mut self, field: LoginField) {
        self.blur_field();
        self.field = field;
        if self.focused {
            self.focus_field();
        }
    }

    fn focus_field(&mut self) {
        match self.field {
            LoginField::Email => self.email.on_focus(),
            LoginField::Password => self.password.on_focus(),
            _ => {}
        }
    }

    fn blur_field(&mut self) {
        match self.field {
            LoginField::Email => self.email.on_blur(),
            LoginField::Password => self.password.on_blur(),
            _ => {}
        }
    }

    fn is_active(&self, field: LoginField) -> bool {
        self.focused && self.field == field
    }

    /// Validate both fields; on success emit the credentials.
    pub fn submit(&mut self) -> Action {
        let email_error = email_error(self.email.value());
        let password_error = required(self.password.value());
        let first_invalid = if email_error.is_some() {
            Some(LoginField::Email)
        } else if password_error.is_some() {
            Some(LoginField::Password)
        } else {
            None
        };
        self.email.set_error(email_error);
        self.password.input_mut().set_error(password_error);

        if let Some(field) = first_invalid {
            log::debug!("Login form rejected, first invalid field {:?}", field);
            self.set_field(field);
            return Action::None;
        }

        log::info!("Login submitted for {}", self.email.value().trim());
        Action::LoginSubmitted(Credentials {
            email: self.email.value().trim().to_string(),
            password: self.password.value().to_string(),
        })
    }

    /// `Enter` or click on `field`.
    pub fn activate(&mut self, field: LoginField) -> Action {
        match field {
            LoginField::Email => {
                self.set_field(LoginField::Password);
                Action::None
            }
            LoginField::Password | LoginField::Submit => self.submit(),
            LoginField::ForgotPassword => Action::Navigate(ROUTE_FORGOT_PASSWORD.to_string()),
            LoginField::SignUp => Action::Navigate(ROUTE_REGISTER.to_string()),
        }
    }

    /// Typing into a field clears its error.
    fn forward_key(&mut self, key: KeyEvent) -> Action {
        match self.field {
            LoginField::Email => {
                let action = self.email.handle_key_events(key);
                if action != Action::None {
                    self.email.set_error(None);
                }
                action
            }
            LoginField::Password => {
                let action = self.password.handle_key_events(key);
                if action != Action::None {
                    self.password.input_mut().set_error(None);
                }
                action
            }
            _ => Action::None,
        }
    }
}

impl Component for LoginScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.set_field(self.field.step(true));
                Action::None
            }
            KeyCode::BackTab => {
                self.set_field(self.field.step(false));
                Action::None
            }
            KeyCode::Enter => self.activate(self.field),
            _ => self.forward_key(key),
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }
        let point = Position::new(mouse.column, mouse.row);
        let Some(field) = self
            .areas
            .iter()
            .find(|(_, area)| area.contains(point))
            .map(|(field, _)| *field)
        else {
            return Action::None;
        };

        self.set_field(field);
        match field {
            LoginField::Email => self.email.handle_mouse_events(mouse),
            LoginField::Password => self.password.handle_mouse_events(mouse),
            other => self.activate(other),
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (card, side) = split_screen(rect);
        let block = card_block(self.focused);
        let inner = block.inner(card);
        f.render_widget(block, card);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(1)
            .constraints([
                Constraint::Length(2), // heading
                Constraint::Length(1),
                Constraint::Length(5), // email
                Constraint::Length(5), // password
                Constraint::Length(1), // forgot password
                Constraint::Length(1),
                Constraint::Length(3), // submit
                Constraint::Length(1),
                Constraint::Length(1), // sign-up link
                Constraint::Min(0),
            ])
            .split(inner);

        render_heading(f, rows[0], AUTH_LOGIN_TITLE, AUTH_LOGIN_SUBTITLE);
        self.email.render(f, rows[2]);
        self.password.render(f, rows[3]);
        render_link(
            f,
            rows[4],
            "",
            AUTH_FORGOT_PASSWORD,
            self.is_active(LoginField::ForgotPassword),
            Alignment::Right,
        );
        render_button(f, rows[6], AUTH_LOGIN_SUBMIT, self.is_active(LoginField::Submit));
        render_link(
            f,
            rows[8],
            AUTH_NO_ACCOUNT,
            AUTH_CLICK_HERE,
            self.is_active(LoginField::SignUp),
            Alignment::Left,
        );

        self.areas = vec![
            (LoginField::Email, rows[2]),
            (LoginField::Password, rows[3]),
            (LoginField::ForgotPassword, rows[4]),
            (LoginField::Submit, rows[6]),
            (LoginField::SignUp, rows[8]),
        ];

        if let Some(side) = side {
            render_side_panel(f, side, SIDE_TITLE, SIDE_LEAD, &SIDE_BULLETS, SIDE_FOOTER);
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.focus_field();
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.blur_field();
    }
}
