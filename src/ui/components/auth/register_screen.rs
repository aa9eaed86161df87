use super::{card_block, email_error, render_button, render_heading, render_link, render_side_panel, required, split_screen, Registration};
use crate::constants::{
    AUTH_CLICK_HERE, AUTH_HAS_ACCOUNT, AUTH_REGISTER_SUBMIT, AUTH_REGISTER_SUBTITLE, AUTH_REGISTER_TITLE, AUTH_TERMS,
    AUTH_TERMS_REQUIRED, ROUTE_LOGIN,
};
use crate::ui::components::{InputWithLabel, SecurePassword, TextareaWithLabel};
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SIDE_TITLE: &str = "Rassemblez votre équipe";
const SIDE_LEAD: &str = "Invitez des coéquipiers et créez des salles adaptées à vos projets";
const SIDE_BULLETS: [&str; 3] = [
    "Invitez par email",
    "Sécurité par défaut",
    "Créer des salles instantanément",
];
const SIDE_FOOTER: &str = "Ne partagez jamais votre adresse e-mail. Désabonnez-vous à tout moment.";

/// Focusable parts of the sign-up card, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Username,
    Email,
    Password,
    Enterprise,
    Presentation,
    Terms,
    Submit,
    SignIn,
}

impl RegisterField {
    const ORDER: [RegisterField; 9] = [
        RegisterField::Name,
        RegisterField::Username,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::Enterprise,
        RegisterField::Presentation,
        RegisterField::Terms,
        RegisterField::Submit,
        RegisterField::SignIn,
    ];

    fn step(self, forward: bool) -> RegisterField {
        let len = Self::ORDER.len();
        let index = Self::ORDER.iter().position(|field| *field == self).unwrap_or(0);
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Self::ORDER[next]
    }
}

pub struct RegisterScreen {
    name: InputWithLabel,
    username: InputWithLabel,
    email: InputWithLabel,
    password: SecurePassword,
    enterprise: InputWithLabel,
    presentation: TextareaWithLabel,
    terms_accepted: bool,
    terms_error: Option<String>,
    field: RegisterField,
    focused: bool,
    areas: Vec<(RegisterField, Rect)>,
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            name: InputWithLabel::new("Nom").with_id("name").with_placeholder("Koffi"),
            username: InputWithLabel::new("Nom d'utilisateur")
                .with_id("username")
                .with_placeholder("yolande"),
            email: InputWithLabel::new("Email")
                .with_id("email")
                .with_placeholder("name@company.com"),
            password: SecurePassword::new("Mot de passe")
                .with_id("password")
                .with_placeholder("Entrez votre mot de passe"),
            enterprise: InputWithLabel::new("Entreprise")
                .with_id("enterprise")
                .with_placeholder("CEGE"),
            presentation: TextareaWithLabel::new("Présentation")
                .with_id("presentation")
                .with_placeholder("Quelques mots sur votre entreprise (facultatif)"),
            terms_accepted: false,
            terms_error: None,
            field: RegisterField::Name,
            focused: false,
            areas: Vec::new(),
        }
    }

    pub fn field(&self) -> RegisterField {
        self.field
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn terms_error(&self) -> Option<&str> {
        self.terms_error.as_deref()
    }

    pub fn presentation(&self) -> &TextareaWithLabel {
        &self.presentation
    }

    pub fn password(&self) -> &SecurePassword {
        &self.password
    }

    /// Plain single-line input behind `field`.
    pub fn input(&self, field: RegisterField) -> Option<&InputWithLabel> {
        match field {
            RegisterField::Name => Some(&self.name),
            RegisterField::Username => Some(&self.username),
            RegisterField::Email => Some(&self.email),
            RegisterField::Enterprise => Some(&self.enterprise),
            RegisterField::Password => Some(self.password.input()),
            _ => None,
        }
    }

    fn editor_mut(&mut self, field: RegisterField) -> Option<&mut dyn Component> {
        match field {
            RegisterField::Name => Some(&mut self.name),
            RegisterField::Username => Some(&mut self.username),
            RegisterField::Email => Some(&mut self.email),
            RegisterField::Password => Some(&mut self.password),
            RegisterField::Enterprise => Some(&mut self.enterprise),
            RegisterField::Presentation => Some(&mut self.presentation),
            RegisterField::Terms | RegisterField::Submit | RegisterField::SignIn => None,
        }
    }

    fn set_error(&mut self, field: RegisterField, error: Option<String>) {
        match field {
            RegisterField::Name => self.name.set_error(error),
            RegisterField::Username => self.username.set_error(error),
            RegisterField::Email => self.email.set_error(error),
            RegisterField::Password => self.password.input_mut().set_error(error),
            RegisterField::Enterprise => self.enterprise.set_error(error),
            RegisterField::Presentation => self.presentation.set_error(error),
            RegisterField::Terms => self.terms_error = error,
            RegisterField::Submit | RegisterField::SignIn => {}
        }
    }

    pub fn set_field(&mut self, field: RegisterField) {
        let current = self.field;
        if let Some(editor) = self.editor_mut(current) {
            editor.on_blur();
        }
        self.field = field;
        if self.focused {
            if let Some(editor) = self.editor_mut(field) {
                editor.on_focus();
            }
        }
    }

    fn is_active(&self, field: RegisterField) -> bool {
        self.focused && self.field == field
    }

    pub fn toggle_terms(&mut self) {
        self.terms_accepted = !self.terms_accepted;
        if self.terms_accepted {
            self.terms_error = None;
        }
    }

    /// Validate every field; on success emit the registration.
    pub fn submit(&mut self) -> Action {
        let checks = [
            (RegisterField::Name, required(self.name.value())),
            (RegisterField::Username, required(self.username.value())),
            (RegisterField::Email, email_error(self.email.value())),
            (RegisterField::Password, required(self.password.value())),
            (
                RegisterField::Terms,
                (!self.terms_accepted).then(|| AUTH_TERMS_REQUIRED.to_string()),
            ),
        ];
        let first_invalid = checks
            .iter()
            .find(|(_, error)| error.is_some())
            .map(|(field, _)| *field);
        for (field, error) in checks {
            self.set_error(field, error);
        }

        if let Some(field) = first_invalid {
            log::debug!("Registration form rejected, first invalid field {:?}", field);
            self.set_field(field);
            return Action::None;
        }

        log::info!("Registration submitted for {}", self.username.value().trim());
        Action::RegisterSubmitted(Registration {
            name: self.name.value().trim().to_string(),
            username: self.username.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            password: self.password.value().to_string(),
            enterprise: self.enterprise.value().trim().to_string(),
            presentation: self.presentation.value().trim().to_string(),
        })
    }

    /// `Enter` or click on `field`. Inputs move on to the next field.
    pub fn activate(&mut self, field: RegisterField) -> Action {
        match field {
            RegisterField::Terms => {
                self.toggle_terms();
                Action::None
            }
            RegisterField::Submit => self.submit(),
            RegisterField::SignIn => Action::Navigate(ROUTE_LOGIN.to_string()),
            RegisterField::Presentation => Action::None,
            input => {
                self.set_field(input.step(true));
                Action::None
            }
        }
    }

    /// Typing into a field clears its error.
    fn forward_key(&mut self, key: KeyEvent) -> Action {
        let field = self.field;
        let Some(editor) = self.editor_mut(field) else {
            return Action::None;
        };
        let action = editor.handle_key_events(key);
        if action != Action::None {
            self.set_error(field, None);
        }
        action
    }

    fn render_terms(&self, f: &mut Frame, rect: Rect) {
        let checkbox = if self.terms_accepted { "[x]" } else { "[ ]" };
        let mut style = Style::default().fg(Color::White);
        if self.is_active(RegisterField::Terms) {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![Span::styled(format!("{checkbox} {AUTH_TERMS}"), style)];
        if let Some(error) = &self.terms_error {
            spans.push(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), rect);
    }
}

impl Component for RegisterScreen {
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
            // The textarea takes Enter as a line break
            KeyCode::Enter if self.field != RegisterField::Presentation => self.activate(self.field),
            KeyCode::Char(' ') if self.field == RegisterField::Terms => self.activate(RegisterField::Terms),
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
        match self.editor_mut(field) {
            Some(editor) => editor.handle_mouse_events(mouse),
            None => self.activate(field),
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
                Constraint::Length(5), // name, username
                Constraint::Length(5), // email
                Constraint::Length(5), // password
                Constraint::Length(5), // enterprise
                Constraint::Length(self.presentation.height()),
                Constraint::Length(1), // terms
                Constraint::Length(1),
                Constraint::Length(3), // submit
                Constraint::Length(1), // sign-in link
                Constraint::Min(0),
            ])
            .split(inner);
        let names = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(1)
            .split(rows[2]);

        render_heading(f, rows[0], AUTH_REGISTER_TITLE, AUTH_REGISTER_SUBTITLE);
        self.name.render(f, names[0]);
        self.username.render(f, names[1]);
        self.email.render(f, rows[3]);
        self.password.render(f, rows[4]);
        self.enterprise.render(f, rows[5]);
        self.presentation.render(f, rows[6]);
        self.render_terms(f, rows[7]);
        render_button(f, rows[9], AUTH_REGISTER_SUBMIT, self.is_active(RegisterField::Submit));
        render_link(
            f,
            rows[10],
            AUTH_HAS_ACCOUNT,
            AUTH_CLICK_HERE,
            self.is_active(RegisterField::SignIn),
            Alignment::Left,
        );

        self.areas = vec![
            (RegisterField::Name, names[0]),
            (RegisterField::Username, names[1]),
            (RegisterField::Email, rows[3]),
            (RegisterField::Password, rows[4]),
            (RegisterField::Enterprise, rows[5]),
            (RegisterField::Presentation, rows[6]),
            (RegisterField::Terms, rows[7]),
            (RegisterField::Submit, rows[9]),
            (RegisterField::SignIn, rows[10]),
        ];

        if let Some(side) = side {
            render_side_panel(f, side, SIDE_TITLE, SIDE_LEAD, &SIDE_BULLETS, SIDE_FOOTER);
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        let field = self.field;
        if let Some(editor) = self.editor_mut(field) {
            editor.on_focus();
        }
    }

    fn on_blur(&mut self) {
        self.focused = false;
        let field = self.field;
        if let Some(editor) = self.editor_mut(field) {
            editor.on_blur();
        }
    }
}
