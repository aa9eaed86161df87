use crate::config::Config;
use crate::constants::{
    INFO_PASSWORD_RESET, ROUTE_FORGOT_PASSWORD, ROUTE_HOME, ROUTE_LOGIN, ROUTE_REGISTER, SUCCESS_ACCOUNT_CREATED,
    SUCCESS_ENTRY_DELETED, SUCCESS_ENTRY_DUPLICATED, SUCCESS_EXPORT_DONE, SUCCESS_LOGGED_IN,
};
use crate::ledger::{self, format_amount, LedgerEntry, LedgerFilter, SharedLedger, XmlExporter};
use crate::logger::Logger;
use crate::ui::components::dialogs::{DeleteDialog, LogsDialog, MessageDialog};
use crate::ui::components::{
    ActionItem, ActionsDropdown, Column, DateRangePicker, ExportButton, ExportKind, LoginScreen, MatchMode,
    PaginatedFilterableTable, RegisterScreen, SearchableSelector, SidebarComponent, TablePage,
};
use crate::ui::core::{
    actions::{Action, DialogType},
    event_handler::EventType,
    task_manager::TaskManager,
    Component, PointerHub,
};
use crate::ui::layout::LayoutManager;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

pub const JOURNAL_SELECTOR_ID: &str = "journal";

const ACTION_DETAILS: &str = "details";
const ACTION_DUPLICATE: &str = "duplicate";
const ACTION_DELETE: &str = "delete";

/// Keyboard focus order, cycled with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Sidebar,
    Selector,
    Period,
    Table,
    Actions,
    Export,
    /// Sign-in or sign-up form, on the account routes only.
    Form,
}

impl FocusArea {
    const ORDER: [FocusArea; 6] = [
        FocusArea::Sidebar,
        FocusArea::Selector,
        FocusArea::Period,
        FocusArea::Table,
        FocusArea::Actions,
        FocusArea::Export,
    ];

    const FORM_ORDER: [FocusArea; 2] = [FocusArea::Sidebar, FocusArea::Form];

    fn step(self, order: &[FocusArea], forward: bool) -> FocusArea {
        let len = order.len();
        let index = order.iter().position(|area| *area == self).unwrap_or(0);
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        order[next]
    }
}

/// Account screen shown in place of the ledger.
pub enum AuthScreen {
    Login(LoginScreen),
    Register(RegisterScreen),
}

impl AuthScreen {
    fn for_route(route: &str) -> Option<AuthScreen> {
        match route {
            ROUTE_LOGIN => Some(AuthScreen::Login(LoginScreen::new())),
            ROUTE_REGISTER => Some(AuthScreen::Register(RegisterScreen::new())),
            _ => None,
        }
    }

    fn component_mut(&mut self) -> &mut dyn Component {
        match self {
            AuthScreen::Login(screen) => screen,
            AuthScreen::Register(screen) => screen,
        }
    }
}

/// Modal layered over the main screen.
enum Overlay {
    Message(MessageDialog),
    Logs(LogsDialog),
}

fn ledger_columns() -> Vec<Column<LedgerEntry>> {
    vec![
        Column::new("date", "Date", Constraint::Length(10), |e: &LedgerEntry| {
            e.date.format("%d/%m/%Y").to_string()
        }),
        Column::new("journal", "Journal", Constraint::Length(7), |e: &LedgerEntry| e.journal.clone()),
        Column::new("account", "Compte", Constraint::Length(8), |e: &LedgerEntry| e.account.clone()),
        Column::new("label", "Libellé", Constraint::Min(16), |e: &LedgerEntry| e.label.clone()),
        Column::new("debit", "Débit", Constraint::Length(12), |e: &LedgerEntry| {
            format_amount(e.debit_cents)
        }),
        Column::new("credit", "Crédit", Constraint::Length(12), |e: &LedgerEntry| {
            format_amount(e.credit_cents)
        }),
    ]
}

fn row_actions() -> Vec<ActionItem> {
    vec![
        ActionItem::new(ACTION_DETAILS, "Détails"),
        ActionItem::new(ACTION_DUPLICATE, "Dupliquer"),
        ActionItem::new(ACTION_DELETE, "Supprimer").destructive(),
    ]
}

/// Demo screen: browses the ledger with every widget of the kit.
pub struct AppComponent {
    // Component composition
    sidebar: SidebarComponent,
    selector: SearchableSelector,
    picker: DateRangePicker,
    table: PaginatedFilterableTable<LedgerEntry>,
    actions: ActionsDropdown,
    export_button: ExportButton,
    delete_dialog: DeleteDialog,
    overlay: Option<Overlay>,
    auth: Option<AuthScreen>,
    form_area: Rect,

    // Application state
    ledger: SharedLedger,
    filter: LedgerFilter,
    focus: FocusArea,
    sidebar_width: u16,
    mouse_enabled: bool,

    // Services
    pointer_hub: PointerHub,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(config: &Config, logger: Logger, entries: Vec<LedgerEntry>, today: NaiveDate) -> Self {
        let ledger: SharedLedger = Arc::new(RwLock::new(entries));
        let pointer_hub = PointerHub::new();
        let (task_manager, background_action_rx) = TaskManager::new();

        let selector = SearchableSelector::new(JOURNAL_SELECTOR_ID, ledger::journal_options())
            .with_match_mode(MatchMode::Extended)
            .with_size(config.ui.selector_size)
            .with_placeholder("Tous les journaux")
            .with_pointer_hub(pointer_hub.clone());
        let picker = DateRangePicker::new(today);
        let filter = LedgerFilter {
            journal: None,
            range: picker.applied(),
        };
        let exporter = XmlExporter::new(Arc::clone(&ledger), config.export.output_dir.clone());

        let mut app = Self {
            sidebar: SidebarComponent::default(),
            selector,
            picker,
            table: PaginatedFilterableTable::new(ledger_columns(), config.ui.default_page_size)
                .with_title("Écritures"),
            actions: ActionsDropdown::new(row_actions()),
            export_button: ExportButton::new().with_handler(ExportKind::Xml, Arc::new(exporter)),
            delete_dialog: DeleteDialog::new().with_title("Supprimer cette écriture ?"),
            overlay: None,
            auth: None,
            form_area: Rect::default(),
            ledger,
            filter,
            focus: FocusArea::Table,
            sidebar_width: config.ui.sidebar_width,
            mouse_enabled: config.ui.mouse_enabled,
            pointer_hub,
            task_manager,
            background_action_rx,
            logger,
            should_quit: false,
        };
        app.table.on_focus();
        app.repaginate(1, config.ui.default_page_size);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn focus(&self) -> FocusArea {
        self.focus
    }

    pub fn filter(&self) -> &LedgerFilter {
        &self.filter
    }

    pub fn table(&self) -> &PaginatedFilterableTable<LedgerEntry> {
        &self.table
    }

    pub fn selector(&self) -> &SearchableSelector {
        &self.selector
    }

    pub fn export_button(&self) -> &ExportButton {
        &self.export_button
    }

    pub fn delete_dialog(&self) -> &DeleteDialog {
        &self.delete_dialog
    }

    pub fn route(&self) -> &str {
        self.sidebar.route()
    }

    pub fn auth_screen(&self) -> Option<&AuthScreen> {
        self.auth.as_ref()
    }

    pub fn pointer_hub(&self) -> &PointerHub {
        &self.pointer_hub
    }

    /// Message shown by the open error or info dialog.
    pub fn message(&self) -> Option<&str> {
        match &self.overlay {
            Some(Overlay::Message(dialog)) => Some(dialog.message.as_str()),
            _ => None,
        }
    }

    pub fn is_showing_logs(&self) -> bool {
        matches!(self.overlay, Some(Overlay::Logs(_)))
    }

    /// Check if any background operations are running
    pub fn is_busy(&self) -> bool {
        self.task_manager.task_count() > 0
    }

    pub fn entry_count(&self) -> usize {
        self.ledger.read().map(|entries| entries.len()).unwrap_or(0)
    }

    fn set_focus(&mut self, focus: FocusArea) {
        if focus == self.focus {
            return;
        }
        self.component_mut(self.focus).on_blur();
        self.focus = focus;
        self.component_mut(focus).on_focus();
    }

    fn component_mut(&mut self, area: FocusArea) -> &mut dyn Component {
        match area {
            FocusArea::Sidebar => &mut self.sidebar,
            FocusArea::Selector => &mut self.selector,
            FocusArea::Period => &mut self.picker,
            FocusArea::Table => &mut self.table,
            FocusArea::Actions => &mut self.actions,
            FocusArea::Export => &mut self.export_button,
            FocusArea::Form => match &mut self.auth {
                Some(screen) => screen.component_mut(),
                None => &mut self.table,
            },
        }
    }

    fn focus_order(&self) -> &'static [FocusArea] {
        if self.auth.is_some() {
            &FocusArea::FORM_ORDER
        } else {
            &FocusArea::ORDER
        }
    }

    /// Whether the focused component is consuming raw keystrokes, in which
    /// case global shortcuts stay off.
    fn focused_is_capturing(&self) -> bool {
        match self.focus {
            FocusArea::Selector => self.selector.is_open(),
            FocusArea::Period => self.picker.is_open(),
            FocusArea::Table => self.table.is_search_mode(),
            FocusArea::Actions => self.actions.is_open(),
            FocusArea::Export => self.export_button.is_menu_open(),
            FocusArea::Form => self.auth.is_some(),
            FocusArea::Sidebar => false,
        }
    }

    /// Caller-side paging: filter the ledger and hand one page to the table.
    fn repaginate(&mut self, page: usize, page_size: usize) {
        let filtered = match self.ledger.read() {
            Ok(entries) => self.filter.apply(&entries),
            Err(_) => {
                log::error!("Ledger lock poisoned, showing an empty table");
                Vec::new()
            }
        };
        let page = TablePage::from_slice(&filtered, page, page_size);
        log::debug!(
            "Showing page {}/{} ({} of {} entries)",
            page.current_page,
            page.total_pages,
            page.rows.len(),
            page.total_items
        );
        self.table.set_page(page);
    }

    fn refresh_current_page(&mut self) {
        let (page, size) = (self.table.page().current_page, self.table.page().page_size);
        self.repaginate(page, size);
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.logger.log("Global key: Ctrl+C - quitting application".to_string());
                Some(Action::Quit)
            }
            KeyCode::Esc if self.focus == FocusArea::Form => {
                self.set_focus(FocusArea::Sidebar);
                Some(Action::None)
            }
            _ if self.focused_is_capturing() => None,
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Some(Action::Quit)
            }
            KeyCode::Char('L') => Some(Action::ShowDialog(DialogType::Logs)),
            KeyCode::Tab => {
                self.set_focus(self.focus.step(self.focus_order(), true));
                Some(Action::None)
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.step(self.focus_order(), false));
                Some(Action::None)
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(overlay) = &mut self.overlay {
            return match overlay {
                Overlay::Message(dialog) => dialog.handle_key_events(key),
                Overlay::Logs(dialog) => dialog.handle_key_events(key),
            };
        }
        if self.delete_dialog.is_open() {
            return self.delete_dialog.handle_key_events(key);
        }
        if let Some(action) = self.handle_global_key(key) {
            return action;
        }
        self.component_mut(self.focus).handle_key_events(key)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if let Some(overlay) = &mut self.overlay {
            return match overlay {
                Overlay::Message(dialog) => dialog.handle_mouse_events(mouse),
                Overlay::Logs(dialog) => dialog.handle_mouse_events(mouse),
            };
        }
        if self.delete_dialog.is_open() {
            return self.delete_dialog.handle_mouse_events(mouse);
        }

        // Outside-click listeners see the press before anyone else
        self.pointer_hub.dispatch(&mouse);
        self.selector.handle_outside_click();

        // An open popup owns the pointer
        if self.selector.is_open() {
            return self.selector.handle_mouse_events(mouse);
        }
        if self.picker.is_open() {
            return self.picker.handle_mouse_events(mouse);
        }
        if self.export_button.is_menu_open() {
            return self.export_button.handle_mouse_events(mouse);
        }
        if self.actions.is_open() {
            return self.actions.handle_mouse_events(mouse);
        }

        if self.auth.is_some() {
            let pressed = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
            if pressed && self.form_area.contains(Position::new(mouse.column, mouse.row)) {
                self.set_focus(FocusArea::Form);
            }
        } else if self.delete_dialog.trigger_clicked(&mouse) {
            return self.run_row_action(ACTION_DELETE);
        }

        for &area in self.focus_order() {
            let action = self.component_mut(area).handle_mouse_events(mouse);
            if action != Action::None {
                return action;
            }
        }
        Action::None
    }

    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            Action::SelectionChanged { selector, value } if selector == JOURNAL_SELECTOR_ID => {
                self.filter.journal = if value.is_empty() { None } else { Some(value) };
                self.repaginate(1, self.table.page().page_size);
                Action::None
            }
            Action::DateRangeChanged(range) => {
                self.filter.range = Some(range);
                self.repaginate(1, self.table.page().page_size);
                Action::None
            }
            Action::PageRequested(page) => {
                self.repaginate(page, self.table.page().page_size);
                Action::None
            }
            Action::PageSizeRequested(size) => {
                self.repaginate(1, size);
                Action::None
            }
            Action::StartExport(kind) => {
                match self.export_button.handler(kind) {
                    Some(handler) => {
                        self.task_manager.spawn_export(kind, handler);
                    }
                    None => log::warn!("No handler registered for {} export", kind),
                }
                Action::None
            }
            Action::ExportSettled { kind, error } => {
                let succeeded = error.is_none();
                match self.export_button.update(Action::ExportSettled { kind, error }) {
                    Action::None if succeeded => {
                        Action::ShowDialog(DialogType::Info(format!("{SUCCESS_EXPORT_DONE} ({kind})")))
                    }
                    follow_up => follow_up,
                }
            }
            Action::MenuAction(id) => self.run_row_action(&id),
            Action::DeleteConfirmed(id) => {
                let deleted = match self.ledger.write() {
                    Ok(mut entries) => ledger::delete_entry(&mut entries, &id),
                    Err(_) => false,
                };
                if deleted {
                    self.logger.log(format!("Deleted entry {}", id));
                    self.refresh_current_page();
                    Action::ShowDialog(DialogType::Info(SUCCESS_ENTRY_DELETED.to_string()))
                } else {
                    log::warn!("Entry {} not found for deletion", id);
                    Action::None
                }
            }
            Action::Navigate(href) => self.navigate(&href),
            Action::LoginSubmitted(credentials) => {
                self.logger.log(format!("Signed in as {}", credentials.email));
                self.navigate(ROUTE_HOME);
                Action::ShowDialog(DialogType::Info(format!("{SUCCESS_LOGGED_IN} {}", credentials.email)))
            }
            Action::RegisterSubmitted(registration) => {
                self.logger.log(format!(
                    "Account created for {} ({})",
                    registration.username, registration.email
                ));
                self.navigate(ROUTE_LOGIN);
                Action::ShowDialog(DialogType::Info(format!(
                    "{SUCCESS_ACCOUNT_CREATED} {}",
                    registration.username
                )))
            }
            Action::InputChanged { .. } => Action::None,
            Action::ShowDialog(dialog) => {
                match dialog {
                    DialogType::DeleteConfirmation { target } => self.delete_dialog.open(target),
                    DialogType::Error(message) => self.overlay = Some(Overlay::Message(MessageDialog::error(message))),
                    DialogType::Info(message) => self.overlay = Some(Overlay::Message(MessageDialog::info(message))),
                    DialogType::Logs => self.overlay = Some(Overlay::Logs(LogsDialog::new(self.logger.get_logs()))),
                }
                Action::None
            }
            Action::HideDialog => {
                self.overlay = None;
                Action::None
            }
            Action::None => Action::None,
            other => {
                log::debug!("Unhandled action {:?}", other);
                Action::None
            }
        }
    }

    /// Follow a route. Account routes swap the ledger for a fresh form.
    fn navigate(&mut self, href: &str) -> Action {
        self.logger.log(format!("Navigated to {}", href));
        if href == ROUTE_FORGOT_PASSWORD {
            return Action::ShowDialog(DialogType::Info(INFO_PASSWORD_RESET.to_string()));
        }

        let previous = self.focus;
        self.component_mut(previous).on_blur();
        self.sidebar.set_route(href);
        self.auth = AuthScreen::for_route(href);
        self.focus = match (&self.auth, previous) {
            (Some(_), _) => FocusArea::Form,
            (None, FocusArea::Form) => FocusArea::Table,
            (None, other) => other,
        };
        self.component_mut(self.focus).on_focus();
        Action::None
    }

    fn run_row_action(&mut self, id: &str) -> Action {
        let Some(entry) = self.table.selected_row().cloned() else {
            return Action::None;
        };
        match id {
            ACTION_DETAILS => Action::ShowDialog(DialogType::Info(format!(
                "{} · {} · {} {}\n{}\nDébit {} / Crédit {}",
                entry.id,
                entry.date.format("%d/%m/%Y"),
                entry.journal,
                entry.account,
                entry.label,
                format_amount(entry.debit_cents),
                format_amount(entry.credit_cents),
            ))),
            ACTION_DUPLICATE => {
                let duplicated = match self.ledger.write() {
                    Ok(mut entries) => ledger::duplicate_entry(&mut entries, &entry.id),
                    Err(_) => None,
                };
                match duplicated {
                    Some(new_id) => {
                        self.logger.log(format!("Duplicated entry {} as {}", entry.id, new_id));
                        self.refresh_current_page();
                        Action::ShowDialog(DialogType::Info(format!("{SUCCESS_ENTRY_DUPLICATED} ({new_id})")))
                    }
                    None => Action::None,
                }
            }
            ACTION_DELETE => Action::ShowDialog(DialogType::DeleteConfirmation { target: entry.id }),
            other => {
                log::warn!("Unknown row action '{}'", other);
                Action::None
            }
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        while let Ok(action) = self.background_action_rx.try_recv() {
            self.logger.log(format!("Background: Received action {:?}", action));
            actions.push(action);
        }

        let completed_tasks = self.task_manager.cleanup_finished_tasks();
        if !completed_tasks.is_empty() {
            self.logger.log(format!(
                "Background: Cleaned up {} finished tasks",
                completed_tasks.len()
            ));
        }

        actions
    }

    /// Process an event through the component hierarchy
    pub async fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        let action = match event_type {
            EventType::Key(key) => self.handle_key(key),
            EventType::Mouse(mouse) if self.mouse_enabled => self.handle_mouse(mouse),
            EventType::Tick => {
                for action in self.process_background_actions() {
                    let mut next = self.handle_app_action(action);
                    while next != Action::None {
                        next = self.handle_app_action(next);
                    }
                }
                Action::None
            }
            EventType::Mouse(_) | EventType::Resize(_, _) | EventType::Other => Action::None,
        };

        let mut next = self.handle_app_action(action);
        while next != Action::None {
            next = self.handle_app_action(next);
        }
        Ok(())
    }

    fn render_status_bar(&self, f: &mut Frame, rect: Rect) {
        let mut spans = vec![
            Span::styled(format!(" {} ", self.sidebar.route()), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("│ {} écritures ", self.entry_count()),
                Style::default().fg(Color::Gray),
            ),
        ];
        if let Some(kind) = self.export_button.exporting() {
            spans.push(Span::styled(
                format!("│ ⟳ Export {} ", kind),
                Style::default().fg(Color::Yellow),
            ));
        }
        let hints = if self.auth.is_some() {
            "│ Tab: champ suivant  Échap: menu  Ctrl+C: quitter"
        } else {
            "│ Tab: focus  /: rechercher  L: journaux  q: quitter"
        };
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
        f.render_widget(Paragraph::new(Line::from(spans)), rect);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.handle_key(key)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        self.handle_mouse(mouse)
    }

    fn update(&mut self, action: Action) -> Action {
        self.handle_app_action(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let layout = LayoutManager::main_layout(rect, self.sidebar_width);
        let toolbar = LayoutManager::toolbar_layout(layout.toolbar);

        self.sidebar.render(f, layout.sidebar);
        self.render_status_bar(f, layout.status);

        if let Some(screen) = &mut self.auth {
            self.form_area = layout.toolbar.union(layout.table);
            screen.component_mut().render(f, self.form_area);
        } else {
            self.table.render(f, layout.table);

            // Toolbar last so its popups overlap the table
            self.actions.render(f, toolbar.actions);
            self.delete_dialog.render_trigger(f, toolbar.delete);
            self.export_button.render(f, toolbar.export);
            self.picker.render(f, toolbar.period);
            self.selector.render(f, toolbar.selector);
        }

        self.delete_dialog.render(f, rect);
        match &mut self.overlay {
            Some(Overlay::Message(dialog)) => dialog.render(f, rect),
            Some(Overlay::Logs(dialog)) => dialog.render(f, rect),
            None => {}
        }
    }
}
