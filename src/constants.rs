//! Constants used throughout the widget kit
//!
//! This module centralizes user-facing French strings, sizing bounds and
//! other constant values so components and the demo app stay consistent.

// Selector
pub const SELECT_PLACEHOLDER: &str = "Sélectionner une option";
pub const SEARCH_PLACEHOLDER: &str = "Rechercher...";
pub const EMPTY_RESULTS: &str = "Aucun résultat trouvé";

// Table
pub const TABLE_SEARCH_PLACEHOLDER: &str = "Rechercher";
pub const TABLE_LOADING: &str = "Chargement en cours...";
pub const TABLE_NO_DATA: &str = "Pas de données";
pub const TABLE_SHOW: &str = "Afficher";
pub const TABLE_ITEMS_PER_PAGE: &str = "éléments par page";
pub const TABLE_RESULTS: &str = "résultats";
pub const TABLE_NO_RESULT: &str = "0 résultat";

// Export
pub const EXPORT_IDLE: &str = "Exporter";
pub const EXPORT_RUNNING: &str = "Export en cours...";

// Date range picker
pub const DATE_RANGE_PLACEHOLDER: &str = "Sélectionner une période";
pub const DATE_RANGE_PERIODS: &str = "Périodes";
pub const DATE_RANGE_CALENDAR: &str = "Calendrier";
pub const DATE_RANGE_CANCEL: &str = "Annuler";
pub const DATE_RANGE_APPLY: &str = "Valider";

// Delete dialog
pub const DELETE_TITLE: &str = "Êtes-vous sûr ?";
pub const DELETE_DESCRIPTION: &str = "Cette action ne peut pas être annulée.";
pub const DELETE_CONFIRM: &str = "Supprimer";
pub const DELETE_CANCEL: &str = "Annuler";

// Authentication
pub const AUTH_LOGIN_TITLE: &str = "Content de vous revoir";
pub const AUTH_LOGIN_SUBTITLE: &str = "Connectez-vous avec votre équipe en quelques minutes.";
pub const AUTH_LOGIN_SUBMIT: &str = "Se connecter";
pub const AUTH_FORGOT_PASSWORD: &str = "Mot de passe oublié ?";
pub const AUTH_NO_ACCOUNT: &str = "Vous n'avez pas de compte ?";
pub const AUTH_REGISTER_TITLE: &str = "Créer votre compte.";
pub const AUTH_REGISTER_SUBTITLE: &str = "Commencez à discuter avec votre équipe en quelques minutes.";
pub const AUTH_REGISTER_SUBMIT: &str = "Créer un compte";
pub const AUTH_HAS_ACCOUNT: &str = "Vous avez déjà un compte ?";
pub const AUTH_CLICK_HERE: &str = "Cliquez ici.";
pub const AUTH_TERMS: &str = "Accepter les conditions générales";
pub const AUTH_TERMS_REQUIRED: &str = "Vous devez accepter les conditions";
pub const AUTH_REQUIRED_FIELD: &str = "Ce champ est obligatoire";
pub const AUTH_INVALID_EMAIL: &str = "Adresse email invalide";

// Routes
pub const ROUTE_HOME: &str = "/home";
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_REGISTER: &str = "/register";
pub const ROUTE_FORGOT_PASSWORD: &str = "/mot-de-passe-oublie";

// Messages
pub const ERROR_EXPORT_FAILED: &str = "❌ Échec de l'export";
pub const SUCCESS_EXPORT_DONE: &str = "✅ Export terminé";
pub const SUCCESS_ENTRY_DELETED: &str = "✅ Écriture supprimée";
pub const SUCCESS_ENTRY_DUPLICATED: &str = "✅ Écriture dupliquée";
pub const SUCCESS_LOGGED_IN: &str = "✅ Connecté en tant que";
pub const SUCCESS_ACCOUNT_CREATED: &str = "✅ Compte créé pour";
pub const INFO_PASSWORD_RESET: &str = "Un lien de réinitialisation vous sera envoyé par email.";

// Configuration
pub const CONFIG_GENERATED: &str = "✅ Fichier de configuration généré";
pub const SIDEBAR_DEFAULT_WIDTH: u16 = 28;
pub const SIDEBAR_MIN_WIDTH: u16 = 20;
pub const SIDEBAR_MAX_WIDTH: u16 = 60;

/// Page sizes offered by the table footer, in display order.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Number of page buttons rendered by the pager.
pub const PAGE_WINDOW_SIZE: usize = 5;
