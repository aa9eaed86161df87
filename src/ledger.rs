//! Accounting entries browsed by the demo application.
//!
//! Amounts are integer cents. The dataset is either read from the JSON file
//! named by `COMPTOIR_DATA` or generated deterministically.

use crate::ui::components::date_range_picker::DateRange;
use crate::ui::components::export_button::{ExportHandler, ExportKind};
use crate::ui::components::select_search::SelectOption;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use quick_xml::se::QuoteLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const DATA_ENV_VAR: &str = "COMPTOIR_DATA";

/// Journal codes with their labels and full names.
pub const JOURNALS: [(&str, &str, &str); 5] = [
    ("AC", "Achats", "Journal des achats"),
    ("VT", "Ventes", "Journal des ventes"),
    ("BQ", "Banque", "Journal de banque"),
    ("CA", "Caisse", "Journal de caisse"),
    ("OD", "Opérations diverses", "Journal des opérations diverses"),
];

const SAMPLE_ACCOUNTS: [(&str, &str); 8] = [
    ("401000", "Fournisseur"),
    ("411000", "Client"),
    ("512000", "Virement bancaire"),
    ("530000", "Règlement espèces"),
    ("606100", "Fournitures non stockables"),
    ("613200", "Location immobilière"),
    ("706000", "Prestation de services"),
    ("625100", "Déplacements"),
];

pub type SharedLedger = Arc<RwLock<Vec<LedgerEntry>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub date: NaiveDate,
    pub journal: String,
    pub account: String,
    pub label: String,
    #[serde(default)]
    pub debit_cents: i64,
    #[serde(default)]
    pub credit_cents: i64,
}

impl LedgerEntry {
    pub fn balance_cents(&self) -> i64 {
        self.debit_cents - self.credit_cents
    }
}

/// Journals as selector options: code as value, short label, full name.
pub fn journal_options() -> Vec<SelectOption> {
    JOURNALS
        .iter()
        .map(|(code, label, name)| SelectOption::new(*code, *label).with_name(*name))
        .collect()
}

/// `1 234,56` (French grouping and decimal comma). Empty for zero.
pub fn format_amount(cents: i64) -> String {
    if cents == 0 {
        return String::new();
    }
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped},{:02}", cents % 100)
}

/// Read entries from a JSON array.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<LedgerEntry>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read ledger file: {}", path.as_ref().display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse ledger file: {}", path.as_ref().display()))
}

/// Entries from `COMPTOIR_DATA` when set, sample data otherwise.
pub fn load(today: NaiveDate) -> Result<Vec<LedgerEntry>> {
    match std::env::var(DATA_ENV_VAR) {
        Ok(path) => {
            let entries = load_from_file(&path)?;
            log::info!("Loaded {} entries from {}", entries.len(), path);
            Ok(entries)
        }
        Err(_) => {
            log::info!("{} not set, generating sample entries", DATA_ENV_VAR);
            Ok(sample_entries(120, today.year()))
        }
    }
}

/// Deterministic sample spread over `year`, sorted by date.
pub fn sample_entries(count: usize, year: i32) -> Vec<LedgerEntry> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: u64| {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    let mut entries: Vec<LedgerEntry> = (0..count)
        .filter_map(|index| {
            let date = NaiveDate::from_yo_opt(year, 1 + next(365) as u32)?;
            let (journal, _, _) = JOURNALS[next(JOURNALS.len() as u64) as usize];
            let (account, label) = SAMPLE_ACCOUNTS[next(SAMPLE_ACCOUNTS.len() as u64) as usize];
            let amount = 1_000 + next(500_000) as i64;
            let is_debit = next(2) == 0;
            Some(LedgerEntry {
                id: format!("E{:05}", index + 1),
                date,
                journal: journal.to_string(),
                account: account.to_string(),
                label: format!("{} {}", label, index + 1),
                debit_cents: if is_debit { amount } else { 0 },
                credit_cents: if is_debit { 0 } else { amount },
            })
        })
        .collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    entries
}

/// Journal and period restriction applied before paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub journal: Option<String>,
    pub range: Option<DateRange>,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let journal_ok = self.journal.as_deref().map_or(true, |journal| entry.journal == journal);
        let range_ok = self.range.map_or(true, |range| range.contains(entry.date));
        journal_ok && range_ok
    }

    pub fn apply(&self, entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
        entries.iter().filter(|entry| self.matches(entry)).cloned().collect()
    }
}

/// Copy of `entry` with a fresh id, inserted right after it.
pub fn duplicate_entry(entries: &mut Vec<LedgerEntry>, id: &str) -> Option<String> {
    let position = entries.iter().position(|entry| entry.id == id)?;
    let new_id = next_id(entries);
    let mut copy = entries[position].clone();
    copy.id = new_id.clone();
    entries.insert(position + 1, copy);
    Some(new_id)
}

pub fn delete_entry(entries: &mut Vec<LedgerEntry>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.id != id);
    entries.len() != before
}

fn next_id(entries: &[LedgerEntry]) -> String {
    let max = entries
        .iter()
        .filter_map(|entry| entry.id.strip_prefix('E')?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("E{:05}", max + 1)
}

#[derive(Serialize)]
#[serde(rename = "ecritures")]
struct XmlLedger<'a> {
    #[serde(rename = "ecriture")]
    entries: Vec<XmlEntry<'a>>,
}

#[derive(Serialize)]
struct XmlEntry<'a> {
    #[serde(rename = "@id")]
    id: &'a str,
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "@journal")]
    journal: &'a str,
    #[serde(rename = "@compte")]
    account: &'a str,
    libelle: &'a str,
    debit: i64,
    credit: i64,
}

impl<'a> From<&'a LedgerEntry> for XmlEntry<'a> {
    fn from(entry: &'a LedgerEntry) -> Self {
        Self {
            id: &entry.id,
            date: entry.date.format("%Y-%m-%d").to_string(),
            journal: &entry.journal,
            account: &entry.account,
            libelle: &entry.label,
            debit: entry.debit_cents,
            credit: entry.credit_cents,
        }
    }
}

/// Entries as an `<ecritures>` XML document.
pub fn to_xml(entries: &[LedgerEntry]) -> Result<String> {
    let document = XmlLedger {
        entries: entries.iter().map(XmlEntry::from).collect(),
    };

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    serializer.set_quote_level(QuoteLevel::Full);
    document
        .serialize(serializer)
        .context("Failed to serialize ledger as XML")?;
    xml.push('\n');
    Ok(xml)
}

/// Writes the shared ledger as XML into `output_dir`.
pub struct XmlExporter {
    entries: SharedLedger,
    output_dir: PathBuf,
}

impl XmlExporter {
    pub fn new(entries: SharedLedger, output_dir: PathBuf) -> Self {
        Self { entries, output_dir }
    }
}

#[async_trait]
impl ExportHandler for XmlExporter {
    async fn export(&self, kind: ExportKind) -> Result<()> {
        if kind != ExportKind::Xml {
            anyhow::bail!("XmlExporter cannot produce {}", kind);
        }

        let document = {
            let entries = self
                .entries
                .read()
                .map_err(|_| anyhow::anyhow!("Ledger lock poisoned"))?;
            to_xml(&entries)?
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create export directory: {}", self.output_dir.display()))?;
        let path = self.output_dir.join(format!(
            "ecritures-{}.{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S"),
            kind.extension()
        ));
        tokio::fs::write(&path, document)
            .await
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;

        log::info!("Exported ledger to {}", path.display());
        Ok(())
    }
}
