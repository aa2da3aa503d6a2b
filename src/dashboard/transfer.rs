use std::fmt::Write as _;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::products::repo_types::Product;

pub const DEFAULT_EXPORT_FILE: &str = "products.json";

/// One entry of an import file. Values are forwarded as-is; absent fields are sent as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub stock: Value,
}

impl ImportRecord {
    pub fn label(&self) -> Option<&str> {
        self.name.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportStatus {
    Created(i64),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub index: usize,
    pub name: Option<String>,
    pub status: ImportStatus,
}

/// Per-record result of an import, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImportStatus::Created(_)))
            .count()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ImportOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImportStatus::Rejected(_)))
    }

    pub fn is_complete(&self) -> bool {
        self.rejected().next().is_none()
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Imported {} of {} records\n",
            self.created(),
            self.outcomes.len()
        );
        for o in self.rejected() {
            if let ImportStatus::Rejected(reason) = &o.status {
                let _ = writeln!(
                    out,
                    "  #{} {}: {}",
                    o.index + 1,
                    o.name.as_deref().unwrap_or("<unnamed>"),
                    reason
                );
            }
        }
        out
    }
}

/// Parses an import file. Anything but a JSON array of objects fails as a whole.
pub fn parse_import(text: &str) -> anyhow::Result<Vec<ImportRecord>> {
    serde_json::from_str::<Vec<ImportRecord>>(text).context("import file must be a JSON array of products")
}

pub fn export_json(products: &[Product]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(products).context("serialize products")
}
