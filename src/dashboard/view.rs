use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::products::repo_types::Product;

pub const EMPTY_PLACEHOLDER: &str = "No products found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Category,
    Price,
    Stock,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Price => "price",
            Self::Stock => "stock",
        };
        f.write_str(s)
    }
}

/// Case-insensitive substring match against name or category.
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    let term = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&term) || p.category.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Stable ascending sort.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => products.sort_by(|a, b| compare_text(&a.name, &b.name)),
        SortKey::Category => products.sort_by(|a, b| compare_text(&a.category, &b.category)),
        SortKey::Price => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Stock => products.sort_by_key(|p| p.stock),
    }
}

// Case folds first so "apple" < "Banana", then raw text breaks ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1))
}

/// Items of the 1-based `page`; empty when the page is past the end.
pub fn paginate(items: &[Product], page: usize, per_page: usize) -> &[Product] {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn render_table(rows: &[Product]) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_PLACEHOLDER}\n");
    }

    let header = ["ID", "Name", "Category", "Price", "Stock"];
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.category.clone(),
                format!("{:.2}", p.price),
                p.stock.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = row
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, w))| {
            // numeric columns are right-aligned
            if i == 0 || i >= 3 {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
