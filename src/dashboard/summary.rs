use crate::products::repo_types::Product;

const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStock {
    pub category: String,
    pub stock: i64,
}

/// Dashboard totals, computed from the full snapshot rather than the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_products: usize,
    pub total_stock: i64,
    pub total_value: f64,
    /// In order of first appearance in the snapshot.
    pub stock_by_category: Vec<CategoryStock>,
}

impl Summary {
    pub fn from_products(products: &[Product]) -> Self {
        let mut stock_by_category: Vec<CategoryStock> = Vec::new();
        for p in products {
            match stock_by_category.iter_mut().find(|c| c.category == p.category) {
                Some(entry) => entry.stock += i64::from(p.stock),
                None => stock_by_category.push(CategoryStock {
                    category: p.category.clone(),
                    stock: i64::from(p.stock),
                }),
            }
        }

        Self {
            total_products: products.len(),
            total_stock: products.iter().map(|p| i64::from(p.stock)).sum(),
            // fold from +0.0; an empty f64 sum is -0.0 and would print as "-0.00"
            total_value: products
                .iter()
                .fold(0.0, |acc, p| acc + p.price * f64::from(p.stock)),
            stock_by_category,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Products:    {}\nTotal stock: {}\nTotal value: {:.2}\n",
            self.total_products, self.total_stock, self.total_value
        );
        if !self.stock_by_category.is_empty() {
            out.push_str("\nStock by category\n");
            out.push_str(&self.render_chart(CHART_WIDTH));
        }
        out
    }

    /// Horizontal bar chart, bars scaled to `width` for the largest category.
    pub fn render_chart(&self, width: usize) -> String {
        let max = self
            .stock_by_category
            .iter()
            .map(|c| c.stock)
            .max()
            .unwrap_or(0)
            .max(1);
        let label_width = self
            .stock_by_category
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for c in &self.stock_by_category {
            let len = (c.stock.max(0) as u128 * width as u128 / max as u128) as usize;
            out.push_str(&format!(
                "{:<label_width$} | {} {}\n",
                c.category,
                "#".repeat(len),
                c.stock
            ));
        }
        out
    }
}
