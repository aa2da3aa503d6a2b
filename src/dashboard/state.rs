use crate::dashboard::summary::Summary;
use crate::dashboard::view::{self, SortKey};
use crate::products::repo_types::Product;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing(i64),
}

/// Which request a form submit turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(i64),
}

/// Client-side view over the last fetched product list.
///
/// The snapshot is never patched locally; callers replace it wholesale with
/// [`DashboardState::replace_snapshot`] after every mutation.
#[derive(Debug, Clone)]
pub struct DashboardState {
    products: Vec<Product>,
    filtered: Vec<Product>,
    search: String,
    sort: Option<SortKey>,
    current_page: usize,
    items_per_page: usize,
    mode: Mode,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            filtered: Vec::new(),
            search: String::new(),
            sort: None,
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            mode: Mode::Viewing,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_snapshot(&mut self, products: Vec<Product>) {
        self.products = products;
        self.apply_filters();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.apply_filters();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
        self.apply_filters();
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    fn apply_filters(&mut self) {
        self.filtered = view::filter_products(&self.products, &self.search);
        if let Some(key) = self.sort {
            view::sort_products(&mut self.filtered, key);
        }
        self.current_page = 1;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn page_count(&self) -> usize {
        view::page_count(self.filtered.len(), self.items_per_page)
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.page_count() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count().max(1));
    }

    pub fn page_items(&self) -> &[Product] {
        view::paginate(&self.filtered, self.current_page, self.items_per_page)
    }

    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.current_page, self.page_count().max(1))
    }

    pub fn render(&self) -> String {
        let mut out = view::render_table(self.page_items());
        out.push_str(&self.page_info());
        out.push('\n');
        out
    }

    pub fn summary(&self) -> Summary {
        Summary::from_products(&self.products)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Enters edit mode for a product in the snapshot and returns it for the form.
    pub fn begin_edit(&mut self, id: i64) -> Option<&Product> {
        let product = self.products.iter().find(|p| p.id == id)?;
        self.mode = Mode::Editing(id);
        Some(product)
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Viewing;
    }

    pub fn submit_target(&self) -> SubmitTarget {
        match self.mode {
            Mode::Viewing => SubmitTarget::Create,
            Mode::Editing(id) => SubmitTarget::Update(id),
        }
    }
}
