//! Client side of the inventory: a snapshot of the product list with
//! filtering, sorting, paging, totals, and import/export, driven against the
//! product service over HTTP.

pub mod client;
pub mod controller;
pub mod state;
pub mod summary;
pub mod transfer;
pub mod view;

pub use client::{ClientError, ProductClient};
pub use controller::{Dashboard, PendingDelete, SubmitOutcome};
pub use state::{DashboardState, Mode, SubmitTarget};
pub use summary::Summary;
pub use view::SortKey;
