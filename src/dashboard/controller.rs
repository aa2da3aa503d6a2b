use tracing::{error, info, instrument, warn};

use crate::dashboard::client::{ClientError, ProductClient};
use crate::dashboard::state::{DashboardState, SubmitTarget};
use crate::dashboard::transfer::{self, ImportOutcome, ImportRecord, ImportReport, ImportStatus};
use crate::products::repo_types::NewProduct;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(i64),
    Updated(i64),
}

/// A delete that has been asked for but not yet confirmed.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a delete only happens once it is confirmed"]
pub struct PendingDelete {
    id: i64,
}

impl PendingDelete {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Ties the view state to the service. Every successful write is followed
/// by a full reload; the local snapshot is never patched.
pub struct Dashboard {
    client: ProductClient,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }

    /// Fetches the full list and replaces the snapshot.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let products = self.client.list().await?;
        self.state.replace_snapshot(products);
        Ok(())
    }

    /// Like [`Dashboard::load`], but a failure is only logged and the old snapshot stays.
    pub async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            error!(error = %e, "failed to load products");
        }
    }

    #[instrument(skip(self, product))]
    pub async fn submit(&mut self, product: &NewProduct) -> Result<SubmitOutcome, ClientError> {
        let outcome = match self.state.submit_target() {
            SubmitTarget::Create => SubmitOutcome::Created(self.client.create(product).await?.id),
            SubmitTarget::Update(id) => {
                self.client.update(id, product).await?;
                SubmitOutcome::Updated(id)
            }
        };
        self.state.cancel_edit();
        self.refresh().await;
        Ok(outcome)
    }

    pub fn request_delete(&self, id: i64) -> PendingDelete {
        PendingDelete { id }
    }

    #[instrument(skip(self))]
    pub async fn confirm_delete(&mut self, pending: PendingDelete) -> Result<(), ClientError> {
        let result = self.client.delete(pending.id).await;
        self.refresh().await;
        result?;
        info!(id = pending.id, "product deleted");
        Ok(())
    }

    /// Creates each record in order, one request at a time. Failures do not
    /// stop the batch; they are reported per record.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn import(&mut self, records: Vec<ImportRecord>) -> ImportReport {
        let mut report = ImportReport::default();
        for (index, record) in records.into_iter().enumerate() {
            let name = record.label().map(str::to_owned);
            let status = match self.client.create(&record).await {
                Ok(created) => ImportStatus::Created(created.id),
                Err(e) => {
                    warn!(index, error = %e, "import record rejected");
                    ImportStatus::Rejected(e.reason())
                }
            };
            report.outcomes.push(ImportOutcome { index, name, status });
        }
        self.refresh().await;
        report
    }

    pub fn export_json(&self) -> anyhow::Result<String> {
        transfer::export_json(self.state.products())
    }
}
