use lazycron_data::{Job, JobLog, Worker};

use crate::error::GatewayError;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The endpoints of the scheduling service.
///
/// Every call resolves once the exchange completes. A response whose
/// envelope carries a non-zero status resolves to
/// [`GatewayError::Rejected`] and its payload is never looked at.
#[async_trait::async_trait(?Send)]
pub trait Gateway {
    async fn list_jobs(&self) -> GatewayResult<Vec<Job>>;
    /// Creates or replaces a job, returning the replaced definition.
    async fn save_job(&self, job: &Job) -> GatewayResult<Option<Job>>;
    /// Returns the deleted definition when the job existed.
    async fn delete_job(&self, name: &str) -> GatewayResult<Option<Job>>;
    async fn kill_job(&self, name: &str) -> GatewayResult<()>;
    async fn fetch_logs(&self, name: &str, page: LogPage) -> GatewayResult<Vec<JobLog>>;
    async fn list_workers(&self) -> GatewayResult<Vec<Worker>>;
}

/// Window over a job's logs, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPage {
    pub skip: u32,
    pub limit: u32,
}

impl Default for LogPage {
    fn default() -> Self {
        LogPage { skip: 0, limit: 20 }
    }
}

pub use http::HttpGateway;

mod http;
#[cfg(test)]
pub(crate) mod memory;
