use lazycron_data::Job;
use log::{info, warn};

use crate::{error::GatewayError, gateway::Gateway, Ticket};

/// The jobs currently displayed, in the order the service returned them.
///
/// Refreshes always replace the whole collection. A failed refresh keeps
/// the previous rows, and a refresh that completes after a newer one was
/// issued is dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobTable {
    jobs: Vec<Job>,
    issued: Ticket,
}

impl JobTable {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.name == name)
    }

    pub fn begin_refresh(&mut self) -> Ticket {
        self.issued = self.issued.next();
        self.issued
    }

    pub fn complete_refresh(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Job>, GatewayError>,
    ) -> Result<usize, GatewayError> {
        if ticket != self.issued {
            info!("Dropping refresh {} superseded by {}", ticket, self.issued);
            return Err(GatewayError::Cancelled);
        }
        let jobs = match result {
            Ok(jobs) => jobs,
            Err(err) => {
                warn!("Keeping {} displayed jobs: {}", self.jobs.len(), err);
                return Err(err);
            }
        };
        info!("Displaying {} jobs", jobs.len());
        self.jobs = jobs;
        Ok(self.jobs.len())
    }

    /// Fetches the job list and replaces the table with it.
    pub async fn refresh<G: Gateway + ?Sized>(&mut self, gateway: &G) -> Result<usize, GatewayError> {
        let ticket = self.begin_refresh();
        let result = gateway.list_jobs().await;
        self.complete_refresh(ticket, result)
    }
}
