use std::{cell::RefCell, collections::VecDeque};

use lazycron_data::{Job, JobLog, Worker};

use super::{Gateway, GatewayResult, LogPage};
use crate::error::GatewayError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListJobs,
    SaveJob(Job),
    DeleteJob(String),
    KillJob(String),
    FetchLogs(String, LogPage),
    ListWorkers,
}

/// Records every call and answers from scripted replies, falling back to an
/// empty success once a queue runs dry.
#[derive(Default)]
pub struct MemoryGateway {
    calls: RefCell<Vec<Call>>,
    jobs: RefCell<VecDeque<GatewayResult<Vec<Job>>>>,
    saves: RefCell<VecDeque<GatewayResult<Option<Job>>>>,
    deletes: RefCell<VecDeque<GatewayResult<Option<Job>>>>,
    kills: RefCell<VecDeque<GatewayResult<()>>>,
    logs: RefCell<VecDeque<GatewayResult<Vec<JobLog>>>>,
    workers: RefCell<VecDeque<GatewayResult<Vec<Worker>>>>,
}

impl MemoryGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn reply_jobs(&self, reply: GatewayResult<Vec<Job>>) {
        self.jobs.borrow_mut().push_back(reply);
    }

    pub fn reply_save(&self, reply: GatewayResult<Option<Job>>) {
        self.saves.borrow_mut().push_back(reply);
    }

    pub fn reply_delete(&self, reply: GatewayResult<Option<Job>>) {
        self.deletes.borrow_mut().push_back(reply);
    }

    pub fn reply_kill(&self, reply: GatewayResult<()>) {
        self.kills.borrow_mut().push_back(reply);
    }

    pub fn reply_logs(&self, reply: GatewayResult<Vec<JobLog>>) {
        self.logs.borrow_mut().push_back(reply);
    }

    pub fn reply_workers(&self, reply: GatewayResult<Vec<Worker>>) {
        self.workers.borrow_mut().push_back(reply);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn next<T: Default>(queue: &RefCell<VecDeque<GatewayResult<T>>>) -> GatewayResult<T> {
    queue.borrow_mut().pop_front().unwrap_or_else(|| Ok(T::default()))
}

pub fn rejected(errno: i64) -> GatewayError {
    GatewayError::Rejected {
        errno,
        message: String::from("scripted failure"),
    }
}

pub fn job(name: &str, command: &str, cron_expr: &str) -> Job {
    Job {
        name: name.to_string(),
        command: command.to_string(),
        cron_expr: cron_expr.to_string(),
    }
}

#[async_trait::async_trait(?Send)]
impl Gateway for MemoryGateway {
    async fn list_jobs(&self) -> GatewayResult<Vec<Job>> {
        self.record(Call::ListJobs);
        next(&self.jobs)
    }

    async fn save_job(&self, job: &Job) -> GatewayResult<Option<Job>> {
        self.record(Call::SaveJob(job.clone()));
        next(&self.saves)
    }

    async fn delete_job(&self, name: &str) -> GatewayResult<Option<Job>> {
        self.record(Call::DeleteJob(name.to_string()));
        next(&self.deletes)
    }

    async fn kill_job(&self, name: &str) -> GatewayResult<()> {
        self.record(Call::KillJob(name.to_string()));
        next(&self.kills)
    }

    async fn fetch_logs(&self, name: &str, page: LogPage) -> GatewayResult<Vec<JobLog>> {
        self.record(Call::FetchLogs(name.to_string(), page));
        next(&self.logs)
    }

    async fn list_workers(&self) -> GatewayResult<Vec<Worker>> {
        self.record(Call::ListWorkers);
        next(&self.workers)
    }
}
