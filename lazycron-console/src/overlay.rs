//! Which dialog is shown and what it holds.
//!
//! Only one overlay is active at a time: opening any of them replaces the
//! previous one. Overlays fed by a remote fetch carry the [`Ticket`] of that
//! fetch and ignore results belonging to an older one.

use lazycron_data::{Job, JobLog, Worker};
use log::info;

use crate::{time::format_millis, Ticket};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Edit(EditView),
    Logs(LogView),
    Workers(WorkerView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Edit,
    Logs,
    Workers,
}

/// Detached copy of a job being edited. Discarded on close, submitted as is
/// on save.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub name: String,
    pub command: String,
    pub cron_expr: String,
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        JobDraft {
            name: job.name.clone(),
            command: job.command.clone(),
            cron_expr: job.cron_expr.clone(),
        }
    }
}

/// The editor, tagged with the ticket it was opened with so a save that
/// completes late only closes the draft it submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub ticket: Ticket,
    pub draft: JobDraft,
}

impl From<JobDraft> for Job {
    fn from(draft: JobDraft) -> Self {
        let JobDraft {
            name,
            command,
            cron_expr,
        } = draft;
        Job {
            name,
            command,
            cron_expr,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogView {
    /// Name of the job the logs belong to
    pub title: String,
    pub ticket: Ticket,
    pub loading: bool,
    pub rows: Vec<LogRow>,
}

/// A log record with its times already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub command: String,
    pub err: String,
    pub output: String,
    pub plan_time: String,
    pub schedule_time: String,
    pub exec_start_time: String,
    pub exec_end_time: String,
}

impl From<JobLog> for LogRow {
    fn from(log: JobLog) -> Self {
        let JobLog {
            command,
            err,
            output,
            plan_time,
            schedule_time,
            exec_start_time,
            exec_end_time,
            ..
        } = log;
        LogRow {
            command,
            err,
            output,
            plan_time: format_millis(plan_time),
            schedule_time: format_millis(schedule_time),
            exec_start_time: format_millis(exec_start_time),
            exec_end_time: format_millis(exec_end_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerView {
    pub ticket: Ticket,
    pub loading: bool,
    pub ids: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OverlayController {
    active: Overlay,
    issued: Ticket,
}

impl OverlayController {
    pub fn active(&self) -> &Overlay {
        &self.active
    }

    pub fn kind(&self) -> Option<OverlayKind> {
        match self.active {
            Overlay::None => None,
            Overlay::Edit(_) => Some(OverlayKind::Edit),
            Overlay::Logs(_) => Some(OverlayKind::Logs),
            Overlay::Workers(_) => Some(OverlayKind::Workers),
        }
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn draft(&self) -> Option<&JobDraft> {
        match &self.active {
            Overlay::Edit(view) => Some(&view.draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut JobDraft> {
        match &mut self.active {
            Overlay::Edit(view) => Some(&mut view.draft),
            _ => None,
        }
    }

    /// Ticket of the open editor.
    pub fn editing(&self) -> Option<Ticket> {
        match &self.active {
            Overlay::Edit(view) => Some(view.ticket),
            _ => None,
        }
    }

    pub fn open_edit(&mut self, draft: JobDraft) -> Ticket {
        let ticket = self.issue();
        info!("Opening editor for {:?} ({})", draft.name, ticket);
        self.active = Overlay::Edit(EditView { ticket, draft });
        ticket
    }

    /// Shows an empty log dialog for `job_name`.
    pub fn open_logs(&mut self, job_name: &str) -> Ticket {
        let ticket = self.issue();
        info!("Opening logs of {:?} ({})", job_name, ticket);
        self.active = Overlay::Logs(LogView {
            title: job_name.to_string(),
            ticket,
            loading: true,
            rows: Vec::new(),
        });
        ticket
    }

    /// Returns false when the log dialog was closed or reopened meanwhile.
    pub fn fill_logs(&mut self, ticket: Ticket, logs: Vec<JobLog>) -> bool {
        match &mut self.active {
            Overlay::Logs(view) if view.ticket == ticket => {
                view.rows = logs.into_iter().map(LogRow::from).collect();
                view.loading = false;
                true
            }
            _ => false,
        }
    }

    pub fn open_workers(&mut self) -> Ticket {
        let ticket = self.issue();
        info!("Opening workers ({})", ticket);
        self.active = Overlay::Workers(WorkerView {
            ticket,
            loading: true,
            ids: Vec::new(),
        });
        ticket
    }

    pub fn fill_workers(&mut self, ticket: Ticket, workers: Vec<Worker>) -> bool {
        match &mut self.active {
            Overlay::Workers(view) if view.ticket == ticket => {
                view.ids = workers.into_iter().map(|worker| worker.id).collect();
                view.loading = false;
                true
            }
            _ => false,
        }
    }

    /// Marks a fetch as finished without data.
    pub fn settle(&mut self, ticket: Ticket) {
        match &mut self.active {
            Overlay::Logs(view) if view.ticket == ticket => view.loading = false,
            Overlay::Workers(view) if view.ticket == ticket => view.loading = false,
            _ => (),
        }
    }

    pub fn close(&mut self) {
        self.active = Overlay::None;
    }

    /// Closes the editor opened with `ticket`, leaving any other overlay,
    /// including a newer editor, in place.
    pub fn close_edit(&mut self, ticket: Ticket) -> bool {
        if self.editing() == Some(ticket) {
            self.close();
            true
        } else {
            false
        }
    }

    fn issue(&mut self) -> Ticket {
        self.issued = self.issued.next();
        self.issued
    }
}
