use std::{cell::RefCell, future::Future, rc::Rc};

use futures::future::{AbortHandle, Abortable};
use lazycron_data::Job;
use log::{debug, info, warn};

use crate::{
    error::{DispatchError, GatewayError},
    gateway::{Gateway, GatewayResult, LogPage},
    overlay::JobDraft,
    Console, Notice,
};

type Observer = Box<dyn Fn(&Console)>;

/// Turns operator gestures into remote calls and keeps the [`Console`]
/// model in step with the service.
///
/// Clones share the same model, so a front-end can hand one to every
/// event handler. The model is only borrowed between awaits; overlapping
/// actions each complete on their own.
pub struct Dispatcher<G> {
    gateway: Rc<G>,
    console: Rc<RefCell<Console>>,
    observers: Rc<RefCell<Vec<Observer>>>,
    in_flight: Rc<RefCell<Option<AbortHandle>>>,
    log_page: LogPage,
}

impl<G> Clone for Dispatcher<G> {
    fn clone(&self) -> Self {
        Dispatcher {
            gateway: self.gateway.clone(),
            console: self.console.clone(),
            observers: self.observers.clone(),
            in_flight: self.in_flight.clone(),
            log_page: self.log_page,
        }
    }
}

impl<G: Gateway> Dispatcher<G> {
    pub fn new(gateway: G) -> Self {
        Dispatcher {
            gateway: Rc::new(gateway),
            console: Rc::default(),
            observers: Rc::default(),
            in_flight: Rc::default(),
            log_page: LogPage::default(),
        }
    }

    pub fn with_log_page(self, log_page: LogPage) -> Self {
        Dispatcher { log_page, ..self }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Registers a callback run after every change of the model.
    pub fn observe(&self, observer: impl Fn(&Console) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn snapshot(&self) -> Console {
        self.console.borrow().clone()
    }

    pub fn read<R>(&self, read: impl FnOnce(&Console) -> R) -> R {
        read(&self.console.borrow())
    }

    pub async fn refresh(&self) -> Result<usize, DispatchError> {
        let outcome = self.load().await;
        if let Err(err) = &outcome {
            self.report("Loading jobs", err);
        }
        Ok(outcome?)
    }

    pub fn new_job(&self) {
        self.abort_in_flight();
        self.update(|console| console.overlays.open_edit(JobDraft::default()));
    }

    /// Opens the editor seeded with the displayed job called `name`.
    pub fn edit_job(&self, name: &str) -> Result<(), DispatchError> {
        let draft = self.read(|console| console.table.find(name).map(JobDraft::from));
        let Some(draft) = draft else {
            warn!("Cannot edit {:?}: not displayed", name);
            return Err(DispatchError::UnknownJob(name.to_string()));
        };
        self.abort_in_flight();
        self.update(|console| console.overlays.open_edit(draft));
        Ok(())
    }

    /// Changes the open draft. Observers are not notified: the editor
    /// already shows what the operator typed.
    pub fn update_draft(&self, edit: impl FnOnce(&mut JobDraft)) -> Result<(), DispatchError> {
        let mut console = self.console.borrow_mut();
        let draft = console
            .overlays
            .draft_mut()
            .ok_or(DispatchError::EditorClosed)?;
        edit(draft);
        Ok(())
    }

    /// Submits the draft, then closes its editor and reloads the table
    /// whatever the outcome. An editor opened while the save was pending
    /// stays open.
    pub async fn save_job(&self) -> Result<Option<Job>, DispatchError> {
        let editing = self.read(|console| {
            let ticket = console.overlays.editing()?;
            let draft = console.overlays.draft()?.clone();
            Some((ticket, draft))
        });
        let (ticket, draft) = editing.ok_or(DispatchError::EditorClosed)?;
        let job = Job::from(draft);
        info!("Saving job {:?} ({})", job.name, ticket);
        let result = self.gateway.save_job(&job).await;
        self.update(|console| console.overlays.close_edit(ticket));
        let outcome = match &result {
            Ok(Some(_)) => Some(self.announce(format!("Job {} updated", job.name))),
            Ok(None) => Some(self.announce(format!("Job {} created", job.name))),
            Err(err) => self.report("Saving job", err),
        };
        self.reload(outcome).await;
        Ok(result?)
    }

    /// Deletes a job, then reloads the table whatever the outcome.
    pub async fn delete_job(&self, name: &str) -> Result<Option<Job>, DispatchError> {
        info!("Deleting job {:?}", name);
        let result = self.gateway.delete_job(name).await;
        let outcome = match &result {
            Ok(Some(_)) => Some(self.announce(format!("Job {} deleted", name))),
            Ok(None) => Some(self.announce(format!("No job {} to delete", name))),
            Err(err) => self.report("Deleting job", err),
        };
        self.reload(outcome).await;
        Ok(result?)
    }

    /// Asks workers to stop the running instance. The job definition and
    /// the table stay as they are.
    pub async fn kill_job(&self, name: &str) -> Result<(), DispatchError> {
        info!("Killing job {:?}", name);
        match self.gateway.kill_job(name).await {
            Ok(()) => {
                self.announce(format!("Kill signal sent to {}", name));
                Ok(())
            }
            Err(err) => {
                self.report("Killing job", &err);
                Err(err.into())
            }
        }
    }

    /// Opens the log dialog for `name` and fills it with the most recent
    /// records. On failure the dialog stays open and empty.
    pub async fn show_logs(&self, name: &str) -> Result<usize, DispatchError> {
        let ticket = self.update(|console| console.overlays.open_logs(name));
        let result = self
            .cancellable(self.gateway.fetch_logs(name, self.log_page))
            .await;
        match result {
            Ok(logs) => {
                let count = logs.len();
                debug!("Received {} logs for {:?}", count, name);
                self.update(|console| console.overlays.fill_logs(ticket, logs));
                Ok(count)
            }
            Err(err) => {
                self.update(|console| console.overlays.settle(ticket));
                self.report("Loading logs", &err);
                Err(err.into())
            }
        }
    }

    /// Opens the worker dialog and fills it with the active workers.
    pub async fn list_workers(&self) -> Result<usize, DispatchError> {
        let ticket = self.update(|console| console.overlays.open_workers());
        let result = self.cancellable(self.gateway.list_workers()).await;
        match result {
            Ok(workers) => {
                let count = workers.len();
                debug!("Received {} workers", count);
                self.update(|console| console.overlays.fill_workers(ticket, workers));
                Ok(count)
            }
            Err(err) => {
                self.update(|console| console.overlays.settle(ticket));
                self.report("Listing workers", &err);
                Err(err.into())
            }
        }
    }

    pub fn close(&self) {
        self.abort_in_flight();
        self.update(|console| console.overlays.close());
    }

    pub fn dismiss_notice(&self) {
        self.update(|console| console.notice = None);
    }

    async fn load(&self) -> GatewayResult<usize> {
        let ticket = self.console.borrow_mut().table.begin_refresh();
        info!("Loading jobs ({})", ticket);
        let result = self.gateway.list_jobs().await;
        self.update(|console| console.table.complete_refresh(ticket, result))
    }

    /// Reloads the table after a change. A failed reload is added to the
    /// change's notice instead of replacing it.
    async fn reload(&self, outcome: Option<Notice>) {
        let err = match self.load().await {
            Ok(_) => return,
            Err(err) if err.is_cancelled() => {
                debug!("Reload after change superseded");
                return;
            }
            Err(err) => err,
        };
        warn!("Reload after change failed: {}", err);
        let text = match outcome {
            Some(notice) => format!("{}; loading jobs failed: {}", notice.text(), err),
            None => format!("Loading jobs failed: {}", err),
        };
        self.update(|console| console.notice = Some(Notice::Failure(text)));
    }

    /// Runs a fetch feeding an overlay, aborting the one still in flight.
    async fn cancellable<T>(
        &self,
        request: impl Future<Output = GatewayResult<T>>,
    ) -> GatewayResult<T> {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.in_flight.borrow_mut().replace(handle) {
            previous.abort();
        }
        Abortable::new(request, registration)
            .await
            .unwrap_or_else(|_| Err(GatewayError::Cancelled))
    }

    fn abort_in_flight(&self) {
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            handle.abort();
        }
    }

    fn announce(&self, text: String) -> Notice {
        info!("{}", text);
        let notice = Notice::Info(text);
        self.update(|console| console.notice = Some(notice.clone()));
        notice
    }

    fn report(&self, action: &str, err: &GatewayError) -> Option<Notice> {
        if err.is_cancelled() {
            debug!("{} superseded", action);
            return None;
        }
        warn!("{} failed: {}", action, err);
        let notice = Notice::Failure(format!("{} failed: {}", action, err));
        self.update(|console| console.notice = Some(notice.clone()));
        Some(notice)
    }

    fn update<R>(&self, change: impl FnOnce(&mut Console) -> R) -> R {
        let result = change(&mut self.console.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let console = self.console.borrow();
        for observer in self.observers.borrow().iter() {
            observer(&console);
        }
    }
}
