//! Command line access to a lazycron service.

use clap::{Parser, Subcommand};
use lazycron_console::{
    overlay::{LogView, WorkerView},
    Console, ConfigError, ConsoleConfig, DispatchError, Dispatcher, Gateway, LogPage, Overlay,
};
use lazycron_data::Job;

/// CLI to manage the jobs of a lazycron service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// File path to a JSON configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Service to send the requests to, overrides the configuration
    #[arg(short, long)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Lists every job definition
    JobsList,
    /// Creates a job or replaces the one with the same name
    JobsSave(JobSaveArgs),
    JobsDel {
        name: String,
    },
    /// Stops the running instance of a job
    JobsKill {
        name: String,
    },
    /// Shows the most recent executions of a job
    JobsLog(JobLogArgs),
    WorkersList,
}

#[derive(Parser, Debug, PartialEq, Eq)]
pub struct JobSaveArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub command: String,
    #[arg(long)]
    pub cron_expr: String,
}

#[derive(Parser, Debug, PartialEq, Eq)]
pub struct JobLogArgs {
    pub name: String,
    #[arg(long, default_value_t = 0)]
    pub skip: u32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

/// Reads the configuration file if one is given, then applies the server
/// override.
pub fn load_config(
    path: Option<&str>,
    server: Option<&str>,
) -> Result<ConsoleConfig, ConfigError> {
    let config = match path {
        Some(path) => ConsoleConfig::read(path)?,
        None => ConsoleConfig::default(),
    };
    match server {
        Some(server) => config.with_server(server),
        None => Ok(config),
    }
}

pub struct Handler<G> {
    dispatcher: Dispatcher<G>,
    log_page: LogPage,
}

impl<G: Gateway> Handler<G> {
    pub fn new(gateway: G, log_page: LogPage) -> Self {
        Handler {
            dispatcher: Dispatcher::new(gateway),
            log_page,
        }
    }

    /// Runs one command and returns what to print.
    pub async fn handle(&self, command: Commands) -> Result<String, DispatchError> {
        match command {
            Commands::JobsList => self.handle_list().await,
            Commands::JobsSave(args) => self.handle_save(args).await,
            Commands::JobsDel { name } => match self.dispatcher.delete_job(&name).await? {
                Some(_) => Ok(format!("Job {} deleted", name)),
                None => Ok(format!("No job {} to delete", name)),
            },
            Commands::JobsKill { name } => {
                self.dispatcher.kill_job(&name).await?;
                Ok(format!("Kill signal sent to {}", name))
            }
            Commands::JobsLog(args) => self.handle_log(args).await,
            Commands::WorkersList => self.handle_workers().await,
        }
    }

    async fn handle_list(&self) -> Result<String, DispatchError> {
        self.dispatcher.refresh().await?;
        Ok(self.dispatcher.read(|console| {
            let jobs = console.table.jobs();
            if jobs.is_empty() {
                return String::from("No jobs yet, try saving a job.");
            }
            jobs.iter()
                .map(|job| {
                    let Job {
                        name,
                        command,
                        cron_expr,
                    } = job;
                    format!("- name: {name}\n  command: {command}\n  cron_expr: {cron_expr}")
                })
                .collect::<Vec<_>>()
                .join("\n")
        }))
    }

    async fn handle_save(
        &self,
        JobSaveArgs {
            name,
            command,
            cron_expr,
        }: JobSaveArgs,
    ) -> Result<String, DispatchError> {
        self.dispatcher.new_job();
        self.dispatcher.update_draft(|draft| {
            draft.name = name.clone();
            draft.command = command;
            draft.cron_expr = cron_expr;
        })?;
        match self.dispatcher.save_job().await? {
            Some(_) => Ok(format!("Job {} updated", name)),
            None => Ok(format!("Job {} created", name)),
        }
    }

    async fn handle_log(
        &self,
        JobLogArgs { name, skip, limit }: JobLogArgs,
    ) -> Result<String, DispatchError> {
        let page = LogPage {
            skip,
            limit: limit.unwrap_or(self.log_page.limit),
        };
        let dispatcher = self.dispatcher.clone().with_log_page(page);
        dispatcher.show_logs(&name).await?;
        Ok(dispatcher.read(|console| match overlay(console) {
            Overlay::Logs(LogView { rows, .. }) if rows.is_empty() => {
                format!("No executions of {} yet.", name)
            }
            Overlay::Logs(LogView { rows, .. }) => rows
                .iter()
                .map(|row| {
                    format!(
                        "- planned: {}\n  scheduled: {}\n  started: {}\n  finished: {}\n  command: {}\n  err: {}\n  output: {}",
                        row.plan_time,
                        row.schedule_time,
                        row.exec_start_time,
                        row.exec_end_time,
                        row.command,
                        row.err,
                        row.output.trim_end(),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }))
    }

    async fn handle_workers(&self) -> Result<String, DispatchError> {
        self.dispatcher.list_workers().await?;
        Ok(self.dispatcher.read(|console| match overlay(console) {
            Overlay::Workers(WorkerView { ids, .. }) if ids.is_empty() => {
                String::from("No workers online.")
            }
            Overlay::Workers(WorkerView { ids, .. }) => ids
                .iter()
                .map(|id| format!("- {id}"))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }))
    }
}

fn overlay(console: &Console) -> &Overlay {
    console.overlays.active()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use lazycron_console::{gateway::GatewayResult, GatewayError};
    use lazycron_data::{JobLog, Worker};

    use super::*;

    #[derive(Default)]
    struct FakeGateway {
        jobs: RefCell<Vec<Job>>,
        logs: Vec<JobLog>,
        workers: Vec<Worker>,
        pages: RefCell<Vec<LogPage>>,
        kill_errno: Option<i64>,
        list_fails: bool,
    }

    #[async_trait::async_trait(?Send)]
    impl Gateway for FakeGateway {
        async fn list_jobs(&self) -> GatewayResult<Vec<Job>> {
            if self.list_fails {
                return Err(GatewayError::Timeout);
            }
            Ok(self.jobs.borrow().clone())
        }

        async fn save_job(&self, job: &Job) -> GatewayResult<Option<Job>> {
            let mut jobs = self.jobs.borrow_mut();
            let previous = jobs.iter().position(|known| known.name == job.name);
            Ok(match previous {
                Some(index) => Some(std::mem::replace(&mut jobs[index], job.clone())),
                None => {
                    jobs.push(job.clone());
                    None
                }
            })
        }

        async fn delete_job(&self, name: &str) -> GatewayResult<Option<Job>> {
            let mut jobs = self.jobs.borrow_mut();
            let index = jobs.iter().position(|known| known.name == name);
            Ok(index.map(|index| jobs.remove(index)))
        }

        async fn kill_job(&self, _name: &str) -> GatewayResult<()> {
            match self.kill_errno {
                Some(errno) => Err(GatewayError::Rejected {
                    errno,
                    message: String::from("job kill error"),
                }),
                None => Ok(()),
            }
        }

        async fn fetch_logs(&self, _name: &str, page: LogPage) -> GatewayResult<Vec<JobLog>> {
            self.pages.borrow_mut().push(page);
            Ok(self.logs.clone())
        }

        async fn list_workers(&self) -> GatewayResult<Vec<Worker>> {
            Ok(self.workers.clone())
        }
    }

    fn handler(gateway: FakeGateway) -> Handler<FakeGateway> {
        Handler::new(gateway, LogPage::default())
    }

    fn save(name: &str) -> Commands {
        Commands::JobsSave(JobSaveArgs {
            name: name.to_string(),
            command: String::from("echo hi"),
            cron_expr: String::from("*/5 * * * *"),
        })
    }

    #[test]
    fn parses_save() {
        let args = Args::try_parse_from([
            "lazycron",
            "--server",
            "http://cron.local:8070",
            "jobs-save",
            "--name",
            "backup",
            "--command",
            "echo hi",
            "--cron-expr",
            "*/5 * * * *",
        ])
        .unwrap();
        assert_eq!(args.server.as_deref(), Some("http://cron.local:8070"));
        assert_eq!(args.command, save("backup"));
    }

    #[test]
    fn parses_log_page() {
        let args =
            Args::try_parse_from(["lazycron", "jobs-log", "backup", "--skip", "20"]).unwrap();
        assert_eq!(
            args.command,
            Commands::JobsLog(JobLogArgs {
                name: String::from("backup"),
                skip: 20,
                limit: None,
            })
        );
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(
            Args::try_parse_from(["lazycron", "jobs-log", "backup", "--limit", "0"]).is_err()
        );
    }

    #[test]
    fn server_flag_overrides_default() {
        let config = load_config(None, Some("http://cron.local:8070/")).unwrap();
        assert_eq!(config.server, "http://cron.local:8070");
        assert!(load_config(None, Some("cron.local")).is_err());
    }

    #[tokio::test]
    async fn empty_list() {
        let output = handler(FakeGateway::default())
            .handle(Commands::JobsList)
            .await
            .unwrap();
        assert_eq!(output, "No jobs yet, try saving a job.");
    }

    #[tokio::test]
    async fn save_then_list() {
        let handler = handler(FakeGateway::default());

        assert_eq!(
            handler.handle(save("backup")).await.unwrap(),
            "Job backup created"
        );
        assert_eq!(
            handler.handle(save("backup")).await.unwrap(),
            "Job backup updated"
        );
        let output = handler.handle(Commands::JobsList).await.unwrap();

        assert_eq!(
            output,
            "- name: backup\n  command: echo hi\n  cron_expr: */5 * * * *"
        );
    }

    #[tokio::test]
    async fn save_reports_its_own_outcome_when_listing_fails() {
        let gateway = FakeGateway {
            list_fails: true,
            ..FakeGateway::default()
        };
        let handler = handler(gateway);

        assert_eq!(
            handler.handle(save("backup")).await.unwrap(),
            "Job backup created"
        );
        assert_eq!(
            handler
                .handle(Commands::JobsDel {
                    name: String::from("backup"),
                })
                .await
                .unwrap(),
            "Job backup deleted"
        );
    }

    #[tokio::test]
    async fn delete_missing_job() {
        let output = handler(FakeGateway::default())
            .handle(Commands::JobsDel {
                name: String::from("ghost"),
            })
            .await
            .unwrap();
        assert_eq!(output, "No job ghost to delete");
    }

    #[tokio::test]
    async fn kill_rejection_is_an_error() {
        let gateway = FakeGateway {
            kill_errno: Some(3),
            ..FakeGateway::default()
        };
        let err = handler(gateway)
            .handle(Commands::JobsKill {
                name: String::from("backup"),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Gateway(GatewayError::Rejected { errno: 3, .. })
        ));
    }

    #[tokio::test]
    async fn logs_use_requested_page() {
        let gateway = FakeGateway {
            logs: vec![JobLog {
                job_name: String::from("backup"),
                command: String::from("echo hi"),
                err: String::new(),
                output: String::from("hi\n"),
                plan_time: 1_000_000_000_000,
                schedule_time: 1_000_000_000_001,
                exec_start_time: 1_000_000_000_002,
                exec_end_time: 1_000_000_000_250,
            }],
            ..FakeGateway::default()
        };
        let handler = handler(gateway);

        let output = handler
            .handle(Commands::JobsLog(JobLogArgs {
                name: String::from("backup"),
                skip: 20,
                limit: Some(5),
            }))
            .await
            .unwrap();

        assert!(output.starts_with("- planned: "));
        assert!(output.contains("  output: hi"));
        assert!(output.contains(".250\n"));
        let pages = handler.dispatcher.gateway().pages.borrow().clone();
        assert_eq!(pages, vec![LogPage { skip: 20, limit: 5 }]);
    }

    #[tokio::test]
    async fn no_workers() {
        let output = handler(FakeGateway::default())
            .handle(Commands::WorkersList)
            .await
            .unwrap();
        assert_eq!(output, "No workers online.");
    }

    #[tokio::test]
    async fn lists_workers() {
        let gateway = FakeGateway {
            workers: vec![
                Worker {
                    id: String::from("10.0.0.1"),
                },
                Worker {
                    id: String::from("10.0.0.2"),
                },
            ],
            ..FakeGateway::default()
        };
        let output = handler(gateway)
            .handle(Commands::WorkersList)
            .await
            .unwrap();
        assert_eq!(output, "- 10.0.0.1\n- 10.0.0.2");
    }
}
