use std::time::Duration;

use lazycron_data::{Envelope, Job, JobLog, Worker};
use log::{debug, info};
use serde::de::{DeserializeOwned, IgnoredAny};

use super::{Gateway, GatewayResult, LogPage};
use crate::config::ConsoleConfig;

/// Talks to the service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    server: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &ConsoleConfig) -> HttpGateway {
        HttpGateway {
            server: config.server.clone(),
            timeout: config.timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<Option<T>> {
        info!("GET {}", path);
        let request = self.client.get(self.url(path));
        self.send(request).await
    }

    async fn post<T, F>(&self, path: &str, form: &F) -> GatewayResult<Option<T>>
    where
        T: DeserializeOwned,
        F: serde::Serialize + ?Sized,
    {
        info!("POST {}", path);
        let request = self.client.post(self.url(path)).form(form);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> GatewayResult<Option<T>> {
        let response = with_timeout(request, self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        debug!("Received {} bytes", body.len());
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_result()?)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(request: reqwest::RequestBuilder, timeout: Duration) -> reqwest::RequestBuilder {
    request.timeout(timeout)
}

/// Browsers bound the fetch themselves, reqwest has no timeout there.
#[cfg(target_arch = "wasm32")]
fn with_timeout(request: reqwest::RequestBuilder, _timeout: Duration) -> reqwest::RequestBuilder {
    request
}

#[async_trait::async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn list_jobs(&self) -> GatewayResult<Vec<Job>> {
        let jobs = self.get("/job/list").await?;
        Ok(jobs.unwrap_or_default())
    }

    async fn save_job(&self, job: &Job) -> GatewayResult<Option<Job>> {
        let encoded = serde_json::to_string(job)?;
        self.post("/job/save", &[("job", encoded)]).await
    }

    async fn delete_job(&self, name: &str) -> GatewayResult<Option<Job>> {
        self.post("/job/del", &[("name", name)]).await
    }

    async fn kill_job(&self, name: &str) -> GatewayResult<()> {
        let _: Option<IgnoredAny> = self.post("/job/kill", &[("name", name)]).await?;
        Ok(())
    }

    async fn fetch_logs(&self, name: &str, page: LogPage) -> GatewayResult<Vec<JobLog>> {
        let LogPage { skip, limit } = page;
        let form = [
            ("name", name.to_string()),
            ("skip", skip.to_string()),
            ("limit", limit.to_string()),
        ];
        let logs = self.post("/job/log", &form).await?;
        Ok(logs.unwrap_or_default())
    }

    async fn list_workers(&self) -> GatewayResult<Vec<Worker>> {
        let workers = self.get("/worker/list").await?;
        Ok(workers.unwrap_or_default())
    }
}
