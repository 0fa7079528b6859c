/// A named, schedulable unit of work.
///
/// `name` is the only key the console uses to address a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Job {
    /// Unique identifier, assigned by the operator
    pub name: String,
    /// Command line executed by a worker
    pub command: String,
    /// Schedule, interpreted by the remote scheduler
    pub cron_expr: String,
}

/// One historical execution record of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobLog {
    #[serde(default)]
    pub job_name: String,
    pub command: String,
    /// Error text, empty when the run succeeded
    #[serde(default)]
    pub err: String,
    #[serde(default)]
    pub output: String,
    /// Epoch milliseconds
    pub plan_time: i64,
    /// Epoch milliseconds
    pub schedule_time: i64,
    /// Epoch milliseconds
    pub exec_start_time: i64,
    /// Epoch milliseconds
    pub exec_end_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Worker {
    pub id: String,
}

/// Wrapper returned by every endpoint of the service.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Envelope<T> {
    /// Zero on success
    pub errno: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Envelope<T> {
        Envelope {
            errno: 0,
            message: String::from("ok"),
            data: Some(data),
        }
    }

    pub fn fail(errno: i64, message: impl Into<String>) -> Envelope<T> {
        Envelope {
            errno,
            message: message.into(),
            data: None,
        }
    }

    /// Splits the envelope on its status. A successful envelope may still
    /// carry no data: the service encodes empty lists as `null`.
    pub fn into_result(self) -> Result<Option<T>, Rejection> {
        let Envelope {
            errno,
            message,
            data,
        } = self;
        match errno {
            0 => Ok(data),
            errno => Err(Rejection { errno, message }),
        }
    }
}

/// An envelope whose status was not zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub errno: i64,
    pub message: String,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "rejected with errno {}", self.errno)
        } else {
            write!(f, "rejected with errno {}: {}", self.errno, self.message)
        }
    }
}

impl std::error::Error for Rejection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_uses_service_field_names() {
        let job = Job {
            name: String::from("backup"),
            command: String::from("tar -czf x.tgz /data"),
            cron_expr: String::from("0 0 * * *"),
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "backup",
                "command": "tar -czf x.tgz /data",
                "cron_expr": "0 0 * * *",
            })
        );
    }

    #[test]
    fn log_tolerates_missing_optional_fields() {
        let body = r#"{
            "command": "echo hi",
            "output": "hi\n",
            "plan_time": 1,
            "schedule_time": 2,
            "exec_start_time": 3,
            "exec_end_time": 4
        }"#;
        let log: JobLog = serde_json::from_str(body).unwrap();
        assert_eq!(log.err, "");
        assert_eq!(log.job_name, "");
        assert_eq!(log.exec_end_time, 4);
    }

    #[test]
    fn null_data_on_success_is_empty() {
        let envelope: Envelope<Vec<Worker>> =
            serde_json::from_str(r#"{"errno":0,"message":"ok","data":null}"#).unwrap();
        assert_eq!(envelope.into_result(), Ok(None));
    }

    #[test]
    fn missing_data_on_success_is_empty() {
        let envelope: Envelope<Vec<Job>> = serde_json::from_str(r#"{"errno":0}"#).unwrap();
        assert_eq!(envelope.into_result(), Ok(None));
    }

    #[test]
    fn nonzero_errno_is_rejected() {
        let envelope: Envelope<Vec<Job>> =
            serde_json::from_str(r#"{"errno":3,"message":"job list error","data":[]}"#).unwrap();
        let rejection = envelope.into_result().unwrap_err();
        assert_eq!(rejection.errno, 3);
        assert_eq!(rejection.to_string(), "rejected with errno 3: job list error");
    }

    #[test]
    fn message_is_optional() {
        let envelope: Envelope<Vec<Job>> = serde_json::from_str(r#"{"errno":1}"#).unwrap();
        assert_eq!(
            envelope.into_result().unwrap_err().to_string(),
            "rejected with errno 1"
        );
    }
}
