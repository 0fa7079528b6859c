//! Client-side model and action dispatch for the lazycron console.
//!
//! Front-ends render a [`Console`] and forward operator gestures to a
//! [`Dispatcher`], which talks to the service through a [`Gateway`].

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod overlay;
pub mod table;
pub mod time;

pub use config::ConsoleConfig;
pub use dispatcher::Dispatcher;
pub use error::{ConfigError, DispatchError, GatewayError};
pub use gateway::{Gateway, HttpGateway, LogPage};
pub use overlay::{EditView, JobDraft, LogRow, Overlay, OverlayController, OverlayKind};
pub use table::JobTable;

/// Identifies one issued request so late completions can be told apart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    fn next(self) -> Ticket {
        Ticket(self.0 + 1)
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a front-end renders.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Console {
    pub table: JobTable,
    pub overlays: OverlayController,
    pub notice: Option<Notice>,
}

/// Latest message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Failure(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}
