//! Browser front-end of the lazycron console.

use std::future::Future;

use lazycron_console::{DispatchError, Dispatcher, HttpGateway};
use leptos::*;
use log::debug;

pub mod app;
pub mod widget;

pub type ConsoleDispatcher = Dispatcher<HttpGateway>;

/// The dispatcher provided by [`app::App`]. Only call it while a component
/// is being built, handlers should capture the returned clone.
pub fn dispatcher() -> ConsoleDispatcher {
    expect_context::<ConsoleDispatcher>()
}

/// Runs an action in the background. Failures already reach the operator
/// through the console notice.
pub fn run<F>(action: F)
where
    F: Future<Output = Result<(), DispatchError>> + 'static,
{
    spawn_local(async move {
        if let Err(err) = action.await {
            debug!("Action ended with: {}", err);
        }
    })
}
