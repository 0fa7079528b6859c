use lazycron_console::{
    overlay::{LogView, WorkerView},
    Console, ConsoleConfig, HttpGateway, Overlay, Ticket,
};
use leptos::*;
use log::{info, warn};

use crate::{
    run,
    widget::{
        Button, ButtonType, Dialog, JobForm, JobTable, LogTable, NoticeBar, WorkerTable,
    },
    ConsoleDispatcher,
};

/// The console is served by the scheduler itself, so requests go to the
/// page origin.
fn config() -> ConsoleConfig {
    let Ok(origin) = window().location().origin() else {
        return ConsoleConfig::default();
    };
    ConsoleConfig::default()
        .with_server(&origin)
        .unwrap_or_else(|err| {
            warn!("Falling back to default server: {}", err);
            ConsoleConfig::default()
        })
}

#[component]
pub fn App() -> impl IntoView {
    let config = config();
    info!("Talking to {}", config.server);
    let dispatcher =
        ConsoleDispatcher::new(HttpGateway::new(&config)).with_log_page(config.log_page);
    let console = create_rw_signal(Console::default());
    dispatcher.observe(move |model| console.set(model.clone()));
    provide_context(dispatcher.clone());

    let jobs = create_memo(move |_| console.with(|model| model.table.jobs().to_vec()));
    let overlay = create_memo(move |_| console.with(|model| Shown::from(model.overlays.active())));
    let notice = Signal::derive(move || console.with(|model| model.notice.clone()));

    let refresh = {
        let dispatcher = dispatcher.clone();
        move || {
            let dispatcher = dispatcher.clone();
            run(async move { dispatcher.refresh().await.map(drop) })
        }
    };
    let new_job = {
        let dispatcher = dispatcher.clone();
        move || dispatcher.new_job()
    };
    let workers = {
        let dispatcher = dispatcher.clone();
        move || {
            let dispatcher = dispatcher.clone();
            run(async move { dispatcher.list_workers().await.map(drop) })
        }
    };
    let dismiss = move || dispatcher.dismiss_notice();
    refresh();

    view! {
        <header>
            <h1>"lazycron"</h1>
            <div class="toolbar">
                <Button on_click=new_job>"New job"</Button>
                <Button button_type=ButtonType::Secondary on_click=workers>"Workers"</Button>
                <Button button_type=ButtonType::Secondary on_click=refresh>"Refresh"</Button>
            </div>
        </header>
        <main>
            <NoticeBar notice on_dismiss=dismiss/>
            <JobTable jobs/>
            <OverlayView overlay/>
        </main>
    }
}

/// What the overlay memo compares. The editor is identified by its ticket
/// only: the draft changes on every keystroke without the model being
/// republished, and rebuilding the form would drop the input focus.
#[derive(Debug, Clone, PartialEq)]
enum Shown {
    None,
    Edit(Ticket),
    Logs(LogView),
    Workers(WorkerView),
}

impl From<&Overlay> for Shown {
    fn from(overlay: &Overlay) -> Self {
        match overlay {
            Overlay::None => Shown::None,
            Overlay::Edit(edit) => Shown::Edit(edit.ticket),
            Overlay::Logs(logs) => Shown::Logs(logs.clone()),
            Overlay::Workers(workers) => Shown::Workers(workers.clone()),
        }
    }
}

/// Renders whichever dialog is open.
#[component]
fn overlay_view(overlay: Memo<Shown>) -> impl IntoView {
    let dispatcher = crate::dispatcher();
    let seed = dispatcher.clone();
    let close = move || dispatcher.close();
    move || match overlay.get() {
        Shown::None => ().into_view(),
        Shown::Edit(_) => {
            let draft = seed
                .read(|model| model.overlays.draft().cloned())
                .unwrap_or_default();
            view! { <JobForm draft/> }.into_view()
        }
        Shown::Logs(logs) => {
            let title = format!("Logs of {}", logs.title);
            view! {
                <Dialog title on_close=close.clone()>
                    <LogTable rows=logs.rows loading=logs.loading/>
                </Dialog>
            }
            .into_view()
        }
        Shown::Workers(workers) => view! {
            <Dialog title=String::from("Workers") on_close=close.clone()>
                <WorkerTable ids=workers.ids loading=workers.loading/>
            </Dialog>
        }
        .into_view(),
    }
}
