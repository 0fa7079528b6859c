use lazycron_console::JobDraft;
use leptos::*;

use super::{ActionButtons, Button, ButtonType, Dialog};
use crate::{dispatcher, run, ConsoleDispatcher};

/// Editor for a job draft. Typing goes straight into the draft held by the
/// dispatcher, the inputs are only seeded when the form is built.
#[component]
pub fn job_form(draft: JobDraft) -> impl IntoView {
    let JobDraft {
        name,
        command,
        cron_expr,
    } = draft;
    let title = if name.is_empty() {
        String::from("New job")
    } else {
        format!("Edit {}", name)
    };
    let dispatcher = dispatcher();
    let close = {
        let dispatcher = dispatcher.clone();
        move || dispatcher.close()
    };
    let save = {
        let dispatcher = dispatcher.clone();
        move || {
            let dispatcher = dispatcher.clone();
            run(async move { dispatcher.save_job().await.map(drop) })
        }
    };
    let on_name = input(dispatcher.clone(), |draft, value| draft.name = value);
    let on_command = input(dispatcher.clone(), |draft, value| draft.command = value);
    let on_cron_expr = input(dispatcher, |draft, value| draft.cron_expr = value);
    view! {
        <Dialog title on_close=close.clone()>
            <form class="job-form" on:submit=|ev| ev.prevent_default()>
                <label>
                    "Name"
                    <input type="text" prop:value=name on:input=on_name/>
                </label>
                <label>
                    "Command"
                    <input type="text" prop:value=command on:input=on_command/>
                </label>
                <label>
                    "Cron expression"
                    <input type="text" prop:value=cron_expr on:input=on_cron_expr/>
                </label>
                <ActionButtons>
                    <Button button_type=ButtonType::Secondary on_click=close>"Cancel"</Button>
                    <Button on_click=save>"Save"</Button>
                </ActionButtons>
            </form>
        </Dialog>
    }
}

fn input(
    dispatcher: ConsoleDispatcher,
    apply: impl Fn(&mut JobDraft, String) + 'static,
) -> impl Fn(ev::Event) + 'static {
    move |ev| {
        let value = event_target_value(&ev);
        if let Err(err) = dispatcher.update_draft(|draft| apply(draft, value)) {
            log::warn!("Dropped input: {}", err);
        }
    }
}
