use lazycron_data::Job;
use leptos::*;

use super::{Button, ButtonType};
use crate::{dispatcher, run};

#[component]
pub fn job_table(jobs: Memo<Vec<Job>>) -> impl IntoView {
    view! {
        <table class="job-table">
            <Header/>
            <For
                each=move || jobs.get()
                key=|job| (job.name.clone(), job.command.clone(), job.cron_expr.clone())
                children=|job| view! { <Row job/> }
            />
        </table>
        <Show when=move || jobs.with(Vec::is_empty) fallback=|| ()>
            <p>"No jobs"</p>
        </Show>
    }
}

#[component]
fn header() -> impl IntoView {
    view! {
        <tr>
            <th>"Name"</th>
            <th>"Command"</th>
            <th>"Schedule"</th>
            <th>"Actions"</th>
        </tr>
    }
}

#[component]
fn row(job: Job) -> impl IntoView {
    let Job {
        name,
        command,
        cron_expr,
    } = job;
    view! {
        <tr>
            <td>{name.clone()}</td>
            <td>{command}</td>
            <td>{cron_expr}</td>
            <td><RowActions name/></td>
        </tr>
    }
}

#[component]
fn row_actions(name: String) -> impl IntoView {
    let dispatcher = dispatcher();
    let edit = {
        let (dispatcher, name) = (dispatcher.clone(), name.clone());
        move || {
            if let Err(err) = dispatcher.edit_job(&name) {
                log::warn!("{}", err);
            }
        }
    };
    let delete = {
        let (dispatcher, name) = (dispatcher.clone(), name.clone());
        move || {
            let (dispatcher, name) = (dispatcher.clone(), name.clone());
            run(async move { dispatcher.delete_job(&name).await.map(drop) })
        }
    };
    let kill = {
        let (dispatcher, name) = (dispatcher.clone(), name.clone());
        move || {
            let (dispatcher, name) = (dispatcher.clone(), name.clone());
            run(async move { dispatcher.kill_job(&name).await })
        }
    };
    let logs = move || {
        let (dispatcher, name) = (dispatcher.clone(), name.clone());
        run(async move { dispatcher.show_logs(&name).await.map(drop) })
    };
    view! {
        <div class="row-actions">
            <Button button_type=ButtonType::Info on_click=edit>"Edit"</Button>
            <Button button_type=ButtonType::Danger on_click=delete>"Delete"</Button>
            <Button button_type=ButtonType::Warning on_click=kill>"Kill"</Button>
            <Button button_type=ButtonType::Success on_click=logs>"Logs"</Button>
        </div>
    }
}
