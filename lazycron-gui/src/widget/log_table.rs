use lazycron_console::LogRow;
use leptos::*;

#[component]
pub fn log_table(rows: Vec<LogRow>, loading: bool) -> impl IntoView {
    let rows = rows
        .into_iter()
        .map(|row| view! { <Row row/> })
        .collect_view();
    view! {
        <table class="log-table">
            <Header/>
            {rows}
        </table>
        <Show when=move || loading fallback=|| ()>
            <p>"Loading..."</p>
        </Show>
    }
}

#[component]
fn header() -> impl IntoView {
    view! {
        <tr>
            <th>"Command"</th>
            <th>"Error"</th>
            <th>"Output"</th>
            <th>"Planned"</th>
            <th>"Scheduled"</th>
            <th>"Started"</th>
            <th>"Finished"</th>
        </tr>
    }
}

#[component]
fn row(row: LogRow) -> impl IntoView {
    let LogRow {
        command,
        err,
        output,
        plan_time,
        schedule_time,
        exec_start_time,
        exec_end_time,
    } = row;
    view! {
        <tr>
            <td>{command}</td>
            <td>{err}</td>
            <td><pre>{output}</pre></td>
            <td>{plan_time}</td>
            <td>{schedule_time}</td>
            <td>{exec_start_time}</td>
            <td>{exec_end_time}</td>
        </tr>
    }
}
