use leptos::*;

#[component]
pub fn worker_table(ids: Vec<String>, loading: bool) -> impl IntoView {
    let rows = ids
        .into_iter()
        .map(|id| view! { <tr><td>{id}</td></tr> })
        .collect_view();
    view! {
        <table class="worker-table">
            <tr>
                <th>"Worker"</th>
            </tr>
            {rows}
        </table>
        <Show when=move || loading fallback=|| ()>
            <p>"Loading..."</p>
        </Show>
    }
}
