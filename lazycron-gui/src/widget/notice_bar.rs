use lazycron_console::Notice;
use leptos::*;

use super::{Button, ButtonType};

/// Latest outcome reported to the operator, if any.
#[component]
pub fn notice_bar<F>(notice: Signal<Option<Notice>>, on_dismiss: F) -> impl IntoView
where
    F: Fn() + Clone + 'static,
{
    move || {
        let on_dismiss = on_dismiss.clone();
        notice.get().map(|notice| {
            let class = if notice.is_failure() {
                "notice failure"
            } else {
                "notice info"
            };
            view! {
                <div class=class>
                    <span>{notice.text().to_string()}</span>
                    <Button button_type=ButtonType::Secondary on_click=on_dismiss>"Dismiss"</Button>
                </div>
            }
        })
    }
}
