use leptos::*;

use super::{Button, ButtonType};

/// Modal box drawn over a dimmed backdrop.
#[component]
pub fn dialog<F>(title: String, on_close: F, children: Children) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <DialogBackdrop>
            <DialogContainer>
                <DialogTitle title on_close/>
                {children()}
            </DialogContainer>
        </DialogBackdrop>
    }
}

#[component]
fn dialog_backdrop(children: Children) -> impl IntoView {
    let style = "
        position: fixed;
        inset: 0;
        display: flex;
        align-items: center;
        justify-content: center;
        background: rgba(0, 0, 0, 0.4);
    ";

    view! {
        <div style={style}>
            {children()}
        </div>
    }
}

#[component]
fn dialog_container(children: Children) -> impl IntoView {
    let style = "
        min-width: 480px;
        max-height: 80vh;
        overflow: auto;
        padding: 16px;
        background: white;
        border: 1px solid #ddd;
        border-radius: 8px;
        box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
    ";

    view! {
        <div style={style}>
            {children()}
        </div>
    }
}

#[component]
fn dialog_title<F>(title: String, on_close: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let style = "
        display: flex;
        justify-content: space-between;
        align-items: center;
        margin-bottom: 8px;
    ";

    view! {
        <div style={style}>
            <h2>{title}</h2>
            <Button button_type=ButtonType::Secondary on_click=on_close>"×"</Button>
        </div>
    }
}

#[component]
pub fn action_buttons(children: Children) -> impl IntoView {
    let style = "
        display: flex;
        justify-content: flex-end;
        gap: 8px;
        margin-top: 16px;
    ";

    view! {
        <div style={style}>
            {children()}
        </div>
    }
}
