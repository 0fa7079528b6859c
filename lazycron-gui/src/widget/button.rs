use leptos::*;

#[derive(Debug, Clone, Copy, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Info,
    Danger,
    Warning,
    Success,
}

impl ButtonType {
    fn class(self) -> &'static str {
        match self {
            ButtonType::Primary => "button primary",
            ButtonType::Secondary => "button secondary",
            ButtonType::Info => "button info",
            ButtonType::Danger => "button danger",
            ButtonType::Warning => "button warning",
            ButtonType::Success => "button success",
        }
    }
}

#[component]
pub fn button<F>(
    #[prop(optional)] button_type: Option<ButtonType>,
    on_click: F,
    children: Children,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    let class = button_type.unwrap_or_default().class();
    view! {
        <button type="button" class=class on:click=move |_| on_click()>
            {children()}
        </button>
    }
}
