use crate::components::ui::{Button, ButtonVariant};
use crate::util;
use leptos::prelude::*;

/// A button that runs `on_confirm` only after the user accepts `prompt`.
#[component]
pub fn ConfirmButton(
    #[prop(into)] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(default = ButtonVariant::Destructive)] variant: ButtonVariant,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let on_click = move |ev: web_sys::MouseEvent| {
        if util::ask(&prompt) {
            on_confirm.run(());
        } else {
            ev.prevent_default();
        }
    };

    view! {
        <Button attr:data-name="ConfirmButton" variant=variant class=class on:click=on_click>
            {children()}
        </Button>
    }
}
