use crate::autosize::{ResizePolicy, DEFAULT_MAX_HEIGHT};
use crate::components::hooks::{use_autosize, use_tab_indent};
use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Textarea that grows with its content and indents on Tab.
#[component]
pub fn AutoTextarea(
    // Styling
    #[prop(into, optional)] class: String,

    // Common HTML attributes
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] disabled: bool,

    // Behavior
    #[prop(default = DEFAULT_MAX_HEIGHT)] max_height: u32,
    #[prop(optional)] resize_policy: ResizePolicy,
    #[prop(default = true)] tab_indent: bool,

    #[prop(into)] bind_value: RwSignal<String>,

    // Ref for direct DOM access
    #[prop(optional)] node_ref: NodeRef<html::Textarea>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground border-input flex min-h-16 w-full rounded-md border bg-transparent px-3 py-2 text-base shadow-xs outline-none resize-y md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        "disabled:cursor-not-allowed disabled:opacity-50",
        "[tab-size:4]",
        class
    );

    let autosize = use_autosize(node_ref, max_height, resize_policy);
    let indent = use_tab_indent(node_ref);

    let on_input = move |ev: web_sys::Event| {
        bind_value.set(event_target_value(&ev));
        autosize.resize_now();
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if tab_indent {
            // Programmatic edits fire no `input`; sync the signal by hand.
            if let Some(edit) = indent.on_keydown(&ev) {
                bind_value.set(edit.content);
            }
        }
        autosize.resize_later();
    };

    view! {
        <textarea
            data-name="AutoTextarea"
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            disabled=disabled
            prop:value=move || bind_value.get()
            on:input=on_input
            on:change=move |_| autosize.resize_now()
            on:cut=move |_| autosize.resize_later()
            on:paste=move |_| autosize.resize_later()
            on:drop=move |_| autosize.resize_later()
            on:keydown=on_keydown
            node_ref=node_ref
        />
    }
    .into_any()
}
