use crate::components::hooks::use_expansion_pair;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::toggle::{DisplayState, HIDDEN, SHOWN};
use icons::ChevronRight;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Trigger button plus a description that it shows and hides.
#[component]
pub fn ExpandableSection(
    #[prop(into)] label: String,
    #[prop(optional)] expanded: bool,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let pair = use_expansion_pair("expandable");
    let display: RwSignal<&'static str> = RwSignal::new(if expanded { SHOWN } else { HIDDEN });

    let merged_class = tw_merge!("flex flex-col gap-1", class);
    let chevron_class = move || {
        if DisplayState::from_computed(display.get()).is_visible() {
            "inline-flex transition-transform rotate-90"
        } else {
            "inline-flex transition-transform"
        }
    };

    let on_toggle = move |_| {
        display.update(|d| *d = DisplayState::from_computed(d).toggled());
    };

    view! {
        <div data-name="ExpandableSection" class=merged_class>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Sm
                class="justify-start"
                attr:id=pair.trigger_id
                on:click=on_toggle
            >
                <span class=chevron_class>
                    <ChevronRight class="size-4" />
                </span>
                {label}
            </Button>
            <div id=pair.target_id class="pl-8 text-sm text-muted-foreground" style:display=move || display.get()>
                {children()}
            </div>
        </div>
    }
}
