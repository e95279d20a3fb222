use leptos::prelude::*;

/// Номер страницы и признак пропуска перед ним.
fn with_gaps(numbers: Vec<u32>) -> Vec<(u32, bool)> {
    let mut previous = None;
    numbers
        .into_iter()
        .map(|number| {
            let gap = previous.is_some_and(|previous: u32| number > previous + 1);
            previous = Some(number);
            (number, gap)
        })
        .collect()
}

#[component]
pub(crate) fn Pager(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] numbers: Signal<Vec<u32>>,
    #[prop(into)] summary: Signal<String>,
    #[prop(into)] caption: Signal<String>,
    #[prop(into)] busy: Signal<bool>,
    on_go: Callback<u32>,
) -> impl IntoView {
    view! {
        <div class="pager">
            <span class="muted">{move || summary.get()}</span>
            <div class="pager-buttons">
                <button
                    disabled=move || busy.get() || page.get() <= 1
                    on:click=move |_| on_go.run(page.get_untracked().saturating_sub(1))
                >
                    "Previous"
                </button>
                <For
                    each=move || with_gaps(numbers.get())
                    key=|link| *link
                    children=move |(number, gap_before)| {
                        view! {
                            <Show when=move || gap_before>
                                <span class="gap">"..."</span>
                            </Show>
                            <button
                                class:current=move || page.get() == number
                                disabled=move || busy.get()
                                on:click=move |_| on_go.run(number)
                            >
                                {number}
                            </button>
                        }
                    }
                />
                <button
                    disabled=move || busy.get() || page.get() >= total_pages.get()
                    on:click=move |_| on_go.run(page.get_untracked().saturating_add(1))
                >
                    "Next"
                </button>
            </div>
            <span class="muted">{move || caption.get()}</span>
        </div>
    }
}
