//! Запуск загрузок и переключений статуса для страниц со списками.
//!
//! Контроллер живёт в `Rc`, снимок для отрисовки дублируется в `RwSignal`:
//! после каждого запроса в сигнал кладётся свежий снимок контроллера.

use std::rc::Rc;

use admin_client::views;
use admin_client::{ListController, ListSnapshot, PageSource};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::pager::Pager;
use crate::state::AppState;

pub(crate) type SharedController<S> = StoredValue<Rc<ListController<S>>, LocalStorage>;

/// Грузит страницу `page` или, если `None`, перезагружает текущую.
pub(crate) fn spawn_load<S>(
    state: AppState,
    controller: Rc<ListController<S>>,
    snapshot: RwSignal<ListSnapshot<S::Item>>,
    page: Option<u32>,
) where
    S: PageSource + 'static,
    S::Item: Send + Sync + 'static,
{
    snapshot.update(|snapshot| snapshot.loading = true);
    spawn_local(async move {
        let result = match page {
            Some(page) => controller.go_to(page).await,
            None => controller.refresh().await,
        };
        if let Err(err) = result {
            leptos::logging::warn!("list load failed: {err}");
        }
        snapshot.set(controller.snapshot());
        state.sync_session();
    });
}

/// Переключает статус строки `key`, пока запрос идёт, кнопка строки занята.
pub(crate) fn spawn_toggle<S>(
    state: AppState,
    controller: Rc<ListController<S>>,
    snapshot: RwSignal<ListSnapshot<S::Item>>,
    key: String,
    current: bool,
) where
    S: PageSource + 'static,
    S::Item: Send + Sync + 'static,
{
    if snapshot.with_untracked(|snapshot| snapshot.pending_toggle.is_some()) {
        return;
    }
    snapshot.update(|snapshot| snapshot.pending_toggle = Some(key.clone()));
    spawn_local(async move {
        if let Err(err) = controller.toggle_status(&key, current).await {
            leptos::logging::warn!("status toggle for {key} failed: {err}");
        }
        snapshot.set(controller.snapshot());
        state.sync_session();
    });
}

/// Пагинатор под таблицей списка.
pub(crate) fn list_pager<S>(
    state: AppState,
    controller: SharedController<S>,
    snapshot: RwSignal<ListSnapshot<S::Item>>,
) -> impl IntoView
where
    S: PageSource + 'static,
    S::Item: Send + Sync + 'static,
{
    let on_go = Callback::new(move |page: u32| {
        spawn_load(state, controller.get_value(), snapshot, Some(page));
    });

    view! {
        <Pager
            page=Signal::derive(move || snapshot.with(|snapshot| snapshot.state.page))
            total_pages=Signal::derive(move || snapshot.with(|snapshot| snapshot.state.total_pages))
            numbers=Signal::derive(move || snapshot.with(|snapshot| views::page_numbers(&snapshot.state)))
            summary=Signal::derive(move || snapshot.with(|snapshot| views::range_summary(&snapshot.state)))
            caption=Signal::derive(move || snapshot.with(|snapshot| views::page_caption(&snapshot.state)))
            busy=Signal::derive(move || snapshot.with(|snapshot| snapshot.loading))
            on_go=on_go
        />
    }
}

/// Баннер с последней ошибкой списка, если данные уже есть.
#[component]
pub(crate) fn ListError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
        </Show>
    }
}
