use admin_client::{GuardDecision, GuardState, RouteGuard};
use leptos::prelude::*;

use crate::routes::Route;
use crate::state::AppState;

/// Показывает `children` только администратору. Пока сессия не проверена,
/// рисуется заглушка; без доступа ведёт на страницу входа.
#[component]
pub(crate) fn ProtectedAdmin(state: AppState, children: ChildrenFn) -> impl IntoView {
    let guard_state = RwSignal::new(GuardState::Checking);

    Effect::new(move |_| {
        state.session.track();
        let mut guard = RouteGuard::new();
        let decision = state
            .client
            .with_value(|client| guard.check(client.session()));
        guard_state.set(guard.state());
        if let GuardDecision::Redirect { .. } = decision {
            state.navigate(Route::Login);
        }
    });

    view! {
        <Show
            when=move || guard_state.get() == GuardState::Authorized
            fallback=|| view! { <div class="guard-placeholder">"Checking access..."</div> }
        >
            {children()}
        </Show>
    }
}
