use admin_client::{AdminClient, Session};
use leptos::prelude::*;

use crate::routes::Route;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) client: StoredValue<AdminClient, LocalStorage>,
    pub(crate) route: RwSignal<Route>,
    pub(crate) session: RwSignal<Option<Session>>,
}

impl AppState {
    pub(crate) fn new(client: AdminClient) -> Self {
        let session = client.session().session();
        Self {
            route: RwSignal::new(Route::initial(session.as_ref())),
            session: RwSignal::new(session),
            client: StoredValue::new_local(client),
        }
    }

    pub(crate) fn client(&self) -> AdminClient {
        self.client.get_value()
    }

    pub(crate) fn navigate(&self, route: Route) {
        self.route.set(route);
    }

    /// Перечитывает сессию из хранилища: клиент сам очищает её на 401.
    pub(crate) fn sync_session(&self) {
        let current = self.client.with_value(|client| client.session().session());
        if self.session.get_untracked() != current {
            self.session.set(current);
        }
    }
}
