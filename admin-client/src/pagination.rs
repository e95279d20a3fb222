//! Постраничный список с переключением статуса строки.
//!
//! [`ListController`] один на все страницы: пользователи, компании и вакансии
//! отличаются только реализацией [`PageSource`].
//!
//! Каждая загрузка получает порядковый номер; ответ, номер которого уже не
//! последний, отбрасывается целиком (и успех, и ошибка). Статус строки
//! меняется только после подтверждения сервером.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{AdminClientError, AdminClientResult};

/// Строка списка, у которой есть ключ и булев статус.
pub trait Toggleable {
    /// Идентификатор строки.
    fn key(&self) -> &str;
    /// Текущий статус строки.
    fn is_active(&self) -> bool;
    /// Заменяет статус строки.
    fn set_active(&mut self, active: bool);
}

#[derive(Debug, Clone, PartialEq)]
/// Одна страница, как её вернул сервер.
pub struct PageResponse<T> {
    /// Элементы страницы.
    pub items: Vec<T>,
    /// Номер страницы (с 1).
    pub page: u32,
    /// Всего страниц. `0` = сервер не сообщил.
    pub total_pages: u32,
    /// Размер страницы.
    pub limit: u32,
    /// Всего элементов.
    pub total: u64,
}

/// Источник страниц и мутации статуса для [`ListController`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PageSource {
    /// Тип строки.
    type Item: Toggleable + Clone;

    /// Загружает страницу `page` размером `limit`.
    async fn fetch_page(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<Self::Item>>;

    /// Устанавливает статус строки на сервере.
    async fn set_status(&self, item: &Self::Item, active: bool) -> AdminClientResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
/// Состояние пагинации.
pub struct PageState<T> {
    /// Строки текущей страницы, не больше `limit`.
    pub items: Vec<T>,
    /// Текущая страница, `>= 1`.
    pub page: u32,
    /// Всего страниц; `page <= total_pages`, если `total_pages > 0`.
    pub total_pages: u32,
    /// Размер страницы, `> 0`.
    pub limit: u32,
    /// Всего элементов.
    pub total: u64,
}

impl<T> PageState<T> {
    fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            limit,
            total: 0,
        }
    }

    /// Есть ли предыдущая страница.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Есть ли следующая страница.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Что показывать вместо таблицы.
pub enum ListView {
    /// Данных ещё нет, идёт загрузка.
    Loading,
    /// Первая загрузка не удалась, показывать нечего.
    Failed,
    /// Сервер вернул пустую страницу.
    Empty,
    /// Есть строки.
    Rows,
}

#[derive(Debug, Clone, PartialEq)]
/// Снимок состояния списка для отрисовки.
pub struct ListSnapshot<T> {
    /// Пагинация и строки.
    pub state: PageState<T>,
    /// Идёт загрузка страницы.
    pub loading: bool,
    /// Ключ строки, статус которой сейчас меняется.
    pub pending_toggle: Option<String>,
    /// Последняя ошибка для показа рядом со списком.
    pub error: Option<String>,
    /// Была ли хоть одна успешная загрузка.
    pub loaded: bool,
}

impl<T> ListSnapshot<T> {
    /// Какое состояние списка показывать.
    pub fn view(&self) -> ListView {
        if !self.state.items.is_empty() {
            ListView::Rows
        } else if self.loading {
            ListView::Loading
        } else if !self.loaded && self.error.is_some() {
            ListView::Failed
        } else if !self.loaded {
            ListView::Loading
        } else {
            ListView::Empty
        }
    }

    /// Меняется ли сейчас статус строки `key`.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending_toggle.as_deref() == Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Итог навигации или загрузки.
pub enum LoadOutcome {
    /// Страница загружена и применена.
    Applied,
    /// Номер страницы вне `1..=total_pages`, ничего не сделано.
    OutOfRange,
    /// Пока запрос шёл, был отправлен более новый; ответ отброшен.
    Superseded,
}

/// Контроллер постраничного списка с переключением статуса строки.
pub struct ListController<S: PageSource> {
    source: S,
    state: Mutex<ListSnapshot<S::Item>>,
    sequence: AtomicU64,
}

impl<S: PageSource + fmt::Debug> fmt::Debug for ListController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("source", &self.source)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<S: PageSource> ListController<S> {
    /// Создаёт контроллер. `limit == 0` заменяется на 1.
    pub fn new(source: S, limit: u32) -> Self {
        Self {
            source,
            state: Mutex::new(ListSnapshot {
                state: PageState::empty(limit.max(1)),
                loading: false,
                pending_toggle: None,
                error: None,
                loaded: false,
            }),
            sequence: AtomicU64::new(0),
        }
    }

    /// Источник данных.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, ListSnapshot<S::Item>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Копия текущего состояния.
    pub fn snapshot(&self) -> ListSnapshot<S::Item> {
        self.lock().clone()
    }

    /// Загружает страницу `page` (>= 1).
    ///
    /// При ошибке строки и номер страницы не меняются, текст ошибки
    /// сохраняется в снимке.
    pub async fn load(&self, page: u32) -> AdminClientResult<LoadOutcome> {
        if page == 0 {
            return Err(AdminClientError::Validation(
                "page must be 1 or greater".to_string(),
            ));
        }

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let limit = {
            let mut snapshot = self.lock();
            snapshot.loading = true;
            snapshot.state.limit
        };

        let result = self.source.fetch_page(page, limit).await;

        let mut snapshot = self.lock();
        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!(page, ticket, "discarding stale page response");
            return Ok(LoadOutcome::Superseded);
        }
        snapshot.loading = false;

        match result {
            Ok(response) => {
                snapshot.state = normalize(response, page, limit);
                snapshot.error = None;
                snapshot.loaded = true;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                snapshot.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Переходит на страницу `page`; вне `1..=total_pages` ничего не делает.
    pub async fn go_to(&self, page: u32) -> AdminClientResult<LoadOutcome> {
        let total_pages = self.lock().state.total_pages;
        if page < 1 || page > total_pages {
            return Ok(LoadOutcome::OutOfRange);
        }
        self.load(page).await
    }

    /// Следующая страница.
    pub async fn next(&self) -> AdminClientResult<LoadOutcome> {
        let page = self.lock().state.page;
        self.go_to(page.saturating_add(1)).await
    }

    /// Предыдущая страница.
    pub async fn prev(&self) -> AdminClientResult<LoadOutcome> {
        let page = self.lock().state.page;
        self.go_to(page.saturating_sub(1)).await
    }

    /// Перезагружает текущую страницу.
    pub async fn refresh(&self) -> AdminClientResult<LoadOutcome> {
        let page = self.lock().state.page;
        self.load(page).await
    }

    /// Переключает статус строки `key`: новый статус = `!current`.
    ///
    /// Строка меняется только после подтверждения сервера, остальные строки
    /// не трогаются. Возвращает новый статус.
    pub async fn toggle_status(&self, key: &str, current: bool) -> AdminClientResult<bool> {
        let item = {
            let mut snapshot = self.lock();
            let item = snapshot
                .state
                .items
                .iter()
                .find(|item| item.key() == key)
                .cloned()
                .ok_or_else(|| {
                    AdminClientError::NotFound(format!("row {key} is not on the current page"))
                })?;
            snapshot.pending_toggle = Some(key.to_string());
            item
        };

        let target = !current;
        let result = self.source.set_status(&item, target).await;

        let mut snapshot = self.lock();
        if snapshot.is_pending(key) {
            snapshot.pending_toggle = None;
        }

        match result {
            Ok(()) => {
                if let Some(row) = snapshot.state.items.iter_mut().find(|row| row.key() == key) {
                    row.set_active(target);
                }
                snapshot.error = None;
                Ok(target)
            }
            Err(err) => {
                snapshot.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}

fn normalize<T>(response: PageResponse<T>, requested_page: u32, requested_limit: u32) -> PageState<T> {
    let limit = if response.limit == 0 {
        requested_limit
    } else {
        response.limit
    };

    let mut items = response.items;
    if items.len() > limit as usize {
        warn!(
            received = items.len(),
            limit, "server returned more rows than the page limit, truncating"
        );
        items.truncate(limit as usize);
    }

    let total_pages = if response.total_pages == 0 && response.total > 0 {
        u32::try_from(response.total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
    } else {
        response.total_pages
    };

    let mut page = if response.page == 0 {
        requested_page
    } else {
        response.page
    };
    if total_pages > 0 && page > total_pages {
        page = total_pages;
    }

    PageState {
        items,
        page,
        total_pages,
        limit,
        total: response.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        active: bool,
    }

    impl Toggleable for Row {
        fn key(&self) -> &str {
            &self.id
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    fn rows(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|n| Row {
                id: format!("r{n}"),
                active: n % 2 == 1,
            })
            .collect()
    }

    fn slice_page(all: &[Row], page: u32, limit: u32) -> PageResponse<Row> {
        let start = ((page - 1) * limit) as usize;
        let items = all
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        PageResponse {
            items,
            page,
            total_pages: (all.len() as u32).div_ceil(limit),
            limit,
            total: all.len() as u64,
        }
    }

    #[derive(Debug, Default)]
    struct FakeSource {
        rows: Vec<Row>,
        fail_fetch: std::sync::atomic::AtomicBool,
        fail_toggle: bool,
        toggles: Mutex<Vec<(String, bool)>>,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        fn with_rows(count: usize) -> Self {
            Self {
                rows: rows(count),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        type Item = Row;

        async fn fetch_page(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<Row>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(AdminClientError::Http {
                    status: 500,
                    message: "Server error".to_string(),
                });
            }
            Ok(slice_page(&self.rows, page, limit))
        }

        async fn set_status(&self, item: &Row, active: bool) -> AdminClientResult<()> {
            self.toggles
                .lock()
                .expect("toggles lock")
                .push((item.id.clone(), active));
            if self.fail_toggle {
                return Err(AdminClientError::Http {
                    status: 404,
                    message: "User not found".to_string(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_first_page_of_25_rows_with_limit_10() {
        let controller = ListController::new(FakeSource::with_rows(25), 10);

        let outcome = controller.load(1).await.expect("load");
        let snapshot = controller.snapshot();

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(snapshot.state.items.len(), 10);
        assert_eq!(snapshot.state.total_pages, 3);
        assert_eq!(snapshot.state.total, 25);
        assert_eq!(snapshot.view(), ListView::Rows);
    }

    #[tokio::test]
    async fn go_to_every_valid_page_respects_limit() {
        let controller = ListController::new(FakeSource::with_rows(25), 10);
        controller.load(1).await.expect("load");

        for page in 1..=3 {
            controller.go_to(page).await.expect("go_to");
            let snapshot = controller.snapshot();
            assert_eq!(snapshot.state.page, page);
            assert!(snapshot.state.items.len() <= snapshot.state.limit as usize);
        }
        assert_eq!(controller.snapshot().state.items.len(), 5);
    }

    #[tokio::test]
    async fn go_to_outside_bounds_is_a_no_op() {
        let controller = ListController::new(FakeSource::with_rows(25), 10);
        controller.load(2).await.expect("load");
        let before = controller.snapshot();
        let fetches = controller.source().fetches.load(Ordering::SeqCst);

        assert_eq!(controller.go_to(0).await.expect("go_to"), LoadOutcome::OutOfRange);
        assert_eq!(controller.go_to(4).await.expect("go_to"), LoadOutcome::OutOfRange);

        assert_eq!(controller.snapshot(), before);
        assert_eq!(controller.source().fetches.load(Ordering::SeqCst), fetches);
    }

    #[tokio::test]
    async fn next_and_prev_clamp_at_edges() {
        let controller = ListController::new(FakeSource::with_rows(25), 10);
        controller.load(1).await.expect("load");

        assert_eq!(controller.prev().await.expect("prev"), LoadOutcome::OutOfRange);
        controller.next().await.expect("next");
        controller.next().await.expect("next");
        assert_eq!(controller.snapshot().state.page, 3);
        assert_eq!(controller.next().await.expect("next"), LoadOutcome::OutOfRange);
        assert_eq!(controller.snapshot().state.page, 3);
    }

    #[tokio::test]
    async fn load_rejects_page_zero() {
        let controller = ListController::new(FakeSource::with_rows(3), 10);
        let err = controller.load(0).await.expect_err("page 0 is invalid");
        assert!(matches!(err, AdminClientError::Validation(_)));
    }

    #[tokio::test]
    async fn failed_load_keeps_rows_and_page() {
        let controller = ListController::new(FakeSource::with_rows(25), 10);
        controller.load(2).await.expect("load");
        let before = controller.snapshot().state;

        controller.source().fail_fetch.store(true, Ordering::SeqCst);
        let err = controller.go_to(3).await.expect_err("fetch fails");
        let after = controller.snapshot();

        assert_eq!(err.status(), Some(500));
        assert_eq!(after.state, before);
        assert_eq!(after.error.as_deref(), Some("Server error"));
        assert!(!after.loading);
    }

    #[tokio::test]
    async fn toggle_changes_only_the_target_row() {
        let controller = ListController::new(FakeSource::with_rows(5), 10);
        controller.load(1).await.expect("load");
        let before = controller.snapshot().state.items;

        let new_status = controller.toggle_status("r1", true).await.expect("toggle");
        let after = controller.snapshot().state.items;

        assert!(!new_status);
        assert!(!after[0].active);
        assert_eq!(&after[1..], &before[1..]);
        assert_eq!(
            controller.source().toggles.lock().expect("lock").as_slice(),
            &[("r1".to_string(), false)]
        );
        assert_eq!(controller.source().fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_toggle_leaves_row_unchanged() {
        let source = FakeSource {
            fail_toggle: true,
            ..FakeSource::with_rows(3)
        };
        let controller = ListController::new(source, 10);
        controller.load(1).await.expect("load");
        let before = controller.snapshot().state.items;

        let err = controller
            .toggle_status("r2", false)
            .await
            .expect_err("toggle fails");
        let snapshot = controller.snapshot();

        assert_eq!(err.user_message(), "User not found");
        assert_eq!(snapshot.state.items, before);
        assert_eq!(snapshot.error.as_deref(), Some("User not found"));
        assert!(snapshot.pending_toggle.is_none());
    }

    #[tokio::test]
    async fn toggle_of_unknown_row_is_not_found() {
        let controller = ListController::new(FakeSource::with_rows(3), 10);
        controller.load(1).await.expect("load");

        let err = controller
            .toggle_status("missing", true)
            .await
            .expect_err("no such row");
        assert!(matches!(err, AdminClientError::NotFound(_)));
        assert!(controller.source().toggles.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn empty_page_is_distinct_from_loading() {
        let controller = ListController::new(FakeSource::with_rows(0), 10);
        assert_eq!(controller.snapshot().view(), ListView::Loading);

        controller.load(1).await.expect("load");
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.view(), ListView::Empty);
        assert_eq!(snapshot.state.total_pages, 0);
    }

    #[tokio::test]
    async fn failed_first_load_is_reported_as_failed() {
        let source = FakeSource::with_rows(3);
        source.fail_fetch.store(true, Ordering::SeqCst);
        let controller = ListController::new(source, 10);

        controller.load(1).await.expect_err("fetch fails");
        assert_eq!(controller.snapshot().view(), ListView::Failed);
    }

    #[derive(Debug, Default)]
    struct GatedSource {
        rows: Vec<Row>,
        gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl PageSource for GatedSource {
        type Item = Row;

        async fn fetch_page(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<Row>> {
            let gate = self.gates.lock().expect("gates lock").remove(&page);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(slice_page(&self.rows, page, limit))
        }

        async fn set_status(&self, _item: &Row, _active: bool) -> AdminClientResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn stale_response_does_not_overwrite_newer_page() {
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        let source = GatedSource {
            rows: rows(25),
            gates: Mutex::new(HashMap::from([(1, first_gate), (2, second_gate)])),
        };
        let controller = ListController::new(source, 10);

        let release = async {
            let _ = release_second.send(());
            tokio::task::yield_now().await;
            let _ = release_first.send(());
        };
        let (first, second, ()) = tokio::join!(controller.load(1), controller.load(2), release);

        assert_eq!(first.expect("first"), LoadOutcome::Superseded);
        assert_eq!(second.expect("second"), LoadOutcome::Applied);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state.page, 2);
        assert_eq!(snapshot.state.items[0].id, "r11");
        assert!(!snapshot.loading);
    }

    #[test]
    fn normalize_truncates_and_computes_missing_total_pages() {
        let response = PageResponse {
            items: rows(12),
            page: 0,
            total_pages: 0,
            limit: 10,
            total: 25,
        };
        let state = normalize(response, 1, 10);
        assert_eq!(state.items.len(), 10);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn normalize_clamps_page_to_total_pages() {
        let response = PageResponse {
            items: rows(1),
            page: 9,
            total_pages: 3,
            limit: 10,
            total: 21,
        };
        assert_eq!(normalize(response, 9, 10).page, 3);
    }
}
