//! Подписи и форматирование, общие для CLI и веб-интерфейса.

use chrono::{DateTime, Utc};

use crate::models::Activity;
use crate::pagination::PageState;

/// Подпись кнопки, пока статус строки меняется.
pub const UPDATING_LABEL: &str = "Updating...";
/// Заглушка для отсутствующего поля.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Подписи статуса и кнопки переключения для одного вида строк.
pub struct StatusLabels {
    /// Статус, когда строка активна.
    pub active: &'static str,
    /// Статус, когда строка неактивна.
    pub inactive: &'static str,
    /// Кнопка для активной строки.
    pub deactivate: &'static str,
    /// Кнопка для неактивной строки.
    pub activate: &'static str,
}

/// Пользователи.
pub const USER_LABELS: StatusLabels = StatusLabels {
    active: "Active",
    inactive: "Blocked",
    deactivate: "Block",
    activate: "Unblock",
};

/// Компании.
pub const COMPANY_LABELS: StatusLabels = StatusLabels {
    active: "Active",
    inactive: "Inactive",
    deactivate: "Block",
    activate: "Unblock",
};

/// Вакансии.
pub const JOB_LABELS: StatusLabels = StatusLabels {
    active: "Live",
    inactive: "Closed",
    deactivate: "Disable",
    activate: "Enable",
};

impl StatusLabels {
    /// Подпись статуса.
    pub fn status(&self, active: bool) -> &'static str {
        if active { self.active } else { self.inactive }
    }

    /// Подпись кнопки; пока идёт запрос, `Updating...`.
    pub fn action(&self, active: bool, pending: bool) -> &'static str {
        if pending {
            UPDATING_LABEL
        } else if active {
            self.deactivate
        } else {
            self.activate
        }
    }
}

/// Номера первой и последней строки страницы (с 1). Первая не больше `total`.
pub fn visible_range<T>(state: &PageState<T>) -> (u64, u64) {
    let limit = u64::from(state.limit.max(1));
    let page = u64::from(state.page.max(1));
    let first = ((page - 1) * limit + 1).min(state.total);
    let last = (page * limit).min(state.total);
    (first, last)
}

/// "Showing A to B of N results".
pub fn range_summary<T>(state: &PageState<T>) -> String {
    let (first, last) = visible_range(state);
    format!("Showing {first} to {last} of {} results", state.total)
}

/// "Page X of Y".
pub fn page_caption<T>(state: &PageState<T>) -> String {
    format!("Page {} of {}", state.page, state.total_pages.max(1))
}

/// Сколько соседних страниц показывать по обе стороны от текущей.
pub const PAGE_WINDOW: u32 = 2;
/// Больше кнопок перехода пагинатор не рисует.
pub const MAX_PAGE_LINKS: usize = 2 * PAGE_WINDOW as usize + 3;

/// Номера страниц для перехода: первая, последняя и окно `page ± PAGE_WINDOW`,
/// по возрастанию. Разрыв между соседними номерами означает пропуск.
pub fn page_numbers<T>(state: &PageState<T>) -> Vec<u32> {
    let total = state.total_pages;
    if total == 0 {
        return Vec::new();
    }
    let page = state.page.clamp(1, total);
    let from = page.saturating_sub(PAGE_WINDOW).max(1);
    let to = page.saturating_add(PAGE_WINDOW).min(total);

    let mut numbers = Vec::with_capacity(MAX_PAGE_LINKS);
    if from > 1 {
        numbers.push(1);
    }
    numbers.extend(from..=to);
    if to < total {
        numbers.push(total);
    }
    numbers
}

/// Значение поля или `N/A`.
pub fn or_na(value: Option<&str>) -> &str {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

/// Первая буква имени в верхнем регистре, для аватара-заглушки.
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Дата без времени, `YYYY-MM-DD`.
pub fn format_date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |value| value.format("%Y-%m-%d").to_string(),
    )
}

/// Дата и время для ленты активности.
pub fn format_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Время события ленты: разобранная дата, иначе текст сервера, иначе `N/A`.
pub fn activity_time(activity: &Activity) -> String {
    match &activity.time {
        Some(at) => format_time(at),
        None => or_na(Some(activity.raw_time.trim())).to_string(),
    }
}

/// Длина столбца диаграммы: `value` относительно `max`, от 0 до `width`.
/// Ненулевое значение всегда даёт хотя бы единицу.
pub fn bar_length(value: u64, max: u64, width: usize) -> usize {
    if max == 0 || value == 0 || width == 0 {
        return 0;
    }
    let scaled = (u128::from(value) * width as u128).div_ceil(u128::from(max));
    usize::try_from(scaled).unwrap_or(width).clamp(1, width)
}
