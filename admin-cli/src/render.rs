use std::fmt::Write;

use admin_client::views::{self, COMPANY_LABELS, JOB_LABELS, USER_LABELS};
use admin_client::{
    Company, Dashboard, GuardState, Job, ListSnapshot, ListView, PageState, Session, User,
};
use serde::Serialize;
use serde_json::{Value, json};

const BAR_WIDTH: usize = 30;

pub fn session_summary(session: Option<&Session>, state: GuardState) -> String {
    match (session, state) {
        (Some(session), GuardState::Authorized) => {
            format!("Вход выполнен, роль: {}", session.role)
        }
        (Some(session), _) => format!(
            "Есть сессия с ролью {}, но доступ к админке только у ADMIN",
            session.role
        ),
        (None, _) => "Сессии нет: выполните `admin-cli login ...`".to_string(),
    }
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let stats = &dashboard.stats;
    let mut out = String::new();
    if let Some(error) = &dashboard.stats_error {
        let _ = writeln!(out, "Показатели недоступны: {error}");
    }
    let _ = writeln!(out, "Пользователей:   {}", stats.total_users);
    let _ = writeln!(out, "Компаний:        {}", stats.total_companies);
    let _ = writeln!(out, "Вакансий (live): {}", stats.live_jobs);
    let _ = writeln!(out, "Откликов:        {}", stats.total_applications);

    if !stats.job_distribution.is_empty() {
        let _ = writeln!(out, "\nРаспределение вакансий:");
        let max = stats
            .job_distribution
            .iter()
            .map(|entry| entry.value)
            .max()
            .unwrap_or(0);
        let name_width = stats
            .job_distribution
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &stats.job_distribution {
            let bar = "#".repeat(views::bar_length(entry.value, max, BAR_WIDTH));
            let _ = writeln!(
                out,
                "  {:<name_width$} | {bar} {}",
                entry.name, entry.value
            );
        }
    }

    let _ = writeln!(out, "\nПоследняя активность:");
    if let Some(error) = &dashboard.activity_error {
        let _ = writeln!(out, "  Ошибка: {error}");
    } else if dashboard.activity.is_empty() {
        let _ = writeln!(out, "  (нет событий)");
    }
    for entry in &dashboard.activity {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            views::activity_time(entry),
            entry.user,
            entry.action
        );
    }
    out
}

fn list_body<T>(snapshot: &ListSnapshot<T>, empty: &str, row: impl Fn(&T) -> String) -> String {
    let mut out = String::new();
    match snapshot.view() {
        ListView::Loading => {
            let _ = writeln!(out, "Загрузка...");
        }
        ListView::Failed => {
            let _ = writeln!(
                out,
                "Ошибка: {}",
                snapshot.error.as_deref().unwrap_or("неизвестная ошибка")
            );
        }
        ListView::Empty => {
            let _ = writeln!(out, "{empty}");
        }
        ListView::Rows => {
            for item in &snapshot.state.items {
                let _ = writeln!(out, "{}", row(item));
            }
            let _ = writeln!(out, "{}", footer(&snapshot.state));
        }
    }
    out
}

fn footer<T>(state: &PageState<T>) -> String {
    format!(
        "{} ({})",
        views::range_summary(state),
        views::page_caption(state)
    )
}

pub fn users(snapshot: &ListSnapshot<User>) -> String {
    list_body(snapshot, "Пользователей нет", |user| {
        format!(
            "- [{}] {} <{}> тел.: {} статус: {}",
            user.id,
            user.full_name,
            user.email,
            views::or_na(user.phone.as_deref()),
            USER_LABELS.status(user.is_active)
        )
    })
}

pub fn companies(snapshot: &ListSnapshot<Company>) -> String {
    list_body(snapshot, "Компаний нет", |company| {
        let owner_email = company.owner.as_ref().and_then(|owner| owner.email.as_deref());
        format!(
            "- [{}] {} отрасль: {} владелец: {} город: {} статус: {}",
            company.id,
            company.name,
            views::or_na(company.industry.as_deref()),
            views::or_na(owner_email),
            views::or_na(company.location.as_deref()),
            COMPANY_LABELS.status(company.is_active())
        )
    })
}

pub fn company_header(company: &Company) -> String {
    let owner = company.owner.as_ref();
    format!(
        "[{}] {} ({})\nотрасль: {}\nгород: {}\nвладелец: {} <{}>",
        views::initial(&company.name),
        company.name,
        company.id,
        views::or_na(company.industry.as_deref()),
        views::or_na(company.location.as_deref()),
        views::or_na(owner.and_then(|owner| owner.full_name.as_deref())),
        views::or_na(owner.and_then(|owner| owner.email.as_deref())),
    )
}

pub fn jobs(snapshot: &ListSnapshot<Job>) -> String {
    list_body(snapshot, "У компании нет вакансий", |job| {
        format!(
            "- [{}] {} тип: {} откликов: {} опубликована: {} статус: {}",
            job.id,
            job.title,
            views::or_na(job.job_type.as_deref()),
            job.applicants_count,
            views::format_date(job.created_at.as_ref()),
            JOB_LABELS.status(job.status.is_live())
        )
    })
}

pub fn list_json<T: Serialize>(snapshot: &ListSnapshot<T>) -> Value {
    json!({
        "items": snapshot.state.items,
        "page": snapshot.state.page,
        "totalPages": snapshot.state.total_pages,
        "limit": snapshot.state.limit,
        "total": snapshot.state.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_client::{Activity, ActivityKind, DashboardStats, DistributionEntry, Role};
    use chrono::{TimeZone, Utc};

    fn user(id: &str, active: bool) -> User {
        User {
            id: id.to_string(),
            full_name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: None,
            avatar_url: None,
            is_active: active,
            created_at: None,
        }
    }

    fn snapshot<T>(items: Vec<T>, loaded: bool, error: Option<&str>) -> ListSnapshot<T> {
        let total = items.len() as u64;
        ListSnapshot {
            state: PageState {
                items,
                page: 1,
                total_pages: u32::from(total > 0),
                limit: 10,
                total,
            },
            loading: false,
            pending_toggle: None,
            error: error.map(str::to_string),
            loaded,
        }
    }

    #[test]
    fn users_table_shows_status_and_placeholders() {
        let out = users(&snapshot(vec![user("u1", false)], true, None));
        assert!(out.contains("[u1] Ann Lee <ann@example.com> тел.: N/A статус: Blocked"));
        assert!(out.contains("Showing 1 to 1 of 1 results"));
    }

    #[test]
    fn empty_and_failed_lists_are_distinct() {
        assert!(users(&snapshot(Vec::new(), true, None)).contains("Пользователей нет"));
        assert!(
            users(&snapshot(Vec::new(), false, Some("Server error")))
                .contains("Ошибка: Server error")
        );
    }

    #[test]
    fn dashboard_draws_bars_relative_to_max() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let out = dashboard(&Dashboard {
            stats: DashboardStats {
                total_users: 3,
                job_distribution: vec![
                    DistributionEntry {
                        name: "IT".to_string(),
                        value: 10,
                    },
                    DistributionEntry {
                        name: "Sales".to_string(),
                        value: 5,
                    },
                ],
                ..DashboardStats::default()
            },
            activity: vec![Activity {
                id: "a1".to_string(),
                user: "Ann".to_string(),
                action: "registered".to_string(),
                time: Some(at),
                raw_time: "2024-05-01T10:00:00Z".to_string(),
                kind: ActivityKind::User,
            }],
            ..Dashboard::default()
        });

        assert!(out.contains(&format!("IT    | {} 10", "#".repeat(30))));
        assert!(out.contains(&format!("Sales | {} 5", "#".repeat(15))));
        assert!(out.contains("2024-05-01 10:00 Ann: registered"));
    }

    #[test]
    fn dashboard_shows_activity_error_inline() {
        let out = dashboard(&Dashboard {
            stats: DashboardStats {
                total_users: 7,
                ..DashboardStats::default()
            },
            activity_error: Some("Server error".to_string()),
            ..Dashboard::default()
        });

        assert!(out.contains("Пользователей:   7"));
        assert!(out.contains("Ошибка: Server error"));
        assert!(!out.contains("нет событий"));
    }

    #[test]
    fn session_summary_mentions_role() {
        let session = Session::new("tok", Role::Other("USER".to_string()));
        assert!(session_summary(Some(&session), GuardState::Redirecting).contains("USER"));
        assert!(session_summary(None, GuardState::Redirecting).contains("login"));
    }
}
