mod logging;
mod render;
mod settings;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use admin_client::{
    AdminClient, AdminClientError, FileSessionStore, ListController, LoadOutcome, PageSource,
    Toggleable, require_admin,
    views::{COMPANY_LABELS, JOB_LABELS, StatusLabels, USER_LABELS},
};
use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "admin-cli", version, about = "CLI админки доски вакансий")]
struct Cli {
    /// Адрес API (по умолчанию ADMIN_API_URL или http://localhost:3000).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Размер страницы для списков (по умолчанию ADMIN_PAGE_LIMIT).
    #[arg(long, global = true)]
    limit: Option<u32>,

    /// Файл сессии (по умолчанию ADMIN_SESSION_FILE или .admin_session).
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Печатать результат в JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход администратора.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Регистрация администратора.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        re_password: String,
    },
    /// Выход: удаляет сохранённую сессию.
    Logout,
    /// Показывает текущую сессию.
    Whoami,
    /// Показатели, распределение вакансий и последняя активность.
    Dashboard,
    /// Соискатели.
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Компании.
    Companies {
        #[command(subcommand)]
        action: CompaniesAction,
    },
    /// Вакансии компании.
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },
}

#[derive(Debug, Subcommand)]
enum UsersAction {
    /// Страница списка.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Блокирует или разблокирует пользователя со страницы `--page`.
    Toggle {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Debug, Subcommand)]
enum CompaniesAction {
    /// Страница списка.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Профиль компании.
    Show {
        #[arg(long)]
        id: String,
    },
    /// Блокирует или разблокирует владельца компании.
    Toggle {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Debug, Subcommand)]
enum JobsAction {
    /// Профиль компании и страница её вакансий.
    List {
        #[arg(long)]
        company: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Публикует или закрывает вакансию.
    Toggle {
        #[arg(long)]
        company: String,
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::from_env().context("некорректная конфигурация окружения")?;
    settings.apply_overrides(cli.server, cli.limit, cli.session_file)?;
    logging::init_logging(&settings.log_level)?;
    debug!(
        api_url = %settings.api_url,
        session_file = %settings.session_file.display(),
        "settings loaded"
    );

    let store = Arc::new(FileSessionStore::new(&settings.session_file));
    let client = AdminClient::new(settings.client_config(), store).map_err(map_client_error)?;
    let json = cli.json;

    match cli.command {
        Command::Login { email, password } => {
            let session = client
                .login(&email, &password)
                .await
                .map_err(map_client_error)?;
            println!("Вход выполнен, роль: {}", session.role);
        }
        Command::Register {
            full_name,
            email,
            password,
            re_password,
        } => {
            let session = client
                .register_admin(&full_name, &email, &password, &re_password)
                .await
                .map_err(map_client_error)?;
            println!("Администратор зарегистрирован, роль: {}", session.role);
        }
        Command::Logout => {
            client.logout().map_err(map_client_error)?;
            println!("Сессия удалена");
        }
        Command::Whoami => {
            let (guard, _) = client.guard();
            let session = client.session().session();
            println!("{}", render::session_summary(session.as_ref(), guard.state()));
        }
        Command::Dashboard => {
            require_admin(client.session()).map_err(map_client_error)?;
            let dashboard = client.dashboard().await.map_err(map_client_error)?;
            if json {
                print_json(&dashboard)?;
            } else {
                print!("{}", render::dashboard(&dashboard));
            }
        }
        Command::Users { action } => {
            require_admin(client.session()).map_err(map_client_error)?;
            let users = client.users();
            match action {
                UsersAction::List { page } => {
                    open_page(&users, page).await?;
                    let snapshot = users.snapshot();
                    if json {
                        print_json(&render::list_json(&snapshot))?;
                    } else {
                        print!("{}", render::users(&snapshot));
                    }
                }
                UsersAction::Toggle { id, page } => {
                    let active = toggle_row(&users, &id, page).await?;
                    print_toggled(&id, active, USER_LABELS, json)?;
                }
            }
        }
        Command::Companies { action } => {
            require_admin(client.session()).map_err(map_client_error)?;
            match action {
                CompaniesAction::List { page } => {
                    let companies = client.companies();
                    open_page(&companies, page).await?;
                    let snapshot = companies.snapshot();
                    if json {
                        print_json(&render::list_json(&snapshot))?;
                    } else {
                        print!("{}", render::companies(&snapshot));
                    }
                }
                CompaniesAction::Show { id } => {
                    let company = client.company(&id).await.map_err(map_client_error)?;
                    if json {
                        print_json(&company)?;
                    } else {
                        println!("{}", render::company_header(&company));
                    }
                }
                CompaniesAction::Toggle { id, page } => {
                    let companies = client.companies();
                    let active = toggle_row(&companies, &id, page).await?;
                    print_toggled(&id, active, COMPANY_LABELS, json)?;
                }
            }
        }
        Command::Jobs { action } => {
            require_admin(client.session()).map_err(map_client_error)?;
            match action {
                JobsAction::List { company, page } => {
                    let profile = client.company(&company).await.map_err(map_client_error)?;
                    let jobs = client.company_jobs(company);
                    open_page(&jobs, page).await?;
                    let snapshot = jobs.snapshot();
                    if json {
                        print_json(&serde_json::json!({
                            "company": profile,
                            "jobs": render::list_json(&snapshot),
                        }))?;
                    } else {
                        println!("{}\n", render::company_header(&profile));
                        print!("{}", render::jobs(&snapshot));
                    }
                }
                JobsAction::Toggle { company, id, page } => {
                    let jobs = client.company_jobs(company);
                    let live = toggle_row(&jobs, &id, page).await?;
                    print_toggled(&id, live, JOB_LABELS, json)?;
                }
            }
        }
    }

    Ok(())
}

/// Загружает первую страницу, затем переходит на `page`.
async fn open_page<S: PageSource>(controller: &ListController<S>, page: u32) -> Result<()> {
    controller.load(1).await.map_err(map_client_error)?;
    if page == 1 {
        return Ok(());
    }

    if controller.go_to(page).await.map_err(map_client_error)? == LoadOutcome::OutOfRange {
        let total_pages = controller.snapshot().state.total_pages;
        bail!("страница {page} вне диапазона 1..={total_pages}");
    }
    Ok(())
}

async fn toggle_row<S: PageSource>(
    controller: &ListController<S>,
    id: &str,
    page: u32,
) -> Result<bool> {
    open_page(controller, page).await?;
    let current = controller
        .snapshot()
        .state
        .items
        .iter()
        .find(|item| item.key() == id)
        .map(|item| item.is_active())
        .ok_or_else(|| anyhow!("запись {id} не найдена на странице {page}"))?;

    controller
        .toggle_status(id, current)
        .await
        .map_err(map_client_error)
}

fn print_toggled(id: &str, active: bool, labels: StatusLabels, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({ "id": id, "active": active }));
    }
    println!("{id}: {}", labels.status(active));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
    println!("{raw}");
    Ok(())
}

fn map_client_error(err: AdminClientError) -> anyhow::Error {
    let message = match err {
        AdminClientError::Unauthorized => {
            "требуется авторизация: выполните `admin-cli login ...` или `admin-cli register ...`"
                .to_string()
        }
        AdminClientError::AccessDenied => "доступ запрещён: только для администраторов".to_string(),
        AdminClientError::Validation(message) => format!("некорректные данные: {message}"),
        AdminClientError::NotFound(message) => format!("не найдено: {message}"),
        AdminClientError::Http { status, message } => format!("ошибка HTTP {status}: {message}"),
        AdminClientError::Network(err) => format!("сервер недоступен: {err}"),
        AdminClientError::Decode(message) => format!("неожиданный ответ сервера: {message}"),
        AdminClientError::Storage(message) => format!("ошибка файла сессии: {message}"),
    };
    anyhow!(message)
}
