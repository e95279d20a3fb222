use std::sync::Arc;

use admin_client::{AdminClient, ClientConfig, LoadOutcome, MemorySessionStore};

fn live_client() -> AdminClient {
    let base_url =
        std::env::var("ADMIN_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    AdminClient::new(
        ClientConfig::new(base_url),
        Arc::new(MemorySessionStore::new()),
    )
    .expect("client must build")
}

#[tokio::test]
#[ignore = "requires a running backend and ADMIN_EMAIL/ADMIN_PASSWORD"]
async fn live_admin_smoke_flow() {
    let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set");
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");
    let client = live_client();

    let session = client
        .login(&email, &password)
        .await
        .expect("login must succeed");
    assert!(session.role.is_admin());
    assert!(client.session().token().is_some());

    let dashboard = client.dashboard().await.expect("dashboard must load");
    assert!(dashboard.stats_error.is_none());
    assert!(dashboard.activity_error.is_none());
    assert!(dashboard.activity.iter().all(|entry| !entry.id.is_empty()));

    let users = client.users();
    assert_eq!(
        users.load(1).await.expect("users must load"),
        LoadOutcome::Applied
    );
    let snapshot = users.snapshot();
    assert!(snapshot.state.items.len() <= snapshot.state.limit as usize);

    let companies = client.companies();
    companies.load(1).await.expect("companies must load");
    if let Some(company) = companies.snapshot().state.items.first() {
        let profile = client
            .company(&company.id)
            .await
            .expect("company profile must load");
        assert_eq!(profile.id, company.id);

        let jobs = client.company_jobs(company.id.clone());
        jobs.load(1).await.expect("company jobs must load");
    }

    client.logout().expect("logout must succeed");
    assert!(client.session().session().is_none());
}
