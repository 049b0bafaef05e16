//! Example consumer: drives telehealth-stores against a running backend.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Credentials come from `TELEHEALTH_EMAIL` / `TELEHEALTH_PASSWORD` (or `.env`).

use telehealth_stores::models::{ReportQuery, SessionQuery};
use telehealth_stores::{from_env, AppStores, AuthPortal, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("telehealth_stores=info")),
        )
        .init();

    let config = from_env()?;
    tracing::info!(origin = %config.origin, portal = ?config.portal, "starting");
    let stores = AppStores::from_config(&config)?;

    let _auth_watch = stores.auth.subscribe(|s| {
        tracing::info!(
            authenticated = s.is_authenticated,
            loading = s.is_loading,
            user = ?s.user.as_ref().map(|u| u.name.as_str()),
            error = ?s.error,
            "auth changed"
        );
    });

    if !stores.auth.is_authenticated() {
        let email = std::env::var("TELEHEALTH_EMAIL").unwrap_or_default();
        let password = std::env::var("TELEHEALTH_PASSWORD").unwrap_or_default();
        if !stores.auth.login(&email, &password).await {
            tracing::error!(error = ?stores.auth.snapshot().error, "login failed");
            return Ok(());
        }
    }

    match stores.auth.portal() {
        AuthPortal::Admin => {
            let _watch = stores.doctors.subscribe(|s| {
                tracing::info!(doctors = s.doctors.len(), loading = s.is_loading, error = ?s.error, "doctors changed");
            });
            let (doctors, specializations) =
                tokio::join!(stores.doctors.fetch_all(), stores.doctors.fetch_specializations());
            tracing::info!(doctors = doctors.len(), specializations = specializations.len(), "roster loaded");

            let sessions = stores.sessions.fetch_sessions(SessionQuery::default()).await;
            tracing::info!(
                shown = sessions.content.len(),
                total = sessions.total_elements,
                "sessions loaded"
            );

            let query = ReportQuery::default();
            let (reports, filters) = tokio::join!(
                stores.reports.fetch_reports(&query),
                stores.reports.fetch_filter_options()
            );
            tracing::info!(
                reports = reports.reports.len(),
                page = reports.pagination.current_page,
                of = reports.pagination.total_pages,
                cities = filters.cities.len(),
                "reports loaded"
            );
        }
        AuthPortal::Doctor => {
            let _watch = stores.notifications.subscribe(|s| {
                tracing::info!(total = s.notifications.len(), unread = s.unread_count(), "notifications changed");
            });
            stores.notifications.fetch_notifications().await;
            if std::env::var("TELEHEALTH_MARK_ALL_READ").is_ok() {
                let outcome = stores.notifications.mark_all_as_read().await;
                tracing::info!(attempted = outcome.attempted, failed = outcome.failed, "marked all as read");
            }
        }
    }

    Ok(())
}
