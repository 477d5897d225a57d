//! Server-rendered content pages and the admin shell.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect};
use chrono::{Datelike, Utc};
use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::error;

use crate::AppState;
use crate::error::ApiError;
use crate::i18n::Locale;
use crate::models::DayOfWeek;
use crate::schedule::ScheduleView;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("base.html", include_str!("../templates/base.html")),
        ("contact_links.html", include_str!("../templates/contact_links.html")),
        ("home.html", include_str!("../templates/home.html")),
        ("about.html", include_str!("../templates/about.html")),
        ("schedule.html", include_str!("../templates/schedule.html")),
        ("admin_login.html", include_str!("../templates/admin_login.html")),
        ("admin_dashboard.html", include_str!("../templates/admin_dashboard.html")),
    ] {
        env.add_template(name, source)
            .expect("embedded template compiles");
    }
    env
});

const ADMIN_SCRIPT: &str = include_str!("../static/admin.js");

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    locale: Locale,
    title: Option<&'static str>,
    site_title: &'a str,
    switch_path: String,
    instagram_url: Option<&'a str>,
    telegram_url: Option<&'a str>,
    year: i32,
}

impl<'a> PageContext<'a> {
    fn new(state: &'a AppState, locale: Locale, suffix: &str, title: Option<&'static str>) -> Self {
        let path = format!("/{locale}{suffix}");
        Self {
            locale,
            title,
            site_title: &state.settings.site_title,
            switch_path: locale.switch_path(&path),
            instagram_url: state.settings.instagram_url.as_ref().map(|u| u.as_str()),
            telegram_url: state.settings.telegram_url.as_ref().map(|u| u.as_str()),
            year: Utc::now().year(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminConfig<'a> {
    login_path: String,
    dashboard_path: String,
    token_required: bool,
    /// Only exposed when no API token is configured.
    password: Option<&'a str>,
    day_names: Vec<&'static str>,
}

impl<'a> AdminConfig<'a> {
    fn new(state: &'a AppState, locale: Locale) -> Self {
        let token_required = state.settings.auth_token.is_some();
        Self {
            login_path: format!("/{locale}/admin"),
            dashboard_path: format!("/{locale}/admin/dashboard"),
            token_required,
            password: (!token_required).then_some(state.settings.admin_password.as_str()),
            day_names: DayOfWeek::ALL.iter().map(|d| Locale::En.day_name(*d)).collect(),
        }
    }
}

fn parse_locale(raw: &str) -> Result<Locale, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown locale '{raw}'")))
}

fn render(name: &str, ctx: minijinja::Value) -> Result<Html<String>, ApiError> {
    let template = TEMPLATES.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

pub async fn root(headers: HeaderMap) -> Redirect {
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let locale = Locale::negotiate(accept_language);
    Redirect::temporary(&format!("/{locale}"))
}

pub async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, ApiError> {
    let locale = parse_locale(&locale)?;
    let page = PageContext::new(&state, locale, "", None);
    render("home.html", context! { page, t => locale.messages() })
}

pub async fn about(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, ApiError> {
    let locale = parse_locale(&locale)?;
    let t = locale.messages();
    let page = PageContext::new(&state, locale, "/about", Some(t.nav_about));
    render("about.html", context! { page, t })
}

pub async fn schedule(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, ApiError> {
    let locale = parse_locale(&locale)?;
    let classes = state.store.list_active().await.unwrap_or_else(|err| {
        error!(error = %err, "error fetching classes for schedule page");
        Vec::new()
    });
    let schedule = ScheduleView::build(classes).localize(locale);

    let t = locale.messages();
    let page = PageContext::new(&state, locale, "/schedule", Some(t.nav_schedule));
    render("schedule.html", context! { page, t, schedule })
}

pub async fn admin_login(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, ApiError> {
    let locale = parse_locale(&locale)?;
    let page = PageContext::new(&state, locale, "/admin", Some("Admin Login"));
    let admin = AdminConfig::new(&state, locale);
    render(
        "admin_login.html",
        context! { page, t => locale.messages(), admin },
    )
}

pub async fn admin_dashboard(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, ApiError> {
    let locale = parse_locale(&locale)?;
    let page = PageContext::new(&state, locale, "/admin/dashboard", Some("Admin Dashboard"));
    let admin = AdminConfig::new(&state, locale);
    let days = admin.day_names.clone();
    render(
        "admin_dashboard.html",
        context! { page, t => locale.messages(), admin, days },
    )
}

pub async fn admin_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        ADMIN_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        for name in [
            "home.html",
            "about.html",
            "schedule.html",
            "admin_login.html",
            "admin_dashboard.html",
        ] {
            assert!(TEMPLATES.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("ru").unwrap(), Locale::Ru);
        assert!(matches!(parse_locale("de"), Err(ApiError::NotFound(_))));
    }
}
