use account_ui::{
    api::ApiClient,
    components::ToastStatus,
    config::AppConfig,
    mock::{self, UserStore},
    routes::{
        paths, ActivatePage, ActivateView, ChangePasswordPage, LoginPage, ProfilePage,
        RegisterPage, RegisterView, ResetPasswordConfirmPage, ResetPasswordRequestPage,
        ResetPasswordRequestView, SubmitOutcome, AppContext, KEY_NOT_DEFINED,
    },
};
use anyhow::Result;
use axum::{extract::Extension, http::StatusCode, routing::post, Json, Router};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Recorded = Arc<Mutex<Vec<String>>>;

async fn spawn_mock() -> Result<(AppContext, Arc<UserStore>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let store = Arc::new(UserStore::seeded());
    tokio::spawn(mock::serve(listener, Arc::clone(&store)));
    Ok((context(&format!("http://{addr}"))?, store))
}

fn context(base_url: &str) -> Result<AppContext> {
    let api = ApiClient::new(
        AppConfig::with_base_url(base_url),
        Arc::new(account_ui::session::SessionStore::new()),
    )?;
    Ok(AppContext::new(api))
}

/// Serves both reset endpoints and records every request body it receives.
async fn spawn_recorder() -> Result<(AppContext, Recorded)> {
    async fn record_text(Extension(recorded): Extension<Recorded>, body: String) -> StatusCode {
        if let Ok(mut bodies) = recorded.lock() {
            bodies.push(body);
        }
        StatusCode::OK
    }

    async fn record_json(
        Extension(recorded): Extension<Recorded>,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        if let Ok(mut bodies) = recorded.lock() {
            bodies.push(body.to_string());
        }
        StatusCode::OK
    }

    let recorded: Recorded = Arc::default();
    let app = Router::new()
        .route("/account/reset-password/init", post(record_text))
        .route("/account/reset-password/finish", post(record_json))
        .layer(Extension(Arc::clone(&recorded)));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok((context(&format!("http://{addr}"))?, recorded))
}

fn bodies(recorded: &Recorded) -> Vec<String> {
    recorded.lock().map(|bodies| bodies.clone()).unwrap_or_default()
}

#[tokio::test]
async fn login_success_navigates_home_and_loads_account() -> Result<()> {
    let (mut ctx, _store) = spawn_mock().await?;
    ctx.navigator.navigate(paths::LOGIN);

    let mut page = LoginPage::new();
    page.set_username("admin");
    page.set_password("admin");
    let outcome = page.submit(&mut ctx).await;

    assert!(outcome.is_success());
    assert_eq!(ctx.navigator.location(), paths::HOME);
    assert!(ctx.session.is_authenticated());
    assert!(ctx.session.is_admin());
    Ok(())
}

#[tokio::test]
async fn login_failure_raises_toast_and_stays() -> Result<()> {
    let (mut ctx, _store) = spawn_mock().await?;
    ctx.navigator.navigate(paths::LOGIN);

    let mut page = LoginPage::new();
    page.set_username("admin");
    page.set_password("wrong");
    let outcome = page.submit(&mut ctx).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(ctx.navigator.location(), paths::LOGIN);
    assert!(!ctx.session.is_authenticated());
    let toast = ctx.toasts.last().cloned();
    assert_eq!(toast.as_ref().map(|t| t.status), Some(ToastStatus::Error));
    assert_eq!(toast.map(|t| t.title), Some("Login failed".to_string()));
    Ok(())
}

#[tokio::test]
async fn reset_request_sends_literal_email_once_and_confirms() -> Result<()> {
    let (mut ctx, recorded) = spawn_recorder().await?;
    let mut page = ResetPasswordRequestPage::new();
    page.set_email("user@example.com");

    assert!(page.submit(&mut ctx).await.is_success());
    assert!(matches!(page.submit(&mut ctx).await, SubmitOutcome::Busy));

    assert_eq!(bodies(&recorded), vec!["user@example.com".to_string()]);
    let ResetPasswordRequestView::Confirmation {
        description, email, ..
    } = page.view()
    else {
        panic!("a successful request shows the confirmation");
    };
    assert_eq!(email, "user@example.com");
    assert!(description.contains("user@example.com"));
    Ok(())
}

#[tokio::test]
async fn reset_request_with_invalid_email_sends_nothing() -> Result<()> {
    let (mut ctx, recorded) = spawn_recorder().await?;
    let mut page = ResetPasswordRequestPage::new();
    page.set_email("not-an-email");

    let SubmitOutcome::Blocked(errors) = page.submit(&mut ctx).await else {
        panic!("an invalid email must block submission");
    };
    assert_eq!(errors.message_for("email"), Some("Email is invalid"));
    assert!(bodies(&recorded).is_empty());
    Ok(())
}

#[tokio::test]
async fn reset_confirm_without_key_submits_sentinel() -> Result<()> {
    let (mut ctx, recorded) = spawn_recorder().await?;
    let mut page = ResetPasswordConfirmPage::new("/account/reset/finish");
    page.set_password("abcd");
    page.set_confirm_password("abcd");

    assert!(page.submit(&mut ctx).await.is_success());
    assert_eq!(ctx.navigator.location(), paths::LOGIN);

    let sent = bodies(&recorded);
    assert_eq!(sent.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&sent[0])?;
    assert_eq!(body["key"], KEY_NOT_DEFINED);
    assert_eq!(body["newPassword"], "abcd");
    Ok(())
}

#[tokio::test]
async fn reset_confirm_with_unknown_key_reports_error() -> Result<()> {
    let (mut ctx, _store) = spawn_mock().await?;
    let mut page = ResetPasswordConfirmPage::new("/account/reset/finish?key=stale");
    page.set_password("abcd");
    page.set_confirm_password("abcd");

    assert!(matches!(page.submit(&mut ctx).await, SubmitOutcome::Failed(_)));
    assert_eq!(ctx.navigator.location(), paths::HOME);
    let toast = ctx.toasts.last().cloned();
    assert_eq!(toast.as_ref().map(|t| t.status), Some(ToastStatus::Error));
    assert_eq!(
        toast.and_then(|t| t.description),
        Some("No user was found for this reset key".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn reset_confirm_with_valid_key_allows_new_login() -> Result<()> {
    let (mut ctx, store) = spawn_mock().await?;
    let key = store.request_reset("user@localhost").unwrap_or_default();

    let mut page = ResetPasswordConfirmPage::new(&format!("/account/reset/finish?key={key}"));
    page.set_password("brand-new");
    page.set_confirm_password("brand-new");
    assert!(page.submit(&mut ctx).await.is_success());

    let mut login = LoginPage::new();
    login.set_username("user");
    login.set_password("brand-new");
    assert!(login.submit(&mut ctx).await.is_success());
    Ok(())
}

#[tokio::test]
async fn register_reports_duplicates_and_succeeds() -> Result<()> {
    let (mut ctx, _store) = spawn_mock().await?;

    let mut taken = RegisterPage::new(&ctx);
    taken.set_login("admin");
    taken.set_email("fresh@example.com");
    taken.set_password("secret");
    assert!(matches!(taken.submit(&mut ctx).await, SubmitOutcome::Failed(_)));
    assert_eq!(
        ctx.toasts.last().and_then(|t| t.description.clone()),
        Some("Username already used.".to_string())
    );

    let mut page = RegisterPage::new(&ctx);
    page.set_login("fresh");
    page.set_email("fresh@example.com");
    page.set_password("secret");
    assert!(page.submit(&mut ctx).await.is_success());
    assert!(matches!(page.view(), RegisterView::Success { .. }));
    Ok(())
}

#[tokio::test]
async fn activation_link_activates_once() -> Result<()> {
    let (ctx, store) = spawn_mock().await?;
    let Ok((_, key)) = store.register("pending", "pending@example.com", "secret", "en") else {
        panic!("store registration should succeed");
    };
    let link = format!("/account/activate?key={key}");

    let mut page = ActivatePage::new(&link);
    page.run(&ctx).await;
    assert!(matches!(page.view(), ActivateView::Success { .. }));

    let mut again = ActivatePage::new(&link);
    again.run(&ctx).await;
    assert!(matches!(again.view(), ActivateView::Error { .. }));
    assert!(store.authenticate("pending", "secret").is_some());
    Ok(())
}

#[tokio::test]
async fn change_password_then_profile_update() -> Result<()> {
    let (mut ctx, _store) = spawn_mock().await?;
    let mut login = LoginPage::new();
    login.set_username("user");
    login.set_password("user");
    assert!(login.submit(&mut ctx).await.is_success());

    let mut wrong = ChangePasswordPage::new();
    wrong.set_current_password("nope");
    wrong.set_new_password("changed");
    wrong.set_confirm_new_password("changed");
    assert!(matches!(wrong.submit(&mut ctx).await, SubmitOutcome::Failed(_)));

    let mut page = ChangePasswordPage::new();
    page.set_current_password("user");
    page.set_new_password("changed");
    page.set_confirm_new_password("changed");
    assert!(page.submit(&mut ctx).await.is_success());
    assert_eq!(
        ctx.toasts.last().map(|t| t.title.clone()),
        Some("Password updated".to_string())
    );

    let Some(account) = ctx.session.account() else {
        panic!("login loads the account");
    };
    let mut profile = ProfilePage::new(account);
    profile.set_first_name("Uma");
    profile.set_lang_key("fr");
    assert!(profile.submit(&mut ctx).await.is_success());
    assert_eq!(ctx.session.locale(), "fr");
    assert_eq!(
        ctx.session.account().and_then(|a| a.first_name),
        Some("Uma".to_string())
    );
    Ok(())
}
