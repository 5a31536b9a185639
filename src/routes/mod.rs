//! Page flows. Each page owns a [`FormState`], its field adapters and a
//! submission status, and talks to the outside world only through an
//! [`AppContext`].
//!
//! Submitting is split in two so that a UI shell can render the pending state:
//! `begin_submit` validates and captures the request, `complete` applies the
//! server result. `submit` runs both around the HTTP call. A page accepts a
//! single submission at a time.

mod activate;
mod change_password;
mod login;
mod profile;
mod register;
mod reset_password_confirm;
mod reset_password_request;

pub use activate::{ActivatePage, ActivateView};
pub use change_password::{ChangePasswordPage, ChangePasswordView};
pub use login::{LoginPage, LoginView};
pub use profile::{ProfilePage, ProfileView};
pub use register::{RegisterPage, RegisterView};
pub use reset_password_confirm::{ResetPasswordConfirmPage, ResetPasswordConfirmView, KEY_NOT_DEFINED};
pub use reset_password_request::{ResetPasswordRequestPage, ResetPasswordRequestView};

use crate::{
    api::{ApiClient, AppError},
    components::{fields::SelectOption, Toaster},
    features::{account::AccountClient, auth::AuthClient, Mutation},
    form::{FormErrors, FormState, Rule, Validation},
    session::SessionStore,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const ACTIVATE: &str = "/account/activate";
    pub const RESET_REQUEST: &str = "/account/reset/request";
    pub const RESET_CONFIRM: &str = "/account/reset/finish";
    pub const CHANGE_PASSWORD: &str = "/account/password";
    pub const PROFILE: &str = "/account/profile";
}

/// Languages offered by the registration and profile pages.
pub const LANGUAGES: [(&str, &str); 3] = [("en", "English"), ("fr", "Français"), ("ar", "العربية")];

#[must_use]
pub fn language_options() -> Vec<SelectOption> {
    LANGUAGES
        .iter()
        .map(|(key, label)| SelectOption::new(*key, *label))
        .collect()
}

pub(crate) const PASSWORD_MIN_LENGTH: usize = 4;
pub(crate) const PASSWORD_MAX_LENGTH: usize = 50;

/// Length rules shared by every new-password field.
pub(crate) fn password_rules() -> [Validation; 2] {
    [
        Validation::new(
            Rule::MinLength(PASSWORD_MIN_LENGTH),
            format!("Password is too short (min {PASSWORD_MIN_LENGTH})"),
        ),
        Validation::new(
            Rule::MaxLength(PASSWORD_MAX_LENGTH),
            format!("Password is too long (max {PASSWORD_MAX_LENGTH})"),
        ),
    ]
}

/// Records where the application was asked to go. There is no real router.
#[derive(Clone, Debug)]
pub struct Navigator {
    location: String,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            location: paths::HOME.to_string(),
        }
    }
}

impl Navigator {
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn navigate(&mut self, to: &str) {
        debug!("navigate to {}", to);
        self.location = to.to_string();
    }
}

/// Everything a page needs besides its own state.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub toasts: Toaster,
    pub navigator: Navigator,
    api: ApiClient,
}

impl AppContext {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            session: Arc::clone(api.session()),
            toasts: Toaster::default(),
            navigator: Navigator::default(),
            api,
        }
    }

    #[must_use]
    pub fn account_client(&self) -> AccountClient {
        AccountClient::new(self.api.clone())
    }

    #[must_use]
    pub fn auth_client(&self) -> AuthClient {
        AuthClient::new(self.api.clone())
    }
}

#[derive(Clone, Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked(FormErrors),
    /// A submission is already in flight.
    Busy,
    Succeeded,
    Failed(AppError),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded)
    }
}

/// Validates the form and moves the status to pending.
fn begin<T: DeserializeOwned, S>(
    form: &mut FormState,
    status: &mut Mutation<S>,
) -> Result<T, SubmitOutcome> {
    if status.is_pending() {
        return Err(SubmitOutcome::Busy);
    }
    let request = form.submit_as::<T>().map_err(SubmitOutcome::Blocked)?;
    *status = Mutation::Pending;
    Ok(request)
}

/// Reads a query parameter from an absolute URL or a path with a query.
#[must_use]
pub fn query_param(location: &str, name: &str) -> Option<String> {
    let base = Url::parse("http://localhost").ok()?;
    let url = base.join(location).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
