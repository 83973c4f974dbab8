//! Form interaction handlers.
//!
//! Covers the auth modal (login/register views, password visibility, social
//! and forgot-password links) and the contact and newsletter forms. Nothing is
//! sent anywhere: submissions are logged and acknowledged with a notification.

use std::fmt;

use askama::Template;
use phonehub_core::{FormView, Password, SocialProvider};
use serde::Deserialize;
use tracing::instrument;

use crate::elements;
use crate::error::{AppError, Result};
use crate::state::{Page, PageState};
use crate::surface::{StyleProperty, Surface, VisualState};
use crate::templates::LoggedInTemplate;

use super::notify::Notification;

/// Auth modal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthState {
    pub view: FormView,
    pub modal_open: bool,
    pub logged_in: bool,
}

/// Login form data.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Registration form data.
#[derive(Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Newsletter signup form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
}

const LOGGED_IN_GREETING: &str = "Xin chào";

impl<S: Surface> Page<S> {
    /// Visible auth form.
    #[must_use]
    pub fn form_view(&self) -> FormView {
        self.with_state(|state| state.auth.view)
    }

    /// Whether the visitor has signed in on this page.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.with_state(|state| state.auth.logged_in)
    }

    /// Whether the auth modal is open.
    #[must_use]
    pub fn is_auth_modal_open(&self) -> bool {
        self.with_state(|state| state.auth.modal_open)
    }

    /// Open the auth modal on the login view.
    #[instrument(skip(self))]
    pub fn open_auth_modal(&self) {
        self.with_state(|state| {
            state.auth.modal_open = true;
            state
                .surface
                .set_state(elements::AUTH_MODAL, VisualState::Active, true);
            state
                .surface
                .set_style(elements::BODY, StyleProperty::Overflow, "hidden");
            Self::show_form(state, FormView::Login);
        });
    }

    /// Close the auth modal (close button or overlay click).
    #[instrument(skip(self))]
    pub fn close_auth_modal(&self) {
        self.with_state(|state| Self::close_modal(state));
    }

    /// A key was pressed anywhere on the page.
    pub fn press_key(&self, key: &str) {
        if key == "Escape" {
            self.with_state(|state| {
                if state.auth.modal_open {
                    Self::close_modal(state);
                }
            });
        }
    }

    /// Switch-form link clicked.
    #[instrument(skip(self))]
    pub fn switch_form(&self, view: FormView) {
        self.with_state(|state| Self::show_form(state, view));
    }

    /// Show or hide the password in `field`. Returns whether it is now visible.
    #[instrument(skip(self))]
    pub fn toggle_password_visibility(&self, field: &str) -> bool {
        self.with_state(|state| {
            let hidden = state
                .surface
                .attribute(field, "type")
                .is_none_or(|t| t == "password");
            let next = if hidden { "text" } else { "password" };
            state.surface.set_attribute(field, "type", next);
            state.surface.set_state(
                &elements::password_toggle(field),
                VisualState::Active,
                hidden,
            );
            hidden
        })
    }

    /// Login form submitted. Any credentials are accepted.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn submit_login(&self, form: &LoginForm) -> Result<()> {
        let markup = LoggedInTemplate {
            greeting: LOGGED_IN_GREETING,
        }
        .render()?;

        self.with_state(|state| {
            tracing::info!(remember_me = form.remember_me, "visitor logged in");
            self.emit(
                state,
                Notification::success("Đăng nhập thành công! Chào mừng bạn quay trở lại."),
            );
            state.auth.logged_in = true;
            state.surface.set_markup(elements::LOGIN_BUTTON, &markup);
            Self::close_modal(state);
            state.surface.reset_form(elements::LOGIN_FORM);
        });
        Ok(())
    }

    /// Register form submitted.
    ///
    /// The password must match its confirmation and be long enough; otherwise
    /// an error notification is shown and nothing else changes. On success the
    /// login view is shown after a delay with a prompt to sign in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Password` if validation fails.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn submit_register(&self, form: &RegisterForm) -> Result<()> {
        self.with_state(|state| {
            let password = match Password::confirm(&form.password, &form.confirm_password) {
                Ok(password) => password,
                Err(e) => {
                    let err = AppError::from(e);
                    self.emit_error(state, &err);
                    return Err(err);
                }
            };

            tracing::info!(
                name = %form.name,
                phone = %form.phone,
                password_len = password.len(),
                "visitor registered"
            );
            self.emit(
                state,
                Notification::success("Đăng ký thành công! Chào mừng bạn đến với PhoneHub."),
            );
            state.surface.reset_form(elements::REGISTER_FORM);

            let delay = self.config().timings.register_switch_delay;
            let page = self.clone();
            self.spawn(async move {
                tokio::time::sleep(delay).await;
                page.with_state(|state| {
                    Self::show_form(state, FormView::Login);
                    page.emit(state, Notification::info("Vui lòng đăng nhập để tiếp tục."));
                });
            });
            Ok(())
        })
    }

    /// Social sign-in button clicked.
    #[instrument(skip(self))]
    pub fn social_login(&self, provider: SocialProvider) {
        self.with_state(|state| {
            self.emit(
                state,
                Notification::info(format!("Đang kết nối với {provider}...")),
            );
        });
    }

    /// Forgot-password link clicked with the login email field's value.
    #[instrument(skip(self))]
    pub fn forgot_password(&self, email: &str) {
        self.with_state(|state| {
            let notification = if email.trim().is_empty() {
                Notification::info("Vui lòng nhập email để khôi phục mật khẩu.")
            } else {
                tracing::info!("password reset requested");
                Notification::success("Link khôi phục mật khẩu đã được gửi đến email của bạn.")
            };
            self.emit(state, notification);
        });
    }

    /// Contact form submitted.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn submit_contact(&self, form: &ContactForm) {
        self.with_state(|state| {
            tracing::info!(name = %form.name, subject = %form.subject, "contact message received");
            self.emit(
                state,
                Notification::success("Cảm ơn bạn đã liên hệ! Chúng tôi sẽ phản hồi sớm nhất."),
            );
            state.surface.reset_form(elements::CONTACT_FORM);
        });
    }

    /// Newsletter form submitted.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn submit_newsletter(&self, form: &NewsletterForm) {
        self.with_state(|state| {
            tracing::info!("newsletter signup");
            self.emit(
                state,
                Notification::success("Đăng ký thành công! Cảm ơn bạn đã quan tâm."),
            );
            state.surface.reset_form(elements::NEWSLETTER_FORM);
        });
    }

    fn close_modal(state: &mut PageState<S>) {
        state.auth.modal_open = false;
        state
            .surface
            .set_state(elements::AUTH_MODAL, VisualState::Active, false);
        state
            .surface
            .clear_style(elements::BODY, StyleProperty::Overflow);
    }

    /// Show exactly one of the two auth forms.
    fn show_form(state: &mut PageState<S>, view: FormView) {
        state.auth.view = view;
        let (login, register) = match view {
            FormView::Login => ("block", "none"),
            FormView::Register => ("none", "block"),
        };
        state
            .surface
            .set_style(elements::LOGIN_FORM, StyleProperty::Display, login);
        state
            .surface
            .set_style(elements::REGISTER_FORM, StyleProperty::Display, register);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use phonehub_core::PasswordError;
    use tokio::time::sleep;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::handlers::scroll::ViewportState;
    use crate::layout::PageLayout;
    use crate::surface::{MemorySurface, TransientSnapshot};

    fn page() -> Page<MemorySurface> {
        Page::load(
            MemorySurface::new(),
            StorefrontConfig::default(),
            PageLayout::phonehub(),
            ViewportState::at_top(800.0),
        )
    }

    fn notifications(page: &Page<MemorySurface>) -> Vec<TransientSnapshot> {
        page.inspect(|s| s.transients_in(elements::BODY).cloned().collect())
    }

    fn register(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: "Lan".to_string(),
            email: "lan@example.com".to_string(),
            phone: String::new(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn display(page: &Page<MemorySurface>, form: &str) -> Option<String> {
        page.inspect(|s| s.style(form, StyleProperty::Display).map(String::from))
    }

    #[tokio::test(start_paused = true)]
    async fn test_modal_opens_on_login_view() {
        let page = page();
        page.switch_form(FormView::Register);
        page.open_auth_modal();

        assert!(page.is_auth_modal_open());
        assert_eq!(page.form_view(), FormView::Login);
        assert_eq!(display(&page, elements::LOGIN_FORM).as_deref(), Some("block"));
        assert_eq!(display(&page, elements::REGISTER_FORM).as_deref(), Some("none"));
        assert_eq!(
            page.inspect(|s| s.style(elements::BODY, StyleProperty::Overflow).map(String::from)),
            Some("hidden".to_string())
        );

        page.press_key("Enter");
        assert!(page.is_auth_modal_open());
        page.press_key("Escape");
        assert!(!page.is_auth_modal_open());
        assert_eq!(
            page.inspect(|s| s.style(elements::BODY, StyleProperty::Overflow).map(String::from)),
            None
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_form_is_exclusive() {
        let page = page();
        page.switch_form(FormView::Register);
        assert_eq!(display(&page, elements::LOGIN_FORM).as_deref(), Some("none"));
        assert_eq!(display(&page, elements::REGISTER_FORM).as_deref(), Some("block"));
        page.switch_form(FormView::Register.other());
        assert_eq!(page.form_view(), FormView::Login);
        assert_eq!(display(&page, elements::REGISTER_FORM).as_deref(), Some("none"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_mismatch() {
        let page = page();
        page.switch_form(FormView::Register);

        let err = page.submit_register(&register("secret1", "secret2")).unwrap_err();
        assert!(matches!(err, AppError::Password(PasswordError::Mismatch)));

        let shown = notifications(&page);
        assert_eq!(shown.len(), 1);
        assert!(shown[0].markup.contains("notification-error"));
        assert!(shown[0].markup.contains("Mật khẩu xác nhận không khớp!"));
        assert_eq!(page.inspect(|s| s.resets(elements::REGISTER_FORM)), 0);

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(page.form_view(), FormView::Register);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_too_short() {
        let page = page();
        let err = page.submit_register(&register("abc", "abc")).unwrap_err();
        assert!(matches!(err, AppError::Password(PasswordError::TooShort { min: 6 })));
        assert!(notifications(&page)[0].markup.contains("ít nhất 6 ký tự"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_success_switches_to_login_later() {
        let page = page();
        page.switch_form(FormView::Register);
        page.submit_register(&register("secret1", "secret1")).unwrap();

        let shown = notifications(&page);
        assert_eq!(shown.len(), 1);
        assert!(shown[0].markup.contains("notification-success"));
        assert_eq!(page.inspect(|s| s.resets(elements::REGISTER_FORM)), 1);

        sleep(Duration::from_millis(1900)).await;
        assert_eq!(page.form_view(), FormView::Register);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(page.form_view(), FormView::Login);
        let shown = notifications(&page);
        assert_eq!(shown.len(), 2);
        assert!(shown[1].markup.contains("notification-info"));
        assert!(shown[1].markup.contains("Vui lòng đăng nhập để tiếp tục."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_accepts_anything() {
        let page = page();
        page.open_auth_modal();
        page.submit_login(&LoginForm::default()).unwrap();

        assert!(page.is_logged_in());
        assert!(!page.is_auth_modal_open());
        assert!(
            page.inspect(|s| s.markup(elements::LOGIN_BUTTON).map(String::from))
                .unwrap()
                .contains("Xin chào")
        );
        assert_eq!(page.inspect(|s| s.resets(elements::LOGIN_FORM)), 1);
        assert!(notifications(&page)[0].markup.contains("Đăng nhập thành công!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_visibility_toggle() {
        let page = page();
        assert!(page.toggle_password_visibility("login-password"));
        assert_eq!(
            page.inspect(|s| s.attribute("login-password", "type")),
            Some("text".to_string())
        );
        assert!(page.inspect(|s| s.has_state("login-password-toggle", VisualState::Active)));
        assert!(!page.toggle_password_visibility("login-password"));
        assert_eq!(
            page.inspect(|s| s.attribute("login-password", "type")),
            Some("password".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_forgot_password() {
        let page = page();
        page.forgot_password("  ");
        page.forgot_password("lan@example.com");
        let shown = notifications(&page);
        assert!(shown[0].markup.contains("notification-info"));
        assert!(shown[1].markup.contains("notification-success"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_social_and_simple_forms() {
        let page = page();
        page.social_login(SocialProvider::Google);
        page.submit_contact(&ContactForm::default());
        page.submit_newsletter(&NewsletterForm::default());

        let shown = notifications(&page);
        assert!(shown[0].markup.contains("Đang kết nối với Google..."));
        assert!(shown[1].markup.contains("Cảm ơn bạn đã liên hệ!"));
        assert!(shown[2].markup.contains("Cảm ơn bạn đã quan tâm."));
        assert_eq!(page.inspect(|s| s.resets(elements::CONTACT_FORM)), 1);
        assert_eq!(page.inspect(|s| s.resets(elements::NEWSLETTER_FORM)), 1);
    }

    #[test]
    fn test_register_form_debug_hides_passwords() {
        let debug = format!("{:?}", register("hunter22", "hunter22"));
        assert!(!debug.contains("hunter22"));
    }
}
