//! Integration tests for the auth modal and the registration flow.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use phonehub_core::FormView;
use phonehub_integration_tests::{notifications, phonehub_page};
use phonehub_storefront::{AppError, LoginForm, RegisterForm, Surface, VisualState, elements};
use tokio::time::sleep;

fn register_form(password: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        name: "Nguyễn Văn An".to_string(),
        email: "an@example.com".to_string(),
        phone: "0901234567".to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_register_mismatch_changes_nothing() {
    let page = phonehub_page();
    page.open_auth_modal();
    page.switch_form(FormView::Register);

    let result = page.submit_register(&register_form("secret1", "secret2"));
    assert!(matches!(result, Err(AppError::Password(_))));

    let shown = notifications(&page);
    assert_eq!(shown.len(), 1);
    assert!(shown[0].markup.contains("notification-error"));
    assert!(shown[0].markup.contains("Mật khẩu xác nhận không khớp!"));

    assert_eq!(page.form_view(), FormView::Register);
    assert!(page.is_auth_modal_open());
    assert_eq!(page.inspect(|s| s.resets(elements::REGISTER_FORM)), 0);

    // no delayed switch was scheduled
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(page.form_view(), FormView::Register);
}

#[tokio::test(start_paused = true)]
async fn test_register_short_password_counts_characters() {
    let page = phonehub_page();
    page.switch_form(FormView::Register);

    assert!(page.submit_register(&register_form("mật5", "mật5")).is_err());
    assert!(notifications(&page)[0].markup.contains("ít nhất 6 ký tự"));

    // six characters, more than six bytes
    assert!(page.submit_register(&register_form("mậtkhẩ", "mậtkhẩ")).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_register_success_switches_to_login_later() {
    let page = phonehub_page();
    page.open_auth_modal();
    page.switch_form(FormView::Register);

    page.submit_register(&register_form("secret1", "secret1")).unwrap();
    assert_eq!(page.inspect(|s| s.resets(elements::REGISTER_FORM)), 1);
    assert_eq!(page.form_view(), FormView::Register);
    assert!(notifications(&page)[0].markup.contains("notification-success"));

    sleep(Duration::from_millis(1900)).await;
    assert_eq!(page.form_view(), FormView::Register);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(page.form_view(), FormView::Login);
    let shown = notifications(&page);
    assert_eq!(shown.len(), 2);
    assert!(shown[1].markup.contains("notification-info"));
    assert!(shown[1].markup.contains("Vui lòng đăng nhập để tiếp tục."));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_login_replaces_button_and_closes_modal() {
    let page = phonehub_page();
    page.open_auth_modal();
    assert!(page.inspect(|s| s.has_state(elements::AUTH_MODAL, VisualState::Active)));

    page.submit_login(&LoginForm {
        email: "an@example.com".to_string(),
        password: "anything".to_string(),
        remember_me: true,
    })
    .unwrap();

    assert!(page.is_logged_in());
    assert!(!page.is_auth_modal_open());
    assert!(!page.inspect(|s| s.has_state(elements::AUTH_MODAL, VisualState::Active)));
    assert!(
        page.inspect(|s| s.markup(elements::LOGIN_BUTTON).map(String::from))
            .unwrap()
            .contains("Xin chào")
    );
    assert_eq!(page.inspect(|s| s.resets(elements::LOGIN_FORM)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_escape_closes_modal() {
    let page = phonehub_page();
    page.open_auth_modal();
    page.press_key("Enter");
    assert!(page.is_auth_modal_open());
    page.press_key("Escape");
    assert!(!page.is_auth_modal_open());
}
