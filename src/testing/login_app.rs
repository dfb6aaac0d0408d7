use super::mock_driver::{MockDriver, MockPage};
use crate::pages::{dashboard, login};
use crate::suites::login::{VALID_EMAIL, VALID_PASSWORD};

const LOGIN_HTML: &str = r#"
<main>
  <h1>Login</h1>
  <form action="/login" method="post">
    <input name="email" type="email" required>
    <input name="password" type="password" required>
    <button type="submit">Sign in</button>
  </form>
  <div data-testid="error-message" hidden></div>
  <div data-testid="success-message" hidden></div>
</main>
"#;

const LOGIN_FAILED_HTML: &str = r#"
<main>
  <h1>Login</h1>
  <form action="/login" method="post">
    <input name="email" type="email" required>
    <input name="password" type="password" required>
    <button type="submit">Sign in</button>
  </form>
  <div data-testid="error-message" role="alert">Invalid email or password</div>
  <div data-testid="success-message" hidden></div>
</main>
"#;

const DASHBOARD_HTML: &str = r#"
<header>
  <h1 data-testid="welcome-title">Welcome back, user@example.com</h1>
  <button data-testid="user-menu">Account</button>
  <nav>
    <a data-testid="profile-link" href="/profile">Profile</a>
  </nav>
  <button data-testid="logout-btn">Log out</button>
</header>
"#;

const PROFILE_HTML: &str = r#"<h1>Profile</h1>"#;

fn submit(page: &mut MockPage) {
    let accepted = page.value(login::locators::EMAIL_INPUT) == Some(VALID_EMAIL)
        && page.value(login::locators::PASSWORD_INPUT) == Some(VALID_PASSWORD);

    if accepted {
        let _ = page.load(dashboard::PATH);
    } else {
        page.set_html(LOGIN_FAILED_HTML);
    }
}

impl MockDriver {
    /// In-memory stand-in for the application under test: a login form that
    /// accepts one account and redirects to a dashboard with logout.
    pub fn login_app() -> Self {
        MockDriver::blank()
            .with_route(login::PATH, LOGIN_HTML)
            .with_route(dashboard::PATH, DASHBOARD_HTML)
            .with_route("/profile", PROFILE_HTML)
            .on_click(login::locators::LOGIN_BUTTON, submit)
            .on_click(dashboard::locators::LOGOUT_BUTTON, |page| {
                let _ = page.load(login::PATH);
            })
            .on_click(dashboard::locators::PROFILE_LINK, |page| {
                let _ = page.load("/profile");
            })
    }
}
