//! HTML pages.
//!
//! Templates are embedded at compile time and filled with `{{KEY}}`
//! placeholders in a single pass, so substituted text is never rescanned.
//! Every user-controlled value is HTML-escaped before substitution.

use axum::response::Html;

use crate::flash::Flash;
use crate::services::account::SessionUser;

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.html");
const HOME_TEMPLATE: &str = include_str!("../templates/home.html");
const REGISTER_TEMPLATE: &str = include_str!("../templates/register.html");
const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");

const GUEST_NAV: &str =
    r#"<a href="/">Home</a><a href="/users/register">Register</a><a href="/users/login">Log in</a>"#;
const MEMBER_NAV: &str =
    r#"<a href="/">Home</a><a href="/users/dashboard">Dashboard</a><a href="/users/logout">Log out</a>"#;

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace `{{KEY}}` placeholders. Unknown keys are left as-is.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn flash_html(flash: Option<&Flash>) -> String {
    flash.map_or_else(String::new, |f| {
        format!(r#"<div class="flash flash-{}" role="alert">{}</div>"#, f.kind.as_str(), escape_html(&f.message))
    })
}

fn page(title: &str, nav: &str, flash: Option<&Flash>, body: &str) -> Html<String> {
    Html(fill(
        LAYOUT_TEMPLATE,
        &[("TITLE", title), ("NAV", nav), ("FLASH", &flash_html(flash)), ("BODY", body)],
    ))
}

#[must_use]
pub fn home(flash: Option<&Flash>, user: Option<&SessionUser>) -> Html<String> {
    let (nav, greeting) = match user {
        Some(user) => (MEMBER_NAV, format!("Signed in as {}.", escape_html(&user.username))),
        None => (GUEST_NAV, "Register or log in to reach your dashboard.".to_owned()),
    };
    page("Home", nav, flash, &fill(HOME_TEMPLATE, &[("GREETING", &greeting)]))
}

#[must_use]
pub fn register_form(flash: Option<&Flash>) -> Html<String> {
    page("Register", GUEST_NAV, flash, REGISTER_TEMPLATE)
}

#[must_use]
pub fn login_form(flash: Option<&Flash>) -> Html<String> {
    page("Log in", GUEST_NAV, flash, LOGIN_TEMPLATE)
}

#[must_use]
pub fn dashboard(flash: Option<&Flash>, username: &str) -> Html<String> {
    let body = fill(DASHBOARD_TEMPLATE, &[("USERNAME", &escape_html(username))]);
    page("Dashboard", MEMBER_NAV, flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn fill_replaces_known_and_keeps_unknown() {
        assert_eq!(fill("a {{X}} b {{Y}} c", &[("X", "1")]), "a 1 b {{Y}} c");
    }

    #[test]
    fn fill_does_not_rescan_substituted_text() {
        assert_eq!(fill("{{A}}{{B}}", &[("A", "{{B}}"), ("B", "2")]), "{{B}}2");
    }

    #[test]
    fn fill_handles_unterminated_placeholder() {
        assert_eq!(fill("x {{OPEN", &[("OPEN", "no")]), "x {{OPEN");
    }

    #[test]
    fn dashboard_escapes_username() {
        let Html(body) = dashboard(None, "<b>alice</b>");
        assert!(body.contains("&lt;b&gt;alice&lt;/b&gt;"));
        assert!(!body.contains("<b>alice</b>"));
    }

    #[test]
    fn flash_is_rendered_with_kind_class() {
        let Html(body) = login_form(Some(&Flash::error("Invalid email or password.")));
        assert!(body.contains(r#"class="flash flash-error""#));
        assert!(body.contains("Invalid email or password."));
    }

    #[test]
    fn pages_without_flash_have_no_alert() {
        let Html(body) = register_form(None);
        assert!(!body.contains("role=\"alert\""));
        assert!(body.contains(r#"name="confirmationPassword""#));
    }

    #[test]
    fn home_greets_signed_in_user() {
        let user = SessionUser { id: uuid::Uuid::nil(), email: "a@b.com".into(), username: "alice".into() };
        let Html(body) = home(None, Some(&user));
        assert!(body.contains("Signed in as alice."));
        assert!(body.contains("/users/logout"));

        let Html(body) = home(None, None);
        assert!(body.contains("/users/register"));
    }
}
