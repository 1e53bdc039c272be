//! # Page Rendering
//!
//! The rendering collaborator: per-request template data plus one function
//! per page. Kept deliberately plain; layout is not the interesting part
//! of this application, the data that flows into it is. All interpolated
//! user input is HTML-escaped.

use crate::db::models::Snippet;
use crate::error::AppResult;
use crate::forms::{SnippetCreateForm, UserLoginForm, UserSignupForm};
use crate::middleware::auth::AuthState;
use crate::middleware::csrf::CsrfToken;
use crate::session;
use crate::validator::Validator;
use chrono::{Datelike, Utc};
use tower_sessions::Session;

/// Data every rendered page receives, built once per request.
///
/// Mirrors what the middleware pipeline established for this request: the
/// authentication flag from the resolver, the CSRF token from the guard,
/// and the one-shot flash message popped from the session.
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl TemplateData {
    pub async fn new(session: &Session, auth: &AuthState, csrf: &CsrfToken) -> AppResult<Self> {
        Ok(TemplateData {
            current_year: Utc::now().year(),
            flash: session::pop_flash(session).await?,
            is_authenticated: auth.is_authenticated,
            csrf_token: csrf.0.clone(),
        })
    }
}

/// Minimal HTML escaping for interpolated values.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn field_error(validator: &Validator, key: &str) -> String {
    match validator.field_errors.get(key) {
        Some(message) => format!("<label class=\"error\">{}</label>", escape(message)),
        None => String::new(),
    }
}

fn non_field_errors(validator: &Validator) -> String {
    validator
        .non_field_errors
        .iter()
        .map(|message| format!("<div class=\"error\">{}</div>", escape(message)))
        .collect()
}

fn csrf_field(data: &TemplateData) -> String {
    format!(
        "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">",
        escape(&data.csrf_token)
    )
}

/// Base layout shared by every page.
fn base(title: &str, data: &TemplateData, main: &str) -> String {
    let nav = if data.is_authenticated {
        format!(
            "<a href=\"/\">Home</a> <a href=\"/snippet/create\">Create snippet</a>\
             <form action=\"/user/logout\" method=\"POST\">{}<button>Logout</button></form>",
            csrf_field(data)
        )
    } else {
        "<a href=\"/\">Home</a> <a href=\"/user/signup\">Signup</a> <a href=\"/user/login\">Login</a>"
            .to_string()
    };

    let flash = match &data.flash {
        Some(message) => format!("<div class=\"flash\">{}</div>", escape(message)),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<title>{title} - Snipbin</title>\n\
         <link rel=\"stylesheet\" href=\"/static/main.css\">\n</head>\n<body>\n\
         <header><h1><a href=\"/\">Snipbin</a></h1></header>\n\
         <nav>{nav}</nav>\n{flash}\n<main>{main}</main>\n\
         <footer>&copy; {year}</footer>\n</body>\n</html>\n",
        title = escape(title),
        nav = nav,
        flash = flash,
        main = main,
        year = data.current_year,
    )
}

pub fn home_page(data: &TemplateData, snippets: &[Snippet]) -> String {
    let main = if snippets.is_empty() {
        "<p>There's nothing to see here... yet!</p>".to_string()
    } else {
        let rows: String = snippets
            .iter()
            .map(|s| {
                format!(
                    "<tr><td><a href=\"/snippet/view/{id}\">{title}</a></td>\
                     <td>{created}</td><td>#{id}</td></tr>",
                    id = s.id,
                    title = escape(&s.title),
                    created = s.created.format("%d %b %Y at %H:%M"),
                )
            })
            .collect();
        format!(
            "<h2>Latest Snippets</h2>\
             <table><tr><th>Title</th><th>Created</th><th>ID</th></tr>{rows}</table>"
        )
    };
    base("Home", data, &main)
}

pub fn view_page(data: &TemplateData, snippet: &Snippet) -> String {
    let main = format!(
        "<div class=\"snippet\"><div class=\"metadata\"><strong>{title}</strong>\
         <span>#{id}</span></div><pre><code>{content}</code></pre>\
         <div class=\"metadata\"><time>Created: {created}</time>\
         <time>Expires: {expires}</time></div></div>",
        title = escape(&snippet.title),
        id = snippet.id,
        content = escape(&snippet.content),
        created = snippet.created.format("%d %b %Y at %H:%M"),
        expires = snippet.expires.format("%d %b %Y at %H:%M"),
    );
    base(&snippet.title, data, &main)
}

pub fn create_page(data: &TemplateData, form: &SnippetCreateForm) -> String {
    let expires_option = |days: i64, label: &str| {
        let checked = if form.expires == days { " checked" } else { "" };
        format!(
            "<label><input type=\"radio\" name=\"expires\" value=\"{days}\"{checked}> {label}</label>"
        )
    };

    let main = format!(
        "<form action=\"/snippet/create\" method=\"POST\">{csrf}\
         <div><label>Title:</label>{title_error}\
         <input type=\"text\" name=\"title\" value=\"{title}\"></div>\
         <div><label>Content:</label>{content_error}\
         <textarea name=\"content\">{content}</textarea></div>\
         <div><label>Delete in:</label>{expires_error}{one_year}{one_week}{one_day}</div>\
         <div><input type=\"submit\" value=\"Publish snippet\"></div></form>",
        csrf = csrf_field(data),
        title_error = field_error(&form.validator, "title"),
        title = escape(&form.title),
        content_error = field_error(&form.validator, "content"),
        content = escape(&form.content),
        expires_error = field_error(&form.validator, "expires"),
        one_year = expires_option(365, "One Year"),
        one_week = expires_option(7, "One Week"),
        one_day = expires_option(1, "One Day"),
    );
    base("Create a New Snippet", data, &main)
}

pub fn signup_page(data: &TemplateData, form: &UserSignupForm) -> String {
    // The password field is never re-filled.
    let main = format!(
        "<form action=\"/user/signup\" method=\"POST\" novalidate>{csrf}\
         <div><label>Name:</label>{name_error}\
         <input type=\"text\" name=\"name\" value=\"{name}\"></div>\
         <div><label>Email:</label>{email_error}\
         <input type=\"email\" name=\"email\" value=\"{email}\"></div>\
         <div><label>Password:</label>{password_error}\
         <input type=\"password\" name=\"password\"></div>\
         <div><input type=\"submit\" value=\"Signup\"></div></form>",
        csrf = csrf_field(data),
        name_error = field_error(&form.validator, "name"),
        name = escape(&form.name),
        email_error = field_error(&form.validator, "email"),
        email = escape(&form.email),
        password_error = field_error(&form.validator, "password"),
    );
    base("Signup", data, &main)
}

pub fn login_page(data: &TemplateData, form: &UserLoginForm) -> String {
    let main = format!(
        "<form action=\"/user/login\" method=\"POST\" novalidate>{csrf}{non_field}\
         <div><label>Email:</label>{email_error}\
         <input type=\"email\" name=\"email\" value=\"{email}\"></div>\
         <div><label>Password:</label>{password_error}\
         <input type=\"password\" name=\"password\"></div>\
         <div><input type=\"submit\" value=\"Login\"></div></form>",
        csrf = csrf_field(data),
        non_field = non_field_errors(&form.validator),
        email_error = field_error(&form.validator, "email"),
        email = escape(&form.email),
        password_error = field_error(&form.validator, "password"),
    );
    base("Login", data, &main)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> TemplateData {
        TemplateData {
            current_year: 2026,
            flash: None,
            is_authenticated: false,
            csrf_token: "token123".to_string(),
        }
    }

    #[test]
    fn user_input_is_escaped() {
        let mut form = SnippetCreateForm::default();
        form.title = "<script>alert(1)</script>".to_string();

        let html = create_page(&data(), &form);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn forms_embed_the_csrf_token() {
        let html = login_page(&data(), &UserLoginForm::default());
        assert!(html.contains("name=\"csrf_token\" value=\"token123\""));
    }

    #[test]
    fn flash_renders_when_present() {
        let mut d = data();
        d.flash = Some("Snippet successfully created!".to_string());
        let html = home_page(&d, &[]);
        assert!(html.contains("Snippet successfully created!"));
    }
}
