pub mod assets;
pub mod insights;
pub mod predictor;

use askama::Template;
use axum::http::HeaderMap;
use axum::response::Html;

use crate::WebError;

/// Check if the request comes from HTMX (has HX-Request header).
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}

/// Sidebar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Predictor,
    Insights,
}

impl View {
    pub const ALL: [View; 2] = [View::Predictor, View::Insights];

    pub fn path(self) -> &'static str {
        match self {
            Self::Predictor => "/predictor",
            Self::Insights => "/insights",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Predictor => "Investment Predictor",
            Self::Insights => "Insights Dashboard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Predictor => "🏡",
            Self::Insights => "📊",
        }
    }
}

struct NavItem {
    path: &'static str,
    title: &'static str,
    icon: &'static str,
    active: bool,
}

#[derive(Template)]
#[template(path = "shell.html")]
struct ShellTemplate<'a> {
    title: &'static str,
    nav: Vec<NavItem>,
    content: &'a str,
}

/// Wrap fragment HTML in the page shell unless HTMX asked for the fragment.
pub fn page(headers: &HeaderMap, active: View, content: String) -> Result<Html<String>, WebError> {
    if is_htmx(headers) {
        return Ok(Html(content));
    }
    let nav = View::ALL
        .into_iter()
        .map(|view| NavItem {
            path: view.path(),
            title: view.title(),
            icon: view.icon(),
            active: view == active,
        })
        .collect();
    let shell = ShellTemplate {
        title: active.title(),
        nav,
        content: &content,
    };
    Ok(Html(shell.render()?))
}
