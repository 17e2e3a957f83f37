use std::sync::Arc;

use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/static/style.css", get(style_css))
}

async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLE_CSS)
}

/// CSS styles
pub const STYLE_CSS: &str = r#"
:root {
    --bg: #f5f7fa;
    --sidebar: #ffffff;
    --text: #1f2937;
    --muted: #6b7280;
    --accent: #4C7EFF;
    --accent-2: #6A5BFF;
    --good: #20c951;
    --bad: #ff4b4b;
}

* {
    box-sizing: border-box;
}

body {
    margin: 0;
    display: flex;
    min-height: 100vh;
    font-family: "Source Sans Pro", -apple-system, "Segoe UI", Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
}

/* Sidebar */
.sidebar {
    width: 260px;
    flex-shrink: 0;
    padding: 24px 16px;
    background: var(--sidebar);
    border-right: 1px solid #e5e7eb;
}

.sidebar-title {
    margin: 0 0 12px;
    font-size: 1.3rem;
}

.sidebar-caption {
    margin: 0 0 8px;
    color: var(--muted);
    font-size: 0.9rem;
}

.nav-links {
    list-style: none;
    margin: 0;
    padding: 0;
}

.nav-links a {
    display: block;
    padding: 10px 12px;
    border-radius: 8px;
    color: var(--text);
    text-decoration: none;
}

.nav-links a:hover {
    background: #eef3ff;
}

.nav-links a.active {
    background: #eef3ff;
    color: var(--accent);
    font-weight: 600;
}

main {
    flex: 1;
    padding: 32px 48px;
    max-width: 1200px;
}

/* Page header */
.header {
    padding: 25px;
    color: white;
    text-align: center;
    border-radius: 12px;
    background: linear-gradient(90deg, var(--accent), var(--accent-2));
    margin-bottom: 20px;
}

.header h1 {
    margin: 0 0 8px;
}

.header p {
    margin: 0;
}

.card {
    background: rgba(255, 255, 255, 0.8);
    backdrop-filter: blur(10px);
    padding: 25px;
    border-radius: 18px;
    box-shadow: 0 4px 20px rgba(0, 0, 0, 0.08);
    margin-bottom: 20px;
}

.card h2 {
    margin-top: 0;
}

/* Form */
.columns {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 32px;
}

.field {
    margin-bottom: 16px;
}

.field label {
    display: block;
    margin-bottom: 6px;
    font-size: 0.9rem;
}

.field select,
.field input[type="number"] {
    width: 100%;
    padding: 8px 10px;
    border: 1px solid #d1d5db;
    border-radius: 8px;
    background: white;
    font-size: 1rem;
}

.slider {
    display: flex;
    align-items: center;
    gap: 12px;
}

.slider input {
    flex: 1;
    accent-color: var(--bad);
}

.predict-button {
    width: 100%;
    margin-top: 12px;
    padding: 12px;
    border: 1px solid #d1d5db;
    border-radius: 8px;
    background: white;
    font-size: 1rem;
    cursor: pointer;
}

.predict-button:hover {
    border-color: var(--bad);
    color: var(--bad);
}

/* Results */
.result-good {
    background: #e1f7e7;
    padding: 20px;
    border-left: 6px solid var(--good);
    border-radius: 12px;
    margin-bottom: 16px;
}

.result-bad {
    background: #ffe5e5;
    padding: 20px;
    border-left: 6px solid var(--bad);
    border-radius: 12px;
    margin-bottom: 16px;
}

.result-price {
    background: #eef3ff;
    padding: 20px;
    border-left: 6px solid var(--accent);
    border-radius: 12px;
}

.result-error {
    background: #fff4e5;
    padding: 20px;
    border-left: 6px solid #ffa421;
    border-radius: 12px;
}

/* Insights */
.chart {
    width: 100%;
    min-height: 450px;
}

.summary {
    width: 100%;
    margin-top: 12px;
    border-collapse: collapse;
    font-size: 0.9rem;
}

.summary th,
.summary td {
    padding: 6px 10px;
    border-bottom: 1px solid #e5e7eb;
    text-align: right;
}

.summary th:first-child,
.summary td:first-child {
    text-align: left;
}

@media (max-width: 900px) {
    body {
        flex-direction: column;
    }

    .sidebar {
        width: 100%;
    }

    .columns {
        grid-template-columns: 1fr;
    }
}
"#;
