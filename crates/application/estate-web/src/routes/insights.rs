use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use estate_insights::{InsightView, TypeDistribution};

use crate::routes::{page, View};
use crate::{AppState, WebError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/insights", get(insights_page))
}

/// One chart card.
struct ChartCard {
    id: &'static str,
    heading: String,
    figure: String,
}

#[derive(Template)]
#[template(path = "insights.html")]
struct InsightsTemplate {
    charts: Vec<ChartCard>,
    distributions: Vec<TypeDistribution>,
}

async fn insights_page(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    let view = InsightView::compute(&state.dataset, &state.insight_limits);
    let figures = view.charts();

    let charts = vec![
        ChartCard {
            id: "chart-city-price",
            heading: "🏙️ Average Current Price by City".into(),
            figure: figures.city_prices.to_json()?,
        },
        ChartCard {
            id: "chart-growth",
            heading: format!(
                "📈 Top {} Most Appreciating Cities",
                state.insight_limits.growth_limit
            ),
            figure: figures.top_growth.to_json()?,
        },
        ChartCard {
            id: "chart-type-price",
            heading: "🏢 Property Type vs Future Price".into(),
            figure: figures.type_distributions.to_json()?,
        },
        ChartCard {
            id: "chart-amenities",
            heading: "🎛️ Amenities Count vs Future Price".into(),
            figure: figures.scatter.to_json()?,
        },
    ];

    let content = InsightsTemplate {
        charts,
        distributions: view.type_distributions,
    }
    .render()?;
    page(&headers, View::Insights, content)
}
