//! Plotly figure specs for the insights page.
//!
//! A figure is the `{ "data": [...], "layout": {...} }` document that
//! `Plotly.newPlot` accepts; the page embeds it as JSON.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::aggregate::{CityMetric, ScatterPoint, TypeDistribution};

/// Default continuous colour scale for value-coloured bars.
const COLOR_SCALE: &str = "Plasma";

/// Qualitative palette cycled across categories.
const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl ChartSpec {
    /// JSON safe to inline inside a `<script>` element.
    pub fn to_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

fn layout(title: Option<&str>, x: &str, y: &str) -> Value {
    let mut layout = json!({
        "xaxis": { "title": { "text": x } },
        "yaxis": { "title": { "text": y } },
        "margin": { "t": 60, "l": 60, "r": 30, "b": 60 },
        "legend": { "title": { "text": "" } },
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
    });
    if let Some(title) = title {
        layout["title"] = json!({ "text": title });
    }
    layout
}

fn value_bar(metrics: &[CityMetric], value_label: &str) -> Value {
    let cities: Vec<&str> = metrics.iter().map(|m| m.city.as_str()).collect();
    let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
    json!({
        "type": "bar",
        "x": cities,
        "y": values,
        "marker": {
            "color": values,
            "colorscale": COLOR_SCALE,
            "showscale": true,
            "colorbar": { "title": { "text": value_label } },
        },
        "hovertemplate": format!("City=%{{x}}<br>{value_label}=%{{y}}<extra></extra>"),
    })
}

pub fn city_price_chart(metrics: &[CityMetric], limit: usize) -> ChartSpec {
    let title = format!("Top {limit} Cities by Current Price");
    ChartSpec {
        data: vec![value_bar(metrics, "Price_in_Lakhs")],
        layout: layout(Some(&title), "City", "Price_in_Lakhs"),
    }
}

pub fn growth_chart(metrics: &[CityMetric]) -> ChartSpec {
    ChartSpec {
        data: vec![value_bar(metrics, "Growth_Rate")],
        layout: layout(None, "City", "Growth_Rate"),
    }
}

/// One box per property type.
pub fn type_box_chart(distributions: &[TypeDistribution]) -> ChartSpec {
    let data = distributions
        .iter()
        .enumerate()
        .map(|(i, d)| {
            json!({
                "type": "box",
                "name": d.property_type,
                "x": vec![d.property_type.as_str(); d.values.len()],
                "y": d.values,
                "marker": { "color": PALETTE[i % PALETTE.len()] },
                "offsetgroup": d.property_type,
            })
        })
        .collect();

    let mut layout = layout(None, "Property_Type", "Future_Price_5Y");
    layout["boxmode"] = json!("overlay");
    layout["legend"]["title"]["text"] = json!("Property_Type");
    ChartSpec { data, layout }
}

/// One marker trace per city, cities in order of first appearance.
pub fn amenities_scatter_chart(points: &[ScatterPoint], opacity: f64) -> ChartSpec {
    let mut order: Vec<&str> = Vec::new();
    let mut series: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for p in points {
        let entry = series.entry(p.city.as_str()).or_insert_with(|| {
            order.push(p.city.as_str());
            (Vec::new(), Vec::new())
        });
        entry.0.push(p.amenities);
        entry.1.push(p.future_price);
    }

    let data = order
        .iter()
        .enumerate()
        .filter_map(|(i, city)| {
            let (x, y) = series.remove(city)?;
            Some(json!({
                "type": "scatter",
                "mode": "markers",
                "name": city,
                "x": x,
                "y": y,
                "opacity": opacity,
                "marker": { "color": PALETTE[i % PALETTE.len()] },
            }))
        })
        .collect();

    let mut layout = layout(None, "Amenities_Count", "Future_Price_5Y");
    layout["legend"]["title"]["text"] = json!("City");
    ChartSpec { data, layout }
}
