// src/templates/components/chart.rs

use maud::{html, Markup, PreEscaped};
use serde::Serialize;
use serde_json::Value;

/// One Plotly trace. Serialized straight into the inline `newPlot` call;
/// the JS library does the actual drawing. The x axis takes either date
/// labels or plain numbers, so `x` holds raw JSON values.
#[derive(Debug, Serialize)]
pub struct Trace {
    pub x: Vec<Value>,
    pub y: Vec<f64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct LineStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct MarkerStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

fn labels(x: Vec<String>) -> Vec<Value> {
    x.into_iter().map(Value::from).collect()
}

impl Trace {
    pub fn scatter(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Trace {
        Trace {
            x: labels(x),
            y,
            name: name.into(),
            kind: "scatter",
            mode: Some("markers"),
            line: None,
            marker: None,
            text: None,
            textposition: None,
        }
    }

    /// Scatter against a numeric axis (dollar amounts rather than date
    /// labels), so Plotly lays the points out linearly instead of as
    /// categories.
    pub fn numeric_scatter(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Trace {
        Trace {
            x: x.into_iter().map(Value::from).collect(),
            y,
            name: name.into(),
            kind: "scatter",
            mode: Some("markers"),
            line: None,
            marker: None,
            text: None,
            textposition: None,
        }
    }

    pub fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Trace {
        Trace {
            x: labels(x),
            y,
            name: name.into(),
            kind: "scatter",
            mode: Some("lines"),
            line: None,
            marker: None,
            text: None,
            textposition: None,
        }
    }

    pub fn bar(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Trace {
        Trace {
            x: labels(x),
            y,
            name: name.into(),
            kind: "bar",
            mode: None,
            line: None,
            marker: None,
            text: None,
            textposition: None,
        }
    }

    pub fn colored(mut self, color: &str) -> Trace {
        if self.kind == "bar" || self.mode == Some("markers") {
            self.marker = Some(MarkerStyle {
                color: color.to_string(),
                size: None,
            });
        } else {
            self.line = Some(LineStyle {
                color: color.to_string(),
                dash: None,
            });
        }
        self
    }

    /// Attach per-point labels (price annotations on the small multiples).
    pub fn labeled(mut self, text: Vec<String>) -> Trace {
        self.text = Some(text);
        self.mode = Some("lines+markers+text");
        self.textposition = Some("top center");
        self
    }

    pub fn dashed(mut self) -> Trace {
        let color = self
            .line
            .take()
            .map(|l| l.color)
            .unwrap_or_else(|| "#64748b".to_string());
        self.line = Some(LineStyle {
            color,
            dash: Some("dash"),
        });
        self
    }
}

/// A chart section: a target div plus the inline Plotly call with the
/// traces serialized as JSON.
pub fn chart(id: &str, title: &str, traces: &[Trace]) -> Markup {
    let data = serde_json::to_string(traces).unwrap_or_else(|_| "[]".to_string());
    let layout = serde_json::json!({
        "title": { "text": title },
        "margin": { "t": 40, "r": 20 },
    });

    html! {
        section class="card" {
            div id=(id) class="chart" {}
            script {
                (PreEscaped(format!(
                    "Plotly.newPlot({}, {data}, {layout});",
                    serde_json::json!(id)
                )))
            }
        }
    }
}
