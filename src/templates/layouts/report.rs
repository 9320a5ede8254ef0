// src/templates/layouts/report.rs

use chrono::NaiveDateTime;
use maud::{html, Markup, DOCTYPE};

pub fn report_layout(title: &str, generated_at: NaiveDateTime, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="static/report.css";
                script src="https://cdn.plot.ly/plotly-2.32.0.min.js" {}
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { (title) }
                    p class="generated" {
                        "Generated " (generated_at.format("%Y-%m-%d %H:%M"))
                    }
                }
                (content)
            }
        }
    }
}
