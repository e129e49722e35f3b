//! HTML rendering of the dashboard page.
//!
//! Charts are drawn client-side by Plotly.js from the embedded chart specs.

use html_escape::{encode_double_quoted_attribute, encode_text};
use models::{Branding, ChartPanel, Dashboard, SidebarSpec};

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const SELECTOR_NAME: &str = "view";

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; background: #0e1117; color: #fafafa; display: flex; }
aside { width: 260px; min-height: 100vh; padding: 16px; background: #262730; box-sizing: border-box; }
aside img { width: 100%; height: auto; }
main { flex: 1; padding: 16px 32px; }
h1 { text-align: center; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
.chart { min-height: 400px; }
.error { background: #3e1d1d; color: #ffcccc; border-radius: 6px; padding: 12px 16px; margin: 12px 0; }
.warnings { color: #f0c36d; font-size: 0.9em; }
"#;

const DRAW_SCRIPT: &str = r#"
const panels = JSON.parse(document.getElementById('dashboard-charts').textContent);
for (const panel of panels) {
  const spec = panel.chart;
  const traces = spec.series.map(s => ({ type: 'bar', name: s.name, x: spec.categories, y: s.values }));
  Plotly.newPlot('chart-' + panel.slot.row + '-' + panel.slot.column, traces, {
    title: { text: spec.title },
    barmode: spec.grouped ? 'group' : 'relative',
    showlegend: spec.series.length > 1,
    legend: { title: { text: spec.legend_title || '' } },
    xaxis: { title: { text: spec.x_axis_title }, tickangle: 0 },
    yaxis: { title: { text: spec.y_axis_title } },
    paper_bgcolor: '#0e1117', plot_bgcolor: '#0e1117', font: { color: '#fafafa' }
  }, { responsive: true });
}
"#;

/// What the main area shows for one render.
pub enum PageBody<'a> {
    Dashboard(&'a Dashboard),
    Error(String),
}

pub fn render_page(page_title: &str, sidebar: &SidebarSpec, body: PageBody<'_>) -> String {
    let main = match body {
        PageBody::Dashboard(dashboard) => render_dashboard(dashboard),
        PageBody::Error(message) => render_error(&message),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{sidebar}\n<main>\n<h1>{title}</h1>\n{main}</main>\n</body>\n</html>\n",
        title = encode_text(page_title),
        sidebar = render_sidebar(sidebar),
    )
}

fn render_sidebar(sidebar: &SidebarSpec) -> String {
    let branding = match &sidebar.branding {
        Branding::Image { data_uri } => format!(
            "<div style=\"text-align:center;\"><img src=\"{}\" alt=\"logo\"></div>",
            encode_double_quoted_attribute(data_uri)
        ),
        Branding::Unavailable { reason } => {
            format!("<div class=\"error\" role=\"alert\">{}</div>", encode_text(reason))
        }
    };

    let mut options = String::new();
    for (idx, option) in sidebar.options.iter().enumerate() {
        let checked = if idx == 0 { " checked" } else { "" };
        options.push_str(&format!(
            "<label><input type=\"radio\" name=\"{SELECTOR_NAME}\" value=\"{value}\"{checked}> {text}</label><br>\n",
            value = encode_double_quoted_attribute(option),
            text = encode_text(option),
        ));
    }

    format!(
        "<aside>\n{branding}\n<h2>{title}</h2>\n<fieldset>\n<legend>{label}</legend>\n{options}</fieldset>\n</aside>",
        title = encode_text(&sidebar.title),
        label = encode_text(&sidebar.selector_label),
    )
}

fn render_panel(panel: &ChartPanel) -> String {
    format!(
        "<section style=\"grid-row:{row};grid-column:{column};\">\n<h3>{caption}</h3>\n<div class=\"chart\" id=\"chart-{r}-{c}\"></div>\n</section>\n",
        row = panel.slot.row + 1,
        column = panel.slot.column + 1,
        caption = encode_text(&panel.caption),
        r = panel.slot.row,
        c = panel.slot.column,
    )
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut html = String::from("<div class=\"grid\">\n");
    for panel in &dashboard.layout.panels {
        html.push_str(&render_panel(panel));
    }
    html.push_str("</div>\n");

    if !dashboard.warnings.is_empty() {
        html.push_str("<ul class=\"warnings\">\n");
        for warning in &dashboard.warnings {
            html.push_str(&format!("<li>{}</li>\n", encode_text(warning)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&format!(
        "<script type=\"application/json\" id=\"dashboard-charts\">{}</script>\n",
        panels_json(&dashboard.layout.panels)
    ));
    html.push_str(&format!("<script src=\"{PLOTLY_SRC}\"></script>\n"));
    html.push_str(&format!("<script>{DRAW_SCRIPT}</script>\n"));
    html
}

/// Chart specs as JSON that is safe to inline in a `<script>` element.
fn panels_json(panels: &[ChartPanel]) -> String {
    serde_json::to_string(panels)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

fn render_error(message: &str) -> String {
    format!(
        "<div class=\"error\" role=\"alert\"><strong>Erro ao buscar dados da API.</strong><br>{}</div>\n",
        encode_text(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_engine::presentation::sidebar;
    use dashboard_engine::run_pipeline;
    use models::RawRecord;

    fn sidebar_with_logo() -> SidebarSpec {
        sidebar(Branding::Image {
            data_uri: "data:image/svg+xml;base64,PHN2Zy8+".to_string(),
        })
    }

    fn sample_dashboard() -> Dashboard {
        let record: RawRecord = serde_json::from_value(serde_json::json!({
            "CODCLASSIFICA": "01", "Janeiro": 10, "Total": 10
        }))
        .unwrap();
        run_pipeline(vec![record], "Senar Pernambuco")
    }

    #[test]
    fn test_dashboard_page_has_four_chart_slots() {
        let html = render_page(
            "Senar Pernambuco",
            &sidebar_with_logo(),
            PageBody::Dashboard(&sample_dashboard()),
        );

        assert_eq!(html.matches("class=\"chart\"").count(), 4);
        for id in ["chart-0-0", "chart-0-1", "chart-1-0", "chart-1-1"] {
            assert!(html.contains(id), "missing {id}");
        }
        assert!(html.contains("Comparação por Trimestre"));
        assert!(html.contains(PLOTLY_SRC));
        assert!(html.contains("<img src=\"data:image/svg+xml;base64,PHN2Zy8+\""));
    }

    #[test]
    fn test_selector_is_rendered_with_first_option_checked() {
        let html = render_page("Painel", &sidebar_with_logo(), PageBody::Error("x".into()));
        assert!(html.contains("value=\"Natureza\" checked"));
        assert!(html.contains("value=\"Serviços\">"));
        assert!(html.contains("Escolha uma opção:"));
    }

    #[test]
    fn test_error_page_has_no_charts() {
        let html = render_page(
            "Senar Pernambuco",
            &sidebar_with_logo(),
            PageBody::Error("API request failed with HTTP status 500".into()),
        );

        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("HTTP status 500"));
        assert!(!html.contains("class=\"chart\""));
        assert!(!html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_missing_branding_is_shown_in_sidebar() {
        let spec = sidebar(Branding::Unavailable {
            reason: "File dematech.svg not found.".to_string(),
        });
        let html = render_page("Painel", &spec, PageBody::Dashboard(&sample_dashboard()));

        assert!(html.contains("File dematech.svg not found."));
        assert!(!html.contains("<img"));
        assert_eq!(html.matches("class=\"chart\"").count(), 4);
    }

    #[test]
    fn test_warnings_and_text_are_escaped() {
        let mut dashboard = sample_dashboard();
        dashboard.warnings.push("<b>row 3</b>".to_string());
        let html = render_page("A & B", &sidebar_with_logo(), PageBody::Dashboard(&dashboard));

        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("&lt;b&gt;row 3&lt;/b&gt;"));
    }

    #[test]
    fn test_inline_json_cannot_close_script() {
        let mut dashboard = sample_dashboard();
        dashboard.layout.panels[0].chart.title = "</script><script>alert(1)".to_string();
        let json = panels_json(&dashboard.layout.panels);
        assert!(!json.contains("</script>"));
    }
}
