//! Turns aggregated tables into chart specifications laid out on a 2×2 grid.
//!
//! Nothing here computes: values are copied from the aggregates as they are.

use models::{
    Branding, CategoryPeak, ChartPanel, ChartSpec, DashboardLayout, GridSlot, Month,
    MonthlyAggregate, Quarter, QuarterlyAggregate, Series, SidebarSpec,
};

pub const X_AXIS_TITLE: &str = "Classificação";
pub const Y_AXIS_TITLE: &str = "Valores";
pub const QUARTER_LEGEND_TITLE: &str = "Trimestre";

pub const QUARTERLY_CAPTION: &str = "Comparação por Trimestre";
pub const JANUARY_CAPTION: &str = "Comparação do Mês de Janeiro";
pub const JANUARY_PEAK_CAPTION: &str = "Natureza Mais Gasta do Mês de Janeiro por Área";
pub const TOTAL_PEAK_CAPTION: &str = "Serviço Mais Feito em Cada Área";

pub const SIDEBAR_TITLE: &str = "Opções";
pub const SELECTOR_LABEL: &str = "Escolha uma opção:";
pub const SELECTOR_OPTIONS: [&str; 2] = ["Natureza", "Serviços"];

pub const QUARTERLY_SLOT: GridSlot = GridSlot { row: 0, column: 0 };
pub const JANUARY_SLOT: GridSlot = GridSlot { row: 0, column: 1 };
pub const JANUARY_PEAK_SLOT: GridSlot = GridSlot { row: 1, column: 0 };
pub const TOTAL_PEAK_SLOT: GridSlot = GridSlot { row: 1, column: 1 };

fn bar_chart(title: &str, categories: Vec<String>, series: Vec<Series>) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        x_axis_title: X_AXIS_TITLE.to_string(),
        y_axis_title: Y_AXIS_TITLE.to_string(),
        legend_title: None,
        grouped: false,
        categories,
        series,
    }
}

/// Grouped bars, one series per quarter.
pub fn quarterly_chart(rows: &[QuarterlyAggregate]) -> ChartSpec {
    let categories = rows.iter().map(|r| r.classification.to_string()).collect();
    let series = Quarter::ALL
        .into_iter()
        .map(|quarter| Series {
            name: quarter.series_name().to_string(),
            values: rows.iter().map(|r| r.get(quarter)).collect(),
        })
        .collect();

    ChartSpec {
        legend_title: Some(QUARTER_LEGEND_TITLE.to_string()),
        grouped: true,
        ..bar_chart(QUARTERLY_CAPTION, categories, series)
    }
}

pub fn monthly_chart(rows: &[MonthlyAggregate], month: Month) -> ChartSpec {
    let title = match month {
        Month::Janeiro => JANUARY_CAPTION.to_string(),
        other => format!("Comparação do Mês de {other}"),
    };
    let categories = rows.iter().map(|r| r.classification.to_string()).collect();
    let series = vec![Series {
        name: month.field_name().to_string(),
        values: rows.iter().map(|r| r.value).collect(),
    }];
    bar_chart(&title, categories, series)
}

/// One bar per classification holding the peak record's key value.
pub fn peak_chart(title: &str, rows: &[CategoryPeak]) -> ChartSpec {
    let categories = rows.iter().map(|r| r.classification.to_string()).collect();
    let name = rows
        .first()
        .map(|r| r.field.label())
        .unwrap_or(Y_AXIS_TITLE)
        .to_string();
    let series = vec![Series {
        name,
        values: rows.iter().map(|r| r.value).collect(),
    }];
    bar_chart(title, categories, series)
}

fn panel(slot: GridSlot, chart: ChartSpec) -> ChartPanel {
    ChartPanel {
        caption: chart.title.clone(),
        slot,
        chart,
    }
}

/// Places the four dashboard charts in their fixed slots, row-major.
pub fn build_layout(
    page_title: &str,
    quarterly: &[QuarterlyAggregate],
    january: &[MonthlyAggregate],
    january_peaks: &[CategoryPeak],
    total_peaks: &[CategoryPeak],
) -> DashboardLayout {
    DashboardLayout {
        page_title: page_title.to_string(),
        panels: vec![
            panel(QUARTERLY_SLOT, quarterly_chart(quarterly)),
            panel(JANUARY_SLOT, monthly_chart(january, Month::Janeiro)),
            panel(JANUARY_PEAK_SLOT, peak_chart(JANUARY_PEAK_CAPTION, january_peaks)),
            panel(TOTAL_PEAK_SLOT, peak_chart(TOTAL_PEAK_CAPTION, total_peaks)),
        ],
    }
}

/// Sidebar content. The selector is rendered only; nothing listens to it.
pub fn sidebar(branding: Branding) -> SidebarSpec {
    SidebarSpec {
        branding,
        title: SIDEBAR_TITLE.to_string(),
        selector_label: SELECTOR_LABEL.to_string(),
        options: SELECTOR_OPTIONS.iter().map(|o| o.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Classification, PeakField, RawRecord};

    fn quarterly_rows() -> Vec<QuarterlyAggregate> {
        vec![
            QuarterlyAggregate {
                classification: Classification::Fim,
                q1: 1.0,
                q2: 2.0,
                q3: 3.0,
                q4: 4.0,
            },
            QuarterlyAggregate {
                classification: Classification::Meio,
                q1: 10.0,
                q2: 20.0,
                q3: 30.0,
                q4: 40.0,
            },
        ]
    }

    fn peak(classification: Classification, value: f64) -> CategoryPeak {
        CategoryPeak {
            classification,
            field: PeakField::Total,
            value,
            row: 0,
            record: RawRecord::default(),
        }
    }

    #[test]
    fn test_quarterly_chart_has_one_series_per_quarter() {
        let chart = quarterly_chart(&quarterly_rows());

        assert_eq!(chart.categories, vec!["FIM", "Meio"]);
        assert!(chart.grouped);
        assert_eq!(chart.legend_title.as_deref(), Some("Trimestre"));
        let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Trimestre1", "Trimestre2", "Trimestre3", "Trimestre4"]);
        assert_eq!(chart.series[2].values, vec![3.0, 30.0]);
    }

    #[test]
    fn test_series_align_with_categories() {
        let layout = build_layout(
            "Painel",
            &quarterly_rows(),
            &[MonthlyAggregate {
                classification: Classification::RecursoDeTerceiro,
                month: Month::Janeiro,
                value: 7.0,
            }],
            &[peak(Classification::Meio, 3.0)],
            &[peak(Classification::Fim, 1.0), peak(Classification::Meio, 2.0)],
        );
        for panel in &layout.panels {
            for series in &panel.chart.series {
                assert_eq!(series.values.len(), panel.chart.categories.len());
            }
        }
    }

    #[test]
    fn test_layout_uses_fixed_two_by_two_grid() {
        let layout = build_layout("Senar Pernambuco", &[], &[], &[], &[]);

        assert_eq!(layout.page_title, "Senar Pernambuco");
        let slots: Vec<_> = layout.panels.iter().map(|p| (p.slot.row, p.slot.column)).collect();
        assert_eq!(slots, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        let captions: Vec<_> = layout.panels.iter().map(|p| p.caption.as_str()).collect();
        assert_eq!(
            captions,
            vec![QUARTERLY_CAPTION, JANUARY_CAPTION, JANUARY_PEAK_CAPTION, TOTAL_PEAK_CAPTION]
        );
        for panel in &layout.panels {
            assert_eq!(panel.chart.x_axis_title, "Classificação");
            assert_eq!(panel.chart.y_axis_title, "Valores");
        }
    }

    #[test]
    fn test_peak_chart_names_series_after_key_field() {
        let chart = peak_chart(TOTAL_PEAK_CAPTION, &[peak(Classification::Fim, 5.0)]);
        assert_eq!(chart.series[0].name, "Total");
        assert_eq!(chart.series[0].values, vec![5.0]);
    }

    #[test]
    fn test_sidebar_lists_both_views() {
        let spec = sidebar(Branding::Unavailable {
            reason: "missing".to_string(),
        });
        assert_eq!(spec.options, vec!["Natureza", "Serviços"]);
        assert_eq!(spec.title, "Opções");
    }
}
