use console::style;

use crate::models::Report;

/// Shown in a KPI slot the report has no usable value for.
pub const KPI_PLACEHOLDER: &str = "N/A";

/// The fixed KPI slots: (label, key in `financialKPIs`).
const KPI_FIELDS: [(&str, &str); 3] = [
    ("Total Revenue", "total_revenue"),
    ("Net Income", "net_income"),
    ("Earnings Per Share (EPS)", "eps"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiSlot {
    pub label: &'static str,
    pub value: String,
}

pub fn kpi_slots(report: &Report) -> Vec<KpiSlot> {
    KPI_FIELDS
        .iter()
        .map(|(label, key)| KpiSlot {
            label: *label,
            value: report.kpi(key).unwrap_or_else(|| KPI_PLACEHOLDER.to_string()),
        })
        .collect()
}

/// Render a report for the terminal.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    let title = format!("Analysis for {} ({})", report.ticker, report.filing_type);
    let w = title.chars().count() + 4;
    out.push_str(&format!("\n  {}\n", style(format!("╭{}╮", "─".repeat(w - 2))).cyan()));
    out.push_str(&format!(
        "  {} {} {}\n",
        style("│").cyan(),
        style(&title).white().bold(),
        style("│").cyan(),
    ));
    out.push_str(&format!("  {}\n", style(format!("╰{}╯", "─".repeat(w - 2))).cyan()));

    out.push_str(&section_heading("Executive Summary"));
    if report.executive_summary.trim().is_empty() {
        out.push_str(&format!("  {}\n", style("No summary provided.").dim()));
    } else {
        for line in report.executive_summary.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    out.push_str(&section_heading("Financial KPIs"));
    for slot in kpi_slots(report) {
        let value = if slot.value == KPI_PLACEHOLDER {
            style(slot.value).dim().to_string()
        } else {
            style(slot.value).white().bold().to_string()
        };
        out.push_str(&format!("  {:<26} {}\n", style(slot.label).dim(), value));
    }

    if let Some(sentiment) = report.sentiment_text() {
        out.push_str(&format!("\n  {} {}\n", style("Sentiment:").dim(), style(sentiment).white()));
    }

    out.push_str(&section_heading("Key Risk Factors"));
    let risks = report.risk_lines();
    if risks.is_empty() {
        out.push_str(&format!("  {}\n", style("No risk factors reported.").dim()));
    }
    for risk in &risks {
        out.push_str(&format!("  {} {}\n", style("•").yellow(), risk));
    }

    out
}

fn section_heading(title: &str) -> String {
    format!("\n  {}\n", style(title).cyan().bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_with_kpis(kpis: serde_json::Value) -> Report {
        serde_json::from_value(json!({
            "ticker": "AAPL",
            "filingType": "10-K",
            "executiveSummary": "Line one.\nLine two.",
            "riskFactors": ["Competition", "Currency"],
            "financialKPIs": kpis
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_kpi_renders_placeholder() {
        let report = report_with_kpis(json!({ "total_revenue": "$383.3B" }));
        let slots = kpi_slots(&report);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].value, "$383.3B");
        assert_eq!(slots[1].value, "N/A");
        assert_eq!(slots[2].value, "N/A");
    }

    #[test]
    fn test_slot_labels_are_fixed() {
        let labels: Vec<&str> = kpi_slots(&Report::default()).iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Total Revenue", "Net Income", "Earnings Per Share (EPS)"]);
    }

    #[test]
    fn test_render_contains_sections_in_order() {
        let report = report_with_kpis(json!({ "eps": "$6.13" }));
        let text = console::strip_ansi_codes(&render_report(&report)).to_string();

        assert!(text.contains("Analysis for AAPL (10-K)"));
        assert!(text.contains("Line one.\n"));
        assert!(text.contains("Line two.\n"));
        assert!(text.contains("$6.13"));
        assert!(text.contains("N/A"));

        let summary = text.find("Executive Summary").unwrap();
        let kpis = text.find("Financial KPIs").unwrap();
        let risks = text.find("Key Risk Factors").unwrap();
        assert!(summary < kpis && kpis < risks);
        assert!(text.find("Competition").unwrap() < text.find("Currency").unwrap());
    }

    #[test]
    fn test_render_empty_report_does_not_panic() {
        let text = console::strip_ansi_codes(&render_report(&Report::default())).to_string();
        assert!(text.contains("No summary provided."));
        assert!(text.contains("No risk factors reported."));
    }

    #[test]
    fn test_sentiment_only_when_present() {
        let mut report = report_with_kpis(json!({}));
        let text = console::strip_ansi_codes(&render_report(&report)).to_string();
        assert!(!text.contains("Sentiment:"));

        report.sentiment = Some(json!("cautious"));
        let text = console::strip_ansi_codes(&render_report(&report)).to_string();
        assert!(text.contains("Sentiment: cautious"));
    }
}
