use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::FilingLensError;
use crate::models::Report;

/// `{ticker}-{filingType}-report.json`, with path separators neutralised.
pub fn export_file_name(report: &Report) -> String {
    let name = format!("{}-{}-report.json", report.ticker, report.filing_type);
    name.replace(['/', '\\'], "_")
}

/// Indented JSON text of the report exactly as held in memory.
pub fn export_json(report: &Report) -> Result<String, FilingLensError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the export into `dir`, creating it if needed, and return the file path.
pub async fn write_export(report: &Report, dir: &Path) -> Result<PathBuf, FilingLensError> {
    let json = export_json(report)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(report));
    tokio::fs::write(&path, json).await?;
    info!(path = %path.display(), "Report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Report {
        serde_json::from_value(json!({
            "ticker": "AAPL",
            "filingType": "10-Q",
            "executiveSummary": "Quarter was fine.\n\nServices grew.",
            "riskFactors": ["FX", "Supply chain"],
            "sentiment": "neutral",
            "financialKPIs": { "total_revenue": "$90.8B", "net_income": "$23.6B", "eps": 1.53 }
        }))
        .unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(&sample()), "AAPL-10-Q-report.json");
    }

    #[test]
    fn test_file_name_has_no_separators() {
        let report = Report { ticker: "A/B".into(), filing_type: "8-K".into(), ..Default::default() };
        assert_eq!(export_file_name(&report), "A_B-8-K-report.json");
    }

    #[test]
    fn test_json_is_indented_and_round_trips() {
        let report = sample();
        let text = export_json(&report).unwrap();
        assert!(text.contains("\n  \"ticker\": \"AAPL\""));
        let parsed: Report = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }

    #[tokio::test]
    async fn test_write_export_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("exports");
        let report = sample();

        let path = write_export(&report, &target).await.unwrap();
        assert_eq!(path, target.join("AAPL-10-Q-report.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, export_json(&report).unwrap());
        let parsed: Report = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_export_reproduces_received_body() {
        let received = json!({
            "ticker": "GOOG",
            "filingType": "8-K",
            "executiveSummary": "Leadership change.",
            "riskFactors": ["Key person", 7],
            "sentiment": null,
            "financialKPIs": { "eps": null },
            "sourceUrl": "https://www.sec.gov/"
        });
        let report: Report = serde_json::from_value(received.clone()).unwrap();

        let exported: serde_json::Value = serde_json::from_str(&export_json(&report).unwrap()).unwrap();
        assert_eq!(exported, received);
    }
}
