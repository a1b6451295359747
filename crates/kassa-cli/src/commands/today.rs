use std::fmt::{self, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use kassa_core::{
    hourly_series, Config, DailyReport, HourlySlot, SalesSummary, TimeWindow, Translator,
};
use serde::Serialize;
use tracing::debug;

use crate::backend;

const BAR_WIDTH: usize = 30;
const PROGRESS_WIDTH: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct TodayOptions {
    pub shop: Option<String>,
    pub global: bool,
    pub json: bool,
}

impl TodayOptions {
    fn shop_id(&self, config: &Config) -> Option<String> {
        if self.global {
            return None;
        }
        self.shop
            .clone()
            .or_else(|| config.report.shop_id.clone())
            .filter(|shop_id| !shop_id.trim().is_empty())
    }
}

pub fn execute(options: TodayOptions) -> Result<()> {
    let (config, translator) = backend::load_config()?;
    let session = backend::open_session(&config, &translator)?;
    let window = TimeWindow::today_until(Utc::now(), config.general.timezone)?;
    let shop_id = options.shop_id(&config);
    debug!(
        start = window.start_timestamp(),
        end = window.end_timestamp(),
        shop = shop_id.as_deref().unwrap_or("global"),
        "fetching today's report"
    );

    let report = session
        .fetch_daily_report(&window, shop_id.as_deref(), config.report.interval_grouping)
        .with_context(|| translator.get("error.report_failed"))?;

    if options.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_dashboard(&report, &config, &translator)?);
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    starttime: i64,
    endtime: i64,
    shop_id: Option<&'a str>,
    interval_grouping: u32,
    turnover: &'a [kassa_core::TurnoverBucket],
    categories: &'a [kassa_core::CategorySale],
    tenders: &'a [kassa_core::TenderSale],
}

fn render_json(report: &DailyReport) -> Result<String> {
    let output = JsonReport {
        starttime: report.window.start_timestamp(),
        endtime: report.window.end_timestamp(),
        shop_id: report.shop_id.as_deref(),
        interval_grouping: report.interval_grouping,
        turnover: &report.turnover,
        categories: &report.categories,
        tenders: &report.tenders,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn render_dashboard(
    report: &DailyReport,
    config: &Config,
    translator: &Translator,
) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let summary = SalesSummary::from_buckets(&report.turnover, config.report.daily_goal);

    let scope = match report.shop_id.as_deref() {
        Some(shop) => translator.format("today.scope_shop", &[("shop", shop)]),
        None => translator.get("today.scope_global"),
    };
    writeln!(output)?;
    writeln!(output, "📊 {} ({})", translator.get("today.header"), scope)?;
    writeln!(output)?;

    write_kpis(&mut output, &summary, translator)?;
    write_hourly(&mut output, report, config, translator)?;

    let categories: Vec<(&str, i64)> = report
        .categories_by_turnover()
        .into_iter()
        .map(|category| (category.category_name.as_str(), category.turnover))
        .collect();
    write_breakdown(
        &mut output,
        &translator.get("today.categories_header"),
        &translator.get("today.categories_empty"),
        &categories,
        translator,
    )?;

    let tenders: Vec<(&str, i64)> = report
        .tenders_by_turnover()
        .into_iter()
        .map(|tender| (tender.tender_type.as_str(), tender.turnover))
        .collect();
    write_breakdown(
        &mut output,
        &translator.get("today.tenders_header"),
        &translator.get("today.tenders_empty"),
        &tenders,
        translator,
    )?;

    Ok(output)
}

fn write_kpis(
    output: &mut impl Write,
    summary: &SalesSummary,
    translator: &Translator,
) -> fmt::Result {
    let rows = [
        (
            translator.get("today.total_sales"),
            translator.amount(summary.total_turnover),
        ),
        (
            translator.get("today.orders"),
            translator.count(summary.order_count),
        ),
        (
            translator.get("today.average_order"),
            translator.amount(summary.average_order),
        ),
        (
            translator.get("today.goal_attainment"),
            translator.percent(summary.goal_attainment_percent),
        ),
    ];

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in &rows {
        let padding = label_width - label.chars().count();
        writeln!(output, "{}:{} {:>14}", label, " ".repeat(padding), value)?;
    }

    writeln!(output, "[{}]", progress_bar(summary.goal_progress(), PROGRESS_WIDTH))?;
    writeln!(output)
}

fn write_hourly(
    output: &mut impl Write,
    report: &DailyReport,
    config: &Config,
    translator: &Translator,
) -> fmt::Result {
    writeln!(output, "{}:", translator.get("today.hourly_header"))?;

    if report.turnover.is_empty() {
        writeln!(output, "  {}", translator.get("today.hourly_empty"))?;
        return writeln!(output);
    }

    let slots: Vec<HourlySlot> = hourly_series(
        &report.window,
        &report.turnover,
        report.interval_grouping,
        config.general.timezone,
    );
    let max_turnover = slots.iter().map(|slot| slot.turnover).max().unwrap_or(0);

    for slot in &slots {
        writeln!(
            output,
            "{} {:<width$} {:>12} ({})",
            slot.label,
            bar(slot.turnover, max_turnover, BAR_WIDTH),
            translator.amount(slot.turnover),
            slot.order_count,
            width = BAR_WIDTH
        )?;
    }
    writeln!(output)
}

fn write_breakdown(
    output: &mut impl Write,
    header: &str,
    empty_notice: &str,
    rows: &[(&str, i64)],
    translator: &Translator,
) -> fmt::Result {
    writeln!(output, "{}:", header)?;

    if rows.is_empty() {
        writeln!(output, "  {}", empty_notice)?;
        return writeln!(output);
    }

    let max_turnover = rows.iter().map(|(_, turnover)| *turnover).max().unwrap_or(0);

    for (index, (name, turnover)) in rows.iter().enumerate() {
        let prefix = if index == rows.len() - 1 {
            "└──"
        } else {
            "├──"
        };
        writeln!(
            output,
            "{} {:18} {:<width$} {:>12}",
            prefix,
            format!("{}:", name),
            bar(*turnover, max_turnover, BAR_WIDTH),
            translator.amount(*turnover),
            width = BAR_WIDTH
        )?;
    }
    writeln!(output)
}

fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let length = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(length.clamp(1, width))
}

fn progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use kassa_adapters::StubReportGateway;
    use kassa_core::{CategorySale, Language, ReportSession, TenderSale, TurnoverBucket};
    use std::sync::Arc;

    fn create_test_window() -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2025, 1, 14, 23, 0, 0).unwrap();
        TimeWindow::new(start, start + Duration::hours(3) + Duration::minutes(20)).unwrap()
    }

    fn fetch_test_report(gateway: StubReportGateway, shop_id: Option<&str>) -> DailyReport {
        let session = ReportSession::new(Arc::new(gateway));
        session
            .fetch_daily_report(&create_test_window(), shop_id, 3600)
            .unwrap()
    }

    fn render(report: &DailyReport, language: Language) -> String {
        render_dashboard(report, &Config::default(), &Translator::new(language)).unwrap()
    }

    fn stocked_gateway() -> StubReportGateway {
        StubReportGateway::with_report(
            vec![
                TurnoverBucket {
                    interval_index: 1,
                    turnover: 100_000,
                    order_count: 2,
                },
                TurnoverBucket {
                    interval_index: 3,
                    turnover: 50_000,
                    order_count: 1,
                },
            ],
            vec![
                CategorySale {
                    category_name: "Snacks".to_string(),
                    turnover: 20_000,
                },
                CategorySale {
                    category_name: "Drinks".to_string(),
                    turnover: 130_000,
                },
            ],
            vec![TenderSale {
                tender_type: "Card".to_string(),
                turnover: 150_000,
            }],
        )
    }

    #[test]
    fn bar_scales_to_maximum() {
        assert_eq!(bar(10, 10, 4), "████");
        assert_eq!(bar(5, 10, 4), "██");
        assert_eq!(bar(1, 1000, 4), "█");
        assert_eq!(bar(0, 10, 4), "");
        assert_eq!(bar(10, 0, 4), "");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(2.0, 4), "████");
        assert_eq!(progress_bar(0.0, 2), "░░");
    }

    #[test]
    fn shop_option_overrides_configured_shop() {
        let mut config = Config::default();
        config.report.shop_id = Some("configured".to_string());

        let explicit = TodayOptions {
            shop: Some("S1".to_string()),
            ..Default::default()
        };
        let global = TodayOptions {
            global: true,
            ..Default::default()
        };

        assert_eq!(explicit.shop_id(&config).as_deref(), Some("S1"));
        assert_eq!(global.shop_id(&config), None);
        assert_eq!(
            TodayOptions::default().shop_id(&config).as_deref(),
            Some("configured")
        );
    }

    #[test]
    fn blank_shop_means_all_shops() {
        let mut config = Config::default();
        config.report.shop_id = Some(String::new());

        let blank_option = TodayOptions {
            shop: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(TodayOptions::default().shop_id(&config), None);
        assert_eq!(blank_option.shop_id(&Config::default()), None);
    }

    #[test]
    fn dashboard_shows_kpis_in_major_units() {
        let report = fetch_test_report(stocked_gateway(), Some("S1"));
        let config = Config::default();

        let output = render_dashboard(&report, &config, &Translator::new(Language::En)).unwrap();

        assert!(output.contains("Today's sales (shop S1)"));
        assert!(output.contains("1,500 kr"));
        assert!(output.contains("500 kr"));
        assert!(output.contains("7.5 %"));
    }

    #[test]
    fn dashboard_fills_hours_without_sales() {
        let report = fetch_test_report(stocked_gateway(), None);

        let output = render(&report, Language::En);

        for label in ["00:00", "01:00", "02:00", "03:00"] {
            assert!(output.contains(label), "missing slot {}", label);
        }
        assert!(!output.contains("04:00"));
    }

    #[test]
    fn dashboard_lists_categories_by_turnover() {
        let report = fetch_test_report(stocked_gateway(), None);

        let output = render(&report, Language::En);

        let drinks = output.find("Drinks:").unwrap();
        let snacks = output.find("Snacks:").unwrap();
        assert!(drinks < snacks);
        assert!(output.contains("└── Card:"));
    }

    #[test]
    fn dashboard_shows_notices_when_empty() {
        let report = fetch_test_report(StubReportGateway::new(), None);

        let output = render(&report, Language::Sv);

        assert!(output.contains("Dagens försäljning (alla butiker)"));
        assert!(output.contains("Ingen försäljningsdata per timme tillgänglig."));
        assert!(output.contains("Ingen kategoriförsäljning tillgänglig för idag."));
        assert!(output.contains("Ingen betalmedelsdata tillgänglig för idag."));
    }

    #[test]
    fn json_output_keeps_minor_units() {
        let report = fetch_test_report(stocked_gateway(), Some("S1"));

        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

        assert_eq!(json["starttime"], report.window.start_timestamp());
        assert_eq!(json["shop_id"], "S1");
        assert_eq!(json["turnover"][0]["turnover"], 100_000);
        assert_eq!(json["categories"][1]["category_name"], "Drinks");
        assert_eq!(json["tenders"][0]["tender_type"], "Card");
    }
}
