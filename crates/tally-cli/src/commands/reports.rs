//! Report and insight command implementations

use anyhow::Result;
use tally_core::{Insights, Ledger, Period, Report};

use super::{format_money, parse_month, truncate};

pub fn cmd_report(ledger: &Ledger, month: Option<&str>, json: bool) -> Result<()> {
    let period = parse_month(month)?;
    let report = ledger.build_report(period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(period, &report));
    }
    Ok(())
}

pub fn cmd_insights(ledger: &Ledger, month: Option<&str>, json: bool) -> Result<()> {
    let period = parse_month(month)?;
    let insights = ledger.build_insights(period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print!("{}", render_insights(period, &insights));
    }
    Ok(())
}

/// Human-readable monthly report
pub fn render_report(period: Period, report: &Report) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line(String::new());
    line(format!("📊 Spending Report: {}", period));
    line("   ─────────────────────────────────────────────────────────────".to_string());
    line(format!(
        "   Total spending: {} ({} expense(s))",
        format_money(report.total_spending),
        report.expenses.len()
    ));
    if report.is_over_budget {
        line(format!(
            "   ⚠️  Over budget! Limit is {}",
            format_money(report.budget_limit)
        ));
    } else {
        line(format!(
            "   Budget limit: {}",
            format_money(report.budget_limit)
        ));
    }

    if !report.category_totals.is_empty() {
        line(String::new());
        line("   By category:".to_string());
        for total in &report.category_totals {
            line(format!(
                "     {:<20} {:>12}",
                truncate(&total.category, 20),
                format_money(total.total)
            ));
        }
    }

    if !report.monthly_totals.is_empty() {
        line(String::new());
        line("   Recent months:".to_string());
        for total in &report.monthly_totals {
            line(format!(
                "     {:<20} {:>12}",
                total.month,
                format_money(total.total)
            ));
        }
    }

    line(String::new());
    out
}

/// Human-readable insights
pub fn render_insights(period: Period, insights: &Insights) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line(String::new());
    line(format!("💡 Insights: {}", period));
    line("   ─────────────────────────────────────────────────────────────".to_string());
    line(format!(
        "   Predicted next month: {}",
        format_money(insights.predictions.next_month)
    ));

    if insights.recommendations.is_empty() {
        line("   No recommendations.".to_string());
    } else {
        line(String::new());
        for recommendation in &insights.recommendations {
            line(format!("   👉 {}", recommendation));
        }
    }

    if !insights.anomalies.is_empty() {
        line(String::new());
        line("   Unusual expenses:".to_string());
        for anomaly in &insights.anomalies {
            line(format!(
                "     {}  {:>12}  {}",
                anomaly.date,
                format_money(anomaly.amount),
                anomaly.description.as_deref().unwrap_or("")
            ));
        }
    }

    line(String::new());
    out
}
