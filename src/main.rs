//! Business Case CLI
//!
//! Command-line interface for running business case projections

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use business_case::export::format::{
    format_break_even, format_currency, format_irr, format_payback,
};
use business_case::export::{
    table_header, table_row, write_comparison_csv, ComparisonRow, Exporter, DEFAULT_ROWS_PER_PAGE,
};
use business_case::params::CaseSources;
use business_case::projection::{InvestmentMetrics, DEFAULT_DISCOUNT_RATE_PCT};
use business_case::{Scenario, ScenarioResult, ScenarioRunner};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

#[derive(Debug, Parser)]
#[command(name = "business-case", version, about = "Multi-year business case projections")]
struct Cli {
    /// JSON case file (built-in default case when omitted)
    #[arg(long, global = true)]
    case: Option<PathBuf>,

    /// CSV market table (year,tam_units,adoption_pct) overriding the case
    #[arg(long, global = true)]
    market: Option<PathBuf>,

    /// CSV scenario table (id,name,adoption_multiplier,price_multiplier) overriding the case
    #[arg(long, global = true)]
    scenarios: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Project one or all scenarios and print or export the yearly results
    Project {
        /// Scenario id (all scenarios when omitted)
        #[arg(long)]
        scenario: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Directory for exported files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Discount rate for NPV, in percent
        #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE_PCT)]
        discount_rate: f64,

        /// Table rows per report page
        #[arg(long, default_value_t = DEFAULT_ROWS_PER_PAGE)]
        rows_per_page: usize,
    },

    /// Compare headline figures across all scenarios
    Compare {
        /// Write the comparison as CSV to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Discount rate for NPV, in percent
        #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE_PCT)]
        discount_rate: f64,
    },

    /// Re-run a scenario with its price shifted by -10% and +10%
    Sensitivity {
        /// Scenario id (first scenario of the case when omitted)
        #[arg(long)]
        scenario: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
    Report,
    All,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let sources = CaseSources {
        case: cli.case.clone(),
        market: cli.market.clone(),
        scenarios: cli.scenarios.clone(),
    };
    let case = sources.load().context("Failed to load business case")?;
    info!(
        "Loaded {} case over {} years with {} scenarios",
        case.general.product_type.as_str(),
        case.general.horizon_years,
        case.scenarios.len()
    );
    let runner = ScenarioRunner::new(case);

    match cli.command {
        Commands::Project {
            scenario,
            format,
            out_dir,
            discount_rate,
            rows_per_page,
        } => {
            let scenarios = select_scenarios(&runner, scenario.as_deref())?;
            let results = runner.run_scenarios(&scenarios);
            if format == OutputFormat::Table {
                for result in &results {
                    print_projection(&runner, result, discount_rate);
                }
            } else {
                export_results(&runner, &results, format, out_dir, discount_rate, rows_per_page)?;
            }
        }
        Commands::Compare {
            output,
            discount_rate,
        } => {
            let rows: Vec<ComparisonRow> = runner
                .run_all()
                .iter()
                .map(|result| {
                    let metrics =
                        InvestmentMetrics::evaluate(&runner.case().cost, result, discount_rate);
                    ComparisonRow::new(result, &metrics)
                })
                .collect();

            print_comparison(&rows);

            if let Some(path) = output {
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                write_comparison_csv(BufWriter::new(file), &rows)?;
                println!("\nComparison written to: {}", path.display());
            }
        }
        Commands::Sensitivity { scenario } => {
            let base = match scenario.as_deref() {
                Some(id) => runner.find_scenario(id)?.clone(),
                None => runner
                    .case()
                    .scenarios
                    .first()
                    .cloned()
                    .unwrap_or_else(Scenario::baseline),
            };
            let analysis = runner.sensitivity(&base);

            println!("Price sensitivity for {} (±{:.0}%)", base.name, analysis.perturbation * 100.0);
            println!(
                "{:<36} {:>10} {:>18} {:>18} {:>12}",
                "Scenario", "Price x", "Total Revenue", "Total Net Profit", "Payback"
            );
            println!("{}", "-".repeat(98));
            for result in analysis.results() {
                println!(
                    "{:<36} {:>10.3} {:>18} {:>18} {:>12}",
                    result.scenario.name,
                    result.scenario.price_multiplier,
                    format_currency(result.total_revenue),
                    format_currency(result.total_net_profit),
                    format_payback(result.payback_year),
                );
            }
            println!("\nNet profit swing: {}", format_currency(analysis.net_profit_swing()));
        }
    }

    Ok(())
}

fn select_scenarios(runner: &ScenarioRunner, id: Option<&str>) -> Result<Vec<Scenario>> {
    match id {
        Some(id) => Ok(vec![runner.find_scenario(id)?.clone()]),
        None => Ok(runner.case().scenarios.clone()),
    }
}

fn print_projection(runner: &ScenarioRunner, result: &ScenarioResult, discount_rate: f64) {
    let metrics = InvestmentMetrics::evaluate(&runner.case().cost, result, discount_rate);

    println!("Scenario: {} ({})", result.scenario.name, result.scenario.id);
    println!("{}", table_header());
    println!("{}", "-".repeat(table_header().len()));
    for row in &result.yearly {
        println!("{}", table_row(row));
    }

    println!("\nSummary:");
    println!("  Total Revenue:    {}", format_currency(result.total_revenue));
    println!("  Total Net Profit: {}", format_currency(result.total_net_profit));
    println!("  Payback Year:     {}", format_payback(result.payback_year));
    println!("  Break-even Units: {}", format_break_even(result.break_even_units));
    let npv_label = format!("NPV @ {:.2}%:", metrics.discount_rate_pct);
    println!("  {:<18}{}", npv_label, format_currency(metrics.npv));
    println!("  IRR:              {}", format_irr(metrics.irr));
    println!();
}

fn export_results(
    runner: &ScenarioRunner,
    results: &[ScenarioResult],
    format: OutputFormat,
    out_dir: PathBuf,
    discount_rate: f64,
    rows_per_page: usize,
) -> Result<()> {
    let exporter = Exporter::new(out_dir, chrono::Utc::now());
    let case = runner.case();

    for result in results {
        let metrics = InvestmentMetrics::evaluate(&case.cost, result, discount_rate);
        let mut written = Vec::new();

        if matches!(format, OutputFormat::Csv | OutputFormat::All) {
            written.push(exporter.write_csv(result)?);
        }
        if matches!(format, OutputFormat::Json | OutputFormat::All) {
            written.push(exporter.write_json(case, result, &metrics)?);
        }
        if matches!(format, OutputFormat::Report | OutputFormat::All) {
            written.push(exporter.write_report(case, result, &metrics, rows_per_page)?);
        }

        for path in written {
            println!("{}: {}", result.scenario.name, path.display());
        }
    }

    if format == OutputFormat::All && results.len() > 1 {
        let rows: Vec<ComparisonRow> = results
            .iter()
            .map(|result| {
                let metrics = InvestmentMetrics::evaluate(&case.cost, result, discount_rate);
                ComparisonRow::new(result, &metrics)
            })
            .collect();
        let path = exporter.write_comparison(&rows)?;
        println!("Comparison: {}", path.display());
    }

    Ok(())
}

fn print_comparison(rows: &[ComparisonRow]) {
    println!(
        "{:<24} {:>18} {:>18} {:>12} {:>20} {:>18} {:>9}",
        "Scenario", "Total Revenue", "Total Net Profit", "Payback", "Break-even", "NPV", "IRR"
    );
    println!("{}", "-".repeat(125));
    for row in rows {
        println!(
            "{:<24} {:>18} {:>18} {:>12} {:>20} {:>18} {:>9}",
            row.scenario_name,
            format_currency(row.total_revenue),
            format_currency(row.total_net_profit),
            format_payback(row.payback_year),
            format_break_even(row.break_even_units),
            format_currency(row.npv),
            format_irr(row.irr_pct.map(|pct| pct / 100.0)),
        );
    }
}
