use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use payrun::application::draft::RunDraft;
use payrun::application::store::PayrollStore;
use payrun::domain::employee::EmployeeId;
use payrun::domain::money::Money;
use payrun::domain::payslip::Adjustments;
use payrun::domain::ports::StateRepositoryBox;
use payrun::domain::summary::{Activity, DashboardSummary};
use payrun::infrastructure::in_memory::InMemoryStateRepository;
use payrun::infrastructure::json_file::JsonFileRepository;
use payrun::infrastructure::seed::DEFAULT_SEED;
use payrun::interfaces::csv::adjustment_reader::{AdjustmentReader, group_adjustments};
use payrun::interfaces::csv::employee_writer::export_employees_csv;
use payrun::interfaces::csv::payslip_writer::export_payslips_csv;
use payrun::interfaces::format::{format_currency, format_date};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON state file. Without it the store lives in memory for this run only.
    #[arg(long, global = true, env = "PAYRUN_STATE")]
    state: Option<PathBuf>,

    /// Seed for the demo data used when no saved state exists.
    #[arg(long, global = true, env = "PAYRUN_SEED", default_value_t = DEFAULT_SEED)]
    seed: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export employees as CSV
    Employees,
    /// Export payslips as CSV
    Payslips {
        /// Only payslips of this payroll run
        #[arg(long)]
        run: Option<String>,
    },
    /// List payroll runs
    Runs,
    /// Headcount, latest run, next pay date and recent activity
    Summary {
        /// Date to compute upcoming pay dates from [default: today]
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Process a new payroll run and print its payslips as CSV
    Process {
        #[arg(long)]
        period_start: NaiveDate,
        #[arg(long)]
        period_end: NaiveDate,
        #[arg(long)]
        pay_date: NaiveDate,
        /// Employee to include (repeatable)
        #[arg(long = "employee")]
        employees: Vec<String>,
        /// Include every active employee
        #[arg(long)]
        all_active: bool,
        /// CSV of employee,kind,type,amount rows
        #[arg(long)]
        adjustments: Option<PathBuf>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Process an existing draft run and print its payslips as CSV
    Finalize {
        run_id: String,
        /// CSV of employee,kind,type,amount rows
        #[arg(long)]
        adjustments: Option<PathBuf>,
    },
    /// Replace all data with demo data
    Reset,
    /// Turn saving to the state file on or off
    TogglePersistence,
}

fn read_adjustments(path: &Path) -> Result<HashMap<EmployeeId, Adjustments>> {
    let file = File::open(path).into_diagnostic()?;
    let mut records = Vec::new();
    for record in AdjustmentReader::new(file).records() {
        match record {
            Ok(record) => records.push(record),
            Err(e) => eprintln!("Error reading adjustment: {}", e),
        }
    }
    Ok(group_adjustments(records))
}

fn print_summary(summary: &DashboardSummary) {
    println!(
        "Active employees: {} ({} inactive)",
        summary.active_employees, summary.inactive_employees
    );
    match &summary.last_processed_run {
        Some(run) => println!(
            "Last run total: {} (paid {})",
            format_currency(summary.last_run_total),
            format_date(run.pay_date)
        ),
        None => println!("Last run total: {} (no processed runs)", format_currency(Money::ZERO)),
    }
    match summary.next_pay_date {
        Some(date) => println!("Next pay date: {}", format_date(date)),
        None => println!("Next pay date: not scheduled"),
    }
    println!("Draft runs: {}", summary.draft_runs);

    println!("Recent activity:");
    if summary.recent_activity.is_empty() {
        println!("  none");
    }
    for activity in &summary.recent_activity {
        let (title, description) = match activity {
            Activity::PayrollRun {
                status,
                period_start,
                period_end,
                ..
            } => (
                format!("Payroll Run {}", status.as_str()),
                format!(
                    "Period: {} - {}",
                    format_date(*period_start),
                    format_date(*period_end)
                ),
            ),
            Activity::EmployeeAdded {
                name, department, ..
            } => (
                "Employee Added".to_string(),
                format!("{name} joined {department}"),
            ),
        };
        println!(
            "  {}\t{}\t{}\t{}",
            title,
            description,
            activity.status(),
            format_date(activity.date())
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let repository: StateRepositoryBox = match &cli.state {
        Some(path) => Box::new(JsonFileRepository::new(path)),
        None => Box::new(InMemoryStateRepository::new()),
    };
    let store = PayrollStore::open(repository, cli.seed).await;

    match cli.command {
        Command::Employees => {
            let state = store.state().await;
            println!("{}", export_employees_csv(&state.employees).into_diagnostic()?);
        }
        Command::Payslips { run } => {
            let state = store.state().await;
            let payslips: Vec<_> = match &run {
                Some(run_id) => state.payslips_for_run(run_id).cloned().collect(),
                None => state.payslips.clone(),
            };
            println!(
                "{}",
                export_payslips_csv(&payslips, &state.employees).into_diagnostic()?
            );
        }
        Command::Runs => {
            let state = store.state().await;
            for run in &state.payroll_runs {
                let net_total: Money = state.payslips_for_run(&run.id).map(|p| p.net_pay).sum();
                println!(
                    "{}\t{}\t{} - {}\tpaid {}\t{} employees\t{}",
                    run.id,
                    run.status.as_str(),
                    format_date(run.period_start),
                    format_date(run.period_end),
                    format_date(run.pay_date),
                    run.employee_ids.len(),
                    format_currency(net_total),
                );
            }
        }
        Command::Summary { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print_summary(&store.state().await.summary(today));
        }
        Command::Process {
            period_start,
            period_end,
            pay_date,
            employees,
            all_active,
            adjustments,
            notes,
        } => {
            let mut draft = RunDraft::new()
                .with_period(period_start, period_end, pay_date)
                .with_notes(notes);
            if all_active {
                for employee in store.state().await.active_employees() {
                    draft.select(&employee.id);
                }
            }
            for id in &employees {
                draft.select(id);
            }
            if let Some(path) = adjustments {
                draft.extend_adjustments(read_adjustments(&path)?);
            }

            let (run, payslips) = store.process_draft(&draft).await.into_diagnostic()?;
            eprintln!("Processed payroll run {}", run.id);
            let state = store.state().await;
            println!(
                "{}",
                export_payslips_csv(&payslips, &state.employees).into_diagnostic()?
            );
        }
        Command::Finalize {
            run_id,
            adjustments,
        } => {
            let adjustments = match adjustments {
                Some(path) => read_adjustments(&path)?,
                None => HashMap::new(),
            };
            let payslips = store
                .finalize_run(&run_id, &adjustments)
                .await
                .into_diagnostic()?;
            let state = store.state().await;
            println!(
                "{}",
                export_payslips_csv(&payslips, &state.employees).into_diagnostic()?
            );
        }
        Command::Reset => {
            store.reset_to_seed(Some(cli.seed)).await.into_diagnostic()?;
            eprintln!("Reset to seed {}", cli.seed);
        }
        Command::TogglePersistence => {
            if cli.state.is_none() {
                return Err(miette!("No --state file given, nothing to persist to"));
            }
            let enabled = store.toggle_persistence().await.into_diagnostic()?;
            eprintln!(
                "Persistence {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }

    Ok(())
}
