use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use venue_core::metrics::{self, Metric};
use venue_core::model::{AttendanceSnapshot, ReservationSnapshot};
use venue_core::reconcile;

#[derive(Subcommand)]
pub enum MetricsSubcommand {
    /// Reconcile the reservation domain of a snapshot
    Reservations {
        /// Reservation snapshot JSON file, or `-` for stdin
        file: PathBuf,
    },

    /// Per-domain subtotals and the grand total for a full snapshot
    Summary {
        /// Attendance snapshot JSON file, or `-` for stdin
        file: PathBuf,
    },
}

pub fn run(subcmd: MetricsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        MetricsSubcommand::Reservations { file } => reservations(&file, json),
        MetricsSubcommand::Summary { file } => summary(&file, json),
    }
}

fn read_snapshot<T: DeserializeOwned>(file: &Path) -> anyhow::Result<T> {
    let data = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };
    serde_json::from_str(&data).context("snapshot is not valid JSON")
}

fn reservations(file: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot: ReservationSnapshot = read_snapshot(file)?;
    let (source, metric) = reconcile::reconcile(&snapshot);

    if json {
        return print_json(&serde_json::json!({
            "total": metric.total,
            "checkins": metric.checkins,
            "num_reservas": metric.num_reservas,
            "source": source,
        }));
    }

    println!("Expected:     {}", metric.total);
    println!("Checked in:   {}", metric.checkins);
    println!("Reservations: {}", metric.num_reservas);
    println!("Source:       {}", source.as_str());
    Ok(())
}

fn row(domain: &str, m: Metric) -> Vec<String> {
    vec![
        domain.to_string(),
        m.total.to_string(),
        m.checkins.to_string(),
        m.pending().to_string(),
    ]
}

fn summary(file: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot: AttendanceSnapshot = read_snapshot(file)?;
    let s = metrics::summarize(&snapshot);

    if json {
        return print_json(&s);
    }

    print_table(
        &["DOMAIN", "EXPECTED", "CHECKED IN", "PENDING"],
        vec![
            row("reservations", Metric::from(s.reservations)),
            row("promoters", s.promoters),
            row("lounges", s.lounges),
            row("total", s.total),
        ],
    );
    println!(
        "\n{} reservation(s); guest counts from {}",
        s.reservations.num_reservas,
        s.reservation_source.as_str()
    );
    Ok(())
}
