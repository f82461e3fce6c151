use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::Path;
use venue_core::conduction::{ConductionClient, ConductionPayload, QueueRef};
use venue_core::config::Config;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

/// A venue and operating day.
#[derive(Args)]
pub struct Day {
    /// Establishment (venue) id
    #[arg(long = "establishment", value_name = "ID")]
    establishment_id: i64,

    /// Operating day, YYYY-MM-DD
    #[arg(long = "date", value_name = "DATE")]
    flow_date: NaiveDate,
}

#[derive(Subcommand)]
pub enum ConductionSubcommand {
    /// List queue item ids already conduced for a day
    List {
        #[command(flatten)]
        day: Day,
    },

    /// Confirm that a queue item has been escorted to its table
    Confirm {
        /// Composite queue id, e.g. owner-12, guest-12-40, reservation-9
        queue_item_id: String,

        #[command(flatten)]
        day: Day,

        /// Override the guest list id derived from the queue id
        #[arg(long)]
        guest_list_id: Option<i64>,

        /// Override the reservation id derived from the queue id
        #[arg(long)]
        reservation_id: Option<i64>,
    },

    /// Decode a composite queue id without contacting the API
    Parse {
        queue_item_id: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConductionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConductionSubcommand::List { day } => list(root, day, json),
        ConductionSubcommand::Confirm {
            queue_item_id,
            day,
            guest_list_id,
            reservation_id,
        } => {
            let payload = ConductionPayload::for_item(
                day.establishment_id,
                day.flow_date,
                queue_item_id,
                guest_list_id,
                reservation_id,
            );
            confirm(root, payload, json)
        }
        ConductionSubcommand::Parse { queue_item_id } => parse(&queue_item_id, json),
    }
}

fn client(root: &Path) -> anyhow::Result<ConductionClient> {
    let config = Config::load(root).context("failed to load config")?;
    config.ensure_valid()?;
    Ok(ConductionClient::new(&config.api)?)
}

fn opt(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, day: Day, json: bool) -> anyhow::Result<()> {
    let client = client(root)?;
    let rt = tokio::runtime::Runtime::new()?;
    let ids = rt.block_on(client.list_confirmed(day.establishment_id, day.flow_date))?;

    if json {
        return print_json(&serde_json::json!({ "conduced_ids": ids }));
    }
    if ids.is_empty() {
        println!("Nothing conduced on {} yet.", day.flow_date);
        return Ok(());
    }
    for id in &ids {
        println!("{id}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// confirm
// ---------------------------------------------------------------------------

fn confirm(root: &Path, payload: ConductionPayload, json: bool) -> anyhow::Result<()> {
    let client = client(root)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(client.confirm(&payload))
        .with_context(|| format!("failed to confirm '{}'", payload.queue_item_id))?;

    if json {
        return print_json(&payload);
    }
    println!(
        "Conduced: {} ({} {})",
        payload.queue_item_id, payload.entity_type, payload.entity_id
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

fn parse(queue_item_id: &str, json: bool) -> anyhow::Result<()> {
    let r = QueueRef::parse(queue_item_id);
    if json {
        return print_json(&r);
    }
    print_table(
        &["ENTITY TYPE", "ENTITY ID", "GUEST LIST", "RESERVATION"],
        vec![vec![
            r.entity_type.to_string(),
            r.entity_id.to_string(),
            opt(r.guest_list_id),
            opt(r.reservation_id),
        ]],
    );
    Ok(())
}
