use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use venue_core::config::Config;

#[derive(Subcommand)]
pub enum VipSubcommand {
    /// Check whether a guest is on an operator's VIP list
    Check {
        /// Operator identifier (e.g. an email)
        operator: String,
        /// Guest name as it will be checked in
        name: String,
    },

    /// List configured operators and their VIP names
    List,
}

pub fn run(root: &Path, subcmd: VipSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    match subcmd {
        VipSubcommand::Check { operator, name } => {
            let vip = config.vip_table().is_vip(&operator, &name);
            if json {
                print_json(&serde_json::json!({
                    "operator": operator,
                    "name": name,
                    "vip": vip,
                }))?;
            } else if vip {
                println!("{name}: VIP for {operator}");
            } else {
                println!("{name}: not on {operator}'s VIP list");
            }
            Ok(())
        }
        VipSubcommand::List => {
            if json {
                return print_json(&config.vip);
            }
            if config.vip_table().is_empty() {
                println!("No VIP lists configured.");
                return Ok(());
            }
            let rows = config
                .vip
                .iter()
                .flat_map(|list| {
                    list.names
                        .iter()
                        .map(move |n| vec![list.operator.clone(), n.clone()])
                })
                .collect();
            print_table(&["OPERATOR", "NAME"], rows);
            Ok(())
        }
    }
}
