//! Whitelist, blacklist, and cache maintenance commands.
//!
//! Suppression edits only affect future scans. Nothing here touches
//! results already in the cache.

use clap::Subcommand;

use crate::scan::print_report;
use crate::Orchestrator;

/// Sub-commands available under `whitelist`.
#[derive(Debug, Subcommand)]
pub enum WhitelistCommands {
    /// Hide a place (by id) from all future results
    Add { id: String },
    /// Show whitelisted place ids
    List,
}

/// Sub-commands available under `blacklist`.
#[derive(Debug, Subcommand)]
pub enum BlacklistCommands {
    /// Exclude a place type (e.g. `bus_stop`) from future requests
    Add { type_tag: String },
    /// Stop excluding a place type
    Remove { type_tag: String },
    /// Show excluded place types
    List,
}

/// Sub-commands available under `cache`.
#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Show cached scans, oldest first
    List,
    /// Print the results of one cached scan
    Show {
        /// Position as printed by `cache list` (starting at 1)
        index: usize,
    },
    /// Delete every cached scan
    Clear,
}

pub(crate) fn run_whitelist(
    orch: &mut Orchestrator,
    command: WhitelistCommands,
) -> anyhow::Result<()> {
    match command {
        WhitelistCommands::Add { id } => {
            if orch.suppression_mut().add_to_whitelist(&id)? {
                println!("whitelisted {id}");
            } else {
                println!("{id} is already whitelisted");
            }
        }
        WhitelistCommands::List => {
            let whitelist = orch.suppression().whitelist();
            if whitelist.is_empty() {
                println!("whitelist is empty");
            }
            for id in whitelist {
                println!("{id}");
            }
        }
    }
    Ok(())
}

pub(crate) fn run_blacklist(
    orch: &mut Orchestrator,
    command: BlacklistCommands,
) -> anyhow::Result<()> {
    match command {
        BlacklistCommands::Add { type_tag } => {
            if orch.suppression_mut().add_to_blacklist(&type_tag)? {
                println!("excluding {} from the next scan on", type_tag.trim().to_lowercase());
            } else {
                println!("nothing to add for '{type_tag}'");
            }
        }
        BlacklistCommands::Remove { type_tag } => {
            if orch.suppression_mut().remove_from_blacklist(&type_tag)? {
                println!("no longer excluding {}", type_tag.trim().to_lowercase());
            } else {
                println!("{type_tag} is not blacklisted");
            }
        }
        BlacklistCommands::List => {
            let types = orch.suppression().blacklisted_types();
            if types.is_empty() {
                println!("blacklist is empty");
            }
            for tag in types {
                println!("{tag}");
            }
        }
    }
    Ok(())
}

pub(crate) fn run_cache(orch: &mut Orchestrator, command: CacheCommands) -> anyhow::Result<()> {
    match command {
        CacheCommands::List => {
            let entries = orch.cache().entries();
            if entries.is_empty() {
                println!("no cached results");
            }
            for (position, entry) in entries.iter().enumerate() {
                println!(
                    "{:>2}. {}  {:.4},{:.4}  {} m  {} place(s)",
                    position + 1,
                    entry.timestamp.format("%Y-%m-%d %H:%M UTC"),
                    entry.lat,
                    entry.lng,
                    entry.radius,
                    entry.results.len()
                );
            }
        }
        CacheCommands::Show { index } => {
            let report = index
                .checked_sub(1)
                .and_then(|i| orch.cached_report(i))
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "no cached scan at position {index} ({} cached)",
                        orch.cache().len()
                    )
                })?;
            print_report(&report);
        }
        CacheCommands::Clear => {
            orch.cache_mut().clear()?;
            println!("cache cleared");
        }
    }
    Ok(())
}
