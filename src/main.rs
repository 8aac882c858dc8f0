//! Soulframe Atlas - Build Lab
//!
//! Interactive build lab: pick a curated build, swap pacts and weapons, or
//! switch to custom mode and set virtues directly. Metrics are recomputed
//! after every change.

use soulframe_atlas::catalog::{load_catalog, BuildCatalog};
use soulframe_atlas::core::config::{AtlasConfig, DEFAULT_CONFIG_FILE};
use soulframe_atlas::core::error::Result;
use soulframe_atlas::core::{Virtue, VirtueProfile};
use soulframe_atlas::lab::{BuildLab, BuildMode, Metrics};

use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("soulframe_atlas=info")),
        )
        .init();

    tracing::info!("Build lab starting...");

    let config = AtlasConfig::load_with_env(Path::new(DEFAULT_CONFIG_FILE))?;
    let catalog = match load_catalog(&config.data.catalog_path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                "Could not load {:?} ({}) - using the built-in sample builds",
                config.data.catalog_path(),
                e
            );
            BuildCatalog::with_defaults()
        }
    };

    let mut lab = BuildLab::with_default_virtues(catalog, config.lab.default_virtues);

    println!("\n=== SOULFRAME ATLAS BUILD LAB ===");
    println!();
    println!("Commands:");
    println!("  builds / pacts / weapons   - List catalog entries");
    println!("  build <id>                 - Load a curated build");
    println!("  pact <id> / weapon <id>    - Swap pact or weapon");
    println!("  mode preset|custom         - Follow the build or set virtues yourself");
    println!("  virtues <c> <g> <s>        - Set courage, grace, spirit (custom mode)");
    println!("  status / s                 - Show the current build");
    println!("  quit / q                   - Exit");
    println!();

    display_status(&lab);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        let (command, arg) = input.split_once(' ').map_or((input, ""), |(c, a)| (c, a.trim()));

        match command {
            "status" | "s" => display_status(&lab),
            "builds" => {
                for build in &lab.catalog().builds {
                    println!("  {:<16} {}", build.id.as_deref().unwrap_or("-"), build.name);
                }
            }
            "pacts" => {
                for pact in &lab.catalog().pacts {
                    println!(
                        "  {:<16} {}",
                        pact.id.as_deref().unwrap_or("-"),
                        pact.name.as_deref().unwrap_or("")
                    );
                }
            }
            "weapons" => {
                for weapon in &lab.catalog().weapons {
                    println!(
                        "  {:<16} {}",
                        weapon.id.as_deref().unwrap_or("-"),
                        weapon.name.as_deref().unwrap_or("")
                    );
                }
            }
            "build" if !arg.is_empty() => {
                if lab.select_build(arg) {
                    display_status(&lab);
                } else {
                    println!("No build with id '{}'", arg);
                }
            }
            "pact" => {
                lab.select_pact(arg);
                display_status(&lab);
            }
            "weapon" => {
                lab.select_weapon(arg);
                display_status(&lab);
            }
            "mode" => match arg.parse::<BuildMode>() {
                Ok(mode) => {
                    lab.set_mode(mode);
                    display_status(&lab);
                }
                Err(e) => println!("{}", e),
            },
            "virtues" => match parse_virtues(arg) {
                Some(virtues) => {
                    if lab.set_virtues(virtues) {
                        display_status(&lab);
                    } else {
                        println!("Switch to custom mode first: mode custom");
                    }
                }
                None => println!("Usage: virtues <courage> <grace> <spirit>"),
            },
            _ => println!("Unknown command. Available: builds, build <id>, pact <id>, weapon <id>, mode, virtues, status, quit"),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

fn parse_virtues(arg: &str) -> Option<VirtueProfile> {
    let values: Vec<f64> = arg
        .split_whitespace()
        .map(|v| v.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match values.as_slice() {
        [courage, grace, spirit] => Some(VirtueProfile::new(*courage, *grace, *spirit)),
        _ => None,
    }
}

fn bar(value: f64) -> String {
    let filled = (Metrics::bar_percent(value) / 10.0).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Display the current build and its metrics
fn display_status(lab: &BuildLab) {
    let metrics = lab.metrics();
    let virtues = lab.virtues();
    let build_name = lab.active_build().map(|b| b.name.as_str()).unwrap_or("(none)");

    println!();
    println!("--- {} | {:?} mode ---", build_name, lab.mode());
    if let Some(summary) = lab.active_build().and_then(|b| b.summary.as_deref()) {
        println!("{}", summary);
    }
    let allocation: Vec<String> = Virtue::all()
        .iter()
        .map(|v| format!("{} {}%", v.label(), virtues.get(*v)))
        .collect();
    println!("Virtues: {}", allocation.join(" | "));
    println!("Pact:    {} ({})", lab.pact_role_text(), lab.pact_style());
    println!("Weapon:  {} ({})", lab.weapon_role_text(), lab.weapon_style());
    println!();
    println!("  Damage   [{}] {:.2}", bar(metrics.damage), metrics.damage);
    println!("  Defense  [{}] {:.2}", bar(metrics.defense), metrics.defense);
    println!("  Mobility [{}] {:.2}", bar(metrics.mobility), metrics.mobility);
    println!("  Control  [{}] {:.2}", bar(metrics.control), metrics.control);
    println!("  Complexity {}", metrics.complexity_stars());
    println!();
}
