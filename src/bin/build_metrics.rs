//! Headless Build Metrics
//!
//! Computes build lab ratings for one virtue allocation and prints them as
//! JSON, for checking published build cards against the formula.

use clap::{Parser, ValueEnum};
use serde::Serialize;
use soulframe_atlas::catalog::{load_catalog, pact_role_text, weapon_role_text, BuildCatalog};
use soulframe_atlas::core::VirtueProfile;
use soulframe_atlas::lab::{
    classify_pact, classify_weapon, compute_metrics, Metrics, PactStyle, WeaponStyle,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Build Metrics - compute build lab ratings from the command line
#[derive(Parser, Debug)]
#[command(name = "build_metrics")]
#[command(about = "Compute build lab ratings for a virtue allocation, pact and weapon")]
struct Args {
    /// Courage allocation (0-100)
    #[arg(long, default_value_t = 40.0)]
    courage: f64,

    /// Grace allocation (0-100)
    #[arg(long, default_value_t = 30.0)]
    grace: f64,

    /// Spirit allocation (0-100)
    #[arg(long, default_value_t = 30.0)]
    spirit: f64,

    /// Catalog JSON with builds, pacts and weapons (built-in samples if omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Curated build id; its pact, weapon and virtues are used
    #[arg(long)]
    build: Option<String>,

    /// Pact id from the catalog
    #[arg(long)]
    pact: Option<String>,

    /// Weapon id from the catalog
    #[arg(long)]
    weapon: Option<String>,

    /// Pact style key, overrides --pact (defender, vanguard, mystic, neutral)
    #[arg(long)]
    pact_style: Option<String>,

    /// Weapon style key, overrides --weapon (sword_shield, heavy, spirit, finesse, ranged, balanced)
    #[arg(long)]
    weapon_style: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// JSON output structure
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildReport {
    build: Option<String>,
    virtues: VirtueProfile,
    pact: String,
    weapon: String,
    pact_style: PactStyle,
    weapon_style: WeaponStyle,
    metrics: Metrics,
    complexity_stars: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => match load_catalog(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error: failed to load catalog {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => BuildCatalog::with_defaults(),
    };

    let build = match args.build.as_deref() {
        Some(id) => match catalog.find_build(id) {
            Some(build) => Some(build),
            None => {
                eprintln!("Error: no build with id '{}'", id);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let pact_id = args
        .pact
        .as_deref()
        .or_else(|| build.and_then(|b| b.pact_id.as_deref()));
    let weapon_id = args
        .weapon
        .as_deref()
        .or_else(|| build.and_then(|b| b.weapon_id.as_deref()));
    let pact = pact_id.and_then(|id| catalog.find_pact(id));
    let weapon = weapon_id.and_then(|id| catalog.find_weapon(id));

    let pact_style = match args.pact_style.as_deref() {
        Some(key) => match PactStyle::from_key(key) {
            Some(style) => style,
            None => {
                eprintln!("Error: unknown pact style '{}'", key);
                return ExitCode::FAILURE;
            }
        },
        None => classify_pact(pact),
    };
    let weapon_style = match args.weapon_style.as_deref() {
        Some(key) => match WeaponStyle::from_key(key) {
            Some(style) => style,
            None => {
                eprintln!("Error: unknown weapon style '{}'", key);
                return ExitCode::FAILURE;
            }
        },
        None => classify_weapon(weapon),
    };

    let virtues = build
        .and_then(|b| b.virtues)
        .unwrap_or_else(|| VirtueProfile::new(args.courage, args.grace, args.spirit))
        .clamped();
    let metrics = compute_metrics(&virtues, pact_style, weapon_style);

    let report = BuildReport {
        build: build.map(|b| b.name.clone()),
        virtues,
        pact: pact_role_text(pact).to_string(),
        weapon: weapon_role_text(weapon).to_string(),
        pact_style,
        weapon_style,
        complexity_stars: metrics.complexity_stars(),
        metrics,
    };

    match args.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => {
            println!("Build Metrics");
            println!("=============");
            if let Some(name) = &report.build {
                println!("Build: {}", name);
            }
            println!(
                "Virtues: courage {} / grace {} / spirit {}",
                virtues.courage, virtues.grace, virtues.spirit
            );
            println!("Pact: {} ({})", report.pact, pact_style);
            println!("Weapon: {} ({})", report.weapon, weapon_style);
            println!("Damage: {:.2}", metrics.damage);
            println!("Defense: {:.2}", metrics.defense);
            println!("Mobility: {:.2}", metrics.mobility);
            println!("Control: {:.2}", metrics.control);
            println!("Complexity: {} ({})", metrics.complexity, report.complexity_stars);
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_values() {
        let args = Args::try_parse_from(["build_metrics", "--format", "text"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);

        let args = Args::try_parse_from(["build_metrics"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);

        assert!(Args::try_parse_from(["build_metrics", "--format", "xml"]).is_err());
    }
}
