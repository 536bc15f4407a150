use anyhow::Context;
use clap::Parser;
use pod_directory::core::repair;
use pod_directory::utils::logger;
use serde_json::Value;
use std::path::Path;

/// Offline validation and repair for pod JSON files. Runs out of band;
/// the server never rewrites descriptors itself.
#[derive(Debug, Parser)]
#[command(name = "pod_repair")]
#[command(about = "Validate and normalize pod JSON descriptors")]
struct RepairConfig {
    #[arg(long, env = "PODS_DIR", default_value = "./pods")]
    pods_dir: String,

    #[arg(long, default_value = "v1")]
    version: String,

    #[arg(long, help = "Report fixes without writing files")]
    dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let config = RepairConfig::parse();
    logger::init_tool_logger(config.verbose);

    let version_dir = Path::new(&config.pods_dir).join(&config.version);
    let mut entries: Vec<_> = std::fs::read_dir(&version_dir)
        .with_context(|| format!("Could not read {}", version_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some("json")
                && path.file_name().and_then(|name| name.to_str()) != Some("schema.json")
        })
        .collect();
    entries.sort();

    println!("Validating {} JSON files...\n", entries.len());

    let mut files_fixed = 0usize;
    let mut total_fixes = 0usize;
    let mut errors = Vec::new();

    for path in &entries {
        let display_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                println!("✗ {}: Error - {}", display_name, err);
                errors.push(display_name);
                continue;
            }
        };

        let mut pod: Value = match serde_json::from_str(&content) {
            Ok(pod) => pod,
            Err(err) => {
                println!("✗ {}: Error - {}", display_name, err);
                errors.push(display_name);
                continue;
            }
        };

        let fixes = repair::normalize_pod(&mut pod, &stem);
        if fixes.is_empty() {
            println!("✓ {}: Valid", display_name);
            continue;
        }

        println!("✓ {}: Fixed {} issue(s)", display_name, fixes.len());
        for fix in fixes.iter().take(5) {
            println!("  - {}", fix);
        }
        if fixes.len() > 5 {
            println!("  ... and {} more", fixes.len() - 5);
        }

        if !config.dry_run {
            let output = format!("{}\n", serde_json::to_string_pretty(&pod)?);
            std::fs::write(path, output)
                .with_context(|| format!("Could not write {}", path.display()))?;
        }

        files_fixed += 1;
        total_fixes += fixes.len();
    }

    println!("\nSummary:");
    println!("  Files checked: {}", entries.len());
    println!("  Files fixed: {}", files_fixed);
    println!("  Total fixes applied: {}", total_fixes);
    if !errors.is_empty() {
        println!("  Errors: {}", errors.len());
        anyhow::bail!("{} file(s) could not be parsed", errors.len());
    }

    Ok(())
}
