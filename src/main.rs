// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing -> stderr, so JSON on stdout stays clean)
// 3. Run the scan
// 4. Print results, optionally write them to a file
// 5. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use link_monitor::{JsonFileSink, LinkMonitor, Priority, ResultSink, ScanResult};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = the scan couldn't start or the output couldn't be written
async fn run(cli: Cli) -> Result<i32> {
    let options = cli.command.scan_options();

    match cli.command {
        Commands::Scan {
            website_url,
            json,
            output,
            ..
        } => {
            let monitor = LinkMonitor::new(&website_url, options)
                .with_context(|| format!("cannot scan {}", website_url))?;

            if !json {
                println!("🔍 Scanning website: {}", monitor.target().base());
            }

            let result = monitor.scan().await;

            if let Some(path) = output {
                JsonFileSink::new(&path)
                    .store(&result)
                    .await
                    .with_context(|| format!("cannot write {}", path.display()))?;
            }

            print_results(&result, json)?;

            Ok(if result.has_broken_links() { 1 } else { 0 })
        }
    }
}

fn print_results(result: &ScanResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_table(result);
    }
    Ok(())
}

fn print_table(result: &ScanResult) {
    let progress = &result.progress;
    println!(
        "📄 Scanned {} of {} known page(s), checked {} resource(s)\n",
        progress.scanned_pages, progress.total_pages, progress.checked_links
    );

    if result.broken_links.is_empty() {
        println!("✅ No broken links found");
    } else {
        println!("{:<60} {:<8} {:<11} {:<30}", "URL", "PRIORITY", "TYPE", "ERROR");
        println!("{}", "=".repeat(112));

        for link in &result.broken_links {
            let url_display = if link.url.chars().count() > 57 {
                format!("{}...", link.url.chars().take(57).collect::<String>())
            } else {
                link.url.clone()
            };

            println!(
                "{:<60} {:<8} {:<11} {:<30}",
                url_display,
                format_priority(link.priority),
                format!("{:?}", link.kind).to_lowercase(),
                link.error
            );
            println!("    found on {}", link.source_page);
        }
    }

    let summary = &result.summary;
    println!();
    println!("📊 Summary:");
    println!("   📋 Resources: {}", summary.total_links_found);
    println!("   ❌ Broken: {}", summary.broken_links_found);
    println!("      internal: {}", summary.internal_broken_links);
    println!("      external: {}", summary.external_broken_links);
    println!("      images:   {}", summary.image_broken_links);
    println!("      other:    {}", summary.other_broken_links);

    if progress.scanned_pages == 0 {
        println!("\n⚠️  The start page could not be fetched, nothing was crawled");
    }
}

fn format_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}
