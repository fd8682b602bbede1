//! # tgexport CLI
//!
//! Command-line interface for the tgexport library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use tgexport::TgExportError;
use tgexport::cli::{Args, ExportRequest};
use tgexport::config::ClientConfig;
use tgexport::core::export_history;
use tgexport::format::{resolve_output_path, write_to_format};
use tgexport::telegram::{self, TelegramClient};

#[tokio::main]
async fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tgexport=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), TgExportError> {
    dotenvy::dotenv().ok();

    if args.auth {
        let config = ClientConfig::from_env()?;
        println!("🔑 Authorizing (session in {})", config.data_dir.display());
        telegram::bootstrap(&config).await?;
        println!("✅ Session saved to {}", config.session_path().display());
        return Ok(());
    }

    // Input errors surface before credentials are even read.
    let request = args.validate()?;
    let config = ClientConfig::from_env()?;
    let output_path = resolve_output_path(&args.output, request.format, &config.output_base());

    print_header(&request, &output_path);
    export(&config, &request, &output_path).await
}

async fn export(
    config: &ClientConfig,
    request: &ExportRequest,
    output_path: &std::path::Path,
) -> Result<(), TgExportError> {
    let total_start = Instant::now();

    let client = TelegramClient::connect(config).await?;
    client.ensure_authorized().await?;

    println!("⏳ Reading history...");
    let fetch_start = Instant::now();
    let result = export_history(&client, &request.channel, &request.options).await?;
    println!(
        "   Collected {} posts from {} messages ({:.2}s, {})",
        result.len(),
        result.stats.scanned,
        fetch_start.elapsed().as_secs_f64(),
        result.stats.stop
    );

    println!("💾 Writing {}...", request.format);
    write_to_format(
        &result.entries,
        output_path,
        request.format,
        &request.output_config,
    )?;
    client.save_session()?;

    println!();
    if result.is_empty() {
        println!("⚠️  No posts matched; wrote an empty file to {}", output_path.display());
    } else {
        println!("✅ Done! Output saved to {}", output_path.display());
    }

    println!();
    println!("📊 Summary:");
    println!("   Scanned:       {} messages", result.stats.scanned);
    if result.stats.skipped_newer > 0 {
        println!("   Newer than end: {} skipped", result.stats.skipped_newer);
    }
    if result.stats.without_text > 0 {
        println!("   Without text:  {} skipped", result.stats.without_text);
    }
    println!("   Exported:      {} posts", result.stats.kept);
    println!("   Total time:    {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn print_header(request: &ExportRequest, output_path: &std::path::Path) {
    let range = &request.options.range;

    println!("📦 tgexport v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📣 Channel: {}", request.channel);
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", request.format);
    println!(
        "📅 Range:   {} - {}",
        range.start().with_timezone(&chrono::Local).format("%d.%m.%Y"),
        range.end().with_timezone(&chrono::Local).format("%d.%m.%Y")
    );
    if let Some(limit) = request.options.limit {
        println!("🔢 Limit:   {}", limit);
    }
    if request.options.strip_links {
        println!("✂️  Links and mentions will be stripped");
    }
    println!();
}
