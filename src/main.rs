use clap::Parser;
use qbank_scrape::Crawl;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    ::log::info!("Starting crawl for subject: {}", config.subject.slug());

    println!("Note: crawling requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );
    println!("Run the driver with a visible browser window to monitor crawl health.");

    let start_time = std::time::Instant::now();

    match Crawl::from_config(config).run().await {
        Ok(summary) => {
            let duration = start_time.elapsed();
            ::log::info!(
                "Crawl complete - {} records extracted, {} items skipped across {} pages in {:.2} seconds",
                summary.extracted,
                summary.skipped,
                summary.pages,
                duration.as_secs_f64()
            );
        }
        Err(e) => {
            ::log::error!("Crawl failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
