use clap::Parser;
use corpus_harvest::Harvest;
use corpus_harvest::corpus;
use std::process::ExitCode;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Crawl(crawl_args) => {
            let config = match crawl_args.into_config() {
                Ok(config) => config,
                Err(e) => {
                    ::log::error!("Failed to load configuration: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            match &config.webdriver_url {
                Some(endpoint) => ::log::info!("Using remote WebDriver at {}", endpoint),
                None => ::log::info!(
                    "Using local {} (set SELENIUM_URL to use a remote WebDriver)",
                    config.chromedriver_path
                ),
            }

            let start_time = std::time::Instant::now();
            match Harvest::new(config).run().await {
                Ok(outcome) => {
                    ::log::info!(
                        "Harvest complete in {:.2} seconds: {} records ({} html, {} pdf) written to {}",
                        start_time.elapsed().as_secs_f64(),
                        outcome.summary.total,
                        outcome.summary.html,
                        outcome.summary.pdf,
                        outcome.corpus_path.display()
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    ::log::error!("Harvest failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Sample(sample_args) => {
            match corpus::write_sample(
                &sample_args.input,
                &sample_args.output,
                sample_args.html,
                sample_args.pdf,
            ) {
                Ok(info) => {
                    ::log::info!(
                        "Sampled {} of {} html and {} of {} pdf records into {}",
                        info.sampled_html,
                        info.total_html,
                        info.sampled_pdf,
                        info.total_pdf,
                        sample_args.output.display()
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    ::log::error!("Sampling failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
