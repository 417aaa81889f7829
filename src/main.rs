use clap::Parser;
use doctor_directory::core::url_state::share_link;
use doctor_directory::utils::logger;
use doctor_directory::view::{self, OutputFormat};
use doctor_directory::{
    CliConfig, DirectoryError, DoctorDirectory, HttpDoctorRepository, MemoryQueryStore,
};
use url::Url;

fn exit_with(e: DirectoryError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting doctor-directory");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = config.resolve().unwrap_or_else(|e| exit_with(e));
    let repository = HttpDoctorRepository::new(&settings).unwrap_or_else(|e| exit_with(e));

    let store = MemoryQueryStore::new(&config.query);
    let mut directory = DoctorDirectory::new(repository, store);

    tracing::info!("Loading doctors from: {}", settings.api_endpoint);
    directory.load().await;
    config.apply(&mut directory);

    let query = directory.query();
    let output = view::render(
        settings.format,
        directory.filters(),
        directory.is_loading(),
        &query,
    )
    .unwrap_or_else(|e| exit_with(e));
    print!("{}", output);

    if let Some(page_url) = &settings.page_url {
        let base = Url::parse(page_url).unwrap_or_else(|e| {
            exit_with(DirectoryError::InvalidConfigValueError {
                field: "page_url".to_string(),
                value: page_url.clone(),
                reason: e.to_string(),
            })
        });
        let link = share_link(&base, directory.filters().criteria());
        if settings.format == OutputFormat::Text {
            println!("\nShare: {}", link);
        } else {
            tracing::info!("Share: {}", link);
        }
    }

    Ok(())
}
