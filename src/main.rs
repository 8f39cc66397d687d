use clap::Parser;
use fleet_etl::config::paths;
use fleet_etl::domain::ports::ConfigProvider;
use fleet_etl::utils::error::ErrorSeverity;
use fleet_etl::utils::{logger, validation::Validate};
use fleet_etl::{
    CliConfig, FixedIterations, FleetEngine, FleetError, FleetPipeline, KeyPrompt, LocalStorage,
    Settings,
};

fn main() {
    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, cli.json_logs);
            exit_with(e);
        }
    };

    logger::init_cli_logger(config.logging.verbose, config.logging.json);
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = cli.validate() {
        exit_with(e);
    }

    // Output locations are fixed here for the rest of the run.
    let settings = match paths::executable_dir().and_then(|dir| Settings::resolve(&config, &dir)) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };
    tracing::info!(
        "Writing cars to {} and motor boats to {}",
        settings.output_paths.cars.display(),
        settings.output_paths.motor_boats.display()
    );

    let storage = LocalStorage::new(settings.encoding());
    let pipeline = FleetPipeline::new(storage, settings);
    let mut engine = FleetEngine::new(pipeline);

    let result = match cli.iterations {
        Some(iterations) => engine.run(&mut FixedIterations::new(iterations)),
        None => engine.run(&mut KeyPrompt::new()),
    };

    match result {
        Ok(summary) => {
            tracing::debug!("Run summary: {:?}", summary);
            println!("The program has finished, thank you for using it.");
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: FleetError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
