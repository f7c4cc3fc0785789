use clap::Parser;
use medclass_classifiers::{
    ClassificationEngine, ClassifierRegistry, ClassifiersConfig, PatternClassifierFactory,
};
use medclass_core::record::MemoryTagDictionary;
use medclass_core::to_results;
use medclass_demo::cli::{Cli, Commands};
use medclass_demo::json::{FileStorage, JsonRecordDecoder};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            config,
            criteria,
            input,
            verbose,
        } => {
            init_logging(verbose);

            let engine = build_engine(&config).await?;
            let predictions = engine.predict_uri(&criteria, &input, &[]).await?;
            if predictions.is_empty() {
                println!("no predictions for {}", input);
                return Ok(());
            }

            let mut results = to_results(engine.name(), &predictions);
            results.sort_by(|a, b| b.score.total_cmp(&a.score));
            for result in results {
                println!("{:.4}  {}", result.score, result.uri);
            }
        }

        Commands::List { config, verbose } => {
            init_logging(verbose);

            let config = ClassifiersConfig::from_file(&config)?;
            for (name, spec) in &config.classifiers {
                let mode = if spec.preload { "preload" } else { "lazy" };
                println!("{}  [{}]  criteria: {}", name, mode, spec.criteria.join(", "));
            }
        }
    }

    Ok(())
}

async fn build_engine(config_path: &str) -> anyhow::Result<ClassificationEngine> {
    let dictionary = Arc::new(MemoryTagDictionary::with_standard_tags());

    let registry: ClassifierRegistry<medclass_core::Record> = ClassifierRegistry::new(Arc::new(
        PatternClassifierFactory::new(dictionary.clone()),
    ));
    let config = ClassifiersConfig::from_file(config_path)?;
    config.register_all(&registry).await;

    Ok(ClassificationEngine::new(
        "medclass",
        registry,
        Arc::new(FileStorage),
        Arc::new(JsonRecordDecoder::new(dictionary)),
    ))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
