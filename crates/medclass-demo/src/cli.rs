use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "medclass-demo")]
#[command(
    author,
    version,
    about = "Criterion-routed classification of imaging records"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a record under one or more comma-separated criteria
    Classify {
        /// Classifiers config path
        #[arg(long, default_value = "./classifiers.yaml")]
        config: String,

        /// Comma-separated classification criteria, e.g. "modality,region"
        #[arg(short, long)]
        criteria: String,

        /// Path or file:// URI of a JSON record to classify
        input: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// List configured classifiers and the criteria they answer
    List {
        /// Classifiers config path
        #[arg(long, default_value = "./classifiers.yaml")]
        config: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
