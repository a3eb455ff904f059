//! WDSVM Command Line Interface
//!
//! A command-line interface for training, evaluating, and using
//! weighted-degree string SVM models on labeled sequence files.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use wdsvm::api::{TrainedModel, WdSvm};
use wdsvm::core::Result;
use wdsvm::data::{Alphabet, StringDataset};
use wdsvm::persistence::SerializableModel;
use wdsvm::SequenceDataset;

#[derive(Parser)]
#[command(name = "wdsvm")]
#[command(about = "A weighted-degree string kernel SVM in Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "WDSVM Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new model
    Train(TrainArgs),
    /// Make predictions using a trained model
    Predict(PredictArgs),
    /// Evaluate a model on test data
    Evaluate(EvaluateArgs),
    /// Display model information
    Info(InfoArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (label and sequence per line)
    #[arg(long)]
    data: PathBuf,

    /// Output model file
    #[arg(short, long)]
    output: PathBuf,

    /// Alphabet: dna, rna, protein, or a custom symbol string
    #[arg(short, long, default_value = "dna")]
    alphabet: String,

    /// Maximum k-mer order of the feature map
    #[arg(long, default_value = "4")]
    degree: usize,

    /// Regularization parameter C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// Convergence tolerance
    #[arg(short, long, default_value = "0.001")]
    epsilon: f64,

    /// Maximum cutting-plane iterations
    #[arg(short, long, default_value = "1000")]
    max_iterations: usize,

    /// Cut buffer capacity
    #[arg(long, default_value = "3000")]
    bufsize: usize,
}

#[derive(Args)]
struct PredictArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,

    /// Data file with sequences to classify
    #[arg(long)]
    data: PathBuf,

    /// Output file for predictions (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,

    /// Labeled test data file
    #[arg(long)]
    data: PathBuf,
}

#[derive(Args)]
struct InfoArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn parse_alphabet(name: &str) -> Result<Alphabet> {
    match name.to_ascii_lowercase().as_str() {
        "dna" => Ok(Alphabet::dna()),
        "rna" => Ok(Alphabet::rna()),
        "protein" => Ok(Alphabet::protein()),
        _ => Alphabet::new(name),
    }
}

fn load_model(path: &PathBuf) -> Result<TrainedModel> {
    info!("Loading model from: {path:?}");
    SerializableModel::load_from_file(path)?.to_trained_model()
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Training WD-SVM model...");
    info!("Data file: {:?}", args.data);
    info!(
        "Parameters: degree={}, C={}, epsilon={}, max_iter={}, bufsize={}",
        args.degree, args.c, args.epsilon, args.max_iterations, args.bufsize
    );

    let alphabet = parse_alphabet(&args.alphabet)?;
    let dataset = StringDataset::from_file(&args.data, &alphabet)?;
    info!(
        "Loaded {} sequences of length {}",
        dataset.len(),
        dataset.seq_len()
    );

    let model = WdSvm::new()
        .with_alphabet(alphabet)
        .with_degree(args.degree)
        .with_c(args.c)
        .with_epsilon(args.epsilon)
        .with_max_iterations(args.max_iterations)
        .with_bufsize(args.bufsize)
        .train(&dataset)?;

    info!("Training completed successfully");
    let model_info = model.info();
    info!("Feature dimension: {}", model_info.feature_dim);
    info!("Cutting planes: {}", model_info.num_cuts);
    info!("Converged: {}", model_info.converged);

    SerializableModel::from_trained_model(&model).save_to_file(&args.output)?;
    info!("Model saved to: {:?}", args.output);

    let accuracy = model.evaluate(&dataset)?;
    info!("Training accuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}

fn predict_command(args: PredictArgs) -> Result<()> {
    let model = load_model(&args.model)?;

    info!("Loading prediction data from: {:?}", args.data);
    let predictions = model.predict_from_file(&args.data)?;
    info!("Predicted {} sequences", predictions.len());

    let mut lines = String::new();
    for prediction in &predictions {
        lines.push_str(&format!(
            "{:+.0} {:.6}\n",
            prediction.label, prediction.decision_value
        ));
    }

    match &args.output {
        Some(output_path) => {
            std::fs::write(output_path, lines)?;
            info!("Predictions saved to: {output_path:?}");
        }
        None => print!("{lines}"),
    }

    Ok(())
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    let model = load_model(&args.model)?;

    info!("Loading test data from: {:?}", args.data);
    let dataset = StringDataset::from_file(&args.data, model.alphabet())?;

    let metrics = model.evaluate_detailed(&dataset)?;
    println!("Accuracy:    {:.4}", metrics.accuracy());
    println!("Precision:   {:.4}", metrics.precision());
    println!("Recall:      {:.4}", metrics.recall());
    println!("F1 Score:    {:.4}", metrics.f1_score());
    println!("Specificity: {:.4}", metrics.specificity());
    println!(
        "Confusion:   TP={} TN={} FP={} FN={}",
        metrics.true_positives,
        metrics.true_negatives,
        metrics.false_positives,
        metrics.false_negatives
    );

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    let model = SerializableModel::load_from_file(&args.model)?;
    model.print_summary();
    Ok(())
}
