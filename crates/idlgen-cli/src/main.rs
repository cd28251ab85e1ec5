//! idlgen CLI.
//!
//! Reads parsed IDL documents (JSON) and writes Scala or Java sources.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use idlgen::{Document, GenerateResult, Generator, GeneratorConfig, ServiceOption};

mod ui;

#[derive(Parser)]
#[command(name = "idlgen")]
#[command(version)]
#[command(about = "Generate Scala or Java sources from a parsed IDL document")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sources for one or more documents
    Generate {
        #[command(flatten)]
        target: TargetArgs,

        /// Show the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// List the files a generation would produce
    Files {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Parsed IDL documents (JSON)
    #[arg(required = true)]
    documents: Vec<PathBuf>,

    /// Output root; namespace directories are created below it
    #[arg(short, long, default_value = "generated")]
    out: PathBuf,

    /// Output language
    #[arg(short, long, default_value = "scala")]
    language: String,

    /// Optional sections to generate (repeatable)
    #[arg(short = 'w', long = "with", value_enum)]
    with: Vec<OptionArg>,
}

/// Command-line spelling of [`ServiceOption`].
#[derive(Clone, Copy, ValueEnum)]
enum OptionArg {
    Client,
    Server,
    Monitoring,
}

impl From<OptionArg> for ServiceOption {
    fn from(arg: OptionArg) -> Self {
        match arg {
            OptionArg::Client => ServiceOption::WithClient,
            OptionArg::Server => ServiceOption::WithServer,
            OptionArg::Monitoring => ServiceOption::WithMonitoring,
        }
    }
}

impl TargetArgs {
    fn config(&self, dry_run: bool) -> GeneratorConfig {
        GeneratorConfig {
            out_dir: self.out.clone(),
            language: self.language.clone(),
            service_options: self.with.iter().copied().map(ServiceOption::from).collect::<BTreeSet<_>>(),
            dry_run,
        }
    }
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "idlgen=info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { target, dry_run } => run(&target, dry_run, dry_run),
        Commands::Files { target } => run(&target, true, true),
    }
}

fn run(target: &TargetArgs, dry_run: bool, list_files: bool) -> miette::Result<()> {
    ui::header(env!("CARGO_PKG_VERSION"));

    let generator = Generator::new(target.config(dry_run))?;
    let start = Instant::now();
    let mut total_files = 0;

    for path in &target.documents {
        let spinner = ui::spinner(&format!("Generating {}...", path.display()));
        let result = generate_one(&generator, path);
        spinner.finish_and_clear();

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                ui::error(&format!("{} was not generated", path.display()));
                return Err(e);
            }
        };

        total_files += result.files.len();
        if list_files {
            print_files(&result);
        } else {
            ui::success(&format!(
                "{} {} {}",
                path.display(),
                ui::symbols::TRIANGLE,
                result.namespace
            ));
        }
    }

    println!();
    ui::summary(
        target.documents.len(),
        total_files,
        start.elapsed().as_millis(),
        dry_run,
    );
    if dry_run {
        ui::info("Dry run: nothing was written.");
    }

    Ok(())
}

fn generate_one(generator: &Generator, path: &Path) -> miette::Result<GenerateResult> {
    let document = Document::load(path)?;
    Ok(generator.generate(&document)?)
}

fn print_files(result: &GenerateResult) {
    let Some(dir) = result.files.first().and_then(|f| f.parent()) else {
        ui::info(&format!("{}: nothing to generate", result.namespace));
        return;
    };

    ui::tree_dir(dir);
    let count = result.files.len();
    for (i, file) in result.files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui::tree_item(&name, i + 1 == count);
    }
}
