use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use abifgen::{run_gen, GeneratorConfig};

/// abifgen - Synthesize ABIF trace files from weighted FASTA
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one .ab1 per read name from optionally weighted FASTA
    Gen(GenArgs),
}

#[derive(clap::Args, Debug)]
struct GenArgs {
    /// .fasta file or directory of .fasta files
    #[clap(short = 's', long = "source")]
    source: PathBuf,

    /// Destination directory
    #[clap(short = 'd', long = "dest")]
    dest: PathBuf,

    /// Lane number written into every file
    #[clap(long = "lane", default_value = "1")]
    lane: i16,

    /// Comment written into every file
    #[clap(long = "comment")]
    comment: Option<String>,

    /// Also write the fixed demonstration records
    #[clap(long = "diagnostics")]
    diagnostics: bool,
}

fn run_gen_command(args: &GenArgs) -> Result<()> {
    let mut builder = GeneratorConfig::builder()
        .lane(args.lane)
        .diagnostics(args.diagnostics);
    if let Some(comment) = &args.comment {
        builder = builder.comment(comment);
    }
    let config = builder.build()?;

    let written = run_gen(&args.source, &args.dest, &config)?;
    log::info!("Generated {} files into {}", written.len(), args.dest.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Gen(args) => run_gen_command(args),
    }
}
