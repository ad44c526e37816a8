use clap::{Args, Parser, Subcommand};

use reclaim::error::AppError;
use reclaim::tracking::assessments::QuestionBank;

use crate::demo::{run_demo, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Reclaim Tracking Service",
    about = "Run the reclaim self-help tracking service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the built-in question bank
    Catalog,
    /// Walk a fresh user through onboarding and a first daily selection
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog => print_catalog(),
        Command::Demo(args) => run_demo(args),
    }
}

fn print_catalog() -> Result<(), AppError> {
    let bank = QuestionBank::standard()?;

    println!("{:<6} {:<5} {:<9} {:<28} questions", "code", "level", "cluster", "name");
    for definition in bank.definitions() {
        println!(
            "{:<6} {:<5} {:<9} {:<28} {}",
            definition.code,
            definition.level.label(),
            definition.cluster.unwrap_or("-"),
            definition.name,
            definition.questions.len(),
        );
    }

    Ok(())
}
