use crate::demo::{run_catalog, run_demo, run_score, CatalogArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mern_readiness::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MERN Readiness Assessment",
    about = "Run the MERN stack readiness assessment service or score answers from the command line",
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
    /// Print the questions of one battery
    Catalog(CatalogArgs),
    /// Score three answer sheets (CSV) and print the report
    Score(ScoreArgs),
    /// Walk a scripted respondent through the full assessment
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
        Command::Catalog(args) => run_catalog(args),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
