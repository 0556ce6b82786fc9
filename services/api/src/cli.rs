use crate::draw::{run_draw, run_inventory, DrawArgs, InventoryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use parking_lottery::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Parking Lottery",
    about = "Run parking-space lottery rounds from the command line or over HTTP",
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
    /// Draw one or more lottery rounds and print the winners
    Draw(DrawArgs),
    /// Summarize the roster and parking inventory
    Inventory(InventoryArgs),
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
        Command::Draw(args) => run_draw(args),
        Command::Inventory(args) => run_inventory(args),
    }
}
