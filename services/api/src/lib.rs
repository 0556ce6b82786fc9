mod cli;
mod draw;
mod infra;
mod routes;
mod server;

use parking_lottery::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
