use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use api::CatalogService;
use errors::AppError;
use session::SessionStore;
use shell::Shell;

mod api;
mod errors;
mod schema;
mod session;
mod shell;
mod views;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:4001/api/v1";
const DEFAULT_SESSION_FILE: &str = "session.json";

#[tokio::main]
async fn main() -> Result<(), AppError> {

    dotenv().ok();

    // stdout is the UI surface, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let backend_url = std::env::var("BACKEND_URL")
        .unwrap_or_else(|_| String::from(DEFAULT_BACKEND_URL));

    let session_file = std::env::var("SESSION_FILE")
        .unwrap_or_else(|_| String::from(DEFAULT_SESSION_FILE));

    let api = CatalogService::new(&backend_url)?;
    let store = SessionStore::open(&session_file)?;

    println!("course client talking to {}", backend_url);

    let mut shell = Shell::new(api, store);
    shell.run().await.map_err(|_e| AppError::Stdin)?;

    Ok(())
}
