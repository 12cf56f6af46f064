mod app;
mod audio;
mod clipboard;
mod commands;
mod config;
mod language;
mod logging;
mod setup;
mod transcription;
mod translation;

#[tokio::main]
async fn main() {
    if let Err(e) = app::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
