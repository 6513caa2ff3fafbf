mod app;
mod config;
mod logging;
mod media;
mod player;
mod playlist;
mod runtime;
mod theme;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
