//! # HTTP File Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada: CLI → logging → configuración → servidor.

use clap::Parser;
use http_file_server::config::{Cli, ServerConfig};
use http_file_server::error::ServerError;
use http_file_server::logging;
use http_file_server::server::Server;
use log::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("Fatal: {}", e);
        // Si el logger no llegó a instalarse, el error igual tiene que verse
        if matches!(e, ServerError::Logging(_)) {
            eprintln!("Fatal: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ServerError> {
    logging::init(cli.log_level)?;

    let config = ServerConfig::from_cli(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    config.log_summary();

    // Crear el servidor (bind + listen)
    let server = Server::bind(config)?;

    // Iniciar el servidor (esto bloqueará el thread)
    server.run()?;
    Ok(())
}
