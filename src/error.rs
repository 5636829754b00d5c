//! # Errores del proceso
//! src/error.rs
//!
//! Fallos que impiden arrancar o mantener el servidor. Los errores de un
//! request individual nunca llegan acá: se transforman en páginas de error.

use crate::config::ConfigError;
use std::io;

/// Error fatal del servidor
#[derive(Debug)]
pub enum ServerError {
    /// Configuración ilegible o inválida
    Config(ConfigError),

    /// No se pudo instalar el logger
    Logging(log::SetLoggerError),

    /// Error de socket (bind, listen, accept)
    Io(io::Error),

    /// No se pudo serializar la configuración
    Json(serde_json::Error),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "{}", e),
            ServerError::Logging(e) => write!(f, "Cannot initialize logging: {}", e),
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
            ServerError::Json(e) => write!(f, "Cannot serialize configuration: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Config(e) => Some(e),
            ServerError::Logging(e) => Some(e),
            ServerError::Io(e) => Some(e),
            ServerError::Json(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(e: ConfigError) -> Self {
        ServerError::Config(e)
    }
}

impl From<io::Error> for ServerError {
    fn from(e: io::Error) -> Self {
        ServerError::Io(e)
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::Json(e)
    }
}

impl From<fern::InitError> for ServerError {
    fn from(e: fern::InitError) -> Self {
        match e {
            fern::InitError::Io(e) => ServerError::Io(e),
            fern::InitError::SetLoggerError(e) => ServerError::Logging(e),
        }
    }
}
