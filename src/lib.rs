//! # HTTP File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo de archivos estáticos: escucha en un puerto,
//! atiende un cliente a la vez, parsea la request line y sirve un archivo
//! del directorio raíz configurado (o una página de error).
//!
//! ## Arquitectura
//!
//! - `config`: Valores por defecto, archivo INI y overrides de CLI
//! - `http`: Request line, responses, status codes y tipos MIME
//! - `handler`: Request → path en disco → Response
//! - `server`: Listener TCP y loop de conexiones secuencial
//! - `logging`: Backend de logs
//! - `error`: Errores fatales del proceso
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_file_server::config::ServerConfig;
//! use http_file_server::server::Server;
//!
//! let config = ServerConfig::default();
//! let server = Server::bind(config).expect("Error al hacer bind");
//! server.run().expect("Error en el servidor");
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logging;
pub mod server;
