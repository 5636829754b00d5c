//! # Manejo de Requests
//! src/handler.rs
//!
//! Convierte los bytes leídos del socket en una `Response`:
//!
//! ```text
//! bytes → parse → ¿GET? → resolver path → abrir archivo → Response
//!           │        │          │              │
//!          400      501        400            404 / 500
//! ```

use crate::config::ServerConfig;
use crate::http::{mime_type, Method, Request, Response, StatusCode};
use crate::http::response::DEFAULT_VERSION;
use log::{debug, error, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Motivo por el que un path no se puede mapear al disco
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Contiene "..", '\\' o un byte NUL
    Traversal(String),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Traversal(p) => write!(f, "Path traversal attempt: {}", p),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Traduce un path de request a un path del sistema de archivos
///
/// - "/" → `root/default_file`
/// - "/dir/" → `root/dir/default_file`
/// - "/a/b.css" → `root/a/b.css`
///
/// # Ejemplo
/// ```
/// use std::path::Path;
/// use http_file_server::handler::resolve_path;
///
/// let root = Path::new("/srv/www");
/// assert_eq!(resolve_path(root, "index.html", "/").unwrap(), root.join("index.html"));
/// assert!(resolve_path(root, "index.html", "/../etc/passwd").is_err());
/// ```
pub fn resolve_path(root: &Path, default_file: &str, path: &str) -> Result<PathBuf, ResolveError> {
    if path.contains("..") || path.contains('\\') || path.contains('\0') {
        return Err(ResolveError::Traversal(path.to_string()));
    }

    let relative = path.trim_start_matches('/');
    if relative.is_empty() {
        return Ok(root.join(default_file));
    }

    let mut full = root.join(relative);
    if path.ends_with('/') {
        full.push(default_file);
    }
    Ok(full)
}

/// Handler de archivos estáticos
///
/// Guarda la configuración compartida (de sólo lectura) y no tiene
/// estado entre requests.
#[derive(Debug, Clone)]
pub struct FileHandler {
    config: Arc<ServerConfig>,
}

impl FileHandler {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config }
    }

    /// Procesa un request crudo y retorna la respuesta lista para enviar
    ///
    /// Nunca falla: todo error termina en una página de error.
    pub fn handle(&self, raw: &[u8]) -> Response {
        let request = match Request::parse(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("Malformed request: {}", e);
                return Response::error(
                    DEFAULT_VERSION,
                    StatusCode::BadRequest,
                    "Your request could not be parsed.",
                );
            }
        };

        debug!(
            "Parsed request: method='{}' path='{}' version='{}'",
            request.method().as_str(),
            request.path(),
            request.version()
        );

        if *request.method() != Method::GET {
            warn!("Method {} not implemented", request.method().as_str());
            return Response::error(
                request.version(),
                StatusCode::NotImplemented,
                "Only GET method is supported.",
            );
        }

        self.serve_file(&request)
    }

    /// Resuelve, abre y prepara el archivo pedido
    fn serve_file(&self, request: &Request) -> Response {
        let version = request.version();

        let mut full_path = match resolve_path(
            &self.config.root_dir,
            &self.config.default_file,
            request.path(),
        ) {
            Ok(path) => path,
            Err(e) => {
                warn!("{}", e);
                return Response::error(version, StatusCode::BadRequest, "Invalid path.");
            }
        };

        // "/docs" sin barra final, pero es un directorio
        if full_path.is_dir() {
            full_path.push(&self.config.default_file);
        }

        debug!("Attempting to open file: {}", full_path.display());
        let file = match File::open(&full_path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Cannot open {}: {}", full_path.display(), e);
                return Response::error(
                    version,
                    StatusCode::NotFound,
                    "The requested resource was not found on this server.",
                );
            }
        };

        let len = match file.metadata() {
            // Un directorio también abre bien en Linux, pero no se puede leer
            Ok(meta) if !meta.is_file() => {
                warn!("{} is not a regular file", full_path.display());
                return Response::error(
                    version,
                    StatusCode::NotFound,
                    "The requested resource was not found on this server.",
                );
            }
            Ok(meta) => meta.len(),
            Err(e) => {
                error!("Cannot determine size of {}: {}", full_path.display(), e);
                return Response::error(
                    version,
                    StatusCode::InternalServerError,
                    "Could not determine file size.",
                );
            }
        };

        let content_type = mime_type(&full_path);
        debug!(
            "Preparing to send {} bytes of '{}' ({})",
            len,
            full_path.display(),
            content_type
        );
        Response::file(version, file, len, content_type)
    }
}
