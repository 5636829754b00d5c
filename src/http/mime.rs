//! # Tipos MIME
//!
//! Tabla fija extensión → `Content-Type`. La extensión se compara en
//! minúsculas; sin extensión o con una desconocida se usa
//! `application/octet-stream`.

use std::path::Path;

/// Tipo por defecto para extensiones desconocidas
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const MIME_TABLE: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("xml", "application/xml"),
    ("svg", "image/svg+xml"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("pdf", "application/pdf"),
    ("wasm", "application/wasm"),
];

/// Determina el `Content-Type` de un archivo según su extensión
///
/// # Ejemplo
/// ```
/// use std::path::Path;
/// use http_file_server::http::mime_type;
///
/// assert_eq!(mime_type(Path::new("/var/www/style.CSS")), "text/css");
/// assert_eq!(mime_type(Path::new("README")), "application/octet-stream");
/// ```
pub fn mime_type(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return DEFAULT_MIME_TYPE,
    };

    MIME_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}
