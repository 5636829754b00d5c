//! # Módulo HTTP
//!
//! Lo justo de HTTP/1.1 para servir archivos estáticos:
//!
//! - Parsing de la request line (los headers se ignoran)
//! - Construcción y escritura de responses
//! - Códigos de estado
//! - Tabla de tipos MIME
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! <headers ignorados>\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! No hay conexiones persistentes ni chunked transfer: cada conexión lleva
//! exactamente un request y una response.

pub mod mime;
pub mod request;
pub mod response;
pub mod status;

// Re-exportamos los tipos principales para facilitar su uso
pub use mime::mime_type;
pub use request::{Method, ParseError, Request};
pub use response::{Body, Response};
pub use status::StatusCode;
