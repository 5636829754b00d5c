//! # Construcción de Respuestas HTTP
//!
//! Este módulo arma la respuesta y la escribe en el socket. Hay dos tipos de
//! body: páginas de error HTML generadas en memoria y archivos abiertos que
//! se copian por bloques, sin cargarlos enteros en memoria.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/css\r\n
//! Content-Length: 1342\r\n
//! Connection: close\r\n
//! \r\n
//! <bytes del archivo>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_file_server::http::{Response, StatusCode};
//!
//! let response = Response::error("HTTP/1.1", StatusCode::NotFound, "No such file.");
//!
//! let mut out = Vec::new();
//! response.write_to(&mut out).unwrap();
//! assert!(out.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
//! ```

use super::StatusCode;
use std::fs::File;
use std::io::{self, Read, Write};

/// Versión usada cuando no se pudo leer la del cliente
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Cuerpo de la respuesta
#[derive(Debug)]
pub enum Body {
    /// Contenido generado en memoria (páginas de error)
    Bytes(Vec<u8>),

    /// Archivo abierto y su largo en bytes
    File(File, u64),
}

impl Body {
    /// Largo que se anuncia en `Content-Length`
    fn len(&self) -> u64 {
        match self {
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File(_, len) => *len,
        }
    }
}

/// Representa una respuesta HTTP completa
#[derive(Debug)]
pub struct Response {
    /// Versión del status line (se repite la del request)
    version: String,

    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en orden de envío
    ///
    /// Vec en lugar de HashMap para que el orden en el socket sea estable.
    headers: Vec<(String, String)>,

    body: Body,
}

impl Response {
    /// Crea una respuesta con `Content-Type`, `Content-Length` y
    /// `Connection: close` ya puestos, en ese orden
    pub fn new(version: &str, status: StatusCode, content_type: &str, body: Body) -> Self {
        let headers = vec![
            ("Content-Type".to_string(), content_type.to_string()),
            ("Content-Length".to_string(), body.len().to_string()),
            ("Connection".to_string(), "close".to_string()),
        ];
        Self {
            version: version.to_string(),
            status,
            headers,
            body,
        }
    }

    /// Respuesta 200 que va a transmitir el archivo abierto
    ///
    /// `len` debe ser el tamaño del archivo según `metadata()`.
    pub fn file(version: &str, file: File, len: u64, content_type: &str) -> Self {
        Self::new(version, StatusCode::Ok, content_type, Body::File(file, len))
    }

    /// Crea una página de error HTML mínima
    ///
    /// # Ejemplo
    /// ```
    /// use http_file_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error("HTTP/1.0", StatusCode::BadRequest, "Invalid path.");
    /// assert_eq!(response.status(), StatusCode::BadRequest);
    /// ```
    pub fn error(version: &str, status: StatusCode, message: &str) -> Self {
        let body = format!(
            "<html><body><h1>{}</h1><p>{}</p></body></html>",
            status, message
        );
        Self::new(version, status, "text/html", Body::Bytes(body.into_bytes()))
    }

    /// Serializa status line + headers + línea vacía
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = format!("{} {}\r\n", self.version, self.status);
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        head.into_bytes()
    }

    /// Escribe la respuesta completa y retorna los bytes de body enviados
    ///
    /// Los archivos se copian con `io::copy`, así que nunca se cargan
    /// enteros en memoria. Del archivo se envían exactamente los `len`
    /// bytes anunciados: si creció después de `metadata()` el resto se
    /// ignora, y si se achicó retorna `UnexpectedEof`. Consume la
    /// respuesta: el archivo se cierra al terminar, haya error o no.
    pub fn write_to<W: Write>(self, out: &mut W) -> io::Result<u64> {
        out.write_all(&self.head_bytes())?;

        let sent = match self.body {
            Body::Bytes(bytes) => {
                out.write_all(&bytes)?;
                bytes.len() as u64
            }
            Body::File(file, len) => {
                let mut reader = io::BufReader::new(file).take(len);
                let sent = io::copy(&mut reader, out)?;
                if sent < len {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("file ended after {} of {} bytes", sent, len),
                    ));
                }
                sent
            }
        };

        out.flush()?;
        Ok(sent)
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene la versión del status line
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Busca un header por nombre (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
