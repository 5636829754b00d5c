//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor sólo mira la primera línea del request. Los headers que
//! vengan detrás se ignoran.
//!
//! ```text
//! GET /css/style.css HTTP/1.1\r\n
//! Host: localhost:8080\r\n      <- ignorado
//! \r\n
//! ```
//!
//! Cada token tiene un largo máximo fijo; un token más largo hace que el
//! request se rechace como mal formado (400).

/// Largo máximo del método (ej: "GET")
pub const MAX_METHOD_LEN: usize = 15;

/// Largo máximo del path, incluyendo la query string
pub const MAX_PATH_LEN: usize = 255;

/// Largo máximo de la versión (ej: "HTTP/1.1")
pub const MAX_VERSION_LEN: usize = 15;

/// Métodos HTTP reconocidos
///
/// Sólo `GET` se sirve; el resto existe para poder responder 501 con
/// un log que diga qué se pidió.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    PATCH,

    /// Cualquier otro token (ya en mayúsculas)
    Other(String),
}

impl Method {
    /// Parsea un método desde un token de la request line
    ///
    /// La comparación no distingue mayúsculas: `get` es `GET`.
    fn from_token(token: &str) -> Self {
        let upper = token.to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            _ => Method::Other(upper),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s.as_str(),
        }
    }
}

/// Request line parseada
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path ya decodificado (sin query string), siempre empieza con '/'
    path: String,

    /// Query string cruda, si venía
    query: Option<String>,

    /// Versión HTTP tal como la mandó el cliente (ej: "HTTP/1.1")
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío o sólo espacios
    EmptyRequest,

    /// La request line no tiene exactamente tres tokens o no es UTF-8
    InvalidRequestLine,

    /// Método más largo que `MAX_METHOD_LEN`
    MethodTooLong(usize),

    /// Path más largo que `MAX_PATH_LEN`
    PathTooLong(usize),

    /// Versión más larga que `MAX_VERSION_LEN`
    VersionTooLong(usize),

    /// La versión no empieza con "HTTP/"
    InvalidHttpVersion(String),

    /// Path que no empieza con '/' o con escapes '%' rotos
    InvalidPath(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::MethodTooLong(n) => {
                write!(f, "Method too long ({} bytes, max {})", n, MAX_METHOD_LEN)
            }
            ParseError::PathTooLong(n) => {
                write!(f, "Path too long ({} bytes, max {})", n, MAX_PATH_LEN)
            }
            ParseError::VersionTooLong(n) => {
                write!(f, "HTTP version too long ({} bytes, max {})", n, MAX_VERSION_LEN)
            }
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea la request line desde los bytes leídos del socket
    ///
    /// Sólo se considera la primera línea (hasta `\r\n`, `\n` o el fin
    /// del buffer).
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_file_server::http::Request;
    ///
    /// let raw = b"GET /css/style.css HTTP/1.1\r\nHost: x\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/css/style.css");
    /// assert_eq!(request.version(), "HTTP/1.1");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let line_end = buffer
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(buffer.len());
        let line = std::str::from_utf8(&buffer[..line_end])
            .map_err(|_| ParseError::InvalidRequestLine)?;

        if line.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let parts: Vec<&str> = line.split_ascii_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }
        let (method, target, version) = (parts[0], parts[1], parts[2]);

        if method.len() > MAX_METHOD_LEN {
            return Err(ParseError::MethodTooLong(method.len()));
        }
        if target.len() > MAX_PATH_LEN {
            return Err(ParseError::PathTooLong(target.len()));
        }
        if version.len() > MAX_VERSION_LEN {
            return Err(ParseError::VersionTooLong(version.len()));
        }
        if !version.starts_with("HTTP/") {
            return Err(ParseError::InvalidHttpVersion(version.to_string()));
        }

        let (raw_path, query) = match target.find('?') {
            Some(pos) => (&target[..pos], Some(target[pos + 1..].to_string())),
            None => (target, None),
        };

        if !raw_path.starts_with('/') {
            return Err(ParseError::InvalidPath(raw_path.to_string()));
        }
        let path = percent_decode(raw_path)
            .ok_or_else(|| ParseError::InvalidPath(raw_path.to_string()))?;

        Ok(Request {
            method: Method::from_token(method),
            path,
            query,
            version: version.to_string(),
        })
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path decodificado
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la query string cruda (sin el '?')
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Decodifica escapes `%XX` de un path
///
/// Retorna `None` si hay un escape incompleto o el resultado no es UTF-8.
/// A diferencia de la query string, en el path '+' no es un espacio.
fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.query(), None);
    }

    #[test]
    fn test_headers_are_ignored() {
        let raw = b"GET /index.html HTTP/1.0\r\nHost: localhost:8080\r\nbroken header\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.version(), "HTTP/1.0");
    }

    #[test]
    fn test_bare_lf_and_no_terminator() {
        assert_eq!(Request::parse(b"GET /a.txt HTTP/1.1\n").unwrap().path(), "/a.txt");
        assert_eq!(Request::parse(b"GET /a.txt HTTP/1.1").unwrap().path(), "/a.txt");
    }

    #[test]
    fn test_query_is_split_off() {
        let raw = b"GET /page.html?v=3&x HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.path(), "/page.html");
        assert_eq!(request.query(), Some("v=3&x"));
    }

    #[test]
    fn test_method_case_insensitive() {
        let request = Request::parse(b"get / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.method(), &Method::GET);
    }

    #[test]
    fn test_non_get_methods_parse() {
        let request = Request::parse(b"POST /form HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.method(), &Method::POST);

        let request = Request::parse(b"brew /pot HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.method(), &Method::Other("BREW".to_string()));
        assert_eq!(request.method().as_str(), "BREW");
    }

    #[test]
    fn test_percent_decoding() {
        let request = Request::parse(b"GET /my%20file.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.path(), "/my file.txt");

        // Un ".." escondido en escapes queda visible para el chequeo de traversal
        let request = Request::parse(b"GET /%2e%2E/etc/passwd HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.path(), "/../etc/passwd");
    }

    #[test]
    fn test_broken_percent_escape() {
        let result = Request::parse(b"GET /bad%2 HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidPath(_))));

        let result = Request::parse(b"GET /bad%zz HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidPath(_))));
    }

    // ==================== Request line mal formada ====================

    #[test]
    fn test_empty_request() {
        assert!(matches!(Request::parse(b""), Err(ParseError::EmptyRequest)));
        assert!(matches!(Request::parse(b"   \r\n"), Err(ParseError::EmptyRequest)));
    }

    #[test]
    fn test_wrong_token_count() {
        let result = Request::parse(b"GET\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));

        let result = Request::parse(b"GET / HTTP/1.1 extra\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }

    #[test]
    fn test_invalid_utf8() {
        let result = Request::parse(b"\xff\xfe / HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }

    #[test]
    fn test_invalid_version() {
        let result = Request::parse(b"GET / FTP/1.0\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidHttpVersion(_))));
    }

    #[test]
    fn test_path_must_be_absolute() {
        let result = Request::parse(b"GET index.html HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidPath(_))));
    }

    // ==================== Largos máximos ====================

    #[test]
    fn test_method_too_long() {
        let raw = format!("{} / HTTP/1.1\r\n\r\n", "G".repeat(MAX_METHOD_LEN + 1));
        let result = Request::parse(raw.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::MethodTooLong(MAX_METHOD_LEN + 1));
    }

    #[test]
    fn test_path_too_long() {
        let raw = format!("GET /{} HTTP/1.1\r\n\r\n", "a".repeat(MAX_PATH_LEN));
        let result = Request::parse(raw.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::PathTooLong(MAX_PATH_LEN + 1));
    }

    #[test]
    fn test_path_at_limit_is_accepted() {
        let raw = format!("GET /{} HTTP/1.1\r\n\r\n", "a".repeat(MAX_PATH_LEN - 1));
        assert!(Request::parse(raw.as_bytes()).is_ok());
    }

    #[test]
    fn test_version_too_long() {
        let raw = b"GET / HTTP/1.1111111111111\r\n\r\n";
        let result = Request::parse(raw);
        assert!(matches!(result, Err(ParseError::VersionTooLong(_))));
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(ParseError::EmptyRequest.to_string(), "Empty request");
        assert!(ParseError::PathTooLong(300).to_string().contains("300"));
    }
}
