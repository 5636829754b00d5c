//! # Lector INI simplificado
//! src/config/ini.rs
//!
//! Una sola pasada sobre el texto, línea por línea:
//!
//! ```ini
//! ; comentario
//! # también comentario
//! [Server]
//! Port = 8080
//! RootDirectory = /var/www/html
//! ```
//!
//! No hay continuaciones de línea, comillas ni escapes. El lector no sabe
//! nada de las claves; eso lo decide quien consume las líneas.

/// Una línea con contenido del archivo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniLine<'a> {
    /// `[Nombre]`, con el nombre ya recortado
    Section(&'a str),

    /// `clave = valor`, ambos recortados y no vacíos
    Pair { key: &'a str, value: &'a str },

    /// Cualquier otra cosa: sin '=', clave o valor vacío, sección sin cerrar
    Malformed(&'a str),
}

/// Recorre el texto y produce `(número de línea, línea)`
///
/// Las líneas vacías y los comentarios (`;` o `#` al inicio) no se emiten.
/// Los números de línea empiezan en 1.
///
/// # Ejemplo
/// ```
/// use http_file_server::config::ini::{scan, IniLine};
///
/// let lines: Vec<_> = scan("[Server]\nPort = 80\n").collect();
/// assert_eq!(lines[0], (1, IniLine::Section("Server")));
/// assert_eq!(lines[1], (2, IniLine::Pair { key: "Port", value: "80" }));
/// ```
pub fn scan(text: &str) -> impl Iterator<Item = (usize, IniLine<'_>)> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return None;
        }
        Some((idx + 1, classify(line)))
    })
}

fn classify(line: &str) -> IniLine<'_> {
    if line.starts_with('[') {
        return match line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            Some(name) => IniLine::Section(name.trim()),
            None => IniLine::Malformed(line),
        };
    }

    match line.split_once('=') {
        Some((key, value)) => {
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                IniLine::Malformed(line)
            } else {
                IniLine::Pair { key, value }
            }
        }
        None => IniLine::Malformed(line),
    }
}
