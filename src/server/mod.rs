//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto con el backlog configurado
//! 2. Acepta conexiones de a una
//! 3. Lee la request line y la pasa al `FileHandler`
//! 4. Envía la response y cierra la conexión
//!
//! No hay concurrencia: la siguiente conexión se acepta recién cuando la
//! anterior quedó cerrada.

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{Server, BUFFER_SIZE};
