//! # Logging
//! src/logging.rs
//!
//! Todo el crate loguea con las macros de `log`. Acá se instala el backend
//! (`fern`) que escribe a stderr con timestamp local:
//!
//! ```text
//! [2024-05-02 18:31:07 INFO  http_file_server::server::tcp] Listening on 0.0.0.0:8080
//! ```

use log::LevelFilter;

/// Instala el logger global
///
/// Sólo se puede llamar una vez por proceso; la segunda llamada retorna
/// error.
pub fn init(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
