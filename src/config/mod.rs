//! # Configuración del Servidor
//! src/config/mod.rs
//!
//! La configuración se arma una sola vez al arrancar, en tres capas:
//!
//! 1. Valores por defecto (`ServerConfig::default()`)
//! 2. Archivo INI opcional, sección `[Server]`
//! 3. Argumentos CLI / variables de entorno
//!
//! Después de eso es de sólo lectura.
//!
//! ## Ejemplos de uso
//!
//! ### Archivo
//! ```ini
//! [Server]
//! Port = 8080
//! RootDirectory = /var/www/html
//! DefaultFile = index.html
//! MaxConnections = 10
//! ```
//!
//! ### CLI
//! ```bash
//! ./http_file_server /etc/server.ini --port 9000 --root ./public
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=9000 ROOT_DIR=./public ./http_file_server
//! ```
//!
//! Un valor inválido en el archivo nunca es fatal: se avisa con un warning
//! y queda el valor por defecto.

pub mod ini;

use clap::Parser;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use self::ini::IniLine;

/// Archivo de configuración que se usa si no se pasa ninguno
pub const DEFAULT_CONFIG_PATH: &str = "/usr/share/server/config.ini";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ROOT: &str = "/var/www/html";
pub const DEFAULT_FILE: &str = "index.html";
pub const DEFAULT_BACKLOG: u32 = 10;

/// Sección del INI que lee el servidor
const SERVER_SECTION: &str = "Server";

/// Argumentos de línea de comandos
#[derive(Debug, Clone, Parser)]
#[command(name = "http_file_server")]
#[command(about = "Servidor HTTP/1.1 de archivos estáticos, una conexión a la vez")]
#[command(version)]
pub struct Cli {
    /// Archivo de configuración INI
    #[arg(default_value = DEFAULT_CONFIG_PATH, env = "SERVER_CONFIG")]
    pub config: PathBuf,

    /// Host/IP en el que escucha (por defecto todas las interfaces)
    #[arg(long, env = "HTTP_HOST")]
    pub host: Option<String>,

    /// Puerto en el que escucha; pisa `Port` del archivo
    #[arg(short, long, env = "HTTP_PORT")]
    pub port: Option<u16>,

    /// Directorio raíz de los archivos; pisa `RootDirectory`
    #[arg(short, long = "root", env = "ROOT_DIR")]
    pub root_dir: Option<PathBuf>,

    /// Archivo que se sirve para "/"; pisa `DefaultFile`
    #[arg(long = "default-file")]
    pub default_file: Option<String>,

    /// Backlog de listen(); pisa `MaxConnections`
    #[arg(long)]
    pub backlog: Option<u32>,

    /// Nivel de log (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: log::LevelFilter,

    /// Imprime la configuración efectiva en JSON y termina
    #[arg(long = "print-config")]
    pub print_config: bool,
}

/// Errores de configuración
#[derive(Debug)]
pub enum ConfigError {
    /// El archivo existe pero no se pudo leer
    Io(PathBuf, io::Error),

    /// Un valor final (después de los overrides) no es usable
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => {
                write!(f, "Cannot read config file {}: {}", path.display(), e)
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Configuración efectiva del servidor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Host/IP donde se hace bind
    pub host: String,

    /// Puerto TCP
    pub port: u16,

    /// Directorio raíz desde el que se sirven archivos
    pub root_dir: PathBuf,

    /// Archivo que se sirve para "/" y para paths de directorio
    pub default_file: String,

    /// Conexiones pendientes máximas en la cola de listen()
    pub max_backlog: u32,
}

impl ServerConfig {
    /// Arma la configuración final: archivo + overrides de CLI, validada
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::load(&cli.config)?;

        if let Some(host) = &cli.host {
            config.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(root) = &cli.root_dir {
            config.root_dir = root.clone();
        }
        if let Some(file) = &cli.default_file {
            config.default_file = file.clone();
        }
        if let Some(backlog) = cli.backlog {
            config.max_backlog = backlog;
        }

        config.validate()?;
        Ok(config)
    }

    /// Carga el archivo INI
    ///
    /// Si el archivo no existe se usan los valores por defecto (con un
    /// warning). Cualquier otro error de lectura se propaga.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("Loading configuration from {}", path.display());
                Ok(Self::from_ini_str(&text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(path.to_path_buf(), e)),
        }
    }

    /// Parsea el contenido de un archivo INI
    ///
    /// Nunca falla: cada entrada inválida se reporta y se ignora.
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_file_server::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_ini_str("[Server]\nPort = 9090\nPort2 = x\n");
    /// assert_eq!(config.port, 9090);
    /// assert_eq!(config.default_file, "index.html");
    /// ```
    pub fn from_ini_str(text: &str) -> Self {
        let mut config = Self::default();
        let mut in_server_section = false;

        for (line_no, line) in ini::scan(text) {
            match line {
                IniLine::Section(name) => {
                    in_server_section = name == SERVER_SECTION;
                    if in_server_section {
                        debug!("Parsing [{}] section", SERVER_SECTION);
                    }
                }
                IniLine::Pair { key, value } if in_server_section => {
                    config.apply(line_no, key, value);
                }
                IniLine::Pair { key, .. } => {
                    debug!("line {}: ignoring '{}' outside [{}]", line_no, key, SERVER_SECTION);
                }
                IniLine::Malformed(raw) if in_server_section => {
                    warn!("line {}: skipping malformed key-value pair: '{}'", line_no, raw);
                }
                IniLine::Malformed(_) => {}
            }
        }

        config
    }

    /// Aplica una clave de la sección `[Server]`
    fn apply(&mut self, line_no: usize, key: &str, value: &str) {
        match key {
            "Port" => match value.parse::<u16>() {
                Ok(port) if port > 0 => {
                    self.port = port;
                    info!("Config: Port = {}", port);
                }
                _ => warn!(
                    "line {}: invalid port number '{}', using default {}",
                    line_no, value, DEFAULT_PORT
                ),
            },
            "RootDirectory" => {
                self.root_dir = PathBuf::from(value);
                info!("Config: RootDirectory = {}", value);
            }
            "DefaultFile" => {
                if is_plain_file_name(value) {
                    self.default_file = value.to_string();
                    info!("Config: DefaultFile = {}", value);
                } else {
                    warn!(
                        "line {}: invalid default file '{}', using default {}",
                        line_no, value, DEFAULT_FILE
                    );
                }
            }
            "MaxConnections" => match value.parse::<u32>() {
                Ok(backlog) if backlog > 0 => {
                    self.max_backlog = backlog;
                    info!("Config: MaxConnections = {}", backlog);
                }
                _ => warn!(
                    "line {}: invalid max connections '{}', using default {}",
                    line_no, value, DEFAULT_BACKLOG
                ),
            },
            _ => warn!("line {}: unrecognized config key: '{}'", line_no, key),
        }
    }

    /// Valida la configuración final
    ///
    /// Un root inexistente sólo genera un warning: cada request va a dar 404,
    /// pero el servidor puede arrancar igual.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_backlog == 0 {
            return Err(ConfigError::Invalid("backlog must be >= 1".to_string()));
        }
        if !is_plain_file_name(&self.default_file) {
            return Err(ConfigError::Invalid(format!(
                "default file must be a plain file name, got '{}'",
                self.default_file
            )));
        }
        if !self.root_dir.is_dir() {
            warn!(
                "Root directory {} does not exist or is not a directory",
                self.root_dir.display()
            );
        }
        Ok(())
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_file_server::config::ServerConfig;
    ///
    /// let config = ServerConfig::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuración efectiva en JSON (para `--print-config`)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deja en el log un resumen de la configuración
    pub fn log_summary(&self) {
        info!("Server configuration:");
        info!("   Address:       {}", self.address());
        info!("   Root:          {}", self.root_dir.display());
        info!("   Default file:  {}", self.default_file);
        info!("   Backlog:       {}", self.max_backlog);
    }
}

impl Default for ServerConfig {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root_dir: PathBuf::from(DEFAULT_ROOT),
            default_file: DEFAULT_FILE.to_string(),
            max_backlog: DEFAULT_BACKLOG,
        }
    }
}

/// Un nombre de archivo sin separadores ni ".."
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}
