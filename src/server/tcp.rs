//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Un solo thread, I/O bloqueante. Cada conexión se atiende completa
//! (leer, responder, cerrar) antes de aceptar la siguiente; las demás
//! esperan en el backlog de `listen()`.

use crate::config::ServerConfig;
use crate::handler::FileHandler;
use log::{debug, error, info, warn};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Read};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tamaño del buffer de lectura del request
pub const BUFFER_SIZE: usize = 1024;

/// Máximo de bytes no leídos que se descartan antes de cerrar
const DRAIN_LIMIT: u64 = 64 * 1024;

/// Espera máxima para que el cliente cierre su lado después de la respuesta
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Servidor HTTP de archivos, una conexión a la vez
pub struct Server {
    config: Arc<ServerConfig>,
    handler: FileHandler,
    listener: TcpListener,
}

impl Server {
    /// Crea el socket, hace bind y listen con el backlog configurado
    ///
    /// `SO_REUSEADDR` queda activado para poder reiniciar el servidor sin
    /// esperar a que expiren las conexiones en TIME_WAIT.
    pub fn bind(config: ServerConfig) -> io::Result<Self> {
        let address = config.address();
        let addr: SocketAddr = address.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot resolve {}", address),
            )
        })?;

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        info!("Address bound successfully to {}", addr);

        let backlog = i32::try_from(config.max_backlog).unwrap_or(i32::MAX);
        socket.listen(backlog)?;

        let listener: TcpListener = socket.into();
        info!(
            "Listening on {} (backlog {})",
            listener.local_addr()?,
            config.max_backlog
        );

        let config = Arc::new(config);
        Ok(Self {
            handler: FileHandler::new(Arc::clone(&config)),
            config,
            listener,
        })
    }

    /// Dirección real del listener (útil si se pidió el puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop principal: acepta y atiende conexiones para siempre
    ///
    /// Un error en una conexión (o en `accept`) se loguea y el loop sigue.
    pub fn run(&self) -> io::Result<()> {
        info!("Serving {} (one connection at a time)", self.config.root_dir.display());

        loop {
            debug!("Waiting for a new connection...");
            if let Err(e) = self.serve_one() {
                error!("Connection failed: {}", e);
            }
        }
    }

    /// Acepta una conexión y la atiende hasta cerrarla
    pub fn serve_one(&self) -> io::Result<()> {
        let (stream, peer) = self.listener.accept()?;
        info!("Connection accepted from {}", peer);
        self.handle_connection(stream)
    }

    fn handle_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        let start = Instant::now();

        let mut buffer = [0u8; BUFFER_SIZE];
        let bytes_read = read_request(&mut stream, &mut buffer)?;

        if bytes_read == 0 {
            info!("Client disconnected without sending data");
            return Ok(());
        }

        debug!(
            "Received {} bytes:\n{}",
            bytes_read,
            String::from_utf8_lossy(&buffer[..bytes_read]).trim_end()
        );

        let response = self.handler.handle(&buffer[..bytes_read]);
        let status = response.status();
        let sent = response.write_to(&mut stream)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if let Err(e) = stream.shutdown(Shutdown::Write) {
            debug!("shutdown after response failed: {}", e);
        }

        // Cerrar con headers sin leer en el socket hace que el kernel mande
        // RST, y el cliente pierde la cola de la respuesta
        match stream
            .set_read_timeout(Some(DRAIN_TIMEOUT))
            .and_then(|_| drain(&mut stream, DRAIN_LIMIT))
        {
            Ok(0) => {}
            Ok(n) => debug!("Discarded {} unread request bytes", n),
            Err(e) => debug!("Stopped draining request: {}", e),
        }

        if status.is_server_error() {
            error!("{} ({} body bytes, {:.2}ms)", status, sent, elapsed_ms);
        } else if status.is_client_error() {
            warn!("{} ({} body bytes, {:.2}ms)", status, sent, elapsed_ms);
        } else {
            info!("{} ({} body bytes, {:.2}ms)", status, sent, elapsed_ms);
        }
        Ok(())
    }
}

/// Lee hasta tener la request line completa
///
/// Para cuando aparece un '\n', se llena el buffer o el cliente cierra su
/// lado de escritura. Retorna la cantidad de bytes leídos.
fn read_request<R: Read>(stream: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buffer.len() {
        let n = match stream.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let found_newline = buffer[filled..filled + n].contains(&b'\n');
        filled += n;
        if found_newline {
            break;
        }
    }

    Ok(filled)
}

/// Descarta lo que quede por leer hasta EOF o `limit` bytes
fn drain<R: Read>(stream: &mut R, limit: u64) -> io::Result<u64> {
    io::copy(&mut stream.take(limit), &mut io::sink())
}
