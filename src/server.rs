//! Line-oriented text protocol: one command per line, one response per line,
//! UTF-8, over a persistent stream connection. Every connection gets its own
//! worker thread; all threads share a single manager instance.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use log::{debug, error, info};

use crate::fs::FileSystemManager;
use crate::store::BackingStore;

/// Accept loop. Runs until the listener fails.
pub fn serve<S: BackingStore + 'static>(
    listener: TcpListener,
    fs: Arc<FileSystemManager<S>>,
) -> io::Result<()> {
    info!("listening on {}", listener.local_addr()?);
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let fs = Arc::clone(&fs);
                thread::spawn(move || {
                    let peer = stream
                        .peer_addr()
                        .map(|a| a.to_string())
                        .unwrap_or_else(|_| "unknown".into());
                    info!("accepted connection from {peer}");
                    if let Err(err) = handle_stream(&fs, stream) {
                        error!("client {peer}: {err}");
                    }
                    info!("connection closed: {peer}");
                });
            }
            Err(err) => error!("accept failed: {err}"),
        }
    }
    Ok(())
}

fn handle_stream<S: BackingStore>(
    fs: &FileSystemManager<S>,
    stream: TcpStream,
) -> io::Result<()> {
    let reader = BufReader::new(stream.try_clone()?);
    handle_connection(fs, reader, stream)
}

/// Serves one client until QUIT or end of stream. A failed command keeps
/// the connection open for further commands.
pub fn handle_connection<S, R, W>(
    fs: &FileSystemManager<S>,
    reader: R,
    mut writer: W,
) -> io::Result<()>
where
    S: BackingStore,
    R: BufRead,
    W: Write,
{
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            writeln!(writer, "ERROR: Empty command.")?;
            writer.flush()?;
            continue;
        }
        debug!("received: {line}");

        let mut parts = line.splitn(3, ' ');
        let command = parts.next().unwrap_or("").to_ascii_uppercase();
        let name = parts.next();
        let payload = parts.next();

        match command.as_str() {
            "CREATE" => match name {
                Some(name) => match fs.create(name) {
                    Ok(()) => writeln!(writer, "SUCCESS: File '{name}' created.")?,
                    Err(err) => writeln!(writer, "ERROR: {err}")?,
                },
                None => writeln!(writer, "ERROR: Missing filename.")?,
            },
            "WRITE" => match (name, payload) {
                (Some(name), Some(payload)) => match fs.write(name, payload.as_bytes()) {
                    Ok(()) => writeln!(writer, "SUCCESS: File '{name}' written.")?,
                    Err(err) => writeln!(writer, "ERROR: {err}")?,
                },
                _ => writeln!(writer, "ERROR: Missing filename or content.")?,
            },
            "READ" => match name {
                Some(name) => match fs.read(name) {
                    Ok(data) => {
                        writeln!(writer, "SUCCESS: {}", String::from_utf8_lossy(&data))?
                    }
                    Err(err) => writeln!(writer, "ERROR: {err}")?,
                },
                None => writeln!(writer, "ERROR: Missing filename.")?,
            },
            "DELETE" => match name {
                Some(name) => match fs.delete(name) {
                    Ok(()) => writeln!(writer, "SUCCESS: File '{name}' deleted.")?,
                    Err(err) => writeln!(writer, "ERROR: {err}")?,
                },
                None => writeln!(writer, "ERROR: Missing filename.")?,
            },
            "LIST" => writeln!(writer, "FILES: {}", fs.list().join(","))?,
            "QUIT" => {
                writeln!(writer, "SUCCESS: Disconnecting.")?;
                writer.flush()?;
                return Ok(());
            }
            _ => writeln!(writer, "ERROR: Unknown command.")?,
        }
        writer.flush()?;
    }
    Ok(())
}
