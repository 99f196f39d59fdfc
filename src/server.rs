use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::codec::FrameCodec;
use crate::config::Config;
use crate::connection::Connection;
use crate::engine::Engine;
use crate::frame::Frame;
use crate::Error;

/// Starts logging, binds the configured address and serves clients until an accept fails.
pub async fn run(config: Config) -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let listener = TcpListener::bind((config.bind.as_str(), config.port)).await?;

    serve(listener, config).await
}

/// Serves clients on an already bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Result<(), Error> {
    let engine = Arc::new(Engine::new(config.max_queued_commands));

    info!("Redis server listening on {}", listener.local_addr()?);

    loop {
        let (socket, client_address) = listener.accept().await?;
        let engine = engine.clone();
        let max_frame_size = config.max_frame_size;
        info!("Accepted connection from {:?}", client_address);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, client_address, engine, max_frame_size).await
            {
                error!("Connection failed: {}", e);
            }
        });
    }
}

#[instrument(
    name = "connection",
    skip(stream, engine, max_frame_size),
    fields(connection_id, client_address)
)]
async fn handle_connection(
    stream: TcpStream,
    client_address: SocketAddr,
    engine: Arc<Engine>,
    max_frame_size: usize,
) -> Result<(), Error> {
    let mut conn = Connection::with_codec(stream, FrameCodec::new(max_frame_size));
    let id = engine.begin_session();

    tracing::Span::current()
        .record("connection_id", id.to_string())
        .record("client_address", client_address.to_string());

    let res = serve_session(&mut conn, &engine, id).await;
    engine.end_session(id);

    info!("Connection closed");
    res
}

async fn serve_session(conn: &mut Connection, engine: &Engine, id: Uuid) -> Result<(), Error> {
    loop {
        let frames = match conn.read_batch().await {
            Ok(Some(frames)) => frames,
            Ok(None) => return Ok(()),
            Err(err) => {
                // The byte stream can not be resynchronised after a malformed frame.
                warn!("Protocol error: {}", err);
                conn.write_frame(&Frame::Error(err.to_string())).await?;
                return Ok(());
            }
        };

        debug!("Received {} frame(s) from client: {:?}", frames.len(), frames);
        let replies = engine.pipeline(id, frames).await;
        debug!("Sending response to client: {:?}", replies);

        conn.write_batch(&replies).await?;

        if engine.client_info(id).await?.quit {
            return Ok(());
        }
    }
}
