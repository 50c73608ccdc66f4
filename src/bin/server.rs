use orbitsim::scenario::Preset;
use orbitsim::{ScenarioConfig, System};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, Mutex};
use tokio::time;
use tracing::{error, info, warn};

const TCP_PORT: u16 = 8080;
const TELEMETRY_BROADCAST_BUFFER_SIZE: usize = 256;
const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Scenario selection: `ORBITSIM_CONFIG` (a JSON file) wins over
/// `ORBITSIM_PRESET`, which defaults to the Mars relay constellation.
fn load_scenario() -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("ORBITSIM_CONFIG") {
        return Ok(ScenarioConfig::from_file(path)?);
    }
    let name = std::env::var("ORBITSIM_PRESET").unwrap_or_else(|_| Preset::MarsRelay.name().to_string());
    let preset = Preset::from_name(&name).ok_or_else(|| format!("unknown preset {}", name))?;
    Ok(preset.config())
}

fn tick_interval() -> Duration {
    let ms = std::env::var("ORBITSIM_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .unwrap_or(DEFAULT_TICK_INTERVAL_MS);
    Duration::from_millis(ms)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🛰️  Orbit Simulator Server");
    println!("==========================");

    let config = load_scenario()?;
    let system = Arc::new(Mutex::new(config.build()?));
    info!("🪐 Loaded scenario {}", config.name);

    let (telemetry_tx, _) = broadcast::channel(TELEMETRY_BROADCAST_BUFFER_SIZE);

    let tcp_telemetry_tx = telemetry_tx.clone();
    let tcp_system = Arc::clone(&system);
    let tcp_server = tokio::spawn(async move {
        if let Err(e) = start_tcp_server(tcp_system, tcp_telemetry_tx).await {
            error!("TCP server error: {}", e);
        }
    });

    let mut interval = time::interval(tick_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
        }

        let frame = {
            let mut guard = system.lock().await;
            guard.tick()
        };

        match frame {
            Ok(frame) => {
                let line = match frame.to_json() {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to encode telemetry: {}", e);
                        continue;
                    }
                };
                // No subscribers is not an error worth reporting every tick.
                if telemetry_tx.receiver_count() > 0 {
                    if let Err(e) = telemetry_tx.send(line) {
                        warn!("Failed to broadcast telemetry: {}", e);
                    }
                }
            }
            Err(e) => {
                error!("❌ Simulation error: {}", e);
                break;
            }
        }
    }

    tcp_server.abort();
    let ticks = system.lock().await.tick_count();
    println!("🚀 Orbit Simulator stopped after {} ticks", ticks);

    Ok(())
}

async fn start_tcp_server(
    system: Arc<Mutex<System>>,
    telemetry_tx: broadcast::Sender<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", TCP_PORT)).await?;
    info!("🌐 TCP server listening on port {}", TCP_PORT);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("🔗 New client connected: {}", addr);
                let client_system = Arc::clone(&system);
                let client_telemetry_rx = telemetry_tx.subscribe();

                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, client_system, client_telemetry_rx).await {
                        warn!("Client {} error: {}", addr, e);
                    }
                    info!("🔌 Client {} disconnected", addr);
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Streams every frame as one JSON line. A client may send `snapshot` to
/// receive the current frame immediately.
async fn handle_client(
    stream: TcpStream,
    system: Arc<Mutex<System>>,
    mut telemetry_rx: broadcast::Receiver<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (reader, writer) = stream.into_split();
    let mut buf_reader = BufReader::new(reader);
    let writer = Arc::new(Mutex::new(writer));

    let telemetry_writer = Arc::clone(&writer);
    let telemetry_task = tokio::spawn(async move {
        loop {
            let line = match telemetry_rx.recv().await {
                Ok(line) => line,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Client lagging, skipped {} frames", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            let mut guard = telemetry_writer.lock().await;
            if let Err(e) = guard.write_all(line.as_bytes()).await {
                warn!("Failed to send telemetry: {}", e);
                break;
            }
            if let Err(e) = guard.write_all(b"\n").await {
                warn!("Failed to send telemetry newline: {}", e);
                break;
            }
        }
    });

    let mut line = String::new();
    loop {
        line.clear();
        match buf_reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let request = line.trim();
                if request.is_empty() {
                    continue;
                }
                let reply = if request == "snapshot" {
                    system.lock().await.telemetry().to_json()?
                } else {
                    serde_json::json!({ "error": format!("unknown request {}", request) }).to_string()
                };
                let mut guard = writer.lock().await;
                guard.write_all(reply.as_bytes()).await?;
                guard.write_all(b"\n").await?;
            }
            Err(e) => {
                warn!("Failed to read from client: {}", e);
                break;
            }
        }
    }

    telemetry_task.abort();
    Ok(())
}
