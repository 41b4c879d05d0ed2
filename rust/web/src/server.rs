//! HTTP/SSE surface over the game manager.

use crate::events::EventBus;
use crate::handlers;
use crate::session::GameManager;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::reply::Reply;
use warp::Filter;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

#[derive(Clone)]
pub struct AppContext {
    config: ServerConfig,
    bus: EventBus,
    games: GameManager,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        let bus = EventBus::new();
        let games = GameManager::new(bus.clone());
        Self { config, bus, games }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn games(&self) -> GameManager {
        self.games.clone()
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

#[derive(Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// All routes for the API surface, usable directly with `warp::test`.
    pub fn routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let health = warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health::health().into_response())
            .boxed();

        let games = context.games();
        let create = warp::path!("games")
            .and(warp::post())
            .and(Self::with_games(games.clone()))
            .and(warp::body::json())
            .and_then(
                |games: GameManager, request: handlers::CreateGameRequest| async move {
                    Ok::<_, Infallible>(handlers::create_game(games, request).await)
                },
            );

        let start = warp::path!("games" / String / "start")
            .and(warp::post())
            .and(Self::with_games(games.clone()))
            .and_then(|game_id: String, games: GameManager| async move {
                Ok::<_, Infallible>(handlers::start_game(games, game_id).await)
            });

        let state = warp::path!("games" / String)
            .and(warp::get())
            .and(Self::with_games(games.clone()))
            .and_then(|game_id: String, games: GameManager| async move {
                Ok::<_, Infallible>(handlers::get_game(games, game_id).await)
            });

        let delete = warp::path!("games" / String)
            .and(warp::delete())
            .and(Self::with_games(games.clone()))
            .and_then(|game_id: String, games: GameManager| async move {
                Ok::<_, Infallible>(handlers::delete_game(games, game_id).await)
            });

        let bus = context.bus();
        let events = warp::path!("games" / String / "events")
            .and(warp::get())
            .and(Self::with_games(games))
            .and(warp::any().map(move || bus.clone()))
            .and_then(
                |game_id: String, games: GameManager, bus: EventBus| async move {
                    Ok::<_, Infallible>(handlers::sse::stream_events(game_id, games, bus).await)
                },
            );

        health
            .or(create)
            .unify()
            .or(start)
            .unify()
            .or(events)
            .unify()
            .or(state)
            .unify()
            .or(delete)
            .unify()
            .boxed()
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = Self::bind_addr(context.config())?;
        let routes = Self::routes(&context);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(|err| ServerError::Config(err.to_string()))?;

        tracing::info!(%addr, "web server listening");
        let task = tokio::spawn(server_future);

        Ok(ServerHandle {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
            context: Arc::new(context),
        })
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();
        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }
        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }
        let candidate = format!("{}:{}", host, config.port());
        candidate
            .to_socket_addrs()
            .map_err(|err| {
                ServerError::Config(format!("failed to resolve address `{candidate}`: {err}"))
            })?
            .next()
            .ok_or_else(|| ServerError::Config(format!("failed to resolve address `{candidate}`")))
    }

    fn with_games(
        games: GameManager,
    ) -> impl Filter<Extract = (GameManager,), Error = Infallible> + Clone {
        warp::any().map(move || games.clone())
    }
}

pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    context: Arc<AppContext>,
}

impl ServerHandle {
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|err| ServerError::Config(format!("server task join error: {err}")))?;
        }
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
