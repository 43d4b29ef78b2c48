mod routes;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use axum::Router;
use dashmap::DashMap;
use erudite::{
    config::Config,
    dictionary::Dictionary,
    game::{GameState, Opponent, PassingOpponent},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// How often idle sessions are swept
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub dictionary: Dictionary,
    /// Plays the computer side of every session
    pub opponent: Box<dyn Opponent>,
    pub sessions: DashMap<Uuid, GameSession>,
}

impl AppState {
    pub fn new(config: Config, dictionary: Dictionary) -> Self {
        Self {
            config,
            dictionary,
            opponent: Box::new(PassingOpponent),
            sessions: DashMap::new(),
        }
    }
}

/// In-memory game session data
pub struct GameSession {
    pub game: GameState,
    pub last_activity: Instant,
}

impl GameSession {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.duration_since(self.last_activity) > timeout
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erudite_backend=debug,erudite=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Erudite backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(tile_set = config.game.tile_set.name(), "Configuration loaded");

    // Load dictionary
    let dictionary = match Dictionary::load(&config.game.dictionary_path).await {
        Ok(dict) => {
            tracing::info!("Dictionary loaded successfully");
            dict
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load dictionary: {}. Using empty dictionary for now.",
                e
            );
            tracing::warn!(
                "Place a word list at {} for full functionality",
                config.game.dictionary_path
            );
            Dictionary::empty()
        }
    };

    let state = Arc::new(AppState::new(config.clone(), dictionary));

    // Spawn background task to drop idle sessions
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        session_cleanup_task(cleanup_state).await;
    });

    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Removes sessions idle for longer than the configured timeout
fn sweep_idle_sessions(state: &AppState, now: Instant) -> usize {
    let timeout = state.config.game.session_idle_timeout;
    let before = state.sessions.len();
    state.sessions.retain(|game_id, session| {
        let keep = !session.is_idle(now, timeout);
        if !keep {
            tracing::info!("Removed idle game session {}", game_id);
        }
        keep
    });
    before - state.sessions.len()
}

async fn session_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);

    loop {
        interval.tick().await;
        sweep_idle_sessions(&state, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erudite::utils::letters::ENGLISH;
    use rand::{rngs::StdRng, SeedableRng};

    pub(crate) fn test_state() -> AppState {
        let config = Config {
            server: erudite::config::ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            game: erudite::config::GameConfig {
                dictionary_path: String::new(),
                tile_set: &ENGLISH,
                session_idle_timeout: Duration::from_secs(30),
            },
        };
        AppState::new(config, Dictionary::from_words(["CAT", "AT", "TA"]))
    }

    fn session() -> GameSession {
        GameSession::new(GameState::new(&ENGLISH, &mut StdRng::seed_from_u64(1)))
    }

    #[test]
    fn test_fresh_session_is_not_idle() {
        let session = session();
        assert!(!session.is_idle(Instant::now(), Duration::from_secs(30)));
    }

    #[test]
    fn test_sweep_drops_only_idle_sessions() {
        let state = test_state();
        let stale = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        state.sessions.insert(stale, session());
        state.sessions.insert(fresh, session());

        let later = Instant::now() + Duration::from_secs(31);
        state.sessions.get_mut(&fresh).unwrap().last_activity = later;

        assert_eq!(sweep_idle_sessions(&state, later), 1);
        assert!(state.sessions.contains_key(&fresh));
        assert!(!state.sessions.contains_key(&stale));
    }
}
