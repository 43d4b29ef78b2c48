use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use erudite::{
    dictionary::WordOracle,
    game::{GameError, GameState, Opponent, TurnOutcome, WordScore},
    models::{GameStateRecord, Player, TurnState},
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, GameSession};

/// Failure returned by a game endpoint
#[derive(Debug)]
pub enum ApiError {
    NotFound(Uuid),
    Game(GameError),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "game_not_found",
                format!("no game with id {}", id),
            ),
            ApiError::Game(err) => {
                let status = match err {
                    GameError::Turn(_) => StatusCode::CONFLICT,
                    GameError::Staging(_) | GameError::Validation(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    GameError::State(_) => StatusCode::BAD_REQUEST,
                };
                (status, err.code(), err.to_string())
            }
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateGameRequest {
    /// Fixes the shuffle for reproducible games
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct StageRequest {
    pub row: i32,
    pub col: i32,
    pub letter: char,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_id: Uuid,
    pub turn: TurnState,
    pub winner: Option<Player>,
    pub state: GameStateRecord,
    /// Turns played by this request, human first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub turns: Vec<TurnOutcome>,
}

impl GameResponse {
    fn new(game_id: Uuid, game: &GameState) -> Self {
        Self::with_turns(game_id, game, Vec::new())
    }

    fn with_turns(game_id: Uuid, game: &GameState, turns: Vec<TurnOutcome>) -> Self {
        Self {
            game_id,
            turn: game.turn_state(),
            winner: game.winner(),
            state: game.to_state(),
            turns,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub words: Vec<WordScore>,
    pub score: u32,
    pub bingo: bool,
}

/// Runs `f` against a live session and marks it as active
fn with_session<T>(
    state: &AppState,
    game_id: Uuid,
    f: impl FnOnce(&mut GameSession) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let mut session = state
        .sessions
        .get_mut(&game_id)
        .ok_or(ApiError::NotFound(game_id))?;
    session.touch();
    f(session.value_mut())
}

/// Lets the opponent move if the turn is now theirs
fn run_opponent(
    game: &mut GameState,
    opponent: &dyn Opponent,
    oracle: &dyn WordOracle,
) -> Result<Option<TurnOutcome>, GameError> {
    if game.turn_state() != TurnState::WaitingAi {
        return Ok(None);
    }
    game.play_opponent_turn(opponent, oracle).map(Some)
}

fn insert_session(state: &AppState, game: GameState) -> Json<GameResponse> {
    let game_id = Uuid::new_v4();
    let response = GameResponse::new(game_id, &game);
    state.sessions.insert(game_id, GameSession::new(game));
    Json(response)
}

/// Start a new game
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<CreateGameRequest>>,
) -> Json<GameResponse> {
    let payload = payload.map(|Json(payload)| payload).unwrap_or_default();
    let mut rng = match payload.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let game = GameState::new(state.config.game.tile_set, &mut rng);

    let response = insert_session(&state, game);
    tracing::info!(seed = ?payload.seed, "Created game {}", response.game_id);
    response
}

/// Resume a game from a saved record
pub async fn import_game(
    State(state): State<Arc<AppState>>,
    Json(record): Json<GameStateRecord>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = GameState::from_state(&record, state.config.game.tile_set, &mut StdRng::from_os_rng())
        .map_err(|e| {
            tracing::error!("Failed to import game: {}", e);
            GameError::from(e)
        })?;

    let response = insert_session(&state, game);
    tracing::info!("Imported game {}", response.game_id);
    Ok(response)
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    with_session(&state, game_id, |session| {
        Ok(Json(GameResponse::new(game_id, &session.game)))
    })
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .remove(&game_id)
        .ok_or(ApiError::NotFound(game_id))?;
    tracing::info!("Deleted game {}", game_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Place a tentative tile for the human player
pub async fn stage_tile(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<StageRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    with_session(&state, game_id, |session| {
        session
            .game
            .stage(Player::Human, payload.row, payload.col, payload.letter)?;
        Ok(Json(GameResponse::new(game_id, &session.game)))
    })
}

pub async fn clear_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    with_session(&state, game_id, |session| {
        session.game.clear_pending_move();
        Ok(Json(GameResponse::new(game_id, &session.game)))
    })
}

/// Preview the pending move without playing it
pub async fn validate_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<ValidateResponse>, ApiError> {
    with_session(&state, game_id, |session| {
        let score = session
            .game
            .validate(&state.dictionary)
            .map_err(GameError::from)?;
        Ok(Json(ValidateResponse {
            words: score.words,
            score: score.total,
            bingo: score.bingo,
        }))
    })
}

/// Play the pending move, then let the opponent answer
pub async fn commit_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    with_session(&state, game_id, |session| {
        let outcome = session.game.commit(Player::Human, &state.dictionary)?;
        let mut turns = vec![TurnOutcome::Committed(outcome)];
        turns.extend(run_opponent(
            &mut session.game,
            state.opponent.as_ref(),
            &state.dictionary,
        )?);
        Ok(Json(GameResponse::with_turns(game_id, &session.game, turns)))
    })
}

/// Give up the turn, then let the opponent answer
pub async fn pass_turn(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    with_session(&state, game_id, |session| {
        let outcome = session.game.pass(Player::Human)?;
        let mut turns = vec![TurnOutcome::Passed(outcome)];
        turns.extend(run_opponent(
            &mut session.game,
            state.opponent.as_ref(),
            &state.dictionary,
        )?);
        Ok(Json(GameResponse::with_turns(game_id, &session.game, turns)))
    })
}
