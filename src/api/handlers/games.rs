//! Game request handlers.

use crate::api::doc::GAME_TAG;
use crate::api::dto::{CreateGameRequest, ErrorResponse, GameResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn game_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_games, create_game))
}

/// GET /api/games - List all games
#[utoipa::path(
    get,
    path = "/",
    tag = GAME_TAG,
    responses(
        (status = 200, description = "All games", body = Vec<GameResponse>)
    )
)]
async fn list_games(State(state): State<AppState>) -> AppResult<Json<Vec<GameResponse>>> {
    let games = state.services.games.list_games().await?;
    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

/// POST /api/games - Create a game
#[utoipa::path(
    post,
    path = "/",
    tag = GAME_TAG,
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Game name already registered", body = ErrorResponse)
    )
)]
async fn create_game(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateGameRequest>,
) -> AppResult<(StatusCode, Json<GameResponse>)> {
    let new_game = req.into_new_game()?;
    let game = state.services.games.create_game(new_game).await?;
    Ok((StatusCode::CREATED, Json(GameResponse::from(game))))
}
