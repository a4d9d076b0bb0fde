//! Game document repository implementation.
//!
//! The turn-lock lives here: [`GameStore::update_board`] persists a move
//! only when the stored `current_player` still equals the acting session
//! id at write time. Zero affected rows is the "not your turn" verdict —
//! the sole serialization point between concurrent move attempts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use matchhub_board::Board;
use matchhub_core::error::{AppError, ErrorKind};
use matchhub_core::result::AppResult;
use matchhub_core::types::{GameId, SessionId};
use matchhub_entity::game::{ChatEntry, Game, GameState};
use matchhub_entity::gamer::Gamer;
use matchhub_entity::GameStore;

/// Repository for game documents.
#[derive(Debug, Clone)]
pub struct GameRepository {
    pool: PgPool,
}

/// Row shape with JSONB columns wrapped for sqlx decoding.
#[derive(Debug, FromRow)]
struct GameRow {
    id: GameId,
    player1_sid: SessionId,
    player1_user_name: String,
    player1_full_name: String,
    player2_sid: SessionId,
    player2_user_name: String,
    player2_full_name: String,
    board: Json<Board>,
    starting_player: SessionId,
    current_player: SessionId,
    state: GameState,
    chat: Json<Vec<ChatEntry>>,
    created_on: DateTime<Utc>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            id: row.id,
            player1_sid: row.player1_sid,
            player1_user_name: row.player1_user_name,
            player1_full_name: row.player1_full_name,
            player2_sid: row.player2_sid,
            player2_user_name: row.player2_user_name,
            player2_full_name: row.player2_full_name,
            board: row.board.0,
            starting_player: row.starting_player,
            current_player: row.current_player,
            state: row.state,
            chat: row.chat.0,
            created_on: row.created_on,
        }
    }
}

impl GameRepository {
    /// Create a new game repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStore for GameRepository {
    async fn create(
        &self,
        player1: &Gamer,
        player2: &Gamer,
        board_size: usize,
    ) -> AppResult<Game> {
        let board = Board::new(board_size);

        let row = sqlx::query_as::<_, GameRow>(
            "INSERT INTO games (player1_sid, player1_user_name, player1_full_name, \
                                player2_sid, player2_user_name, player2_full_name, \
                                board, starting_player, current_player, chat) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $1, $1, '[]'::jsonb) \
             RETURNING *",
        )
        .bind(player1.sid)
        .bind(&player1.user_name)
        .bind(&player1.full_name)
        .bind(player2.sid)
        .bind(&player2.user_name)
        .bind(&player2.full_name)
        .bind(Json(&board))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create game", e))?;

        Ok(row.into())
    }

    async fn find(&self, id: &GameId) -> AppResult<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>("SELECT * FROM games WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find game", e))?;

        Ok(row.map(Into::into))
    }

    async fn update_board(
        &self,
        id: &GameId,
        acting: &SessionId,
        next: &SessionId,
        board: &Board,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE games SET board = $3, current_player = $4 \
             WHERE id = $1 AND current_player = $2",
        )
        .bind(id)
        .bind(acting)
        .bind(Json(board))
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update board", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn append_chat(&self, id: &GameId, entry: &ChatEntry) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE games SET chat = chat || jsonb_build_array($2::jsonb) WHERE id = $1",
        )
        .bind(id)
        .bind(Json(entry))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append chat message", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("No game found to update"));
        }
        Ok(())
    }

    async fn set_state(&self, id: &GameId, state: GameState) -> AppResult<()> {
        sqlx::query("UPDATE games SET state = $2 WHERE id = $1")
            .bind(id)
            .bind(state)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update game state", e)
            })?;

        Ok(())
    }
}
