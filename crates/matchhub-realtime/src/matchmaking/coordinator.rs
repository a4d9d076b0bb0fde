//! Match coordinator — owns the invite/accept/decline handshake between
//! two independently-connected peers, and game creation.
//!
//! An invite exists only as the delivered message; there is no durable
//! invite record and no expiry. Each step resolves session ids to live
//! connections afresh, so a peer that disappeared mid-handshake is
//! discovered lazily at the next delivery attempt. An unavailable peer
//! aborts the action and is reported to the still-reachable side(s); the
//! initiator always gets a response.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use matchhub_core::error::AppError;
use matchhub_core::result::AppResult;
use matchhub_core::types::SessionId;
use matchhub_entity::gamer::Gamer;
use matchhub_entity::{GameStore, GamerStore};

use crate::message::{events, Envelope};
use crate::session::SessionRegistry;

/// Payload of a `gameInvite` notification: the inviter's session id and
/// gamer profile, everything the invitee needs to answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePayload {
    /// The inviter's session id.
    pub sid: SessionId,
    /// The inviter's gamer profile.
    pub gamer: Gamer,
}

/// Coordinates the invite handshake and creates games on acceptance —
/// the only path that produces a game document.
pub struct MatchCoordinator {
    registry: Arc<SessionRegistry>,
    gamers: Arc<dyn GamerStore>,
    games: Arc<dyn GameStore>,
    board_size: usize,
}

impl MatchCoordinator {
    /// Create a new coordinator.
    pub fn new(
        registry: Arc<SessionRegistry>,
        gamers: Arc<dyn GamerStore>,
        games: Arc<dyn GameStore>,
        board_size: usize,
    ) -> Self {
        Self {
            registry,
            gamers,
            games,
            board_size,
        }
    }

    /// Invite the gamer bound to `to`. Delivers a `gameInvite`
    /// notification to the invitee's connection; the returned error is
    /// reported only to the inviter.
    pub async fn invite(&self, from: &SessionId, to: &SessionId) -> AppResult<()> {
        let target = self
            .registry
            .resolve(to)
            .ok_or_else(|| AppError::peer_unavailable("Invited user is no longer available"))?;

        let gamer = self
            .gamers
            .find_by_sid(from)
            .await?
            .ok_or_else(|| AppError::players_not_found("Failed to locate your gamer profile"))?;

        target.send(&Envelope::with_result(
            events::GAME_INVITE,
            &InvitePayload { sid: *from, gamer },
        ));
        Ok(())
    }

    /// Decline an invite from `to`. The decline reaches the inviter on
    /// the `inviteGamer` channel as an error envelope with no payload
    /// beyond the decline itself.
    pub async fn decline(&self, _from: &SessionId, to: &SessionId) -> AppResult<()> {
        let inviter = self
            .registry
            .resolve(to)
            .ok_or_else(|| AppError::peer_unavailable("User is no longer available"))?;

        inviter.send(&Envelope::error(events::INVITE_GAMER, "User declined game"));
        Ok(())
    }

    /// Accept an invite from `to`: create a game between the two players
    /// and deliver the document to both connections (the inviter on
    /// `inviteGamer`, the accepting caller on `acceptGame`).
    ///
    /// Failures after the inviter resolved are reported to **both**
    /// sides: the inviter via an envelope sent here, the caller via the
    /// returned error.
    pub async fn accept(&self, from: &SessionId, to: &SessionId) -> AppResult<()> {
        let counterpart = self
            .registry
            .resolve(to)
            .ok_or_else(|| AppError::peer_unavailable("User is no longer available"))?;

        let players = match self.gamers.find_by_sids(&[*from, *to]).await {
            Ok(players) if players.len() == 2 => players,
            _ => {
                let message = "Failed to locate players for game acceptance";
                counterpart.send(&Envelope::error(events::INVITE_GAMER, message));
                return Err(AppError::players_not_found(message));
            }
        };

        let game = match self
            .games
            .create(&players[0], &players[1], self.board_size)
            .await
        {
            Ok(game) => game,
            Err(_) => {
                let message = "Failed to create a new game";
                counterpart.send(&Envelope::error(events::INVITE_GAMER, message));
                return Err(AppError::internal(message));
            }
        };

        info!(
            game_id = %game.id,
            player1 = %game.player1_user_name,
            player2 = %game.player2_user_name,
            "Game created"
        );

        counterpart.send(&Envelope::with_result(events::INVITE_GAMER, &game));
        if let Some(caller) = self.registry.resolve(from) {
            caller.send(&Envelope::with_result(events::ACCEPT_GAME, &game));
        }
        Ok(())
    }
}
