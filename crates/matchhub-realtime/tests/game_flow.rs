//! End-to-end protocol tests: registration, discovery, the invite
//! handshake, turn-enforced moves, win/draw detection, and chat, driven
//! through the hub exactly as the transport layer drives it.

mod common;

use serde_json::json;

use common::TestApp;
use matchhub_core::types::SessionId;

#[tokio::test]
async fn test_register_then_discover() {
    let app = TestApp::new();

    let mut alice = app.connect_registered("Alice Example", "alice", "pw1").await;
    let mut bob = app.connect_registered("Bob Example", "bob", "pw2").await;

    // Alice is told about the new gamer; Bob joined after Alice, so he
    // receives no broadcast about her.
    let joined = alice.recv_event("gamerJoined").await;
    assert_eq!(joined["result"]["userName"], "bob");
    assert_eq!(joined["result"]["fullName"], "Bob Example");
    bob.assert_silent();

    alice.send(json!({"event": "findAllAvailableGamers"})).await;
    let listing = alice.recv_event("findAllAvailableGamers").await;
    let gamers = listing["result"].as_array().expect("gamer array");
    assert_eq!(gamers.len(), 1);
    assert_eq!(gamers[0]["userName"], "bob");
    assert_eq!(gamers[0]["sid"], json!(bob.sid()));
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = TestApp::new();
    let mut client = app.connect().await;

    client
        .send(json!({"event": "register", "fullName": "", "userName": "alice", "password": "pw1"}))
        .await;
    let err = client.recv_event("register").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["isError"], true);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = TestApp::new();
    let _alice = app.connect_registered("Alice Example", "alice", "pw1").await;

    let mut imposter = app.connect().await;
    imposter
        .send(json!({
            "event": "register",
            "fullName": "Alice Imposter",
            "userName": "alice",
            "password": "pw9",
        }))
        .await;
    let err = imposter.recv_event("register").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"], "User with user name alice already exists");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    let _alice = app.connect_registered("Alice Example", "alice", "pw1").await;

    let mut client = app.connect().await;
    client
        .send(json!({"event": "login", "userName": "alice", "password": "wrong"}))
        .await;
    let err = client.recv_event("login").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"], "User or Password is incorrect");

    client
        .send(json!({"event": "login", "userName": "alice", "password": "pw1"}))
        .await;
    let ok = client.recv_event("login").await;
    assert_eq!(ok["ok"], true);
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = TestApp::new();
    let mut client = app.connect().await;

    client.send(json!({"event": "findAllAvailableGamers"})).await;
    let err = client.recv_event("findAllAvailableGamers").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"], "User not authenticated");
}

#[tokio::test]
async fn test_invite_to_dead_session() {
    let app = TestApp::new();
    let mut alice = app.connect_registered("Alice Example", "alice", "pw1").await;
    let mut bob = app.connect_registered("Bob Example", "bob", "pw2").await;
    alice.recv_event("gamerJoined").await;

    alice
        .send(json!({"event": "inviteGamer", "sid": SessionId::new()}))
        .await;
    let err = alice.recv_event("inviteGamer").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"], "Invited user is no longer available");

    // No message is ever delivered to anyone else.
    bob.assert_silent();
}

#[tokio::test]
async fn test_decline_reaches_the_inviter() {
    let app = TestApp::new();
    let mut alice = app.connect_registered("Alice Example", "alice", "pw1").await;
    let mut bob = app.connect_registered("Bob Example", "bob", "pw2").await;
    alice.recv_event("gamerJoined").await;

    alice.send(json!({"event": "inviteGamer", "sid": bob.sid()})).await;
    let invite = bob.recv_event("gameInvite").await;
    assert_eq!(invite["result"]["sid"], json!(alice.sid()));
    assert_eq!(invite["result"]["gamer"]["userName"], "alice");

    bob.send(json!({"event": "declineGame", "sid": alice.sid()})).await;
    let declined = alice.recv_event("inviteGamer").await;
    assert_eq!(declined["ok"], false);
    assert_eq!(declined["error"], "User declined game");
    bob.assert_silent();
}

#[tokio::test]
async fn test_end_to_end_match() {
    let app = TestApp::new();
    let mut alice = app.connect_registered("Alice Example", "alice", "pw1").await;
    let mut bob = app.connect_registered("Bob Example", "bob", "pw2").await;
    alice.recv_event("gamerJoined").await;

    // Invite and accept.
    alice.send(json!({"event": "inviteGamer", "sid": bob.sid()})).await;
    bob.recv_event("gameInvite").await;

    bob.send(json!({"event": "acceptGame", "sid": alice.sid()})).await;
    let to_alice = alice.recv_event("inviteGamer").await;
    let to_bob = bob.recv_event("acceptGame").await;

    // Both players receive the identical game document.
    assert_eq!(to_alice["result"], to_bob["result"]);
    let game = &to_bob["result"];
    let game_id = game["id"].as_str().expect("game id").to_string();
    assert_eq!(game["startingPlayer"], game["currentPlayer"]);
    for row in game["board"].as_array().expect("board") {
        for cell in row.as_array().expect("row") {
            assert_eq!(*cell, json!(0));
        }
    }

    // The starting player moves first and is always "x".
    let (mut starter, mut other) = if game["startingPlayer"] == json!(alice.sid()) {
        (alice, bob)
    } else {
        (bob, alice)
    };

    starter
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 0, "col": 0}))
        .await;
    let placed = starter.recv_event("placeMarker").await;
    assert_eq!(placed["result"], json!({"row": 0, "col": 0, "marker": "x"}));
    let moved = other.recv_event("gameMove").await;
    assert_eq!(moved["result"], json!({"row": 0, "col": 0, "marker": "x"}));

    // Replaying the same cell fails regardless of whose turn it is.
    starter
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 0, "col": 0}))
        .await;
    let err = starter.recv_event("placeMarker").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"], "Cell already selected");
}

#[tokio::test]
async fn test_turn_enforcement() {
    let app = TestApp::new();
    let (mut starter, mut other, game_id) = start_match(&app).await;

    // The non-current player is rejected and the board stays unchanged.
    other
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 1, "col": 1}))
        .await;
    let err = other.recv_event("placeMarker").await;
    assert_eq!(err["error"], "It is not your turn");

    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    assert!(!game.board.is_occupied(1, 1));

    // The current player succeeds, and the turn flips.
    starter
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 1, "col": 1}))
        .await;
    starter.recv_event("placeMarker").await;
    other.recv_event("gameMove").await;

    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    assert_eq!(game.current_player, other.sid());

    other
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 2, "col": 2}))
        .await;
    let placed = other.recv_event("placeMarker").await;
    assert_eq!(placed["result"]["marker"], "o");
    starter.recv_event("gameMove").await;
}

#[tokio::test]
async fn test_concurrent_same_turn_moves_accept_exactly_one() {
    let app = TestApp::new();
    let (mut starter, mut other, game_id) = start_match(&app).await;

    let first = starter.send(json!({"event": "placeMarker", "gameId": game_id, "row": 0, "col": 0}));
    let second = starter.send(json!({"event": "placeMarker", "gameId": game_id, "row": 1, "col": 1}));
    tokio::join!(first, second);

    let a = starter.recv_event("placeMarker").await;
    let b = starter.recv_event("placeMarker").await;
    let accepted = [&a, &b].iter().filter(|e| e["ok"] == true).count();
    assert_eq!(accepted, 1, "exactly one move may win the turn");
    let rejected = if a["ok"] == true { &b } else { &a };
    assert_eq!(rejected["error"], "It is not your turn");

    // The opponent sees exactly one accepted move; the board carries
    // exactly one new mark.
    other.recv_event("gameMove").await;
    other.assert_silent();

    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    let marks = usize::from(game.board.is_occupied(0, 0)) + usize::from(game.board.is_occupied(1, 1));
    assert_eq!(marks, 1);
}

#[tokio::test]
async fn test_row_win_ends_the_game() {
    let app = TestApp::new();
    let (mut starter, mut other, game_id) = start_match(&app).await;

    let moves = [
        (0, 0), // x
        (1, 0), // o
        (0, 1), // x
        (1, 1), // o
        (0, 2), // x
        (1, 2), // o
    ];
    for (i, (row, col)) in moves.iter().enumerate() {
        let mover = if i % 2 == 0 { &starter } else { &other };
        mover
            .send(json!({"event": "placeMarker", "gameId": game_id, "row": row, "col": col}))
            .await;
    }
    for _ in 0..3 {
        starter.recv_event("placeMarker").await;
        starter.recv_event("gameMove").await;
        other.recv_event("gameMove").await;
        other.recv_event("placeMarker").await;
    }

    // The winning move fills row 0 on the 4×4 board.
    starter
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 0, "col": 3}))
        .await;
    starter.recv_event("placeMarker").await;
    other.recv_event("gameMove").await;

    let winner = json!({"winner": starter.sid()});
    assert_eq!(starter.recv_event("gameOver").await["result"], winner);
    assert_eq!(other.recv_event("gameOver").await["result"], winner);

    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    assert_eq!(game.state, matchhub_entity::GameState::Won);
}

#[tokio::test]
async fn test_full_board_without_win_is_a_draw() {
    let app = TestApp::with_board_size(3);
    let (mut starter, mut other, game_id) = start_match(&app).await;

    // x  o  x
    // x  o  o
    // o  x  x
    let moves = [
        (0, 0), // x
        (0, 1), // o
        (0, 2), // x
        (1, 1), // o
        (1, 0), // x
        (1, 2), // o
        (2, 1), // x
        (2, 0), // o
        (2, 2), // x — fills the board, no winner
    ];
    for (i, (row, col)) in moves.iter().enumerate() {
        let (mover, watcher) = if i % 2 == 0 {
            (&mut starter, &mut other)
        } else {
            (&mut other, &mut starter)
        };
        mover
            .send(json!({"event": "placeMarker", "gameId": game_id, "row": row, "col": col}))
            .await;
        mover.recv_event("placeMarker").await;
        watcher.recv_event("gameMove").await;
    }

    let draw = json!({"draw": true});
    assert_eq!(starter.recv_event("gameOver").await["result"], draw);
    assert_eq!(other.recv_event("gameOver").await["result"], draw);

    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    assert_eq!(game.state, matchhub_entity::GameState::Drawn);
}

#[tokio::test]
async fn test_chat_between_players() {
    let app = TestApp::new();
    let (mut starter, mut other, game_id) = start_match(&app).await;

    starter
        .send(json!({"event": "sendMessage", "gameId": game_id, "message": "good luck"}))
        .await;

    let delivered = other.recv_event("chatMessage").await;
    assert_eq!(delivered["result"]["fromSid"], json!(starter.sid()));
    assert_eq!(delivered["result"]["message"], "good luck");

    let ack = starter.recv_event("sendMessage").await;
    assert_eq!(ack["ok"], true);

    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    assert_eq!(game.chat.len(), 1);
    assert_eq!(game.chat[0].message, "good luck");
    assert_eq!(game.chat[0].from, game.user_name_of(&starter.sid()));
}

#[tokio::test]
async fn test_chat_to_unknown_game() {
    let app = TestApp::new();
    let (mut starter, _other, _game_id) = start_match(&app).await;

    let missing = matchhub_core::types::GameId::new();
    starter
        .send(json!({"event": "sendMessage", "gameId": missing, "message": "anyone?"}))
        .await;

    let err = starter.recv_event("sendMessage").await;
    assert_eq!(err["ok"], false);
    assert_eq!(
        err["error"],
        format!("could not find the game with id {missing}")
    );
}

#[tokio::test]
async fn test_move_against_disconnected_opponent_stands() {
    let app = TestApp::new();
    let (mut starter, other, game_id) = start_match(&app).await;

    other.disconnect();

    starter
        .send(json!({"event": "placeMarker", "gameId": game_id, "row": 0, "col": 0}))
        .await;
    let err = starter.recv_event("placeMarker").await;
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"], "User is no longer available");

    // The move was persisted before delivery was attempted.
    let game = app.games.get(&game_id.parse().unwrap()).unwrap();
    assert!(game.board.is_occupied(0, 0));
    assert_eq!(game.current_player, other.sid());
}

#[tokio::test]
async fn test_unparseable_frame() {
    let app = TestApp::new();
    let mut client = app.connect().await;

    client.send_raw("not json at all").await;
    let err = client.recv_event("error").await;
    assert_eq!(err["ok"], false);
}

/// Register two players, run the invite/accept handshake, and hand back
/// (starter, other, game id).
async fn start_match(app: &TestApp) -> (common::TestClient, common::TestClient, String) {
    let mut alice = app.connect_registered("Alice Example", "alice", "pw1").await;
    let mut bob = app.connect_registered("Bob Example", "bob", "pw2").await;
    alice.recv_event("gamerJoined").await;

    alice.send(json!({"event": "inviteGamer", "sid": bob.sid()})).await;
    bob.recv_event("gameInvite").await;
    bob.send(json!({"event": "acceptGame", "sid": alice.sid()})).await;

    let to_alice = alice.recv_event("inviteGamer").await;
    let _to_bob = bob.recv_event("acceptGame").await;

    let game = &to_alice["result"];
    let game_id = game["id"].as_str().expect("game id").to_string();

    if game["startingPlayer"] == json!(alice.sid()) {
        (alice, bob, game_id)
    } else {
        (bob, alice, game_id)
    }
}
