//! Tests for the session's delayed computer turn.
//!
//! Time is paused, so sleeps resolve as soon as every task is idle.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use gridmark::{GameConfig, Overrides, Session, SessionEvent};
use gridmark_core::{Board, Cell, MoveError, PlayerId, Status, Strategy};

fn config(size: usize, first: &str, computer: &str) -> GameConfig {
    GameConfig::default().with_overrides(Overrides {
        board_size: Some(size),
        first_player: Some(first.to_string()),
        computer_player: Some(computer.to_string()),
        computer_delay_ms: Some(500),
        seed: Some(17),
    })
}

/// Always offers the same cell, legal or not.
struct FixedCell(Option<Cell>);

impl Strategy for FixedCell {
    fn choose_move(&mut self, _board: &Board, _last_move: Option<Cell>) -> Option<Cell> {
        self.0
    }

    fn name(&self) -> &str {
        "fixed cell"
    }
}

fn id(name: &str) -> PlayerId {
    PlayerId::from(name)
}

#[tokio::test(start_paused = true)]
async fn test_human_input_ignored_while_computer_thinks() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::start(&config(3, "x", "o"), tx).await;
    assert_eq!(rx.recv().await, Some(SessionEvent::Started(Status::Playing(id("x")))));

    let started = Instant::now();
    let status = session.submit(Cell::new(1, 1)).await.expect("Move failed");
    assert_eq!(status, Status::ComputerThinking(id("o")));
    assert!(session.is_computer_pending());

    assert_eq!(
        session.submit(Cell::new(0, 0)).await,
        Err(MoveError::AwaitingComputer)
    );

    assert_eq!(
        rx.recv().await,
        Some(SessionEvent::Moved {
            player: id("x"),
            cell: Cell::new(1, 1),
            status: Status::ComputerThinking(id("o")),
        })
    );
    assert_eq!(
        rx.recv().await,
        Some(SessionEvent::Moved {
            player: id("o"),
            cell: Cell::new(1, 2),
            status: Status::Playing(id("x")),
        })
    );
    assert!(started.elapsed() >= Duration::from_millis(500));

    let game = session.snapshot().await.expect("No game");
    assert_eq!(game.history().len(), 2);
    assert!(!game.board().is_marked(Cell::new(0, 0)));
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_computer_move() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = config(3, "x", "o");
    let mut session = Session::start(&config, tx).await;
    session.submit(Cell::new(0, 0)).await.expect("Move failed");

    tokio::time::advance(Duration::from_millis(200)).await;
    let status = session.new_game(&config).await;
    assert_eq!(status, Status::Playing(id("x")));
    assert!(!session.is_computer_pending());

    tokio::time::sleep(Duration::from_secs(2)).await;

    let game = session.snapshot().await.expect("No game");
    assert!(game.history().is_empty());
    assert_eq!(game.current_player(), &id("x"));

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(events.len(), 3, "unexpected events: {events:?}");
    assert_eq!(events[2], SessionEvent::Started(Status::Playing(id("x"))));
}

#[tokio::test(start_paused = true)]
async fn test_computer_first_takes_center() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = Session::start(&config(7, "x", "x"), tx).await;
    assert_eq!(
        rx.recv().await,
        Some(SessionEvent::Started(Status::ComputerThinking(id("x"))))
    );
    assert_eq!(
        rx.recv().await,
        Some(SessionEvent::Moved {
            player: id("x"),
            cell: Cell::new(3, 3),
            status: Status::Playing(id("o")),
        })
    );
    assert_eq!(session.status().await, Status::Playing(id("o")));
}

#[tokio::test(start_paused = true)]
async fn test_top_edge_reply_on_five_by_five() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::start(&config(5, "x", "o"), tx).await;
    session.submit(Cell::new(0, 2)).await.expect("Move failed");

    let reply = loop {
        match rx.recv().await.expect("Channel closed") {
            SessionEvent::Moved { player, cell, .. } if player == id("o") => break cell,
            _ => continue,
        }
    };
    assert_eq!(reply, Cell::new(0, 3));
}

#[tokio::test(start_paused = true)]
async fn test_moves_after_game_over_are_rejected() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let config = GameConfig::default().with_overrides(Overrides {
        computer_player: Some("-".to_string()),
        ..Overrides::default()
    });
    let mut session = Session::start(&config, tx).await;
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        session.submit(Cell::new(row, col)).await.expect("Move failed");
    }
    assert_eq!(session.status().await, Status::Won(id("x")));
    assert_eq!(
        session.submit(Cell::new(2, 2)).await,
        Err(MoveError::GameOver)
    );
}

#[tokio::test(start_paused = true)]
async fn test_rejected_strategy_cell_falls_back_to_open_cell() {
    for offered in [Some(Cell::new(9, 9)), Some(Cell::new(1, 1)), None] {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let strategy = Box::new(FixedCell(offered));
        let mut session = Session::with_strategy(&config(3, "x", "o"), strategy, tx).await;
        session.submit(Cell::new(1, 1)).await.expect("Move failed");

        let reply = loop {
            match rx.recv().await.expect("Channel closed") {
                SessionEvent::Moved { player, cell, status } if player == id("o") => {
                    assert_eq!(status, Status::Playing(id("x")));
                    break cell;
                }
                _ => continue,
            }
        };
        assert_ne!(reply, Cell::new(1, 1));
        assert!(reply.row < 3 && reply.col < 3);

        let open = if reply == Cell::new(0, 0) { Cell::new(2, 2) } else { Cell::new(0, 0) };
        assert_eq!(
            session.submit(open).await,
            Ok(Status::ComputerThinking(id("o")))
        );
    }
}
