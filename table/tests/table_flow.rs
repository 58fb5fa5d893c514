use minepot_core::{payout, Coord2, GameError, Session, SessionStatus};
use minepot_protocol::{
    limits, BalanceResponse, CellView, GameResponse, HistoryEntry, HistoryResponse,
    RevealCellRequest, SessionView, StartGameRequest,
};
use minepot_table::{PlayerId, Table, TableError, TableRules, STARTING_BALANCE};

const PLAYER: PlayerId = PlayerId(7);

fn table() -> Table {
    Table::with_seed(TableRules::default(), 0xc0ffee)
}

/// Coordinates of all hidden cells matching `mined`, in row order.
fn hidden_cells(session: &Session, mined: bool) -> Vec<Coord2> {
    let mut cells = Vec::new();
    for row in 0..session.size() {
        for col in 0..session.size() {
            let cell = session.cell_at((row, col));
            if !cell.revealed && cell.has_mine == mined {
                cells.push((row, col));
            }
        }
    }
    cells
}

#[test]
fn five_mine_wager_runs_from_bet_to_mine() {
    let mut table = table();

    table.start_game(PLAYER, 10.0, 5).unwrap();
    let session = table.current_session(PLAYER).unwrap();
    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.multiplier(), 1.0);
    let gems = hidden_cells(session, false);
    let mines = hidden_cells(session, true);
    assert_eq!(table.balance(PLAYER), Some(STARTING_BALANCE - 10.0));

    let (session, payout) = table.reveal_cell(PLAYER, gems[0]).unwrap();
    assert_eq!(session.status(), SessionStatus::Active);
    assert!(session.multiplier() > 1.0);
    assert_eq!(payout, 10.0 * session.multiplier());

    let (_, payout) = table.reveal_cell(PLAYER, mines[0]).unwrap();
    assert_eq!(payout, 0.0);
    assert_eq!(table.balance(PLAYER), Some(STARTING_BALANCE - 10.0));

    let session = table.current_session(PLAYER).unwrap();
    assert_eq!(session.status(), SessionStatus::Lost);
    let view = SessionView::from(session);
    let shown = view
        .board
        .iter()
        .flatten()
        .filter(|&&c| c == CellView::Mine)
        .count();
    assert_eq!(shown, 5);
    assert_eq!(table.history(PLAYER).unwrap().latest().unwrap().payout, 0.0);
}

#[test]
fn single_mine_full_clear_pays_the_maximum() {
    let mut table = table();

    table.start_game(PLAYER, 10.0, 1).unwrap();
    let gems = hidden_cells(table.current_session(PLAYER).unwrap(), false);
    assert_eq!(gems.len(), 24);

    let mut last_payout = 0.0;
    for &gem in &gems {
        let (_, payout) = table.reveal_cell(PLAYER, gem).unwrap();
        last_payout = payout;
    }

    let session = table.current_session(PLAYER).unwrap();
    assert_eq!(session.status(), SessionStatus::Won);
    assert_eq!(last_payout, 10.0 * payout::multiplier(24, 25, 1));
    assert_eq!(
        table.balance(PLAYER),
        Some(STARTING_BALANCE - 10.0 + last_payout)
    );
}

#[test]
fn ten_mine_cash_out_credits_exactly_the_payout() {
    let mut table = table();

    table.start_game(PLAYER, 20.0, 10).unwrap();
    let gems = hidden_cells(table.current_session(PLAYER).unwrap(), false);
    for &gem in gems.iter().take(3) {
        table.reveal_cell(PLAYER, gem).unwrap();
    }

    let (session, payout) = table.cash_out(PLAYER).unwrap();
    assert_eq!(session.status(), SessionStatus::CashedOut);
    assert_eq!(payout, 20.0 * payout::multiplier(3, 25, 10));
    assert_eq!(
        table.balance(PLAYER),
        Some(STARTING_BALANCE - 20.0 + payout)
    );
    assert_eq!(
        table.cash_out(PLAYER),
        Err(TableError::Game(GameError::NoActiveSession))
    );
}

#[test]
fn the_seat_holds_one_wager_and_respects_the_funds() {
    let mut table = table();

    table.start_game(PLAYER, 10.0, 5).unwrap();
    assert_eq!(
        table.start_game(PLAYER, 10.0, 5),
        Err(TableError::SessionInProgress)
    );
    table.cash_out(PLAYER).unwrap();
    table.start_game(PLAYER, 10.0, 5).unwrap();
    table.cash_out(PLAYER).unwrap();

    table.reset_balance(PLAYER, 5.0).unwrap();
    assert_eq!(
        table.start_game(PLAYER, 10.0, 5),
        Err(TableError::InsufficientBalance {
            bet: 10.0,
            available: 5.0
        })
    );
    assert_eq!(table.deposit(PLAYER, 100.0), Ok(105.0));
    table.start_game(PLAYER, 10.0, 5).unwrap();

    let wire = serde_json::to_value(BalanceResponse {
        balance: table.balance(PLAYER).unwrap(),
    })
    .unwrap();
    assert_eq!(wire["balance"], 95.0);
}

#[test]
fn wire_requests_drive_the_table() {
    let request: StartGameRequest = serde_json::from_str(r#"{"bet":10.0,"mineCount":5}"#).unwrap();
    assert!(request.bet >= limits::MIN_BET);
    assert!((limits::MIN_MINES..=limits::MAX_MINES).contains(&request.mine_count));

    let mut table = table();
    assert_eq!(table.rules().board_size, limits::GRID_SIZE);
    assert_eq!(table.rules().max_mines(), limits::MAX_MINES);
    table
        .start_game(PLAYER, request.bet, request.mine_count)
        .unwrap();

    let out_of_range: RevealCellRequest = serde_json::from_str(r#"{"row":-1,"col":0}"#).unwrap();
    assert_eq!(out_of_range.coords().unwrap_err(), GameError::OutOfBounds);

    let gem = hidden_cells(table.current_session(PLAYER).unwrap(), false)[0];
    let reveal = RevealCellRequest {
        row: i32::from(gem.0),
        col: i32::from(gem.1),
    };
    let payout = table.reveal_cell(PLAYER, reveal.coords().unwrap()).unwrap().1;

    let balance = table.balance(PLAYER).unwrap();
    let session = table.current_session(PLAYER).unwrap();
    let response = GameResponse::with_balance(session, balance);
    assert_eq!(payout, 10.0 * response.game.current_multiplier);

    // an active wager never puts mines on the wire
    let hidden = response
        .game
        .board
        .iter()
        .flatten()
        .filter(|&&c| c == CellView::Hidden)
        .count();
    assert_eq!(hidden, 24);
    assert!(response.game.board.iter().flatten().all(|&c| c != CellView::Mine));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["balance"], balance);
    assert!(json.get("payout").is_none());
    assert_eq!(json["game"]["status"], "active");
    assert_eq!(json["game"]["mineCount"], 5);
}

#[test]
fn history_arrives_newest_first_over_the_wire() {
    let mut table = table();
    for bet in [10.0, 20.0, 30.0] {
        table.start_game(PLAYER, bet, 5).unwrap();
        table.cash_out(PLAYER).unwrap();
    }

    let history = table.history(PLAYER).unwrap();
    let response = HistoryResponse {
        history: history.records().map(HistoryEntry::from).collect(),
    };
    let bets: Vec<f64> = response.history.iter().map(|e| e.bet).collect();
    assert_eq!(bets, vec![30.0, 20.0, 10.0]);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["history"][0]["result"], "cashed_out");
    assert_eq!(json["history"][0]["payout"], 30.0);
    assert_eq!(json["history"][2]["bet"], 10.0);
}
