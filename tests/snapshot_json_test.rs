use serde_json::Value;
use tui_match3::core::{Game, Grid};
use tui_match3::types::{Coord, TileColor};

#[test]
fn snapshot_board_codes_match_the_grid() {
    let game = Game::new(42);
    let snap = game.snapshot();
    for row in 0..8u8 {
        for col in 0..8u8 {
            let color = game.grid().tile(Coord::new(row, col)).unwrap().color;
            assert_eq!(snap.board[row as usize][col as usize], color.code());
            assert_eq!(TileColor::from_code(snap.board[row as usize][col as usize]), Some(color));
        }
    }
}

#[test]
fn snapshot_serializes_to_json() {
    let mut game = Game::new(42).with_pacing(0);
    game.start();
    game.select(Coord::new(3, 4));
    let json = serde_json::to_value(game.snapshot()).unwrap();

    assert_eq!(json["phase"], "playing");
    assert_eq!(json["activity"], "idle");
    assert_eq!(json["moves"], 20);
    assert_eq!(json["target"], 1500);
    assert_eq!(json["selected"]["row"], 3);
    assert_eq!(json["selected"]["col"], 4);
    assert_eq!(json["board"].as_array().unwrap().len(), 8);
    assert!(json["board"][0].as_array().unwrap().iter().all(|v| v.as_u64().unwrap() >= 1));
}

#[test]
fn tiles_serialize_with_type_and_special() {
    let grid = Grid::from_ascii(&[
        "RGBYPORG", "GBYPORGB", "BYPORGBY", "YPORGBYP", "PORGBYPO", "ORGBYPOR", "RGBYPORG",
        "GBYPORGB",
    ])
    .unwrap();
    let tile = grid.tile(Coord::new(0, 2)).unwrap();
    let json: Value = serde_json::to_value(tile).unwrap();
    assert_eq!(json["type"], "blue");
    assert_eq!(json["special"], "none");
    assert_eq!(json["row"], 0);
    assert_eq!(json["col"], 2);
    assert_eq!(json["id"], 3);
}
