use dungeon_chase_core::{Position, Tile};
use dungeon_chase_world::{MapDefinition, MapError, HUMAN_MARKER, PURSUER_MARKER};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MIXED: &str = "\
name mixed_hall
win 2
#######
#G..#E#
#.#G..#
#..#.G#
#######";

fn mixed() -> MapDefinition {
    MapDefinition::parse(MIXED).expect("valid map")
}

#[test]
fn every_border_tile_is_wall() {
    let map = mixed();
    let grid = map.grid();
    let last_column = grid.columns() as i32 - 1;
    let last_row = grid.rows() as i32 - 1;

    for column in 0..=last_column {
        assert_eq!(grid.tile_at(Position::new(column, 0)), Tile::Wall);
        assert_eq!(grid.tile_at(Position::new(column, last_row)), Tile::Wall);
    }
    for row in 0..=last_row {
        assert_eq!(grid.tile_at(Position::new(0, row)), Tile::Wall);
        assert_eq!(grid.tile_at(Position::new(last_column, row)), Tile::Wall);
    }
}

#[test]
fn open_border_is_fatal() {
    let error = MapDefinition::parse("name leaky\nwin 0\n#####\n#...#\n#..E.\n#####")
        .expect_err("open border must be rejected");
    assert_eq!(error, MapError::OpenBorder { column: 4, row: 2 });
}

#[test]
fn out_of_bounds_reads_as_wall() {
    let map = mixed();
    let grid = map.grid();
    for position in [
        Position::new(-1, 0),
        Position::new(0, -1),
        Position::new(7, 1),
        Position::new(1, 5),
        Position::new(i32::MIN, i32::MAX),
    ] {
        assert!(!grid.contains(position));
        assert_eq!(grid.tile_at(position), Tile::Wall, "{position}");
        assert!(!grid.is_walkable(position));
    }
}

#[test]
fn random_spawn_only_lands_on_floor_or_exit() {
    let map = mixed();
    let grid = map.grid();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_d00d);

    for _ in 0..10_000 {
        let spawn = grid.random_spawn(&mut rng);
        let tile = grid.tile_at(spawn);
        assert!(
            matches!(tile, Tile::Floor | Tile::Exit),
            "spawned on {tile:?} at {spawn}"
        );
    }
}

#[test]
fn gold_is_collected_exactly_once() {
    let (_, mut grid) = mixed().into_parts();
    let gold = Position::new(1, 1);
    assert_eq!(grid.gold_remaining(), 3);

    assert!(grid.collect_gold_at(gold));
    assert_eq!(grid.tile_at(gold), Tile::Floor);
    assert!(!grid.collect_gold_at(gold));
    assert_eq!(grid.gold_remaining(), 2);

    assert!(!grid.collect_gold_at(Position::new(2, 1)));
    assert!(!grid.collect_gold_at(Position::new(40, 40)));
}

#[test]
fn windowed_view_pads_outside_with_walls() {
    let map = mixed();
    let grid = map.grid();
    let overlays = [
        (Position::new(1, 1), HUMAN_MARKER),
        (Position::new(2, 1), PURSUER_MARKER),
    ];

    let view = grid.windowed_view(Position::new(1, 1), 5, &overlays);

    assert_eq!(view.size(), 5);
    assert_eq!(
        view.to_string(),
        "#####\n#####\n##PB.\n##.#G\n##..#"
    );
}

#[test]
fn windowed_view_prefers_the_first_overlay() {
    let map = mixed();
    let grid = map.grid();
    let shared = Position::new(2, 2);
    let overlays = [(shared, HUMAN_MARKER), (shared, PURSUER_MARKER)];

    let view = grid.windowed_view(shared, 3, &overlays);

    assert_eq!(view.cell(1, 1), Some(HUMAN_MARKER));
}

#[test]
fn windowed_view_at_coordinate_limits_is_all_wall() {
    let map = mixed();
    let grid = map.grid();
    let walls = "#####\n#####\n#####\n#####\n#####";

    for center in [
        Position::new(i32::MIN, 0),
        Position::new(i32::MAX, i32::MAX),
        Position::new(0, i32::MIN),
    ] {
        let view = grid.windowed_view(center, 5, &[(center, HUMAN_MARKER)]);
        assert_eq!(view.to_string(), walls, "centred on {center}");
    }
}
