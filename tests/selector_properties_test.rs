// Behavioural properties of the move selector
//
// Covers: adjacent apples, fully enclosed heads, apple-less boards,
// crowdedness never counting our own snake, determinism, and the
// difference between the bfs and crowded strategies.

use snake_move_selector::config::Config;
use snake_move_selector::crowd::{CrowdMap, CrowdWindow};
use snake_move_selector::grid::Snapshot;
use snake_move_selector::search::SearchStrategy;
use snake_move_selector::selector::{DecisionReason, MoveSelector};
use snake_move_selector::types::{Cell, Direction};

fn selector_with(strategy: SearchStrategy, radius: usize) -> MoveSelector {
    let mut config = Config::default_hardcoded();
    config.search.strategy = strategy;
    config.search.crowd_radius = radius;
    MoveSelector::new(config)
}

fn both_strategies() -> [MoveSelector; 2] {
    [
        selector_with(SearchStrategy::Bfs, 5),
        selector_with(SearchStrategy::Crowded, 5),
    ]
}

#[test]
fn test_adjacent_apple_in_every_direction() {
    // Head in the centre of a 3x3 board, a single apple on one side
    let cases = [
        (Cell::new(0, 1), Direction::Up),
        (Cell::new(1, 2), Direction::Right),
        (Cell::new(2, 1), Direction::Down),
        (Cell::new(1, 0), Direction::Left),
    ];

    for (apple, expected) in cases {
        let mut rows = vec![vec![0; 3]; 3];
        rows[1][1] = 3;
        rows[apple.row][apple.col] = 1;
        let snapshot = Snapshot::from_rows(2, 3, &rows);

        for selector in both_strategies() {
            let decision = selector.select(&snapshot);
            assert_eq!(
                decision.direction, expected,
                "apple at {} with {}",
                apple,
                selector.strategy()
            );
        }
    }
}

#[test]
fn test_fully_enclosed_head_returns_default() {
    let snapshot = Snapshot::from_rows(
        2,
        3,
        &[
            vec![1, 6, 1],
            vec![6, 3, 2],
            vec![1, 5, 1],
        ],
    );
    for selector in both_strategies() {
        let decision = selector.select(&snapshot);
        assert_eq!(decision.direction, Direction::Up);
        assert_eq!(decision.reason, DecisionReason::Trapped);
    }
}

#[test]
fn test_no_apples_points_at_open_cell() {
    let snapshot = Snapshot::from_rows(
        2,
        3,
        &[
            vec![0, 6, 0, 0],
            vec![4, 3, 0, 0],
            vec![0, 2, 2, 0],
        ],
    );
    let head = snapshot.head().unwrap();
    for selector in both_strategies() {
        let decision = selector.select(&snapshot);
        let target = head
            .step(decision.direction, snapshot.height, snapshot.width)
            .expect("direction must stay on the grid");
        assert_eq!(snapshot.code(target), 0);
    }
}

#[test]
fn test_own_codes_are_never_opposing() {
    // Board packed with our own head/body codes and apples only
    let snapshot = Snapshot::from_rows(
        8,
        9,
        &[
            vec![8, 8, 8, 8, 8],
            vec![8, 9, 1, 8, 8],
            vec![8, 8, 8, 8, 1],
        ],
    );
    for window in [CrowdWindow::Sliding, CrowdWindow::Tiled] {
        for size in [1, 2, 5, 10] {
            let crowd = CrowdMap::build(&snapshot, window, size);
            assert_eq!(crowd.max(), 0, "{} size {}", window, size);
        }
    }

    // Swapping which codes are "ours" turns the same board crowded
    let mut other = snapshot.clone();
    other.body_code = 2;
    other.head_code = 3;
    assert!(CrowdMap::build(&other, CrowdWindow::Sliding, 2).max() > 0);
    assert!(CrowdMap::build(&other, CrowdWindow::Tiled, 2).max() > 0);
}

#[test]
fn test_identical_input_gives_identical_output() {
    let input = "6 6\n2 3\n\
                 0 0 0 0 0 1\n\
                 0 4 4 4 0 0\n\
                 0 0 3 5 0 0\n\
                 0 0 2 0 0 0\n\
                 6 6 2 0 7 0\n\
                 1 0 0 0 6 6\n";
    for strategy in [SearchStrategy::Bfs, SearchStrategy::Crowded] {
        let selector = selector_with(strategy, 5);
        let (_, first) = selector.select_from_input(input);
        for _ in 0..20 {
            let (_, again) = selector.select_from_input(input);
            assert_eq!(again, first);
        }
    }
}

#[test]
fn test_crowded_strategy_avoids_busy_corridor() {
    // Short corridor along the bottom runs next to an opponent; the long way
    // round over the top is quiet.
    let snapshot = Snapshot::from_rows(
        2,
        3,
        &[
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 2, 2, 2, 2, 2, 0],
            vec![0, 2, 0, 0, 0, 2, 0],
            vec![3, 0, 0, 0, 0, 0, 1],
            vec![6, 6, 6, 6, 6, 6, 5],
            vec![6, 6, 6, 6, 6, 6, 6],
        ],
    );

    let bfs = selector_with(SearchStrategy::Bfs, 2).select(&snapshot);
    let crowded = selector_with(SearchStrategy::Crowded, 2).select(&snapshot);

    assert_eq!(bfs.direction, Direction::Right);
    assert_eq!(crowded.direction, Direction::Up);
}

#[test]
fn test_nearest_apple_wins_with_bfs() {
    let snapshot = Snapshot::from_rows(
        2,
        3,
        &[
            vec![1, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 3, 0, 1],
        ],
    );
    let decision = selector_with(SearchStrategy::Bfs, 5).select(&snapshot);
    assert_eq!(decision.direction, Direction::Right);
    assert_eq!(
        decision.reason,
        DecisionReason::PathToApple {
            apple: Cell::new(1, 5),
            moves: 2,
            cost: 2,
        }
    );
}
