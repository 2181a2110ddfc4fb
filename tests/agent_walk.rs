use bounded_grid_path::{Agent, BoundedAstar, Move, PathResult, Point, TileMap};

/// An agent whose route is cut short walks the partial route and can then plan again from where
/// it stopped, eventually reaching the goal.
#[test]
fn replans_after_truncated_route() {
    let row = ".".repeat(150);
    let map = TileMap::from_rows(&[row.as_str()]);
    let solver = BoundedAstar::new();
    let goal = Point::new(149, 0);
    let mut agent = Agent::new(Point::new(0, 0));
    let mut plans = 0;
    while agent.position != goal {
        let result = agent.set_path_to_goal(&map, &solver, goal);
        plans += 1;
        assert!(result.path().is_some());
        while let Some(action) = agent.take_turn(&map).unwrap() {
            assert_eq!(action, Move::Right);
        }
        assert!(plans <= 3);
    }
    // 69 + 69 steps truncated, then the remaining 11 in one go
    assert_eq!(plans, 3);
}

#[test]
fn follows_route_through_maze() {
    // |S.#...|
    // |#.#.#.|
    // |..#.#.|
    // |.##.#.|
    // |....#G|
    // |####..|
    let map = TileMap::from_rows(&[
        "..#...", "#.#.#.", "..#.#.", ".##.#.", "....#.", "####..",
    ]);
    let solver = BoundedAstar::new();
    let start = Point::new(0, 0);
    let goal = Point::new(5, 4);
    let mut agent = Agent::new(start);
    let result = agent.set_path_to_goal(&map, &solver, goal);
    let path = match result {
        PathResult::Complete(path) => path,
        other => panic!("expected a complete route, got {:?}", other),
    };
    assert_eq!(agent.action_queue.len(), path.len() - 1);
    let mut visited = vec![agent.position];
    while agent.take_turn(&map).unwrap().is_some() {
        visited.push(agent.position);
    }
    assert_eq!(visited, path);
    assert_eq!(agent.position, goal);
}
