/// Fuzzes the pathfinder by checking, for many random maps, that every result is a well-formed
/// route over walkable tiles, that the iteration budget holds, and that the outcome agrees with
/// the connected components of the map.
use bounded_grid_path::{
    moves_along, BoundedAstar, GridView, PathResult, Point, Tile, TileMap, MAX_ITERATIONS,
};
use rand::prelude::*;

fn random_map(n: i32, rng: &mut StdRng, wall_probability: f64) -> TileMap {
    let mut map = TileMap::new(n);
    for x in 0..n {
        for y in 0..n {
            // Leave some holes to exercise sparse maps
            if rng.gen_bool(0.05) {
                continue;
            }
            let tile = if rng.gen_bool(wall_probability) {
                Tile::wall()
            } else {
                Tile::floor()
            };
            map.set_tile(Point::new(x, y), tile);
        }
    }
    map
}

fn random_map_point(map: &TileMap, rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(0..map.size), rng.gen_range(0..map.size))
}

fn check_route(map: &TileMap, start: &Point, path: &[Point]) {
    assert_eq!(path[0], *start);
    for p in &path[1..] {
        assert!(map.is_traversable(p), "{:?} is not walkable", p);
    }
    assert!(moves_along(path).is_ok());
    for (i, p) in path.iter().enumerate() {
        assert!(!path[i + 1..].contains(p), "{:?} visited twice", p);
    }
}

#[test]
fn fuzz() {
    const N: i32 = 12;
    const N_MAPS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = BoundedAstar::new();
    for wall_probability in [1.0 / 7.0, 0.4] {
        for _ in 0..N_MAPS {
            let mut map = random_map(N, &mut rng, wall_probability);
            let start = random_map_point(&map, &mut rng);
            let goal = random_map_point(&map, &mut rng);
            map.set_tile(start, Tile::floor());
            map.set_tile(goal, Tile::floor());
            map.update();

            let report = solver.search(&map, start, goal);
            assert!(report.iterations <= MAX_ITERATIONS);
            assert_eq!(solver.search(&map, start, goal), report);
            match &report.result {
                PathResult::Complete(path) => {
                    check_route(&map, &start, path);
                    assert_eq!(*path.last().unwrap(), goal);
                    assert_eq!(report.cost, Some(path.len() as i32 - 1));
                    assert!(map.reachable(&start, &goal));
                    assert!(report.diagnostic.is_none());
                }
                PathResult::Truncated(path) => {
                    check_route(&map, &start, path);
                    assert_ne!(*path.last().unwrap(), goal);
                    assert_eq!(report.iterations, MAX_ITERATIONS);
                    assert!(report.diagnostic.is_some());
                }
                PathResult::NoPath => {
                    if !map.unreachable(&start, &goal) {
                        println!("{}", map);
                    }
                    assert!(map.unreachable(&start, &goal));
                    assert!(report.diagnostic.is_some());
                }
            }
        }
    }
}

/// With an effectively unlimited budget the search is exhaustive, so the result agrees with
/// reachability exactly.
#[test]
fn fuzz_unbounded_matches_components() {
    const N: i32 = 10;
    const N_MAPS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let solver = BoundedAstar::with_max_iterations(usize::MAX);
    for _ in 0..N_MAPS {
        let mut map = random_map(N, &mut rng, 0.4);
        let start = Point::new(0, 0);
        let goal = Point::new(N - 1, N - 1);
        map.set_tile(start, Tile::floor());
        map.set_tile(goal, Tile::floor());
        map.update();
        let result = solver.find_path(&map, start, goal);
        assert!(!result.is_truncated());
        assert_eq!(result.is_complete(), map.reachable(&start, &goal));
    }
}
