use bounded_grid_path::{Agent, BoundedAstar, PathResult, Point, Tile, TileMap};
use rand::prelude::*;

/// Generates a random 40x40 map and lets an agent walk to a random goal, planning again whenever
/// its route was cut short by the iteration budget.
fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let size = 40;
    let mut map = TileMap::new(size);
    for x in 0..size {
        for y in 0..size {
            let tile = if rng.gen_range(0..7) == 1 {
                Tile::wall()
            } else {
                Tile::floor()
            };
            map.set_tile(Point::new(x, y), tile);
        }
    }
    let start = Point::new(0, 0);
    let goal = Point::new(size - 1, size - 1);
    map.set_tile(start, Tile::floor());
    map.set_tile(goal, Tile::floor());
    map.update();
    println!("{}", map);
    if map.unreachable(&start, &goal) {
        println!("Goal is not reachable from the start");
        return;
    }

    let solver = BoundedAstar::new();
    let mut agent = Agent::new(start);
    let mut turns = 0;
    for _ in 0..100 {
        if agent.position == goal {
            println!("Reached the goal after {} turns", turns);
            break;
        }
        match agent.set_path_to_goal(&map, &solver, goal) {
            PathResult::Complete(path) => println!("Complete route of {} tiles", path.len()),
            PathResult::Truncated(path) => println!("Partial route of {} tiles", path.len()),
            PathResult::NoPath => break,
        }
        if agent.action_queue.is_empty() {
            println!("Stuck at ({}, {})", agent.position.x, agent.position.y);
            break;
        }
        while let Some(action) = agent.take_turn(&map).unwrap() {
            turns += 1;
            println!("turn {}: {:?} -> ({}, {})", turns, action, agent.position.x, agent.position.y);
        }
    }
}
