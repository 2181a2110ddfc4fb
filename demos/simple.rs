use bounded_grid_path::{moves_along, BoundedAstar, Point, TileMap};

// In this example a path is found on a 3x3 map with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Tiles have a 4-neighborhood

fn main() {
    let map = TileMap::from_rows(&["...", ".#.", "..."]);
    println!("{}", map);
    let solver = BoundedAstar::new();
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let report = solver.search(&map, start, end);
    println!("Result after {} iterations:", report.iterations);
    if let Some(path) = report.result.path() {
        for p in path {
            println!("({}, {})", p.x, p.y);
        }
        println!("Moves: {:?}", moves_along(path).unwrap());
    }
}
