use bounded_grid_path::{BoundedAstar, Point, Tile, TileMap};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use std::hint::black_box;

/// A dense map with roughly one wall in seven tiles.
fn random_map(n: i32, rng: &mut StdRng) -> TileMap {
    let mut map = TileMap::new(n);
    for x in 0..n {
        for y in 0..n {
            let tile = if rng.gen_range(0..7) == 1 {
                Tile::wall()
            } else {
                Tile::floor()
            };
            map.set_tile(Point::new(x, y), tile);
        }
    }
    map.update();
    map
}

fn search_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let map = random_map(40, &mut rng);
    let scenarios = (0..100)
        .map(|_| {
            let start = Point::new(rng.gen_range(0..40), rng.gen_range(0..40));
            let goal = Point::new(rng.gen_range(0..40), rng.gen_range(0..40));
            (start, goal)
        })
        .collect::<Vec<_>>();
    for max_iterations in [70, 1000] {
        let solver = BoundedAstar::with_max_iterations(max_iterations);
        c.bench_function(
            format!("40x40 map, {max_iterations} iterations").as_str(),
            |b| {
                b.iter(|| {
                    for (start, goal) in &scenarios {
                        black_box(solver.find_path(&map, *start, *goal));
                    }
                })
            },
        );
    }
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
