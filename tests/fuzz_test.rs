/// Fuzzes the planner on many small random maps with random relief. A path has to be found
/// exactly when the goal is on the origin's component, and A* has to agree with an
/// exhaustive Dijkstra search on the travel time, which also bounds the heuristic.
use grid_util::point::Point;
use orienteering::{
    AstarSolver, DijkstraSolver, GoalTest, Grid, LegSolver, SimpleGrid, Terrain, TerrainMap,
};
use rand::prelude::*;

fn random_map(w: usize, h: usize, rng: &mut StdRng) -> TerrainMap {
    let mut terrain = SimpleGrid::new(w, h, Terrain::OpenLand);
    let mut elevation = SimpleGrid::new(w, h, 0.0);
    for x in 0..w {
        for y in 0..h {
            let class = if rng.gen_bool(0.3) {
                Terrain::Water
            } else {
                *Terrain::ALL[..9].choose(rng).unwrap()
            };
            terrain.set(x, y, class);
            elevation.set(x, y, rng.gen_range(0.0..20.0));
        }
    }
    TerrainMap::new(terrain, elevation).unwrap()
}

fn visualize_map(map: &TerrainMap, start: &Point, end: &Point) {
    for y in 0..map.height() as i32 {
        for x in 0..map.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else {
                print!("{}", map.terrain_at(&p).symbol());
            }
        }
        println!();
    }
}

fn random_point(map: &TerrainMap, rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0..map.width() as i32),
        rng.gen_range(0..map.height() as i32),
    )
}

fn assert_walkable(map: &TerrainMap, path: &[Point]) {
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert_eq!((a.x - b.x).abs().max((a.y - b.y).abs()), 1);
    }
    assert!(path.iter().all(|p| map.is_traversable(p)));
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_MAPS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let astar = AstarSolver::new();
    for _ in 0..N_MAPS {
        let map = random_map(N, N, &mut rng);
        let start = random_point(&map, &mut rng);
        let end = random_point(&map, &mut rng);
        let reachable = map.reachable(&start, &end);
        let path = astar.find_path(&map, start, end).unwrap();
        // Show the map if a path is not found
        if path.is_some() != reachable {
            visualize_map(&map, &start, &end);
        }
        assert_eq!(path.is_some(), reachable);
        if let Some(path) = path {
            assert_eq!(path.cells.first(), Some(&end));
            assert_eq!(path.cells.last(), Some(&start));
            assert_walkable(&map, &path.cells);
            let cost = astar.path_cost(&map, &path.cells).unwrap();
            assert!((cost - path.cost).abs() <= 1e-9 * cost.max(1.0));
        }
    }
}

#[test]
fn fuzz_cost() {
    const N: usize = 6;
    const N_MAPS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let astar = AstarSolver::new();
    let dijkstra = DijkstraSolver::default();
    let mut early_exit = AstarSolver::new();
    early_exit.options.goal_test = GoalTest::FirstGenerated;

    for _ in 0..N_MAPS {
        let map = random_map(N, N, &mut rng);
        let start = random_point(&map, &mut rng);
        let end = random_point(&map, &mut rng);
        let Some(reference) = dijkstra.find_path(&map, start, end).unwrap() else {
            assert!(map.unreachable(&start, &end));
            continue;
        };
        let path = astar.find_path(&map, start, end).unwrap().unwrap();
        let tolerance = 1e-9 * reference.cost.max(1.0);
        if (path.cost - reference.cost).abs() > tolerance {
            println!("A* cost: {}; Dijkstra cost: {}", path.cost, reference.cost);
            println!("A* path: {:?}\nDijkstra path: {:?}", path.cells, reference.cells);
            visualize_map(&map, &start, &end);
        }
        assert!((path.cost - reference.cost).abs() <= tolerance);
        assert!(astar.heuristic(&map, &start, &end) <= reference.cost + tolerance);

        let early = early_exit.find_path(&map, start, end).unwrap().unwrap();
        assert_walkable(&map, &early.cells);
        assert!(early.cost >= reference.cost - tolerance);
    }
}

#[test]
fn heuristic_never_overestimates() {
    const N: usize = 7;
    let mut rng = StdRng::seed_from_u64(2);
    let astar = AstarSolver::new();
    let dijkstra = DijkstraSolver::default();
    for _ in 0..50 {
        let map = random_map(N, N, &mut rng);
        let end = random_point(&map, &mut rng);
        for y in 0..N as i32 {
            for x in 0..N as i32 {
                let cell = Point::new(x, y);
                if let Some(reference) = dijkstra.find_path(&map, cell, end).unwrap() {
                    assert!(astar.heuristic(&map, &cell, &end) <= reference.cost + 1e-9);
                }
            }
        }
    }
}

#[test]
fn deterministic() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(3);
    let astar = AstarSolver::new();
    for _ in 0..100 {
        let map = random_map(N, N, &mut rng);
        let start = random_point(&map, &mut rng);
        let end = random_point(&map, &mut rng);
        let first = astar.find_path(&map, start, end).unwrap();
        let second = astar.find_path(&map, start, end).unwrap();
        assert_eq!(first, second);
    }
}
