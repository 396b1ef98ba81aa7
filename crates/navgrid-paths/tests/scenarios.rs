use std::collections::VecDeque;

use navgrid_core::{GridConfig, NavGrid, Point, SharedGrid, Vec2};
use navgrid_paths::{
    BlockedStartPolicy, Direction, GraphPathfinder, Path, PathError, PathJob, SearchConfig,
    find_path_batch, run_jobs, try_find_path_batch,
};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn open(w: i32, h: i32) -> NavGrid {
    NavGrid::new(GridConfig::new(w, h)).unwrap()
}

fn ascii(text: &str) -> NavGrid {
    NavGrid::from_ascii(GridConfig::default(), text).unwrap()
}

/// Run a query through both executors and check they agree.
fn both(grid: &NavGrid, start: Point, end: Point, dirs: &[Direction]) -> Path {
    let mut pf = GraphPathfinder::new();
    let graph = pf.find_cell_path(grid, start, end, dirs);
    let batch = find_path_batch(start, end, &grid.snapshot(), dirs);
    assert_eq!(graph, batch, "executors disagree on {start} -> {end}");
    graph
}

fn assert_valid(grid: &NavGrid, path: &Path, dirs: &[Direction]) {
    let allowed = navgrid_paths::resolve(dirs);
    let mut cost = 0;
    for d in path.directions() {
        let d = d.expect("consecutive waypoints must be adjacent");
        assert!(allowed.contains(&d), "{d} not allowed");
        cost += d.step_cost();
    }
    assert_eq!(cost, path.cost());
    for &p in &path.cells()[1..] {
        assert!(grid.is_walkable(p), "{p} is blocked");
    }
}

/// Unit-cost BFS distance in cardinal moves, for optimality checks.
fn bfs_steps(grid: &NavGrid, start: Point, end: Point) -> Option<i32> {
    let mut dist = vec![-1; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.index(start)?] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[grid.index(p)?];
        if p == end {
            return Some(d);
        }
        for dir in Direction::CARDINAL {
            let q = p + dir.offset();
            let Some(qi) = grid.index(q) else {
                continue;
            };
            if grid.is_walkable(q) && dist[qi] < 0 {
                dist[qi] = d + 1;
                queue.push_back(q);
            }
        }
    }
    None
}

#[test]
fn open_grid_diagonal() {
    let g = open(5, 5);
    let path = both(&g, Point::new(0, 0), Point::new(4, 4), &Direction::ALL);
    let diagonal: Vec<_> = (0..5).map(|i| Point::new(i, i)).collect();
    assert_eq!(path.cells(), diagonal.as_slice());
    assert_eq!(path.cost(), 56);
}

#[test]
fn open_grid_cardinal() {
    let g = open(5, 5);
    let path = both(&g, Point::new(0, 0), Point::new(4, 4), &Direction::CARDINAL);
    assert_eq!(path.len(), 9);
    assert_eq!(path.cost(), 80);
    assert_valid(&g, &path, &Direction::CARDINAL);
}

#[test]
fn blocked_center() {
    let g = ascii(
        "
...
.#.
...
",
    );
    let path = both(&g, Point::new(0, 0), Point::new(2, 2), &[]);
    assert!(!path.contains(Point::new(1, 1)));
    assert_eq!(path.len(), 4);
    assert_eq!(path.cost(), 34);
    assert_valid(&g, &path, &[]);
}

#[test]
fn blocked_start_policy() {
    let mut g = open(4, 4);
    g.set_blockage(Point::new(0, 0), true);
    let (start, end) = (Point::new(0, 0), Point::new(3, 0));

    let path = both(&g, start, end, &[]);
    assert_eq!(path.start(), Some(start));
    assert_eq!(path.cost(), 30);

    let reject = SearchConfig::default().with_blocked_start(BlockedStartPolicy::Reject);
    let mut pf = GraphPathfinder::with_config(reject);
    assert_eq!(
        pf.try_find_path(&g, start, end, &[]),
        Err(PathError::StartBlocked(start))
    );
    assert!(pf.find_cell_path(&g, start, end, &[]).is_empty());
    assert_eq!(
        try_find_path_batch(start, end, &g.snapshot(), &[], &reject),
        Err(PathError::StartBlocked(start))
    );
}

#[test]
fn full_wall_is_unreachable() {
    let g = ascii(
        "
..#..
..#..
..#..
..#..
",
    );
    let (start, end) = (Point::new(0, 0), Point::new(4, 3));
    assert!(both(&g, start, end, &[]).is_empty());
    let mut pf = GraphPathfinder::new();
    assert_eq!(
        pf.try_find_path(&g, start, end, &[]),
        Err(PathError::Unreachable { start, goal: end })
    );
}

#[test]
fn blocked_goal_is_unreachable() {
    let mut g = open(3, 3);
    g.set_blockage(Point::new(2, 2), true);
    assert!(both(&g, Point::new(0, 0), Point::new(2, 2), &[]).is_empty());
}

#[test]
fn out_of_range_is_empty() {
    let g = open(3, 3);
    assert!(both(&g, Point::new(0, 0), Point::new(3, 0), &[]).is_empty());
    assert!(both(&g, Point::new(-1, 0), Point::new(1, 1), &[]).is_empty());
}

#[test]
fn blockage_is_reversible() {
    let mut g = ascii(
        "
......
.####.
......
",
    );
    let (start, end) = (Point::new(0, 1), Point::new(5, 1));
    let before = both(&g, start, end, &Direction::CARDINAL);
    assert!(!before.is_empty());

    for x in 0..6 {
        g.set_blockage(Point::new(x, 0), true);
    }
    let detour = both(&g, start, end, &Direction::CARDINAL);
    assert!(detour.cost() >= before.cost());

    for x in 0..6 {
        g.set_blockage(Point::new(x, 0), false);
    }
    // Repeated blocking is a no-op.
    g.set_blockage(Point::new(1, 1), true);
    g.set_blockage(Point::new(1, 1), true);
    assert_eq!(both(&g, start, end, &Direction::CARDINAL), before);
}

#[test]
fn world_queries_agree() {
    let g = NavGrid::from_ascii(
        GridConfig::default()
            .with_cell_size(2.0)
            .with_origin(Vec2::new(-10.0, 5.0)),
        "
....
.##.
....
",
    )
    .unwrap();
    let (from, to) = (Vec2::new(-9.0, 6.0), Vec2::new(-3.5, 10.9));
    let mut pf = GraphPathfinder::new();
    let graph = pf.find_path(&g, from, to, &[]);
    let job = PathJob::from_world(g.snapshot(), from, to);
    let path = job.clone().run();
    assert_eq!(graph, job.waypoints(&path));
    assert_eq!(graph.first(), Some(&Vec2::new(-9.0, 6.0)));
    assert_eq!(graph.last(), Some(&Vec2::new(-3.0, 10.0)));
}

#[test]
fn non_finite_world_positions_find_nothing() {
    let g = open(5, 5);
    let mut pf = GraphPathfinder::new();
    let goal = Vec2::new(4.5, 4.5);
    assert!(pf.find_path(&g, Vec2::NAN, goal, &[]).is_empty());
    assert!(matches!(
        pf.try_find_path_world(&g, Vec2::NAN, goal, &[]),
        Err(PathError::StartOutOfRange(_))
    ));
    assert!(matches!(
        pf.try_find_path_world(&g, Vec2::new(0.5, 0.5), Vec2::new(f32::INFINITY, 2.5), &[]),
        Err(PathError::GoalOutOfRange(_))
    ));
    assert!(g.cell_at_world(Vec2::NAN).is_none());

    let job = PathJob::from_world(g.snapshot(), Vec2::new(0.5, 0.5), Vec2::new(f32::NAN, 2.5));
    assert!(matches!(job.clone().try_run(), Err(PathError::GoalOutOfRange(_))));
    assert!(job.run().is_empty());
}

fn random_grid(rng: &mut StdRng, w: i32, h: i32, density: f64) -> NavGrid {
    let mut g = open(w, h);
    for y in 0..h {
        for x in 0..w {
            if rng.random_bool(density) {
                g.set_blockage(Point::new(x, y), true);
            }
        }
    }
    g
}

#[test]
fn executors_agree_on_random_grids() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut pf = GraphPathfinder::new();
    let dir_sets: [&[Direction]; 3] = [&[], &Direction::CARDINAL, &Direction::DIAGONAL];
    for round in 0..40 {
        let w = rng.random_range(2..24);
        let h = rng.random_range(2..24);
        let g = random_grid(&mut rng, w, h, 0.3);
        let snap = g.snapshot();
        for _ in 0..10 {
            let start = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            let end = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            let dirs = dir_sets[round % dir_sets.len()];
            let graph = pf.find_cell_path(&g, start, end, dirs);
            let batch = find_path_batch(start, end, &snap, dirs);
            assert_eq!(graph, batch, "round {round}: {start} -> {end}");
            if !graph.is_empty() {
                assert_eq!(graph.start(), Some(start));
                assert_eq!(graph.goal(), Some(end));
                assert_valid(&g, &graph, dirs);
            }
        }
    }
}

#[test]
fn cardinal_paths_are_optimal() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut pf = GraphPathfinder::new();
    for _ in 0..20 {
        let g = random_grid(&mut rng, 16, 16, 0.25);
        for _ in 0..10 {
            let start = Point::new(rng.random_range(0..16), rng.random_range(0..16));
            let end = Point::new(rng.random_range(0..16), rng.random_range(0..16));
            if !g.is_walkable(start) {
                continue;
            }
            let path = pf.find_cell_path(&g, start, end, &Direction::CARDINAL);
            match bfs_steps(&g, start, end) {
                Some(steps) => assert_eq!(path.cost(), steps * 10),
                None => assert!(path.is_empty()),
            }
        }
    }
}

#[test]
fn parallel_jobs_against_changing_grid() {
    let shared = SharedGrid::new(open(32, 32));
    let jobs: Vec<_> = (0..16)
        .map(|i| {
            let job = PathJob::from_shared(
                &shared,
                Vec2::new(0.5, i as f32 + 0.5),
                Vec2::new(31.5, 31.5 - i as f32),
            );
            // Writers keep going between snapshots.
            shared.set_blockage(Point::new(16, i), true);
            job
        })
        .collect();
    let expected: Vec<_> = jobs
        .iter()
        .map(|j| find_path_batch(j.start, j.end, &j.snapshot, &[]))
        .collect();
    assert_eq!(run_jobs(jobs), expected);
    assert!(!shared.is_walkable(Point::new(16, 15)));
}
