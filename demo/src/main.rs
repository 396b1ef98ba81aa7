//! Command-line demo for navgrid.
//!
//! Loads an ASCII map (`#` wall, `.` floor), runs the same query through the
//! in-place and the batch executor, and prints the map with the path drawn
//! over it.
//!
//! # Usage
//!
//! ```bash
//! # Built-in map, corner to corner
//! navgrid-demo
//!
//! # Own map and grid placement, 4-way moves, timing logs
//! RUST_LOG=debug navgrid-demo --map level.txt --config grid.json \
//!     --from 0.5,0.5 --to 12.5,7.5 --dirs cardinal --timing
//! ```
//!
//! `grid.json` holds a `GridConfig`; only `cell_size` and `origin` are used,
//! the size comes from the map.

use std::env;
use std::fs;

use glam::Vec2;
use navgrid_core::{GridConfig, NavGrid, Point};
use navgrid_paths::{
    BlockedStartPolicy, Direction, GraphPathfinder, Path, PathJob, SearchConfig, run_jobs,
};

const BUILTIN_MAP: &str = "
..........#.........
..####....#....###..
..#.......#......#..
..#...#####......#..
..#..............#..
......#......#####..
.######......#......
.............#...#..
..#######....#...#..
..........#......#..
";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct Config {
    map_path: Option<String>,
    grid_path: Option<String>,
    from: Option<Vec2>,
    to: Option<Vec2>,
    dirs: Vec<Direction>,
    search: SearchConfig,
    jobs: usize,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config {
        map_path: None,
        grid_path: None,
        from: None,
        to: None,
        dirs: Vec::new(),
        search: SearchConfig::default(),
        jobs: 0,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--timing" => config.search = config.search.with_log_timing(true),
            "--reject-blocked-start" => {
                config.search = config.search.with_blocked_start(BlockedStartPolicy::Reject)
            }
            "--map" | "--config" | "--from" | "--to" | "--dirs" | "--jobs" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{flag} needs a value"))?
                    .as_str();
                match flag {
                    "--map" => config.map_path = Some(value.to_string()),
                    "--config" => config.grid_path = Some(value.to_string()),
                    "--from" => config.from = Some(parse_vec2(value)?),
                    "--to" => config.to = Some(parse_vec2(value)?),
                    "--dirs" => config.dirs = parse_dirs(value)?,
                    _ => {
                        config.jobs = value
                            .parse()
                            .map_err(|_| format!("invalid job count: {value}"))?
                    }
                }
            }
            "--help" | "-h" => return Err("help requested".to_string()),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(config)
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y: {s}"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("bad x in {s}"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("bad y in {s}"))?;
    Ok(Vec2::new(x, y))
}

fn parse_dirs(s: &str) -> Result<Vec<Direction>, String> {
    match s {
        "all" => return Ok(Direction::ALL.to_vec()),
        "cardinal" => return Ok(Direction::CARDINAL.to_vec()),
        "diagonal" => return Ok(Direction::DIAGONAL.to_vec()),
        _ => {}
    }
    s.split(',')
        .map(|d| {
            Direction::ALL
                .into_iter()
                .find(|dir| dir.to_string().eq_ignore_ascii_case(d.trim()))
                .ok_or_else(|| format!("unknown direction: {d}"))
        })
        .collect()
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --map FILE              ASCII map ('#' wall, '.' floor)");
    eprintln!("  --config FILE           JSON grid config (cell_size, origin)");
    eprintln!("  --from X,Y              start, world units (default: first cell)");
    eprintln!("  --to X,Y                goal, world units (default: last cell)");
    eprintln!("  --dirs all|cardinal|diagonal|N,NE,...");
    eprintln!("  --jobs N                also run N batch jobs on the thread pool");
    eprintln!("  --timing                log the duration of every search");
    eprintln!("  --reject-blocked-start  fail when the start cell is blocked");
}

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let base = match &config.grid_path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            serde_json::from_str::<GridConfig>(&text)?
        }
        None => GridConfig::default(),
    };
    let map = match &config.map_path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?,
        None => BUILTIN_MAP.to_string(),
    };
    let grid = NavGrid::from_ascii(base, &map)?;
    log::info!(
        "grid {}x{}, cell size {}, origin {}, {} walkable",
        grid.width(),
        grid.height(),
        grid.cell_size(),
        grid.origin(),
        grid.walkable_count()
    );

    let from = config
        .from
        .unwrap_or_else(|| grid.cell_to_world_centered(Point::ZERO));
    let to = config.to.unwrap_or_else(|| {
        grid.cell_to_world_centered(Point::new(grid.width() - 1, grid.height() - 1))
    });

    let mut pathfinder = GraphPathfinder::for_grid(&grid, config.search);
    let graph = pathfinder.try_find_path_world(&grid, from, to, &config.dirs);
    let job = PathJob::from_world(grid.snapshot(), from, to)
        .with_directions(&config.dirs)
        .with_config(config.search);
    let batch = job.clone().try_run();

    if graph != batch {
        return Err(format!("executors disagree: {graph:?} vs {batch:?}").into());
    }
    let path = match graph {
        Ok(path) => path,
        Err(e) => {
            println!("{}", grid.to_ascii());
            println!("{e}");
            return Ok(());
        }
    };

    println!("{}", draw(&grid, &path));
    println!("{path}");
    let waypoints: Vec<String> = job
        .waypoints(&path)
        .iter()
        .map(|w| format!("({:.2}, {:.2})", w.x, w.y))
        .collect();
    println!("waypoints: {}", waypoints.join(" "));

    if config.jobs > 0 {
        let snapshot = grid.snapshot();
        let jobs: Vec<_> = (0..config.jobs)
            .map(|_| {
                PathJob::new(snapshot.clone(), job.start, job.end)
                    .with_directions(&config.dirs)
                    .with_config(config.search)
            })
            .collect();
        let results = run_jobs(jobs);
        let agree = results.iter().filter(|p| **p == path).count();
        log::info!("{agree}/{} parallel jobs matched", results.len());
    }
    Ok(())
}

fn draw(grid: &NavGrid, path: &Path) -> String {
    grid.render(|p| {
        if path.start() == Some(p) {
            Some('S')
        } else if path.goal() == Some(p) {
            Some('G')
        } else if path.contains(p) {
            Some('*')
        } else {
            None
        }
    })
}
