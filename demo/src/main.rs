//! Runs one search over an ASCII scene and prints the picture.
//!
//! Run: cargo run -- [SCENE_FILE] [--oldest] [--on-expansion]
//!
//! Without a file a built-in maze is used. `#` obstacle, `.` free,
//! `S` start, `G` goal.

use gridpath_astar::{Outcome, Scene, SearchConfig, Termination, TieBreak, bfs_distance};

const MAZE: &str = "\
S....#..........
.###.#.#######..
...#.#.#.....#..
##.#...#.###.#..
...#####.#G#.#..
.#.......#.#....
.#########.####.
................";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SearchConfig::default();
    let mut file = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--oldest" => config.tie_break = TieBreak::Oldest,
            "--on-expansion" => config.termination = Termination::OnExpansion,
            _ => file = Some(arg),
        }
    }

    let text = match &file {
        Some(path) => std::fs::read_to_string(path)?,
        None => MAZE.to_string(),
    };
    let mut scene = Scene::parse(&text)?;
    scene.finder_mut().set_config(config);
    let outcome = scene.search()?.clone();

    print!("{}", scene.render());
    let snap = scene.finder().snapshot();
    match outcome {
        Outcome::Found(path) => {
            println!(
                "path: {} steps ({} visited, {} in frontier)",
                path.len(),
                snap.visited.len(),
                snap.frontier.len()
            );
            if let Some(d) = bfs_distance(scene.grid(), scene.start(), scene.goal()) {
                if d as usize != path.len() {
                    eprintln!("warning: breadth-first distance is {d}");
                }
            }
        }
        Outcome::NotFound => println!("no path ({} visited)", snap.visited.len()),
    }
    Ok(())
}
