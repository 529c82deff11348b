use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use bstr::BString;
use log::{error, info};
use structopt::StructOpt;

use graph_reach::{input, Cell, Component, Graph, Grid, Result, Style};

#[derive(Debug, Clone, Copy)]
enum Order {
    Dfs,
    DfsRecursive,
    Bfs,
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dfs" => Ok(Order::Dfs),
            "dfs-recursive" => Ok(Order::DfsRecursive),
            "bfs" => Ok(Order::Bfs),
            other => Err(format!("unknown traversal order '{}'", other)),
        }
    }
}

#[derive(Debug, StructOpt)]
struct GraphInput {
    /// Edge list file (two node names per line), or a GFA file with --gfa
    #[structopt(name = "EDGES", parse(from_os_str))]
    edges: PathBuf,

    /// Record every edge in both directions
    #[structopt(short, long)]
    undirected: bool,

    /// Read the links of a GFA file instead of an edge list; implies
    /// --undirected
    #[structopt(long)]
    gfa: bool,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Print the nodes reachable from a start node in visiting order
    Traverse {
        #[structopt(flatten)]
        input: GraphInput,

        #[structopt(short, long)]
        start: String,

        /// One of dfs, dfs-recursive, bfs
        #[structopt(short, long, default_value = "dfs")]
        order: Order,
    },
    /// Reachability and shortest hop count between two nodes
    Path {
        #[structopt(flatten)]
        input: GraphInput,

        #[structopt(short, long)]
        from: String,

        #[structopt(short, long)]
        to: String,
    },
    /// List connected components, seeded in node insertion order
    Components {
        #[structopt(flatten)]
        input: GraphInput,
    },
    /// Count islands of a character grid
    Islands {
        #[structopt(name = "GRID", parse(from_os_str))]
        grid: PathBuf,

        /// Label of blocked cells
        #[structopt(short, long, default_value = "w")]
        blocked: char,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "graph-reach",
    about = "Traversal, path and component queries over graphs and grids"
)]
struct Opt {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    #[structopt(subcommand)]
    command: Command,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    info!("reading {}", path.display());
    Ok(BufReader::new(File::open(path)?))
}

fn load_graph(input: &GraphInput) -> Result<Graph<BString>> {
    let mut reader = open(&input.edges)?;
    if input.gfa {
        return Graph::from_gfa_reader(&mut reader);
    }

    let style = if input.undirected {
        Style::Undirected
    } else {
        Style::Directed
    };
    let edges = input::read_edges(reader)?;
    Ok(Graph::from_edges(edges, style))
}

fn load_grid(path: &Path, blocked: char) -> Result<Grid<char>> {
    let rows = input::read_grid(open(path)?)?;
    Grid::new(rows, blocked)
}

fn print_component<T: Display>(label: &str, component: &[T]) {
    print!("{}:", label);
    for node in component {
        print!(" {}", node);
    }
    println!();
}

fn run(opt: Opt) -> Result<()> {
    match opt.command {
        Command::Traverse {
            input,
            start,
            order,
        } => {
            let graph = load_graph(&input)?;
            let start = BString::from(start);
            let visited = match order {
                Order::Dfs => graph.depth_first(&start)?,
                Order::DfsRecursive => graph.depth_first_recursive(&start)?,
                Order::Bfs => graph.breadth_first(&start)?,
            };
            for node in visited {
                println!("{}", node);
            }
        }
        Command::Path { input, from, to } => {
            let graph = load_graph(&input)?;
            let (from, to) = (BString::from(from), BString::from(to));

            println!("has path: {}", graph.has_path(&from, &to)?);
            match graph.shortest_path_nodes(&from, &to)? {
                Some(path) => {
                    println!("distance: {}", path.len() - 1);
                    print_component("path", &path);
                }
                None => println!("distance: -1"),
            }
        }
        Command::Components { input } => {
            let graph = load_graph(&input)?;
            println!("# nodes: {}", graph.node_count());

            let components = graph.components();
            println!("# of components: {}", components.len());
            for component in &components {
                print_component("component", component);
            }
            let largest = graph_reach::components::largest(components);
            if let Some(largest) = largest {
                print_component("largest", &largest);
            }
        }
        Command::Islands { grid, blocked } => {
            let grid = load_grid(&grid, blocked)?;
            println!("# cells: {}x{}", grid.rows(), grid.cols());

            let islands: Vec<Component<Cell>> = grid.islands();
            println!("# of islands: {}", islands.len());
            for island in &islands {
                print_component("island", island);
            }
            if let Some(minimum) = graph_reach::components::smallest(islands) {
                print_component("minimum", &minimum);
            }
        }
    }
    Ok(())
}

fn main() {
    let opt = Opt::from_args();

    let default_filter = match opt.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run(opt) {
        error!("{}", err);
        process::exit(1);
    }
}

