//! Builds the five-vertex sample graph and prints a shortest path through it.

use anyhow::{bail, Context, Result};
use clap::Parser;
use pathgraph::{Graph, Vertex, VertexId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graph_demo")]
#[command(about = "Shortest path on the sample weighted graph", long_about = None)]
struct Cli {
    /// Id of the source vertex
    #[arg(long, default_value_t = 1)]
    source: u64,

    /// Id of the destination vertex
    #[arg(long, default_value_t = 5)]
    dest: u64,

    /// Print the path and graph statistics as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

const SAMPLE_EDGES: &[(u64, u64, u64)] = &[
    (1, 2, 6),
    (1, 3, 300),
    (1, 4, 150),
    (2, 3, 30),
    (3, 5, 40),
    (4, 5, 10),
];

fn sample_graph() -> Result<Graph> {
    let mut graph = Graph::new();
    graph
        .add_vertices((1..=5).map(|id| Vertex::new(id, 0, id as i64, id as i64)))
        .context("failed to add sample vertices")?;
    for &(a, b, weight) in SAMPLE_EDGES {
        if !graph.create_edge(a, b, weight) {
            bail!("failed to create edge {a} - {b}");
        }
    }
    Ok(graph)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let graph = sample_graph()?;
    let path = graph.shortest_path(cli.source, cli.dest);

    if cli.json {
        let report = serde_json::json!({
            "source": VertexId::new(cli.source),
            "dest": VertexId::new(cli.dest),
            "path": path,
            "statistics": graph.statistics(),
        });
        let text = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{text}");
        return Ok(());
    }

    print!("{graph}");
    match path.distance {
        Some(distance) => {
            let hops: Vec<String> = path.vertices.iter().map(ToString::to_string).collect();
            println!("Shortest path {} -> {}: {} (weight {distance})", cli.source, cli.dest, hops.join(" -> "));
        }
        None => println!("No path from {} to {}", cli.source, cli.dest),
    }
    Ok(())
}
