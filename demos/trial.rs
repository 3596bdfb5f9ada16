use tracing::Level;
use wraith::{
    centrality::{
        BetweennessCentrality, CentralityMeasure, ClosenessCentrality, DegreeCentrality,
    },
    edge::Edge,
    graph::Graph,
};

// Nodes scoring within this margin share a ranking position.
const EPSILON: f64 = 1e-9;

/// Returns the average ranking position of `node` over all `measures`, one-based.
fn average_position(
    graph: &Graph,
    node: usize,
    measures: &mut [Box<dyn CentralityMeasure>],
) -> f64 {
    let total: f64 = measures
        .iter_mut()
        .filter_map(|measure| measure.ranking(graph).ex_aequo_position(node, EPSILON))
        .sum();

    total / measures.len() as f64
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    // Two triangles joined through the evader, node 3.
    let mut graph = Graph::from_edges(
        7,
        false,
        [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 6), (6, 4)],
    )
    .expect("edges are valid")
    .with_name("bridge");
    let evader = 3;

    let mut measures: Vec<Box<dyn CentralityMeasure>> = vec![
        Box::new(DegreeCentrality::default()),
        Box::new(ClosenessCentrality::default()),
        Box::new(BetweennessCentrality::default()),
    ];

    println!("\nAnalysing {graph}...");
    println!(
        "Evader {evader} ranks {:.2} on average",
        average_position(&graph, evader, &mut measures)
    );

    // Try every single edge toggle that keeps the evader connected, undoing each one right after.
    graph.start_recording_history();
    let candidates: Vec<Edge> = graph.edges().chain(graph.non_edges()).collect();
    let mut best: Option<(f64, Edge)> = None;

    for edge in candidates {
        graph.swap(&edge);

        if graph.degree(evader) > 0 && graph.connected_components(None).len() == 1 {
            let position = average_position(&graph, evader, &mut measures);
            if best.map_or(true, |(highest, _)| position > highest) {
                best = Some((position, edge));
            }
        }

        graph.revert_changes(1);
    }

    let Some((position, edge)) = best else {
        println!("No edge toggle keeps the graph connected");
        return;
    };

    println!("Toggling {edge} pushes the evader down to {position:.2}");
    graph.swap(&edge);
    println!(
        "Total connection count: {}, adjacency matrix: {}",
        graph.edge_count(),
        graph.adjacency_matrix()
    );

    // Undo everything, the caches follow along.
    println!("Resetting {graph}...");
    graph.reset_graph();
    println!(
        "Evader {evader} ranks {:.2} on average",
        average_position(&graph, evader, &mut measures)
    );
}
