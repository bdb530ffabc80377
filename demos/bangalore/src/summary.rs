//! Console summaries of the synthesized network and a prediction run.

use anyhow::{Context, Result};

use tg_core::{AreaCategory, NodeId, RoadCategory};
use tg_network::RoadGraph;
use tg_service::PredictionMap;

/// Node counts per area and road category, plus degree statistics.
pub fn print_network(graph: &RoadGraph) {
    println!(
        "Road graph: {} intersections, {} road segments",
        graph.node_count(),
        graph.edge_count()
    );

    for area in AreaCategory::KNOWN {
        let n = graph.nodes().iter().filter(|n| n.area == area).count();
        println!("  {:<12} {n:>4}", area.as_str());
    }
    for road in RoadCategory::KNOWN {
        let n = graph.nodes().iter().filter(|n| n.road == road).count();
        println!("  {:<12} {n:>4}", road.as_str());
    }

    let degrees: Vec<usize> = graph.nodes().iter().map(|n| graph.degree(n.id)).collect();
    let max = degrees.iter().copied().max().unwrap_or(0);
    let isolated = degrees.iter().filter(|&&d| d == 0).count();
    let mean = if degrees.is_empty() {
        0.0
    } else {
        degrees.iter().sum::<usize>() as f64 / degrees.len() as f64
    };
    println!("  degree: mean {mean:.2}, max {max}, isolated {isolated}");
}

/// The `top` most congested intersections, worst first.
pub fn print_hotspots(graph: &RoadGraph, map: &PredictionMap, top: usize) {
    let mut ranked: Vec<(NodeId, f64)> =
        map.iter().map(|(&id, p)| (id, p.congestion_level)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("{:<10} {:<32} {:>10} {:>8} {:>8}", "Node", "Name", "Congestion", "Speed", "Wait");
    println!("{}", "-".repeat(72));
    for (id, _) in ranked.into_iter().take(top) {
        let (Some(node), Some(p)) = (graph.node(id), map.get(&id)) else {
            continue;
        };
        println!(
            "{:<10} {:<32} {:>10.3} {:>8.2} {:>8.2}",
            id.key(),
            node.name,
            p.congestion_level,
            p.predicted_speed,
            p.wait_time,
        );
    }
}

/// One intersection's attributes, prediction and neighbours.
pub fn print_node(graph: &RoadGraph, map: &PredictionMap, id: NodeId) -> Result<()> {
    let node = graph.node(id).with_context(|| format!("{} is not in the graph", id.key()))?;
    let p = map.get(&id).with_context(|| format!("no prediction for {}", id.key()))?;

    println!("{} ({}) at {}", node.name, id.key(), node.pos);
    println!(
        "  {} road, {} area, capacity {}, {} signals",
        node.road, node.area, node.capacity, node.signal_count
    );
    println!(
        "  congestion {:.3}, speed {:.1} km/h, volume {}, wait {:.1} s",
        p.congestion_level, p.predicted_speed, p.volume, p.wait_time
    );
    for (neighbor, edge) in graph.neighbors(id) {
        println!("  -> {:<10} {:>6.2} km  {}", neighbor.key(), edge.distance_km, edge.road);
    }
    Ok(())
}
