use anyhow::Result;
use venturegraph::algo::{find_introductions, CostModel, IntroOptions};
use venturegraph::filter::{self, FilterSpec};
use venturegraph::graph::{Graph, Link, LinkKind, Node, NodeKind};
use venturegraph::layout::{LayoutConfig, Simulation};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Venturegraph Relationship Graph Engine v{}", venturegraph::version());
    println!("==========================================");
    println!();

    let graph = demo_graph()?;

    demo_filter(&graph)?;
    demo_layout(&graph)?;
    demo_introduction(&graph)?;

    Ok(())
}

/// A small investor network: two firms, four investors, two portfolio
/// companies and a shared sector.
fn demo_graph() -> Result<Graph> {
    println!("=== Demo 1: Building the graph ===");

    let nodes = vec![
        Node::new("inv_alice", "Alice Chen", NodeKind::Investor)
            .with_tier(1)
            .with_investment_count(42)
            .with_group("Fintech")
            .with_location("New York")
            .with_firm_name("Meridian Capital"),
        Node::new("inv_bo", "Bo Lin", NodeKind::Investor)
            .with_tier(2)
            .with_investment_count(18)
            .with_group("Fintech")
            .with_firm_name("Meridian Capital"),
        Node::new("inv_carla", "Carla Reyes", NodeKind::Investor)
            .with_tier(2)
            .with_investment_count(23)
            .with_group("Health")
            .with_firm_name("Signal Peak"),
        Node::new("inv_dev", "Dev Raman", NodeKind::Investor)
            .with_tier(1)
            .with_investment_count(61)
            .with_group("Health")
            .with_location("San Francisco")
            .with_firm_name("Signal Peak"),
        Node::new("firm_meridian", "Meridian Capital", NodeKind::Firm).with_tier(1),
        Node::new("firm_signal", "Signal Peak", NodeKind::Firm).with_tier(2),
        Node::new("co_finlock", "Finlock", NodeKind::Company).with_value(12.0),
        Node::new("co_haleo", "Haleo Health", NodeKind::Company).with_value(8.0),
        Node::new("sec_fintech", "Fintech", NodeKind::Sector).with_value(30.0),
    ];

    let links = vec![
        Link::new("inv_alice", "firm_meridian", LinkKind::FirmColleague, 0.95),
        Link::new("inv_bo", "firm_meridian", LinkKind::FirmColleague, 0.9),
        Link::new("inv_carla", "firm_signal", LinkKind::FirmColleague, 0.9),
        Link::new("inv_dev", "firm_signal", LinkKind::FirmColleague, 0.95),
        Link::new("inv_alice", "co_finlock", LinkKind::Investment, 0.8),
        Link::new("inv_bo", "co_finlock", LinkKind::Investment, 0.6),
        Link::new("inv_carla", "co_haleo", LinkKind::Investment, 0.7),
        Link::new("inv_bo", "inv_carla", LinkKind::CoInvestment, 0.75),
        Link::new("inv_dev", "co_haleo", LinkKind::BoardMember, 0.85),
        Link::new("inv_alice", "sec_fintech", LinkKind::Sector, 0.4),
        Link::new("inv_bo", "sec_fintech", LinkKind::Sector, 0.35),
    ];

    let graph = Graph::build(nodes, links)?;
    println!(
        "✓ Built graph: {} nodes, {} links",
        graph.node_count(),
        graph.link_count()
    );
    println!();
    Ok(graph)
}

fn demo_filter(graph: &Graph) -> Result<()> {
    println!("=== Demo 2: Filter pipeline ===");

    let spec = FilterSpec {
        kind: Some(NodeKind::Investor),
        min_connections: 3,
        ..FilterSpec::default()
    };
    let filtered = filter::apply(graph, &spec)?;
    println!(
        "✓ Investors with at least 3 connections: {} of {} nodes survive",
        filtered.node_count(),
        graph.node_count()
    );
    for node in filtered.nodes() {
        println!("  - {} (degree {})", node.name, graph.degree(&node.id).unwrap_or(0));
    }
    println!();
    Ok(())
}

fn demo_layout(graph: &Graph) -> Result<()> {
    println!("=== Demo 3: Force-directed layout ===");

    let mut simulation = Simulation::new(graph, LayoutConfig::default())?;
    let positions = simulation.run();
    println!("✓ Converged positions for {} nodes:", positions.len());
    println!("{}", serde_json::to_string_pretty(&positions)?);
    println!();
    Ok(())
}

fn demo_introduction(graph: &Graph) -> Result<()> {
    println!("=== Demo 4: Warm introduction ===");

    let options = IntroOptions { max_hops: 4, k: 3 };
    let paths = find_introductions(
        graph,
        &"inv_alice".into(),
        &"inv_dev".into(),
        &CostModel::default(),
        &options,
    )?;

    if paths.is_empty() {
        println!("No introduction path found");
        return Ok(());
    }

    println!("✓ {} candidate path(s), best first:", paths.len());
    for path in &paths {
        let names: Vec<_> = path
            .nodes
            .iter()
            .filter_map(|id| graph.node(id))
            .map(|n| n.name.as_str())
            .collect();
        println!(
            "  {} hops, cost {:.2}: {}",
            path.hop_count,
            path.total_cost,
            names.join(" -> ")
        );
    }
    println!("{}", serde_json::to_string_pretty(&paths)?);
    Ok(())
}
