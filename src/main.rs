use gencircuit_rust::circuit_core::{
    InMemoryDesignSource, InMemoryJobEventStore, InMemoryJobRepository,
};
use gencircuit_rust::prelude::*;
use log::{error, info};

type DemoService =
    SimulationService<InMemoryDesignSource, InMemoryJobRepository, InMemoryJobEventStore>;

/// Diseño de ejemplo: operón lac con GFP como reporter y LacI reprimiendo
/// el promotor inducible.
fn lac_operon() -> RegulatoryGraph {
    let plac = NodeData::named("pLac")
        .with_logical_id("lac")
        .with_strength("medium")
        .with_inducible(true);
    let rbs = NodeData::named("RBS")
        .with_function("translation")
        .with_strength("medium");
    let gfp = NodeData::named("GFP")
        .with_function("reporter")
        .with_color("green");
    let laci = NodeData::named("LacI")
        .with_function("repressor")
        .with_targets(["lac"]);
    let rfp = NodeData::named("RFP")
        .with_function("reporter")
        .with_color("red");
    RegulatoryGraph::new(
        vec![
            Node::promoter("node-1", plac),
            Node::new("node-2", PartKind::Regulatory, rbs),
            Node::gene("node-3", gfp),
            Node::new(
                "node-4",
                PartKind::Terminator,
                NodeData::named("T1").with_efficiency("high"),
            ),
            Node::gene("node-5", laci),
            Node::promoter("node-6", NodeData::named("pT7").with_strength("high")),
            Node::gene("node-7", rfp),
        ],
        vec![
            Edge::new("e1", "node-1", "node-2"),
            Edge::new("e2", "node-1", "node-3"),
            Edge::new("e3", "node-3", "node-4"),
            Edge::new("e4", "node-6", "node-7"),
        ],
    )
}

fn run_batch_demo(service: &DemoService) {
    let request = JobRequest::for_design("lac")
        .with_duration(20.0)
        .with_time_step(0.5);
    match service.create_and_run(request) {
        Ok(job) => {
            info!(
                "job {} -> {} ({} time points, seed {:?})",
                job.id,
                job.status(),
                job.results().time_points.len(),
                job.seed
            );
            for (name, s) in &job.results().statistics.reporters {
                println!(
                    "{name:>6}: mean={:6.2} min={:6.2} max={:6.2}",
                    s.mean, s.min, s.max
                );
            }
            for ev in service.events_for(job.id) {
                println!("  [{}] {:?}", ev.seq, ev.kind);
            }
        }
        Err(e) => error!("batch demo failed: {e}"),
    }
}

fn run_live_demo(config: &EngineConfig) {
    let noise = SeededNoise::new(config.seed.unwrap_or(7));
    let options = config.engine_options();
    let mut session = match LiveSession::new(&lac_operon(), options, noise, config.live_window) {
        Ok(s) => s,
        Err(e) => {
            error!("live demo failed: {e}");
            return;
        }
    };
    for tick in 0..250 {
        if let Err(e) = session.on_tick(tick as f64 * 0.1) {
            error!("tick {tick}: {e}");
            return;
        }
    }
    println!("live window: {} points", session.window().len());
    for r in session.latest_readings() {
        let mark = if r.repressed { " [repressed]" } else { "" };
        println!(
            "  {} ({}) = {:.2}{}",
            r.name,
            r.color.as_deref().unwrap_or_default(),
            r.level,
            mark
        );
    }
}

fn main() {
    env_logger::init();
    let config = EngineConfig::from_env();
    info!("engine config: {config:?}");

    let service = SimulationService::in_memory(config.clone());
    service
        .designs()
        .insert(Design::new("lac", "Lac operon", lac_operon()));
    run_batch_demo(&service);
    run_live_demo(&config);
}
