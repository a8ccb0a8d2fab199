use circuit_core::{
    evaluate, JobRequest, JobStatus, RunOptions, SeededNoise, SimulationError, SimulationJob,
};
use circuit_domain::{Edge, Node, NodeData, RegulatoryGraph};
use serde_json::json;

fn reporter(id: &str, name: &str) -> Node {
    Node::gene(id, NodeData::named(name).with_function("reporter"))
}

fn promoter(id: &str, strength: &str) -> Node {
    Node::promoter(id, NodeData::default().with_strength(strength))
}

fn tetr(targets: &str) -> Node {
    let data = NodeData::named("TetR")
        .with_function("repressor")
        .with_targets([targets]);
    Node::gene("r1", data)
}

fn scenario_a(inducible: bool) -> RegulatoryGraph {
    let pt7 = NodeData::named("pT7")
        .with_logical_id("t7")
        .with_strength("high")
        .with_inducible(inducible);
    RegulatoryGraph::new(
        vec![Node::promoter("p1", pt7), reporter("g1", "GFP")],
        vec![Edge::new("e1", "p1", "g1")],
    )
}

fn scenario_b() -> RegulatoryGraph {
    let mut graph = scenario_a(true);
    graph.nodes.push(tetr("t7"));
    graph
}

fn run(graph: &RegulatoryGraph, duration: f64, time_step: f64, seed: u64) -> SimulationJob {
    let request = JobRequest::for_design("design-1")
        .with_duration(duration)
        .with_time_step(time_step);
    let mut job = SimulationJob::create(&request, 1_000_000).expect("valid request");
    let options = RunOptions {
        seed: Some(seed),
        ..RunOptions::default()
    };
    job.run(graph, &options).expect("legal transitions");
    job
}

fn gfp_levels(job: &SimulationJob) -> Vec<f64> {
    job.results()
        .time_points
        .iter()
        .map(|p| p.level("GFP").unwrap())
        .collect()
}

#[test]
fn scenario_a_direct_high_promoter() {
    let job = run(&scenario_a(false), 10.0, 1.0, 7);
    assert_eq!(job.status(), JobStatus::Completed);
    let points = &job.results().time_points;
    assert_eq!(points.len(), 11);
    for (i, p) in points.iter().enumerate() {
        assert_eq!(p.time, i as f64);
        let level = p.level("GFP").expect("reporter present");
        assert!((65.0..=95.0).contains(&level), "level {level} at t={}", p.time);
    }
    let stats = &job.results().statistics.reporters["GFP"];
    assert!((stats.mean - 80.0).abs() <= 15.0);
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
}

#[test]
fn scenario_b_repression_scales_the_unrepressed_level() {
    let repressed = gfp_levels(&run(&scenario_b(), 10.0, 1.0, 11));
    let free = gfp_levels(&run(&scenario_a(true), 10.0, 1.0, 11));
    for (r, f) in repressed.iter().zip(&free) {
        assert!(*r <= 0.3 * f + 1e-9, "repressed {r} vs free {f}");
    }
}

#[test]
fn repression_requires_matching_logical_id() {
    let mut graph = scenario_b();
    // el represor apunta al id del nodo, no al id lógico
    graph.nodes[2] = tetr("p1");
    let job = run(&graph, 5.0, 1.0, 2);
    assert!(gfp_levels(&job).iter().all(|v| *v >= 65.0));
}

#[test]
fn scenario_c_unconnected_reporter_is_zero() {
    let graph = RegulatoryGraph::new(vec![promoter("p1", "high"), reporter("g1", "GFP")], vec![]);
    let job = run(&graph, 3.0, 0.5, 1);
    assert_eq!(job.results().time_points.len(), 7);
    assert!(gfp_levels(&job).iter().all(|v| *v == 0.0));
    let stats = &job.results().statistics.reporters["GFP"];
    assert_eq!((stats.mean, stats.max, stats.min), (0.0, 0.0, 0.0));
}

#[test]
fn scenario_d_empty_graph_completes_with_empty_values() {
    let graph: RegulatoryGraph =
        serde_json::from_value(json!({"nodes": [], "edges": []})).unwrap();
    let job = run(&graph, 1.0, 0.5, 1);
    assert_eq!(job.status(), JobStatus::Completed);
    assert!(job.results().statistics.reporters.is_empty());
    assert_eq!(job.results().time_points.len(), 3);
    assert!(job
        .results()
        .time_points
        .iter()
        .all(|p| p.values.is_empty()));
}

#[test]
fn repressed_level_stays_under_bound_for_every_strength() {
    let strengths = [
        ("low", 20.0),
        ("medium", 50.0),
        ("high", 80.0),
        ("very high", 100.0),
    ];
    for (label, base) in strengths {
        let mut graph = scenario_b();
        let data = NodeData::default()
            .with_logical_id("t7")
            .with_strength(label)
            .with_inducible(true);
        graph.nodes[0] = Node::promoter("p1", data);
        let job = run(&graph, 50.0, 0.5, 99);
        let bound = 0.3 * (base + 10.0 + 5.0) + 1e-9;
        for level in gfp_levels(&job) {
            assert!(level <= bound && level >= 0.0, "{label}: {level} > {bound}");
        }
    }
}

#[test]
fn levels_are_clamped_and_mean_is_bounded() {
    let graph = RegulatoryGraph::new(
        vec![
            promoter("p1", "very high"),
            promoter("p2", "low"),
            reporter("g1", "A"),
            reporter("g2", "B"),
        ],
        vec![Edge::new("e1", "p1", "g1"), Edge::new("e2", "p2", "g2")],
    );
    let job = run(&graph, 100.0, 0.25, 5);
    for p in &job.results().time_points {
        assert!(p.values.values().all(|v| (0.0..=100.0).contains(v)));
    }
    for s in job.results().statistics.reporters.values() {
        assert!(s.min <= s.mean && s.mean <= s.max);
    }
}

#[test]
fn seeded_evaluation_is_idempotent() {
    let graph = scenario_b();
    let a = evaluate(&graph, 12.5, &mut SeededNoise::new(4)).unwrap();
    let b = evaluate(&graph, 12.5, &mut SeededNoise::new(4)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn same_seed_same_fingerprint() {
    let a = run(&scenario_a(false), 20.0, 0.5, 1234);
    let b = run(&scenario_a(false), 20.0, 0.5, 1234);
    let c = run(&scenario_a(false), 20.0, 0.5, 4321);
    assert_eq!(a.results(), b.results());
    assert_eq!(a.results_fingerprint, b.results_fingerprint);
    assert_ne!(a.results_fingerprint, c.results_fingerprint);
    assert_eq!(a.design_hash, c.design_hash);
}

#[test]
fn first_promoter_in_declaration_order_wins() {
    // la arista del promotor fuerte se declara primero, pero el débil aparece
    // antes en la lista de nodos
    let graph = RegulatoryGraph::new(
        vec![
            promoter("weak", "low"),
            promoter("strong", "very high"),
            reporter("g1", "GFP"),
        ],
        vec![Edge::new("e1", "strong", "g1"), Edge::new("e2", "weak", "g1")],
    );
    let job = run(&graph, 5.0, 1.0, 8);
    assert!(gfp_levels(&job).iter().all(|v| *v <= 35.0));
}

#[test]
fn invalid_requests_never_produce_a_job() {
    for req in [
        JobRequest::for_design("d").with_duration(-1.0),
        JobRequest::for_design("d").with_time_step(0.0),
        JobRequest::for_design("d").with_duration(f64::NAN),
        JobRequest::default(),
    ] {
        assert!(matches!(
            SimulationJob::create(&req, 1_000_000),
            Err(SimulationError::InvalidInput(_))
        ));
    }
    let huge = JobRequest::for_design("d")
        .with_duration(1.0e9)
        .with_time_step(1.0e-3);
    assert!(SimulationJob::create(&huge, 1_000_000).is_err());
}
