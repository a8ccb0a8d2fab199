use circuit_core::{
    CancellationToken, Design, EngineConfig, InMemoryDesignSource, InMemoryJobEventStore,
    InMemoryJobRepository, JobEventKind, JobQuery, JobRequest, JobStatus, SimulationError,
    SimulationMethod, SimulationService,
};
use circuit_domain::RegulatoryGraph;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

type Service =
    SimulationService<InMemoryDesignSource, InMemoryJobRepository, InMemoryJobEventStore>;

fn lac_graph() -> RegulatoryGraph {
    serde_json::from_value(json!({
        "nodes": [
            {"id": "node-1", "type": "promoter", "data": {"name": "pLac", "id": "lac", "strength": "medium", "inducible": true}},
            {"id": "node-2", "type": "regulatory", "data": {"name": "RBS", "id": "rbs", "function": "translation", "strength": "medium"}},
            {"id": "node-3", "type": "gene", "data": {"name": "GFP", "id": "gfp", "function": "reporter", "color": "green"}},
            {"id": "node-4", "type": "terminator", "data": {"name": "T1", "id": "t1", "efficiency": "high"}},
            {"id": "node-5", "type": "gene", "data": {"name": "LacI", "id": "laci", "function": "repressor", "targets": ["lac"]}}
        ],
        "edges": [
            {"id": "e1", "source": "node-1", "target": "node-3"},
            {"id": "e2", "source": "node-2", "target": "node-3"},
            {"id": "e3", "source": "node-3", "target": "node-4"}
        ]
    }))
    .expect("editor JSON")
}

fn service(config: EngineConfig) -> Service {
    let service = SimulationService::in_memory(config);
    service
        .designs()
        .insert(Design::new("lac", "Lac operon", lac_graph()));
    service
}

fn quick(design: &str) -> JobRequest {
    JobRequest::for_design(design)
        .with_duration(2.0)
        .with_time_step(0.5)
}

fn huge_promoter() -> circuit_domain::Node {
    serde_json::from_value(json!({
        "id": "node-1",
        "type": "promoter",
        "data": {"strength": "huge"}
    }))
    .unwrap()
}

fn rejected<T>(outcome: Result<T, SimulationError>) -> bool {
    matches!(outcome, Err(SimulationError::InvalidInput(_)))
}

#[test]
fn completed_job_is_persisted_with_design_defaults() {
    let service = service(EngineConfig::default());
    let job = service.create_and_run(quick("lac")).unwrap();
    assert_eq!(job.status(), JobStatus::Completed);
    assert_eq!(
        job.description,
        "Stochastic simulation of gene expression in Lac operon"
    );
    assert_eq!(service.get_job(job.id).unwrap(), job);

    let record = serde_json::to_value(&job).unwrap();
    let results = &record["results"];
    assert_eq!(results["timePoints"].as_array().map(Vec::len), Some(5));
    assert!(results["statistics"]["reporters"]["GFP"]["mean"].is_number());
}

#[test]
fn invalid_input_is_rejected_before_any_row() {
    let service = service(EngineConfig::default());
    for req in [
        quick("lac").with_duration(-1.0),
        JobRequest::default(),
        quick("lac").with_method(SimulationMethod::Deterministic),
    ] {
        assert!(rejected(service.create_and_run(req)));
    }
    assert_eq!(service.list_jobs(&JobQuery::default()).total, 0);
}

#[test]
fn point_cap_comes_from_config() {
    let service = service(EngineConfig {
        max_time_points: 4,
        ..EngineConfig::default()
    });
    assert!(rejected(service.create_and_run(quick("lac"))));
    assert!(service
        .create_and_run(quick("lac").with_duration(1.5))
        .is_ok());
}

#[test]
fn strict_mode_failure_keeps_the_row() {
    let service = service(EngineConfig {
        strict: true,
        ..EngineConfig::default()
    });
    let mut graph = lac_graph();
    graph.nodes[0] = huge_promoter();
    service
        .designs()
        .insert(Design::new("broken", "Broken", graph));

    let job = service.create_and_run(quick("broken")).unwrap();
    assert_eq!(job.status(), JobStatus::Failed);
    assert!(!job.error().unwrap_or_default().is_empty());
    assert_eq!(service.get_job(job.id).unwrap().status(), JobStatus::Failed);
    let last = service.events_for(job.id).pop().map(|e| e.kind);
    assert!(matches!(last, Some(JobEventKind::JobFailed { .. })));
}

#[test]
fn lenient_mode_falls_back_to_medium() {
    let service = service(EngineConfig {
        seed: Some(5),
        ..EngineConfig::default()
    });
    let mut graph = lac_graph();
    graph.nodes.truncate(4);
    graph.nodes[0] = huge_promoter();
    service.designs().insert(Design::new("odd", "Odd", graph));
    let job = service.create_and_run(quick("odd")).unwrap();
    assert_eq!(job.status(), JobStatus::Completed);
    assert_eq!(job.seed, Some(5));
    for point in &job.results().time_points {
        assert!((40.0..=65.0).contains(&point.level("GFP").unwrap()));
    }
}

#[test]
fn cancelled_job_ends_failed() {
    let service = service(EngineConfig::default());
    let token = CancellationToken::new();
    token.cancel();
    let job = service
        .create_and_run_with_cancel(quick("lac"), token)
        .unwrap();
    assert_eq!(job.status(), JobStatus::Failed);
    assert_eq!(job.error(), Some("simulation cancelled"));
}

#[test]
fn cancel_job_stops_a_run_in_flight() {
    let service = service(EngineConfig {
        max_time_points: 2_000_000,
        ..EngineConfig::default()
    });
    let long = JobRequest::for_design("lac")
        .with_duration(1_000_000.0)
        .with_time_step(1.0);
    let finished = AtomicBool::new(false);

    let outcome = thread::scope(|s| {
        s.spawn(|| {
            while !finished.load(Ordering::SeqCst) {
                let page = service.list_jobs(&JobQuery::default());
                if page.items.iter().any(|j| service.cancel_job(j.id).is_ok()) {
                    return;
                }
                thread::yield_now();
            }
        });
        let outcome = service.create_and_run(long);
        finished.store(true, Ordering::SeqCst);
        outcome
    });

    let job = outcome.unwrap();
    assert_eq!(job.status(), JobStatus::Failed);
    assert_eq!(job.error(), Some("simulation cancelled"));
    assert!(job.results().is_empty());
    assert_eq!(service.get_job(job.id).unwrap().status(), JobStatus::Failed);
    let last = service.events_for(job.id).pop().map(|e| e.kind);
    assert_eq!(
        last,
        Some(JobEventKind::JobFailed {
            error: "simulation cancelled".to_string(),
        })
    );
}

#[test]
fn delete_and_rerun() {
    let service = service(EngineConfig::default());
    let job = service
        .create_and_run(quick("lac").with_name("baseline"))
        .unwrap();

    let again = service.rerun_job(job.id).unwrap();
    assert_ne!(again.id, job.id);
    assert_eq!(again.name, "baseline");
    assert_eq!(
        (again.duration, again.time_step),
        (job.duration, job.time_step)
    );

    service.delete_job(job.id).unwrap();
    let missing = SimulationError::JobNotFound(job.id);
    assert_eq!(service.get_job(job.id).unwrap_err(), missing);
    assert_eq!(service.delete_job(job.id).unwrap_err(), missing);
    let last = service.events_for(job.id).pop().map(|e| e.kind);
    assert_eq!(last, Some(JobEventKind::JobDeleted));
}

#[test]
fn list_by_design_is_paginated_newest_first() {
    let service = service(EngineConfig::default());
    service
        .designs()
        .insert(Design::new("other", "Other", RegulatoryGraph::default()));
    let ids: Vec<_> = (0..3)
        .map(|_| service.create_and_run(quick("lac")).unwrap().id)
        .collect();
    service.create_and_run(quick("other")).unwrap();

    let page = service.list_jobs_for_design("lac", 1, 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    let first: Vec<_> = page.items.iter().map(|j| j.id).collect();
    assert_eq!(first, vec![ids[2], ids[1]]);
    assert_eq!(service.list_jobs_for_design("lac", 2, 2).items[0].id, ids[0]);
    assert_eq!(service.list_jobs(&JobQuery::default()).total, 4);
}

#[test]
fn run_many_keeps_buffers_separate() {
    let service = service(EngineConfig::default());
    let requests: Vec<JobRequest> = (0..8).map(|i| quick("lac").with_seed(i)).collect();
    let jobs: Vec<_> = service
        .run_many(requests)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(jobs.len(), 8);
    for (i, job) in jobs.iter().enumerate() {
        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.seed, Some(i as u64));
        assert_eq!(job.results().time_points.len(), 5);
    }
    let solo = service
        .create_and_run(quick("lac").with_seed(3))
        .unwrap();
    assert_eq!(solo.results(), jobs[3].results());
}

#[test]
fn design_edits_after_run_do_not_touch_results() {
    let service = service(EngineConfig {
        seed: Some(1),
        ..EngineConfig::default()
    });
    let job = service.create_and_run(quick("lac")).unwrap();
    service
        .designs()
        .insert(Design::new("lac", "Lac operon", RegulatoryGraph::default()));
    assert_eq!(service.get_job(job.id).unwrap().results(), job.results());
    let rerun = service.rerun_job(job.id).unwrap();
    assert!(rerun.results().statistics.reporters.is_empty());
}
