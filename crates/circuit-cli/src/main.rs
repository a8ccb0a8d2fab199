use circuit_core::{
    Design, EngineConfig, JobRequest, JobStatus, LiveSession, SeededNoise, SimulationError,
    SimulationService,
};
use circuit_domain::RegulatoryGraph;
use log::debug;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

const USAGE_SIMULATE: &str = "Uso: circuit-cli simulate --graph <FILE.json> [--duration <N>] \
                              [--step <N>] [--seed <N>] [--strict] [--name <TXT>]";
const USAGE_LIVE: &str =
    "Uso: circuit-cli live --graph <FILE.json> --ticks <N> [--step <N>] [--seed <N>]";

/// Argumentos `--clave valor` y banderas sueltas.
struct Args {
    graph: Option<String>,
    duration: Option<f64>,
    step: Option<f64>,
    seed: Option<u64>,
    ticks: Option<usize>,
    name: Option<String>,
    strict: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut out = Args {
        graph: None,
        duration: None,
        step: None,
        seed: None,
        ticks: None,
        name: None,
        strict: false,
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--strict" {
            out.strict = true;
            i += 1;
            continue;
        }
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("falta valor para {flag}"))?;
        match flag {
            "--graph" => out.graph = Some(value.clone()),
            "--duration" => out.duration = Some(parse_value(flag, value)?),
            "--step" => out.step = Some(parse_value(flag, value)?),
            "--seed" => out.seed = Some(parse_value(flag, value)?),
            "--ticks" => out.ticks = Some(parse_value(flag, value)?),
            "--name" => out.name = Some(value.clone()),
            other => return Err(format!("opción desconocida: {other}")),
        }
        i += 2;
    }
    Ok(out)
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("valor inválido para {flag}: {value}"))
}

/// Acepta un diseño completo (`{id, name, nodes, edges}`) o sólo el grafo.
fn load_design(path: &str) -> Result<Design, String> {
    let raw =
        std::fs::read_to_string(path).map_err(|e| format!("no se pudo leer {path}: {e}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| format!("JSON inválido en {path}: {e}"))?;
    if value.get("id").is_some() && value.get("name").is_some() {
        return serde_json::from_value(value).map_err(|e| format!("diseño inválido: {e}"));
    }
    let graph: RegulatoryGraph =
        serde_json::from_value(value).map_err(|e| format!("grafo inválido: {e}"))?;
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("design")
        .to_string();
    Ok(Design::new(stem.clone(), stem, graph))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("[circuit simulate] error serializando salida: {e}");
            exit(5);
        }
    }
}

fn simulate(args: Args, mut config: EngineConfig) -> i32 {
    let Some(path) = args.graph else {
        eprintln!("{USAGE_SIMULATE}");
        return 2;
    };
    let design = match load_design(&path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("[circuit simulate] {e}");
            return 4;
        }
    };
    config.strict |= args.strict;
    let mut request = JobRequest::for_design(design.id.clone());
    request.duration = args.duration.unwrap_or(request.duration);
    request.time_step = args.step.unwrap_or(request.time_step);
    request.seed = args.seed;
    request.name = args.name;

    let service = SimulationService::in_memory(config);
    service.designs().insert(design);
    match service.create_and_run(request) {
        Ok(job) => {
            print_json(&job);
            if job.status() == JobStatus::Completed {
                0
            } else {
                5
            }
        }
        Err(e @ (SimulationError::InvalidInput(_) | SimulationError::DesignNotFound(_))) => {
            eprintln!("[circuit simulate] {e}");
            4
        }
        Err(e) => {
            eprintln!("[circuit simulate] error: {e}");
            5
        }
    }
}

fn live(args: Args, config: EngineConfig) -> i32 {
    let (Some(path), Some(ticks)) = (args.graph, args.ticks) else {
        eprintln!("{USAGE_LIVE}");
        return 2;
    };
    let design = match load_design(&path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("[circuit live] {e}");
            return 4;
        }
    };
    let step = args
        .step
        .unwrap_or(circuit_core::constants::DEFAULT_TIME_STEP);
    if !step.is_finite() || step <= 0.0 {
        eprintln!("[circuit live] --step debe ser positivo");
        return 4;
    }
    let noise = match args.seed.or(config.seed) {
        Some(seed) => SeededNoise::new(seed),
        None => SeededNoise::from_entropy(),
    };
    debug!("live session over '{}' with seed {}", design.name, noise.seed());
    let options = config.engine_options();
    let mut session = match LiveSession::new(&design.graph, options, noise, config.live_window) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[circuit live] error: {e}");
            return 5;
        }
    };
    for i in 0..ticks {
        if let Err(e) = session.on_tick(i as f64 * step) {
            eprintln!("[circuit live] error en tick {i}: {e}");
            return 5;
        }
    }
    print_json(&serde_json::json!({
        "window": session.window().to_vec(),
        "latest": session.latest_readings(),
    }));
    0
}

fn main() {
    // .env opcional con las variables GENCIRCUIT_*
    let _ = dotenvy::dotenv();
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    let config = EngineConfig::from_env();
    let command = args.get(1).map(String::as_str);
    let rest = args.get(2..).unwrap_or(&[]);
    let parsed = match parse_args(rest) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE_SIMULATE}\n{USAGE_LIVE}");
            exit(2);
        }
    };
    let code = match command {
        Some("simulate") => simulate(parsed, config),
        Some("live") => live(parsed, config),
        _ => {
            eprintln!("{USAGE_SIMULATE}\n{USAGE_LIVE}");
            2
        }
    };
    exit(code);
}
