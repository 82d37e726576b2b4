use narwhal::{LayoutOptions, layout_graph};
use narwhal_graph::Graph;
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(narwhal::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "layout error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    config: Option<String>,
    pretty: bool,
    seed: Option<u64>,
    max_passes: Option<usize>,
    unbounded: bool,
}

#[derive(Serialize)]
struct ValidateOut {
    vertices: usize,
    edges: usize,
    ports: usize,
    pinned: usize,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [layout] [--pretty] [--config <path>] [--seed <n>] [--max-passes <n>|--unbounded] [--out <path>] [<path>|-]\n\
  narwhal-cli validate [--pretty] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph JSON document is read from stdin.\n\
  - Output goes to stdout by default; use --out to write a file.\n\
  - --seed, --max-passes, --unbounded and --config only apply to layout.\n\
  - --config reads layout options as JSON; missing fields keep their defaults and flags override it.\n\
  - A layout that hits the pass cap is still written, but the exit code is 1.\n\
  - Set RUST_LOG (e.g. RUST_LOG=narwhal=debug) for layout diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "validate" => args.command = Command::Validate,
            "--pretty" => args.pretty = true,
            "--unbounded" => args.unbounded = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--max-passes" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
                if n == 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.max_passes = Some(n);
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.unbounded && args.max_passes.is_some() {
        return Err(CliError::Usage(usage()));
    }
    let layout_only =
        args.seed.is_some() || args.max_passes.is_some() || args.unbounded || args.config.is_some();
    if matches!(args.command, Command::Validate) && layout_only {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None | Some("-") => {
            use std::io::Write;
            std::io::stdout().lock().write_all(text.as_bytes())?;
        }
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<LayoutOptions>(&std::fs::read_to_string(path)?)?,
        None => LayoutOptions::default(),
    };
    if let Some(seed) = args.seed {
        opts.random_seed = seed;
    }
    if let Some(n) = args.max_passes {
        opts.max_passes = Some(n);
    }
    if args.unbounded {
        opts.max_passes = None;
    }
    Ok(opts)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut graph: Graph = serde_json::from_str(&text)?;

    match args.command {
        Command::Validate => {
            let summary = ValidateOut {
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
                ports: graph.vertices().map(|v| v.degree()).sum(),
                pinned: graph.vertices().filter(|v| v.is_pinned).count(),
            };
            write_json(&summary, args.pretty, args.out.as_deref())
        }
        Command::Layout => {
            let opts = layout_options(&args)?;
            let result = layout_graph(&mut graph, &opts);
            match result {
                Ok(stats) => {
                    tracing::info!(
                        passes = stats.passes,
                        defaulted_ports = stats.defaulted_ports,
                        "layout finished"
                    );
                    write_json(&graph, args.pretty, args.out.as_deref())
                }
                Err(err @ narwhal::Error::DidNotConverge { .. }) => {
                    write_json(&graph, args.pretty, args.out.as_deref())?;
                    Err(err.into())
                }
                Err(err) => Err(err.into()),
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
