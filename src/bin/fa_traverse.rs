use cancel_this::Cancellable;
use clap::Parser;
use env_logger::Builder;
use fa_traversal::graph::Graph;
use fa_traversal::render::{Frame, RenderSink, StateMark, SymbolStatus};
use fa_traversal::session::Simulation;
use fa_traversal::traversal::{TraversalMode, Verdict};
use log::LevelFilter;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fa_traverse")]
#[command(about = "Step through the traversal of an input string over a finite accepter")]
struct Args {
    /// Path to a serialized graph (.json)
    #[arg(value_name = "FILE")]
    file: String,

    /// Input string (empty, `λ` and `ε` all mean the empty string)
    #[arg(value_name = "INPUT", default_value = "")]
    input: String,

    /// Traversal mode (default: taken from the graph's `shorthand` flag)
    #[arg(long, require_equals = true)]
    mode: Option<Mode>,

    /// Cancel the traversal after this many seconds
    #[arg(long, require_equals = true)]
    timeout: Option<u64>,

    /// Only print the verdict, not every step
    #[arg(long)]
    quiet: bool,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum Mode {
    Exact,
    Shorthand,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<Mode> for TraversalMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Exact => TraversalMode::Exact,
            Mode::Shorthand => TraversalMode::Shorthand,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

/// Prints frames as plain text lines.
struct ConsoleSink<'a> {
    graph: &'a Graph,
    input: Vec<char>,
}

impl RenderSink for ConsoleSink<'_> {
    fn render(&mut self, frame: &Frame) {
        let tape = self
            .input
            .iter()
            .zip(&frame.symbols)
            .map(|(symbol, status)| match status {
                SymbolStatus::Pending => format!(" {symbol} "),
                SymbolStatus::Matched => format!("[{symbol}]"),
                SymbolStatus::Rejected => format!("!{symbol}!"),
                SymbolStatus::Accepted => format!("*{symbol}*"),
            })
            .collect::<String>();

        let states = frame
            .annotations
            .states
            .iter()
            .map(|(state, mark)| {
                let name = self.graph.state(*state).name();
                match mark {
                    StateMark::Current => name.to_string(),
                    StateMark::Rejected => format!("{name}(rejected)"),
                    StateMark::Accepted => format!("{name}(accepted)"),
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let edges = frame
            .annotations
            .edges
            .iter()
            .map(|(transition, progress)| {
                let label = self.graph.transition(*transition).label();
                format!("{transition}`{label}`@{progress:?}")
            })
            .collect::<Vec<_>>()
            .join(", ");

        let position = frame.position;
        match frame.verdict {
            Some(Verdict::Accepted) => println!("#{position:<3} {tape}  Accepted {{{states}}}"),
            Some(Verdict::Rejected) => println!("#{position:<3} {tape}  Rejected {{{states}}}"),
            None if edges.is_empty() => println!("#{position:<3} {tape}  {{{states}}}"),
            None => println!("#{position:<3} {tape}  {{{states}}} edges: {edges}"),
        }
    }
}

fn main() {
    let args = Args::parse();

    // None = not specified, Some(None) = -v without value, Some(Some(level)) = -v=level
    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let json = std::fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to read graph file {}: {}", args.file, e);
        std::process::exit(1);
    });

    let mut simulation = Simulation::from_json(&json).unwrap_or_else(|e| {
        eprintln!("Malformed graph in {}: {}", args.file, e);
        std::process::exit(1);
    });

    if let Some(mode) = args.mode {
        simulation.set_mode(mode.into());
    }

    println!(
        "Loaded graph with {} states and {} transitions ({:?} mode).",
        simulation.graph().num_states(),
        simulation.graph().transitions().len(),
        simulation.mode()
    );

    let run = |simulation: &mut Simulation| -> Cancellable<()> {
        let playback = simulation.start(&args.input)?;
        if args.quiet {
            playback.jump_to(playback.len());
        }
        let mut sink = ConsoleSink {
            graph: playback.graph(),
            input: playback.run().input().to_vec(),
        };
        if args.quiet {
            playback.replay(&mut sink);
        } else {
            playback.replay_all(&mut sink);
        }
        Ok(())
    };

    let result = match args.timeout {
        Some(seconds) => cancel_this::on_timeout(Duration::from_secs(seconds), || {
            run(&mut simulation)
        }),
        None => run(&mut simulation),
    };

    if let Err(e) = result {
        eprintln!("Traversal canceled: {}", e);
        std::process::exit(1);
    }
}
