use clap::Parser;
use ntm::{summarize, Explorer, Machine, MachineLoader, MachineManager, NtmError};
use std::path::Path;
use std::process;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine description file to trace
    #[clap(short, long)]
    machine: Option<String>,

    /// Run an embedded machine by name instead of a file
    #[clap(short, long)]
    builtin: Option<String>,

    /// The input string written on the tape
    #[clap(short, long, default_value = "")]
    input: String,

    /// Maximum number of tree levels to explore
    #[clap(short = 'd', long, default_value_t = 100)]
    max_depth: usize,

    /// Ceiling on retained configurations before the trace aborts
    #[clap(long)]
    max_configs: Option<usize>,

    /// Include the full configuration tree in the report
    #[clap(short, long)]
    tree: bool,

    /// Emit the trace as JSON instead of text
    #[clap(short, long)]
    json: bool,

    /// List the embedded machines and exit
    #[clap(short, long)]
    list: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for name in MachineManager::names() {
            println!("{name}");
        }
        return;
    }

    let machine = match load_machine(&cli) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut explorer = Explorer::new(&machine);
    if let Some(limit) = cli.max_configs {
        explorer = explorer.with_max_configurations(limit);
    }

    let exploration = match explorer.explore(&cli.input, cli.max_depth) {
        Ok(exploration) => exploration,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let trace = summarize(&machine, &cli.input, &exploration);

    if cli.json {
        match serde_json::to_string_pretty(&trace) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize trace: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", trace.render(cli.tree));
    }
}

fn load_machine(cli: &Cli) -> Result<Machine, NtmError> {
    if let Some(name) = &cli.builtin {
        MachineManager::machine_by_name(name)
            .ok_or_else(|| NtmError::File(format!("No embedded machine named '{name}'")))
    } else if let Some(path) = &cli.machine {
        MachineLoader::load_machine(Path::new(path))
    } else {
        Err(NtmError::File(
            "Either --machine or --builtin is required".to_string(),
        ))
    }
}
