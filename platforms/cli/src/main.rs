use clap::Parser;
use std::path::Path;
use std::process;
use turnstile::{Description, DescriptionLoader, Machine, MachineCatalog, MachineError, Outcome, Step};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine description file to execute
    #[clap(short, long, conflicts_with = "builtin")]
    file: Option<String>,

    /// Run an embedded sample machine instead of a file
    #[clap(short, long)]
    builtin: Option<String>,

    /// List the embedded sample machines and exit
    #[clap(long)]
    list: bool,

    /// Override the initial tape from the description
    #[clap(short, long)]
    input: Option<String>,

    /// Stop after this many steps instead of running unbounded
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Print step, state, and tape after every step of the execution
    #[clap(short, long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), MachineError> {
    if cli.list {
        for name in MachineCatalog::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut description = load_description(cli)?;

    if let Some(input) = &cli.input {
        description.tape = input.clone();
    }

    let mut machine = Machine::new(&description)?;

    println!("Initial tape contents: {}", machine.tape());
    println!("Number of states: {}", description.states);
    println!("Start state: {}", description.start_state);
    println!("End state: {}", description.end_state);

    let outcome = if cli.trace {
        trace_run(&mut machine, cli.max_steps)?
    } else if let Some(max_steps) = cli.max_steps {
        machine.run_bounded(max_steps)?
    } else {
        machine.run()?;
        Outcome::Halted
    };

    if let Outcome::StepLimit = outcome {
        println!(
            "Stopped after {} steps without reaching the end state.",
            machine.step_count()
        );
    }

    println!("Final tape contents: {}", machine.tape());

    Ok(())
}

fn load_description(cli: &Cli) -> Result<Description, MachineError> {
    if let Some(name) = &cli.builtin {
        return MachineCatalog::get(name);
    }

    match &cli.file {
        Some(file) => DescriptionLoader::load(Path::new(file)),
        None => Err(MachineError::Validation(
            "provide a description file with --file, or pick one with --builtin".to_string(),
        )),
    }
}

fn trace_run(machine: &mut Machine, max_steps: Option<usize>) -> Result<Outcome, MachineError> {
    print_state(machine);

    loop {
        if let Some(max_steps) = max_steps {
            if machine.step_count() >= max_steps && !machine.is_halted() {
                return Ok(Outcome::StepLimit);
            }
        }

        match machine.step()? {
            Step::Continue => print_state(machine),
            Step::Halted => {
                println!("\nMachine halted in state {}.", machine.state());
                return Ok(Outcome::Halted);
            }
        }
    }
}

fn print_state(machine: &Machine) {
    println!(
        "Step: {}, State: {}, Tape: {}, Head: {}",
        machine.step_count(),
        machine.state(),
        machine.tape(),
        machine.tape().head()
    );
}
