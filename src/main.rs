use std::path::PathBuf;

use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use rusty_logic::system_config::MachineFactory;
use rusty_logic::{Computer, Instruction, SimError};

#[derive(Debug, Parser)]
#[command(name = "rusty_logic", about = "Run a program on the simulated breadboard computer")]
struct Args {
    /// JSON machine description; the built-in adder demo runs without one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many clock cycles even if the program has not halted
    #[arg(long, default_value_t = 256)]
    ticks: u64,
}

fn demo_program() -> Vec<u8> {
    let mut image = vec![
        Instruction::Lda.encode(14),
        Instruction::Add.encode(15),
        Instruction::Out.encode(0),
        Instruction::Hlt.encode(0),
    ];
    image.resize(14, 0);
    image.extend([28, 14]);
    image
}

fn build(args: &Args) -> Result<Computer, SimError> {
    match &args.config {
        Some(path) => MachineFactory::new().create_from_json(path),
        None => {
            let mut computer = Computer::new(8)?.with_name("Demo");
            computer.load_program(&demo_program());
            computer.reset()?;
            Ok(computer)
        }
    }
}

fn print_state(computer: &Computer) {
    println!("{} after {} ticks", computer.name(), computer.ticks());
    println!("  PC:  {:#04x}", computer.program_counter().value());
    println!("  MAR: {:#04x}", computer.memory_address_register().value());
    println!(
        "  IR:  {:#04x}",
        computer.instruction_register().value()
    );
    println!("  A:   {}", computer.register_a().value());
    println!("  B:   {}", computer.register_b().value());
    println!("  ALU: {}", computer.alu().value());
    println!("  OUT: {}", computer.output_register().value());
    let memory: Vec<String> = computer
        .ram()
        .get_memory_snapshot()
        .iter()
        .map(|word| format!("{:02X}", word))
        .collect();
    println!("  RAM: {}", memory.join(" "));
}

fn run_simulator() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let mut computer = build(&args)?;
    let info = computer.get_system_info();
    event!(
        Level::INFO,
        "{}: {}-bit data, {}-bit address, {} words of RAM",
        info.name,
        info.data_width,
        info.address_width,
        info.ram_words
    );

    while !computer.is_halted() && computer.ticks() < args.ticks {
        computer.step_instruction()?;
    }
    if !computer.is_halted() {
        event!(Level::WARN, "tick limit {} reached before halt", args.ticks);
    }

    print_state(&computer);
    Ok(())
}

fn main() {
    if let Err(e) = run_simulator() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
