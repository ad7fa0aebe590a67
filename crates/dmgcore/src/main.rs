use dmgcore::{Machine, MachineConfig, StopReason, USAGE};

fn main() {
    env_logger::init();

    let args = std::env::args().skip(1);
    let config = MachineConfig::from_args(args).unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("{USAGE}");
        std::process::exit(2);
    });

    let mut machine = Machine::power_on(&config).unwrap_or_else(|err| {
        eprintln!("{err:#}");
        std::process::exit(1);
    });

    let summary = machine.run(config.max_steps, config.on_unknown_opcode);
    let regs = &machine.cpu.regs;
    println!("{summary}");
    println!(
        "AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
        regs.af(),
        regs.bc(),
        regs.de(),
        regs.hl(),
        regs.sp,
        regs.pc
    );

    if let StopReason::UnknownOpcode(_) = summary.stop {
        std::process::exit(1);
    }
}
