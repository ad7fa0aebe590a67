use super::*;
use crate::loader::tests::rom_with_entry;
use dmgcore_cpu::{Bus, Instruction, Page};

fn cartridge(entry: &[u8]) -> Cartridge {
    Cartridge::from_bytes(&rom_with_entry(entry)).unwrap()
}

/// Start of the DMG boot ROM: set up the stack, clear VRAM, then unmap
/// itself and fall through into the cartridge.
fn boot_rom() -> BootRom {
    let program = [
        0x31, 0xFE, 0xFF, // LD SP,$FFFE
        0xAF, // XOR A
        0x21, 0xFF, 0x9F, // LD HL,$9FFF
        0x32, // LD (HL-),A
        0xCB, 0x7C, // BIT 7,H
        0x20, 0xFB, // JR NZ,-5
        0x3E, 0x01, // LD A,$01
        0xE0, 0x50, // LDH ($50),A
    ];
    let mut bytes = [0u8; 0x100];
    bytes[..program.len()].copy_from_slice(&program);
    BootRom::from_bytes(&bytes).unwrap()
}

#[test]
fn boot_rom_clears_vram_and_hands_over_to_cartridge() {
    // 0x0100: HALT
    let mut machine = Machine::from_images(Some(&boot_rom()), &cartridge(&[0x76]));
    assert_eq!(machine.cpu.regs.pc, 0x0000);
    for addr in 0x8000..=0x9FFFu16 {
        machine.memory.write8(addr, 0xAA);
    }

    let summary = machine.run(None, UnknownOpcodePolicy::Halt);

    assert_eq!(summary.stop, StopReason::Halted);
    let vram = &machine.memory.as_bytes()[0x8000..0xA000];
    assert!(vram.iter().all(|&b| b == 0));
    assert!(!machine.memory.is_boot_rom_mapped());
    assert_eq!(machine.cpu.regs.sp, 0xFFFE);
    assert_eq!(machine.cpu.regs.pc, 0x0101);

    // Setup, 0x2000 passes of the clear loop, the unmap, 240 NOPs from
    // 0x0010 up to the entry point, and HALT.
    assert_eq!(summary.steps, 3 + 3 * 0x2000 + 2 + 240 + 1);
    assert_eq!(summary.cycles, 28 + (28 * 0x2000 - 4) + 20 + 240 * 4 + 4);
    assert_eq!(summary.skipped, 0);
}

#[test]
fn without_boot_rom_cpu_starts_at_entry_point() {
    let machine = Machine::from_images(None, &cartridge(&[0x00]));
    assert_eq!(machine.cpu.regs.pc, 0x0100);
    assert_eq!(machine.cpu.regs.sp, 0xFFFE);
    assert_eq!(machine.cpu.regs.af(), 0x01B0);
    assert_eq!(machine.memory.as_bytes()[0x0134..0x013C], *b"TESTCART");
}

#[test]
fn step_limit_ends_run() {
    let mut machine = Machine::from_images(None, &cartridge(&[]));

    let summary = machine.run(Some(10), UnknownOpcodePolicy::Halt);
    assert_eq!(
        summary,
        RunSummary {
            steps: 10,
            cycles: 40,
            skipped: 0,
            stop: StopReason::StepLimit,
        }
    );
    assert_eq!(machine.cpu.regs.pc, 0x010A);
}

#[test]
fn zero_step_limit_executes_nothing() {
    let mut machine = Machine::from_images(None, &cartridge(&[]));

    let summary = machine.run(Some(0), UnknownOpcodePolicy::Halt);
    assert_eq!(summary.steps, 0);
    assert_eq!(machine.cpu.regs.pc, 0x0100);
}

#[test]
fn halt_policy_stops_on_unknown_opcode() {
    let mut machine = Machine::from_images(None, &cartridge(&[0xD3, 0x00]));

    let summary = machine.run(Some(10), UnknownOpcodePolicy::Halt);
    assert_eq!(
        summary.stop,
        StopReason::UnknownOpcode(UnimplementedOpcode {
            opcode: 0xD3,
            pc: 0x0100,
            page: Page::Primary,
        })
    );
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.cycles, 0);
    assert_eq!(machine.cpu.regs.pc, 0x0101);
}

#[test]
fn skip_policy_steps_over_unknown_opcodes() {
    // D3 (unknown), NOP, FD (unknown), HALT
    let mut machine = Machine::from_images(None, &cartridge(&[0xD3, 0x00, 0xFD, 0x76]));

    let summary = machine.run(None, UnknownOpcodePolicy::Skip);
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(summary.steps, 4);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.cycles, 8);
    assert_eq!(machine.cpu.regs.pc, 0x0104);
}

#[test]
fn stop_ends_run() {
    let mut machine = Machine::from_images(None, &cartridge(&[0x10, 0x00]));

    let summary = machine.run(None, UnknownOpcodePolicy::Halt);
    assert_eq!(summary.stop, StopReason::Stopped);
    assert_eq!(machine.cpu.regs.pc, 0x0102);
}

#[test]
fn step_reports_executed_instruction() {
    // LD SP,$DFFF
    let mut machine = Machine::from_images(None, &cartridge(&[0x31, 0xFF, 0xDF]));

    let executed = machine.step().unwrap();
    assert_eq!(executed.pc, 0x0100);
    assert_eq!(executed.instruction.to_string(), "LD SP,d16");
    assert!(matches!(executed.instruction, Instruction::LdRpImm16(_)));
    assert_eq!(machine.cpu.regs.sp, 0xDFFF);
}

#[test]
fn summary_display() {
    let summary = RunSummary {
        steps: 12,
        cycles: 48,
        skipped: 1,
        stop: StopReason::UnknownOpcode(UnimplementedOpcode {
            opcode: 0xED,
            pc: 0x0200,
            page: Page::Primary,
        }),
    };
    assert_eq!(
        summary.to_string(),
        "12 steps, 48 cycles, 1 skipped, unimplemented primary opcode 0xed at 0x0200"
    );
}

#[test]
fn power_on_loads_images_from_disk() {
    let dir = std::env::temp_dir()
        .join(format!("dmgcore-power-on-{}", std::process::id()));
    let cart_path = dir.join("halt.gb");
    let config = MachineConfig::builder().cartridge(&cart_path).build();
    let missing = MachineConfig::builder()
        .cartridge(&cart_path)
        .boot_rom(Some(dir.join("missing_boot.bin")))
        .build();

    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(&cart_path, rom_with_entry(&[0x76])).unwrap();
    let stop = Machine::power_on(&config).map(|mut machine| {
        let summary = machine.run(config.max_steps, config.on_unknown_opcode);
        summary.stop
    });
    let missing_boot = Machine::power_on(&missing);
    // Clean up before asserting.
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(stop.unwrap(), StopReason::Halted);
    assert!(missing_boot.is_err());
}
