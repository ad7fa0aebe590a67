use anyhow::Result;
use dmgcore_cpu::{Cpu, Executed, UnimplementedOpcode};

use crate::config::{MachineConfig, UnknownOpcodePolicy};
use crate::loader::{BootRom, Cartridge};
use crate::memory::Memory;

/// Why [`Machine::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    StepLimit,
    /// HALT was executed. Nothing can raise an interrupt, so the run ends.
    Halted,
    Stopped,
    UnknownOpcode(UnimplementedOpcode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Opcodes fetched, including unknown ones.
    pub steps: u64,
    /// T-cycles of the instructions that executed.
    pub cycles: u64,
    /// Unknown opcodes stepped over under [`UnknownOpcodePolicy::Skip`].
    pub skipped: u64,
    pub stop: StopReason,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} steps, {} cycles", self.steps, self.cycles)?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        match self.stop {
            StopReason::StepLimit => write!(f, ", step limit reached"),
            StopReason::Halted => write!(f, ", halted"),
            StopReason::Stopped => write!(f, ", stopped"),
            StopReason::UnknownOpcode(err) => write!(f, ", {err}"),
        }
    }
}

/// The CPU together with the memory it runs from.
pub struct Machine {
    pub cpu: Cpu,
    pub memory: Memory,
}

impl Machine {
    /// Load the images named by `config` and power on.
    pub fn power_on(config: &MachineConfig) -> Result<Self> {
        let cartridge = Cartridge::load(&config.cartridge)?;
        let boot = config.boot_rom.as_deref().map(BootRom::load).transpose()?;
        Ok(Self::from_images(boot.as_ref(), &cartridge))
    }

    /// With a boot ROM execution starts at 0x0000 from the all-zero reset
    /// state. Without one the CPU is placed in the state the boot ROM would
    /// have left, at the cartridge entry point.
    pub fn from_images(boot: Option<&BootRom>, cartridge: &Cartridge) -> Self {
        let mut memory = Memory::new();
        memory.load_cartridge(cartridge);

        let mut cpu = Cpu::new();
        match boot {
            Some(boot) => memory.map_boot_rom(boot),
            None => cpu.apply_post_boot_state(),
        }

        Self { cpu, memory }
    }

    pub fn step(&mut self) -> Result<Executed, UnimplementedOpcode> {
        let executed = self.cpu.step(&mut self.memory)?;
        log::trace!(
            "{:#06x}: {} ({}T)",
            executed.pc,
            executed.instruction,
            executed.cycles
        );
        Ok(executed)
    }

    /// Step until `limit` opcodes have been fetched, the CPU halts or
    /// stops, or `policy` says an unknown opcode ends the run.
    pub fn run(&mut self, limit: Option<u64>, policy: UnknownOpcodePolicy) -> RunSummary {
        let mut steps = 0u64;
        let mut cycles = 0u64;
        let mut skipped = 0u64;

        let stop = loop {
            if limit.is_some_and(|limit| steps >= limit) {
                break StopReason::StepLimit;
            }

            steps += 1;
            match self.step() {
                Ok(executed) => {
                    cycles += u64::from(executed.cycles);
                    if self.cpu.is_halted() {
                        break StopReason::Halted;
                    }
                    if self.cpu.is_stopped() {
                        break StopReason::Stopped;
                    }
                }
                Err(err) => match policy {
                    UnknownOpcodePolicy::Halt => {
                        log::error!("Halting: {err}");
                        break StopReason::UnknownOpcode(err);
                    }
                    UnknownOpcodePolicy::Skip => {
                        log::warn!("Skipping {err}");
                        skipped += 1;
                    }
                },
            }
        };

        let summary = RunSummary {
            steps,
            cycles,
            skipped,
            stop,
        };
        log::info!("Run finished: {summary}");
        summary
    }
}

#[cfg(test)]
mod tests;
