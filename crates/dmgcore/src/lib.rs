//! Host side of dmgcore: loads a boot ROM and cartridge into a flat
//! address space and drives the CPU over it.

pub mod config;
pub mod loader;
pub mod machine;
pub mod memory;

pub use dmgcore_cpu;

pub use config::{MachineConfig, UnknownOpcodePolicy, DEFAULT_MAX_STEPS, USAGE};
pub use loader::{BootRom, Cartridge, CartridgeHeader};
pub use machine::{Machine, RunSummary, StopReason};
pub use memory::Memory;
