use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use typed_builder::TypedBuilder;

/// Instructions executed when no limit is given on the command line.
pub const DEFAULT_MAX_STEPS: u64 = 10;

pub const USAGE: &str =
    "Usage: dmgcore <cartridge> [--boot <boot_rom>] [--steps N|--unbounded] [--skip-unknown]";

/// What the driver does when the CPU reports an unassigned opcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Stop the run and report the opcode.
    #[default]
    Halt,
    /// Log it and carry on with the next byte.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    #[builder(setter(into))]
    pub cartridge: PathBuf,
    /// Without a boot ROM the CPU starts from the post-boot register state
    /// at 0x0100.
    #[builder(default)]
    pub boot_rom: Option<PathBuf>,
    /// `None` runs until HALT, STOP or an unknown opcode ends the run.
    #[builder(default = Some(DEFAULT_MAX_STEPS))]
    pub max_steps: Option<u64>,
    #[builder(default)]
    pub on_unknown_opcode: UnknownOpcodePolicy,
}

impl MachineConfig {
    /// Parse command-line arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cartridge = None;
        let mut boot_rom = None;
        let mut max_steps = Some(DEFAULT_MAX_STEPS);
        let mut on_unknown_opcode = UnknownOpcodePolicy::default();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--boot" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--boot needs a path"))?;
                    boot_rom = Some(PathBuf::from(path));
                }
                "--steps" => {
                    let count = args
                        .next()
                        .ok_or_else(|| anyhow!("--steps needs a count"))?;
                    let count = count
                        .parse()
                        .with_context(|| format!("invalid step count '{count}'"))?;
                    max_steps = Some(count);
                }
                "--unbounded" => max_steps = None,
                "--skip-unknown" => on_unknown_opcode = UnknownOpcodePolicy::Skip,
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
                _ if cartridge.is_some() => bail!("unexpected argument '{arg}'"),
                _ => cartridge = Some(PathBuf::from(arg)),
            }
        }

        let cartridge = cartridge.ok_or_else(|| anyhow!("no cartridge given"))?;

        Ok(Self::builder()
            .cartridge(cartridge)
            .boot_rom(boot_rom)
            .max_steps(max_steps)
            .on_unknown_opcode(on_unknown_opcode)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<MachineConfig> {
        MachineConfig::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn builder_defaults() {
        let config = MachineConfig::builder().cartridge("tetris.gb").build();
        assert_eq!(config.cartridge, PathBuf::from("tetris.gb"));
        assert_eq!(config.boot_rom, None);
        assert_eq!(config.max_steps, Some(DEFAULT_MAX_STEPS));
        assert_eq!(config.on_unknown_opcode, UnknownOpcodePolicy::Halt);
    }

    #[test]
    fn bare_cartridge_matches_builder_defaults() {
        let config = parse(&["tetris.gb"]).unwrap();
        assert_eq!(
            config,
            MachineConfig::builder().cartridge("tetris.gb").build()
        );
    }

    #[test]
    fn all_options() {
        let config = parse(&[
            "--boot",
            "dmg_boot.bin",
            "game.gb",
            "--steps",
            "500",
            "--skip-unknown",
        ])
        .unwrap();
        assert_eq!(config.cartridge, PathBuf::from("game.gb"));
        assert_eq!(config.boot_rom, Some(PathBuf::from("dmg_boot.bin")));
        assert_eq!(config.max_steps, Some(500));
        assert_eq!(config.on_unknown_opcode, UnknownOpcodePolicy::Skip);

        let config = parse(&["game.gb", "--unbounded"]).unwrap();
        assert_eq!(config.max_steps, None);
    }

    #[test]
    fn bad_usage_is_an_error() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.gb", "b.gb"]).is_err());
        assert!(parse(&["a.gb", "--steps"]).is_err());
        assert!(parse(&["a.gb", "--steps", "many"]).is_err());
        assert!(parse(&["a.gb", "--turbo"]).is_err());
        assert!(parse(&["--boot"]).is_err());
    }
}
