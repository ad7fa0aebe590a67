//! Instruction families of the SM83 and their decoding from [`Opcode`]
//! fields.
//!
//! Each variant is one family, parametrized by the operand selectors the
//! bit fields encode, so e.g. all four `LD rp,d16` opcodes share
//! `Instruction::LdRpImm16`.

use std::fmt;

use crate::decode::Opcode;

/// 8-bit operand selected by a 3-bit field: `r[y]` or `r[z]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    /// The byte in memory at HL.
    HlInd,
    A,
}

impl R8 {
    const TABLE: [R8; 8] = [
        R8::B,
        R8::C,
        R8::D,
        R8::E,
        R8::H,
        R8::L,
        R8::HlInd,
        R8::A,
    ];

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::TABLE[(bits & 0x07) as usize]
    }

    #[inline]
    pub fn is_memory(self) -> bool {
        self == R8::HlInd
    }
}

/// Register pair selected by `p` for loads and 16-bit arithmetic: `rp[p]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rp {
    BC,
    DE,
    HL,
    SP,
}

impl Rp {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Rp::BC,
            1 => Rp::DE,
            2 => Rp::HL,
            _ => Rp::SP,
        }
    }
}

/// Register pair selected by `p` for PUSH/POP: `rp2[p]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rp2 {
    BC,
    DE,
    HL,
    AF,
}

impl Rp2 {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Rp2::BC,
            1 => Rp2::DE,
            2 => Rp2::HL,
            _ => Rp2::AF,
        }
    }
}

/// Branch condition: `cc[y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }
}

/// Accumulator operation: `alu[y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const TABLE: [AluOp; 8] = [
        AluOp::Add,
        AluOp::Adc,
        AluOp::Sub,
        AluOp::Sbc,
        AluOp::And,
        AluOp::Xor,
        AluOp::Or,
        AluOp::Cp,
    ];

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::TABLE[(bits & 0x07) as usize]
    }
}

/// Extended-page rotate/shift: `rot[y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl RotOp {
    const TABLE: [RotOp; 8] = [
        RotOp::Rlc,
        RotOp::Rrc,
        RotOp::Rl,
        RotOp::Rr,
        RotOp::Sla,
        RotOp::Sra,
        RotOp::Swap,
        RotOp::Srl,
    ];

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::TABLE[(bits & 0x07) as usize]
    }
}

/// Memory operand of `LD (rr),A` / `LD A,(rr)`, selected by `p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indirect {
    BC,
    DE,
    HlInc,
    HlDec,
}

impl Indirect {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Indirect::BC,
            1 => Indirect::DE,
            2 => Indirect::HlInc,
            _ => Indirect::HlDec,
        }
    }
}

/// A decoded instruction. Operand bytes are not part of the value; the
/// executor fetches them while running it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,

    /// `LD r,r'`
    Ld(R8, R8),
    /// `LD r,d8`
    LdImm8(R8),
    /// `LD rp,d16`
    LdRpImm16(Rp),
    /// `LD (rr),A`
    StoreA(Indirect),
    /// `LD A,(rr)`
    LoadA(Indirect),
    /// `LD (a16),SP`
    StoreSp,
    /// `LD (a16),A`
    StoreAAbs,
    /// `LD A,(a16)`
    LoadAAbs,
    /// `LDH (a8),A`
    StoreAHigh,
    /// `LDH A,(a8)`
    LoadAHigh,
    /// `LD (C),A`
    StoreAHighC,
    /// `LD A,(C)`
    LoadAHighC,
    /// `LD SP,HL`
    LdSpHl,
    /// `LD HL,SP+r8`
    LdHlSpOffset,

    Push(Rp2),
    Pop(Rp2),

    /// `alu A,r`
    Alu(AluOp, R8),
    /// `alu A,d8`
    AluImm8(AluOp),
    Inc8(R8),
    Dec8(R8),
    Inc16(Rp),
    Dec16(Rp),
    /// `ADD HL,rp`
    AddHl(Rp),
    /// `ADD SP,r8`
    AddSpOffset,

    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    /// `JR r8` / `JR cc,r8`
    Jr(Option<Cond>),
    /// `JP a16` / `JP cc,a16`
    Jp(Option<Cond>),
    /// `JP HL`
    JpHl,
    /// `CALL a16` / `CALL cc,a16`
    Call(Option<Cond>),
    /// `RET` / `RET cc`
    Ret(Option<Cond>),
    Reti,
    /// `RST n`, holding the target address.
    Rst(u8),

    /// Extended page: rotates and shifts.
    Rot(RotOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

impl Instruction {
    /// Decode a primary-page opcode.
    ///
    /// Returns `None` for the opcode holes, and for the `0xCB` prefix
    /// itself, which is not an instruction on its own.
    pub fn decode_primary(op: Opcode) -> Option<Self> {
        use Instruction::*;

        let instr = match (op.x, op.z) {
            (0, 0) => match op.y {
                0 => Nop,
                1 => StoreSp,
                2 => Stop,
                3 => Jr(None),
                y => Jr(Some(Cond::from_bits(y - 4))),
            },
            (0, 1) if op.q == 0 => LdRpImm16(Rp::from_bits(op.p)),
            (0, 1) => AddHl(Rp::from_bits(op.p)),
            (0, 2) if op.q == 0 => StoreA(Indirect::from_bits(op.p)),
            (0, 2) => LoadA(Indirect::from_bits(op.p)),
            (0, 3) if op.q == 0 => Inc16(Rp::from_bits(op.p)),
            (0, 3) => Dec16(Rp::from_bits(op.p)),
            (0, 4) => Inc8(R8::from_bits(op.y)),
            (0, 5) => Dec8(R8::from_bits(op.y)),
            (0, 6) => LdImm8(R8::from_bits(op.y)),
            (0, 7) => match op.y {
                0 => Rlca,
                1 => Rrca,
                2 => Rla,
                3 => Rra,
                4 => Daa,
                5 => Cpl,
                6 => Scf,
                _ => Ccf,
            },

            // LD (HL),(HL) is where HALT lives.
            (1, 6) if op.y == 6 => Halt,
            (1, _) => Ld(R8::from_bits(op.y), R8::from_bits(op.z)),

            (2, _) => Alu(AluOp::from_bits(op.y), R8::from_bits(op.z)),

            (3, 0) => match op.y {
                0..=3 => Ret(Some(Cond::from_bits(op.y))),
                4 => StoreAHigh,
                5 => AddSpOffset,
                6 => LoadAHigh,
                _ => LdHlSpOffset,
            },
            (3, 1) if op.q == 0 => Pop(Rp2::from_bits(op.p)),
            (3, 1) => match op.p {
                0 => Ret(None),
                1 => Reti,
                2 => JpHl,
                _ => LdSpHl,
            },
            (3, 2) => match op.y {
                0..=3 => Jp(Some(Cond::from_bits(op.y))),
                4 => StoreAHighC,
                5 => StoreAAbs,
                6 => LoadAHighC,
                _ => LoadAAbs,
            },
            (3, 3) => match op.y {
                0 => Jp(None),
                6 => Di,
                7 => Ei,
                // 1 is the CB prefix; 2..=5 are holes (D3 DB E3 EB).
                _ => return None,
            },
            (3, 4) => match op.y {
                0..=3 => Call(Some(Cond::from_bits(op.y))),
                // E4 EC F4 FC
                _ => return None,
            },
            (3, 5) if op.q == 0 => Push(Rp2::from_bits(op.p)),
            (3, 5) => match op.p {
                0 => Call(None),
                // DD ED FD
                _ => return None,
            },
            (3, 6) => AluImm8(AluOp::from_bits(op.y)),
            (3, 7) => Rst(op.y * 8),

            _ => return None,
        };

        Some(instr)
    }

    /// Decode an opcode from the extended page (the byte after `0xCB`).
    ///
    /// Every byte of the extended page is assigned on the SM83; the
    /// `Option` keeps the signature uniform with [`Self::decode_primary`].
    pub fn decode_extended(op: Opcode) -> Option<Self> {
        let target = R8::from_bits(op.z);
        let instr = match op.x {
            0 => Instruction::Rot(RotOp::from_bits(op.y), target),
            1 => Instruction::Bit(op.y, target),
            2 => Instruction::Res(op.y, target),
            _ => Instruction::Set(op.y, target),
        };
        Some(instr)
    }

    /// Number of immediate/displacement bytes that follow the opcode.
    ///
    /// `STOP` counts its padding byte. Extended-page instructions have no
    /// operands beyond the prefix and opcode.
    pub fn operand_len(&self) -> u16 {
        use Instruction::*;

        match self {
            LdRpImm16(_) | StoreSp | StoreAAbs | LoadAAbs | Jp(_) | Call(_) => 2,
            LdImm8(_)
            | StoreAHigh
            | LoadAHigh
            | LdHlSpOffset
            | AddSpOffset
            | AluImm8(_)
            | Jr(_)
            | Stop => 1,
            _ => 0,
        }
    }

    /// Whether this instruction lives on the extended page.
    pub fn is_extended(&self) -> bool {
        matches!(
            self,
            Instruction::Rot(..)
                | Instruction::Bit(..)
                | Instruction::Res(..)
                | Instruction::Set(..)
        )
    }

    /// Total encoded length in bytes, including any prefix.
    pub fn encoded_len(&self) -> u16 {
        if self.is_extended() {
            2
        } else {
            1 + self.operand_len()
        }
    }
}

impl fmt::Display for R8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R8::B => "B",
            R8::C => "C",
            R8::D => "D",
            R8::E => "E",
            R8::H => "H",
            R8::L => "L",
            R8::HlInd => "(HL)",
            R8::A => "A",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Rp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rp::BC => "BC",
            Rp::DE => "DE",
            Rp::HL => "HL",
            Rp::SP => "SP",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Rp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rp2::BC => "BC",
            Rp2::DE => "DE",
            Rp2::HL => "HL",
            Rp2::AF => "AF",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        };
        f.write_str(name)
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RotOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotOp::Rlc => "RLC",
            RotOp::Rrc => "RRC",
            RotOp::Rl => "RL",
            RotOp::Rr => "RR",
            RotOp::Sla => "SLA",
            RotOp::Sra => "SRA",
            RotOp::Swap => "SWAP",
            RotOp::Srl => "SRL",
        };
        f.write_str(name)
    }
}

/// Helper for the optional condition prefix of branches: `JP NZ,` / `JP `.
struct CondPrefix(Option<Cond>);

impl fmt::Display for CondPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(cc) => write!(f, "{cc},"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Nop => f.write_str("NOP"),
            Stop => f.write_str("STOP"),
            Halt => f.write_str("HALT"),
            Di => f.write_str("DI"),
            Ei => f.write_str("EI"),
            Ld(dst, src) => write!(f, "LD {dst},{src}"),
            LdImm8(dst) => write!(f, "LD {dst},d8"),
            LdRpImm16(rp) => write!(f, "LD {rp},d16"),
            StoreA(ind) => write!(f, "LD {ind},A"),
            LoadA(ind) => write!(f, "LD A,{ind}"),
            StoreSp => f.write_str("LD (a16),SP"),
            StoreAAbs => f.write_str("LD (a16),A"),
            LoadAAbs => f.write_str("LD A,(a16)"),
            StoreAHigh => f.write_str("LDH (a8),A"),
            LoadAHigh => f.write_str("LDH A,(a8)"),
            StoreAHighC => f.write_str("LD (C),A"),
            LoadAHighC => f.write_str("LD A,(C)"),
            LdSpHl => f.write_str("LD SP,HL"),
            LdHlSpOffset => f.write_str("LD HL,SP+r8"),
            Push(rp) => write!(f, "PUSH {rp}"),
            Pop(rp) => write!(f, "POP {rp}"),
            Alu(op, src) => write!(f, "{op}{src}"),
            AluImm8(op) => write!(f, "{op}d8"),
            Inc8(r) => write!(f, "INC {r}"),
            Dec8(r) => write!(f, "DEC {r}"),
            Inc16(rp) => write!(f, "INC {rp}"),
            Dec16(rp) => write!(f, "DEC {rp}"),
            AddHl(rp) => write!(f, "ADD HL,{rp}"),
            AddSpOffset => f.write_str("ADD SP,r8"),
            Rlca => f.write_str("RLCA"),
            Rrca => f.write_str("RRCA"),
            Rla => f.write_str("RLA"),
            Rra => f.write_str("RRA"),
            Daa => f.write_str("DAA"),
            Cpl => f.write_str("CPL"),
            Scf => f.write_str("SCF"),
            Ccf => f.write_str("CCF"),
            Jr(cc) => write!(f, "JR {}r8", CondPrefix(cc)),
            Jp(cc) => write!(f, "JP {}a16", CondPrefix(cc)),
            JpHl => f.write_str("JP HL"),
            Call(cc) => write!(f, "CALL {}a16", CondPrefix(cc)),
            Ret(Some(cc)) => write!(f, "RET {cc}"),
            Ret(None) => f.write_str("RET"),
            Reti => f.write_str("RETI"),
            Rst(target) => write!(f, "RST ${target:02X}"),
            Rot(op, r) => write!(f, "{op} {r}"),
            Bit(bit, r) => write!(f, "BIT {bit},{r}"),
            Res(bit, r) => write!(f, "RES {bit},{r}"),
            Set(bit, r) => write!(f, "SET {bit},{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::CB_PREFIX;

    const HOLES: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    fn primary(byte: u8) -> Option<Instruction> {
        Instruction::decode_primary(Opcode::decode(byte))
    }

    fn extended(byte: u8) -> Instruction {
        Instruction::decode_extended(Opcode::decode(byte))
            .expect("extended page is complete")
    }

    #[test]
    fn only_holes_and_prefix_fail_to_decode() {
        for byte in 0..=u8::MAX {
            let decoded = primary(byte);
            if HOLES.contains(&byte) || byte == CB_PREFIX {
                assert_eq!(decoded, None, "opcode {byte:#04x} should not decode");
            } else {
                assert!(decoded.is_some(), "opcode {byte:#04x} should decode");
            }
        }
    }

    #[test]
    fn extended_page_is_fully_assigned() {
        for byte in 0..=u8::MAX {
            let instr = extended(byte);
            assert!(instr.is_extended());
            assert_eq!(instr.encoded_len(), 2);
        }
    }

    #[test]
    fn representative_primary_opcodes() {
        assert_eq!(primary(0x00), Some(Instruction::Nop));
        assert_eq!(primary(0x01), Some(Instruction::LdRpImm16(Rp::BC)));
        assert_eq!(primary(0x31), Some(Instruction::LdRpImm16(Rp::SP)));
        assert_eq!(primary(0x06), Some(Instruction::LdImm8(R8::B)));
        assert_eq!(primary(0x0E), Some(Instruction::LdImm8(R8::C)));
        assert_eq!(primary(0x36), Some(Instruction::LdImm8(R8::HlInd)));
        assert_eq!(primary(0x22), Some(Instruction::StoreA(Indirect::HlInc)));
        assert_eq!(primary(0x32), Some(Instruction::StoreA(Indirect::HlDec)));
        assert_eq!(primary(0x3A), Some(Instruction::LoadA(Indirect::HlDec)));
        assert_eq!(primary(0x76), Some(Instruction::Halt));
        assert_eq!(primary(0x7E), Some(Instruction::Ld(R8::A, R8::HlInd)));
        assert_eq!(primary(0xAF), Some(Instruction::Alu(AluOp::Xor, R8::A)));
        assert_eq!(primary(0xFE), Some(Instruction::AluImm8(AluOp::Cp)));
        assert_eq!(primary(0x20), Some(Instruction::Jr(Some(Cond::NZ))));
        assert_eq!(primary(0x38), Some(Instruction::Jr(Some(Cond::C))));
        assert_eq!(primary(0xC9), Some(Instruction::Ret(None)));
        assert_eq!(primary(0xD9), Some(Instruction::Reti));
        assert_eq!(primary(0xF1), Some(Instruction::Pop(Rp2::AF)));
        assert_eq!(primary(0xE0), Some(Instruction::StoreAHigh));
        assert_eq!(primary(0xF2), Some(Instruction::LoadAHighC));
        assert_eq!(primary(0xEA), Some(Instruction::StoreAAbs));
        assert_eq!(primary(0xCD), Some(Instruction::Call(None)));
        assert_eq!(primary(0xDC), Some(Instruction::Call(Some(Cond::C))));
        assert_eq!(primary(0xFF), Some(Instruction::Rst(0x38)));
        assert_eq!(primary(0xF3), Some(Instruction::Di));
        assert_eq!(primary(0xFB), Some(Instruction::Ei));
    }

    #[test]
    fn bit_7_h_targets_register_h() {
        assert_eq!(extended(0x7C), Instruction::Bit(7, R8::H));
        assert_eq!(extended(0x46), Instruction::Bit(0, R8::HlInd));
        assert_eq!(extended(0x37), Instruction::Rot(RotOp::Swap, R8::A));
        assert_eq!(extended(0x87), Instruction::Res(0, R8::A));
        assert_eq!(extended(0xFE), Instruction::Set(7, R8::HlInd));
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(primary(0x31).map(|i| i.encoded_len()), Some(3));
        assert_eq!(primary(0x06).map(|i| i.encoded_len()), Some(2));
        assert_eq!(primary(0x10).map(|i| i.encoded_len()), Some(2));
        assert_eq!(primary(0xAF).map(|i| i.encoded_len()), Some(1));
        assert_eq!(primary(0xC3).map(|i| i.encoded_len()), Some(3));
    }

    #[test]
    fn mnemonics() {
        let text = |byte| primary(byte).map(|i| i.to_string());
        assert_eq!(text(0x31).as_deref(), Some("LD SP,d16"));
        assert_eq!(text(0x32).as_deref(), Some("LD (HL-),A"));
        assert_eq!(text(0xAF).as_deref(), Some("XOR A"));
        assert_eq!(text(0x88).as_deref(), Some("ADC A,B"));
        assert_eq!(text(0x20).as_deref(), Some("JR NZ,r8"));
        assert_eq!(text(0xC3).as_deref(), Some("JP a16"));
        assert_eq!(text(0xEF).as_deref(), Some("RST $28"));
        assert_eq!(extended(0x7C).to_string(), "BIT 7,H");
        assert_eq!(extended(0x1E).to_string(), "RR (HL)");
    }
}
