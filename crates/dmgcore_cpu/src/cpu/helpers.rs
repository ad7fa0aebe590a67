use super::{Bus, Cpu};
use crate::instruction::{Cond, Rp, Rp2, R8};
use crate::regs::Flags;

impl Cpu {
    /// Read an 8-bit register or (HL).
    #[inline]
    pub(super) fn read_r8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u8 {
        match reg {
            R8::B => self.regs.b,
            R8::C => self.regs.c,
            R8::D => self.regs.d,
            R8::E => self.regs.e,
            R8::H => self.regs.h,
            R8::L => self.regs.l,
            R8::HlInd => bus.read8(self.regs.hl()),
            R8::A => self.regs.a,
        }
    }

    /// Write an 8-bit register or (HL).
    #[inline]
    pub(super) fn write_r8<B: Bus>(&mut self, bus: &mut B, reg: R8, value: u8) {
        match reg {
            R8::B => self.regs.b = value,
            R8::C => self.regs.c = value,
            R8::D => self.regs.d = value,
            R8::E => self.regs.e = value,
            R8::H => self.regs.h = value,
            R8::L => self.regs.l = value,
            R8::HlInd => bus.write8(self.regs.hl(), value),
            R8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn read_rp(&self, rp: Rp) -> u16 {
        match rp {
            Rp::BC => self.regs.bc(),
            Rp::DE => self.regs.de(),
            Rp::HL => self.regs.hl(),
            Rp::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_rp(&mut self, rp: Rp, value: u16) {
        match rp {
            Rp::BC => self.regs.set_bc(value),
            Rp::DE => self.regs.set_de(value),
            Rp::HL => self.regs.set_hl(value),
            Rp::SP => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn read_rp2(&self, rp: Rp2) -> u16 {
        match rp {
            Rp2::BC => self.regs.bc(),
            Rp2::DE => self.regs.de(),
            Rp2::HL => self.regs.hl(),
            Rp2::AF => self.regs.af(),
        }
    }

    #[inline]
    pub(super) fn write_rp2(&mut self, rp: Rp2, value: u16) {
        match rp {
            Rp2::BC => self.regs.set_bc(value),
            Rp2::DE => self.regs.set_de(value),
            Rp2::HL => self.regs.set_hl(value),
            Rp2::AF => self.regs.set_af(value),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cc: Cond) -> bool {
        match cc {
            Cond::NZ => !self.flag(Flags::ZERO),
            Cond::Z => self.flag(Flags::ZERO),
            Cond::NC => !self.flag(Flags::CARRY),
            Cond::C => self.flag(Flags::CARRY),
        }
    }

    /// Read the byte at PC and advance PC, wrapping at 0xFFFF.
    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Read a little-endian immediate: the low byte comes first.
    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus) as u16;
        let hi = self.fetch8(bus) as u16;
        lo | (hi << 8)
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let lo = value as u8;
        let hi = (value >> 8) as u8;
        // Stack grows downward. We want memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp) as u16;
        let hi = bus.read8(self.regs.sp.wrapping_add(1)) as u16;
        self.regs.sp = self.regs.sp.wrapping_add(2);
        (hi << 8) | lo
    }
}
