use crate::cond::Cond;
use crate::constant::Const;
use crate::field::{self, Field};
use crate::func::Func;
use crate::reg::Reg;

/// One 18-bit control word, stored in the low bits of a `u32`.
///
/// The mode bit selects between two layouts: a micro-operation
/// (datapath transfer) or a micro-sequencing word (conditional jump).
/// Exactly one layout's fields are meaningful per word; the rest stay
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MicroInstruction(u32);

impl MicroInstruction {
    pub const fn word(self) -> u32 {
        self.0
    }

    pub fn get(self, field: Field) -> u32 {
        (self.0 & field.mask()) >> field.offset
    }

    pub fn set(&mut self, field: Field, value: u32) {
        assert!(
            value <= field.max(),
            "value {:#x} does not fit field `{}`",
            value,
            field.name
        );
        self.0 = (self.0 & !field.mask()) | (value << field.offset);
    }

    /// The low 24 bits, most-significant byte first. This is the
    /// canonical on-the-wire order of every output format.
    pub fn to_bytes(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }
}

// Named accessors, micro-operation layout.
impl MicroInstruction {
    pub fn is_seq(self) -> bool {
        self.get(field::MODE) == 1
    }

    /// Marks the word as a micro-sequencing word.
    pub fn set_seq_mode(&mut self) {
        self.set(field::MODE, 1);
    }

    pub fn mem_write(self) -> bool {
        self.get(field::MW) == 1
    }

    pub fn set_mem_write(&mut self, on: bool) {
        self.set(field::MW, on.into());
    }

    pub fn a_addr(self) -> u8 {
        self.get(field::AA) as u8
    }

    pub fn set_a_addr(&mut self, reg: Reg) {
        self.set(field::AA, u8::from(reg).into());
    }

    pub fn const_sel(self) -> bool {
        self.get(field::MB) == 1
    }

    /// Switches the B bus to the constant input.
    pub fn set_const_sel(&mut self, on: bool) {
        self.set(field::MB, on.into());
    }

    pub fn b_addr(self) -> u8 {
        self.get(field::BA) as u8
    }

    pub fn set_b_addr(&mut self, reg: Reg) {
        self.set(field::BA, u8::from(reg).into());
    }

    /// Places a constant code in the B address field.
    pub fn set_b_const(&mut self, c: Const) {
        self.set(field::BA, u8::from(c).into());
    }

    pub fn mem_result(self) -> bool {
        self.get(field::MF) == 1
    }

    /// Routes the memory unit's response to the register file instead
    /// of the function unit output.
    pub fn set_mem_result(&mut self, on: bool) {
        self.set(field::MF, on.into());
    }

    pub fn fn_sel(self) -> u8 {
        self.get(field::FS) as u8
    }

    pub fn set_fn_sel(&mut self, f: Func) {
        self.set(field::FS, u8::from(f).into());
    }

    pub fn dest(self) -> u8 {
        self.get(field::DA) as u8
    }

    pub fn set_dest(&mut self, reg: Reg) {
        self.set(field::DA, u8::from(reg).into());
    }

    pub fn reg_write(self) -> bool {
        self.get(field::RW) == 1
    }

    pub fn set_reg_write(&mut self, on: bool) {
        self.set(field::RW, on.into());
    }
}

// Named accessors, micro-sequencing layout.
impl MicroInstruction {
    pub fn cond(self) -> Cond {
        Cond::from_bits(self.get(field::COND) as u8)
    }

    pub fn set_cond(&mut self, cond: Cond) {
        self.set(field::COND, cond.bits().into());
    }

    pub fn next_addr(self) -> u8 {
        self.get(field::NEXT_ADDR) as u8
    }

    pub fn set_next_addr(&mut self, addr: u8) {
        self.set(field::NEXT_ADDR, addr.into());
    }
}
