use arch::cond::Cond;
use arch::constant::Const;
use arch::func::Func;
use arch::minstr::MicroInstruction;
use arch::mnemonic::Mnemonic;
use arch::reg::Reg;

use crate::error::{Error, ErrorKind};
use crate::labels::{Fixup, Labels};
use crate::lexer::Lexer;
use crate::rom::{Rom, ROM_SIZE};
use crate::token::{Directive, Token};

/// Assembles a complete source text into a ROM image.
///
/// Single pass: instructions are encoded as they are read; jumps to
/// labels defined later are recorded as fixups and patched once the
/// whole program has been scanned.
pub fn assemble(src: &str) -> Result<Rom, Error> {
    let mut session = Assembler::new(src);
    session.run()?;
    session.resolve()?;
    Ok(session.rom)
}

/// One assembly run. Owns the lexer, the ROM image under
/// construction, the label table, and the pending fixups.
struct Assembler {
    lexer: Lexer,
    rom: Rom,
    labels: Labels,
    fixups: Vec<Fixup>,
}

impl Assembler {
    fn new(src: &str) -> Self {
        Self {
            lexer: Lexer::new(src),
            rom: Rom::new(),
            labels: Labels::new(),
            fixups: Vec::new(),
        }
    }

    fn err(&self, kind: ErrorKind) -> Error {
        kind.at(self.lexer.line(), self.lexer.col())
    }

    /// Scanning phase: drives the lexer token by token until
    /// end-of-stream.
    fn run(&mut self) -> Result<(), Error> {
        let mut labelled = false;
        loop {
            let token = self.lexer.next_token()?;
            if labelled && !matches!(token, Token::Instr(..)) {
                return Err(self.err(ErrorKind::LabelNeedsInstr));
            }
            match token {
                Token::Eof => return Ok(()),
                Token::Instr(mn, cond) => {
                    labelled = false;
                    let (line, col) = (self.lexer.line(), self.lexer.col());
                    self.encode_instruction(mn, cond, line, col)?;
                }
                Token::Directive(Directive::Org) => self.set_origin()?,
                Token::LabelDef(name) => {
                    let pos = u8::try_from(self.rom.cursor())
                        .map_err(|_| self.err(ErrorKind::RomOverflow))?;
                    self.labels
                        .define(&name, pos)
                        .map_err(|kind| self.err(kind))?;
                    labelled = true;
                }
                _ => return Err(self.err(ErrorKind::ExpectedStatement)),
            }
        }
    }

    /// Resolution phase: runs exactly once, after scanning. Order does
    /// not matter; every fixup patches an independent word.
    fn resolve(&mut self) -> Result<(), Error> {
        for fixup in &self.fixups {
            match self.labels.get(&fixup.label) {
                Some(addr) => self.rom.patch_next_addr(fixup.pos, addr),
                None => {
                    return Err(ErrorKind::UndefinedLabel(fixup.label.clone())
                        .at(fixup.line, fixup.col))
                }
            }
        }
        Ok(())
    }

    /// Encodes one instruction, reading its operands from the lexer,
    /// and appends the word at the write cursor. `line`/`col` locate
    /// the mnemonic itself, for fixup diagnostics.
    fn encode_instruction(
        &mut self,
        mn: Mnemonic,
        cond: Cond,
        line: u32,
        col: u32,
    ) -> Result<(), Error> {
        let mut w = MicroInstruction::default();
        // Target label of a jump that cannot resolve yet.
        let mut pending: Option<String> = None;

        match mn {
            Mnemonic::NOP => {}

            Mnemonic::MOV => self.encode_mov(&mut w)?,

            Mnemonic::ADD
            | Mnemonic::SUB
            | Mnemonic::MUL
            | Mnemonic::DIV
            | Mnemonic::AND
            | Mnemonic::OR => {
                let dst = self.expect_reg(mn)?;
                let left = self.expect_reg(mn)?;
                let right = self.expect_reg(mn)?;
                w.set_reg_write(true);
                w.set_dest(dst);
                w.set_a_addr(left);
                w.set_b_addr(right);
                w.set_fn_sel(match mn {
                    Mnemonic::ADD => Func::ADD,
                    Mnemonic::SUB => Func::SUB,
                    Mnemonic::MUL => Func::MUL,
                    Mnemonic::DIV => Func::DIV,
                    Mnemonic::AND => Func::AND,
                    _ => Func::OR,
                });
            }

            Mnemonic::NOT | Mnemonic::NADD | Mnemonic::RSH | Mnemonic::LSH | Mnemonic::SAR => {
                let dst = self.expect_reg(mn)?;
                let arg = self.expect_reg(mn)?;
                w.set_reg_write(true);
                w.set_dest(dst);
                w.set_a_addr(arg);
                w.set_fn_sel(match mn {
                    Mnemonic::NOT => Func::NOT,
                    Mnemonic::NADD => Func::NADD,
                    Mnemonic::RSH => Func::RSH,
                    Mnemonic::LSH => Func::LSH,
                    _ => Func::SAR,
                });
            }

            Mnemonic::JMP => {
                w.set_seq_mode();
                w.set_cond(cond);
                match self.lexer.next_token()? {
                    Token::Addr(addr) => {
                        if usize::from(addr) >= ROM_SIZE {
                            return Err(self.err(ErrorKind::JumpRange(addr)));
                        }
                        w.set_next_addr(addr as u8);
                    }
                    Token::LabelRef(name) => match self.labels.get(&name) {
                        Some(addr) => w.set_next_addr(addr),
                        None => pending = Some(name),
                    },
                    _ => return Err(self.err(ErrorKind::JumpTarget)),
                }
            }
        }

        let pos = self.rom.push(w).map_err(|kind| self.err(kind))?;
        if let Some(label) = pending {
            self.fixups.push(Fixup { label, pos, line, col });
        }
        Ok(())
    }

    /// `mov dst src`, specialized by the destination/source kinds.
    fn encode_mov(&mut self, w: &mut MicroInstruction) -> Result<(), Error> {
        let dst = self.lexer.next_token()?;
        let src = self.lexer.next_token()?;

        match dst {
            Token::Reg(rd) => {
                w.set_reg_write(true);
                w.set_dest(rd);
                // B bus carries values; A is reserved for addresses.
                w.set_fn_sel(Func::FB);
                match src {
                    // mov rX rY
                    Token::Reg(rs) => w.set_b_addr(rs),
                    // mov rX [rY]: the A bus addresses memory, and the
                    // register file takes the memory unit's response.
                    Token::RegMem(rs) => {
                        w.set_b_addr(rs);
                        w.set_mem_result(true);
                        w.set_a_addr(rs);
                    }
                    // mov rX <const>
                    Token::Const(c) => {
                        w.set_b_const(c);
                        if c == Const::One {
                            // Constant one only exists as a function
                            // unit output, not on the constant input.
                            w.set_fn_sel(Func::F1);
                        } else {
                            w.set_const_sel(true);
                        }
                    }
                    _ => return Err(self.err(ErrorKind::MovToReg)),
                }
            }
            Token::RegMem(rd) => {
                // A address names the memory slot to write, whatever
                // the source is.
                w.set_a_addr(rd);
                w.set_mem_write(true);
                match src {
                    // mov [rX] rY
                    Token::Reg(rs) => w.set_b_addr(rs),
                    // mov [rX] 0
                    Token::Const(c) => {
                        if c != Const::Zero {
                            return Err(self.err(ErrorKind::ConstToMem));
                        }
                        w.set_b_const(c);
                        w.set_const_sel(true);
                    }
                    _ => return Err(self.err(ErrorKind::MovToMem)),
                }
            }
            _ => return Err(self.err(ErrorKind::MovDest)),
        }
        Ok(())
    }

    fn expect_reg(&mut self, mn: Mnemonic) -> Result<Reg, Error> {
        match self.lexer.next_token()? {
            Token::Reg(r) => Ok(r),
            _ => Err(self.err(ErrorKind::RegOperands(mn))),
        }
    }

    fn set_origin(&mut self) -> Result<(), Error> {
        match self.lexer.next_token()? {
            Token::Addr(addr) => self.rom.set_origin(addr).map_err(|kind| self.err(kind)),
            _ => Err(self.err(ErrorKind::ExpectedAddress)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asm(src: &str) -> Rom {
        assemble(src).unwrap()
    }

    fn asm_err(src: &str) -> ErrorKind {
        assemble(src).unwrap_err().kind
    }

    #[test]
    fn nop_is_all_zero() {
        let rom = asm("nop");
        assert_eq!(rom.get(0).word(), 0);
        assert_eq!(rom.cursor(), 1);
    }

    #[test]
    fn mov_reg_from_reg() {
        let rom = asm("mov r1 r2");
        let w = rom.get(0);
        assert!(w.reg_write());
        assert_eq!(w.dest(), 1);
        assert_eq!(w.b_addr(), 2);
        assert_eq!(w.fn_sel(), u8::from(Func::FB));
        assert!(!w.const_sel());
        assert!(!w.mem_result());
        assert!(!w.mem_write());
    }

    #[test]
    fn mov_reg_from_memory() {
        let rom = asm("mov r3 [r4]");
        let w = rom.get(0);
        assert!(w.reg_write());
        assert!(w.mem_result());
        assert_eq!(w.dest(), 3);
        assert_eq!(w.a_addr(), 4);
        assert_eq!(w.b_addr(), 4);
    }

    #[test]
    fn mov_reg_from_constant_one_uses_function_unit() {
        let rom = asm("mov r0 1");
        let w = rom.get(0);
        // constant one comes from the function unit, not the
        // constant-input multiplexer
        assert_eq!(w.fn_sel(), u8::from(Func::F1));
        assert!(!w.const_sel());
        assert!(w.reg_write());
        assert_eq!(w.b_addr(), u8::from(Const::One));
    }

    #[test]
    fn mov_reg_from_other_constants_uses_const_input() {
        let rom = asm("mov r2 a");
        let w = rom.get(0);
        assert!(w.const_sel());
        assert_eq!(w.b_addr(), u8::from(Const::A));
        assert_eq!(w.fn_sel(), u8::from(Func::FB));
    }

    #[test]
    fn mov_memory_from_reg() {
        let rom = asm("mov [r5] r6");
        let w = rom.get(0);
        assert!(w.mem_write());
        assert!(!w.reg_write());
        assert_eq!(w.a_addr(), 5);
        assert_eq!(w.b_addr(), 6);
    }

    #[test]
    fn mov_memory_from_constant_zero() {
        let rom = asm("mov [r5] 0");
        let w = rom.get(0);
        assert!(w.mem_write());
        assert!(w.const_sel());
        assert_eq!(w.b_addr(), 0);
    }

    #[test]
    fn mov_rejects_bad_combinations() {
        assert_eq!(asm_err("mov [r5] 1"), ErrorKind::ConstToMem);
        assert_eq!(asm_err("mov [r5] b"), ErrorKind::ConstToMem);
        assert_eq!(asm_err("mov [r5] [r6]"), ErrorKind::MovToMem);
        assert_eq!(asm_err("mov r1 x5"), ErrorKind::MovToReg);
        assert_eq!(asm_err("mov 0 r1"), ErrorKind::MovDest);
    }

    macro_rules! test_binary_op {
        ($($name:ident: $src:expr => $func:expr,)*) => {$(
            #[test]
            fn $name() {
                let rom = asm(concat!($src, " r1 r2 r3"));
                let w = rom.get(0);
                assert!(w.reg_write());
                assert_eq!(w.dest(), 1);
                assert_eq!(w.a_addr(), 2);
                assert_eq!(w.b_addr(), 3);
                assert_eq!(w.fn_sel(), u8::from($func));
            }
        )*}
    }

    test_binary_op! {
        test_add: "add" => Func::ADD,
        test_sub: "sub" => Func::SUB,
        test_mul: "mul" => Func::MUL,
        test_div: "div" => Func::DIV,
        test_and: "and" => Func::AND,
        test_or: "or" => Func::OR,
    }

    macro_rules! test_unary_op {
        ($($name:ident: $src:expr => $func:expr,)*) => {$(
            #[test]
            fn $name() {
                let rom = asm(concat!($src, " r1 r2"));
                let w = rom.get(0);
                assert!(w.reg_write());
                assert_eq!(w.dest(), 1);
                assert_eq!(w.a_addr(), 2);
                assert_eq!(w.fn_sel(), u8::from($func));
            }
        )*}
    }

    test_unary_op! {
        test_not: "not" => Func::NOT,
        test_nadd: "nadd" => Func::NADD,
        test_rsh: "rsh" => Func::RSH,
        test_lsh: "lsh" => Func::LSH,
        test_sar: "sar" => Func::SAR,
    }

    #[test]
    fn alu_ops_require_register_operands() {
        assert_eq!(asm_err("add r1 r2 0"), ErrorKind::RegOperands(Mnemonic::ADD));
        assert_eq!(asm_err("not r1 [r2]"), ErrorKind::RegOperands(Mnemonic::NOT));
    }

    #[test]
    fn jump_to_literal_address() {
        let rom = asm("jmp x80");
        let w = rom.get(0);
        assert!(w.is_seq());
        assert_eq!(w.cond(), Cond::NONE);
        assert_eq!(w.next_addr(), 0x80);
    }

    #[test]
    fn jump_condition_flags() {
        let rom = asm("jmpzn x10");
        assert_eq!(rom.get(0).cond(), Cond::Z | Cond::N);
        // strict p -> z -> n suffix order: `jmpnz` only carries N
        let rom = asm("jmpnz x10");
        assert_eq!(rom.get(0).cond(), Cond::N);
    }

    #[test]
    fn forward_and_backward_references_resolve_alike() {
        let fwd = asm("jmp target\nnop\ntarget: nop");
        assert_eq!(fwd.get(0).next_addr(), 2);

        let bwd = asm("target: nop\nnop\njmp target");
        assert_eq!(bwd.get(2).next_addr(), 0);
        assert!(bwd.get(2).is_seq());
    }

    #[test]
    fn chained_forward_references() {
        let rom = asm("jmp end\njmpz end\nend: nop");
        assert_eq!(rom.get(0).next_addr(), 2);
        assert_eq!(rom.get(1).next_addr(), 2);
        assert_eq!(rom.get(1).cond(), Cond::Z);
    }

    #[test]
    fn undefined_label_is_fatal() {
        assert_eq!(
            asm_err("jmp nosuchlabel"),
            ErrorKind::UndefinedLabel("nosuchlabel".into())
        );
    }

    #[test]
    fn undefined_label_diagnostic_points_at_the_jump() {
        let err = assemble("nop\njmp missing\nnop").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedLabel("missing".into()));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn duplicate_label_is_fatal() {
        assert_eq!(
            asm_err("foo: nop\nfoo: nop"),
            ErrorKind::RedefinedLabel("foo".into())
        );
    }

    #[test]
    fn label_must_be_followed_by_instruction() {
        assert_eq!(asm_err("foo:\n.org x10"), ErrorKind::LabelNeedsInstr);
        assert_eq!(asm_err("foo:"), ErrorKind::LabelNeedsInstr);
    }

    #[test]
    fn org_relocates_the_cursor() {
        let rom = asm(".org x80\nmov r1 r2");
        assert!(rom.get(0x80).reg_write());
        for slot in 0..0x80 {
            assert_eq!(rom.get(slot).word(), 0, "slot {slot:#x}");
        }
    }

    #[test]
    fn org_requires_an_address_in_range() {
        assert_eq!(asm_err(".org r1"), ErrorKind::ExpectedAddress);
        assert_eq!(asm_err(".org x100"), ErrorKind::OrgRange(0x100));
    }

    #[test]
    fn rom_capacity_is_enforced() {
        assert_eq!(asm_err(".org xff\nnop\nnop"), ErrorKind::RomOverflow);
        // slot 255 itself is usable
        let rom = asm(".org xff\nmov r1 r2");
        assert!(rom.get(0xFF).reg_write());
    }

    #[test]
    fn jump_target_bounds() {
        assert_eq!(asm_err("jmp x100"), ErrorKind::JumpRange(0x100));
        assert_eq!(asm_err("jmp 0"), ErrorKind::JumpTarget);
    }

    #[test]
    fn stray_top_level_token_is_rejected() {
        assert_eq!(asm_err("r3"), ErrorKind::ExpectedStatement);
        assert_eq!(asm_err("mov r1 r2\n[r3]"), ErrorKind::ExpectedStatement);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let rom = asm("; setup\n\nmov r1 r2 ; copy\n");
        assert!(rom.get(0).reg_write());
        assert_eq!(rom.cursor(), 1);
    }
}
