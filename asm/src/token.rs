use arch::cond::Cond;
use arch::constant::Const;
use arch::mnemonic::Mnemonic;
use arch::reg::Reg;

/// One lexed unit of microcode source. Tokens are produced and
/// consumed within a single parse step; the symbol text is owned by
/// the token, so it stays valid across later lexer calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Instruction mnemonic. The condition set is only meaningful for
    /// `jmp` and stays empty for everything else.
    Instr(Mnemonic, Cond),
    /// Register operand, `rN`.
    Reg(Reg),
    /// Memory access through a register, `[rN]`.
    RegMem(Reg),
    /// Constant operand: `0`, `1`, `a`, `b`, or `c`.
    Const(Const),
    /// Hexadecimal address literal, `xNN..` (up to four digits).
    Addr(u16),
    Directive(Directive),
    /// `name:` binds the name to the current ROM slot.
    LabelDef(String),
    /// Bare symbol used as a jump target.
    LabelRef(String),
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `.org <addr>` relocates the ROM write cursor.
    Org,
}
