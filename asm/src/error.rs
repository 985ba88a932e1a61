use arch::mnemonic::Mnemonic;
use thiserror::Error;

/// An assembly failure, pinned to the source position where the
/// offending token was read.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ErrorKind {
    // Lex errors
    #[error("bad token")]
    BadToken,

    #[error("only constant values zero and one are allowed")]
    InvalidLiteral,

    #[error("overflow of unsigned 16-bit integer")]
    HexOverflow,

    #[error("expected hex digit")]
    ExpectedHexDigit,

    #[error("expected `{0}`")]
    Expected(char),

    #[error("expected register inside `[ ]`")]
    ExpectedRegister,

    #[error("register number out of range")]
    RegisterRange,

    #[error("unknown directive: `.{0}`")]
    UnknownDirective(String),

    #[error("maximum symbol length exceeded")]
    SymbolTooLong,

    // Encode errors
    #[error("operands of `{0}` must be registers")]
    RegOperands(Mnemonic),

    #[error("mov destination must be a register or `[reg]`")]
    MovDest,

    #[error("can only move another register, memory, or a constant to a register")]
    MovToReg,

    #[error("can only move a register or constant 0 to memory")]
    MovToMem,

    #[error("only constant 0 may be moved directly to memory")]
    ConstToMem,

    #[error("expected address or label for jump instruction")]
    JumpTarget,

    #[error("jump target x{0:X} is outside the 256-word ROM")]
    JumpRange(u16),

    #[error("expected address after `.org`")]
    ExpectedAddress,

    #[error("expected instruction, directive, or label")]
    ExpectedStatement,

    #[error("instruction must follow label")]
    LabelNeedsInstr,

    // Symbol errors
    #[error("label `{0}` already defined")]
    RedefinedLabel(String),

    #[error("unknown label `{0}`")]
    UndefinedLabel(String),

    // Capacity errors
    #[error("ROM storage exceeded")]
    RomOverflow,

    #[error("origin x{0:X} is outside the 256-word ROM")]
    OrgRange(u16),
}

impl ErrorKind {
    pub fn at(self, line: u32, col: u32) -> Error {
        Error {
            kind: self,
            line,
            col,
        }
    }
}
