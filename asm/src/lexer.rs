use arch::cond::Cond;
use arch::constant::Const;
use arch::mnemonic::Mnemonic;
use arch::reg::Reg;

use crate::error::{Error, ErrorKind};
use crate::token::{Directive, Token};

/// Longest accepted symbol.
pub const MAX_SYMBOL_LEN: usize = 50;

/// Character-level lexer with single-character push-back and
/// line/column tracking for diagnostics.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
}

impl Lexer {
    pub fn new(src: &str) -> Self {
        Self {
            src: src.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    fn read(&mut self) -> Option<char> {
        let c = *self.src.get(self.pos)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Steps back over the last character returned by `read`.
    fn unread(&mut self) {
        self.pos -= 1;
        if self.src[self.pos] == '\n' {
            self.line -= 1;
            self.col = 0;
        } else {
            self.col -= 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn err(&self, kind: ErrorKind) -> Error {
        kind.at(self.line, self.col)
    }

    fn expect(&mut self, want: char) -> Result<(), Error> {
        match self.read() {
            Some(c) if c == want => Ok(()),
            _ => Err(self.err(ErrorKind::Expected(want))),
        }
    }

    /// Consumes whitespace and `;` line comments until something else
    /// turns up, which is pushed back.
    fn skip_ws(&mut self) {
        loop {
            match self.read() {
                Some(';') => {
                    while let Some(c) = self.read() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some(c) if c.is_whitespace() => {}
                Some(_) => {
                    self.unread();
                    return;
                }
                None => return,
            }
        }
    }

    /// Reads a maximal run of letters and `.` characters, case-folded
    /// to lowercase. The terminating character is pushed back.
    fn read_symbol(&mut self) -> Result<String, Error> {
        let mut sym = String::new();
        while let Some(c) = self.read() {
            if c.is_ascii_alphabetic() || c == '.' {
                if sym.len() >= MAX_SYMBOL_LEN {
                    return Err(self.err(ErrorKind::SymbolTooLong));
                }
                sym.push(c.to_ascii_lowercase());
            } else {
                self.unread();
                break;
            }
        }
        Ok(sym)
    }

    /// Accumulates up to four hex digits, most significant first. The
    /// caller has already checked that at least one digit follows.
    fn read_hex(&mut self) -> Result<u16, Error> {
        let mut value: u16 = 0;
        let mut digits = 0;
        while let Some(c) = self.read() {
            if !c.is_ascii_alphanumeric() {
                self.unread();
                break;
            }
            let d = c
                .to_digit(16)
                .ok_or_else(|| self.err(ErrorKind::ExpectedHexDigit))?;
            if digits == 4 {
                return Err(self.err(ErrorKind::HexOverflow));
            }
            value = value << 4 | d as u16;
            digits += 1;
        }
        Ok(value)
    }

    /// Next token of the stream. Exhausts to `Token::Eof`, which
    /// repeats on further calls.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_ws();

        let c = match self.read() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        match c {
            '0' => return Ok(Token::Const(Const::Zero)),
            '1' => return Ok(Token::Const(Const::One)),
            d if d.is_ascii_digit() => return Err(self.err(ErrorKind::InvalidLiteral)),
            'x' if self.peek().is_some_and(|p| p.is_ascii_hexdigit()) => {
                return Ok(Token::Addr(self.read_hex()?));
            }
            '[' => {
                let inner = self.next_token()?;
                self.expect(']')?;
                return match inner {
                    Token::Reg(r) => Ok(Token::RegMem(r)),
                    _ => Err(self.err(ErrorKind::ExpectedRegister)),
                };
            }
            'r' if self.peek().is_some_and(|p| p.is_ascii_digit()) => {
                let d = self.read().and_then(|c| c.to_digit(10)).unwrap_or(0) as u8;
                return Reg::try_from(d)
                    .map(Token::Reg)
                    .map_err(|_| self.err(ErrorKind::RegisterRange));
            }
            '.' => {
                let sym = self.read_symbol()?;
                return match sym.as_str() {
                    "org" => Ok(Token::Directive(Directive::Org)),
                    _ => Err(self.err(ErrorKind::UnknownDirective(sym))),
                };
            }
            _ => {}
        }

        if c.is_ascii_alphabetic() {
            self.unread();
            let sym = self.read_symbol()?;

            if sym.len() == 1 {
                match sym.as_str() {
                    "a" => return Ok(Token::Const(Const::A)),
                    "b" => return Ok(Token::Const(Const::B)),
                    "c" => return Ok(Token::Const(Const::C)),
                    _ => {}
                }
            }

            if let Ok(mn) = sym.parse::<Mnemonic>() {
                return Ok(Token::Instr(mn, Cond::NONE));
            }

            // Conditional jump: strict positional p -> z -> n suffix
            // scan. Characters left over after the scan are ignored,
            // so `jmpnz` carries only the N flag.
            if let Some(rest) = sym.strip_prefix("jmp") {
                let bytes = rest.as_bytes();
                let mut flags = Cond::NONE;
                let mut i = 0;
                if bytes.get(i) == Some(&b'p') {
                    flags |= Cond::P;
                    i += 1;
                }
                if bytes.get(i) == Some(&b'z') {
                    flags |= Cond::Z;
                    i += 1;
                }
                if bytes.get(i) == Some(&b'n') {
                    flags |= Cond::N;
                }
                return Ok(Token::Instr(Mnemonic::JMP, flags));
            }

            // Not a keyword: label definition if a colon follows,
            // otherwise a label reference.
            self.skip_ws();
            return match self.read() {
                Some(':') => Ok(Token::LabelDef(sym)),
                Some(_) => {
                    self.unread();
                    Ok(Token::LabelRef(sym))
                }
                None => Ok(Token::LabelRef(sym)),
            };
        }

        Err(self.err(ErrorKind::BadToken))
    }
}
