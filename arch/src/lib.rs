pub mod cond;
pub mod constant;
pub mod field;
pub mod func;
pub mod minstr;
pub mod mnemonic;
pub mod reg;
