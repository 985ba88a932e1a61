use indexmap::IndexMap;

use crate::error::ErrorKind;

/// Label table: name -> ROM slot. Keeps insertion order for the dump
/// listing. Duplicates are rejected at definition time, so the first
/// binding always wins and the conflict is reported where the second
/// definition appears.
#[derive(Debug, Default)]
pub struct Labels(IndexMap<String, u8>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    pub fn define(&mut self, name: &str, pos: u8) -> Result<(), ErrorKind> {
        if self.0.contains_key(name) {
            return Err(ErrorKind::RedefinedLabel(name.to_string()));
        }
        self.0.insert(name.to_string(), pos);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A jump whose target label was not yet defined when its word was
/// encoded. The word's next-address field stays zero until resolution.
#[derive(Debug, Clone)]
pub struct Fixup {
    pub label: String,
    /// ROM slot of the micro-sequencing word awaiting its target.
    pub pos: u8,
    /// Source position of the referencing jump, for diagnostics.
    pub line: u32,
    pub col: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut labels = Labels::new();
        labels.define("start", 0).unwrap();
        labels.define("loop", 0x10).unwrap();
        assert_eq!(labels.get("loop"), Some(0x10));
        assert_eq!(labels.get("end"), None);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn duplicate_definition_is_rejected() {
        let mut labels = Labels::new();
        labels.define("foo", 1).unwrap();
        assert_eq!(
            labels.define("foo", 2),
            Err(ErrorKind::RedefinedLabel("foo".into()))
        );
        // first binding wins
        assert_eq!(labels.get("foo"), Some(1));
    }
}
