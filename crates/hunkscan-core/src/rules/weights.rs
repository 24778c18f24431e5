/// Severity assigned to a library routine or pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightEntry {
    pub name: &'static str,
    pub weight: i32,
}

const fn w(name: &'static str, weight: i32) -> WeightEntry {
    WeightEntry { name, weight }
}

/// Compiled-in risk weights.
///
/// Library routines are matched by the name the symbol table resolves a
/// call offset to; the category keys (`ExecBase`, `ChipMem`, ...) carry the
/// severities of the fixed byte patterns.
pub const WEIGHTS: &[WeightEntry] = &[
    w("SetFunction", 40),
    w("Supervisor", 20),
    w("Forbid", 20),
    w("Permit", 20),
    w("AddIntServer", 30),
    w("SetIntVector", 35),
    w("SuperState", 40),
    w("ExecBase", 25),
    w("ChipMem", 30),
    w("ROMRef", 25),
    w("VectorPatch", 35),
    w("TCBAccess", 30),
    w("ListManip", 25),
    w("IntLevel", 35),
    w("VBRManip", 40),
    w("SelfMod", 45),
];

/// Exact, case-sensitive lookup.
pub fn weight_of(name: &str) -> Option<i32> {
    WEIGHTS.iter().find(|e| e.name == name).map(|e| e.weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_routines_resolve() {
        assert_eq!(weight_of("SetFunction"), Some(40));
        assert_eq!(weight_of("Forbid"), Some(20));
        assert_eq!(weight_of("SetIntVector"), Some(35));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(weight_of("setfunction"), None);
        assert_eq!(weight_of("OpenLibrary"), None);
    }

    #[test]
    fn names_are_unique_and_weights_positive() {
        let names: HashSet<_> = WEIGHTS.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), WEIGHTS.len());
        assert!(WEIGHTS.iter().all(|e| e.weight > 0));
    }
}
