//! Mac machine-model identifier comparison
//!
//! Model identifiers like "MacBookPro14,3" carry a type prefix, a
//! generation number, and a submodel number. Two models are only ordered
//! when their type prefixes match; everything else compares as "not newer"
//! so that an unknown relationship is treated conservatively.

use regex::Regex;
use std::sync::LazyLock;

static MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)(\d+),(\d+)$").unwrap());

/// Parsed Mac model identifier, e.g. "MacBookPro14,3"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineModel {
    /// Model family, e.g. "MacBookPro"
    pub type_prefix: String,
    /// Generation number (before the comma)
    pub generation: u32,
    /// Submodel number (after the comma)
    pub submodel: u32,
}

impl MachineModel {
    /// Parse a model identifier. Returns None when the identifier does not
    /// have the `<Prefix><generation>,<submodel>` shape.
    pub fn parse(identifier: &str) -> Option<Self> {
        let caps = MODEL_RE.captures(identifier.trim())?;
        let type_prefix = caps.get(1)?.as_str().to_string();
        let generation = caps.get(2)?.as_str().parse().ok()?;
        let submodel = caps.get(3)?.as_str().parse().ok()?;
        Some(Self {
            type_prefix,
            generation,
            submodel,
        })
    }

    /// Check whether this model is strictly newer than `other` within the
    /// same model family.
    pub fn is_newer_than(&self, other: &MachineModel) -> bool {
        self.type_prefix == other.type_prefix
            && (self.generation, self.submodel) > (other.generation, other.submodel)
    }
}

/// Compare two raw model identifiers.
///
/// Returns true only when both parse, the type prefixes match, and `a` has
/// a strictly greater (generation, submodel) pair. Parse failures and
/// differing prefixes yield false, not an error.
pub fn is_newer_machine(a: &str, b: &str) -> bool {
    match (MachineModel::parse(a), MachineModel::parse(b)) {
        (Some(ma), Some(mb)) => ma.is_newer_than(&mb),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_identifier() {
        let model = MachineModel::parse("MacBookPro14,3").unwrap();
        assert_eq!(model.type_prefix, "MacBookPro");
        assert_eq!(model.generation, 14);
        assert_eq!(model.submodel, 3);
    }

    #[test]
    fn test_parse_imac_pro() {
        let model = MachineModel::parse("iMacPro1,1").unwrap();
        assert_eq!(model.type_prefix, "iMacPro");
        assert_eq!(model.generation, 1);
        assert_eq!(model.submodel, 1);
    }

    #[test]
    fn test_parse_invalid_identifier() {
        assert!(MachineModel::parse("").is_none());
        assert!(MachineModel::parse("MacBookPro").is_none());
        assert!(MachineModel::parse("MacBookPro14").is_none());
        assert!(MachineModel::parse("MacBookPro14,3,1").is_none());
        assert!(MachineModel::parse("14,3").is_none());
    }

    #[test]
    fn test_newer_generation() {
        assert!(is_newer_machine("MacBookPro15,1", "MacBookPro14,3"));
        assert!(!is_newer_machine("MacBookPro14,3", "MacBookPro15,1"));
    }

    #[test]
    fn test_newer_submodel_same_generation() {
        assert!(is_newer_machine("MacBookPro14,3", "MacBookPro14,1"));
        assert!(!is_newer_machine("MacBookPro14,1", "MacBookPro14,3"));
    }

    #[test]
    fn test_equal_models_not_newer() {
        assert!(!is_newer_machine("MacBookPro14,3", "MacBookPro14,3"));
    }

    #[test]
    fn test_different_prefixes_not_ordered() {
        // iMac19,1 is not comparable to MacBookPro14,3
        assert!(!is_newer_machine("iMac19,1", "MacBookPro14,3"));
        assert!(!is_newer_machine("MacBookPro14,3", "iMac19,1"));
    }

    #[test]
    fn test_parse_failure_is_not_newer() {
        assert!(!is_newer_machine("garbage", "MacBookPro14,3"));
        assert!(!is_newer_machine("MacBookPro14,3", "garbage"));
    }
}
