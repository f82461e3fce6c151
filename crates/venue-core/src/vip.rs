//! Per-operator VIP allow-lists.
//!
//! Loaded once from config into an immutable [`VipTable`]. Operator ids and
//! guest names are both trimmed and lowercased, then compared exactly; there
//! is no partial matching.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One operator's configured VIP names, in config order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipList {
    pub operator: String,
    #[serde(default)]
    pub names: Vec<String>,
}

/// Status recorded for a guest at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    Regular,
    Vip,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct VipTable {
    by_operator: BTreeMap<String, HashSet<String>>,
}

impl VipTable {
    /// Build the lookup table. Operators appearing more than once have their
    /// names merged.
    pub fn new(lists: &[VipList]) -> Self {
        let mut by_operator: BTreeMap<String, HashSet<String>> = BTreeMap::new();
        for list in lists {
            by_operator
                .entry(normalize(&list.operator))
                .or_default()
                .extend(list.names.iter().map(|n| normalize(n)));
        }
        Self { by_operator }
    }

    pub fn is_vip(&self, operator_id: &str, guest_name: &str) -> bool {
        self.by_operator
            .get(&normalize(operator_id))
            .is_some_and(|names| names.contains(&normalize(guest_name)))
    }

    /// Status to record for a check-in: VIP guests are always elevated,
    /// everyone else keeps the status the operator asked for.
    pub fn resolve_status(
        &self,
        operator_id: &str,
        guest_name: &str,
        requested: GuestStatus,
    ) -> GuestStatus {
        if self.is_vip(operator_id, guest_name) {
            GuestStatus::Vip
        } else {
            requested
        }
    }

    /// Normalized operator identifiers, sorted.
    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.by_operator.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_operator.is_empty()
    }
}
