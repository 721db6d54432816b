//! Compiled promotion table with ancestor-qualified lookups.

use std::collections::{BTreeSet, HashMap};

/// One step of the structural context above the object being built: the
/// internal type of an ancestor and the property followed out of it.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub internal_type: String,
    pub edge: String,
}

/// The promotion table keyed by dotted paths, plus the depth of the longest
/// qualified key so lookups never inspect more context than needed.
#[derive(Debug, Clone, Default)]
pub(crate) struct PromotionTable {
    entries: HashMap<String, BTreeSet<String>>,
    max_depth: usize,
}

impl PromotionTable {
    pub fn compile<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a BTreeSet<String>)>,
    {
        let mut table = PromotionTable::default();
        for (key, props) in entries {
            let depth = key.split('.').count().saturating_sub(1);
            table.max_depth = table.max_depth.max(depth);
            table
                .entries
                .entry(key.clone())
                .or_default()
                .extend(props.iter().cloned());
        }
        table
    }

    /// Collects every property set that applies to an object of
    /// `internal_type` reached through `chain` (outermost ancestor first).
    pub fn lookup<'t>(&'t self, internal_type: &str, chain: &[Frame]) -> Vec<&'t BTreeSet<String>> {
        let mut found = Vec::new();
        if let Some(props) = self.entries.get(internal_type) {
            found.push(props);
        }
        let depth = self.max_depth.min(chain.len());
        for d in 1..=depth {
            let frames = &chain[chain.len() - d..];
            let mut key = frames[0].internal_type.clone();
            for frame in frames {
                key.push('.');
                key.push_str(&frame.edge);
            }
            if let Some(props) = self.entries.get(&key) {
                found.push(props);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn table(entries: &[(&str, &[&str])]) -> PromotionTable {
        let map: BTreeMap<String, BTreeSet<String>> = entries
            .iter()
            .map(|(k, props)| (k.to_string(), props.iter().map(|p| p.to_string()).collect()))
            .collect();
        PromotionTable::compile(&map)
    }

    fn frame(t: &str, edge: &str) -> Frame {
        Frame {
            internal_type: t.into(),
            edge: edge.into(),
        }
    }

    #[test]
    fn qualified_keys_need_matching_context() {
        let table = table(&[
            ("ListComp", &["generators"]),
            ("ListComp.generators", &["ifs"]),
            ("ListComp.generators.ifs", &["ops"]),
        ]);
        assert_eq!(table.max_depth, 2);

        let direct = table.lookup("comprehension", &[]);
        assert!(direct.is_empty());

        let chain = [frame("Module", "body"), frame("ListComp", "generators")];
        let under_listcomp = table.lookup("comprehension", &chain);
        assert_eq!(under_listcomp.len(), 1);
        assert!(under_listcomp[0].contains("ifs"));

        let chain = [
            frame("ListComp", "generators"),
            frame("comprehension", "ifs"),
        ];
        let nested = table.lookup("Compare", &chain);
        assert_eq!(nested.len(), 1);
        assert!(nested[0].contains("ops"));
    }

    #[test]
    fn plain_type_key_ignores_context() {
        let table = table(&[("If", &["body", "orelse"])]);
        let chain = [frame("Module", "body")];
        let props = table.lookup("If", &chain);
        assert_eq!(props.len(), 1);
        assert!(props[0].contains("orelse"));
    }
}
