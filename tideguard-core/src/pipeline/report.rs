//! Keyed QC results
//!
//! Presentation layers look results up by string key and align them back to
//! the source series by index. Per-test sequences are published as
//! `<variable>_qartod_<test_name>` and the rollup as `qartod_qc_rollup`.
//! The serialized form is the same flat map, plus a `variable` entry:
//!
//! ```json
//! {
//!   "variable": "navd88_meters",
//!   "navd88_meters_qartod_gross_range_test": [1, 3, 4],
//!   "qartod_qc_rollup": [1, 3, 4]
//! }
//! ```

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{
    config::TestName,
    constants::naming::QARTOD_ROLLUP_KEY,
    flags::{Flag, FlagCounts, FlagSequence},
};

/// Flags produced by one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct QcReport {
    variable: String,
    tests: BTreeMap<TestName, FlagSequence>,
    rollup: FlagSequence,
}

impl QcReport {
    pub(crate) fn new(
        variable: &str,
        tests: impl IntoIterator<Item = (TestName, FlagSequence)>,
        rollup: FlagSequence,
    ) -> Self {
        Self {
            variable: variable.to_string(),
            tests: tests.into_iter().collect(),
            rollup,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Flags of one test, if it was enabled
    pub fn test(&self, name: TestName) -> Option<&FlagSequence> {
        self.tests.get(&name)
    }

    /// Tests that ran, in run order
    pub fn tests(&self) -> impl Iterator<Item = (TestName, &FlagSequence)> + '_ {
        self.tests.iter().map(|(name, flags)| (*name, flags))
    }

    pub fn rollup(&self) -> &FlagSequence {
        &self.rollup
    }

    /// Number of observations covered
    pub fn len(&self) -> usize {
        self.rollup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rollup.is_empty()
    }

    /// Look a sequence up by its published key
    pub fn get(&self, key: &str) -> Option<&FlagSequence> {
        if key == QARTOD_ROLLUP_KEY {
            return Some(&self.rollup);
        }
        self.tests
            .iter()
            .find(|(name, _)| name.result_key(&self.variable) == key)
            .map(|(_, flags)| flags)
    }

    /// Every sequence under its published key, rollup included
    pub fn keyed(&self) -> BTreeMap<String, &FlagSequence> {
        let mut keyed: BTreeMap<String, &FlagSequence> = self
            .tests
            .iter()
            .map(|(name, flags)| (name.result_key(&self.variable), flags))
            .collect();
        keyed.insert(QARTOD_ROLLUP_KEY.to_string(), &self.rollup);
        keyed
    }

    /// Flag tallies per published key
    pub fn counts(&self) -> BTreeMap<String, FlagCounts> {
        self.keyed()
            .into_iter()
            .map(|(key, flags)| (key, flags.counts()))
            .collect()
    }

    /// Observations the rollup marks `Suspect` or `Fail`
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.rollup
            .iter()
            .enumerate()
            .filter(|(_, flag)| *flag >= Flag::Suspect)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Serialize for QcReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keyed = self.keyed();
        let mut map = serializer.serialize_map(Some(keyed.len() + 1))?;
        map.serialize_entry("variable", &self.variable)?;
        for (key, flags) in &keyed {
            map.serialize_entry(key, flags)?;
        }
        map.end()
    }
}
