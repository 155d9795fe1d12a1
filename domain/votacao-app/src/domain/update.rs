use std::collections::BTreeMap;

/// A batch of writes applied to the store in a single request. Each entry
/// replaces the value at its path with a full vote history.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MultiPathUpdate {
    paths: BTreeMap<String, Vec<i64>>,
}

impl MultiPathUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: String, votes: Vec<i64>) {
        self.paths.insert(path, votes);
    }

    pub fn get(&self, path: &str) -> Option<&[i64]> {
        self.paths.get(path).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.paths
            .iter()
            .map(|(path, votes)| (path.as_str(), votes.as_slice()))
    }
}

impl FromIterator<(String, Vec<i64>)> for MultiPathUpdate {
    fn from_iter<I: IntoIterator<Item = (String, Vec<i64>)>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}
