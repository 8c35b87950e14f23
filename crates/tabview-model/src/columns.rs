use std::collections::HashSet;

/// Ordered list of unique column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColumnNames(Vec<String>);

impl ColumnNames {
    /// Builds a column list from raw header cells.
    ///
    /// Blank names become `column_<n>` (1-based position) and repeated names
    /// get `_1`, `_2`, ... suffixes so the result stays unique.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut names = Vec::new();
        for (idx, raw) in headers.into_iter().enumerate() {
            let raw = raw.as_ref();
            let base = if raw.trim().is_empty() {
                format!("column_{}", idx + 1)
            } else {
                raw.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 1usize;
            while seen.contains(&name) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            names.push(name);
        }
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|column| column == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|column| column == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for ColumnNames {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_headers(iter)
    }
}

impl<'a> IntoIterator for &'a ColumnNames {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
