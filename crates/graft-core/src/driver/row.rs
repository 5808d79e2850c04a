use crate::stmt::Value;

/// One result row: values addressed by their column label.
///
/// Labels are the aliased names the SELECT assembly emitted
/// (`{alias}_{column}` in multi-table statements, bare column names
/// otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    labels: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(labels: Vec<String>, values: Vec<Value>) -> Self {
        assert_eq!(
            labels.len(),
            values.len(),
            "row labels and values must align"
        );
        Self { labels, values }
    }

    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, Value)>) -> Self {
        let (labels, values) = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, values }
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|i| &self.values[i])
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
