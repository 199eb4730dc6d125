use crate::config::GridConfig;

/// The resolved, ordered list of grid columns.
///
/// Order is the configured left status-group columns, then the caller's data
/// columns, then the system columns. Prefix and suffix entries the caller
/// already lists are not repeated. Column indices of cell positions refer to
/// this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<String>,
}

impl ColumnLayout {
    pub fn resolve(data_columns: &[String], config: &GridConfig) -> Self {
        let is_data = |c: &String| data_columns.contains(c);
        let columns = config
            .left_columns
            .iter()
            .filter(|c| !is_data(c))
            .chain(data_columns.iter())
            .chain(config.system_columns.iter().filter(|c| !is_data(c)))
            .cloned()
            .collect();
        Self { columns }
    }

    pub fn get(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.columns
    }
}
