//! Table construction arguments
//!
//! The host passes module name, database name and table name first; the
//! table's own positional configuration follows.

/// Positional construction arguments of one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableArgs {
    module: String,
    database: String,
    table: String,
    positional: Vec<String>,
}

impl TableArgs {
    /// Splits a raw host argument list. Surrounding quotes are stripped
    /// from the positional arguments.
    pub fn from_host<S: AsRef<str>>(args: &[S]) -> Self {
        let header = |i: usize| args.get(i).map(|s| s.as_ref().to_string()).unwrap_or_default();
        Self {
            module: header(0),
            database: header(1),
            table: header(2),
            positional: args
                .iter()
                .skip(3)
                .map(|s| unquote(s.as_ref()).to_string())
                .collect(),
        }
    }

    /// Builds arguments from positional configuration only
    pub fn positional<S: AsRef<str>>(args: &[S]) -> Self {
        Self {
            positional: args.iter().map(|s| unquote(s.as_ref()).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Positional argument `i`, `None` when missing or blank
    pub fn get(&self, i: usize) -> Option<&str> {
        self.positional
            .get(i)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }
}

/// Trims whitespace and one pair of matching single or double quotes
pub fn unquote(s: &str) -> &str {
    let s = s.trim();
    for q in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return s[1..s.len() - 1].trim();
        }
    }
    s
}
