use std::collections::HashSet;

/// Names the user already has in stock, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlreadyHave {
    names: HashSet<String>,
}

impl AlreadyHave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let have = AlreadyHave::from_names(["Olive Oil", "  SALT "]);
        assert!(have.contains("olive oil"));
        assert!(have.contains("Salt"));
        assert!(!have.contains("pepper"));
        assert_eq!(have.len(), 2);
    }
}
