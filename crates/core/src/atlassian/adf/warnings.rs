//! Accumulates the names of constructs a conversion had to skip.

use std::collections::BTreeSet;

/// Set of unsupported element names seen during one conversion.
///
/// Adding the same name twice records it once. [`Warnings::finish`] emits the
/// names sorted, so output does not depend on the order nodes were visited.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Warnings {
    skipped: BTreeSet<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>) {
        self.skipped.insert(name.into());
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    /// Human-readable messages, one per distinct name, in sorted order.
    pub fn finish(self) -> Vec<String> {
        self.skipped
            .into_iter()
            .map(|name| format!("unsupported element: {name}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_empty() {
        assert!(Warnings::new().finish().is_empty());
    }

    #[test]
    fn test_finish_sorted_and_deduplicated() {
        // Arrange
        let mut warnings = Warnings::new();

        // Act
        for name in ["table", "rule", "panel", "table", "rule"] {
            warnings.add(name);
        }

        // Assert
        assert_eq!(warnings.len(), 3);
        assert_eq!(
            warnings.finish(),
            vec![
                "unsupported element: panel",
                "unsupported element: rule",
                "unsupported element: table",
            ]
        );
    }
}
