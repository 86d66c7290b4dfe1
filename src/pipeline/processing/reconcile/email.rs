use std::collections::HashSet;

/// Per-run registry of generated email addresses.
///
/// The first `first.surname` address is used as-is; later collisions get a
/// numeric suffix on the local part, starting at 2 and counting up until the
/// exact address is unused.
#[derive(Debug)]
pub struct EmailRegistry {
    domain: String,
    used: HashSet<String>,
    suffixed: usize,
}

impl EmailRegistry {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            used: HashSet::new(),
            suffixed: 0,
        }
    }

    /// Generate, reserve and return a unique address for this name
    pub fn assign(&mut self, first_name: &str, surname: &str) -> String {
        let mut candidate = self.address(first_name, surname, None);
        let mut suffix = 2u32;

        while self.used.contains(&candidate) {
            candidate = self.address(first_name, surname, Some(suffix));
            suffix += 1;
        }

        if suffix > 2 {
            self.suffixed += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }

    /// Number of addresses that needed a suffix
    pub fn suffixed(&self) -> usize {
        self.suffixed
    }

    fn address(&self, first_name: &str, surname: &str, suffix: Option<u32>) -> String {
        match suffix {
            Some(n) => format!("{}.{}{}@{}", first_name, surname, n, self.domain),
            None => format!("{}.{}@{}", first_name, surname, self.domain),
        }
    }
}
