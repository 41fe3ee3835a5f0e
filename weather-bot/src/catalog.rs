//! City catalog: the fixed, ordered list of places offered on the city keyboard.

/// Cities offered when `CITIES` is not set.
pub const DEFAULT_CITIES: [&str; 4] = ["Kazan", "Moscow", "London", "Hong Kong"];

/// Ordered, duplicate-free list of selectable place names. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCatalog {
    cities: Vec<String>,
}

impl CityCatalog {
    /// Builds a catalog, trimming names and dropping blanks and repeats (first occurrence wins).
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for city in cities {
            let city = city.as_ref().trim();
            if !city.is_empty() && !out.iter().any(|c| c == city) {
                out.push(city.to_string());
            }
        }
        Self { cities: out }
    }

    /// Parses a comma-separated list, e.g. `"Kazan, London"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.iter().any(|c| c == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES)
    }
}
