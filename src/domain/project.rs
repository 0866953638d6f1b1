#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub identifier: Option<String>,
}

impl Project {
    /// Name matches case-insensitively; a numeric query also matches the id,
    /// and the identifier is accepted as a fallback.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if self.name.to_lowercase() == query.to_lowercase() {
            return true;
        }
        if query.parse::<u64>().is_ok_and(|id| id == self.id) {
            return true;
        }
        self.identifier
            .as_deref()
            .is_some_and(|identifier| identifier.eq_ignore_ascii_case(query))
    }
}
