/// Ordered HTTP header table.
///
/// Entries keep the order in which they were first inserted. Names are
/// stored exactly as received; no case normalization happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Inserts a header, or replaces the value of an entry with the exact
    /// same name while keeping its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Like [`set`](Self::set), but matches names ignoring ASCII case.
    ///
    /// The first matching entry is renamed to `key` and takes the value;
    /// any further matches are dropped.
    pub fn set_ignore_case(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter().position(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(first) => {
                let mut index = 0;
                self.entries.retain(|(k, _)| {
                    let keep = index <= first || !k.eq_ignore_ascii_case(&key);
                    index += 1;
                    keep
                });
                self.entries[first] = (key, value);
            }
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.set(k, v);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place() {
        let mut headers = Headers::new();
        headers.set("A", "1");
        headers.set("B", "2");
        headers.set("A", "3");

        let collected: Vec<_> = headers.iter().collect();
        assert_eq!(collected, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn set_ignore_case_replaces_every_spelling() {
        let mut headers = Headers::new();
        headers.set("content-length", "1");
        headers.set("X", "x");
        headers.set("CONTENT-LENGTH", "2");
        headers.set_ignore_case("Content-Length", "3");

        let collected: Vec<_> = headers.iter().collect();
        assert_eq!(collected, vec![("Content-Length", "3"), ("X", "x")]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut headers = Headers::new();
        headers.set("host", "a");
        headers.set("Host", "b");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("host"), Some("a"));
        assert_eq!(headers.get_ignore_case("HOST"), Some("a"));
    }
}
