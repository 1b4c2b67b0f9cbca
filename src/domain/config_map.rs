/// Flat string-to-string mapping backing one INI file.
///
/// Keys are unique. Iteration follows insertion order so a written file
/// lists entries in the order callers set them; overwriting a key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: Vec<(String, String)>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`, returning the previous value if one existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place_and_keeps_order() {
        let mut map = ConfigMap::new();
        map.set("FFTpoints", "1024");
        map.set("BandwidthHz", "16000000");

        let previous = map.set("FFTpoints", "2048");

        assert_eq!(previous.as_deref(), Some("1024"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["FFTpoints", "BandwidthHz"]);
        assert_eq!(map.get("FFTpoints"), Some("2048"));
    }

    #[test]
    fn remove_drops_entry() {
        let mut map: ConfigMap = [("A", "1"), ("B", "2")].into_iter().collect();

        assert_eq!(map.remove("A").as_deref(), Some("1"));
        assert!(!map.contains_key("A"));
        assert_eq!(map.remove("A"), None);
        assert_eq!(map.len(), 1);
    }
}
