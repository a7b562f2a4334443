//! Exact-match template map resolver

use crate::resolver::{Resolver, ResolverError, TemplateSource};

/// Resolves template names through a fixed name -> source table, kept in
/// insertion order
#[derive(Debug, Clone, Default)]
pub struct TemplateMapResolver {
    entries: Vec<(String, TemplateSource)>,
}

impl TemplateMapResolver {
    /// Create a resolver from an initial set of name/source pairs
    pub fn new<I, K, V>(map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TemplateSource>,
    {
        let mut resolver = Self::default();
        resolver.merge(map);
        resolver
    }

    /// Add or replace a single entry
    pub fn add<K: Into<String>, V: Into<TemplateSource>>(&mut self, name: K, source: V) -> &mut Self {
        let name = name.into();
        let source = source.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = source,
            None => self.entries.push((name, source)),
        }
        self
    }

    /// Remove an entry, returning its source if it was mapped
    pub fn remove(&mut self, name: &str) -> Option<TemplateSource> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Merge entries into the map; incoming entries win
    pub fn merge<I, K, V>(&mut self, map: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TemplateSource>,
    {
        for (name, source) in map {
            self.add(name, source);
        }
        self
    }

    /// Replace the whole map
    pub fn set_map<I, K, V>(&mut self, map: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TemplateSource>,
    {
        self.entries.clear();
        self.merge(map)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&TemplateSource> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, source)| source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateSource)> {
        self.entries.iter().map(|(name, source)| (name.as_str(), source))
    }
}

impl<K: Into<String>, V: Into<TemplateSource>> FromIterator<(K, V)> for TemplateMapResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Resolver for TemplateMapResolver {
    fn resolve(&self, name: &str) -> Result<Option<TemplateSource>, ResolverError> {
        Ok(self.get(name).cloned())
    }

    fn kind(&self) -> &'static str {
        "template_map"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_exact_matches_only() {
        let resolver = TemplateMapResolver::new([("foo", "bar")]);

        assert_eq!(
            resolver.resolve("foo").unwrap(),
            Some(TemplateSource::from("bar"))
        );
        assert_eq!(resolver.resolve("fo").unwrap(), None);
        assert_eq!(resolver.resolve("FOO").unwrap(), None);
    }

    #[test]
    fn test_empty_by_default() {
        let resolver = TemplateMapResolver::default();
        assert!(resolver.is_empty());
        assert_eq!(resolver.resolve("anything").unwrap(), None);
    }

    #[test]
    fn test_add_merge_and_remove() {
        let mut resolver = TemplateMapResolver::new([("foo", "one")]);
        resolver
            .add("bar", TemplateSource::inline("inline"))
            .merge([("foo", "two"), ("baz", "three")]);

        assert_eq!(resolver.len(), 3);
        assert_eq!(resolver.get("foo"), Some(&TemplateSource::from("two")));
        assert_eq!(resolver.get("bar"), Some(&TemplateSource::inline("inline")));

        assert_eq!(resolver.remove("baz"), Some(TemplateSource::from("three")));
        assert!(!resolver.has("baz"));
    }

    #[test]
    fn test_set_map_replaces_entries() {
        let mut resolver = TemplateMapResolver::new([("foo", "one"), ("bar", "two")]);
        resolver.set_map([("baz", "three")]);

        assert_eq!(resolver.len(), 1);
        assert!(!resolver.has("foo"));
        assert!(resolver.has("baz"));
    }

    #[test]
    fn test_collects_from_iterator() {
        let resolver: TemplateMapResolver = vec![("a".to_string(), "a.html".to_string())]
            .into_iter()
            .collect();
        assert!(resolver.has("a"));
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut resolver = TemplateMapResolver::new([("zeta", "z"), ("alpha", "a"), ("mid", "m")]);
        resolver.add("alpha", "a2").add("omega", "o");
        resolver.remove("mid");

        let names: Vec<_> = resolver.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "omega"]);
        assert_eq!(resolver.get("alpha"), Some(&TemplateSource::from("a2")));
    }
}
