use indexmap::IndexMap;
use log::debug;
use crate::configuration::{Configuration, Flags};
use crate::error::{Error, Result};




/**
 * An ordered collection of build configurations, keyed by name. Iteration
 * follows registration order. Registering a name that is already present
 * replaces the earlier record but keeps its position.
 */
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, Configuration>,
}




// ============================================================================
impl Registry {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&Configuration> {
        self.entries.get(name)
    }

    pub fn register(&mut self, configuration: Configuration) {
        let name = configuration.name().to_string();

        if let Some(previous) = self.entries.insert(name, configuration) {
            debug!("replaced configuration {}", previous.name());
        }
    }

    pub fn add(&mut self, name: &str, flags: Flags) {
        self.register(Configuration::new(name, flags))
    }

    /**
     * Iterate over the configurations in registration order. The registry is
     * not consumed, so the sequence can be walked any number of times.
     */
    pub fn all(&self) -> impl Iterator<Item = &Configuration> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /**
     * Keep only the named configurations, preserving registration order.
     * Fails without modifying the registry if any name is not registered.
     */
    pub fn retain_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();

        if let Some(missing) = names.iter().find(|&&n| !self.entries.contains_key(n)) {
            return Err(Error::UnknownConfiguration(missing.to_string()));
        }
        self.entries.retain(|key, _| names.contains(&key.as_str()));
        Ok(())
    }
}

impl Extend<Configuration> for Registry {
    fn extend<I: IntoIterator<Item = Configuration>>(&mut self, iter: I) {
        for configuration in iter {
            self.register(configuration)
        }
    }
}

impl std::iter::FromIterator<Configuration> for Registry {
    fn from_iter<I: IntoIterator<Item = Configuration>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}
