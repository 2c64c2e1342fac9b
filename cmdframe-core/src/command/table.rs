use std::collections::HashMap;

use anyhow::bail;

/// The host environment's command table. Each live identifier is exported here once the
/// registry is built, so that the host can route matching input back to the dispatcher.
pub trait CommandTable {
    /// Makes `label` reachable, owned by the application called `namespace`.
    fn register(&mut self, namespace: &str, label: &str) -> anyhow::Result<()>;
}

/// A command table kept in memory, the way a server's command map behaves.
///
/// Every label is reachable as `namespace:label`. The bare label is claimed by whichever
/// namespace registers it first.
#[derive(Debug, Default)]
pub struct InMemoryCommandTable {
    /// lower-cased route -> (namespace, label)
    routes: HashMap<String, (String, String)>,
}

impl InMemoryCommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps user input (`label` or `namespace:label`, any case) to the registered label.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        self.routes
            .get(&input.to_lowercase())
            .map(|(_, label)| label.as_str())
    }

    /// The namespace that owns the route `input`.
    pub fn owner(&self, input: &str) -> Option<&str> {
        self.routes
            .get(&input.to_lowercase())
            .map(|(namespace, _)| namespace.as_str())
    }

    /// Every route, namespaced forms included, sorted.
    pub fn routes(&self) -> Vec<&str> {
        let mut routes = self.routes.keys().map(String::as_str).collect::<Vec<_>>();
        routes.sort_unstable();
        routes
    }
}

impl CommandTable for InMemoryCommandTable {
    fn register(&mut self, namespace: &str, label: &str) -> anyhow::Result<()> {
        if namespace.is_empty() || namespace.contains(char::is_whitespace) {
            bail!("invalid namespace '{namespace}'");
        }
        if label.is_empty() || label.contains(char::is_whitespace) {
            bail!("invalid command label '{label}'");
        }

        let entry = (namespace.to_owned(), label.to_owned());
        let namespaced = format!("{namespace}:{label}").to_lowercase();
        if let Some((owner, _)) = self.routes.get(&namespaced)
            && owner != namespace
        {
            bail!("'{namespaced}' is already registered by '{owner}'");
        }
        self.routes.insert(namespaced, entry.clone());

        self.routes.entry(label.to_lowercase()).or_insert(entry);

        Ok(())
    }
}
