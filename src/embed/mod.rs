//! Embedded-entry dispatch.
//!
//! CMS authors can inline other structured records into a document, for
//! example a timer widget inside a preparation step. What a "timer" looks
//! like is the hosting application's business: the host registers one
//! resolver per content type and the converter dispatches to it by the
//! entry's discriminator. Unregistered types degrade to a generic
//! placeholder fragment at the converter, never an error.

use crate::render::Fragment;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Host-supplied function turning an entry's opaque fields into a fragment.
///
/// Resolvers are shared between concurrent render calls; the engine makes
/// no assumption beyond `Send + Sync` about their internals.
pub type EntryResolver = Arc<dyn Fn(&Map<String, Value>) -> Fragment + Send + Sync>;

/// Registry mapping content-type ids to resolvers.
#[derive(Clone, Default)]
pub struct EntryRegistry {
    resolvers: HashMap<String, EntryResolver>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for a content type, replacing any previous one.
    pub fn register(&mut self, content_type_id: impl Into<String>, resolver: EntryResolver) {
        self.resolvers.insert(content_type_id.into(), resolver);
    }

    pub fn contains(&self, content_type_id: &str) -> bool {
        self.resolvers.contains_key(content_type_id)
    }

    /// Resolve an entry to a fragment, or `None` if no resolver is
    /// registered for its content type.
    pub fn resolve(
        &self,
        content_type_id: &str,
        fields: &Map<String, Value>,
    ) -> Option<Fragment> {
        self.resolvers
            .get(content_type_id)
            .map(|resolver| resolver(fields))
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }
}

impl fmt::Debug for EntryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRegistry")
            .field("content_types", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn timer_resolver() -> EntryResolver {
        Arc::new(|fields| {
            let duration = fields.get("duration").and_then(Value::as_u64).unwrap_or(0);
            let step = fields.get("stepNumber").and_then(Value::as_u64);
            let label = match step {
                Some(step) => format!("Timer: {duration}s (step {step})"),
                None => format!("Timer: {duration}s"),
            };
            Fragment::text(label)
        })
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = EntryRegistry::new();
        registry.register("timer", timer_resolver());

        assert!(registry.contains("timer"));
        assert_eq!(registry.len(), 1);

        let fields = json!({"duration": 300, "stepNumber": 2});
        let fragment = registry
            .resolve("timer", fields.as_object().unwrap())
            .unwrap();
        assert_eq!(fragment, Fragment::text("Timer: 300s (step 2)"));
    }

    #[test]
    fn test_unregistered_type() {
        let registry = EntryRegistry::new();
        assert!(!registry.contains("timer"));
        assert!(registry.resolve("timer", &Map::new()).is_none());
    }

    #[test]
    fn test_replacing_resolver() {
        let mut registry = EntryRegistry::new();
        registry.register("timer", timer_resolver());
        registry.register("timer", Arc::new(|_| Fragment::text("replaced")));

        let fragment = registry.resolve("timer", &Map::new()).unwrap();
        assert_eq!(fragment, Fragment::text("replaced"));
        assert_eq!(registry.len(), 1);
    }
}
