//! Session-scoped registry assigning creation-order ids to templates

use crate::feature::Feature;
use crate::template::Template;

/// Ordered record of every template constructed within one session
///
/// Ids are zero-padded creation indices: the first registered template is
/// `"000"`, the next `"001"`, and so on. The registry is an explicit value
/// rather than process-wide state, so parallel experiments each get their own
/// id space and nothing leaks between training sessions.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True iff no templates have been registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Get a template by creation index
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// Iterate over templates in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    /// Remove and return the most recently registered template
    ///
    /// The undo operation for a registration that turned out to be unwanted.
    /// The next registration reuses the popped id.
    pub fn pop_last(&mut self) -> Option<Template> {
        self.templates.pop()
    }

    /// Register a template built from `features`, assigning the next id
    pub(crate) fn register(&mut self, features: Vec<Feature>) -> Template {
        let template = Template::with_id(format!("{:03}", self.templates.len()), features);
        self.templates.push(template.clone());
        template
    }
}

impl<'a> IntoIterator for &'a TemplateRegistry {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::feature::extractors::Tag;
    use pretty_assertions::assert_eq;

    fn tag_feature(positions: &[isize]) -> Feature {
        Feature::new(Arc::new(Tag), positions)
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let mut registry = TemplateRegistry::new();
        let first = registry.register(vec![tag_feature(&[0])]);
        let second = registry.register(vec![tag_feature(&[-1])]);

        assert_eq!(first.id(), "000");
        assert_eq!(second.id(), "001");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_pop_last_returns_most_recent() {
        let mut registry = TemplateRegistry::new();
        registry.register(vec![tag_feature(&[0])]);
        let last = registry.register(vec![tag_feature(&[-1])]);

        assert_eq!(registry.pop_last().as_ref(), Some(&last));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_pop_last_on_empty_registry() {
        let mut registry = TemplateRegistry::new();
        assert_eq!(registry.pop_last(), None);
    }

    #[test]
    fn test_register_after_pop_reuses_id() {
        let mut registry = TemplateRegistry::new();
        registry.register(vec![tag_feature(&[0])]);
        registry.pop_last();
        let replacement = registry.register(vec![tag_feature(&[1])]);
        assert_eq!(replacement.id(), "000");
    }
}
