//! Instance pool
//!
//! One pre-instantiated content object and one anchor per registered
//! descriptor. The pool is filled once by [`InstancePool::preload`] and its
//! size never changes afterwards; instances are shown and hidden, never
//! recreated.

mod content;
mod instance;

pub use content::{ContentFactory, ContentObject, InstantiationError};
pub use instance::{Anchor, Instance, Visibility};

use hashbrown::HashMap;

use crate::math::LocalTransform;
use crate::registry::ContentRegistry;

/// Fixed arena of instances addressed by marker id
#[derive(Default)]
pub struct InstancePool {
    instances: Vec<Instance>,
    index: HashMap<String, usize>,
}

impl InstancePool {
    /// Instantiate every descriptor in `registry`.
    ///
    /// A descriptor whose content cannot be created is logged and left out;
    /// the remaining descriptors are still loaded.
    pub fn preload(
        registry: &ContentRegistry,
        factory: &mut dyn ContentFactory,
        local: &LocalTransform,
    ) -> Self {
        let mut pool = Self {
            instances: Vec::with_capacity(registry.len()),
            index: HashMap::with_capacity(registry.len()),
        };

        for descriptor in registry.iter() {
            match factory.instantiate(descriptor) {
                Ok(content) => {
                    let instance = Instance::new(descriptor.id.clone(), content, local);
                    pool.index.insert(descriptor.id.clone(), pool.instances.len());
                    pool.instances.push(instance);
                }
                Err(e) => {
                    tracing::warn!(
                        id = %descriptor.id,
                        template = %descriptor.template,
                        error = %e,
                        "Failed to instantiate content, marker will have no content"
                    );
                }
            }
        }

        tracing::info!(
            loaded = pool.instances.len(),
            registered = registry.len(),
            "Instance pool preloaded"
        );
        pool
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Instance> {
        self.index.get(id).map(|&slot| &self.instances[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Instance> {
        let slot = *self.index.get(id)?;
        self.instances.get_mut(slot)
    }

    /// Instances in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Instance> {
        self.instances.iter_mut()
    }
}

impl std::fmt::Debug for InstancePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstancePool")
            .field("instances", &self.instances)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ContentDescriptor;
    use tether_types::{ContentEntry, DuplicatePolicy};

    struct NullContent;

    impl ContentObject for NullContent {
        fn set_enabled(&mut self, _enabled: bool) {}
        fn set_local_transform(&mut self, _transform: &LocalTransform) {}
    }

    /// Fails for any template starting with "broken"
    struct PickyFactory;

    impl ContentFactory for PickyFactory {
        fn instantiate(
            &mut self,
            descriptor: &ContentDescriptor,
        ) -> Result<Box<dyn ContentObject>, InstantiationError> {
            if descriptor.template.as_str().starts_with("broken") {
                return Err(InstantiationError::new(&descriptor.template, "asset not found"));
            }
            Ok(Box::new(NullContent))
        }
    }

    fn registry(entries: &[(&str, &str)]) -> ContentRegistry {
        let entries: Vec<_> = entries
            .iter()
            .map(|(id, template)| ContentEntry::new(*id, *template))
            .collect();
        ContentRegistry::build(&entries, DuplicatePolicy::Overwrite)
    }

    #[test]
    fn test_preload_creates_one_hidden_instance_per_descriptor() {
        let registry = registry(&[("qr1", "robot"), ("qr2", "plant")]);
        let pool = InstancePool::preload(&registry, &mut PickyFactory, &LocalTransform::IDENTITY);

        assert_eq!(pool.len(), 2);
        for instance in pool.iter() {
            assert_eq!(instance.visibility(), Visibility::Hidden);
        }
    }

    #[test]
    fn test_failed_instantiation_leaves_id_absent() {
        let registry = registry(&[("qr1", "robot"), ("qr2", "broken.glb"), ("qr3", "plant")]);
        let pool = InstancePool::preload(&registry, &mut PickyFactory, &LocalTransform::IDENTITY);

        assert_eq!(pool.len(), 2);
        assert!(pool.contains("qr1"));
        assert!(!pool.contains("qr2"));
        assert!(pool.contains("qr3"));
        let ids: Vec<_> = pool.iter().map(Instance::id).collect();
        assert_eq!(ids, vec!["qr1", "qr3"]);
    }
}
