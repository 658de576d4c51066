use std::collections::BTreeMap;

use sea_orm::IdenStatic;

use crate::entity_meta::TenantAware;

/// Static metadata describing one registered entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    table: String,
    tenant_column: Option<String>,
}

impl EntityDescriptor {
    /// Captures the descriptor of entity type `E`.
    #[must_use]
    pub fn of<E: TenantAware>() -> Self {
        Self {
            table: E::default().table_name().to_owned(),
            tenant_column: E::tenant_column().map(|c| c.as_str().to_owned()),
        }
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn tenant_column(&self) -> Option<&str> {
        self.tenant_column.as_deref()
    }

    #[must_use]
    pub fn is_tenant_scoped(&self) -> bool {
        self.tenant_column.is_some()
    }
}

/// Immutable roster of the entities known to the access layer.
///
/// Modules contribute their entities once at startup; afterwards every
/// lookup is a constant-time map probe, with no per-query reflection.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entries: BTreeMap<String, EntityDescriptor>,
}

impl EntityRegistry {
    #[must_use]
    pub fn builder() -> EntityRegistryBuilder {
        EntityRegistryBuilder::default()
    }

    /// Whether the given table carries a tenant column.
    ///
    /// Unknown tables report `false`. Deployments that want a hard
    /// guarantee call [`Self::expect_registered`] for every served table
    /// during startup, turning a forgotten registration into a boot
    /// failure instead of a silent pass-through.
    #[must_use]
    pub fn has_tenant_field(&self, table: &str) -> bool {
        self.entries
            .get(table)
            .is_some_and(EntityDescriptor::is_tenant_scoped)
    }

    #[must_use]
    pub fn descriptor(&self, table: &str) -> Option<&EntityDescriptor> {
        self.entries.get(table)
    }

    /// Asserts that `table` was registered.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unregistered`] when the table is unknown.
    pub fn expect_registered(&self, table: &str) -> Result<&EntityDescriptor, RegistryError> {
        self.entries
            .get(table)
            .ok_or_else(|| RegistryError::Unregistered {
                table: table.to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects entity registrations during startup.
#[derive(Debug, Default)]
pub struct EntityRegistryBuilder {
    entries: BTreeMap<String, EntityDescriptor>,
    duplicate: Option<String>,
}

impl EntityRegistryBuilder {
    /// Registers entity `E`. Registering the same table twice is reported
    /// when [`Self::build`] runs.
    #[must_use]
    pub fn register<E: TenantAware>(mut self) -> Self {
        let descriptor = EntityDescriptor::of::<E>();
        let table = descriptor.table().to_owned();
        if self.entries.insert(table.clone(), descriptor).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(table);
        }
        self
    }

    /// Finalizes the roster.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when two registrations named
    /// the same table.
    pub fn build(self) -> Result<EntityRegistry, RegistryError> {
        if let Some(table) = self.duplicate {
            return Err(RegistryError::Duplicate { table });
        }
        tracing::debug!(entities = self.entries.len(), "entity registry built");
        Ok(EntityRegistry {
            entries: self.entries,
        })
    }
}

/// Problems with the entity roster itself.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// A table was required that no module registered.
    #[error("table `{table}` is not registered with the access layer")]
    Unregistered { table: String },

    /// Two registrations claimed the same table name.
    #[error("table `{table}` was registered more than once")]
    Duplicate { table: String },
}
