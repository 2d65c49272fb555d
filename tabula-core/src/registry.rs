use crate::{Mapped, NameMapper, Result, Table, map_type};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

/// Cache of the tables mapped from record types.
#[derive(Default, Debug)]
pub struct TableRegistry {
    tables: RwLock<HashMap<TypeId, Arc<Table>>>,
}

static GLOBAL: LazyLock<TableRegistry> = LazyLock::new(TableRegistry::default);

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process wide registry.
    pub fn global() -> &'static TableRegistry {
        &GLOBAL
    }

    pub fn get<T: 'static>(&self) -> Option<Arc<Table>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
    }

    /// Returns the cached table of `T`, mapping it on first use.
    ///
    /// The write lock is held from the second lookup to the insertion, concurrent first uses
    /// map the type only once.
    pub fn get_or_map<T: Mapped + 'static>(&self, mapper: &dyn NameMapper) -> Result<Arc<Table>> {
        if let Some(table) = self.get::<T>() {
            return Ok(table);
        }
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(&TypeId::of::<T>()) {
            return Ok(table.clone());
        }
        let table = Arc::new(map_type::<T>(mapper)?);
        log::trace!("Registered table `{}`", table.name);
        tables.insert(TypeId::of::<T>(), table.clone());
        Ok(table)
    }

    /// Maps `T` again, replacing any cached table.
    pub fn map<T: Mapped + 'static>(&self, mapper: &dyn NameMapper) -> Result<Arc<Table>> {
        let table = Arc::new(map_type::<T>(mapper)?);
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), table.clone());
        Ok(table)
    }

    /// Forgets the table of `T`, returns whether it was cached.
    pub fn unmap<T: 'static>(&self) -> bool {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&TypeId::of::<T>())
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
