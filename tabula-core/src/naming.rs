use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// Bidirectional transform between field/type names and column/table names.
pub trait NameMapper: Send + Sync {
    /// Field or type name to column or table name.
    fn obj_to_table(&self, name: &str) -> String;
    /// Column or table name back to the field or type name.
    fn table_to_obj(&self, name: &str) -> String;
}

/// Leaves names untouched in both directions.
#[derive(Default, Debug, Clone, Copy)]
pub struct SameMapper;

impl NameMapper for SameMapper {
    fn obj_to_table(&self, name: &str) -> String {
        name.to_owned()
    }
    fn table_to_obj(&self, name: &str) -> String {
        name.to_owned()
    }
}

/// `UserName` <-> `user_name`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SnakeMapper;

impl NameMapper for SnakeMapper {
    fn obj_to_table(&self, name: &str) -> String {
        snake_cased(name)
    }
    fn table_to_obj(&self, name: &str) -> String {
        title_cased(name)
    }
}

/// An underscore is inserted before every upper-case letter except the first one met.
pub fn snake_cased(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut first = true;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if first {
                first = false;
            } else {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Underscores are dropped and the character following them is upper-cased, as is the
/// first character of the result.
pub fn title_cased(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Memoizes the results of another mapper.
#[derive(Default)]
pub struct CacheMapper<M: NameMapper> {
    mapper: M,
    to_table: RwLock<HashMap<String, String>>,
    to_obj: RwLock<HashMap<String, String>>,
}

impl<M: NameMapper> CacheMapper<M> {
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            to_table: Default::default(),
            to_obj: Default::default(),
        }
    }

    pub fn inner(&self) -> &M {
        &self.mapper
    }

    fn cached(
        cache: &RwLock<HashMap<String, String>>,
        name: &str,
        convert: impl FnOnce(&str) -> String,
    ) -> String {
        if let Some(v) = cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return v.clone();
        }
        let result = convert(name);
        cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), result.clone());
        result
    }
}

impl<M: NameMapper> NameMapper for CacheMapper<M> {
    fn obj_to_table(&self, name: &str) -> String {
        Self::cached(&self.to_table, name, |v| self.mapper.obj_to_table(v))
    }
    fn table_to_obj(&self, name: &str) -> String {
        Self::cached(&self.to_obj, name, |v| self.mapper.table_to_obj(v))
    }
}
