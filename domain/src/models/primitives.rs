use std::marker::PhantomData;

use uuid::Uuid;

use macros::DomainPrimitive;

use crate::{DomainError, DomainResult};

/// エンティティID
///
/// UUID v4でエンティティを識別するIDを表現する。
/// `PhantomData`でエンティティの型を識別する。
#[derive(Debug, DomainPrimitive)]
pub struct EntityId<T> {
    #[value_getter(ret = "val")]
    value: Uuid,
    _phantom: PhantomData<T>,
}

impl<T> EntityId<T> {
    pub fn new(value: Uuid) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> TryFrom<&'a str> for EntityId<T> {
    type Error = DomainError;

    fn try_from(s: &str) -> DomainResult<Self> {
        match Uuid::parse_str(s) {
            Ok(value) => Ok(Self::new(value)),
            Err(_) => Err(DomainError::validation()
                .with_message("文字列の形式がUUIDv4形式でありません。")),
        }
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl<T> std::fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> std::hash::Hash for EntityId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
