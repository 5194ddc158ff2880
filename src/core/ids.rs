use crate::domain::model::{AccountId, DomainId, EndpointId, ScanId};
use uuid::Uuid;

/// Identifier types minted from random 128-bit values.
pub trait NewId: Sized {
    fn new_id() -> Self;
}

macro_rules! impl_new_id {
    ($($name:ident),*) => {
        $(
            impl NewId for $name {
                fn new_id() -> Self {
                    $name::from_uuid(Uuid::new_v4())
                }
            }
        )*
    };
}

impl_new_id!(AccountId, DomainId, ScanId, EndpointId);

pub fn new_id<T: NewId>() -> T {
    T::new_id()
}
