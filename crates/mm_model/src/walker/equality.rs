use core::hash::{BuildHasher, Hash, Hasher};

use mm_utils::hash::{FixedHashState, FixedHasher};

use crate::Model;

/// Schema-driven equality.
///
/// Two models are equal when they have the same schema and every included
/// attribute is equal. Excluded attributes are ignored.
pub fn model_eq<T: Model>(a: &T, b: &T) -> bool {
    if core::ptr::eq(a, b) {
        return true;
    }
    let schema = a.model_schema();
    if !core::ptr::eq(schema, b.model_schema()) {
        return false;
    }
    schema.included().all(|attr| {
        match (a.attr(attr.index()), b.attr(attr.index())) {
            (Some(left), Some(right)) => left.dyn_eq(right),
            (None, None) => true,
            _ => false,
        }
    })
}

/// Feed the model's type name and included attributes into `state`.
pub fn hash_model_into<T: Model>(model: &T, state: &mut FixedHasher) {
    let schema = model.model_schema();
    schema.type_name().hash(state);
    for attr in schema.included() {
        if let Some(value) = model.attr(attr.index()) {
            value.dyn_hash(state);
        }
    }
}

/// A hash consistent with [`model_eq`].
///
/// The hasher is seeded with a fixed value, so hashes are stable for the
/// lifetime of the process.
pub fn model_hash<T: Model>(model: &T) -> u64 {
    let mut state = FixedHashState.build_hasher();
    hash_model_into(model, &mut state);
    state.finish()
}
