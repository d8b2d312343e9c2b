//! Process-wide table mapping primitive type identities to type codes.

use crate::error::{CodecError, CodecResult};
use crate::primitive::PrimitiveKind;
use crate::type_code::TypeCode;
use parking_lot::{Once, OnceState, RwLock};
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The runtime identity of a Rust type, as used for registry lookups.
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// Returns the identity of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the type's name, for diagnostics only.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeIdentity").field(&self.name).finish()
    }
}

static GLOBAL: TypeRegistry = TypeRegistry::new();

/// An ordered set of `(type identity, type code)` pairs.
///
/// The table is populated exactly once, by whichever thread first calls
/// [`TypeRegistry::register_known_types`]. Threads arriving while the build
/// runs block until it has finished, so no lookup ever sees a partial table.
/// Lookups populate the table themselves if nobody has yet.
///
/// Most callers want [`TypeRegistry::global`]; separate instances exist so
/// initialization can be exercised in isolation.
pub struct TypeRegistry {
    init: Once,
    entries: RwLock<Vec<(TypeIdentity, TypeCode)>>,
}

impl TypeRegistry {
    /// Creates an empty, unpopulated registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            init: Once::new(),
            entries: parking_lot::const_rwlock(Vec::new()),
        }
    }

    /// Returns the process-wide registry, populating it on first use.
    pub fn global() -> &'static Self {
        GLOBAL.register_known_types();
        &GLOBAL
    }

    /// Populates the table with every [`PrimitiveKind`]. Idempotent.
    pub fn register_known_types(&self) {
        self.init.call_once(|| {
            let mut entries = self.entries.write();
            entries.reserve_exact(PrimitiveKind::ALL.len());
            for kind in PrimitiveKind::ALL {
                entries.push((
                    TypeIdentity {
                        id: kind.type_id(),
                        name: kind.name(),
                    },
                    kind.code(),
                ));
            }
            tracing::debug!(types = entries.len(), "type registry populated");
        });
    }

    /// Returns true once the table has been populated.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.init.state() == OnceState::Done
    }

    /// Returns the type code registered for `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeNotFound`] if the type is not registered.
    pub fn code_for(&self, identity: TypeIdentity) -> CodecResult<TypeCode> {
        self.register_known_types();
        self.entries
            .read()
            .iter()
            .find(|(registered, _)| *registered == identity)
            .map(|(_, code)| *code)
            .ok_or_else(|| CodecError::type_not_found(identity.name()))
    }

    /// Returns the type code registered for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeNotFound`] if `T` is not registered.
    pub fn code_of<T: ?Sized + 'static>(&self) -> CodecResult<TypeCode> {
        self.code_for(TypeIdentity::of::<T>())
    }

    /// Returns the kind registered under `code`, if any.
    #[must_use]
    pub fn kind_for(&self, code: TypeCode) -> Option<PrimitiveKind> {
        self.register_known_types();
        self.entries
            .read()
            .iter()
            .any(|(_, registered)| *registered == code)
            .then(|| PrimitiveKind::from_code(code))
            .flatten()
    }

    /// Returns a copy of the table in registration order.
    #[must_use]
    pub fn entries(&self) -> Vec<(TypeIdentity, TypeCode)> {
        self.entries.read().clone()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("initialized", &self.is_initialized())
            .field("entries", &*self.entries.read())
            .finish()
    }
}
