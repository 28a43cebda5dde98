use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use pvt_types::{validate_method_name, MethodDecl, MethodId, ScopeId, ScopeToken};

use crate::error::{GateError, GateResult};

/// Write-once table of method declarations.
///
/// Whether a method uses private storage is recorded here exactly once,
/// when the defining entity is set up. At call time the gate consults the
/// recorded verdict; nothing is ever inferred from the caller.
///
/// Declaring requires the scope's [`ScopeToken`], so only the holder of a
/// scope's capability can describe that scope's methods.
pub struct DeclarationTable {
    methods: RwLock<HashMap<MethodId, MethodDecl>>,
}

impl DeclarationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            methods: RwLock::new(HashMap::new()),
        }
    }

    /// Record whether `name` in the token's scope uses private storage.
    ///
    /// Re-declaring with the same flag is idempotent. Re-declaring with a
    /// different flag fails with `DeclarationConflict` and leaves the
    /// original verdict in place.
    pub fn declare(
        &self,
        token: &ScopeToken,
        name: &str,
        uses_private: bool,
    ) -> GateResult<MethodId> {
        validate_method_name(name)?;
        let decl = MethodDecl::new(token.scope().clone(), name, uses_private);
        let id = decl.id.clone();

        let mut map = self.methods.write().expect("lock poisoned");
        match map.get(&id) {
            Some(existing) if existing.uses_private == uses_private => Ok(id),
            Some(_) => Err(GateError::DeclarationConflict {
                scope: token.scope().clone(),
                method: name.to_string(),
            }),
            None => {
                debug!(method = %id, name, uses_private, "method declared");
                map.insert(id.clone(), decl);
                Ok(id)
            }
        }
    }

    /// The recorded private-use verdict for `name` in `scope`.
    ///
    /// Undeclared methods answer `None`; the gate treats that as not
    /// using private storage.
    pub fn verdict(&self, scope: &ScopeId, name: &str) -> Option<bool> {
        let id = MethodId::derive(scope, name);
        let map = self.methods.read().expect("lock poisoned");
        map.get(&id).map(|decl| decl.uses_private)
    }

    /// Whether `name` in `scope` uses private storage.
    ///
    /// Coarse form of [`DeclarationTable::verdict`]: undeclared methods
    /// classify as `false`.
    pub fn classify(&self, scope: &ScopeId, name: &str) -> bool {
        self.verdict(scope, name).unwrap_or(false)
    }

    /// The full declaration for `name` in `scope`, if any.
    pub fn get(&self, scope: &ScopeId, name: &str) -> Option<MethodDecl> {
        let id = MethodId::derive(scope, name);
        let map = self.methods.read().expect("lock poisoned");
        map.get(&id).cloned()
    }

    /// All declarations for `scope`, sorted by method name.
    pub fn declared_for(&self, scope: &ScopeId) -> Vec<MethodDecl> {
        let map = self.methods.read().expect("lock poisoned");
        let mut decls: Vec<MethodDecl> = map
            .values()
            .filter(|decl| &decl.scope == scope)
            .cloned()
            .collect();
        decls.sort_by(|a, b| a.name.cmp(&b.name));
        decls
    }

    /// Number of recorded declarations.
    pub fn len(&self) -> usize {
        self.methods.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.methods.read().expect("lock poisoned").is_empty()
    }
}

impl Default for DeclarationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DeclarationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclarationTable")
            .field("declaration_count", &self.len())
            .finish()
    }
}
