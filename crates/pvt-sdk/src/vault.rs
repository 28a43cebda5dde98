use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use pvt_gate::{AccessGate, AccessOutcome, GateConfig};
use pvt_registry::{Bucket, InMemoryStorageRegistry, StorageRegistry, TrackedHandle};
use pvt_types::{MethodId, Provenance, RegistryId, ScopeId, ScopeToken};

use crate::error::VaultResult;

/// One registry with one gate in front of it, exposed through
/// `Arc`-level calls so applications never build handles or provenance
/// values themselves.
///
/// A vault is self-contained. Construct several and they share nothing;
/// a token minted by one vault is foreign to every other.
pub struct Vault {
    registry: Arc<InMemoryStorageRegistry>,
    gate: AccessGate,
}

impl Vault {
    /// Create a vault with the strict default configuration.
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    /// Create a vault with an explicit gate configuration.
    pub fn with_config(config: GateConfig) -> Self {
        let registry = Arc::new(InMemoryStorageRegistry::new());
        let gate = AccessGate::new(registry.clone(), config);
        Self { registry, gate }
    }

    /// Identity of the underlying registry.
    pub fn registry_id(&self) -> RegistryId {
        self.registry.id()
    }

    /// The gate in front of the registry.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Mutable gate access, for appending custom checks to the
    /// pipeline.
    pub fn gate_mut(&mut self) -> &mut AccessGate {
        &mut self.gate
    }

    // ---- Scope operations ----

    /// Define a new scope and mint its capability token.
    ///
    /// The returned token is the only value that will ever open this
    /// scope's storage. Hold it inside the defining entity; hand it out
    /// only to code that should see private state.
    pub fn define_scope(&self, label: &str) -> VaultResult<ScopeToken> {
        let token = ScopeToken::mint(&self.registry.id(), label)?;
        debug!(scope = %token.scope(), label, "scope defined");
        Ok(token)
    }

    /// Declare a method of the token's scope, recording whether its
    /// body uses private storage.
    ///
    /// Declarations are write-once per method name.
    pub fn declare_method(
        &self,
        token: &ScopeToken,
        name: &str,
        uses_private: bool,
    ) -> VaultResult<MethodId> {
        Ok(self.gate.declare(token, name, uses_private)?)
    }

    // ---- Object operations ----

    /// Bind an object to the token's scope without opening its storage.
    ///
    /// Adoption is idempotent for the same scope and fails if the
    /// object already belongs to another.
    pub fn adopt<T: Any + Send + Sync>(
        &self,
        token: &ScopeToken,
        object: &Arc<T>,
    ) -> VaultResult<()> {
        Ok(self.registry.adopt(token, &TrackedHandle::of(object))?)
    }

    /// The scope an object is bound to, if any.
    pub fn binding_of<T: Any + Send + Sync>(&self, object: &Arc<T>) -> Option<ScopeId> {
        self.registry.binding_of(&TrackedHandle::of(object))
    }

    // ---- Access operations ----

    /// Open an object's private bucket from a constructing context.
    ///
    /// Claims the object for the token's scope if it is not yet bound,
    /// so a constructor body can seed fields before anything else has
    /// seen the object.
    pub fn open_constructor<T: Any + Send + Sync>(
        &self,
        token: &ScopeToken,
        object: &Arc<T>,
    ) -> VaultResult<Bucket> {
        let handle = TrackedHandle::of(object);
        Ok(self.gate.open(&handle, Provenance::Constructor { token })?)
    }

    /// Open an object's private bucket from a declared method body.
    pub fn open_method<T: Any + Send + Sync>(
        &self,
        token: &ScopeToken,
        method: &str,
        object: &Arc<T>,
    ) -> VaultResult<Bucket> {
        let handle = TrackedHandle::of(object);
        Ok(self.gate.open(&handle, Provenance::Method { token, method })?)
    }

    /// Evaluate a method access without fetching the bucket, returning
    /// the full verdict and per-check trail.
    ///
    /// Evaluation follows the same rules as [`Vault::open_method`],
    /// including claiming of unbound objects under lazy adoption.
    pub fn inspect_method<T: Any + Send + Sync>(
        &self,
        token: &ScopeToken,
        method: &str,
        object: &Arc<T>,
    ) -> AccessOutcome {
        let handle = TrackedHandle::of(object);
        self.gate
            .evaluate(&handle, Provenance::Method { token, method })
    }

    // ---- Maintenance ----

    /// Number of live objects the vault is tracking.
    pub fn tracked(&self) -> usize {
        self.registry.len()
    }

    /// Drop bookkeeping for objects that no longer exist. Returns the
    /// number of entries removed.
    pub fn purge(&self) -> usize {
        self.registry.purge()
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("registry", &self.registry.id())
            .field("tracked", &self.tracked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvt_types::DenialReason;
    use serde_json::{json, Value};

    struct Point;
    struct Profile;
    struct Counter;

    // -----------------------------------------------------------------------
    // 1. Literal style: one object, standalone accessors
    // -----------------------------------------------------------------------

    struct PointLiteral {
        vault: Vault,
        token: ScopeToken,
        object: Arc<Point>,
    }

    fn point_literal() -> PointLiteral {
        let vault = Vault::new();
        let token = vault.define_scope("point-literal").unwrap();
        vault.declare_method(&token, "get_x", true).unwrap();
        vault.declare_method(&token, "set_x", true).unwrap();
        let object = Arc::new(Point);
        vault.adopt(&token, &object).unwrap();
        PointLiteral {
            vault,
            token,
            object,
        }
    }

    fn get_x(p: &PointLiteral) -> Option<Value> {
        p.vault
            .open_method(&p.token, "get_x", &p.object)
            .unwrap()
            .get("x")
    }

    fn set_x(p: &PointLiteral, value: Value) {
        p.vault
            .open_method(&p.token, "set_x", &p.object)
            .unwrap()
            .set("x", value);
    }

    #[test]
    fn literal_accessors_share_hidden_state() {
        let p = point_literal();
        assert_eq!(get_x(&p), None);
        set_x(&p, json!(12));
        assert_eq!(get_x(&p), Some(json!(12)));
    }

    #[test]
    fn literal_state_is_closed_to_outsiders() {
        let p = point_literal();
        set_x(&p, json!(12));

        // An accessor nobody declared cannot reach the state.
        let err = p
            .vault
            .open_method(&p.token, "steal_x", &p.object)
            .unwrap_err();
        assert!(matches!(
            err.denial_reason(),
            Some(DenialReason::UndeclaredMethod { .. })
        ));

        // Neither can a different scope, even with its own declaration.
        let stranger = p.vault.define_scope("stranger").unwrap();
        p.vault.declare_method(&stranger, "get_x", true).unwrap();
        let err = p
            .vault
            .open_method(&stranger, "get_x", &p.object)
            .unwrap_err();
        assert!(matches!(
            err.denial_reason(),
            Some(DenialReason::ScopeMismatch { .. })
        ));

        assert_eq!(get_x(&p), Some(json!(12)));
    }

    // -----------------------------------------------------------------------
    // 2. Class style: a defining entity constructs and owns instances
    // -----------------------------------------------------------------------

    /// Holds the scope capability for `Profile` objects and seeds each
    /// instance's private state at construction.
    struct ProfileType {
        token: ScopeToken,
    }

    impl ProfileType {
        fn define(vault: &Vault) -> Self {
            let token = vault.define_scope("Profile").unwrap();
            vault.declare_method(&token, "age", true).unwrap();
            vault.declare_method(&token, "set_age", true).unwrap();
            vault.declare_method(&token, "birthday", true).unwrap();
            Self { token }
        }

        fn construct(&self, vault: &Vault) -> Arc<Profile> {
            let profile = Arc::new(Profile);
            let bucket = vault.open_constructor(&self.token, &profile).unwrap();
            bucket.set("age", json!(2));
            profile
        }

        fn age(&self, vault: &Vault, profile: &Arc<Profile>) -> Option<Value> {
            vault
                .open_method(&self.token, "age", profile)
                .unwrap()
                .get("age")
        }

        fn set_age(&self, vault: &Vault, profile: &Arc<Profile>, age: Value) {
            vault
                .open_method(&self.token, "set_age", profile)
                .unwrap()
                .set("age", age);
        }

        fn birthday(&self, vault: &Vault, profile: &Arc<Profile>) {
            let bucket = vault.open_method(&self.token, "birthday", profile).unwrap();
            let age = bucket.get("age").and_then(|v| v.as_i64()).unwrap_or(0);
            bucket.set("age", json!(age + 1));
        }
    }

    #[test]
    fn constructor_seeds_instance_state() {
        let vault = Vault::new();
        let profiles = ProfileType::define(&vault);
        let profile = profiles.construct(&vault);
        assert_eq!(profiles.age(&vault, &profile), Some(json!(2)));
        assert_eq!(vault.binding_of(&profile).as_ref(), Some(profiles.token.scope()));
    }

    #[test]
    fn methods_mutate_instance_state() {
        let vault = Vault::new();
        let profiles = ProfileType::define(&vault);
        let profile = profiles.construct(&vault);

        profiles.set_age(&vault, &profile, json!(30));
        profiles.birthday(&vault, &profile);
        assert_eq!(profiles.age(&vault, &profile), Some(json!(31)));
    }

    #[test]
    fn instances_do_not_share_state() {
        let vault = Vault::new();
        let profiles = ProfileType::define(&vault);
        let alice = profiles.construct(&vault);
        let bob = profiles.construct(&vault);

        profiles.set_age(&vault, &alice, json!(40));
        assert_eq!(profiles.age(&vault, &bob), Some(json!(2)));
    }

    // -----------------------------------------------------------------------
    // 3. Prototype style: one method set shared by adopted objects
    // -----------------------------------------------------------------------

    #[test]
    fn adopted_objects_join_a_shared_method_set() {
        let vault = Vault::new();
        let token = vault.define_scope("Counter").unwrap();
        vault.declare_method(&token, "increment", true).unwrap();
        vault.declare_method(&token, "value", true).unwrap();

        let increment = |counter: &Arc<Counter>| {
            let bucket = vault.open_method(&token, "increment", counter).unwrap();
            let count = bucket.get("count").and_then(|v| v.as_i64()).unwrap_or(0);
            bucket.set("count", json!(count + 1));
        };
        let value = |counter: &Arc<Counter>| {
            vault
                .open_method(&token, "value", counter)
                .unwrap()
                .get("count")
        };

        // Objects made elsewhere, adopted after the fact.
        let a = Arc::new(Counter);
        let b = Arc::new(Counter);
        vault.adopt(&token, &a).unwrap();
        vault.adopt(&token, &b).unwrap();

        increment(&a);
        increment(&a);
        increment(&b);

        assert_eq!(value(&a), Some(json!(2)));
        assert_eq!(value(&b), Some(json!(1)));
    }

    // -----------------------------------------------------------------------
    // 4. Vault boundaries
    // -----------------------------------------------------------------------

    #[test]
    fn vaults_are_mutually_foreign() {
        let home = Vault::new();
        let away = Vault::new();
        let token = home.define_scope("Point").unwrap();
        home.declare_method(&token, "get_x", true).unwrap();

        // The away vault refuses the foreign capability outright, for
        // declarations and accesses alike.
        let err = away.declare_method(&token, "get_x", true).unwrap_err();
        assert!(matches!(
            err.denial_reason(),
            Some(DenialReason::ForeignRegistry { .. })
        ));

        let object = Arc::new(Point);
        home.adopt(&token, &object).unwrap();

        let err = away.open_method(&token, "get_x", &object).unwrap_err();
        assert!(matches!(
            err.denial_reason(),
            Some(DenialReason::ForeignRegistry { .. })
        ));
        assert!(home.open_method(&token, "get_x", &object).is_ok());
    }

    #[test]
    fn define_scope_validates_labels() {
        let vault = Vault::new();
        assert!(vault.define_scope("two words").is_err());
        assert!(vault.define_scope("").is_err());
        assert!(vault.define_scope("Point").is_ok());
    }

    #[test]
    fn unbound_objects_are_refused_by_methods() {
        let vault = Vault::new();
        let token = vault.define_scope("Point").unwrap();
        vault.declare_method(&token, "get_x", true).unwrap();

        let object = Arc::new(Point);
        let err = vault.open_method(&token, "get_x", &object).unwrap_err();
        assert!(matches!(
            err.denial_reason(),
            Some(DenialReason::UnclaimedObject)
        ));
        assert_eq!(vault.binding_of(&object), None);
    }

    #[test]
    fn lazy_vault_claims_on_first_method_touch() {
        let vault = Vault::with_config(GateConfig::with_lazy_adoption());
        let token = vault.define_scope("Point").unwrap();
        vault.declare_method(&token, "get_x", true).unwrap();

        let object = Arc::new(Point);
        assert!(vault.open_method(&token, "get_x", &object).is_ok());
        assert_eq!(vault.binding_of(&object).as_ref(), Some(token.scope()));
    }

    // -----------------------------------------------------------------------
    // 5. Inspection and maintenance
    // -----------------------------------------------------------------------

    #[test]
    fn inspect_reports_the_check_trail() {
        let p = point_literal();
        let outcome = p.vault.inspect_method(&p.token, "get_x", &p.object);
        assert!(outcome.is_granted());

        let outcome = p.vault.inspect_method(&p.token, "undeclared", &p.object);
        assert!(!outcome.is_granted());
        assert!(matches!(
            outcome.denial_reason(),
            Some(DenialReason::UndeclaredMethod { .. })
        ));
    }

    #[test]
    fn purge_reclaims_dead_entries() {
        let vault = Vault::new();
        let token = vault.define_scope("Tmp").unwrap();
        let keep = Arc::new(Point);
        vault.adopt(&token, &keep).unwrap();
        {
            let gone = Arc::new(Point);
            vault.adopt(&token, &gone).unwrap();
            assert_eq!(vault.tracked(), 2);
        }
        assert_eq!(vault.tracked(), 1);
        assert_eq!(vault.purge(), 1);
        assert_eq!(vault.purge(), 0);
        drop(keep);
    }

    #[test]
    fn debug_shows_registry_and_count() {
        let vault = Vault::new();
        let debug = format!("{:?}", vault);
        assert!(debug.contains("Vault"));
        assert!(debug.contains("tracked: 0"));
    }
}
