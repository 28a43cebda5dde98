use std::fmt;

use crate::token::ScopeToken;

/// Call origin presented with an access request.
///
/// Provenance is built by the accessing code itself, at the call site.
/// That is what makes it trustworthy: both variants carry a
/// [`ScopeToken`] by reference, and tokens cannot be fabricated, so a
/// caller can only ever present an origin it actually holds the
/// capability for.
#[derive(Clone, Copy)]
pub enum Provenance<'a> {
    /// Access from a declared method body.
    Method {
        /// Capability of the scope the method belongs to.
        token: &'a ScopeToken,
        /// Declared method name.
        method: &'a str,
    },
    /// Access from a constructing context, while the object is being
    /// initialized. May claim objects not yet bound to any scope.
    Constructor {
        /// Capability of the scope doing the constructing.
        token: &'a ScopeToken,
    },
}

impl<'a> Provenance<'a> {
    /// The token presented with this access.
    pub fn token(&self) -> &'a ScopeToken {
        match self {
            Self::Method { token, .. } => token,
            Self::Constructor { token } => token,
        }
    }

    /// The declared method name, for method accesses.
    pub fn method_name(&self) -> Option<&'a str> {
        match self {
            Self::Method { method, .. } => Some(method),
            Self::Constructor { .. } => None,
        }
    }

    /// True for constructor-context accesses.
    pub fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor { .. })
    }
}

impl fmt::Debug for Provenance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method { token, method } => {
                write!(f, "Provenance::Method({}.{})", token.label(), method)
            }
            Self::Constructor { token } => {
                write!(f, "Provenance::Constructor({})", token.label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::RegistryId;

    fn token() -> ScopeToken {
        ScopeToken::mint(&RegistryId::mint(), "Point").unwrap()
    }

    #[test]
    fn method_provenance_exposes_name_and_token() {
        let token = token();
        let provenance = Provenance::Method {
            token: &token,
            method: "get_x",
        };
        assert_eq!(provenance.method_name(), Some("get_x"));
        assert_eq!(provenance.token(), &token);
        assert!(!provenance.is_constructor());
    }

    #[test]
    fn constructor_provenance_has_no_method() {
        let token = token();
        let provenance = Provenance::Constructor { token: &token };
        assert_eq!(provenance.method_name(), None);
        assert!(provenance.is_constructor());
    }

    #[test]
    fn debug_is_compact() {
        let token = token();
        let provenance = Provenance::Method {
            token: &token,
            method: "set_x",
        };
        assert_eq!(
            format!("{:?}", provenance),
            "Provenance::Method(Point.set_x)"
        );
    }
}
