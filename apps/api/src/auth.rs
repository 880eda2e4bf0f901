//! Credential check — pluggable gate in front of the screening session.
//!
//! Default: `StaticSecret` (exact match against a fixed shared secret).
//! The trait exists so a real identity provider can be swapped in later
//! without touching the workflow core. Hardening is explicitly out of scope.

/// Carried in `AppState` as `Arc<dyn CredentialCheck>`.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}

/// Exact-match shared-secret check. No hashing, no rate limiting.
pub struct StaticSecret {
    secret: String,
}

impl StaticSecret {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

impl CredentialCheck for StaticSecret {
    fn verify(&self, candidate: &str) -> bool {
        candidate == self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_secret_accepts_exact_match() {
        let check = StaticSecret::new("admin123".to_string());
        assert!(check.verify("admin123"));
    }

    #[test]
    fn test_static_secret_rejects_mismatch() {
        let check = StaticSecret::new("admin123".to_string());
        assert!(!check.verify("admin124"));
        assert!(!check.verify(""));
        assert!(!check.verify("ADMIN123"));
    }
}
