//! Operator authentication: the gate in front of every pipeline stage.
//!
//! Two paths: a constant-time local check for the reserved privileged
//! identity, and delegated search-then-bind verification against the
//! directory service for everyone else. The public boundary only ever
//! returns a boolean; wrong credentials and unreachable directory are
//! deliberately indistinguishable to the caller. Causes stay observable
//! through `tracing` and the internal error type.

use intake_core::config::DirectoryConfig;
use ldap3::{ldap_escape, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::time::Duration;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reserved privileged identity verified locally, never via the directory.
const ADMIN_IDENTITY: &str = "admin";

/// Internal failure kind. Collapsed to `false` at the public boundary so
/// the caller cannot distinguish outage from rejection.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Directory operation failed: {0}")]
    Directory(#[from] ldap3::LdapError),
}

/// Supplied operator credentials. Either field may be absent; absence is a
/// first-class always-rejecting state, never coerced to a default.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub identity: Option<String>,
    pub secret: Option<String>,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
            secret: Some(secret.into()),
        }
    }
}

pub struct Authenticator {
    config: DirectoryConfig,
    admin_secret: String,
}

impl Authenticator {
    pub fn new(config: DirectoryConfig, admin_secret: impl Into<String>) -> Self {
        Self {
            config,
            admin_secret: admin_secret.into(),
        }
    }

    /// Verify an operator. Absent or empty credentials are rejected without
    /// any network I/O; directory failures of every kind collapse to
    /// `false`. One attempt per call, no retries.
    pub async fn authenticate(&self, credentials: &Credentials) -> bool {
        let identity = match credentials.identity.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return false,
        };
        let secret = match credentials.secret.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return false,
        };

        if identity == ADMIN_IDENTITY {
            let ok: bool = self
                .admin_secret
                .as_bytes()
                .ct_eq(secret.as_bytes())
                .into();
            if ok {
                info!("privileged operator authenticated");
            } else {
                warn!("privileged authentication refused");
            }
            return ok;
        }

        match self.directory_bind(identity, secret).await {
            Ok(bound) => {
                if bound {
                    info!(identity, "operator authenticated via directory");
                } else {
                    debug!(identity, "directory refused operator");
                }
                bound
            }
            Err(err) => {
                warn!(identity, error = %err, "directory authentication failed");
                false
            }
        }
    }

    /// Search-then-bind against the configured directory. One connection
    /// per call, released on every exit path (dropping the handle closes
    /// the connection when unbind cannot run).
    async fn directory_bind(&self, identity: &str, secret: &str) -> Result<bool, AuthError> {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let settings = LdapConnSettings::new().set_conn_timeout(timeout);
        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &self.config.url).await?;
        ldap3::drive!(conn);

        // Service bind for the identity search.
        ldap.with_timeout(timeout);
        let service_bind = ldap
            .simple_bind(&self.config.bind_dn, &self.config.bind_secret)
            .await;
        if let Err(err) = service_bind.and_then(|res| res.success()) {
            let _ = ldap.unbind().await;
            return Err(err.into());
        }

        let filter = search_filter(&self.config.identity_attr, identity);
        ldap.with_timeout(timeout);
        let search = ldap
            .search(&self.config.base_dn, Scope::Subtree, &filter, vec!["dn"])
            .await
            .and_then(|res| res.success());
        let (entries, _) = match search {
            Ok(found) => found,
            Err(err) => {
                let _ = ldap.unbind().await;
                return Err(err.into());
            }
        };

        // Zero entries means unknown; more than one is ambiguous and is
        // treated as not found.
        if entries.len() != 1 {
            debug!(count = entries.len(), "identity not uniquely resolved");
            let _ = ldap.unbind().await;
            return Ok(false);
        }
        let entry = match entries.into_iter().next() {
            Some(e) => SearchEntry::construct(e),
            None => {
                let _ = ldap.unbind().await;
                return Ok(false);
            }
        };

        // Rebind as the resolved entry with the caller-supplied secret;
        // this bind alone decides the outcome.
        ldap.with_timeout(timeout);
        let bind = ldap.simple_bind(&entry.dn, secret).await;
        let _ = ldap.unbind().await;
        match bind {
            Ok(res) => Ok(res.success().is_ok()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Build the identity search filter. The identity passes through
/// `ldap_escape` so filter metacharacters are literal data, never syntax.
fn search_filter(attr: &str, identity: &str) -> String {
    format!("({}={})", attr, ldap_escape(identity))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
