//! Email domain acceptance

use crate::config::{DomainPolicy, EmailConfig};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Decides whether a client email domain may be stored.
///
/// Only called for syntactically valid addresses.
#[async_trait]
pub trait DomainVerifier: Send + Sync {
    async fn accepts(&self, domain: &str) -> bool;
}

/// Accepts every domain
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllDomains;

#[async_trait]
impl DomainVerifier for AcceptAllDomains {
    async fn accepts(&self, _domain: &str) -> bool {
        true
    }
}

/// Accepts a fixed set of domains, compared case-insensitively
#[derive(Debug, Clone, Default)]
pub struct DomainAllowList {
    domains: HashSet<String>,
}

impl DomainAllowList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }
}

#[async_trait]
impl DomainVerifier for DomainAllowList {
    async fn accepts(&self, domain: &str) -> bool {
        self.domains.contains(&domain.trim().to_ascii_lowercase())
    }
}

/// Build the verifier selected by configuration
pub fn verifier_from_config(config: &EmailConfig) -> Arc<dyn DomainVerifier> {
    match config.domain_policy {
        DomainPolicy::AcceptAll => Arc::new(AcceptAllDomains),
        DomainPolicy::AllowList => {
            tracing::info!(
                domains = config.allowed_domains.len(),
                "Email domain allow list enabled"
            );
            Arc::new(DomainAllowList::new(&config.allowed_domains))
        }
    }
}
