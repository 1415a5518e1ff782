//! Directory client contract.
//!
//! The reconciliation engine consumes this trait; transports (and test
//! doubles) implement it. The engine never sees the lookup protocol
//! itself, only this boundary.

use async_trait::async_trait;

use linnet_core::{Aci, E164};

use crate::error::DirectoryResult;
use crate::types::LookupResponse;

/// Client for the remote phone-number directory.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Resolve a batch of phone numbers to identifier pairs.
    ///
    /// One call covers one reconciliation pass, so all decisions in the
    /// pass act on a single directory snapshot. Implementations must
    /// answer every input number; a missing key is treated by callers as
    /// "no current account". No ordering guarantee on internal execution.
    async fn batch_lookup(&self, numbers: &[E164]) -> DirectoryResult<LookupResponse>;

    /// Check whether an account identifier still exists.
    ///
    /// Used only as a fallback when a previously-known ACI was not
    /// confirmed by the batch lookup, to distinguish "directory really
    /// has nothing for this number anymore" from a transient gap.
    async fn check_existence(&self, aci: Aci) -> DirectoryResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirectoryError;
    use crate::types::DirectoryEntry;
    use linnet_core::Pni;
    use std::collections::HashMap;

    // Minimal in-memory directory to pin down the contract shape.
    struct StaticDirectory {
        accounts: HashMap<E164, (Aci, Pni)>,
    }

    #[async_trait]
    impl DirectoryClient for StaticDirectory {
        async fn batch_lookup(&self, numbers: &[E164]) -> DirectoryResult<LookupResponse> {
            let mut response = LookupResponse::new();
            for number in numbers {
                let entry = match self.accounts.get(number) {
                    Some((aci, pni)) => DirectoryEntry::registered(*aci, *pni),
                    None => DirectoryEntry::unregistered(),
                };
                response.insert(number.clone(), entry);
            }
            Ok(response)
        }

        async fn check_existence(&self, aci: Aci) -> DirectoryResult<bool> {
            Ok(self.accounts.values().any(|(known, _)| *known == aci))
        }
    }

    #[tokio::test]
    async fn test_batch_lookup_answers_every_input() {
        let registered = E164::parse("+15551234567").unwrap();
        let unknown = E164::parse("+15557654321").unwrap();
        let aci = Aci::new();

        let directory = StaticDirectory {
            accounts: HashMap::from([(registered.clone(), (aci, Pni::new()))]),
        };

        let response = directory
            .batch_lookup(&[registered.clone(), unknown.clone()])
            .await
            .unwrap();

        assert_eq!(response.len(), 2);
        assert_eq!(response.resolved(&registered).aci, Some(aci));
        assert!(!response.resolved(&unknown).has_account());
    }

    #[tokio::test]
    async fn test_check_existence() {
        let number = E164::parse("+15551234567").unwrap();
        let aci = Aci::new();
        let directory = StaticDirectory {
            accounts: HashMap::from([(number, (aci, Pni::new()))]),
        };

        assert!(directory.check_existence(aci).await.unwrap());
        assert!(!directory.check_existence(Aci::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_trait_object_usable() {
        let directory: Box<dyn DirectoryClient> = Box::new(StaticDirectory {
            accounts: HashMap::new(),
        });
        let err_free = directory.batch_lookup(&[]).await;
        assert!(err_free.is_ok());

        // DirectoryError values travel through the same boundary.
        let _err: DirectoryResult<bool> = Err(DirectoryError::unavailable("offline"));
    }
}
