//! A single provider shared across many tasks and threads

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bearer_jwt::{ProviderConfig, TokenProvider, ValidationError};
use std::collections::HashSet;
use std::sync::Arc;

fn shared(secret: &str) -> Arc<TokenProvider> {
    let config = ProviderConfig::new(secret, "Foo", "Foo").expect("valid configuration");
    Arc::new(TokenProvider::new(config))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn issue_and_validate_from_many_tasks() {
    let provider = shared("testing_secret");

    let handles: Vec<_> = (0..64)
        .map(|task| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                let mut ids = Vec::with_capacity(50);
                for i in 0..50 {
                    let subject = format!("user-{task}-{i}");
                    let token = provider.issue(&subject);
                    let claims = provider
                        .validate(&format!("Bearer {token}"))
                        .expect("freshly issued token validates");
                    assert_eq!(claims.user, subject);
                    ids.push(claims.jti);
                }
                ids
            })
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.await.expect("task completes") {
            assert!(all.insert(id), "duplicate token id");
        }
    }
    assert_eq!(all.len(), 64 * 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_providers_do_not_interfere() {
    let a = shared("secret_a");
    let b = shared("secret_b");

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let (issuer, verifier) = if i % 2 == 0 {
                (Arc::clone(&a), Arc::clone(&b))
            } else {
                (Arc::clone(&b), Arc::clone(&a))
            };
            tokio::spawn(async move {
                let token = format!("Bearer {}", issuer.issue("alice"));
                assert!(issuer.validate(&token).is_ok());
                assert_eq!(
                    verifier.validate(&token),
                    Err(ValidationError::InvalidSignature)
                );
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task completes");
    }
}

#[test]
fn scoped_threads_share_by_reference() {
    let config = ProviderConfig::new("testing_secret", "Foo", "Foo").expect("valid configuration");
    let provider = TokenProvider::new(config);
    let token = format!("Bearer {}", provider.issue("alice"));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(provider.validate(&token).is_ok());
                }
            });
        }
    });
}
