mod common;

use std::sync::Arc;

use claims::IdentityToken;
use common::*;
use serde_json::json;
use token::{ClaimsAugmenter, KeyProvider, KeyStore, TokenService};

#[tokio::test]
async fn rotation_applies_to_the_next_call() {
    let service = TokenService::new(
        ClaimsAugmenter::new(StaticGroups(vec!["grp-1"])),
        KeyStore::new(signing_key()),
    );
    let input = upstream_token(json!({ "email": "a@x.org" }));

    let before = service.reissue_with_claims(&input, 7).await.unwrap();
    let previous = service.keys().rotate(rotated_key());
    let after = service.reissue_with_claims(&input, 7).await.unwrap();

    assert_eq!(previous.key_id(), KEY_ID);
    assert_eq!(IdentityToken::parse(&before).unwrap().key_id(), Some(KEY_ID));
    assert_eq!(IdentityToken::parse(&after).unwrap().key_id(), Some(ROTATED_KEY_ID));

    assert!(token::verify(&before, &signing_key()).is_ok());
    assert!(token::verify(&after, &rotated_key()).is_ok());
    assert!(token::verify(&after, &signing_key()).is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reissues_sign_with_a_consistent_key() {
    let service = Arc::new(TokenService::new(
        ClaimsAugmenter::new(StaticGroups(vec!["grp-1", "grp-2"])),
        KeyStore::new(signing_key()),
    ));
    let input = upstream_token(json!({ "email": "a@x.org", "sub": "a@x.org" }));

    let mut handles = Vec::new();

    for _ in 0..32 {
        let service = service.clone();
        let input = input.clone();

        handles.push(tokio::spawn(async move {
            service.reissue_with_claims(&input, 7).await.unwrap()
        }));
    }

    let rotator = {
        let service = service.clone();

        tokio::spawn(async move {
            for round in 0..8 {
                let key = if round % 2 == 0 { rotated_key() } else { signing_key() };
                service.keys().rotate(key);
                tokio::task::yield_now().await;
            }
        })
    };

    rotator.await.unwrap();

    let keys = [signing_key(), rotated_key()];

    for handle in handles {
        let output = handle.await.unwrap();
        let key_id = IdentityToken::parse(&output).unwrap().key_id().map(str::to_owned);
        let key = keys.iter().find(|key| Some(key.key_id()) == key_id.as_deref()).unwrap();

        let claims = token::verify(&output, key).unwrap();
        assert_eq!(claims.groups(), Some(vec!["grp-1", "grp-2"]));
    }

    // Eight rotations starting from the first key end on the first key.
    assert_eq!(service.keys().current_key().key_id(), KEY_ID);
}
