use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::domain::entities::Employer;
use crate::domain::value_objects::{AccountKind, Identity, PasswordDigest};
use crate::errors::AuthError;
use crate::repositories::{EmployerRepository, InMemoryStore};
use crate::services::authenticator::Authenticator;
use crate::services::token::{transport, SessionTokenCodec, TokenConfig};

use super::mocks::FailingAccountRepository;

struct Fixture {
    store: InMemoryStore,
    codec: Arc<SessionTokenCodec>,
    authenticator: Authenticator,
    employer: Identity,
}

async fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let codec = Arc::new(SessionTokenCodec::new(TokenConfig::new("test-signing-key")));
    let employer = store
        .create(
            Employer::new("Jane".into(), "Doe".into(), "jane@example.com".into()),
            PasswordDigest::new("digest"),
        )
        .await
        .unwrap()
        .identity;
    let authenticator = Authenticator::new(codec.clone(), Arc::new(store.clone()));

    Fixture {
        store,
        codec,
        authenticator,
        employer,
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", transport::encode(token))
}

#[tokio::test]
async fn test_valid_session_resolves_employer() {
    let f = fixture().await;
    let token = f.codec.issue(&f.employer, 3600).unwrap();

    let account = f.authenticator.authenticate(Some(&bearer(&token))).await.unwrap();

    assert_eq!(account.identity, f.employer);
    assert_eq!(account.kind, AccountKind::Employer);
    assert_eq!(f.store.account_lookups(), 1);
}

#[tokio::test]
async fn test_issued_session_token_is_accepted_as_is() {
    let f = fixture().await;
    let session = f.codec.issue_session(&f.employer).unwrap();
    let header = format!("Bearer {}", session.token);

    let account = f.authenticator.authenticate(Some(&header)).await.unwrap();
    assert_eq!(account.identity, f.employer);
}

#[tokio::test]
async fn test_applicants_authenticate_too() {
    let f = fixture().await;
    let applicant = Identity::new("app-1");
    f.store.insert_applicant(applicant.clone(), PasswordDigest::new("digest")).await;
    let token = f.codec.issue(&applicant, 3600).unwrap();

    let account = f.authenticator.authenticate(Some(&bearer(&token))).await.unwrap();
    assert_eq!(account.kind, AccountKind::Applicant);
}

#[tokio::test]
async fn test_missing_header_makes_no_lookup() {
    let f = fixture().await;

    assert_eq!(f.authenticator.authenticate(None).await, Err(AuthError::Unauthenticated));
    assert_eq!(f.authenticator.authenticate(Some("")).await, Err(AuthError::Unauthenticated));
    assert_eq!(f.authenticator.authenticate(Some("   ")).await, Err(AuthError::Unauthenticated));
    assert_eq!(f.store.account_lookups(), 0);
}

#[tokio::test]
async fn test_wrong_scheme_is_unauthenticated() {
    let f = fixture().await;
    let token = f.codec.issue(&f.employer, 3600).unwrap();
    let wrapped = transport::encode(&token);

    for header in [format!("Basic {}", wrapped), wrapped.clone(), "Bearer".to_string(), "Bearer    ".to_string()] {
        assert_eq!(
            f.authenticator.authenticate(Some(&header)).await,
            Err(AuthError::Unauthenticated),
            "header: {header}"
        );
    }
    assert_eq!(f.store.account_lookups(), 0);
}

#[tokio::test]
async fn test_scheme_is_case_insensitive() {
    let f = fixture().await;
    let token = f.codec.issue(&f.employer, 3600).unwrap();
    let header = format!("bearer {}", transport::encode(&token));

    assert!(f.authenticator.authenticate(Some(&header)).await.is_ok());
}

#[tokio::test]
async fn test_bad_transport_encoding_is_bad_request() {
    let f = fixture().await;

    let result = f.authenticator.authenticate(Some("Bearer not*base64")).await;
    assert!(matches!(result, Err(AuthError::BadRequest { .. })));

    let not_utf8 = format!("Bearer {}", STANDARD.encode([0xc3, 0x28]));
    let result = f.authenticator.authenticate(Some(&not_utf8)).await;
    assert!(matches!(result, Err(AuthError::BadRequest { .. })));

    assert_eq!(f.store.account_lookups(), 0);
}

#[tokio::test]
async fn test_raw_unwrapped_jwt_is_rejected() {
    let f = fixture().await;
    let token = f.codec.issue(&f.employer, 3600).unwrap();

    let result = f.authenticator.authenticate(Some(&format!("Bearer {}", token))).await;
    assert!(result.is_err());
    assert_eq!(f.store.account_lookups(), 0);
}

#[tokio::test]
async fn test_codec_failures_are_unauthenticated() {
    let f = fixture().await;
    let expired = f.codec.issue(&f.employer, 0).unwrap();
    let foreign = SessionTokenCodec::new(TokenConfig::new("other-key"))
        .issue(&f.employer, 3600)
        .unwrap();

    for token in [expired.as_str(), foreign.as_str(), "garbage"] {
        assert_eq!(
            f.authenticator.authenticate(Some(&bearer(token))).await,
            Err(AuthError::Unauthenticated)
        );
    }
    assert_eq!(f.store.account_lookups(), 0);
}

#[tokio::test]
async fn test_empty_identity_is_unauthenticated() {
    let f = fixture().await;
    let token = f.codec.issue(&Identity::new(""), 3600).unwrap();

    assert_eq!(
        f.authenticator.authenticate(Some(&bearer(&token))).await,
        Err(AuthError::Unauthenticated)
    );
    assert_eq!(f.store.account_lookups(), 0);
}

#[tokio::test]
async fn test_removed_account_is_unauthenticated() {
    let f = fixture().await;
    let token = f.codec.issue(&f.employer, 3600).unwrap();
    assert!(f.store.remove_employer(&f.employer).await);

    assert_eq!(
        f.authenticator.authenticate(Some(&bearer(&token))).await,
        Err(AuthError::Unauthenticated)
    );
    assert_eq!(f.store.account_lookups(), 1);
}

#[tokio::test]
async fn test_store_failure_is_unauthenticated() {
    let codec = Arc::new(SessionTokenCodec::new(TokenConfig::new("test-signing-key")));
    let accounts = Arc::new(FailingAccountRepository::default());
    let authenticator = Authenticator::new(codec.clone(), accounts.clone());
    let token = codec.issue(&Identity::new("emp-1"), 3600).unwrap();

    assert_eq!(
        authenticator.authenticate(Some(&bearer(&token))).await,
        Err(AuthError::Unauthenticated)
    );
    assert_eq!(accounts.calls.load(Ordering::SeqCst), 1);
}
