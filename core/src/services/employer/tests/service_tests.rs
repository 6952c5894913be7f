use std::sync::Arc;

use crate::domain::entities::{
    AccountUpdate, CompanyProfile, Employer, PaymentDetails, PaymentMethod, RegistrationStep,
};
use crate::domain::value_objects::Identity;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{CredentialRepository, EmployerRepository, InMemoryStore};
use crate::services::employer::EmployerService;
use crate::services::password::PasswordService;

const PASSWORD: &str = "Temp0r@ry";

struct Fixture {
    store: Arc<InMemoryStore>,
    passwords: Arc<PasswordService>,
    service: EmployerService<InMemoryStore>,
    employer: Identity,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let passwords = Arc::new(PasswordService::new(4));
    let employer = store
        .create(
            Employer::new("Jane".into(), "Doe".into(), "jane@example.com".into()),
            passwords.hash(PASSWORD).unwrap(),
        )
        .await
        .unwrap()
        .identity;
    let service = EmployerService::new(store.clone(), passwords.clone());

    Fixture {
        store,
        passwords,
        service,
        employer,
    }
}

fn acme() -> CompanyProfile {
    CompanyProfile {
        name: "Acme".to_string(),
        street_address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        zip_code: "12345".to_string(),
        website: "https://acme.example.com".to_string(),
        description: "Widgets".to_string(),
    }
}

fn billing() -> PaymentDetails {
    PaymentDetails {
        billing_name: "Acme Accounts".to_string(),
        billing_email: "billing@acme.example.com".to_string(),
        billing_address: "1 Main St".to_string(),
        billing_zip_code: "12345".to_string(),
    }
}

#[tokio::test]
async fn test_full_onboarding_then_company_edit_keeps_step() {
    let f = fixture().await;

    let step = f.service.update_password(&f.employer, PASSWORD, "N3w-secret").await.unwrap();
    assert_eq!(step, RegistrationStep::PersonalInformation);

    let profile = f
        .service
        .update_account(
            &f.employer,
            AccountUpdate {
                role: "Hiring manager".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.registrationstep, RegistrationStep::CompanyDetails);

    let step = f.service.update_company(&f.employer, acme()).await.unwrap();
    assert_eq!(step, RegistrationStep::PaymentMethod);

    let step = f.service.set_payment_method(&f.employer, PaymentMethod::Invoice).await.unwrap();
    assert_eq!(step, RegistrationStep::PaymentDetails);

    let step = f.service.set_payment_details(&f.employer, billing()).await.unwrap();
    assert_eq!(step, RegistrationStep::RegistrationComplete);

    let edited = CompanyProfile {
        description: "Widgets and gadgets".to_string(),
        ..acme()
    };
    let step = f.service.update_company(&f.employer, edited.clone()).await.unwrap();
    assert_eq!(step, RegistrationStep::RegistrationComplete);
    assert_eq!(f.service.get_company(&f.employer).await.unwrap(), Some(edited));
}

#[tokio::test]
async fn test_update_password_stores_new_digest() {
    let f = fixture().await;

    f.service.update_password(&f.employer, PASSWORD, "N3w-secret").await.unwrap();

    let digest = f.store.find_credential(&f.employer).await.unwrap().unwrap();
    assert!(f.passwords.verify(&digest, "N3w-secret"));
    assert!(!f.passwords.verify(&digest, PASSWORD));
}

#[tokio::test]
async fn test_update_password_with_wrong_current_password() {
    let f = fixture().await;

    let err = f
        .service
        .update_password(&f.employer, "not-it", "N3w-secret")
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::Auth(AuthError::PasswordMismatch));
    let profile = f.service.get_employer(&f.employer).await.unwrap();
    assert_eq!(profile.registrationstep, RegistrationStep::ChangePassword);
}

#[tokio::test]
async fn test_update_password_requires_both_values() {
    let f = fixture().await;

    let err = f.service.update_password(&f.employer, PASSWORD, " ").await.unwrap_err();
    assert_eq!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredFields {
            fields: vec!["newpassword".to_string()]
        })
    );
}

#[tokio::test]
async fn test_update_password_for_unknown_identity() {
    let f = fixture().await;

    let err = f
        .service
        .update_password(&Identity::new("ghost"), PASSWORD, "N3w-secret")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_early_action_saves_data_without_advancing() {
    let f = fixture().await;

    let step = f.service.update_company(&f.employer, acme()).await.unwrap();

    assert_eq!(step, RegistrationStep::ChangePassword);
    assert_eq!(f.service.get_company(&f.employer).await.unwrap(), Some(acme()));
}

#[tokio::test]
async fn test_update_account_keeps_blank_fields() {
    let f = fixture().await;

    let profile = f
        .service
        .update_account(
            &f.employer,
            AccountUpdate {
                last_name: "Smith".to_string(),
                phone_number: "555-0100".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(profile.firstname, "Jane");
    assert_eq!(profile.lastname, "Smith");
    assert_eq!(profile.email, "jane@example.com");
    assert_eq!(profile.phonenumber, "555-0100");
    // Still at change-password, so personal information does not advance.
    assert_eq!(profile.registrationstep, RegistrationStep::ChangePassword);
}

#[tokio::test]
async fn test_update_account_rejects_invalid_email() {
    let f = fixture().await;

    let err = f
        .service
        .update_account(
            &f.employer,
            AccountUpdate {
                email: "jane-at-example".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::ValidationErr(ValidationError::InvalidEmail));
}

#[tokio::test]
async fn test_update_company_requires_name() {
    let f = fixture().await;

    let err = f
        .service
        .update_company(
            &f.employer,
            CompanyProfile {
                name: String::new(),
                ..acme()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredFields {
            fields: vec!["name".to_string()]
        })
    );
}

#[tokio::test]
async fn test_update_company_rejects_bad_website() {
    let f = fixture().await;

    let err = f
        .service
        .update_company(
            &f.employer,
            CompanyProfile {
                website: "acme".to_string(),
                ..acme()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::InvalidFormat { .. })
    ));
}

#[tokio::test]
async fn test_payment_data_is_stored() {
    let f = fixture().await;

    f.service.set_payment_method(&f.employer, PaymentMethod::CreditCard).await.unwrap();
    f.service.set_payment_details(&f.employer, billing()).await.unwrap();

    assert_eq!(f.store.payment_method(&f.employer).await, Some(PaymentMethod::CreditCard));
    assert_eq!(f.store.payment_details(&f.employer).await, Some(billing()));
}

#[tokio::test]
async fn test_payment_details_require_name_and_address() {
    let f = fixture().await;

    let err = f
        .service
        .set_payment_details(&f.employer, PaymentDetails::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredFields {
            fields: vec!["billingname".to_string(), "billingaddress".to_string()]
        })
    );
}

#[tokio::test]
async fn test_get_employer_and_company_for_unknown_identity() {
    let f = fixture().await;
    let ghost = Identity::new("ghost");

    assert!(matches!(
        f.service.get_employer(&ghost).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
    assert!(matches!(
        f.service.get_company(&ghost).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
    assert_eq!(f.service.get_company(&f.employer).await.unwrap(), None);
}
