//! MySQL implementation of the employer-side repository traits.
//!
//! One struct backs employer data, credentials, onboarding steps and account
//! lookups because they all live on the `employers` and `applicants` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use jb_core::domain::entities::{
    CompanyProfile, Employer, PaymentDetails, PaymentMethod, RegistrationStep,
};
use jb_core::domain::value_objects::{Account, Identity, PasswordDigest};
use jb_core::errors::{AuthError, DomainError};
use jb_core::repositories::{
    AccountRepository, CredentialRepository, EmployerRepository, RegistrationStepRepository,
};

const EMPLOYER_COLUMNS: &str = r#"
    publicid, firstname, lastname, email, phonenumber, mobilenumber, role,
    registrationstep, createdat, updatedat
"#;

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

fn parse_step(value: &str) -> Result<RegistrationStep, DomainError> {
    value.parse().map_err(|e| DomainError::Internal {
        message: format!("Stored registration step is invalid: {}", e),
    })
}

/// MySQL implementation of the employer repositories
#[derive(Clone)]
pub struct MySqlEmployerRepository {
    pool: MySqlPool,
}

impl MySqlEmployerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_employer(row: &MySqlRow) -> Result<Employer, DomainError> {
        let publicid: String = column(row, "publicid")?;
        let step: String = column(row, "registrationstep")?;

        Ok(Employer {
            identity: Identity::new(publicid),
            first_name: column(row, "firstname")?,
            last_name: column(row, "lastname")?,
            email: column(row, "email")?,
            phone_number: column(row, "phonenumber")?,
            mobile_number: column(row, "mobilenumber")?,
            role: column(row, "role")?,
            registration_step: parse_step(&step)?,
            created_at: column::<DateTime<Utc>>(row, "createdat")?,
            updated_at: column::<DateTime<Utc>>(row, "updatedat")?,
        })
    }

    async fn employer_exists(&self, identity: &Identity) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM employers WHERE publicid = ? LIMIT 1")
            .bind(identity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check employer existence", e))?;
        Ok(row.is_some())
    }

    /// MySQL reports zero affected rows when an UPDATE leaves values as they
    /// were, so a miss is confirmed with an existence check.
    async fn ensure_updated(&self, identity: &Identity, rows_affected: u64) -> Result<(), DomainError> {
        if rows_affected > 0 || self.employer_exists(identity).await? {
            return Ok(());
        }
        Err(DomainError::not_found("Employer"))
    }
}

#[async_trait]
impl EmployerRepository for MySqlEmployerRepository {
    async fn create(&self, employer: Employer, digest: PasswordDigest) -> Result<Employer, DomainError> {
        let query = r#"
            INSERT INTO employers (
                publicid, firstname, lastname, email, password, registrationstep,
                phonenumber, mobilenumber, role, createdat, updatedat
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(employer.identity.as_str())
            .bind(&employer.first_name)
            .bind(&employer.last_name)
            .bind(&employer.email)
            .bind(digest.as_str())
            .bind(employer.registration_step.as_str())
            .bind(&employer.phone_number)
            .bind(&employer.mobile_number)
            .bind(&employer.role)
            .bind(employer.created_at)
            .bind(employer.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(employer),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::EmployerAlreadyExists.into())
            }
            Err(e) => Err(db_error("Failed to create employer", e)),
        }
    }

    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<Employer>, DomainError> {
        let query = format!("SELECT {} FROM employers WHERE publicid = ? LIMIT 1", EMPLOYER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(identity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find employer", e))?;

        row.as_ref().map(Self::row_to_employer).transpose()
    }

    async fn update_account(&self, employer: &Employer) -> Result<(), DomainError> {
        // registrationstep is owned by advance_step and never written here.
        let query = r#"
            UPDATE employers
            SET firstname = ?, lastname = ?, email = ?, phonenumber = ?,
                mobilenumber = ?, role = ?, updatedat = ?
            WHERE publicid = ?
        "#;

        let result = sqlx::query(query)
            .bind(&employer.first_name)
            .bind(&employer.last_name)
            .bind(&employer.email)
            .bind(&employer.phone_number)
            .bind(&employer.mobile_number)
            .bind(&employer.role)
            .bind(employer.updated_at)
            .bind(employer.identity.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => self.ensure_updated(&employer.identity, done.rows_affected()).await,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::EmployerAlreadyExists.into())
            }
            Err(e) => Err(db_error("Failed to update employer account", e)),
        }
    }

    async fn update_company(&self, identity: &Identity, company: &CompanyProfile) -> Result<(), DomainError> {
        let query = r#"
            UPDATE employers
            SET companyname = ?, companystreetaddress = ?, companycity = ?,
                companyzipcode = ?, companywebsite = ?, companydescription = ?,
                updatedat = ?
            WHERE publicid = ?
        "#;

        let done = sqlx::query(query)
            .bind(&company.name)
            .bind(&company.street_address)
            .bind(&company.city)
            .bind(&company.zip_code)
            .bind(&company.website)
            .bind(&company.description)
            .bind(Utc::now())
            .bind(identity.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update company", e))?;

        self.ensure_updated(identity, done.rows_affected()).await
    }

    async fn find_company(&self, identity: &Identity) -> Result<Option<CompanyProfile>, DomainError> {
        let query = r#"
            SELECT companyname, companystreetaddress, companycity, companyzipcode,
                   companywebsite, companydescription
            FROM employers
            WHERE publicid = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(identity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find company", e))?
            .ok_or_else(|| DomainError::not_found("Employer"))?;

        let Some(name) = column::<Option<String>>(&row, "companyname")? else {
            return Ok(None);
        };

        Ok(Some(CompanyProfile {
            name,
            street_address: column(&row, "companystreetaddress")?,
            city: column(&row, "companycity")?,
            zip_code: column(&row, "companyzipcode")?,
            website: column(&row, "companywebsite")?,
            description: column::<Option<String>>(&row, "companydescription")?.unwrap_or_default(),
        }))
    }

    async fn set_payment_method(&self, identity: &Identity, method: PaymentMethod) -> Result<(), DomainError> {
        let done = sqlx::query("UPDATE employers SET paymentmethod = ?, updatedat = ? WHERE publicid = ?")
            .bind(method.as_str())
            .bind(Utc::now())
            .bind(identity.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to set payment method", e))?;

        self.ensure_updated(identity, done.rows_affected()).await
    }

    async fn set_payment_details(&self, identity: &Identity, details: &PaymentDetails) -> Result<(), DomainError> {
        let query = r#"
            UPDATE employers
            SET billingname = ?, billingemail = ?, billingaddress = ?,
                billingzipcode = ?, updatedat = ?
            WHERE publicid = ?
        "#;

        let done = sqlx::query(query)
            .bind(&details.billing_name)
            .bind(&details.billing_email)
            .bind(&details.billing_address)
            .bind(&details.billing_zip_code)
            .bind(Utc::now())
            .bind(identity.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to set payment details", e))?;

        self.ensure_updated(identity, done.rows_affected()).await
    }
}

#[async_trait]
impl CredentialRepository for MySqlEmployerRepository {
    async fn find_credential(&self, identity: &Identity) -> Result<Option<PasswordDigest>, DomainError> {
        let query = r#"
            SELECT password FROM employers WHERE publicid = ?
            UNION ALL
            SELECT password FROM applicants WHERE publicid = ?
            LIMIT 1
        "#;

        let digest: Option<String> = sqlx::query_scalar(query)
            .bind(identity.as_str())
            .bind(identity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find credential", e))?;

        Ok(digest.map(PasswordDigest::new))
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(Identity, PasswordDigest)>, DomainError> {
        let row = sqlx::query("SELECT publicid, password FROM employers WHERE LOWER(email) = LOWER(?) LIMIT 1")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find credential by email", e))?;

        match row {
            Some(row) => {
                let publicid: String = column(&row, "publicid")?;
                let password: String = column(&row, "password")?;
                Ok(Some((Identity::new(publicid), PasswordDigest::new(password))))
            }
            None => Ok(None),
        }
    }

    async fn store_credential(&self, identity: &Identity, digest: PasswordDigest) -> Result<(), DomainError> {
        let now = Utc::now();

        let done = sqlx::query("UPDATE employers SET password = ?, updatedat = ? WHERE publicid = ?")
            .bind(digest.as_str())
            .bind(now)
            .bind(identity.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store employer credential", e))?;
        if done.rows_affected() > 0 {
            return Ok(());
        }

        let done = sqlx::query("UPDATE applicants SET password = ?, updatedat = ? WHERE publicid = ?")
            .bind(digest.as_str())
            .bind(now)
            .bind(identity.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store applicant credential", e))?;
        if done.rows_affected() > 0 {
            return Ok(());
        }

        self.ensure_updated(identity, 0).await
    }
}

#[async_trait]
impl RegistrationStepRepository for MySqlEmployerRepository {
    async fn find_step(&self, identity: &Identity) -> Result<Option<RegistrationStep>, DomainError> {
        let step: Option<String> =
            sqlx::query_scalar("SELECT registrationstep FROM employers WHERE publicid = ? LIMIT 1")
                .bind(identity.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find registration step", e))?;

        step.as_deref().map(parse_step).transpose()
    }

    async fn advance_step(
        &self,
        identity: &Identity,
        expected: RegistrationStep,
        next: RegistrationStep,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE employers
            SET registrationstep = ?, updatedat = ?
            WHERE publicid = ? AND registrationstep = ?
        "#;

        let done = sqlx::query(query)
            .bind(next.as_str())
            .bind(Utc::now())
            .bind(identity.as_str())
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to advance registration step", e))?;

        Ok(done.rows_affected() == 1)
    }
}

#[async_trait]
impl AccountRepository for MySqlEmployerRepository {
    async fn find_account(&self, identity: &Identity) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT 'employer' AS kind FROM employers WHERE publicid = ?
            UNION ALL
            SELECT 'applicant' AS kind FROM applicants WHERE publicid = ?
            LIMIT 1
        "#;

        let kind: Option<String> = sqlx::query_scalar(query)
            .bind(identity.as_str())
            .bind(identity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find account", e))?;

        Ok(match kind.as_deref() {
            Some("employer") => Some(Account::employer(identity.clone())),
            Some(_) => Some(Account::applicant(identity.clone())),
            None => None,
        })
    }
}
