use serde::{Deserialize, Serialize};

use jb_core::domain::entities::{AccountUpdate, CompanyProfile, RegistrationStep};
use jb_core::services::{SessionGrant, SignupRequest as SignupCommand};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
}

impl From<SignupRequest> for SignupCommand {
    fn from(request: SignupRequest) -> Self {
        Self {
            first_name: request.firstname,
            last_name: request.lastname,
            email: request.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Base64-wrapped session token, sent back as `Authorization: Bearer <token>`
    pub token: String,
    pub expiresin: i64,
    pub registrationstep: RegistrationStep,
}

impl From<SessionGrant> for SessionResponse {
    fn from(grant: SessionGrant) -> Self {
        Self {
            token: grant.token,
            expiresin: grant.expires_in,
            registrationstep: grant.registration_step,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub newpassword: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phonenumber: String,
    #[serde(default)]
    pub mobilenumber: String,
    #[serde(default)]
    pub role: String,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(request: UpdateAccountRequest) -> Self {
        Self {
            first_name: request.firstname,
            last_name: request.lastname,
            email: request.email,
            phone_number: request.phonenumber,
            mobile_number: request.mobilenumber,
            role: request.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodRequest {
    #[serde(default)]
    pub method: String,
}

/// Outcome of a setup action that has no other payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    pub message: String,
    pub registrationstep: RegistrationStep,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub company: CompanyProfile,
    pub registrationstep: RegistrationStep,
}
