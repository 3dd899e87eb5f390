use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::Lenient;
use crate::auth::repo_types::User;
use crate::errors::{AppError, FieldErrors};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 30;
const PASSWORD_MIN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Request body for user registration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<Lenient<String>>,
    pub email: Option<Lenient<String>>,
    pub password: Option<Lenient<String>>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<Lenient<String>>,
    pub password: Option<Lenient<String>>,
}

/// Registration input after normalisation and validation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

fn check_email(errs: &mut FieldErrors, email: Option<Lenient<String>>) -> String {
    let email = errs.required("email", "a string", "Email is required", email);
    match email.as_deref().map(normalize_email) {
        None => String::new(),
        Some(e) => {
            if !is_valid_email(&e) {
                errs.push("email", "Please provide a valid email address");
            }
            e
        }
    }
}

fn check_password(errs: &mut FieldErrors, password: Option<Lenient<String>>) -> String {
    match errs.required("password", "a string", "Password is required", password) {
        None => String::new(),
        Some(p) => {
            if p.chars().count() < PASSWORD_MIN {
                errs.push("password", "Password must be at least 6 characters");
            }
            p
        }
    }
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewAccount, AppError> {
        let mut errs = FieldErrors::new();

        let name = errs.required("name", "a string", "Username is required", self.name);
        let name = match name.as_deref().map(str::trim) {
            None => String::new(),
            Some(n) => {
                let len = n.chars().count();
                if len < NAME_MIN {
                    errs.push("name", "Username must be at least 3 characters");
                } else if len > NAME_MAX {
                    errs.push("name", "Username cannot exceed 30 characters");
                }
                n.to_string()
            }
        };
        let email = check_email(&mut errs, self.email);
        let password = check_password(&mut errs, self.password);

        errs.finish()?;
        Ok(NewAccount {
            name,
            email,
            password,
        })
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, AppError> {
        let mut errs = FieldErrors::new();
        let email = check_email(&mut errs, self.email);
        let password = check_password(&mut errs, self.password);
        errs.finish()?;
        Ok(Credentials { email, password })
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

/// The signed-in user together with a fresh token.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserPayload<T: Serialize> {
    pub user: T,
}
