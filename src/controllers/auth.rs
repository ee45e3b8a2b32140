//! Login and registration

use crate::api::ApiClient;
use crate::error::{ClientError, ValidationError};
use crate::transport::Transport;

const LOGIN_FAILED: &str = "Ошибка входа";
const REGISTER_FAILED: &str = "Ошибка регистрации";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{message}")]
    Rejected {
        message: &'static str,
        #[source]
        source: ClientError,
    },
}

/// Keeps a form to one request at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Submission {
    busy: bool,
}

impl Submission {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns false if a submit is already running
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }

    /// Validate, then exchange the credentials for a token
    pub async fn submit<T: Transport>(&self, api: &ApiClient<T>) -> Result<String, AuthError> {
        self.validate()?;
        api.login(self.email.trim(), &self.password)
            .await
            .map_err(|source| {
                tracing::error!("Login failed: {}", source);
                AuthError::Rejected {
                    message: LOGIN_FAILED,
                    source,
                }
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.name.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingRegistrationFields);
        }
        Ok(())
    }

    pub async fn submit<T: Transport>(&self, api: &ApiClient<T>) -> Result<String, AuthError> {
        self.validate()?;
        api.register(self.email.trim(), self.name.trim(), &self.password)
            .await
            .map_err(|source| {
                tracing::error!("Registration failed: {}", source);
                AuthError::Rejected {
                    message: REGISTER_FAILED,
                    source,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "a@b.c".into(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingCredentials));

        let form = LoginForm {
            email: "  ".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingCredentials));
    }

    #[test]
    fn register_requires_name() {
        let form = RegisterForm {
            email: "a@b.c".into(),
            name: String::new(),
            password: "secret".into(),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingRegistrationFields)
        );
        assert_eq!(
            AuthError::from(ValidationError::MissingRegistrationFields).to_string(),
            "Заполните все поля"
        );
    }

    #[test]
    fn second_submit_is_refused_until_the_first_finishes() {
        let mut submission = Submission::default();
        assert!(submission.begin());
        assert!(submission.is_busy());
        assert!(!submission.begin());

        submission.finish();
        assert!(!submission.is_busy());
        assert!(submission.begin());
    }
}
