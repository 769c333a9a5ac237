use serde::Serialize;

/// Result of registering a new account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreateUserOutcome {
    #[serde(rename = "USER_CREATED_SUCCESSFULLY")]
    Created,
    #[serde(rename = "FAILED_TO_CREATE")]
    FailedToCreate,
    #[serde(rename = "EMAIL_ALREADY_TAKEN")]
    EmailAlreadyTaken,
}

impl CreateUserOutcome {
    pub fn code(self) -> &'static str {
        match self {
            Self::Created => "USER_CREATED_SUCCESSFULLY",
            Self::FailedToCreate => "FAILED_TO_CREATE",
            Self::EmailAlreadyTaken => "EMAIL_ALREADY_TAKEN",
        }
    }
}

/// Result of a profile edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditUserOutcome {
    #[serde(rename = "USER_UPDATED")]
    Updated,
    #[serde(rename = "NO_CHANGE")]
    NoChange,
    #[serde(rename = "EMAIL_ALREADY_TAKEN")]
    EmailAlreadyTaken,
}

impl EditUserOutcome {
    pub fn code(self) -> &'static str {
        match self {
            Self::Updated => "USER_UPDATED",
            Self::NoChange => "NO_CHANGE",
            Self::EmailAlreadyTaken => "EMAIL_ALREADY_TAKEN",
        }
    }
}

/// Result of a password change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditPasswordOutcome {
    #[serde(rename = "PASSWORD_IS_CHANGED")]
    PasswordChanged,
    #[serde(rename = "NO_CHANGE")]
    NoChange,
    #[serde(rename = "INCORRECT_CREDENTIALS")]
    IncorrectCredentials,
    #[serde(rename = "USER_DOESNT_EXIST")]
    UserDoesntExist,
}

impl EditPasswordOutcome {
    pub fn code(self) -> &'static str {
        match self {
            Self::PasswordChanged => "PASSWORD_IS_CHANGED",
            Self::NoChange => "NO_CHANGE",
            Self::IncorrectCredentials => "INCORRECT_CREDENTIALS",
            Self::UserDoesntExist => "USER_DOESNT_EXIST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_form_matches_code() {
        for o in [
            CreateUserOutcome::Created,
            CreateUserOutcome::FailedToCreate,
            CreateUserOutcome::EmailAlreadyTaken,
        ] {
            assert_eq!(serde_json::to_value(o).unwrap(), o.code());
        }
        for o in [
            EditUserOutcome::Updated,
            EditUserOutcome::NoChange,
            EditUserOutcome::EmailAlreadyTaken,
        ] {
            assert_eq!(serde_json::to_value(o).unwrap(), o.code());
        }
        for o in [
            EditPasswordOutcome::PasswordChanged,
            EditPasswordOutcome::NoChange,
            EditPasswordOutcome::IncorrectCredentials,
            EditPasswordOutcome::UserDoesntExist,
        ] {
            assert_eq!(serde_json::to_value(o).unwrap(), o.code());
        }
    }
}
