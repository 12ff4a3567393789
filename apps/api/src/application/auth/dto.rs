use crate::domain::user::value_objects::{BIO_MAX_LEN, EMAIL_REGEX, NAME_MAX_LEN, PASSWORD_MIN_LEN};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = NAME_MAX_LEN,
        message = "Name cannot be more than 50 characters"
    ))]
    pub name: String,
    #[validate(regex(path = *EMAIL_REGEX, message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(
        min = PASSWORD_MIN_LEN,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,
    #[serde(alias = "passwordConfirm")]
    pub password_confirm: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(
        min = 1,
        max = NAME_MAX_LEN,
        message = "Name cannot be more than 50 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(max = BIO_MAX_LEN, message = "Bio cannot be more than 500 characters"))]
    pub bio: Option<String>,
    pub avatar: Option<String>,
}
