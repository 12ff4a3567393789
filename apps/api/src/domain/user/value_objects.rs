use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const NAME_MAX_LEN: u64 = 50;
pub const BIO_MAX_LEN: u64 = 500;
pub const PASSWORD_MIN_LEN: u64 = 6;

lazy_static! {
    pub static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Email {
    #[validate(regex(path = *EMAIL_REGEX))]
    pub value: String,
}

impl Email {
    /// Trims and lowercases before validating.
    pub fn new(value: &str) -> Result<Self, validator::ValidationErrors> {
        let email = Self {
            value: value.trim().to_lowercase(),
        };
        email.validate()?;
        Ok(email)
    }
}
