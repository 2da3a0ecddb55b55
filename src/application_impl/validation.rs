use crate::application_port::ValidationError;
use crate::domain_model::RecordId;

pub const MIN_PASSWORD_LEN: usize = 6;
const OTP_DIGITS: std::ops::RangeInclusive<usize> = 4..=8;

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(email.to_owned());
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels_ok = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    validate_email(email.trim())
}

pub fn validate_otp(otp_code: &str) -> Result<(), ValidationError> {
    let digits_only = otp_code.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || !OTP_DIGITS.contains(&otp_code.len()) {
        return Err(ValidationError::InvalidOtp);
    }
    Ok(())
}

pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub fn validate_paging(page: u32, page_size: u32) -> Result<(), ValidationError> {
    if page == 0 {
        return Err(ValidationError::ZeroPaging("page"));
    }
    if page_size == 0 {
        return Err(ValidationError::ZeroPaging("page_size"));
    }
    Ok(())
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub fn validate_record_id(id: &RecordId) -> Result<(), ValidationError> {
    if !id.is_path_safe() {
        return Err(ValidationError::InvalidId(id.0.clone()));
    }
    Ok(())
}
