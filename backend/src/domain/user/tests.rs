//! Tests for the user aggregate and its identity primitives.

use super::*;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::register(
        UserId::new(VALID_ID).expect("valid id"),
        Username::new("ada").expect("valid username"),
        Credential::from_password("secret1").expect("valid password"),
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
#[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
#[case("abcdefghijklm", UserValidationError::UsernameTooLong { max: USERNAME_MAX })]
#[case("1abc", UserValidationError::UsernameMustStartWithLetter)]
#[case("ada_l", UserValidationError::UsernameInvalidCharacters)]
#[case("ada l", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
#[case("ada")]
#[case("Grace1906")]
#[case("abcdefghijkl")]
fn username_accepts_valid_input(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), raw);
}

#[rstest]
#[case("pw", UserValidationError::PasswordTooShort { min: PASSWORD_MIN })]
#[case("abcdefghijklm", UserValidationError::PasswordTooLong { max: PASSWORD_MAX })]
#[case("pass word", UserValidationError::PasswordInvalidCharacters)]
fn credential_rejects_invalid_passwords(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Credential::from_password(raw).expect_err("invalid password"), expected);
}

#[rstest]
fn credential_debug_is_redacted() {
    let credential = Credential::from_password("hunter2").expect("valid password");
    let rendered = format!("{credential:?}");
    assert!(!rendered.contains("hunter2"));
}

#[rstest]
fn registered_user_starts_empty(ada: User) {
    assert!(ada.reputation().is_empty());
    assert_eq!(ada.report_status().total(), 0);
    assert!(!ada.report_status().is_banned());
    assert!(ada.notifications().is_empty());
    assert_eq!(ada.revision(), 1);
}

#[rstest]
fn serialization_omits_credential(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialize user");
    assert_eq!(value["id"], VALID_ID);
    assert_eq!(value["username"], "ada");
    assert!(value.get("credential").is_none());
    assert_eq!(value["report"]["banned"], false);
    assert_eq!(value["revision"], 1);
}

#[rstest]
fn advance_revision_increments(mut ada: User) {
    ada.advance_revision();
    assert_eq!(ada.revision(), 2);
}
