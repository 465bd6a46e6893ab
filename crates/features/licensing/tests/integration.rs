use chrono::NaiveDate;
use seatlock_hwid::HardwareFingerprint;
use seatlock_licensing::validator::LicenseValidator;
use seatlock_licensing::{LICENSE_VERSION, LicenseCodec, LicenseError, LicensePayload};

fn fingerprint(s: &str) -> HardwareFingerprint {
    s.parse().expect("test fingerprint should parse")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_payload(hardware: &str, issued: NaiveDate, expires: NaiveDate) -> LicensePayload {
    LicensePayload {
        company: "Acme".into(),
        hardware_id: fingerprint(hardware),
        issued_on: issued,
        expires_on: expires,
        version: LICENSE_VERSION.into(),
    }
}

fn encode(payload: &LicensePayload) -> String {
    LicenseCodec::new().unwrap().encode(payload).unwrap().as_str().to_owned()
}

fn validator_for(hardware: &str) -> LicenseValidator {
    LicenseValidator::new(LicenseCodec::new().unwrap(), fingerprint(hardware))
}

#[test]
fn valid_code_on_matching_machine_is_accepted() {
    let today = day(2024, 6, 1);
    let code = encode(&sample_payload("ABCD1234ABCD1234", today, day(2024, 7, 1)));

    let validated = validator_for("ABCD1234ABCD1234").validate_on(today, &code).unwrap();
    assert_eq!(validated.days_remaining, 30);
    assert_eq!(validated.payload.company, "Acme");
}

#[test]
fn license_is_valid_through_its_expiry_date() {
    let expires = day(2024, 7, 1);
    let code = encode(&sample_payload("ABCD1234ABCD1234", day(2024, 6, 1), expires));
    let validator = validator_for("ABCD1234ABCD1234");

    let on_expiry = validator.validate_on(expires, &code).unwrap();
    assert_eq!(on_expiry.days_remaining, 0);

    let day_after = validator.validate_on(day(2024, 7, 2), &code);
    assert!(matches!(day_after, Err(LicenseError::Expired { expired_on }) if expired_on == expires));
}

#[test]
fn foreign_machine_is_rejected_never_accepted() {
    let today = day(2024, 6, 1);
    let code = encode(&sample_payload("AAAA1111AAAA1111", today, day(2024, 7, 1)));

    let result = validator_for("BBBB2222BBBB2222").validate_on(today, &code);
    assert!(matches!(result, Err(LicenseError::HardwareMismatch)));
}

#[test]
fn machine_mismatch_outranks_expiry() {
    // Expired AND bound elsewhere: the mismatch is reported, not the expiry.
    let code = encode(&sample_payload("AAAA1111AAAA1111", day(2024, 1, 1), day(2024, 2, 1)));

    let result = validator_for("BBBB2222BBBB2222").validate_on(day(2024, 6, 1), &code);
    assert!(matches!(result, Err(LicenseError::HardwareMismatch)));
}

#[test]
fn expired_code_on_matching_machine_reports_expiry() {
    let code = encode(&sample_payload("ABCD1234ABCD1234", day(2024, 1, 1), day(2024, 2, 1)));

    let result = validator_for("ABCD1234ABCD1234").validate_on(day(2024, 6, 1), &code);
    assert!(matches!(result, Err(LicenseError::Expired { expired_on }) if expired_on == day(2024, 2, 1)));
}

#[test]
fn malformed_input_reports_malformed() {
    let validator = validator_for("ABCD1234ABCD1234");
    for garbage in ["", "AAAAA-BBBBB", "definitely not a license"] {
        let result = validator.validate_on(day(2024, 6, 1), garbage);
        assert!(matches!(result, Err(LicenseError::MalformedCode)));
    }
}
