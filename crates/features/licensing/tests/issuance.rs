//! End-to-end issuer/consumer flow, compiled only with the `issuance` feature.

use chrono::NaiveDate;
use seatlock_hwid::HardwareFingerprint;
use seatlock_licensing::generator::LicenseGenerator;
use seatlock_licensing::validator::LicenseValidator;
use seatlock_licensing::{LicenseCodec, LicenseError};

fn fingerprint(s: &str) -> HardwareFingerprint {
    s.parse().expect("test fingerprint should parse")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn generated_code_validates_with_full_duration_same_day() {
    let today = day(2024, 6, 1);
    let machine = fingerprint("ABCD1234ABCD1234");

    let generator = LicenseGenerator::with_product_key().unwrap();
    let code = generator.generate_on(today, "Acme", 30, &machine).unwrap();

    let validator = LicenseValidator::new(LicenseCodec::new().unwrap(), machine);
    let validated = validator.validate_on(today, code.as_str()).unwrap();

    assert_eq!(validated.days_remaining, 30);
    assert_eq!(validated.payload.expires_on, day(2024, 7, 1));
    assert_eq!(validated.payload.issued_on, today);
}

#[test]
fn days_remaining_count_down_by_calendar_day() {
    let issued = day(2024, 6, 1);
    let machine = fingerprint("ABCD1234ABCD1234");

    let generator = LicenseGenerator::with_product_key().unwrap();
    let code = generator.generate_on(issued, "Acme", 30, &machine).unwrap();

    let validator = LicenseValidator::new(LicenseCodec::new().unwrap(), machine);
    assert_eq!(validator.validate_on(issued, code.as_str()).unwrap().days_remaining, 30);

    let next_day = day(2024, 6, 2);
    assert_eq!(validator.validate_on(next_day, code.as_str()).unwrap().days_remaining, 29);
}

#[test]
fn generated_code_never_validates_on_another_machine() {
    let today = day(2024, 6, 1);

    let generator = LicenseGenerator::with_product_key().unwrap();
    let code =
        generator.generate_on(today, "Acme", 365, &fingerprint("AAAA1111AAAA1111")).unwrap();

    let validator =
        LicenseValidator::new(LicenseCodec::new().unwrap(), fingerprint("BBBB2222BBBB2222"));
    let result = validator.validate_on(today, code.as_str());
    assert!(matches!(result, Err(LicenseError::HardwareMismatch)));
}

#[test]
fn rejected_input_produces_no_code() {
    let generator = LicenseGenerator::with_product_key().unwrap();
    let machine = fingerprint("ABCD1234ABCD1234");

    assert!(generator.generate("", 30, &machine).is_err());
    assert!(generator.generate("Acme", 0, &machine).is_err());
    assert!(generator.generate("Acme", -5, &machine).is_err());
}
