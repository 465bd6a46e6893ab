use chrono::Local;
use seatlock_activation::{ActivationStore, LicenseService, LicenseStatus};
use seatlock_hwid::HardwareFingerprint;
use seatlock_licensing::generator::LicenseGenerator;
use seatlock_licensing::validator::LicenseValidator;
use seatlock_licensing::LicenseCodec;
use tempfile::{TempDir, tempdir};

const MACHINE: &str = "ABCD1234ABCD1234";
const OTHER_MACHINE: &str = "BBBB2222BBBB2222";

fn fingerprint(s: &str) -> HardwareFingerprint {
    s.parse().expect("test fingerprint should parse")
}

fn service_for(machine: &str, dir: &TempDir) -> LicenseService {
    let validator = LicenseValidator::new(LicenseCodec::new().unwrap(), fingerprint(machine));
    let store = ActivationStore::new(dir.path().join("config/license.dat"));
    LicenseService::with_parts(validator, store)
}

fn code_for(machine: &str, days: i64) -> String {
    LicenseGenerator::with_product_key()
        .unwrap()
        .generate("Acme", days, &fingerprint(machine))
        .unwrap()
        .as_str()
        .to_owned()
}

#[test]
fn activate_then_query_then_deactivate() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);

    assert!(!service.is_licensed());
    assert!(service.license_info().is_none());

    let outcome = service.activate(&code_for(MACHINE, 30));
    assert!(outcome.accepted, "activation failed: {}", outcome.message);
    assert!(outcome.message.contains("Acme"));

    assert!(service.is_licensed());
    let info = service.license_info().expect("info should exist after activation");
    assert_eq!(info.company, "Acme");
    assert_eq!(info.hardware_id, fingerprint(MACHINE));
    assert_eq!(info.status, LicenseStatus::Active);
    assert_eq!(info.days_remaining, 30);
    assert_eq!(info.activated_at.date(), Local::now().date_naive());

    assert!(service.deactivate());
    assert!(!service.is_licensed());
    assert!(service.license_info().is_none());
    assert!(!service.deactivate(), "second deactivate should find nothing");
}

#[test]
fn success_message_carries_company_and_expiry() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);

    let outcome = service.activate(&code_for(MACHINE, 30));
    assert!(outcome.accepted);

    let info = service.license_info().unwrap();
    assert!(outcome.message.contains("Acme"));
    assert!(outcome.message.contains(&info.expires_on.to_string()));
}

#[test]
fn wrong_machine_code_is_rejected_without_side_effect() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);

    let outcome = service.activate(&code_for(OTHER_MACHINE, 30));
    assert!(!outcome.accepted);
    assert!(outcome.message.contains("different machine"));

    assert!(!service.is_licensed());
    assert!(!dir.path().join("config/license.dat").exists(), "no record should be written");
}

#[test]
fn expired_code_is_rejected_with_expiry_message() {
    use chrono::NaiveDate;
    use seatlock_licensing::{LICENSE_VERSION, LicensePayload};

    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);

    // The generator cannot mint an already-expired code, so seal one directly.
    let stale = LicensePayload {
        company: "Acme".into(),
        hardware_id: fingerprint(MACHINE),
        issued_on: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        expires_on: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        version: LICENSE_VERSION.into(),
    };
    let code = LicenseCodec::new().unwrap().encode(&stale).unwrap();

    let outcome = service.activate(code.as_str());
    assert!(!outcome.accepted);
    assert!(outcome.message.contains("expired"));
    assert!(!service.is_licensed());
}

#[test]
fn malformed_code_is_rejected_with_fixed_message() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);

    let outcome = service.activate("AAAAA-BBBBB-CCCCC");
    assert!(!outcome.accepted);
    assert!(outcome.message.contains("not valid"));
    assert!(!service.is_licensed());
}

#[test]
fn reactivation_overwrites_the_previous_record() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);

    assert!(service.activate(&code_for(MACHINE, 10)).accepted);
    assert!(service.activate(&code_for(MACHINE, 90)).accepted);

    let info = service.license_info().unwrap();
    assert_eq!(info.days_remaining, 90, "last activation wins");
}

#[test]
fn hardware_change_invalidates_without_touching_the_record() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);
    assert!(service.activate(&code_for(MACHINE, 30)).accepted);

    // Same store, different machine fingerprint.
    let migrated = service_for(OTHER_MACHINE, &dir);
    assert!(!migrated.is_licensed());
    let info = migrated.license_info().expect("record still loads");
    assert_eq!(info.status, LicenseStatus::Expired);

    assert!(dir.path().join("config/license.dat").exists(), "record file must survive");
    assert!(service.is_licensed(), "original machine still validates");
}

#[test]
fn corrupt_record_degrades_to_unlicensed() {
    let dir = tempdir().unwrap();
    let service = service_for(MACHINE, &dir);
    assert!(service.activate(&code_for(MACHINE, 30)).accepted);

    std::fs::write(dir.path().join("config/license.dat"), "not a record").unwrap();
    assert!(!service.is_licensed());
    assert!(service.license_info().is_none());
}
