use anyhow::{Context, Result, bail};
use seatlock_activation::{ActivationStore, LicenseService};
use seatlock_hwid::HardwareIdentity;
use seatlock_licensing::LicenseCodec;
use seatlock_licensing::generator::LicenseGenerator;
use seatlock_licensing::validator::LicenseValidator;
use seatlock_logger::Logger;

const SELFTEST_COMPANY: &str = "Selftest Corp";
const SELFTEST_DAYS: i64 = 30;

/// Exercises the full engine end-to-end against a temporary store:
/// generate → decode → activate → inspect → deactivate.
///
/// # Errors
/// Returns an error as soon as any step disagrees with the expected state.
pub fn run_selftest() -> Result<()> {
    let _logger = Logger::builder().name("seatlock-selftest").console(true).init()?;

    let fingerprint = HardwareIdentity::new().fingerprint();
    println!("→ hardware fingerprint: {fingerprint}");

    let generator = LicenseGenerator::with_product_key()?;
    let code = generator.generate(SELFTEST_COMPANY, SELFTEST_DAYS, &fingerprint)?;
    println!("→ generated code ({} chars)", code.as_str().len());

    let decoded = LicenseCodec::new()?.decode(code.as_str())?;
    if decoded.company != SELFTEST_COMPANY {
        bail!("decode returned the wrong company: {}", decoded.company);
    }
    println!("→ decode OK, expires {}", decoded.expires_on);

    let workdir = tempfile::tempdir().context("selftest workdir")?;
    let validator = LicenseValidator::new(LicenseCodec::new()?, fingerprint);
    let store = ActivationStore::new(workdir.path().join("license.dat"));
    let service = LicenseService::with_parts(validator, store);

    let outcome = service.activate(code.as_str());
    if !outcome.accepted {
        bail!("activation failed: {}", outcome.message);
    }
    println!("→ activate OK: {}", outcome.message);

    if !service.is_licensed() {
        bail!("service reports unlicensed immediately after activation");
    }
    let info = service.license_info().context("license info missing after activation")?;
    if info.days_remaining != SELFTEST_DAYS {
        bail!("expected {SELFTEST_DAYS} days remaining, got {}", info.days_remaining);
    }
    println!("→ inspect OK: {} days remaining, status {}", info.days_remaining, info.status);

    if !service.deactivate() {
        bail!("deactivation found no record");
    }
    if service.is_licensed() {
        bail!("service still licensed after deactivation");
    }
    println!("→ deactivate OK");

    println!("✅ Selftest passed");
    Ok(())
}
