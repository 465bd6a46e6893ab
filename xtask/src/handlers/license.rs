use seatlock_hwid::{HardwareFingerprint, HardwareIdentity};
use seatlock_licensing::generator::LicenseGenerator;

/// Generates an armored license code and prints it.
///
/// Without an explicit `--hardware` fingerprint the code is bound to the
/// machine the command runs on.
///
/// # Errors
/// Returns an error for a malformed target fingerprint, a blank company,
/// or a non-positive duration. No code is produced in those cases.
pub fn generate_license(company: &str, days: i64, hardware: Option<&str>) -> anyhow::Result<()> {
    let fingerprint = match hardware {
        Some(raw) => raw.parse::<HardwareFingerprint>()?,
        None => HardwareIdentity::new().fingerprint(),
    };

    let generator = LicenseGenerator::with_product_key()?;
    let code = generator.generate(company, days, &fingerprint)?;

    println!("✅ License generated for {company}");
    println!("   Machine: {fingerprint}");
    println!("   Days:    {days}");
    println!("   Code:    {code}");

    Ok(())
}

/// Prints the local machine fingerprint, for inclusion in license requests.
pub fn print_hardware_id() {
    println!("{}", HardwareIdentity::new().fingerprint());
}
