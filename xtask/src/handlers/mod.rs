pub mod license;
pub mod selftest;
