mod common;
mod kyc;
