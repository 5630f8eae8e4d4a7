mod issuer;
mod layout;

pub use issuer::{CertificateData, CertificateIssuer};
