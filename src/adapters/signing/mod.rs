//! Signing adapters.

mod cms_signer;

pub use cms_signer::CmsPassSigner;
