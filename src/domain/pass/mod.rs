//! Loyalty pass domain: descriptor assembly, digests, and packaging.
//!
//! A pass moves through a fixed pipeline: assemble a [`PassDescriptor`] from
//! the caller's request, serialize it, generate the placeholder icon assets,
//! digest every member into a [`Manifest`], sign the manifest (via the
//! [`crate::ports::PassSigner`] port), and package everything into a ZIP in
//! the exact member order Wallet clients expect.

mod archive;
mod assets;
mod auth_token;
mod descriptor;
mod errors;
mod manifest;
mod serial;
mod tier;

pub use archive::{build_archive, suggested_filename, ArchiveMembers, MEMBER_ORDER};
pub use assets::{ICON_2X_FILE, ICON_2X_PNG, ICON_FILE, ICON_PNG};
pub use auth_token::{derive_update_token, verify_update_token};
pub use descriptor::{
    count_stamps, Barcode, Coordinate, FieldGroup, Location, PassDescriptor, PassField,
    PassIdentity, PassRequest, StoreCard, MAX_STAMPS,
};
pub use errors::{PassBuildError, WebServiceError};
pub use manifest::{digest as manifest_digest, Manifest, MANIFEST_FILE, SIGNATURE_FILE};
pub use serial::derive_serial_number;
pub use tier::{RewardTier, NONPROFIT_BACKGROUND_COLOR};

/// Archive member name for the serialized descriptor.
pub const PASS_FILE: &str = "pass.json";

/// Content type of a finished pass bundle.
pub const PKPASS_CONTENT_TYPE: &str = "application/vnd.apple.pkpass";
