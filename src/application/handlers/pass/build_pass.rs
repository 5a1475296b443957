//! BuildPassHandler - command handler for building a signed pass bundle.
//!
//! The pipeline is order-sensitive: the descriptor and icons must be
//! finalized before the manifest digests them, and the manifest must be
//! finalized before it is signed. Each build runs inside its own temporary
//! directory, removed on every exit path when the guard drops.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};

use crate::domain::pass::{
    build_archive, count_stamps, suggested_filename, ArchiveMembers, Coordinate, PassBuildError,
    PassDescriptor, PassIdentity, PassRequest, ICON_2X_FILE, ICON_2X_PNG, ICON_FILE, ICON_PNG,
    MANIFEST_FILE, Manifest, PASS_FILE,
};
use crate::ports::PassSigner;

/// Command to build a signed pass bundle.
#[derive(Debug, Clone)]
pub struct BuildPassCommand {
    pub user_id: String,
    pub merchant_id: String,
    pub merchant_name: String,
    pub location: Option<Coordinate>,
    pub stamps: Vec<Option<serde_json::Value>>,
    pub sat_back: i64,
    pub credit_balance: f64,
    pub user_balance: f64,
    pub is_nonprofit: bool,
    pub has_qr_payments: bool,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuiltPass {
    /// Finished `.pkpass` archive bytes.
    pub bytes: Vec<u8>,

    /// Suggested download filename.
    pub filename: String,

    /// Serial number embedded in the pass.
    pub serial_number: String,
}

/// Handler for building pass bundles.
pub struct BuildPassHandler {
    signer: Arc<dyn PassSigner>,
    identity: PassIdentity,
    update_auth_secret: Secret<String>,
    signing_timeout: Duration,
}

impl BuildPassHandler {
    pub fn new(
        signer: Arc<dyn PassSigner>,
        identity: PassIdentity,
        update_auth_secret: Secret<String>,
        signing_timeout: Duration,
    ) -> Self {
        Self {
            signer,
            identity,
            update_auth_secret,
            signing_timeout,
        }
    }

    pub async fn handle(&self, cmd: BuildPassCommand) -> Result<BuiltPass, PassBuildError> {
        // 1. Assemble and serialize the descriptor
        let request = PassRequest {
            user_id: cmd.user_id,
            merchant_id: cmd.merchant_id,
            merchant_name: cmd.merchant_name,
            location: cmd.location,
            stamp_count: count_stamps(&cmd.stamps),
            sat_back: cmd.sat_back,
            credit_balance: cmd.credit_balance,
            user_balance: cmd.user_balance,
            is_nonprofit: cmd.is_nonprofit,
            has_qr_payments: cmd.has_qr_payments,
        };
        let descriptor =
            PassDescriptor::assemble(&self.identity, &request, self.update_auth_secret.expose_secret())?;
        let pass_json = descriptor.to_json()?;

        // 2. Write the pre-manifest members into a scoped working directory.
        //    The guard removes it on every exit path below.
        let workspace = tempfile::tempdir()
            .map_err(|e| PassBuildError::packaging(format!("failed to create workspace: {e}")))?;

        for (name, bytes) in [
            (PASS_FILE, pass_json.as_slice()),
            (ICON_FILE, ICON_PNG),
            (ICON_2X_FILE, ICON_2X_PNG),
        ] {
            fs::write(workspace.path().join(name), bytes)
                .map_err(|e| PassBuildError::packaging(format!("failed to write {name}: {e}")))?;
        }

        // 3. Digest the exact bytes on disk, now that they are final
        let read_member = |name: &str| {
            fs::read(workspace.path().join(name))
                .map_err(|e| PassBuildError::packaging(format!("failed to read {name}: {e}")))
        };
        let pass_bytes = read_member(PASS_FILE)?;
        let icon_bytes = read_member(ICON_FILE)?;
        let icon_2x_bytes = read_member(ICON_2X_FILE)?;

        let mut manifest = Manifest::new();
        manifest.add(PASS_FILE, &pass_bytes);
        manifest.add(ICON_FILE, &icon_bytes);
        manifest.add(ICON_2X_FILE, &icon_2x_bytes);
        let manifest_json = manifest.to_json()?;
        fs::write(workspace.path().join(MANIFEST_FILE), &manifest_json)
            .map_err(|e| PassBuildError::packaging(format!("failed to write manifest: {e}")))?;

        // 4. Detached signature over the manifest, under a bounded timeout.
        //    No placeholder on failure; the whole build fails instead.
        let signature =
            match tokio::time::timeout(self.signing_timeout, self.signer.sign_manifest(&manifest_json))
                .await
            {
                Ok(Ok(signature)) => signature,
                Ok(Err(e)) => return Err(PassBuildError::signing(e.to_string())),
                Err(_) => {
                    return Err(PassBuildError::signing(format!(
                        "signer timed out after {:?}",
                        self.signing_timeout
                    )))
                }
            };

        // 5. Package in the required member order
        let archive = build_archive(&ArchiveMembers {
            pass_json: pass_bytes,
            icon: icon_bytes,
            icon_2x: icon_2x_bytes,
            manifest: manifest_json,
            signature,
        })?;

        Ok(BuiltPass {
            bytes: archive,
            filename: suggested_filename(&request.merchant_name),
            serial_number: descriptor.serial_number,
        })
    }
}
