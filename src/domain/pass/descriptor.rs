//! Pass descriptor assembly.
//!
//! Maps a validated build request into the `pass.json` document of a store
//! card: identity, colors, content field groups, optional geofence, barcode,
//! and the update channel. Assembly is pure; serialization happens once and
//! the resulting bytes are what gets digested and signed.

use serde::{Deserialize, Serialize};

use super::auth_token::derive_update_token;
use super::errors::PassBuildError;
use super::serial::derive_serial_number;
use super::tier::{RewardTier, NONPROFIT_BACKGROUND_COLOR};

/// Stamp card capacity. The progress label always renders out of this many.
pub const MAX_STAMPS: usize = 20;

/// Text color used on every pass.
const FOREGROUND_COLOR: &str = "rgb(255,255,255)";
const LABEL_COLOR: &str = "rgb(255,255,255)";

/// Radius in meters for the merchant geofence when a location is supplied.
const GEOFENCE_RADIUS_METERS: f64 = 100.0;

const ALIGNMENT_RIGHT: &str = "PKTextAlignmentRight";

/// Issuer-level identity shared by every pass this service produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassIdentity {
    pub pass_type_identifier: String,
    pub team_identifier: String,
    pub organization_name: String,
    pub web_service_url: String,
}

/// A geographic coordinate supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Validated input for one pass build.
#[derive(Debug, Clone, PartialEq)]
pub struct PassRequest {
    pub user_id: String,
    pub merchant_id: String,
    pub merchant_name: String,
    pub location: Option<Coordinate>,
    pub stamp_count: usize,
    pub sat_back: i64,
    pub credit_balance: f64,
    pub user_balance: f64,
    pub is_nonprofit: bool,
    pub has_qr_payments: bool,
}

impl PassRequest {
    /// Validate required fields and coordinate ranges.
    pub fn validate(&self) -> Result<(), PassBuildError> {
        if self.user_id.trim().is_empty() {
            return Err(PassBuildError::invalid_input("user_id", "is required"));
        }
        if self.merchant_id.trim().is_empty() {
            return Err(PassBuildError::invalid_input("merchant_id", "is required"));
        }
        if self.merchant_name.trim().is_empty() {
            return Err(PassBuildError::invalid_input("merchant_name", "is required"));
        }
        if let Some(location) = &self.location {
            if !location.latitude.is_finite() || !(-90.0..=90.0).contains(&location.latitude) {
                return Err(PassBuildError::invalid_input(
                    "location.lat",
                    "must be a latitude between -90 and 90",
                ));
            }
            if !location.longitude.is_finite() || !(-180.0..=180.0).contains(&location.longitude) {
                return Err(PassBuildError::invalid_input(
                    "location.lng",
                    "must be a longitude between -180 and 180",
                ));
            }
        }
        Ok(())
    }
}

/// Count the non-empty entries in a caller-supplied stamps sequence.
///
/// Callers send a mix of stamp records and empty slots (JSON `null`); only
/// the records count toward progress. The count is not capped at
/// [`MAX_STAMPS`]; the label denominator is.
pub fn count_stamps(stamps: &[Option<serde_json::Value>]) -> usize {
    stamps.iter().filter(|slot| slot.is_some()).count()
}

/// One field on the pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassField {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<String>,
}

impl PassField {
    fn new(key: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: value.into(),
            text_alignment: None,
        }
    }

    fn aligned_right(mut self) -> Self {
        self.text_alignment = Some(ALIGNMENT_RIGHT.to_string());
        self
    }
}

/// An ordered group of pass fields with unique keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldGroup(Vec<PassField>);

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, rejecting duplicate keys within the group.
    pub fn push(&mut self, field: PassField) -> Result<(), PassBuildError> {
        if self.0.iter().any(|existing| existing.key == field.key) {
            return Err(PassBuildError::invalid_input(
                "fields",
                format!("duplicate field key '{}'", field.key),
            ));
        }
        self.0.push(field);
        Ok(())
    }

    pub fn fields(&self) -> &[PassField] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The store-card field groups of the pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreCard {
    pub header_fields: FieldGroup,
    pub primary_fields: FieldGroup,
    pub secondary_fields: FieldGroup,
    pub auxiliary_fields: FieldGroup,
    pub back_fields: FieldGroup,
}

/// Barcode identifying the user at the merchant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub format: String,
    pub message: String,
    pub message_encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// Geofence entry; present only when the caller supplied a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub relevant_text: String,
    pub max_distance: f64,
}

/// The semantic content of one loyalty pass, serialized as `pass.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassDescriptor {
    pub format_version: u32,
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub team_identifier: String,
    pub organization_name: String,
    pub description: String,
    pub logo_text: String,
    pub foreground_color: String,
    pub background_color: String,
    pub label_color: String,
    #[serde(rename = "webServiceURL")]
    pub web_service_url: String,
    pub authentication_token: String,
    pub barcode: Barcode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    pub store_card: StoreCard,
}

impl PassDescriptor {
    /// Assemble a descriptor from a validated request.
    ///
    /// The serial number is derived from the user/merchant pair, and the
    /// update authentication token from the serial and the shared secret, so
    /// rebuilding the same pass produces the same identity.
    pub fn assemble(
        identity: &PassIdentity,
        request: &PassRequest,
        update_secret: &str,
    ) -> Result<Self, PassBuildError> {
        request.validate()?;

        let serial_number = derive_serial_number(&request.user_id, &request.merchant_id);
        let authentication_token = derive_update_token(update_secret, &serial_number);

        let tier = RewardTier::from_sat_back(request.sat_back);
        let background_color = if request.is_nonprofit {
            NONPROFIT_BACKGROUND_COLOR.to_string()
        } else {
            tier.background_color().to_string()
        };

        let description = if request.is_nonprofit {
            format!("{} giving card", request.merchant_name)
        } else {
            format!("{} loyalty card", request.merchant_name)
        };

        let store_card = Self::store_card(request, tier, &serial_number)?;

        Ok(Self {
            format_version: 1,
            pass_type_identifier: identity.pass_type_identifier.clone(),
            serial_number,
            team_identifier: identity.team_identifier.clone(),
            organization_name: identity.organization_name.clone(),
            description,
            logo_text: request.merchant_name.clone(),
            foreground_color: FOREGROUND_COLOR.to_string(),
            background_color,
            label_color: LABEL_COLOR.to_string(),
            web_service_url: identity.web_service_url.clone(),
            authentication_token,
            barcode: Self::barcode(request),
            locations: Self::locations(request),
            store_card,
        })
    }

    /// Serialize to the exact bytes that will be digested and signed.
    pub fn to_json(&self) -> Result<Vec<u8>, PassBuildError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| PassBuildError::packaging(format!("failed to serialize pass.json: {e}")))
    }

    fn barcode(request: &PassRequest) -> Barcode {
        Barcode {
            format: "PKBarcodeFormatQR".to_string(),
            message: format!("{}:{}", request.user_id, request.merchant_id),
            message_encoding: "iso-8859-1".to_string(),
            alt_text: request
                .has_qr_payments
                .then(|| "Scan to pay".to_string()),
        }
    }

    fn locations(request: &PassRequest) -> Option<Vec<Location>> {
        request.location.map(|coordinate| {
            vec![Location {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
                relevant_text: format!("You're near {}", request.merchant_name),
                max_distance: GEOFENCE_RADIUS_METERS,
            }]
        })
    }

    fn store_card(
        request: &PassRequest,
        tier: RewardTier,
        serial_number: &str,
    ) -> Result<StoreCard, PassBuildError> {
        let mut card = StoreCard::default();

        card.header_fields.push(
            PassField::new(
                "stamps",
                "STAMPS",
                format!("{}/{}", request.stamp_count, MAX_STAMPS),
            )
            .aligned_right(),
        )?;

        let balance_label = if request.is_nonprofit { "IMPACT" } else { "REWARDS" };
        card.primary_fields.push(PassField::new(
            "balance",
            balance_label,
            format_amount(request.credit_balance),
        ))?;

        card.secondary_fields.push(PassField::new(
            "merchant",
            "MERCHANT",
            request.merchant_name.clone(),
        ))?;
        card.secondary_fields
            .push(PassField::new("tier", "TIER", tier.name()))?;

        let action = if request.is_nonprofit { "Give" } else { "Pay" };
        card.auxiliary_fields
            .push(PassField::new("action", "ACTION", action).aligned_right())?;

        card.back_fields.push(PassField::new(
            "user_balance",
            "ACCOUNT BALANCE",
            format_amount(request.user_balance),
        ))?;
        card.back_fields.push(PassField::new(
            "card_number",
            "CARD NUMBER",
            serial_number,
        ))?;
        let about = if request.is_nonprofit {
            format!("Every purchase supports {}.", request.merchant_name)
        } else {
            format!(
                "Earn rewards every time you shop at {}.",
                request.merchant_name
            )
        };
        card.back_fields
            .push(PassField::new("about", "ABOUT", about))?;

        Ok(card)
    }
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}
