//! Shipment data model.
//!
//! A [`ShipmentRecord`] is built once per request, either from the JSON
//! body of a [`LabelRequest`] or mined out of a CT-e/NF-e document by the
//! extractor, and consumed read-only by the renderer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default label width in centimeters.
pub const DEFAULT_WIDTH_CM: f32 = 10.0;

/// Default label height in centimeters.
pub const DEFAULT_HEIGHT_CM: f32 = 5.0;

/// Normalized shipment fields, one instance per label-generation task.
///
/// Text fields default to the empty string when a source document does not
/// resolve them; that is never an error. `volume_count` is present only when
/// a positive count was actually resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentRecord {
    /// Origin place, "City - UF"
    pub origin: String,
    /// Destination place, "City - UF"
    pub destination: String,
    /// Sender company or person name
    pub sender_name: String,
    /// Recipient company or person name
    pub recipient_name: String,
    /// Freight manifest (CT-e) number
    pub manifest_number: String,
    /// Linked invoice numbers, comma-joined, first-seen order, de-duplicated
    pub invoice_numbers: String,
    /// Free-text observation
    pub observation: String,
    /// Number of physical parcels, when resolved and positive
    pub volume_count: Option<u32>,
}

/// Physical label size in centimeters.
///
/// Both dimensions must be strictly positive; anything else rejects the
/// request before any rendering starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelDimensions {
    /// Width in centimeters
    pub width_cm: f32,
    /// Height in centimeters
    pub height_cm: f32,
}

impl Default for LabelDimensions {
    fn default() -> Self {
        Self {
            width_cm: DEFAULT_WIDTH_CM,
            height_cm: DEFAULT_HEIGHT_CM,
        }
    }
}

impl LabelDimensions {
    /// Create validated dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use etiqueta::shipment::LabelDimensions;
    ///
    /// let dims = LabelDimensions::new(10.0, 5.0).unwrap();
    /// assert_eq!(dims.area_mm2(), 5000.0);
    /// assert!(LabelDimensions::new(0.0, 5.0).is_err());
    /// ```
    pub fn new(width_cm: f32, height_cm: f32) -> Result<Self> {
        if !(width_cm > 0.0) || !(height_cm > 0.0) {
            return Err(Error::InvalidDimensions {
                width: width_cm,
                height: height_cm,
            });
        }
        Ok(Self {
            width_cm,
            height_cm,
        })
    }

    /// Width in millimeters.
    pub fn width_mm(&self) -> f32 {
        self.width_cm * 10.0
    }

    /// Height in millimeters.
    pub fn height_mm(&self) -> f32 {
        self.height_cm * 10.0
    }

    /// Label area in square millimeters, the sole input to style resolution.
    pub fn area_mm2(&self) -> f32 {
        self.width_mm() * self.height_mm()
    }
}

/// One label-generation request, as posted by the legacy form service.
///
/// Wire field names keep the Portuguese contract of the original service.
/// When `xml` is present the shipment fields are mined from it and the
/// inline text fields are ignored; dimensions and the volume fallback always
/// come from the request itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelRequest {
    /// Origin place ("City - UF")
    #[serde(rename = "origem")]
    pub origin: String,
    /// Destination place ("City - UF")
    #[serde(rename = "destino")]
    pub destination: String,
    /// Sender name
    #[serde(rename = "remetente")]
    pub sender: String,
    /// Recipient name
    #[serde(rename = "destinatario")]
    pub recipient: String,
    /// Freight manifest number
    #[serde(rename = "cte")]
    pub manifest: String,
    /// Invoice numbers, comma-joined
    #[serde(rename = "nfs")]
    pub invoices: String,
    /// Free-text observation
    #[serde(rename = "obs")]
    pub observation: String,
    /// Total parcel count; values <= 0 are floored to 1
    pub total_volumes: i64,
    /// Label width in centimeters
    #[serde(rename = "largura")]
    pub width: f32,
    /// Label height in centimeters
    #[serde(rename = "altura")]
    pub height: f32,
    /// Raw CT-e/NF-e XML; when present, fields are extracted from it
    pub xml: Option<String>,
    /// Optional hard ceiling on the number of pages a request may demand
    pub max_volumes: Option<u32>,
}

impl Default for LabelRequest {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            sender: String::new(),
            recipient: String::new(),
            manifest: String::new(),
            invoices: String::new(),
            observation: String::new(),
            total_volumes: 1,
            width: DEFAULT_WIDTH_CM,
            height: DEFAULT_HEIGHT_CM,
            xml: None,
            max_volumes: None,
        }
    }
}

impl LabelRequest {
    /// Validated label dimensions for this request.
    pub fn dimensions(&self) -> Result<LabelDimensions> {
        LabelDimensions::new(self.width, self.height)
    }

    /// Shipment record from the inline form fields.
    pub fn to_record(&self) -> ShipmentRecord {
        ShipmentRecord {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            sender_name: self.sender.clone(),
            recipient_name: self.recipient.clone(),
            manifest_number: self.manifest.clone(),
            invoice_numbers: self.invoices.clone(),
            observation: self.observation.clone(),
            volume_count: if self.total_volumes > 0 {
                Some(self.total_volumes as u32)
            } else {
                None
            },
        }
    }

    /// Requested volume count, floored to 1.
    pub fn volume_fallback(&self) -> u32 {
        if self.total_volumes > 0 {
            self.total_volumes as u32
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validation() {
        assert!(LabelDimensions::new(10.0, 5.0).is_ok());
        assert!(LabelDimensions::new(-1.0, 5.0).is_err());
        assert!(LabelDimensions::new(10.0, 0.0).is_err());
        assert!(LabelDimensions::new(f32::NAN, 5.0).is_err());
    }

    #[test]
    fn test_dimensions_area() {
        let dims = LabelDimensions::new(10.0, 5.0).unwrap();
        assert_eq!(dims.width_mm(), 100.0);
        assert_eq!(dims.height_mm(), 50.0);
        assert_eq!(dims.area_mm2(), 5000.0);
    }

    #[test]
    fn test_request_defaults() {
        let req: LabelRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.width, DEFAULT_WIDTH_CM);
        assert_eq!(req.height, DEFAULT_HEIGHT_CM);
        assert_eq!(req.total_volumes, 1);
        assert!(req.xml.is_none());
    }

    #[test]
    fn test_request_portuguese_wire_names() {
        let req: LabelRequest = serde_json::from_str(
            r#"{
                "remetente": "Acme Ltda",
                "destinatario": "Beta SA",
                "cte": "12345",
                "nfs": "1, 2",
                "obs": "Fragil",
                "total_volumes": 3,
                "largura": 8.0,
                "altura": 4.0
            }"#,
        )
        .unwrap();
        assert_eq!(req.sender, "Acme Ltda");
        assert_eq!(req.recipient, "Beta SA");
        assert_eq!(req.manifest, "12345");
        assert_eq!(req.width, 8.0);
        assert_eq!(req.volume_fallback(), 3);
    }

    #[test]
    fn test_volume_floor() {
        let req = LabelRequest {
            total_volumes: 0,
            ..Default::default()
        };
        assert_eq!(req.volume_fallback(), 1);
        assert_eq!(req.to_record().volume_count, None);

        let req = LabelRequest {
            total_volumes: -4,
            ..Default::default()
        };
        assert_eq!(req.volume_fallback(), 1);
    }

    #[test]
    fn test_record_from_fields() {
        let req = LabelRequest {
            origin: "Campinas - SP".to_string(),
            destination: "Recife - PE".to_string(),
            total_volumes: 2,
            ..Default::default()
        };
        let record = req.to_record();
        assert_eq!(record.origin, "Campinas - SP");
        assert_eq!(record.volume_count, Some(2));
    }
}
