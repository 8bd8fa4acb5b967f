//! High-level label generation.
//!
//! One call per request: resolve the shipment record (inline fields or
//! mined from the attached XML), validate dimensions, resolve the style
//! profile, render one page per volume, and hand back the document bytes.

use crate::emitter::pdf::PdfEmitter;
use crate::emitter::PageEmitter;
use crate::error::{Error, Result};
use crate::extractor;
use crate::render::LabelRenderer;
use crate::shipment::{LabelDimensions, LabelRequest, ShipmentRecord};
use crate::style::StyleProfile;

/// Generate a label PDF for a request.
///
/// When the request carries raw XML, the shipment fields are extracted from
/// it and the request's inline text fields are ignored; dimensions and the
/// volume fallback always come from the request. Volume counts at or below
/// zero are floored to 1.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] for non-positive sizes,
/// [`Error::Parse`] for malformed XML, [`Error::VolumeCapExceeded`] when a
/// configured cap is exceeded, and [`Error::EmptyOutput`] if the emitter
/// yields no bytes.
pub fn generate(request: &LabelRequest) -> Result<Vec<u8>> {
    let dims = request.dimensions()?;
    let record = match &request.xml {
        Some(xml) => extractor::extract(xml)?,
        None => request.to_record(),
    };

    let volumes = record.volume_count.unwrap_or_else(|| request.volume_fallback());
    if let Some(cap) = request.max_volumes {
        if volumes > cap {
            return Err(Error::VolumeCapExceeded {
                requested: volumes,
                cap,
            });
        }
    }

    let mut emitter = PdfEmitter::new();
    generate_with(&record, &dims, volumes, &mut emitter)
}

/// Render `volumes` label pages into a caller-supplied emitter and finish
/// the document.
///
/// The record and resolved profile are read-only during rendering; the only
/// mutable state is the emitter's page cursor, so each request should use
/// its own emitter instance.
pub fn generate_with(
    record: &ShipmentRecord,
    dims: &LabelDimensions,
    volumes: u32,
    emitter: &mut dyn PageEmitter,
) -> Result<Vec<u8>> {
    let volumes = volumes.max(1);
    let profile = StyleProfile::resolve(dims);
    log::debug!(
        "generating {} page(s), area {:.0} mm2, header {}pt",
        volumes,
        dims.area_mm2(),
        profile.header_font_size
    );

    LabelRenderer::new(emitter).render(record, &profile, dims, volumes);

    let bytes = emitter.finish()?;
    if bytes.is_empty() {
        return Err(Error::EmptyOutput);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{Align, FontStyle};

    #[test]
    fn test_generate_default_request() {
        let request = LabelRequest::default();
        let bytes = generate(&request).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-"));
        assert!(content.contains("/Count 1"));
    }

    #[test]
    fn test_invalid_dimensions_rejected_before_rendering() {
        let request = LabelRequest {
            width: -2.0,
            ..Default::default()
        };
        assert!(matches!(
            generate(&request),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_malformed_xml_surfaces_parse_error() {
        let request = LabelRequest {
            xml: Some("<CTe><infCte>".to_string()),
            ..Default::default()
        };
        assert!(matches!(generate(&request), Err(Error::Parse(_))));
    }

    #[test]
    fn test_volume_cap() {
        let request = LabelRequest {
            total_volumes: 800,
            max_volumes: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            generate(&request),
            Err(Error::VolumeCapExceeded {
                requested: 800,
                cap: 100
            })
        ));
    }

    #[test]
    fn test_empty_emitter_output_is_fatal() {
        struct NullEmitter;
        impl PageEmitter for NullEmitter {
            fn start_page(&mut self, _w: f32, _h: f32) {}
            fn set_margins(&mut self, _l: f32, _t: f32, _r: f32) {}
            fn set_font(&mut self, _s: FontStyle, _size: f32) {}
            fn set_fill_color(&mut self, _r: u8, _g: u8, _b: u8) {}
            fn set_text_color(&mut self, _r: u8, _g: u8, _b: u8) {}
            fn cell(&mut self, _w: f32, _h: f32, _t: &str, _b: bool, _f: bool, _a: Align) {}
            fn multi_cell(&mut self, _w: f32, _lh: f32, _t: &str) {}
            fn line_break(&mut self, _h: f32) {}
            fn finish(&mut self) -> Result<Vec<u8>> {
                Ok(Vec::new())
            }
        }

        let record = ShipmentRecord::default();
        let dims = LabelDimensions::new(10.0, 5.0).unwrap();
        let mut emitter = NullEmitter;
        assert!(matches!(
            generate_with(&record, &dims, 1, &mut emitter),
            Err(Error::EmptyOutput)
        ));
    }

    #[test]
    fn test_xml_volume_count_wins_over_request() {
        let xml = r#"<CTe><infCte>
            <infQ><tpMed>QTDE VOLUMES</tpMed><qCarga>2</qCarga></infQ>
        </infCte></CTe>"#;
        let request = LabelRequest {
            xml: Some(xml.to_string()),
            total_volumes: 9,
            ..Default::default()
        };
        let bytes = generate(&request).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/Count 2"));
    }
}
