//! Label page rendering.
//!
//! One page per volume, structurally identical except the volume counter.
//! The renderer owns no emitter; it drives a borrowed [`PageEmitter`]
//! capability and keeps no state between render calls. The page cursor
//! lives inside the emitter and belongs to the current task alone.

mod truncate;

pub use self::truncate::truncate;

use crate::emitter::{Align, FontStyle, PageEmitter};
use crate::shipment::{LabelDimensions, ShipmentRecord};
use crate::style::{StyleProfile, COMPACT_AREA_MM2, NARROW_WIDTH_MM};

/// Page margin in millimeters.
const MARGIN_MM: f32 = 3.0;

/// Character budgets, wide / compact.
const HEADER_NARROW_BUDGET: usize = 20;
const SENDER_BUDGET: usize = 70;
const RECIPIENT_BUDGET: usize = 70;
const MANIFEST_NARROW_BUDGET: usize = 18;
const COUNTER_NARROW_BUDGET: usize = 16;
const INVOICES_BUDGET: usize = 120;
const INVOICES_COMPACT_BUDGET: usize = 60;
const OBSERVATION_BUDGET: usize = 160;
const OBSERVATION_COMPACT_BUDGET: usize = 80;

/// A titled text row, alive only during a single render call.
struct RenderField<'a> {
    title: &'a str,
    content: String,
    max_chars: Option<usize>,
    font_size: f32,
}

/// Renders shipment records into label pages through a borrowed emitter.
pub struct LabelRenderer<'a> {
    emitter: &'a mut dyn PageEmitter,
}

impl<'a> LabelRenderer<'a> {
    /// Wrap an emitter capability.
    pub fn new(emitter: &'a mut dyn PageEmitter) -> Self {
        Self { emitter }
    }

    /// Render `total` pages, volume counters `1/total` through
    /// `total/total` in order.
    pub fn render(
        &mut self,
        record: &ShipmentRecord,
        profile: &StyleProfile,
        dims: &LabelDimensions,
        total: u32,
    ) {
        log::debug!(
            "rendering {} label page(s) at {}x{} cm",
            total,
            dims.width_cm,
            dims.height_cm
        );
        for volume in 1..=total {
            self.render_page(record, profile, dims, volume, total);
        }
    }

    /// Render a single page for volume `volume` of `total`.
    fn render_page(
        &mut self,
        record: &ShipmentRecord,
        profile: &StyleProfile,
        dims: &LabelDimensions,
        volume: u32,
        total: u32,
    ) {
        let narrow = dims.width_mm() < NARROW_WIDTH_MM;
        let compact = dims.area_mm2() < COMPACT_AREA_MM2;
        let row = profile.line_height;

        self.emitter.set_margins(MARGIN_MM, MARGIN_MM, MARGIN_MM);
        self.emitter.start_page(dims.width_mm(), dims.height_mm());

        // Header band: "ORIGIN x DESTINATION", centered, inverted.
        let mut header = format!(
            "{} x {}",
            record.origin.to_uppercase(),
            record.destination.to_uppercase()
        );
        if narrow {
            header = truncate(&header, HEADER_NARROW_BUDGET);
        }
        self.emitter.set_font(FontStyle::Bold, profile.header_font_size);
        self.emitter.set_fill_color(0, 0, 0);
        self.emitter.set_text_color(255, 255, 255);
        self.emitter
            .cell(0.0, row + 1.5, &header, false, true, Align::Center);
        self.emitter.line_break(row + 2.0);
        self.emitter.set_text_color(0, 0, 0);

        // Compact labels drop the sender row to keep the recipient readable.
        if !compact {
            self.draw_field(
                profile,
                RenderField {
                    title: "REMETENTE",
                    content: record.sender_name.to_uppercase(),
                    max_chars: Some(SENDER_BUDGET),
                    font_size: profile.field_font_size,
                },
            );
        }

        self.draw_field(
            profile,
            RenderField {
                title: "DESTINATARIO",
                content: record.recipient_name.to_uppercase(),
                max_chars: Some(RECIPIENT_BUDGET),
                font_size: profile.field_font_size,
            },
        );

        // Highlighted band: manifest number and volume counter side by side.
        let mut manifest = record.manifest_number.clone();
        let mut counter = format!("{}/{}", volume, total);
        if narrow {
            manifest = truncate(&manifest, MANIFEST_NARROW_BUDGET);
            counter = truncate(&counter, COUNTER_NARROW_BUDGET);
        }
        let band_width = (dims.width_mm() - 2.0 * MARGIN_MM) / 2.0;
        self.emitter.set_font(FontStyle::Bold, profile.field_font_size);
        self.emitter.set_text_color(255, 255, 255);
        self.emitter
            .cell(band_width, row + 1.0, &manifest, false, true, Align::Center);
        self.emitter
            .cell(band_width, row + 1.0, &counter, false, true, Align::Center);
        self.emitter.line_break(row + 1.5);
        self.emitter.set_text_color(0, 0, 0);

        if profile.show_invoices {
            let budget = if compact {
                INVOICES_COMPACT_BUDGET
            } else {
                INVOICES_BUDGET
            };
            self.draw_field(
                profile,
                RenderField {
                    title: "NOTAS FISCAIS",
                    content: record.invoice_numbers.clone(),
                    max_chars: Some(budget),
                    font_size: profile.field_font_size,
                },
            );
        }

        if profile.show_observation {
            let budget = if compact {
                OBSERVATION_COMPACT_BUDGET
            } else {
                OBSERVATION_BUDGET
            };
            self.draw_field(
                profile,
                RenderField {
                    title: "OBS",
                    content: record.observation.clone(),
                    max_chars: Some(budget),
                    font_size: profile.obs_font_size,
                },
            );
        }
    }

    /// Draw one titled row; rows whose content truncates to nothing are
    /// omitted entirely, so pages have a variable row count.
    fn draw_field(&mut self, profile: &StyleProfile, field: RenderField<'_>) {
        let content = match field.max_chars {
            Some(budget) => truncate(field.content.trim(), budget),
            None => field.content.trim().to_string(),
        };
        if content.is_empty() {
            return;
        }
        self.emitter.set_font(FontStyle::Regular, field.font_size);
        self.emitter.multi_cell(
            0.0,
            profile.line_height,
            &format!("{}: {}", field.title, content),
        );
    }
}
