//! Shipment field extraction from CT-e / NF-e documents.
//!
//! A CT-e (freight manifest) and an NF-e (fiscal invoice) carry overlapping
//! shipment data under different block names. Both checks run independently:
//! manifest fields win, invoice fields fill in whatever is still unset.
//! Missing fields degrade to empty strings; only malformed XML is an error.

pub mod access_key;
pub mod tree;

use indexmap::IndexSet;

use crate::error::Result;
use crate::shipment::ShipmentRecord;
use self::tree::XmlNode;

/// Measurement-type sentinel marking the parcel-count quantity block.
const VOLUME_QUANTITY_SENTINEL: &str = "QTDE VOLUMES";

/// Sender-side address block names across CT-e and NF-e schema versions.
const SENDER_ADDRESS: &[&str] = &["enderReme", "enderRem", "enderEmit"];

/// Recipient-side address block names.
const RECIPIENT_ADDRESS: &[&str] = &["enderDest", "enderReceb"];

/// Mine a raw CT-e/NF-e document for shipment fields.
///
/// Returns a partially populated [`ShipmentRecord`]; unresolved text fields
/// stay empty and `volume_count` stays `None`. Malformed XML fails hard
/// with no partial record.
pub fn extract(xml: &str) -> Result<ShipmentRecord> {
    let root = tree::parse(xml)?;
    let mut record = ShipmentRecord::default();
    let mut invoices: IndexSet<String> = IndexSet::new();

    if root.first(&["infCte", "InfCte"]).is_some() {
        extract_manifest(&root, &mut record, &mut invoices);
    }
    if let Some(invoice) = root.first(&["infNFe", "InfNFe"]) {
        extract_invoice(invoice, &mut record, &mut invoices);
    }

    record.invoice_numbers = invoices.into_iter().collect::<Vec<_>>().join(", ");
    Ok(record)
}

/// CT-e path: authoritative for every field it resolves.
fn extract_manifest(root: &XmlNode, record: &mut ShipmentRecord, invoices: &mut IndexSet<String>) {
    if let Some(sender) = root.first(&["rem"]) {
        record.sender_name = sender.text_of(&["xNome"]).to_string();
        record.origin = place_of(sender, SENDER_ADDRESS);
    }
    if let Some(recipient) = root.first(&["dest"]) {
        record.recipient_name = recipient.text_of(&["xNome"]).to_string();
        record.destination = place_of(recipient, RECIPIENT_ADDRESS);
    }
    if let Some(ide) = root.first(&["ide"]) {
        record.manifest_number = ide.text_of(&["nCT"]).to_string();
    }

    if let Some(linked) = root.first(&["infDoc"]) {
        for entry in linked.matches(&["infNFe", "InfNFe", "infNF"]) {
            match entry.name() {
                "infNF" => {
                    let number = entry.text_of(&["nDoc"]);
                    if !number.is_empty() {
                        invoices.insert(number.to_string());
                    }
                },
                _ => {
                    let key = entry.text_of(&["chave", "chNFe"]);
                    if key.is_empty() {
                        continue;
                    }
                    match access_key::invoice_number(key) {
                        Some(number) => {
                            invoices.insert(number);
                        },
                        None => {
                            // Not a 44-digit key; keep the raw reference.
                            log::debug!("unresolvable access key kept verbatim: {}", key);
                            invoices.insert(key.to_string());
                        },
                    }
                },
            }
        }
    }

    record.observation = observation_of(root);
    record.volume_count = manifest_volume_count(root);
}

/// Observation: a free-text `xObs`, or the secondary observation blocks
/// joined with `" | "`.
fn observation_of(root: &XmlNode) -> String {
    let scope = root.first(&["compl"]).unwrap_or(root);
    let obs = scope.text_of(&["xObs"]);
    if !obs.is_empty() {
        return obs.to_string();
    }
    let parts: Vec<String> = scope
        .matches(&["obsCont", "obsFisco"])
        .iter()
        .map(|n| n.deep_text())
        .filter(|t| !t.is_empty())
        .collect();
    parts.join(" | ")
}

/// Parcel count from the quantity block tagged `QTDE VOLUMES`.
fn manifest_volume_count(root: &XmlNode) -> Option<u32> {
    for block in root.matches(&["infQ", "infCarga", "infQuant"]) {
        let kind = block.text_of(&["tpMed"]);
        if !kind.trim().eq_ignore_ascii_case(VOLUME_QUANTITY_SENTINEL) {
            continue;
        }
        return positive_count(block.text_of(&["qCarga"]));
    }
    None
}

/// NF-e path: fills only fields the manifest left unset. `block` is the
/// fiscal-invoice info block, so a manifest's linked-invoice stubs (which
/// carry only an access key) resolve nothing here.
fn extract_invoice(block: &XmlNode, record: &mut ShipmentRecord, invoices: &mut IndexSet<String>) {
    if record.sender_name.is_empty() || record.origin.is_empty() {
        if let Some(issuer) = block.first(&["emit"]) {
            if record.sender_name.is_empty() {
                record.sender_name = issuer.text_of(&["xNome"]).to_string();
            }
            if record.origin.is_empty() {
                record.origin = place_of(issuer, SENDER_ADDRESS);
            }
        }
    }
    if record.recipient_name.is_empty() || record.destination.is_empty() {
        if let Some(recipient) = block.first(&["dest"]) {
            if record.recipient_name.is_empty() {
                record.recipient_name = recipient.text_of(&["xNome"]).to_string();
            }
            if record.destination.is_empty() {
                record.destination = place_of(recipient, RECIPIENT_ADDRESS);
            }
        }
    }

    if record.volume_count.is_none() {
        if let Some(vol) = block.first(&["transp"]).and_then(|t| t.first(&["vol"])) {
            record.volume_count = positive_count(vol.text_of(&["qVol"]));
        }
    }

    if let Some(ide) = block.first(&["ide"]) {
        let number = ide.text_of(&["nNF"]);
        if !number.is_empty() {
            invoices.insert(number.to_string());
        }
    }
}

/// "City - UF" from the given address block, omitting the separator when a
/// part is missing.
fn place_of(block: &XmlNode, address_names: &[&str]) -> String {
    let Some(address) = block.first(address_names) else {
        return String::new();
    };
    let city = address.text_of(&["xMun"]);
    let uf = address.text_of(&["UF"]);
    match (city.is_empty(), uf.is_empty()) {
        (false, false) => format!("{} - {}", city, uf),
        (false, true) => city.to_string(),
        (true, false) => uf.to_string(),
        (true, true) => String::new(),
    }
}

/// Parse a quantity as a count, truncating toward zero; only positive
/// counts are kept.
fn positive_count(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    let count = value.trunc();
    if count >= 1.0 && count <= u32::MAX as f64 {
        Some(count as u32)
    } else {
        None
    }
}
