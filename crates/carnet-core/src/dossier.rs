//! Maintenance dossier generation.
//!
//! A dossier is one PDF per vehicle: a tabular recap of every maintenance
//! record followed by the stored receipts. PDF receipts are appended
//! verbatim; image receipts become a single captioned page first. All
//! intermediate documents are built in memory, so there is nothing to clean
//! up afterwards.
//!
//! A failing receipt never aborts the dossier (it is logged and skipped);
//! only the final merge and write can fail the whole operation.

use std::path::{Path, PathBuf};

use lopdf::Document;
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfLayerReference, Px,
};
use time::OffsetDateTime;
use tracing::{debug, warn};

use carnet_types::{AttachmentKind, MaintenanceRecord, dates};

use crate::error::{Error, Result};
use crate::merge::merge_documents;
use crate::metrics;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
/// Content width for converted image pages.
const IMAGE_WIDTH_MM: f64 = 190.0;
/// Character budget for descriptions in the recap table.
const DESCRIPTION_BUDGET: usize = 60;
const ROW_STEP_MM: f64 = 6.0;
/// Assumed resolution when translating image pixels to page millimeters.
const IMAGE_DPI: f64 = 300.0;

/// Outcome of a dossier generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DossierReport {
    /// Where the merged PDF was written.
    pub output: PathBuf,
    /// Receipts appended after the recap (verbatim or converted).
    pub appended: usize,
    /// Receipts skipped: unrecognized type or failed conversion.
    pub skipped: usize,
    /// Cumulative cost shown on the recap's total line.
    pub total_cost: f64,
}

/// Deterministic output file name for a vehicle's dossier.
///
/// # Examples
///
/// ```
/// assert_eq!(carnet_core::dossier_file_name("Citroen c5"), "Dossier_Citroen_c5.pdf");
/// ```
#[must_use]
pub fn dossier_file_name(vehicle: &str) -> String {
    format!("Dossier_{}.pdf", vehicle.replace(' ', "_"))
}

/// Generate the merged dossier for one vehicle.
///
/// Records are processed in the given order, both in the recap table and in
/// the appended receipts. Records whose attachment path is empty or no
/// longer on disk contribute a table row but no receipt page.
pub fn generate_dossier(
    vehicle: &str,
    records: &[MaintenanceRecord],
    dest: &Path,
) -> Result<DossierReport> {
    let recap = recap_document(vehicle, records)?;
    let mut parts = vec![Document::load_mem(&recap)?];

    let mut appended = 0;
    let mut skipped = 0;
    for record in records {
        let Some(path) = record.attachment_on_disk() else {
            if let Some(dangling) = record.attachment_path() {
                debug!("Receipt {} is gone, treating as absent", dangling.display());
            }
            continue;
        };

        match convert_attachment(record, path) {
            Ok(Some(document)) => {
                parts.push(document);
                appended += 1;
            }
            Ok(None) => skipped += 1,
            Err(err) => {
                warn!("Skipping receipt {}: {}", path.display(), err);
                skipped += 1;
            }
        }
    }

    let mut merged = merge_documents(parts)?;
    merged.save(dest)?;
    debug!(
        "Wrote dossier for '{}' to {} ({} receipts appended, {} skipped)",
        vehicle,
        dest.display(),
        appended,
        skipped
    );

    Ok(DossierReport {
        output: dest.to_path_buf(),
        appended,
        skipped,
        total_cost: metrics::total_cost(records),
    })
}

/// Convert one receipt to a document ready for merging.
///
/// `Ok(None)` means the extension is not something we know how to append.
fn convert_attachment(record: &MaintenanceRecord, path: &Path) -> Result<Option<Document>> {
    match AttachmentKind::from_path(path) {
        AttachmentKind::Document => Ok(Some(Document::load(path)?)),
        AttachmentKind::Image => {
            let bytes = image_page(&record.description, path)?;
            Ok(Some(Document::load_mem(&bytes)?))
        }
        AttachmentKind::Unknown => {
            debug!("Unrecognized receipt type: {}", path.display());
            Ok(None)
        }
    }
}

struct RecapFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Build the recap document: title, one table row per record, total line.
/// Rows flow onto additional pages when one fills up.
fn recap_document(vehicle: &str, records: &[MaintenanceRecord]) -> Result<Vec<u8>> {
    let title = format!("Maintenance dossier - {vehicle}");
    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "recap");
    let fonts = RecapFonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    layer.use_text(&title, 16.0, Mm(MARGIN_MM as f32), Mm(280.0), &fonts.bold);
    layer.use_text(
        format!(
            "Generated on {}",
            dates::display(OffsetDateTime::now_utc().date())
        ),
        10.0,
        Mm(MARGIN_MM as f32),
        Mm(272.0),
        &fonts.regular,
    );

    let mut y = 262.0;
    table_header(&layer, &fonts, y);
    y -= ROW_STEP_MM;

    for record in records {
        if y < 2.0 * MARGIN_MM {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "recap");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
            table_header(&layer, &fonts, y);
            y -= ROW_STEP_MM;
        }

        let description: String = record.description.chars().take(DESCRIPTION_BUDGET).collect();
        let attached = if record.attachment_on_disk().is_some() {
            "yes"
        } else {
            "no"
        };

        layer.use_text(
            dates::display_or_placeholder(record.date),
            9.0,
            Mm(MARGIN_MM as f32),
            Mm(y as f32),
            &fonts.regular,
        );
        layer.use_text(record.mileage.to_string(), 9.0, Mm(38.0), Mm(y as f32), &fonts.regular);
        layer.use_text(description, 9.0, Mm(62.0), Mm(y as f32), &fonts.regular);
        layer.use_text(
            format!("{:.0} EUR", record.cost.unwrap_or(0.0)),
            9.0,
            Mm(160.0),
            Mm(y as f32),
            &fonts.regular,
        );
        layer.use_text(attached, 9.0, Mm(186.0), Mm(y as f32), &fonts.regular);
        y -= ROW_STEP_MM;
    }

    if y < 2.0 * MARGIN_MM {
        let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "recap");
        layer = doc.get_page(page).get_layer(new_layer);
        y = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
    }
    layer.use_text(
        format!("TOTAL: {:.2} EUR", metrics::total_cost(records)),
        12.0,
        Mm(130.0),
        Mm((y - ROW_STEP_MM) as f32),
        &fonts.bold,
    );

    doc.save_to_bytes().map_err(pdf_err)
}

fn table_header(layer: &PdfLayerReference, fonts: &RecapFonts, y: f64) {
    for (x, label) in [
        (MARGIN_MM, "Date"),
        (38.0, "Km"),
        (62.0, "Description"),
        (160.0, "Cost"),
        (186.0, "Receipt"),
    ] {
        layer.use_text(label, 10.0, Mm(x as f32), Mm(y as f32), &fonts.bold);
    }
}

/// Synthesize a one-page document holding a captioned, width-fitted image.
fn image_page(caption: &str, path: &Path) -> Result<Vec<u8>> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    let (doc, page, layer) = PdfDocument::new(
        format!("Receipt - {caption}"),
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "receipt",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;
    let layer = doc.get_page(page).get_layer(layer);
    layer.use_text(
        format!("Receipt: {caption}"),
        12.0,
        Mm(MARGIN_MM as f32),
        Mm(282.0),
        &font,
    );

    // Fit to the content width, capped by the room under the caption.
    let natural_width_mm = f64::from(width) / IMAGE_DPI * 25.4;
    let natural_height_mm = f64::from(height) / IMAGE_DPI * 25.4;
    let top_mm = 277.0;
    let available_mm = top_mm - MARGIN_MM;
    let scale = (IMAGE_WIDTH_MM / natural_width_mm).min(available_mm / natural_height_mm);

    let xobject = ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    };
    Image::from(xobject).add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM as f32)),
            translate_y: Some(Mm((top_mm - natural_height_mm * scale) as f32)),
            scale_x: Some(scale as f32),
            scale_y: Some(scale as f32),
            dpi: Some(IMAGE_DPI as f32),
            ..Default::default()
        },
    );

    doc.save_to_bytes().map_err(pdf_err)
}

fn pdf_err(err: impl std::fmt::Display) -> Error {
    Error::Pdf(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(
        vehicle: &str,
        description: &str,
        cost: Option<f64>,
        attachment: Option<PathBuf>,
    ) -> MaintenanceRecord {
        MaintenanceRecord {
            date: dates::parse("2024-03-01").ok(),
            vehicle: vehicle.to_string(),
            mileage: 120_000,
            description: description.to_string(),
            cost,
            attachment,
        }
    }

    fn write_png(path: &Path) {
        let pixels = image::RgbImage::from_pixel(8, 8, image::Rgb([180, 20, 20]));
        pixels.save(path).unwrap();
    }

    fn write_pdf(path: &Path) {
        let (doc, _, _) = PdfDocument::new("receipt", Mm(210.0), Mm(297.0), "layer");
        fs::write(path, doc.save_to_bytes().unwrap()).unwrap();
    }

    fn page_count(path: &Path) -> usize {
        Document::load(path).unwrap().get_pages().len()
    }

    #[test]
    fn test_dossier_file_name_replaces_spaces() {
        assert_eq!(dossier_file_name("Citroen c5"), "Dossier_Citroen_c5.pdf");
        assert_eq!(dossier_file_name("Twingo"), "Dossier_Twingo.pdf");
    }

    #[test]
    fn test_empty_history_yields_single_page_and_zero_total() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dossier.pdf");

        let report = generate_dossier("Twingo", &[], &dest).unwrap();
        assert_eq!(report.appended, 0);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(page_count(&dest), 1);
    }

    #[test]
    fn test_one_section_per_valid_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let pdf_receipt = dir.path().join("invoice.pdf");
        let png_receipt = dir.path().join("scan.png");
        let odd_receipt = dir.path().join("notes.txt");
        write_pdf(&pdf_receipt);
        write_png(&png_receipt);
        fs::write(&odd_receipt, b"plain text").unwrap();

        let records = vec![
            record("C5", "Oil change", Some(120.0), Some(pdf_receipt)),
            record("C5", "No receipt", Some(30.0), None),
            record("C5", "Tires", Some(400.0), Some(png_receipt)),
            record(
                "C5",
                "Dangling",
                None,
                Some(dir.path().join("gone.pdf")),
            ),
            record("C5", "Odd format", None, Some(odd_receipt)),
        ];

        let dest = dir.path().join("dossier.pdf");
        let report = generate_dossier("C5", &records, &dest).unwrap();

        // 1 recap page + one page per valid attachment, type mix irrelevant.
        assert_eq!(report.appended, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.total_cost, 550.0);
        assert_eq!(page_count(&dest), 1 + 2);
    }

    #[test]
    fn test_corrupt_attachment_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.pdf");
        fs::write(&broken, b"this is not a pdf").unwrap();

        let records = vec![record("C5", "Broken receipt", Some(10.0), Some(broken))];
        let dest = dir.path().join("dossier.pdf");
        let report = generate_dossier("C5", &records, &dest).unwrap();

        assert_eq!(report.appended, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(page_count(&dest), 1);
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("dossier.pdf");
        assert!(generate_dossier("C5", &[], &dest).is_err());
    }

    #[test]
    fn test_long_history_flows_onto_more_pages() {
        let dir = tempfile::tempdir().unwrap();
        let records: Vec<MaintenanceRecord> = (0..80)
            .map(|i| record("C5", &format!("Entry {i}"), Some(1.0), None))
            .collect();

        let dest = dir.path().join("dossier.pdf");
        let report = generate_dossier("C5", &records, &dest).unwrap();
        assert_eq!(report.total_cost, 80.0);
        assert!(page_count(&dest) > 1);
    }
}
