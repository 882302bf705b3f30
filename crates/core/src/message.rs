//! Admin WhatsApp message rendering.
//!
//! [`MessageFormatter::format`] turns a [`Submission`] into the single text
//! block sent to the admin. Sections appear in a fixed order; optional
//! sections are skipped entirely when they have nothing to show.

use std::fmt::{self, Write};

use chrono::{FixedOffset, Offset};

use crate::labels::{CATEGORY_LABELS, CONDITION_LABELS};
use crate::submission::Submission;

/// Western Indonesia Time (UTC+7), the default for the timestamp line.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// `toLocaleString("id-ID")` style: `19/10/2026, 14.05.09`.
const TIMESTAMP_FORMAT: &str = "%-d/%-m/%Y, %H.%M.%S";

/// Closing line of every message.
pub const CLOSING_LINE: &str = "💬 Silakan hubungi penjual untuk negosiasi harga.";

/// Renders submissions for the admin.
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter {
    offset: FixedOffset,
}

impl MessageFormatter {
    /// Formatter that renders timestamps in `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Formatter for a whole-hour offset east of UTC. Out-of-range values
    /// fall back to UTC.
    pub fn with_utc_offset_hours(hours: i32) -> Self {
        let offset = hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| chrono::Utc.fix());
        Self::new(offset)
    }

    /// Render the message.
    ///
    /// `photo_count` overrides the number shown on the photo line; pass the
    /// number of photos that will follow the text. The line is omitted when
    /// the count is `None` or zero.
    pub fn format(&self, submission: &Submission, photo_count: Option<usize>) -> String {
        // Writing into a String never fails.
        self.render(submission, photo_count).unwrap_or_default()
    }

    fn render(
        &self,
        submission: &Submission,
        photo_count: Option<usize>,
    ) -> Result<String, fmt::Error> {
        let mut msg = String::new();

        writeln!(msg, "🎫 *PENGAJUAN BARU - {}*", submission.ticket_number)?;
        msg.push('\n');

        msg.push_str("📱 *INFORMASI PERANGKAT*\n");
        writeln!(msg, "Kategori: {}", CATEGORY_LABELS.label(&submission.category))?;
        writeln!(msg, "Merek: {}", submission.brand)?;
        writeln!(msg, "Model: {}", submission.model)?;
        writeln!(msg, "Tahun Rilis: {}", submission.year_released)?;
        writeln!(
            msg,
            "Kondisi Fisik: {}",
            CONDITION_LABELS.label(&submission.physical_condition)
        )?;
        if let Some(count) = photo_count.filter(|c| *c > 0) {
            writeln!(msg, "Foto: {count} terlampir")?;
        }
        msg.push('\n');

        push_bullets(&mut msg, "✅ *FITUR BERFUNGSI*", &submission.functional_features)?;
        push_bullets(&mut msg, "📦 *KELENGKAPAN*", &submission.accessories)?;

        msg.push_str("👤 *INFORMASI PENJUAL*\n");
        writeln!(msg, "Nama: {}", submission.full_name)?;
        writeln!(msg, "WhatsApp: {}", submission.whatsapp)?;
        if let Some(email) = submission.email.as_deref().filter(|e| !e.is_empty()) {
            writeln!(msg, "Email: {email}")?;
        }
        writeln!(msg, "Alamat: {}", submission.full_address)?;
        if let Some(url) = submission.map_url() {
            writeln!(msg, "Lokasi: {url}")?;
        }

        let local = submission.created_at.with_timezone(&self.offset);
        writeln!(msg, "\n📅 Waktu Pengajuan: {}", local.format(TIMESTAMP_FORMAT))?;
        msg.push('\n');
        msg.push_str(CLOSING_LINE);

        Ok(msg)
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::with_utc_offset_hours(DEFAULT_UTC_OFFSET_HOURS)
    }
}

fn push_bullets(msg: &mut String, header: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    msg.push_str(header);
    msg.push('\n');
    for item in items {
        writeln!(msg, "• {item}")?;
    }
    msg.push('\n');
    Ok(())
}

/// Caption attached to the `index`-th photo (zero-based) of a submission.
pub fn photo_caption(index: usize, ticket_number: &str) -> String {
    format!("Foto {} - {ticket_number}", index + 1)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn scenario() -> Submission {
        let at = chrono::Utc.with_ymd_and_hms(2026, 10, 19, 7, 5, 9).unwrap();
        Submission {
            id: "sub_1".into(),
            ticket_number: "JP-1234567890".into(),
            category: "laptop".into(),
            brand: "ASUS".into(),
            model: "ROG Zephyrus".into(),
            year_released: 2023,
            physical_condition: "mulus".into(),
            functional_features: vec!["layar".into(), "baterai".into()],
            accessories: vec![],
            full_name: "Budi".into(),
            whatsapp: "081234567890".into(),
            email: None,
            full_address: "Jl. Merdeka 1".into(),
            location_lat: None,
            location_lng: None,
            status: "pending".into(),
            created_at: at,
            updated_at: at,
        }
    }

    fn lines(msg: &str) -> Vec<&str> {
        msg.lines().collect()
    }

    #[test]
    fn scenario_message_contains_expected_lines() {
        let msg = MessageFormatter::default().format(&scenario(), None);
        let lines = lines(&msg);

        assert_eq!(lines[0], "🎫 *PENGAJUAN BARU - JP-1234567890*");
        assert!(lines.contains(&"Kategori: Laptop"));
        assert!(lines.contains(&"Merek: ASUS"));
        assert!(lines.contains(&"Model: ROG Zephyrus"));
        assert!(lines.contains(&"Tahun Rilis: 2023"));
        assert!(lines.contains(&"Kondisi Fisik: Mulus (Seperti Baru)"));
        assert!(lines.contains(&"Nama: Budi"));
        assert!(lines.contains(&"WhatsApp: 081234567890"));
        assert!(lines.contains(&"Alamat: Jl. Merdeka 1"));

        let bullets: Vec<_> = lines.iter().filter(|l| l.starts_with("• ")).collect();
        assert_eq!(bullets, vec![&"• layar", &"• baterai"]);

        assert!(msg.contains("FITUR BERFUNGSI"));
        assert!(!msg.contains("KELENGKAPAN"));
        assert!(!msg.contains("Email:"));
        assert!(!msg.contains("Lokasi:"));
        assert!(msg.ends_with(CLOSING_LINE));
    }

    #[test]
    fn sections_keep_fixed_order() {
        let mut sub = scenario();
        sub.accessories = vec!["dus".into()];
        let msg = MessageFormatter::default().format(&sub, None);

        let pos = |needle: &str| msg.find(needle).unwrap();
        assert!(pos("PENGAJUAN BARU") < pos("INFORMASI PERANGKAT"));
        assert!(pos("INFORMASI PERANGKAT") < pos("FITUR BERFUNGSI"));
        assert!(pos("FITUR BERFUNGSI") < pos("KELENGKAPAN"));
        assert!(pos("KELENGKAPAN") < pos("INFORMASI PENJUAL"));
        assert!(pos("INFORMASI PENJUAL") < pos("Waktu Pengajuan"));
    }

    #[test]
    fn empty_lists_omit_both_sections() {
        let mut sub = scenario();
        sub.functional_features.clear();
        let msg = MessageFormatter::default().format(&sub, None);

        assert!(!msg.contains("FITUR BERFUNGSI"));
        assert!(!msg.contains("KELENGKAPAN"));
        assert!(!msg.contains('•'));
    }

    #[test]
    fn unknown_labels_render_raw_values() {
        let mut sub = scenario();
        sub.category = "tablet".into();
        sub.physical_condition = "lecet_halus".into();
        let msg = MessageFormatter::default().format(&sub, None);

        assert!(msg.contains("Kategori: tablet\n"));
        assert!(msg.contains("Kondisi Fisik: lecet_halus\n"));
    }

    #[test]
    fn map_line_embeds_coordinates_in_order() {
        let mut sub = scenario();
        sub.location_lat = Some(-6.175392);
        sub.location_lng = Some(106.827153);
        let msg = MessageFormatter::default().format(&sub, None);

        assert!(msg.contains("Lokasi: https://maps.google.com/?q=-6.175392,106.827153\n"));
    }

    #[test]
    fn optional_email_is_rendered_when_present() {
        let mut sub = scenario();
        sub.email = Some("budi@example.com".into());
        let msg = MessageFormatter::default().format(&sub, None);
        assert!(msg.contains("Email: budi@example.com\n"));
    }

    #[test]
    fn photo_count_line_follows_override() {
        let sub = scenario();
        let fmt = MessageFormatter::default();

        assert!(fmt.format(&sub, Some(2)).contains("Foto: 2 terlampir\n"));
        assert!(!fmt.format(&sub, Some(0)).contains("Foto:"));
        assert!(!fmt.format(&sub, None).contains("Foto:"));
    }

    #[test]
    fn timestamp_uses_indonesian_style_in_wib() {
        let msg = MessageFormatter::default().format(&scenario(), None);
        assert!(msg.contains("📅 Waktu Pengajuan: 19/10/2026, 14.05.09\n"));
    }

    #[test]
    fn timestamp_respects_configured_offset() {
        let msg = MessageFormatter::with_utc_offset_hours(9).format(&scenario(), None);
        assert!(msg.contains("Waktu Pengajuan: 19/10/2026, 16.05.09"));
    }

    #[test]
    fn render_completes_with_every_optional_section() {
        let mut sub = scenario();
        sub.accessories = vec!["dus".into(), "charger".into()];
        sub.email = Some("budi@example.com".into());
        sub.location_lat = Some(-6.2);
        sub.location_lng = Some(106.8);
        let fmt = MessageFormatter::default();

        let rendered = fmt.render(&sub, Some(3)).unwrap();
        assert_eq!(rendered, fmt.format(&sub, Some(3)));
        assert!(rendered.contains("• charger\n"));
        assert!(rendered.ends_with(CLOSING_LINE));
    }

    #[test]
    fn caption_is_one_based() {
        assert_eq!(photo_caption(0, "JP20261019-0001"), "Foto 1 - JP20261019-0001");
        assert_eq!(photo_caption(2, "T"), "Foto 3 - T");
    }
}
