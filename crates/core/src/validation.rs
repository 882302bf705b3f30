//! Sell form rules.
//!
//! These run at intake, before a record is assembled. Delivery code trusts
//! the record it is given and does not call into this module.

use crate::error::{CoreError, FieldErrors};
use crate::labels::{CATEGORY_LABELS, CONDITION_LABELS};
use crate::submission::{normalize_whatsapp, NewSubmission};

/// Oldest accepted release year.
pub const MIN_YEAR_RELEASED: i32 = 2020;

/// Minimum number of digits in a WhatsApp number.
pub const MIN_WHATSAPP_DIGITS: usize = 10;

/// Photos required per submission.
pub const MIN_PHOTOS: usize = 1;

/// Photos accepted per submission.
pub const MAX_PHOTOS: usize = 2;

/// Collect every form error, keyed by field name.
pub fn collect_field_errors(input: &NewSubmission) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut reject = |field: &str, message: &str| {
        errors.insert(field.to_string(), message.to_string());
    };

    if input.category.is_empty() {
        reject("category", "Pilih kategori perangkat");
    } else if !CATEGORY_LABELS.contains(&input.category) {
        reject("category", "Kategori perangkat tidak dikenal");
    }
    if input.brand.trim().is_empty() {
        reject("brand", "Masukkan merek perangkat");
    }
    if input.model.trim().is_empty() {
        reject("model", "Masukkan model perangkat");
    }
    match input.year_released {
        None => reject("year_released", "Pilih tahun rilis"),
        Some(year) if year < MIN_YEAR_RELEASED => reject(
            "year_released",
            "Perangkat harus rilis tahun 2020 atau lebih baru",
        ),
        Some(_) => {}
    }

    if input.physical_condition.is_empty() {
        reject("physical_condition", "Pilih kondisi fisik perangkat");
    } else if !CONDITION_LABELS.contains(&input.physical_condition) {
        reject("physical_condition", "Kondisi fisik tidak dikenal");
    }

    if input.full_name.trim().is_empty() {
        reject("full_name", "Nama lengkap wajib diisi");
    }
    let digits = normalize_whatsapp(&input.whatsapp);
    if digits.is_empty() {
        reject("whatsapp", "Nomor WhatsApp wajib diisi");
    } else if digits.len() < MIN_WHATSAPP_DIGITS {
        reject("whatsapp", "Nomor WhatsApp tidak valid");
    }
    if input.full_address.trim().is_empty() {
        reject("full_address", "Alamat lengkap wajib diisi");
    }

    errors
}

/// Validate a form payload, failing with every field error at once.
pub fn validate_new_submission(input: &NewSubmission) -> Result<(), CoreError> {
    let errors = collect_field_errors(input);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(errors))
    }
}

/// Validate the number of attached photos.
pub fn validate_photo_count(count: usize) -> Result<(), CoreError> {
    let message = if count < MIN_PHOTOS {
        "Upload minimal 1 foto perangkat"
    } else if count > MAX_PHOTOS {
        "Maksimal 2 foto saja"
    } else {
        return Ok(());
    };

    let mut errors = FieldErrors::new();
    errors.insert("photos".to_string(), message.to_string());
    Err(CoreError::InvalidFields(errors))
}
