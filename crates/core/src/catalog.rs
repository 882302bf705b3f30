//! Static device catalog offered by the sell form.
//!
//! Brands belong to one category; models belong to one brand. The data is
//! compiled in and only read.

use serde::Serialize;

use crate::labels::{CATEGORY_HP_FLAGSHIP, CATEGORY_KOMPUTER, CATEGORY_LAPTOP};

/// A device brand within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

/// A device model of one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Model {
    pub id: &'static str,
    pub brand_id: &'static str,
    pub name: &'static str,
    pub year_released: i32,
}

const fn brand(id: &'static str, name: &'static str, category: &'static str) -> Brand {
    Brand { id, name, category }
}

const fn model(
    id: &'static str,
    brand_id: &'static str,
    name: &'static str,
    year_released: i32,
) -> Model {
    Model {
        id,
        brand_id,
        name,
        year_released,
    }
}

pub const BRANDS: &[Brand] = &[
    brand("1", "Apple", CATEGORY_HP_FLAGSHIP),
    brand("2", "Samsung", CATEGORY_HP_FLAGSHIP),
    brand("3", "Xiaomi", CATEGORY_HP_FLAGSHIP),
    brand("4", "Google", CATEGORY_HP_FLAGSHIP),
    brand("5", "OnePlus", CATEGORY_HP_FLAGSHIP),
    brand("6", "OPPO", CATEGORY_HP_FLAGSHIP),
    brand("7", "Vivo", CATEGORY_HP_FLAGSHIP),
    brand("8", "ASUS", CATEGORY_LAPTOP),
    brand("9", "Lenovo", CATEGORY_LAPTOP),
    brand("10", "MSI", CATEGORY_LAPTOP),
    brand("11", "Apple", CATEGORY_LAPTOP),
    brand("12", "Dell", CATEGORY_LAPTOP),
    brand("13", "HP", CATEGORY_LAPTOP),
    brand("14", "Acer", CATEGORY_LAPTOP),
    brand("15", "Dell", CATEGORY_KOMPUTER),
    brand("16", "HP", CATEGORY_KOMPUTER),
    brand("17", "ASUS", CATEGORY_KOMPUTER),
    brand("18", "Lenovo", CATEGORY_KOMPUTER),
    brand("19", "Apple", CATEGORY_KOMPUTER),
];

pub const MODELS: &[Model] = &[
    model("1", "1", "iPhone 15 Pro Max", 2023),
    model("2", "1", "iPhone 15 Pro", 2023),
    model("3", "1", "iPhone 14 Pro Max", 2022),
    model("4", "1", "iPhone 14 Pro", 2022),
    model("5", "1", "iPhone 13 Pro Max", 2021),
    model("6", "1", "iPhone 13 Pro", 2021),
    model("7", "1", "iPhone 12 Pro Max", 2020),
    model("8", "1", "iPhone 12 Pro", 2020),
    model("9", "2", "Galaxy S24 Ultra", 2024),
    model("10", "2", "Galaxy S23 Ultra", 2023),
    model("11", "2", "Galaxy S23+", 2023),
    model("12", "2", "Galaxy S22 Ultra", 2022),
    model("13", "2", "Galaxy Z Fold 5", 2023),
    model("14", "2", "Galaxy Z Flip 5", 2023),
    model("15", "3", "Xiaomi 14 Pro", 2024),
    model("16", "3", "Xiaomi 13 Pro", 2023),
    model("17", "3", "Xiaomi 12 Pro", 2022),
    model("18", "4", "Pixel 8 Pro", 2023),
    model("19", "4", "Pixel 7 Pro", 2022),
    model("20", "5", "OnePlus 12", 2024),
    model("21", "5", "OnePlus 11", 2023),
    model("22", "6", "Find X6 Pro", 2023),
    model("23", "6", "Find X5 Pro", 2022),
    model("24", "7", "X90 Pro", 2023),
    model("25", "8", "ROG Zephyrus G16", 2024),
    model("26", "8", "ROG Zephyrus G14", 2023),
    model("27", "8", "ZenBook 14 OLED", 2023),
    model("28", "8", "TUF Gaming A15", 2023),
    model("29", "9", "ThinkPad X1 Carbon Gen 11", 2023),
    model("30", "9", "Legion Pro 7i", 2023),
    model("31", "9", "Yoga 9i", 2023),
    model("32", "10", "Titan GT77", 2023),
    model("33", "10", "GE76 Raider", 2022),
    model("36", "11", "MacBook Air M2", 2022),
    model("37", "12", "XPS 15", 2023),
    model("38", "12", "XPS 13", 2023),
    model("39", "13", "Spectre x360", 2023),
    model("40", "13", "Omen 17", 2023),
    model("41", "14", "Predator Helios 16", 2023),
    model("42", "15", "OptiPlex 7010", 2023),
    model("43", "15", "Precision 3660", 2022),
    model("44", "16", "EliteDesk 800 G9", 2023),
    model("45", "16", "Z2 Tower G9", 2022),
    model("46", "17", "ROG Strix G35", 2023),
    model("47", "18", "ThinkCentre M90a", 2023),
    model("48", "19", "Mac Studio M2 Ultra", 2023),
    model("49", "19", "Mac mini M2 Pro", 2023),
];

/// Brands, optionally restricted to one category.
pub fn brands(category: Option<&str>) -> Vec<Brand> {
    BRANDS
        .iter()
        .filter(|b| category.map_or(true, |c| b.category == c))
        .copied()
        .collect()
}

pub fn brand_by_id(id: &str) -> Option<Brand> {
    BRANDS.iter().find(|b| b.id == id).copied()
}

/// Models, optionally restricted to one brand.
pub fn models(brand_id: Option<&str>) -> Vec<Model> {
    MODELS
        .iter()
        .filter(|m| brand_id.map_or(true, |id| m.brand_id == id))
        .copied()
        .collect()
}

pub fn model_by_id(id: &str) -> Option<Model> {
    MODELS.iter().find(|m| m.id == id).copied()
}
